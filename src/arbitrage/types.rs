//! Arbitrage types

use super::trend::SpreadTrend;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-symbol snapshot pushed by the market feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub spot_price: f64,
    pub futures_price: f64,
    /// Spread as a percentage of spot
    pub spread_percentage: f64,
    /// Exchange lot size, when the feed provides it
    #[serde(default)]
    pub lot_size: Option<u32>,
    /// Feed-side update label
    #[serde(default)]
    pub last_update: Option<String>,
}

impl MarketSnapshot {
    /// Create a snapshot without optional feed fields
    pub fn new(symbol: &str, spot_price: f64, futures_price: f64, spread_percentage: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            spot_price,
            futures_price,
            spread_percentage,
            lot_size: None,
            last_update: None,
        }
    }
}

/// Suggested legs for a cash-futures trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArbitrageAction {
    /// Futures rich to spot: cash-and-carry
    BuySpotSellFutures,
    /// Futures cheap to spot: reverse cash-and-carry
    SellSpotBuyFutures,
    Hold,
}

impl fmt::Display for ArbitrageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArbitrageAction::BuySpotSellFutures => "BUY Spot, SELL Futures",
            ArbitrageAction::SellSpotBuyFutures => "SELL Spot, BUY Futures",
            ArbitrageAction::Hold => "HOLD",
        })
    }
}

/// Lot-level profit estimate for a spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitMetrics {
    pub lot_size: u32,
    pub gross_profit: f64,
    pub margin_required: f64,
    pub roi_percentage: f64,
}

/// Result of checking one pair against the entry threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub opportunity: bool,
    pub symbol: String,
    pub spot_price: f64,
    pub futures_price: f64,
    /// Absolute spread, futures minus spot
    pub spread: f64,
    pub spread_percentage: f64,
    pub action: ArbitrageAction,
    pub profit: ProfitMetrics,
    /// Recent spread direction; `Stable` unless filled by a [`TrendTracker`]
    ///
    /// [`TrendTracker`]: super::TrendTracker
    #[serde(default)]
    pub spread_trend: SpreadTrend,
}
