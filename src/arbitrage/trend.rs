//! Short-window spread trend classification

use super::detector::detect;
use super::types::ArbitrageOpportunity;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Spreads retained per symbol
const TREND_WINDOW: usize = 5;
/// Minimum samples before a trend is reported
const MIN_TREND_SAMPLES: usize = 3;
/// Dead band between recent and older means, in spread points
const TREND_DEAD_BAND: f64 = 0.05;

/// Direction of recent spread movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadTrend {
    Rising,
    Falling,
    #[default]
    Stable,
}

/// Rolling per-symbol spread history
#[derive(Debug, Default)]
pub struct TrendTracker {
    history: HashMap<String, VecDeque<f64>>,
}

impl TrendTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a spread and classify the trend.
    ///
    /// Compares the mean of the two newest spreads with the mean of the
    /// older ones in the window.
    pub fn record(&mut self, symbol: &str, spread: f64) -> SpreadTrend {
        let spreads = self.history.entry(symbol.to_string()).or_default();
        spreads.push_back(spread);
        if spreads.len() > TREND_WINDOW {
            spreads.pop_front();
        }
        if spreads.len() < MIN_TREND_SAMPLES {
            return SpreadTrend::Stable;
        }

        let split = spreads.len() - 2;
        let recent = spreads.iter().skip(split).sum::<f64>() / 2.0;
        let older = spreads.iter().take(split).sum::<f64>() / split as f64;

        if recent > older + TREND_DEAD_BAND {
            SpreadTrend::Rising
        } else if recent < older - TREND_DEAD_BAND {
            SpreadTrend::Falling
        } else {
            SpreadTrend::Stable
        }
    }

    /// Detect an opportunity and tag it with the trend of its spread percentage
    pub fn detect(
        &mut self,
        symbol: &str,
        spot_price: f64,
        futures_price: f64,
        threshold_pct: f64,
    ) -> ArbitrageOpportunity {
        let mut opportunity = detect(symbol, spot_price, futures_price, threshold_pct);
        opportunity.spread_trend = self.record(symbol, opportunity.spread_percentage);
        opportunity
    }

    /// Change between the two newest spreads
    pub fn spread_change(&self, symbol: &str) -> Option<f64> {
        let spreads = self.history.get(symbol)?;
        let n = spreads.len();
        (n >= 2).then(|| spreads[n - 1] - spreads[n - 2])
    }

    /// Forget all history
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
