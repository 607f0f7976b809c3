//! Backtest ledger types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Long,
    Short,
}

impl TradeType {
    /// +1 for long, -1 for short
    pub fn direction(&self) -> f64 {
        match self {
            TradeType::Long => 1.0,
            TradeType::Short => -1.0,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TradeType::Long => "LONG",
            TradeType::Short => "SHORT",
        })
    }
}

/// Which exit condition closed a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Unrealized loss beyond the stop-loss percentage
    StopLoss,
    /// Unrealized gain beyond the take-profit percentage
    TakeProfit,
    /// Spread crossed zero against the position
    SpreadReversal,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExitReason::StopLoss => "stop_loss",
            ExitReason::TakeProfit => "take_profit",
            ExitReason::SpreadReversal => "spread_reversal",
        })
    }
}

/// Position held between an entry and an exit signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPosition {
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub entry_time: i64,
    /// Spread observed at entry
    pub spread: f64,
}

impl OpenPosition {
    /// Unrealized return in percent at `spot`, signed for the direction
    pub fn unrealized_pct(&self, spot: f64) -> f64 {
        (spot - self.entry_price) / self.entry_price * 100.0 * self.trade_type.direction()
    }
}

/// A closed round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub entry_time: i64,
    pub exit_time: i64,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Spread observed at entry
    pub spread: f64,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Net profit after transaction costs
    pub profit: f64,
    /// Net profit as a percentage of entry price
    pub profit_percent: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    /// Profit before transaction costs
    pub fn gross_profit(&self) -> f64 {
        (self.exit_price - self.entry_price) * self.trade_type.direction()
    }

    /// True when the trade made money after costs
    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }

    /// True when the trade lost money after costs
    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}
