//! Backtesting module
//!
//! Replays a spread series through a single-position threshold strategy and
//! derives performance metrics from the closed-trade ledger.

mod analytics;
mod simple;
mod simulator;
mod types;

pub use analytics::BacktestMetrics;
pub use simple::{
    run_simple_backtest, LedgerEntry, SimpleBacktestConfig, SimpleBacktestResult, TradeLabel,
};
pub use simulator::{run_backtest, BacktestSimulator, Simulation};
pub use types::{ExitReason, OpenPosition, Trade, TradeType};

use serde::Deserialize;

/// Threshold strategy configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BacktestConfig {
    /// Starting capital
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    /// Entry threshold on the spread percentage
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Exit when unrealized loss exceeds this percentage
    #[serde(default)]
    pub stop_loss_pct: Option<f64>,
    /// Exit when unrealized gain exceeds this percentage
    #[serde(default)]
    pub take_profit_pct: Option<f64>,
    /// Commission per side as a percentage of price
    #[serde(default = "default_commission_pct")]
    pub commission_pct: f64,
    /// Slippage per side as a percentage of price
    #[serde(default = "default_slippage_pct")]
    pub slippage_pct: f64,
}

fn default_initial_capital() -> f64 {
    100_000.0
}
fn default_threshold() -> f64 {
    0.5
}
fn default_commission_pct() -> f64 {
    0.03
}
fn default_slippage_pct() -> f64 {
    0.01
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            threshold: default_threshold(),
            stop_loss_pct: None,
            take_profit_pct: None,
            commission_pct: default_commission_pct(),
            slippage_pct: default_slippage_pct(),
        }
    }
}

impl BacktestConfig {
    /// Commission plus slippage on both legs of a round trip
    pub fn transaction_costs(&self, entry_price: f64, exit_price: f64) -> f64 {
        (entry_price + exit_price) * (self.commission_pct + self.slippage_pct) / 100.0
    }

    /// Stop-loss bound, if enabled
    pub fn stop_loss(&self) -> Option<f64> {
        self.stop_loss_pct.filter(|pct| *pct > 0.0)
    }

    /// Take-profit bound, if enabled
    pub fn take_profit(&self) -> Option<f64> {
        self.take_profit_pct.filter(|pct| *pct > 0.0)
    }
}
