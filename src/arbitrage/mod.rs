//! Cash-futures arbitrage module
//!
//! Feed snapshot shape, spread opportunity detection, lot-level profit
//! estimates and spread trend tracking

mod detector;
mod lots;
mod trend;
mod types;

pub use detector::detect;
pub use lots::{lot_size, net_profit_after_costs, profit_metrics, FUTURES_MARGIN_RATE};
pub use trend::{SpreadTrend, TrendTracker};
pub use types::{ArbitrageAction, ArbitrageOpportunity, MarketSnapshot, ProfitMetrics};
