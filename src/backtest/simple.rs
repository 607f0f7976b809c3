//! Long-only backtest used by the interactive dashboard
//!
//! Fixed quantity, enters when the spread reaches the buy threshold and
//! exits when it falls to the sell threshold or the range ends.

use super::analytics::{annualized_sharpe, max_drawdown_pct};
use crate::series::TimePoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration for the dashboard backtest
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimpleBacktestConfig {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    /// Enter long at or above this spread
    #[serde(default = "default_buy_threshold")]
    pub buy_threshold: f64,
    /// Exit at or below this spread
    #[serde(default = "default_sell_threshold")]
    pub sell_threshold: f64,
    /// Units per trade
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Inclusive range start (Unix ms)
    #[serde(default)]
    pub start_ms: Option<i64>,
    /// Inclusive range end (Unix ms)
    #[serde(default)]
    pub end_ms: Option<i64>,
}

fn default_initial_capital() -> f64 {
    100_000.0
}
fn default_buy_threshold() -> f64 {
    0.5
}
fn default_sell_threshold() -> f64 {
    0.1
}
fn default_quantity() -> f64 {
    100.0
}

impl Default for SimpleBacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            buy_threshold: default_buy_threshold(),
            sell_threshold: default_sell_threshold(),
            quantity: default_quantity(),
            start_ms: None,
            end_ms: None,
        }
    }
}

impl SimpleBacktestConfig {
    fn in_range(&self, timestamp: i64) -> bool {
        self.start_ms.is_none_or(|start| timestamp >= start)
            && self.end_ms.is_none_or(|end| timestamp <= end)
    }
}

/// Reporting label of a closed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeLabel {
    /// Profitable exit
    Buy,
    /// Flat or losing exit
    Sell,
}

/// One closed dashboard trade, recorded at exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub timestamp: i64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub label: TradeLabel,
    pub spot_price: f64,
    pub futures_price: f64,
    pub quantity: f64,
    /// Spread at exit
    pub spread: f64,
    pub pnl: f64,
}

/// Dashboard backtest summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleBacktestResult {
    pub total_trades: usize,
    pub profitable_trades: usize,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub win_rate: f64,
    pub trades: Vec<LedgerEntry>,
}

/// Run the dashboard backtest for one symbol
pub fn run_simple_backtest(
    symbol: &str,
    series: &[TimePoint],
    config: &SimpleBacktestConfig,
) -> SimpleBacktestResult {
    let filtered: Vec<&TimePoint> = series.iter().filter(|p| config.in_range(p.timestamp)).collect();
    if filtered.is_empty() {
        tracing::warn!(symbol = symbol, "No data available for selected range");
        return SimpleBacktestResult::default();
    }

    let mut entry_price: Option<f64> = None;
    let mut trades = Vec::new();
    let last_idx = filtered.len() - 1;

    for (idx, point) in filtered.iter().enumerate() {
        match entry_price {
            None if point.spread >= config.buy_threshold => {
                entry_price = Some(point.spot);
            }
            Some(entry) if point.spread <= config.sell_threshold || idx == last_idx => {
                let pnl = (point.spot - entry) * config.quantity;
                trades.push(LedgerEntry {
                    id: Uuid::new_v4(),
                    timestamp: point.timestamp,
                    symbol: symbol.to_string(),
                    label: if pnl > 0.0 { TradeLabel::Buy } else { TradeLabel::Sell },
                    spot_price: point.spot,
                    futures_price: point.futures,
                    quantity: config.quantity,
                    spread: point.spread,
                    pnl,
                });
                entry_price = None;
            }
            _ => {}
        }
    }

    let profitable_trades = trades.iter().filter(|t| t.pnl > 0.0).count();
    let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();

    let mut equity = Vec::with_capacity(trades.len() + 1);
    equity.push(config.initial_capital);
    for trade in &trades {
        equity.push(equity[equity.len() - 1] + trade.pnl);
    }

    let returns: Vec<f64> = if config.initial_capital != 0.0 {
        trades
            .iter()
            .map(|t| t.pnl / config.initial_capital * 100.0)
            .collect()
    } else {
        vec![]
    };

    let win_rate = if trades.is_empty() {
        0.0
    } else {
        profitable_trades as f64 / trades.len() as f64 * 100.0
    };

    tracing::debug!(
        symbol = symbol,
        samples = filtered.len(),
        trades = trades.len(),
        total_pnl = total_pnl,
        "Dashboard backtest complete"
    );

    SimpleBacktestResult {
        total_trades: trades.len(),
        profitable_trades,
        total_pnl,
        max_drawdown: max_drawdown_pct(&equity),
        sharpe_ratio: annualized_sharpe(&returns),
        win_rate,
        trades,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(spreads: &[f64], spots: &[f64]) -> Vec<TimePoint> {
        spreads
            .iter()
            .zip(spots)
            .enumerate()
            .map(|(i, (spread, spot))| TimePoint::new(i as i64 * 60_000, *spot, *spot + 1.0, *spread))
            .collect()
    }

    #[test]
    fn test_threshold_round_trip() {
        let data = series(&[0.2, 0.5, 0.3, 0.1, 0.6], &[100.0, 101.0, 102.0, 103.0, 104.0]);
        let result = run_simple_backtest("TCS", &data, &SimpleBacktestConfig::default());

        // Enter at 101 (spread 0.5), exit at 103 (spread 0.1); re-entry at the last sample stays open
        assert_eq!(result.total_trades, 1);
        let trade = &result.trades[0];
        assert_eq!(trade.pnl, 200.0);
        assert_eq!(trade.label, TradeLabel::Buy);
        assert_eq!(trade.spot_price, 103.0);
        assert_eq!(trade.futures_price, 104.0);
        assert_eq!(trade.quantity, 100.0);
        assert_eq!(trade.symbol, "TCS");
        assert_eq!(result.profitable_trades, 1);
        assert_eq!(result.win_rate, 100.0);
    }

    #[test]
    fn test_last_sample_closes_position() {
        let data = series(&[0.6, 0.7, 0.8], &[100.0, 99.0, 98.0]);
        let result = run_simple_backtest("SBIN", &data, &SimpleBacktestConfig::default());

        assert_eq!(result.total_trades, 1);
        assert_eq!(result.trades[0].pnl, -200.0);
        assert_eq!(result.trades[0].label, TradeLabel::Sell);
        // 200 lost from 100000
        assert!((result.max_drawdown - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_range_filter() {
        let data = series(&[0.6, 0.0, 0.6, 0.0], &[100.0, 110.0, 100.0, 90.0]);
        let config = SimpleBacktestConfig {
            start_ms: Some(120_000),
            ..Default::default()
        };
        let result = run_simple_backtest("ITC", &data, &config);
        assert_eq!(result.total_trades, 1);
        assert_eq!(result.total_pnl, -1000.0);

        let config = SimpleBacktestConfig {
            start_ms: Some(10 * 60_000),
            ..Default::default()
        };
        assert_eq!(
            run_simple_backtest("ITC", &data, &config),
            SimpleBacktestResult::default()
        );
    }

    #[test]
    fn test_sharpe_over_capital_returns() {
        let data = series(
            &[0.6, 0.0, 0.6, 0.0, 0.6, 0.0],
            &[100.0, 101.0, 100.0, 103.0, 100.0, 102.0],
        );
        let result = run_simple_backtest("LT", &data, &SimpleBacktestConfig::default());
        assert_eq!(result.total_trades, 3);
        // returns 0.1%, 0.3%, 0.2%: mean 0.2, population std sqrt(2/3)/10
        let std_dev = (2.0_f64 / 3.0).sqrt() / 10.0;
        let expected = 0.2 / std_dev * 252.0_f64.sqrt();
        assert!((result.sharpe_ratio - expected).abs() < 1e-6);
    }

    #[test]
    fn test_serializes_dashboard_shape() {
        let data = series(&[0.6, 0.0], &[100.0, 101.0]);
        let result = run_simple_backtest("INFY", &data, &SimpleBacktestConfig::default());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"totalPnL\":100.0"));
        assert!(json.contains("\"type\":\"buy\""));
        assert!(json.contains("\"profitableTrades\":1"));
    }
}
