//! Backtest analytics and reporting

use super::types::Trade;
use serde::{Deserialize, Serialize};

/// Trading periods per year used to annualize the Sharpe ratio
pub const SHARPE_PERIODS_PER_YEAR: f64 = 252.0;

/// Aggregate statistics derived from a closed-trade ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Winning share of trades in percent
    pub win_rate: f64,
    /// Sum of winning trade profits
    pub total_profit: f64,
    /// Absolute sum of losing trade profits
    pub total_loss: f64,
    pub net_profit: f64,
    /// `total_profit / total_loss`; infinite when only winners exist
    #[serde(with = "unbounded_f64")]
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough equity decline in percent
    pub max_drawdown: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    /// Most negative trade profit (zero without losers)
    pub largest_loss: f64,
    pub final_capital: f64,
    pub return_percent: f64,
    pub trades: Vec<Trade>,
}

impl BacktestMetrics {
    /// Derive metrics from closed trades and the equity curve.
    ///
    /// `equity` holds capital after each closed trade, seeded with
    /// `initial_capital`. Every ratio falls back to zero on an empty ledger.
    pub fn calculate(trades: Vec<Trade>, equity: &[f64], initial_capital: f64) -> Self {
        let wins: Vec<f64> = trades.iter().filter(|t| t.is_win()).map(|t| t.profit).collect();
        let losses: Vec<f64> = trades.iter().filter(|t| t.is_loss()).map(|t| t.profit).collect();

        let total_profit: f64 = wins.iter().sum();
        let total_loss = losses.iter().sum::<f64>().abs();

        let profit_factor = if total_loss > 0.0 {
            total_profit / total_loss
        } else if total_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let final_capital = equity.last().copied().unwrap_or(initial_capital);
        let return_percent = if initial_capital != 0.0 {
            (final_capital - initial_capital) / initial_capital * 100.0
        } else {
            0.0
        };

        let period_returns: Vec<f64> = equity
            .windows(2)
            .filter(|pair| pair[0] != 0.0)
            .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
            .collect();

        Self {
            total_trades: trades.len(),
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            win_rate: ratio_pct(wins.len(), trades.len()),
            total_profit,
            total_loss,
            net_profit: total_profit - total_loss,
            profit_factor,
            sharpe_ratio: annualized_sharpe(&period_returns),
            max_drawdown: max_drawdown_pct(equity),
            avg_win: mean(&wins),
            avg_loss: if losses.is_empty() {
                0.0
            } else {
                total_loss / losses.len() as f64
            },
            largest_win: wins.iter().copied().reduce(f64::max).unwrap_or(0.0),
            largest_loss: losses.iter().copied().reduce(f64::min).unwrap_or(0.0),
            final_capital,
            return_percent,
            trades,
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let profit_factor = if self.profit_factor.is_infinite() {
            "inf".to_string()
        } else {
            format!("{:.2}", self.profit_factor)
        };

        format!(
            r#"
══════════════════════════════════════════════════════
               BACKTEST RESULTS
══════════════════════════════════════════════════════

PERFORMANCE
───────────────────────────────────────────────────────
Net P&L:          {:+.2} ({:+.2}%)
Final Capital:    {:.2}
Sharpe Ratio:     {:.2}
Max Drawdown:     {:.2}%
Win Rate:         {:.1}%
Profit Factor:    {}

ACTIVITY
───────────────────────────────────────────────────────
Total Trades:     {} ({} won, {} lost)
Avg Win:          {:.2}
Avg Loss:         {:.2}
Largest Win:      {:.2}
Largest Loss:     {:.2}
══════════════════════════════════════════════════════
"#,
            self.net_profit,
            self.return_percent,
            self.final_capital,
            self.sharpe_ratio,
            self.max_drawdown,
            self.win_rate,
            profit_factor,
            self.total_trades,
            self.winning_trades,
            self.losing_trades,
            self.avg_win,
            self.avg_loss,
            self.largest_win,
            self.largest_loss,
        )
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn ratio_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Largest peak-to-trough decline of an equity curve, in percent
pub(crate) fn max_drawdown_pct(equity: &[f64]) -> f64 {
    let Some(&first) = equity.first() else {
        return 0.0;
    };
    let mut peak = first;
    let mut max_drawdown: f64 = 0.0;

    for &value in equity {
        peak = peak.max(value);
        if peak > 0.0 {
            max_drawdown = max_drawdown.max((peak - value) / peak * 100.0);
        }
    }
    max_drawdown
}

/// Mean over population standard deviation of returns, scaled by √252
pub(crate) fn annualized_sharpe(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let avg = mean(returns);
    let variance = returns.iter().map(|r| (r - avg).powi(2)).sum::<f64>() / returns.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev > 0.0 {
        let sharpe = avg / std_dev * SHARPE_PERIODS_PER_YEAR.sqrt();
        if sharpe.is_finite() {
            return sharpe;
        }
    }
    0.0
}

/// Serializes infinities as `null` so reports stay valid JSON
mod unbounded_f64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
