//! Single-position threshold strategy replay
//!
//! State machine: FLAT -> LONG | SHORT -> FLAT. The first sample seeds the
//! replay and is never traded. A position still open after the last sample
//! is not closed and never reaches the ledger.

use super::types::{ExitReason, OpenPosition, Trade, TradeType};
use super::{BacktestConfig, BacktestMetrics};
use crate::series::TimePoint;
use crate::telemetry;
use std::time::Instant;

/// Incremental replay over a chronologically ordered series
#[derive(Debug, Clone)]
pub struct Simulation {
    config: BacktestConfig,
    position: Option<OpenPosition>,
    trades: Vec<Trade>,
    capital: f64,
    equity: Vec<f64>,
    samples_seen: usize,
}

impl Simulation {
    /// Start a replay in the FLAT state
    pub fn new(config: BacktestConfig) -> Self {
        let capital = config.initial_capital;
        Self {
            config,
            position: None,
            trades: Vec::new(),
            capital,
            equity: vec![capital],
            samples_seen: 0,
        }
    }

    /// Feed the next sample. Returns the trade closed on this sample, if any.
    pub fn step(&mut self, point: &TimePoint) -> Option<&Trade> {
        self.samples_seen += 1;
        if self.samples_seen == 1 {
            return None;
        }

        if self.position.is_none() {
            self.position = self.entry_signal(point);
        }

        let position = self.position.as_ref()?;
        let reason = self.exit_signal(position, point)?;
        let position = self.position.take()?;
        self.close(position, point, reason);
        self.trades.last()
    }

    fn entry_signal(&self, point: &TimePoint) -> Option<OpenPosition> {
        let trade_type = if point.spread > self.config.threshold {
            TradeType::Long
        } else if point.spread < -self.config.threshold {
            TradeType::Short
        } else {
            return None;
        };

        tracing::trace!(
            side = %trade_type,
            spot = point.spot,
            spread = point.spread,
            "Entry signal"
        );

        Some(OpenPosition {
            trade_type,
            entry_price: point.spot,
            entry_time: point.timestamp,
            spread: point.spread,
        })
    }

    fn exit_signal(&self, position: &OpenPosition, point: &TimePoint) -> Option<ExitReason> {
        let unrealized = position.unrealized_pct(point.spot);

        if self.config.stop_loss().is_some_and(|sl| unrealized < -sl) {
            return Some(ExitReason::StopLoss);
        }
        if self.config.take_profit().is_some_and(|tp| unrealized > tp) {
            return Some(ExitReason::TakeProfit);
        }

        let reversed = match position.trade_type {
            TradeType::Long => point.spread < 0.0,
            TradeType::Short => point.spread > 0.0,
        };
        reversed.then_some(ExitReason::SpreadReversal)
    }

    fn close(&mut self, position: OpenPosition, point: &TimePoint, reason: ExitReason) {
        let exit_price = point.spot;
        let gross = (exit_price - position.entry_price) * position.trade_type.direction();
        let costs = self.config.transaction_costs(position.entry_price, exit_price);
        let profit = gross - costs;

        self.capital += profit;
        self.equity.push(self.capital);
        self.trades.push(Trade {
            entry_time: position.entry_time,
            exit_time: point.timestamp,
            entry_price: position.entry_price,
            exit_price,
            spread: position.spread,
            trade_type: position.trade_type,
            profit,
            profit_percent: profit / position.entry_price * 100.0,
            exit_reason: reason,
        });
    }

    /// Currently open position
    pub fn position(&self) -> Option<&OpenPosition> {
        self.position.as_ref()
    }

    /// Closed trades so far
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Capital after all closed trades
    pub fn capital(&self) -> f64 {
        self.capital
    }

    /// End the replay and derive metrics from the closed trades
    pub fn finish(self) -> BacktestMetrics {
        if let Some(open) = &self.position {
            tracing::debug!(
                side = %open.trade_type,
                entry_time = open.entry_time,
                "Open position discarded at end of series"
            );
        }
        BacktestMetrics::calculate(self.trades, &self.equity, self.config.initial_capital)
    }
}

/// Runs the threshold strategy over whole series
#[derive(Debug, Clone, Default)]
pub struct BacktestSimulator {
    config: BacktestConfig,
}

impl BacktestSimulator {
    /// Create a new simulator
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Strategy configuration
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the backtest
    pub fn run(&self, series: &[TimePoint]) -> BacktestMetrics {
        let started = Instant::now();
        let mut simulation = Simulation::new(self.config.clone());
        for point in series {
            simulation.step(point);
        }
        let metrics = simulation.finish();

        telemetry::record_backtest(metrics.total_trades);
        telemetry::record_latency(telemetry::LatencyMetric::Backtest, started.elapsed());
        tracing::debug!(
            samples = series.len(),
            trades = metrics.total_trades,
            net_profit = metrics.net_profit,
            "Backtest complete"
        );

        metrics
    }
}

/// Replay `series` through the threshold strategy
pub fn run_backtest(series: &[TimePoint], config: &BacktestConfig) -> BacktestMetrics {
    BacktestSimulator::new(config.clone()).run(series)
}
