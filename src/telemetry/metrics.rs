//! Prometheus metrics
//!
//! Recording is a no-op until a recorder is installed by
//! [`init_telemetry`](super::init_telemetry).

use crate::forecast::ForecastMethod;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full backtest simulation
    Backtest,
    /// One forecast invocation
    Forecast,
    /// Timeframe aggregation
    Aggregate,
}

impl LatencyMetric {
    fn operation(&self) -> &'static str {
        match self {
            LatencyMetric::Backtest => "backtest",
            LatencyMetric::Forecast => "forecast",
            LatencyMetric::Aggregate => "aggregate",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1000.0;
    ::metrics::histogram!("arb_compute_latency_ms", "operation" => metric.operation())
        .record(value_ms);
    tracing::debug!(operation = metric.operation(), value_ms, "Recording latency");
}

/// Count one finished backtest and the trades it closed
pub fn record_backtest(trades: usize) {
    ::metrics::counter!("arb_backtest_runs_total").increment(1);
    ::metrics::counter!("arb_backtest_trades_total").increment(trades as u64);
}

/// Count one forecast run
pub fn record_forecast(method: ForecastMethod) {
    ::metrics::counter!("arb_forecast_runs_total", "method" => method.to_string()).increment(1);
}

/// Count samples discarded by series sanitization
pub fn record_samples_dropped(count: usize) {
    if count > 0 {
        ::metrics::counter!("arb_samples_dropped_total").increment(count as u64);
    }
}
