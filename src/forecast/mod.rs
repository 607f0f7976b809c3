//! Spread forecasting module
//!
//! Projects the spread series forward with interchangeable estimators.
//! Every estimator returns an empty forecast when history is too short.

mod ema;
mod regression;
mod sma;
mod types;

pub use ema::{predict_ema, EmaForecaster};
pub use regression::{fit_line, predict_linear_regression, LinearFit, LinearRegressionForecaster};
pub use sma::{predict_sma, SmaForecaster};
pub use types::{ForecastError, ForecastMethod, ForecastPoint};

use crate::config::ForecastConfig;
use crate::series::TimePoint;
use crate::telemetry;
use std::time::Instant;

/// Default width of one horizon step (one minute)
pub const DEFAULT_STEP_MS: i64 = 60_000;

/// Two-sided 95% normal quantile
pub const Z_95: f64 = 1.96;

/// Trait for spread estimator implementations
pub trait SpreadForecaster: Send + Sync {
    /// Estimator identity
    fn method(&self) -> ForecastMethod;
    /// Project `horizon` steps past the last sample of `history`
    fn predict(&self, history: &[TimePoint], horizon: usize) -> Vec<ForecastPoint>;
}

/// Build the estimator selected in configuration
pub fn build_forecaster(
    config: &ForecastConfig,
) -> Result<Box<dyn SpreadForecaster>, ForecastError> {
    let forecaster: Box<dyn SpreadForecaster> = match config.method {
        ForecastMethod::Sma => Box::new(SmaForecaster::new(config.periods, config.step_ms)?),
        ForecastMethod::Ema => Box::new(EmaForecaster::new(config.alpha, config.step_ms)?),
        ForecastMethod::Linear => Box::new(LinearRegressionForecaster::new(config.step_ms)?),
    };
    Ok(forecaster)
}

/// Forecast `config.horizon` points with the configured estimator
pub fn run_forecast(
    config: &ForecastConfig,
    history: &[TimePoint],
) -> Result<Vec<ForecastPoint>, ForecastError> {
    let started = Instant::now();
    let forecaster = build_forecaster(config)?;
    let forecast = forecaster.predict(history, config.horizon);

    telemetry::record_forecast(forecaster.method());
    telemetry::record_latency(telemetry::LatencyMetric::Forecast, started.elapsed());
    tracing::debug!(
        method = %forecaster.method(),
        history = history.len(),
        points = forecast.len(),
        "Forecast complete"
    );

    Ok(forecast)
}

pub(crate) fn validate_step(step_ms: i64) -> Result<i64, ForecastError> {
    if step_ms > 0 {
        Ok(step_ms)
    } else {
        Err(ForecastError::InvalidStep(step_ms))
    }
}

/// Lay out `horizon` forecast points after `last_timestamp`.
///
/// `step` maps the 1-based horizon index to (prediction, half band width).
pub(crate) fn project_horizon(
    last_timestamp: i64,
    step_ms: i64,
    horizon: usize,
    confidence_decay: f64,
    step: impl Fn(usize) -> (f64, f64),
) -> Vec<ForecastPoint> {
    (1..=horizon)
        .map(|i| {
            let (predicted, half_width) = step(i);
            ForecastPoint {
                timestamp: last_timestamp.saturating_add(step_ms.saturating_mul(i as i64)),
                predicted_spread: predicted,
                confidence: (100.0 - confidence_decay * i as f64).max(0.0),
                upper_bound: predicted + half_width,
                lower_bound: predicted - half_width,
            }
        })
        .collect()
}
