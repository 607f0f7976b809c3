//! Exponential moving average estimator
//!
//! Flat projection of the final EMA value. The band widens with the square
//! root of the horizon step.

use super::{project_horizon, validate_step, ForecastError, ForecastMethod, ForecastPoint};
use super::{SpreadForecaster, DEFAULT_STEP_MS, Z_95};
use crate::series::TimePoint;

/// Default smoothing factor
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Confidence lost per horizon step
const CONFIDENCE_DECAY: f64 = 12.0;

/// Minimum history length
const MIN_HISTORY: usize = 2;

/// EMA folded forward from the first spread
#[derive(Debug, Clone)]
pub struct EmaForecaster {
    alpha: f64,
    step_ms: i64,
}

impl EmaForecaster {
    /// Create an EMA estimator with smoothing factor in (0, 1]
    pub fn new(alpha: f64, step_ms: i64) -> Result<Self, ForecastError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ForecastError::InvalidAlpha(alpha));
        }
        Ok(Self {
            alpha,
            step_ms: validate_step(step_ms)?,
        })
    }

    /// Smoothing factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for EmaForecaster {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

impl SpreadForecaster for EmaForecaster {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Ema
    }

    fn predict(&self, history: &[TimePoint], horizon: usize) -> Vec<ForecastPoint> {
        if history.len() < MIN_HISTORY {
            return vec![];
        }

        // Residual of every sample against the EMA that includes it
        let mut ema = history[0].spread;
        let mut sum_sq = 0.0;
        for (idx, point) in history.iter().enumerate() {
            if idx > 0 {
                ema = self.alpha * point.spread + (1.0 - self.alpha) * ema;
            }
            sum_sq += (point.spread - ema).powi(2);
        }
        let std_dev = (sum_sq / history.len() as f64).sqrt();
        let last = history[history.len() - 1].timestamp;

        tracing::debug!(alpha = self.alpha, ema = ema, std_dev = std_dev, "EMA forecast");

        project_horizon(last, self.step_ms, horizon, CONFIDENCE_DECAY, |i| {
            (ema, Z_95 * std_dev * (i as f64).sqrt())
        })
    }
}

/// EMA forecast with a one-minute step
pub fn predict_ema(history: &[TimePoint], alpha: f64, horizon: usize) -> Vec<ForecastPoint> {
    match EmaForecaster::new(alpha, DEFAULT_STEP_MS) {
        Ok(forecaster) => forecaster.predict(history, horizon),
        Err(_) => vec![],
    }
}
