//! Ordinary least squares trend estimator
//!
//! Fits `spread = slope * index + intercept` over sample indices and
//! extrapolates with a standard prediction interval.

use super::{project_horizon, validate_step, ForecastError, ForecastMethod, ForecastPoint};
use super::{SpreadForecaster, DEFAULT_STEP_MS, Z_95};
use crate::series::TimePoint;

/// Confidence lost per horizon step
const CONFIDENCE_DECAY: f64 = 10.0;

/// Minimum history length
const MIN_HISTORY: usize = 3;

/// Closed-form OLS fit over indices `0..n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Residual standard error (RMS of residuals)
    pub std_error: f64,
    /// Number of fitted samples
    pub n: usize,
    /// Mean sample index
    pub mean_x: f64,
    /// Sum of squared index deviations from the mean
    pub sxx: f64,
}

impl LinearFit {
    /// Fitted value at an index
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Half width of the 95% prediction interval at an index
    pub fn margin_at(&self, x: f64) -> f64 {
        let n = self.n as f64;
        Z_95 * self.std_error * (1.0 + 1.0 / n + (x - self.mean_x).powi(2) / self.sxx).sqrt()
    }
}

/// Fit a line through `values` indexed `0..n`. Needs at least three values.
pub fn fit_line(values: &[f64]) -> Option<LinearFit> {
    if values.len() < MIN_HISTORY {
        return None;
    }

    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let mse = values
        .iter()
        .enumerate()
        .map(|(i, y)| (y - (slope * i as f64 + intercept)).powi(2))
        .sum::<f64>()
        / n;

    Some(LinearFit {
        slope,
        intercept,
        std_error: mse.sqrt(),
        n: values.len(),
        mean_x: sum_x / n,
        sxx: sum_x2 - sum_x * sum_x / n,
    })
}

/// OLS trend extrapolation
#[derive(Debug, Clone)]
pub struct LinearRegressionForecaster {
    step_ms: i64,
}

impl LinearRegressionForecaster {
    /// Create a regression estimator
    pub fn new(step_ms: i64) -> Result<Self, ForecastError> {
        Ok(Self {
            step_ms: validate_step(step_ms)?,
        })
    }
}

impl Default for LinearRegressionForecaster {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

impl SpreadForecaster for LinearRegressionForecaster {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Linear
    }

    fn predict(&self, history: &[TimePoint], horizon: usize) -> Vec<ForecastPoint> {
        let spreads: Vec<f64> = history.iter().map(|p| p.spread).collect();
        let Some(fit) = fit_line(&spreads) else {
            return vec![];
        };
        let last = history[history.len() - 1].timestamp;

        tracing::debug!(
            slope = fit.slope,
            intercept = fit.intercept,
            std_error = fit.std_error,
            "Linear regression forecast"
        );

        project_horizon(last, self.step_ms, horizon, CONFIDENCE_DECAY, |i| {
            let x = (fit.n + i - 1) as f64;
            (fit.value_at(x), fit.margin_at(x))
        })
    }
}

/// Regression forecast with a one-minute step
pub fn predict_linear_regression(history: &[TimePoint], horizon: usize) -> Vec<ForecastPoint> {
    LinearRegressionForecaster::default().predict(history, horizon)
}
