//! Simple moving average estimator
//!
//! Flat projection of the trailing window mean with a constant-width band.

use super::{project_horizon, validate_step, ForecastError, ForecastMethod, ForecastPoint};
use super::{SpreadForecaster, DEFAULT_STEP_MS, Z_95};
use crate::series::TimePoint;

/// Default trailing window length
pub const DEFAULT_PERIODS: usize = 5;

/// Confidence lost per horizon step
const CONFIDENCE_DECAY: f64 = 15.0;

/// Moving average over the last `periods` spreads
#[derive(Debug, Clone)]
pub struct SmaForecaster {
    periods: usize,
    step_ms: i64,
}

impl SmaForecaster {
    /// Create an SMA estimator
    pub fn new(periods: usize, step_ms: i64) -> Result<Self, ForecastError> {
        if periods == 0 {
            return Err(ForecastError::ZeroPeriods);
        }
        Ok(Self {
            periods,
            step_ms: validate_step(step_ms)?,
        })
    }

    /// Trailing window length
    pub fn periods(&self) -> usize {
        self.periods
    }
}

impl Default for SmaForecaster {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS,
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

impl SpreadForecaster for SmaForecaster {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Sma
    }

    fn predict(&self, history: &[TimePoint], horizon: usize) -> Vec<ForecastPoint> {
        let Some(last) = history.last() else {
            return vec![];
        };
        if history.len() < self.periods {
            return vec![];
        }

        let window = &history[history.len() - self.periods..];
        let n = self.periods as f64;
        let mean = window.iter().map(|p| p.spread).sum::<f64>() / n;
        let variance = window
            .iter()
            .map(|p| (p.spread - mean).powi(2))
            .sum::<f64>()
            / n;
        let half_width = Z_95 * variance.sqrt();

        tracing::debug!(
            periods = self.periods,
            mean = mean,
            std_dev = variance.sqrt(),
            "SMA forecast"
        );

        project_horizon(last.timestamp, self.step_ms, horizon, CONFIDENCE_DECAY, |_| {
            (mean, half_width)
        })
    }
}

/// SMA forecast with a one-minute step
pub fn predict_sma(history: &[TimePoint], periods: usize, horizon: usize) -> Vec<ForecastPoint> {
    match SmaForecaster::new(periods, DEFAULT_STEP_MS) {
        Ok(forecaster) => forecaster.predict(history, horizon),
        Err(_) => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(spreads: &[f64]) -> Vec<TimePoint> {
        spreads
            .iter()
            .enumerate()
            .map(|(i, s)| TimePoint::new(i as i64 * 60_000, 100.0, 100.0, *s))
            .collect()
    }

    #[test]
    fn test_constant_history_collapses_band() {
        let forecast = predict_sma(&history(&[1.0; 5]), 5, 5);
        assert_eq!(forecast.len(), 5);
        for point in &forecast {
            assert_eq!(point.predicted_spread, 1.0);
            assert_eq!(point.upper_bound, 1.0);
            assert_eq!(point.lower_bound, 1.0);
        }
    }

    #[test]
    fn test_insufficient_history() {
        assert!(predict_sma(&history(&[1.0, 2.0, 3.0, 4.0]), 5, 5).is_empty());
        assert!(predict_sma(&[], 5, 5).is_empty());
        assert!(predict_sma(&history(&[1.0]), 0, 5).is_empty());
    }

    #[test]
    fn test_uses_trailing_window_only() {
        let forecast = predict_sma(&history(&[100.0, 1.0, 2.0, 3.0]), 3, 1);
        assert!((forecast[0].predicted_spread - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_band_is_constant_and_population_std() {
        // Window [1, 3]: mean 2, population std 1
        let forecast = predict_sma(&history(&[1.0, 3.0]), 2, 4);
        for point in &forecast {
            assert!((point.upper_bound - (2.0 + 1.96)).abs() < 1e-12);
            assert!((point.lower_bound - (2.0 - 1.96)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_confidence_decay() {
        let forecast = predict_sma(&history(&[1.0; 5]), 5, 8);
        let confidence: Vec<f64> = forecast.iter().map(|p| p.confidence).collect();
        assert_eq!(confidence, vec![85.0, 70.0, 55.0, 40.0, 25.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rejects_zero_periods() {
        assert_eq!(
            SmaForecaster::new(0, 60_000).unwrap_err(),
            ForecastError::ZeroPeriods
        );
    }
}
