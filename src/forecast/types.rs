//! Forecast types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One projected step of the spread series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Projected sample time in Unix milliseconds
    pub timestamp: i64,
    /// Point prediction of the spread
    pub predicted_spread: f64,
    /// Confidence score in 0..=100, non-increasing over the horizon
    pub confidence: f64,
    /// Upper edge of the 95% band
    pub upper_bound: f64,
    /// Lower edge of the 95% band
    pub lower_bound: f64,
}

impl ForecastPoint {
    /// Width of the confidence band
    pub fn band_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Available spread estimators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    /// Simple moving average
    Sma,
    /// Exponential moving average
    #[default]
    Ema,
    /// Ordinary least squares trend line
    Linear,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForecastMethod::Sma => "sma",
            ForecastMethod::Ema => "ema",
            ForecastMethod::Linear => "linear",
        };
        f.write_str(name)
    }
}

impl FromStr for ForecastMethod {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sma" => Ok(ForecastMethod::Sma),
            "ema" => Ok(ForecastMethod::Ema),
            "linear" | "ols" => Ok(ForecastMethod::Linear),
            other => Err(ForecastError::UnknownMethod(other.to_string())),
        }
    }
}

/// Invalid estimator parameters
#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    /// SMA window must hold at least one sample
    #[error("SMA periods must be at least 1")]
    ZeroPeriods,
    /// EMA smoothing factor outside (0, 1]
    #[error("EMA alpha must be in (0, 1], got {0}")]
    InvalidAlpha(f64),
    /// Horizon step width must be positive
    #[error("Forecast step must be positive, got {0}ms")]
    InvalidStep(i64),
    /// Unrecognized estimator name
    #[error("Unknown forecast method: {0}")]
    UnknownMethod(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("SMA".parse::<ForecastMethod>().unwrap(), ForecastMethod::Sma);
        assert_eq!("ols".parse::<ForecastMethod>().unwrap(), ForecastMethod::Linear);
        assert_eq!(
            "arima".parse::<ForecastMethod>(),
            Err(ForecastError::UnknownMethod("arima".to_string()))
        );
    }

    #[test]
    fn test_forecast_point_serializes_camel_case() {
        let point = ForecastPoint {
            timestamp: 60_000,
            predicted_spread: 0.5,
            confidence: 85.0,
            upper_bound: 0.7,
            lower_bound: 0.3,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"predictedSpread\":0.5"));
        assert!(json.contains("\"upperBound\""));
        assert!((point.band_width() - 0.4).abs() < 1e-12);
    }
}
