//! Time series types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native sampling resolution of the feed in milliseconds (one minute)
pub const NATIVE_RESOLUTION_MS: u64 = 60_000;

/// One sample of a cash-futures pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePoint {
    /// Sample time in Unix milliseconds
    pub timestamp: i64,
    /// Display label for the sample time
    #[serde(default)]
    pub time: String,
    /// Spot (cash) price
    pub spot: f64,
    /// Futures price
    pub futures: f64,
    /// Spread as a percentage of spot
    pub spread: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
}

impl TimePoint {
    /// Create a sample without OHLC fields
    pub fn new(timestamp: i64, spot: f64, futures: f64, spread: f64) -> Self {
        Self {
            timestamp,
            time: String::new(),
            spot,
            futures,
            spread,
            open: None,
            high: None,
            low: None,
            close: None,
        }
    }

    /// Open price, falling back to spot
    pub fn open_or_spot(&self) -> f64 {
        self.open.unwrap_or(self.spot)
    }

    /// High price, falling back to spot
    pub fn high_or_spot(&self) -> f64 {
        self.high.unwrap_or(self.spot)
    }

    /// Low price, falling back to spot
    pub fn low_or_spot(&self) -> f64 {
        self.low.unwrap_or(self.spot)
    }

    /// Close price, falling back to spot
    pub fn close_or_spot(&self) -> f64 {
        self.close.unwrap_or(self.spot)
    }

    /// True when every numeric field is finite
    pub fn is_finite(&self) -> bool {
        let required = [self.spot, self.futures, self.spread];
        let optional = [self.open, self.high, self.low, self.close];
        required.iter().all(|v| v.is_finite())
            && optional.iter().flatten().all(|v| v.is_finite())
    }
}

/// Chart timeframe used for bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
}

impl Timeframe {
    /// Bucket width in milliseconds
    pub fn interval_ms(&self) -> u64 {
        match self {
            Timeframe::OneMinute => NATIVE_RESOLUTION_MS,
            Timeframe::FiveMinutes => 300_000,
            Timeframe::FifteenMinutes => 900_000,
            Timeframe::OneHour => 3_600_000,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::OneMinute => "1m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
        };
        f.write_str(label)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Timeframe::OneMinute),
            "5m" => Ok(Timeframe::FiveMinutes),
            "15m" => Ok(Timeframe::FifteenMinutes),
            "1h" => Ok(Timeframe::OneHour),
            other => Err(format!("unknown timeframe: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ohlc_fallbacks() {
        let point = TimePoint::new(0, 100.0, 101.0, 1.0);
        assert_eq!(point.open_or_spot(), 100.0);
        assert_eq!(point.high_or_spot(), 100.0);
        assert_eq!(point.low_or_spot(), 100.0);
        assert_eq!(point.close_or_spot(), 100.0);

        let point = TimePoint {
            high: Some(105.0),
            ..point
        };
        assert_eq!(point.high_or_spot(), 105.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(TimePoint::new(0, 100.0, 101.0, 1.0).is_finite());
        assert!(!TimePoint::new(0, f64::NAN, 101.0, 1.0).is_finite());

        let point = TimePoint {
            low: Some(f64::INFINITY),
            ..TimePoint::new(0, 100.0, 101.0, 1.0)
        };
        assert!(!point.is_finite());
    }

    #[test]
    fn test_timeframe_parse_and_display() {
        for tf in [
            Timeframe::OneMinute,
            Timeframe::FiveMinutes,
            Timeframe::FifteenMinutes,
            Timeframe::OneHour,
        ] {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
        }
        assert!("2h".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_timeframe_intervals() {
        assert_eq!(Timeframe::OneMinute.interval_ms(), NATIVE_RESOLUTION_MS);
        assert_eq!(Timeframe::FifteenMinutes.interval_ms(), 900_000);
    }

    #[test]
    fn test_time_point_json_shape() {
        let json = r#"{"timestamp":1,"spot":100.0,"futures":100.5,"spread":0.5,"high":101.0}"#;
        let point: TimePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.high, Some(101.0));
        assert!(point.open.is_none());
        assert!(point.time.is_empty());

        let out = serde_json::to_string(&point).unwrap();
        assert!(!out.contains("open"));
    }
}
