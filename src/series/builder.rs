//! Builds per-symbol series from the push stream of market snapshots

use super::types::TimePoint;
use crate::arbitrage::MarketSnapshot;
use chrono::DateTime;
use std::collections::{HashMap, VecDeque};

/// Maximum samples retained per symbol
pub const MAX_DATA_POINTS: usize = 200;

/// Accumulates snapshots into bounded, strictly increasing series
#[derive(Debug)]
pub struct SeriesBuilder {
    capacity: usize,
    series: HashMap<String, VecDeque<TimePoint>>,
}

impl SeriesBuilder {
    /// Create a builder retaining [`MAX_DATA_POINTS`] per symbol
    pub fn new() -> Self {
        Self::with_capacity(MAX_DATA_POINTS)
    }

    /// Create a builder retaining `capacity` samples per symbol
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            series: HashMap::new(),
        }
    }

    /// Append a snapshot observed at `timestamp` (Unix ms).
    ///
    /// OHLC is synthesized from the previous close. Returns false when the
    /// snapshot is rejected as non-finite or out of order.
    pub fn push(&mut self, snapshot: &MarketSnapshot, timestamp: i64) -> bool {
        let prices = [
            snapshot.spot_price,
            snapshot.futures_price,
            snapshot.spread_percentage,
        ];
        if prices.iter().any(|v| !v.is_finite()) {
            tracing::warn!(symbol = %snapshot.symbol, "Rejected non-finite snapshot");
            return false;
        }

        let points = self.series.entry(snapshot.symbol.clone()).or_default();
        let last = points.back();
        if let Some(last) = last {
            if timestamp <= last.timestamp {
                tracing::debug!(
                    symbol = %snapshot.symbol,
                    timestamp = timestamp,
                    last = last.timestamp,
                    "Rejected out-of-order snapshot"
                );
                return false;
            }
        }

        let spot = snapshot.spot_price;
        let open = last.map(TimePoint::close_or_spot).unwrap_or(spot);
        let close = spot;

        points.push_back(TimePoint {
            timestamp,
            time: time_label(timestamp),
            spot,
            futures: snapshot.futures_price,
            spread: snapshot.spread_percentage,
            open: Some(open),
            high: Some(open.max(close)),
            low: Some(open.min(close)),
            close: Some(close),
        });

        while points.len() > self.capacity {
            points.pop_front();
        }
        true
    }

    /// Series for a symbol, oldest first
    pub fn series(&self, symbol: &str) -> Vec<TimePoint> {
        self.series
            .get(symbol)
            .map(|points| points.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Symbols seen so far
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of retained samples for a symbol
    pub fn len(&self, symbol: &str) -> usize {
        self.series.get(symbol).map_or(0, VecDeque::len)
    }

    /// True when no samples are retained for any symbol
    pub fn is_empty(&self) -> bool {
        self.series.values().all(VecDeque::is_empty)
    }
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn time_label(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
