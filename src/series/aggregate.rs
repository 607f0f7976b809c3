//! Fixed-width bucketing of spot/futures/spread samples

use super::types::{TimePoint, Timeframe, NATIVE_RESOLUTION_MS};
use crate::telemetry;
use std::time::Instant;

/// Drop samples that downstream analytics cannot consume.
///
/// A sample is dropped when any numeric field is non-finite or when its
/// timestamp does not strictly increase over the last kept sample.
pub fn sanitize(points: &[TimePoint]) -> Vec<TimePoint> {
    let mut kept: Vec<TimePoint> = Vec::with_capacity(points.len());

    for point in points {
        if !point.is_finite() {
            continue;
        }
        if let Some(last) = kept.last() {
            if point.timestamp <= last.timestamp {
                continue;
            }
        }
        kept.push(point.clone());
    }

    let dropped = points.len() - kept.len();
    if dropped > 0 {
        tracing::warn!(
            dropped = dropped,
            total = points.len(),
            "Dropped malformed samples"
        );
        telemetry::record_samples_dropped(dropped);
    }

    kept
}

/// Split a series into contiguous buckets in one left-to-right scan.
///
/// A bucket closes when a sample lands `bucket_ms` or more after the first
/// sample of the bucket; that sample opens the next bucket.
pub fn partition(points: &[TimePoint], bucket_ms: u64) -> Vec<&[TimePoint]> {
    let mut buckets = Vec::new();
    let Some(first) = points.first() else {
        return buckets;
    };

    let width = i64::try_from(bucket_ms).unwrap_or(i64::MAX);
    let mut start_idx = 0;
    let mut bucket_start = first.timestamp;

    for (idx, point) in points.iter().enumerate().skip(1) {
        if point.timestamp.saturating_sub(bucket_start) >= width {
            buckets.push(&points[start_idx..idx]);
            start_idx = idx;
            bucket_start = point.timestamp;
        }
    }
    // Trailing partial bucket is always emitted
    buckets.push(&points[start_idx..]);

    buckets
}

/// Reduce one non-empty bucket to a single OHLC sample
fn reduce_bucket(bucket: &[TimePoint]) -> TimePoint {
    let first = &bucket[0];
    let last = &bucket[bucket.len() - 1];
    let n = bucket.len() as f64;

    let mean = |f: fn(&TimePoint) -> f64| bucket.iter().map(f).sum::<f64>() / n;

    let high = bucket
        .iter()
        .map(TimePoint::high_or_spot)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = bucket
        .iter()
        .map(TimePoint::low_or_spot)
        .fold(f64::INFINITY, f64::min);

    TimePoint {
        timestamp: last.timestamp,
        time: last.time.clone(),
        spot: mean(|p| p.spot),
        futures: mean(|p| p.futures),
        spread: mean(|p| p.spread),
        open: Some(first.open_or_spot()),
        high: Some(high),
        low: Some(low),
        close: Some(last.close_or_spot()),
    }
}

/// Aggregate a series into `bucket_ms` wide OHLC buckets.
///
/// The native resolution is a no-op interval: the (sanitized) input comes
/// back as is. Empty input yields empty output.
pub fn aggregate(points: &[TimePoint], bucket_ms: u64) -> Vec<TimePoint> {
    let started = Instant::now();
    let clean = sanitize(points);
    if bucket_ms == NATIVE_RESOLUTION_MS || clean.is_empty() {
        return clean;
    }

    let aggregated: Vec<TimePoint> = partition(&clean, bucket_ms)
        .into_iter()
        .map(reduce_bucket)
        .collect();

    tracing::debug!(
        input = clean.len(),
        output = aggregated.len(),
        bucket_ms = bucket_ms,
        "Aggregated series"
    );
    telemetry::record_latency(telemetry::LatencyMetric::Aggregate, started.elapsed());

    aggregated
}

/// Aggregate a series into chart timeframe buckets
pub fn aggregate_timeframe(points: &[TimePoint], timeframe: Timeframe) -> Vec<TimePoint> {
    aggregate(points, timeframe.interval_ms())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60_000;

    fn series(n: usize) -> Vec<TimePoint> {
        (0..n)
            .map(|i| {
                let spot = 100.0 + i as f64;
                TimePoint::new(i as i64 * MIN, spot, spot + 0.5, 0.5)
            })
            .collect()
    }

    #[test]
    fn test_native_interval_is_identity() {
        let points = series(12);
        assert_eq!(aggregate(&points, NATIVE_RESOLUTION_MS), points);
        assert_eq!(aggregate_timeframe(&points, Timeframe::OneMinute), points);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], 300_000).is_empty());
        assert!(partition(&[], 300_000).is_empty());
    }

    #[test]
    fn test_partition_covers_every_point() {
        let points = series(23);
        for width in [1, 120_000, 300_000, 900_000, 3_600_000] {
            let buckets = partition(&points, width);
            let covered: usize = buckets.iter().map(|b| b.len()).sum();
            assert_eq!(covered, points.len());
            assert!(buckets.iter().all(|b| !b.is_empty()));
        }
    }

    #[test]
    fn test_five_minute_buckets_keep_trailing_partial() {
        let points = series(12);
        let buckets = partition(&points, 300_000);
        let sizes: Vec<usize> = buckets.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);

        let aggregated = aggregate(&points, 300_000);
        assert_eq!(aggregated.len(), 3);
        assert_eq!(aggregated[2].timestamp, 11 * MIN);
    }

    #[test]
    fn test_bucket_start_resets_on_gap() {
        let points = vec![
            TimePoint::new(0, 100.0, 100.0, 0.0),
            TimePoint::new(4 * MIN, 100.0, 100.0, 0.0),
            TimePoint::new(7 * MIN, 100.0, 100.0, 0.0),
            TimePoint::new(11 * MIN, 100.0, 100.0, 0.0),
            TimePoint::new(12 * MIN, 100.0, 100.0, 0.0),
        ];
        // 7m opens a new bucket; 11m is only 4m after it
        let sizes: Vec<usize> = partition(&points, 300_000)
            .iter()
            .map(|b| b.len())
            .collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_bucket_reduction() {
        let mut points = series(3);
        points[0].open = Some(99.0);
        points[1].high = Some(110.0);
        points[2].low = Some(95.0);

        let out = aggregate(&points, 300_000);
        assert_eq!(out.len(), 1);
        let bar = &out[0];
        assert_eq!(bar.timestamp, 2 * MIN);
        assert!((bar.spot - 101.0).abs() < 1e-12);
        assert!((bar.futures - 101.5).abs() < 1e-12);
        assert!((bar.spread - 0.5).abs() < 1e-12);
        assert_eq!(bar.open, Some(99.0));
        assert_eq!(bar.high, Some(110.0));
        assert_eq!(bar.low, Some(95.0));
        // Last sample has no close, falls back to its spot
        assert_eq!(bar.close, Some(102.0));
    }

    #[test]
    fn test_bucket_open_falls_back_to_first_spot() {
        let mut points = series(3);
        points[1].open = Some(80.0);

        let out = aggregate(&points, 300_000);
        assert_eq!(out.len(), 1);
        // First sample has no open, so the bar opens at its spot
        assert_eq!(out[0].open, Some(100.0));
        assert_eq!(out[0].low, Some(100.0));
    }

    #[test]
    fn test_sanitize_drops_non_finite_and_unordered() {
        let points = vec![
            TimePoint::new(0, 100.0, 100.0, 0.0),
            TimePoint::new(MIN, f64::NAN, 100.0, 0.0),
            TimePoint::new(2 * MIN, 101.0, 100.0, 0.0),
            TimePoint::new(2 * MIN, 102.0, 100.0, 0.0),
            TimePoint::new(MIN, 103.0, 100.0, 0.0),
            TimePoint::new(3 * MIN, 104.0, 100.0, f64::INFINITY),
            TimePoint::new(4 * MIN, 105.0, 100.0, 0.0),
        ];
        let clean = sanitize(&points);
        let stamps: Vec<i64> = clean.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![0, 2 * MIN, 4 * MIN]);
    }
}
