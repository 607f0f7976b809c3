//! Series file and store round trips

use arb_analytics::backtest::{run_backtest, BacktestConfig, BacktestMetrics};
use arb_analytics::data::{load_series, save_series, JsonFileStore, ParquetWriter, Store};
use arb_analytics::series::{aggregate_timeframe, TimePoint, Timeframe};
use tempfile::TempDir;

fn oscillating_series(n: usize) -> Vec<TimePoint> {
    (0..n)
        .map(|i| {
            let spot = 1_000.0 + (i % 7) as f64;
            let spread = ((i as f64) / 3.0).sin() * 0.9;
            TimePoint::new(i as i64 * 60_000, spot, spot * (1.0 + spread / 100.0), spread)
        })
        .collect()
}

#[test]
fn test_parquet_and_json_series_agree() {
    let temp_dir = TempDir::new().unwrap();
    let series = oscillating_series(120);

    let parquet_path = temp_dir.path().join("series.parquet");
    let json_path = temp_dir.path().join("series.json");
    save_series(&parquet_path, &series).unwrap();
    save_series(&json_path, &series).unwrap();

    let from_parquet = load_series(&parquet_path).unwrap();
    let from_json = load_series(&json_path).unwrap();
    assert_eq!(from_parquet, series);
    assert_eq!(from_json, series);

    let config = BacktestConfig::default();
    assert_eq!(
        run_backtest(&from_parquet, &config),
        run_backtest(&series, &config)
    );
}

#[test]
fn test_aggregated_series_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let hourly = aggregate_timeframe(&oscillating_series(180), Timeframe::OneHour);
    assert_eq!(hourly.len(), 3);
    assert!(hourly.iter().all(|p| p.open.is_some() && p.close.is_some()));

    let path = temp_dir.path().join("hourly.parquet");
    save_series(&path, &hourly).unwrap();
    assert_eq!(load_series(&path).unwrap(), hourly);
}

#[test]
fn test_trade_ledger_and_store() {
    let temp_dir = TempDir::new().unwrap();
    let metrics = run_backtest(&oscillating_series(240), &BacktestConfig::default());
    assert!(metrics.total_trades > 0);

    let writer = ParquetWriter::new(temp_dir.path().to_path_buf());
    let ledger = temp_dir.path().join("ledger.parquet");
    writer.write_trades(&ledger, &metrics.trades).unwrap();
    assert!(ledger.exists());

    let mut store = JsonFileStore::new(temp_dir.path().join("results"));
    store.save("latest", &metrics).unwrap();
    let restored: BacktestMetrics = store.load("latest").unwrap().unwrap();
    assert_eq!(restored.total_trades, metrics.total_trades);
    assert_eq!(restored.trades, metrics.trades);
}
