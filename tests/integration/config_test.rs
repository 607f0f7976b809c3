//! Configuration file tests

use arb_analytics::backtest::BacktestConfig;
use arb_analytics::config::{Config, ForecastConfig};
use arb_analytics::telemetry::LogFormat;
use std::io::Write;

#[test]
fn test_config_example_matches_defaults() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.backtest, BacktestConfig::default());
    assert_eq!(config.forecast, ForecastConfig::default());
    assert_eq!(config.simple_backtest.quantity, 100.0);
    assert_eq!(config.position.fee_rate_pct, 0.05);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backtest]\ntake_profit_pct = 1.5\n\n[forecast]\nmethod = \"linear\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.backtest.take_profit_pct, Some(1.5));
    assert_eq!(config.backtest.take_profit(), Some(1.5));
    assert_eq!(config.forecast.method.to_string(), "linear");
}

#[test]
fn test_config_load_rejects_bad_types() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backtest]\nthreshold = \"high\"").unwrap();
    assert!(Config::load(file.path()).is_err());
}
