//! CLI interface for arb-analytics
//!
//! Provides subcommands for:
//! - `backtest`: Replay a spread series through the threshold strategy
//! - `simple-backtest`: Long-only dashboard backtest
//! - `forecast`: Project the spread and the resulting profit range
//! - `pnl`: Hedged position P&L
//! - `detect`: Check one spot/futures quote for an opportunity
//! - `aggregate`: Re-bucket a series into a chart timeframe
//! - `config`: Show configuration

mod aggregate;
mod backtest;
mod forecast;
mod pnl;

pub use aggregate::AggregateArgs;
pub use backtest::{BacktestArgs, SimpleBacktestArgs};
pub use forecast::ForecastArgs;
pub use pnl::{DetectArgs, PnlArgs};

use crate::config::Config;
use crate::data::{self, JsonFileStore, Store};
use crate::series::TimePoint;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "arb-analytics")]
#[command(about = "Strategy analytics for cash-futures spread arbitrage")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the threshold strategy backtest on a series file
    Backtest(BacktestArgs),
    /// Run the long-only dashboard backtest
    SimpleBacktest(SimpleBacktestArgs),
    /// Forecast the spread and project profit
    Forecast(ForecastArgs),
    /// Compute hedged position P&L
    Pnl(PnlArgs),
    /// Check a spot/futures quote for an opportunity
    Detect(DetectArgs),
    /// Aggregate a series into a coarser timeframe
    Aggregate(AggregateArgs),
    /// Show configuration
    Config,
}

/// Result rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Load a series file off the async runtime
pub(crate) async fn load_input(config: &Config, input: &Path) -> anyhow::Result<Vec<TimePoint>> {
    let path = config.data.resolve(input);
    let source = path.clone();
    let points = tokio::task::spawn_blocking(move || data::load_series(&path))
        .await?
        .with_context(|| format!("Failed to load series from {}", source.display()))?;

    tracing::info!(path = ?source, samples = points.len(), "Loaded series");
    Ok(points)
}

/// Persist a result under `key` in the output directory store
pub(crate) fn save_result<T: Serialize>(
    config: &Config,
    key: Option<&str>,
    value: &T,
) -> anyhow::Result<()> {
    if let Some(key) = key {
        let mut store = JsonFileStore::new(config.data.output_dir.clone());
        store.save(key, value)?;
        tracing::info!(key = key, dir = ?config.data.output_dir, "Saved result");
    }
    Ok(())
}

/// Print a serializable value as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse an RFC 3339 timestamp into Unix milliseconds
pub(crate) fn parse_time_ms(value: &str) -> anyhow::Result<i64> {
    let parsed = chrono::DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid timestamp {value:?}, expected RFC 3339"))?;
    Ok(parsed.timestamp_millis())
}

/// Default ledger path when `--ledger` is given without a value
pub(crate) fn default_ledger_path(config: &Config) -> PathBuf {
    data::ParquetWriter::new(config.data.output_dir.clone()).file_path("trades", chrono::Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_ms() {
        assert_eq!(parse_time_ms("1970-01-01T00:01:00Z").unwrap(), 60_000);
        assert_eq!(parse_time_ms("2024-01-01T05:30:00+05:30").unwrap(), 1_704_067_200_000);
        assert!(parse_time_ms("yesterday").is_err());
    }

    #[test]
    fn test_cli_parses_backtest() {
        let cli = Cli::try_parse_from([
            "arb-analytics",
            "backtest",
            "--input",
            "series.json",
            "--stop-loss",
            "2",
            "--timeframe",
            "5m",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Backtest(args) => {
                assert_eq!(args.input, PathBuf::from("series.json"));
                assert_eq!(args.stop_loss, Some(2.0));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_cli_rejects_unknown_method() {
        let result = Cli::try_parse_from([
            "arb-analytics",
            "forecast",
            "--input",
            "series.json",
            "--method",
            "arima",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_input_resolves_against_series_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let points = vec![TimePoint::new(0, 100.0, 100.6, 0.6)];
        data::save_series(&temp_dir.path().join("nifty.json"), &points).unwrap();

        let mut config = Config::default();
        config.data.series_dir = temp_dir.path().to_path_buf();
        let loaded = load_input(&config, Path::new("nifty.json")).await.unwrap();
        assert_eq!(loaded, points);

        let err = load_input(&config, Path::new("missing.json")).await.unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_save_result_without_key_is_noop() {
        let config = Config::default();
        save_result(&config, None, &1).unwrap();
    }
}
