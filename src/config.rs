//! Configuration types for arb-analytics

use crate::backtest::{BacktestConfig, SimpleBacktestConfig};
use crate::forecast::{ForecastMethod, DEFAULT_STEP_MS};
use crate::position::DEFAULT_FEE_RATE_PCT;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backtest: BacktestConfig,
    #[serde(default)]
    pub simple_backtest: SimpleBacktestConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub position: PositionConfig,
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Spread forecast configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastConfig {
    /// Estimator: "sma", "ema" or "linear"
    #[serde(default)]
    pub method: ForecastMethod,

    /// SMA window length
    #[serde(default = "default_periods")]
    pub periods: usize,

    /// EMA smoothing factor in (0, 1]
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Number of future points to project
    #[serde(default = "default_horizon")]
    pub horizon: usize,

    /// Spacing of forecast timestamps in milliseconds
    #[serde(default = "default_step_ms")]
    pub step_ms: i64,
}

fn default_periods() -> usize {
    5
}
fn default_alpha() -> f64 {
    0.3
}
fn default_horizon() -> usize {
    5
}
fn default_step_ms() -> i64 {
    DEFAULT_STEP_MS
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            method: ForecastMethod::default(),
            periods: default_periods(),
            alpha: default_alpha(),
            horizon: default_horizon(),
            step_ms: default_step_ms(),
        }
    }
}

/// Profit projection configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectionConfig {
    /// Units traded for the projection
    #[serde(default = "default_quantity")]
    pub quantity: f64,

    /// Expected spread (percent) needed for a BUY or SELL call
    #[serde(default = "default_projection_threshold")]
    pub threshold: f64,
}

fn default_quantity() -> f64 {
    1.0
}
fn default_projection_threshold() -> f64 {
    0.5
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            threshold: default_projection_threshold(),
        }
    }
}

/// Position P&L configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionConfig {
    /// Fee per leg per side, in percent of notional
    #[serde(default = "default_fee_rate_pct")]
    pub fee_rate_pct: f64,
}

fn default_fee_rate_pct() -> f64 {
    DEFAULT_FEE_RATE_PCT
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            fee_rate_pct: default_fee_rate_pct(),
        }
    }
}

/// Opportunity detection configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArbitrageConfig {
    /// Absolute spread percentage that flags an opportunity
    #[serde(default = "default_arbitrage_threshold")]
    pub threshold_pct: f64,
}

fn default_arbitrage_threshold() -> f64 {
    0.5
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            threshold_pct: default_arbitrage_threshold(),
        }
    }
}

/// Series file configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataConfig {
    /// Directory that relative series paths resolve against
    #[serde(default = "default_series_dir")]
    pub series_dir: PathBuf,

    /// Directory for exported trade ledgers
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_series_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./data/out")
}

impl DataConfig {
    /// Resolve a series path against `series_dir`.
    ///
    /// Absolute paths and relative paths that exist from the working
    /// directory are returned unchanged.
    pub fn resolve(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() || path.exists() {
            path.to_path_buf()
        } else {
            self.series_dir.join(path)
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            series_dir: default_series_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
