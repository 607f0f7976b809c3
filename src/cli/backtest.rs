//! Backtest command implementations

use super::{default_ledger_path, load_input, parse_time_ms, print_json, save_result, OutputFormat};
use crate::backtest::{run_simple_backtest, BacktestConfig, BacktestSimulator, SimpleBacktestConfig};
use crate::config::Config;
use crate::data::ParquetWriter;
use crate::series::{aggregate_timeframe, Timeframe};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Series file (.json or .parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Entry threshold on |spread| in percent
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Stop-loss in percent of entry price
    #[arg(long)]
    pub stop_loss: Option<f64>,

    /// Take-profit in percent of entry price
    #[arg(long)]
    pub take_profit: Option<f64>,

    /// Initial capital
    #[arg(long)]
    pub capital: Option<f64>,

    /// Aggregate the series before replaying
    #[arg(long)]
    pub timeframe: Option<Timeframe>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the trade ledger to Parquet; defaults to a timestamped file
    #[arg(long)]
    pub ledger: Option<Option<PathBuf>>,

    /// Save the metrics under this key in the output directory
    #[arg(long)]
    pub save_as: Option<String>,
}

impl BacktestArgs {
    fn effective_config(&self, base: &BacktestConfig) -> BacktestConfig {
        BacktestConfig {
            initial_capital: self.capital.unwrap_or(base.initial_capital),
            threshold: self.threshold.unwrap_or(base.threshold),
            stop_loss_pct: self.stop_loss.or(base.stop_loss_pct),
            take_profit_pct: self.take_profit.or(base.take_profit_pct),
            ..base.clone()
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut series = load_input(config, &self.input).await?;
        if let Some(timeframe) = self.timeframe {
            series = aggregate_timeframe(&series, timeframe);
        }

        let backtest_config = self.effective_config(&config.backtest);
        tracing::info!(
            samples = series.len(),
            threshold = backtest_config.threshold,
            "Running backtest"
        );
        let metrics = BacktestSimulator::new(backtest_config).run(&series);

        match self.format {
            OutputFormat::Table => println!("{}", metrics.format_table()),
            OutputFormat::Json => print_json(&metrics)?,
        }

        if let Some(ledger) = &self.ledger {
            let path = ledger.clone().unwrap_or_else(|| default_ledger_path(config));
            let writer = ParquetWriter::new(config.data.output_dir.clone());
            let trades = metrics.trades.clone();
            let target = path.clone();
            tokio::task::spawn_blocking(move || writer.write_trades(&target, &trades)).await??;
            tracing::info!(path = ?path, trades = metrics.trades.len(), "Wrote trade ledger");
        }

        save_result(config, self.save_as.as_deref(), &metrics)
    }
}

#[derive(Args, Debug)]
pub struct SimpleBacktestArgs {
    /// Series file (.json or .parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Symbol recorded on ledger entries
    #[arg(long, default_value = "NIFTY")]
    pub symbol: String,

    /// Range start (RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (RFC 3339)
    #[arg(long)]
    pub end: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Save the result under this key in the output directory
    #[arg(long)]
    pub save_as: Option<String>,
}

impl SimpleBacktestArgs {
    fn effective_config(&self, base: &SimpleBacktestConfig) -> anyhow::Result<SimpleBacktestConfig> {
        let start_ms = self.start.as_deref().map(parse_time_ms).transpose()?;
        let end_ms = self.end.as_deref().map(parse_time_ms).transpose()?;
        Ok(SimpleBacktestConfig {
            start_ms: start_ms.or(base.start_ms),
            end_ms: end_ms.or(base.end_ms),
            ..base.clone()
        })
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let series = load_input(config, &self.input).await?;
        let simple_config = self.effective_config(&config.simple_backtest)?;
        let result = run_simple_backtest(&self.symbol, &series, &simple_config);

        match self.format {
            OutputFormat::Table => {
                println!("Simple backtest: {}", self.symbol);
                println!("  Trades:        {} ({} profitable)", result.total_trades, result.profitable_trades);
                println!("  Total P&L:     {:+.2}", result.total_pnl);
                println!("  Win Rate:      {:.1}%", result.win_rate);
                println!("  Max Drawdown:  {:.2}%", result.max_drawdown);
                println!("  Sharpe Ratio:  {:.2}", result.sharpe_ratio);
            }
            OutputFormat::Json => print_json(&result)?,
        }

        save_result(config, self.save_as.as_deref(), &result)
    }
}
