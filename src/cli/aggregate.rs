//! Aggregate command implementation

use super::load_input;
use crate::config::Config;
use crate::data;
use crate::series::{aggregate_timeframe, Timeframe};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Series file (.json or .parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target timeframe: 1m, 5m, 15m or 1h
    #[arg(long, default_value = "5m")]
    pub timeframe: Timeframe,

    /// Output file; the extension selects the format
    #[arg(short, long)]
    pub output: PathBuf,
}

impl AggregateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let series = load_input(config, &self.input).await?;
        let aggregated = aggregate_timeframe(&series, self.timeframe);

        let output = self.output.clone();
        let count = aggregated.len();
        tokio::task::spawn_blocking(move || data::save_series(&output, &aggregated)).await??;

        tracing::info!(
            timeframe = %self.timeframe,
            input = series.len(),
            output = count,
            path = ?self.output,
            "Wrote aggregated series"
        );
        Ok(())
    }
}
