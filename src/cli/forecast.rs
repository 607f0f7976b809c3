//! Forecast command implementation

use super::{load_input, print_json, save_result, OutputFormat};
use crate::config::{Config, ForecastConfig};
use crate::forecast::{run_forecast, ForecastMethod, ForecastPoint};
use crate::projection::{project, ProfitPrediction};
use crate::series::{aggregate_timeframe, Timeframe};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Series file (.json or .parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Estimator: sma, ema or linear
    #[arg(long)]
    pub method: Option<ForecastMethod>,

    /// Number of points to project
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Aggregate the series before forecasting
    #[arg(long)]
    pub timeframe: Option<Timeframe>,

    /// Price for the profit projection; defaults to the last spot
    #[arg(long)]
    pub price: Option<f64>,

    /// Quantity for the profit projection
    #[arg(long)]
    pub quantity: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Save the report under this key in the output directory
    #[arg(long)]
    pub save_as: Option<String>,
}

/// Forecast plus profit projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastReport {
    method: ForecastMethod,
    forecast: Vec<ForecastPoint>,
    prediction: ProfitPrediction,
}

impl ForecastArgs {
    fn effective_config(&self, base: &ForecastConfig) -> ForecastConfig {
        ForecastConfig {
            method: self.method.unwrap_or(base.method),
            horizon: self.horizon.unwrap_or(base.horizon),
            ..base.clone()
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut series = load_input(config, &self.input).await?;
        if let Some(timeframe) = self.timeframe {
            series = aggregate_timeframe(&series, timeframe);
        }

        let forecast_config = self.effective_config(&config.forecast);
        let forecast = run_forecast(&forecast_config, &series)?;
        if forecast.is_empty() {
            tracing::warn!(
                samples = series.len(),
                method = %forecast_config.method,
                "Not enough history to forecast"
            );
        }

        let price = self
            .price
            .or_else(|| series.last().map(|p| p.spot))
            .unwrap_or(0.0);
        let quantity = self.quantity.unwrap_or(config.projection.quantity);
        let prediction = project(price, &forecast, quantity, config.projection.threshold);

        let report = ForecastReport {
            method: forecast_config.method,
            forecast,
            prediction,
        };

        match self.format {
            OutputFormat::Table => print_table(&report),
            OutputFormat::Json => print_json(&report)?,
        }

        save_result(config, self.save_as.as_deref(), &report)
    }
}

fn print_table(report: &ForecastReport) {
    println!("Forecast ({})", report.method);
    println!("{:>16} {:>10} {:>10} {:>10} {:>6}", "timestamp", "spread", "lower", "upper", "conf");
    for point in &report.forecast {
        println!(
            "{:>16} {:>10.4} {:>10.4} {:>10.4} {:>5.0}%",
            point.timestamp,
            point.predicted_spread,
            point.lower_bound,
            point.upper_bound,
            point.confidence
        );
    }

    let p = &report.prediction;
    println!();
    println!("Expected profit:  {:+.2} ({:.0}% confidence)", p.expected_profit, p.confidence);
    println!("Range:            {:+.2} .. {:+.2}", p.worst_case_profit, p.best_case_profit);
    println!("Recommendation:   {} (risk {})", p.recommendation, p.risk_level);
}
