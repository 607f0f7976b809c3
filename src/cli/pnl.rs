//! Position P&L and opportunity check commands

use super::{print_json, OutputFormat};
use crate::arbitrage::{detect, net_profit_after_costs};
use crate::config::Config;
use crate::position::{calculate_pnl, PositionInputs};
use clap::Args;

#[derive(Args, Debug)]
pub struct PnlArgs {
    #[arg(long)]
    pub quantity: f64,

    #[arg(long)]
    pub spot_entry: f64,

    #[arg(long)]
    pub spot_exit: f64,

    #[arg(long)]
    pub futures_entry: f64,

    #[arg(long)]
    pub futures_exit: f64,

    /// Fee per leg per side in percent; defaults to the configured rate
    #[arg(long)]
    pub fee_rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl PnlArgs {
    fn inputs(&self, config: &Config) -> PositionInputs {
        PositionInputs {
            quantity: self.quantity,
            spot_entry: self.spot_entry,
            spot_exit: self.spot_exit,
            futures_entry: self.futures_entry,
            futures_exit: self.futures_exit,
            fee_rate_pct: self.fee_rate.unwrap_or(config.position.fee_rate_pct),
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pnl = calculate_pnl(&self.inputs(config));

        match self.format {
            OutputFormat::Table => {
                println!("Spot P&L:     {:+.2}", pnl.spot_pnl);
                println!("Futures P&L:  {:+.2}", pnl.futures_pnl);
                println!("Gross P&L:    {:+.2}", pnl.gross_pnl);
                println!("Fees:         {:.2}", pnl.total_fees);
                println!("Net P&L:      {:+.2}", pnl.net_pnl);
                println!("Margin:       {:.2}", pnl.margin);
                println!("ROI:          {:.2}%", pnl.roi);
            }
            OutputFormat::Json => print_json(&pnl)?,
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    #[arg(long)]
    pub symbol: String,

    #[arg(long)]
    pub spot: f64,

    #[arg(long)]
    pub futures: f64,

    /// Spread threshold in percent; defaults to the configured value
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl DetectArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let threshold = self.threshold.unwrap_or(config.arbitrage.threshold_pct);
        let opportunity = detect(&self.symbol, self.spot, self.futures, threshold);

        match self.format {
            OutputFormat::Table => {
                let profit = &opportunity.profit;
                let contract_value = self.futures * f64::from(profit.lot_size);
                println!(
                    "{}: spread {:+.2} ({:+.3}%)",
                    opportunity.symbol, opportunity.spread, opportunity.spread_percentage
                );
                println!("Action:       {}", opportunity.action);
                println!("Lot size:     {}", profit.lot_size);
                println!("Gross/lot:    {:.2}", profit.gross_profit);
                println!(
                    "Net/lot:      {:.2}",
                    net_profit_after_costs(profit.gross_profit, contract_value)
                );
                println!("Margin:       {:.2}", profit.margin_required);
                println!("ROI:          {:.2}%", profit.roi_percentage);
            }
            OutputFormat::Json => print_json(&opportunity)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnl_fee_rate_falls_back_to_config() {
        let args = PnlArgs {
            quantity: 10.0,
            spot_entry: 100.0,
            spot_exit: 101.0,
            futures_entry: 100.5,
            futures_exit: 101.2,
            fee_rate: None,
            format: OutputFormat::Table,
        };
        let mut config = Config::default();
        config.position.fee_rate_pct = 0.1;
        assert_eq!(args.inputs(&config).fee_rate_pct, 0.1);
    }
}
