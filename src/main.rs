use arb_analytics::cli::{Cli, Commands};
use arb_analytics::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _telemetry = arb_analytics::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Backtest(args) => {
            tracing::info!("Starting backtest");
            args.execute(&config).await?;
        }
        Commands::SimpleBacktest(args) => {
            tracing::info!("Starting simple backtest");
            args.execute(&config).await?;
        }
        Commands::Forecast(args) => args.execute(&config).await?,
        Commands::Pnl(args) => args.execute(&config).await?,
        Commands::Detect(args) => args.execute(&config).await?,
        Commands::Aggregate(args) => args.execute(&config).await?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Backtest: capital={}, threshold={}%, stop_loss={:?}, take_profit={:?}",
                config.backtest.initial_capital,
                config.backtest.threshold,
                config.backtest.stop_loss_pct,
                config.backtest.take_profit_pct
            );
            println!(
                "  Costs: commission={}%, slippage={}%",
                config.backtest.commission_pct, config.backtest.slippage_pct
            );
            println!(
                "  Simple backtest: buy>={}%, sell<={}%, quantity={}",
                config.simple_backtest.buy_threshold,
                config.simple_backtest.sell_threshold,
                config.simple_backtest.quantity
            );
            println!(
                "  Forecast: {} horizon={} periods={} alpha={}",
                config.forecast.method,
                config.forecast.horizon,
                config.forecast.periods,
                config.forecast.alpha
            );
            println!("  Series dir: {}", config.data.series_dir.display());
        }
    }

    Ok(())
}
