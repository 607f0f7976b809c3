//! End-to-end analytics pipeline tests

use arb_analytics::arbitrage::{
    detect, ArbitrageAction, MarketSnapshot, SpreadTrend, TrendTracker,
};
use arb_analytics::backtest::{run_backtest, BacktestConfig, ExitReason, TradeType};
use arb_analytics::config::ForecastConfig;
use arb_analytics::forecast::{run_forecast, ForecastMethod};
use arb_analytics::projection::{project, Recommendation};
use arb_analytics::series::{aggregate_timeframe, SeriesBuilder, TimePoint, Timeframe};

const MIN: i64 = 60_000;

fn round_trip_series() -> Vec<TimePoint> {
    let spots = [100.0, 100.0, 101.0, 102.0, 102.0, 101.0, 100.0];
    let spreads = [0.0, 0.6, 0.4, -0.1, -0.7, -0.2, 0.3];
    spots
        .iter()
        .zip(spreads)
        .enumerate()
        .map(|(i, (&spot, spread))| {
            TimePoint::new(i as i64 * MIN, spot, spot * (1.0 + spread / 100.0), spread)
        })
        .collect()
}

#[test]
fn test_backtest_long_then_short() {
    let metrics = run_backtest(&round_trip_series(), &BacktestConfig::default());

    assert_eq!(metrics.total_trades, 2);
    assert_eq!(metrics.winning_trades, 2);
    assert_eq!(metrics.losing_trades, 0);

    let long = &metrics.trades[0];
    assert_eq!(long.trade_type, TradeType::Long);
    assert_eq!(long.entry_time, MIN);
    assert_eq!(long.exit_time, 3 * MIN);
    assert_eq!(long.exit_reason, ExitReason::SpreadReversal);
    assert!((long.profit - (2.0 - 202.0 * 0.04 / 100.0)).abs() < 1e-9);

    let short = &metrics.trades[1];
    assert_eq!(short.trade_type, TradeType::Short);
    assert_eq!(short.entry_price, 102.0);
    assert_eq!(short.exit_price, 100.0);
    assert!((short.profit - long.profit).abs() < 1e-9);

    assert!((metrics.final_capital - (100_000.0 + metrics.net_profit)).abs() < 1e-9);
    assert!(metrics.profit_factor.is_infinite());
    assert_eq!(metrics.max_drawdown, 0.0);
}

#[test]
fn test_backtest_report_serializes_infinite_profit_factor() {
    let metrics = run_backtest(&round_trip_series(), &BacktestConfig::default());
    let json = serde_json::to_value(&metrics).unwrap();
    assert!(json["profitFactor"].is_null());
    assert_eq!(json["totalTrades"], 2);
    assert_eq!(json["trades"][0]["type"], "LONG");
}

#[test]
fn test_snapshots_to_forecast_and_projection() {
    let mut builder = SeriesBuilder::new();
    for i in 0..30 {
        let spot = 2_850.0 + i as f64;
        let spread_pct = 0.4 + 0.02 * i as f64;
        let futures = spot * (1.0 + spread_pct / 100.0);
        let snapshot = MarketSnapshot::new("RELIANCE", spot, futures, spread_pct);
        assert!(builder.push(&snapshot, i * MIN));
    }

    let series = builder.series("RELIANCE");
    assert_eq!(series.len(), 30);

    let five_minute = aggregate_timeframe(&series, Timeframe::FiveMinutes);
    assert_eq!(five_minute.len(), 6);

    let config = ForecastConfig {
        method: ForecastMethod::Linear,
        ..ForecastConfig::default()
    };
    let forecast = run_forecast(&config, &series).unwrap();
    assert_eq!(forecast.len(), 5);
    // Strictly linear input: the band collapses and the trend continues
    assert!((forecast[0].predicted_spread - 1.0).abs() < 1e-9);
    assert!(forecast.iter().all(|p| p.upper_bound - p.lower_bound < 1e-9));

    let last = series.last().unwrap();
    let prediction = project(last.spot, &forecast, 250.0, 0.5);
    assert_eq!(prediction.recommendation, Recommendation::Buy);
    assert!(prediction.expected_profit > 0.0);

    let opportunity = detect("RELIANCE", last.spot, last.futures, 0.5);
    assert!(opportunity.opportunity);
    assert_eq!(opportunity.action, ArbitrageAction::BuySpotSellFutures);
    assert_eq!(opportunity.profit.lot_size, 250);
}

#[test]
fn test_malformed_samples_are_ignored() {
    let mut series = round_trip_series();
    series.insert(2, TimePoint::new(MIN, 100.0, f64::NAN, 0.6));
    series.push(TimePoint::new(0, 100.0, 100.0, 0.0));

    let aggregated = aggregate_timeframe(&series, Timeframe::OneMinute);
    assert_eq!(aggregated, round_trip_series());
}

#[test]
fn test_consecutive_quotes_carry_spread_trend() {
    let mut tracker = TrendTracker::new();
    let quote = |tracker: &mut TrendTracker, spread_pct: f64| {
        let spot = 2_850.0;
        tracker.detect("RELIANCE", spot, spot * (1.0 + spread_pct / 100.0), 0.5)
    };

    let trends: Vec<SpreadTrend> = [0.3, 0.35, 0.6, 0.7]
        .into_iter()
        .map(|pct| quote(&mut tracker, pct).spread_trend)
        .collect();
    assert_eq!(
        trends,
        vec![
            SpreadTrend::Stable,
            SpreadTrend::Stable,
            SpreadTrend::Rising,
            SpreadTrend::Rising
        ]
    );

    quote(&mut tracker, 0.4);
    let narrowing = quote(&mut tracker, 0.1);
    assert_eq!(narrowing.spread_trend, SpreadTrend::Falling);
    assert!(!narrowing.opportunity);

    // Plain detection carries no history
    assert_eq!(detect("RELIANCE", 2_850.0, 2_870.0, 0.5).spread_trend, SpreadTrend::Stable);
}
