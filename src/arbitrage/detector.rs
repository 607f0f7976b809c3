//! Cash-futures spread detection

use super::lots::profit_metrics;
use super::trend::SpreadTrend;
use super::types::{ArbitrageAction, ArbitrageOpportunity};

/// Check a spot/futures pair against a percentage threshold
pub fn detect(
    symbol: &str,
    spot_price: f64,
    futures_price: f64,
    threshold_pct: f64,
) -> ArbitrageOpportunity {
    let spread = futures_price - spot_price;
    let spread_percentage = if spot_price != 0.0 {
        spread / spot_price * 100.0
    } else {
        0.0
    };

    let action = if spread_percentage > threshold_pct {
        ArbitrageAction::BuySpotSellFutures
    } else if spread_percentage < -threshold_pct {
        ArbitrageAction::SellSpotBuyFutures
    } else {
        ArbitrageAction::Hold
    };
    let opportunity = spread_percentage.abs() > threshold_pct;

    if opportunity {
        tracing::debug!(
            symbol = symbol,
            spread_pct = spread_percentage,
            action = %action,
            "Arbitrage opportunity detected"
        );
    }

    ArbitrageOpportunity {
        opportunity,
        symbol: symbol.to_string(),
        spot_price,
        futures_price,
        spread,
        spread_percentage,
        action,
        profit: profit_metrics(symbol, spot_price, futures_price),
        spread_trend: SpreadTrend::Stable,
    }
}
