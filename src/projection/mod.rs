//! Profit projection module
//!
//! Converts a spread forecast into a profit range, a recommendation and a
//! risk tag.

mod types;

pub use types::{ProfitPrediction, Recommendation, RiskLevel};

use crate::forecast::ForecastPoint;

/// Band spread (in spread percentage points) above which risk is HIGH
pub const HIGH_RISK_VOLATILITY: f64 = 2.0;
/// Band spread above which risk is MEDIUM
pub const MEDIUM_RISK_VOLATILITY: f64 = 1.0;

/// Project profit for `quantity` units at `current_price` from a forecast.
///
/// An empty forecast yields [`ProfitPrediction::neutral`].
pub fn project(
    current_price: f64,
    forecast: &[ForecastPoint],
    quantity: f64,
    threshold: f64,
) -> ProfitPrediction {
    if forecast.is_empty() {
        return ProfitPrediction::neutral();
    }

    let n = forecast.len() as f64;
    let avg_spread = forecast.iter().map(|p| p.predicted_spread).sum::<f64>() / n;
    let avg_confidence = forecast.iter().map(|p| p.confidence).sum::<f64>() / n;
    let best_spread = forecast
        .iter()
        .map(|p| p.upper_bound)
        .fold(f64::NEG_INFINITY, f64::max);
    let worst_spread = forecast
        .iter()
        .map(|p| p.lower_bound)
        .fold(f64::INFINITY, f64::min);

    let profit_at = |spread: f64| current_price * spread / 100.0 * quantity;

    let recommendation = if avg_spread > threshold {
        Recommendation::Buy
    } else if avg_spread < -threshold {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    };

    let volatility = (best_spread - worst_spread).abs();
    let risk_level = if volatility > HIGH_RISK_VOLATILITY {
        RiskLevel::High
    } else if volatility > MEDIUM_RISK_VOLATILITY {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    tracing::debug!(
        avg_spread = avg_spread,
        volatility = volatility,
        recommendation = %recommendation,
        risk = %risk_level,
        "Projected profit"
    );

    ProfitPrediction {
        expected_profit: profit_at(avg_spread),
        confidence: avg_confidence,
        best_case_profit: profit_at(best_spread),
        worst_case_profit: profit_at(worst_spread),
        recommendation,
        risk_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(predicted: f64, lower: f64, upper: f64, confidence: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp: 0,
            predicted_spread: predicted,
            confidence,
            upper_bound: upper,
            lower_bound: lower,
        }
    }

    #[test]
    fn test_empty_forecast_is_neutral() {
        let result = project(100.0, &[], 1.0, 0.5);
        assert_eq!(result, ProfitPrediction::neutral());
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.expected_profit, 0.0);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_profit_scaling_and_extremes_across_horizon() {
        let forecast = vec![
            point(0.8, 0.6, 1.2, 90.0),
            point(1.0, 0.2, 1.1, 80.0),
            point(1.2, 0.7, 1.3, 70.0),
        ];
        let result = project(2000.0, &forecast, 10.0, 0.5);

        // avg 1.0% of 2000 = 20 per unit
        assert!((result.expected_profit - 200.0).abs() < 1e-9);
        assert!((result.confidence - 80.0).abs() < 1e-9);
        // best = max upper (1.3), worst = min lower (0.2)
        assert!((result.best_case_profit - 260.0).abs() < 1e-9);
        assert!((result.worst_case_profit - 40.0).abs() < 1e-9);
        assert_eq!(result.recommendation, Recommendation::Buy);
        // |1.3 - 0.2| = 1.1
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_recommendation_thresholds() {
        let flat = |s: f64| vec![point(s, s, s, 50.0)];
        assert_eq!(project(100.0, &flat(0.6), 1.0, 0.5).recommendation, Recommendation::Buy);
        assert_eq!(project(100.0, &flat(-0.6), 1.0, 0.5).recommendation, Recommendation::Sell);
        assert_eq!(project(100.0, &flat(0.5), 1.0, 0.5).recommendation, Recommendation::Hold);
        assert_eq!(project(100.0, &flat(-0.5), 1.0, 0.5).recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_risk_levels() {
        let banded = |half: f64| vec![point(0.0, -half, half, 50.0)];
        assert_eq!(project(100.0, &banded(0.5), 1.0, 0.5).risk_level, RiskLevel::Low);
        assert_eq!(project(100.0, &banded(0.75), 1.0, 0.5).risk_level, RiskLevel::Medium);
        assert_eq!(project(100.0, &banded(1.0), 1.0, 0.5).risk_level, RiskLevel::Medium);
        assert_eq!(project(100.0, &banded(1.5), 1.0, 0.5).risk_level, RiskLevel::High);
    }

    #[test]
    fn test_serializes_upper_case_tags() {
        let json = serde_json::to_string(&ProfitPrediction::neutral()).unwrap();
        assert!(json.contains("\"recommendation\":\"HOLD\""));
        assert!(json.contains("\"riskLevel\":\"HIGH\""));
        assert!(json.contains("\"bestCaseProfit\""));
    }
}
