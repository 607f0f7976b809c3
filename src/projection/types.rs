//! Profit projection types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trade recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

/// Risk tag derived from forecast band spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Hold => "HOLD",
        })
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        })
    }
}

/// Expected, best and worst case profit for a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitPrediction {
    pub expected_profit: f64,
    /// Mean forecast confidence
    pub confidence: f64,
    pub best_case_profit: f64,
    pub worst_case_profit: f64,
    pub recommendation: Recommendation,
    pub risk_level: RiskLevel,
}

impl ProfitPrediction {
    /// Result used when no forecast is available
    pub fn neutral() -> Self {
        Self {
            expected_profit: 0.0,
            confidence: 0.0,
            best_case_profit: 0.0,
            worst_case_profit: 0.0,
            recommendation: Recommendation::Hold,
            risk_level: RiskLevel::High,
        }
    }
}
