//! Position P&L calculator
//!
//! What-if P&L for one hedged cash-futures pair: long spot, short futures.

use crate::arbitrage::{lot_size, MarketSnapshot};
use serde::{Deserialize, Serialize};

/// Margin posted on each leg as a fraction of entry notional
pub const MARGIN_RATE: f64 = 0.2;

/// Default round-trip fee rate in percent of notional
pub const DEFAULT_FEE_RATE_PCT: f64 = 0.05;

/// Manually specified pair trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInputs {
    pub quantity: f64,
    pub spot_entry: f64,
    pub spot_exit: f64,
    pub futures_entry: f64,
    pub futures_exit: f64,
    /// Fee rate per leg execution, in percent
    pub fee_rate_pct: f64,
}

impl PositionInputs {
    /// Inputs seeded from a live snapshot: one lot, exits 1% above entry
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        let quantity = snapshot
            .lot_size
            .unwrap_or_else(|| lot_size(&snapshot.symbol));
        Self {
            quantity: f64::from(quantity),
            spot_entry: snapshot.spot_price,
            spot_exit: snapshot.spot_price * 1.01,
            futures_entry: snapshot.futures_price,
            futures_exit: snapshot.futures_price * 1.01,
            fee_rate_pct: DEFAULT_FEE_RATE_PCT,
        }
    }
}

/// P&L breakdown of a pair trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPnl {
    #[serde(rename = "spotPnL")]
    pub spot_pnl: f64,
    #[serde(rename = "futuresPnL")]
    pub futures_pnl: f64,
    #[serde(rename = "grossPnL")]
    pub gross_pnl: f64,
    pub total_fees: f64,
    #[serde(rename = "netPnL")]
    pub net_pnl: f64,
    pub margin: f64,
    /// Net P&L over margin, in percent
    pub roi: f64,
}

/// Compute the P&L breakdown.
///
/// ROI divides by margin without a guard; zero entry prices yield a
/// non-finite ROI.
pub fn calculate_pnl(inputs: &PositionInputs) -> PositionPnl {
    let q = inputs.quantity;
    let spot_pnl = (inputs.spot_exit - inputs.spot_entry) * q;
    let futures_pnl = (inputs.futures_entry - inputs.futures_exit) * q;
    let gross_pnl = spot_pnl + futures_pnl;

    let turnover =
        inputs.spot_entry + inputs.futures_entry + inputs.spot_exit + inputs.futures_exit;
    let total_fees = turnover * q * inputs.fee_rate_pct / 100.0;
    let net_pnl = gross_pnl - total_fees;
    let margin = MARGIN_RATE * q * (inputs.spot_entry + inputs.futures_entry);

    PositionPnl {
        spot_pnl,
        futures_pnl,
        gross_pnl,
        total_fees,
        net_pnl,
        margin,
        roi: net_pnl / margin * 100.0,
    }
}
