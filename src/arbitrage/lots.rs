//! Lot sizes and lot-level profit estimates

use super::types::ProfitMetrics;

/// Margin as a fraction of futures contract value
pub const FUTURES_MARGIN_RATE: f64 = 0.18;

/// Exchange lot size for the tracked F&O symbols; 1 for anything else
pub fn lot_size(symbol: &str) -> u32 {
    match symbol {
        "RELIANCE" => 250,
        "TCS" => 150,
        "INFY" => 300,
        "HDFCBANK" => 550,
        "ICICIBANK" => 1375,
        "SBIN" => 1500,
        "BHARTIARTL" => 550,
        "ITC" => 1600,
        "KOTAKBANK" => 400,
        "LT" => 300,
        "AXISBANK" => 600,
        "HINDUNILVR" => 300,
        "ASIANPAINT" => 150,
        "MARUTI" => 50,
        "BAJFINANCE" => 125,
        _ => 1,
    }
}

/// Gross spread capture, margin and ROI for one lot
pub fn profit_metrics(symbol: &str, spot_price: f64, futures_price: f64) -> ProfitMetrics {
    let lot_size = lot_size(symbol);
    let lots = f64::from(lot_size);
    let gross_profit = (futures_price - spot_price).abs() * lots;
    let margin_required = futures_price * lots * FUTURES_MARGIN_RATE;

    let roi_percentage = if margin_required > 0.0 {
        gross_profit / margin_required * 100.0
    } else {
        0.0
    };

    ProfitMetrics {
        lot_size,
        gross_profit,
        margin_required,
        roi_percentage,
    }
}

/// Gross profit minus brokerage, STT, exchange charges and GST
pub fn net_profit_after_costs(gross_profit: f64, contract_value: f64) -> f64 {
    // Brokerage capped at 20 per order, buy and sell
    let brokerage = (contract_value * 0.0003).min(20.0) * 2.0;
    let stt = contract_value * 0.00025;
    let exchange_charges = contract_value * 0.00002;
    let gst = brokerage * 0.18;

    gross_profit - (brokerage + stt + exchange_charges + gst)
}
