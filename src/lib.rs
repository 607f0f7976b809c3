//! arb-analytics: Strategy analytics for cash-futures spread arbitrage
//!
//! This library provides the core components for:
//! - Spread series sanitization and timeframe aggregation
//! - Spread forecasting (SMA, EMA, least squares) with confidence bands
//! - Profit projection with recommendation and risk tags
//! - Threshold strategy backtesting with stop-loss/take-profit and costs
//! - Hedged position P&L
//! - Opportunity detection, lot sizing and spread trend tracking
//! - Series and trade ledger files in JSON and Parquet
//! - Structured logging and Prometheus metrics

pub mod arbitrage;
pub mod backtest;
pub mod cli;
pub mod config;
pub mod data;
pub mod forecast;
pub mod position;
pub mod projection;
pub mod series;
pub mod telemetry;
