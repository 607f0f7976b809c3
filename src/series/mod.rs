//! Time series module
//!
//! Sample types, cleaning, and fixed-width OHLC aggregation

mod aggregate;
mod builder;
mod types;

pub use aggregate::{aggregate, aggregate_timeframe, partition, sanitize};
pub use builder::{SeriesBuilder, MAX_DATA_POINTS};
pub use types::{TimePoint, Timeframe, NATIVE_RESOLUTION_MS};
