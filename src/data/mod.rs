//! Series files and persistence
//!
//! Series load from `.json` (an array of samples) or `.parquet` files.
//! Backtest ledgers can be exported to Parquet.

mod parquet;
mod store;
mod types;

pub use self::parquet::{series_schema, trade_schema, ParquetReader, ParquetWriter};
pub use store::{JsonFileStore, MemoryStore, Store};
pub use types::DataError;

use crate::series::TimePoint;
use std::fs;
use std::path::Path;

enum SeriesFormat {
    Json,
    Parquet,
}

fn format_of(path: &Path) -> Result<SeriesFormat, DataError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(SeriesFormat::Json),
        Some("parquet") => Ok(SeriesFormat::Parquet),
        _ => Err(DataError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load a sample series from a `.json` or `.parquet` file
pub fn load_series(path: &Path) -> Result<Vec<TimePoint>, DataError> {
    match format_of(path)? {
        SeriesFormat::Json => {
            let content = fs::read(path)?;
            let points: Vec<TimePoint> = serde_json::from_slice(&content)?;
            tracing::debug!(path = ?path, count = points.len(), "Read series from JSON");
            Ok(points)
        }
        SeriesFormat::Parquet => ParquetReader::new(path.to_path_buf()).read_series(),
    }
}

/// Save a sample series, choosing the format from the file extension
pub fn save_series(path: &Path, points: &[TimePoint]) -> Result<(), DataError> {
    match format_of(path)? {
        SeriesFormat::Json => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_vec_pretty(points)?)?;
            Ok(())
        }
        SeriesFormat::Parquet => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            ParquetWriter::new(dir.to_path_buf()).write_series(path, points)
        }
    }
}
