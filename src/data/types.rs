//! Data layer errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors from series files and the persistence port
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    /// File extension is neither .json nor .parquet
    #[error("Unsupported series format: {0:?}")]
    UnsupportedFormat(PathBuf),
    /// Column missing or of the wrong type
    #[error("Invalid column: {0}")]
    InvalidColumn(&'static str),
    /// Store key with characters outside [A-Za-z0-9_-]
    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}
