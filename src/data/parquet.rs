//! Parquet series files and trade ledgers

use super::DataError;
use crate::backtest::Trade;
use crate::series::TimePoint;
use arrow::array::{Array, ArrayRef, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn timestamp_field(name: &str) -> Field {
    Field::new(
        name,
        DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
        false,
    )
}

/// Spread series schema; OHLC columns are nullable
pub fn series_schema() -> Schema {
    Schema::new(vec![
        timestamp_field("timestamp"),
        Field::new("time", DataType::Utf8, false),
        Field::new("spot", DataType::Float64, false),
        Field::new("futures", DataType::Float64, false),
        Field::new("spread", DataType::Float64, false),
        Field::new("open", DataType::Float64, true),
        Field::new("high", DataType::Float64, true),
        Field::new("low", DataType::Float64, true),
        Field::new("close", DataType::Float64, true),
    ])
}

/// Backtest trade ledger schema
pub fn trade_schema() -> Schema {
    Schema::new(vec![
        timestamp_field("entry_time"),
        timestamp_field("exit_time"),
        Field::new("type", DataType::Utf8, false),
        Field::new("entry_price", DataType::Float64, false),
        Field::new("exit_price", DataType::Float64, false),
        Field::new("spread", DataType::Float64, false),
        Field::new("profit", DataType::Float64, false),
        Field::new("profit_percent", DataType::Float64, false),
        Field::new("exit_reason", DataType::Utf8, false),
    ])
}

fn timestamps(values: Vec<i64>) -> ArrayRef {
    Arc::new(TimestampMillisecondArray::from(values).with_timezone("UTC"))
}

fn floats<T>(rows: &[T], f: impl Fn(&T) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn optional_floats<T>(rows: &[T], f: impl Fn(&T) -> Option<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

/// Parquet writer for series snapshots and trade ledgers
pub struct ParquetWriter {
    output_dir: PathBuf,
}

impl ParquetWriter {
    /// Create a writer that places generated file names under `output_dir`
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Generate file path for a given timestamp and prefix
    pub fn file_path(&self, prefix: &str, timestamp: DateTime<Utc>) -> PathBuf {
        let filename = format!("{}_{}.parquet", prefix, timestamp.format("%Y%m%d_%H%M%S"));
        self.output_dir.join(filename)
    }

    fn write_batch(&self, path: &Path, batch: RecordBatch) -> Result<(), DataError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    /// Write a spread series; an empty series writes a zero-row file
    pub fn write_series(&self, path: &Path, points: &[TimePoint]) -> Result<(), DataError> {
        let batch = RecordBatch::try_new(
            Arc::new(series_schema()),
            vec![
                timestamps(points.iter().map(|p| p.timestamp).collect()),
                Arc::new(StringArray::from(
                    points.iter().map(|p| p.time.as_str()).collect::<Vec<_>>(),
                )),
                floats(points, |p| p.spot),
                floats(points, |p| p.futures),
                floats(points, |p| p.spread),
                optional_floats(points, |p| p.open),
                optional_floats(points, |p| p.high),
                optional_floats(points, |p| p.low),
                optional_floats(points, |p| p.close),
            ],
        )?;
        self.write_batch(path, batch)?;

        tracing::debug!(path = ?path, count = points.len(), "Wrote series to Parquet");
        Ok(())
    }

    /// Write a backtest trade ledger; an empty ledger writes a zero-row file
    pub fn write_trades(&self, path: &Path, trades: &[Trade]) -> Result<(), DataError> {
        let types: Vec<String> = trades.iter().map(|t| t.trade_type.to_string()).collect();
        let reasons: Vec<String> = trades.iter().map(|t| t.exit_reason.to_string()).collect();

        let batch = RecordBatch::try_new(
            Arc::new(trade_schema()),
            vec![
                timestamps(trades.iter().map(|t| t.entry_time).collect()),
                timestamps(trades.iter().map(|t| t.exit_time).collect()),
                Arc::new(StringArray::from(types)),
                floats(trades, |t| t.entry_price),
                floats(trades, |t| t.exit_price),
                floats(trades, |t| t.spread),
                floats(trades, |t| t.profit),
                floats(trades, |t| t.profit_percent),
                Arc::new(StringArray::from(reasons)),
            ],
        )?;
        self.write_batch(path, batch)?;

        tracing::debug!(path = ?path, count = trades.len(), "Wrote trades to Parquet");
        Ok(())
    }
}

/// Reader for Parquet series files
pub struct ParquetReader {
    path: PathBuf,
}

fn column<'a, A: 'static>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a A, DataError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<A>())
        .ok_or(DataError::InvalidColumn(name))
}

fn optional(array: &Float64Array, i: usize) -> Option<f64> {
    (!array.is_null(i)).then(|| array.value(i))
}

impl ParquetReader {
    /// Create a new reader for a Parquet file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read a spread series written by [`ParquetWriter::write_series`]
    pub fn read_series(&self) -> Result<Vec<TimePoint>, DataError> {
        let file = File::open(&self.path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut points = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let timestamps = column::<TimestampMillisecondArray>(&batch, "timestamp")?;
            let times = column::<StringArray>(&batch, "time")?;
            let spot = column::<Float64Array>(&batch, "spot")?;
            let futures = column::<Float64Array>(&batch, "futures")?;
            let spread = column::<Float64Array>(&batch, "spread")?;
            let open = column::<Float64Array>(&batch, "open")?;
            let high = column::<Float64Array>(&batch, "high")?;
            let low = column::<Float64Array>(&batch, "low")?;
            let close = column::<Float64Array>(&batch, "close")?;

            for i in 0..batch.num_rows() {
                points.push(TimePoint {
                    timestamp: timestamps.value(i),
                    time: times.value(i).to_string(),
                    spot: spot.value(i),
                    futures: futures.value(i),
                    spread: spread.value(i),
                    open: optional(open, i),
                    high: optional(high, i),
                    low: optional(low, i),
                    close: optional(close, i),
                });
            }
        }

        tracing::debug!(path = ?self.path, count = points.len(), "Read series from Parquet");
        Ok(points)
    }

    /// Get the file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
