//! Parquet file operations
//!
//! Reading raw survey tables into Arrow record batches and persisting
//! typed row vectors (panel datasets) back to parquet through serde_arrow.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::{HarmonizeError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Find all parquet files directly under a directory, sorted by name
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(HarmonizeError::path("not a directory", dir));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Read a parquet file into record batches
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    log_operation_start("Reading parquet file", path);
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, None);
    Ok(batches)
}

/// Write a single record batch to a parquet file, overwriting it
pub fn write_record_batch(path: &Path, batch: &RecordBatch) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    log_operation_complete("wrote", path, batch.num_rows(), None);
    Ok(())
}

fn tracing_options() -> TracingOptions {
    TracingOptions::default()
        .allow_null_fields(true)
        .enums_without_data_as_strings(true)
}

/// Persist a vector of typed rows as a parquet file
///
/// The schema is traced from the row type, so it is identical for every
/// persisted dataset regardless of which optional fields happen to be
/// populated.
pub fn write_typed_rows<T: Serialize + DeserializeOwned>(path: &Path, rows: &[T]) -> Result<()> {
    let fields = Vec::<FieldRef>::from_type::<T>(tracing_options())?;
    let batch = serde_arrow::to_record_batch(&fields, &rows)?;
    write_record_batch(path, &batch)
}

/// Load a vector of typed rows from a parquet file
pub fn read_typed_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let batches = read_parquet(path)?;
    let mut rows = Vec::new();
    for batch in &batches {
        rows.extend(serde_arrow::from_record_batch::<Vec<T>>(batch)?);
    }
    Ok(rows)
}
