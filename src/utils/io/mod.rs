//! File IO utilities
//!
//! Parquet reading/writing and typed-row persistence through serde_arrow.

pub mod parquet;

pub use parquet::{
    DEFAULT_BATCH_SIZE, find_parquet_files, read_parquet, read_typed_rows, write_record_batch,
    write_typed_rows,
};
