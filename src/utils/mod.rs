//! Utility modules
//!
//! Arrow column access, parquet IO, logging/progress helpers and synthetic
//! test fixtures.

pub mod arrow;
pub mod io;
pub mod logging;
pub mod test;

pub use io::{DEFAULT_BATCH_SIZE, find_parquet_files, read_parquet};
