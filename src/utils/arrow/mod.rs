//! Arrow utilities for working with record batches
//!
//! Low-level column access and typed field extraction used by the schema
//! mapper and the reference-table loaders.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, get_column};
pub use extractors::{extract_bool, extract_f64, extract_i32, extract_string};
