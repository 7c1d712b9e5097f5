//! Column access helpers for Arrow record batches

use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;

use crate::error::{HarmonizeError, Result};

/// Get a column from a record batch by name
///
/// # Returns
/// * `Ok(Some(array))` - the column exists
/// * `Ok(None)` - the column is absent and not required
/// * `Err` - the column is absent but required
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<ArrayRef>> {
    match batch.schema().index_of(column_name) {
        Ok(index) => Ok(Some(batch.column(index).clone())),
        Err(_) if !required => Ok(None),
        Err(_) => Err(HarmonizeError::consistency(format!(
            "required column '{column_name}' not found in batch"
        ))),
    }
}

/// Downcast an array reference to a concrete array type
pub fn downcast_array<'a, T: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected: &str,
) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        HarmonizeError::consistency(format!(
            "column '{column_name}' is {:?}, expected {expected}",
            array.data_type()
        ))
    })
}
