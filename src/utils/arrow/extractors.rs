//! Typed field extraction from Arrow record batches
//!
//! Survey files are not consistent about numeric widths: the same concept
//! arrives as Int32 in one delivery and Int64 or Float64 in the next.
//! These extractors accept the common encodings and convert, so the mapper
//! never branches on physical types.

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int8Array, Int16Array, Int32Array,
    Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{HarmonizeError, Result};
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract a string value from a record batch
///
/// # Returns
/// * `Ok(Some(value))` - the extracted, non-empty string
/// * `Ok(None)` - null, empty, or column absent (and not required)
pub fn extract_string(
    batch: &RecordBatch,
    row: usize,
    column_name: &str,
    required: bool,
) -> Result<Option<String>> {
    let Some(array) = get_column(batch, column_name, required)? else {
        return Ok(None);
    };

    match array.data_type() {
        DataType::Utf8 => {
            let strings = downcast_array::<StringArray>(&array, column_name, "Utf8")?;
            if row < strings.len() && !strings.is_null(row) {
                let value = strings.value(row);
                if !value.is_empty() {
                    return Ok(Some(value.to_string()));
                }
            }
            Ok(None)
        }
        // Identifier columns sometimes arrive numeric
        DataType::Int32 | DataType::Int64 => Ok(extract_i32(batch, row, column_name, required)?
            .map(|v| v.to_string())),
        other => Err(HarmonizeError::consistency(format!(
            "column '{column_name}' is {other:?}, expected a string-like type"
        ))),
    }
}

/// Extract an integer value, accepting the common integer widths and
/// integral floats
pub fn extract_i32(
    batch: &RecordBatch,
    row: usize,
    column_name: &str,
    required: bool,
) -> Result<Option<i32>> {
    let Some(array) = get_column(batch, column_name, required)? else {
        return Ok(None);
    };

    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    match array.data_type() {
        DataType::Int8 => {
            let a = downcast_array::<Int8Array>(&array, column_name, "Int8")?;
            Ok(Some(i32::from(a.value(row))))
        }
        DataType::Int16 => {
            let a = downcast_array::<Int16Array>(&array, column_name, "Int16")?;
            Ok(Some(i32::from(a.value(row))))
        }
        DataType::Int32 => {
            let a = downcast_array::<Int32Array>(&array, column_name, "Int32")?;
            Ok(Some(a.value(row)))
        }
        DataType::Int64 => {
            let a = downcast_array::<Int64Array>(&array, column_name, "Int64")?;
            i32::try_from(a.value(row)).map(Some).map_err(|_| {
                HarmonizeError::consistency(format!(
                    "column '{column_name}' value {} overflows i32",
                    a.value(row)
                ))
            })
        }
        DataType::Float64 => {
            let a = downcast_array::<Float64Array>(&array, column_name, "Float64")?;
            let value = a.value(row);
            if value.fract() == 0.0 {
                Ok(Some(value as i32))
            } else {
                Err(HarmonizeError::consistency(format!(
                    "column '{column_name}' value {value} is not integral"
                )))
            }
        }
        DataType::Utf8 => {
            let a = downcast_array::<StringArray>(&array, column_name, "Utf8")?;
            let text = a.value(row).trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse::<i32>().map(Some).map_err(|_| {
                    HarmonizeError::consistency(format!(
                        "column '{column_name}' value '{text}' is not an integer"
                    ))
                })
            }
        }
        other => Err(HarmonizeError::consistency(format!(
            "column '{column_name}' is {other:?}, expected an integer-like type"
        ))),
    }
}

/// Extract a floating-point value, accepting integer encodings
pub fn extract_f64(
    batch: &RecordBatch,
    row: usize,
    column_name: &str,
    required: bool,
) -> Result<Option<f64>> {
    let Some(array) = get_column(batch, column_name, required)? else {
        return Ok(None);
    };

    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    match array.data_type() {
        DataType::Float64 => {
            let a = downcast_array::<Float64Array>(&array, column_name, "Float64")?;
            Ok(Some(a.value(row)))
        }
        DataType::Float32 => {
            let a = downcast_array::<Float32Array>(&array, column_name, "Float32")?;
            Ok(Some(f64::from(a.value(row))))
        }
        DataType::Int32 => {
            let a = downcast_array::<Int32Array>(&array, column_name, "Int32")?;
            Ok(Some(f64::from(a.value(row))))
        }
        DataType::Int64 => {
            let a = downcast_array::<Int64Array>(&array, column_name, "Int64")?;
            Ok(Some(a.value(row) as f64))
        }
        other => Err(HarmonizeError::consistency(format!(
            "column '{column_name}' is {other:?}, expected a numeric type"
        ))),
    }
}

/// Extract a boolean value
///
/// Integer columns are treated as 0/1 indicators; any other value is
/// returned as missing rather than guessed at.
pub fn extract_bool(
    batch: &RecordBatch,
    row: usize,
    column_name: &str,
    required: bool,
) -> Result<Option<bool>> {
    let Some(array) = get_column(batch, column_name, required)? else {
        return Ok(None);
    };

    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    match array.data_type() {
        DataType::Boolean => {
            let a = downcast_array::<BooleanArray>(&array, column_name, "Boolean")?;
            Ok(Some(a.value(row)))
        }
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            match extract_i32(batch, row, column_name, required)? {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Ok(None),
            }
        }
        other => Err(HarmonizeError::consistency(format!(
            "column '{column_name}' is {other:?}, expected a boolean-like type"
        ))),
    }
}
