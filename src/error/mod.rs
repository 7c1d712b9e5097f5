//! Error handling for the harmonization pipeline.
//!
//! One crate-wide error enum distinguishes fatal conditions (bad
//! configuration, required columns missing) from defect signals detected in
//! produced data (panel structure, consistency checks). Recoverable
//! conditions such as optional inputs missing from a dataset are not errors;
//! they surface on the per-stage diagnostic reports instead.

use std::path::PathBuf;

/// Specialized error type for the harmonization pipeline
#[derive(Debug, thiserror::Error)]
pub enum HarmonizeError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error converting typed rows to/from record batches
    #[error("Row conversion error: {0}")]
    RowConversion(#[from] serde_arrow::Error),

    /// Error serializing a report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid run configuration; fatal before any processing
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column required by the active country's variant is absent
    #[error("Country {country}: required column '{column}' is missing from the source table")]
    MissingColumn {
        /// ISO-3 country code of the run
        country: String,
        /// Source column name that was not found
        column: String,
    },

    /// A constructed panel violates its structural guarantees
    #[error("Panel structure violation: {0}")]
    PanelStructure(String),

    /// A produced dataset violates an invariant it must uphold
    #[error("Consistency check failed: {0}")]
    Consistency(String),

    /// An expected input path does not exist or is not usable
    #[error("Path error: {message}: {}", path.display())]
    Path {
        /// What went wrong
        message: String,
        /// The offending path
        path: PathBuf,
    },

    /// Catch-all with context
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HarmonizeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a missing-column error for a country run
    pub fn missing_column(country: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            country: country.into(),
            column: column.into(),
        }
    }

    /// Create a consistency error
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency(message.into())
    }

    /// Create a path error
    pub fn path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Path {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Result type for harmonization operations
pub type Result<T> = std::result::Result<T, HarmonizeError>;
