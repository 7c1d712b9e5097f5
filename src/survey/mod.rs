//! Survey data sources
//!
//! Loading of raw survey tables. A source is a directory of parquet files
//! (or a single file) per country; the async loader does the IO and the
//! sync entry point wraps it in a runtime, so both call sites work.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use arrow::record_batch::RecordBatch;

use crate::error::{HarmonizeError, Result};
use crate::utils::io::{find_parquet_files, read_parquet};

/// A source of raw survey record batches
pub trait SurveySource: Send + Sync {
    /// Name of the source, for logging
    fn source_name(&self) -> &str;

    /// Load all record batches from a base path
    fn load(&self, base_path: &Path) -> Result<Vec<RecordBatch>> {
        if let Ok(_handle) = tokio::runtime::Handle::try_current() {
            // Already inside a runtime; drive the future on this thread
            futures::executor::block_on(self.load_async(base_path))
        } else {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(self.load_async(base_path))
        }
    }

    /// Load all record batches from a base path asynchronously
    fn load_async<'a>(
        &'a self,
        base_path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordBatch>>> + Send + 'a>>;
}

/// Survey source reading parquet files from a per-country directory
#[derive(Debug, Clone)]
pub struct ParquetSurveySource {
    name: String,
}

impl ParquetSurveySource {
    /// Create a source with a display name (typically the country code)
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SurveySource for ParquetSurveySource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn load_async<'a>(
        &'a self,
        base_path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordBatch>>> + Send + 'a>> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(base_path).await.map_err(|_| {
                HarmonizeError::path("survey input path not accessible", base_path)
            })?;

            let files = if metadata.is_dir() {
                let dir = base_path.to_path_buf();
                tokio::task::spawn_blocking(move || find_parquet_files(&dir))
                    .await
                    .map_err(|e| anyhow::anyhow!("task join error: {e}"))??
            } else {
                vec![base_path.to_path_buf()]
            };

            if files.is_empty() {
                log::warn!(
                    "{}: no parquet files found at {}",
                    self.name,
                    base_path.display()
                );
                return Ok(Vec::new());
            }

            log::info!(
                "{}: loading {} parquet file(s) from {}",
                self.name,
                files.len(),
                base_path.display()
            );

            let mut batches = Vec::new();
            for file in files {
                let loaded = tokio::task::spawn_blocking(move || read_parquet(&file))
                    .await
                    .map_err(|e| anyhow::anyhow!("task join error: {e}"))??;
                batches.extend(loaded);
            }
            Ok(batches)
        })
    }
}
