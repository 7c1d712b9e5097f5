//! Run configuration
//!
//! An explicit configuration value passed into every stage; there is no
//! process-wide mutable state. Validation happens once, before any
//! processing, and covers the whole error taxonomy's fatal class: unknown
//! country selectors and missing required directories.

use std::path::{Path, PathBuf};

use crate::country::{CountryConfig, country_config};
use crate::error::{HarmonizeError, Result};

/// Configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding one sub-directory of parquet files per country
    /// (lower-case ISO-3 name)
    pub input_dir: PathBuf,
    /// Directory the per-unit panel datasets and reports are written to
    pub output_dir: PathBuf,
    /// Monthly IMF CPI reference table (parquet), if available
    pub cpi_imf_path: Option<PathBuf>,
    /// Monthly SEDLAC CPI reference table (parquet), if available
    pub cpi_alt_path: Option<PathBuf>,
    /// PPP/currency-adjustment reference table (parquet), if available
    pub ppp_path: Option<PathBuf>,
    /// ISO-3 selectors of the countries to process
    pub countries: Vec<String>,
    /// (t0, t1) year pairs to construct panels for
    pub year_pairs: Vec<(i32, i32)>,
    /// Process (country, year-pair) units on the rayon pool
    pub parallel: bool,
}

impl RunConfig {
    /// Create a configuration with the required paths
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            cpi_imf_path: None,
            cpi_alt_path: None,
            ppp_path: None,
            countries: Vec::new(),
            year_pairs: Vec::new(),
            parallel: true,
        }
    }

    /// Input directory for one country
    #[must_use]
    pub fn country_input_dir(&self, cfg: &CountryConfig) -> PathBuf {
        self.input_dir.join(cfg.code.to_lowercase())
    }

    /// Validate the configuration and resolve the country selectors
    ///
    /// Any failure here is fatal and happens before any data is touched.
    pub fn validate(&self) -> Result<Vec<&'static CountryConfig>> {
        if !self.input_dir.is_dir() {
            return Err(HarmonizeError::path(
                "input directory does not exist",
                &self.input_dir,
            ));
        }
        if self.countries.is_empty() {
            return Err(HarmonizeError::config("no countries selected"));
        }
        if self.year_pairs.is_empty() {
            return Err(HarmonizeError::config("no year pairs selected"));
        }
        for &(t0, t1) in &self.year_pairs {
            if t0 >= t1 {
                return Err(HarmonizeError::config(format!(
                    "invalid year pair ({t0}, {t1}): t0 must precede t1"
                )));
            }
        }

        let configs = self
            .countries
            .iter()
            .map(|code| country_config(code))
            .collect::<Result<Vec<_>>>()?;

        for cfg in &configs {
            let dir = self.country_input_dir(cfg);
            if !dir.exists() {
                return Err(HarmonizeError::path(
                    format!("input directory for {} does not exist", cfg.code),
                    dir,
                ));
            }
        }

        validate_optional_file(self.cpi_imf_path.as_deref(), "IMF CPI table")?;
        validate_optional_file(self.cpi_alt_path.as_deref(), "SEDLAC CPI table")?;
        validate_optional_file(self.ppp_path.as_deref(), "PPP table")?;

        Ok(configs)
    }
}

fn validate_optional_file(path: Option<&Path>, what: &str) -> Result<()> {
    match path {
        Some(path) if !path.is_file() => Err(HarmonizeError::path(
            format!("{what} is configured but not readable"),
            path,
        )),
        _ => Ok(()),
    }
}
