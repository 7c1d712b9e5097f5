//! Transition report model
//!
//! The consumed schema of the external reporting collaborator: one sheet
//! per tracked dimension plus a summary sheet, each a small labeled matrix
//! with a notes block documenting methodology and sample sizes. This
//! module serializes the model to JSON; workbook rendering is external.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transition::{TransitionAnalysis, TransitionMatrix};

/// One labeled matrix sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Row headers (t0 categories)
    pub row_labels: Vec<String>,
    /// Column headers (t1 categories)
    pub column_labels: Vec<String>,
    /// Cell percentages
    pub cells: Vec<Vec<f64>>,
    /// Methodology and sample-size notes
    pub notes: Vec<String>,
}

/// Sample sizes for one dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Dimension name
    pub dimension: String,
    /// Individuals retained
    pub unweighted_n: usize,
    /// Total retained weight
    pub weighted_n: f64,
}

/// The full report for one (country, t0, t1) analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionReport {
    /// ISO-3 country code
    pub country: String,
    /// Initial wave year
    pub t0: i32,
    /// Final wave year
    pub t1: i32,
    /// Report creation time
    pub generated_at: DateTime<Utc>,
    /// One sheet per tracked dimension
    pub sheets: Vec<Sheet>,
    /// Summary sheet rows
    pub summary: Vec<SampleSummary>,
}

fn matrix_sheet(matrix: &TransitionMatrix, t0: i32, t1: i32) -> Sheet {
    let labels: Vec<String> = matrix.categories.iter().map(|c| c.label.clone()).collect();
    Sheet {
        name: matrix.dimension.label().to_string(),
        row_labels: labels.clone(),
        column_labels: labels,
        cells: matrix.cells_pct.clone(),
        notes: vec![
            format!("Rows: status in {t0}. Columns: status in {t1}."),
            "Cells are percentages of the total retained survey weight; all cells sum to 100."
                .to_string(),
            "Category 0 groups structural non-participation with values missing in exactly one wave."
                .to_string(),
            format!(
                "Sample: {} individuals, weighted N {:.1}.",
                matrix.unweighted_n, matrix.weighted_n
            ),
        ],
    }
}

impl TransitionReport {
    /// Build the report model from an analysis
    #[must_use]
    pub fn from_analysis(analysis: &TransitionAnalysis) -> Self {
        Self {
            country: analysis.country.clone(),
            t0: analysis.t0,
            t1: analysis.t1,
            generated_at: Utc::now(),
            sheets: analysis
                .matrices
                .iter()
                .map(|m| matrix_sheet(m, analysis.t0, analysis.t1))
                .collect(),
            summary: analysis
                .matrices
                .iter()
                .map(|m| SampleSummary {
                    dimension: m.dimension.label().to_string(),
                    unweighted_n: m.unweighted_n,
                    weighted_n: m.weighted_n,
                })
                .collect(),
        }
    }

    /// Deterministic file stem, `transitions_<iso>_<t0>_<t1>`
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!(
            "transitions_{}_{}_{}",
            self.country.to_lowercase(),
            self.t0,
            self.t1
        )
    }

    /// Write the report as pretty-printed JSON, overwriting the file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        log::info!("Wrote transition report to {}", path.display());
        Ok(())
    }
}
