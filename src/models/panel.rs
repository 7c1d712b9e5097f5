//! Panel records for a two-wave comparison
//!
//! A `PanelDataset` is the unit of work downstream of the panel
//! constructor: the person-year records of one country restricted to one
//! (t0, t1) year pair, each tagged with its wave position and whether the
//! individual belongs to the balanced panel.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::models::PersonYear;

/// A person-year record tagged for a specific two-wave panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelRecord {
    /// false = initial wave t0, true = final wave t1
    pub time: bool,
    /// Whether the individual is observed in both waves under the
    /// country's membership rule
    pub balanced_panel: bool,
    /// The canonical record
    pub person: PersonYear,
}

/// Set of canonical fields the schema mapper actually populated
///
/// Downstream stages consult this instead of probing the data, so a
/// skipped derived variable is attributable to the specific inputs that
/// were absent from the source table.
#[derive(Debug, Clone, Default)]
pub struct FieldCoverage {
    populated: FxHashSet<&'static str>,
}

impl FieldCoverage {
    /// Create an empty coverage set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a canonical field as populated
    pub fn mark(&mut self, field: &'static str) {
        self.populated.insert(field);
    }

    /// Whether a canonical field was populated
    #[must_use]
    pub fn has(&self, field: &'static str) -> bool {
        self.populated.contains(field)
    }

    /// Return the subset of `fields` that was not populated
    #[must_use]
    pub fn missing_of(&self, fields: &[&'static str]) -> Vec<&'static str> {
        fields
            .iter()
            .filter(|f| !self.populated.contains(*f))
            .copied()
            .collect()
    }

    /// Number of populated fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.populated.len()
    }

    /// Whether nothing was populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.populated.is_empty()
    }
}

/// Construction statistics for one panel dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelStats {
    /// Records in the (t0, t1) subset
    pub total_records: usize,
    /// Individuals observed in both waves
    pub balanced_individuals: usize,
    /// Households with at least one balanced individual
    pub balanced_households: usize,
    /// Individual ids with other than exactly one record per wave;
    /// reported, never silently deduplicated
    pub structure_violations: Vec<String>,
}

/// One (country, t0, t1) panel dataset
#[derive(Debug, Clone)]
pub struct PanelDataset {
    /// ISO-3 country code
    pub country: String,
    /// Initial wave year
    pub t0: i32,
    /// Final wave year
    pub t1: i32,
    /// Tagged records for both waves
    pub records: Vec<PanelRecord>,
    /// Canonical-field coverage inherited from the mapper
    pub coverage: FieldCoverage,
    /// Construction statistics
    pub stats: PanelStats,
}

impl PanelDataset {
    /// Deterministic file stem for this dataset, `panel_<iso>_<t0>_<t1>`
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!(
            "panel_{}_{}_{}",
            self.country.to_lowercase(),
            self.t0,
            self.t1
        )
    }

    /// Iterate over records of one wave
    pub fn wave_records(&self, time: bool) -> impl Iterator<Item = &PanelRecord> {
        self.records.iter().filter(move |r| r.time == time)
    }

    /// Iterate over balanced records only
    pub fn balanced_records(&self) -> impl Iterator<Item = &PanelRecord> {
        self.records.iter().filter(|r| r.balanced_panel)
    }
}
