//! CPI and PPP reference tables
//!
//! Monthly price-index series keyed by (country, year, month), one table
//! per source (IMF or SEDLAC), reduced to two derived values per country:
//! the wave-average CPI over a country-year's collection window and the
//! fixed 2021 reference average. Both are merged onto canonical records by
//! (country, year) and (country) respectively. PPP conversion factors and
//! currency-unit adjustments merge by country.

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::Result;
use crate::models::{FieldCoverage, PersonYear};
use crate::schema::canonical;
use crate::utils::arrow::{extract_f64, extract_i32, extract_string};

/// The fixed reference year for price and PPP normalization
pub const REFERENCE_YEAR: i32 = 2021;

/// Share of unmatched rows above which a merge gets a loud warning
pub const MERGE_MATERIALITY_PCT: f64 = 5.0;

/// Which price series a table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpiSource {
    /// IMF international financial statistics series
    Imf,
    /// SEDLAC regional harmonization series
    Sedlac,
}

/// One monthly price-index observation
#[derive(Debug, Clone)]
pub struct CpiObservation {
    /// ISO-3 country code
    pub country: String,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Index value
    pub value: f64,
}

/// At most the 12 months of one collection window
type MonthSeries = SmallVec<[(u32, f64); 12]>;

/// A monthly CPI series for several countries
#[derive(Debug, Clone)]
pub struct CpiTable {
    source: CpiSource,
    monthly: FxHashMap<(String, i32), MonthSeries>,
}

impl CpiTable {
    /// Build a table from observations
    #[must_use]
    pub fn from_observations(source: CpiSource, observations: Vec<CpiObservation>) -> Self {
        let mut monthly: FxHashMap<(String, i32), MonthSeries> = FxHashMap::default();
        for obs in observations {
            monthly
                .entry((obs.country, obs.year))
                .or_default()
                .push((obs.month, obs.value));
        }
        Self { source, monthly }
    }

    /// Build a table from record batches with columns
    /// `country`, `year`, `month`, `cpi`
    pub fn from_record_batches(source: CpiSource, batches: &[RecordBatch]) -> Result<Self> {
        let mut observations = Vec::new();
        for batch in batches {
            for row in 0..batch.num_rows() {
                let country = extract_string(batch, row, "country", true)?;
                let year = extract_i32(batch, row, "year", true)?;
                let month = extract_i32(batch, row, "month", true)?;
                let value = extract_f64(batch, row, "cpi", true)?;
                if let (Some(country), Some(year), Some(month), Some(value)) =
                    (country, year, month, value)
                {
                    observations.push(CpiObservation {
                        country,
                        year,
                        month: month as u32,
                        value,
                    });
                }
            }
        }
        Ok(Self::from_observations(source, observations))
    }

    /// The source of this series
    #[must_use]
    pub fn source(&self) -> CpiSource {
        self.source
    }

    /// Mean index over the months actually observed in the country-year
    /// collection window
    ///
    /// Fewer than 12 months is surfaced as a warning, never treated as
    /// zero.
    #[must_use]
    pub fn wave_average(&self, country: &str, year: i32) -> Option<f64> {
        let months = self.monthly.get(&(country.to_string(), year))?;
        if months.is_empty() {
            return None;
        }
        if months.len() < 12 {
            log::warn!(
                "{:?} CPI for {country} {year}: only {} of 12 months observed",
                self.source,
                months.len()
            );
        }
        Some(months.iter().map(|(_, v)| v).sum::<f64>() / months.len() as f64)
    }

    /// Mean index over the 12 months of the reference year
    #[must_use]
    pub fn reference_2021(&self, country: &str) -> Option<f64> {
        self.wave_average(country, REFERENCE_YEAR)
    }
}

/// PPP conversion factor and currency-unit adjustment for one country
#[derive(Debug, Clone)]
pub struct PppEntry {
    /// ISO-3 country code
    pub country: String,
    /// PPP conversion factor at the reference year
    pub ppp_2021: f64,
    /// Multiplier correcting for currency redenominations
    pub currency_adjustment: f64,
}

/// Country-keyed PPP reference table
#[derive(Debug, Clone, Default)]
pub struct PppTable {
    entries: FxHashMap<String, PppEntry>,
}

impl PppTable {
    /// Build a table from entries
    #[must_use]
    pub fn from_entries(entries: Vec<PppEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.country.clone(), e))
                .collect(),
        }
    }

    /// Build a table from record batches with columns
    /// `country`, `ppp_2021`, `currency_adjustment`
    pub fn from_record_batches(batches: &[RecordBatch]) -> Result<Self> {
        let mut entries = Vec::new();
        for batch in batches {
            for row in 0..batch.num_rows() {
                let country = extract_string(batch, row, "country", true)?;
                let ppp = extract_f64(batch, row, "ppp_2021", true)?;
                let adjustment = extract_f64(batch, row, "currency_adjustment", true)?;
                if let (Some(country), Some(ppp_2021), Some(currency_adjustment)) =
                    (country, ppp, adjustment)
                {
                    entries.push(PppEntry {
                        country,
                        ppp_2021,
                        currency_adjustment,
                    });
                }
            }
        }
        Ok(Self::from_entries(entries))
    }

    /// Look up a country's entry
    #[must_use]
    pub fn get(&self, country: &str) -> Option<&PppEntry> {
        self.entries.get(country)
    }
}

/// Outcome of one reference merge over a canonical table
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Rows that received the reference values
    pub matched: usize,
    /// Rows with no reference match; they keep the field missing
    pub unmatched: usize,
}

impl MergeReport {
    /// Share of rows left unmatched
    #[must_use]
    pub fn unmatched_pct(&self) -> f64 {
        let total = self.matched + self.unmatched;
        if total == 0 {
            0.0
        } else {
            100.0 * self.unmatched as f64 / total as f64
        }
    }

    fn warn_if_material(&self, what: &str) {
        let pct = self.unmatched_pct();
        if self.unmatched > 0 && pct > MERGE_MATERIALITY_PCT {
            log::warn!(
                "{what}: {} of {} rows ({pct:.1}%) found no reference match — above the {MERGE_MATERIALITY_PCT}% materiality threshold",
                self.unmatched,
                self.matched + self.unmatched
            );
        } else if self.unmatched > 0 {
            log::info!("{what}: {} rows kept a missing reference value", self.unmatched);
        }
    }
}

/// Merge a CPI table onto canonical records
///
/// Populates the wave-average field by (country, year) and the 2021
/// reference field by country, into the field pair of the table's source.
/// Unmatched rows keep the fields missing.
pub fn merge_cpi(
    records: &mut [PersonYear],
    table: &CpiTable,
    coverage: &mut FieldCoverage,
) -> MergeReport {
    let mut report = MergeReport::default();
    let mut reference_cache: FxHashMap<String, Option<f64>> = FxHashMap::default();

    for record in records.iter_mut() {
        let wave = table.wave_average(&record.country, record.year);
        let reference = *reference_cache
            .entry(record.country.clone())
            .or_insert_with(|| table.reference_2021(&record.country));

        match (wave, reference) {
            (Some(wave), Some(reference)) => {
                match table.source {
                    CpiSource::Imf => {
                        record.cpi_wave_imf = Some(wave);
                        record.cpi_ref_imf = Some(reference);
                    }
                    CpiSource::Sedlac => {
                        record.cpi_wave_alt = Some(wave);
                        record.cpi_ref_alt = Some(reference);
                    }
                }
                report.matched += 1;
            }
            _ => report.unmatched += 1,
        }
    }

    if report.matched > 0 {
        match table.source {
            CpiSource::Imf => {
                coverage.mark(canonical::CPI_WAVE_IMF);
                coverage.mark(canonical::CPI_REF_IMF);
            }
            CpiSource::Sedlac => {
                coverage.mark(canonical::CPI_WAVE_ALT);
                coverage.mark(canonical::CPI_REF_ALT);
            }
        }
    }

    report.warn_if_material(match table.source {
        CpiSource::Imf => "IMF CPI merge",
        CpiSource::Sedlac => "SEDLAC CPI merge",
    });
    report
}

/// Merge a PPP table onto canonical records by country
pub fn merge_ppp(
    records: &mut [PersonYear],
    table: &PppTable,
    coverage: &mut FieldCoverage,
) -> MergeReport {
    let mut report = MergeReport::default();

    for record in records.iter_mut() {
        if let Some(entry) = table.get(&record.country) {
            record.ppp_2021 = Some(entry.ppp_2021);
            record.currency_adjustment = Some(entry.currency_adjustment);
            report.matched += 1;
        } else {
            report.unmatched += 1;
        }
    }

    if report.matched > 0 {
        coverage.mark(canonical::PPP_2021);
        coverage.mark(canonical::CURRENCY_ADJUSTMENT);
    }

    report.warn_if_material("PPP merge");
    report
}
