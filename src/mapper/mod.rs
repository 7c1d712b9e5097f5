//! Schema Mapper
//!
//! Translates one country's raw survey batches into canonical person-year
//! records. All per-country variation comes in through the `CountryConfig`
//! table; the mapping logic itself is country-agnostic. The only cross-row
//! computations are the wave numbering (table-wide minimum year) and the
//! household-head weight broadcast.

pub mod derive;

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::country::CountryConfig;
use crate::error::{HarmonizeError, Result};
use crate::models::{EmploymentStatus, FieldCoverage, PersonYear};
use crate::schema::{FieldDefinition, FieldType, canonical};
use crate::utils::arrow::{extract_bool, extract_f64, extract_i32, extract_string};

/// Why a canonical field was not produced for a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The survey does not carry the concept at all
    NotInSurvey,
    /// The concept is configured but the column is absent from this delivery
    ColumnAbsent,
}

/// One canonical field the mapper skipped, and why
#[derive(Debug, Clone)]
pub struct SkippedField {
    /// Canonical field name
    pub canonical: &'static str,
    /// Configured source column, when there is one
    pub source: Option<&'static str>,
    /// Why the field was skipped
    pub reason: SkipReason,
}

/// Mapping diagnostics for one country run
#[derive(Debug, Clone, Default)]
pub struct MappingReport {
    /// ISO-3 country code
    pub country: String,
    /// Raw rows seen
    pub rows_in: usize,
    /// Canonical records produced
    pub records_out: usize,
    /// Fields skipped for the whole dataset
    pub skipped: Vec<SkippedField>,
    /// Share of records with a non-missing value, per key derived field
    pub coverage_pct: Vec<(&'static str, f64)>,
}

/// Canonical output of the mapper for one country
#[derive(Debug, Clone)]
pub struct MappedCountry {
    /// The configuration the mapping ran under
    pub config: &'static CountryConfig,
    /// Canonical person-year records
    pub records: Vec<PersonYear>,
    /// Which canonical fields were populated
    pub coverage: FieldCoverage,
    /// Diagnostics
    pub report: MappingReport,
}

/// Availability of one optional concept in the current delivery
struct OptionalColumn {
    source: Option<&'static str>,
    available: bool,
}

/// Map raw survey batches for one country into canonical records
pub fn map_batches(cfg: &'static CountryConfig, batches: &[RecordBatch]) -> Result<MappedCountry> {
    let cols = &cfg.columns;

    if batches.is_empty() {
        log::warn!("{}: no input batches, producing empty canonical table", cfg.code);
        return Ok(MappedCountry {
            config: cfg,
            records: Vec::new(),
            coverage: FieldCoverage::new(),
            report: MappingReport {
                country: cfg.code.to_string(),
                ..MappingReport::default()
            },
        });
    }

    // Identifier/weight/employment columns are a hard contract; fail fast
    // for the country before touching any row.
    let schema = batches[0].schema();
    let required = [
        FieldDefinition::new(cols.household_id, canonical::HOUSEHOLD_ID, FieldType::String, true),
        FieldDefinition::new(
            cols.individual_id,
            canonical::INDIVIDUAL_ID,
            FieldType::String,
            true,
        ),
        FieldDefinition::new(cols.year, canonical::YEAR, FieldType::Integer, true),
        FieldDefinition::new(cols.weight, canonical::WEIGHT, FieldType::Decimal, true),
        FieldDefinition::new(
            cols.relationship,
            canonical::RELATIONSHIP,
            FieldType::Category,
            true,
        ),
        FieldDefinition::new(
            cols.employment_status,
            canonical::EMPLOYMENT_STATUS,
            FieldType::Category,
            true,
        ),
    ];

    let mut coverage = FieldCoverage::new();
    for definition in &required {
        if schema.index_of(definition.source).is_err() {
            return Err(HarmonizeError::missing_column(cfg.code, definition.source));
        }
        coverage.mark(definition.canonical);
    }

    let optional = [
        (canonical::FEMALE, cols.male),
        (canonical::AGE, cols.age),
        (canonical::EDUCATION, cols.education),
        (canonical::URBAN, cols.urban),
        (canonical::EMPLOYMENT_TYPE, cols.job_relationship),
        (canonical::OCCUPATION, cols.occupation),
        (canonical::INDUSTRY, cols.industry),
        (canonical::CONTRACT, cols.contract),
        (canonical::PENSION, cols.pension),
        (canonical::HEALTH, cols.health),
        (canonical::WELFARE_NOMINAL, cols.welfare_nominal),
        (canonical::WELFARE_PPP, cols.welfare_ppp),
        (canonical::HOURLY_WAGE, cols.hourly_wage),
        (canonical::WEEKLY_HOURS, cols.weekly_hours),
        (canonical::MONTHLY_EARNINGS, cols.monthly_earnings),
        (canonical::WAVE_PRESENT, cols.wave_present),
        (canonical::PANEL_FLAG, cols.panel_flag),
        (canonical::HOUSEHOLD_COHERENT, cols.household_coherent),
    ];

    let mut skipped = Vec::new();
    let mut columns: FxHashMap<&'static str, OptionalColumn> = FxHashMap::default();
    for (canonical_name, source) in optional {
        let available = match source {
            Some(column) => {
                if schema.index_of(column).is_ok() {
                    coverage.mark(canonical_name);
                    true
                } else {
                    skipped.push(SkippedField {
                        canonical: canonical_name,
                        source: Some(column),
                        reason: SkipReason::ColumnAbsent,
                    });
                    false
                }
            }
            None => {
                skipped.push(SkippedField {
                    canonical: canonical_name,
                    source: None,
                    reason: SkipReason::NotInSurvey,
                });
                false
            }
        };
        columns.insert(canonical_name, OptionalColumn { source, available });
    }
    let use_col = |name: &'static str| -> Option<&'static str> {
        columns
            .get(name)
            .filter(|c| c.available)
            .and_then(|c| c.source)
    };

    for skip in &skipped {
        match skip.reason {
            SkipReason::ColumnAbsent => log::warn!(
                "{}: column '{}' absent, skipping canonical field '{}'",
                cfg.code,
                skip.source.unwrap_or("?"),
                skip.canonical
            ),
            SkipReason::NotInSurvey => log::debug!(
                "{}: survey does not carry '{}'",
                cfg.code,
                skip.canonical
            ),
        }
    }

    let mut rows_in = 0;
    let mut records = Vec::new();
    for batch in batches {
        rows_in += batch.num_rows();
        for row in 0..batch.num_rows() {
            records.push(map_row(cfg, batch, row, &use_col)?);
        }
    }

    finalize(&mut records);

    let report = MappingReport {
        country: cfg.code.to_string(),
        rows_in,
        records_out: records.len(),
        skipped,
        coverage_pct: coverage_percentages(&records),
    };

    log::info!(
        "{}: mapped {} raw rows into {} canonical records ({} fields skipped)",
        cfg.code,
        report.rows_in,
        report.records_out,
        report.skipped.len()
    );

    Ok(MappedCountry {
        config: cfg,
        records,
        coverage,
        report,
    })
}

/// Map one raw row into a canonical record
fn map_row(
    cfg: &CountryConfig,
    batch: &RecordBatch,
    row: usize,
    use_col: &dyn Fn(&'static str) -> Option<&'static str>,
) -> Result<PersonYear> {
    let cols = &cfg.columns;

    let required_value = |column: &str| {
        HarmonizeError::consistency(format!(
            "{}: null value in required column '{column}' at row {row}",
            cfg.code
        ))
    };
    let household_id = extract_string(batch, row, cols.household_id, true)?
        .ok_or_else(|| required_value(cols.household_id))?;
    let individual_id = extract_string(batch, row, cols.individual_id, true)?
        .ok_or_else(|| required_value(cols.individual_id))?;
    let year = extract_i32(batch, row, cols.year, true)?
        .ok_or_else(|| required_value(cols.year))?;
    let weight = extract_f64(batch, row, cols.weight, true)?
        .ok_or_else(|| required_value(cols.weight))?;

    let mut person = PersonYear::new(cfg.code, household_id, individual_id, year, weight);

    person.relationship = extract_i32(batch, row, cols.relationship, true)?
        .and_then(derive::relationship_from_code);

    person.employment_status = extract_i32(batch, row, cols.employment_status, true)?
        .and_then(|code| derive::employment_status(code, &cfg.status_codes));
    person.employed = person.employment_status.map(EmploymentStatus::is_employed);

    if let Some(col) = use_col(canonical::EMPLOYMENT_TYPE) {
        person.employment_type = extract_i32(batch, row, col, false)?
            .and_then(|code| derive::employment_type(code, &cfg.job_codes));
        // The job-relationship code is only meaningful for the employed
        if person.employed != Some(true) {
            person.employment_type = None;
        }
    }

    if let Some(col) = use_col(canonical::OCCUPATION) {
        if let Some(code) = extract_i32(batch, row, col, false)? {
            let (occ4, occ3, occ2) = derive::occupation_digits(code, cfg.occupation_detail);
            person.occupation_4d = occ4;
            person.occupation_3d = occ3;
            person.occupation_2d = occ2;
            person.occupation_1d = occ2.and_then(derive::occupation_major_group);
            person.skill = person.occupation_1d.and_then(derive::skill_level);
        }
    }

    if let Some(col) = use_col(canonical::INDUSTRY) {
        person.industry_1d = extract_i32(batch, row, col, false)?;
        person.sector = person
            .industry_1d
            .and_then(|code| derive::sector_from_industry(code, cfg.sector_scheme));
    }

    if let Some(col) = use_col(canonical::FEMALE) {
        person.female = extract_bool(batch, row, col, false)?.map(|male| !male);
    }
    if let Some(col) = use_col(canonical::AGE) {
        person.age = extract_i32(batch, row, col, false)?.and_then(derive::cap_age);
    }
    if let Some(col) = use_col(canonical::EDUCATION) {
        person.education_7cat = extract_i32(batch, row, col, false)?
            .and_then(|value| derive::education_7cat(value, cfg.education));
    }
    if let Some(col) = use_col(canonical::URBAN) {
        person.urban = extract_bool(batch, row, col, false)?;
    }

    if let Some(col) = use_col(canonical::CONTRACT) {
        person.contract = extract_bool(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::PENSION) {
        person.pension_contribution = extract_bool(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::HEALTH) {
        person.health_contribution = extract_bool(batch, row, col, false)?;
    }

    if let Some(col) = use_col(canonical::WELFARE_NOMINAL) {
        person.welfare_nominal = extract_f64(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::WELFARE_PPP) {
        person.welfare_ppp = extract_f64(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::HOURLY_WAGE) {
        person.hourly_wage = extract_f64(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::WEEKLY_HOURS) {
        person.weekly_hours = extract_f64(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::MONTHLY_EARNINGS) {
        person.monthly_earnings = extract_f64(batch, row, col, false)?;
    }

    if let Some(col) = use_col(canonical::WAVE_PRESENT) {
        person.wave_present = extract_bool(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::PANEL_FLAG) {
        person.panel_flag = extract_bool(batch, row, col, false)?;
    }
    if let Some(col) = use_col(canonical::HOUSEHOLD_COHERENT) {
        person.household_coherent = extract_bool(batch, row, col, false)?;
    }

    Ok(person)
}

/// The two cross-row passes: wave numbering and the household-head weight
/// broadcast over each (household, year) group
fn finalize(records: &mut [PersonYear]) {
    let Some(first_year) = records.iter().map(|r| r.year).min() else {
        return;
    };

    let mut head_weights: FxHashMap<(String, i32), f64> = FxHashMap::default();
    for record in records.iter() {
        if record.is_head() {
            let key = (record.household_id.clone(), record.year);
            let entry = head_weights.entry(key).or_insert(f64::MIN);
            // Group-wise max; a duplicate head row keeps the largest weight
            if record.weight > *entry {
                *entry = record.weight;
            }
        }
    }

    for record in records.iter_mut() {
        record.wave = record.year - first_year + 1;
        record.household_weight = head_weights
            .get(&(record.household_id.clone(), record.year))
            .copied();
    }
}

/// Non-missing share per key derived field
fn coverage_percentages(records: &[PersonYear]) -> Vec<(&'static str, f64)> {
    if records.is_empty() {
        return Vec::new();
    }
    let total = records.len() as f64;
    let pct = |count: usize| 100.0 * count as f64 / total;

    vec![
        (
            canonical::EMPLOYMENT_STATUS,
            pct(records.iter().filter(|r| r.employment_status.is_some()).count()),
        ),
        (
            canonical::EMPLOYMENT_TYPE,
            pct(records.iter().filter(|r| r.employment_type.is_some()).count()),
        ),
        (
            canonical::OCCUPATION,
            pct(records.iter().filter(|r| r.occupation_1d.is_some()).count()),
        ),
        (
            canonical::INDUSTRY,
            pct(records.iter().filter(|r| r.sector.is_some()).count()),
        ),
        (
            canonical::WELFARE_PPP,
            pct(records.iter().filter(|r| r.welfare_ppp.is_some()).count()),
        ),
        (
            canonical::HOURLY_WAGE,
            pct(records.iter().filter(|r| r.hourly_wage.is_some()).count()),
        ),
        (
            canonical::AGE,
            pct(records.iter().filter(|r| r.age.is_some()).count()),
        ),
    ]
}
