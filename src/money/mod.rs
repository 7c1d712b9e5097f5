//! Monetary Converter
//!
//! Computes annualized, CPI- and PPP-adjusted wage and earnings measures on
//! a panel dataset in place. Each income concept is computed twice, once
//! per CPI source; a concept whose inputs are not covered by the dataset is
//! skipped whole with a diagnostic listing the absent inputs. Countries
//! with the alternative-CPI override get their primary and alternative
//! measures swapped after both are computed; the formula never changes.

use crate::country::CountryConfig;
use crate::error::{HarmonizeError, Result};
use crate::models::{EmploymentType, PanelDataset, PersonYear};
use crate::schema::canonical;

/// Annualization factor for weekly wage income
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Annualization factor for monthly earnings
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// The two income concepts the converter produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeConcept {
    /// Hourly-wage based, defined for salaried workers
    Wage,
    /// Monthly-earnings based, defined for the self-employed and employers
    Earnings,
}

impl IncomeConcept {
    fn name(self) -> &'static str {
        match self {
            Self::Wage => "wage",
            Self::Earnings => "earnings",
        }
    }
}

/// One skipped (concept, CPI source) combination and the inputs it lacked
#[derive(Debug, Clone)]
pub struct SkippedConcept {
    /// Which income concept
    pub concept: IncomeConcept,
    /// "imf" or "alt"
    pub cpi_source: &'static str,
    /// The canonical inputs absent from the dataset
    pub missing_inputs: Vec<&'static str>,
}

/// Diagnostics for one dataset conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Measures actually produced (canonical field names)
    pub computed: Vec<&'static str>,
    /// (concept, source) combinations skipped with their missing inputs
    pub skipped: Vec<SkippedConcept>,
    /// Rows that received a wage measure under the primary source
    pub wage_rows: usize,
    /// Rows that received an earnings measure under the primary source
    pub earnings_rows: usize,
}

/// Inputs shared by both concepts, per CPI source
fn common_inputs(cpi_wave: &'static str, cpi_ref: &'static str) -> [&'static str; 5] {
    [
        canonical::EMPLOYMENT_TYPE,
        cpi_wave,
        cpi_ref,
        canonical::PPP_2021,
        canonical::CURRENCY_ADJUSTMENT,
    ]
}

/// Price/PPP adjustment factor for one record under one CPI source
fn adjustment_factor(person: &PersonYear, imf: bool) -> Option<f64> {
    let (cpi_wave, cpi_ref) = if imf {
        (person.cpi_wave_imf?, person.cpi_ref_imf?)
    } else {
        (person.cpi_wave_alt?, person.cpi_ref_alt?)
    };
    let ppp = person.ppp_2021?;
    let adjustment = person.currency_adjustment?;
    if cpi_wave == 0.0 || ppp == 0.0 || adjustment == 0.0 {
        return None;
    }
    Some((cpi_ref / cpi_wave) / (ppp * adjustment))
}

/// Annualized PPP wage for one record, if the concept applies
fn wage_value(person: &PersonYear, imf: bool) -> Option<f64> {
    if !person.employment_type?.is_salaried() {
        return None;
    }
    let hourly = person.hourly_wage?;
    let hours = person.weekly_hours?;
    Some(hourly * hours * WEEKS_PER_YEAR * adjustment_factor(person, imf)?)
}

/// Annualized PPP earnings for one record, if the concept applies
fn earnings_value(person: &PersonYear, imf: bool) -> Option<f64> {
    if !person.employment_type?.is_independent() {
        return None;
    }
    let monthly = person.monthly_earnings?;
    Some(monthly * MONTHS_PER_YEAR * adjustment_factor(person, imf)?)
}

/// Convert one panel dataset in place
///
/// Missing inputs are a recoverable, per-dataset condition: the affected
/// (concept, source) combination is skipped for every row and reported.
pub fn convert(dataset: &mut PanelDataset, cfg: &CountryConfig) -> Result<ConversionReport> {
    let mut report = ConversionReport::default();

    let sources: [(&'static str, &'static str, &'static str); 2] = [
        ("imf", canonical::CPI_WAVE_IMF, canonical::CPI_REF_IMF),
        ("alt", canonical::CPI_WAVE_ALT, canonical::CPI_REF_ALT),
    ];

    // Availability per (concept, source); both sources share the concept's
    // own inputs and differ only in the CPI pair.
    let mut wage_ok = [false; 2];
    let mut earnings_ok = [false; 2];
    for (i, &(label, cpi_wave, cpi_ref)) in sources.iter().enumerate() {
        let mut wage_missing = dataset.coverage.missing_of(&common_inputs(cpi_wave, cpi_ref));
        wage_missing.extend(
            dataset
                .coverage
                .missing_of(&[canonical::HOURLY_WAGE, canonical::WEEKLY_HOURS]),
        );
        if wage_missing.is_empty() {
            wage_ok[i] = true;
        } else {
            log::warn!(
                "{} {}-{}: skipping {label} wage measure, missing inputs: {wage_missing:?}",
                dataset.country,
                dataset.t0,
                dataset.t1
            );
            report.skipped.push(SkippedConcept {
                concept: IncomeConcept::Wage,
                cpi_source: label,
                missing_inputs: wage_missing,
            });
        }

        let mut earnings_missing = dataset.coverage.missing_of(&common_inputs(cpi_wave, cpi_ref));
        earnings_missing.extend(dataset.coverage.missing_of(&[canonical::MONTHLY_EARNINGS]));
        if earnings_missing.is_empty() {
            earnings_ok[i] = true;
        } else {
            log::warn!(
                "{} {}-{}: skipping {label} earnings measure, missing inputs: {earnings_missing:?}",
                dataset.country,
                dataset.t0,
                dataset.t1
            );
            report.skipped.push(SkippedConcept {
                concept: IncomeConcept::Earnings,
                cpi_source: label,
                missing_inputs: earnings_missing,
            });
        }
    }

    for record in &mut dataset.records {
        let person = &mut record.person;

        let wage_imf = wage_ok[0].then(|| wage_value(person, true)).flatten();
        let wage_alt = wage_ok[1].then(|| wage_value(person, false)).flatten();
        let earnings_imf = earnings_ok[0].then(|| earnings_value(person, true)).flatten();
        let earnings_alt = earnings_ok[1].then(|| earnings_value(person, false)).flatten();

        // The override redefines which source is primary; it never touches
        // the formula.
        let (wage_primary, wage_secondary, earnings_primary, earnings_secondary) =
            if cfg.alt_cpi_primary {
                (wage_alt, wage_imf, earnings_alt, earnings_imf)
            } else {
                (wage_imf, wage_alt, earnings_imf, earnings_alt)
            };

        person.wage_ppp = wage_primary;
        person.wage_ppp_alt = wage_secondary;
        person.earnings_ppp = earnings_primary;
        person.earnings_ppp_alt = earnings_secondary;

        if person.wage_ppp.is_some() {
            report.wage_rows += 1;
        }
        if person.earnings_ppp.is_some() {
            report.earnings_rows += 1;
        }
    }

    let primary_wage_ok = if cfg.alt_cpi_primary { wage_ok[1] } else { wage_ok[0] };
    let primary_earnings_ok = if cfg.alt_cpi_primary { earnings_ok[1] } else { earnings_ok[0] };
    if primary_wage_ok {
        report.computed.push(canonical::WAGE_PPP);
        dataset.coverage.mark(canonical::WAGE_PPP);
    }
    if primary_earnings_ok {
        report.computed.push(canonical::EARNINGS_PPP);
        dataset.coverage.mark(canonical::EARNINGS_PPP);
    }
    if (cfg.alt_cpi_primary && wage_ok[0]) || (!cfg.alt_cpi_primary && wage_ok[1]) {
        report.computed.push(canonical::WAGE_PPP_ALT);
        dataset.coverage.mark(canonical::WAGE_PPP_ALT);
    }
    if (cfg.alt_cpi_primary && earnings_ok[0]) || (!cfg.alt_cpi_primary && earnings_ok[1]) {
        report.computed.push(canonical::EARNINGS_PPP_ALT);
        dataset.coverage.mark(canonical::EARNINGS_PPP_ALT);
    }

    check_postconditions(dataset)?;

    log::info!(
        "{} {}-{}: monetary conversion produced {:?} ({} wage rows, {} earnings rows, {} skips)",
        dataset.country,
        dataset.t0,
        dataset.t1,
        report.computed,
        report.wage_rows,
        report.earnings_rows,
        report.skipped.len()
    );

    Ok(report)
}

/// Post-condition: every non-missing wage measure sits on a salaried row
/// and every non-missing earnings measure on a self-employed/employer row
pub fn check_postconditions(dataset: &PanelDataset) -> Result<()> {
    for record in &dataset.records {
        let person = &record.person;
        let wage_present = person.wage_ppp.is_some() || person.wage_ppp_alt.is_some();
        if wage_present && person.employment_type != Some(EmploymentType::Salaried) {
            return Err(HarmonizeError::consistency(format!(
                "individual {}: wage measure present with employment type {:?}",
                person.individual_id, person.employment_type
            )));
        }
        let earnings_present =
            person.earnings_ppp.is_some() || person.earnings_ppp_alt.is_some();
        if earnings_present
            && !person
                .employment_type
                .is_some_and(EmploymentType::is_independent)
        {
            return Err(HarmonizeError::consistency(format!(
                "individual {}: earnings measure present with employment type {:?}",
                person.individual_id, person.employment_type
            )));
        }
    }
    Ok(())
}
