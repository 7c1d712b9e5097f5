//! Per-country survey configuration
//!
//! Every country-specific delta in the pipeline lives here as data: the raw
//! source column names, the categorical code sets, the sector-scheme and
//! education-coding variants, the panel membership rule and the CPI-source
//! override. The mapper, panel constructor and monetary converter are
//! generic over this table; none of them branches on a country code.
//!
//! Countries in scope:
//! - ARG (EPH continua): precomputed wave indicator, SEDLAC CPI primary
//! - BRA (PNAD Contínua): membership re-derived from the data
//! - MEX (ENOE): precomputed wave indicator, coherent households, heads only
//! - PER (ENAHO): pair-scoped panel flag, heads aged 25+
//! - PRY (EPHC): membership re-derived from the data

mod arg;
mod bra;
mod mex;
mod per;
mod pry;

use crate::error::{HarmonizeError, Result};

/// How balanced-panel membership is determined for a country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipRule {
    /// Presence computed fresh from the data: an individual is present in a
    /// year iff at least one record for that (individual, year) exists
    Rederived,
    /// Presence read from an upstream per-(individual, year) indicator;
    /// required where upstream encodes wave-correspondence logic such as
    /// non-adjacent questionnaire visits covering the same reference period
    Precomputed {
        /// Drop households that answered incoherently across visits
        household_coherence: bool,
        /// Restrict the panel population to household heads
        heads_only: bool,
    },
    /// Presence read from an upstream per-person flag scoped to the specific
    /// pair of years, after restricting to household heads of coherent
    /// households at or above the minimum age
    PairFlag {
        /// Minimum age at the initial wave
        min_age: i32,
    },
}

/// Which broad sector the 1-digit industry code 5 (utilities) falls under
///
/// Both variants exist in the source surveys without a stated rationale;
/// they are kept as explicit named policies rather than silently unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorScheme {
    /// Utilities classified with mining, manufacturing and construction
    UtilitiesInIndustry,
    /// Utilities classified with the service sectors
    UtilitiesInServices,
}

/// Finest occupation-code detail the survey publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupationDetail {
    /// 2-digit codes only
    TwoDigit,
    /// Full 4-digit codes
    FourDigit,
}

/// How the education source column is coded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationCoding {
    /// Already the 7-level ordinal
    SevenLevel,
    /// Completed years of schooling, recoded to the 7-level ordinal
    Years,
}

/// Raw source column per canonical concept
///
/// `None` means the survey does not provide the concept; the mapper then
/// skips the derived field and records it as uncovered.
#[derive(Debug, Clone, Copy)]
pub struct SourceColumns {
    /// Household identifier
    pub household_id: &'static str,
    /// Individual identifier, stable across years
    pub individual_id: &'static str,
    /// Survey year
    pub year: &'static str,
    /// Individual expansion weight
    pub weight: &'static str,
    /// Relationship-to-head code (1 head, 2 spouse, other otherwise)
    pub relationship: &'static str,
    /// Labor-force status code
    pub employment_status: &'static str,
    /// Is-male flag
    pub male: Option<&'static str>,
    /// Age in years
    pub age: Option<&'static str>,
    /// Education source column
    pub education: Option<&'static str>,
    /// Urban residence flag
    pub urban: Option<&'static str>,
    /// Relationship-to-job code
    pub job_relationship: Option<&'static str>,
    /// Occupation code at the survey's detail level
    pub occupation: Option<&'static str>,
    /// 1-digit industry code
    pub industry: Option<&'static str>,
    /// Written contract flag
    pub contract: Option<&'static str>,
    /// Pension contribution flag
    pub pension: Option<&'static str>,
    /// Health contribution flag
    pub health: Option<&'static str>,
    /// Per-capita household income, local currency
    pub welfare_nominal: Option<&'static str>,
    /// Per-capita household income, PPP USD
    pub welfare_ppp: Option<&'static str>,
    /// Hourly wage in the main job
    pub hourly_wage: Option<&'static str>,
    /// Usual weekly hours
    pub weekly_hours: Option<&'static str>,
    /// Monthly independent earnings
    pub monthly_earnings: Option<&'static str>,
    /// Rule B per-year wave-presence indicator
    pub wave_present: Option<&'static str>,
    /// Rule C pair-scoped panel flag
    pub panel_flag: Option<&'static str>,
    /// Household coherence flag
    pub household_coherent: Option<&'static str>,
}

/// Source codes mapped onto the three-way labor-force status
#[derive(Debug, Clone, Copy)]
pub struct StatusCodes {
    /// Codes meaning employed
    pub employed: &'static [i32],
    /// Codes meaning unemployed
    pub unemployed: &'static [i32],
    /// Codes meaning inactive
    pub inactive: &'static [i32],
}

/// Source codes mapped onto the relationship-to-job categories
#[derive(Debug, Clone, Copy)]
pub struct JobRelationCodes {
    /// Codes meaning employer
    pub employer: &'static [i32],
    /// Codes meaning own-account worker
    pub self_employed: &'static [i32],
    /// Codes meaning wage/salary employee
    pub salaried: &'static [i32],
    /// Codes meaning unpaid family worker
    pub unpaid: &'static [i32],
}

/// The full per-country configuration record
#[derive(Debug, Clone, Copy)]
pub struct CountryConfig {
    /// ISO-3 country code
    pub code: &'static str,
    /// Country name
    pub name: &'static str,
    /// Source survey acronym
    pub survey: &'static str,
    /// Raw column names
    pub columns: SourceColumns,
    /// Labor-force status code sets
    pub status_codes: StatusCodes,
    /// Relationship-to-job code sets
    pub job_codes: JobRelationCodes,
    /// Education source coding
    pub education: EducationCoding,
    /// Sector-scheme variant
    pub sector_scheme: SectorScheme,
    /// Occupation detail available
    pub occupation_detail: OccupationDetail,
    /// Panel membership rule
    pub membership: MembershipRule,
    /// Primary wage/earnings measures use the SEDLAC CPI; the IMF-based
    /// results are retained as the alternative fields
    pub alt_cpi_primary: bool,
}

/// All configured countries
#[must_use]
pub fn all_countries() -> &'static [&'static CountryConfig] {
    &[&arg::CONFIG, &bra::CONFIG, &mex::CONFIG, &per::CONFIG, &pry::CONFIG]
}

/// Look up a country configuration by ISO-3 code
///
/// An unknown code is a configuration error; the caller aborts before any
/// processing.
pub fn country_config(code: &str) -> Result<&'static CountryConfig> {
    let upper = code.to_uppercase();
    all_countries()
        .iter()
        .find(|c| c.code == upper)
        .copied()
        .ok_or_else(|| {
            HarmonizeError::config(format!(
                "unknown country selector '{code}' (configured: {})",
                all_countries()
                    .iter()
                    .map(|c| c.code)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
}
