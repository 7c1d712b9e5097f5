//! Unified schema definitions for the harmonized table
//!
//! This module defines the semantic field types, the field-definition
//! structure that ties a raw source column to its canonical field, and the
//! canonical field names downstream stages use to talk about coverage.

use arrow_schema::{DataType, Field, Schema};
use std::fmt;

/// Canonical field names of the harmonized schema
///
/// These are the identifiers used in `FieldCoverage`, diagnostics and the
/// persisted table; one constant per canonical concept keeps stage reports
/// attributable to a specific derived field.
pub mod canonical {
    /// Household identifier
    pub const HOUSEHOLD_ID: &str = "household_id";
    /// Individual identifier
    pub const INDIVIDUAL_ID: &str = "individual_id";
    /// Survey year
    pub const YEAR: &str = "year";
    /// Individual expansion weight
    pub const WEIGHT: &str = "weight";
    /// Relationship to the household head
    pub const RELATIONSHIP: &str = "relationship";
    /// Labor-force status
    pub const EMPLOYMENT_STATUS: &str = "employment_status";
    /// Relationship to the job
    pub const EMPLOYMENT_TYPE: &str = "employment_type";
    /// Occupation code at the survey's finest detail
    pub const OCCUPATION: &str = "occupation";
    /// 1-digit industry code
    pub const INDUSTRY: &str = "industry_1d";
    /// Welfare aggregate, local currency
    pub const WELFARE_NOMINAL: &str = "welfare_nominal";
    /// Welfare aggregate, PPP USD
    pub const WELFARE_PPP: &str = "welfare_ppp";
    /// Written contract indicator
    pub const CONTRACT: &str = "contract";
    /// Pension contribution indicator
    pub const PENSION: &str = "pension_contribution";
    /// Health contribution indicator
    pub const HEALTH: &str = "health_contribution";
    /// Age in years
    pub const AGE: &str = "age";
    /// Female indicator
    pub const FEMALE: &str = "female";
    /// 7-level education recode
    pub const EDUCATION: &str = "education_7cat";
    /// Urban residence indicator
    pub const URBAN: &str = "urban";
    /// Hourly wage, local currency
    pub const HOURLY_WAGE: &str = "hourly_wage";
    /// Usual weekly hours
    pub const WEEKLY_HOURS: &str = "weekly_hours";
    /// Monthly independent earnings, local currency
    pub const MONTHLY_EARNINGS: &str = "monthly_earnings";
    /// IMF CPI at the wave
    pub const CPI_WAVE_IMF: &str = "cpi_wave_imf";
    /// IMF CPI 2021 reference
    pub const CPI_REF_IMF: &str = "cpi_ref_imf";
    /// SEDLAC CPI at the wave
    pub const CPI_WAVE_ALT: &str = "cpi_wave_alt";
    /// SEDLAC CPI 2021 reference
    pub const CPI_REF_ALT: &str = "cpi_ref_alt";
    /// PPP conversion factor, 2021
    pub const PPP_2021: &str = "ppp_2021";
    /// Currency redenomination adjustment
    pub const CURRENCY_ADJUSTMENT: &str = "currency_adjustment";
    /// Annualized PPP wage measure, primary CPI source
    pub const WAGE_PPP: &str = "wage_ppp";
    /// Annualized PPP wage measure, alternative CPI source
    pub const WAGE_PPP_ALT: &str = "wage_ppp_alt";
    /// Annualized PPP earnings measure, primary CPI source
    pub const EARNINGS_PPP: &str = "earnings_ppp";
    /// Annualized PPP earnings measure, alternative CPI source
    pub const EARNINGS_PPP_ALT: &str = "earnings_ppp_alt";
    /// Rule B per-year wave-presence indicator
    pub const WAVE_PRESENT: &str = "wave_present";
    /// Rule C pair-scoped panel flag
    pub const PANEL_FLAG: &str = "panel_flag";
    /// Household coherence indicator
    pub const HOUSEHOLD_COHERENT: &str = "household_coherent";
}

/// Semantic type of a source field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Text value
    String,
    /// Integer value
    Integer,
    /// Decimal value
    Decimal,
    /// Boolean or 0/1 indicator
    Boolean,
    /// Coded categorical value
    Category,
}

impl FieldType {
    /// The most appropriate Arrow `DataType` for this field type
    #[must_use]
    pub fn to_arrow_type(self) -> DataType {
        match self {
            FieldType::String => DataType::Utf8,
            FieldType::Integer | FieldType::Category => DataType::Int32,
            FieldType::Decimal => DataType::Float64,
            FieldType::Boolean => DataType::Boolean,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "String"),
            FieldType::Integer => write!(f, "Integer"),
            FieldType::Decimal => write!(f, "Decimal"),
            FieldType::Boolean => write!(f, "Boolean"),
            FieldType::Category => write!(f, "Category"),
        }
    }
}

/// Ties one raw source column to its canonical field
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Column name in the country's raw table
    pub source: &'static str,
    /// Canonical field name (see [`canonical`])
    pub canonical: &'static str,
    /// Semantic type of the source column
    pub field_type: FieldType,
    /// Whether the whole country run must abort when the column is absent
    pub required: bool,
}

impl FieldDefinition {
    /// Create a new field definition
    #[must_use]
    pub fn new(
        source: &'static str,
        canonical: &'static str,
        field_type: FieldType,
        required: bool,
    ) -> Self {
        Self {
            source,
            canonical,
            field_type,
            required,
        }
    }
}

/// Arrow schema of the canonical person-year table
///
/// Used for documentation and for validating externally produced canonical
/// tables; the in-process representation is the typed `PersonYear`.
#[must_use]
pub fn canonical_schema() -> Schema {
    Schema::new(vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("household_id", DataType::Utf8, false),
        Field::new("individual_id", DataType::Utf8, false),
        Field::new("year", DataType::Int32, false),
        Field::new("wave", DataType::Int32, false),
        Field::new("weight", DataType::Float64, false),
        Field::new("household_weight", DataType::Float64, true),
        Field::new("welfare_ppp", DataType::Float64, true),
        Field::new("welfare_nominal", DataType::Float64, true),
        Field::new("employed", DataType::Boolean, true),
        Field::new("employment_status", DataType::Utf8, true),
        Field::new("employment_type", DataType::Utf8, true),
        Field::new("occupation_4d", DataType::Int32, true),
        Field::new("occupation_3d", DataType::Int32, true),
        Field::new("occupation_2d", DataType::Int32, true),
        Field::new("occupation_1d", DataType::Int32, true),
        Field::new("skill", DataType::Utf8, true),
        Field::new("industry_1d", DataType::Int32, true),
        Field::new("sector", DataType::Utf8, true),
        Field::new("contract", DataType::Boolean, true),
        Field::new("pension_contribution", DataType::Boolean, true),
        Field::new("health_contribution", DataType::Boolean, true),
        Field::new("age", DataType::Int32, true),
        Field::new("female", DataType::Boolean, true),
        Field::new("education_7cat", DataType::Int32, true),
        Field::new("urban", DataType::Boolean, true),
        Field::new("relationship", DataType::Utf8, true),
        Field::new("hourly_wage", DataType::Float64, true),
        Field::new("weekly_hours", DataType::Float64, true),
        Field::new("monthly_earnings", DataType::Float64, true),
        Field::new("cpi_wave_imf", DataType::Float64, true),
        Field::new("cpi_ref_imf", DataType::Float64, true),
        Field::new("cpi_wave_alt", DataType::Float64, true),
        Field::new("cpi_ref_alt", DataType::Float64, true),
        Field::new("ppp_2021", DataType::Float64, true),
        Field::new("currency_adjustment", DataType::Float64, true),
        Field::new("wage_ppp", DataType::Float64, true),
        Field::new("wage_ppp_alt", DataType::Float64, true),
        Field::new("earnings_ppp", DataType::Float64, true),
        Field::new("earnings_ppp_alt", DataType::Float64, true),
        Field::new("wave_present", DataType::Boolean, true),
        Field::new("panel_flag", DataType::Boolean, true),
        Field::new("household_coherent", DataType::Boolean, true),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_arrow_mapping() {
        assert_eq!(FieldType::String.to_arrow_type(), DataType::Utf8);
        assert_eq!(FieldType::Category.to_arrow_type(), DataType::Int32);
        assert_eq!(FieldType::Decimal.to_arrow_type(), DataType::Float64);
    }

    #[test]
    fn test_canonical_schema_has_identifiers() {
        let schema = canonical_schema();
        for name in ["country", "household_id", "individual_id", "year", "weight"] {
            assert!(schema.index_of(name).is_ok(), "missing field {name}");
        }
    }
}
