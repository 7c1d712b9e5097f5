//! Canonical person-year record
//!
//! One `PersonYear` is produced per individual per survey year by the schema
//! mapper. Categorical variables are real enums; anything the source survey
//! did not provide stays `None` rather than being encoded as a sentinel
//! number. The record is `serde`-derivable so whole datasets round-trip
//! through Arrow record batches for parquet persistence.

use serde::{Deserialize, Serialize};

/// Labor-force status of an individual in a survey wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    /// Out of the labor force
    Inactive,
    /// In the labor force, not employed
    Unemployed,
    /// Employed during the reference week
    Employed,
}

impl EmploymentStatus {
    /// Whether this status counts as working
    #[must_use]
    pub fn is_employed(self) -> bool {
        matches!(self, Self::Employed)
    }
}

/// Relationship of an employed individual to their job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Unpaid family worker
    Unpaid,
    /// Own-account worker without employees
    SelfEmployed,
    /// Wage or salary employee
    Salaried,
    /// Employer with at least one employee
    Employer,
}

impl EmploymentType {
    /// Whether the hourly-wage concept applies to this type
    #[must_use]
    pub fn is_salaried(self) -> bool {
        matches!(self, Self::Salaried)
    }

    /// Whether the self-employment earnings concept applies to this type
    #[must_use]
    pub fn is_independent(self) -> bool {
        matches!(self, Self::SelfEmployed | Self::Employer)
    }
}

/// Broad economic sector, derived from the 1-digit industry classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Agriculture, hunting, forestry and fishing
    Agriculture,
    /// Mining, manufacturing, construction (and utilities under one variant)
    Industry,
    /// Commerce, transport, finance, social and personal services
    Services,
}

/// Occupational skill group, derived from the 1-digit occupation group
///
/// Undefined for the armed forces (major group 0) and for unknown
/// occupations; that gap is a domain decision, not missing data to repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    /// Elementary occupations
    Low,
    /// Clerical, service, craft, operator occupations
    Medium,
    /// Managers, professionals, technicians
    High,
}

/// Relationship of a household member to the household head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    /// Household head
    Head,
    /// Spouse or partner of the head
    Spouse,
    /// Any other member
    Other,
}

/// Canonical record for one individual in one survey year
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonYear {
    /// ISO-3 country code
    pub country: String,
    /// Household identifier, unique within a country-year
    pub household_id: String,
    /// Individual identifier, stable across years for the same person
    pub individual_id: String,
    /// Survey year
    pub year: i32,
    /// Wave number: year minus the first year in the dataset, plus one
    pub wave: i32,
    /// Individual survey expansion weight
    pub weight: f64,
    /// Weight of the household head, constant within a household-year
    pub household_weight: Option<f64>,
    /// Annual per-capita household income, constant-PPP USD
    pub welfare_ppp: Option<f64>,
    /// Annual per-capita household income, local currency
    pub welfare_nominal: Option<f64>,
    /// Whether the individual worked in the reference week
    pub employed: Option<bool>,
    /// Three-way labor-force status
    pub employment_status: Option<EmploymentStatus>,
    /// Relationship to the job, defined only for the employed
    pub employment_type: Option<EmploymentType>,
    /// 4-digit occupation code, where the survey provides that detail
    pub occupation_4d: Option<i32>,
    /// 3-digit occupation code
    pub occupation_3d: Option<i32>,
    /// 2-digit occupation code
    pub occupation_2d: Option<i32>,
    /// 1-digit occupation major group; 0 denotes the armed forces
    pub occupation_1d: Option<i32>,
    /// Skill group from the occupation major group
    pub skill: Option<SkillLevel>,
    /// 1-digit industry code of the main job
    pub industry_1d: Option<i32>,
    /// Broad sector from the 1-digit industry code
    pub sector: Option<Sector>,
    /// Has a written contract (salaried formality indicator)
    pub contract: Option<bool>,
    /// Contributes to a pension scheme
    pub pension_contribution: Option<bool>,
    /// Contributes to health insurance
    pub health_contribution: Option<bool>,
    /// Age in years, capped at 100
    pub age: Option<i32>,
    /// Sex indicator, inverted from the source is-male flag
    pub female: Option<bool>,
    /// Education in 7 ordered levels
    pub education_7cat: Option<i32>,
    /// Urban residence
    pub urban: Option<bool>,
    /// Relationship to the household head
    pub relationship: Option<Relationship>,
    /// Hourly wage in the main job, local currency
    pub hourly_wage: Option<f64>,
    /// Usual weekly hours in the main job
    pub weekly_hours: Option<f64>,
    /// Monthly labor income of independent workers, local currency
    pub monthly_earnings: Option<f64>,
    /// IMF CPI averaged over the country-year collection window
    pub cpi_wave_imf: Option<f64>,
    /// IMF CPI averaged over the 12 months of 2021
    pub cpi_ref_imf: Option<f64>,
    /// SEDLAC CPI averaged over the country-year collection window
    pub cpi_wave_alt: Option<f64>,
    /// SEDLAC CPI averaged over the 12 months of 2021
    pub cpi_ref_alt: Option<f64>,
    /// PPP conversion factor, 2021 reference
    pub ppp_2021: Option<f64>,
    /// Currency redenomination adjustment factor
    pub currency_adjustment: Option<f64>,
    /// Annualized PPP-adjusted hourly-wage measure, primary CPI source
    pub wage_ppp: Option<f64>,
    /// Annualized PPP-adjusted hourly-wage measure, alternative CPI source
    pub wage_ppp_alt: Option<f64>,
    /// Annualized PPP-adjusted earnings measure, primary CPI source
    pub earnings_ppp: Option<f64>,
    /// Annualized PPP-adjusted earnings measure, alternative CPI source
    pub earnings_ppp_alt: Option<f64>,
    /// Upstream per-year wave-presence indicator (membership rule B)
    pub wave_present: Option<bool>,
    /// Upstream pair-scoped panel-membership flag (membership rule C)
    pub panel_flag: Option<bool>,
    /// Household answered coherently across visits
    pub household_coherent: Option<bool>,
}

impl PersonYear {
    /// Create a record with the identifying fields set
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        household_id: impl Into<String>,
        individual_id: impl Into<String>,
        year: i32,
        weight: f64,
    ) -> Self {
        Self {
            country: country.into(),
            household_id: household_id.into(),
            individual_id: individual_id.into(),
            year,
            weight,
            ..Self::default()
        }
    }

    /// Household-head dummy; exactly one of the three relationship dummies
    /// is true whenever the relationship code is non-missing
    #[must_use]
    pub fn is_head(&self) -> bool {
        self.relationship == Some(Relationship::Head)
    }

    /// Spouse dummy
    #[must_use]
    pub fn is_spouse(&self) -> bool {
        self.relationship == Some(Relationship::Spouse)
    }

    /// Other-member dummy
    #[must_use]
    pub fn is_other_member(&self) -> bool {
        self.relationship == Some(Relationship::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_dummies_are_exclusive() {
        let mut record = PersonYear::new("ARG", "H1", "H1-01", 2018, 125.0);
        assert!(!record.is_head() && !record.is_spouse() && !record.is_other_member());

        record.relationship = Some(Relationship::Head);
        assert!(record.is_head());
        assert!(!record.is_spouse());
        assert!(!record.is_other_member());

        record.relationship = Some(Relationship::Spouse);
        assert!(!record.is_head());
        assert!(record.is_spouse());
        assert!(!record.is_other_member());
    }

    #[test]
    fn test_employment_type_concepts() {
        assert!(EmploymentType::Salaried.is_salaried());
        assert!(!EmploymentType::Salaried.is_independent());
        assert!(EmploymentType::SelfEmployed.is_independent());
        assert!(EmploymentType::Employer.is_independent());
        assert!(!EmploymentType::Unpaid.is_salaried());
        assert!(!EmploymentType::Unpaid.is_independent());
    }

    #[test]
    fn test_skill_ordering() {
        assert!(SkillLevel::Low < SkillLevel::Medium);
        assert!(SkillLevel::Medium < SkillLevel::High);
    }
}
