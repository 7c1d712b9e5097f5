//! Canonical data model for harmonized survey microdata
//!
//! This module contains the canonical person-year record produced by the
//! schema mapper, the categorical variables of the harmonized schema, and
//! the panel records derived for a specific pair of survey waves.

pub mod panel;
pub mod person_year;

pub use panel::{FieldCoverage, PanelDataset, PanelRecord, PanelStats};
pub use person_year::{
    EmploymentStatus, EmploymentType, PersonYear, Relationship, Sector, SkillLevel,
};
