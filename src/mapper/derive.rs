//! Pure recoding functions for canonical derived fields
//!
//! Each categorical recode is a single total function from source inputs to
//! the canonical category, so no derivation depends on the order of
//! sequential overwrites.

use crate::country::{
    EducationCoding, JobRelationCodes, OccupationDetail, SectorScheme, StatusCodes,
};
use crate::models::{EmploymentStatus, EmploymentType, Relationship, Sector, SkillLevel};

/// Maximum age carried by the canonical schema
pub const AGE_CAP: i32 = 100;

/// Derive the 1-digit occupation major group from a 2-digit code.
///
/// Raw 2-digit values 1-3 are armed-forces subcodes 01-03 and map to major
/// group 0; they are not truncations of codes >= 10, so floor division must
/// never see them.
#[must_use]
pub fn occupation_major_group(code_2d: i32) -> Option<i32> {
    match code_2d {
        1..=3 => Some(0),
        10..=99 => Some(code_2d / 10),
        _ => None,
    }
}

/// Expand the survey's finest occupation code into the 4/3/2-digit chain
///
/// Returns (4-digit, 3-digit, 2-digit). Surveys publishing only 2-digit
/// codes leave the finer levels undefined.
#[must_use]
pub fn occupation_digits(code: i32, detail: OccupationDetail) -> (Option<i32>, Option<i32>, Option<i32>) {
    match detail {
        OccupationDetail::FourDigit => {
            // Armed-forces 4-digit codes start 01/02/03 and so arrive < 1000
            if (100..=9999).contains(&code) {
                (Some(code), Some(code / 10), Some(code / 100))
            } else {
                (None, None, None)
            }
        }
        OccupationDetail::TwoDigit => {
            if (1..=99).contains(&code) {
                (None, None, Some(code))
            } else {
                (None, None, None)
            }
        }
    }
}

/// Skill group from the occupation major group
///
/// Undefined for the armed forces (group 0); that gap is deliberate.
#[must_use]
pub fn skill_level(major_group: i32) -> Option<SkillLevel> {
    match major_group {
        1..=3 => Some(SkillLevel::High),
        4..=8 => Some(SkillLevel::Medium),
        9 => Some(SkillLevel::Low),
        _ => None,
    }
}

/// Broad sector from the 1-digit industry code under a named scheme
///
/// The two schemes differ only in where code 5 (utilities) falls.
#[must_use]
pub fn sector_from_industry(code: i32, scheme: SectorScheme) -> Option<Sector> {
    match code {
        1 => Some(Sector::Agriculture),
        2..=4 => Some(Sector::Industry),
        5 => Some(match scheme {
            SectorScheme::UtilitiesInIndustry => Sector::Industry,
            SectorScheme::UtilitiesInServices => Sector::Services,
        }),
        6..=9 => Some(Sector::Services),
        _ => None,
    }
}

/// Three-way labor-force status from the country's code sets
#[must_use]
pub fn employment_status(code: i32, codes: &StatusCodes) -> Option<EmploymentStatus> {
    if codes.employed.contains(&code) {
        Some(EmploymentStatus::Employed)
    } else if codes.unemployed.contains(&code) {
        Some(EmploymentStatus::Unemployed)
    } else if codes.inactive.contains(&code) {
        Some(EmploymentStatus::Inactive)
    } else {
        None
    }
}

/// Relationship to the job from the country's code sets
#[must_use]
pub fn employment_type(code: i32, codes: &JobRelationCodes) -> Option<EmploymentType> {
    if codes.employer.contains(&code) {
        Some(EmploymentType::Employer)
    } else if codes.self_employed.contains(&code) {
        Some(EmploymentType::SelfEmployed)
    } else if codes.salaried.contains(&code) {
        Some(EmploymentType::Salaried)
    } else if codes.unpaid.contains(&code) {
        Some(EmploymentType::Unpaid)
    } else {
        None
    }
}

/// Relationship to the household head: 1 head, 2 spouse, 3+ other member
#[must_use]
pub fn relationship_from_code(code: i32) -> Option<Relationship> {
    match code {
        1 => Some(Relationship::Head),
        2 => Some(Relationship::Spouse),
        c if c >= 3 => Some(Relationship::Other),
        _ => None,
    }
}

/// Recode the education source value to the 7-level ordinal
#[must_use]
pub fn education_7cat(value: i32, coding: EducationCoding) -> Option<i32> {
    match coding {
        EducationCoding::SevenLevel => (1..=7).contains(&value).then_some(value),
        EducationCoding::Years => match value {
            0 => Some(1),
            1..=5 => Some(2),
            6..=8 => Some(3),
            9..=11 => Some(4),
            12 => Some(5),
            13..=15 => Some(6),
            v if v >= 16 => Some(7),
            _ => None,
        },
    }
}

/// Cap reported age at the canonical maximum
#[must_use]
pub fn cap_age(age: i32) -> Option<i32> {
    (age >= 0).then_some(age.min(AGE_CAP))
}
