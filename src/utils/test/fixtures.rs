//! Synthetic survey data builders

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rand::prelude::*;

use crate::country::CountryConfig;

/// One synthetic person-year observation, country-agnostic
///
/// `survey_batch` maps these onto the raw column names of a specific
/// country configuration.
#[derive(Debug, Clone)]
pub struct SyntheticPerson {
    /// Household identifier
    pub household_id: String,
    /// Individual identifier
    pub individual_id: String,
    /// Survey year
    pub year: i32,
    /// Expansion weight
    pub weight: f64,
    /// Relationship-to-head code (1 head, 2 spouse, 3+ other)
    pub relationship: Option<i32>,
    /// Labor-force status code, in the country's coding
    pub status: Option<i32>,
    /// Relationship-to-job code, in the country's coding
    pub job_relation: Option<i32>,
    /// Is-male flag
    pub male: Option<bool>,
    /// Age in years
    pub age: Option<i32>,
    /// Education source value
    pub education: Option<i32>,
    /// Urban flag
    pub urban: Option<bool>,
    /// Occupation code at the country's detail level
    pub occupation: Option<i32>,
    /// 1-digit industry code
    pub industry: Option<i32>,
    /// Written contract flag
    pub contract: Option<bool>,
    /// Pension contribution flag
    pub pension: Option<bool>,
    /// Health contribution flag
    pub health: Option<bool>,
    /// Per-capita income, local currency
    pub welfare_nominal: Option<f64>,
    /// Per-capita income, PPP
    pub welfare_ppp: Option<f64>,
    /// Hourly wage, local currency
    pub hourly_wage: Option<f64>,
    /// Weekly hours
    pub weekly_hours: Option<f64>,
    /// Monthly independent earnings
    pub monthly_earnings: Option<f64>,
    /// Rule B wave-presence indicator
    pub wave_present: Option<bool>,
    /// Rule C pair flag
    pub panel_flag: Option<bool>,
    /// Household coherence flag
    pub household_coherent: Option<bool>,
}

impl SyntheticPerson {
    /// A minimal valid observation; everything else defaults to missing
    #[must_use]
    pub fn new(
        household_id: impl Into<String>,
        individual_id: impl Into<String>,
        year: i32,
        weight: f64,
    ) -> Self {
        Self {
            household_id: household_id.into(),
            individual_id: individual_id.into(),
            year,
            weight,
            relationship: None,
            status: None,
            job_relation: None,
            male: None,
            age: None,
            education: None,
            urban: None,
            occupation: None,
            industry: None,
            contract: None,
            pension: None,
            health: None,
            welfare_nominal: None,
            welfare_ppp: None,
            hourly_wage: None,
            weekly_hours: None,
            monthly_earnings: None,
            wave_present: None,
            panel_flag: None,
            household_coherent: None,
        }
    }
}

/// Build a raw survey record batch with the column names of `cfg`
///
/// Optional concepts the country does not configure are left out of the
/// batch entirely, matching how real deliveries look.
#[must_use]
pub fn survey_batch(cfg: &CountryConfig, people: &[SyntheticPerson]) -> RecordBatch {
    let cols = &cfg.columns;
    let mut fields: Vec<Field> = Vec::new();
    let mut arrays: Vec<ArrayRef> = Vec::new();

    let mut push_string = |name: &str, values: Vec<String>, fields: &mut Vec<Field>, arrays: &mut Vec<ArrayRef>| {
        fields.push(Field::new(name, DataType::Utf8, false));
        arrays.push(Arc::new(StringArray::from(values)) as ArrayRef);
    };

    push_string(
        cols.household_id,
        people.iter().map(|p| p.household_id.clone()).collect(),
        &mut fields,
        &mut arrays,
    );
    push_string(
        cols.individual_id,
        people.iter().map(|p| p.individual_id.clone()).collect(),
        &mut fields,
        &mut arrays,
    );

    fields.push(Field::new(cols.year, DataType::Int32, false));
    arrays.push(Arc::new(Int32Array::from(
        people.iter().map(|p| p.year).collect::<Vec<_>>(),
    )));

    fields.push(Field::new(cols.weight, DataType::Float64, false));
    arrays.push(Arc::new(Float64Array::from(
        people.iter().map(|p| p.weight).collect::<Vec<_>>(),
    )));

    let mut push_i32 = |name: &'static str, get: &dyn Fn(&SyntheticPerson) -> Option<i32>| {
        fields.push(Field::new(name, DataType::Int32, true));
        arrays.push(Arc::new(Int32Array::from(
            people.iter().map(get).collect::<Vec<_>>(),
        )));
    };
    push_i32(cols.relationship, &|p| p.relationship);
    push_i32(cols.employment_status, &|p| p.status);
    if let Some(name) = cols.job_relationship {
        push_i32(name, &|p| p.job_relation);
    }
    if let Some(name) = cols.age {
        push_i32(name, &|p| p.age);
    }
    if let Some(name) = cols.education {
        push_i32(name, &|p| p.education);
    }
    if let Some(name) = cols.occupation {
        push_i32(name, &|p| p.occupation);
    }
    if let Some(name) = cols.industry {
        push_i32(name, &|p| p.industry);
    }

    let mut push_bool = |name: &'static str, get: &dyn Fn(&SyntheticPerson) -> Option<bool>| {
        fields.push(Field::new(name, DataType::Boolean, true));
        arrays.push(Arc::new(BooleanArray::from(
            people.iter().map(get).collect::<Vec<_>>(),
        )));
    };
    if let Some(name) = cols.male {
        push_bool(name, &|p| p.male);
    }
    if let Some(name) = cols.urban {
        push_bool(name, &|p| p.urban);
    }
    if let Some(name) = cols.contract {
        push_bool(name, &|p| p.contract);
    }
    if let Some(name) = cols.pension {
        push_bool(name, &|p| p.pension);
    }
    if let Some(name) = cols.health {
        push_bool(name, &|p| p.health);
    }
    if let Some(name) = cols.wave_present {
        push_bool(name, &|p| p.wave_present);
    }
    if let Some(name) = cols.panel_flag {
        push_bool(name, &|p| p.panel_flag);
    }
    if let Some(name) = cols.household_coherent {
        push_bool(name, &|p| p.household_coherent);
    }

    let mut push_f64 = |name: &'static str, get: &dyn Fn(&SyntheticPerson) -> Option<f64>| {
        fields.push(Field::new(name, DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(
            people.iter().map(get).collect::<Vec<_>>(),
        )));
    };
    if let Some(name) = cols.welfare_nominal {
        push_f64(name, &|p| p.welfare_nominal);
    }
    if let Some(name) = cols.welfare_ppp {
        push_f64(name, &|p| p.welfare_ppp);
    }
    if let Some(name) = cols.hourly_wage {
        push_f64(name, &|p| p.hourly_wage);
    }
    if let Some(name) = cols.weekly_hours {
        push_f64(name, &|p| p.weekly_hours);
    }
    if let Some(name) = cols.monthly_earnings {
        push_f64(name, &|p| p.monthly_earnings);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .expect("fixture arrays must agree in length")
}

/// Generate a seeded random population for `cfg` covering `years`
///
/// Every household gets a head; additional members get random
/// relationships. Labor-market codes are drawn from the country's
/// configured code sets so mapped output is always decodable.
#[must_use]
pub fn random_survey_batch(
    cfg: &CountryConfig,
    n_households: usize,
    years: &[i32],
    seed: u64,
) -> RecordBatch {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut people = Vec::new();

    for year in years {
        for h in 0..n_households {
            let household_id = format!("H{h:05}");
            let members = 1 + rng.random_range(0..3);
            for m in 0..members {
                let individual_id = format!("H{h:05}-P{m:02}");
                let mut person =
                    SyntheticPerson::new(&household_id, &individual_id, *year, rng.random_range(50.0..500.0));
                person.relationship = Some(if m == 0 { 1 } else { 2 + rng.random_range(0..2) });
                person.male = Some(rng.random_bool(0.5));
                person.age = Some(if m == 0 { rng.random_range(25..65) } else { rng.random_range(14..80) });
                person.education = Some(rng.random_range(1..=7));
                person.urban = Some(rng.random_bool(0.8));

                let all_status: Vec<i32> = cfg
                    .status_codes
                    .employed
                    .iter()
                    .chain(cfg.status_codes.unemployed)
                    .chain(cfg.status_codes.inactive)
                    .copied()
                    .collect();
                let status = all_status[rng.random_range(0..all_status.len())];
                person.status = Some(status);

                if cfg.status_codes.employed.contains(&status) {
                    let all_jobs: Vec<i32> = cfg
                        .job_codes
                        .employer
                        .iter()
                        .chain(cfg.job_codes.self_employed)
                        .chain(cfg.job_codes.salaried)
                        .chain(cfg.job_codes.unpaid)
                        .copied()
                        .collect();
                    let job = all_jobs[rng.random_range(0..all_jobs.len())];
                    person.job_relation = Some(job);
                    person.occupation = Some(rng.random_range(11..=96));
                    person.industry = Some(rng.random_range(1..=9));
                    if cfg.job_codes.salaried.contains(&job) {
                        person.hourly_wage = Some(rng.random_range(1.0..60.0));
                        person.weekly_hours = Some(rng.random_range(10.0..48.0));
                        person.contract = Some(rng.random_bool(0.6));
                        person.pension = Some(rng.random_bool(0.5));
                        person.health = Some(rng.random_bool(0.5));
                    } else {
                        person.monthly_earnings = Some(rng.random_range(100.0..5000.0));
                    }
                }

                person.welfare_nominal = Some(rng.random_range(100.0..10000.0));
                person.welfare_ppp = Some(rng.random_range(50.0..2000.0));
                person.wave_present = Some(true);
                person.panel_flag = Some(true);
                person.household_coherent = Some(true);
                people.push(person);
            }
        }
    }

    survey_batch(cfg, &people)
}
