//! Schema mapper integration tests

use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use rustc_hash::FxHashMap;

use lac_panel::country::country_config;
use lac_panel::mapper::{SkipReason, map_batches};
use lac_panel::models::{EmploymentStatus, EmploymentType, Relationship, Sector};
use lac_panel::schema::canonical;
use lac_panel::utils::test::{SyntheticPerson, random_survey_batch, survey_batch};
use lac_panel::HarmonizeError;

fn arg_person(
    household: &str,
    person: &str,
    year: i32,
    weight: f64,
    relationship: i32,
) -> SyntheticPerson {
    let mut p = SyntheticPerson::new(household, person, year, weight);
    p.relationship = Some(relationship);
    p.status = Some(3);
    p
}

#[test]
fn test_missing_required_column_fails_fast() {
    let cfg = country_config("ARG").unwrap();

    // A delivery with identifiers but no weight column
    let schema = Schema::new(vec![
        Field::new("CODUSU", DataType::Utf8, false),
        Field::new("COMPONENTE_ID", DataType::Utf8, false),
        Field::new("ANO4", DataType::Int32, false),
    ]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(vec!["H1"])) as ArrayRef,
            Arc::new(StringArray::from(vec!["H1-01"])),
            Arc::new(Int32Array::from(vec![2018])),
        ],
    )
    .unwrap();

    let err = map_batches(cfg, &[batch]).unwrap_err();
    match err {
        HarmonizeError::MissingColumn { country, column } => {
            assert_eq!(country, "ARG");
            assert_eq!(column, "PONDERA");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_missing_optional_column_is_skipped_not_fatal() {
    let cfg = country_config("ARG").unwrap();
    let batch = survey_batch(cfg, &[arg_person("H1", "H1-01", 2018, 100.0, 1)]);

    // Drop the hourly-wage column from the delivery
    let wage_index = batch.schema().index_of("SALARIO_HORA").unwrap();
    let keep: Vec<usize> = (0..batch.num_columns()).filter(|&i| i != wage_index).collect();
    let projected = batch.project(&keep).unwrap();

    let mapped = map_batches(cfg, &[projected]).unwrap();
    assert_eq!(mapped.records.len(), 1);
    assert!(!mapped.coverage.has(canonical::HOURLY_WAGE));
    assert!(mapped
        .report
        .skipped
        .iter()
        .any(|s| s.canonical == canonical::HOURLY_WAGE && s.reason == SkipReason::ColumnAbsent));
}

#[test]
fn test_unconfigured_concept_reports_not_in_survey() {
    // BRA carries no health-contribution indicator at all
    let cfg = country_config("BRA").unwrap();
    let mut person = SyntheticPerson::new("D1", "D1-01", 2018, 50.0);
    person.relationship = Some(1);
    person.status = Some(1);
    let mapped = map_batches(cfg, &[survey_batch(cfg, &[person])]).unwrap();

    assert!(!mapped.coverage.has(canonical::HEALTH));
    assert!(mapped
        .report
        .skipped
        .iter()
        .any(|s| s.canonical == canonical::HEALTH && s.reason == SkipReason::NotInSurvey));
}

#[test]
fn test_armed_forces_occupation_maps_to_group_zero() {
    let cfg = country_config("ARG").unwrap();
    let mut soldier = arg_person("H1", "H1-01", 2018, 100.0, 1);
    soldier.status = Some(1);
    soldier.job_relation = Some(3);
    soldier.occupation = Some(2);
    let mut clerk = arg_person("H2", "H2-01", 2018, 100.0, 1);
    clerk.status = Some(1);
    clerk.job_relation = Some(3);
    clerk.occupation = Some(41);

    let mapped = map_batches(cfg, &[survey_batch(cfg, &[soldier, clerk])]).unwrap();
    let soldier = &mapped.records[0];
    assert_eq!(soldier.occupation_2d, Some(2));
    assert_eq!(soldier.occupation_1d, Some(0));
    assert_eq!(soldier.skill, None, "armed forces carry no skill level");

    let clerk = &mapped.records[1];
    assert_eq!(clerk.occupation_1d, Some(4));
    assert!(clerk.skill.is_some());
}

#[test]
fn test_household_weight_broadcast_and_wave_numbering() {
    let cfg = country_config("ARG").unwrap();
    let head = arg_person("H1", "H1-01", 2018, 120.0, 1);
    let spouse = arg_person("H1", "H1-02", 2018, 85.0, 2);
    let child = arg_person("H1", "H1-03", 2018, 70.0, 3);
    let head_2019 = arg_person("H1", "H1-01", 2019, 130.0, 1);

    let mapped = map_batches(
        cfg,
        &[survey_batch(cfg, &[head, spouse, child, head_2019])],
    )
    .unwrap();

    // Everyone in the 2018 household carries the head's weight
    for record in mapped.records.iter().filter(|r| r.year == 2018) {
        assert_eq!(record.household_weight, Some(120.0));
        assert_eq!(record.wave, 1);
    }
    let later = mapped.records.iter().find(|r| r.year == 2019).unwrap();
    assert_eq!(later.household_weight, Some(130.0));
    assert_eq!(later.wave, 2);
}

#[test]
fn test_relationship_and_demographic_recodes() {
    let cfg = country_config("ARG").unwrap();
    let mut person = arg_person("H1", "H1-02", 2018, 90.0, 2);
    person.male = Some(false);
    person.age = Some(104);
    person.education = Some(5);
    person.urban = Some(true);

    let mapped = map_batches(cfg, &[survey_batch(cfg, &[person])]).unwrap();
    let record = &mapped.records[0];
    assert_eq!(record.relationship, Some(Relationship::Spouse));
    assert!(record.is_spouse() && !record.is_head() && !record.is_other_member());
    assert_eq!(record.female, Some(true), "female is the inverted is-male flag");
    assert_eq!(record.age, Some(100), "age is capped");
    assert_eq!(record.education_7cat, Some(5));
    assert_eq!(record.urban, Some(true));
}

#[test]
fn test_education_years_variant() {
    // BRA delivers completed years of schooling
    let cfg = country_config("BRA").unwrap();
    let mut person = SyntheticPerson::new("D1", "D1-01", 2018, 50.0);
    person.relationship = Some(1);
    person.status = Some(1);
    person.education = Some(11);
    let mapped = map_batches(cfg, &[survey_batch(cfg, &[person])]).unwrap();
    assert_eq!(mapped.records[0].education_7cat, Some(4));
}

#[test]
fn test_employment_recodes_respect_country_code_sets() {
    let cfg = country_config("ARG").unwrap();
    let mut employed = arg_person("H1", "H1-01", 2018, 100.0, 1);
    employed.status = Some(1);
    employed.job_relation = Some(2);
    let mut unemployed = arg_person("H2", "H2-01", 2018, 100.0, 1);
    unemployed.status = Some(2);
    unemployed.job_relation = Some(2); // stale code, must be cleared
    let mut inactive = arg_person("H3", "H3-01", 2018, 100.0, 1);
    inactive.status = Some(4);

    let mapped = map_batches(
        cfg,
        &[survey_batch(cfg, &[employed, unemployed, inactive])],
    )
    .unwrap();

    assert_eq!(
        mapped.records[0].employment_status,
        Some(EmploymentStatus::Employed)
    );
    assert_eq!(
        mapped.records[0].employment_type,
        Some(EmploymentType::SelfEmployed)
    );
    assert_eq!(
        mapped.records[1].employment_status,
        Some(EmploymentStatus::Unemployed)
    );
    assert_eq!(
        mapped.records[1].employment_type, None,
        "job relation only applies to the employed"
    );
    assert_eq!(
        mapped.records[2].employment_status,
        Some(EmploymentStatus::Inactive)
    );
    assert_eq!(mapped.records[2].employed, Some(false));
}

#[test]
fn test_canonical_invariants_hold_on_random_population() {
    let cfg = country_config("MEX").unwrap();
    let batch = random_survey_batch(cfg, 40, &[2018, 2019], 7);
    let mapped = map_batches(cfg, &[batch]).unwrap();
    assert!(!mapped.records.is_empty());

    // household_weight is constant within each (household, year) group
    let mut group_weights: FxHashMap<(String, i32), f64> = FxHashMap::default();
    for record in &mapped.records {
        let key = (record.household_id.clone(), record.year);
        if let Some(weight) = record.household_weight {
            let seen = group_weights.entry(key).or_insert(weight);
            assert_eq!(*seen, weight, "household weight varies within a group");
        }
    }

    for record in &mapped.records {
        // Exactly one relationship dummy when the code is non-missing
        if record.relationship.is_some() {
            let dummies =
                [record.is_head(), record.is_spouse(), record.is_other_member()];
            assert_eq!(dummies.iter().filter(|&&d| d).count(), 1);
        }
        // Skill is undefined only for the armed forces or unknown occupations
        if record.skill.is_none() {
            assert!(matches!(record.occupation_1d, None | Some(0)));
        }
        // Wave numbering starts at 1 for the first observed year
        assert_eq!(record.wave, record.year - 2018 + 1);
    }
}

#[test]
fn test_sector_variant_differs_between_countries() {
    // Utilities (industry code 5): services in ARG, industry in BRA
    let arg = country_config("ARG").unwrap();
    let mut person = arg_person("H1", "H1-01", 2018, 100.0, 1);
    person.status = Some(1);
    person.job_relation = Some(3);
    person.industry = Some(5);
    let mapped = map_batches(arg, &[survey_batch(arg, &[person])]).unwrap();
    assert_eq!(mapped.records[0].sector, Some(Sector::Services));

    let bra = country_config("BRA").unwrap();
    let mut person = SyntheticPerson::new("D1", "D1-01", 2018, 50.0);
    person.relationship = Some(1);
    person.status = Some(1);
    person.job_relation = Some(3);
    person.industry = Some(5);
    let mapped = map_batches(bra, &[survey_batch(bra, &[person])]).unwrap();
    assert_eq!(mapped.records[0].sector, Some(Sector::Industry));
}
