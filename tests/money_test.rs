//! Monetary converter integration tests

use lac_panel::country::country_config;
use lac_panel::models::{
    EmploymentType, FieldCoverage, PanelDataset, PanelRecord, PanelStats, PersonYear,
};
use lac_panel::money::{IncomeConcept, check_postconditions, convert};
use lac_panel::schema::canonical;

fn salaried_person(id: &str) -> PersonYear {
    let mut p = PersonYear::new("BRA", "D1", id, 2018, 1.0);
    p.employment_type = Some(EmploymentType::Salaried);
    p.hourly_wage = Some(10.0);
    p.weekly_hours = Some(40.0);
    p.cpi_wave_imf = Some(100.0);
    p.cpi_ref_imf = Some(110.0);
    p.cpi_wave_alt = Some(100.0);
    p.cpi_ref_alt = Some(120.0);
    p.ppp_2021 = Some(3.0);
    p.currency_adjustment = Some(1.0);
    p
}

fn full_coverage() -> FieldCoverage {
    let mut coverage = FieldCoverage::new();
    for field in [
        canonical::EMPLOYMENT_TYPE,
        canonical::HOURLY_WAGE,
        canonical::WEEKLY_HOURS,
        canonical::MONTHLY_EARNINGS,
        canonical::CPI_WAVE_IMF,
        canonical::CPI_REF_IMF,
        canonical::CPI_WAVE_ALT,
        canonical::CPI_REF_ALT,
        canonical::PPP_2021,
        canonical::CURRENCY_ADJUSTMENT,
    ] {
        coverage.mark(field);
    }
    coverage
}

fn dataset(country: &str, records: Vec<PersonYear>, coverage: FieldCoverage) -> PanelDataset {
    PanelDataset {
        country: country.to_string(),
        t0: 2018,
        t1: 2019,
        records: records
            .into_iter()
            .map(|person| PanelRecord {
                time: false,
                balanced_panel: true,
                person,
            })
            .collect(),
        coverage,
        stats: PanelStats::default(),
    }
}

#[test]
fn test_wage_round_trip_matches_closed_form() {
    let cfg = country_config("BRA").unwrap();
    let mut data = dataset("BRA", vec![salaried_person("P1")], full_coverage());

    let report = convert(&mut data, cfg).unwrap();
    assert_eq!(report.wage_rows, 1);

    // 10 * 40 * 52 = 20800 nominal; factor (110/100)/3.0 = 0.366667
    let wage = data.records[0].person.wage_ppp.unwrap();
    assert!((wage - 7626.666_666_666_667).abs() < 1e-6);

    // Alternative source uses its own CPI pair: factor (120/100)/3.0
    let wage_alt = data.records[0].person.wage_ppp_alt.unwrap();
    assert!((wage_alt - 8320.0).abs() < 1e-6);
}

#[test]
fn test_earnings_apply_to_independent_workers_only() {
    let cfg = country_config("BRA").unwrap();
    let mut owner = salaried_person("P1");
    owner.employment_type = Some(EmploymentType::Employer);
    owner.hourly_wage = None;
    owner.weekly_hours = None;
    owner.monthly_earnings = Some(1000.0);

    let mut unpaid = salaried_person("P2");
    unpaid.employment_type = Some(EmploymentType::Unpaid);
    unpaid.hourly_wage = None;
    unpaid.weekly_hours = None;
    unpaid.monthly_earnings = Some(500.0);

    let mut data = dataset("BRA", vec![owner, unpaid], full_coverage());
    let report = convert(&mut data, cfg).unwrap();
    assert_eq!(report.earnings_rows, 1);

    // 1000 * 12 * (110/100)/3 = 4400
    let earnings = data.records[0].person.earnings_ppp.unwrap();
    assert!((earnings - 4400.0).abs() < 1e-6);
    // Unpaid workers receive neither measure
    assert!(data.records[1].person.wage_ppp.is_none());
    assert!(data.records[1].person.earnings_ppp.is_none());
}

#[test]
fn test_missing_input_skips_concept_with_diagnostic() {
    let cfg = country_config("BRA").unwrap();
    // Coverage without weekly hours: the delivery lacked the hours column
    let mut coverage = FieldCoverage::new();
    for field in [
        canonical::EMPLOYMENT_TYPE,
        canonical::HOURLY_WAGE,
        canonical::MONTHLY_EARNINGS,
        canonical::CPI_WAVE_IMF,
        canonical::CPI_REF_IMF,
        canonical::CPI_WAVE_ALT,
        canonical::CPI_REF_ALT,
        canonical::PPP_2021,
        canonical::CURRENCY_ADJUSTMENT,
    ] {
        coverage.mark(field);
    }

    let mut owner = salaried_person("P2");
    owner.employment_type = Some(EmploymentType::SelfEmployed);
    owner.monthly_earnings = Some(2000.0);

    let mut data = dataset("BRA", vec![salaried_person("P1"), owner], coverage);
    let report = convert(&mut data, cfg).unwrap();

    // Wage skipped for both CPI sources, earnings still computed
    let wage_skips: Vec<_> = report
        .skipped
        .iter()
        .filter(|s| s.concept == IncomeConcept::Wage)
        .collect();
    assert_eq!(wage_skips.len(), 2);
    assert!(wage_skips
        .iter()
        .all(|s| s.missing_inputs.contains(&canonical::WEEKLY_HOURS)));

    assert!(data.records[0].person.wage_ppp.is_none());
    assert!(data.records[1].person.earnings_ppp.is_some());
    assert_eq!(report.earnings_rows, 1);
}

#[test]
fn test_argentina_swaps_primary_and_alternative() {
    let arg = country_config("ARG").unwrap();
    let mut person = salaried_person("P1");
    person.country = "ARG".to_string();
    let mut data = dataset("ARG", vec![person], full_coverage());

    convert(&mut data, arg).unwrap();

    // Primary measure carries the SEDLAC-deflated value; the IMF-based
    // result is retained as the alternative
    let record = &data.records[0].person;
    assert!((record.wage_ppp.unwrap() - 8320.0).abs() < 1e-6);
    assert!((record.wage_ppp_alt.unwrap() - 7626.666_666_666_667).abs() < 1e-6);
}

#[test]
fn test_postcondition_rejects_wage_on_non_salaried_row() {
    let mut person = salaried_person("P1");
    person.employment_type = Some(EmploymentType::SelfEmployed);
    person.wage_ppp = Some(123.0); // corrupted upstream
    let data = dataset("BRA", vec![person], full_coverage());

    assert!(check_postconditions(&data).is_err());
}

#[test]
fn test_converted_dataset_upholds_measure_invariants() {
    let cfg = country_config("BRA").unwrap();
    let mut self_employed = salaried_person("P2");
    self_employed.employment_type = Some(EmploymentType::SelfEmployed);
    self_employed.monthly_earnings = Some(800.0);

    let mut data = dataset(
        "BRA",
        vec![salaried_person("P1"), self_employed],
        full_coverage(),
    );
    convert(&mut data, cfg).unwrap();

    for record in &data.records {
        let person = &record.person;
        if person.wage_ppp.is_some() {
            assert_eq!(person.employment_type, Some(EmploymentType::Salaried));
        }
        if person.earnings_ppp.is_some() {
            assert!(person.employment_type.unwrap().is_independent());
        }
    }
}
