//! Peru — Encuesta Nacional de Hogares (ENAHO)
//!
//! The panel subsample ships an explicit per-person membership flag scoped
//! to the specific pair of years. It applies only to household heads of
//! coherent households aged 25 or older at the initial wave.

use super::{
    CountryConfig, EducationCoding, JobRelationCodes, MembershipRule, OccupationDetail,
    SectorScheme, SourceColumns, StatusCodes,
};

pub(super) const CONFIG: CountryConfig = CountryConfig {
    code: "PER",
    name: "Peru",
    survey: "ENAHO",
    columns: SourceColumns {
        household_id: "ID_HOGAR",
        individual_id: "ID_PERSONA",
        year: "ANIO",
        weight: "FACTOR07",
        relationship: "P203",
        employment_status: "OCU500",
        male: Some("HOMBRE"),
        age: Some("P208A"),
        education: Some("P301A"),
        urban: Some("URBANO"),
        job_relationship: Some("P507"),
        occupation: Some("COD_OCUP"),
        industry: Some("P506_1D"),
        contract: Some("CONTRATO"),
        pension: Some("SIS_PENSION"),
        health: Some("ESSALUD"),
        welfare_nominal: Some("ING_PC"),
        welfare_ppp: Some("ING_PC_PPA"),
        hourly_wage: Some("SALARIO_HORA"),
        weekly_hours: Some("P513T"),
        monthly_earnings: Some("ING_INDEP"),
        wave_present: None,
        panel_flag: Some("HPANEL"),
        household_coherent: Some("HOGAR_COHERENTE"),
    },
    status_codes: StatusCodes {
        employed: &[1, 2],
        unemployed: &[3],
        inactive: &[4],
    },
    job_codes: JobRelationCodes {
        employer: &[1],
        self_employed: &[2],
        salaried: &[3, 4, 6],
        unpaid: &[5],
    },
    education: EducationCoding::SevenLevel,
    sector_scheme: SectorScheme::UtilitiesInServices,
    occupation_detail: OccupationDetail::FourDigit,
    membership: MembershipRule::PairFlag { min_age: 25 },
    alt_cpi_primary: false,
};
