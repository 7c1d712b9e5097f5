//! Mexico — Encuesta Nacional de Ocupación y Empleo (ENOE)
//!
//! Rotating panel with an upstream per-year presence indicator. Panel
//! analysis is restricted to household heads of households that answered
//! coherently across visits.

use super::{
    CountryConfig, EducationCoding, JobRelationCodes, MembershipRule, OccupationDetail,
    SectorScheme, SourceColumns, StatusCodes,
};

pub(super) const CONFIG: CountryConfig = CountryConfig {
    code: "MEX",
    name: "Mexico",
    survey: "ENOE",
    columns: SourceColumns {
        household_id: "FOLIO_HOGAR",
        individual_id: "FOLIO_PERSONA",
        year: "ANIO",
        weight: "FAC",
        relationship: "PAR_C",
        employment_status: "CLASE_ACT",
        male: Some("HOMBRE"),
        age: Some("EDA"),
        education: Some("NIVEL_EDU"),
        urban: Some("URBANO"),
        job_relationship: Some("POS_OCU"),
        occupation: Some("CMO2D"),
        industry: Some("RAMA1D"),
        contract: Some("CONTRATO"),
        pension: Some("SAR"),
        health: Some("SEG_SOC"),
        welfare_nominal: Some("ING_PC"),
        welfare_ppp: Some("ING_PC_PPA"),
        hourly_wage: Some("ING_X_HRS"),
        weekly_hours: Some("HRSOCUP"),
        monthly_earnings: Some("ING_NEGOCIO"),
        wave_present: Some("EN_PANEL"),
        panel_flag: None,
        household_coherent: Some("HOGAR_CONSISTENTE"),
    },
    status_codes: StatusCodes {
        employed: &[1],
        unemployed: &[2],
        inactive: &[3, 4],
    },
    job_codes: JobRelationCodes {
        employer: &[2],
        self_employed: &[3],
        salaried: &[1],
        unpaid: &[4],
    },
    education: EducationCoding::SevenLevel,
    sector_scheme: SectorScheme::UtilitiesInIndustry,
    occupation_detail: OccupationDetail::TwoDigit,
    membership: MembershipRule::Precomputed {
        household_coherence: true,
        heads_only: true,
    },
    alt_cpi_primary: false,
};
