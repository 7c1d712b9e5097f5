//! Paraguay — Encuesta Permanente de Hogares Continua (EPHC)
//!
//! No upstream panel indicator; membership is re-derived from raw record
//! presence. Education arrives as completed years of schooling.

use super::{
    CountryConfig, EducationCoding, JobRelationCodes, MembershipRule, OccupationDetail,
    SectorScheme, SourceColumns, StatusCodes,
};

pub(super) const CONFIG: CountryConfig = CountryConfig {
    code: "PRY",
    name: "Paraguay",
    survey: "EPHC",
    columns: SourceColumns {
        household_id: "ID_HOGAR",
        individual_id: "ID_PERSONA",
        year: "ANIO",
        weight: "FEX",
        relationship: "P03",
        employment_status: "ESTADO_OCUP",
        male: Some("HOMBRE"),
        age: Some("P02"),
        education: Some("ANOS_ESTUDIO"),
        urban: Some("AREA_URBANA"),
        job_relationship: Some("CATE_OCUP"),
        occupation: Some("OCUP2D"),
        industry: Some("RAMA1D"),
        contract: Some("CONTRATO"),
        pension: Some("JUBILACION"),
        health: Some("SEGURO"),
        welfare_nominal: Some("IPCM"),
        welfare_ppp: Some("IPCM_PPA"),
        hourly_wage: Some("SALARIO_HORA"),
        weekly_hours: Some("HORAS_SEM"),
        monthly_earnings: Some("ING_INDEP"),
        wave_present: None,
        panel_flag: None,
        household_coherent: None,
    },
    status_codes: StatusCodes {
        employed: &[1],
        unemployed: &[2, 3],
        inactive: &[4],
    },
    job_codes: JobRelationCodes {
        employer: &[1],
        self_employed: &[2],
        salaried: &[3, 4, 5],
        unpaid: &[6],
    },
    education: EducationCoding::Years,
    sector_scheme: SectorScheme::UtilitiesInIndustry,
    occupation_detail: OccupationDetail::TwoDigit,
    membership: MembershipRule::Rederived,
    alt_cpi_primary: false,
};
