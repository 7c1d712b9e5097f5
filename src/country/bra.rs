//! Brazil — Pesquisa Nacional por Amostra de Domicílios Contínua (PNADC)
//!
//! No upstream panel indicator is delivered; membership is re-derived from
//! raw record presence per year. Education arrives as completed years of
//! schooling. The survey publishes full 4-digit occupation codes and no
//! health-contribution indicator.

use super::{
    CountryConfig, EducationCoding, JobRelationCodes, MembershipRule, OccupationDetail,
    SectorScheme, SourceColumns, StatusCodes,
};

pub(super) const CONFIG: CountryConfig = CountryConfig {
    code: "BRA",
    name: "Brazil",
    survey: "PNADC",
    columns: SourceColumns {
        household_id: "ID_DOMICILIO",
        individual_id: "ID_PESSOA",
        year: "ANO",
        weight: "V1028",
        relationship: "V2005",
        employment_status: "COND_OCUP",
        male: Some("HOMEM"),
        age: Some("V2009"),
        education: Some("ANOS_ESTUDO"),
        urban: Some("URBANA"),
        job_relationship: Some("POSICAO_OCUP"),
        occupation: Some("COD_OCUP4"),
        industry: Some("SETOR1D"),
        contract: Some("CARTEIRA"),
        pension: Some("PREVIDENCIA"),
        health: None,
        welfare_nominal: Some("RENDA_PC"),
        welfare_ppp: Some("RENDA_PC_PPA"),
        hourly_wage: Some("SALARIO_HORA"),
        weekly_hours: Some("HORAS_SEMANA"),
        monthly_earnings: Some("RENDA_AUTONOMO"),
        wave_present: None,
        panel_flag: None,
        household_coherent: None,
    },
    status_codes: StatusCodes {
        employed: &[1],
        unemployed: &[2],
        inactive: &[3],
    },
    job_codes: JobRelationCodes {
        employer: &[5],
        self_employed: &[6],
        salaried: &[1, 2, 3, 4],
        unpaid: &[7],
    },
    education: EducationCoding::Years,
    sector_scheme: SectorScheme::UtilitiesInIndustry,
    occupation_detail: OccupationDetail::FourDigit,
    membership: MembershipRule::Rederived,
    alt_cpi_primary: false,
};
