//! Argentina — Encuesta Permanente de Hogares (EPH continua)
//!
//! Rotating panel; the same dwelling is interviewed in non-adjacent
//! quarters covering the same reference period, so wave presence comes from
//! the upstream indicator rather than raw record presence. The IMF CPI
//! series is unusable for part of the coverage window, so the SEDLAC CPI is
//! the primary deflator and the IMF result is kept as the alternative.

use super::{
    CountryConfig, EducationCoding, JobRelationCodes, MembershipRule, OccupationDetail,
    SectorScheme, SourceColumns, StatusCodes,
};

pub(super) const CONFIG: CountryConfig = CountryConfig {
    code: "ARG",
    name: "Argentina",
    survey: "EPH",
    columns: SourceColumns {
        household_id: "CODUSU",
        individual_id: "COMPONENTE_ID",
        year: "ANO4",
        weight: "PONDERA",
        relationship: "CH03",
        employment_status: "ESTADO",
        male: Some("VARON"),
        age: Some("CH06"),
        education: Some("NIVEL_ED"),
        urban: Some("URBANO"),
        job_relationship: Some("CAT_OCUP"),
        occupation: Some("PP04D_COD"),
        industry: Some("RAMA1D"),
        contract: Some("CONTRATO"),
        pension: Some("APORTE_JUB"),
        health: Some("OBRA_SOCIAL"),
        welfare_nominal: Some("IPCF"),
        welfare_ppp: Some("IPCF_PPA"),
        hourly_wage: Some("SALARIO_HORA"),
        weekly_hours: Some("PP3E_TOT"),
        monthly_earnings: Some("ING_INDEP"),
        wave_present: Some("PRESENTE_ONDA"),
        panel_flag: None,
        household_coherent: Some("HOGAR_COHERENTE"),
    },
    status_codes: StatusCodes {
        employed: &[1],
        unemployed: &[2],
        inactive: &[3, 4],
    },
    job_codes: JobRelationCodes {
        employer: &[1],
        self_employed: &[2],
        salaried: &[3],
        unpaid: &[4],
    },
    education: EducationCoding::SevenLevel,
    sector_scheme: SectorScheme::UtilitiesInServices,
    occupation_detail: OccupationDetail::TwoDigit,
    membership: MembershipRule::Precomputed {
        household_coherence: false,
        heads_only: false,
    },
    alt_cpi_primary: true,
};
