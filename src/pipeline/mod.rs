//! Pipeline orchestration
//!
//! Runs the full harmonization for a configuration: per country, load the
//! raw survey table, map it to the canonical schema and merge the CPI/PPP
//! references; then per (t0, t1) pair, construct the panel, convert the
//! monetary measures, persist the dataset and analyze transitions. Every
//! (country, year-pair) unit is independent, owns its own data and writes
//! only its own two output files, so units fan out on the rayon pool.

use std::path::PathBuf;

use itertools::Itertools;
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::country::CountryConfig;
use crate::cpi::{CpiSource, CpiTable, PppTable, merge_cpi, merge_ppp};
use crate::error::Result;
use crate::mapper::{MappedCountry, map_batches};
use crate::money::convert;
use crate::panel::build_panel;
use crate::report::TransitionReport;
use crate::survey::{ParquetSurveySource, SurveySource};
use crate::transition::analyze;
use crate::utils::io::{read_parquet, write_typed_rows};
use crate::utils::logging::{create_main_progress_bar, create_spinner};

/// Outcome of one (country, t0, t1) unit
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    /// ISO-3 country code
    pub country: String,
    /// Initial wave year
    pub t0: i32,
    /// Final wave year
    pub t1: i32,
    /// Balanced individuals in the panel
    pub balanced_individuals: usize,
    /// Rows with a primary wage measure
    pub wage_rows: usize,
    /// Rows with a primary earnings measure
    pub earnings_rows: usize,
    /// Where the panel dataset was persisted
    pub panel_path: PathBuf,
    /// Where the transition report was written
    pub report_path: PathBuf,
}

/// Aggregate outcome of a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One outcome per processed unit
    pub outcomes: Vec<UnitOutcome>,
}

/// Execute a full pipeline run
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let countries = config.validate()?;
    let cpi_imf = load_cpi_table(config.cpi_imf_path.as_deref(), CpiSource::Imf)?;
    let cpi_alt = load_cpi_table(config.cpi_alt_path.as_deref(), CpiSource::Sedlac)?;
    let ppp = load_ppp_table(config.ppp_path.as_deref())?;

    let unit_count = countries.len() * config.year_pairs.len();
    log::info!(
        "Processing {} unit(s) for countries [{}] on {} core(s)",
        unit_count,
        countries.iter().map(|c| c.code).join(", "),
        if config.parallel { num_cpus::get() } else { 1 }
    );
    let progress = create_main_progress_bar(unit_count as u64, Some("year pairs"));

    let mut summary = RunSummary::default();
    for cfg in countries {
        let mapped = load_and_map(config, cfg, cpi_imf.as_ref(), cpi_alt.as_ref(), ppp.as_ref())?;

        let process = |&(t0, t1): &(i32, i32)| -> Result<UnitOutcome> {
            let outcome = process_unit(config, cfg, &mapped, t0, t1);
            progress.inc(1);
            outcome
        };

        let outcomes: Vec<UnitOutcome> = if config.parallel {
            config
                .year_pairs
                .par_iter()
                .map(process)
                .collect::<Result<_>>()?
        } else {
            config
                .year_pairs
                .iter()
                .map(process)
                .collect::<Result<_>>()?
        };
        summary.outcomes.extend(outcomes);
    }
    progress.finish_and_clear();

    log::info!(
        "Run complete: {} unit(s), {} balanced individuals in total",
        summary.outcomes.len(),
        summary
            .outcomes
            .iter()
            .map(|o| o.balanced_individuals)
            .sum::<usize>()
    );
    Ok(summary)
}

/// Load one country's raw table, map it and merge the reference tables
fn load_and_map(
    config: &RunConfig,
    cfg: &'static CountryConfig,
    cpi_imf: Option<&CpiTable>,
    cpi_alt: Option<&CpiTable>,
    ppp: Option<&PppTable>,
) -> Result<MappedCountry> {
    let source = ParquetSurveySource::new(cfg.code);
    let spinner = create_spinner(&format!("{}: loading survey data", cfg.code));
    let batches = source.load(&config.country_input_dir(cfg))?;
    spinner.finish_and_clear();
    let mut mapped = map_batches(cfg, &batches)?;

    if let Some(table) = cpi_imf {
        merge_cpi(&mut mapped.records, table, &mut mapped.coverage);
    }
    if let Some(table) = cpi_alt {
        merge_cpi(&mut mapped.records, table, &mut mapped.coverage);
    }
    if let Some(table) = ppp {
        merge_ppp(&mut mapped.records, table, &mut mapped.coverage);
    }
    Ok(mapped)
}

/// Construct, convert, persist and analyze one unit
fn process_unit(
    config: &RunConfig,
    cfg: &'static CountryConfig,
    mapped: &MappedCountry,
    t0: i32,
    t1: i32,
) -> Result<UnitOutcome> {
    let mut dataset = build_panel(cfg, &mapped.records, &mapped.coverage, t0, t1)?;
    let conversion = convert(&mut dataset, cfg)?;

    let panel_path = config
        .output_dir
        .join(format!("{}.parquet", dataset.file_stem()));
    write_typed_rows(&panel_path, &dataset.records)?;

    let analysis = analyze(&dataset)?;
    let report = TransitionReport::from_analysis(&analysis);
    let report_path = config.output_dir.join(format!("{}.json", report.file_stem()));
    report.write_json(&report_path)?;

    Ok(UnitOutcome {
        country: cfg.code.to_string(),
        t0,
        t1,
        balanced_individuals: dataset.stats.balanced_individuals,
        wage_rows: conversion.wage_rows,
        earnings_rows: conversion.earnings_rows,
        panel_path,
        report_path,
    })
}

fn load_cpi_table(path: Option<&std::path::Path>, source: CpiSource) -> Result<Option<CpiTable>> {
    let Some(path) = path else {
        log::warn!(
            "No {:?} CPI table configured; the dependent measures will be skipped",
            source
        );
        return Ok(None);
    };
    let batches = read_parquet(path)?;
    Ok(Some(CpiTable::from_record_batches(source, &batches)?))
}

fn load_ppp_table(path: Option<&std::path::Path>) -> Result<Option<PppTable>> {
    let Some(path) = path else {
        log::warn!("No PPP table configured; the dependent measures will be skipped");
        return Ok(None);
    };
    let batches = read_parquet(path)?;
    Ok(Some(PppTable::from_record_batches(&batches)?))
}
