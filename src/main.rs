use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};

use lac_panel::{Result, RunConfig, run};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

fn print_usage() {
    eprintln!(
        "Usage: lacpanel <input_dir> <output_dir> --countries ARG,BRA --pairs 2018:2019,2019:2020 \
         [--cpi-imf <path>] [--cpi-alt <path>] [--ppp <path>] [--sequential]"
    );
}

fn parse_args(args: &[String]) -> Option<RunConfig> {
    if args.len() < 2 {
        return None;
    }
    let mut config = RunConfig::new(&args[0], &args[1]);

    let mut iter = args[2..].iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--countries" => {
                config.countries = iter
                    .next()?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "--pairs" => {
                let mut pairs = Vec::new();
                for pair in iter.next()?.split(',') {
                    let (t0, t1) = pair.split_once(':')?;
                    pairs.push((t0.trim().parse().ok()?, t1.trim().parse().ok()?));
                }
                config.year_pairs = pairs;
            }
            "--cpi-imf" => config.cpi_imf_path = Some(PathBuf::from(iter.next()?)),
            "--cpi-alt" => config.cpi_alt_path = Some(PathBuf::from(iter.next()?)),
            "--ppp" => config.ppp_path = Some(PathBuf::from(iter.next()?)),
            "--sequential" => config.parallel = false,
            _ => return None,
        }
    }
    Some(config)
}

fn execute(config: &RunConfig) -> Result<()> {
    info!(
        "Harmonization run: {} -> {}",
        config.input_dir.display(),
        config.output_dir.display()
    );
    let summary = run(config)?;
    for outcome in &summary.outcomes {
        info!(
            "{} {}-{}: {} balanced individuals, {} wage rows, {} earnings rows -> {}",
            outcome.country,
            outcome.t0,
            outcome.t1,
            outcome.balanced_individuals,
            outcome.wage_rows,
            outcome.earnings_rows,
            outcome.report_path.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    match execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
