//! Progress reporting for batch runs, using the indicatif crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Default style for the per-unit progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Create the main progress bar over (country, year-pair) work units
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(DEFAULT_MAIN_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Create a spinner for an operation of unknown length
#[must_use]
pub fn create_spinner(description: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(description.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
