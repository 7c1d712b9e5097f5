//! Test fixtures
//!
//! Builders for synthetic raw survey batches. `survey_batch` lays out a
//! record batch with the column names of a given country configuration, so
//! the same fixture rows exercise any country variant; `random_survey_batch`
//! generates a seeded population for smoke tests.

pub mod fixtures;

pub use fixtures::{SyntheticPerson, random_survey_batch, survey_batch};
