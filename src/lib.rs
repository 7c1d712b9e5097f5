//! A Rust library for harmonizing LAC household-survey microdata into a
//! common variable schema and deriving labor-market transition statistics
//! across survey waves.

pub mod config;
pub mod country;
pub mod cpi;
pub mod error;
pub mod mapper;
pub mod models;
pub mod money;
pub mod panel;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod survey;
pub mod transition;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::RunConfig;
pub use country::{CountryConfig, MembershipRule, SectorScheme, country_config};
pub use error::{HarmonizeError, Result};
pub use models::{
    EmploymentStatus, EmploymentType, PanelDataset, PanelRecord, PersonYear, Relationship, Sector,
    SkillLevel,
};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

// Pipeline stages
pub use mapper::map_batches;
pub use money::convert;
pub use panel::build_panel;
pub use pipeline::{RunSummary, run};
pub use report::TransitionReport;
pub use transition::{TransitionAnalysis, TransitionMatrix, analyze};
