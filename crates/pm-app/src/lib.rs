//! Shared application service layer for the PMSM design tools.
//!
//! Front ends go through this crate for design-file handling, cached design
//! runs and report queries.

pub mod error;
pub mod project_service;
pub mod query;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use project_service::{
    DesignOverview, load_design, overview, save_design, validate_design, write_reference_design,
};
pub use query::{
    ReportRow, ReportSection, SteelRow, report_sections, steel_table, torque_slip_csv,
};
pub use run_service::{RunOptions, RunRequest, RunResponse, ensure_run, list_runs, load_run};
