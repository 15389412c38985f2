//! Error types for the pm-app service layer.

use pm_design::{DesignError, FailureKind};
use std::path::PathBuf;

/// Application error type shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Design file error: {0}")]
    Project(String),

    #[error("Failed to write design file: {path}")]
    DesignFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Design validation failed: {0}")]
    Validation(String),

    #[error("Design run failed ({kind:?}): {message}")]
    Design { kind: FailureKind, message: String },

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<pm_project::ProjectError> for AppError {
    fn from(err: pm_project::ProjectError) -> Self {
        match err {
            pm_project::ProjectError::Validation(inner) => AppError::Validation(inner.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<DesignError> for AppError {
    fn from(err: DesignError) -> Self {
        AppError::Design {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<pm_results::ResultsError> for AppError {
    fn from(err: pm_results::ResultsError) -> Self {
        match err {
            pm_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}

impl From<pm_steel::SteelError> for AppError {
    fn from(err: pm_steel::SteelError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
