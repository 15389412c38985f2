//! Steel lookup errors.

use pm_core::CoreError;
use thiserror::Error;

/// Result type for steel catalog operations.
pub type SteelResult<T> = Result<T, SteelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SteelError {
    /// Grade selector that does not name one of the tabulated grades.
    #[error("Unknown steel grade: {what}")]
    UnknownGrade { what: String },
}

impl From<SteelError> for CoreError {
    fn from(err: SteelError) -> Self {
        match err {
            SteelError::UnknownGrade { what } => CoreError::InvalidArg {
                what: format!("steel grade {what}"),
            },
        }
    }
}
