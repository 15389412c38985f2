//! Design file validation.

use crate::schema::DesignFile;
use pm_design::{DesignError, validate_parameters};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid design parameters: {0}")]
    Design(#[from] DesignError),
}

pub fn validate_design_file(file: &DesignFile) -> Result<(), ValidationError> {
    if file.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }
    if file.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", file.name),
            reason: "must not be empty".to_string(),
        });
    }
    validate_parameters(&file.parameters)?;
    if let Some(solver) = &file.solver {
        solver.validate()?;
    }
    Ok(())
}
