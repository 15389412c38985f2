//! pm-project: versioned design file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_design_file};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<DesignFile> {
    let content = std::fs::read_to_string(path)?;
    let mut file: DesignFile = serde_yaml::from_str(&content)?;
    file = migrate_to_latest(file)?;
    validate_design_file(&file)?;
    Ok(file)
}

pub fn save_yaml(path: &Path, file: &DesignFile) -> ProjectResult<()> {
    validate_design_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<DesignFile> {
    let content = std::fs::read_to_string(path)?;
    let mut file: DesignFile = serde_json::from_str(&content)?;
    file = migrate_to_latest(file)?;
    validate_design_file(&file)?;
    Ok(file)
}

pub fn save_json(path: &Path, file: &DesignFile) -> ProjectResult<()> {
    validate_design_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads a design file, choosing the format from the extension.
pub fn load(path: &Path) -> ProjectResult<DesignFile> {
    match format_of(path)? {
        Format::Yaml => load_yaml(path),
        Format::Json => load_json(path),
    }
}

/// Saves a design file, choosing the format from the extension.
pub fn save(path: &Path, file: &DesignFile) -> ProjectResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, file),
        Format::Json => save_json(path, file),
    }
}
