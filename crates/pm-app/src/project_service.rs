//! Design file loading, saving and validation.

use pm_project::DesignFile;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// One-line description of a design file for listings.
#[derive(Debug, Clone)]
pub struct DesignOverview {
    pub name: String,
    pub rated_power_kw: f64,
    pub pole_pairs: u32,
    pub steel_grade: String,
    pub slot_profile: String,
    pub has_solver_overrides: bool,
}

/// Load a design file (YAML or JSON by extension), migrating and validating it.
pub fn load_design(path: &Path) -> AppResult<DesignFile> {
    Ok(pm_project::load(path)?)
}

/// Save a design file (YAML or JSON by extension) after validating it.
pub fn save_design(path: &Path, file: &DesignFile) -> AppResult<()> {
    pm_project::save(path, file).map_err(|err| match err {
        pm_project::ProjectError::Io(source) => AppError::DesignFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Write the reference design to `path`.
pub fn write_reference_design(path: &Path) -> AppResult<DesignFile> {
    let file = DesignFile::reference();
    save_design(path, &file)?;
    Ok(file)
}

pub fn validate_design(file: &DesignFile) -> AppResult<()> {
    pm_project::validate_design_file(file).map_err(|err| AppError::Validation(err.to_string()))
}

pub fn overview(file: &DesignFile) -> DesignOverview {
    let p = &file.parameters;
    DesignOverview {
        name: file.name.clone(),
        rated_power_kw: p.ratings.rated_power_kw,
        pole_pairs: p.ratings.pole_pairs,
        steel_grade: p.steel_grade.to_string(),
        slot_profile: p.rotor_slot.profile.to_string(),
        has_solver_overrides: file.solver.is_some(),
    }
}
