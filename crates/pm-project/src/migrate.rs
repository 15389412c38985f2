//! Schema migration framework.

use crate::ProjectError;
use crate::schema::DesignFile;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut file: DesignFile) -> Result<DesignFile, ProjectError> {
    while file.version < LATEST_VERSION {
        file = migrate_one_version(file)?;
    }
    Ok(file)
}

fn migrate_one_version(file: DesignFile) -> Result<DesignFile, ProjectError> {
    match file.version {
        0 => migrate_v0_to_v1(file),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files predate the `solver` section; the shape is otherwise unchanged.
fn migrate_v0_to_v1(mut file: DesignFile) -> Result<DesignFile, ProjectError> {
    file.version = 1;
    Ok(file)
}
