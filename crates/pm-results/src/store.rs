//! Run storage API.

use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};
use pm_design::DesignReport;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store kept next to a design file, under `.pmsm/runs`.
    pub fn for_design_file(design_path: &Path) -> ResultsResult<Self> {
        let design_dir = design_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "design path has no parent directory".to_string(),
            })?;
        let design_dir = if design_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            design_dir
        };
        Self::new(design_dir.join(".pmsm").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, report: &DesignReport) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let report_json = serde_json::to_string_pretty(report)?;
        fs::write(run_dir.join("report.json"), report_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_report(&self, run_id: &str) -> ResultsResult<DesignReport> {
        let report_path = self.run_dir(run_id).join("report.json");

        if !report_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(report_path)?;
        let report = serde_json::from_str(&content)?;
        Ok(report)
    }

    /// All stored runs, oldest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }
        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_run_id;
    use pm_design::{CircuitSolveConfig, MotorDesignParameters, calculate};

    fn scratch_store(name: &str) -> RunStore {
        let dir = std::env::temp_dir().join("pm_results_tests").join(name);
        let _ = fs::remove_dir_all(&dir);
        RunStore::new(dir).unwrap()
    }

    fn reference_run() -> (RunManifest, DesignReport) {
        let params = MotorDesignParameters::default();
        let report = calculate(&params).unwrap();
        let id = compute_run_id(&params, &CircuitSolveConfig::default(), "test");
        (RunManifest::for_report(id, "reference", &report), report)
    }

    #[test]
    fn save_and_load_run() {
        let store = scratch_store("save_and_load");
        let (manifest, report) = reference_run();

        assert!(!store.has_run(&manifest.run_id));
        store.save_run(&manifest, &report).unwrap();
        assert!(store.has_run(&manifest.run_id));

        assert_eq!(store.load_manifest(&manifest.run_id).unwrap(), manifest);
        let loaded = store.load_report(&manifest.run_id).unwrap();
        assert_eq!(loaded.state, report.state);
        assert_eq!(loaded.warnings, report.warnings);
    }

    #[test]
    fn list_and_delete_runs() {
        let store = scratch_store("list_and_delete");
        let (manifest, report) = reference_run();
        store.save_run(&manifest, &report).unwrap();

        let runs = store.list_runs().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].design_name, "reference");

        store.delete_run(&manifest.run_id).unwrap();
        assert!(store.list_runs().unwrap().is_empty());
    }

    #[test]
    fn missing_run_is_reported() {
        let store = scratch_store("missing");
        assert!(matches!(
            store.load_manifest("nope"),
            Err(ResultsError::RunNotFound { .. })
        ));
        assert!(matches!(
            store.load_report("nope"),
            Err(ResultsError::RunNotFound { .. })
        ));
    }

    #[test]
    fn design_file_store_lives_beside_the_file() {
        let dir = std::env::temp_dir().join("pm_results_tests").join("beside");
        let store = RunStore::for_design_file(&dir.join("motor.yaml")).unwrap();
        assert!(store.root_dir().ends_with(".pmsm/runs"));
        assert!(store.root_dir().starts_with(&dir));
    }
}
