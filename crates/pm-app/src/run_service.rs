//! Design run execution and caching service.

use pm_design::{DesignReport, ENGINE_VERSION, MotorDesignEngine, NonConvergencePolicy};
use pm_results::{RunManifest, RunStore};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::AppResult;
use crate::project_service;

/// Options for running a design.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    /// Fail instead of reporting when the no-load circuit does not converge.
    pub strict: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            strict: false,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub design_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub report: DesignReport,
    pub loaded_from_cache: bool,
    pub elapsed_s: f64,
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();
    let file = project_service::load_design(request.design_path)?;

    let mut config = file.solver_config();
    if request.options.strict {
        config.policy = NonConvergencePolicy::Reject;
    }
    let run_id =
        pm_results::compute_run_id(&file.parameters, &config, &request.options.engine_version);
    let store = RunStore::for_design_file(request.design_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let mut manifest = store.load_manifest(&run_id)?;
        let report = store.load_report(&run_id)?;
        if manifest.design_name != file.name {
            // same inputs saved under another name
            manifest.design_name = file.name.clone();
            store.save_run(&manifest, &report)?;
        }
        info!(run_id = %run_id, "loaded cached design run");
        return Ok(RunResponse {
            run_id,
            manifest,
            report,
            loaded_from_cache: true,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }

    let report = MotorDesignEngine::new(file.parameters.clone())
        .with_config(config)
        .run()?;
    let manifest = RunManifest::for_report(run_id.clone(), &file.name, &report);
    store.save_run(&manifest, &report)?;
    info!(run_id = %run_id, "stored design run");

    Ok(RunResponse {
        run_id,
        manifest,
        report,
        loaded_from_cache: false,
        elapsed_s: started.elapsed().as_secs_f64(),
    })
}

/// List stored runs for a design file, oldest first.
pub fn list_runs(design_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_design_file(design_path)?;
    Ok(store.list_runs()?)
}

/// Load a stored run.
pub fn load_run(design_path: &Path, run_id: &str) -> AppResult<(RunManifest, DesignReport)> {
    let store = RunStore::for_design_file(design_path)?;
    let manifest = store.load_manifest(run_id)?;
    let report = store.load_report(run_id)?;
    Ok((manifest, report))
}
