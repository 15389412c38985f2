//! Result data types.

use pm_design::DesignReport;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub design_name: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub engine_version: String,
    pub converged: bool,
    pub warning_count: usize,
    pub efficiency: f64,
    pub total_loss_w: f64,
}

impl RunManifest {
    /// Manifest for `report`, stamped with the current time.
    pub fn for_report(run_id: RunId, design_name: &str, report: &DesignReport) -> Self {
        Self {
            run_id,
            design_name: design_name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            engine_version: pm_design::ENGINE_VERSION.to_string(),
            converged: report.convergence.converged,
            warning_count: report.warnings.len(),
            efficiency: report.state.actual.efficiency,
            total_loss_w: report.state.losses.total_w,
        }
    }
}
