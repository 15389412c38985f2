//! Design file schema.

use pm_design::{CircuitSolveConfig, MotorDesignParameters};
use serde::{Deserialize, Serialize};

/// A saved parameter set with optional solver overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignFile {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: MotorDesignParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<CircuitSolveConfig>,
}

impl DesignFile {
    pub fn new(name: impl Into<String>, parameters: MotorDesignParameters) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            description: None,
            parameters,
            solver: None,
        }
    }

    /// The 15 kW reference design.
    pub fn reference() -> Self {
        let mut file = Self::new("15 kW reference design", MotorDesignParameters::default());
        file.description =
            Some("4-pole line-start PMSM, 380 V star, DW315-50 laminations".to_string());
        file
    }

    /// Solver settings to run with, falling back to the defaults.
    pub fn solver_config(&self) -> CircuitSolveConfig {
        self.solver.unwrap_or_default()
    }
}
