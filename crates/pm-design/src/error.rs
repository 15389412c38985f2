//! Error types for design runs.

use core::fmt;
use pm_core::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Basic,
    Winding,
    Geometry,
    Magnet,
    NoLoadCircuit,
    Impedance,
    ArmatureReaction,
    Masses,
    Losses,
    Starting,
    ActualPerformance,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::Basic,
        Stage::Winding,
        Stage::Geometry,
        Stage::Magnet,
        Stage::NoLoadCircuit,
        Stage::Impedance,
        Stage::ArmatureReaction,
        Stage::Masses,
        Stage::Losses,
        Stage::Starting,
        Stage::ActualPerformance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Basic => "basic parameters",
            Stage::Winding => "winding",
            Stage::Geometry => "geometry",
            Stage::Magnet => "magnet",
            Stage::NoLoadCircuit => "no-load magnetic circuit",
            Stage::Impedance => "impedance",
            Stage::ArmatureReaction => "armature reaction",
            Stage::Masses => "material masses",
            Stage::Losses => "losses",
            Stage::Starting => "starting",
            Stage::ActualPerformance => "actual performance",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    NumericalDomain,
    NonConvergence,
}

/// Errors that abort a design run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// Rejected before the first stage runs.
    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Numerical domain error in {stage} stage: {what}")]
    NumericalDomain { stage: Stage, what: String },

    /// Only raised under `NonConvergencePolicy::Reject`.
    #[error(
        "No-load magnetic circuit did not converge in {iterations} rounds (last relative change {last_relative_change:e})"
    )]
    NonConvergence {
        iterations: usize,
        last_relative_change: f64,
    },
}

impl DesignError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DesignError::InvalidInput { .. } => FailureKind::InvalidInput,
            DesignError::NumericalDomain { .. } => FailureKind::NumericalDomain,
            DesignError::NonConvergence { .. } => FailureKind::NonConvergence,
        }
    }

    pub(crate) fn invalid(field: &str, value: impl fmt::Display, reason: &str) -> Self {
        DesignError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn domain(stage: Stage, what: impl Into<String>) -> Self {
        DesignError::NumericalDomain {
            stage,
            what: what.into(),
        }
    }
}

pub type DesignResult<T> = Result<T, DesignError>;

impl From<DesignError> for CoreError {
    fn from(err: DesignError) -> Self {
        match err {
            DesignError::InvalidInput { .. } => CoreError::InvalidArg {
                what: err.to_string(),
            },
            DesignError::NumericalDomain { .. } | DesignError::NonConvergence { .. } => {
                CoreError::Invariant {
                    what: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_stage() {
        let err = DesignError::domain(Stage::Geometry, "stator yoke height must be positive");
        let msg = err.to_string();
        assert!(msg.contains("geometry"));
        assert!(msg.contains("stator yoke height"));
        assert_eq!(err.kind(), FailureKind::NumericalDomain);
    }

    #[test]
    fn invalid_input_to_core_error() {
        let err = DesignError::invalid("core.airgap_mm", -0.1, "must be positive");
        assert_eq!(err.kind(), FailureKind::InvalidInput);
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::InvalidArg { .. }));
    }

    #[test]
    fn stages_are_listed_in_order() {
        assert_eq!(Stage::ALL[0], Stage::Basic);
        assert_eq!(Stage::ALL[4], Stage::NoLoadCircuit);
        assert_eq!(Stage::ALL[10], Stage::ActualPerformance);
    }
}
