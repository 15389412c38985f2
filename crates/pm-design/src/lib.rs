//! pm-design: line-start permanent-magnet synchronous motor design.
//!
//! A design run takes one [`MotorDesignParameters`] record through eleven
//! stages (basic ratings, winding, geometry, magnet, no-load magnetic
//! circuit, impedances, armature reaction, masses, losses, starting and
//! rated-load performance) and returns a [`DesignReport`].
//!
//! ```
//! let report = pm_design::calculate(&pm_design::MotorDesignParameters::default()).unwrap();
//! let losses = &report.state.losses;
//! assert!((losses.total_w - 826.3).abs() < 0.1);
//! ```

pub mod characteristics;
pub mod checks;
pub mod engine;
pub mod error;
pub mod params;
pub mod slot_leakage;
pub mod stages;
pub mod summary;
pub mod validate;

pub use characteristics::{TorqueSlipPoint, torque_slip_curve};
pub use checks::{TargetCheck, evaluate_targets};
pub use engine::{DerivedState, DesignReport, DesignWarning, MotorDesignEngine, calculate};
pub use error::{DesignError, DesignResult, FailureKind, Stage};
pub use params::{
    Connection, CoreGeometry, Magnet, MagnetMaterial, MagnetTopology, MotorDesignParameters,
    Operating, Ratings, RotorSlot, StatorSlot, Winding, WindingLayout,
};
pub use pm_steel::SteelGrade;
pub use slot_leakage::{SlotPermeanceGeometry, SlotProfile, specific_permeance};
pub use stages::magnetic_circuit::{CircuitSolveConfig, Convergence, NonConvergencePolicy};
pub use summary::DesignSummary;
pub use validate::validate_parameters;

/// Engine version folded into run identifiers.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
