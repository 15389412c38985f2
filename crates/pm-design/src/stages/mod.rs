//! The eleven calculation stages of a design run.
//!
//! Each stage is a pure function of the parameter record and the outputs of
//! the stages before it. The engine runs them strictly in order.

pub mod actual;
pub mod armature;
pub mod basic;
pub mod geometry;
pub mod impedance;
pub mod losses;
pub mod magnet;
pub mod magnetic_circuit;
pub mod masses;
pub mod starting;
pub mod winding;

use crate::error::{DesignError, DesignResult, Stage};
use pm_core::ensure_finite;

/// Lamination stacking factor.
pub const STACKING_FACTOR: f64 = 0.93;

/// Ratio of mean to peak air-gap flux density.
pub const POLE_ARC_COEFFICIENT: f64 = 0.64;

pub(crate) fn effective_length_mm(core_length_mm: f64, airgap_mm: f64) -> f64 {
    core_length_mm + 2.0 * airgap_mm
}

/// Fails with a domain error if `value` is not strictly positive.
pub(crate) fn require_positive(stage: Stage, what: &str, value: f64) -> DesignResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(DesignError::domain(
            stage,
            format!("{what} must be positive (got {value})"),
        ))
    }
}

/// Fails with a domain error on the first non-finite published value.
pub(crate) fn require_finite(stage: Stage, values: &[(&'static str, f64)]) -> DesignResult<()> {
    for &(what, value) in values {
        ensure_finite(value, what).map_err(|err| DesignError::domain(stage, err.to_string()))?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(require_positive(Stage::Geometry, "tooth width", 7.4).is_ok());
        assert!(require_positive(Stage::Geometry, "tooth width", 0.0).is_err());
        assert!(require_positive(Stage::Geometry, "tooth width", f64::NAN).is_err());
    }

    #[test]
    fn require_finite_names_the_value() {
        let err = require_finite(Stage::Losses, &[("copper loss", 1.0), ("iron loss", f64::INFINITY)])
            .unwrap_err();
        assert!(err.to_string().contains("iron loss"));
    }
}
