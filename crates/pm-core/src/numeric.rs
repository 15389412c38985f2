use crate::CoreError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Vacuum permeability (H/m).
pub const MU0: Real = 4.0 * std::f64::consts::PI * 1e-7;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Relative change of `new` with respect to itself, `|(new - old) / new|`.
///
/// Returns infinity when `new` is zero so that a collapse to zero is never
/// mistaken for convergence.
pub fn relative_change(new: Real, old: Real) -> Real {
    if new == 0.0 {
        return Real::INFINITY;
    }
    ((new - old) / new).abs()
}
