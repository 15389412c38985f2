//! Clamped linear interpolation over the steel tables.

use crate::grade::SteelGrade;
use crate::tables::{B_GRID, FIELD_STRENGTH, GRID_LEN, SPECIFIC_LOSS};

/// Borrowed view of one grade's curves, co-indexed with `B_GRID`.
#[derive(Debug, Clone, Copy)]
pub struct SteelCurve {
    pub grade: SteelGrade,
    pub flux_density: &'static [f64; GRID_LEN],
    pub field_strength: &'static [f64; GRID_LEN],
    pub specific_loss: &'static [f64; GRID_LEN],
}

impl SteelCurve {
    pub fn for_grade(grade: SteelGrade) -> Self {
        let idx = grade.table_index();
        Self {
            grade,
            flux_density: &B_GRID,
            field_strength: &FIELD_STRENGTH[idx],
            specific_loss: &SPECIFIC_LOSS[idx],
        }
    }

    /// Iterate `(B, H, p)` samples.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.flux_density
            .iter()
            .zip(self.field_strength.iter())
            .zip(self.specific_loss.iter())
            .map(|((&b, &h), &p)| (b, h, p))
    }
}

/// Magnetic field strength (A/cm) at flux density `b` (T).
///
/// Outside the tabulated range the boundary sample is returned.
pub fn field_strength(b: f64, grade: SteelGrade) -> f64 {
    interpolate_clamped(&B_GRID, &FIELD_STRENGTH[grade.table_index()], b)
}

/// Specific iron loss (W/kg) at flux density `b` (T).
///
/// Outside the tabulated range the boundary sample is returned.
pub fn specific_loss(b: f64, grade: SteelGrade) -> f64 {
    interpolate_clamped(&B_GRID, &SPECIFIC_LOSS[grade.table_index()], b)
}

/// 1-D linear interpolation on ascending `xs`, clamped to the end samples.
///
/// `xs` and `ys` must be co-indexed and non-empty. A NaN `x` yields NaN.
pub fn interpolate_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if x.is_nan() {
        return f64::NAN;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    // first index with xs[i] > x; guaranteed in 1..=last here
    let hi = xs.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_grid_points() {
        assert_eq!(field_strength(1.0, SteelGrade::Dw315_50), 355.0);
        assert_eq!(specific_loss(1.0, SteelGrade::Dr510_50), 6.6);
        assert_eq!(field_strength(2.2, SteelGrade::Dr420_50), 13400.0);
    }

    #[test]
    fn midpoint_interpolation() {
        // halfway between 1.50 T (1250) and 1.55 T (1420)
        let h = field_strength(1.525, SteelGrade::Dw315_50);
        assert!((h - 1335.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_below_and_above_grid() {
        for grade in SteelGrade::ALL {
            let curve = SteelCurve::for_grade(grade);
            assert_eq!(field_strength(0.0, grade), curve.field_strength[0]);
            assert_eq!(field_strength(-3.0, grade), curve.field_strength[0]);
            assert_eq!(field_strength(5.0, grade), curve.field_strength[GRID_LEN - 1]);
            assert_eq!(specific_loss(0.1, grade), curve.specific_loss[0]);
            assert_eq!(specific_loss(2.5, grade), curve.specific_loss[GRID_LEN - 1]);
        }
    }

    #[test]
    fn nan_flux_density_propagates() {
        for grade in SteelGrade::ALL {
            assert!(field_strength(f64::NAN, grade).is_nan());
            assert!(specific_loss(f64::NAN, grade).is_nan());
        }
        assert!(interpolate_clamped(&[0.0, 1.0], &[2.0, 3.0], f64::NAN).is_nan());
    }

    #[test]
    fn grades_have_distinct_tables() {
        let h: Vec<f64> = SteelGrade::ALL
            .iter()
            .map(|&g| field_strength(1.6, g))
            .collect();
        for i in 0..h.len() {
            for j in (i + 1)..h.len() {
                assert_ne!(h[i], h[j]);
            }
        }
    }

    #[test]
    fn curve_samples_are_co_indexed() {
        let curve = SteelCurve::for_grade(SteelGrade::Dr490_50);
        let samples: Vec<_> = curve.samples().collect();
        assert_eq!(samples.len(), GRID_LEN);
        assert_eq!(samples[0], (0.40, 78.0, 0.45));
        assert_eq!(samples[GRID_LEN - 1], (2.20, 13700.0, 226.2));
    }
}
