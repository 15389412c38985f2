//! Property tests for the clamped steel interpolation.

use pm_steel::{B_GRID, GRID_LEN, SteelCurve, SteelGrade, field_strength, specific_loss};
use proptest::prelude::*;

fn grade_strategy() -> impl Strategy<Value = SteelGrade> {
    (0usize..SteelGrade::ALL.len()).prop_map(|i| SteelGrade::ALL[i])
}

proptest! {
    #[test]
    fn below_grid_returns_first_sample(grade in grade_strategy(), b in -10.0_f64..=0.40) {
        let curve = SteelCurve::for_grade(grade);
        prop_assert_eq!(field_strength(b, grade), curve.field_strength[0]);
        prop_assert_eq!(specific_loss(b, grade), curve.specific_loss[0]);
    }

    #[test]
    fn above_grid_returns_last_sample(grade in grade_strategy(), b in 2.20_f64..10.0) {
        let curve = SteelCurve::for_grade(grade);
        prop_assert_eq!(field_strength(b, grade), curve.field_strength[GRID_LEN - 1]);
        prop_assert_eq!(specific_loss(b, grade), curve.specific_loss[GRID_LEN - 1]);
    }

    #[test]
    fn monotonically_non_decreasing(grade in grade_strategy(), a in 0.0_f64..2.5, b in 0.0_f64..2.5) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(field_strength(lo, grade) <= field_strength(hi, grade));
        prop_assert!(specific_loss(lo, grade) <= specific_loss(hi, grade));
    }

    #[test]
    fn stays_within_bracketing_samples(grade in grade_strategy(), b in 0.40_f64..2.20) {
        let curve = SteelCurve::for_grade(grade);
        let hi = B_GRID.partition_point(|&x| x <= b).min(GRID_LEN - 1);
        let lo = hi.saturating_sub(1);
        let h = field_strength(b, grade);
        prop_assert!(h >= curve.field_strength[lo] - 1e-9);
        prop_assert!(h <= curve.field_strength[hi] + 1e-9);
    }
}
