//! Torque–slip characteristic of the cage during asynchronous run-up.

use crate::engine::DesignReport;
use crate::error::{DesignError, DesignResult};
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

pub const MIN_SLIP: f64 = 0.01;
pub const MAX_SLIP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorqueSlipPoint {
    pub slip: f64,
    pub torque_nm: f64,
    /// Torque as a multiple of rated torque.
    pub torque_pu: f64,
}

/// Asynchronous torque at `slip` from the steady-state equivalent circuit.
pub fn asynchronous_torque_nm(report: &DesignReport, slip: f64) -> f64 {
    let p = &report.parameters;
    let z = &report.state.impedance;
    let rotor = z.rotor_resistance_ohm / slip;
    let magnitude = (z.stator_resistance_ohm + rotor)
        .hypot(z.stator_leakage_reactance_ohm + z.rotor_leakage_reactance_ohm);
    let current = report.state.basic.phase_voltage_v / magnitude;
    f64::from(p.ratings.phases) * f64::from(p.ratings.pole_pairs) * current * current * rotor
        / (2.0 * PI * p.ratings.frequency_hz)
}

/// `points` evenly spaced samples from slip 0.01 to standstill.
pub fn torque_slip_curve(report: &DesignReport, points: usize) -> DesignResult<Vec<TorqueSlipPoint>> {
    if points < 2 {
        return Err(DesignError::invalid("points", points, "need at least 2"));
    }
    let rated = report.state.basic.rated_torque_nm;
    let step = (MAX_SLIP - MIN_SLIP) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            let slip = if i + 1 == points {
                MAX_SLIP
            } else {
                MIN_SLIP + step * i as f64
            };
            let torque_nm = asynchronous_torque_nm(report, slip);
            TorqueSlipPoint {
                slip,
                torque_nm,
                torque_pu: torque_nm / rated,
            }
        })
        .collect())
}

/// Sample with the largest torque.
pub fn peak_torque(curve: &[TorqueSlipPoint]) -> Option<TorqueSlipPoint> {
    curve
        .iter()
        .copied()
        .max_by(|a, b| a.torque_nm.total_cmp(&b.torque_nm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate;
    use crate::params::MotorDesignParameters;

    fn report() -> DesignReport {
        calculate(&MotorDesignParameters::default()).unwrap()
    }

    #[test]
    fn curve_spans_the_slip_range() {
        let curve = torque_slip_curve(&report(), 100).unwrap();
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0].slip, MIN_SLIP);
        assert_eq!(curve[99].slip, MAX_SLIP);
        assert!(curve.windows(2).all(|w| w[0].slip < w[1].slip));
        assert!(curve.iter().all(|pt| pt.torque_nm > 0.0));
    }

    #[test]
    fn standstill_uses_running_resistances() {
        let r = report();
        let curve = torque_slip_curve(&r, 2).unwrap();
        let z = &r.state.impedance;
        let total = (z.stator_resistance_ohm + z.rotor_resistance_ohm)
            .hypot(z.stator_leakage_reactance_ohm + z.rotor_leakage_reactance_ohm);
        let current = r.state.basic.phase_voltage_v / total;
        let expected = 3.0 * 2.0 * current * current * z.rotor_resistance_ohm / (2.0 * PI * 50.0);
        assert!((curve[1].torque_nm - expected).abs() < 1e-9 * expected);
    }

    #[test]
    fn peak_lies_inside_the_range() {
        let curve = torque_slip_curve(&report(), 200).unwrap();
        let peak = peak_torque(&curve).unwrap();
        assert!(peak.slip > MIN_SLIP && peak.slip < MAX_SLIP);
        assert!(peak.torque_pu > curve[199].torque_pu);
    }

    #[test]
    fn too_few_points_is_invalid() {
        assert!(torque_slip_curve(&report(), 1).is_err());
    }
}
