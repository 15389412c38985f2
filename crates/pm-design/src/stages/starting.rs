//! Stage 10: locked-rotor starting current and torque.

use crate::error::{DesignResult, Stage};
use crate::params::MotorDesignParameters;
use crate::stages::basic::BasicQuantities;
use crate::stages::impedance::Impedances;
use crate::stages::{require_finite, require_positive};
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

/// Saturation reduces leakage reactances at standstill.
const START_REACTANCE_FACTOR: f64 = 0.8;
/// Skin effect raises the bar resistance at line frequency.
const START_RESISTANCE_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starting {
    pub stator_reactance_ohm: f64,
    pub rotor_resistance_ohm: f64,
    pub rotor_reactance_ohm: f64,
    pub impedance_ohm: f64,
    pub current_a: f64,
    pub current_ratio: f64,
    pub torque_ratio: f64,
}

pub fn compute(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    impedance: &Impedances,
) -> DesignResult<Starting> {
    let stator_reactance_ohm = START_REACTANCE_FACTOR * impedance.stator_leakage_reactance_ohm;
    let rotor_resistance_ohm = START_RESISTANCE_FACTOR * impedance.rotor_resistance_ohm;
    let rotor_reactance_ohm = START_REACTANCE_FACTOR * impedance.rotor_leakage_reactance_ohm;

    let impedance_ohm = require_positive(
        Stage::Starting,
        "starting impedance",
        (impedance.stator_resistance_ohm + rotor_resistance_ohm)
            .hypot(stator_reactance_ohm + rotor_reactance_ohm),
    )?;
    let current_a = basic.phase_voltage_v / impedance_ohm;
    let current_ratio = current_a / basic.rated_current_a;
    let torque_nm = f64::from(p.ratings.phases)
        * f64::from(p.ratings.pole_pairs)
        * current_a.powi(2)
        * rotor_resistance_ohm
        / (2.0 * PI * p.ratings.frequency_hz);
    let torque_ratio = torque_nm / basic.rated_torque_nm;

    require_finite(
        Stage::Starting,
        &[("starting current", current_a), ("starting torque", torque_ratio)],
    )?;

    Ok(Starting {
        stator_reactance_ohm,
        rotor_resistance_ohm,
        rotor_reactance_ohm,
        impedance_ohm,
        current_a,
        current_ratio,
        torque_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::fixtures::{assert_close, reference};

    #[test]
    fn reference_starting_performance() {
        let up = reference();
        let s = compute(&up.params, &up.basic, &up.impedance).unwrap();
        assert_close(s.current_a, 237.39, 1e-4);
        assert_close(s.current_ratio, 9.2523, 1e-4);
        assert_close(s.torque_ratio, 4.0806, 1e-4);
        assert_close(s.rotor_resistance_ohm, 1.2 * up.impedance.rotor_resistance_ohm, 1e-12);
    }
}
