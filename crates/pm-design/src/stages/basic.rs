//! Stage 1: speeds, rated current and torque, pole pitch.

use crate::error::{DesignResult, Stage};
use crate::params::{Connection, MotorDesignParameters, Ratings};
use crate::stages::require_finite;
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicQuantities {
    pub synchronous_speed_rad_s: f64,
    pub rated_speed_rpm: f64,
    pub phase_voltage_v: f64,
    pub rated_current_a: f64,
    pub rated_torque_nm: f64,
    pub pole_pitch_mm: f64,
}

/// Phase voltage seen by one winding phase.
pub fn phase_voltage(ratings: &Ratings, connection: Connection) -> f64 {
    match connection {
        Connection::Star => ratings.rated_voltage_v / 3f64.sqrt(),
        Connection::Delta => ratings.rated_voltage_v,
    }
}

pub fn compute(p: &MotorDesignParameters) -> DesignResult<BasicQuantities> {
    let r = &p.ratings;
    let pole_pairs = f64::from(r.pole_pairs);
    let phases = f64::from(r.phases);

    let synchronous_speed_rad_s = 2.0 * PI * r.frequency_hz / pole_pairs;
    let rated_speed_rpm = 60.0 * r.frequency_hz / pole_pairs;
    let phase_voltage_v = phase_voltage(r, p.winding.connection);
    let rated_current_a = r.rated_power_kw * 1000.0
        / (phases * phase_voltage_v * r.target_efficiency * r.target_power_factor);
    let rated_torque_nm = r.rated_power_kw * 1000.0 / (2.0 * PI * rated_speed_rpm / 60.0);
    let pole_pitch_mm = PI * p.core.stator_bore_mm / (2.0 * pole_pairs);

    require_finite(
        Stage::Basic,
        &[
            ("rated current", rated_current_a),
            ("rated torque", rated_torque_nm),
        ],
    )?;

    Ok(BasicQuantities {
        synchronous_speed_rad_s,
        rated_speed_rpm,
        phase_voltage_v,
        rated_current_a,
        rated_torque_nm,
        pole_pitch_mm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::fixtures::assert_close;

    #[test]
    fn reference_basic_quantities() {
        let b = compute(&MotorDesignParameters::default()).unwrap();
        assert_close(b.synchronous_speed_rad_s, 157.0796, 1e-6);
        assert_close(b.rated_speed_rpm, 1500.0, 1e-12);
        assert_close(b.rated_current_a, 25.65735, 1e-5);
        assert_close(b.rated_torque_nm, 95.49297, 1e-6);
        assert_close(b.pole_pitch_mm, 133.5177, 1e-6);
    }

    #[test]
    fn delta_divides_current_by_root_three() {
        let mut p = MotorDesignParameters::default();
        let star = compute(&p).unwrap();
        p.winding.connection = Connection::Delta;
        let delta = compute(&p).unwrap();
        assert_close(star.rated_current_a / delta.rated_current_a, 3f64.sqrt(), 1e-12);
        assert_eq!(star.rated_torque_nm, delta.rated_torque_nm);
    }
}
