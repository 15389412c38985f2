//! Headline results as typed quantities.

use crate::engine::DerivedState;
use pm_core::units::{
    AngularVelocity, Current, FluxDensity, Length, Mass, Power, Ratio, Resistance, Torque, Voltage,
    amperes, kg, mm, newton_meters, ohms, rad_per_s, tesla, unitless, volts, watts,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignSummary {
    pub synchronous_speed: AngularVelocity,
    pub rated_current: Current,
    pub rated_torque: Torque,
    pub pole_pitch: Length,
    pub back_emf: Voltage,
    pub gap_flux_density: FluxDensity,
    pub stator_resistance: Resistance,
    pub rotor_resistance: Resistance,
    pub total_loss: Power,
    pub efficiency: Ratio,
    pub power_factor: Ratio,
    pub starting_current: Current,
    pub magnet_mass: Mass,
    pub active_mass: Mass,
}

impl From<&DerivedState> for DesignSummary {
    fn from(s: &DerivedState) -> Self {
        Self {
            synchronous_speed: rad_per_s(s.basic.synchronous_speed_rad_s),
            rated_current: amperes(s.basic.rated_current_a),
            rated_torque: newton_meters(s.basic.rated_torque_nm),
            pole_pitch: mm(s.basic.pole_pitch_mm),
            back_emf: volts(s.no_load.back_emf_v),
            gap_flux_density: tesla(s.no_load.gap_flux_density_t),
            stator_resistance: ohms(s.impedance.stator_resistance_ohm),
            rotor_resistance: ohms(s.impedance.rotor_resistance_ohm),
            total_loss: watts(s.losses.total_w),
            efficiency: unitless(s.actual.efficiency),
            power_factor: unitless(s.actual.power_factor),
            starting_current: amperes(s.starting.current_a),
            magnet_mass: kg(s.masses.magnet_kg),
            active_mass: kg(s.masses.total_kg()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate;
    use crate::params::MotorDesignParameters;
    use uom::si::electric_current::ampere;
    use uom::si::length::meter;
    use uom::si::power::kilowatt;
    use uom::si::ratio::percent;

    #[test]
    fn summary_converts_units() {
        let report = calculate(&MotorDesignParameters::default()).unwrap();
        let summary = DesignSummary::from(&report.state);
        let loss_kw = summary.total_loss.get::<kilowatt>();
        assert!((loss_kw - report.state.losses.total_w / 1000.0).abs() < 1e-12);
        let eff_pct = summary.efficiency.get::<percent>();
        assert!((eff_pct - 100.0 * report.state.actual.efficiency).abs() < 1e-9);
        assert!(
            (summary.rated_current.get::<ampere>() - report.state.basic.rated_current_a).abs()
                < 1e-12
        );
        let pitch_m = summary.pole_pitch.get::<meter>();
        assert!((pitch_m * 1000.0 - report.state.basic.pole_pitch_mm).abs() < 1e-9);
    }
}
