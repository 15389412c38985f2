//! Stage 11: rated-load performance figures.

use crate::error::{DesignResult, Stage};
use crate::params::MotorDesignParameters;
use crate::stages::armature::ArmatureReaction;
use crate::stages::basic::BasicQuantities;
use crate::stages::impedance::Impedances;
use crate::stages::losses::Losses;
use crate::stages::magnetic_circuit::NoLoadCircuit;
use crate::stages::require_finite;
use crate::stages::winding::WindingFactors;
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

/// Loaded magnet point as a share of the armature-reaction operating point.
const LOADED_MAGNET_FACTOR: f64 = 0.382;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualPerformance {
    /// Fraction, not percent.
    pub efficiency: f64,
    pub power_factor: f64,
    pub power_factor_angle_deg: f64,
    /// Argument of the power-angle arcsine.
    pub power_angle_sine: f64,
    /// Undefined when `power_angle_sine` leaves [-1, 1].
    pub power_angle_deg: Option<f64>,
    /// Fraction of the slot area filled by copper.
    pub slot_fill: f64,
    pub linear_current_density_a_per_mm: f64,
    pub current_density_a_per_mm2: f64,
    pub thermal_load: f64,
    pub loaded_magnet_point: f64,
}

pub fn compute(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    winding: &WindingFactors,
    circuit: &NoLoadCircuit,
    impedance: &Impedances,
    armature: &ArmatureReaction,
    losses: &Losses,
) -> DesignResult<ActualPerformance> {
    let s = &p.stator_slot;
    let m = f64::from(p.ratings.phases);
    let output_w = p.ratings.rated_power_kw * 1000.0;
    let current = basic.rated_current_a;

    let efficiency = output_w / (output_w + losses.total_w);
    let angle = (impedance.stator_leakage_reactance_ohm / impedance.stator_resistance_ohm).atan();
    let power_factor = angle.cos();
    let power_factor_angle_deg = angle.to_degrees();

    let power_angle_sine = output_w / (m * circuit.back_emf_v * current / 3f64.sqrt());
    let power_angle_deg = if (-1.0..=1.0).contains(&power_angle_sine) {
        Some(power_angle_sine.asin().to_degrees())
    } else {
        None
    };

    let slot_copper_mm2 = f64::from(p.winding.conductors_per_slot) * impedance.conductor_area_mm2;
    let slot_area_mm2 = (s.opening_width_mm + s.width_mm) * s.body_height_mm / 2.0
        + s.opening_width_mm * s.opening_height_mm;
    let slot_fill = slot_copper_mm2 / slot_area_mm2;

    let linear_current_density_a_per_mm =
        m * winding.turns_per_phase * current / (PI * p.core.stator_bore_mm);
    let current_density_a_per_mm2 = current / slot_copper_mm2;
    let thermal_load = linear_current_density_a_per_mm * current_density_a_per_mm2;
    let loaded_magnet_point = LOADED_MAGNET_FACTOR * armature.loaded_operating_point;

    require_finite(
        Stage::ActualPerformance,
        &[
            ("efficiency", efficiency),
            ("power factor", power_factor),
            ("slot fill", slot_fill),
            ("thermal load", thermal_load),
        ],
    )?;

    Ok(ActualPerformance {
        efficiency,
        power_factor,
        power_factor_angle_deg,
        power_angle_sine,
        power_angle_deg,
        slot_fill,
        linear_current_density_a_per_mm,
        current_density_a_per_mm2,
        thermal_load,
        loaded_magnet_point,
    })
}
