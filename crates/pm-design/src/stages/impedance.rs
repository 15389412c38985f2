//! Stage 6: stator and rotor resistances and leakage reactances.

use crate::error::{DesignError, DesignResult, Stage};
use crate::params::{MotorDesignParameters, WindingLayout};
use crate::slot_leakage::{SlotPermeanceGeometry, specific_permeance};
use crate::stages::basic::BasicQuantities;
use crate::stages::geometry::Geometry;
use crate::stages::magnetic_circuit::NoLoadCircuit;
use crate::stages::winding::{self, WindingFactors};
use crate::stages::{require_finite, require_positive};
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impedances {
    pub conductor_area_mm2: f64,
    pub coil_span_mm: f64,
    pub end_projection_mm: f64,
    pub mean_turn_length_mm: f64,
    pub end_axial_projection_mm: f64,
    pub end_length_mm: f64,
    pub stator_resistance_ohm: f64,
    pub reactance_coefficient: f64,
    pub stator_slot_reactance_ohm: f64,
    pub stator_differential_reactance_ohm: f64,
    pub stator_end_reactance_ohm: f64,
    pub skew_reactance_ohm: f64,
    pub stator_leakage_reactance_ohm: f64,
    pub bar_resistance_ohm: f64,
    pub ring_resistance_ohm: f64,
    pub rotor_resistance_ohm: f64,
    pub rotor_slot_permeance: f64,
    pub rotor_slot_reactance_ohm: f64,
    pub rotor_differential_reactance_ohm: f64,
    pub rotor_end_reactance_ohm: f64,
    pub rotor_leakage_reactance_ohm: f64,
}

/// Copper resistivity in Ω·mm²/m at `temperature_c`.
pub fn copper_resistivity(temperature_c: f64) -> f64 {
    0.0175 * (1.0 + 0.004 * (temperature_c - 15.0))
}

/// Cast aluminium resistivity in Ω·mm²/m at `temperature_c`.
pub fn aluminium_resistivity(temperature_c: f64) -> f64 {
    0.035 * (1.0 + 0.004 * (temperature_c - 15.0))
}

/// Total copper cross-section of one conductor.
pub(crate) fn conductor_area_mm2(p: &MotorDesignParameters) -> f64 {
    let w = &p.winding;
    f64::from(w.strands_primary) * PI * w.wire_diameter_primary_mm.powi(2) / 4.0
        + f64::from(w.strands_secondary) * PI * w.wire_diameter_secondary_mm.powi(2) / 4.0
}

/// Upper and lower slot leakage factors for a chorded winding.
pub fn chording_factors(pitch_ratio: f64) -> (f64, f64) {
    let beta = if pitch_ratio > 1.0 {
        2.0 - pitch_ratio
    } else {
        pitch_ratio
    };
    if beta >= 2.0 / 3.0 {
        ((3.0 * beta + 1.0) / 4.0, (9.0 * beta + 7.0) / 16.0)
    } else if beta > 1.0 / 3.0 {
        ((6.0 * beta - 1.0) / 4.0, (18.0 * beta + 1.0) / 16.0)
    } else {
        (0.75 * beta, (9.0 * beta + 4.0) / 16.0)
    }
}

/// End-winding slope factor.
fn end_slope_factor(p: &MotorDesignParameters, tooth_width_mm: f64) -> DesignResult<f64> {
    if p.winding.layout.is_double_layer() {
        let span = p.stator_slot.width_mm + 2.0 * p.stator_slot.bottom_radius_mm;
        let ratio = span / (span + 2.0 * tooth_width_mm);
        let radicand = 1.0 - ratio * ratio;
        if radicand <= 0.0 {
            return Err(DesignError::domain(
                Stage::Impedance,
                format!("end-winding slope radicand must be positive (got {radicand})"),
            ));
        }
        Ok(1.0 / radicand.sqrt() / 2.0)
    } else {
        Ok(match p.ratings.pole_pairs {
            1 => 0.58,
            2 | 3 => 0.6,
            _ => 0.625,
        })
    }
}

/// Differential (harmonic) leakage reactance for `slots` slots.
fn differential_reactance(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    circuit: &NoLoadCircuit,
    slots: u32,
    coefficient: f64,
) -> f64 {
    let ratio = 2.0 * f64::from(p.ratings.pole_pairs) / f64::from(slots);
    let harmonic_sum = PI * PI * ratio * ratio / 12.0;
    f64::from(p.ratings.phases) * basic.pole_pitch_mm * harmonic_sum
        / (PI * PI * circuit.gap_factor * p.core.airgap_mm * circuit.tooth_saturation_factor)
        * coefficient
}

pub fn compute(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    winding: &WindingFactors,
    geometry: &Geometry,
    circuit: &NoLoadCircuit,
) -> DesignResult<Impedances> {
    let s = &p.stator_slot;
    let w = &p.winding;
    let m = f64::from(p.ratings.phases);
    let pole_pairs = f64::from(p.ratings.pole_pairs);
    let la = p.core.core_length_mm;
    let lef = geometry.effective_length_mm;
    let kdp = winding.winding_factor;
    let turns = winding.turns_per_phase;
    let t = p.operating.temperature_c;

    // Stator winding lengths and resistance.
    let slope = end_slope_factor(p, geometry.stator_tooth_width_mm)?;
    let hs1 = geometry.stator_shoulder_height_mm;
    let mut coil_span_mm = PI / 2.0 / pole_pairs
        * (p.core.stator_bore_mm
            + 2.0 * (s.opening_height_mm + hs1)
            + s.body_height_mm
            - hs1
            + s.bottom_radius_mm);
    if matches!(
        w.layout,
        WindingLayout::SingleLayerConcentric | WindingLayout::SingleLayerCrossover
    ) {
        coil_span_mm *= 0.85;
    }
    let end_projection_mm = slope * coil_span_mm;
    let mean_turn_length_mm = 2.0 * (la + 2.0 * (w.end_extension_mm + end_projection_mm));
    let slot_span = s.width_mm + 2.0 * s.bottom_radius_mm;
    let end_axial_projection_mm =
        end_projection_mm * slot_span / (slot_span + 2.0 * geometry.stator_tooth_width_mm);
    let end_length_mm = 2.0 * (w.end_extension_mm + end_projection_mm);

    let conductor_area_mm2 = require_positive(
        Stage::Impedance,
        "conductor cross-section",
        conductor_area_mm2(p),
    )?;
    let stator_resistance_ohm = copper_resistivity(t) * mean_turn_length_mm * turns
        / (f64::from(w.parallel_branches) * conductor_area_mm2 * 1000.0);

    let reactance_coefficient = (4.0 * PI).powi(2)
        * 1e-10
        * p.ratings.frequency_hz
        * lef
        * (turns * kdp).powi(2)
        / pole_pairs;
    let cx = reactance_coefficient;

    // Stator leakage reactances.
    let upper = s.opening_height_mm / s.opening_width_mm
        + 2.0 * hs1 / (s.opening_width_mm + s.width_mm);
    let lower = 2.0 * s.body_height_mm / (s.opening_width_mm + s.width_mm);
    let (ku, kl) = chording_factors(winding::pitch_ratio(p));
    let q1 = f64::from(p.core.stator_slots);
    let stator_slot_reactance_ohm =
        la * m * 2.0 * pole_pairs * (ku * upper + kl * lower) / (lef * kdp * kdp * q1) * cx;
    let stator_differential_reactance_ohm =
        differential_reactance(p, basic, circuit, p.core.stator_slots, cx);
    let stator_end_reactance_ohm = match w.layout {
        WindingLayout::DoubleLayerLap => {
            1.2 * (w.end_extension_mm + 0.5 * end_axial_projection_mm) / lef * cx
        }
        WindingLayout::SingleLayerConcentric => {
            0.67 * (end_length_mm - 0.64 * coil_span_mm) / (lef * kdp * kdp) * cx
        }
        WindingLayout::SingleLayerCrossover => {
            0.47 * (end_length_mm - 0.64 * coil_span_mm) / (lef * kdp * kdp) * cx
        }
        WindingLayout::SingleLayerChain => 0.2 * end_length_mm / (lef * kdp * kdp) * cx,
    };
    let skew_reactance_ohm = match winding.skew_pitch_mm {
        Some(tsk) => {
            0.5 * (tsk / geometry.stator_slot_pitch_mm).powi(2) * stator_differential_reactance_ohm
        }
        None => 0.0,
    };
    let stator_leakage_reactance_ohm = stator_slot_reactance_ohm
        + stator_differential_reactance_ohm
        + stator_end_reactance_ohm
        + skew_reactance_ohm;

    // Rotor cage, referred to the stator.
    let referral = m * (2.0 * turns * kdp).powi(2) * 1e-4;
    let rho_al = aluminium_resistivity(t);
    let q2 = f64::from(p.core.rotor_slots);
    let bar_resistance_ohm =
        referral * (1.04 * la * rho_al * 10.0) / (geometry.rotor_slot_area_mm2 * q2);
    let ring_resistance_ohm = referral * (geometry.end_ring_diameter_mm * rho_al * 10.0)
        / (2.0 * PI * pole_pairs * pole_pairs * p.rotor_slot.end_ring_area_mm2);
    let rotor_resistance_ohm = bar_resistance_ohm + ring_resistance_ohm;

    let rotor_slot_permeance = specific_permeance(
        p.rotor_slot.profile,
        &SlotPermeanceGeometry::for_rotor_slot(&p.rotor_slot),
    )?;
    let rotor_slot_reactance_ohm =
        la * m * 2.0 * pole_pairs * rotor_slot_permeance * cx / (lef * q2);
    let rotor_differential_reactance_ohm =
        differential_reactance(p, basic, circuit, p.core.rotor_slots, cx);
    // The bar overhang term vanishes: bars end flush with the core.
    let rotor_end_reactance_ohm =
        0.757 / lef * (geometry.end_ring_diameter_mm / (2.0 * pole_pairs)) * cx;
    let rotor_leakage_reactance_ohm =
        rotor_slot_reactance_ohm + rotor_differential_reactance_ohm + rotor_end_reactance_ohm;

    require_finite(
        Stage::Impedance,
        &[
            ("stator resistance", stator_resistance_ohm),
            ("stator leakage reactance", stator_leakage_reactance_ohm),
            ("rotor resistance", rotor_resistance_ohm),
            ("rotor leakage reactance", rotor_leakage_reactance_ohm),
        ],
    )?;

    Ok(Impedances {
        conductor_area_mm2,
        coil_span_mm,
        end_projection_mm,
        mean_turn_length_mm,
        end_axial_projection_mm,
        end_length_mm,
        stator_resistance_ohm,
        reactance_coefficient,
        stator_slot_reactance_ohm,
        stator_differential_reactance_ohm,
        stator_end_reactance_ohm,
        skew_reactance_ohm,
        stator_leakage_reactance_ohm,
        bar_resistance_ohm,
        ring_resistance_ohm,
        rotor_resistance_ohm,
        rotor_slot_permeance,
        rotor_slot_reactance_ohm,
        rotor_differential_reactance_ohm,
        rotor_end_reactance_ohm,
        rotor_leakage_reactance_ohm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot_leakage::SlotProfile;
    use crate::stages::fixtures::{assert_close, reference};

    #[test]
    fn reference_impedances() {
        let z = reference().impedance;
        assert_close(z.stator_resistance_ohm, 0.213378, 1e-4);
        assert_close(z.stator_leakage_reactance_ohm, 0.653740, 1e-4);
        assert_close(z.stator_slot_reactance_ohm, 0.4639, 1e-3);
        assert_close(z.stator_differential_reactance_ohm, 0.0514, 2e-3);
        assert_close(z.stator_end_reactance_ohm, 0.1153, 1e-3);
        assert_close(z.skew_reactance_ohm, 0.0231, 3e-3);
        assert_close(z.rotor_resistance_ohm, 0.301708, 1e-4);
        assert_close(z.bar_resistance_ohm, 0.2052, 1e-3);
        assert_close(z.ring_resistance_ohm, 0.0965, 1e-3);
        assert_close(z.rotor_leakage_reactance_ohm, 0.250253, 1e-4);
        assert_close(z.rotor_slot_permeance, 0.7846, 1e-3);
        assert_close(z.mean_turn_length_mm, 749.3, 1e-4);
        assert_close(z.end_length_mm, 184.634, 1e-4);
        assert_close(z.end_axial_projection_mm, 42.2515, 1e-4);
    }

    #[test]
    fn stator_leakage_is_sum_of_parts() {
        let z = reference().impedance;
        assert_close(
            z.stator_leakage_reactance_ohm,
            z.stator_slot_reactance_ohm
                + z.stator_differential_reactance_ohm
                + z.stator_end_reactance_ohm
                + z.skew_reactance_ohm,
            1e-12,
        );
        assert_close(
            z.rotor_resistance_ohm,
            z.bar_resistance_ohm + z.ring_resistance_ohm,
            1e-12,
        );
    }

    #[test]
    fn chording_factor_branches() {
        assert_eq!(chording_factors(1.0), (1.0, 1.0));
        let (ku, kl) = chording_factors(0.5);
        assert_close(ku, 0.5, 1e-12);
        assert_close(kl, 10.0 / 16.0, 1e-12);
        let (ku, kl) = chording_factors(0.3);
        assert_close(ku, 0.225, 1e-12);
        assert_close(kl, 6.7 / 16.0, 1e-12);
        let (ku_long, kl_long) = chording_factors(1.2);
        let (ku_short, kl_short) = chording_factors(0.8);
        assert_close(ku_long, ku_short, 1e-12);
        assert_close(kl_long, kl_short, 1e-12);
    }

    #[test]
    fn slot_profile_changes_only_rotor_slot_reactance() {
        let up = reference();
        let mut p = up.params.clone();
        p.rotor_slot.profile = SlotProfile::Round;
        let z = compute(&p, &up.basic, &up.winding, &up.geometry, &up.circuit).unwrap();
        assert_eq!(z.stator_leakage_reactance_ohm, up.impedance.stator_leakage_reactance_ohm);
        assert_eq!(z.rotor_resistance_ohm, up.impedance.rotor_resistance_ohm);
        assert!(z.rotor_slot_reactance_ohm > up.impedance.rotor_slot_reactance_ohm);
    }

    #[test]
    fn resistivities_rise_with_temperature() {
        assert_close(copper_resistivity(75.0), 0.0175 * 1.24, 1e-12);
        assert!(aluminium_resistivity(100.0) > aluminium_resistivity(20.0));
    }
}
