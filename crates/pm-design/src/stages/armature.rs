//! Stage 7: armature reaction and synchronous reactances.

use crate::error::{DesignResult, Stage};
use crate::params::{MagnetTopology, MotorDesignParameters};
use crate::stages::basic::BasicQuantities;
use crate::stages::impedance::Impedances;
use crate::stages::magnet::MagnetState;
use crate::stages::magnetic_circuit::{NoLoadCircuit, field_form_factor, induced_emf};
use crate::stages::require_finite;
use crate::stages::winding::WindingFactors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmatureReaction {
    /// d-axis armature MMF at half rated current.
    pub armature_mmf_a: f64,
    pub demagnetising_ratio: f64,
    /// Magnet operating point under load.
    pub loaded_operating_point: f64,
    pub loaded_flux_wb: f64,
    pub loaded_emf_v: f64,
    pub d_axis_reaction_ohm: f64,
    pub q_axis_reaction_ohm: f64,
    pub d_axis_reactance_ohm: f64,
    pub q_axis_reactance_ohm: f64,
    pub d_axis_mmf_factor: f64,
    pub q_axis_mmf_factor: f64,
}

pub fn compute(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    winding: &WindingFactors,
    magnet: &MagnetState,
    circuit: &NoLoadCircuit,
    impedance: &Impedances,
) -> DesignResult<ArmatureReaction> {
    let m = f64::from(p.ratings.phases);
    let test_current = 0.5 * basic.rated_current_a;
    let armature_mmf_a = 0.45 * m * winding.turns_per_phase * winding.winding_factor * test_current
        / f64::from(p.ratings.pole_pairs);
    let demagnetising_ratio = match p.magnet.topology {
        MagnetTopology::Radial => armature_mmf_a / magnet.mmf_a,
        MagnetTopology::Tangential => 2.0 * armature_mmf_a / magnet.mmf_a,
    };

    let lambda_n = circuit.external_permeance_pu;
    let reduced = demagnetising_ratio / p.magnet.leakage_factor;
    let loaded_operating_point = lambda_n * (1.0 - reduced) / (lambda_n + 1.0);
    let loaded_flux_wb = (loaded_operating_point
        - (1.0 - loaded_operating_point) * circuit.leakage_permeance_pu)
        * magnet.flux_t_mm2
        * 1e-6;
    let loaded_emf_v = induced_emf(p, winding, loaded_flux_wb);

    let d_axis_reaction_ohm = ((circuit.back_emf_v - loaded_emf_v) / test_current).abs();
    let q_axis_reaction_ohm = p.operating.quadrature_ratio * d_axis_reaction_ohm;
    let x1 = impedance.stator_leakage_reactance_ohm;
    let kf = field_form_factor();

    require_finite(
        Stage::ArmatureReaction,
        &[
            ("loaded operating point", loaded_operating_point),
            ("d-axis reaction reactance", d_axis_reaction_ohm),
        ],
    )?;

    Ok(ArmatureReaction {
        armature_mmf_a,
        demagnetising_ratio,
        loaded_operating_point,
        loaded_flux_wb,
        loaded_emf_v,
        d_axis_reaction_ohm,
        q_axis_reaction_ohm,
        d_axis_reactance_ohm: d_axis_reaction_ohm + x1,
        q_axis_reactance_ohm: q_axis_reaction_ohm + x1,
        d_axis_mmf_factor: 1.0 / kf,
        q_axis_mmf_factor: p.operating.quadrature_ratio / kf,
    })
}
