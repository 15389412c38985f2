//! Stage 5: no-load magnetic circuit.
//!
//! The magnet operating point `bm` (per unit of remanence) is found by a
//! damped fixed-point iteration. Each round maps `bm` to section flux
//! densities, looks up the steel field strength of every iron section, sums
//! the magnetic potential drops around the circuit and returns a new
//! operating point `λn / (λn + 1)` from the external permeance. The next
//! guess is the mean of the old and new points.

use crate::error::{DesignError, DesignResult, Stage};
use crate::params::{MagnetTopology, MotorDesignParameters};
use crate::stages::basic::BasicQuantities;
use crate::stages::geometry::Geometry;
use crate::stages::magnet::MagnetState;
use crate::stages::winding::WindingFactors;
use crate::stages::{POLE_ARC_COEFFICIENT, STACKING_FACTOR, require_finite, require_positive};
use core::f64::consts::PI;
use pm_core::{MU0, relative_change};
use pm_steel::field_strength;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What to do when the round limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonConvergencePolicy {
    /// Keep the last iterate and flag the report.
    #[default]
    Report,
    /// Fail the run.
    Reject,
}

/// Fixed-point solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitSolveConfig {
    /// Maximum rounds
    pub max_iterations: usize,
    /// Relative change of the operating point that counts as converged
    pub rel_tol: f64,
    /// Initial guess as a fraction of the open-circuit estimate
    pub initial_scale: f64,
    pub policy: NonConvergencePolicy,
}

impl Default for CircuitSolveConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            rel_tol: 1e-4,
            initial_scale: 0.95,
            policy: NonConvergencePolicy::Report,
        }
    }
}

impl CircuitSolveConfig {
    pub fn validate(&self) -> DesignResult<()> {
        if self.max_iterations == 0 {
            return Err(DesignError::invalid(
                "solver.max_iterations",
                self.max_iterations,
                "must be at least 1",
            ));
        }
        if !(self.rel_tol.is_finite() && self.rel_tol > 0.0) {
            return Err(DesignError::invalid(
                "solver.rel_tol",
                self.rel_tol,
                "must be positive",
            ));
        }
        if !(self.initial_scale > 0.0 && self.initial_scale <= 1.0) {
            return Err(DesignError::invalid(
                "solver.initial_scale",
                self.initial_scale,
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Outcome of the fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    pub iterations: usize,
    pub converged: bool,
    pub last_relative_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoLoadCircuit {
    /// Carter factor of both slotted surfaces.
    pub gap_factor: f64,
    /// Converged magnet operating point, per unit of remanence.
    pub operating_point: f64,
    pub gap_flux_density_t: f64,
    pub stator_tooth_flux_density_t: f64,
    pub stator_yoke_flux_density_t: f64,
    pub rotor_tooth_flux_density_t: f64,
    pub rotor_yoke_flux_density_t: f64,
    pub gap_mmf_a: f64,
    pub stator_tooth_mmf_a: f64,
    pub stator_yoke_mmf_a: f64,
    pub rotor_tooth_mmf_a: f64,
    pub rotor_yoke_mmf_a: f64,
    pub total_mmf_a: f64,
    pub external_permeance_pu: f64,
    pub leakage_permeance_pu: f64,
    pub flux_wb: f64,
    pub fundamental_gap_flux_density_t: f64,
    pub back_emf_v: f64,
    pub tooth_saturation_factor: f64,
}

impl NoLoadCircuit {
    /// Section flux densities along the flux path, gap first.
    pub fn flux_density_profile(&self) -> [(&'static str, f64); 5] {
        [
            ("air gap", self.gap_flux_density_t),
            ("stator tooth", self.stator_tooth_flux_density_t),
            ("stator yoke", self.stator_yoke_flux_density_t),
            ("rotor tooth", self.rotor_tooth_flux_density_t),
            ("rotor yoke", self.rotor_yoke_flux_density_t),
        ]
    }
}

/// Carter factor of one slotted surface.
pub fn carter_factor(slot_pitch_mm: f64, airgap_mm: f64, opening_mm: f64) -> DesignResult<f64> {
    let t = slot_pitch_mm * (4.4 * airgap_mm + 0.75 * opening_mm);
    let denominator = require_positive(
        Stage::NoLoadCircuit,
        "gap factor denominator",
        t - opening_mm * opening_mm,
    )?;
    Ok(t / denominator)
}

/// Fundamental-to-mean ratio of the flat-topped gap field.
pub(crate) fn field_form_factor() -> f64 {
    4.0 / PI * (PI * POLE_ARC_COEFFICIENT / 2.0).sin()
}

/// Flux waveform factor used in the EMF equation.
pub(crate) fn flux_form_factor() -> f64 {
    8.0 / (PI * PI) / POLE_ARC_COEFFICIENT * (POLE_ARC_COEFFICIENT * PI / 2.0).sin()
}

/// EMF of a sinusoidally distributed flux `flux_wb` linking the winding.
pub(crate) fn induced_emf(
    p: &MotorDesignParameters,
    winding: &WindingFactors,
    flux_wb: f64,
) -> f64 {
    4.44 * p.ratings.frequency_hz
        * winding.turns_per_phase
        * winding.winding_factor
        * flux_wb
        * flux_form_factor()
}

struct Circuit<'a> {
    p: &'a MotorDesignParameters,
    pole_pitch_mm: f64,
    geometry: &'a Geometry,
    magnet: &'a MagnetState,
    gap_factor: f64,
}

/// One evaluation of the circuit at a trial operating point.
struct Round {
    flux_wb: f64,
    gap_b: f64,
    stator_tooth_b: f64,
    stator_yoke_b: f64,
    rotor_tooth_b: f64,
    rotor_yoke_b: f64,
    gap_mmf: f64,
    stator_tooth_mmf: f64,
    stator_yoke_mmf: f64,
    rotor_tooth_mmf: f64,
    rotor_yoke_mmf: f64,
    total_mmf: f64,
    main_permeance_pu: f64,
    external_permeance_pu: f64,
    next_operating_point: f64,
}

impl Circuit<'_> {
    fn evaluate(&self, bm: f64) -> DesignResult<Round> {
        let p = self.p;
        let g = self.geometry;
        let grade = p.steel_grade;
        let sigma = p.magnet.leakage_factor;
        let la = p.core.core_length_mm;
        let lef = g.effective_length_mm;

        let flux_wb = bm * self.magnet.flux_t_mm2 / sigma * 1e-6;
        let gap_b = flux_wb / (POLE_ARC_COEFFICIENT * self.pole_pitch_mm * lef) * 1e6;
        let stator_tooth_b = gap_b * g.stator_slot_pitch_mm * lef
            / (la * STACKING_FACTOR * g.stator_tooth_width_mm);
        let stator_yoke_b = flux_wb / (2.0 * la * STACKING_FACTOR * g.stator_yoke_height_mm) * 1e6;
        let rotor_tooth_b =
            gap_b * g.rotor_slot_pitch_mm * lef / (la * STACKING_FACTOR * g.rotor_tooth_width_mm);
        let rotor_yoke_b = flux_wb / (2.0 * la * STACKING_FACTOR * g.rotor_yoke_height_mm) * 1e6;

        // Table field strength is in A/cm, paths in mm.
        let stator_tooth_mmf = field_strength(stator_tooth_b, grade) * g.stator_tooth_path_mm / 10.0;
        let stator_yoke_mmf = field_strength(stator_yoke_b, grade) * g.stator_yoke_path_mm / 10.0;
        let rotor_tooth_mmf = field_strength(rotor_tooth_b, grade) * g.rotor_slot_height_mm / 10.0;
        let rotor_yoke_mmf = field_strength(rotor_yoke_b, grade) * g.rotor_yoke_path_mm / 10.0;
        let gap_mmf = gap_b / MU0
            * (p.core.magnet_gap_mm + p.core.airgap_mm * self.gap_factor)
            * 1e-3;

        let total_mmf = require_positive(
            Stage::NoLoadCircuit,
            "total magnetic potential drop",
            2.0 * (gap_mmf + stator_tooth_mmf + stator_yoke_mmf + rotor_tooth_mmf + rotor_yoke_mmf),
        )?;
        let permeance = flux_wb / total_mmf;
        let magnet_length_mm = match p.magnet.topology {
            MagnetTopology::Radial => 2.0 * p.magnet.thickness_mm,
            MagnetTopology::Tangential => p.magnet.thickness_mm,
        };
        let main_permeance_pu = permeance * magnet_length_mm * 1e-3
            / (self.magnet.recoil_permeability * MU0 * self.magnet.area_mm2 * 1e-6);
        let external_permeance_pu = sigma * main_permeance_pu;
        let next_operating_point = external_permeance_pu / (external_permeance_pu + 1.0);

        require_finite(
            Stage::NoLoadCircuit,
            &[
                ("air-gap flux density", gap_b),
                ("operating point", next_operating_point),
            ],
        )?;

        Ok(Round {
            flux_wb,
            gap_b,
            stator_tooth_b,
            stator_yoke_b,
            rotor_tooth_b,
            rotor_yoke_b,
            gap_mmf,
            stator_tooth_mmf,
            stator_yoke_mmf,
            rotor_tooth_mmf,
            rotor_yoke_mmf,
            total_mmf,
            main_permeance_pu,
            external_permeance_pu,
            next_operating_point,
        })
    }
}

/// Solves the no-load circuit for the magnet operating point.
pub fn solve(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    winding: &WindingFactors,
    geometry: &Geometry,
    magnet: &MagnetState,
    config: &CircuitSolveConfig,
) -> DesignResult<(NoLoadCircuit, Convergence)> {
    config.validate()?;

    let gap_factor = carter_factor(
        geometry.stator_slot_pitch_mm,
        p.core.airgap_mm,
        p.stator_slot.opening_width_mm,
    )? * carter_factor(
        geometry.rotor_slot_pitch_mm,
        p.core.airgap_mm,
        p.rotor_slot.opening_width_mm,
    )?;
    let circuit = Circuit {
        p,
        pole_pitch_mm: basic.pole_pitch_mm,
        geometry,
        magnet,
        gap_factor,
    };

    let sigma = p.magnet.leakage_factor;
    let hm = p.magnet.thickness_mm;
    let mut bm = config.initial_scale * sigma * hm / (sigma * hm + p.core.airgap_mm);

    let mut last: Option<Round> = None;
    let mut convergence = Convergence {
        iterations: 0,
        converged: false,
        last_relative_change: f64::INFINITY,
    };
    for iter in 0..config.max_iterations {
        let round = circuit.evaluate(bm)?;
        let change = relative_change(round.next_operating_point, bm);
        convergence.iterations = iter + 1;
        convergence.last_relative_change = change;
        trace!(round = iter + 1, bm, next = round.next_operating_point, change, "circuit round");

        if change < config.rel_tol {
            convergence.converged = true;
            last = Some(round);
            break;
        }
        bm = 0.5 * (bm + round.next_operating_point);
        last = Some(round);
    }
    let round = last.ok_or_else(|| {
        DesignError::invalid("solver.max_iterations", config.max_iterations, "no round was run")
    })?;

    if !convergence.converged && config.policy == NonConvergencePolicy::Reject {
        return Err(DesignError::NonConvergence {
            iterations: convergence.iterations,
            last_relative_change: convergence.last_relative_change,
        });
    }

    let operating_point = round.next_operating_point;
    let leakage_permeance_pu = (sigma - 1.0) * round.main_permeance_pu;
    let flux_wb = operating_point * magnet.flux_t_mm2 / sigma * 1e-6;
    let fundamental_gap_flux_density_t = field_form_factor() * round.flux_wb
        / (POLE_ARC_COEFFICIENT * basic.pole_pitch_mm * geometry.effective_length_mm)
        * 1e6;
    let back_emf_v = induced_emf(p, winding, flux_wb);

    let gap_only_mmf = require_positive(
        Stage::NoLoadCircuit,
        "air-gap magnetic potential drop",
        round.gap_b / MU0 * p.core.airgap_mm * gap_factor * 1e-3,
    )?;
    let tooth_saturation_factor =
        (gap_only_mmf + round.stator_tooth_mmf + round.rotor_tooth_mmf) / gap_only_mmf;

    require_finite(
        Stage::NoLoadCircuit,
        &[
            ("back EMF", back_emf_v),
            ("tooth saturation factor", tooth_saturation_factor),
        ],
    )?;

    Ok((
        NoLoadCircuit {
            gap_factor,
            operating_point,
            gap_flux_density_t: round.gap_b,
            stator_tooth_flux_density_t: round.stator_tooth_b,
            stator_yoke_flux_density_t: round.stator_yoke_b,
            rotor_tooth_flux_density_t: round.rotor_tooth_b,
            rotor_yoke_flux_density_t: round.rotor_yoke_b,
            gap_mmf_a: round.gap_mmf,
            stator_tooth_mmf_a: round.stator_tooth_mmf,
            stator_yoke_mmf_a: round.stator_yoke_mmf,
            rotor_tooth_mmf_a: round.rotor_tooth_mmf,
            rotor_yoke_mmf_a: round.rotor_yoke_mmf,
            total_mmf_a: round.total_mmf,
            external_permeance_pu: round.external_permeance_pu,
            leakage_permeance_pu,
            flux_wb,
            fundamental_gap_flux_density_t,
            back_emf_v,
            tooth_saturation_factor,
        },
        convergence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::fixtures::{assert_close, reference};
    use crate::stages::{basic, geometry, magnet, winding};

    #[test]
    fn reference_circuit_converges() {
        let up = reference();
        let c = &up.circuit;
        assert!(up.convergence.converged);
        assert_eq!(up.convergence.iterations, 10);
        assert!(up.convergence.last_relative_change < 1e-4);
        assert!(c.operating_point > 0.0 && c.operating_point < 1.0);
        assert_close(c.operating_point, 0.335151, 1e-4);
        assert_close(c.gap_flux_density_t, 0.35959, 1e-4);
        assert_close(c.fundamental_gap_flux_density_t, 0.386574, 1e-4);
        assert_close(c.stator_tooth_flux_density_t, 0.77754, 1e-4);
        assert_close(c.stator_yoke_flux_density_t, 0.64974, 1e-4);
        assert_close(c.rotor_tooth_flux_density_t, 0.81004, 1e-4);
        assert_close(c.rotor_yoke_flux_density_t, 0.50025, 1e-4);
        assert_close(c.back_emf_v, 103.989, 1e-4);
        assert_close(c.tooth_saturation_factor, 4.053, 1e-3);
        assert_close(c.external_permeance_pu, 0.504101, 1e-4);
        assert_close(c.leakage_permeance_pu, 0.110272, 1e-4);
        assert_close(c.flux_wb, 0.00587789, 1e-4);
    }

    #[test]
    fn total_mmf_is_twice_the_section_sum() {
        let c = reference().circuit;
        let sum = c.gap_mmf_a
            + c.stator_tooth_mmf_a
            + c.stator_yoke_mmf_a
            + c.rotor_tooth_mmf_a
            + c.rotor_yoke_mmf_a;
        assert_close(c.total_mmf_a, 2.0 * sum, 1e-12);
    }

    #[test]
    fn flux_density_profile_lists_sections() {
        let c = reference().circuit;
        let profile = c.flux_density_profile();
        assert_eq!(profile[0].0, "air gap");
        assert_eq!(profile[0].1, c.gap_flux_density_t);
        assert_eq!(profile[4].1, c.rotor_yoke_flux_density_t);
    }

    #[test]
    fn carter_factor_exceeds_one() {
        let k = carter_factor(14.8353, 0.65, 3.8).unwrap();
        assert!(k > 1.0);
        assert!(carter_factor(1.0, 0.1, 3.0).is_err());
    }

    fn solve_with(config: CircuitSolveConfig) -> DesignResult<(NoLoadCircuit, Convergence)> {
        let p = MotorDesignParameters::default();
        let b = basic::compute(&p).unwrap();
        let w = winding::compute(&p, &b).unwrap();
        let g = geometry::compute(&p).unwrap();
        let m = magnet::compute(&p).unwrap();
        solve(&p, &b, &w, &g, &m, &config)
    }

    #[test]
    fn exhausted_round_limit_is_reported_by_default() {
        let config = CircuitSolveConfig {
            max_iterations: 2,
            ..CircuitSolveConfig::default()
        };
        let (circuit, convergence) = solve_with(config).unwrap();
        assert!(!convergence.converged);
        assert_eq!(convergence.iterations, 2);
        assert!(circuit.operating_point > 0.0 && circuit.operating_point < 1.0);
    }

    #[test]
    fn exhausted_round_limit_is_rejected_under_strict_policy() {
        let config = CircuitSolveConfig {
            max_iterations: 2,
            policy: NonConvergencePolicy::Reject,
            ..CircuitSolveConfig::default()
        };
        match solve_with(config) {
            Err(DesignError::NonConvergence { iterations, .. }) => assert_eq!(iterations, 2),
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn zero_round_limit_is_invalid() {
        let config = CircuitSolveConfig {
            max_iterations: 0,
            ..CircuitSolveConfig::default()
        };
        assert!(matches!(solve_with(config), Err(DesignError::InvalidInput { .. })));
    }
}
