//! Design run orchestration.

use crate::error::DesignResult;
use crate::params::MotorDesignParameters;
use crate::stages::actual::{self, ActualPerformance};
use crate::stages::armature::{self, ArmatureReaction};
use crate::stages::basic::{self, BasicQuantities};
use crate::stages::geometry::{self, Geometry};
use crate::stages::impedance::{self, Impedances};
use crate::stages::losses::{self, Losses};
use crate::stages::magnet::{self, MagnetState};
use crate::stages::magnetic_circuit::{self, CircuitSolveConfig, Convergence, NoLoadCircuit};
use crate::stages::masses::{self, Masses};
use crate::stages::starting::{self, Starting};
use crate::stages::winding::{self, WindingFactors};
use crate::validate::validate_parameters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Every quantity derived by a completed run, grouped by stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    pub basic: BasicQuantities,
    pub winding: WindingFactors,
    pub geometry: Geometry,
    pub magnet: MagnetState,
    pub no_load: NoLoadCircuit,
    pub impedance: Impedances,
    pub armature: ArmatureReaction,
    pub masses: Masses,
    pub losses: Losses,
    pub starting: Starting,
    pub actual: ActualPerformance,
}

/// Degraded-but-usable outcomes attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesignWarning {
    /// The no-load circuit ran out of rounds; the last iterate was kept.
    NotConverged {
        iterations: usize,
        last_relative_change: f64,
    },
    /// The power-angle arcsine argument left [-1, 1].
    PowerAngleUndefined { sine: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub parameters: MotorDesignParameters,
    pub state: DerivedState,
    pub convergence: Convergence,
    #[serde(default)]
    pub warnings: Vec<DesignWarning>,
}

/// Runs the eleven stages over one parameter record.
///
/// ```
/// use pm_design::{MotorDesignEngine, MotorDesignParameters};
///
/// let report = MotorDesignEngine::new(MotorDesignParameters::default())
///     .run()
///     .unwrap();
/// assert!(report.convergence.converged);
/// assert!(report.state.actual.efficiency > 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct MotorDesignEngine {
    params: MotorDesignParameters,
    config: CircuitSolveConfig,
}

impl MotorDesignEngine {
    pub fn new(params: MotorDesignParameters) -> Self {
        Self {
            params,
            config: CircuitSolveConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CircuitSolveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn parameters(&self) -> &MotorDesignParameters {
        &self.params
    }

    pub fn config(&self) -> &CircuitSolveConfig {
        &self.config
    }

    /// Validates the inputs and runs every stage in order.
    pub fn run(self) -> DesignResult<DesignReport> {
        let p = &self.params;
        info!(
            power_kw = p.ratings.rated_power_kw,
            steel = %p.steel_grade,
            slot = %p.rotor_slot.profile,
            "starting design run"
        );
        validate_parameters(p)?;
        self.config.validate()?;

        let basic = basic::compute(p)?;
        debug!(
            current_a = basic.rated_current_a,
            torque_nm = basic.rated_torque_nm,
            "basic parameters"
        );
        let winding = winding::compute(p, &basic)?;
        debug!(
            turns = winding.turns_per_phase,
            kdp = winding.winding_factor,
            "winding"
        );
        let geometry = geometry::compute(p)?;
        debug!(
            tooth_mm = geometry.stator_tooth_width_mm,
            yoke_mm = geometry.stator_yoke_height_mm,
            "geometry"
        );
        let magnet = magnet::compute(p)?;
        debug!(br_t = magnet.remanence_t, mass_kg = magnet.mass_kg, "magnet");

        let (no_load, convergence) =
            magnetic_circuit::solve(p, &basic, &winding, &geometry, &magnet, &self.config)?;
        debug!(
            bm = no_load.operating_point,
            rounds = convergence.iterations,
            e0_v = no_load.back_emf_v,
            "no-load circuit"
        );

        let impedance = impedance::compute(p, &basic, &winding, &geometry, &no_load)?;
        debug!(
            rs = impedance.stator_resistance_ohm,
            x1 = impedance.stator_leakage_reactance_ohm,
            r2 = impedance.rotor_resistance_ohm,
            x2 = impedance.rotor_leakage_reactance_ohm,
            "impedances"
        );
        let armature = armature::compute(p, &basic, &winding, &magnet, &no_load, &impedance)?;
        debug!(
            xd = armature.d_axis_reactance_ohm,
            xq = armature.q_axis_reactance_ohm,
            "armature reaction"
        );
        let masses = masses::compute(p, &geometry, &magnet, &impedance)?;
        let losses = losses::compute(p, &basic, &geometry, &no_load, &impedance)?;
        debug!(total_w = losses.total_w, "losses");
        let starting = starting::compute(p, &basic, &impedance)?;
        debug!(
            current_ratio = starting.current_ratio,
            torque_ratio = starting.torque_ratio,
            "starting"
        );
        let actual = actual::compute(
            p, &basic, &winding, &no_load, &impedance, &armature, &losses,
        )?;

        let mut warnings = Vec::new();
        if !convergence.converged {
            warn!(
                rounds = convergence.iterations,
                change = convergence.last_relative_change,
                "no-load circuit did not converge; keeping last iterate"
            );
            warnings.push(DesignWarning::NotConverged {
                iterations: convergence.iterations,
                last_relative_change: convergence.last_relative_change,
            });
        }
        if actual.power_angle_deg.is_none() {
            warn!(sine = actual.power_angle_sine, "power angle undefined");
            warnings.push(DesignWarning::PowerAngleUndefined {
                sine: actual.power_angle_sine,
            });
        }

        info!(
            efficiency = actual.efficiency,
            total_loss_w = losses.total_w,
            warnings = warnings.len(),
            "design run complete"
        );

        Ok(DesignReport {
            parameters: self.params,
            state: DerivedState {
                basic,
                winding,
                geometry,
                magnet,
                no_load,
                impedance,
                armature,
                masses,
                losses,
                starting,
                actual,
            },
            convergence,
            warnings,
        })
    }
}

/// Runs a design with the default solver settings.
pub fn calculate(params: &MotorDesignParameters) -> DesignResult<DesignReport> {
    MotorDesignEngine::new(params.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DesignError, FailureKind};
    use crate::stages::magnetic_circuit::NonConvergencePolicy;

    #[test]
    fn reference_run_warns_about_power_angle_only() {
        let report = calculate(&MotorDesignParameters::default()).unwrap();
        assert!(report.convergence.converged);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            DesignWarning::PowerAngleUndefined { .. }
        ));
    }

    #[test]
    fn invalid_input_fails_before_any_stage() {
        let mut p = MotorDesignParameters::default();
        p.core.core_length_mm = 0.0;
        let err = calculate(&p).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidInput);
    }

    #[test]
    fn lenient_policy_reports_non_convergence() {
        let config = CircuitSolveConfig {
            max_iterations: 3,
            ..CircuitSolveConfig::default()
        };
        let report = MotorDesignEngine::new(MotorDesignParameters::default())
            .with_config(config)
            .run()
            .unwrap();
        assert!(!report.convergence.converged);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, DesignWarning::NotConverged { iterations: 3, .. })));
    }

    #[test]
    fn strict_policy_rejects_non_convergence() {
        let config = CircuitSolveConfig {
            max_iterations: 3,
            policy: NonConvergencePolicy::Reject,
            ..CircuitSolveConfig::default()
        };
        let err = MotorDesignEngine::new(MotorDesignParameters::default())
            .with_config(config)
            .run()
            .unwrap_err();
        assert!(matches!(err, DesignError::NonConvergence { iterations: 3, .. }));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = calculate(&MotorDesignParameters::default()).unwrap();
        let text = serde_json::to_string(&report).unwrap();
        assert!(text.contains("\"power_angle_undefined\""));
        let back: DesignReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.state.basic, report.state.basic);
    }
}
