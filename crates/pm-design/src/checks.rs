//! Comparison of computed performance against the design targets.

use crate::characteristics::{peak_torque, torque_slip_curve};
use crate::engine::DesignReport;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    AtLeast,
    AtMost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCheck {
    pub name: String,
    pub requirement: Requirement,
    pub target: f64,
    pub actual: f64,
    pub passed: bool,
}

impl TargetCheck {
    fn new(name: &str, requirement: Requirement, target: f64, actual: f64) -> Self {
        let passed = match requirement {
            Requirement::AtLeast => actual >= target,
            Requirement::AtMost => actual <= target,
        };
        Self {
            name: name.to_string(),
            requirement,
            target,
            actual,
            passed,
        }
    }
}

impl fmt::Display for TargetCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.requirement {
            Requirement::AtLeast => ">=",
            Requirement::AtMost => "<=",
        };
        let verdict = if self.passed { "ok" } else { "FAIL" };
        write!(
            f,
            "{:<24} {:>10.4} {op} {:<10.4} {verdict}",
            self.name, self.actual, self.target
        )
    }
}

/// Slip samples used to locate the asynchronous pull-out torque.
const PULL_OUT_SAMPLES: usize = 200;

pub fn evaluate_targets(report: &DesignReport) -> Vec<TargetCheck> {
    let r = &report.parameters.ratings;
    let s = &report.state;
    let mut checks = vec![
        TargetCheck::new(
            "efficiency",
            Requirement::AtLeast,
            r.target_efficiency,
            s.actual.efficiency,
        ),
        TargetCheck::new(
            "power factor",
            Requirement::AtLeast,
            r.target_power_factor,
            s.actual.power_factor,
        ),
        TargetCheck::new(
            "starting current ratio",
            Requirement::AtMost,
            r.starting_current_ratio_limit,
            s.starting.current_ratio,
        ),
        TargetCheck::new(
            "starting torque ratio",
            Requirement::AtLeast,
            r.starting_torque_ratio,
            s.starting.torque_ratio,
        ),
    ];
    let peak = torque_slip_curve(report, PULL_OUT_SAMPLES)
        .ok()
        .and_then(|curve| peak_torque(&curve));
    if let Some(peak) = peak {
        checks.push(TargetCheck::new(
            "pull-out torque ratio",
            Requirement::AtLeast,
            r.pull_out_torque_ratio,
            peak.torque_pu,
        ));
    }
    checks
}

pub fn all_passed(checks: &[TargetCheck]) -> bool {
    checks.iter().all(|c| c.passed)
}
