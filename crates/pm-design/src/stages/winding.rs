//! Stage 2: turns per phase and winding factors.

use crate::error::{DesignResult, Stage};
use crate::params::MotorDesignParameters;
use crate::stages::basic::BasicQuantities;
use crate::stages::{require_finite, require_positive};
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingFactors {
    pub turns_per_phase: f64,
    pub slots_per_pole_per_phase: f64,
    /// Coil pitch over pole pitch; 1 for single-layer layouts.
    pub pitch_ratio: f64,
    pub pitch_factor: f64,
    pub distribution_factor: f64,
    /// Skew distance, present only for skewed slots.
    pub skew_pitch_mm: Option<f64>,
    pub skew_factor: f64,
    pub winding_factor: f64,
}

pub(crate) fn slots_per_pole_per_phase(p: &MotorDesignParameters) -> f64 {
    f64::from(p.core.stator_slots)
        / (2.0 * f64::from(p.ratings.phases) * f64::from(p.ratings.pole_pairs))
}

pub(crate) fn pitch_ratio(p: &MotorDesignParameters) -> f64 {
    if p.winding.layout.is_double_layer() {
        f64::from(p.winding.pitch_slots)
            / (f64::from(p.ratings.phases) * slots_per_pole_per_phase(p))
    } else {
        1.0
    }
}

/// Skew distance of one stator slot pitch corrected for pole pairs.
pub(crate) fn skew_pitch_mm(p: &MotorDesignParameters) -> f64 {
    let q1 = f64::from(p.core.stator_slots);
    let slot_pitch = PI * p.core.stator_bore_mm / q1;
    q1 * slot_pitch / (q1 + f64::from(p.ratings.pole_pairs))
}

pub fn compute(p: &MotorDesignParameters, basic: &BasicQuantities) -> DesignResult<WindingFactors> {
    let m = f64::from(p.ratings.phases);
    let turns_per_phase = f64::from(p.core.stator_slots) * f64::from(p.winding.conductors_per_slot)
        / (2.0 * m * f64::from(p.winding.parallel_branches));

    let q = slots_per_pole_per_phase(p);
    let beta = pitch_ratio(p);
    let pitch_factor = (beta * PI / 2.0).sin();
    let distribution_factor = (PI / (2.0 * m)).sin() / (q * (PI / (2.0 * m * q)).sin());

    let (skew_pitch_mm, skew_factor) = if p.stator_slot.skewed {
        let tsk = skew_pitch_mm(p);
        let alpha = PI * tsk / basic.pole_pitch_mm;
        (Some(tsk), 2.0 * (alpha / 2.0).sin() / alpha)
    } else {
        (None, 1.0)
    };

    let winding_factor = require_positive(
        Stage::Winding,
        "winding factor",
        pitch_factor * distribution_factor * skew_factor,
    )?;
    require_finite(
        Stage::Winding,
        &[
            ("turns per phase", turns_per_phase),
            ("distribution factor", distribution_factor),
        ],
    )?;

    Ok(WindingFactors {
        turns_per_phase,
        slots_per_pole_per_phase: q,
        pitch_ratio: beta,
        pitch_factor,
        distribution_factor,
        skew_pitch_mm,
        skew_factor,
        winding_factor,
    })
}
