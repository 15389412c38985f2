//! Stage 9: loss breakdown at rated load.

use crate::error::{DesignResult, Stage};
use crate::params::MotorDesignParameters;
use crate::stages::basic::BasicQuantities;
use crate::stages::geometry::Geometry;
use crate::stages::impedance::Impedances;
use crate::stages::magnetic_circuit::NoLoadCircuit;
use crate::stages::require_finite;
use pm_steel::specific_loss;
use serde::{Deserialize, Serialize};

/// Empirical build factors on the tabulated specific loss.
const TOOTH_LOSS_FACTOR: f64 = 2.5;
const YOKE_LOSS_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Losses {
    pub copper_w: f64,
    pub iron_w: f64,
    pub mechanical_w: f64,
    pub stray_w: f64,
    pub total_w: f64,
}

pub fn compute(
    p: &MotorDesignParameters,
    basic: &BasicQuantities,
    geometry: &Geometry,
    circuit: &NoLoadCircuit,
    impedance: &Impedances,
) -> DesignResult<Losses> {
    let rated_w = p.ratings.rated_power_kw * 1000.0;
    let copper_w = f64::from(p.ratings.phases)
        * basic.rated_current_a.powi(2)
        * impedance.stator_resistance_ohm;

    // Specific loss is W/kg; volumes in mm³ carry the density scale.
    let grade = p.steel_grade;
    let tooth = specific_loss(circuit.stator_tooth_flux_density_t, grade);
    let yoke = specific_loss(circuit.stator_yoke_flux_density_t, grade);
    let iron_w = TOOTH_LOSS_FACTOR * geometry.stator_tooth_volume_mm3 * tooth / 1e6
        + YOKE_LOSS_FACTOR * geometry.stator_yoke_volume_mm3 * yoke / 1e6;

    let mechanical_w = p.operating.mechanical_loss_pu * rated_w;
    let stray_w = p.operating.stray_loss_pu * rated_w;
    let total_w = copper_w + iron_w + mechanical_w + stray_w;

    require_finite(Stage::Losses, &[("total loss", total_w)])?;

    Ok(Losses {
        copper_w,
        iron_w,
        mechanical_w,
        stray_w,
        total_w,
    })
}
