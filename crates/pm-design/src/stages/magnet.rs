//! Stage 4: magnet properties at operating temperature.

use crate::error::{DesignResult, Stage};
use crate::params::{MagnetTopology, MotorDesignParameters};
use crate::stages::{require_finite, require_positive};
use pm_core::MU0;
use serde::{Deserialize, Serialize};

/// Reference temperature of the catalogue magnet data.
const CATALOGUE_TEMPERATURE_C: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnetState {
    pub remanence_t: f64,
    pub coercivity_a_per_m: f64,
    pub recoil_permeability: f64,
    /// Flux-carrying cross-section per pole.
    pub area_mm2: f64,
    pub volume_mm3: f64,
    pub mass_kg: f64,
    pub mmf_a: f64,
    /// Remanent flux per pole in T·mm².
    pub flux_t_mm2: f64,
}

pub fn compute(p: &MotorDesignParameters) -> DesignResult<MagnetState> {
    let m = &p.magnet;
    let dt = p.operating.temperature_c - CATALOGUE_TEMPERATURE_C;
    let k_b = 1.0 + m.material.remanence_temperature_coefficient() / 100.0 * dt;
    let k_h = 1.0 + m.material.coercivity_temperature_coefficient() / 100.0 * dt;

    let remanence_t = require_positive(Stage::Magnet, "hot remanence", k_b * m.remanence_t)?;
    let coercivity_a_per_m = require_positive(
        Stage::Magnet,
        "hot coercivity",
        k_h * m.coercivity_ka_per_m * 1000.0,
    )?;
    // Recoil permeability comes from the cold catalogue values.
    let recoil_permeability = m.remanence_t / (MU0 * m.coercivity_ka_per_m * 1000.0);

    let area_mm2 = match m.topology {
        MagnetTopology::Radial => m.width_mm * m.length_mm,
        MagnetTopology::Tangential => 2.0 * m.width_mm * m.length_mm,
    };
    let volume_mm3 =
        2.0 * f64::from(p.ratings.pole_pairs) * m.length_mm * m.width_mm * m.thickness_mm;
    let mass_kg = m.density_kg_per_m3 * volume_mm3 * 1e-9;
    let mmf_a = m.thickness_mm * coercivity_a_per_m / 1000.0;
    let flux_t_mm2 = area_mm2 * remanence_t;

    require_finite(
        Stage::Magnet,
        &[("recoil permeability", recoil_permeability), ("magnet mass", mass_kg)],
    )?;

    Ok(MagnetState {
        remanence_t,
        coercivity_a_per_m,
        recoil_permeability,
        area_mm2,
        volume_mm3,
        mass_kg,
        mmf_a,
        flux_t_mm2,
    })
}
