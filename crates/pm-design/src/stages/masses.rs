//! Stage 8: active material masses.

use crate::error::{DesignResult, Stage};
use crate::params::MotorDesignParameters;
use crate::stages::geometry::Geometry;
use crate::stages::impedance::Impedances;
use crate::stages::magnet::MagnetState;
use crate::stages::require_finite;
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

/// Densities in g/cm³.
const COPPER_DENSITY: f64 = 8.9;
const STEEL_DENSITY: f64 = 7.8;
const ALUMINIUM_DENSITY: f64 = 2.7;
/// Allowance for insulation and leads on the bare copper mass.
const COPPER_ALLOWANCE: f64 = 1.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Masses {
    pub copper_kg: f64,
    pub steel_kg: f64,
    pub aluminium_kg: f64,
    pub magnet_kg: f64,
}

impl Masses {
    pub fn total_kg(&self) -> f64 {
        self.copper_kg + self.steel_kg + self.aluminium_kg + self.magnet_kg
    }
}

pub fn compute(
    p: &MotorDesignParameters,
    geometry: &Geometry,
    magnet: &MagnetState,
    impedance: &Impedances,
) -> DesignResult<Masses> {
    let la = p.core.core_length_mm;
    let turn_length_mm =
        2.0 * (la + 2.0 * (p.winding.end_extension_mm + impedance.end_length_mm / 2.0));
    let copper_kg = COPPER_ALLOWANCE
        * COPPER_DENSITY
        * f64::from(p.core.stator_slots)
        * f64::from(p.winding.conductors_per_slot)
        * turn_length_mm
        / 2.0
        * impedance.conductor_area_mm2
        * 1e-6;
    // Punched from square sheet with 5 mm margin.
    let steel_kg = STEEL_DENSITY
        * geometry.effective_length_mm
        * (p.core.stator_outer_diameter_mm + 5.0).powi(2)
        * 1e-6;
    let aluminium_kg = ALUMINIUM_DENSITY
        * (f64::from(p.core.rotor_slots) * geometry.rotor_slot_area_mm2 * la
            + 2.0 * p.rotor_slot.end_ring_area_mm2 * PI * geometry.end_ring_diameter_mm)
        * 1e-6;

    require_finite(
        Stage::Masses,
        &[("copper mass", copper_kg), ("aluminium mass", aluminium_kg)],
    )?;

    Ok(Masses {
        copper_kg,
        steel_kg,
        aluminium_kg,
        magnet_kg: magnet.mass_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::fixtures::{assert_close, reference};

    #[test]
    fn reference_masses() {
        let up = reference();
        let m = compute(&up.params, &up.geometry, &up.magnet, &up.impedance).unwrap();
        assert_close(m.copper_kg, 10.5179, 1e-4);
        assert_close(m.steel_kg, 104.7855, 1e-5);
        assert_close(m.aluminium_kg, 1.88943, 1e-4);
        assert_close(m.magnet_kg, 3.2788, 1e-4);
        assert_close(m.total_kg(), 10.5179 + 104.7855 + 1.88943 + 3.2788, 1e-4);
    }
}
