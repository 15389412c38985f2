//! Design parameter record.
//!
//! Lengths are in millimetres, angles in degrees and power in kilowatts, as
//! the field suffixes say. `Default` is the 15 kW, 4-pole reference design.

use crate::error::DesignError;
use crate::slot_leakage::SlotProfile;
use core::fmt;
use pm_steel::SteelGrade;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorDesignParameters {
    pub ratings: Ratings,
    pub core: CoreGeometry,
    pub stator_slot: StatorSlot,
    pub rotor_slot: RotorSlot,
    pub steel_grade: SteelGrade,
    pub winding: Winding,
    pub magnet: Magnet,
    pub operating: Operating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub rated_power_kw: f64,
    /// Line voltage.
    pub rated_voltage_v: f64,
    pub phases: u32,
    pub frequency_hz: f64,
    pub pole_pairs: u32,
    pub target_power_factor: f64,
    /// Fraction, not percent.
    pub target_efficiency: f64,
    /// Required pull-out torque multiple, checked against the torque-slip peak.
    pub pull_out_torque_ratio: f64,
    /// Upper limit on starting current as a multiple of rated current.
    pub starting_current_ratio_limit: f64,
    /// Required starting torque as a multiple of rated torque.
    pub starting_torque_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreGeometry {
    pub stator_outer_diameter_mm: f64,
    pub stator_bore_mm: f64,
    pub core_length_mm: f64,
    pub airgap_mm: f64,
    /// Equivalent gap added for the magnet bridge.
    pub magnet_gap_mm: f64,
    pub stator_slots: u32,
    pub rotor_slots: u32,
    pub rotor_inner_diameter_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatorSlot {
    pub opening_width_mm: f64,
    pub opening_height_mm: f64,
    pub width_mm: f64,
    pub shoulder_angle_deg: f64,
    pub bottom_radius_mm: f64,
    pub body_height_mm: f64,
    pub skewed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotorSlot {
    pub profile: SlotProfile,
    pub opening_width_mm: f64,
    pub opening_height_mm: f64,
    pub upper_width_mm: f64,
    pub lower_width_mm: f64,
    pub body_height_mm: f64,
    pub shoulder_angle_deg: f64,
    pub end_ring_area_mm2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winding {
    pub layout: WindingLayout,
    pub connection: Connection,
    pub parallel_branches: u32,
    pub conductors_per_slot: u32,
    pub strands_primary: u32,
    pub wire_diameter_primary_mm: f64,
    #[serde(default)]
    pub strands_secondary: u32,
    #[serde(default)]
    pub wire_diameter_secondary_mm: f64,
    /// Straight extension of the coil beyond the core.
    pub end_extension_mm: f64,
    /// Coil pitch in slots; only used by the double-layer layout.
    pub pitch_slots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnet {
    pub topology: MagnetTopology,
    pub material: MagnetMaterial,
    /// Remanence at 20 °C.
    pub remanence_t: f64,
    /// Coercivity at 20 °C.
    pub coercivity_ka_per_m: f64,
    pub thickness_mm: f64,
    pub width_mm: f64,
    pub length_mm: f64,
    pub density_kg_per_m3: f64,
    pub leakage_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operating {
    pub temperature_c: f64,
    pub mechanical_loss_pu: f64,
    pub stray_loss_pu: f64,
    /// q-axis reaction scale relative to the d-axis.
    pub quadrature_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    #[serde(alias = "Y")]
    Star,
    #[serde(alias = "D")]
    Delta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnetTopology {
    Radial,
    Tangential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnetMaterial {
    /// Sintered NdFeB.
    RareEarth,
    Ferrite,
}

impl MagnetMaterial {
    /// Reversible temperature coefficient of remanence, percent per kelvin.
    pub fn remanence_temperature_coefficient(self) -> f64 {
        match self {
            MagnetMaterial::RareEarth => -0.12,
            MagnetMaterial::Ferrite => -0.19,
        }
    }

    /// Reversible temperature coefficient of coercivity, percent per kelvin.
    pub fn coercivity_temperature_coefficient(self) -> f64 {
        match self {
            MagnetMaterial::RareEarth => -0.12,
            MagnetMaterial::Ferrite => 0.40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindingLayout {
    DoubleLayerLap,
    SingleLayerConcentric,
    SingleLayerCrossover,
    SingleLayerChain,
}

impl WindingLayout {
    pub const ALL: [WindingLayout; 4] = [
        WindingLayout::DoubleLayerLap,
        WindingLayout::SingleLayerConcentric,
        WindingLayout::SingleLayerCrossover,
        WindingLayout::SingleLayerChain,
    ];

    pub fn code(self) -> u8 {
        match self {
            WindingLayout::DoubleLayerLap => 0,
            WindingLayout::SingleLayerConcentric => 1,
            WindingLayout::SingleLayerCrossover => 2,
            WindingLayout::SingleLayerChain => 3,
        }
    }

    pub fn is_double_layer(self) -> bool {
        matches!(self, WindingLayout::DoubleLayerLap)
    }
}

impl TryFrom<u8> for WindingLayout {
    type Error = DesignError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        WindingLayout::ALL
            .into_iter()
            .find(|layout| layout.code() == code)
            .ok_or_else(|| DesignError::invalid("winding.layout", code, "expected code 0..=3"))
    }
}

impl fmt::Display for WindingLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindingLayout::DoubleLayerLap => "double-layer lap",
            WindingLayout::SingleLayerConcentric => "single-layer concentric",
            WindingLayout::SingleLayerCrossover => "single-layer crossover",
            WindingLayout::SingleLayerChain => "single-layer chain",
        };
        f.write_str(name)
    }
}

impl Default for MotorDesignParameters {
    fn default() -> Self {
        Self {
            ratings: Ratings::default(),
            core: CoreGeometry::default(),
            stator_slot: StatorSlot::default(),
            rotor_slot: RotorSlot::default(),
            steel_grade: SteelGrade::Dw315_50,
            winding: Winding::default(),
            magnet: Magnet::default(),
            operating: Operating::default(),
        }
    }
}

impl Default for Ratings {
    fn default() -> Self {
        Self {
            rated_power_kw: 15.0,
            rated_voltage_v: 380.0,
            phases: 3,
            frequency_hz: 50.0,
            pole_pairs: 2,
            target_power_factor: 0.95,
            target_efficiency: 0.935,
            pull_out_torque_ratio: 1.8,
            starting_current_ratio_limit: 9.0,
            starting_torque_ratio: 2.0,
        }
    }
}

impl Default for CoreGeometry {
    fn default() -> Self {
        Self {
            stator_outer_diameter_mm: 260.0,
            stator_bore_mm: 170.0,
            core_length_mm: 190.0,
            airgap_mm: 0.65,
            magnet_gap_mm: 0.15,
            stator_slots: 36,
            rotor_slots: 32,
            rotor_inner_diameter_mm: 60.0,
        }
    }
}

impl Default for StatorSlot {
    fn default() -> Self {
        Self {
            opening_width_mm: 3.8,
            opening_height_mm: 0.8,
            width_mm: 7.7,
            shoulder_angle_deg: 30.0,
            bottom_radius_mm: 5.1,
            body_height_mm: 15.2,
            skewed: true,
        }
    }
}

impl Default for RotorSlot {
    fn default() -> Self {
        Self {
            profile: SlotProfile::Pear,
            opening_width_mm: 2.0,
            opening_height_mm: 0.8,
            upper_width_mm: 6.4,
            lower_width_mm: 5.5,
            body_height_mm: 15.0,
            shoulder_angle_deg: 30.0,
            end_ring_area_mm2: 180.0,
        }
    }
}

impl Default for Winding {
    fn default() -> Self {
        Self {
            layout: WindingLayout::SingleLayerCrossover,
            connection: Connection::Star,
            parallel_branches: 1,
            conductors_per_slot: 13,
            strands_primary: 2,
            wire_diameter_primary_mm: 1.2,
            strands_secondary: 3,
            wire_diameter_secondary_mm: 1.25,
            end_extension_mm: 15.0,
            pitch_slots: 9,
        }
    }
}

impl Default for Magnet {
    fn default() -> Self {
        Self {
            topology: MagnetTopology::Radial,
            material: MagnetMaterial::RareEarth,
            remanence_t: 1.15,
            coercivity_ka_per_m: 875.0,
            thickness_mm: 5.3,
            width_mm: 110.0,
            length_mm: 190.0,
            density_kg_per_m3: 7400.0,
            leakage_factor: 1.28,
        }
    }
}

impl Default for Operating {
    fn default() -> Self {
        Self {
            temperature_c: 75.0,
            mechanical_loss_pu: 0.0107,
            stray_loss_pu: 0.015,
            quadrature_ratio: 0.36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_design() {
        let p = MotorDesignParameters::default();
        assert_eq!(p.ratings.rated_power_kw, 15.0);
        assert_eq!(p.core.stator_slots, 36);
        assert_eq!(p.rotor_slot.profile, SlotProfile::Pear);
        assert_eq!(p.steel_grade, SteelGrade::Dw315_50);
        assert_eq!(p.winding.layout, WindingLayout::SingleLayerCrossover);
        assert_eq!(p.winding.connection, Connection::Star);
    }

    #[test]
    fn winding_layout_codes() {
        for layout in WindingLayout::ALL {
            assert_eq!(WindingLayout::try_from(layout.code()).unwrap(), layout);
        }
        assert!(WindingLayout::try_from(4).is_err());
        assert!(WindingLayout::DoubleLayerLap.is_double_layer());
        assert!(!WindingLayout::SingleLayerChain.is_double_layer());
    }

    #[test]
    fn json_roundtrip_preserves_parameters() {
        let p = MotorDesignParameters::default();
        let text = serde_json::to_string(&p).unwrap();
        assert!(text.contains("\"rated_power_kw\":15.0"));
        assert!(text.contains("\"layout\":\"single_layer_crossover\""));
        let back: MotorDesignParameters = serde_json::from_str(&text).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn connection_accepts_short_alias() {
        let c: Connection = serde_json::from_str("\"Y\"").unwrap();
        assert_eq!(c, Connection::Star);
        let c: Connection = serde_json::from_str("\"delta\"").unwrap();
        assert_eq!(c, Connection::Delta);
    }
}
