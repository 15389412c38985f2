//! Rotor slot specific leakage permeance for the supported slot profiles.

use crate::error::{DesignError, DesignResult, Stage};
use crate::params::RotorSlot;
use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Below this distance from 1 the width ratio is treated as a parallel slot.
const PARALLEL_RATIO_TOL: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotProfile {
    Pear,
    HalfPear,
    Round,
    InclinedShoulderRound,
}

impl SlotProfile {
    pub const ALL: [SlotProfile; 4] = [
        SlotProfile::Pear,
        SlotProfile::HalfPear,
        SlotProfile::Round,
        SlotProfile::InclinedShoulderRound,
    ];

    pub fn code(self) -> u8 {
        match self {
            SlotProfile::Pear => 1,
            SlotProfile::HalfPear => 2,
            SlotProfile::Round => 3,
            SlotProfile::InclinedShoulderRound => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlotProfile::Pear => "pear",
            SlotProfile::HalfPear => "half-pear",
            SlotProfile::Round => "round",
            SlotProfile::InclinedShoulderRound => "inclined-shoulder round",
        }
    }
}

impl fmt::Display for SlotProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for SlotProfile {
    type Error = DesignError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        SlotProfile::ALL
            .into_iter()
            .find(|profile| profile.code() == code)
            .ok_or_else(|| DesignError::invalid("rotor_slot.profile", code, "expected code 1..=4"))
    }
}

impl FromStr for SlotProfile {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', ' '], "-").to_ascii_lowercase();
        SlotProfile::ALL
            .into_iter()
            .find(|profile| profile.name().replace(' ', "-") == wanted)
            .ok_or_else(|| DesignError::invalid("rotor_slot.profile", s, "unknown slot profile"))
    }
}

/// Slot dimensions and shape terms consumed by [`specific_permeance`].
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPermeanceGeometry {
    pub opening_width_mm: f64,
    pub opening_height_mm: f64,
    pub body_height_mm: f64,
    pub top_width_mm: f64,
    pub bottom_width_mm: f64,
    pub half_height_mm: f64,
    pub shape_ratio: f64,
    pub coefficients: [f64; 3],
}

impl SlotPermeanceGeometry {
    /// Derives the permeance geometry of a rotor bar slot.
    pub fn for_rotor_slot(slot: &RotorSlot) -> Self {
        Self {
            opening_width_mm: slot.opening_width_mm,
            opening_height_mm: slot.opening_height_mm,
            body_height_mm: slot.body_height_mm,
            top_width_mm: slot.upper_width_mm,
            bottom_width_mm: slot.lower_width_mm,
            half_height_mm: slot.body_height_mm / 2.0,
            shape_ratio: 1.0,
            coefficients: [0.5, 0.3, 0.2],
        }
    }

    /// Bottom-to-top body width ratio.
    pub fn width_ratio(&self) -> f64 {
        self.bottom_width_mm / self.top_width_mm
    }

    fn opening_term(&self) -> f64 {
        self.opening_height_mm / self.opening_width_mm
    }
}

/// Dimensionless specific slot leakage permeance of `profile`.
pub fn specific_permeance(
    profile: SlotProfile,
    geom: &SlotPermeanceGeometry,
) -> DesignResult<f64> {
    if geom.opening_width_mm <= 0.0 || geom.top_width_mm <= 0.0 || geom.shape_ratio <= 0.0 {
        return Err(DesignError::domain(
            Stage::Impedance,
            "slot opening width, top width and shape ratio must be positive",
        ));
    }
    let q = geom.shape_ratio;
    let b12 = geom.width_ratio();
    let [k1, k2, k3] = geom.coefficients;
    let parallel = (b12 - 1.0).abs() <= PARALLEL_RATIO_TOL;

    let value = match profile {
        SlotProfile::Pear => {
            let body = if parallel {
                (4.0 * q.powi(3) / 3.0 + 3.0 * PI * q * q / 2.0 + 4.816 * q + 1.5377)
                    / (2.0 * q + PI / 2.0).powi(2)
            } else {
                q * (k1 + k2 + k3)
                    / (PI * (1.0 + b12 * b12) / (8.0 * q) + (1.0 + b12) / 2.0).powi(2)
            };
            body + geom.opening_term()
        }
        SlotProfile::HalfPear => {
            let d1 = geom.top_width_mm;
            let d2 = geom.bottom_width_mm;
            geom.body_height_mm / d1
                + 2.0 * geom.half_height_mm / (3.0 * (d1 + d2))
                + geom.opening_term()
        }
        SlotProfile::Round => 0.623 + geom.opening_term(),
        SlotProfile::InclinedShoulderRound => {
            let body = if parallel {
                (PI * PI * q / 16.0 + PI * q * q / 2.0 + 4.0 * q.powi(3) / 3.0)
                    / (2.0 * q + PI / 4.0).powi(2)
            } else {
                q * (k1 + k2) / (PI / (8.0 * q) + (1.0 + b12) / 2.0).powi(2)
            };
            body + geom.opening_term()
                + 2.0 * geom.body_height_mm / (geom.opening_width_mm + geom.top_width_mm)
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(DesignError::domain(
            Stage::Impedance,
            format!("{profile} slot permeance is not finite"),
        ))
    }
}
