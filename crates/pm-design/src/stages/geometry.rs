//! Stage 3: slot, tooth and yoke dimensions and stator iron volumes.

use crate::error::{DesignResult, Stage};
use crate::params::{MagnetTopology, MotorDesignParameters};
use crate::stages::{STACKING_FACTOR, effective_length_mm, require_finite, require_positive};
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub effective_length_mm: f64,
    pub stator_slot_pitch_mm: f64,
    pub rotor_outer_diameter_mm: f64,
    pub rotor_slot_pitch_mm: f64,
    pub stator_shoulder_height_mm: f64,
    pub stator_tooth_width_mm: f64,
    pub stator_yoke_height_mm: f64,
    pub stator_tooth_path_mm: f64,
    pub stator_yoke_path_mm: f64,
    pub rotor_shoulder_height_mm: f64,
    pub rotor_lower_height_mm: f64,
    pub rotor_slot_height_mm: f64,
    pub rotor_slot_area_mm2: f64,
    pub rotor_yoke_height_mm: f64,
    pub rotor_tooth_width_mm: f64,
    pub end_ring_diameter_mm: f64,
    pub rotor_yoke_path_mm: f64,
    pub stator_tooth_volume_mm3: f64,
    pub stator_yoke_volume_mm3: f64,
}

pub fn compute(p: &MotorDesignParameters) -> DesignResult<Geometry> {
    let c = &p.core;
    let s = &p.stator_slot;
    let r = &p.rotor_slot;
    let q1 = f64::from(c.stator_slots);
    let q2 = f64::from(c.rotor_slots);
    let pole_pairs = f64::from(p.ratings.pole_pairs);

    let stator_slot_pitch_mm = PI * c.stator_bore_mm / q1;
    let rotor_outer_diameter_mm = c.stator_bore_mm - 2.0 * c.airgap_mm;
    let rotor_slot_pitch_mm = PI * rotor_outer_diameter_mm / q2;

    let stator_shoulder_height_mm =
        (s.width_mm - s.opening_width_mm) / 2.0 * s.shoulder_angle_deg.to_radians().tan();
    let stator_tooth_width_mm = require_positive(
        Stage::Geometry,
        "stator tooth width",
        PI * (c.stator_bore_mm + 2.0 * (s.opening_height_mm + s.body_height_mm)) / q1
            - 2.0 * s.bottom_radius_mm,
    )?;
    let stator_yoke_height_mm = require_positive(
        Stage::Geometry,
        "stator yoke height",
        (c.stator_outer_diameter_mm - c.stator_bore_mm) / 2.0
            - (s.opening_height_mm + s.body_height_mm + 2.0 * s.bottom_radius_mm / 3.0),
    )?;
    let stator_tooth_path_mm = s.body_height_mm + s.bottom_radius_mm / 3.0;
    let stator_yoke_path_mm =
        PI * (c.stator_outer_diameter_mm - stator_yoke_height_mm) / (4.0 * pole_pairs);

    let rotor_shoulder_height_mm =
        (r.upper_width_mm - r.opening_width_mm) * r.shoulder_angle_deg.to_radians().tan() / 2.0;
    let rotor_lower_height_mm = r.body_height_mm - rotor_shoulder_height_mm;
    let rotor_slot_height_mm = r.opening_height_mm + r.body_height_mm;
    let rotor_slot_area_mm2 = require_positive(
        Stage::Geometry,
        "rotor slot area",
        (r.opening_width_mm + r.upper_width_mm) * rotor_shoulder_height_mm / 2.0
            + (r.upper_width_mm + r.lower_width_mm) * rotor_lower_height_mm / 2.0,
    )?;

    let rotor_yoke_height_mm = require_positive(
        Stage::Geometry,
        "rotor yoke height",
        match p.magnet.topology {
            MagnetTopology::Radial => {
                (rotor_outer_diameter_mm - c.rotor_inner_diameter_mm) / 2.0
                    - rotor_slot_height_mm
                    - p.magnet.thickness_mm
            }
            MagnetTopology::Tangential => p.magnet.width_mm,
        },
    )?;
    let rotor_tooth_width_mm = require_positive(
        Stage::Geometry,
        "rotor tooth width",
        PI * (rotor_outer_diameter_mm - 2.0 * (r.opening_height_mm + r.body_height_mm)) / q2
            - r.lower_width_mm,
    )?;
    let end_ring_diameter_mm = require_positive(
        Stage::Geometry,
        "end ring diameter",
        rotor_outer_diameter_mm - rotor_slot_height_mm - 2.0,
    )?;
    let rotor_yoke_path_mm =
        PI * (c.rotor_inner_diameter_mm + rotor_yoke_height_mm) / (4.0 * pole_pairs);

    let stator_tooth_volume_mm3 =
        q1 * c.core_length_mm * STACKING_FACTOR * stator_tooth_path_mm * stator_tooth_width_mm;
    let stator_yoke_volume_mm3 = PI
        * (c.stator_outer_diameter_mm - stator_yoke_height_mm)
        * c.core_length_mm
        * STACKING_FACTOR
        * stator_yoke_height_mm;

    require_finite(
        Stage::Geometry,
        &[
            ("stator shoulder height", stator_shoulder_height_mm),
            ("rotor shoulder height", rotor_shoulder_height_mm),
        ],
    )?;

    Ok(Geometry {
        effective_length_mm: effective_length_mm(c.core_length_mm, c.airgap_mm),
        stator_slot_pitch_mm,
        rotor_outer_diameter_mm,
        rotor_slot_pitch_mm,
        stator_shoulder_height_mm,
        stator_tooth_width_mm,
        stator_yoke_height_mm,
        stator_tooth_path_mm,
        stator_yoke_path_mm,
        rotor_shoulder_height_mm,
        rotor_lower_height_mm,
        rotor_slot_height_mm,
        rotor_slot_area_mm2,
        rotor_yoke_height_mm,
        rotor_tooth_width_mm,
        end_ring_diameter_mm,
        rotor_yoke_path_mm,
        stator_tooth_volume_mm3,
        stator_yoke_volume_mm3,
    })
}
