//! Parameter validation, run before the first stage.

use crate::error::{DesignError, DesignResult};
use crate::params::MotorDesignParameters;

pub fn validate_parameters(p: &MotorDesignParameters) -> DesignResult<()> {
    let r = &p.ratings;
    positive("ratings.rated_power_kw", r.rated_power_kw)?;
    positive("ratings.rated_voltage_v", r.rated_voltage_v)?;
    at_least_one("ratings.phases", r.phases)?;
    positive("ratings.frequency_hz", r.frequency_hz)?;
    at_least_one("ratings.pole_pairs", r.pole_pairs)?;
    fraction("ratings.target_power_factor", r.target_power_factor)?;
    fraction("ratings.target_efficiency", r.target_efficiency)?;
    positive("ratings.pull_out_torque_ratio", r.pull_out_torque_ratio)?;
    positive(
        "ratings.starting_current_ratio_limit",
        r.starting_current_ratio_limit,
    )?;
    positive("ratings.starting_torque_ratio", r.starting_torque_ratio)?;

    let c = &p.core;
    positive("core.stator_outer_diameter_mm", c.stator_outer_diameter_mm)?;
    positive("core.stator_bore_mm", c.stator_bore_mm)?;
    positive("core.core_length_mm", c.core_length_mm)?;
    positive("core.airgap_mm", c.airgap_mm)?;
    non_negative("core.magnet_gap_mm", c.magnet_gap_mm)?;
    at_least_one("core.stator_slots", c.stator_slots)?;
    at_least_one("core.rotor_slots", c.rotor_slots)?;
    positive("core.rotor_inner_diameter_mm", c.rotor_inner_diameter_mm)?;
    if c.stator_bore_mm >= c.stator_outer_diameter_mm {
        return Err(DesignError::invalid(
            "core.stator_bore_mm",
            c.stator_bore_mm,
            "must be smaller than the stator outer diameter",
        ));
    }
    let rotor_outer = c.stator_bore_mm - 2.0 * c.airgap_mm;
    if c.rotor_inner_diameter_mm >= rotor_outer {
        return Err(DesignError::invalid(
            "core.rotor_inner_diameter_mm",
            c.rotor_inner_diameter_mm,
            "must be smaller than the rotor outer diameter",
        ));
    }

    let s = &p.stator_slot;
    positive("stator_slot.opening_width_mm", s.opening_width_mm)?;
    positive("stator_slot.opening_height_mm", s.opening_height_mm)?;
    positive("stator_slot.width_mm", s.width_mm)?;
    angle("stator_slot.shoulder_angle_deg", s.shoulder_angle_deg)?;
    positive("stator_slot.bottom_radius_mm", s.bottom_radius_mm)?;
    positive("stator_slot.body_height_mm", s.body_height_mm)?;
    if s.opening_width_mm > s.width_mm {
        return Err(DesignError::invalid(
            "stator_slot.opening_width_mm",
            s.opening_width_mm,
            "must not exceed the slot width",
        ));
    }

    let rs = &p.rotor_slot;
    positive("rotor_slot.opening_width_mm", rs.opening_width_mm)?;
    positive("rotor_slot.opening_height_mm", rs.opening_height_mm)?;
    positive("rotor_slot.upper_width_mm", rs.upper_width_mm)?;
    positive("rotor_slot.lower_width_mm", rs.lower_width_mm)?;
    positive("rotor_slot.body_height_mm", rs.body_height_mm)?;
    angle("rotor_slot.shoulder_angle_deg", rs.shoulder_angle_deg)?;
    positive("rotor_slot.end_ring_area_mm2", rs.end_ring_area_mm2)?;
    if rs.opening_width_mm > rs.upper_width_mm {
        return Err(DesignError::invalid(
            "rotor_slot.opening_width_mm",
            rs.opening_width_mm,
            "must not exceed the upper slot width",
        ));
    }

    let w = &p.winding;
    at_least_one("winding.parallel_branches", w.parallel_branches)?;
    at_least_one("winding.conductors_per_slot", w.conductors_per_slot)?;
    at_least_one("winding.strands_primary", w.strands_primary)?;
    positive("winding.wire_diameter_primary_mm", w.wire_diameter_primary_mm)?;
    if w.strands_secondary > 0 {
        positive(
            "winding.wire_diameter_secondary_mm",
            w.wire_diameter_secondary_mm,
        )?;
    } else {
        non_negative(
            "winding.wire_diameter_secondary_mm",
            w.wire_diameter_secondary_mm,
        )?;
    }
    non_negative("winding.end_extension_mm", w.end_extension_mm)?;
    at_least_one("winding.pitch_slots", w.pitch_slots)?;

    let m = &p.magnet;
    positive("magnet.remanence_t", m.remanence_t)?;
    positive("magnet.coercivity_ka_per_m", m.coercivity_ka_per_m)?;
    positive("magnet.thickness_mm", m.thickness_mm)?;
    positive("magnet.width_mm", m.width_mm)?;
    positive("magnet.length_mm", m.length_mm)?;
    positive("magnet.density_kg_per_m3", m.density_kg_per_m3)?;
    positive("magnet.leakage_factor", m.leakage_factor)?;

    let o = &p.operating;
    finite("operating.temperature_c", o.temperature_c)?;
    non_negative("operating.mechanical_loss_pu", o.mechanical_loss_pu)?;
    non_negative("operating.stray_loss_pu", o.stray_loss_pu)?;
    positive("operating.quadrature_ratio", o.quadrature_ratio)?;

    Ok(())
}

fn finite(field: &str, value: f64) -> DesignResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DesignError::invalid(field, value, "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> DesignResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(DesignError::invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> DesignResult<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(DesignError::invalid(field, value, "must be non-negative"))
    }
}

fn fraction(field: &str, value: f64) -> DesignResult<()> {
    positive(field, value)?;
    if value <= 1.0 {
        Ok(())
    } else {
        Err(DesignError::invalid(field, value, "must be in (0, 1]"))
    }
}

fn angle(field: &str, value: f64) -> DesignResult<()> {
    non_negative(field, value)?;
    if value < 90.0 {
        Ok(())
    } else {
        Err(DesignError::invalid(field, value, "must be below 90 degrees"))
    }
}

fn at_least_one(field: &str, value: u32) -> DesignResult<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(DesignError::invalid(field, value, "must be at least 1"))
    }
}
