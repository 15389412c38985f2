//! Query helpers for presenting design reports.

use pm_design::characteristics::torque_slip_curve;
use pm_design::{DesignReport, DesignSummary, checks};
use pm_steel::{SteelCurve, SteelGrade};
use uom::si::angular_velocity::revolution_per_minute;
use uom::si::ratio::percent;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: &'static str,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: &str, value: f64, unit: &'static str) -> Self {
        self.rows.push(ReportRow {
            label: label.to_string(),
            value: format!("{value:.4}"),
            unit,
        });
        self
    }

    fn text(mut self, label: &str, value: String) -> Self {
        self.rows.push(ReportRow {
            label: label.to_string(),
            value,
            unit: "",
        });
        self
    }
}

/// All result groups of a report, in stage order.
pub fn report_sections(report: &DesignReport) -> Vec<ReportSection> {
    let s = &report.state;
    let summary = DesignSummary::from(s);
    let b = &s.basic;
    let w = &s.winding;
    let g = &s.geometry;
    let m = &s.magnet;
    let c = &s.no_load;
    let z = &s.impedance;
    let a = &s.armature;

    let mut no_load = ReportSection::new("No-load magnetic circuit")
        .text(
            "iterations",
            format!(
                "{} ({})",
                report.convergence.iterations,
                if report.convergence.converged {
                    "converged"
                } else {
                    "not converged"
                }
            ),
        )
        .row("operating point bm0", c.operating_point, "pu")
        .row("gap factor", c.gap_factor, "");
    for (label, value) in c.flux_density_profile() {
        no_load = no_load.text(label, format!("{value:.4} T"));
    }
    let no_load = no_load
        .row("fundamental gap flux density", c.fundamental_gap_flux_density_t, "T")
        .row("total MMF", c.total_mmf_a, "A")
        .row("external permeance", c.external_permeance_pu, "pu")
        .row("leakage permeance", c.leakage_permeance_pu, "pu")
        .row("flux per pole", c.flux_wb, "Wb")
        .row("back EMF E0", c.back_emf_v, "V")
        .row("tooth saturation factor", c.tooth_saturation_factor, "");

    let power_angle = match s.actual.power_angle_deg {
        Some(theta) => format!("{theta:.2} deg"),
        None => format!("undefined (sine {:.3})", s.actual.power_angle_sine),
    };

    vec![
        ReportSection::new("Basic parameters")
            .row("synchronous speed", b.synchronous_speed_rad_s, "rad/s")
            .row(
                "rated speed",
                summary.synchronous_speed.get::<revolution_per_minute>(),
                "rpm",
            )
            .row("phase voltage", b.phase_voltage_v, "V")
            .row("rated current", b.rated_current_a, "A")
            .row("rated torque", b.rated_torque_nm, "N·m")
            .row("pole pitch", b.pole_pitch_mm, "mm"),
        ReportSection::new("Winding")
            .row("turns per phase", w.turns_per_phase, "")
            .row("slots per pole per phase", w.slots_per_pole_per_phase, "")
            .row("pitch factor", w.pitch_factor, "")
            .row("distribution factor", w.distribution_factor, "")
            .row("skew factor", w.skew_factor, "")
            .row("winding factor", w.winding_factor, ""),
        ReportSection::new("Geometry")
            .row("stator slot pitch", g.stator_slot_pitch_mm, "mm")
            .row("rotor outer diameter", g.rotor_outer_diameter_mm, "mm")
            .row("stator tooth width", g.stator_tooth_width_mm, "mm")
            .row("stator yoke height", g.stator_yoke_height_mm, "mm")
            .row("rotor tooth width", g.rotor_tooth_width_mm, "mm")
            .row("rotor yoke height", g.rotor_yoke_height_mm, "mm")
            .row("rotor slot area", g.rotor_slot_area_mm2, "mm²")
            .row("end ring diameter", g.end_ring_diameter_mm, "mm"),
        ReportSection::new("Magnet")
            .row("remanence", m.remanence_t, "T")
            .row("coercivity", m.coercivity_a_per_m, "A/m")
            .row("recoil permeability", m.recoil_permeability, "")
            .row("area per pole", m.area_mm2, "mm²")
            .row("MMF", m.mmf_a, "A")
            .row("mass", m.mass_kg, "kg"),
        no_load,
        ReportSection::new("Impedances")
            .row("stator resistance Rs", z.stator_resistance_ohm, "Ω")
            .row("stator leakage X1", z.stator_leakage_reactance_ohm, "Ω")
            .row("rotor resistance R2", z.rotor_resistance_ohm, "Ω")
            .row("rotor leakage X2", z.rotor_leakage_reactance_ohm, "Ω")
            .row("rotor slot permeance", z.rotor_slot_permeance, "")
            .row("mean turn length", z.mean_turn_length_mm, "mm"),
        ReportSection::new("Armature reaction")
            .row("Xad", a.d_axis_reaction_ohm, "Ω")
            .row("Xaq", a.q_axis_reaction_ohm, "Ω")
            .row("Xd", a.d_axis_reactance_ohm, "Ω")
            .row("Xq", a.q_axis_reactance_ohm, "Ω")
            .row("Kad", a.d_axis_mmf_factor, "")
            .row("Kaq", a.q_axis_mmf_factor, "")
            .row("loaded operating point", a.loaded_operating_point, "pu"),
        ReportSection::new("Masses")
            .row("copper", s.masses.copper_kg, "kg")
            .row("steel", s.masses.steel_kg, "kg")
            .row("aluminium", s.masses.aluminium_kg, "kg")
            .row("magnet", s.masses.magnet_kg, "kg"),
        ReportSection::new("Losses")
            .row("copper", s.losses.copper_w, "W")
            .row("iron", s.losses.iron_w, "W")
            .row("mechanical", s.losses.mechanical_w, "W")
            .row("stray", s.losses.stray_w, "W")
            .row("total", s.losses.total_w, "W"),
        ReportSection::new("Starting")
            .row("starting current", s.starting.current_a, "A")
            .row("current ratio", s.starting.current_ratio, "")
            .row("torque ratio", s.starting.torque_ratio, ""),
        ReportSection::new("Rated-load performance")
            .row("efficiency", summary.efficiency.get::<percent>(), "%")
            .row("power factor", s.actual.power_factor, "")
            .row("power factor angle", s.actual.power_factor_angle_deg, "deg")
            .text("power angle", power_angle)
            .row("slot fill", 100.0 * s.actual.slot_fill, "%")
            .row("linear current density", s.actual.linear_current_density_a_per_mm, "A/mm")
            .row("current density", s.actual.current_density_a_per_mm2, "A/mm²")
            .row("thermal load", s.actual.thermal_load, "A²/mm³")
            .row("loaded magnet point", s.actual.loaded_magnet_point, "pu"),
        checks_section(report),
    ]
}

fn checks_section(report: &DesignReport) -> ReportSection {
    let mut section = ReportSection::new("Design targets");
    for check in checks::evaluate_targets(report) {
        let verdict = if check.passed { "ok" } else { "FAIL" };
        let op = match check.requirement {
            checks::Requirement::AtLeast => ">=",
            checks::Requirement::AtMost => "<=",
        };
        let value = format!("{:.4} {op} {:.4} {verdict}", check.actual, check.target);
        section = section.text(&check.name, value);
    }
    section
}

/// Torque–slip samples as CSV with a header line.
pub fn torque_slip_csv(report: &DesignReport, points: usize) -> AppResult<String> {
    let curve = torque_slip_curve(report, points)?;
    let mut out = String::from("slip,torque_nm,torque_pu\n");
    for pt in curve {
        out.push_str(&format!("{:.4},{:.6},{:.6}\n", pt.slip, pt.torque_nm, pt.torque_pu));
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteelRow {
    pub flux_density_t: f64,
    pub field_strength_a_per_cm: f64,
    pub specific_loss_w_per_kg: f64,
}

pub fn steel_table(grade: SteelGrade) -> Vec<SteelRow> {
    SteelCurve::for_grade(grade)
        .samples()
        .map(|(b, h, loss)| SteelRow {
            flux_density_t: b,
            field_strength_a_per_cm: h,
            specific_loss_w_per_kg: loss,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_design::{MotorDesignParameters, calculate};

    #[test]
    fn sections_cover_every_stage() {
        let report = calculate(&MotorDesignParameters::default()).unwrap();
        let sections = report_sections(&report);
        assert_eq!(sections.len(), 12);
        assert_eq!(sections[0].title, "Basic parameters");
        let rpm = &sections[0].rows[1];
        assert_eq!(rpm.value, "1500.0000");
        let perf = sections
            .iter()
            .find(|s| s.title == "Rated-load performance")
            .unwrap();
        let angle = perf.rows.iter().find(|r| r.label == "power angle").unwrap();
        assert!(angle.value.starts_with("undefined"));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let report = calculate(&MotorDesignParameters::default()).unwrap();
        let csv = torque_slip_csv(&report, 10).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "slip,torque_nm,torque_pu");
        assert!(lines[1].starts_with("0.0100,"));
        assert!(lines[10].starts_with("1.0000,"));
        assert!(torque_slip_csv(&report, 0).is_err());
    }

    #[test]
    fn steel_table_has_full_grid() {
        let rows = steel_table(SteelGrade::Dw315_50);
        assert_eq!(rows.len(), pm_steel::GRID_LEN);
        assert_eq!(rows[0].flux_density_t, 0.40);
        assert_eq!(rows[rows.len() - 1].flux_density_t, 2.20);
    }
}
