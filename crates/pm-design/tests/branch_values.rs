//! Pinned results for the non-reference branches: winding layouts, magnet
//! topology and material, rotor slot profiles and delta connection.

use pm_design::{
    Connection, DesignReport, MagnetMaterial, MagnetTopology, MotorDesignParameters, SlotProfile,
    WindingLayout, calculate,
};

fn run(edit: impl FnOnce(&mut MotorDesignParameters)) -> DesignReport {
    let mut params = MotorDesignParameters::default();
    edit(&mut params);
    let report = calculate(&params).unwrap();
    assert!(report.convergence.converged);
    report
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-6 * expected.abs(),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn winding_layout_sets_end_winding_terms() {
    let cases = [
        (WindingLayout::DoubleLayerLap, 0.642_943_625_372_253_8, 0.228_407_520_862_308_28),
        (WindingLayout::SingleLayerConcentric, 0.702_815_915_328_748_9, 0.213_377_889_984_713_8),
        (WindingLayout::SingleLayerCrossover, 0.653_739_713_551_679_4, 0.213_377_889_984_713_8),
        (WindingLayout::SingleLayerChain, 0.640_212_597_781_830_9, 0.228_920_353_016_371_87),
    ];
    for (layout, x1, rs) in cases {
        let report = run(|p| p.winding.layout = layout);
        let z = &report.state.impedance;
        assert_close(z.stator_leakage_reactance_ohm, x1);
        assert_close(z.stator_resistance_ohm, rs);
    }
}

#[test]
fn tangential_magnets_change_operating_point_and_reaction() {
    let report = run(|p| p.magnet.topology = MagnetTopology::Tangential);
    assert_close(report.state.no_load.operating_point, 0.111_039_450_876_024_72);
    assert_close(report.state.armature.d_axis_reaction_ohm, 1.644_212_371_642_524);
}

#[test]
fn ferrite_magnets_run_with_their_own_coefficients() {
    let report = run(|p| {
        p.magnet.material = MagnetMaterial::Ferrite;
        p.magnet.remanence_t = 0.4;
        p.magnet.coercivity_ka_per_m = 300.0;
    });
    assert_close(report.state.no_load.operating_point, 0.100_880_802_534_691_3);
    assert_close(report.state.no_load.back_emf_v, 10.438_479_190_397_851);
}

#[test]
fn rotor_leakage_reactance_per_slot_profile() {
    let cases = [
        (SlotProfile::Pear, 0.250_253_389_434_470_2),
        (SlotProfile::HalfPear, 0.621_938_399_269_269_6),
        (SlotProfile::Round, 0.287_489_733_249_851_4),
        (SlotProfile::InclinedShoulderRound, 0.819_552_099_624_797_5),
    ];
    for (profile, x2) in cases {
        let report = run(|p| p.rotor_slot.profile = profile);
        assert_close(report.state.impedance.rotor_leakage_reactance_ohm, x2);
    }
}

#[test]
fn delta_connection_at_line_voltage() {
    let report = run(|p| p.winding.connection = Connection::Delta);
    assert_close(report.state.basic.rated_current_a, 14.813_278_622_957_618);
    assert_close(report.state.starting.current_ratio, 27.756_924_267_895_442);
}
