//! Integration test: Bjorken cooling from T0 = 0.5 GeV.
//!
//! Checks the reference scenario and the engine invariants that hold at
//! every sample: fixed time grid, positivity, and primitives consistent
//! with the conserved state they were recovered from.

use bf_core::units::GEV_TO_INVERSE_FM;
use bf_eos::Medium;
use bf_sim::{
    BjorkenModel, EvolutionSettings, InitialCondition, Observable, RelaxationClosure, SampleLog,
    evolve, run_sim_with_observer,
};
use bf_solver::{PrimitiveSolver, Reconstruct};

fn reference_settings() -> EvolutionSettings {
    EvolutionSettings {
        temperature: 0.5 * GEV_TO_INVERSE_FM,
        tau0: 0.25,
        tauf: 1.0,
        dtau: 0.01,
        steps_per_sample: 10,
        closure: RelaxationClosure::FixedMass,
        initial: InitialCondition::Equilibrium,
        ..EvolutionSettings::default()
    }
}

#[test]
fn energy_density_decreases_monotonically() {
    let medium = Medium::standard().unwrap();
    let mut log = SampleLog::new();
    let summary = evolve(&medium, &reference_settings(), &mut log).unwrap();

    assert_eq!(summary.steps, 75);
    assert_eq!(summary.samples, 8);
    assert_eq!(log.samples.len(), 8);

    let e = log.series(Observable::EnergyDensity);
    assert_eq!(e[0].1, 1.0);
    for pair in e.windows(2) {
        assert!(pair[1].1 < pair[0].1, "e/e0 not decreasing: {pair:?}");
        assert!(pair[1].1 < 1.0);
    }
    // ideal Bjorken would give (0.25/0.95)^(4/3) ~ 0.17; viscosity slows the drop
    let last = e.last().unwrap().1;
    assert!(last > 0.2 && last < 0.35, "e/e0 = {last}");
}

#[test]
fn time_grid_is_exact() {
    let medium = Medium::standard().unwrap();
    let mut log = SampleLog::new();
    let settings = reference_settings();
    let summary = evolve(&medium, &settings, &mut log).unwrap();

    for sample in &log.samples {
        assert_eq!(sample.tau, settings.tau0 + sample.step as f64 * settings.dtau);
    }
    assert_eq!(summary.tau_final, 0.25 + 75.0 * 0.01);
}

#[test]
fn energy_and_relaxation_times_stay_positive() {
    let medium = Medium::standard().unwrap();
    for closure in [RelaxationClosure::FixedMass, RelaxationClosure::Kinetic] {
        let mut log = SampleLog::new();
        let settings = EvolutionSettings {
            closure,
            ..reference_settings()
        };
        evolve(&medium, &settings, &mut log).unwrap();
        for sample in &log.samples {
            assert!(sample.get(Observable::EnergyDensity) > 0.0);
            assert!(sample.get(Observable::TauPi) > 0.0);
            assert!(sample.get(Observable::TauBulk) > 0.0);
            // a large Navier-Stokes shear at tau0 can make P_L negative
            let ratio = sample.get(Observable::PressureRatio);
            assert!(ratio.is_finite() && ratio < 1.0, "PL/PT = {ratio}");
        }
    }
}

#[test]
fn final_primitives_match_final_state() {
    let medium = Medium::standard().unwrap();
    let mut log = SampleLog::new();
    let summary = evolve(&medium, &reference_settings(), &mut log).unwrap();

    let x = summary.final_state;
    let prims = summary.final_primitives;
    let forward = prims.tau_momentum(x.pi, x.bulk);
    assert!(forward.max_abs_diff(&x) < 1e-9 * x.ttt);

    let again = PrimitiveSolver::new(medium.eos.clone())
        .reconstruct(&x, summary.tau_final)
        .unwrap();
    assert!((again.e - prims.e).abs() < 1e-12 * prims.e);
}

#[test]
fn every_step_is_self_consistent_and_positive() {
    let medium = Medium::standard().unwrap();
    let solver = PrimitiveSolver::new(medium.eos.clone());
    for closure in [RelaxationClosure::FixedMass, RelaxationClosure::Kinetic] {
        let settings = EvolutionSettings {
            closure,
            steps_per_sample: 1,
            ..reference_settings()
        };
        let mut model = BjorkenModel::new(
            medium.clone(),
            closure,
            settings.initial,
            settings.temperature,
        );

        let mut checked = 0;
        run_sim_with_observer(&mut model, &settings.sim_options(), |snap| {
            let (x, prims) = (snap.x, snap.aux);
            assert!(prims.e > 0.0 && prims.p > 0.0, "step {}: {prims:?}", snap.step);

            let forward = prims.tau_momentum(x.pi, x.bulk);
            assert!(
                forward.max_abs_diff(x) < 1e-9 * x.ttt,
                "step {}: forward map drifted",
                snap.step
            );
            let again = solver.reconstruct(x, snap.t).unwrap();
            assert!((again.e - prims.e).abs() < 1e-12 * prims.e);

            checked += 1;
            Ok(())
        })
        .unwrap();
        // initial state plus 75 steps
        assert_eq!(checked, 76);
    }
}

#[test]
fn glasma_start_isotropizes() {
    let medium = Medium::standard().unwrap();
    for closure in [RelaxationClosure::FixedMass, RelaxationClosure::Kinetic] {
        let mut log = SampleLog::new();
        let settings = EvolutionSettings {
            closure,
            initial: InitialCondition::glasma(),
            ..reference_settings()
        };
        evolve(&medium, &settings, &mut log).unwrap();

        let ratio = log.series(Observable::PressureRatio);
        // P_L/P_T = 0.014925/1.4925 = 0.01 at tau0
        assert!((ratio[0].1 - 0.01).abs() < 1e-9);
        for pair in ratio.windows(2) {
            assert!(pair[1].1 > pair[0].1, "{closure:?}: {pair:?}");
        }
    }
}
