//! Order of accuracy of the fixed-step integrators.

use bf_core::units::GEV_TO_INVERSE_FM;
use bf_eos::Medium;
use bf_sim::{
    EvolutionSettings, IntegratorType, RelaxationClosure, SampleLog, SimOptions, SimResult,
    TransientModel, evolve, run_sim,
};

/// dy/dt = -y, y(0) = 1.
struct Decay;

impl TransientModel for Decay {
    type State = f64;
    type Aux = ();

    fn initial_state(&mut self, _t0: f64) -> SimResult<f64> {
        Ok(1.0)
    }

    fn rhs(&mut self, _t: f64, x: &f64, _aux: &()) -> SimResult<f64> {
        Ok(-x)
    }

    fn sync(&mut self, _t: f64, _x: &f64) -> SimResult<()> {
        Ok(())
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn scale(&self, a: &f64, scale: f64) -> f64 {
        a * scale
    }
}

fn decay_error(integrator: IntegratorType, dt: f64) -> f64 {
    let opts = SimOptions {
        t0: 0.0,
        dt,
        t_end: 1.0,
        record_every: 1,
        integrator,
        ..SimOptions::default()
    };
    let record = run_sim(&mut Decay, &opts).unwrap();
    let last = *record.x.last().unwrap();
    (last - (-1.0f64).exp()).abs()
}

#[test]
fn heun_is_second_order() {
    let ratio = decay_error(IntegratorType::Heun, 0.02) / decay_error(IntegratorType::Heun, 0.01);
    assert!(ratio > 3.8 && ratio < 4.2, "ratio = {ratio}");
}

#[test]
fn forward_euler_is_first_order() {
    let ratio = decay_error(IntegratorType::ForwardEuler, 0.02)
        / decay_error(IntegratorType::ForwardEuler, 0.01);
    assert!(ratio > 1.9 && ratio < 2.1, "ratio = {ratio}");
}

#[test]
fn bjorken_self_convergence() {
    let medium = Medium::standard().unwrap();
    let final_e = |dtau: f64| {
        let settings = EvolutionSettings {
            temperature: 0.5 * GEV_TO_INVERSE_FM,
            tau0: 0.25,
            tauf: 1.25,
            dtau,
            steps_per_sample: 1000,
            closure: RelaxationClosure::FixedMass,
            ..EvolutionSettings::default()
        };
        let mut log = SampleLog::new();
        evolve(&medium, &settings, &mut log)
            .unwrap()
            .final_primitives
            .e
    };

    let (e1, e2, e3) = (final_e(0.02), final_e(0.01), final_e(0.005));
    let ratio = (e1 - e2) / (e2 - e3);
    assert!(ratio > 3.0 && ratio < 5.5, "ratio = {ratio}");
}
