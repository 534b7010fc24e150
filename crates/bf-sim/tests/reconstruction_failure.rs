//! Integration test: a failing reconstruction aborts the run.
//!
//! Samples recorded before the failure stay in the sink and nothing is
//! recorded afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bf_core::StateVector;
use bf_core::units::GEV_TO_INVERSE_FM;
use bf_eos::Medium;
use bf_sim::{
    BjorkenModel, EvolutionSettings, InitialCondition, RelaxationClosure, SampleLog, SimError,
    evolve_model,
};
use bf_solver::{PrimitiveSolver, Primitives, Reconstruct, SolverError, SolverResult};

/// Delegates to the real solver until the `fail_at`-th call.
struct FailingReconstructor {
    inner: PrimitiveSolver,
    calls: AtomicUsize,
    fail_at: usize,
}

impl Reconstruct for FailingReconstructor {
    fn reconstruct(&self, x: &StateVector, tau: f64) -> SolverResult<Primitives> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_at {
            return Err(SolverError::ConvergenceFailed {
                what: "injected failure".to_string(),
            });
        }
        self.inner.reconstruct(x, tau)
    }
}

#[test]
fn reconstruction_failure_is_fatal() {
    let medium = Medium::standard().unwrap();
    let failing = FailingReconstructor {
        inner: PrimitiveSolver::new(medium.eos.clone()),
        calls: AtomicUsize::new(0),
        // initial sync, then two per Heun step: call 8 is the predictor
        // re-synchronization of the fourth step
        fail_at: 8,
    };
    let settings = EvolutionSettings {
        temperature: 0.5 * GEV_TO_INVERSE_FM,
        tau0: 0.25,
        tauf: 1.0,
        dtau: 0.01,
        steps_per_sample: 1,
        closure: RelaxationClosure::FixedMass,
        initial: InitialCondition::Equilibrium,
        ..EvolutionSettings::default()
    };
    let mut model = BjorkenModel::new(
        medium,
        settings.closure,
        settings.initial,
        settings.temperature,
    )
    .with_reconstructor(Arc::new(failing));

    let mut log = SampleLog::new();
    let err = evolve_model(&mut model, &settings, &mut log, None).unwrap_err();

    match err {
        SimError::Reconstruction { tau, message } => {
            assert!((tau - 0.29).abs() < 1e-12, "tau = {tau}");
            assert!(message.contains("injected failure"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // initial sample and steps 1..=3
    assert_eq!(log.samples.len(), 4);
    assert_eq!(log.samples.last().unwrap().step, 3);
}
