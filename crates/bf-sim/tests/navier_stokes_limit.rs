//! Integration test: dissipative stresses approach their Navier-Stokes
//! values at late proper time, for either closure.

use bf_eos::Medium;
use bf_sim::{EvolutionSettings, Observable, RelaxationClosure, Sample, SampleLog, evolve};

fn bulk_deviation(sample: &Sample) -> f64 {
    (sample.get(Observable::BulkInverseReynolds)
        - sample.get(Observable::BulkNsInverseReynolds))
    .abs()
}

#[test]
fn stresses_relax_to_navier_stokes() {
    let medium = Medium::standard().unwrap();
    for closure in [RelaxationClosure::FixedMass, RelaxationClosure::Kinetic] {
        let settings = EvolutionSettings {
            tauf: 20.0,
            dtau: 0.02,
            steps_per_sample: 1,
            closure,
            ..EvolutionSettings::default()
        };
        let mut log = SampleLog::new();
        let summary = evolve(&medium, &settings, &mut log).unwrap();
        assert_eq!(summary.steps, 987);

        let last = log.samples.last().unwrap();
        let shear_ratio = last.get(Observable::ShearInverseReynolds)
            / last.get(Observable::ShearNsInverseReynolds);
        assert!(
            (shear_ratio - 1.0).abs() < 0.02,
            "{closure:?}: pi/pi_NS = {shear_ratio}"
        );

        // step 487 sits just below tau = 10 fm
        let mid = &log.samples[487];
        assert!((mid.tau - 9.99).abs() < 1e-9);
        assert!(
            bulk_deviation(last) < bulk_deviation(mid),
            "{closure:?}: bulk deviation grew from {} to {}",
            bulk_deviation(mid),
            bulk_deviation(last)
        );
        assert!(bulk_deviation(last) < 0.02);
    }
}
