//! Simulation runner and result recording.

use bf_core::numeric::step_count;

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Heun, Integrator};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Heun predictor-corrector (default, 2nd order, 2 rhs calls per step).
    #[default]
    Heun,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Initial time
    pub t0: f64,
    /// Fixed time step
    pub dt: f64,
    /// Final time
    pub t_end: f64,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: Heun)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            t0: 0.0,
            dt: 1e-2,
            t_end: 1.0,
            record_every: 10,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    /// Number of fixed steps the run takes; decided once, before stepping.
    pub fn steps(&self) -> usize {
        step_count(self.t_end - self.t0, self.dt)
    }

    /// Time after `step` steps, computed from `t0` rather than accumulated.
    pub fn time_at(&self, step: usize) -> f64 {
        self.t0 + step as f64 * self.dt
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.t0.is_finite() {
            return Err(SimError::InvalidArg {
                what: "t0 must be finite",
            });
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_end.is_finite() || self.t_end < self.t0 {
            return Err(SimError::InvalidArg {
                what: "t_end must not precede t0",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// One recorded point of a run, handed to the observer.
#[derive(Debug)]
pub struct Snapshot<'a, S, A> {
    /// Steps taken so far (0 for the initial state)
    pub step: usize,
    /// Total number of steps of the run
    pub steps: usize,
    pub t: f64,
    pub x: &'a S,
    pub aux: &'a A,
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

/// Outcome of a run driven through an observer.
#[derive(Clone, Debug)]
pub struct SimOutcome<S, A> {
    pub steps: usize,
    pub t: f64,
    pub x: S,
    pub aux: A,
}

/// Run a simulation and collect every recorded state.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    let mut record = SimRecord {
        t: Vec::new(),
        x: Vec::new(),
    };
    run_sim_with_observer(model, opts, |snap| {
        record.t.push(snap.t);
        record.x.push(snap.x.clone());
        Ok(())
    })?;
    Ok(record)
}

/// Run a simulation, calling `observer` on the initial state and then after
/// every `record_every`-th step.
///
/// An error from the model or the observer stops the run immediately; the
/// observer has already seen every snapshot recorded before the failure.
pub fn run_sim_with_observer<M, F>(
    model: &mut M,
    opts: &SimOptions,
    mut observer: F,
) -> SimResult<SimOutcome<M::State, M::Aux>>
where
    M: TransientModel,
    F: FnMut(&Snapshot<'_, M::State, M::Aux>) -> SimResult<()>,
{
    opts.validate()?;
    let steps = opts.steps();

    let mut t = opts.t0;
    let mut x = model.initial_state(t)?;
    let mut aux = model.sync(t, &x)?;
    observer(&Snapshot {
        step: 0,
        steps,
        t,
        x: &x,
        aux: &aux,
    })?;

    for i in 0..steps {
        let (x_new, aux_new) = match opts.integrator {
            IntegratorType::Heun => Heun.step(model, t, &x, &aux, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, &x, &aux, opts.dt)?,
        };
        x = x_new;
        aux = aux_new;
        t = opts.time_at(i + 1);

        if (i + 1) % opts.record_every == 0 {
            observer(&Snapshot {
                step: i + 1,
                steps,
                t,
                x: &x,
                aux: &aux,
            })?;
        }
    }

    Ok(SimOutcome { steps, t, x, aux })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant;

    impl TransientModel for Constant {
        type State = f64;
        type Aux = ();

        fn initial_state(&mut self, _t0: f64) -> SimResult<f64> {
            Ok(0.0)
        }

        fn rhs(&mut self, _t: f64, _x: &f64, _aux: &()) -> SimResult<f64> {
            Ok(1.0)
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

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 1e-2);
        assert_eq!(opts.record_every, 10);
        assert_eq!(opts.integrator, IntegratorType::Heun);
    }

    #[test]
    fn sim_options_invalid() {
        let bad_dt = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(bad_dt.validate().is_err());

        let backwards = SimOptions {
            t0: 2.0,
            t_end: 1.0,
            ..SimOptions::default()
        };
        assert!(backwards.validate().is_err());

        let no_cadence = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        assert!(matches!(
            run_sim(&mut Constant, &no_cadence),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn records_initial_and_every_kth_step() {
        let opts = SimOptions {
            t0: 0.25,
            dt: 0.01,
            t_end: 1.0,
            record_every: 10,
            ..SimOptions::default()
        };
        assert_eq!(opts.steps(), 75);
        let record = run_sim(&mut Constant, &opts).unwrap();
        // initial + steps 10, 20, ..., 70
        assert_eq!(record.t.len(), 8);
        assert_eq!(record.t[0], 0.25);
        assert_eq!(record.t[1], 0.25 + 10.0 * 0.01);
        assert!((record.x[7] - 0.70).abs() < 1e-12);
    }

    #[test]
    fn fine_long_runs_validate() {
        let opts = SimOptions {
            t0: 0.0,
            dt: 1e-7,
            t_end: 2.0,
            ..SimOptions::default()
        };
        assert!(opts.steps() > 10_000_000);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn time_is_not_accumulated() {
        let opts = SimOptions {
            t0: 0.1,
            dt: 0.1,
            t_end: 100.1,
            record_every: 1,
            ..SimOptions::default()
        };
        let outcome = run_sim_with_observer(&mut Constant, &opts, |_| Ok(())).unwrap();
        assert_eq!(outcome.steps, 1000);
        assert_eq!(outcome.t, 0.1 + 1000.0 * 0.1);
    }

    #[test]
    fn zero_span_runs_no_steps() {
        let opts = SimOptions {
            t0: 1.0,
            t_end: 1.0,
            ..SimOptions::default()
        };
        let record = run_sim(&mut Constant, &opts).unwrap();
        assert_eq!(record.t, vec![1.0]);
    }

    #[test]
    fn observer_error_stops_run() {
        let opts = SimOptions {
            record_every: 1,
            ..SimOptions::default()
        };
        let mut seen = 0;
        let err = run_sim_with_observer(&mut Constant, &opts, |snap| {
            seen += 1;
            if snap.step == 3 {
                return Err(SimError::Sink {
                    message: "full".into(),
                });
            }
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, SimError::Sink { .. }));
        assert_eq!(seen, 4);
    }
}
