//! Proper-time evolution of a Bjorken fluid, sampled into a sink.

use bf_core::StateVector;
use bf_core::units::{GEV_TO_INVERSE_FM, to_gev};
use bf_eos::Medium;
use bf_solver::Primitives;
use tracing::{debug, info, warn};

use crate::bjorken::BjorkenModel;
use crate::closure::RelaxationClosure;
use crate::error::{SimError, SimResult};
use crate::initial::InitialCondition;
use crate::sample::{Observable, Sample, SampleSink};
use crate::sim::{IntegratorType, SimOptions, run_sim_with_observer};

/// Run parameters, natural units.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionSettings {
    /// Initial temperature [fm^-1]
    pub temperature: f64,
    /// [fm]
    pub tau0: f64,
    /// [fm]
    pub tauf: f64,
    /// [fm]
    pub dtau: f64,
    pub steps_per_sample: usize,
    pub closure: RelaxationClosure,
    pub initial: InitialCondition,
    pub integrator: IntegratorType,
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.5 * GEV_TO_INVERSE_FM,
            tau0: 0.25,
            tauf: 100.0,
            dtau: 0.01,
            steps_per_sample: 10,
            closure: RelaxationClosure::default(),
            initial: InitialCondition::default(),
            integrator: IntegratorType::default(),
        }
    }
}

impl EvolutionSettings {
    pub fn sim_options(&self) -> SimOptions {
        SimOptions {
            t0: self.tau0,
            dt: self.dtau,
            t_end: self.tauf,
            record_every: self.steps_per_sample,
            integrator: self.integrator,
            ..SimOptions::default()
        }
    }

    pub fn steps(&self) -> usize {
        self.sim_options().steps()
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(SimError::InvalidArg {
                what: "initial temperature must be positive",
            });
        }
        if !(self.tau0.is_finite() && self.tau0 > 0.0) {
            return Err(SimError::InvalidArg {
                what: "tau0 must be positive",
            });
        }
        self.sim_options().validate()
    }
}

/// Progress of a running evolution, reported at every sample.
#[derive(Clone, Copy, Debug)]
pub struct EvolutionProgress {
    pub step: usize,
    pub steps: usize,
    pub tau: f64,
    pub tau_end: f64,
}

impl EvolutionProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.steps == 0 {
            1.0
        } else {
            self.step as f64 / self.steps as f64
        }
    }
}

/// Final state of a completed evolution.
#[derive(Clone, Debug)]
pub struct EvolutionSummary {
    pub steps: usize,
    pub samples: usize,
    pub tau_final: f64,
    /// Initial energy density [fm^-4]
    pub e0: f64,
    pub final_state: StateVector,
    pub final_primitives: Primitives,
}

/// Evolve from the settings' initial condition to `tauf`.
pub fn evolve(
    medium: &Medium,
    settings: &EvolutionSettings,
    sink: &mut dyn SampleSink,
) -> SimResult<EvolutionSummary> {
    evolve_with_progress(medium, settings, sink, None)
}

pub fn evolve_with_progress(
    medium: &Medium,
    settings: &EvolutionSettings,
    sink: &mut dyn SampleSink,
    progress: Option<&mut dyn FnMut(EvolutionProgress)>,
) -> SimResult<EvolutionSummary> {
    let mut model = BjorkenModel::new(
        medium.clone(),
        settings.closure,
        settings.initial,
        settings.temperature,
    );
    evolve_model(&mut model, settings, sink, progress)
}

/// Evolve a prepared model. Closure and initial condition come from the
/// model; the settings supply times, cadence and integrator.
pub fn evolve_model(
    model: &mut BjorkenModel,
    settings: &EvolutionSettings,
    sink: &mut dyn SampleSink,
    mut progress: Option<&mut dyn FnMut(EvolutionProgress)>,
) -> SimResult<EvolutionSummary> {
    settings.validate()?;
    let opts = settings.sim_options();
    let flow = model.flow().clone();

    info!(
        t0_gev = to_gev(settings.temperature),
        tau0 = settings.tau0,
        tauf = settings.tauf,
        dtau = settings.dtau,
        steps = opts.steps(),
        closure = flow.closure.name(),
        initial = model.initial_condition().name(),
        "starting evolution"
    );

    let mut e0 = None;
    let mut samples = 0usize;
    let result = run_sim_with_observer(model, &opts, |snap| {
        let e0 = *e0.get_or_insert(snap.aux.e);
        let tr = flow.transport(snap.x, snap.aux, snap.t)?;
        let sample = Sample::compute(snap.step, snap.t, e0, snap.x, snap.aux, &tr);
        sink.record(&sample)?;
        samples += 1;

        debug!(
            step = snap.step,
            tau = snap.t,
            e_ratio = sample.get(Observable::EnergyDensity),
            t_gev = to_gev(tr.temperature),
            "sample"
        );
        if let Some(report) = progress.as_deref_mut() {
            report(EvolutionProgress {
                step: snap.step,
                steps: snap.steps,
                tau: snap.t,
                tau_end: settings.tauf,
            });
        }
        Ok(())
    });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, samples, "evolution aborted");
            return Err(err);
        }
    };

    info!(
        steps = outcome.steps,
        samples,
        tau = outcome.t,
        e = outcome.aux.e,
        "evolution finished"
    );

    Ok(EvolutionSummary {
        steps: outcome.steps,
        samples,
        tau_final: outcome.t,
        e0: e0.unwrap_or(outcome.aux.e),
        final_state: outcome.x,
        final_primitives: outcome.aux,
    })
}
