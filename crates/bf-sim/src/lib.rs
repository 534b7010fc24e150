//! Proper-time evolution of a boost-invariant viscous fluid.
//!
//! Provides:
//! - A generic [`TransientModel`] with auxiliary (derived) quantities and
//!   fixed-step Heun / forward-Euler integrators that re-synchronize them
//!   after every stage
//! - The Bjorken model: derivative evaluator, relaxation-time closures,
//!   initial conditions and transport bookkeeping
//! - Sampled observables delivered through a [`SampleSink`]

pub mod bjorken;
pub mod closure;
pub mod error;
pub mod evolution;
pub mod flow;
pub mod initial;
pub mod integrator;
pub mod model;
pub mod sample;
pub mod sim;
pub mod transport;

pub use bjorken::BjorkenModel;
pub use closure::{RelaxationClosure, RelaxationTimes};
pub use error::{SimError, SimResult};
pub use evolution::{
    EvolutionProgress, EvolutionSettings, EvolutionSummary, evolve, evolve_model,
    evolve_with_progress,
};
pub use flow::{FlowEquations, SecondOrderCoefficients};
pub use initial::InitialCondition;
pub use integrator::{ForwardEuler, Heun, Integrator};
pub use model::TransientModel;
pub use sample::{Observable, Sample, SampleLog, SampleSink};
pub use sim::{
    IntegratorType, SimOptions, SimOutcome, SimRecord, Snapshot, run_sim, run_sim_with_observer,
};
pub use transport::Transport;
