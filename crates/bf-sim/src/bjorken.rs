//! Boost-invariant fluid as a transient model.

use std::sync::Arc;

use bf_core::StateVector;
use bf_eos::Medium;
use bf_solver::{PrimitiveSolver, Primitives, Reconstruct};

use crate::closure::RelaxationClosure;
use crate::error::{SimError, SimResult};
use crate::flow::FlowEquations;
use crate::initial::InitialCondition;
use crate::model::TransientModel;

/// Bjorken flow: conserved and dissipative quantities integrated in proper
/// time, primitives recovered after every stage.
#[derive(Clone)]
pub struct BjorkenModel {
    flow: FlowEquations,
    reconstructor: Arc<dyn Reconstruct>,
    initial: InitialCondition,
    /// Initial temperature [fm^-1]
    temperature: f64,
}

impl BjorkenModel {
    pub fn new(
        medium: Medium,
        closure: RelaxationClosure,
        initial: InitialCondition,
        temperature: f64,
    ) -> Self {
        let reconstructor = Arc::new(PrimitiveSolver::new(medium.eos.clone()));
        Self {
            flow: FlowEquations::new(medium, closure),
            reconstructor,
            initial,
            temperature,
        }
    }

    /// Replace the primitive-variable solver.
    pub fn with_reconstructor(mut self, reconstructor: Arc<dyn Reconstruct>) -> Self {
        self.reconstructor = reconstructor;
        self
    }

    pub fn flow(&self) -> &FlowEquations {
        &self.flow
    }

    pub fn initial_condition(&self) -> InitialCondition {
        self.initial
    }
}

impl TransientModel for BjorkenModel {
    type State = StateVector;
    type Aux = Primitives;

    fn initial_state(&mut self, tau0: f64) -> SimResult<StateVector> {
        self.initial
            .state(&self.flow.medium, self.temperature, tau0)
    }

    fn rhs(&mut self, tau: f64, x: &StateVector, prims: &Primitives) -> SimResult<StateVector> {
        self.flow.rhs(x, prims, tau)
    }

    fn sync(&mut self, tau: f64, x: &StateVector) -> SimResult<Primitives> {
        self.reconstructor
            .reconstruct(x, tau)
            .map_err(|e| SimError::Reconstruction {
                tau,
                message: e.to_string(),
            })
    }

    fn add(&self, a: &StateVector, b: &StateVector) -> StateVector {
        *a + *b
    }

    fn scale(&self, a: &StateVector, scale: f64) -> StateVector {
        *a * scale
    }
}

impl std::fmt::Debug for BjorkenModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BjorkenModel")
            .field("flow", &self.flow)
            .field("initial", &self.initial)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}
