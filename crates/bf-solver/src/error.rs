//! Error types for solver operations.

use bf_eos::EosError;
use thiserror::Error;

/// Errors that can occur while recovering primitive variables.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Non-physical state: {what}")]
    NonPhysical { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Equation of state error: {0}")]
    Eos(#[from] EosError),
}

pub type SolverResult<T> = Result<T, SolverError>;
