//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during the proper-time evolution.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Reconstruction failed at tau = {tau} fm: {message}")]
    Reconstruction { tau: f64, message: String },

    #[error("Sample sink error: {message}")]
    Sink { message: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<bf_eos::EosError> for SimError {
    fn from(e: bf_eos::EosError) -> Self {
        match e {
            bf_eos::EosError::NonPhysical { what } => SimError::NonPhysical { what },
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}
