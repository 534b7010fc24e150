//! Equation-of-state errors.

use thiserror::Error;

/// Result type for equation-of-state operations.
pub type EosResult<T> = Result<T, EosError>;

/// Errors that can occur during equation-of-state evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Non-physical values (non-positive temperature, energy density, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value outside the tabulated range of the model.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Invalid model parameter.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Convergence failure (e.g., inverting e(T)).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EosError::NonPhysical {
            what: "temperature",
        };
        assert!(err.to_string().contains("temperature"));

        let err = EosError::OutOfRange {
            what: "bag table",
            value: 123.0,
        };
        assert!(err.to_string().contains("123"));
    }
}
