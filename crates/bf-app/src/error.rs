//! Error types for the bf-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<bf_config::ConfigError> for AppError {
    fn from(err: bf_config::ConfigError) -> Self {
        match err {
            bf_config::ConfigError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Config(other.to_string()),
        }
    }
}

impl From<bf_config::ValidationError> for AppError {
    fn from(err: bf_config::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<bf_eos::EosError> for AppError {
    fn from(err: bf_eos::EosError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<bf_sim::SimError> for AppError {
    fn from(err: bf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<bf_results::ResultsError> for AppError {
    fn from(err: bf_results::ResultsError) -> Self {
        match err {
            bf_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
