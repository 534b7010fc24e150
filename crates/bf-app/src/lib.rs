//! Shared application service layer for bjorkenflow.
//!
//! Centralizes configuration handling, runtime compilation, run execution with
//! caching, and result querying so front ends stay thin.

pub mod config_service;
pub mod error;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod runtime_compile;

pub use config_service::{ConfigOverrides, ConfigSummary, load_config, save_config, summarize};
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use query::{RunSummary, extract_series, get_run_summary, list_observables};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run, ensure_run_with_progress,
    list_runs, load_run,
};
pub use runtime_compile::{compile_medium, compile_settings};
