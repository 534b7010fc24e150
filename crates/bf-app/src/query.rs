//! Query helpers for extracting data from loaded runs.

use bf_results::TimeseriesRecord;
use bf_sim::Observable;

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and data.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub tau_range: (f64, f64),
    pub record_count: usize,
    pub observable_count: usize,
    /// e/e0 at the last record, when present
    pub final_energy_ratio: Option<f64>,
}

pub fn get_run_summary(records: &[TimeseriesRecord]) -> AppResult<RunSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    Ok(RunSummary {
        tau_range: (first.tau_fm, last.tau_fm),
        record_count: records.len(),
        observable_count: first.values.len(),
        final_energy_ratio: last.get(Observable::EnergyDensity.key()),
    })
}

/// Observable keys recorded in a run, in their canonical order.
pub fn list_observables(records: &[TimeseriesRecord]) -> Vec<Observable> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    Observable::ALL
        .into_iter()
        .filter(|obs| first.values.contains_key(obs.key()))
        .collect()
}

/// `(tau, value)` pairs of one observable, by key.
pub fn extract_series(records: &[TimeseriesRecord], key: &str) -> AppResult<Vec<(f64, f64)>> {
    if Observable::from_key(key).is_none() {
        return Err(AppError::InvalidInput(format!("Unknown observable: {}", key)));
    }

    let mut series = Vec::with_capacity(records.len());
    for record in records {
        let value = record.get(key).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Observable {} missing at tau = {}",
                key, record.tau_fm
            ))
        })?;
        series.push((record.tau_fm, value));
    }
    Ok(series)
}
