//! Result data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub config_name: String,
    /// RFC 3339
    pub timestamp: String,
    pub run: RunSummaryInfo,
    pub solver_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummaryInfo {
    pub tau0_fm: f64,
    pub tauf_fm: f64,
    pub dtau_fm: f64,
    pub steps: usize,
    pub samples: usize,
    pub closure: String,
    pub initial_condition: String,
}

/// One sample of every observable, keyed by observable key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub tau_fm: f64,
    pub values: BTreeMap<String, f64>,
}

impl TimeseriesRecord {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}
