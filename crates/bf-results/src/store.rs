//! Run storage API.
//!
//! Layout: `<root>/<run_id>/manifest.json`, `timeseries.jsonl`, and the
//! `<observable>.dat` series streamed during the run. A run counts as
//! stored only once its manifest exists.

use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TIMESERIES_FILE: &str = "timeseries.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a run configuration file: `<config dir>/.bjorkenflow/runs`.
    pub fn for_config(config_path: &Path) -> ResultsResult<Self> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "config path has no parent directory".to_string(),
            })?;
        let runs_dir = config_dir.join(".bjorkenflow").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST_FILE).exists()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
    ) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let mut timeseries_content = String::new();
        for record in records {
            timeseries_content.push_str(&serde_json::to_string(record)?);
            timeseries_content.push('\n');
        }
        fs::write(run_dir.join(TIMESERIES_FILE), timeseries_content)?;

        // Manifest last: it marks the run as complete.
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST_FILE), manifest_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        let timeseries_path = self.run_dir(run_id).join(TIMESERIES_FILE);

        if !self.has_run(run_id) || !timeseries_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(timeseries_path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                records.push(serde_json::from_str(line)?);
            }
        }

        Ok(records)
    }

    /// Path of a stored series file, if the run has one for `key`.
    pub fn series_path(&self, run_id: &str, key: &str) -> ResultsResult<PathBuf> {
        let path = self.run_dir(run_id).join(format!("{key}.dat"));
        if !self.has_run(run_id) || !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(path)
    }

    /// Completed runs, optionally filtered by configuration name, oldest first.
    pub fn list_runs(&self, config_name: Option<&str>) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().to_string();
            let Ok(manifest) = self.load_manifest(&run_id) else {
                continue;
            };
            if config_name.is_none_or(|name| manifest.config_name == name) {
                runs.push(manifest);
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
