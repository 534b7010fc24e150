//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use bf_config::RunConfig;
use bf_results::{
    RunManifest, RunStore, RunSummaryInfo, SeriesColumn, SeriesWriter, TimeseriesRecord,
};
use bf_sim::{Observable, Sample, SampleSink, SimError, SimResult};
use tracing::{info, warn};

use crate::config_service::{self, ConfigOverrides};
use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};
use crate::runtime_compile;

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a run.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    /// Config file; the built-in defaults when `None`.
    pub config_path: Option<&'a Path>,
    pub overrides: ConfigOverrides,
    /// Root of the run store.
    pub out_dir: &'a Path,
    pub options: RunOptions,
}

/// Wall-clock timing and size of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub evolve_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
    pub steps: usize,
    pub samples: usize,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: &str,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            Some(message.to_string()),
        ));
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(&mut progress_cb, RunStage::LoadingConfig, started, "Loading config");
    let config = config_service::load_config(request.config_path, &request.overrides)?;

    emit_progress(&mut progress_cb, RunStage::CheckingCache, started, "Checking run cache");
    let run_id = bf_results::compute_run_id(&config, &request.options.solver_version);
    let store = RunStore::new(request.out_dir.to_path_buf())?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            "Loading cached run",
        );

        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.steps = manifest.run.steps;
        timing.samples = manifest.run.samples;
        timing.total_time_s = started.elapsed().as_secs_f64();

        emit_progress(&mut progress_cb, RunStage::Completed, started, "Loaded cached run");
        info!(run_id = %run_id, "loaded cached run");

        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let manifest = execute_run(
        &config,
        &store,
        &run_id,
        &request.options.solver_version,
        &mut progress_cb,
        started,
        &mut timing,
    )?;

    timing.total_time_s = started.elapsed().as_secs_f64();
    emit_progress(&mut progress_cb, RunStage::Completed, started, "Run completed");

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// Sample sink that streams every observable to its series file and keeps
/// the structured records for the run store.
struct RunRecorder {
    writer: SeriesWriter,
    records: Vec<TimeseriesRecord>,
}

impl RunRecorder {
    fn create(dir: &Path) -> AppResult<Self> {
        let columns: Vec<_> = Observable::ALL
            .iter()
            .map(|obs| SeriesColumn::new(obs.key(), obs.label()))
            .collect();
        Ok(Self {
            writer: SeriesWriter::create(dir, &columns)?,
            records: Vec::new(),
        })
    }
}

impl SampleSink for RunRecorder {
    fn record(&mut self, sample: &Sample) -> SimResult<()> {
        let values: Vec<f64> = sample.iter().map(|(_, v)| v).collect();
        self.writer
            .append(sample.tau, &values)
            .map_err(|e| SimError::Sink {
                message: e.to_string(),
            })?;
        self.records.push(TimeseriesRecord {
            tau_fm: sample.tau,
            values: sample
                .iter()
                .map(|(obs, v)| (obs.key().to_string(), v))
                .collect(),
        });
        Ok(())
    }
}

fn execute_run(
    config: &RunConfig,
    store: &RunStore,
    run_id: &str,
    solver_version: &str,
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    started: Instant,
    timing: &mut RunTimingSummary,
) -> AppResult<RunManifest> {
    emit_progress(progress_cb, RunStage::CompilingRuntime, started, "Compiling runtime");

    let compile_started = Instant::now();
    let medium = runtime_compile::compile_medium(config)?;
    let settings = runtime_compile::compile_settings(config)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    // A stale directory (from a failed or uncached run) must not mix with new output.
    store.delete_run(run_id)?;
    let mut recorder = RunRecorder::create(&store.run_dir(run_id))?;

    emit_progress(progress_cb, RunStage::Evolving, started, "Evolving");
    info!(run_id = %run_id, config = %config.name, "executing run");

    let evolve_started = Instant::now();
    let result = {
        let mut on_progress = |progress: bf_sim::EvolutionProgress| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(RunProgressEvent {
                    stage: RunStage::Evolving,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    evolution: Some(progress),
                });
            }
        };
        bf_sim::evolve_with_progress(&medium, &settings, &mut recorder, Some(&mut on_progress))
    };
    timing.evolve_time_s = evolve_started.elapsed().as_secs_f64();

    let RunRecorder { writer, records } = recorder;
    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            // Rows written before the failure stay on disk; no manifest is saved.
            if let Err(flush_err) = writer.finish() {
                warn!(error = %flush_err, "failed to flush series after abort");
            }
            return Err(err.into());
        }
    };
    writer.finish()?;

    timing.steps = summary.steps;
    timing.samples = summary.samples;

    emit_progress(progress_cb, RunStage::SavingResults, started, "Saving results");
    let save_started = Instant::now();

    let manifest = RunManifest {
        run_id: run_id.to_string(),
        config_name: config.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        run: RunSummaryInfo {
            tau0_fm: config.initial.tau0_fm,
            tauf_fm: config.evolution.tauf_fm,
            dtau_fm: config.evolution.dtau_fm,
            steps: summary.steps,
            samples: summary.samples,
            closure: settings.closure.name().to_string(),
            initial_condition: settings.initial.name().to_string(),
        },
        solver_version: solver_version.to_string(),
    };
    store.save_run(&manifest, &records)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();

    Ok(manifest)
}

/// List stored runs, most recent first.
pub fn list_runs(out_dir: &Path, config_name: Option<&str>) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::new(out_dir.to_path_buf())?;

    let mut runs = store.list_runs(config_name)?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(
    out_dir: &Path,
    run_id: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::new(out_dir.to_path_buf())?;

    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    Ok((manifest, records))
}
