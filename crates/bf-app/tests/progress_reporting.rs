//! Integration tests for run progress and timing reporting.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bf_app::{
    ConfigOverrides, RunOptions, RunProgressEvent, RunRequest, RunResponse, RunStage,
    ensure_run_with_progress,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("{}_{}", prefix, nanos))
}

fn collect_events(request: &RunRequest<'_>) -> (RunResponse, Vec<RunProgressEvent>) {
    let mut events = Vec::new();
    let response = ensure_run_with_progress(request, Some(&mut |event| events.push(event)))
        .expect("run with progress should succeed");
    (response, events)
}

#[test]
fn evolution_progress_and_timing_are_reported() {
    let out_dir = unique_temp_dir("bf_app_progress");
    let request = RunRequest {
        config_path: None,
        overrides: ConfigOverrides {
            tauf_fm: Some(1.0),
            ..Default::default()
        },
        out_dir: &out_dir,
        options: RunOptions {
            use_cache: false,
            ..Default::default()
        },
    };

    let (response, events) = collect_events(&request);
    assert!(!response.loaded_from_cache);

    let stages: Vec<RunStage> = events.iter().map(|e| e.stage).collect();
    for expected in [
        RunStage::LoadingConfig,
        RunStage::CheckingCache,
        RunStage::CompilingRuntime,
        RunStage::Evolving,
        RunStage::SavingResults,
    ] {
        assert!(stages.contains(&expected), "missing stage {:?}", expected);
    }
    assert_eq!(stages.last(), Some(&RunStage::Completed));

    let evolution: Vec<_> = events.iter().filter_map(|e| e.evolution).collect();
    assert_eq!(evolution.len(), 8, "one progress report per sample");
    assert_eq!(evolution[0].step, 0);
    assert!(evolution.windows(2).all(|w| w[1].tau > w[0].tau));
    let last = evolution.last().unwrap();
    assert_eq!(last.steps, 75);
    assert!(last.fraction_complete() > 0.9 && last.fraction_complete() < 1.0);
    assert!((last.tau_end - 1.0).abs() < 1e-9);

    assert!(
        events
            .windows(2)
            .all(|w| w[1].elapsed_wall_s >= w[0].elapsed_wall_s)
    );
    assert!(response.timing.total_time_s > 0.0);
    assert!(response.timing.evolve_time_s > 0.0);
    assert_eq!(response.timing.samples, 8);
}

#[test]
fn cached_run_reports_cache_stages() {
    let out_dir = unique_temp_dir("bf_app_progress_cache");
    let request = RunRequest {
        config_path: None,
        overrides: ConfigOverrides {
            tauf_fm: Some(0.5),
            ..Default::default()
        },
        out_dir: &out_dir,
        options: RunOptions::default(),
    };
    collect_events(&request);

    let (response, events) = collect_events(&request);
    assert!(response.loaded_from_cache);
    assert!(events.iter().any(|e| e.stage == RunStage::LoadingCachedResult));
    assert!(events.iter().all(|e| e.stage != RunStage::Evolving));
    assert_eq!(response.timing.steps, 25);
}
