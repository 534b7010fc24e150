use bf_app::{
    AppResult, ConfigOverrides, RunOptions, RunProgressEvent, RunRequest, RunStage,
    config_service, query, run_service,
};
use bf_config::{ClosureDef, ConditionDef};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const DEFAULT_OUT: &str = ".bjorkenflow/runs";

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "BjorkenFlow CLI - second-order viscous Bjorken flow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run configuration file
    Validate {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
    },
    /// Run an evolution
    Run {
        /// Path to the YAML or JSON config (built-in defaults when omitted)
        config_path: Option<PathBuf>,
        /// Run store directory
        #[arg(long, default_value = DEFAULT_OUT)]
        out: PathBuf,
        /// Relaxation-time closure
        #[arg(long, value_enum)]
        closure: Option<ClosureArg>,
        /// Initial condition family
        #[arg(long, value_enum)]
        initial: Option<InitialArg>,
        /// Final proper time in fm
        #[arg(long)]
        tauf: Option<f64>,
        /// Proper-time step in fm
        #[arg(long)]
        dtau: Option<f64>,
        /// Steps between samples
        #[arg(long)]
        every: Option<usize>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs
    Runs {
        #[arg(long, default_value = DEFAULT_OUT)]
        out: PathBuf,
        /// Only runs of this config name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show details of a cached run
    ShowRun {
        #[arg(long, default_value = DEFAULT_OUT)]
        out: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export one observable of a run as CSV
    ExportSeries {
        #[arg(long, default_value = DEFAULT_OUT)]
        out: PathBuf,
        /// Run ID
        run_id: String,
        /// Observable key (e.g. energy_density, shear, pressure_ratio)
        observable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClosureArg {
    FixedMass,
    Kinetic,
}

impl From<ClosureArg> for ClosureDef {
    fn from(arg: ClosureArg) -> Self {
        match arg {
            ClosureArg::FixedMass => ClosureDef::FixedMass,
            ClosureArg::Kinetic => ClosureDef::Kinetic,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InitialArg {
    Equilibrium,
    Glasma,
}

impl From<InitialArg> for ConditionDef {
    fn from(arg: InitialArg) -> Self {
        match arg {
            InitialArg::Equilibrium => ConditionDef::Equilibrium,
            InitialArg::Glasma => ConditionDef::glasma(),
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            out,
            closure,
            initial,
            tauf,
            dtau,
            every,
            no_cache,
        } => {
            let overrides = ConfigOverrides {
                closure: closure.map(Into::into),
                condition: initial.map(Into::into),
                tauf_fm: tauf,
                dtau_fm: dtau,
                steps_per_sample: every,
            };
            cmd_run(config_path.as_deref(), &out, overrides, !no_cache)
        }
        Commands::Runs { out, name } => cmd_runs(&out, name.as_deref()),
        Commands::ShowRun { out, run_id } => cmd_show_run(&out, &run_id),
        Commands::ExportSeries {
            out,
            run_id,
            observable,
            output,
        } => cmd_export_series(&out, &run_id, &observable, output.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = config_service::load_config(Some(config_path), &ConfigOverrides::default())?;
    let summary = config_service::summarize(&config)?;
    println!("✓ Config is valid");
    println!(
        "  {}: T0 = {} GeV, tau = {} -> {} fm, dtau = {} fm",
        summary.name, summary.temperature_gev, summary.tau0_fm, summary.tauf_fm, summary.dtau_fm
    );
    println!(
        "  {} steps, {} samples, closure={}, initial={}",
        summary.steps, summary.samples, summary.closure, summary.initial_condition
    );
    Ok(())
}

fn cmd_run(
    config_path: Option<&Path>,
    out: &Path,
    overrides: ConfigOverrides,
    use_cache: bool,
) -> AppResult<()> {
    match config_path {
        Some(path) => println!("Running evolution from: {}", path.display()),
        None => println!("Running evolution with default config"),
    }

    let request = RunRequest {
        config_path,
        overrides,
        out_dir: out,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let fraction = event
                .evolution
                .as_ref()
                .map(|p| p.fraction_complete())
                .unwrap_or(-1.0);
            let emit_now = (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Evolution completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    let (_manifest, records) = run_service::load_run(out, &response.run_id)?;
    let summary = query::get_run_summary(&records)?;
    println!("  Samples: {}", summary.record_count);
    if let Some(ratio) = summary.final_energy_ratio {
        println!("  Final e/e0: {:.6e}", ratio);
    }
    println!("  Series: {}", out.join(&response.run_id).display());

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, &event.evolution) {
        (RunStage::Evolving, Some(p)) => {
            let fraction = p.fraction_complete();
            let width = 28usize;
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  tau={:.3}/{:.3} fm  step={}/{}  elapsed={:.1}s",
                bar,
                fraction * 100.0,
                p.tau,
                p.tau_end,
                p.step,
                p.steps,
                event.elapsed_wall_s
            );
            let _ = io::stdout().flush();
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &bf_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);

    println!("\nTiming summary:");
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    } else {
        println!(
            "  Compile: {:.3}s ({:.1}%)",
            timing.compile_time_s,
            100.0 * timing.compile_time_s / total
        );
        println!(
            "  Evolve:  {:.3}s ({:.1}%)",
            timing.evolve_time_s,
            100.0 * timing.evolve_time_s / total
        );
        println!(
            "  Save:    {:.3}s ({:.1}%)",
            timing.save_time_s,
            100.0 * timing.save_time_s / total
        );
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
    println!("  Steps:   {}", timing.steps);
}

fn cmd_runs(out: &Path, name: Option<&str>) -> AppResult<()> {
    let runs = run_service::list_runs(out, name)?;

    if runs.is_empty() {
        println!("No cached runs found in {}", out.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} {} ({}, {}, tau {} -> {} fm) {}",
                manifest.run_id,
                manifest.config_name,
                manifest.run.closure,
                manifest.run.initial_condition,
                manifest.run.tau0_fm,
                manifest.run.tauf_fm,
                manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(out: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(out, run_id)?;
    let summary = query::get_run_summary(&records)?;

    println!("\nRun Summary:");
    println!("  Config: {}", manifest.config_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Closure: {}", manifest.run.closure);
    println!("  Initial condition: {}", manifest.run.initial_condition);
    println!(
        "  Steps: {} (dtau = {} fm)",
        manifest.run.steps, manifest.run.dtau_fm
    );
    println!("  Samples: {}", summary.record_count);
    println!(
        "  Tau range: {:.3} - {:.3} fm",
        summary.tau_range.0, summary.tau_range.1
    );
    if let Some(ratio) = summary.final_energy_ratio {
        println!("  Final e/e0: {:.6e}", ratio);
    }

    println!("\nObservables:");
    for obs in query::list_observables(&records) {
        println!("  {:<28} {}", obs.key(), obs.label());
    }

    Ok(())
}

fn cmd_export_series(
    out: &Path,
    run_id: &str,
    observable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(out, run_id)?;
    let series = query::extract_series(&records, observable)?;

    let mut csv = String::from("tau_fm,value\n");
    for (tau, val) in &series {
        csv.push_str(&format!("{},{}\n", tau, val));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
