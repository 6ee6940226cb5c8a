//! Evacuation Maze - headless experiment driver
//!
//! Runs one experiment session without a window: input comes from a script
//! or a seeded random walk, time comes from a simulated clock advancing one
//! tick at a time, and the collected telemetry is written to a JSON file when
//! the run ends.
//!
//! # Usage
//! ```text
//! evacuation-maze --levels assets/maps --mode minimap --script demos/escape.txt
//! evacuation-maze --random-walk 42 --max-ticks 20000 --out results
//! ```
//!
//! Set `RUST_LOG=evacuation_maze=debug` for per-level detail.

use anyhow::{Context, bail};
use clap::Parser;
use evacuation_maze::app::{
    ExperimentSession, Fog, FrameInput, IntentSource, RandomWalk, ScriptedInput, TracingObserver,
};
use evacuation_maze::config::{ExperimentConfig, ExperimentMode};
use evacuation_maze::maze::{FileLevelSource, LevelSource};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Command-line arguments for a headless run.
#[derive(Debug, Parser)]
#[command(name = "evacuation-maze", version, about = "Run a headless maze evacuation session")]
struct Args {
    /// Directory holding maze3d-<level>.json files
    #[arg(long, default_value = "assets/maps")]
    levels: PathBuf,

    /// Experiment arm
    #[arg(long, value_enum, default_value_t = ExperimentMode::Minimap)]
    mode: ExperimentMode,

    /// JSON file overriding the default experiment settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input script to replay
    #[arg(long, conflicts_with = "random_walk")]
    script: Option<PathBuf>,

    /// Drive the player with a random walk using this seed
    #[arg(long)]
    random_walk: Option<u64>,

    /// Simulated ticks per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Stop after this many ticks even if the trial has not ended
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    /// Directory the telemetry export is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("evacuation_maze=info".parse()?),
        )
        .init();

    let args = Args::parse();
    if args.tick_rate == 0 {
        bail!("--tick-rate must be positive");
    }
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ExperimentConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };

    let mut input: Box<dyn IntentSource> = match (&args.script, args.random_walk) {
        (Some(path), _) => Box::new(
            ScriptedInput::from_file(path)
                .with_context(|| format!("loading script {}", path.display()))?,
        ),
        (None, Some(seed)) => Box::new(RandomWalk::new(seed)),
        (None, None) => bail!("either --script or --random-walk is required"),
    };

    let mut levels = FileLevelSource::new(&args.levels);
    let warmup = levels
        .load(config.phase.warmup_level)
        .context("loading warm-up level")?;

    let mut session = ExperimentSession::new(config, args.mode, warmup);
    session.subscribe(Box::new(TracingObserver));

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .context("installing Ctrl-C handler")?;
    }

    let start_ms = chrono::Utc::now().timestamp_millis();
    let dt = 1.0 / args.tick_rate as f32;
    let mut fog = Fog::default();
    let mut load_failure = None;

    for tick in 0..args.max_ticks {
        if stop.load(Ordering::SeqCst) {
            tracing::warn!(tick, "interrupted, writing telemetry collected so far");
            break;
        }
        let now_ms = start_ms + (tick * 1000 / args.tick_rate as u64) as i64;

        for event in input.poll(tick) {
            session.handle_input(now_ms, event);
        }
        if session.is_running() {
            fog.advance(session.phase());
        }
        session.tick(FrameInput {
            dt,
            now_ms,
            fog_density: fog.density,
        });

        if session.pending_level().is_some() {
            if let Err(err) = session.load_pending_level(&mut levels) {
                tracing::error!(error = %err, "formal level failed to load, ending run");
                load_failure = Some(err);
                break;
            }
        }
        if session.outcome().is_some() {
            break;
        }
    }

    match session.outcome() {
        Some(outcome) => tracing::info!(%outcome, ticks = session.tick_count(), "trial over"),
        None => tracing::warn!(
            phase = %session.phase(),
            ticks = session.tick_count(),
            "run ended before the trial finished"
        ),
    }

    let path = session
        .export()
        .save_to_dir(&args.out)
        .with_context(|| format!("writing telemetry to {}", args.out.display()))?;
    tracing::info!(path = %path.display(), "telemetry saved");

    match load_failure {
        Some(err) => Err(anyhow::Error::new(err).context("loading formal level")),
        None => Ok(()),
    }
}
