//! Evacuation Maze - a fire-evacuation maze experiment
//!
//! This crate holds the simulation behind a first-person maze study: a
//! participant walks a grid maze, first on a warm-up level and then on a formal
//! level where a fire spreads from the spawn point, while viewport, gaze, and
//! minimap telemetry are recorded for later analysis.
//!
//! # Architecture
//! - `maze/`: level grids, cell codes, and level loading
//! - `math/`: world/tile/minimap coordinate conversions
//! - `game/`: simulation context, collision, movement, fire, and phases
//! - `telemetry/`: viewport sampling, gaze smoothing, hover counts, export
//! - `app/`: the per-tick session that ties everything together
//! - `config`, `error`: tunables and error types
//!
//! # Usage
//! ```no_run
//! use evacuation_maze::app::{ExperimentSession, FrameInput};
//! use evacuation_maze::config::{ExperimentConfig, ExperimentMode};
//! use evacuation_maze::game::keys::Intent;
//! use evacuation_maze::maze::{FileLevelSource, LevelSource};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ExperimentConfig::default();
//! let mut levels = FileLevelSource::new("assets/maps");
//! let warmup = levels.load(config.phase.warmup_level)?;
//! let mut session = ExperimentSession::new(config, ExperimentMode::Minimap, warmup);
//!
//! session.press(Intent::Forward);
//! session.tick(FrameInput { dt: 1.0 / 60.0, now_ms: 0, fog_density: 0.0005 });
//! session.load_pending_level(&mut levels)?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
pub mod telemetry;
