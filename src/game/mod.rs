//! Simulation state.
//!
//! This module defines the [`SimulationContext`] struct, which holds all state
//! the tick sequence mutates: the level grid, the player pose, the fire, the
//! experiment phase, the warm-up counter, held intents, and the running flag.
//! Components receive the context by explicit reference; nothing else writes
//! to it.

pub mod collision;
pub mod experiment;
pub mod fire;
pub mod keys;
pub mod player;

use self::experiment::Phase;
use self::fire::FireState;
use self::keys::KeyState;
use self::player::Pose;
use crate::maze::Grid;

/// Represents the entire mutable state of the simulation.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    /// The level currently being played.
    pub grid: Grid,
    /// Number of the level in `grid`.
    pub level: u32,
    /// The player's position and heading.
    pub pose: Pose,
    /// The fire, once a formal level has been installed.
    pub fire: Option<FireState>,
    /// Current experiment phase.
    pub phase: Phase,
    /// Ticks spent in the current warm-up.
    pub warmup_timer: u32,
    /// Whether ticks currently advance the simulation.
    pub running: bool,
    /// Level requested by a transition and not yet installed.
    pub pending_level: Option<u32>,
    /// Intents currently held by the participant.
    pub keys: KeyState,
}

impl SimulationContext {
    /// Creates a running warm-up context on `grid`, with the player at spawn.
    pub fn new(grid: Grid, level: u32) -> Self {
        Self {
            pose: Pose::at_spawn(&grid),
            grid,
            level,
            fire: None,
            phase: Phase::Warmup,
            warmup_timer: 0,
            running: true,
            pending_level: None,
            keys: KeyState::new(),
        }
    }

    /// Current fire radius, zero before the fire starts.
    pub fn fire_radius(&self) -> f32 {
        self.fire.map(|fire| fire.radius).unwrap_or(0.0)
    }
}
