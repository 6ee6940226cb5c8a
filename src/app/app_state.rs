//! ExperimentSession module.
//!
//! This module defines the [`ExperimentSession`] struct, which holds all state
//! required for one participant's run: the simulation context, the components
//! that act on it, telemetry, and registered observers.

use crate::app::event_handler::ExperimentObserver;
use crate::config::{ExperimentConfig, ExperimentMode};
use crate::game::SimulationContext;
use crate::game::experiment::{ExperimentEvent, ExperimentStateMachine, Phase};
use crate::game::player::{MovementController, Pose};
use crate::math::coordinates::{minimap_heading, world_to_minimap};
use crate::maze::Grid;
use crate::telemetry::{TelemetryLogger, TelemetryRecord};

/// Holds all state required for a running experiment session.
pub struct ExperimentSession {
    /// The simulation state mutated by each tick.
    pub(crate) ctx: SimulationContext,
    pub(crate) movement: MovementController,
    pub(crate) machine: ExperimentStateMachine,
    pub(crate) telemetry: TelemetryLogger,
    pub(crate) observers: Vec<Box<dyn ExperimentObserver>>,
    /// Ticks that advanced the simulation.
    pub(crate) tick_count: u64,
    pub(crate) config: ExperimentConfig,
}

impl ExperimentSession {
    /// Starts a session in the warm-up phase on `warmup_grid`.
    ///
    /// The caller loads the grid for `config.phase.warmup_level`; the session
    /// is running immediately.
    pub fn new(config: ExperimentConfig, mode: ExperimentMode, warmup_grid: Grid) -> Self {
        let ctx = SimulationContext::new(warmup_grid, config.phase.warmup_level);
        tracing::info!(
            ?mode,
            level = ctx.level,
            width = ctx.grid.width(),
            height = ctx.grid.height(),
            "experiment session started"
        );
        Self {
            ctx,
            movement: MovementController::new(&config.movement),
            machine: ExperimentStateMachine::new(config.phase.clone(), config.fire.clone()),
            telemetry: TelemetryLogger::new(mode, &config.telemetry),
            observers: Vec::new(),
            tick_count: 0,
            config,
        }
    }

    /// Registers an observer for phase and level events.
    pub fn subscribe(&mut self, observer: Box<dyn ExperimentObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn notify(&mut self, events: &[ExperimentEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn mode(&self) -> ExperimentMode {
        self.telemetry.mode()
    }

    pub fn phase(&self) -> Phase {
        self.ctx.phase
    }

    pub fn pose(&self) -> Pose {
        self.ctx.pose
    }

    pub fn grid(&self) -> &Grid {
        &self.ctx.grid
    }

    pub fn fire_radius(&self) -> f32 {
        self.ctx.fire_radius()
    }

    pub fn warmup_timer(&self) -> u32 {
        self.ctx.warmup_timer
    }

    pub fn is_running(&self) -> bool {
        self.ctx.running
    }

    /// Level the session is waiting for, if a reload is in progress.
    pub fn pending_level(&self) -> Option<u32> {
        self.ctx.pending_level
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The terminal phase, once the formal trial has ended.
    pub fn outcome(&self) -> Option<Phase> {
        self.ctx.phase.is_terminal().then_some(self.ctx.phase)
    }

    /// Player marker position on the minimap, in fractional tiles.
    pub fn minimap_marker(&self) -> [f32; 2] {
        world_to_minimap(self.ctx.pose.position(), self.ctx.grid.dimensions())
    }

    /// End offset of the minimap heading line, in the same units as `length`.
    pub fn minimap_heading(&self, length: f32) -> [f32; 2] {
        minimap_heading(self.ctx.pose.yaw, length)
    }

    pub fn telemetry(&self) -> &TelemetryLogger {
        &self.telemetry
    }

    /// Snapshot of all telemetry collected so far.
    ///
    /// Available in every phase, including after the fire catches the player.
    pub fn export(&self) -> TelemetryRecord {
        self.telemetry.export()
    }
}
