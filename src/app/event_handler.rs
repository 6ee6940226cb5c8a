//! Input events and experiment observers.
//!
//! Hosts translate their native input (keyboard, pointer, gaze tracker) into
//! [`InputEvent`]s and hand them to [`ExperimentSession::handle_input`]. Phase
//! and level notifications flow the other way through [`ExperimentObserver`].

use crate::app::app_state::ExperimentSession;
use crate::config::ExperimentMode;
use crate::game::experiment::ExperimentEvent;
use crate::game::keys::Intent;
use crate::telemetry::GazeSample;

/// A single participant input, already mapped from the host's device events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A movement intent started.
    Press(Intent),
    /// A movement intent stopped.
    Release(Intent),
    /// Horizontal pointer movement in pixels while the pointer is locked.
    Look(f32),
    /// Raw gaze estimate in screen pixels.
    Gaze { x: f32, y: f32 },
    /// Pointer moved over minimap tile `(col, row)`.
    Hover { col: i64, row: i64 },
}

/// Receives phase and level notifications from a session.
pub trait ExperimentObserver {
    fn on_event(&mut self, event: &ExperimentEvent);
}

/// Writes every experiment event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExperimentObserver for TracingObserver {
    fn on_event(&mut self, event: &ExperimentEvent) {
        match event {
            ExperimentEvent::PhaseChanged { from, to } => {
                tracing::info!(%from, %to, "phase changed");
            }
            ExperimentEvent::LevelRequested { level } => {
                tracing::info!(level, "waiting for level");
            }
            ExperimentEvent::LevelInstalled { level } => {
                tracing::info!(level, "level running");
            }
        }
    }
}

impl ExperimentSession {
    /// Dispatches one input event at host time `now_ms`.
    pub fn handle_input(&mut self, now_ms: i64, event: InputEvent) {
        match event {
            InputEvent::Press(intent) => self.press(intent),
            InputEvent::Release(intent) => self.release(intent),
            InputEvent::Look(delta_x) => {
                self.look(delta_x);
            }
            InputEvent::Gaze { x, y } => {
                self.ingest_gaze(now_ms, x, y);
            }
            InputEvent::Hover { col, row } => {
                self.record_minimap_hover(col, row);
            }
        }
    }

    /// Starts holding an intent. Ignored while paused so a level reload
    /// begins with no intents held.
    pub fn press(&mut self, intent: Intent) {
        if self.ctx.running {
            self.ctx.keys.press(intent);
        }
    }

    pub fn release(&mut self, intent: Intent) {
        self.ctx.keys.release(intent);
    }

    /// Turns the player by a pointer delta. Returns whether yaw changed.
    pub fn look(&mut self, delta_x: f32) -> bool {
        self.movement.look(&mut self.ctx, delta_x)
    }

    /// Smooths and logs a raw gaze estimate while the simulation is running.
    pub fn ingest_gaze(&mut self, now_ms: i64, x: f32, y: f32) -> Option<GazeSample> {
        if !self.ctx.running {
            return None;
        }
        Some(self.telemetry.ingest_gaze(now_ms, x, y))
    }

    /// Counts a pointer-move over a minimap tile.
    ///
    /// Only recorded in minimap mode and for tiles inside the current grid.
    /// Returns the tile's updated count.
    pub fn record_minimap_hover(&mut self, col: i64, row: i64) -> Option<u32> {
        if self.telemetry.mode() != ExperimentMode::Minimap || !self.ctx.grid.contains(col, row) {
            return None;
        }
        Some(self.telemetry.record_hover(col as usize, row as usize))
    }
}
