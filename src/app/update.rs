//! Per-tick update sequence and level reload protocol.

use crate::app::app_state::ExperimentSession;
use crate::error::{LevelError, SessionError};
use crate::game::experiment::{ExperimentEvent, Phase, Trigger};
use crate::game::fire;
use crate::game::keys::Intent;
use crate::game::player::MoveResult;
use crate::maze::{Grid, LevelSource};

/// Host-supplied timing and render state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous tick. Scales fire growth only.
    pub dt: f32,
    /// Wall-clock time in milliseconds, used for telemetry timestamps.
    pub now_ms: i64,
    /// Fog density the host is currently rendering, logged with each sample.
    pub fog_density: f32,
}

/// What a single tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// True if the simulation was paused and nothing ran.
    pub paused: bool,
    /// Result of each held intent, in application order.
    pub moves: Vec<(Intent, MoveResult)>,
    /// Events raised during the tick.
    pub events: Vec<ExperimentEvent>,
    /// Whether a viewport sample was appended.
    pub sampled: bool,
}

impl TickReport {
    /// The phase this tick moved into, if any.
    pub fn phase_change(&self) -> Option<Phase> {
        self.events.iter().find_map(|event| match event {
            ExperimentEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
    }
}

impl ExperimentSession {
    /// Advances the simulation by one tick.
    ///
    /// # Update Sequence
    /// 1. Apply held intents; the first exit contact fires `ExitReached`
    ///    and stops further intents
    /// 2. Grow the fire and test it against the player
    /// 3. Count the warm-up tick
    /// 4. Take a viewport sample if one is due
    ///
    /// While the running flag is clear the tick does nothing at all.
    pub fn tick(&mut self, frame: FrameInput) -> TickReport {
        let mut report = TickReport::default();
        if !self.ctx.running {
            report.paused = true;
            return report;
        }
        self.tick_count += 1;

        for intent in self.ctx.keys.held() {
            let result = self.movement.try_move(&mut self.ctx, intent);
            report.moves.push((intent, result));
            if result.reached_exit() {
                report
                    .events
                    .extend(self.machine.fire(&mut self.ctx, Trigger::ExitReached));
            }
            if !self.ctx.running {
                break;
            }
        }

        if fire::update(&mut self.ctx, frame.dt) {
            report
                .events
                .extend(self.machine.fire(&mut self.ctx, Trigger::FireCaught));
        }

        report.events.extend(self.machine.tick_warmup(&mut self.ctx));

        report.sampled = self.telemetry.sample_if_due(
            frame.now_ms,
            &self.ctx.pose,
            frame.fog_density,
            self.ctx.fire_radius(),
        );

        self.notify(&report.events);
        report
    }

    /// Installs the grid for the pending level and resumes the simulation.
    ///
    /// # Errors
    /// [`SessionError::NoPendingLevel`] if nothing was requested, and
    /// [`SessionError::UnexpectedLevel`] if `level` is not the one requested.
    /// The session is unchanged on error.
    pub fn complete_level_load(
        &mut self,
        level: u32,
        grid: Grid,
    ) -> Result<Vec<ExperimentEvent>, SessionError> {
        let expected = self.ctx.pending_level.ok_or(SessionError::NoPendingLevel)?;
        if expected != level {
            return Err(SessionError::UnexpectedLevel {
                expected,
                found: level,
            });
        }
        let events = self.machine.install_level(&mut self.ctx, level, grid);
        self.notify(&events);
        Ok(events)
    }

    /// Loads and installs the pending level from `source`, if one is pending.
    ///
    /// A failed load leaves the session paused with the request outstanding.
    pub fn load_pending_level<S: LevelSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Vec<ExperimentEvent>, LevelError> {
        let Some(level) = self.ctx.pending_level else {
            return Ok(Vec::new());
        };
        let grid = source.load(level)?;
        let events = self.machine.install_level(&mut self.ctx, level, grid);
        self.notify(&events);
        Ok(events)
    }
}
