//! Experiment phase state machine.
//!
//! ```text
//! Warmup --(exit reached | warm-up ticks exceeded)--> Formal
//! Formal --(exit reached)--> Escaped
//! Formal --(fire catches player)--> Caught
//! ```
//!
//! `Escaped` and `Caught` are sinks. Every transition clears the running flag
//! before anything else, and every trigger is ignored while the flag is clear,
//! so at most one transition fires per tick and at most one terminal phase is
//! reached per formal trial.

use crate::config::{FireConfig, PhaseConfig};
use crate::game::SimulationContext;
use crate::game::fire::FireState;
use crate::game::player::Pose;
use crate::math::coordinates::tile_to_world;
use crate::maze::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse-grained experiment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Practice level, no fire.
    Warmup,
    /// The measured trial, fire active.
    Formal,
    /// The player reached the exit during the formal trial.
    Escaped,
    /// The fire reached the player during the formal trial.
    Caught,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Escaped | Phase::Caught)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Warmup => "warm-up",
            Phase::Formal => "formal",
            Phase::Escaped => "escaped",
            Phase::Caught => "caught",
        };
        f.write_str(name)
    }
}

/// Something that can move the experiment to another phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    ExitReached,
    WarmupExpired,
    FireCaught,
}

/// Notifications for renderers, UI, and loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentEvent {
    /// The phase changed.
    PhaseChanged { from: Phase, to: Phase },
    /// The simulation is paused until this level is installed.
    LevelRequested { level: u32 },
    /// A level is installed and the simulation is running again.
    LevelInstalled { level: u32 },
}

/// Drives phase changes and their side effects on the simulation context.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentStateMachine {
    pub phase_config: PhaseConfig,
    pub fire_config: FireConfig,
}

impl ExperimentStateMachine {
    pub fn new(phase_config: PhaseConfig, fire_config: FireConfig) -> Self {
        Self {
            phase_config,
            fire_config,
        }
    }

    /// Applies a trigger, returning the events it produced.
    ///
    /// Triggers arriving while the simulation is stopped, or that have no
    /// outgoing edge from the current phase, are ignored.
    pub fn fire(&self, ctx: &mut SimulationContext, trigger: Trigger) -> Vec<ExperimentEvent> {
        if !ctx.running {
            return Vec::new();
        }
        let from = ctx.phase;
        match (from, trigger) {
            (Phase::Warmup, Trigger::ExitReached | Trigger::WarmupExpired) => {
                ctx.running = false;
                ctx.keys.clear();
                ctx.pose.yaw = 0.0;
                ctx.warmup_timer = 0;
                ctx.phase = Phase::Formal;
                let level = self.phase_config.formal_level;
                ctx.pending_level = Some(level);
                tracing::info!(?trigger, level, "warm-up over, starting formal trial");
                vec![
                    ExperimentEvent::PhaseChanged {
                        from,
                        to: Phase::Formal,
                    },
                    ExperimentEvent::LevelRequested { level },
                ]
            }
            (Phase::Formal, Trigger::ExitReached) => self.finish(ctx, Phase::Escaped),
            (Phase::Formal, Trigger::FireCaught) => self.finish(ctx, Phase::Caught),
            _ => Vec::new(),
        }
    }

    fn finish(&self, ctx: &mut SimulationContext, to: Phase) -> Vec<ExperimentEvent> {
        ctx.running = false;
        let from = ctx.phase;
        ctx.phase = to;
        tracing::info!(
            outcome = %to,
            x = ctx.pose.x,
            z = ctx.pose.z,
            fire_radius = ctx.fire.map(|f| f.radius).unwrap_or(0.0),
            "experiment finished"
        );
        vec![ExperimentEvent::PhaseChanged { from, to }]
    }

    /// Counts one warm-up tick and fires the time-out once the limit is passed.
    pub fn tick_warmup(&self, ctx: &mut SimulationContext) -> Vec<ExperimentEvent> {
        if !ctx.running || ctx.phase != Phase::Warmup {
            return Vec::new();
        }
        ctx.warmup_timer += 1;
        if ctx.warmup_timer > self.phase_config.warmup_tick_limit {
            self.fire(ctx, Trigger::WarmupExpired)
        } else {
            Vec::new()
        }
    }

    /// Installs a freshly loaded grid and resumes the simulation.
    ///
    /// The pose returns to the spawn tile facing yaw 0. In the formal phase
    /// the fire is ignited at the spawn position.
    pub fn install_level(
        &self,
        ctx: &mut SimulationContext,
        level: u32,
        grid: Grid,
    ) -> Vec<ExperimentEvent> {
        ctx.pose = Pose::at_spawn(&grid);
        if ctx.phase == Phase::Formal {
            let source = tile_to_world(&grid.spawn(), grid.origin());
            ctx.fire
                .get_or_insert_with(|| FireState::new(&self.fire_config))
                .initialize(source);
        } else {
            ctx.fire = None;
        }
        ctx.grid = grid;
        ctx.level = level;
        ctx.warmup_timer = 0;
        ctx.pending_level = None;
        ctx.running = true;
        tracing::info!(level, phase = %ctx.phase, "level installed");
        vec![ExperimentEvent::LevelInstalled { level }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::keys::Intent;
    use crate::maze::parse_level;

    fn grid() -> Grid {
        parse_level(0, r#"[["D",1],[1,"A"]]"#).unwrap()
    }

    fn machine() -> ExperimentStateMachine {
        ExperimentStateMachine::new(PhaseConfig::default(), FireConfig::default())
    }

    /// Tests the warm-up exit side effects.
    #[test]
    fn test_warmup_exit_starts_formal() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 5);
        ctx.keys.press(Intent::Forward);
        ctx.pose.yaw = 1.3;
        ctx.warmup_timer = 40;

        let events = machine.fire(&mut ctx, Trigger::ExitReached);
        assert_eq!(
            events,
            vec![
                ExperimentEvent::PhaseChanged {
                    from: Phase::Warmup,
                    to: Phase::Formal
                },
                ExperimentEvent::LevelRequested { level: 1 },
            ]
        );
        assert_eq!(ctx.phase, Phase::Formal);
        assert!(!ctx.running);
        assert!(ctx.keys.held().is_empty());
        assert_eq!(ctx.pose.yaw, 0.0);
        assert_eq!(ctx.warmup_timer, 0);
        assert_eq!(ctx.pending_level, Some(1));
        assert!(ctx.fire.is_none());
    }

    /// Tests that a second trigger in the same tick is ignored.
    #[test]
    fn test_transition_is_idempotent() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 1);
        ctx.phase = Phase::Formal;

        assert_eq!(machine.fire(&mut ctx, Trigger::ExitReached).len(), 1);
        assert!(machine.fire(&mut ctx, Trigger::FireCaught).is_empty());
        assert!(machine.fire(&mut ctx, Trigger::ExitReached).is_empty());
        assert_eq!(ctx.phase, Phase::Escaped);
    }

    /// Tests that terminal phases have no outgoing edges even if resumed.
    #[test]
    fn test_terminal_is_sink() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 1);
        ctx.phase = Phase::Caught;
        ctx.running = true;
        for trigger in [Trigger::ExitReached, Trigger::WarmupExpired, Trigger::FireCaught] {
            assert!(machine.fire(&mut ctx, trigger).is_empty());
        }
        assert_eq!(ctx.phase, Phase::Caught);
    }

    /// Tests that fire catching has no effect during warm-up.
    #[test]
    fn test_fire_caught_ignored_in_warmup() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 5);
        assert!(machine.fire(&mut ctx, Trigger::FireCaught).is_empty());
        assert_eq!(ctx.phase, Phase::Warmup);
        assert!(ctx.running);
    }

    /// Tests the warm-up time-out threshold.
    #[test]
    fn test_warmup_timeout() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 5);
        for _ in 0..1800 {
            assert!(machine.tick_warmup(&mut ctx).is_empty());
        }
        assert_eq!(ctx.warmup_timer, 1800);
        let events = machine.tick_warmup(&mut ctx);
        assert_eq!(events.len(), 2);
        assert_eq!(ctx.phase, Phase::Formal);
        assert_eq!(ctx.warmup_timer, 0);
    }

    /// Tests that installing the formal level ignites the fire at the spawn.
    #[test]
    fn test_install_formal_level() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 5);
        machine.fire(&mut ctx, Trigger::WarmupExpired);

        let formal = parse_level(1, r#"[[2,2,2],[2,"D",2],[2,"A",2]]"#).unwrap();
        let events = machine.install_level(&mut ctx, 1, formal);
        assert_eq!(events, vec![ExperimentEvent::LevelInstalled { level: 1 }]);
        assert!(ctx.running);
        assert_eq!(ctx.level, 1);
        assert_eq!(ctx.pending_level, None);
        assert_eq!(ctx.pose, Pose::new(-50.0, -50.0, 0.0));
        let fire = ctx.fire.unwrap();
        assert_eq!(fire.source, [-50.0, -50.0]);
        assert_eq!(fire.radius, 0.0);
    }

    /// Tests that a second formal load re-initializes the existing fire.
    #[test]
    fn test_reinstall_resets_fire() {
        let machine = machine();
        let mut ctx = SimulationContext::new(grid(), 5);
        machine.fire(&mut ctx, Trigger::WarmupExpired);
        machine.install_level(&mut ctx, 1, grid());
        if let Some(fire) = ctx.fire.as_mut() {
            fire.radius = 50.0;
        }

        let formal = parse_level(1, r#"[[2,2,2],[2,"D",2],[2,"A",2]]"#).unwrap();
        machine.install_level(&mut ctx, 1, formal);
        let fire = ctx.fire.unwrap();
        assert_eq!(fire.radius, 0.0);
        assert_eq!(fire.source, [-50.0, -50.0]);
        assert_eq!(fire.spread_rate, FireConfig::default().spread_rate);
    }
}
