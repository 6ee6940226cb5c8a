//! Player pose and movement logic.
//!
//! This module defines the [`Pose`] struct, which tracks the player's floor
//! position and heading, and the [`MovementController`], which turns held
//! intents into collision-checked moves.
//!
//! # Coordinate System
//!
//! - X-axis: increases with the grid column
//! - Z-axis: increases with the grid row
//! - Yaw: radians, 0 faces negative Z, positive turns to the left
//!
//! Forward movement is `(-sin(yaw), -cos(yaw))` scaled by the translation step.

use crate::config::MovementConfig;
use crate::game::SimulationContext;
use crate::game::collision::CollisionSystem;
use crate::game::keys::Intent;
use crate::math::coordinates::{tile_to_world, yaw_to_forward};
use crate::maze::Grid;

/// Continuous player state on the floor plane.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World X position.
    pub x: f32,
    /// World Z position.
    pub z: f32,
    /// Heading in radians.
    pub yaw: f32,
}

impl Pose {
    pub fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self { x, z, yaw }
    }

    /// Places a pose at the centre of the grid's spawn tile, facing yaw 0.
    pub fn at_spawn(grid: &Grid) -> Self {
        let [x, z] = tile_to_world(&grid.spawn(), grid.origin());
        Self::new(x, z, 0.0)
    }

    /// Position as `[x, z]`.
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.z]
    }
}

/// What happened to a single intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Yaw changed.
    Rotated,
    /// The candidate position was accepted.
    Moved,
    /// A probe corner hit a wall; the pose is unchanged.
    Blocked,
    /// A probe corner touched the exit. `committed` says whether the pose moved.
    ExitReached { committed: bool },
    /// The simulation is paused or finished.
    Ignored,
}

impl MoveResult {
    pub fn reached_exit(self) -> bool {
        matches!(self, MoveResult::ExitReached { .. })
    }
}

/// Converts intents into poses using fixed per-tick steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementController {
    pub translation_step: f32,
    pub rotation_step: f32,
    pub mouse_sensitivity: f32,
    pub collision: CollisionSystem,
}

impl MovementController {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            translation_step: config.translation_step,
            rotation_step: config.rotation_step,
            mouse_sensitivity: config.mouse_sensitivity,
            collision: CollisionSystem::new(config.probe_radius),
        }
    }

    /// Applies one intent to the context's pose.
    ///
    /// Rotation always succeeds. Translation commits only if all four probe
    /// corners around the candidate are navigable. Nothing happens while the
    /// simulation is paused or the phase is terminal.
    pub fn try_move(&self, ctx: &mut SimulationContext, intent: Intent) -> MoveResult {
        if !ctx.running || ctx.phase.is_terminal() {
            return MoveResult::Ignored;
        }

        let sign = match intent {
            Intent::RotateLeft => {
                ctx.pose.yaw += self.rotation_step;
                return MoveResult::Rotated;
            }
            Intent::RotateRight => {
                ctx.pose.yaw -= self.rotation_step;
                return MoveResult::Rotated;
            }
            Intent::Forward => 1.0,
            Intent::Backward => -1.0,
        };

        let [fx, fz] = yaw_to_forward(ctx.pose.yaw);
        let nx = ctx.pose.x + fx * self.translation_step * sign;
        let nz = ctx.pose.z + fz * self.translation_step * sign;

        let outcome = self.collision.probe(&ctx.grid, nx, nz);
        if outcome.navigable {
            ctx.pose.x = nx;
            ctx.pose.z = nz;
        } else {
            tracing::trace!(x = nx, z = nz, ?intent, "move blocked");
        }

        match (outcome.touches_exit, outcome.navigable) {
            (true, committed) => MoveResult::ExitReached { committed },
            (false, true) => MoveResult::Moved,
            (false, false) => MoveResult::Blocked,
        }
    }

    /// Turns the player from pointer movement while the simulation runs.
    ///
    /// Positive `delta_x` (pointer moving right) turns right. Non-finite
    /// deltas are ignored.
    pub fn look(&self, ctx: &mut SimulationContext, delta_x: f32) -> bool {
        if !ctx.running || ctx.phase.is_terminal() || !delta_x.is_finite() {
            return false;
        }
        ctx.pose.yaw -= delta_x * self.mouse_sensitivity;
        true
    }
}
