//! Fire hazard spread and danger detection.
//!
//! The fire is a disc on the floor plane centred on its source. Its radius
//! grows linearly with elapsed simulation time, so runs with the same inputs
//! reproduce the same hazard exactly. The player is in danger once the radius
//! has passed the grace radius and the player is inside the disc.
//!
//! Catching the player ends the formal trial, but that decision belongs to the
//! experiment state machine; this module only reports the condition.

use crate::config::FireConfig;
use crate::game::SimulationContext;
use crate::game::experiment::Phase;
use crate::game::player::Pose;
use crate::math::planar_distance;

/// Current state of the fire hazard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireState {
    /// Centre of the fire on the floor plane.
    pub source: [f32; 2],
    /// Current radius in world units, never negative.
    pub radius: f32,
    /// Radius growth in world units per second.
    pub spread_rate: f32,
    /// Radius at or below which the fire is harmless.
    pub grace_radius: f32,
}

impl FireState {
    /// An unlit fire at the world origin; call [`initialize`](Self::initialize)
    /// to place it.
    pub fn new(config: &FireConfig) -> Self {
        Self {
            source: [0.0, 0.0],
            radius: 0.0,
            spread_rate: config.spread_rate.max(0.0),
            grace_radius: config.grace_radius,
        }
    }

    /// Starts a fire of radius zero at `source`.
    pub fn ignite(source: [f32; 2], config: &FireConfig) -> Self {
        let mut fire = Self::new(config);
        fire.initialize(source);
        fire
    }

    /// Moves the fire to a new source and resets its radius. Called once per
    /// formal level load.
    pub fn initialize(&mut self, source: [f32; 2]) {
        self.source = source;
        self.radius = 0.0;
    }

    /// Grows the radius by `spread_rate * dt`.
    ///
    /// Negative or non-finite `dt` is ignored so the radius never shrinks.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.radius += self.spread_rate * dt;
        }
    }

    /// Whether the fire has reached the player.
    pub fn evaluate_danger(&self, pose: &Pose) -> bool {
        self.radius > self.grace_radius && planar_distance(pose.position(), self.source) < self.radius
    }
}

/// Advances the fire for one tick and evaluates danger.
///
/// Does nothing unless the phase is Formal, the simulation is running, and a
/// fire has been ignited. Returns whether the player is caught.
pub fn update(ctx: &mut SimulationContext, dt: f32) -> bool {
    if !ctx.running || ctx.phase != Phase::Formal {
        return false;
    }
    let Some(fire) = ctx.fire.as_mut() else {
        return false;
    };
    fire.advance(dt);
    fire.evaluate_danger(&ctx.pose)
}
