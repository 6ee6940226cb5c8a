//! Fog density stand-in.
//!
//! The renderer owns the real fog; this mirrors its schedule so headless runs
//! log plausible densities. Fog only thickens during the formal trial.

use crate::game::experiment::Phase;

/// Exponential fog density that thickens a little every formal tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub density: f32,
    pub step: f32,
    pub max_density: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            density: 0.0005,
            step: 0.000008,
            max_density: 0.015,
        }
    }
}

impl Fog {
    /// Thickens the fog by one step if `phase` is the formal trial.
    pub fn advance(&mut self, phase: Phase) -> f32 {
        if phase == Phase::Formal && self.density < self.max_density {
            self.density = (self.density + self.step).min(self.max_density);
        }
        self.density
    }
}
