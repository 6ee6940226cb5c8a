//! Experiment configuration.
//!
//! Every section has a `Default` matching the study's reference settings, and
//! a JSON config file only needs to name the values it overrides:
//!
//! ```json
//! { "fire": { "spread_rate": 12.0 }, "phase": { "formal_level": 2 } }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which arm of the study the participant is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentMode {
    /// Opaque walls with a minimap overlay; hover telemetry is recorded.
    Minimap,
    /// Translucent walls, no minimap.
    Xray,
}

/// Player movement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// World units moved per tick by a translation intent.
    pub translation_step: f32,
    /// Radians turned per tick by a rotation intent.
    pub rotation_step: f32,
    /// Half-width of the square collision probe.
    pub probe_radius: f32,
    /// Radians of yaw per pixel of pointer movement.
    pub mouse_sensitivity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            translation_step: 5.0,
            rotation_step: 0.04,
            probe_radius: crate::math::coordinates::constants::PROBE_RADIUS,
            mouse_sensitivity: 0.002,
        }
    }
}

/// Fire hazard parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Radius growth in world units per second.
    pub spread_rate: f32,
    /// Radius at or below which the fire cannot catch the player.
    pub grace_radius: f32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            // 0.15 units per frame at 60 frames per second
            spread_rate: 9.0,
            grace_radius: 100.0,
        }
    }
}

/// Telemetry sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Minimum gap between viewport samples, in milliseconds.
    pub sample_interval_ms: i64,
    /// Number of raw gaze samples averaged into each logged point.
    pub gaze_window: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 250,
            gaze_window: 8,
        }
    }
}

/// Phase progression parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// Warm-up ticks after which the formal trial starts regardless of progress.
    pub warmup_tick_limit: u32,
    /// Level number played during warm-up.
    pub warmup_level: u32,
    /// Level number of the formal trial.
    pub formal_level: u32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            warmup_tick_limit: 1800,
            warmup_level: 5,
            formal_level: 1,
        }
    }
}

/// Complete configuration for one experiment session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub movement: MovementConfig,
    pub fire: FireConfig,
    pub telemetry: TelemetryConfig,
    pub phase: PhaseConfig,
}

impl ExperimentConfig {
    /// Loads a configuration file, filling unspecified values with defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
