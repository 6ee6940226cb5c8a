//! Experiment telemetry.
//!
//! This module collects the data exported at the end of a session:
//!
//! - **Viewport log**: player position, heading, fog, and fire radius, sampled
//!   at most once per interval so the log size does not depend on frame rate
//! - **Gaze log**: raw gaze estimates smoothed over a short sliding window
//! - **Hover counts**: how often the pointer moved over each minimap tile
//!
//! All three logs are append-only. [`TelemetryLogger::export`] is read-only
//! and may be called any number of times.

/// Record types and serialization
///
/// Contains the sample structs and the exported record.
pub mod data;

/// Gaze smoothing
pub mod gaze;


pub use data::{GazeSample, MinimapLog, TelemetryRecord, ViewportSample};
pub use gaze::GazeSmoother;

use crate::config::{ExperimentMode, TelemetryConfig};
use crate::game::player::Pose;

/// Accumulates viewport, gaze, and hover telemetry for one session.
#[derive(Debug, Clone)]
pub struct TelemetryLogger {
    mode: ExperimentMode,
    sample_interval_ms: i64,
    last_sample_ms: Option<i64>,
    viewport: Vec<ViewportSample>,
    eye: Vec<GazeSample>,
    smoother: GazeSmoother,
    minimap: MinimapLog,
}

impl TelemetryLogger {
    pub fn new(mode: ExperimentMode, config: &TelemetryConfig) -> Self {
        Self {
            mode,
            sample_interval_ms: config.sample_interval_ms,
            last_sample_ms: None,
            viewport: Vec::new(),
            eye: Vec::new(),
            smoother: GazeSmoother::new(config.gaze_window),
            minimap: MinimapLog::default(),
        }
    }

    /// Appends a viewport sample if more than the sample interval has passed
    /// since the previous one. The first call always samples.
    ///
    /// # Returns
    /// Whether a sample was appended.
    pub fn sample_if_due(
        &mut self,
        now_ms: i64,
        pose: &Pose,
        fog_density: f32,
        fire_radius: f32,
    ) -> bool {
        if let Some(last) = self.last_sample_ms {
            if now_ms - last <= self.sample_interval_ms {
                return false;
            }
        }
        self.viewport.push(ViewportSample {
            t: now_ms,
            x: pose.x,
            z: pose.z,
            yaw: pose.yaw,
            fog_density,
            fire_radius,
        });
        self.last_sample_ms = Some(now_ms);
        true
    }

    /// Smooths a raw gaze point and appends the result to the gaze log.
    pub fn ingest_gaze(&mut self, now_ms: i64, x: f32, y: f32) -> GazeSample {
        let [mean_x, mean_y] = self.smoother.push(x, y);
        let sample = GazeSample {
            t: now_ms,
            x: mean_x,
            y: mean_y,
        };
        self.eye.push(sample);
        sample
    }

    /// Counts one pointer-move over minimap tile `(col, row)`.
    ///
    /// # Returns
    /// The tile's updated count.
    pub fn record_hover(&mut self, col: usize, row: usize) -> u32 {
        let count = self
            .minimap
            .hovers
            .entry(format!("{col},{row}"))
            .or_insert(0);
        *count += 1;
        *count
    }

    pub fn mode(&self) -> ExperimentMode {
        self.mode
    }

    pub fn viewport(&self) -> &[ViewportSample] {
        &self.viewport
    }

    pub fn eye(&self) -> &[GazeSample] {
        &self.eye
    }

    pub fn hovers(&self) -> &MinimapLog {
        &self.minimap
    }

    /// Snapshot of everything collected so far.
    pub fn export(&self) -> TelemetryRecord {
        tracing::debug!(
            viewport = self.viewport.len(),
            eye = self.eye.len(),
            hover_tiles = self.minimap.hovers.len(),
            "exporting telemetry"
        );
        TelemetryRecord {
            mode: self.mode,
            viewport: self.viewport.clone(),
            eye: self.eye.clone(),
            minimap: self.minimap.clone(),
        }
    }
}
