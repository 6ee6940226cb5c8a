//! Telemetry record types.
//!
//! Field names follow the export format consumed by the analysis scripts:
//! viewport samples use `rot` and `fog`, the gaze log is called `eye`.

use crate::config::ExperimentMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Player viewport at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSample {
    /// Wall-clock time in milliseconds.
    pub t: i64,
    pub x: f32,
    pub z: f32,
    #[serde(rename = "rot")]
    pub yaw: f32,
    #[serde(rename = "fog")]
    pub fog_density: f32,
    pub fire_radius: f32,
}

/// One smoothed on-screen gaze estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Wall-clock time in milliseconds.
    pub t: i64,
    pub x: f32,
    pub y: f32,
}

/// Minimap interaction counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimapLog {
    /// Pointer-move events per tile, keyed `"col,row"`.
    pub hovers: BTreeMap<String, u32>,
}

/// Everything collected during a session, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub mode: ExperimentMode,
    pub viewport: Vec<ViewportSample>,
    pub eye: Vec<GazeSample>,
    pub minimap: MinimapLog,
}

impl TelemetryRecord {
    /// Pretty-printed JSON, as written to the download file.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// File name for an export written at `timestamp_ms`.
    pub fn file_name(timestamp_ms: i64) -> String {
        format!("maze_study_{timestamp_ms}.json")
    }

    /// Writes the record to `dir`, named after the current time.
    ///
    /// # Returns
    /// The path of the written file.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let output_path = dir.join(Self::file_name(chrono::Utc::now().timestamp_millis()));
        let json = self.to_json_pretty().map_err(io::Error::other)?;
        fs::write(&output_path, json)?;
        Ok(output_path)
    }
}
