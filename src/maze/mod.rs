//! Level grids and level loading.
//!
//! This module provides the grid model and the loaders that fetch level layouts
//! by number. Level files are JSON arrays of rows, each row an array of cell
//! codes:
//!
//! ```text
//! [[2, 2,  2 ],
//!  [2, "D", 2],
//!  [2, 1,  2 ],
//!  [2, "A", 2]]
//! ```
//!
//! `1` is open floor, integers above 1 are wall variants, `"D"` marks the spawn
//! and `"A"` the exit.

pub mod grid;

pub use grid::{Cell, CellCode, CellKind, Grid};

use crate::error::LevelError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Decodes a level from its JSON text.
///
/// # Errors
/// [`LevelError::Parse`] if the text is not an array of arrays of cell codes,
/// [`LevelError::Invalid`] if the layout breaks a grid invariant.
pub fn parse_level(level: u32, json: &str) -> Result<Grid, LevelError> {
    let codes: Vec<Vec<CellCode>> =
        serde_json::from_str(json).map_err(|source| LevelError::Parse { level, source })?;
    Grid::from_codes(&codes).map_err(|source| LevelError::Invalid { level, source })
}

/// Something that can produce the grid for a level number.
///
/// Transport is up to the implementation; the session only ever sees a
/// validated [`Grid`].
pub trait LevelSource {
    fn load(&mut self, level: u32) -> Result<Grid, LevelError>;
}

/// Loads `maze3d-<level>.json` files from a directory.
#[derive(Debug, Clone)]
pub struct FileLevelSource {
    dir: PathBuf,
}

impl FileLevelSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `level`.
    pub fn level_path(&self, level: u32) -> PathBuf {
        self.dir.join(format!("maze3d-{level}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LevelSource for FileLevelSource {
    fn load(&mut self, level: u32) -> Result<Grid, LevelError> {
        let path = self.level_path(level);
        let json = fs::read_to_string(&path).map_err(|source| LevelError::Io {
            level,
            path: path.clone(),
            source,
        })?;
        let grid = parse_level(level, &json)?;
        tracing::debug!(
            level,
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            "loaded level"
        );
        Ok(grid)
    }
}

/// Serves pre-built grids, for tests and embedded levels.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLevels {
    levels: HashMap<u32, Grid>,
}

impl InMemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: u32, grid: Grid) -> Self {
        self.levels.insert(level, grid);
        self
    }
}

impl LevelSource for InMemoryLevels {
    fn load(&mut self, level: u32) -> Result<Grid, LevelError> {
        self.levels
            .get(&level)
            .cloned()
            .ok_or(LevelError::NotFound(level))
    }
}
