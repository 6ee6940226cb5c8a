//! Error types for level loading, configuration, and session control.
//!
//! Out-of-bounds tile queries are deliberately absent here: they classify as
//! walls and never fail.

use std::path::PathBuf;

/// A level grid that violates the layout invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The grid has no rows, or its first row has no cells.
    #[error("grid is empty")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell code is not `1`, an integer wall variant above 1, `"D"`, or `"A"`.
    #[error("invalid cell code {code} at row {row}, column {col}")]
    InvalidCellCode { row: usize, col: usize, code: String },
    #[error("grid has no spawn cell (\"D\")")]
    MissingSpawn,
    #[error("grid has no exit cell (\"A\")")]
    MissingExit,
    #[error("grid has more than one spawn cell; second at row {row}, column {col}")]
    DuplicateSpawn { row: usize, col: usize },
    #[error("grid has more than one exit cell; second at row {row}, column {col}")]
    DuplicateExit { row: usize, col: usize },
}

/// Failure to fetch or decode a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level {level} from {path}")]
    Io {
        level: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level {level} is not a valid JSON cell array")]
    Parse {
        level: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {level} has an invalid layout")]
    Invalid {
        level: u32,
        #[source]
        source: GridError,
    },
    #[error("level {0} is not available")]
    NotFound(u32),
}

/// Failure to load an experiment configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Misuse of the session's level reload protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no level load is pending")]
    NoPendingLevel,
    #[error("level {found} was delivered while level {expected} is pending")]
    UnexpectedLevel { expected: u32, found: u32 },
}

/// A malformed line in an input script.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("script line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}
