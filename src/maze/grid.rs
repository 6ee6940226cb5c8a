//! The level grid and its cell classification.
//!
//! A [`Grid`] is validated once when it is built and is immutable afterwards;
//! a level change replaces it wholesale.

use crate::error::GridError;
use crate::math::coordinates::grid_origin;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a tile in the level grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index of the tile
    pub row: usize,
    /// Column index of the tile
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Classification of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Walkable floor, code `1`.
    Open,
    /// Solid wall; the variant selects the wall texture and is always above 1.
    Wall(u32),
    /// Player start, code `"D"`. Floor the player can walk back over.
    Spawn,
    /// Goal, code `"A"`. Navigable.
    Exit,
}

impl CellKind {
    /// Whether the tile blocks line of sight on the minimap and in x-ray mode.
    pub fn is_wall(self) -> bool {
        matches!(self, CellKind::Wall(_))
    }

    /// Whether the player's probe may occupy this tile.
    ///
    /// The spawn tile is floor; without it the player could never leave it.
    pub fn is_navigable(self) -> bool {
        matches!(self, CellKind::Open | CellKind::Spawn | CellKind::Exit)
    }

    /// Decodes a numeric cell code.
    fn from_number(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
            return None;
        }
        match value as u32 {
            1 => Some(CellKind::Open),
            variant => Some(CellKind::Wall(variant)),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Open => write!(f, "1"),
            CellKind::Wall(variant) => write!(f, "{variant}"),
            CellKind::Spawn => write!(f, "D"),
            CellKind::Exit => write!(f, "A"),
        }
    }
}

/// A raw cell code as it appears in level JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellCode {
    Number(f64),
    Text(String),
}

impl CellCode {
    /// Decodes the code, accepting numeric strings the way the level files
    /// sometimes encode them.
    pub fn decode(&self) -> Option<CellKind> {
        match self {
            CellCode::Number(value) => CellKind::from_number(*value),
            CellCode::Text(text) => match text.trim() {
                "D" => Some(CellKind::Spawn),
                "A" => Some(CellKind::Exit),
                other => other.parse::<f64>().ok().and_then(CellKind::from_number),
            },
        }
    }
}

impl fmt::Display for CellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellCode::Number(value) => write!(f, "{value}"),
            CellCode::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A validated, rectangular maze layout with exactly one spawn and one exit.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Vec<CellKind>>,
    spawn: Cell,
    exit: Cell,
}

impl Grid {
    /// Builds a grid from classified rows, checking the layout invariants.
    ///
    /// # Errors
    /// - [`GridError::Empty`] if there are no rows or the rows have no cells
    /// - [`GridError::RaggedRow`] if any row length differs from the first
    /// - [`GridError::MissingSpawn`] / [`GridError::MissingExit`] if a marker is absent
    /// - [`GridError::DuplicateSpawn`] / [`GridError::DuplicateExit`] if a marker repeats
    pub fn new(cells: Vec<Vec<CellKind>>) -> Result<Self, GridError> {
        let width = cells.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut spawn = None;
        let mut exit = None;
        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            for (col, kind) in line.iter().enumerate() {
                match kind {
                    CellKind::Spawn if spawn.is_some() => {
                        return Err(GridError::DuplicateSpawn { row, col });
                    }
                    CellKind::Spawn => spawn = Some(Cell::new(row, col)),
                    CellKind::Exit if exit.is_some() => {
                        return Err(GridError::DuplicateExit { row, col });
                    }
                    CellKind::Exit => exit = Some(Cell::new(row, col)),
                    _ => {}
                }
            }
        }

        Ok(Self {
            spawn: spawn.ok_or(GridError::MissingSpawn)?,
            exit: exit.ok_or(GridError::MissingExit)?,
            cells,
        })
    }

    /// Builds a grid from raw level codes.
    ///
    /// # Errors
    /// [`GridError::InvalidCellCode`] for an undecodable code, then everything
    /// [`Grid::new`] reports.
    pub fn from_codes(codes: &[Vec<CellCode>]) -> Result<Self, GridError> {
        let cells = codes
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .map(|(col, code)| {
                        code.decode().ok_or_else(|| GridError::InvalidCellCode {
                            row,
                            col,
                            code: code.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cells)
    }

    /// Classifies the tile at `(tile_x, tile_y)` = `(col, row)`.
    ///
    /// Fails closed: any coordinate outside the grid is a wall.
    pub fn classify(&self, tile_x: i64, tile_y: i64) -> CellKind {
        if tile_x < 0 || tile_y < 0 {
            return CellKind::Wall(u32::MAX);
        }
        self.cells
            .get(tile_y as usize)
            .and_then(|row| row.get(tile_x as usize))
            .copied()
            .unwrap_or(CellKind::Wall(u32::MAX))
    }

    /// Whether `(col, row)` lies inside the grid.
    pub fn contains(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width() && (row as usize) < self.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// `(width, height)` in tiles.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// World position of the centre of tile `(0, 0)`.
    pub fn origin(&self) -> [f32; 2] {
        grid_origin(self.dimensions())
    }

    pub fn spawn(&self) -> Cell {
        self.spawn
    }

    pub fn exit(&self) -> Cell {
        self.exit
    }

    /// Rows of classified tiles, for renderers building wall meshes.
    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codes(json: &str) -> Vec<Vec<CellCode>> {
        serde_json::from_str(json).unwrap()
    }

    /// Tests decoding of every supported code form.
    #[test]
    fn test_decode_codes() {
        assert_eq!(CellCode::Number(1.0).decode(), Some(CellKind::Open));
        assert_eq!(CellCode::Number(3.0).decode(), Some(CellKind::Wall(3)));
        assert_eq!(CellCode::Text("D".into()).decode(), Some(CellKind::Spawn));
        assert_eq!(CellCode::Text("A".into()).decode(), Some(CellKind::Exit));
        assert_eq!(CellCode::Text("2".into()).decode(), Some(CellKind::Wall(2)));
        assert_eq!(CellCode::Number(0.0).decode(), None);
        assert_eq!(CellCode::Number(1.5).decode(), None);
        assert_eq!(CellCode::Text("X".into()).decode(), None);
    }

    /// Tests that a well-formed level builds and records its markers.
    #[test]
    fn test_valid_grid() {
        let grid = Grid::from_codes(&codes(r#"[[2,2,2],[2,"D",2],[2,1,2],[2,"A",2]]"#)).unwrap();
        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid.spawn(), Cell::new(1, 1));
        assert_eq!(grid.exit(), Cell::new(3, 1));
        assert_eq!(grid.classify(1, 2), CellKind::Open);
        assert_eq!(grid.classify(0, 0), CellKind::Wall(2));
    }

    /// Tests that a grid with no markers is rejected.
    #[test]
    fn test_missing_markers() {
        let err = Grid::from_codes(&codes("[[1,1],[1,1]]")).unwrap_err();
        assert_eq!(err, GridError::MissingSpawn);

        let err = Grid::from_codes(&codes(r#"[["D",1],[1,1]]"#)).unwrap_err();
        assert_eq!(err, GridError::MissingExit);
    }

    #[test]
    fn test_duplicate_markers() {
        let err = Grid::from_codes(&codes(r#"[["D","D"],[1,"A"]]"#)).unwrap_err();
        assert_eq!(err, GridError::DuplicateSpawn { row: 0, col: 1 });

        let err = Grid::from_codes(&codes(r#"[["D","A"],["A",1]]"#)).unwrap_err();
        assert_eq!(err, GridError::DuplicateExit { row: 1, col: 0 });
    }

    /// Tests that ragged and empty layouts are rejected.
    #[test]
    fn test_shape_errors() {
        let err = Grid::from_codes(&codes(r#"[["D",1,1],[1,"A"]]"#)).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(Grid::from_codes(&codes("[]")).unwrap_err(), GridError::Empty);
        assert_eq!(Grid::from_codes(&codes("[[]]")).unwrap_err(), GridError::Empty);
    }

    #[test]
    fn test_invalid_code_position() {
        let err = Grid::from_codes(&codes(r#"[["D",0],[1,"A"]]"#)).unwrap_err();
        assert!(matches!(err, GridError::InvalidCellCode { row: 0, col: 1, .. }));
    }

    proptest! {
        /// Any tile outside the grid classifies as a wall.
        #[test]
        fn out_of_bounds_is_wall(x in -1000i64..1000, y in -1000i64..1000) {
            let grid = Grid::from_codes(&codes(r#"[["D",1,1],[1,1,"A"]]"#)).unwrap();
            prop_assume!(!grid.contains(x, y));
            prop_assert!(grid.classify(x, y).is_wall());
        }
    }
}
