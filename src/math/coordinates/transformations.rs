//! Coordinate system transformations between different representations.
//!
//! This module provides functions to convert between tile coordinates and
//! world coordinates, and the minimap projection used by the overlay.

use super::constants::{CELL_SIZE, HALF_CELL, MINIMAP_OFFSET};
use crate::maze::Cell;

/// World position of the centre of tile `(0, 0)`.
///
/// # Arguments
/// * `grid_dimensions` - The dimensions of the grid (width, height) in tiles
///
/// # Coordinate System
/// - The grid is centred on the world origin
/// - X increases with the column index
/// - Z increases with the row index
pub fn grid_origin(grid_dimensions: (usize, usize)) -> [f32; 2] {
    let (width, height) = grid_dimensions;
    [
        -(width as f32 * CELL_SIZE) / 2.0,
        -(height as f32 * CELL_SIZE) / 2.0,
    ]
}

/// Converts a world position to the tile containing it.
///
/// `tile = floor((world - origin + HALF_CELL) / CELL_SIZE)` on each axis. The
/// result is signed and unclamped; positions beyond the grid produce
/// out-of-range tiles which the grid classifies as walls. A non-finite
/// coordinate maps to tile `-1` on that axis, which is also out of range.
///
/// # Returns
/// The tile as `(col, row)`
pub fn world_to_tile(world: [f32; 2], origin: [f32; 2]) -> (i64, i64) {
    (
        axis_to_tile(world[0], origin[0]),
        axis_to_tile(world[1], origin[1]),
    )
}

fn axis_to_tile(world: f32, origin: f32) -> i64 {
    let tile = ((world - origin + HALF_CELL) / CELL_SIZE).floor();
    if tile.is_finite() { tile as i64 } else { -1 }
}

/// Converts a tile to the world position of its centre.
pub fn tile_to_world(cell: &Cell, origin: [f32; 2]) -> [f32; 2] {
    [
        origin[0] + cell.col as f32 * CELL_SIZE,
        origin[1] + cell.row as f32 * CELL_SIZE,
    ]
}

/// Projects a world position onto fractional minimap tile coordinates.
///
/// Uses the same cell size and origin as [`world_to_tile`] without the
/// half-cell rounding offset, then shifts by [`MINIMAP_OFFSET`] so the marker
/// sits on the probe footprint rather than the tile corner.
///
/// # Returns
/// `[tx, tz]` in tile units; multiply by the minimap's pixels-per-tile to draw.
pub fn world_to_minimap(world: [f32; 2], grid_dimensions: (usize, usize)) -> [f32; 2] {
    let origin = grid_origin(grid_dimensions);
    [
        (world[0] - origin[0]) / CELL_SIZE + MINIMAP_OFFSET[0],
        (world[1] - origin[1]) / CELL_SIZE + MINIMAP_OFFSET[1],
    ]
}
