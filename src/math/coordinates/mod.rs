//! Coordinate system transformations for the maze.
//!
//! This module converts between the coordinate systems used by the experiment:
//! - Tile coordinates: integer `(col, row)` addresses into the level grid
//! - World coordinates: continuous `x`/`z` floor positions where the player moves
//! - Minimap coordinates: fractional tile positions for the overlay marker
//!
//! The grid is centred on the world origin. Tile `(0, 0)` has its centre at the
//! grid origin `(-width * CELL_SIZE / 2, -height * CELL_SIZE / 2)`.

mod positions;
mod transformations;

pub use positions::*;
pub use transformations::*;

/// Constants for the world/tile layout
pub mod constants {
    /// Edge length of one tile in world units.
    pub const CELL_SIZE: f32 = 100.0;

    /// Offset from a tile centre to its edge.
    pub const HALF_CELL: f32 = 50.0;

    /// Half-width of the square collision probe around the player.
    pub const PROBE_RADIUS: f32 = 15.0;

    /// Empirical offset that centres the minimap marker on the probe footprint.
    pub const MINIMAP_OFFSET: [f32; 2] = [0.2, 0.4];
}
