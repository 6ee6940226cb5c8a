//! Grid-based collision detection for the player probe.
//!
//! # Overview
//!
//! The player is represented by a square probe centred on their position. A
//! candidate position is accepted only when all four probe corners land on
//! navigable tiles. There is no swept test and no wall sliding: a rejected
//! move leaves the player where they were.
//!
//! A probe step of more than one tile per tick can skip over a single-tile
//! wall. Translation steps are far smaller than a tile, so this does not occur
//! with the reference settings.

use crate::math::coordinates::{probe_corners, world_to_tile};
use crate::maze::Grid;

/// Result of probing a candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Every corner lies on a navigable tile.
    pub navigable: bool,
    /// At least one corner lies on the exit tile.
    pub touches_exit: bool,
}

/// Resolves whether world positions are open to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSystem {
    /// Half-width of the square probe.
    pub probe_radius: f32,
}

impl CollisionSystem {
    pub fn new(probe_radius: f32) -> Self {
        Self { probe_radius }
    }

    /// Whether the single world point `(x, z)` lies on an open or exit tile.
    pub fn is_navigable(grid: &Grid, x: f32, z: f32) -> bool {
        let (col, row) = world_to_tile([x, z], grid.origin());
        grid.classify(col, row).is_navigable()
    }

    /// Probes all four corners around a candidate centre.
    ///
    /// Every corner is evaluated, so an exit touched by any corner is reported
    /// even when another corner is blocked.
    pub fn probe(&self, grid: &Grid, x: f32, z: f32) -> ProbeOutcome {
        let origin = grid.origin();
        let mut outcome = ProbeOutcome {
            navigable: true,
            touches_exit: false,
        };
        for corner in probe_corners(x, z, self.probe_radius) {
            let (col, row) = world_to_tile(corner, origin);
            let kind = grid.classify(col, row);
            outcome.navigable &= kind.is_navigable();
            outcome.touches_exit |= kind == crate::maze::CellKind::Exit;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::coordinates::tile_to_world;
    use crate::maze::{Cell, parse_level};

    fn corridor() -> Grid {
        parse_level(
            0,
            r#"[[2,2,2,2],
                [2,"D",1,2],
                [2,2,"A",2],
                [2,2,2,2]]"#,
        )
        .unwrap()
    }

    /// Tests point navigability across tile kinds.
    #[test]
    fn test_is_navigable() {
        let grid = corridor();
        let origin = grid.origin();
        let open = tile_to_world(&Cell::new(1, 2), origin);
        let wall = tile_to_world(&Cell::new(0, 0), origin);
        let exit = tile_to_world(&Cell::new(2, 2), origin);
        let spawn = tile_to_world(&Cell::new(1, 1), origin);

        assert!(CollisionSystem::is_navigable(&grid, open[0], open[1]));
        assert!(!CollisionSystem::is_navigable(&grid, wall[0], wall[1]));
        assert!(CollisionSystem::is_navigable(&grid, exit[0], exit[1]));
        assert!(CollisionSystem::is_navigable(&grid, spawn[0], spawn[1]));
        assert!(!CollisionSystem::is_navigable(&grid, 10_000.0, 0.0));
    }

    /// Tests that a centred probe fits inside a tile but not across a wall edge.
    #[test]
    fn test_probe_corners_against_walls() {
        let grid = corridor();
        let collision = CollisionSystem::new(15.0);
        let spawn = tile_to_world(&Cell::new(1, 1), grid.origin());

        let centred = collision.probe(&grid, spawn[0], spawn[1]);
        assert!(centred.navigable);
        assert!(!centred.touches_exit);

        // 40 units left puts the left corners across the tile edge into a wall.
        let against_wall = collision.probe(&grid, spawn[0] - 40.0, spawn[1]);
        assert!(!against_wall.navigable);
    }

    /// Tests that touching the exit is reported even when the move is blocked.
    #[test]
    fn test_probe_reports_exit() {
        let grid = corridor();
        let collision = CollisionSystem::new(15.0);
        let open = tile_to_world(&Cell::new(1, 2), grid.origin());

        // Straddles the open tile and the exit below it.
        let into_exit = collision.probe(&grid, open[0], open[1] + 40.0);
        assert!(into_exit.touches_exit);
        assert!(into_exit.navigable);

        // Straddles the exit and the wall to its left.
        let exit_and_wall = collision.probe(&grid, open[0] - 40.0, open[1] + 40.0);
        assert!(exit_and_wall.touches_exit);
        assert!(!exit_and_wall.navigable);
    }

    /// Tests that a non-finite position is never navigable.
    #[test]
    fn test_probe_non_finite_is_wall() {
        let grid = parse_level(0, r#"[["D",1],[1,"A"]]"#).unwrap();
        let collision = CollisionSystem::new(15.0);
        for (x, z) in [(f32::NAN, 0.0), (0.0, f32::NAN), (f32::INFINITY, f32::NEG_INFINITY)] {
            let outcome = collision.probe(&grid, x, z);
            assert!(!outcome.navigable);
            assert!(!outcome.touches_exit);
            assert!(!CollisionSystem::is_navigable(&grid, x, z));
        }
    }
}
