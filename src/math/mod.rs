//! Math utilities for the maze floor plane.
//!
//! All simulation geometry lives on the horizontal `x`/`z` plane; height is a
//! rendering concern and never enters the core.

pub mod coordinates;

/// Euclidean distance between two points on the floor plane.
pub fn planar_distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dz = a[1] - b[1];
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests distance on a 3-4-5 triangle.
    #[test]
    fn test_planar_distance() {
        assert_eq!(planar_distance([0.0, 0.0], [3.0, 4.0]), 5.0);
        assert_eq!(planar_distance([-10.0, 2.0], [-10.0, 2.0]), 0.0);
    }
}
