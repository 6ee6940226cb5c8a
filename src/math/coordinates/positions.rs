//! Probe footprint and heading helpers.

/// Returns the four corners of the square probe centred on `(x, z)`.
///
/// Corner order is `(+r, +r)`, `(-r, +r)`, `(+r, -r)`, `(-r, -r)`.
pub fn probe_corners(x: f32, z: f32, radius: f32) -> [[f32; 2]; 4] {
    [
        [x + radius, z + radius],
        [x - radius, z + radius],
        [x + radius, z - radius],
        [x - radius, z - radius],
    ]
}

/// Unit direction the player faces for a given yaw, in world `x`/`z`.
///
/// Yaw 0 faces towards negative `z`.
pub fn yaw_to_forward(yaw: f32) -> [f32; 2] {
    [-yaw.sin(), -yaw.cos()]
}

/// End offset of the minimap heading line drawn from the player marker.
pub fn minimap_heading(yaw: f32, length: f32) -> [f32; 2] {
    let forward = yaw_to_forward(yaw);
    [forward[0] * length, forward[1] * length]
}
