//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, 0..1 per channel
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// CSS `rgba()` string for canvas fill styles
pub fn css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER_FLAT: Color = [0.0, 1.0, 1.0, 1.0]; // Cyan
    pub const PLAYER_DEPTH: Color = [0.0, 1.0, 0.0, 1.0];
    pub const PROJECTILE: Color = [1.0, 1.0, 0.0, 1.0];
    pub const HOSTILE: Color = [1.0, 0.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}
