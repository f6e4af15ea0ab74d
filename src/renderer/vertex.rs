//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Linear RGBA, each channel in 0..=1
pub type Color = [f32; 4];

/// Simple 2D vertex with position (logical units) and color
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

/// Quantize a color to 8-bit RGBA
pub fn to_rgba8(color: Color) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

const fn gray(level: u8) -> Color {
    let v = level as f32 / 255.0;
    [v, v, v, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, gray};

    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const GRAY: Color = gray(100);
    pub const LIGHT_GRAY: Color = gray(200);

    pub const BACKGROUND: Color = RED;
    pub const FIELD: Color = GRAY;
    pub const BALL: Color = LIGHT_GRAY;
    pub const ROUND: Color = GREEN;
    /// Avatar, paddle and text color per player
    pub const PLAYERS: [Color; 2] = [WHITE, BLACK];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba8() {
        assert_eq!(to_rgba8(colors::RED), [255, 0, 0, 255]);
        assert_eq!(to_rgba8(colors::GRAY), [100, 100, 100, 255]);
        assert_eq!(to_rgba8([2.0, -1.0, 0.5, 1.0]), [255, 0, 128, 255]);
    }

    #[test]
    fn test_vertex_is_tightly_packed() {
        let v = [Vertex::new(1.0, 2.0, colors::WHITE)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), 24);
    }
}
