//! Triangle-list generation for frame primitives

use glam::Vec2;

use super::frame::{DrawCommand, Frame};
use super::vertex::{Color, Vertex};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Two triangles covering a convex quad
pub fn quad(corners: &[Vec2; 4], color: Color) -> [Vertex; 6] {
    let v = corners.map(|c| Vertex::new(c.x, c.y, color));
    [v[0], v[1], v[2], v[0], v[2], v[3]]
}

/// Full-screen quad
pub fn screen(color: Color) -> [Vertex; 6] {
    let (w, h) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
    quad(
        &[
            Vec2::ZERO,
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ],
        color,
    )
}

/// Flatten a frame's geometry into a triangle list, in paint order
///
/// Text runs carry no geometry and are skipped.
pub fn tessellate(frame: &Frame) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(frame.commands.len() * 6);
    for command in &frame.commands {
        match command {
            DrawCommand::Clear(color) => vertices.extend(screen(*color)),
            DrawCommand::Quad { corners, color } => vertices.extend(quad(corners, *color)),
            DrawCommand::Text { .. } => {}
        }
    }
    vertices
}
