//! CPU rasterizer for triangle lists
//!
//! Flat-shaded (each triangle takes its first vertex's color), no blending.
//! A pixel is covered when its center lies inside or on a triangle.

use std::io::{self, Write};

use glam::Vec2;

use super::vertex::{Vertex, to_rgba8};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// RGBA8 pixel buffer covering the logical screen at some resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// Logical units to pixels
    scale: Vec2,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    /// A `width` x `height` pixel canvas stretched over the logical screen
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            scale: Vec2::new(
                width as f32 / SCREEN_WIDTH as f32,
                height as f32 / SCREEN_HEIGHT as f32,
            ),
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
        }
    }

    /// One pixel per logical unit
    pub fn logical() -> Self {
        Self::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Rasterize a triangle list; a trailing partial triangle is ignored
    pub fn draw_triangles(&mut self, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            let [a, b, c] = [&tri[0], &tri[1], &tri[2]].map(|v| Vec2::from(v.position) * self.scale);
            self.fill_triangle(a, b, c, to_rgba8(tri[0].color));
        }
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, rgba: [u8; 4]) {
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        let min = a.min(b).min(c).floor().max(Vec2::ZERO);
        let max = a
            .max(b)
            .max(c)
            .ceil()
            .min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        for y in min.y as u32..max.y as u32 {
            for x in min.x as u32..max.x as u32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.pixels[(y * self.width + x) as usize] = rgba;
                }
            }
        }
    }

    /// Write as a PAM (P7, RGB_ALPHA) image
    pub fn write_pam<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(
            out,
            "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n",
            self.width, self.height
        )?;
        out.write_all(self.as_bytes())?;
        out.flush()
    }
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}
