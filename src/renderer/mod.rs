//! Rendering module
//!
//! Rendering is a pure consumer of the match: `frame::compose` builds a draw
//! list from a shared reference, `shapes` tessellates it and `canvas`
//! rasterizes it on the CPU. Hosts decide where pixels and text end up.

pub mod canvas;
pub mod frame;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use canvas::Canvas;
pub use frame::{Anchor, DrawCommand, Frame, compose};
pub use text::{FontFace, Fonts};
pub use vertex::Vertex;

use crate::error::HostError;
use crate::sim::MatchState;

/// Something that can present a match snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &MatchState) -> Result<(), HostError>;
}

/// Off-screen renderer that keeps the last frame's pixels and text
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    fonts: Fonts,
    canvas: Canvas,
    frame: Frame,
    frames_rendered: u64,
}

impl CanvasRenderer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            fonts: Fonts::default(),
            canvas,
            frame: Frame::default(),
            frames_rendered: 0,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draw list of the last rendered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, snapshot: &MatchState) -> Result<(), HostError> {
        self.frame = compose(snapshot, &self.fonts);
        self.canvas.draw_triangles(&shapes::tessellate(&self.frame));
        self.frames_rendered += 1;
        Ok(())
    }
}
