//! Monospace text metrics
//!
//! Layout only needs widths (to right-align and center) and a cap height
//! (to place baselines), so faces are described by fixed per-glyph metrics.

/// Fixed-pitch font face metrics, in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontFace {
    pub name: &'static str,
    /// Horizontal advance per glyph
    pub advance: f32,
    /// Height of the tallest glyph above the baseline
    pub height: f32,
}

/// 10pt pixel arcade face used for names
pub const ARCADE: FontFace = FontFace {
    name: "arcade",
    advance: 10.0,
    height: 10.0,
};

/// 18pt rounded face used for scores and the round counter
pub const ROUNDED: FontFace = FontFace {
    name: "rounded",
    advance: 10.0,
    height: 13.0,
};

impl FontFace {
    /// Bounding (width, height) of `text`
    pub fn measure(&self, text: &str) -> (f32, f32) {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return (0.0, 0.0);
        }
        (glyphs as f32 * self.advance, self.height)
    }
}

/// Faces used by the match layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fonts {
    pub names: FontFace,
    pub numbers: FontFace,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            names: ARCADE,
            numbers: ROUNDED,
        }
    }
}
