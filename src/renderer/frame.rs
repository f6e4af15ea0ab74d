//! Frame composition
//!
//! Turns a read-only match snapshot into an ordered draw list. Later
//! commands paint over earlier ones.

use glam::{Affine2, Vec2};

use super::text::{FontFace, Fonts};
use super::vertex::{Color, colors};
use crate::consts::{BALL_SIZE, PADDLE_WIDTH, SCREEN_WIDTH};
use crate::sim::{MatchState, Side};

/// Avatar squares in the top corners
pub const AVATAR_SIZE: f32 = 32.0;
pub const AVATAR_MARGIN: f32 = 10.0;
/// Distance of name/score text from the screen edge
pub const TEXT_INSET: f32 = 45.0;
pub const NAME_TOP: f32 = 10.0;
pub const SCORE_BASELINE: f32 = 42.0;
pub const ROUND_CENTER_Y: f32 = 26.0;

/// Which point of a text run its anchor x refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Center,
    End,
}

/// One drawing operation in logical screen units
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole screen
    Clear(Color),
    /// Solid convex quad, corners in winding order
    Quad { corners: [Vec2; 4], color: Color },
    /// Text run; `origin` is the left end of the baseline
    Text {
        text: String,
        face: FontFace,
        origin: Vec2,
        anchor: Anchor,
        anchor_x: f32,
        color: Color,
    },
}

/// Ordered draw list for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    /// Axis-aligned rectangle
    pub fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.sprite(size, Affine2::from_translation(min), color);
    }

    /// Rectangle of `size` anchored at its top-left, then transformed
    pub fn sprite(&mut self, size: Vec2, transform: Affine2, color: Color) {
        let corners = [
            Vec2::ZERO,
            Vec2::new(size.x, 0.0),
            size,
            Vec2::new(0.0, size.y),
        ]
        .map(|c| transform.transform_point2(c));
        self.commands.push(DrawCommand::Quad { corners, color });
    }

    /// Text whose baseline sits at `baseline`, placed by `anchor` at `anchor_x`
    pub fn text(
        &mut self,
        text: impl Into<String>,
        face: FontFace,
        anchor: Anchor,
        anchor_x: f32,
        baseline: f32,
        color: Color,
    ) {
        let text = text.into();
        let (w, _) = face.measure(&text);
        let x = match anchor {
            Anchor::Start => anchor_x,
            Anchor::Center => anchor_x - w / 2.0,
            Anchor::End => anchor_x - w,
        };
        self.commands.push(DrawCommand::Text {
            text,
            face,
            origin: Vec2::new(x, baseline),
            anchor,
            anchor_x,
            color,
        });
    }

    pub fn quads(&self) -> impl Iterator<Item = (&[Vec2; 4], Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Quad { corners, color } => Some((corners, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }
}

/// Build the draw list for `state`
pub fn compose(state: &MatchState, fonts: &Fonts) -> Frame {
    let screen_w = SCREEN_WIDTH as f32;
    let mut frame = Frame::default();

    frame.clear(colors::BACKGROUND);

    let avatar = Vec2::splat(AVATAR_SIZE);
    frame.rect(
        Vec2::splat(AVATAR_MARGIN),
        avatar,
        colors::PLAYERS[Side::Left.index()],
    );
    frame.rect(
        Vec2::new(screen_w - AVATAR_MARGIN - AVATAR_SIZE, AVATAR_MARGIN),
        avatar,
        colors::PLAYERS[Side::Right.index()],
    );

    let field = state.area;
    frame.rect(
        field.top_left.as_vec2(),
        (field.bottom_right - field.top_left).as_vec2(),
        colors::FIELD,
    );

    let half_ball = BALL_SIZE as f32 / 2.0;
    let spin = Affine2::from_translation(state.ball.pos.as_vec2())
        * Affine2::from_angle(state.ball.rotation as f32)
        * Affine2::from_translation(Vec2::splat(-half_ball));
    frame.sprite(Vec2::splat(BALL_SIZE as f32), spin, colors::BALL);

    for side in Side::ALL {
        let player = state.player(side);
        let color = colors::PLAYERS[side.index()];
        let (anchor, x) = match side {
            Side::Left => (Anchor::Start, TEXT_INSET),
            Side::Right => (Anchor::End, screen_w - TEXT_INSET),
        };
        let (_, name_h) = fonts.names.measure(&player.name);
        frame.text(&player.name, fonts.names, anchor, x, NAME_TOP + name_h, color);
        frame.text(
            player.score.to_string(),
            fonts.numbers,
            anchor,
            x,
            SCORE_BASELINE,
            color,
        );
    }

    let round = state.round.to_string();
    let (_, round_h) = fonts.numbers.measure(&round);
    frame.text(
        round,
        fonts.numbers,
        Anchor::Center,
        screen_w / 2.0,
        ROUND_CENTER_Y + round_h / 2.0,
        colors::ROUND,
    );

    // The left paddle extends behind its anchor, the right one in front
    for side in Side::ALL {
        let player = state.player(side);
        let offset = match side {
            Side::Left => -PADDLE_WIDTH,
            Side::Right => 0.0,
        };
        frame.rect(
            Vec2::new((player.pos.x + offset) as f32, player.pos.y as f32),
            Vec2::new(PADDLE_WIDTH as f32, player.height as f32),
            colors::PLAYERS[side.index()],
        );
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Point;

    fn text_origin(frame: &Frame, wanted: &str) -> Vec2 {
        frame
            .texts()
            .find_map(|c| match c {
                DrawCommand::Text { text, origin, .. } if text == wanted => Some(*origin),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_layout_order() {
        let state = MatchState::new(1);
        let frame = compose(&state, &Fonts::default());
        assert_eq!(frame.commands[0], DrawCommand::Clear(colors::BACKGROUND));
        // 2 avatars + field + ball + 2 paddles
        assert_eq!(frame.quads().count(), 6);
        // 2 names + 2 scores + round
        assert_eq!(frame.texts().count(), 5);
    }

    #[test]
    fn test_text_alignment() {
        let mut state = MatchState::new(1);
        state.round = 12;
        let frame = compose(&state, &Fonts::default());

        assert_eq!(text_origin(&frame, "Player 1"), Vec2::new(45.0, 20.0));
        // 8 glyphs * 10 units, right-aligned at 275
        assert_eq!(text_origin(&frame, "Player 2"), Vec2::new(195.0, 20.0));
        // "12" is 20 wide and 13 tall, centered on (160, 26)
        assert_eq!(text_origin(&frame, "12"), Vec2::new(150.0, 32.5));
    }

    #[test]
    fn test_paddle_rects() {
        let mut state = MatchState::new(1);
        state.player_mut(Side::Left).pos.y = 60.0;
        let frame = compose(&state, &Fonts::default());
        let quads: Vec<_> = frame.quads().collect();

        let (left, color) = quads[quads.len() - 2];
        assert_eq!(left[0], Vec2::new(20.0, 60.0));
        assert_eq!(left[2], Vec2::new(30.0, 90.0));
        assert_eq!(color, colors::WHITE);

        let (right, color) = quads[quads.len() - 1];
        assert_eq!(right[0], Vec2::new(290.0, 140.0));
        assert_eq!(right[2], Vec2::new(300.0, 170.0));
        assert_eq!(color, colors::BLACK);
    }

    #[test]
    fn test_ball_quad_centered_on_ball() {
        let mut state = MatchState::new(1);
        state.ball.pos = Point::new(100.0, 100.0);
        state.ball.rotation = 0.7;
        let frame = compose(&state, &Fonts::default());
        let (ball, color) = frame.quads().nth(3).unwrap();
        assert_eq!(color, colors::BALL);

        let center = ball.iter().copied().sum::<Vec2>() / 4.0;
        assert!(center.abs_diff_eq(Vec2::new(100.0, 100.0), 1e-4));
        for corner in ball {
            let d = corner.distance(center);
            assert!((d - 50f32.sqrt()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_compose_leaves_state_untouched() {
        let state = MatchState::new(5);
        let before = serde_json::to_string(&state).unwrap();
        let _ = compose(&state, &Fonts::default());
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }
}
