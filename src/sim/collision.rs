//! Collision and scoring predicates
//!
//! A paddle is modeled as a defensive line, not a solid box: it can only
//! deflect a ball that crosses its line during the current tick while
//! heading toward it. A ball that is already past the line, already moving
//! away, or outside the paddle's vertical extent passes unobstructed.

use super::geometry::{Area, Direction, Point};
use super::state::{Ball, Player, Side, Wall};
use crate::consts::{BALL_MARGIN, PADDLE_LINE_INSET};

/// The only paddle a ball moving with horizontal velocity `vx` can hit
#[inline]
pub fn approached_side(vx: f64) -> Side {
    if vx > 0.0 { Side::Right } else { Side::Left }
}

/// x coordinate of a paddle's collision line
#[inline]
pub fn paddle_line(area: &Area, side: Side) -> f64 {
    match side {
        Side::Left => area.left() + PADDLE_LINE_INSET,
        Side::Right => area.right() - PADDLE_LINE_INSET,
    }
}

/// Whether moving from `pos` by `vel` crosses `line` this tick, toward `side`
///
/// The start must be strictly short of the line; landing exactly on it counts.
pub fn crosses_line(pos: Point, vel: Point, line: f64, side: Side) -> bool {
    let mark = Point::new(line, pos.y);
    let next = pos + vel;
    match side {
        Side::Right => pos.left_of(mark) && !next.left_of(mark),
        Side::Left => pos.right_of(mark) && !next.right_of(mark),
    }
}

/// Vertical velocity adjustment for a ball struck at `ball_y`
///
/// Ranges over `[-0.5, 0.5)`: the paddle top gives -0.5, its center 0.
#[inline]
pub fn deflection(ball_y: f64, paddle: &Player) -> f64 {
    (ball_y - paddle.pos.y) / paddle.height - 0.5
}

/// Test the ball against the paddle on `side`, using pre-move positions
///
/// Returns the deflection to apply when the paddle hits the ball.
pub fn paddle_hit(ball: &Ball, paddle: &Player, area: &Area, side: Side) -> Option<f64> {
    let line = paddle_line(area, side);
    if crosses_line(ball.pos, ball.vel, line, side) && paddle.spans(ball.pos.y) {
        Some(deflection(ball.pos.y, paddle))
    } else {
        None
    }
}

/// y the ball is snapped to when it touches `wall`
#[inline]
pub fn wall_limit(area: &Area, wall: Wall) -> f64 {
    match wall {
        Wall::Top => area.top() + BALL_MARGIN,
        Wall::Bottom => area.bottom() - BALL_MARGIN,
    }
}

/// Whether a ball at height `y` is touching or beyond `wall`
#[inline]
pub fn touches_wall(y: f64, area: &Area, wall: Wall) -> bool {
    let limit = wall_limit(area, wall);
    match wall {
        Wall::Top => y <= limit,
        Wall::Bottom => y >= limit,
    }
}

/// Whether a ball at `x` has reached the goal behind `side`'s paddle
#[inline]
pub fn in_goal(x: f64, area: &Area, side: Side) -> bool {
    match side {
        Side::Left => x <= area.left() + BALL_MARGIN,
        Side::Right => x >= area.right() - BALL_MARGIN,
    }
}
