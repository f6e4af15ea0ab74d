//! Flat 2D geometry for the playfield
//!
//! Screen convention: x grows to the right, y grows downward, so "above"
//! means a smaller y.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A position or a per-tick displacement
pub type Point = DVec2;

/// Strict directional comparisons between two points (no epsilon)
pub trait Direction {
    fn right_of(self, other: Point) -> bool;
    fn left_of(self, other: Point) -> bool;
    fn above(self, other: Point) -> bool;
    fn below(self, other: Point) -> bool;
}

impl Direction for Point {
    #[inline]
    fn right_of(self, other: Point) -> bool {
        self.x > other.x
    }

    #[inline]
    fn left_of(self, other: Point) -> bool {
        self.x < other.x
    }

    #[inline]
    fn above(self, other: Point) -> bool {
        self.y < other.y
    }

    #[inline]
    fn below(self, other: Point) -> bool {
        self.y > other.y
    }
}

/// Axis-aligned rectangle bounding the ball and paddles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Area {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        debug_assert!(
            top_left.x < bottom_right.x && top_left.y < bottom_right.y,
            "degenerate area {top_left} -> {bottom_right}"
        );
        Self {
            top_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.bottom_right.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom_right.y
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn center_x(&self) -> f64 {
        self.left() + self.width() / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top() + self.height() / 2.0
    }
}
