//! Pong - two paddles, one ball, a fixed 320x240 field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, collisions, scoring)
//! - `renderer`: Draw-list composition, tessellation and CPU rasterization
//! - `platform`: Host concerns (key tracking, frame pacing, terminal)
//! - `driver`: The fixed-rate poll/update/render loop
//! - `settings`: Player-facing configuration

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{HostError, InitError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen size
    pub const SCREEN_WIDTH: f64 = 320.0;
    pub const SCREEN_HEIGHT: f64 = 240.0;
    pub const WINDOW_TITLE: &str = "Pong";

    /// Target simulation rate; each tick is one fixed step
    pub const TICK_RATE: u32 = 60;
    /// Frame pacer re-anchors instead of catching up past this many ticks
    pub const MAX_LAG_TICKS: u32 = 8;

    /// Playfield corners
    pub const FIELD_LEFT: f64 = 10.0;
    pub const FIELD_TOP: f64 = 50.0;
    pub const FIELD_RIGHT: f64 = 310.0;
    pub const FIELD_BOTTOM: f64 = 230.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 10.0;
    pub const PADDLE_HEIGHT: f64 = 30.0;
    /// Distance of a paddle's anchor x from its field edge
    pub const PADDLE_INSET: f64 = 20.0;
    /// Distance of the collision line from its field edge
    pub const PADDLE_LINE_INSET: f64 = 25.0;
    /// Units moved per tick while a control is held
    pub const PADDLE_SPEED: f64 = 1.0;

    /// Ball defaults
    /// Wall/goal margin, roughly the ball radius
    pub const BALL_MARGIN: f64 = 5.0;
    pub const BALL_SIZE: f64 = 10.0;
    /// Cosmetic spin added per tick
    pub const BALL_SPIN_STEP: f64 = 0.05;
    pub const BALL_SPIN_WRAP: f64 = 360.0;
    /// Horizontal serve speed
    pub const SERVE_SPEED: f64 = 1.0;
}
