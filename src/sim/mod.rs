//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use geometry::{Area, Direction, Point};
pub use state::{Ball, MatchEvent, MatchState, Player, Side, Wall, PLAYER_COUNT};
pub use tick::{TickInput, tick, update};
