//! Platform abstraction layer
//!
//! Host-side concerns the simulation never sees:
//! - Held-key tracking from press/release events
//! - Fixed-rate frame pacing
//! - Terminal presentation and keyboard input

pub mod input;
pub mod terminal;
pub mod time;

pub use input::{Control, KeyReporting, KeyTracker};
pub use terminal::TerminalHost;
pub use time::Pacer;
