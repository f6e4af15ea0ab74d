//! Match settings
//!
//! Loaded from an optional JSON file; every field has a default so partial
//! files are fine. Command-line flags are applied on top, then validated.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::error::InitError;
use crate::sim::PLAYER_COUNT;

/// Longest accepted player name, in characters
pub const MAX_NAME_CHARS: usize = 16;

/// Highest accepted tick rate
pub const MAX_TICK_RATE: u32 = 1000;

/// Match settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Left and right player names
    pub player_names: [String; PLAYER_COUNT],
    /// Serve RNG seed; drawn at startup when absent
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Ticks a key counts as held after a press when the terminal
    /// cannot report key releases
    pub fallback_hold_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            seed: None,
            tick_rate: TICK_RATE,
            fallback_hold_ticks: 12,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text; `origin` is only used in errors
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, InitError> {
        serde_json::from_str(json).map_err(|source| InitError::SettingsParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load settings from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, InitError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path).map_err(|source| InitError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings the match cannot run with
    pub fn validate(&self) -> Result<(), InitError> {
        for name in &self.player_names {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(InitError::InvalidSettings(
                    "player names must not be empty".into(),
                ));
            }
            if trimmed.chars().count() > MAX_NAME_CHARS {
                return Err(InitError::InvalidSettings(format!(
                    "player name {trimmed:?} is longer than {MAX_NAME_CHARS} characters"
                )));
            }
        }
        if !(1..=MAX_TICK_RATE).contains(&self.tick_rate) {
            return Err(InitError::InvalidSettings(format!(
                "tick rate must be between 1 and {MAX_TICK_RATE}, got {}",
                self.tick_rate
            )));
        }
        if self.fallback_hold_ticks == 0 {
            return Err(InitError::InvalidSettings(
                "fallback hold must be at least one tick".into(),
            ));
        }
        Ok(())
    }

    /// Names with surrounding whitespace removed
    pub fn names(&self) -> [String; PLAYER_COUNT] {
        self.player_names.clone().map(|n| n.trim().to_string())
    }
}
