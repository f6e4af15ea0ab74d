//! Error types
//!
//! Only startup and the host can fail; the simulation itself is total.

use std::io;
use std::path::PathBuf;

/// Fatal startup failure
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to read settings {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("terminal setup failed: {0}")]
    Terminal(#[source] io::Error),
}

/// Failure while polling input or presenting a frame
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
