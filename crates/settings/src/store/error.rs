//! Error types for the settings store.
//!
//! Invariants:
//! - `SourceError` never escapes the store; it is logged and replaced by an
//!   empty settings map.
//! - `SettingsError` is the only failure a settings lookup can report.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or parsing the settings source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read settings file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that can occur while resolving a setting.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A thread panicked while holding the store lock.
    #[error("Settings store is unavailable: lock poisoned")]
    StorePoisoned,
}
