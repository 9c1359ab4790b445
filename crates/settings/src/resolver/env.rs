//! Environment overlay for settings lookups.
//!
//! Responsibilities:
//! - Map dotted paths to environment variable names.
//! - Read environment variables for fallback lookups.
//! - Load a `.env` file into the process environment on request.
//!
//! Does NOT handle:
//! - Precedence between sources (see `chain.rs`).
//!
//! Invariants:
//! - The environment is read on every lookup; nothing is cached.
//! - `.env` loading is opt-in and gated by `DOTENV_DISABLED`.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::constants::DOTENV_DISABLED_ENV;

/// Errors from loading a `.env` file.
#[derive(Debug, Error)]
pub enum DotenvError {
    /// SAFETY: Only the byte index is reported, never the offending line.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    Parse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    Io { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    Unknown,
}

/// Maps a dotted path to its environment variable name: `db.port` -> `DB_PORT`.
pub fn env_var_name(path: &str) -> String {
    path.to_uppercase().replace('.', "_")
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Looks up the environment fallback for a dotted path.
///
/// Values are returned verbatim. Non-unicode values are treated as unset.
pub(crate) fn lookup_env(path: &str) -> Option<String> {
    std::env::var(env_var_name(path)).ok()
}

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from a `.env` file in the working directory.
///
/// Missing files are silently ignored. Set `DOTENV_DISABLED` to `1` or
/// `true` to skip loading entirely.
pub fn load_dotenv() -> Result<(), DotenvError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(dotenvy::Error::Io(io_err)) if io_err.kind() == ErrorKind::NotFound => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(DotenvError::Parse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(DotenvError::Io {
            kind: io_err.kind(),
        }),
        Err(_) => Err(DotenvError::Unknown),
    }
}
