//! Lazily loaded, flattened settings store.
//!
//! Responsibilities:
//! - Load the settings source once and cache the flattened result.
//! - Provide an explicit reset so tests and admin tooling can reload from a
//!   different source without restarting the process.
//!
//! Does NOT handle:
//! - Environment fallback or typed parsing (see `resolver`).
//!
//! Invariants / Assumptions:
//! - Two states only: unloaded (`loaded == None`) and loaded.
//! - Loading happens under the write lock with a re-check, so concurrent
//!   first access parses the source exactly once.
//! - A missing, unreadable, or unparsable source loads as empty settings.

mod document;
mod error;
mod source;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub use document::{ConfigDocument, FlattenedSettings};
pub use error::{SettingsError, SourceError};
pub use source::default_source_path;

#[derive(Debug, Default)]
struct StoreState {
    source_override: Option<PathBuf>,
    loaded: Option<Arc<FlattenedSettings>>,
}

/// Owns the flattened settings derived from one source document.
#[derive(Debug)]
pub struct ConfigStore {
    default_source: PathBuf,
    state: RwLock<StoreState>,
}

impl ConfigStore {
    /// Creates an unloaded store reading from `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            default_source: source.into(),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Creates an unloaded store reading from [`default_source_path`].
    pub fn from_default_location() -> Self {
        Self::new(default_source_path())
    }

    /// Path the next load will read from.
    pub fn source_path(&self) -> Result<PathBuf, SettingsError> {
        let state = self.state.read().map_err(|_| SettingsError::StorePoisoned)?;
        Ok(state
            .source_override
            .clone()
            .unwrap_or_else(|| self.default_source.clone()))
    }

    pub fn is_loaded(&self) -> Result<bool, SettingsError> {
        let state = self.state.read().map_err(|_| SettingsError::StorePoisoned)?;
        Ok(state.loaded.is_some())
    }

    /// Loads the source if not already loaded. Source failures are absorbed.
    pub fn load(&self) -> Result<(), SettingsError> {
        self.get_raw().map(|_| ())
    }

    /// Returns the full flattened settings, loading them on first use.
    pub fn get_raw(&self) -> Result<Arc<FlattenedSettings>, SettingsError> {
        {
            let state = self.state.read().map_err(|_| SettingsError::StorePoisoned)?;
            if let Some(settings) = &state.loaded {
                return Ok(Arc::clone(settings));
            }
        }

        let mut state = self.state.write().map_err(|_| SettingsError::StorePoisoned)?;
        // Another thread may have loaded while we waited for the write lock.
        if let Some(settings) = &state.loaded {
            return Ok(Arc::clone(settings));
        }

        let path = state
            .source_override
            .clone()
            .unwrap_or_else(|| self.default_source.clone());
        let settings = Arc::new(load_flattened(&path));
        state.loaded = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Discards cached settings and any source override.
    ///
    /// Intended for tests and administrative tooling only.
    pub fn reset(&self) -> Result<(), SettingsError> {
        let mut state = self.state.write().map_err(|_| SettingsError::StorePoisoned)?;
        *state = StoreState::default();
        tracing::debug!(path = %self.default_source.display(), "Settings store reset");
        Ok(())
    }

    /// Discards cached settings and reads from `source` on the next load.
    pub fn reset_with_source(&self, source: impl Into<PathBuf>) -> Result<(), SettingsError> {
        let source = source.into();
        let mut state = self.state.write().map_err(|_| SettingsError::StorePoisoned)?;
        tracing::debug!(path = %source.display(), "Settings store reset with source override");
        *state = StoreState {
            source_override: Some(source),
            loaded: None,
        };
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn poison_for_test(self: &Arc<Self>) {
        let store = Arc::clone(self);
        let _ = std::thread::spawn(move || {
            let _guard = store.state.write().unwrap();
            panic!("poisoning settings store for test");
        })
        .join();
    }
}

fn load_flattened(path: &Path) -> FlattenedSettings {
    match source::read_document(path) {
        Ok(document) => {
            let settings = document.flatten();
            tracing::debug!(
                path = %path.display(),
                keys = settings.len(),
                "Settings loaded"
            );
            settings
        }
        Err(e) if source::is_missing(&e) => {
            tracing::warn!(path = %path.display(), "Settings file not found, using empty settings");
            FlattenedSettings::default()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load settings, using empty settings"
            );
            FlattenedSettings::default()
        }
    }
}
