//! Dotted-path resolution and typed accessors.
//!
//! Responsibilities:
//! - Resolve dotted paths through an ordered chain of lookup sources.
//! - Provide fail-soft typed accessors for booleans and unsigned integers.
//!
//! Does NOT handle:
//! - Secret decryption (see `secrets.rs`; failures there propagate).
//!
//! Invariants / Assumptions:
//! - A path absent from every source resolves to the empty string, never an error.
//! - Typed accessors never fail; any resolution error yields the caller's default.

mod chain;
mod env;
mod typed;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

pub use chain::LookupSource;
pub use env::{DotenvError, env_var_name, env_var_or_none, load_dotenv};
pub use typed::{parse_boolean, parse_uint};

use crate::store::{ConfigStore, FlattenedSettings, SettingsError};

/// Result of a `settings` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// No path was given: the complete flattened settings.
    All(Arc<FlattenedSettings>),
    /// The value for one path (empty when unresolved).
    Value(String),
}

/// Process-wide settings handle.
///
/// Construct once at startup and pass it to every job that reads settings.
#[derive(Debug)]
pub struct Settings {
    store: Arc<ConfigStore>,
    chain: Vec<LookupSource>,
}

impl Settings {
    /// Creates settings over `store` with the default lookup chain.
    pub fn new(store: ConfigStore) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    pub fn with_shared_store(store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            chain: LookupSource::DEFAULT_CHAIN.to_vec(),
        }
    }

    /// Creates settings reading from the default source location.
    pub fn from_default_location() -> Self {
        Self::new(ConfigStore::from_default_location())
    }

    /// Creates settings reading from `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(ConfigStore::new(path))
    }

    /// Replaces the lookup chain. Sources are consulted in order.
    pub fn with_chain(mut self, chain: impl Into<Vec<LookupSource>>) -> Self {
        self.chain = chain.into();
        self
    }

    pub fn chain(&self) -> &[LookupSource] {
        &self.chain
    }

    /// The underlying store, for load/reset administration.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Resolves an optional dotted path.
    ///
    /// `None` or an empty path returns every flattened setting.
    pub fn settings(&self, path: Option<&str>) -> Result<Resolved, SettingsError> {
        match path {
            None | Some("") => self.all().map(Resolved::All),
            Some(path) => self.get(path).map(Resolved::Value),
        }
    }

    /// Returns every flattened setting from the store.
    ///
    /// Environment variables are not included.
    pub fn all(&self) -> Result<Arc<FlattenedSettings>, SettingsError> {
        self.store.get_raw()
    }

    /// Resolves `path` through the lookup chain, returning `""` when nothing matches.
    pub fn get(&self, path: &str) -> Result<String, SettingsError> {
        Ok(self.lookup(path)?.unwrap_or_default())
    }

    /// Resolves `path`, distinguishing "absent" from an empty value.
    pub fn lookup(&self, path: &str) -> Result<Option<String>, SettingsError> {
        let store = self.store.get_raw()?;
        Ok(chain::resolve_chain(&self.chain, &store, path))
    }

    /// Reads `path` as a boolean.
    ///
    /// `default` is used only when the value is empty or resolution fails;
    /// any other non-truthy value is `false`.
    pub fn get_boolean(&self, path: &str, default: bool) -> bool {
        match self.get(path) {
            Ok(raw) => parse_boolean(&raw, default),
            Err(e) => {
                tracing::debug!(path, error = %e, "Falling back to default boolean");
                default
            }
        }
    }

    /// Reads `path` as an unsigned integer, falling back to `default`.
    pub fn get_uint(&self, path: &str, default: u64) -> u64 {
        match self.get(path) {
            Ok(raw) => parse_uint(&raw, default),
            Err(e) => {
                tracing::debug!(path, error = %e, "Falling back to default integer");
                default
            }
        }
    }
}
