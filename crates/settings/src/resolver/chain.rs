//! Ordered lookup sources for dotted paths.
//!
//! Invariants:
//! - Each source answers `Some(value)` or `None`; the first `Some` wins.
//! - The default order is store first, then environment.

use super::env::lookup_env;
use crate::store::FlattenedSettings;

/// One place a dotted path can be resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    /// The flattened settings document.
    Store,
    /// The process environment (`db.port` -> `DB_PORT`).
    Environment,
}

impl LookupSource {
    /// Default precedence: settings document, then environment.
    pub const DEFAULT_CHAIN: [LookupSource; 2] = [LookupSource::Store, LookupSource::Environment];

    pub(crate) fn lookup(self, store: &FlattenedSettings, path: &str) -> Option<String> {
        match self {
            Self::Store => store.get(path).map(str::to_string),
            Self::Environment => lookup_env(path),
        }
    }
}

/// Resolves `path` against `chain` in order.
pub(crate) fn resolve_chain(
    chain: &[LookupSource],
    store: &FlattenedSettings,
    path: &str,
) -> Option<String> {
    chain.iter().find_map(|source| source.lookup(store, path))
}
