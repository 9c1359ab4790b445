//! Settings source location and parsing.
//!
//! Responsibilities:
//! - Determine where the settings document lives.
//! - Read and parse it into a `ConfigDocument`.
//!
//! Does NOT handle:
//! - Absorbing failures (the store decides to fall back to empty settings).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::document::ConfigDocument;
use super::error::SourceError;
use crate::constants::{CONFIG_PATH_ENV, HOME_ENV, SETTINGS_FILE_RELATIVE};
use crate::resolver::env_var_or_none;

/// Returns the default location of the settings document.
///
/// Resolution order:
/// 1. `FEEDWATCH_CONFIG_PATH`, used verbatim.
/// 2. `$FEEDWATCH_HOME/config/settings.yaml`.
/// 3. `config/settings.yaml` under the current working directory.
pub fn default_source_path() -> PathBuf {
    if let Some(path) = env_var_or_none(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    let root = env_var_or_none(HOME_ENV)
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default();
    root.join(SETTINGS_FILE_RELATIVE)
}

/// Reads and parses the document at `path`.
pub(crate) fn read_document(path: &Path) -> Result<ConfigDocument, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses YAML (or JSON) text into a document. Empty text is an empty document.
///
/// `<<` merge keys are resolved before conversion, so merged entries land
/// under the mapping that includes them.
pub(crate) fn parse_document(content: &str) -> Result<ConfigDocument, serde_yaml::Error> {
    let mut value: serde_yaml::Value = serde_yaml::from_str(content)?;
    value.apply_merge()?;
    Ok(ConfigDocument::from(value))
}

/// Returns true when the error only means the file does not exist.
pub(crate) fn is_missing(error: &SourceError) -> bool {
    matches!(error, SourceError::Read { source, .. } if source.kind() == ErrorKind::NotFound)
}
