//! Tests for settings resolution.
//!
//! Responsibilities:
//! - Test store/environment precedence through `Settings`.
//! - Test typed accessor fallbacks, including failed resolution.
//! - Test reset behaviour as seen by callers.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::{Path, PathBuf};

pub mod lookup_tests;

/// Settings document shared by the lookup tests.
pub const SAMPLE_SETTINGS: &str = "\
db:
  user: bar
  pass: barcode
sys:
  users:
    - foo
    - bar
    - test
    - zoo
";

/// Writes `content` to `settings.yaml` under `dir` and returns the path.
pub fn write_settings(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("settings.yaml");
    fs::write(&path, content).expect("Failed to write settings file");
    path
}
