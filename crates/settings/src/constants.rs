//! Centralized constants for the feedwatch workspace.
//!
//! Environment variable names and file locations shared by the settings
//! crate and the CLI live here to avoid string duplication.

// =============================================================================
// Configuration Source
// =============================================================================

/// Location of the settings document relative to the install root.
pub const SETTINGS_FILE_RELATIVE: &str = "config/settings.yaml";

/// Environment variable overriding the full path of the settings document.
pub const CONFIG_PATH_ENV: &str = "FEEDWATCH_CONFIG_PATH";

/// Environment variable naming the install root.
pub const HOME_ENV: &str = "FEEDWATCH_HOME";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";

// =============================================================================
// Secrets
// =============================================================================

/// Environment variable holding the hex-encoded AES-256 master key.
pub const MASTER_KEY_ENV: &str = "FEEDWATCH_MASTER_KEY";

/// Environment variable holding the master password for Argon2id key derivation.
pub const MASTER_PASSWORD_ENV: &str = "FEEDWATCH_MASTER_PASSWORD";

/// Service name used for keyring storage.
pub const KEYRING_SERVICE: &str = "feedwatch";

/// Keyring account holding the hex-encoded master key.
pub const KEYRING_MASTER_KEY_ACCOUNT: &str = "encryption-master-key";

/// Argon2id salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
