//! Settings resolution for feedwatch monitoring jobs.
//!
//! This crate merges a structured configuration file, process environment
//! overrides, and encrypted secrets into one dotted-key settings store.
//! Monitoring jobs construct a [`Settings`] at startup and read thresholds,
//! topic identifiers, and credentials through its typed accessors.

pub mod constants;
pub mod encryption;
mod resolver;
pub mod secrets;
mod store;

pub use encryption::{AesGcmDecryptor, DecryptError, MasterKeySource};
pub use resolver::{LookupSource, Resolved, Settings, env_var_name, env_var_or_none, load_dotenv};
pub use resolver::{DotenvError, parse_boolean, parse_uint};
pub use secrets::{Decryptor, SENSITIVE_KEYS, SecretResolver};
pub use store::{
    ConfigDocument, ConfigStore, FlattenedSettings, SettingsError, SourceError,
    default_source_path,
};

