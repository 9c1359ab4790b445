//! Decryption of sensitive settings.
//!
//! Responsibilities:
//! - Recognise the fixed set of sensitive key names.
//! - Base64-decode their values and hand them to a [`Decryptor`].
//!
//! Does NOT handle:
//! - Key management or the cipher itself (see `encryption.rs`).
//!
//! Invariants:
//! - Decryption failures are always returned to the caller. A failed secret is
//!   never replaced by its ciphertext or a default.
//! - Values for non-sensitive keys pass through unchanged.
//! - Secret values are never logged.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;

use crate::encryption::DecryptError;

/// Key names whose values are stored encrypted.
pub const SENSITIVE_KEYS: &[&str] = &["password"];

/// An operation that turns ciphertext bytes into plaintext.
///
/// Implementations that call a remote service must bound the call with a
/// timeout and must not retry on failure.
pub trait Decryptor: Send + Sync {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString, DecryptError>;
}

impl<D: Decryptor + ?Sized> Decryptor for Arc<D> {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString, DecryptError> {
        (**self).decrypt(ciphertext)
    }
}

impl<D: Decryptor + ?Sized> Decryptor for Box<D> {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString, DecryptError> {
        (**self).decrypt(ciphertext)
    }
}

/// Resolves setting values that may be encrypted.
#[derive(Debug)]
pub struct SecretResolver<D> {
    decryptor: D,
}

impl<D: Decryptor> SecretResolver<D> {
    pub fn new(decryptor: D) -> Self {
        Self { decryptor }
    }

    /// Returns true if values stored under `key` are encrypted.
    pub fn is_sensitive(key: &str) -> bool {
        SENSITIVE_KEYS.contains(&key)
    }

    /// Decrypts `text` when `key` is sensitive, otherwise returns it unchanged.
    ///
    /// # Errors
    /// Returns `DecryptError` if `text` is not valid base64 or the decryptor
    /// fails. Callers must treat this as fatal for the credential.
    pub fn check_encrypted_text(&self, key: &str, text: &str) -> Result<SecretString, DecryptError> {
        if !Self::is_sensitive(key) {
            return Ok(SecretString::new(text.into()));
        }

        tracing::debug!(key, "Decrypting sensitive setting");
        let ciphertext = STANDARD.decode(text)?;
        self.decryptor.decrypt(&ciphertext).inspect_err(|e| {
            tracing::warn!(key, error = %e, "Failed to decrypt sensitive setting");
        })
    }
}
