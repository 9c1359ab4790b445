//! AES-256-GCM decryption backend for sensitive settings.
//!
//! Responsibilities:
//! - Provide AES-256-GCM sealing and opening of secret values.
//! - Handle key derivation using Argon2id.
//! - Manage master key sources (Keyring, Password, Env).
//!
//! Does NOT handle:
//! - Deciding which settings are secret (see `secrets.rs`).
//! - Base64 decoding of stored values (done by `SecretResolver`).
//!
//! Invariants:
//! - Sealed bytes are `salt (16) || nonce (12) || ciphertext || tag`. The salt
//!   is only used for password-derived keys but is always present.
//! - Error messages never contain key material, plaintext, or ciphertext.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::Argon2;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngExt;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::constants::{
    KEY_LEN, KEYRING_MASTER_KEY_ACCOUNT, KEYRING_SERVICE, MASTER_KEY_ENV, NONCE_LEN, SALT_LEN,
    TAG_LEN,
};
use crate::secrets::Decryptor;

/// Errors that can occur while decrypting (or sealing) a secret.
#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("Ciphertext is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Ciphertext too short: expected at least {expected} bytes, got {actual}")]
    CiphertextTooShort { expected: usize, actual: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Decrypted value is not valid UTF-8")]
    InvalidPlaintext,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid key size: expected 32 bytes")]
    InvalidKeySize,

    #[error("Master key is not valid hex")]
    InvalidKeyEncoding,

    #[error("Keyring error: {0}")]
    KeyringError(#[from] keyring::Error),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Failure reported by an external decryption service.
    #[error("Decryption service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, DecryptError>;

/// Sources for the master encryption key.
#[derive(Debug, Clone)]
pub enum MasterKeySource {
    /// Use a key stored hex-encoded in the OS keyring.
    Keyring,
    /// Derive a key from a user-provided password.
    Password(SecretString),
    /// Use a hex key provided in an environment variable.
    Env(String),
}

impl Default for MasterKeySource {
    fn default() -> Self {
        Self::Env(MASTER_KEY_ENV.to_string())
    }
}

impl MasterKeySource {
    /// Resolves the master key source into a 32-byte key.
    ///
    /// A missing keyring entry is an error; see [`MasterKeySource::provision`].
    pub fn resolve(&self, salt: Option<&[u8]>) -> Result<[u8; KEY_LEN]> {
        match self {
            Self::Keyring => {
                let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_MASTER_KEY_ACCOUNT)?;
                decode_hex_key(&entry.get_password()?)
            }
            Self::Password(pw) => {
                let salt = salt.ok_or_else(|| {
                    DecryptError::KeyDerivationFailed(
                        "Salt required for password-based encryption".to_string(),
                    )
                })?;
                Encryptor::derive_key(pw, salt)
            }
            Self::Env(var_name) => {
                let val = std::env::var(var_name).map_err(|_| {
                    DecryptError::EnvError(format!("Environment variable {} not set", var_name))
                })?;
                decode_hex_key(val.trim())
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but creates and stores a random key
    /// when the keyring has no entry yet.
    pub fn provision(&self, salt: Option<&[u8]>) -> Result<[u8; KEY_LEN]> {
        let Self::Keyring = self else {
            return self.resolve(salt);
        };
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_MASTER_KEY_ACCOUNT)?;
        match entry.get_password() {
            Ok(p) => decode_hex_key(&p),
            Err(keyring::Error::NoEntry) => {
                let mut key = [0u8; KEY_LEN];
                rand::rng().fill(&mut key);
                entry.set_password(&hex::encode(key))?;
                tracing::info!(service = KEYRING_SERVICE, "Stored new master key in keyring");
                Ok(key)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn decode_hex_key(encoded: &str) -> Result<[u8; KEY_LEN]> {
    let bytes = hex::decode(encoded).map_err(|_| DecryptError::InvalidKeyEncoding)?;
    bytes.try_into().map_err(|_| DecryptError::InvalidKeySize)
}

/// Core cryptographic logic for AES-256-GCM.
pub struct Encryptor;

impl Encryptor {
    /// Encrypts data using AES-256-GCM.
    /// Returns (ciphertext + tag, nonce).
    pub fn encrypt(data: &[u8], key: &[u8; KEY_LEN]) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
        let cipher = Aes256Gcm::new(key.into());
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, data)
            .map_err(|e| DecryptError::EncryptionFailed(e.to_string()))?;

        Ok((ciphertext, nonce_bytes))
    }

    /// Decrypts data using AES-256-GCM.
    pub fn decrypt(ciphertext: &[u8], key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(key.into());
        let nonce = Nonce::from_slice(nonce);

        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| DecryptError::DecryptionFailed(e.to_string()))
    }

    /// Derives a 32-byte key from a password and salt using Argon2id.
    pub fn derive_key(password: &SecretString, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
        let argon2 = Argon2::default();
        let mut key = [0u8; KEY_LEN];
        argon2
            .hash_password_into(password.expose_secret().as_bytes(), salt, &mut key)
            .map_err(|e| DecryptError::KeyDerivationFailed(e.to_string()))?;
        Ok(key)
    }

    /// Generates a random 16-byte salt for key derivation.
    pub fn generate_salt() -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill(&mut salt);
        salt
    }
}

/// Key material held by [`AesGcmDecryptor`].
enum KeyMaterial {
    Key([u8; KEY_LEN]),
    /// Re-derived per value from the salt stored alongside it.
    Password(SecretString),
}

impl KeyMaterial {
    fn key_for(&self, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
        match self {
            Self::Key(key) => Ok(*key),
            Self::Password(pw) => Encryptor::derive_key(pw, salt),
        }
    }
}

/// Local AES-256-GCM implementation of [`Decryptor`].
pub struct AesGcmDecryptor {
    material: KeyMaterial,
}

impl fmt::Debug for AesGcmDecryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.material {
            KeyMaterial::Key(_) => "key",
            KeyMaterial::Password(_) => "password",
        };
        f.debug_struct("AesGcmDecryptor")
            .field("material", &kind)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl AesGcmDecryptor {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self {
            material: KeyMaterial::Key(key),
        }
    }

    /// Derives the key from `password` and each value's embedded salt.
    pub fn with_password(password: SecretString) -> Self {
        Self {
            material: KeyMaterial::Password(password),
        }
    }

    /// Builds a decryptor from a master key source.
    ///
    /// A missing keyring entry is an error.
    pub fn from_source(source: &MasterKeySource) -> Result<Self> {
        match source {
            MasterKeySource::Password(pw) => Ok(Self::with_password(pw.clone())),
            other => other.resolve(None).map(Self::new),
        }
    }

    /// Like [`from_source`](Self::from_source), but creates a keyring key
    /// when none exists yet.
    pub fn provision(source: &MasterKeySource) -> Result<Self> {
        match source {
            MasterKeySource::Password(pw) => Ok(Self::with_password(pw.clone())),
            other => other.provision(None).map(Self::new),
        }
    }

    /// Encrypts `plaintext` into the base64 form stored in settings documents.
    pub fn seal(&self, plaintext: &str) -> Result<String> {
        let salt = Encryptor::generate_salt();
        let key = self.material.key_for(&salt)?;
        let (ciphertext, nonce) = Encryptor::encrypt(plaintext.as_bytes(), &key)?;

        let mut sealed = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&salt);
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }
}

impl Decryptor for AesGcmDecryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString> {
        let minimum = SALT_LEN + NONCE_LEN + TAG_LEN;
        if ciphertext.len() < minimum {
            return Err(DecryptError::CiphertextTooShort {
                expected: minimum,
                actual: ciphertext.len(),
            });
        }
        let (salt, rest) = ciphertext.split_at(SALT_LEN);
        let (nonce, body) = rest.split_at(NONCE_LEN);
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|_| DecryptError::DecryptionFailed("invalid nonce".to_string()))?;

        let key = self.material.key_for(salt)?;
        let plaintext = Encryptor::decrypt(body, &key, &nonce)?;
        let plaintext = String::from_utf8(plaintext).map_err(|_| DecryptError::InvalidPlaintext)?;
        Ok(SecretString::new(plaintext.into()))
    }
}
