//! Secret commands: `decrypt` and `encrypt`.
//!
//! Invariants:
//! - The master key is only resolved when a sensitive key actually needs it,
//!   so non-sensitive values pass through without any key configured.
//! - Decryption failures are returned, never replaced by the input text.

use anyhow::{Context, Result};
use feedwatch_settings::{AesGcmDecryptor, DecryptError, Decryptor, SecretResolver};
use secrecy::{ExposeSecret, SecretString};

use super::format_value;
use crate::args::{KeySourceArgs, OutputFormat};

/// Resolves the master key on first use.
struct KeySourceDecryptor<'a> {
    args: &'a KeySourceArgs,
}

impl Decryptor for KeySourceDecryptor<'_> {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString, DecryptError> {
        let source = self.args.master_key_source()?;
        AesGcmDecryptor::from_source(&source)?.decrypt(ciphertext)
    }
}

pub fn run_decrypt(
    key: &str,
    text: &str,
    key_args: &KeySourceArgs,
    output: OutputFormat,
) -> Result<()> {
    let resolver = SecretResolver::new(KeySourceDecryptor { args: key_args });
    let plaintext = resolver
        .check_encrypted_text(key, text)
        .with_context(|| format!("Failed to decrypt value for key '{key}'"))?;
    println!("{}", format_value(key, plaintext.expose_secret(), output)?);
    Ok(())
}

pub fn run_encrypt(text: &str, key_args: &KeySourceArgs, output: OutputFormat) -> Result<()> {
    let source = key_args
        .master_key_source()
        .context("Failed to load master key")?;
    let sealed = AesGcmDecryptor::provision(&source)
        .context("Failed to load master key")?
        .seal(text)
        .context("Failed to encrypt value")?;
    println!("{}", format_value("ciphertext", sealed, output)?);
    Ok(())
}
