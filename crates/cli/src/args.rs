//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Args, Parser, Subcommand, ValueEnum};
use feedwatch_settings::constants::{MASTER_KEY_ENV, MASTER_PASSWORD_ENV};
use feedwatch_settings::{DecryptError, MasterKeySource};
use secrecy::SecretString;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feedwatch")]
#[command(about = "Feedwatch settings - inspect resolved settings and secrets", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  feedwatch show\n  feedwatch show db.port\n  feedwatch bool alerts.enabled --default\n  feedwatch uint checks.orders.max_lag_seconds --default 300\n  feedwatch encrypt 'hunter2'\n  feedwatch encrypt 'hunter2' --key-source password\n  feedwatch decrypt password \"$(feedwatch show db.pass)\"\n"
)]
pub struct Cli {
    /// Path to the settings file (overrides the default location).
    ///
    /// Can also be set via FEEDWATCH_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "FEEDWATCH_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all settings, or the value at one dotted path
    Show {
        /// Dotted path such as `db.port`; omit to list everything
        path: Option<String>,
    },

    /// Read a setting as a boolean
    Bool {
        /// Dotted path of the setting
        path: String,

        /// Value to use when the setting is empty or missing
        #[arg(long)]
        default: bool,
    },

    /// Read a setting as an unsigned integer
    Uint {
        /// Dotted path of the setting
        path: String,

        /// Value to use when the setting is missing or not a number
        #[arg(long, default_value_t = 0)]
        default: u64,
    },

    /// Decrypt a value if its key is sensitive, otherwise echo it
    Decrypt {
        /// Key name, e.g. `password`
        key: String,

        /// Stored value (base64 ciphertext for sensitive keys)
        text: String,

        #[command(flatten)]
        key_args: KeySourceArgs,
    },

    /// Encrypt a value for storage under a sensitive key
    Encrypt {
        /// Plaintext to encrypt
        text: String,

        #[command(flatten)]
        key_args: KeySourceArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeySource {
    /// Hex key in an environment variable
    Env,
    /// Hex key in the OS keyring
    Keyring,
    /// Key derived from a password in an environment variable
    Password,
}

#[derive(Args, Debug, Clone)]
pub struct KeySourceArgs {
    /// Where to read the master key from
    #[arg(long, value_enum, default_value_t = KeySource::Env)]
    pub key_source: KeySource,

    /// Environment variable holding the hex-encoded master key
    #[arg(long, default_value = MASTER_KEY_ENV, value_name = "VAR")]
    pub key_env: String,

    /// Environment variable holding the master password
    #[arg(long, default_value = MASTER_PASSWORD_ENV, value_name = "VAR")]
    pub password_env: String,
}

impl KeySourceArgs {
    /// Builds the key source. Reads the password variable for `password`.
    pub fn master_key_source(&self) -> Result<MasterKeySource, DecryptError> {
        match self.key_source {
            KeySource::Env => Ok(MasterKeySource::Env(self.key_env.clone())),
            KeySource::Keyring => Ok(MasterKeySource::Keyring),
            KeySource::Password => match std::env::var(&self.password_env) {
                Ok(pw) if !pw.is_empty() => {
                    Ok(MasterKeySource::Password(SecretString::new(pw.into())))
                }
                _ => Err(DecryptError::EnvError(format!(
                    "Environment variable {} not set",
                    self.password_env
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_key_source_defaults_to_env() {
        let cli = Cli::parse_from(["feedwatch", "encrypt", "secret"]);
        let Commands::Encrypt { key_args, .. } = cli.command else {
            panic!("expected encrypt command");
        };
        assert!(matches!(
            key_args.master_key_source(),
            Ok(MasterKeySource::Env(var)) if var == MASTER_KEY_ENV
        ));
    }

    #[test]
    #[serial_test::serial]
    fn test_password_key_source_requires_variable() {
        let cli = Cli::parse_from([
            "feedwatch",
            "decrypt",
            "password",
            "abc",
            "--key-source",
            "password",
            "--password-env",
            "_FEEDWATCH_ARGS_TEST_PASSWORD",
        ]);
        let Commands::Decrypt { key_args, .. } = cli.command else {
            panic!("expected decrypt command");
        };
        assert_eq!(key_args.key_source, KeySource::Password);

        temp_env::with_var("_FEEDWATCH_ARGS_TEST_PASSWORD", Some("pw"), || {
            assert!(matches!(
                key_args.master_key_source(),
                Ok(MasterKeySource::Password(_))
            ));
        });
        temp_env::with_var_unset("_FEEDWATCH_ARGS_TEST_PASSWORD", || {
            assert!(matches!(
                key_args.master_key_source(),
                Err(DecryptError::EnvError(_))
            ));
        });
    }

    #[test]
    fn test_uint_default_flag() {
        let cli = Cli::parse_from(["feedwatch", "uint", "limits.batch", "--default", "25"]);
        assert!(matches!(
            cli.command,
            Commands::Uint { ref path, default: 25 } if path == "limits.batch"
        ));
        assert_eq!(cli.output, OutputFormat::Text);
    }
}
