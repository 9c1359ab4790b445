//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the appropriate command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Building the `Settings` handle (see `main()`).

use anyhow::Result;
use feedwatch_settings::Settings;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli, settings: &Settings) -> Result<()> {
    let output = cli.output;
    match cli.command {
        Commands::Show { path } => commands::settings::run_show(settings, path.as_deref(), output),
        Commands::Bool { path, default } => {
            commands::settings::run_bool(settings, &path, default, output)
        }
        Commands::Uint { path, default } => {
            commands::settings::run_uint(settings, &path, default, output)
        }
        Commands::Decrypt {
            key,
            text,
            key_args,
        } => commands::secret::run_decrypt(&key, &text, &key_args, output),
        Commands::Encrypt { text, key_args } => {
            commands::secret::run_encrypt(&text, &key_args, output)
        }
    }
}
