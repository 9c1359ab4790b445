//! Feedwatch CLI - inspect resolved settings and secrets.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the `Settings` handle once and pass it to the selected command.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr so stdout stays machine-readable.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCode;
use feedwatch_settings::{Settings, load_dotenv};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Blank/whitespace-only paths are ignored to allow fallback to the default location
    let settings = match &cli.config_path {
        Some(path) if !path.to_string_lossy().trim().is_empty() => Settings::from_path(path),
        _ => Settings::from_default_location(),
    };
    if let Ok(path) = settings.store().source_path() {
        tracing::debug!(path = %path.display(), "Using settings file");
    }

    if let Err(e) = run_command(cli, &settings) {
        eprintln!("Error: {:#}", e);
        std::process::exit(ExitCode::from(&e).as_i32());
    }
}
