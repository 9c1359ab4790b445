//! Settings inspection commands: `show`, `bool`, `uint`.

use anyhow::{Context, Result};
use feedwatch_settings::{FlattenedSettings, Resolved, Settings};

use super::format_value;
use crate::args::OutputFormat;

/// Prints every flattened setting, or the value at `path`.
pub fn run_show(settings: &Settings, path: Option<&str>, output: OutputFormat) -> Result<()> {
    let resolved = settings
        .settings(path)
        .context("Failed to resolve settings")?;
    let rendered = match resolved {
        Resolved::All(all) => format_all(&all, output)?,
        Resolved::Value(value) => format_value(path.unwrap_or_default(), value, output)?,
    };
    println!("{rendered}");
    Ok(())
}

pub fn run_bool(settings: &Settings, path: &str, default: bool, output: OutputFormat) -> Result<()> {
    let value = settings.get_boolean(path, default);
    println!("{}", format_value(path, value, output)?);
    Ok(())
}

pub fn run_uint(settings: &Settings, path: &str, default: u64, output: OutputFormat) -> Result<()> {
    let value = settings.get_uint(path, default);
    println!("{}", format_value(path, value, output)?);
    Ok(())
}

/// Renders the full settings map as `key=value` lines or a JSON object.
fn format_all(all: &FlattenedSettings, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(all
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(all)?),
    }
}
