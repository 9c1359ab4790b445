//! Command handlers.

pub mod secret;
pub mod settings;

use anyhow::Result;
use serde::Serialize;

use crate::args::OutputFormat;

/// One resolved value, as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct ValueOutput<'a, T: Serialize> {
    pub path: &'a str,
    pub value: T,
}

/// Renders a single value in the requested format.
pub fn format_value<T: Serialize + std::fmt::Display>(
    path: &str,
    value: T,
    output: OutputFormat,
) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ValueOutput { path, value })?),
    }
}
