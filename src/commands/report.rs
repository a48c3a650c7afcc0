//! Rendering of machine-readable reports.

use crate::cli::OutputFormat;
use crate::error::{FsExecError, Result};
use serde::Serialize;

/// Render `value` as JSON or YAML. Text output is formatted by each command.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| FsExecError::UserError(format!("failed to render JSON report: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| FsExecError::UserError(format!("failed to render YAML report: {}", e))),
        OutputFormat::Text => Err(FsExecError::UserError(
            "text reports are rendered by the command".to_string(),
        )),
    }
}
