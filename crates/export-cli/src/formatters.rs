//! Output formatting for CLI reports.
//!
//! `json` and `text` serialize the report; `pretty` asks the report to draw
//! itself for a terminal.

use anyhow::Result;
use colored::Colorize;
use rsocket_export_core::cli::OutputFormat;
use serde::Serialize;

/// A command result that can be printed in every output format.
pub trait Report: Serialize {
    /// Human-readable, colorized rendering.
    fn pretty(&self) -> String;
}

/// Formats `report` according to `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use rsocket_export_cli::formatters::{Report, format_output};
/// use rsocket_export_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Done {
///     files: usize,
/// }
///
/// impl Report for Done {
///     fn pretty(&self) -> String {
///         format!("{} files", self.files)
///     }
/// }
///
/// let out = format_output(&Done { files: 3 }, OutputFormat::Text)?;
/// assert_eq!(out, r#"{"files":3}"#);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Report>(report: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(serde_json::to_string(report)?),
        OutputFormat::Pretty => Ok(report.pretty()),
    }
}

/// `label: value` line with a dimmed, padded label.
#[must_use]
pub fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{} {value}", format!("{label:<12}").dimmed())
}

/// Bold section heading.
#[must_use]
pub fn heading(text: &str) -> String {
    text.bold().underline().to_string()
}

/// Green check mark followed by `text`.
#[must_use]
pub fn success(text: &str) -> String {
    format!("{} {text}", "✓".green().bold())
}
