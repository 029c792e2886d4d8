//! Output reporters for validation reports and suggestion sets
//!
//! Supports multiple output formats:
//! - `text` - Plain numbered listing (the same text the MCP tools return)
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::models::{SuggestionSet, ValidationReport};
use anyhow::{anyhow, Result};
use std::str::FromStr;

pub use text::{format_suggestions, format_validation, PREVIEW_LIMIT};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a validation report in the specified format
pub fn report(report: &ValidationReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a validation report using an OutputFormat enum
pub fn report_with_format(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::format_validation(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => Ok(markdown::render(report)),
    }
}

/// Render a suggestion set using an OutputFormat enum
pub fn suggestions_with_format(set: &SuggestionSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::format_suggestions(set)),
        OutputFormat::Json => json::render_suggestions(set),
        OutputFormat::Markdown => Ok(markdown::render_suggestions(set)),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Category, Finding, Severity};

    /// Create a small ValidationReport for testing
    pub(crate) fn test_report() -> ValidationReport {
        let findings = vec![
            Finding::new(
                "missing-variables-tf",
                Severity::Warning,
                Category::Structure,
                "Missing variables.tf file",
            )
            .with_best_practice("Include a variables.tf file for input variable definitions")
            .with_suggestion("Create a variables.tf file with input variable definitions"),
            Finding::new(
                "hardcoded-secret",
                Severity::Error,
                Category::Security,
                "Possible hardcoded secret assigned to 'password'",
            )
            .in_file("main.tf")
            .at_line(4),
        ];
        ValidationReport::new(2, findings)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(file_extension(OutputFormat::Json), "json");
    }

    #[test]
    fn test_report_dispatch() {
        let out = report(&test_report(), "json").unwrap();
        assert!(out.trim_start().starts_with('{'));
        let out = report(&test_report(), "text").unwrap();
        assert!(out.starts_with("Validation summary"));
    }
}
