//! JSON reporter
//!
//! Outputs the full report as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::{SuggestionSet, ValidationReport};
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ValidationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a suggestion set as `{"fileContents": {...}}`
pub fn render_suggestions(set: &SuggestionSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "fileContents": set
    }))?)
}
