//! Improvement synthesis
//!
//! Turns a bundle and its findings into concrete file content:
//!
//! 1. Every canonical file the bundle lacks gets a scaffold.
//! 2. Every Error/Warning finding that names a file and carries a suggestion
//!    becomes a one-line TODO note prepended to that file.
//!
//! Notes are comments, so they never trip a rule themselves. Re-running on
//! `bundle ∪ suggest(bundle)` cannot raise the Error count.

mod scaffold;

use crate::models::{ConfigurationBundle, Finding, Severity, SuggestionSet};
use crate::rules::scan::{has_role, STANDARD_FILES};
use crate::rules::ValidationEngine;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub use scaffold::for_role as scaffold_for;

pub struct ImprovementSynthesizer {
    engine: Arc<ValidationEngine>,
}

impl ImprovementSynthesizer {
    pub fn new(engine: Arc<ValidationEngine>) -> Self {
        Self { engine }
    }

    pub fn suggest(&self, bundle: &ConfigurationBundle) -> SuggestionSet {
        let mut suggestions = SuggestionSet::new();

        for role in STANDARD_FILES {
            if has_role(bundle, role) {
                continue;
            }
            if let Some(content) = scaffold::for_role(role) {
                debug!("Scaffolding missing {}", role);
                suggestions.insert(role.to_string(), content.to_string());
            }
        }

        let report = self.engine.validate(bundle);
        let mut notes: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for finding in &report.findings {
            if let Some((file, note)) = remediation_note(finding) {
                notes.entry(file).or_default().push(note);
            }
        }

        for (file, lines) in notes {
            let base = suggestions
                .get(file)
                .map(String::as_str)
                .or_else(|| bundle.get(file))
                .unwrap_or_default();
            let mut content = String::with_capacity(base.len() + lines.len() * 64);
            for line in &lines {
                content.push_str(line);
                content.push('\n');
            }
            content.push_str(base);
            debug!("Annotated {} with {} notes", file, lines.len());
            suggestions.insert(file.to_string(), content);
        }

        suggestions
    }
}

/// One comment line for an actionable finding, keyed by its file
fn remediation_note(finding: &Finding) -> Option<(&str, String)> {
    if finding.severity < Severity::Warning {
        return None;
    }
    let file = finding.file.as_deref()?;
    finding.suggestion.as_deref().filter(|s| !s.is_empty())?;
    Some((file, comment_line(file, &finding.message)))
}

fn comment_line(file: &str, message: &str) -> String {
    if file.to_lowercase().ends_with(".md") {
        format!("<!-- TODO: {} -->", message)
    } else {
        format!("# TODO: {}", message)
    }
}
