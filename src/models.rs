//! Core data models for tfadvisor
//!
//! These models are used throughout the codebase for representing
//! configuration bundles, findings, and validation results.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Severity levels for findings
///
/// Ordered by urgency: `Error > Warning > Info`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Concern a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structure,
    Naming,
    Security,
    Performance,
    Maintenance,
    Documentation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Structure,
        Category::Naming,
        Category::Security,
        Category::Performance,
        Category::Maintenance,
        Category::Documentation,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Structure => write!(f, "structure"),
            Category::Naming => write!(f, "naming"),
            Category::Security => write!(f, "security"),
            Category::Performance => write!(f, "performance"),
            Category::Maintenance => write!(f, "maintenance"),
            Category::Documentation => write!(f, "documentation"),
        }
    }
}

/// A single best-practice violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable name of the rule that produced it
    pub rule: String,
    pub message: String,
    pub severity: Severity,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 1-based line of the match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_practice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        rule: &str,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            severity,
            category,
            file: None,
            line: None,
            best_practice: None,
            suggestion: None,
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_best_practice(mut self, text: impl Into<String>) -> Self {
        self.best_practice = Some(text.into());
        self
    }

    pub fn with_suggestion(mut self, text: impl Into<String>) -> Self {
        self.suggestion = Some(text.into());
        self
    }
}

/// Counts of findings by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub file_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl ValidationSummary {
    pub fn from_findings(file_count: usize, findings: &[Finding]) -> Self {
        let mut summary = Self {
            file_count,
            ..Default::default()
        };
        for f in findings {
            match f.severity {
                Severity::Error => summary.error_count += 1,
                Severity::Warning => summary.warning_count += 1,
                Severity::Info => summary.info_count += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.error_count + self.warning_count + self.info_count
    }
}

/// Result of validating one bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn new(file_count: usize, findings: Vec<Finding>) -> Self {
        let summary = ValidationSummary::from_findings(file_count, &findings);
        Self { findings, summary }
    }

    /// True when no Error-severity finding was produced
    pub fn successful(&self) -> bool {
        self.summary.error_count == 0
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}

/// File name to suggested full file content
pub type SuggestionSet = BTreeMap<String, String>;

/// Caller-supplied set of named configuration files
///
/// Backed by a sorted map so every scan visits files in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationBundle {
    files: BTreeMap<String, String>,
}

impl ConfigurationBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build a bundle from a JSON object of file name to content
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::InvalidBundle("expected an object mapping file names to contents".into())
        })?;

        let mut files = BTreeMap::new();
        for (name, content) in object {
            let text = content.as_str().ok_or_else(|| {
                Error::InvalidBundle(format!("content of '{}' must be a string", name))
            })?;
            files.insert(name.clone(), text.to_string());
        }
        Ok(Self { files })
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Overlay `other` on top of this bundle; entries in `other` win
    pub fn merged_with(&self, other: &SuggestionSet) -> Self {
        let mut files = self.files.clone();
        for (name, content) in other {
            files.insert(name.clone(), content.clone());
        }
        Self { files }
    }
}

impl FromIterator<(String, String)> for ConfigurationBundle {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_summary_from_findings() {
        let findings = vec![
            Finding::new("a", Severity::Error, Category::Structure, "x"),
            Finding::new("b", Severity::Info, Category::Naming, "y"),
            Finding::new("c", Severity::Info, Category::Naming, "z"),
        ];
        let summary = ValidationSummary::from_findings(2, &findings);
        assert_eq!(summary.file_count, 2);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.warning_count, 0);
        assert_eq!(summary.info_count, 2);
        assert_eq!(summary.total(), findings.len());
    }

    #[test]
    fn test_finding_serializes_camel_case() {
        let finding = Finding::new("r", Severity::Warning, Category::Documentation, "m")
            .in_file("variables.tf")
            .with_best_practice("bp");
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["category"], "documentation");
        assert_eq!(value["bestPractice"], "bp");
        assert!(value.get("suggestion").is_none());
        assert!(value.get("line").is_none());
    }

    #[test]
    fn test_bundle_from_json() {
        let bundle = ConfigurationBundle::from_json(&json!({"main.tf": "x", "b.tf": ""})).unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.names().collect::<Vec<_>>(), vec!["b.tf", "main.tf"]);
    }

    #[test]
    fn test_bundle_from_json_rejects_bad_shapes() {
        assert!(matches!(
            ConfigurationBundle::from_json(&json!(["main.tf"])),
            Err(Error::InvalidBundle(_))
        ));
        assert!(matches!(
            ConfigurationBundle::from_json(&json!({"main.tf": 3})),
            Err(Error::InvalidBundle(_))
        ));
    }

    #[test]
    fn test_summary_json_shape() {
        let report = ValidationReport::new(1, vec![]);
        let value = serde_json::to_value(report.summary).unwrap();
        assert_eq!(value["fileCount"], 1);
        assert_eq!(value["errorCount"], 0);
        assert!(report.successful());
    }
}
