//! Description checks for variable and output blocks

use super::base::Rule;
use super::scan::{blocks, config_files, description_attr, output_header, role_key, variable_header};
use crate::models::{Category, ConfigurationBundle, Finding, Severity};
use regex::Regex;

/// Which declaration kind a [`DescriptionRule`] checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Variable,
    Output,
}

impl BlockKind {
    fn header(self) -> &'static Regex {
        match self {
            BlockKind::Variable => variable_header(),
            BlockKind::Output => output_header(),
        }
    }

    /// Substring of the lower-cased normalized file name selecting files to scan
    fn file_marker(self) -> &'static str {
        match self {
            BlockKind::Variable => "variable",
            BlockKind::Output => "output",
        }
    }
}

/// Every variable/output block carries `description = "..."`
pub struct DescriptionRule {
    kind: BlockKind,
}

impl DescriptionRule {
    pub fn variables() -> Self {
        Self {
            kind: BlockKind::Variable,
        }
    }

    pub fn outputs() -> Self {
        Self {
            kind: BlockKind::Output,
        }
    }

    fn finding(&self, file: &str, line: usize, label: &str) -> Finding {
        let (severity, noun, plural) = match self.kind {
            BlockKind::Variable => (Severity::Warning, "Variable", "variables"),
            BlockKind::Output => (Severity::Info, "Output", "outputs"),
        };
        Finding::new(
            self.name(),
            severity,
            Category::Documentation,
            format!("{} '{}' is missing a description", noun, label),
        )
        .in_file(file)
        .at_line(line)
        .with_best_practice(format!("Include descriptions for all {}", plural))
        .with_suggestion(format!(
            "Add a description attribute to {} '{}'",
            noun.to_lowercase(),
            label
        ))
    }
}

impl Rule for DescriptionRule {
    fn name(&self) -> &'static str {
        match self.kind {
            BlockKind::Variable => "variable-description",
            BlockKind::Output => "output-description",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            BlockKind::Variable => "Variables declare a description",
            BlockKind::Output => "Outputs declare a description",
        }
    }

    fn category(&self) -> Category {
        Category::Documentation
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let marker = self.kind.file_marker();
        config_files(bundle)
            .filter(|(file, _)| role_key(file).contains(marker))
            .flat_map(|(file, content)| {
                blocks(self.kind.header(), content)
                    .into_iter()
                    .filter(|block| !description_attr().is_match(block.text))
                    .map(move |block| self.finding(file, block.line, block.labels[0]))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_missing_description() {
        let bundle = ConfigurationBundle::from_files([(
            "variables.tf",
            "variable \"region\" {\n  type = string\n}\n\nvariable \"name\" {\n  description = \"Name\"\n}\n",
        )]);
        let findings = DescriptionRule::variables().evaluate(&bundle);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Variable 'region' is missing a description");
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].line, Some(1));
    }

    #[test]
    fn test_output_missing_description_is_info() {
        let bundle = ConfigurationBundle::from_files([(
            "output",
            "output \"id\" {\n  value = aws_instance.web.id\n}\n",
        )]);
        let findings = DescriptionRule::outputs().evaluate(&bundle);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].file.as_deref(), Some("output"));
    }

    #[test]
    fn test_only_matching_files_scanned() {
        let bundle = ConfigurationBundle::from_files([(
            "main.tf",
            "variable \"region\" {\n}\noutput \"id\" {\n}\n",
        )]);
        assert!(DescriptionRule::variables().evaluate(&bundle).is_empty());
        assert!(DescriptionRule::outputs().evaluate(&bundle).is_empty());
    }

    #[test]
    fn test_nested_block_hides_description() {
        // The first bare `}` line closes the block early.
        let content = "variable \"port\" {\n  validation {\n    condition = var.port > 0\n}\n  description = \"Port\"\n}\n";
        let bundle = ConfigurationBundle::from_files([("variables.tf", content)]);
        assert_eq!(DescriptionRule::variables().evaluate(&bundle).len(), 1);
    }
}
