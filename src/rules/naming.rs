//! Naming convention rules for variables and resources

use super::base::Rule;
use super::scan::{blocks, config_files, resource_header, variable_header};
use crate::models::{Category, ConfigurationBundle, Finding, Severity};

/// Variables use lowercase snake_case
pub struct VariableNamingRule;

impl Rule for VariableNamingRule {
    fn name(&self) -> &'static str {
        "variable-naming"
    }

    fn description(&self) -> &'static str {
        "Variable names use underscores and lowercase letters"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in config_files(bundle) {
            for block in blocks(variable_header(), content) {
                let var_name = block.labels[0];
                if var_name.contains('-') {
                    findings.push(
                        Finding::new(
                            self.name(),
                            Severity::Warning,
                            Category::Naming,
                            format!("Variable name '{}' uses hyphens instead of underscores", var_name),
                        )
                        .in_file(file)
                        .at_line(block.line)
                        .with_best_practice("Use underscores, not hyphens, in variable names")
                        .with_suggestion(format!(
                            "Rename variable '{}' to use underscores instead of hyphens",
                            var_name
                        )),
                    );
                }
                if var_name.chars().any(char::is_uppercase) {
                    findings.push(
                        Finding::new(
                            self.name(),
                            Severity::Info,
                            Category::Naming,
                            format!("Variable name '{}' uses uppercase letters", var_name),
                        )
                        .in_file(file)
                        .at_line(block.line)
                        .with_best_practice("Use lowercase letters in variable names")
                        .with_suggestion(format!(
                            "Rename variable '{}' to use all lowercase letters",
                            var_name
                        )),
                    );
                }
            }
        }
        findings
    }
}

/// Resource local names contain an underscore and no hyphen
pub struct ResourceNamingRule;

impl ResourceNamingRule {
    fn follows_convention(name: &str) -> bool {
        name.contains('_') && !name.contains('-')
    }
}

impl Rule for ResourceNamingRule {
    fn name(&self) -> &'static str {
        "resource-naming"
    }

    fn description(&self) -> &'static str {
        "Resource names are underscore-separated words"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in config_files(bundle) {
            for block in blocks(resource_header(), content) {
                let res_name = block.labels[1];
                if Self::follows_convention(res_name) {
                    continue;
                }
                findings.push(
                    Finding::new(
                        self.name(),
                        Severity::Info,
                        Category::Naming,
                        format!("Resource name '{}' doesn't follow naming convention", res_name),
                    )
                    .in_file(file)
                    .at_line(block.line)
                    .with_best_practice("Use underscores in resource names for readability")
                    .with_suggestion(format!("Rename resource '{}' to use underscores", res_name)),
                );
            }
        }
        findings
    }
}
