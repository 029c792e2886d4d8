//! Module layout rules
//!
//! - missing canonical files (main.tf, variables.tf, outputs.tf, README.md)
//! - oversized configuration files
//! - the aggregate "standard layout" check

use super::base::Rule;
use super::scan::{config_files, has_role, line_count, STANDARD_FILES};
use crate::models::{Category, ConfigurationBundle, Finding, Severity};

/// Reports a bundle-level finding when no file fills a canonical role
pub struct MissingFileRule {
    name: &'static str,
    description: &'static str,
    role: &'static str,
    severity: Severity,
    category: Category,
    best_practice: &'static str,
    suggestion: &'static str,
}

impl MissingFileRule {
    pub fn main_tf() -> Self {
        Self {
            name: "missing-main-tf",
            description: "Requires a main.tf file with the core resources",
            role: "main.tf",
            severity: Severity::Error,
            category: Category::Structure,
            best_practice: "Include a main.tf file with core resource definitions",
            suggestion: "Create a main.tf file with core resource definitions",
        }
    }

    pub fn variables_tf() -> Self {
        Self {
            name: "missing-variables-tf",
            description: "Expects input variables to live in variables.tf",
            role: "variables.tf",
            severity: Severity::Warning,
            category: Category::Structure,
            best_practice: "Include a variables.tf file for input variable definitions",
            suggestion: "Create a variables.tf file with input variable definitions",
        }
    }

    pub fn outputs_tf() -> Self {
        Self {
            name: "missing-outputs-tf",
            description: "Expects outputs to live in outputs.tf",
            role: "outputs.tf",
            severity: Severity::Warning,
            category: Category::Structure,
            best_practice: "Include an outputs.tf file for output definitions",
            suggestion: "Create an outputs.tf file with output definitions",
        }
    }

    pub fn readme() -> Self {
        Self {
            name: "missing-readme",
            description: "Expects a README.md documenting the module",
            role: "README.md",
            severity: Severity::Warning,
            category: Category::Documentation,
            best_practice: "Include a README.md file with module documentation",
            suggestion: "Create a README.md file with module usage examples and documentation",
        }
    }
}

impl Rule for MissingFileRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn category(&self) -> Category {
        self.category
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        if has_role(bundle, self.role) {
            return vec![];
        }
        vec![Finding::new(
            self.name,
            self.severity,
            self.category,
            format!("Missing {} file", self.role),
        )
        .with_best_practice(self.best_practice)
        .with_suggestion(self.suggestion)]
    }
}

pub struct LargeFileRule {
    threshold: usize,
}

impl LargeFileRule {
    pub const DEFAULT_THRESHOLD: usize = 500;

    pub fn new() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl Default for LargeFileRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for LargeFileRule {
    fn name(&self) -> &'static str {
        "large-file"
    }

    fn description(&self) -> &'static str {
        "Flags configuration files longer than 500 lines"
    }

    fn category(&self) -> Category {
        Category::Maintenance
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        config_files(bundle)
            .filter_map(|(name, content)| {
                let lines = line_count(content);
                (lines > self.threshold).then(|| {
                    Finding::new(
                        self.name(),
                        Severity::Warning,
                        Category::Maintenance,
                        format!(
                            "File {} is too large ({} lines). Consider splitting it into multiple files.",
                            name, lines
                        ),
                    )
                    .in_file(name)
                    .with_best_practice(format!(
                        "Keep Terraform files under {} lines for better maintainability",
                        self.threshold
                    ))
                    .with_suggestion(
                        "Split the file into multiple logical files based on resource types or functionality",
                    )
                })
            })
            .collect()
    }
}

/// Single Info finding listing every canonical file that is absent
pub struct StandardLayoutRule;

impl Rule for StandardLayoutRule {
    fn name(&self) -> &'static str {
        "standard-module-layout"
    }

    fn description(&self) -> &'static str {
        "Summarizes which standard module files are absent"
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let missing: Vec<&str> = STANDARD_FILES
            .iter()
            .copied()
            .filter(|role| !has_role(bundle, role))
            .collect();
        if missing.is_empty() {
            return vec![];
        }
        vec![Finding::new(
            self.name(),
            Severity::Info,
            Category::Structure,
            format!("Module is missing standard files: {}", missing.join(", ")),
        )
        .with_best_practice(
            "Follow standard module structure with main.tf, variables.tf, outputs.tf, and README.md",
        )
        .with_suggestion("Add the missing files to follow the standard module structure")]
    }
}
