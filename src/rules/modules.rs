//! Module usage rules: version pinning and unused local modules

use super::base::Rule;
use super::scan::{blocks, config_files, module_header};
use crate::models::{Category, ConfigurationBundle, Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// Sources that resolve to a moving remote target
const REGISTRY_SOURCES: [&str; 3] = ["registry.terraform.io", "github.com", "terraform-aws-modules"];

static SOURCE_ATTR: OnceLock<Regex> = OnceLock::new();
static VERSION_ATTR: OnceLock<Regex> = OnceLock::new();

fn source_attr() -> &'static Regex {
    SOURCE_ATTR.get_or_init(|| Regex::new(r#"source\s*=\s*"([^"]+)""#).unwrap())
}

fn version_attr() -> &'static Regex {
    VERSION_ATTR.get_or_init(|| Regex::new(r#"version\s*=\s*"[^"]+""#).unwrap())
}

pub struct ModuleVersionRule;

impl Rule for ModuleVersionRule {
    fn name(&self) -> &'static str {
        "module-version-pin"
    }

    fn description(&self) -> &'static str {
        "Registry and GitHub modules pin a version"
    }

    fn category(&self) -> Category {
        Category::Maintenance
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in config_files(bundle) {
            for block in blocks(module_header(), content) {
                let Some(source) = source_attr()
                    .captures(block.text)
                    .and_then(|caps| caps.get(1))
                else {
                    continue;
                };
                let remote = REGISTRY_SOURCES
                    .iter()
                    .any(|host| source.as_str().contains(host));
                if !remote || version_attr().is_match(block.text) {
                    continue;
                }
                let module_name = block.labels[0];
                findings.push(
                    Finding::new(
                        self.name(),
                        Severity::Warning,
                        Category::Maintenance,
                        format!("Module '{}' does not specify a version", module_name),
                    )
                    .in_file(file)
                    .at_line(block.line)
                    .with_best_practice("Always pin module versions for consistency and stability")
                    .with_suggestion(format!("Add version constraint to module '{}'", module_name)),
                );
            }
        }
        findings
    }
}

/// A `modules/` tree is shipped but nothing calls a module
pub struct UnusedLocalModulesRule;

impl Rule for UnusedLocalModulesRule {
    fn name(&self) -> &'static str {
        "unused-local-modules"
    }

    fn description(&self) -> &'static str {
        "Local modules directory is referenced by the configuration"
    }

    fn category(&self) -> Category {
        Category::Maintenance
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let has_modules_dir = bundle.names().any(|name| name.starts_with("modules/"));
        let uses_modules = bundle.iter().any(|(_, content)| content.contains("module "));
        if !has_modules_dir || uses_modules {
            return vec![];
        }
        vec![Finding::new(
            self.name(),
            Severity::Info,
            Category::Maintenance,
            "Local modules directory exists but modules are not used",
        )
        .with_best_practice("Use a modular approach for complex configurations")
        .with_suggestion("Consider using the modules in your configuration for better organization")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpinned_registry_module() {
        let content = r#"module "vpc" {
  source = "terraform-aws-modules/vpc/aws"
  cidr   = "10.0.0.0/16"
}

module "pinned" {
  source  = "terraform-aws-modules/vpc/aws"
  version = "~> 5.0"
}

module "local" {
  source = "./modules/network"
}
"#;
        let bundle = ConfigurationBundle::from_files([("main.tf", content)]);
        let findings = ModuleVersionRule.evaluate(&bundle);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Module 'vpc' does not specify a version");
        assert_eq!(findings[0].category, Category::Maintenance);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_unused_local_modules() {
        let bundle = ConfigurationBundle::from_files([
            ("main.tf", "resource \"aws_vpc\" \"main_vpc\" {\n}\n"),
            ("modules/net/main.tf", "resource \"aws_subnet\" \"a_b\" {\n}\n"),
        ]);
        let findings = UnusedLocalModulesRule.evaluate(&bundle);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].file.is_none());
    }

    #[test]
    fn test_local_modules_in_use() {
        let bundle = ConfigurationBundle::from_files([
            ("main.tf", "module \"net\" {\n  source = \"./modules/net\"\n}\n"),
            ("modules/net/main.tf", ""),
        ]);
        assert!(UnusedLocalModulesRule.evaluate(&bundle).is_empty());
    }
}
