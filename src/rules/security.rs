//! Security rules
//!
//! Scans every file of the bundle, not just configuration files, since
//! credentials leak into READMEs and tfvars as easily as into `.tf` text.

use super::base::Rule;
use super::scan::{blocks, line_of, role_key, variable_header};
use crate::models::{Category, ConfigurationBundle, Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;

static SECRET_ASSIGNMENT: OnceLock<Regex> = OnceLock::new();
static SENSITIVE_TRUE: OnceLock<Regex> = OnceLock::new();
static OPEN_INGRESS: OnceLock<Regex> = OnceLock::new();

/// `<identifier ending in a credential word> = "<literal>"`
fn secret_assignment() -> &'static Regex {
    SECRET_ASSIGNMENT.get_or_init(|| {
        Regex::new(
            r#"(?i)\b([A-Za-z0-9_-]*(?:password|secret|key|token|credential)s?)\s*=\s*"[^"]+""#,
        )
        .unwrap()
    })
}

fn sensitive_true() -> &'static Regex {
    SENSITIVE_TRUE.get_or_init(|| Regex::new(r"(?i)sensitive\s*=\s*true").unwrap())
}

fn open_ingress() -> &'static Regex {
    OPEN_INGRESS.get_or_init(|| {
        Regex::new(r#"(?i)ingress\s*\{[^}]*cidr_blocks\s*=\s*\[[^\]]*"0\.0\.0\.0/0"[^\]]*\]"#)
            .unwrap()
    })
}

/// One Error per literal credential assignment
pub struct HardcodedSecretRule;

impl Rule for HardcodedSecretRule {
    fn name(&self) -> &'static str {
        "hardcoded-secret"
    }

    fn description(&self) -> &'static str {
        "Detects passwords, keys and tokens assigned as string literals"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in bundle.iter() {
            for caps in secret_assignment().captures_iter(content) {
                let Some(whole) = caps.get(0) else { continue };
                let ident = caps.get(1).map_or("", |m| m.as_str());
                // The literal is never echoed back.
                findings.push(
                    Finding::new(
                        self.name(),
                        Severity::Error,
                        Category::Security,
                        format!("Possible hardcoded secret assigned to '{}'", ident),
                    )
                    .in_file(file)
                    .at_line(line_of(content, whole.start()))
                    .with_best_practice("Never hardcode sensitive values in Terraform configuration")
                    .with_suggestion(
                        "Use variables with sensitive = true or integrate with a secrets management solution",
                    ),
                );
            }
        }
        findings
    }
}

/// Variables files holding credentials must mark a variable sensitive
pub struct SensitiveVariableRule;

impl SensitiveVariableRule {
    fn has_sensitive_variable(content: &str) -> bool {
        blocks(variable_header(), content)
            .iter()
            .any(|block| sensitive_true().is_match(block.text))
    }
}

impl Rule for SensitiveVariableRule {
    fn name(&self) -> &'static str {
        "sensitive-variable"
    }

    fn description(&self) -> &'static str {
        "Variables carrying credentials are marked sensitive = true"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        bundle
            .iter()
            .filter(|(file, _)| role_key(file).contains("variable"))
            .filter(|(_, content)| {
                secret_assignment().is_match(content) && !Self::has_sensitive_variable(content)
            })
            .map(|(file, _)| {
                Finding::new(
                    self.name(),
                    Severity::Warning,
                    Category::Security,
                    "Sensitive variables should be marked with sensitive = true",
                )
                .in_file(file)
                .with_best_practice("Mark sensitive variables with sensitive = true")
                .with_suggestion(
                    "Add sensitive = true to variable definitions containing sensitive information",
                )
            })
            .collect()
    }
}

/// Ingress rules open to the whole internet
pub struct OpenIngressRule;

impl Rule for OpenIngressRule {
    fn name(&self) -> &'static str {
        "open-ingress"
    }

    fn description(&self) -> &'static str {
        "Flags security group ingress open to 0.0.0.0/0"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in bundle.iter() {
            for m in open_ingress().find_iter(content) {
                findings.push(
                    Finding::new(
                        self.name(),
                        Severity::Warning,
                        Category::Security,
                        "Security group allows access from 0.0.0.0/0 (any IP)",
                    )
                    .in_file(file)
                    .at_line(line_of(content, m.start()))
                    .with_best_practice("Restrict security group access to specific IP ranges")
                    .with_suggestion(
                        "Replace 0.0.0.0/0 with specific IP ranges or use a variable for allowed IPs",
                    ),
                );
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_literal_is_error() {
        let bundle = ConfigurationBundle::from_files([(
            "main.tf",
            "resource \"aws_db_instance\" \"db\" {\n  password = \"secret123\"\n}\n",
        )]);
        let findings = HardcodedSecretRule.evaluate(&bundle);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("password"));
        assert!(!findings[0].message.contains("secret123"));
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn test_secret_in_any_file() {
        let bundle = ConfigurationBundle::from_files([
            ("terraform.tfvars", "db_password = \"hunter2\"\n"),
            ("README.md", "Set `api_token = \"abc\"` in CI\n"),
        ]);
        let findings = HardcodedSecretRule.evaluate(&bundle);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("api_token"));
        assert!(findings[1].message.contains("db_password"));
    }

    #[test]
    fn test_references_and_key_name_pass() {
        let bundle = ConfigurationBundle::from_files([(
            "main.tf",
            "password = var.db_password\nkey_name = \"deployer\"\n",
        )]);
        assert!(HardcodedSecretRule.evaluate(&bundle).is_empty());
    }

    #[test]
    fn test_sensitive_variable_warning() {
        let bundle = ConfigurationBundle::from_files([(
            "variables.tf",
            "variable \"db\" {\n  type = string\n}\npassword = \"x\"\n",
        )]);
        let findings = SensitiveVariableRule.evaluate(&bundle);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_sensitive_variable_satisfied() {
        let bundle = ConfigurationBundle::from_files([(
            "vars",
            "variable \"db\" {\n  sensitive = true\n}\npassword = \"x\"\n",
        )]);
        assert!(SensitiveVariableRule.evaluate(&bundle).is_empty());
    }

    #[test]
    fn test_sensitive_flag_any_case() {
        let bundle = ConfigurationBundle::from_files([(
            "variables.tf",
            "variable \"db\" {\n  Sensitive = TRUE\n}\npassword = \"x\"\n",
        )]);
        assert!(SensitiveVariableRule.evaluate(&bundle).is_empty());
    }

    #[test]
    fn test_sensitive_flag_after_nested_block() {
        let bundle = ConfigurationBundle::from_files([(
            "variables.tf",
            "variable \"db_password\" {\n  validation {\n    condition = length(var.db_password) > 8\n  }\n  sensitive = true\n}\npassword = \"x\"\n",
        )]);
        assert!(SensitiveVariableRule.evaluate(&bundle).is_empty());
    }

    #[test]
    fn test_open_ingress_each_occurrence() {
        let content = r#"resource "aws_security_group" "web_sg" {
  ingress {
    from_port   = 22
    to_port     = 22
    protocol    = "tcp"
    cidr_blocks = ["0.0.0.0/0"]
  }
  ingress {
    from_port   = 443
    cidr_blocks = ["10.0.0.0/8", "0.0.0.0/0"]
  }
  ingress {
    from_port   = 80
    cidr_blocks = ["10.0.0.0/8"]
  }
}
"#;
        let bundle = ConfigurationBundle::from_files([("main.tf", content)]);
        let findings = OpenIngressRule.evaluate(&bundle);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("0.0.0.0/0"));
        assert_eq!(findings[0].line, Some(2));
    }
}
