//! Library-level tests for validation and suggestions
//!
//! Exercises the public API end to end: realistic module layouts, file-name
//! normalization, concurrency and the suggest/re-validate loop.

use std::sync::Arc;
use std::thread;

use tfadvisor::models::{Category, ConfigurationBundle, Severity};
use tfadvisor::{ImprovementSynthesizer, ValidationEngine};

const WELL_FORMED_MAIN: &str = r#"provider "aws" {
  region = var.region
}

resource "aws_instance" "web_server" {
  ami           = "ami-0123456789abcdef0"
  instance_type = "t3.micro"

  tags = var.tags
}
"#;

const WELL_FORMED_VARIABLES: &str = r#"variable "region" {
  description = "AWS region to deploy into"
  type        = string
  default     = "us-east-1"
}

variable "tags" {
  description = "Tags applied to every resource"
  type        = map(string)
  default     = {}
}
"#;

const WELL_FORMED_OUTPUTS: &str = r#"output "instance_id" {
  description = "ID of the web server instance"
  value       = aws_instance.web_server.id
}
"#;

const WELL_FORMED_README: &str = "# Web server\n\nDeploys a single EC2 instance.\n";

fn well_formed_bundle() -> ConfigurationBundle {
    ConfigurationBundle::from_files([
        ("main.tf", WELL_FORMED_MAIN),
        ("variables.tf", WELL_FORMED_VARIABLES),
        ("outputs.tf", WELL_FORMED_OUTPUTS),
        ("README.md", WELL_FORMED_README),
    ])
}

fn count(report: &tfadvisor::ValidationReport, severity: Severity, category: Category) -> usize {
    report
        .findings
        .iter()
        .filter(|f| f.severity == severity && f.category == category)
        .count()
}

#[test]
fn test_single_main_tf_scenario() {
    let bundle = ConfigurationBundle::from_files([(
        "main.tf",
        "resource \"aws_instance\" \"web\" {\n  ami = \"ami-123\"\n}\n",
    )]);
    let report = ValidationEngine::new().validate(&bundle);

    assert!(!report.findings.is_empty());
    assert_eq!(report.summary.error_count, 0);

    let messages: Vec<&str> = report.findings.iter().map(|f| f.message.as_str()).collect();
    assert!(messages.contains(&"Missing variables.tf file"));
    assert!(messages.contains(&"Missing outputs.tf file"));
    assert!(messages.contains(&"Missing README.md file"));
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule == "standard-module-layout" && f.severity == Severity::Info));
}

#[test]
fn test_well_formed_module_has_no_errors() {
    let report = ValidationEngine::new().validate(&well_formed_bundle());
    assert_eq!(count(&report, Severity::Error, Category::Structure), 0);
    assert_eq!(report.summary.error_count, 0);
    assert!(report.successful());
}

#[test]
fn test_open_ssh_ingress_scenario() {
    let bundle = ConfigurationBundle::from_files([(
        "main.tf",
        r#"resource "aws_security_group" "ssh" {
  name = "ssh"

  ingress {
    from_port   = 22
    to_port     = 22
    protocol    = "tcp"
    cidr_blocks = ["0.0.0.0/0"]
  }
}
"#,
    )]);
    let report = ValidationEngine::new().validate(&bundle);
    assert!(report.findings.iter().any(|f| {
        f.severity == Severity::Warning
            && f.category == Category::Security
            && f.message.contains("0.0.0.0/0")
    }));
}

#[test]
fn test_missing_main_reported_once() {
    let bundle = ConfigurationBundle::from_files([("variables.tf", WELL_FORMED_VARIABLES)]);
    let report = ValidationEngine::new().validate(&bundle);
    let structure_errors: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Error && f.category == Category::Structure)
        .collect();
    assert_eq!(structure_errors.len(), 1);
    assert_eq!(structure_errors[0].message, "Missing main.tf file");
}

#[test]
fn test_file_name_normalization() {
    let bundle = ConfigurationBundle::from_files([
        ("main", "# main\n"),
        ("vars", "# variables\n"),
        ("output.tf", "# outputs\n"),
    ]);
    let report = ValidationEngine::new().validate(&bundle);
    for rule in ["missing-main-tf", "missing-variables-tf", "missing-outputs-tf"] {
        assert!(
            report.findings.iter().all(|f| f.rule != rule),
            "unexpected {} finding",
            rule
        );
    }
}

#[test]
fn test_attributes_after_indented_sub_blocks_are_seen() {
    let bundle = ConfigurationBundle::from_files([
        (
            "variables.tf",
            "variable \"port\" {\n  type = number\n  validation {\n    condition     = var.port > 0\n    error_message = \"Port must be positive.\"\n  }\n  description = \"Port\"\n}\n",
        ),
        (
            "main.tf",
            "resource \"aws_instance\" \"web_server\" {\n  root_block_device {\n    volume_size = 20\n  }\n  tags = var.tags\n}\n",
        ),
    ]);
    let report = ValidationEngine::new().validate(&bundle);
    for rule in ["variable-description", "missing-tags"] {
        assert!(
            report.findings.iter().all(|f| f.rule != rule),
            "unexpected {} finding",
            rule
        );
    }
}

#[test]
fn test_password_anywhere_is_an_error() {
    let bundle = ConfigurationBundle::from_files([
        ("main.tf", "# main\n"),
        ("terraform.tfvars", "db_password = \"secret123\"\n"),
    ]);
    let report = ValidationEngine::new().validate(&bundle);
    assert!(report.findings.iter().any(|f| {
        f.severity == Severity::Error
            && f.category == Category::Security
            && f.message.contains("password")
    }));
    assert!(report.findings.iter().all(|f| !f.message.contains("secret123")));
}

#[test]
fn test_summary_counts_and_idempotence() {
    let engine = ValidationEngine::new();
    let bundle = ConfigurationBundle::from_files([(
        "main.tf",
        "variable \"Bad-Name\" {}\nresource \"aws_s3_bucket\" \"logs\" {}\n",
    )]);
    let first = engine.validate(&bundle);
    let second = engine.validate(&bundle);
    assert_eq!(first, second);
    assert_eq!(first.summary.total(), first.findings.len());
}

#[test]
fn test_concurrent_validate_matches_sequential() {
    let engine = Arc::new(ValidationEngine::builder().parallel(true).workers(2).build());
    let bundle = well_formed_bundle();
    let expected = ValidationEngine::new().validate(&bundle);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let bundle = &bundle;
                scope.spawn(move || engine.validate(bundle))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_suggest_empty_bundle_scaffolds_everything() {
    let synthesizer = ImprovementSynthesizer::new(Arc::new(ValidationEngine::new()));
    let suggestions = synthesizer.suggest(&ConfigurationBundle::new());
    for name in ["main.tf", "variables.tf", "outputs.tf", "README.md"] {
        let content = suggestions.get(name).expect("scaffold missing");
        assert!(!content.trim().is_empty());
    }
}

#[test]
fn test_applying_suggestions_does_not_add_errors() {
    let engine = Arc::new(ValidationEngine::new());
    let synthesizer = ImprovementSynthesizer::new(engine.clone());
    let bundle = ConfigurationBundle::from_files([(
        "main.tf",
        "resource \"aws_instance\" \"web-server\" {\n  password = \"hunter2\"\n}\n",
    )]);

    let before = engine.validate(&bundle).summary.error_count;
    let improved = bundle.merged_with(&synthesizer.suggest(&bundle));
    let after = engine.validate(&improved).summary.error_count;
    assert!(after <= before);

    let again = improved.merged_with(&synthesizer.suggest(&improved));
    assert!(engine.validate(&again).summary.error_count <= after);
}

#[test]
fn test_remediation_notes_target_problem_files() {
    let synthesizer = ImprovementSynthesizer::new(Arc::new(ValidationEngine::new()));
    let bundle = ConfigurationBundle::from_files([
        ("main.tf", "# main\n"),
        ("variables.tf", "variable \"region\" {\n  type = string\n}\n"),
        ("outputs.tf", "# outputs\n"),
        ("README.md", "# Module\n"),
    ]);
    let suggestions = synthesizer.suggest(&bundle);
    let variables = suggestions.get("variables.tf").expect("variables note");
    assert!(variables.starts_with("# TODO: "));
    assert!(variables.ends_with("variable \"region\" {\n  type = string\n}\n"));
    assert!(!suggestions.contains_key("main.tf"));
}
