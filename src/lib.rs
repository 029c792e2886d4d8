//! tfadvisor - Terraform best-practice validation and improvement suggestions
//!
//! Runs a fixed set of regex-driven rules over a bundle of Terraform file
//! contents, reports findings with severity, category and remediation text,
//! and synthesizes file content that fixes what it can.
//!
//! ```
//! use tfadvisor::{ConfigurationBundle, ValidationEngine};
//!
//! let bundle = ConfigurationBundle::from_files([("main.tf", "# empty\n")]);
//! let report = ValidationEngine::new().validate(&bundle);
//! assert_eq!(report.summary.file_count, 1);
//! assert!(report.successful());
//! ```

pub mod config;
pub mod error;
pub mod fixes;
pub mod knowledge;
pub mod mcp;
pub mod models;
pub mod patterns;
pub mod reporters;
pub mod rules;

pub use error::{Error, Result};
pub use fixes::ImprovementSynthesizer;
pub use knowledge::DocumentIndex;
pub use models::{
    Category, ConfigurationBundle, Finding, Severity, SuggestionSet, ValidationReport,
    ValidationSummary,
};
pub use patterns::PatternRepository;
pub use rules::{Rule, ValidationEngine};
