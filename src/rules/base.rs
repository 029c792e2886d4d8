//! Base rule trait
//!
//! Every check the engine runs is a `Rule`: a stateless function from a
//! configuration bundle to findings.

use crate::models::{Category, ConfigurationBundle, Finding};

/// Trait for all best-practice rules
///
/// Rules never fail. Text that does not match a rule's patterns simply
/// produces no findings.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule;
///
/// impl Rule for MyRule {
///     fn name(&self) -> &'static str {
///         "my-rule"
///     }
///
///     fn description(&self) -> &'static str {
///         "Flags my specific problem"
///     }
///
///     fn category(&self) -> Category {
///         Category::Maintenance
///     }
///
///     fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier, copied into every finding the rule produces
    fn name(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Category of the findings this rule produces
    fn category(&self) -> Category;

    /// Inspect the bundle and return findings in a deterministic order
    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding>;
}

/// Catalogue entry describing one rule
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl RuleInfo {
    pub fn of(rule: &dyn Rule) -> Self {
        Self {
            name: rule.name(),
            description: rule.description(),
            category: rule.category(),
        }
    }
}
