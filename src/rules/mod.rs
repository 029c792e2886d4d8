//! Best-practice rules for Terraform configuration bundles
//!
//! This module contains:
//! - The `Rule` trait every check implements
//! - The scanning helpers the checks share
//! - The `ValidationEngine` that runs the fixed rule set
//!
//! # Rule Set
//!
//! | Group         | Rules |
//! |---------------|-------|
//! | Structure     | missing-main-tf, missing-variables-tf, missing-outputs-tf, large-file, standard-module-layout |
//! | Naming        | variable-naming, resource-naming |
//! | Security      | hardcoded-secret, sensitive-variable, open-ingress |
//! | Documentation | missing-readme, variable-description, output-description |
//! | Modules       | module-version-pin, unused-local-modules |
//! | Resources     | missing-tags, count-over-length |

mod base;
mod documentation;
mod engine;
mod modules;
mod naming;
mod resources;
pub mod scan;
mod security;
mod structure;

pub use base::{Rule, RuleInfo};
pub use documentation::DescriptionRule;
pub use engine::{ValidationEngine, ValidationEngineBuilder};
pub use modules::{ModuleVersionRule, UnusedLocalModulesRule};
pub use naming::{ResourceNamingRule, VariableNamingRule};
pub use resources::{CountOverLengthRule, MissingTagsRule};
pub use security::{HardcodedSecretRule, OpenIngressRule, SensitiveVariableRule};
pub use structure::{LargeFileRule, MissingFileRule, StandardLayoutRule};

use std::sync::Arc;

/// The fixed rule set, in execution order
pub fn default_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        // Structure
        Arc::new(MissingFileRule::main_tf()),
        Arc::new(MissingFileRule::variables_tf()),
        Arc::new(MissingFileRule::outputs_tf()),
        Arc::new(LargeFileRule::new()),
        Arc::new(StandardLayoutRule),
        // Naming
        Arc::new(VariableNamingRule),
        Arc::new(ResourceNamingRule),
        // Security
        Arc::new(HardcodedSecretRule),
        Arc::new(SensitiveVariableRule),
        Arc::new(OpenIngressRule),
        // Documentation
        Arc::new(MissingFileRule::readme()),
        Arc::new(DescriptionRule::variables()),
        Arc::new(DescriptionRule::outputs()),
        // Modules
        Arc::new(ModuleVersionRule),
        Arc::new(UnusedLocalModulesRule),
        // Resources
        Arc::new(MissingTagsRule),
        Arc::new(CountOverLengthRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_names_unique_and_ordered() {
        let rules = default_rules();
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names.len(), 17);
        assert_eq!(names[0], "missing-main-tf");
        assert_eq!(names[names.len() - 1], "count-over-length");
    }
}
