//! Validation engine
//!
//! Runs every rule of the rule set over one bundle and tallies the result.
//! The engine holds nothing but the read-only rule list, so one instance can
//! be shared behind an `Arc` and called from any number of threads.
//!
//! With parallelism enabled, rules are evaluated on a rayon pool. Outputs are
//! still concatenated in rule-set order, so the report is identical to a
//! sequential run.

use super::base::{Rule, RuleInfo};
use super::default_rules;
use crate::models::{ConfigurationBundle, Finding, ValidationReport};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ValidationEngine {
    rules: Vec<Arc<dyn Rule>>,
    parallel: bool,
    pool: Option<rayon::ThreadPool>,
}

impl ValidationEngine {
    /// Engine over the default rule set, evaluated sequentially
    pub fn new() -> Self {
        ValidationEngineBuilder::new().build()
    }

    pub fn builder() -> ValidationEngineBuilder {
        ValidationEngineBuilder::new()
    }

    /// Validate a bundle. Never fails; malformed text yields fewer matches.
    pub fn validate(&self, bundle: &ConfigurationBundle) -> ValidationReport {
        debug!(
            "Validating {} files with {} rules",
            bundle.len(),
            self.rules.len()
        );

        let per_rule: Vec<Vec<Finding>> = if self.parallel {
            match &self.pool {
                Some(pool) => pool.install(|| self.evaluate_parallel(bundle)),
                None => self.evaluate_parallel(bundle),
            }
        } else {
            self.rules
                .iter()
                .map(|rule| Self::evaluate_rule(rule.as_ref(), bundle))
                .collect()
        };

        let findings: Vec<Finding> = per_rule.into_iter().flatten().collect();
        let report = ValidationReport::new(bundle.len(), findings);

        info!(
            "Validation complete: {} findings ({} errors, {} warnings, {} info) across {} files",
            report.findings.len(),
            report.summary.error_count,
            report.summary.warning_count,
            report.summary.info_count,
            report.summary.file_count
        );
        report
    }

    fn evaluate_parallel(&self, bundle: &ConfigurationBundle) -> Vec<Vec<Finding>> {
        self.rules
            .par_iter()
            .map(|rule| Self::evaluate_rule(rule.as_ref(), bundle))
            .collect()
    }

    fn evaluate_rule(rule: &dyn Rule, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let findings = rule.evaluate(bundle);
        debug!("Rule {} produced {} findings", rule.name(), findings.len());
        findings
    }

    /// Catalogue of the configured rules, in execution order
    pub fn rules(&self) -> Vec<RuleInfo> {
        self.rules.iter().map(|r| RuleInfo::of(r.as_ref())).collect()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a configured ValidationEngine
pub struct ValidationEngineBuilder {
    rules: Option<Vec<Arc<dyn Rule>>>,
    parallel: bool,
    workers: usize,
}

impl ValidationEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            rules: None,
            parallel: false,
            workers: 0,
        }
    }

    /// Evaluate rules on a rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set number of worker threads (0 = rayon global pool)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Add a rule. The first call replaces the default rule set.
    pub fn rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// Add multiple rules
    pub fn rules(mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Self {
        self.rules.get_or_insert_with(Vec::new).extend(rules);
        self
    }

    /// Build the engine
    pub fn build(self) -> ValidationEngine {
        let pool = if self.parallel && self.workers > 0 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!("Failed to build rule thread pool, using global pool: {}", e);
                    None
                }
            }
        } else {
            None
        };

        ValidationEngine {
            rules: self.rules.unwrap_or_else(default_rules),
            parallel: self.parallel,
            pool,
        }
    }
}

impl Default for ValidationEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
