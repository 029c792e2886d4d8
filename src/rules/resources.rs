//! Resource hygiene rules: tagging and count-over-length

use super::base::Rule;
use super::scan::{blocks, config_files, line_of, resource_header};
use crate::models::{Category, ConfigurationBundle, Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// Provider prefixes whose resources accept tags
const TAGGABLE_PREFIXES: [&str; 3] = ["aws_", "azurerm_", "google_"];

/// Types that cannot carry tags (substring match)
const UNTAGGABLE_TYPES: [&str; 3] = ["aws_iam_role_policy", "aws_iam_policy", "aws_route"];

static TAGS_ATTR: OnceLock<Regex> = OnceLock::new();
static COUNT_LENGTH: OnceLock<Regex> = OnceLock::new();

fn tags_attr() -> &'static Regex {
    TAGS_ATTR.get_or_init(|| Regex::new(r"tags\s*=").unwrap())
}

fn count_length() -> &'static Regex {
    COUNT_LENGTH
        .get_or_init(|| Regex::new(r"(?m)^[ \t]*count\s*=\s*length\(([^)]+)\)").unwrap())
}

pub struct MissingTagsRule;

impl MissingTagsRule {
    fn wants_tags(resource_type: &str) -> bool {
        TAGGABLE_PREFIXES.iter().any(|p| resource_type.starts_with(p))
            && !UNTAGGABLE_TYPES.iter().any(|t| resource_type.contains(t))
    }
}

impl Rule for MissingTagsRule {
    fn name(&self) -> &'static str {
        "missing-tags"
    }

    fn description(&self) -> &'static str {
        "Cloud resources that support tags declare them"
    }

    fn category(&self) -> Category {
        Category::Maintenance
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in config_files(bundle) {
            for block in blocks(resource_header(), content) {
                let (res_type, res_name) = (block.labels[0], block.labels[1]);
                if !Self::wants_tags(res_type) || tags_attr().is_match(block.text) {
                    continue;
                }
                findings.push(
                    Finding::new(
                        self.name(),
                        Severity::Info,
                        Category::Maintenance,
                        format!("Resource '{}' of type '{}' is missing tags", res_name, res_type),
                    )
                    .in_file(file)
                    .at_line(block.line)
                    .with_best_practice(
                        "Apply consistent tagging to all resources for better management",
                    )
                    .with_suggestion(format!("Add tags to resource '{}'", res_name)),
                );
            }
        }
        findings
    }
}

/// `count = length(x)` re-creates resources when `x` is reordered
pub struct CountOverLengthRule;

impl Rule for CountOverLengthRule {
    fn name(&self) -> &'static str {
        "count-over-length"
    }

    fn description(&self) -> &'static str {
        "Prefers for_each over count = length(...)"
    }

    fn category(&self) -> Category {
        Category::Maintenance
    }

    fn evaluate(&self, bundle: &ConfigurationBundle) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (file, content) in config_files(bundle) {
            for block in blocks(resource_header(), content) {
                let Some(caps) = count_length().captures(block.text) else {
                    continue;
                };
                let expr = caps.get(1).map_or("", |m| m.as_str()).trim();
                let res_name = block.labels[1];
                let line = caps
                    .get(0)
                    .map_or(block.line, |m| line_of(content, block.start + m.start()));
                findings.push(
                    Finding::new(
                        self.name(),
                        Severity::Info,
                        Category::Maintenance,
                        format!(
                            "Resource '{}' uses count with length({}), consider using for_each",
                            res_name, expr
                        ),
                    )
                    .in_file(file)
                    .at_line(line)
                    .with_best_practice(
                        "Use for_each instead of count when iterating over complex values",
                    )
                    .with_suggestion(format!(
                        "Change 'count = length({})' to 'for_each = toset({})'",
                        expr, expr
                    )),
                );
            }
        }
        findings
    }
}
