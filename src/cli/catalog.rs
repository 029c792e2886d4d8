//! Listing commands: rules, patterns, practices

use anyhow::Result;
use console::style;
use std::str::FromStr;

use tfadvisor::knowledge::{DocumentIndex, PracticeQuery};
use tfadvisor::patterns::{
    CloudProvider, ComplexityLevel, Pattern, PatternCategory, PatternFilter, PatternRepository,
};
use tfadvisor::rules::ValidationEngine;

pub struct PatternArgs {
    pub id: Option<String>,
    pub category: Option<String>,
    pub provider: Option<String>,
    pub complexity: Option<String>,
    pub tags: Vec<String>,
    pub query: Option<String>,
}

impl PatternArgs {
    fn filter(&self) -> Result<PatternFilter> {
        Ok(PatternFilter {
            category: self
                .category
                .as_deref()
                .map(PatternCategory::from_str)
                .transpose()?,
            provider: self
                .provider
                .as_deref()
                .map(CloudProvider::from_str)
                .transpose()?,
            complexity: self
                .complexity
                .as_deref()
                .map(ComplexityLevel::from_str)
                .transpose()?,
            tags: self.tags.clone(),
            query: self.query.clone(),
        })
    }
}

pub fn rules(engine: &ValidationEngine) -> Result<()> {
    let rules = engine.rules();
    println!("{} rules:\n", style(rules.len()).bold());
    for rule in rules {
        println!(
            "  {:<28} {:<14} {}",
            style(rule.name).cyan(),
            rule.category.to_string(),
            rule.description
        );
    }
    Ok(())
}

pub fn patterns(repo: &PatternRepository, args: PatternArgs, json: bool) -> Result<()> {
    if let Some(id) = args.id.as_deref() {
        let pattern = repo.get(id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&pattern)?);
        } else {
            print_pattern(&pattern);
        }
        return Ok(());
    }

    let found = repo.find(&args.filter()?);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No patterns match.");
        return Ok(());
    }
    for pattern in &found {
        println!(
            "  {:<28} {}/{}/{}  {}",
            style(&pattern.id).cyan(),
            pattern.provider,
            pattern.category,
            pattern.complexity,
            pattern.name
        );
    }
    Ok(())
}

fn print_pattern(pattern: &Pattern) {
    println!("{} ({})", style(&pattern.name).bold(), pattern.id);
    println!("{}\n", pattern.description);
    for (name, content) in &pattern.files {
        println!("{}", style(format!("--- {} ---", name)).dim());
        println!("{}", content);
    }
}

pub fn practices(index: &DocumentIndex, query: &PracticeQuery, json: bool) -> Result<()> {
    let found = index.best_practices(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No best practices match.");
        return Ok(());
    }
    for doc in &found {
        println!("{} [{}]", style(&doc.title).bold(), doc.category);
        println!("  {}", doc.description);
        for reference in &doc.references {
            println!("  {}", style(reference).dim());
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        let args = PatternArgs {
            id: None,
            category: Some("Networking".into()),
            provider: Some("aws".into()),
            complexity: None,
            tags: vec![],
            query: None,
        };
        let filter = args.filter().unwrap();
        assert_eq!(filter.category, Some(PatternCategory::Networking));
        assert_eq!(filter.provider, Some(CloudProvider::Aws));
    }

    #[test]
    fn test_filter_rejects_unknown_provider() {
        let args = PatternArgs {
            id: None,
            category: None,
            provider: Some("oracle".into()),
            complexity: None,
            tags: vec![],
            query: None,
        };
        assert!(args.filter().is_err());
    }
}
