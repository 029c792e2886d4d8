//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - CI job summaries

use crate::models::{Category, Finding, Severity, SuggestionSet, ValidationReport};

/// Maximum findings to show per category
const MAX_FINDINGS_PER_CATEGORY: usize = 25;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &ValidationReport) -> String {
    let mut md = String::new();
    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_summary(report));
    md.push('\n');
    md.push_str(&render_findings(report));
    md
}

fn render_header(report: &ValidationReport) -> String {
    let status = if report.successful() {
        "✅ Passed"
    } else {
        "❌ Failed"
    };
    format!(
        "# Terraform Best-Practice Report\n\n**Status: {}** | **Files: {}**\n",
        status, report.summary.file_count
    )
}

fn render_summary(report: &ValidationReport) -> String {
    let s = &report.summary;
    format!(
        r#"## Summary

| Severity | Count |
|----------|-------|
| 🔴 Error | {} |
| 🟡 Warning | {} |
| 🔵 Info | {} |
| **Total** | **{}** |
"#,
        s.error_count,
        s.warning_count,
        s.info_count,
        s.total()
    )
}

fn severity_emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "🔴",
        Severity::Warning => "🟡",
        Severity::Info => "🔵",
    }
}

fn category_title(category: Category) -> &'static str {
    match category {
        Category::Structure => "Structure",
        Category::Naming => "Naming",
        Category::Security => "Security",
        Category::Performance => "Performance",
        Category::Maintenance => "Maintenance",
        Category::Documentation => "Documentation",
    }
}

fn render_findings(report: &ValidationReport) -> String {
    let mut md = String::from("## Findings\n\n");
    if report.findings.is_empty() {
        md.push_str("No issues found! 🎉\n");
        return md;
    }

    for category in Category::ALL {
        let findings: Vec<&Finding> = report.by_category(category).collect();
        if findings.is_empty() {
            continue;
        }
        md.push_str(&format!(
            "### {} ({})\n\n",
            category_title(category),
            findings.len()
        ));
        md.push_str("| Severity | Issue | Location | Suggestion |\n");
        md.push_str("|----------|-------|----------|------------|\n");
        for f in findings.iter().take(MAX_FINDINGS_PER_CATEGORY) {
            md.push_str(&format!(
                "| {} {} | {} | {} | {} |\n",
                severity_emoji(f.severity),
                f.severity,
                escape_cell(&f.message),
                location(f),
                escape_cell(f.suggestion.as_deref().unwrap_or("")),
            ));
        }
        let remaining = findings.len().saturating_sub(MAX_FINDINGS_PER_CATEGORY);
        if remaining > 0 {
            md.push_str(&format!("\n*...and {} more*\n", remaining));
        }
        md.push('\n');
    }
    md
}

fn location(f: &Finding) -> String {
    match (&f.file, f.line) {
        (Some(file), Some(line)) => format!("`{}:{}`", file, line),
        (Some(file), None) => format!("`{}`", file),
        _ => "module".to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Render a suggestion set with each file in a fenced block
pub fn render_suggestions(set: &SuggestionSet) -> String {
    let mut md = format!("# Suggested Improvements\n\n{} files\n\n", set.len());
    for (file, content) in set {
        let lang = if file.ends_with(".md") { "markdown" } else { "hcl" };
        md.push_str(&format!("## `{}`\n\n```{}\n{}", file, lang, content));
        if !content.ends_with('\n') {
            md.push('\n');
        }
        md.push_str("```\n\n");
    }
    md
}
