//! Plain text reporter
//!
//! Output carries no ANSI codes. The MCP tools embed it verbatim and the CLI
//! styles only its own header line.

use crate::models::{SuggestionSet, ValidationReport};
use std::fmt::Write;

/// Characters of each suggested file shown in the guide
pub const PREVIEW_LIMIT: usize = 500;

/// Numbered listing of every finding under a one-line summary
pub fn format_validation(report: &ValidationReport) -> String {
    let s = &report.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Validation summary: {} files analyzed, {} errors, {} warnings, {} info\n",
        s.file_count, s.error_count, s.warning_count, s.info_count
    );

    if report.findings.is_empty() {
        out.push_str("No issues found!\n");
        return out;
    }

    for (i, finding) in report.findings.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, finding.severity, finding.message);
        if let Some(file) = &finding.file {
            match finding.line {
                Some(line) => {
                    let _ = writeln!(out, "   File: {}:{}", file, line);
                }
                None => {
                    let _ = writeln!(out, "   File: {}", file);
                }
            }
        }
        if let Some(bp) = &finding.best_practice {
            let _ = writeln!(out, "   Best Practice: {}", bp);
        }
        if let Some(suggestion) = &finding.suggestion {
            let _ = writeln!(out, "   Suggestion: {}", suggestion);
        }
        out.push('\n');
    }
    out
}

/// Per-file previews of a suggestion set
pub fn format_suggestions(set: &SuggestionSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Suggested improvements for {} files:\n", set.len());

    for (file, content) in set {
        let _ = writeln!(out, "File: {}", file);
        out.push_str("```\n");
        match content.char_indices().nth(PREVIEW_LIMIT) {
            Some((cut, _)) => {
                out.push_str(&content[..cut]);
                out.push_str("...\n(content truncated for display)");
            }
            None => out.push_str(content),
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n\n");
    }
    out
}
