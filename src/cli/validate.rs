//! Validate command

use anyhow::Result;
use console::style;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use tfadvisor::reporters::{self, OutputFormat};
use tfadvisor::rules::ValidationEngine;

use super::bundle::load_bundle;

pub fn run(
    path: &Path,
    format: &str,
    fail_on_error: bool,
    engine: &ValidationEngine,
) -> Result<()> {
    let output_format = OutputFormat::from_str(format)?;
    let start = Instant::now();

    let bundle = load_bundle(path)?;
    let report = engine.validate(&bundle);

    println!("{}", reporters::report_with_format(&report, output_format)?);

    if output_format == OutputFormat::Text {
        let status = if report.successful() {
            style("✓ passed").green().bold()
        } else {
            style("✗ failed").red().bold()
        };
        eprintln!(
            "{} {} files, {} findings in {:.2?}",
            status,
            report.summary.file_count,
            report.summary.total(),
            start.elapsed()
        );
    }

    if fail_on_error && !report.successful() {
        eprintln!(
            "Failing due to --fail-on-error ({} errors)",
            report.summary.error_count
        );
        std::process::exit(1);
    }

    Ok(())
}
