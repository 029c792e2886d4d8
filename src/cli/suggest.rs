//! Suggest command

use anyhow::{bail, Context, Result};
use console::style;
use std::path::{Component, Path};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use tfadvisor::fixes::ImprovementSynthesizer;
use tfadvisor::models::SuggestionSet;
use tfadvisor::reporters::{self, OutputFormat};
use tfadvisor::rules::ValidationEngine;

use super::bundle::load_bundle;

pub fn run(
    path: &Path,
    format: &str,
    output_dir: Option<&Path>,
    engine: Arc<ValidationEngine>,
) -> Result<()> {
    let output_format = OutputFormat::from_str(format)?;
    let bundle = load_bundle(path)?;
    let suggestions = ImprovementSynthesizer::new(engine).suggest(&bundle);

    match output_dir {
        Some(dir) => write_suggestions(&suggestions, dir),
        None => {
            println!(
                "{}",
                reporters::suggestions_with_format(&suggestions, output_format)?
            );
            Ok(())
        }
    }
}

fn write_suggestions(suggestions: &SuggestionSet, dir: &Path) -> Result<()> {
    if suggestions.is_empty() {
        eprintln!("{} Nothing to suggest", style("✓").green().bold());
        return Ok(());
    }

    for (name, content) in suggestions {
        let relative = Path::new(name);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("Refusing to write outside the output directory: {}", name);
        }

        let target = dir.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&target, content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!("Wrote {}", target.display());
        eprintln!("{} {}", style("wrote").cyan(), target.display());
    }

    eprintln!(
        "{} {} files written to {}",
        style("✓").green().bold(),
        suggestions.len(),
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_nested_files() {
        let dir = tempdir().unwrap();
        let mut set = SuggestionSet::new();
        set.insert("main.tf".into(), "# main\n".into());
        set.insert("modules/net/main.tf".into(), "# net\n".into());

        write_suggestions(&set, dir.path()).unwrap();
        assert!(dir.path().join("modules/net/main.tf").exists());
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = tempdir().unwrap();
        let mut set = SuggestionSet::new();
        set.insert("../evil.tf".into(), "x".into());
        assert!(write_suggestions(&set, dir.path()).is_err());
    }
}
