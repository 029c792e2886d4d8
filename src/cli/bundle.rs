//! Load a configuration bundle from disk

use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::path::Path;
use tracing::debug;

use tfadvisor::models::ConfigurationBundle;

/// File extensions collected from a directory
const BUNDLE_EXTENSIONS: &[&str] = &["tf", "tfvars", "md"];

fn is_bundle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| BUNDLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read `path` into a bundle.
///
/// A directory is walked respecting .gitignore, keyed by `/`-separated
/// path relative to it. A single file is keyed by its file name.
pub fn load_bundle(path: &Path) -> Result<ConfigurationBundle> {
    if path.is_file() {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("File name is not valid UTF-8")?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(ConfigurationBundle::from_files([(name.to_string(), content)]));
    }

    if !path.is_dir() {
        bail!("Path does not exist: {}", path.display());
    }

    let walker = WalkBuilder::new(path)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .build();

    let mut bundle = ConfigurationBundle::new();
    for entry in walker.filter_map(|e| e.ok()) {
        let file = entry.path();
        if !file.is_file() || !is_bundle_file(file) {
            continue;
        }
        let Ok(relative) = file.strip_prefix(path) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        bundle.insert(key, content);
    }

    debug!("Loaded {} files from {}", bundle.len(), path.display());
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_walk() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("main.tf"), "# main\n").unwrap();
        std::fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored\n").unwrap();
        std::fs::create_dir(dir.path().join("modules")).unwrap();
        std::fs::write(dir.path().join("modules").join("net.tf"), "# net\n").unwrap();

        let bundle = load_bundle(dir.path()).unwrap();
        let names: Vec<&str> = bundle.names().collect();
        assert_eq!(names, vec!["README.md", "main.tf", "modules/net.tf"]);
    }

    #[test]
    fn test_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("variables.tf");
        std::fs::write(&file, "variable \"x\" {}\n").unwrap();

        let bundle = load_bundle(&file).unwrap();
        assert_eq!(bundle.get("variables.tf"), Some("variable \"x\" {}\n"));
    }

    #[test]
    fn test_missing_path() {
        let dir = tempdir().unwrap();
        assert!(load_bundle(&dir.path().join("nope")).is_err());
    }
}
