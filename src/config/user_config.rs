//! User-level configuration for tfadvisor
//!
//! Supports loading config from:
//! - ~/.config/tfadvisor/config.toml (same schema as `tfadvisor.toml`)
//! - `tfadvisor.toml` in the working directory, or an explicit path
//!
//! Project settings override user settings.

use super::project_config::{load_config_file, load_project_config, ProjectConfig};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tfadvisor").join("config.toml"))
}

fn load_user_config() -> ProjectConfig {
    let Some(path) = user_config_path().filter(|p| p.exists()) else {
        return ProjectConfig::default();
    };
    match load_config_file(&path) {
        Ok(config) => {
            debug!("Loaded user config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            ProjectConfig::default()
        }
    }
}

/// Load config from all sources, with priority:
/// 1. `explicit` path, or `tfadvisor.toml` discovered in `dir` (highest)
/// 2. User config (~/.config/tfadvisor/config.toml)
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    let mut config = load_user_config();
    let project = match explicit {
        Some(path) => load_config_file(path)?,
        None => load_project_config(dir),
    };
    config.merge(project);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_user_config_path_name() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("tfadvisor/config.toml"));
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ci.toml");
        std::fs::write(&path, "[defaults]\nformat = \"markdown\"\n").unwrap();
        let config = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(config.format(), "markdown");
    }

    #[test]
    fn test_missing_explicit_path_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());
    }
}
