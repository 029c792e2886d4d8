//! Project-level configuration support
//!
//! Loads per-project configuration from `tfadvisor.toml` in the working
//! directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # tfadvisor.toml
//!
//! [defaults]
//! format = "text"        # text, json, markdown
//! fail_on_error = true   # exit 1 when any Error finding is reported
//!
//! [engine]
//! parallel = true
//! workers = 4
//!
//! [patterns]
//! index = "patterns.json"
//!
//! [knowledge]
//! authority_sources = ["https://developer.hashicorp.com/terraform/language/style"]
//! ```

use crate::error::{Error, Result};
use crate::knowledge::DEFAULT_AUTHORITY_SOURCES;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "tfadvisor.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: CliDefaults,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub patterns: PatternsConfig,

    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Directory relative paths in this config resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Exit with status 1 when the report has Error findings
    #[serde(default)]
    pub fail_on_error: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: Option<bool>,

    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PatternsConfig {
    /// JSON array of patterns replacing the built-in corpus
    #[serde(default)]
    pub index: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct KnowledgeConfig {
    #[serde(default)]
    pub authority_sources: Option<Vec<String>>,
}

impl ProjectConfig {
    pub fn format(&self) -> &str {
        self.defaults.format.as_deref().unwrap_or("text")
    }

    pub fn fail_on_error(&self) -> bool {
        self.defaults.fail_on_error.unwrap_or(false)
    }

    pub fn parallel(&self) -> bool {
        self.engine.parallel.unwrap_or(true)
    }

    pub fn workers(&self) -> usize {
        self.engine.workers.unwrap_or(0)
    }

    /// Pattern index path, resolved against the config file's directory
    pub fn pattern_index(&self) -> Option<PathBuf> {
        let index = self.patterns.index.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if index.is_relative() => base.join(index),
            _ => index.clone(),
        })
    }

    pub fn authority_sources(&self) -> Vec<String> {
        self.knowledge.authority_sources.clone().unwrap_or_else(|| {
            DEFAULT_AUTHORITY_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    /// Overlay `other` on this config; values set in `other` win
    pub fn merge(&mut self, other: ProjectConfig) {
        if other.defaults.format.is_some() {
            self.defaults.format = other.defaults.format;
        }
        if other.defaults.fail_on_error.is_some() {
            self.defaults.fail_on_error = other.defaults.fail_on_error;
        }
        if other.engine.parallel.is_some() {
            self.engine.parallel = other.engine.parallel;
        }
        if other.engine.workers.is_some() {
            self.engine.workers = other.engine.workers;
        }
        if other.patterns.index.is_some() {
            self.patterns.index = other.patterns.index;
            self.base_dir = other.base_dir;
        }
        if other.knowledge.authority_sources.is_some() {
            self.knowledge.authority_sources = other.knowledge.authority_sources;
        }
    }
}

/// Discover `tfadvisor.toml` in `dir`. Missing or malformed files fall back
/// to defaults.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_config_file(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly named config file; any failure is an error
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut config: ProjectConfig = toml::from_str(&content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempdir().unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.format(), "text");
        assert!(!config.fail_on_error());
        assert!(config.parallel());
        assert_eq!(config.authority_sources().len(), 4);
        assert!(config.pattern_index().is_none());
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[defaults]
format = "json"
fail_on_error = true

[engine]
parallel = false

[patterns]
index = "patterns.json"

[knowledge]
authority_sources = ["https://example.com/docs"]
"#,
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.format(), "json");
        assert!(config.fail_on_error());
        assert!(!config.parallel());
        assert_eq!(config.pattern_index(), Some(dir.path().join("patterns.json")));
        assert_eq!(config.authority_sources(), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_malformed_discovery_falls_back() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[defaults\nformat = ").unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.format(), "text");
    }

    #[test]
    fn test_malformed_explicit_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[engine]\nparallel = \"yes\"\n").unwrap();
        assert!(matches!(load_config_file(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = ProjectConfig::default();
        base.defaults.format = Some("markdown".into());
        base.engine.workers = Some(2);

        let mut other = ProjectConfig::default();
        other.defaults.format = Some("json".into());
        base.merge(other);

        assert_eq!(base.format(), "json");
        assert_eq!(base.workers(), 2);
    }
}
