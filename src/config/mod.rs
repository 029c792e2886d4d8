//! Configuration module for tfadvisor
//!
//! This module handles:
//! - Project-level configuration (tfadvisor.toml)
//! - User-level configuration (~/.config/tfadvisor/config.toml)
//! - CLI defaults, engine parallelism, corpus locations

mod project_config;
mod user_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, EngineConfig, KnowledgeConfig,
    PatternsConfig, ProjectConfig, CONFIG_FILE_NAME,
};
pub use user_config::{load_config, user_config_path};
