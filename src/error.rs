//! Library error type
//!
//! Findings are data, not errors. These variants cover contract violations
//! at the API edge and lookups that miss.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration bundle: {0}")]
    InvalidBundle(String),

    #[error("pattern not found: {0}")]
    PatternNotFound(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
