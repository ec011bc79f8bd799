// ABOUTME: Application-wide error types for kegd.
// ABOUTME: Wraps strategy validation, configuration, and file loading failures.

use crate::strategy::MalformedStrategyError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid deployment strategy: {0}")]
    Strategy(#[from] MalformedStrategyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The structural violation, if this error came from strategy validation.
    pub fn as_strategy_error(&self) -> Option<&MalformedStrategyError> {
        match self {
            Error::Strategy(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
