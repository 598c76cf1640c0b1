// ABOUTME: Application-wide error types for halyard.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::{DeployError, exit_status};

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    /// A pipeline stopped at its first failure and its error handler reported it.
    #[error("{action} failed: {message}")]
    Pipeline {
        action: &'static str,
        code: i32,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Process exit status for this error. Always non-zero and within `1..=255`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Pipeline { code, .. } => exit_status(*code),
            Error::Deploy(e) => exit_status(e.exit_code()),
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
