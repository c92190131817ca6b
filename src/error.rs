use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::settings::ConfigError;
use crate::process::ProcessError;

/// Top-level error for every gitkit operation
///
/// Module errors convert into it via `From`, so callers can use `?` across
/// the process runner, filesystem helpers and configuration alike. Nothing
/// in the crate retries or recovers; the underlying cause is carried as-is.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("File does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid host data: {0}")]
    HostData(#[from] serde_json::Error),
}

impl Error {
    /// Captured stdout of a failed process, if this error came from one
    pub fn stdout(&self) -> Option<&str> {
        match self {
            Error::Process(e) => Some(e.stdout()),
            _ => None,
        }
    }

    /// Captured stderr of a failed process, if this error came from one
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::Process(e) => Some(e.stderr()),
            _ => None,
        }
    }
}

/// Result type for gitkit operations
pub type Result<T> = std::result::Result<T, Error>;
