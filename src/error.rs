//! Error types for environment operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::environment::Environment`] operations.
///
/// Absent files that carry meaning (the role manifest, the fetch marker) are
/// not errors; they resolve to an empty role set and a fresh checkout.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid role discovery pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Failed to replace role manifest: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Invalid role name: {0:?}")]
    InvalidRoleName(String),

    #[error("Unknown role(s): {}", .0.join(", "))]
    UnknownRoles(Vec<String>),

    #[error("No Vagrantfile found in {} or any parent directory", .0.display())]
    RootNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl EnvironmentError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EnvironmentError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = EnvironmentError> = std::result::Result<T, E>;
