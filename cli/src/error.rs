//! CLI error types.

use mutiny_mutation::MutationError;
use mutiny_parser::ParseError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error opening file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Mutation(#[from] MutationError),

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Error encoding manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl CliError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn manifest(path: &Path, source: serde_json::Error) -> Self {
        Self::Manifest {
            path: path.to_path_buf(),
            source,
        }
    }
}
