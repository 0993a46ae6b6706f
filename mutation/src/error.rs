//! Mutation error types.

use mutiny_analyzer::Category;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur while planning or generating mutants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("No mutation sites found")]
    NoSites,

    #[error("Plan targets {category} occurrence {ordinal}, but only {available} exist")]
    InvalidPlan {
        category: Category,
        ordinal: usize,
        available: usize,
    },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl MutationError {
    pub fn invalid_plan(category: Category, ordinal: usize, available: usize) -> Self {
        Self::InvalidPlan {
            category,
            ordinal,
            available,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
