//! Error types for scenario runs.

use thiserror::Error;

/// Result type for scenario runs.
pub type ExampleResult<T> = Result<T, ExampleError>;

/// Errors that fail a scenario.
#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("Scenario '{scenario}' has no source")]
    MissingSource { scenario: String },

    #[error("Failed to parse source of '{scenario}': {message}")]
    Parse { scenario: String, message: String },

    #[error("Expected {expected} sites in '{scenario}', found {actual}")]
    SiteCount {
        scenario: String,
        expected: usize,
        actual: usize,
    },

    #[error("Step '{step}' has an invalid plan: {message}")]
    InvalidPlan { step: String, message: String },

    #[error("Assertion failed in step '{step}': {message}")]
    AssertionFailed { step: String, message: String },
}

impl ExampleError {
    pub fn missing_source(scenario: impl Into<String>) -> Self {
        Self::MissingSource {
            scenario: scenario.into(),
        }
    }

    pub fn parse(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn site_count(scenario: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SiteCount {
            scenario: scenario.into(),
            expected,
            actual,
        }
    }

    pub fn invalid_plan(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPlan {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
