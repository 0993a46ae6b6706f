//! Configuration for mutant generation

use crate::{MutationError, MutationResult};
use serde::{Deserialize, Serialize};

/// Configuration for mutant generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutantConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of mutants to generate
    pub mutant_count: usize,
}

impl Default for MutantConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            mutant_count: 1,
        }
    }
}

impl MutantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_mutant_count(mut self, count: usize) -> Self {
        self.mutant_count = count;
        self
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(text: &str) -> MutationResult<Self> {
        serde_json::from_str(text).map_err(|e| MutationError::config(e.to_string()))
    }
}
