//! Mutiny Mutation
//!
//! Plan and apply mutations to parsed modules.
//!
//! Responsibilities:
//! - Choose how many and which sites each mutant rewrites
//! - Rewrite exactly the planned occurrences in a fresh copy of the tree
//! - Produce reproducible batches from a single seeded random source
//!
//! # Module Structure
//!
//! - `select` - Site count roll, flat index sampling and decomposition
//! - `plan` - Per-mutant target sets
//! - `mutator` - Tree rewriting pass
//! - `generator` - Seeded batch generation
//! - `config` - Batch configuration
//! - `error` - Error types for planning failures

mod config;
mod error;
mod generator;
mod mutator;
mod plan;
pub mod select;

pub use config::MutantConfig;
pub use error::{MutationError, MutationResult};
pub use generator::{MutantGenerator, Mutants};
pub use mutator::{Mutant, Mutator};
pub use plan::MutationPlan;
