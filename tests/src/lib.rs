//! Mutiny Tests
//!
//! Integration test framework: scenarios pair a source program with
//! hand-written plans and check the rendered mutants.
//!
//! ```ignore
//! use mutiny_tests::prelude::*;
//!
//! Scenario::new("swap_add")
//!     .source("x = a + b\n")
//!     .sites(1)
//!     .step("add", [Occurrence::new(Category::Add, 0)], |a| a.renders("x = a - b\n"))
//!     .run()
//!     .unwrap();
//! ```

mod assertion;
mod error;
mod runner;
mod scenario;

pub use assertion::{changed_lines, Assertion};
pub use error::{ExampleError, ExampleResult};
pub use runner::Runner;
pub use scenario::{Scenario, Step};

use mutiny_analyzer::Occurrence;
use mutiny_mutation::{Mutant, MutationPlan, Mutator};
use mutiny_parser::{parse_module, render_module, Module};

/// Parse a source that is known to be valid.
///
/// # Panics
///
/// Panics if the source does not parse.
pub fn parse(source: &str) -> Module {
    match parse_module(source) {
        Ok(module) => module,
        Err(e) => panic!("failed to parse test source: {}\n{}", e, source),
    }
}

/// Plan for mutant 0 targeting `targets`.
pub fn plan_for(targets: impl IntoIterator<Item = Occurrence>) -> MutationPlan {
    MutationPlan::from_occurrences(0, targets)
}

/// Parse, mutate and render in one go.
pub fn mutate_source(source: &str, targets: impl IntoIterator<Item = Occurrence>) -> String {
    render_module(&mutate(source, targets).module)
}

/// Parse and mutate, keeping the whole mutant.
pub fn mutate(source: &str, targets: impl IntoIterator<Item = Occurrence>) -> Mutant {
    Mutator::mutate(&parse(source), &plan_for(targets))
}

pub mod prelude {
    pub use crate::{
        changed_lines, mutate, mutate_source, parse, plan_for, Assertion, ExampleError,
        ExampleResult, Scenario,
    };
    pub use mutiny_analyzer::{Analyzer, Category, Occurrence, Rewrite, SiteCounts};
    pub use mutiny_mutation::{
        MutantConfig, MutantGenerator, MutationError, MutationPlan, Mutator,
    };
    pub use mutiny_parser::{parse_module, render_module};
}
