//! Mutiny Analyzer
//!
//! Mutation site classification and counting.
//! Defines the category catalog and the traversal-local tracker shared with
//! the mutator, and counts sites per category for a parsed module.

mod analyzer;
mod catalog;
mod report;
mod tracker;

pub use analyzer::{Analyzer, SiteCounts};
pub use catalog::{Category, Group, Rewrite, CATEGORY_COUNT};
pub use report::{CategorySites, SiteReport};
pub use tracker::{Occurrence, SiteTracker};
