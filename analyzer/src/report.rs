//! Human- and machine-readable site breakdown.

use crate::analyzer::SiteCounts;
use crate::catalog::{Category, Group};
use serde::Serialize;
use std::fmt;

/// Site counts for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySites {
    pub category: Category,
    pub symbol: &'static str,
    pub group: Group,
    /// Sites in the flat index space.
    pub sites: usize,
    /// Occurrences in the tree. Differs from `sites` only for calls.
    pub occurrences: usize,
}

/// Per-category breakdown of a module's mutation sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteReport {
    pub total_sites: usize,
    pub num_calls: usize,
    pub categories: Vec<CategorySites>,
}

impl SiteReport {
    pub fn new(counts: &SiteCounts) -> Self {
        let categories = Category::ALL
            .iter()
            .map(|&category| {
                let sites = counts.get(category);
                let occurrences = if category == Category::Call {
                    counts.num_calls()
                } else {
                    sites
                };
                CategorySites {
                    category,
                    symbol: category.symbol(),
                    group: category.group(),
                    sites,
                    occurrences,
                }
            })
            .collect();

        Self {
            total_sites: counts.count(),
            num_calls: counts.num_calls(),
            categories,
        }
    }
}

impl fmt::Display for SiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<18} {:<8} {:>6} {:>11}", "category", "symbol", "sites", "occurrences")?;
        for row in &self.categories {
            writeln!(
                f,
                "{:<18} {:<8} {:>6} {:>11}",
                row.category.name(),
                row.symbol,
                row.sites,
                row.occurrences
            )?;
        }
        write!(f, "total sites: {}, calls: {}", self.total_sites, self.num_calls)
    }
}
