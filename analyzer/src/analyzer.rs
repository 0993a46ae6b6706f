//! Site analysis.

use crate::catalog::{Category, CATEGORY_COUNT};
use crate::report::SiteReport;
use crate::tracker::SiteTracker;
use mutiny_parser::{walk_expr, walk_stmt, Expr, Module, Stmt, Visitor};
use tracing::{debug, info};

/// Per-category site counts for one module.
///
/// The call category counts as a single site (present or absent) in the
/// flat index space; `num_calls` holds the real number of calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteCounts {
    counts: [usize; CATEGORY_COUNT],
    num_calls: usize,
}

impl SiteCounts {
    /// Build counts directly. The call slot is normalized to `0` or `1`
    /// from `num_calls`.
    pub fn new(mut counts: [usize; CATEGORY_COUNT], num_calls: usize) -> Self {
        counts[Category::Call.index()] = num_calls.min(1);
        Self { counts, num_calls }
    }

    /// Counts from a finished walk.
    pub fn from_tracker(tracker: &SiteTracker) -> Self {
        Self::new(*tracker.seen(), tracker.num_calls())
    }

    /// Total number of sites in the flat index space.
    pub fn count(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    pub fn counts(&self) -> &[usize; CATEGORY_COUNT] {
        &self.counts
    }

    pub fn num_calls(&self) -> usize {
        self.num_calls
    }

    /// Per-category breakdown for display or serialization.
    pub fn report(&self) -> SiteReport {
        SiteReport::new(self)
    }
}

/// Counts mutation sites in a module without modifying it.
#[derive(Debug, Default)]
pub struct Analyzer {
    tracker: SiteTracker,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk a module once and return its site counts.
    pub fn analyze(module: &Module) -> SiteCounts {
        let mut analyzer = Self::new();
        analyzer.visit_module(module);
        let counts = analyzer.finish();
        info!(
            total_sites = counts.count(),
            num_calls = counts.num_calls(),
            "analyzed module"
        );
        counts
    }

    /// Counts for everything visited so far.
    pub fn finish(self) -> SiteCounts {
        SiteCounts::from_tracker(&self.tracker)
    }

    pub fn tracker(&self) -> &SiteTracker {
        &self.tracker
    }
}

impl Visitor for Analyzer {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if let Some(occurrence) = self.tracker.stmt(stmt) {
            debug!(line = stmt.span().line, ?occurrence, "site");
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        for occurrence in self.tracker.expr(expr) {
            debug!(line = expr.span().line, ?occurrence, "site");
        }
        walk_expr(self, expr);
    }
}
