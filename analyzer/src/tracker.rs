//! Traversal-local site tracking.
//!
//! A `SiteTracker` is owned by one walk over one tree. It decides which
//! nodes are mutation sites and hands out each site's ordinal within its
//! category. The analyzer and the mutator both drive a tracker from the same
//! visitor hooks, so an ordinal computed while counting names the same node
//! while rewriting.

use crate::catalog::{Category, CATEGORY_COUNT};
use mutiny_parser::{Expr, Stmt};
use serde::Serialize;
use std::collections::HashSet;

/// One mutation site: the `ordinal`-th occurrence of `category` in
/// traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Occurrence {
    pub category: Category,
    pub ordinal: usize,
}

impl Occurrence {
    pub fn new(category: Category, ordinal: usize) -> Self {
        Self { category, ordinal }
    }
}

/// Per-walk counters plus the set of names bound so far.
#[derive(Debug, Clone, Default)]
pub struct SiteTracker {
    /// Occurrences seen per category. The call slot holds every call.
    seen: [usize; CATEGORY_COUNT],
    /// Names that have appeared as assignment targets, in any scope.
    bound: HashSet<String>,
}

impl SiteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a statement before its children are visited.
    ///
    /// Only assignments are sites. An assignment is redundant when every
    /// name it binds was bound earlier; its names are bound afterwards
    /// either way.
    pub fn stmt(&mut self, stmt: &Stmt) -> Option<Occurrence> {
        let Stmt::Assign(assign) = stmt else {
            return None;
        };

        let names = target_names(&assign.targets);
        let redundant = names.iter().all(|name| self.bound.contains(*name));
        for name in names {
            if !self.bound.contains(name) {
                self.bound.insert(name.to_string());
            }
        }

        redundant.then(|| self.next(Category::RedundantAssign))
    }

    /// Register an expression before its children are visited.
    ///
    /// Returns the occurrences it holds in order. A comparison chain yields
    /// one per operator, positioned like its `ops`; every other node yields
    /// at most one.
    pub fn expr(&mut self, expr: &Expr) -> Vec<Occurrence> {
        match expr {
            Expr::BinOp(op, left, right, _) => match Category::of_bin_op(*op) {
                // string concatenation has no subtraction counterpart
                Some(Category::Add) if left.is_str_literal() || right.is_str_literal() => {
                    Vec::new()
                }
                Some(category) => vec![self.next(category)],
                None => Vec::new(),
            },
            Expr::Compare(c) => c
                .ops
                .iter()
                .map(|op| self.next(Category::of_cmp_op(*op)))
                .collect(),
            Expr::BoolOp(op, _, _) => vec![self.next(Category::of_bool_op(*op))],
            Expr::Call(_) => vec![self.next(Category::Call)],
            _ => Vec::new(),
        }
    }

    fn next(&mut self, category: Category) -> Occurrence {
        let slot = &mut self.seen[category.index()];
        let occurrence = Occurrence::new(category, *slot);
        *slot += 1;
        occurrence
    }

    /// Occurrences seen so far, per category in index order.
    pub fn seen(&self) -> &[usize; CATEGORY_COUNT] {
        &self.seen
    }

    pub fn seen_count(&self, category: Category) -> usize {
        self.seen[category.index()]
    }

    /// Total calls seen so far.
    pub fn num_calls(&self) -> usize {
        self.seen_count(Category::Call)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bound.contains(name)
    }
}

/// Names bound by a list of assignment targets: plain names, and names
/// directly inside a tuple target. Attribute, subscript and list targets
/// bind nothing.
fn target_names(targets: &[Expr]) -> Vec<&str> {
    let mut names = Vec::new();
    for target in targets {
        match target {
            Expr::Name(name, _) => names.push(name.as_str()),
            Expr::Tuple(elts, _) => {
                for elt in elts {
                    if let Expr::Name(name, _) = elt {
                        names.push(name.as_str());
                    }
                }
            }
            _ => {}
        }
    }
    names
}
