//! Plan execution.
//!
//! The mutator replays the analyzer's walk over a copy of the tree with a
//! fresh `SiteTracker`. Each node's occurrences are decided before its
//! children are visited and rewritten after, so children of a replaced node
//! are still counted and later ordinals stay aligned with the analysis.

use crate::{MutationPlan, MutationResult};
use mutiny_analyzer::{Occurrence, Rewrite, SiteCounts, SiteTracker};
use mutiny_parser::{
    walk_expr_mut, walk_stmt_mut, Expr, ExprStmt, Literal, LiteralKind, Module, Stmt, VisitMut,
};
use tracing::trace;

/// One generated mutant.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutant {
    /// Position of this mutant in its batch.
    pub ordinal: usize,
    pub plan: MutationPlan,
    /// The rewritten copy of the original module.
    pub module: Module,
    /// Occurrences rewritten, in traversal order.
    pub applied: Vec<Occurrence>,
}

/// Rewrites the occurrences named by a plan.
pub struct Mutator<'p> {
    plan: &'p MutationPlan,
    tracker: SiteTracker,
    applied: Vec<Occurrence>,
}

impl<'p> Mutator<'p> {
    pub fn new(plan: &'p MutationPlan) -> Self {
        Self {
            plan,
            tracker: SiteTracker::new(),
            applied: Vec::new(),
        }
    }

    /// Apply a plan to a fresh copy of `module`. The original is untouched.
    pub fn mutate(module: &Module, plan: &MutationPlan) -> Mutant {
        let mut copy = module.clone();
        let mut mutator = Mutator::new(plan);
        mutator.visit_module_mut(&mut copy);
        Mutant {
            ordinal: plan.mutant,
            plan: plan.clone(),
            module: copy,
            applied: mutator.applied,
        }
    }

    /// Like `mutate`, but first checks that every target exists.
    pub fn mutate_checked(
        module: &Module,
        counts: &SiteCounts,
        plan: &MutationPlan,
    ) -> MutationResult<Mutant> {
        plan.validate(counts)?;
        Ok(Self::mutate(module, plan))
    }

    /// Occurrences rewritten so far.
    pub fn applied(&self) -> &[Occurrence] {
        &self.applied
    }

    /// Counters of the walk so far.
    pub fn tracker(&self) -> &SiteTracker {
        &self.tracker
    }

    fn record(&mut self, occurrence: Occurrence, line: usize) {
        trace!(mutant = self.plan.mutant, line, ?occurrence, "rewrite");
        self.applied.push(occurrence);
    }
}

impl VisitMut for Mutator<'_> {
    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) {
        let selected = self
            .tracker
            .stmt(stmt)
            .filter(|occurrence| self.plan.contains(*occurrence));

        walk_stmt_mut(self, stmt);

        if let Some(occurrence) = selected {
            let line = stmt.span().line;
            if rewrite_stmt(stmt, occurrence.category.rewrite()) {
                self.record(occurrence, line);
            }
        }
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        // position matters for comparison chains: one occurrence per operator
        let selected: Vec<(usize, Occurrence)> = self
            .tracker
            .expr(expr)
            .into_iter()
            .enumerate()
            .filter(|(_, occurrence)| self.plan.contains(*occurrence))
            .collect();

        walk_expr_mut(self, expr);

        for (position, occurrence) in selected {
            let line = expr.span().line;
            if rewrite_expr(expr, position, occurrence.category.rewrite()) {
                self.record(occurrence, line);
            }
        }
    }
}

fn rewrite_stmt(stmt: &mut Stmt, rewrite: Rewrite) -> bool {
    match rewrite {
        Rewrite::NoOpStatement => {
            let span = stmt.span();
            *stmt = Stmt::Expr(ExprStmt {
                value: Expr::Literal(Literal::new(LiteralKind::Int(1), span)),
                span,
            });
            true
        }
        _ => false,
    }
}

fn rewrite_expr(expr: &mut Expr, position: usize, rewrite: Rewrite) -> bool {
    match (rewrite, expr) {
        (Rewrite::BinOp(new), Expr::BinOp(op, ..)) => *op = new,
        (Rewrite::BoolOp(new), Expr::BoolOp(op, ..)) => *op = new,
        (Rewrite::CmpOp(new), Expr::Compare(compare)) => match compare.ops.get_mut(position) {
            Some(op) => *op = new,
            None => return false,
        },
        (Rewrite::NullLiteral, expr) => {
            let span = expr.span();
            *expr = Expr::Literal(Literal::new(LiteralKind::None, span));
        }
        _ => return false,
    }
    true
}
