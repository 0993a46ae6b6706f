//! Syntax tree traversal.
//!
//! Two visitor traits with matching walk functions:
//!
//! - `Visitor`: shared-reference traversal for analysis passes
//! - `VisitMut`: mutable traversal for in-place rewriting passes
//!
//! Both walks visit children in the same order, so a pass that counts nodes
//! with `Visitor` and a pass that rewrites them with `VisitMut` see every
//! node at the same position. Children are visited in source-field order:
//!
//! - `def`: parameter defaults, then body. `class`: bases, then body.
//! - `if`/`while`: test, body, else-body. `for`: target, iterable, body, else-body.
//! - assignment: targets left to right, then value.
//! - comparison: left, then comparators. call: function, args, keyword values.
//! - dict: all keys, then all values.
//!
//! Override `visit_*` to intercept a node and call the matching `walk_*`
//! to continue into its children. Omitting the walk prunes the subtree.

use crate::ast::*;

// ==================== VISITOR (READ-ONLY) ====================

pub trait Visitor: Sized {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_module<V: Visitor>(v: &mut V, module: &Module) {
    walk_body(v, &module.body);
}

fn walk_body<V: Visitor>(v: &mut V, body: &[Stmt]) {
    for stmt in body {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr(s) => v.visit_expr(&s.value),
        Stmt::Assign(s) => {
            for target in &s.targets {
                v.visit_expr(target);
            }
            v.visit_expr(&s.value);
        }
        Stmt::AugAssign(s) => {
            v.visit_expr(&s.target);
            v.visit_expr(&s.value);
        }
        Stmt::If(s) => {
            v.visit_expr(&s.test);
            walk_body(v, &s.body);
            walk_body(v, &s.orelse);
        }
        Stmt::While(s) => {
            v.visit_expr(&s.test);
            walk_body(v, &s.body);
            walk_body(v, &s.orelse);
        }
        Stmt::For(s) => {
            v.visit_expr(&s.target);
            v.visit_expr(&s.iter);
            walk_body(v, &s.body);
            walk_body(v, &s.orelse);
        }
        Stmt::FunctionDef(f) => {
            for param in &f.params {
                if let Some(default) = &param.default {
                    v.visit_expr(default);
                }
            }
            walk_body(v, &f.body);
        }
        Stmt::ClassDef(c) => {
            for base in &c.bases {
                v.visit_expr(base);
            }
            walk_body(v, &c.body);
        }
        Stmt::Return(s) => {
            if let Some(value) = &s.value {
                v.visit_expr(value);
            }
        }
        Stmt::Assert(s) => {
            v.visit_expr(&s.test);
            if let Some(msg) = &s.msg {
                v.visit_expr(msg);
            }
        }
        Stmt::Import(_)
        | Stmt::ImportFrom(_)
        | Stmt::Global(..)
        | Stmt::Nonlocal(..)
        | Stmt::Pass(_)
        | Stmt::Break(_)
        | Stmt::Continue(_) => {}
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(_) | Expr::Name(..) => {}
        Expr::BinOp(_, left, right, _) => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::UnaryOp(_, operand, _) => v.visit_expr(operand),
        Expr::BoolOp(_, values, _) => {
            for value in values {
                v.visit_expr(value);
            }
        }
        Expr::Compare(c) => {
            v.visit_expr(&c.left);
            for comparator in &c.comparators {
                v.visit_expr(comparator);
            }
        }
        Expr::Call(c) => {
            v.visit_expr(&c.func);
            for arg in &c.args {
                v.visit_expr(arg);
            }
            for keyword in &c.keywords {
                v.visit_expr(&keyword.value);
            }
        }
        Expr::Attribute(value, _, _) => v.visit_expr(value),
        Expr::Subscript(value, index, _) => {
            v.visit_expr(value);
            v.visit_expr(index);
        }
        Expr::Slice(lower, upper, step, _) => {
            for part in [lower, upper, step].into_iter().flatten() {
                v.visit_expr(part);
            }
        }
        Expr::IfExp(e) => {
            v.visit_expr(&e.test);
            v.visit_expr(&e.body);
            v.visit_expr(&e.orelse);
        }
        Expr::List(elts, _) | Expr::Tuple(elts, _) => {
            for elt in elts {
                v.visit_expr(elt);
            }
        }
        Expr::Dict(entries, _) => {
            for (key, _) in entries {
                v.visit_expr(key);
            }
            for (_, value) in entries {
                v.visit_expr(value);
            }
        }
    }
}

// ==================== VISITOR (MUTABLE) ====================

pub trait VisitMut: Sized {
    fn visit_module_mut(&mut self, module: &mut Module) {
        walk_module_mut(self, module);
    }

    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) {
        walk_stmt_mut(self, stmt);
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        walk_expr_mut(self, expr);
    }
}

pub fn walk_module_mut<V: VisitMut>(v: &mut V, module: &mut Module) {
    walk_body_mut(v, &mut module.body);
}

fn walk_body_mut<V: VisitMut>(v: &mut V, body: &mut [Stmt]) {
    for stmt in body {
        v.visit_stmt_mut(stmt);
    }
}

pub fn walk_stmt_mut<V: VisitMut>(v: &mut V, stmt: &mut Stmt) {
    match stmt {
        Stmt::Expr(s) => v.visit_expr_mut(&mut s.value),
        Stmt::Assign(s) => {
            for target in &mut s.targets {
                v.visit_expr_mut(target);
            }
            v.visit_expr_mut(&mut s.value);
        }
        Stmt::AugAssign(s) => {
            v.visit_expr_mut(&mut s.target);
            v.visit_expr_mut(&mut s.value);
        }
        Stmt::If(s) => {
            v.visit_expr_mut(&mut s.test);
            walk_body_mut(v, &mut s.body);
            walk_body_mut(v, &mut s.orelse);
        }
        Stmt::While(s) => {
            v.visit_expr_mut(&mut s.test);
            walk_body_mut(v, &mut s.body);
            walk_body_mut(v, &mut s.orelse);
        }
        Stmt::For(s) => {
            v.visit_expr_mut(&mut s.target);
            v.visit_expr_mut(&mut s.iter);
            walk_body_mut(v, &mut s.body);
            walk_body_mut(v, &mut s.orelse);
        }
        Stmt::FunctionDef(f) => {
            for param in &mut f.params {
                if let Some(default) = &mut param.default {
                    v.visit_expr_mut(default);
                }
            }
            walk_body_mut(v, &mut f.body);
        }
        Stmt::ClassDef(c) => {
            for base in &mut c.bases {
                v.visit_expr_mut(base);
            }
            walk_body_mut(v, &mut c.body);
        }
        Stmt::Return(s) => {
            if let Some(value) = &mut s.value {
                v.visit_expr_mut(value);
            }
        }
        Stmt::Assert(s) => {
            v.visit_expr_mut(&mut s.test);
            if let Some(msg) = &mut s.msg {
                v.visit_expr_mut(msg);
            }
        }
        Stmt::Import(_)
        | Stmt::ImportFrom(_)
        | Stmt::Global(..)
        | Stmt::Nonlocal(..)
        | Stmt::Pass(_)
        | Stmt::Break(_)
        | Stmt::Continue(_) => {}
    }
}

pub fn walk_expr_mut<V: VisitMut>(v: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Literal(_) | Expr::Name(..) => {}
        Expr::BinOp(_, left, right, _) => {
            v.visit_expr_mut(left);
            v.visit_expr_mut(right);
        }
        Expr::UnaryOp(_, operand, _) => v.visit_expr_mut(operand),
        Expr::BoolOp(_, values, _) => {
            for value in values {
                v.visit_expr_mut(value);
            }
        }
        Expr::Compare(c) => {
            v.visit_expr_mut(&mut c.left);
            for comparator in &mut c.comparators {
                v.visit_expr_mut(comparator);
            }
        }
        Expr::Call(c) => {
            v.visit_expr_mut(&mut c.func);
            for arg in &mut c.args {
                v.visit_expr_mut(arg);
            }
            for keyword in &mut c.keywords {
                v.visit_expr_mut(&mut keyword.value);
            }
        }
        Expr::Attribute(value, _, _) => v.visit_expr_mut(value),
        Expr::Subscript(value, index, _) => {
            v.visit_expr_mut(value);
            v.visit_expr_mut(index);
        }
        Expr::Slice(lower, upper, step, _) => {
            for part in [lower, upper, step].into_iter().flatten() {
                v.visit_expr_mut(part);
            }
        }
        Expr::IfExp(e) => {
            v.visit_expr_mut(&mut e.test);
            v.visit_expr_mut(&mut e.body);
            v.visit_expr_mut(&mut e.orelse);
        }
        Expr::List(elts, _) | Expr::Tuple(elts, _) => {
            for elt in elts {
                v.visit_expr_mut(elt);
            }
        }
        Expr::Dict(entries, _) => {
            for (key, _) in entries.iter_mut() {
                v.visit_expr_mut(key);
            }
            for (_, value) in entries.iter_mut() {
                v.visit_expr_mut(value);
            }
        }
    }
}
