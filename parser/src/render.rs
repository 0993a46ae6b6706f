//! Rendering syntax trees back to source text.
//!
//! Output uses 4-space indentation and only the parentheses precedence
//! requires, so re-parsing rendered text yields the same tree shape.

use crate::ast::*;

/// Binding strength, loosest first. An expression rendered where a tighter
/// level is required gets parenthesized.
mod prec {
    pub const TUPLE: u8 = 0;
    pub const TEST: u8 = 1;
    pub const OR: u8 = 2;
    pub const AND: u8 = 3;
    pub const NOT: u8 = 4;
    pub const CMP: u8 = 5;
    pub const ARITH: u8 = 6;
    pub const TERM: u8 = 7;
    pub const FACTOR: u8 = 8;
    pub const POWER: u8 = 9;
    pub const ATOM: u8 = 10;
}

const INDENT: &str = "    ";

/// Render a module as source text.
pub fn render_module(module: &Module) -> String {
    let mut renderer = Renderer::default();
    renderer.body(&module.body, 0);
    renderer.out
}

/// Render a single statement at the outermost indentation level.
pub fn render_stmt(stmt: &Stmt) -> String {
    let mut renderer = Renderer::default();
    renderer.stmt(stmt, 0);
    renderer.out
}

/// Render an expression as it would appear on the right of `=`.
pub fn render_expr(expr: &Expr) -> String {
    let mut renderer = Renderer::default();
    renderer.expr(expr, prec::TUPLE);
    renderer.out
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Tuple(elts, _) if elts.is_empty() => prec::ATOM,
        Expr::Tuple(..) => prec::TUPLE,
        Expr::IfExp(_) | Expr::Slice(..) => prec::TEST,
        Expr::BoolOp(BoolOp::Or, _, _) => prec::OR,
        Expr::BoolOp(BoolOp::And, _, _) => prec::AND,
        Expr::UnaryOp(UnaryOp::Not, _, _) => prec::NOT,
        Expr::Compare(_) => prec::CMP,
        Expr::BinOp(op, _, _, _) => bin_op_precedence(*op),
        Expr::UnaryOp(..) => prec::FACTOR,
        _ => prec::ATOM,
    }
}

fn bin_op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => prec::ARITH,
        BinOp::Mult | BinOp::Div | BinOp::FloorDiv | BinOp::Mod => prec::TERM,
        BinOp::Pow => prec::POWER,
    }
}

#[derive(Default)]
struct Renderer {
    out: String,
}

impl Renderer {
    // ==================== STATEMENTS ====================

    fn body(&mut self, body: &[Stmt], level: usize) {
        for stmt in body {
            self.stmt(stmt, level);
        }
    }

    /// Indented block; an empty block renders as `pass`.
    fn block(&mut self, body: &[Stmt], level: usize) {
        if body.is_empty() {
            self.line(level, "pass");
        } else {
            self.body(body, level);
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn stmt(&mut self, stmt: &Stmt, level: usize) {
        match stmt {
            Stmt::Expr(s) => {
                let text = self.fragment(&s.value, prec::TUPLE);
                self.line(level, &text);
            }
            Stmt::Assign(s) => {
                let mut text = String::new();
                for target in &s.targets {
                    text.push_str(&self.fragment(target, prec::TUPLE));
                    text.push_str(" = ");
                }
                text.push_str(&self.fragment(&s.value, prec::TUPLE));
                self.line(level, &text);
            }
            Stmt::AugAssign(s) => {
                let text = format!(
                    "{} {}= {}",
                    self.fragment(&s.target, prec::TUPLE),
                    s.op,
                    self.fragment(&s.value, prec::TUPLE)
                );
                self.line(level, &text);
            }
            Stmt::If(s) => self.if_chain(s, level, "if"),
            Stmt::While(s) => {
                let header = format!("while {}:", self.fragment(&s.test, prec::TEST));
                self.line(level, &header);
                self.block(&s.body, level + 1);
                self.else_block(&s.orelse, level);
            }
            Stmt::For(s) => {
                let header = format!(
                    "for {} in {}:",
                    self.fragment(&s.target, prec::TUPLE),
                    self.fragment(&s.iter, prec::TUPLE)
                );
                self.line(level, &header);
                self.block(&s.body, level + 1);
                self.else_block(&s.orelse, level);
            }
            Stmt::FunctionDef(f) => {
                let params: Vec<String> = f.params.iter().map(|p| self.param(p)).collect();
                let header = format!("def {}({}):", f.name, params.join(", "));
                self.line(level, &header);
                self.block(&f.body, level + 1);
            }
            Stmt::ClassDef(c) => {
                let header = if c.bases.is_empty() {
                    format!("class {}:", c.name)
                } else {
                    let bases: Vec<String> =
                        c.bases.iter().map(|b| self.fragment(b, prec::TEST)).collect();
                    format!("class {}({}):", c.name, bases.join(", "))
                };
                self.line(level, &header);
                self.block(&c.body, level + 1);
            }
            Stmt::Return(s) => match &s.value {
                Some(value) => {
                    let text = format!("return {}", self.fragment(value, prec::TUPLE));
                    self.line(level, &text);
                }
                None => self.line(level, "return"),
            },
            Stmt::Assert(s) => {
                let mut text = format!("assert {}", self.fragment(&s.test, prec::TEST));
                if let Some(msg) = &s.msg {
                    text.push_str(", ");
                    text.push_str(&self.fragment(msg, prec::TEST));
                }
                self.line(level, &text);
            }
            Stmt::Import(s) => {
                let names: Vec<String> = s.names.iter().map(alias).collect();
                self.line(level, &format!("import {}", names.join(", ")));
            }
            Stmt::ImportFrom(s) => {
                let module = format!("{}{}", ".".repeat(s.level), s.module.as_deref().unwrap_or(""));
                let names = if s.names.is_empty() {
                    "*".to_string()
                } else {
                    s.names.iter().map(alias).collect::<Vec<_>>().join(", ")
                };
                self.line(level, &format!("from {} import {}", module, names));
            }
            Stmt::Global(names, _) => self.line(level, &format!("global {}", names.join(", "))),
            Stmt::Nonlocal(names, _) => {
                self.line(level, &format!("nonlocal {}", names.join(", ")))
            }
            Stmt::Pass(_) => self.line(level, "pass"),
            Stmt::Break(_) => self.line(level, "break"),
            Stmt::Continue(_) => self.line(level, "continue"),
        }
    }

    /// `if`, with a lone nested `If` in the else-body rendered as `elif`.
    fn if_chain(&mut self, s: &IfStmt, level: usize, keyword: &str) {
        let header = format!("{} {}:", keyword, self.fragment(&s.test, prec::TEST));
        self.line(level, &header);
        self.block(&s.body, level + 1);

        match s.orelse.as_slice() {
            [Stmt::If(elif)] => self.if_chain(elif, level, "elif"),
            orelse => self.else_block(orelse, level),
        }
    }

    fn else_block(&mut self, orelse: &[Stmt], level: usize) {
        if !orelse.is_empty() {
            self.line(level, "else:");
            self.body(orelse, level + 1);
        }
    }

    fn param(&self, param: &Param) -> String {
        match param.kind {
            ParamKind::VarArgs => format!("*{}", param.name),
            ParamKind::KwArgs => format!("**{}", param.name),
            ParamKind::Positional => match &param.default {
                Some(default) => format!("{}={}", param.name, self.fragment(default, prec::TEST)),
                None => param.name.clone(),
            },
        }
    }

    // ==================== EXPRESSIONS ====================

    fn fragment(&self, expr: &Expr, min_prec: u8) -> String {
        let mut renderer = Renderer::default();
        renderer.expr(expr, min_prec);
        renderer.out
    }

    fn expr(&mut self, expr: &Expr, min_prec: u8) {
        if precedence(expr) < min_prec {
            self.out.push('(');
            self.expr_inner(expr);
            self.out.push(')');
        } else {
            self.expr_inner(expr);
        }
    }

    fn expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.literal(&lit.kind),
            Expr::Name(name, _) => self.out.push_str(name),
            Expr::BinOp(op, left, right, _) => {
                let p = bin_op_precedence(*op);
                if *op == BinOp::Pow {
                    // right-associative, and `2 ** -1` is valid
                    self.expr(left, prec::ATOM);
                    self.out.push_str(" ** ");
                    self.expr(right, prec::FACTOR);
                } else {
                    self.expr(left, p);
                    self.out.push_str(&format!(" {} ", op));
                    self.expr(right, p + 1);
                }
            }
            Expr::UnaryOp(op, operand, _) => match op {
                UnaryOp::Not => {
                    self.out.push_str("not ");
                    self.expr(operand, prec::NOT);
                }
                UnaryOp::Neg | UnaryOp::Pos => {
                    self.out.push_str(&op.to_string());
                    self.expr(operand, prec::FACTOR);
                }
            },
            Expr::BoolOp(op, values, _) => {
                let p = if *op == BoolOp::Or { prec::OR } else { prec::AND };
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(&format!(" {} ", op));
                    }
                    self.expr(value, p + 1);
                }
            }
            Expr::Compare(c) => {
                self.expr(&c.left, prec::CMP + 1);
                for (op, comparator) in c.ops.iter().zip(&c.comparators) {
                    self.out.push_str(&format!(" {} ", op));
                    self.expr(comparator, prec::CMP + 1);
                }
            }
            Expr::Call(c) => {
                self.expr(&c.func, prec::ATOM);
                self.out.push('(');
                let mut first = true;
                for arg in &c.args {
                    self.separator(&mut first);
                    self.expr(arg, prec::TEST);
                }
                for keyword in &c.keywords {
                    self.separator(&mut first);
                    self.out.push_str(&keyword.name);
                    self.out.push('=');
                    self.expr(&keyword.value, prec::TEST);
                }
                self.out.push(')');
            }
            Expr::Attribute(value, attr, _) => {
                // `1.real` lexes as a float
                let int_literal = matches!(
                    value.as_ref(),
                    Expr::Literal(Literal {
                        kind: LiteralKind::Int(_),
                        ..
                    })
                );
                if int_literal {
                    self.out.push('(');
                    self.expr_inner(value);
                    self.out.push(')');
                } else {
                    self.expr(value, prec::ATOM);
                }
                self.out.push('.');
                self.out.push_str(attr);
            }
            Expr::Subscript(value, index, _) => {
                self.expr(value, prec::ATOM);
                self.out.push('[');
                match index.as_ref() {
                    Expr::Tuple(elts, _) if !elts.is_empty() => self.sequence(elts, elts.len() == 1),
                    index => self.expr(index, prec::TEST),
                }
                self.out.push(']');
            }
            Expr::Slice(lower, upper, step, _) => {
                if let Some(lower) = lower {
                    self.expr(lower, prec::TEST);
                }
                self.out.push(':');
                if let Some(upper) = upper {
                    self.expr(upper, prec::TEST);
                }
                if let Some(step) = step {
                    self.out.push(':');
                    self.expr(step, prec::TEST);
                }
            }
            Expr::IfExp(e) => {
                self.expr(&e.body, prec::OR);
                self.out.push_str(" if ");
                self.expr(&e.test, prec::OR);
                self.out.push_str(" else ");
                self.expr(&e.orelse, prec::TEST);
            }
            Expr::List(elts, _) => {
                self.out.push('[');
                self.sequence(elts, false);
                self.out.push(']');
            }
            Expr::Tuple(elts, _) if elts.is_empty() => self.out.push_str("()"),
            Expr::Tuple(elts, _) => self.sequence(elts, elts.len() == 1),
            Expr::Dict(entries, _) => {
                self.out.push('{');
                let mut first = true;
                for (key, value) in entries {
                    self.separator(&mut first);
                    self.expr(key, prec::TEST);
                    self.out.push_str(": ");
                    self.expr(value, prec::TEST);
                }
                self.out.push('}');
            }
        }
    }

    fn sequence(&mut self, elts: &[Expr], trailing_comma: bool) {
        let mut first = true;
        for elt in elts {
            self.separator(&mut first);
            self.expr(elt, prec::TEST);
        }
        if trailing_comma {
            self.out.push(',');
        }
    }

    fn separator(&mut self, first: &mut bool) {
        if !*first {
            self.out.push_str(", ");
        }
        *first = false;
    }

    fn literal(&mut self, kind: &LiteralKind) {
        match kind {
            LiteralKind::None => self.out.push_str("None"),
            LiteralKind::Bool(true) => self.out.push_str("True"),
            LiteralKind::Bool(false) => self.out.push_str("False"),
            LiteralKind::Int(n) => self.out.push_str(&n.to_string()),
            LiteralKind::Float(f) if f.is_infinite() => self.out.push_str("1e309"),
            LiteralKind::Float(f) => self.out.push_str(&format!("{:?}", f)),
            LiteralKind::Str(s) => self.out.push_str(&string_repr(s)),
        }
    }
}

fn alias(alias: &Alias) -> String {
    match &alias.asname {
        Some(asname) => format!("{} as {}", alias.name, asname),
        None => alias.name.clone(),
    }
}

/// Quote a string the way Python's `repr` does: single quotes unless the
/// text contains a single quote and no double quote.
fn string_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
