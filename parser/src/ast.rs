//! Syntax tree types for the Python subset Mutiny understands.
//!
//! The tree is an owned value: cloning a [`Module`] produces a fully
//! independent deep copy, which is what the mutation engine relies on to
//! keep mutants from sharing structure.

use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(ExprStmt),
    Assign(AssignStmt),
    AugAssign(AugAssignStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    Return(ReturnStmt),
    Assert(AssertStmt),
    Import(ImportStmt),
    ImportFrom(ImportFromStmt),
    Global(Vec<String>, Span),
    Nonlocal(Vec<String>, Span),
    Pass(Span),
    Break(Span),
    Continue(Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::AugAssign(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::FunctionDef(s) => s.span,
            Stmt::ClassDef(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Assert(s) => s.span,
            Stmt::Import(s) => s.span,
            Stmt::ImportFrom(s) => s.span,
            Stmt::Global(_, span) => *span,
            Stmt::Nonlocal(_, span) => *span,
            Stmt::Pass(span) => *span,
            Stmt::Break(span) => *span,
            Stmt::Continue(span) => *span,
        }
    }
}

// ==================== SIMPLE STATEMENTS ====================

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub value: Expr,
    pub span: Span,
}

/// Assignment: `a = b = value`, `x, y = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// One entry per `=`; chained assignment has several.
    pub targets: Vec<Expr>,
    pub value: Expr,
    pub span: Span,
}

/// Augmented assignment: `x += value`.
#[derive(Debug, Clone, PartialEq)]
pub struct AugAssignStmt {
    pub target: Expr,
    pub op: BinOp,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssertStmt {
    pub test: Expr,
    pub msg: Option<Expr>,
    pub span: Span,
}

/// `import a.b as c, d`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub names: Vec<Alias>,
    pub span: Span,
}

/// `from ..pkg.mod import a as b, c`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFromStmt {
    /// Dotted module path, `None` for `from . import x`.
    pub module: Option<String>,
    /// Number of leading dots.
    pub level: usize,
    /// Empty means `import *`.
    pub names: Vec<Alias>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

// ==================== COMPOUND STATEMENTS ====================

/// `if`/`elif`/`else`. An `elif` chain is a nested `If` in `orelse`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamKind {
    #[default]
    Positional,
    /// `*args`
    VarArgs,
    /// `**kwargs`
    KwArgs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

// ==================== EXPRESSIONS ====================

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(Literal),
    /// Name reference
    Name(String, Span),
    /// Binary arithmetic
    BinOp(BinOp, Box<Expr>, Box<Expr>, Span),
    /// Unary operation
    UnaryOp(UnaryOp, Box<Expr>, Span),
    /// `a and b and c` is one node with three operands.
    BoolOp(BoolOp, Vec<Expr>, Span),
    /// Possibly chained comparison
    Compare(Compare),
    /// Function or method call
    Call(Call),
    /// Attribute access: value.attr
    Attribute(Box<Expr>, String, Span),
    /// Subscript: value[index]
    Subscript(Box<Expr>, Box<Expr>, Span),
    /// Slice, only valid as a subscript index: lower:upper:step
    Slice(Option<Box<Expr>>, Option<Box<Expr>>, Option<Box<Expr>>, Span),
    /// Conditional expression: body if test else orelse
    IfExp(IfExp),
    List(Vec<Expr>, Span),
    Tuple(Vec<Expr>, Span),
    /// Dictionary display as (key, value) pairs
    Dict(Vec<(Expr, Expr)>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Name(_, span) => *span,
            Expr::BinOp(_, _, _, span) => *span,
            Expr::UnaryOp(_, _, span) => *span,
            Expr::BoolOp(_, _, span) => *span,
            Expr::Compare(c) => c.span,
            Expr::Call(c) => c.span,
            Expr::Attribute(_, _, span) => *span,
            Expr::Subscript(_, _, span) => *span,
            Expr::Slice(_, _, _, span) => *span,
            Expr::IfExp(e) => e.span,
            Expr::List(_, span) => *span,
            Expr::Tuple(_, span) => *span,
            Expr::Dict(_, span) => *span,
        }
    }

    /// Returns true for a string literal (after adjacent-literal concatenation).
    pub fn is_str_literal(&self) -> bool {
        matches!(
            self,
            Expr::Literal(Literal {
                kind: LiteralKind::Str(_),
                ..
            })
        )
    }

    /// Returns true if the expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        match self {
            Expr::Name(..) | Expr::Attribute(..) | Expr::Subscript(..) => true,
            Expr::Tuple(elts, _) | Expr::List(elts, _) => elts.iter().all(Expr::is_assignable),
            _ => false,
        }
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

impl Literal {
    pub fn new(kind: LiteralKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Comparison chain: `left ops[0] comparators[0] ops[1] comparators[1] ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub left: Box<Expr>,
    pub ops: Vec<CmpOp>,
    pub comparators: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,
    pub span: Span,
}

/// Keyword argument: name=value
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExp {
    pub test: Box<Expr>,
    pub body: Box<Expr>,
    pub orelse: Box<Expr>,
    pub span: Span,
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mult => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::FloorDiv => write!(f, "//"),
            BinOp::Mod => write!(f, "%"),
            BinOp::Pow => write!(f, "**"),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpOp::Eq => write!(f, "=="),
            CmpOp::NotEq => write!(f, "!="),
            CmpOp::Lt => write!(f, "<"),
            CmpOp::LtE => write!(f, "<="),
            CmpOp::Gt => write!(f, ">"),
            CmpOp::GtE => write!(f, ">="),
            CmpOp::Is => write!(f, "is"),
            CmpOp::IsNot => write!(f, "is not"),
            CmpOp::In => write!(f, "in"),
            CmpOp::NotIn => write!(f, "not in"),
        }
    }
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOp::And => write!(f, "and"),
            BoolOp::Or => write!(f, "or"),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "not"),
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Pos => write!(f, "+"),
        }
    }
}
