//! Mutiny Parser
//!
//! This crate provides the syntax layer for a Python subset:
//! - Lexing with indentation tracking (INDENT/DEDENT/NEWLINE)
//! - Statement and expression parsing into an owned syntax tree
//! - Rendering trees back to source text
//! - Read-only and mutable tree visitors sharing one traversal order
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;
mod render;
mod visit;

pub use ast::*;
pub use error::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_expr, parse_module, Parser};
pub use render::{render_expr, render_module, render_stmt};
pub use visit::{
    walk_expr, walk_expr_mut, walk_module, walk_module_mut, walk_stmt, walk_stmt_mut, VisitMut,
    Visitor,
};
