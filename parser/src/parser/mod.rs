//! Parser for Python source text.
//!
//! This module is organized into submodules by parsing category:
//! - `expr`: Expression parsing (operators, literals, calls, displays)
//! - `stmt`: Statement parsing (simple statements, compound blocks)

mod expr;
mod stmt;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof, so the last
        // token is a valid fallback.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    pub(crate) fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Consume the next token if it matches.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Error for the current token, reporting reserved keywords as
    /// unsupported syntax rather than a generic mismatch.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        match &token.kind {
            TokenKind::Reserved(word) => ParseError::unsupported(word, token.span),
            kind => ParseError::unexpected_token(token.span, expected, kind.name()),
        }
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        let end_token = if self.pos > 0 {
            &self.tokens[self.pos - 1]
        } else {
            self.peek()
        };
        Span::new(start.start, end_token.span.end, start.line, start.column)
    }
}

// ==================== PUBLIC API ====================

/// Parse a complete source file.
pub fn parse_module(input: &str) -> ParseResult<Module> {
    Parser::new(input)?.parse_module()
}

/// Parse a single expression (surrounding whitespace allowed).
pub fn parse_expr(input: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_testlist()?;
    parser.eat(&TokenKind::Newline);
    if !parser.check(&TokenKind::Eof) {
        return Err(parser.unexpected("end of input"));
    }
    Ok(expr)
}

// ==================== TESTS ====================
