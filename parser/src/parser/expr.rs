//! Expression parsing.
//!
//! Handles operator precedence parsing for Python expressions, lowest first:
//! - Conditional: `a if c else b`
//! - Boolean: `or`, `and`, `not`
//! - Comparison: `== != < <= > >= is, is not, in, not in` (chained)
//! - Additive: `+ -`
//! - Multiplicative: `* / // %`
//! - Unary: `- +`
//! - Power: `**` (right-associative, binds tighter than unary on its left)
//! - Postfix: calls, subscripts, attribute access
//! - Primary: literals, names, parenthesized forms, list and dict displays

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a single expression, including the conditional form.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let body = self.parse_or()?;

        if self.check(&TokenKind::If) {
            let start = body.span();
            self.advance();
            let test = self.parse_or()?;
            self.expect(&TokenKind::Else)?;
            let orelse = self.parse_expr()?;
            let span = self.span_from(start);
            return Ok(Expr::IfExp(IfExp {
                test: Box::new(test),
                body: Box::new(body),
                orelse: Box::new(orelse),
                span,
            }));
        }

        Ok(body)
    }

    /// Parse comma-separated expressions; more than one (or a trailing
    /// comma) produces a tuple.
    pub(crate) fn parse_testlist(&mut self) -> ParseResult<Expr> {
        let first = self.parse_expr()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let start = first.span();
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if !self.starts_expr() {
                break;
            }
            elts.push(self.parse_expr()?);
        }
        let span = self.span_from(start);
        Ok(Expr::Tuple(elts, span))
    }

    /// Returns true if the current token can begin an expression.
    pub(crate) fn starts_expr(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::String(_)
                | TokenKind::None
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Not
                | TokenKind::Reserved(_)
        )
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let first = self.parse_and()?;
        if !self.check(&TokenKind::Or) {
            return Ok(first);
        }

        let start = first.span();
        let mut values = vec![first];
        while self.eat(&TokenKind::Or) {
            values.push(self.parse_and()?);
        }
        let span = self.span_from(start);
        Ok(Expr::BoolOp(BoolOp::Or, values, span))
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let first = self.parse_not()?;
        if !self.check(&TokenKind::And) {
            return Ok(first);
        }

        let start = first.span();
        let mut values = vec![first];
        while self.eat(&TokenKind::And) {
            values.push(self.parse_not()?);
        }
        let span = self.span_from(start);
        Ok(Expr::BoolOp(BoolOp::And, values, span))
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Not) {
            let start = self.advance().span;
            let operand = self.parse_not()?;
            let span = self.span_from(start);
            Ok(Expr::UnaryOp(UnaryOp::Not, Box::new(operand), span))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let left = self.parse_arith()?;

        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.comparison_op() {
            ops.push(op);
            comparators.push(self.parse_arith()?);
        }

        if ops.is_empty() {
            return Ok(left);
        }

        let span = self.span_from(left.span());
        Ok(Expr::Compare(Compare {
            left: Box::new(left),
            ops,
            comparators,
            span,
        }))
    }

    /// Consume a comparison operator (one or two tokens) if present.
    fn comparison_op(&mut self) -> Option<CmpOp> {
        let (op, width) = match (&self.peek().kind, self.peek_kind_at(1)) {
            (TokenKind::EqEq, _) => (CmpOp::Eq, 1),
            (TokenKind::NotEq, _) => (CmpOp::NotEq, 1),
            (TokenKind::Lt, _) => (CmpOp::Lt, 1),
            (TokenKind::LtEq, _) => (CmpOp::LtE, 1),
            (TokenKind::Gt, _) => (CmpOp::Gt, 1),
            (TokenKind::GtEq, _) => (CmpOp::GtE, 1),
            (TokenKind::Is, Some(TokenKind::Not)) => (CmpOp::IsNot, 2),
            (TokenKind::Is, _) => (CmpOp::Is, 1),
            (TokenKind::Not, Some(TokenKind::In)) => (CmpOp::NotIn, 2),
            (TokenKind::In, _) => (CmpOp::In, 1),
            _ => return None,
        };
        for _ in 0..width {
            self.advance();
        }
        Some(op)
    }

    /// Additive level. Also the level `for` targets are parsed at, so that
    /// the `in` keyword is left for the loop header.
    pub(super) fn parse_arith(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = if self.check(&TokenKind::Plus) {
                BinOp::Add
            } else if self.check(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };

            let start = left.span();
            self.advance();
            let right = self.parse_term()?;
            let span = self.span_from(start);
            left = Expr::BinOp(op, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = if self.check(&TokenKind::Star) {
                BinOp::Mult
            } else if self.check(&TokenKind::Slash) {
                BinOp::Div
            } else if self.check(&TokenKind::DoubleSlash) {
                BinOp::FloorDiv
            } else if self.check(&TokenKind::Percent) {
                BinOp::Mod
            } else {
                break;
            };

            let start = left.span();
            self.advance();
            let right = self.parse_factor()?;
            let span = self.span_from(start);
            left = Expr::BinOp(op, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let op = if self.check(&TokenKind::Minus) {
            UnaryOp::Neg
        } else if self.check(&TokenKind::Plus) {
            UnaryOp::Pos
        } else {
            return self.parse_power();
        };

        let start = self.advance().span;
        let operand = self.parse_factor()?;
        let span = self.span_from(start);
        Ok(Expr::UnaryOp(op, Box::new(operand), span))
    }

    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_postfix()?;

        if self.eat(&TokenKind::DoubleStar) {
            let start = base.span();
            let exponent = self.parse_factor()?;
            let span = self.span_from(start);
            return Ok(Expr::BinOp(
                BinOp::Pow,
                Box::new(base),
                Box::new(exponent),
                span,
            ));
        }

        Ok(base)
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(&TokenKind::LParen) {
                expr = self.parse_call(expr)?;
            } else if self.check(&TokenKind::LBracket) {
                expr = self.parse_subscript(expr)?;
            } else if self.check(&TokenKind::Dot) {
                let start = expr.span();
                self.advance();
                let attr = self.expect_ident()?;
                let span = self.span_from(start);
                expr = Expr::Attribute(Box::new(expr), attr, span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_call(&mut self, func: Expr) -> ParseResult<Expr> {
        let start = func.span();
        self.expect(&TokenKind::LParen)?;

        let mut args = Vec::new();
        let mut keywords = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let is_keyword = matches!(self.peek().kind, TokenKind::Ident(_))
                && matches!(self.peek_kind_at(1), Some(TokenKind::Assign));

            if is_keyword {
                let kw_start = self.peek().span;
                let name = self.expect_ident()?;
                self.advance(); // =
                let value = self.parse_expr()?;
                let span = self.span_from(kw_start);
                keywords.push(Keyword { name, value, span });
            } else if !keywords.is_empty() {
                return Err(ParseError::new(
                    "positional argument follows keyword argument",
                    self.peek().span,
                ));
            } else {
                args.push(self.parse_expr()?);
            }

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let span = self.span_from(start);
        Ok(Expr::Call(Call {
            func: Box::new(func),
            args,
            keywords,
            span,
        }))
    }

    fn parse_subscript(&mut self, value: Expr) -> ParseResult<Expr> {
        let start = value.span();
        self.expect(&TokenKind::LBracket)?;

        let first = self.parse_slice_item()?;
        let index = if self.check(&TokenKind::Comma) {
            let index_start = first.span();
            let mut elts = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RBracket) {
                    break;
                }
                elts.push(self.parse_slice_item()?);
            }
            Expr::Tuple(elts, self.span_from(index_start))
        } else {
            first
        };
        self.expect(&TokenKind::RBracket)?;

        let span = self.span_from(start);
        Ok(Expr::Subscript(Box::new(value), Box::new(index), span))
    }

    fn parse_slice_item(&mut self) -> ParseResult<Expr> {
        let start = self.peek().span;

        let lower = if self.check(&TokenKind::Colon) {
            None
        } else {
            let expr = self.parse_expr()?;
            if !self.check(&TokenKind::Colon) {
                return Ok(expr);
            }
            Some(Box::new(expr))
        };

        self.expect(&TokenKind::Colon)?;
        let upper = if self.ends_slice_part() {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let step = if self.eat(&TokenKind::Colon) && !self.ends_slice_part() {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        let span = self.span_from(start);
        Ok(Expr::Slice(lower, upper, step, span))
    }

    fn ends_slice_part(&self) -> bool {
        self.check(&TokenKind::Colon)
            || self.check(&TokenKind::Comma)
            || self.check(&TokenKind::RBracket)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        match &token.kind {
            // Literals
            TokenKind::None => {
                self.advance();
                Ok(Expr::Literal(Literal::new(LiteralKind::None, token.span)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Literal::new(LiteralKind::Bool(true), token.span)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Literal::new(LiteralKind::Bool(false), token.span)))
            }
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Literal(Literal::new(LiteralKind::Int(n), token.span)))
            }
            TokenKind::Float(f) => {
                let f = *f;
                self.advance();
                Ok(Expr::Literal(Literal::new(LiteralKind::Float(f), token.span)))
            }
            TokenKind::String(_) => {
                // Adjacent string literals concatenate: 'a' 'b' == 'ab'
                let mut value = String::new();
                while let TokenKind::String(s) = &self.peek().kind {
                    value.push_str(s);
                    self.advance();
                }
                let span = self.span_from(token.span);
                Ok(Expr::Literal(Literal::new(LiteralKind::Str(value), span)))
            }

            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::Name(name, token.span))
            }

            // Parenthesized expression or tuple
            TokenKind::LParen => {
                self.advance();
                if self.eat(&TokenKind::RParen) {
                    let span = self.span_from(token.span);
                    return Ok(Expr::Tuple(Vec::new(), span));
                }

                let first = self.parse_expr()?;
                if !self.check(&TokenKind::Comma) {
                    self.expect(&TokenKind::RParen)?;
                    return Ok(first);
                }

                let mut elts = vec![first];
                while self.eat(&TokenKind::Comma) {
                    if self.check(&TokenKind::RParen) {
                        break; // trailing comma
                    }
                    elts.push(self.parse_expr()?);
                }
                self.expect(&TokenKind::RParen)?;
                let span = self.span_from(token.span);
                Ok(Expr::Tuple(elts, span))
            }

            // List display: [a, b, c]
            TokenKind::LBracket => {
                self.advance();
                let mut elts = Vec::new();
                while !self.check(&TokenKind::RBracket) {
                    elts.push(self.parse_expr()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RBracket)?;
                let span = self.span_from(token.span);
                Ok(Expr::List(elts, span))
            }

            // Dict display: {k: v, ...}
            TokenKind::LBrace => {
                self.advance();
                let mut entries = Vec::new();
                while !self.check(&TokenKind::RBrace) {
                    let key = self.parse_expr()?;
                    if !self.check(&TokenKind::Colon) {
                        return Err(ParseError::unsupported("set display", key.span()));
                    }
                    self.advance();
                    let value = self.parse_expr()?;
                    entries.push((key, value));
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RBrace)?;
                let span = self.span_from(token.span);
                Ok(Expr::Dict(entries, span))
            }

            _ => Err(self.unexpected("expression")),
        }
    }
}
