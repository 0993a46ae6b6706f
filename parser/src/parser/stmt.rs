//! Statement parsing.
//!
//! A logical line holds one or more simple statements separated by `;`.
//! Compound statements (`if`, `while`, `for`, `def`, `class`) own a suite
//! that is either the rest of the header line or an indented block.

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse the whole token stream as a module.
    pub(crate) fn parse_module(&mut self) -> ParseResult<Module> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::Eof) {
            if self.eat(&TokenKind::Newline) {
                continue;
            }
            self.parse_statement_into(&mut body)?;
        }
        Ok(Module::new(body))
    }

    /// Parse one compound statement or one logical line of simple
    /// statements, appending the result to `out`.
    fn parse_statement_into(&mut self, out: &mut Vec<Stmt>) -> ParseResult<()> {
        match self.peek().kind {
            TokenKind::If => out.push(self.parse_if()?),
            TokenKind::While => out.push(self.parse_while()?),
            TokenKind::For => out.push(self.parse_for()?),
            TokenKind::Def => out.push(self.parse_def()?),
            TokenKind::Class => out.push(self.parse_class()?),
            TokenKind::At => return Err(ParseError::unsupported("decorator", self.peek().span)),
            _ => self.parse_simple_line(out)?,
        }
        Ok(())
    }

    fn parse_simple_line(&mut self, out: &mut Vec<Stmt>) -> ParseResult<()> {
        loop {
            out.push(self.parse_simple_stmt()?);
            if !self.eat(&TokenKind::Semicolon) {
                break;
            }
            if self.check(&TokenKind::Newline) {
                break; // trailing semicolon
            }
        }
        self.expect(&TokenKind::Newline)?;
        Ok(())
    }

    /// Parse `: suite` after a compound statement header.
    fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(&TokenKind::Colon)?;

        let mut body = Vec::new();
        if self.eat(&TokenKind::Newline) {
            self.expect(&TokenKind::Indent)?;
            while !self.check(&TokenKind::Dedent) && !self.check(&TokenKind::Eof) {
                self.parse_statement_into(&mut body)?;
            }
            self.expect(&TokenKind::Dedent)?;
        } else {
            self.parse_simple_line(&mut body)?;
        }
        Ok(body)
    }

    fn parse_else_block(&mut self) -> ParseResult<Vec<Stmt>> {
        if self.eat(&TokenKind::Else) {
            self.parse_block()
        } else {
            Ok(Vec::new())
        }
    }

    // ==================== COMPOUND STATEMENTS ====================

    /// Parse `if` or `elif`; an `elif` chain nests as a single `If` in
    /// the enclosing orelse.
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let test = self.parse_expr()?;
        let body = self.parse_block()?;

        let orelse = if self.check(&TokenKind::Elif) {
            vec![self.parse_if()?]
        } else {
            self.parse_else_block()?
        };

        let span = self.span_from(start);
        Ok(Stmt::If(IfStmt {
            test,
            body,
            orelse,
            span,
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let test = self.parse_expr()?;
        let body = self.parse_block()?;
        let orelse = self.parse_else_block()?;

        let span = self.span_from(start);
        Ok(Stmt::While(WhileStmt {
            test,
            body,
            orelse,
            span,
        }))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let target = self.parse_target_list()?;
        self.expect(&TokenKind::In)?;
        let iter = self.parse_testlist()?;
        let body = self.parse_block()?;
        let orelse = self.parse_else_block()?;

        let span = self.span_from(start);
        Ok(Stmt::For(ForStmt {
            target,
            iter,
            body,
            orelse,
            span,
        }))
    }

    /// Loop targets stop short of comparisons so `in` stays unconsumed.
    fn parse_target_list(&mut self) -> ParseResult<Expr> {
        let first = self.parse_arith()?;
        let target = if self.check(&TokenKind::Comma) {
            let start = first.span();
            let mut elts = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::In) {
                    break;
                }
                elts.push(self.parse_arith()?);
            }
            Expr::Tuple(elts, self.span_from(start))
        } else {
            first
        };

        if !target.is_assignable() {
            return Err(ParseError::invalid_target(target.span()));
        }
        Ok(target)
    }

    fn parse_def(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let name = self.expect_ident()?;

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_param()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        if self.check(&TokenKind::Arrow) {
            return Err(ParseError::unsupported("return annotation", self.peek().span));
        }
        let body = self.parse_block()?;

        let span = self.span_from(start);
        Ok(Stmt::FunctionDef(FunctionDef {
            name,
            params,
            body,
            span,
        }))
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let start = self.peek().span;
        let kind = if self.eat(&TokenKind::DoubleStar) {
            ParamKind::KwArgs
        } else if self.eat(&TokenKind::Star) {
            ParamKind::VarArgs
        } else {
            ParamKind::Positional
        };

        let name = self.expect_ident()?;
        if self.check(&TokenKind::Colon) {
            return Err(ParseError::unsupported("annotation", self.peek().span));
        }

        let default = if kind == ParamKind::Positional && self.eat(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let span = self.span_from(start);
        Ok(Param {
            name,
            kind,
            default,
            span,
        })
    }

    fn parse_class(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let name = self.expect_ident()?;

        let mut bases = Vec::new();
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                bases.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
        }
        let body = self.parse_block()?;

        let span = self.span_from(start);
        Ok(Stmt::ClassDef(ClassDef {
            name,
            bases,
            body,
            span,
        }))
    }

    // ==================== SIMPLE STATEMENTS ====================

    fn parse_simple_stmt(&mut self) -> ParseResult<Stmt> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Pass => {
                self.advance();
                Ok(Stmt::Pass(token.span))
            }
            TokenKind::Break => {
                self.advance();
                Ok(Stmt::Break(token.span))
            }
            TokenKind::Continue => {
                self.advance();
                Ok(Stmt::Continue(token.span))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.starts_expr() {
                    Some(self.parse_testlist()?)
                } else {
                    None
                };
                let span = self.span_from(token.span);
                Ok(Stmt::Return(ReturnStmt { value, span }))
            }
            TokenKind::Assert => {
                self.advance();
                let test = self.parse_expr()?;
                let msg = if self.eat(&TokenKind::Comma) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                let span = self.span_from(token.span);
                Ok(Stmt::Assert(AssertStmt { test, msg, span }))
            }
            TokenKind::Global => {
                self.advance();
                let names = self.parse_name_list()?;
                Ok(Stmt::Global(names, self.span_from(token.span)))
            }
            TokenKind::Nonlocal => {
                self.advance();
                let names = self.parse_name_list()?;
                Ok(Stmt::Nonlocal(names, self.span_from(token.span)))
            }
            TokenKind::Import => self.parse_import(),
            TokenKind::From => self.parse_from_import(),
            _ => self.parse_expr_or_assign(),
        }
    }

    fn parse_expr_or_assign(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().span;
        let first = self.parse_testlist()?;

        if let Some(op) = self.aug_assign_op() {
            if !matches!(
                first,
                Expr::Name(..) | Expr::Attribute(..) | Expr::Subscript(..)
            ) {
                return Err(ParseError::invalid_target(first.span()));
            }
            let value = self.parse_testlist()?;
            let span = self.span_from(start);
            return Ok(Stmt::AugAssign(AugAssignStmt {
                target: first,
                op,
                value,
                span,
            }));
        }

        if !self.check(&TokenKind::Assign) {
            let span = self.span_from(start);
            return Ok(Stmt::Expr(ExprStmt { value: first, span }));
        }

        // a = b = value: every expression but the last is a target
        let mut targets = Vec::new();
        let mut value = first;
        while self.eat(&TokenKind::Assign) {
            let next = self.parse_testlist()?;
            targets.push(std::mem::replace(&mut value, next));
        }

        if let Some(bad) = targets.iter().find(|t| !t.is_assignable()) {
            return Err(ParseError::invalid_target(bad.span()));
        }

        let span = self.span_from(start);
        Ok(Stmt::Assign(AssignStmt {
            targets,
            value,
            span,
        }))
    }

    /// Consume an augmented assignment operator if present.
    fn aug_assign_op(&mut self) -> Option<BinOp> {
        let op = match self.peek().kind {
            TokenKind::PlusEq => BinOp::Add,
            TokenKind::MinusEq => BinOp::Sub,
            TokenKind::StarEq => BinOp::Mult,
            TokenKind::SlashEq => BinOp::Div,
            TokenKind::DoubleSlashEq => BinOp::FloorDiv,
            TokenKind::PercentEq => BinOp::Mod,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_name_list(&mut self) -> ParseResult<Vec<String>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    fn parse_dotted_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_ident()?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_ident()?);
        }
        Ok(name)
    }

    fn parse_alias(&mut self, dotted: bool) -> ParseResult<Alias> {
        let name = if dotted {
            self.parse_dotted_name()?
        } else {
            self.expect_ident()?
        };
        let asname = if self.eat(&TokenKind::As) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        Ok(Alias { name, asname })
    }

    fn parse_import(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;

        let mut names = vec![self.parse_alias(true)?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.parse_alias(true)?);
        }

        let span = self.span_from(start);
        Ok(Stmt::Import(ImportStmt { names, span }))
    }

    fn parse_from_import(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;

        let mut level = 0;
        while self.eat(&TokenKind::Dot) {
            level += 1;
        }
        let module = if self.check(&TokenKind::Import) && level > 0 {
            None
        } else {
            Some(self.parse_dotted_name()?)
        };
        self.expect(&TokenKind::Import)?;

        // `from m import *` leaves the name list empty
        let mut names = Vec::new();
        if !self.eat(&TokenKind::Star) {
            let parenthesized = self.eat(&TokenKind::LParen);
            loop {
                names.push(self.parse_alias(false)?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
                if parenthesized && self.check(&TokenKind::RParen) {
                    break;
                }
            }
            if parenthesized {
                self.expect(&TokenKind::RParen)?;
            }
        }

        let span = self.span_from(start);
        Ok(Stmt::ImportFrom(ImportFromStmt {
            module,
            level,
            names,
            span,
        }))
    }
}
