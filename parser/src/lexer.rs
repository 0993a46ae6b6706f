//! Lexer (tokenizer) for Python source text.
//!
//! The token stream is layout-aware: `Newline` ends every logical line and
//! `Indent`/`Dedent` bracket nested blocks. Line breaks inside brackets and
//! after a backslash do not end the logical line.

use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords (case-sensitive)
    False,
    None,
    True,
    And,
    As,
    Assert,
    Break,
    Class,
    Continue,
    Def,
    Elif,
    Else,
    For,
    From,
    Global,
    If,
    Import,
    In,
    Is,
    Nonlocal,
    Not,
    Or,
    Pass,
    Return,
    While,
    /// A Python keyword outside the supported subset (`try`, `lambda`, ...).
    Reserved(String),

    // Literals
    Ident(String),
    Int(i64),
    Float(f64),
    String(String),

    // Symbols
    LParen,        // (
    RParen,        // )
    LBracket,      // [
    RBracket,      // ]
    LBrace,        // {
    RBrace,        // }
    Comma,         // ,
    Colon,         // :
    Semicolon,     // ;
    Dot,           // .
    Assign,        // =
    EqEq,          // ==
    NotEq,         // !=
    Lt,            // <
    LtEq,          // <=
    Gt,            // >
    GtEq,          // >=
    Plus,          // +
    Minus,         // -
    Star,          // *
    DoubleStar,    // **
    Slash,         // /
    DoubleSlash,   // //
    Percent,       // %
    PlusEq,        // +=
    MinusEq,       // -=
    StarEq,        // *=
    SlashEq,       // /=
    DoubleSlashEq, // //=
    PercentEq,     // %=
    Arrow,         // ->
    At,            // @

    // Layout
    Newline,
    Indent,
    Dedent,

    // End of file
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::False => "False",
            TokenKind::None => "None",
            TokenKind::True => "True",
            TokenKind::And => "and",
            TokenKind::As => "as",
            TokenKind::Assert => "assert",
            TokenKind::Break => "break",
            TokenKind::Class => "class",
            TokenKind::Continue => "continue",
            TokenKind::Def => "def",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::From => "from",
            TokenKind::Global => "global",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Is => "is",
            TokenKind::Nonlocal => "nonlocal",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Pass => "pass",
            TokenKind::Return => "return",
            TokenKind::While => "while",
            TokenKind::Reserved(_) => "reserved keyword",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::DoubleStar => "**",
            TokenKind::Slash => "/",
            TokenKind::DoubleSlash => "//",
            TokenKind::Percent => "%",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::DoubleSlashEq => "//=",
            TokenKind::PercentEq => "%=",
            TokenKind::Arrow => "->",
            TokenKind::At => "@",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    /// Stack of open indentation widths; the bottom entry is always 0.
    indents: Vec<usize>,
    /// Bracket nesting depth. Line breaks are insignificant while > 0.
    depth: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            indents: vec![0],
            depth: 0,
            at_line_start: true,
        }
    }

    /// Tokenize all input into a vector of tokens ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            if self.at_line_start {
                self.at_line_start = false;
                self.scan_indentation(&mut tokens)?;
            }
            self.skip_inline_whitespace();

            let Some(c) = self.peek_char() else {
                break;
            };

            match c {
                '#' => self.skip_comment(),
                '\n' => {
                    let span = self.current_span();
                    self.next_char();
                    if self.depth == 0 {
                        if matches!(tokens.last(), Some(Token { kind, .. }) if *kind != TokenKind::Newline)
                        {
                            tokens.push(Token::new(TokenKind::Newline, span));
                        }
                        self.at_line_start = true;
                    }
                }
                '\\' => {
                    let span = self.current_span();
                    self.next_char();
                    if self.peek_char() == Some('\r') {
                        self.next_char();
                    }
                    if self.peek_char() != Some('\n') {
                        return Err(ParseError::new(
                            "unexpected character after line continuation",
                            span,
                        ));
                    }
                    self.next_char();
                }
                _ => {
                    let token = self.next_token()?;
                    tokens.push(token);
                }
            }
        }

        self.finish(&mut tokens);
        Ok(tokens)
    }

    fn finish(&mut self, tokens: &mut Vec<Token>) {
        let span = self.current_span();
        if matches!(tokens.last(), Some(Token { kind, .. }) if *kind != TokenKind::Newline) {
            tokens.push(Token::new(TokenKind::Newline, span));
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            tokens.push(Token::new(TokenKind::Dedent, span));
        }
        tokens.push(Token::new(TokenKind::Eof, span));
    }

    /// Measure the leading whitespace of a line and emit Indent/Dedent
    /// tokens. Blank and comment-only lines leave the stack untouched.
    fn scan_indentation(&mut self, tokens: &mut Vec<Token>) -> ParseResult<()> {
        let mut width = 0;
        while let Some(c) = self.peek_char() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / 8 + 1) * 8,
                '\x0c' => width = 0,
                '\r' => {}
                _ => break,
            }
            self.next_char();
        }

        if matches!(self.peek_char(), None | Some('\n') | Some('#')) {
            return Ok(());
        }

        let span = self.current_span();
        let current = self.indents.last().copied().unwrap_or(0);
        if width > current {
            self.indents.push(width);
            tokens.push(Token::new(TokenKind::Indent, span));
            return Ok(());
        }

        while width < self.indents.last().copied().unwrap_or(0) {
            self.indents.pop();
            tokens.push(Token::new(TokenKind::Dedent, span));
        }
        if width != self.indents.last().copied().unwrap_or(0) {
            return Err(ParseError::inconsistent_dedent(span));
        }
        Ok(())
    }

    fn current_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if matches!(c, ' ' | '\t' | '\r' | '\x0c') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.next_char();
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::new(TokenKind::Eof, self.current_span()));
        };

        let kind = match c {
            '(' => {
                self.depth += 1;
                TokenKind::LParen
            }
            ')' => {
                self.depth = self.depth.saturating_sub(1);
                TokenKind::RParen
            }
            '[' => {
                self.depth += 1;
                TokenKind::LBracket
            }
            ']' => {
                self.depth = self.depth.saturating_sub(1);
                TokenKind::RBracket
            }
            '{' => {
                self.depth += 1;
                TokenKind::LBrace
            }
            '}' => {
                self.depth = self.depth.saturating_sub(1);
                TokenKind::RBrace
            }
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '.' => {
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(c, start, start_line, start_col)?
                } else {
                    TokenKind::Dot
                }
            }
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    return Err(ParseError::new(
                        "unexpected character '!'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '+' => {
                if self.eat('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('=') {
                    TokenKind::MinusEq
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.eat('*') {
                    TokenKind::DoubleStar
                } else if self.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.eat('/') {
                    if self.eat('=') {
                        TokenKind::DoubleSlashEq
                    } else {
                        TokenKind::DoubleSlash
                    }
                } else if self.eat('=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            '@' => TokenKind::At,
            '"' | '\'' => self.scan_string(c, false, start, start_line, start_col)?,
            'r' | 'R' | 'u' | 'U' | 'b' | 'B' | 'f' | 'F'
                if matches!(self.peek_char(), Some('"') | Some('\'')) =>
            {
                if matches!(c, 'b' | 'B' | 'f' | 'F') {
                    return Err(ParseError::unsupported(
                        &format!("{}-string", c.to_ascii_lowercase()),
                        self.span_from(start, start_line, start_col),
                    ));
                }
                let quote = self.next_char().unwrap_or('"');
                let raw = matches!(c, 'r' | 'R');
                self.scan_string(quote, raw, start, start_line, start_col)?
            }
            c if c == '_' || c.is_alphabetic() => self.scan_ident_or_keyword(c),
            '0'..='9' => self.scan_number(c, start, start_line, start_col)?,
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_line, start_col),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start, start_line, start_col)))
    }

    /// Scan a string literal whose opening quote has been consumed.
    fn scan_string(
        &mut self,
        quote: char,
        raw: bool,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let triple = self.peek_char() == Some(quote) && self.peek_second() == Some(quote);
        if triple {
            self.next_char();
            self.next_char();
        }

        let mut value = String::new();
        loop {
            let Some(c) = self.next_char() else {
                return Err(ParseError::new(
                    "unterminated string literal",
                    self.span_from(start, start_line, start_col),
                ));
            };

            if c == quote {
                if !triple {
                    break;
                }
                if self.peek_char() == Some(quote) && self.peek_second() == Some(quote) {
                    self.next_char();
                    self.next_char();
                    break;
                }
                value.push(c);
                continue;
            }

            match c {
                '\n' if !triple => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                '\\' => {
                    let Some(escaped) = self.next_char() else {
                        return Err(ParseError::new(
                            "unterminated escape sequence",
                            self.current_span(),
                        ));
                    };
                    if raw {
                        value.push('\\');
                        value.push(escaped);
                        continue;
                    }
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '0' => value.push('\0'),
                        'a' => value.push('\x07'),
                        'b' => value.push('\x08'),
                        'f' => value.push('\x0c'),
                        'v' => value.push('\x0b'),
                        '\\' | '\'' | '"' => value.push(escaped),
                        // Backslash-newline joins the lines.
                        '\n' => {}
                        'x' => value.push(self.scan_hex_escape()?),
                        // Unknown escapes keep their backslash.
                        other => {
                            value.push('\\');
                            value.push(other);
                        }
                    }
                }
                c => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_hex_escape(&mut self) -> ParseResult<char> {
        let span = self.current_span();
        let mut code = 0u32;
        for _ in 0..2 {
            let digit = self
                .next_char()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| ParseError::new("invalid \\x escape", span))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| ParseError::new("invalid \\x escape", span))
    }

    fn scan_ident_or_keyword(&mut self, first: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "False" => TokenKind::False,
            "None" => TokenKind::None,
            "True" => TokenKind::True,
            "and" => TokenKind::And,
            "as" => TokenKind::As,
            "assert" => TokenKind::Assert,
            "break" => TokenKind::Break,
            "class" => TokenKind::Class,
            "continue" => TokenKind::Continue,
            "def" => TokenKind::Def,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "from" => TokenKind::From,
            "global" => TokenKind::Global,
            "if" => TokenKind::If,
            "import" => TokenKind::Import,
            "in" => TokenKind::In,
            "is" => TokenKind::Is,
            "nonlocal" => TokenKind::Nonlocal,
            "not" => TokenKind::Not,
            "or" => TokenKind::Or,
            "pass" => TokenKind::Pass,
            "return" => TokenKind::Return,
            "while" => TokenKind::While,
            "async" | "await" | "del" | "except" | "finally" | "lambda" | "raise" | "try"
            | "with" | "yield" => TokenKind::Reserved(ident),
            _ => TokenKind::Ident(ident),
        }
    }

    fn scan_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                text.push(c);
                self.next_char();
            } else if c == '_' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        if first == '0' {
            let radix = match self.peek_char() {
                Some('x') | Some('X') => Some(16),
                Some('o') | Some('O') => Some(8),
                Some('b') | Some('B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.next_char();
                let mut digits = String::new();
                while let Some(c) = self.peek_char() {
                    if c.is_digit(radix) {
                        digits.push(c);
                    } else if c != '_' {
                        break;
                    }
                    self.next_char();
                }
                return i64::from_str_radix(&digits, radix)
                    .map(TokenKind::Int)
                    .map_err(|_| {
                        ParseError::new(
                            "invalid integer literal",
                            self.span_from(start, start_line, start_col),
                        )
                    });
            }
        }

        let mut text = String::new();
        text.push(first);
        let mut is_float = first == '.';
        self.scan_digits(&mut text);

        // `1.5`, `1.` but not `1.real`
        if !is_float
            && self.peek_char() == Some('.')
            && !self
                .peek_second()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
        {
            self.next_char();
            text.push('.');
            is_float = true;
            self.scan_digits(&mut text);
        }

        if matches!(self.peek_char(), Some('e') | Some('E'))
            && self
                .peek_second()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.next_char();
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                text.push(sign);
                self.next_char();
            }
            self.scan_digits(&mut text);
            is_float = true;
        }

        let span = self.span_from(start, start_line, start_col);
        if matches!(self.peek_char(), Some('j') | Some('J')) {
            return Err(ParseError::unsupported("imaginary literal", span));
        }

        if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| ParseError::new(format!("invalid float literal '{}'", text), span))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| ParseError::new(format!("integer literal too large '{}'", text), span))
        }
    }
}
