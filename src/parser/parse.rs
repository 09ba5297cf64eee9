//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including the error type, helper methods, and the
//! line-oriented entry points [`parse_line`] and [`parse_lines`].
//!
//! # Parser architecture
//!
//! Recursive descent, split across `impl Parser` blocks:
//! - This module: Parser struct, helpers, and coordination
//! - `statements`: the five recognized statement forms
//! - `expressions`: expression parsing, one method per precedence tier
//!
//! # Incomplete lines
//!
//! The editor re-parses on every keystroke, so "the line isn't finished"
//! is a routine state rather than an error.  Whenever a parse fails because
//! the current token is end-of-line (or the lexer ran off the end of the
//! input), the resulting [`ParseError`] has `incomplete = true`; the line
//! classifier maps that to `Incomplete` instead of `Invalid`.

use crate::parser::ast::{Line, SourceLocation};
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
    /// True when the line ended before the statement did.
    pub incomplete: bool,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
            incomplete: err.incomplete,
        }
    }
}

/// Parse a single source line into a [`Line`].
///
/// `line_number` is 1-based and only used for diagnostic locations.
/// Never fails: lex and parse errors are folded into [`Line::Error`].
pub fn parse_line(source: &str, line_number: usize) -> Line {
    let mut lexer = Lexer::new(source, line_number);
    let tokens = match lexer.tokenize() {
        Ok(tokens) => tokens,
        Err(e) => return Line::Error(e.into()),
    };

    // Only an Eof token: nothing but whitespace and comments
    if tokens.len() == 1 {
        return Line::Blank;
    }

    let mut parser = Parser::new(tokens);
    match parser.parse_statement() {
        Ok(stmt) => {
            // One statement per line; anything after the ';' is an error
            if parser.is_at_end() {
                Line::Stmt(stmt)
            } else {
                Line::Error(ParseError {
                    message: format!(
                        "Expected end of line after ';', found {}",
                        parser.peek()
                    ),
                    location: parser.current_location(),
                    incomplete: false,
                })
            }
        }
        Err(e) => Line::Error(e),
    }
}

/// Parse a whole buffer, one [`Line`] per source line.
pub fn parse_lines(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

/// Recursive descent parser over one line's token stream
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(self.peek())
            == std::mem::discriminant(token)
        {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Build a parse error at the current token.
    ///
    /// The `incomplete` flag is derived from whether we are sitting on the
    /// end of the line: `int x` is incomplete, `int 5` is invalid.
    pub(crate) fn error_here(&self, message: String) -> ParseError {
        ParseError {
            message,
            location: self.current_location(),
            incomplete: self.is_at_end(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format!("{}, found {}", message, self.peek())))
        }
    }

    pub(crate) fn expect_semicolon(
        &mut self,
        ctx: &str,
    ) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self
                .error_here(format!("Expected identifier, found {}", self.peek())))
        }
    }
}
