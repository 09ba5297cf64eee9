//! Statement parsing
//!
//! The five statement forms are distinguished by their first token:
//!
//! - `int` keyword → declaration, with or without an initializer
//! - `*` → assignment through one or more dereferences
//! - identifier → plain assignment, or `name = &other;`
//!
//! `name = &other;` gets its own statement form ([`Statement::AssignRef`])
//! rather than going through the expression grammar, because it is the one
//! place the teaching model re-points a pointer at a specific box; a general
//! `&` expression on the right-hand side (e.g. `p = (&x);`) still parses as
//! [`Statement::Assign`] and is checked by the evaluator.

use crate::interpreter::constants::MAX_POINTER_DEPTH;
use crate::parser::ast::{Statement, Type};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one statement, consuming through its terminating ';'
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Int(loc)) {
            return self.parse_declaration();
        }

        if self.check(&Token::Star(loc)) {
            return self.parse_deref_assignment();
        }

        if matches!(self.peek(), Token::Ident(_, _)) {
            return self.parse_assignment();
        }

        Err(self.error_here(format!(
            "Expected a declaration or assignment, found {}",
            self.peek()
        )))
    }

    /// Parse `int x;` / `int*** ppp = expr;` (the `int` keyword is consumed)
    fn parse_declaration(&mut self) -> Result<Statement, ParseError> {
        let loc = self.previous().location();
        let depth = self.parse_pointer_stars()?;
        let decl_type = if depth == 0 {
            Type::Int
        } else {
            Type::Pointer(depth)
        };

        let name = self.expect_identifier()?;

        if self.match_token(&Token::Eq(self.current_location())) {
            let init = self.parse_expression()?;
            self.expect_semicolon("after declaration")?;
            Ok(Statement::DeclInit {
                name,
                decl_type,
                init,
                location: loc,
            })
        } else {
            self.expect_semicolon("after declaration")?;
            Ok(Statement::Decl {
                name,
                decl_type,
                location: loc,
            })
        }
    }

    /// Parse `x = expr;` or `p = &x;` (current token is the identifier)
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier()?;

        self.expect_token(
            &Token::Eq(self.current_location()),
            "Expected '=' after name",
        )?;

        // The dedicated re-point form: exactly `&` identifier `;`
        if self.check(&Token::Amp(self.current_location()))
            && matches!(self.peek_ahead(1), Some(Token::Ident(_, _)))
            && matches!(self.peek_ahead(2), Some(Token::Semicolon(_)))
        {
            self.advance(); // '&'
            let ref_name = self.expect_identifier()?;
            self.expect_semicolon("after assignment")?;
            return Ok(Statement::AssignRef {
                name,
                ref_name,
                location: loc,
            });
        }

        let expr = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;
        Ok(Statement::Assign {
            name,
            expr,
            location: loc,
        })
    }

    /// Parse `*p = expr;` / `***ppp = expr;` (current token is the first '*')
    fn parse_deref_assignment(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        let depth = self.parse_pointer_stars()?;
        let name = self.expect_identifier()?;

        self.expect_token(
            &Token::Eq(self.current_location()),
            "Expected '=' after dereference target",
        )?;

        let expr = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;
        Ok(Statement::AssignThroughDeref {
            depth,
            name,
            expr,
            location: loc,
        })
    }

    /// Consume consecutive '*' tokens, enforcing the depth cap
    fn parse_pointer_stars(&mut self) -> Result<u8, ParseError> {
        let mut depth: u8 = 0;
        while self.match_token(&Token::Star(self.current_location())) {
            depth += 1;
            if depth > MAX_POINTER_DEPTH {
                // No continuation can fix a fourth star, so never "incomplete"
                return Err(ParseError {
                    message: format!(
                        "Pointer depth exceeds the supported maximum of {}",
                        MAX_POINTER_DEPTH
                    ),
                    location: self.previous().location(),
                    incomplete: false,
                });
            }
        }
        Ok(depth)
    }
}
