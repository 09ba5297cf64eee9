//! Expression parsing implementation
//!
//! One method per precedence tier, lowest binding first:
//!
//! ```text
//! equality       ==                  (left-associative)
//! additive       + -                 (left-associative)
//! multiplicative * /                 (left-associative)
//! unary          & * + -             (prefix)
//! primary        literal name ( )
//! ```
//!
//! Unary `+` is folded away; `&` and `*` are kept as AST nodes and checked
//! semantically by the evaluator (`&` additionally requires its operand to be
//! a bare name, which is not a grammar restriction here so that the evaluator
//! can report it as a compile fault with a useful message).

use crate::parser::ast::{BinOp, Expr, UnOp};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (==)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while self.match_token(&Token::EqEq(self.current_location())) {
            let loc = self.previous().location();
            let right = Box::new(self.parse_additive()?);
            left = Expr::Binary {
                op: BinOp::Eq,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_multiplicative()?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else {
                break;
            };

            let right = Box::new(self.parse_unary()?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary (& * + -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Minus(loc)) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::Unary {
                op: UnOp::Neg,
                operand,
                location: loc,
            });
        }

        if self.match_token(&Token::Plus(loc)) {
            // Unary plus: just return the operand
            return self.parse_unary();
        }

        if self.match_token(&Token::Amp(loc)) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::Unary {
                op: UnOp::AddrOf,
                operand,
                location: loc,
            });
        }

        if self.match_token(&Token::Star(loc)) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::Unary {
                op: UnOp::Deref,
                operand,
                location: loc,
            });
        }

        self.parse_primary()
    }

    /// Parse primary (literals, names, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if let Token::IntLiteral(n, loc) = *self.peek() {
            self.advance();
            return Ok(Expr::IntLiteral(n, loc));
        }

        if let Token::Ident(name, loc) = self.peek() {
            let (name, loc) = (name.clone(), *loc);
            self.advance();
            return Ok(Expr::Name(name, loc));
        }

        if self.match_token(&Token::LParen(loc)) {
            let expr = self.parse_expression()?;
            self.expect_token(
                &Token::RParen(self.current_location()),
                "Expected ')' after expression",
            )?;
            return Ok(expr);
        }

        Err(self.error_here(format!("Unexpected token: {}", self.peek())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{Line, Statement};
    use crate::parser::parse::parse_line;

    fn parse_init_expr(source: &str) -> Expr {
        match parse_line(source, 1) {
            Line::Stmt(Statement::DeclInit { init, .. }) => init,
            other => panic!("Expected DeclInit, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 1 - 3 * 4 must parse as 1 - (3 * 4)
        match parse_init_expr("int a = 1 - 3 * 4;") {
            Expr::Binary {
                op: BinOp::Sub,
                right,
                ..
            } => {
                assert!(matches!(
                    *right,
                    Expr::Binary { op: BinOp::Mul, .. }
                ));
            }
            other => panic!("Expected subtraction at root, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_left_associative() {
        // 0 == 1 == 2 must parse as (0 == 1) == 2
        match parse_init_expr("int g = 0 == 1 == 2;") {
            Expr::Binary {
                op: BinOp::Eq,
                left,
                right,
                ..
            } => {
                assert!(matches!(*left, Expr::Binary { op: BinOp::Eq, .. }));
                assert!(matches!(*right, Expr::IntLiteral(2, _)));
            }
            other => panic!("Expected equality at root, got {:?}", other),
        }
    }

    #[test]
    fn test_parens_override_precedence() {
        match parse_init_expr("int a = (1 - 3) * 4;") {
            Expr::Binary {
                op: BinOp::Mul,
                left,
                ..
            } => {
                assert!(matches!(*left, Expr::Binary { op: BinOp::Sub, .. }));
            }
            other => panic!("Expected multiplication at root, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_plus_folded() {
        assert!(matches!(
            parse_init_expr("int a = +5;"),
            Expr::IntLiteral(5, _)
        ));
    }

    #[test]
    fn test_nested_unary() {
        match parse_init_expr("int a = **pp;") {
            Expr::Unary {
                op: UnOp::Deref,
                operand,
                ..
            } => {
                assert!(matches!(
                    *operand,
                    Expr::Unary {
                        op: UnOp::Deref,
                        ..
                    }
                ));
            }
            other => panic!("Expected dereference, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_paren_is_incomplete() {
        match parse_line("int a = (1 + 2;", 1) {
            Line::Error(e) => assert!(!e.incomplete),
            other => panic!("Expected error, got {:?}", other),
        }
        match parse_line("int a = (1 + 2", 1) {
            Line::Error(e) => assert!(e.incomplete),
            other => panic!("Expected error, got {:?}", other),
        }
    }
}
