//! Source code parser for the box-simulation C subset
//!
//! This module transforms source lines into statement ASTs:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → statements), one line at a time
//! - [`ast`]: Type, expression, and statement definitions
//!
//! # Supported subset
//!
//! - Types: `int` and pointers up to three levels (`int***`)
//! - Statements: `int x;`, `int* p = expr;`, `x = expr;`, `p = &x;`,
//!   `**pp = expr;` — exactly one statement per line
//! - Expressions: integer literals, names, unary `& * + -`,
//!   binary `* / + - ==`, parentheses
//!
//! # Parser implementation
//!
//! Hand-written recursive descent with one level per precedence tier.
//! Parsing is line-oriented: each editor line is an independent unit, so a
//! parse failure carries an `incomplete` flag telling the caller whether the
//! line merely ended early (the user is still typing) or is genuinely
//! malformed.

pub mod ast;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
