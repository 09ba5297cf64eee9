//! Fault types for the box simulation
//!
//! This module defines [`Fault`], covering everything that can go wrong while
//! evaluating an expression or applying a statement.  Every variant belongs
//! to one of exactly two [`FaultKind`]s:
//!
//! - [`FaultKind::Compile`]: the program is not well-formed C for this
//!   subset - bad syntax, undeclared names, type mismatches, redeclaration.
//!   Detected statically by attempting the parse/apply step; never depends
//!   on runtime values beyond type category.
//! - [`FaultKind::Ub`]: well-formed but undefined at runtime - reading
//!   uninitialized memory, dereferencing an empty or dangling pointer,
//!   dividing by zero.  Detected exactly at the statement that performs the
//!   unsafe operation, never earlier.
//!
//! Faults are plain data: they are returned, never thrown, and nothing in
//! the engine recovers from one silently.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// The two fault classifications exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Compile,
    Ub,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Compile => write!(f, "compile"),
            FaultKind::Ub => write!(f, "ub"),
        }
    }
}

/// Everything that can go wrong while evaluating or executing
#[derive(Debug, Clone)]
pub enum Fault {
    /// The line failed to lex or parse
    BadSyntax {
        message: String,
        location: SourceLocation,
    },

    /// A name that no live box carries
    UndeclaredName {
        name: String,
        location: SourceLocation,
    },

    /// Declaring a name that already denotes a box
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Value category or pointer depth does not fit the context
    TypeMismatch {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// `+ - * /` applied to a pointer value
    PointerArithmetic {
        op: &'static str,
        location: SourceLocation,
    },

    /// `&` applied to something that is not a bare name
    AddressOfValue { location: SourceLocation },

    /// Reading a box that has never been written
    UninitializedRead {
        name: String,
        location: SourceLocation,
    },

    /// Dereferencing a pointer whose slot is still empty
    EmptyDereference {
        name: String,
        location: SourceLocation,
    },

    /// Dereferencing an address that no live box occupies
    DanglingDereference {
        address: u64,
        location: SourceLocation,
    },

    /// Division by zero
    DivisionByZero { location: SourceLocation },
}

impl Fault {
    /// Which of the two classifications this fault belongs to
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::BadSyntax { .. }
            | Fault::UndeclaredName { .. }
            | Fault::Redeclaration { .. }
            | Fault::TypeMismatch { .. }
            | Fault::PointerArithmetic { .. }
            | Fault::AddressOfValue { .. } => FaultKind::Compile,

            Fault::UninitializedRead { .. }
            | Fault::EmptyDereference { .. }
            | Fault::DanglingDereference { .. }
            | Fault::DivisionByZero { .. } => FaultKind::Ub,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Fault::BadSyntax { location, .. }
            | Fault::UndeclaredName { location, .. }
            | Fault::Redeclaration { location, .. }
            | Fault::TypeMismatch { location, .. }
            | Fault::PointerArithmetic { location, .. }
            | Fault::AddressOfValue { location }
            | Fault::UninitializedRead { location, .. }
            | Fault::EmptyDereference { location, .. }
            | Fault::DanglingDereference { location, .. }
            | Fault::DivisionByZero { location } => *location,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::BadSyntax { message, location } => {
                write!(f, "{} at line {}", message, location.line)
            }
            Fault::UndeclaredName { name, location } => {
                write!(
                    f,
                    "Use of undeclared name '{}' at line {}",
                    name, location.line
                )
            }
            Fault::Redeclaration { name, location } => {
                write!(
                    f,
                    "Redeclaration of '{}' at line {}",
                    name, location.line
                )
            }
            Fault::TypeMismatch {
                expected,
                got,
                location,
            } => {
                write!(
                    f,
                    "Type mismatch at line {}: expected {}, got {}",
                    location.line, expected, got
                )
            }
            Fault::PointerArithmetic { op, location } => {
                write!(
                    f,
                    "Arithmetic '{}' on a pointer value at line {}",
                    op, location.line
                )
            }
            Fault::AddressOfValue { location } => {
                write!(
                    f,
                    "'&' requires a variable name at line {}",
                    location.line
                )
            }
            Fault::UninitializedRead { name, location } => {
                write!(
                    f,
                    "Read of uninitialized variable '{}' at line {}",
                    name, location.line
                )
            }
            Fault::EmptyDereference { name, location } => {
                write!(
                    f,
                    "Dereference of uninitialized pointer '{}' at line {}",
                    name, location.line
                )
            }
            Fault::DanglingDereference { address, location } => {
                write!(
                    f,
                    "Dereference of dangling address 0x{:x} at line {}",
                    address, location.line
                )
            }
            Fault::DivisionByZero { location } => {
                write!(f, "Division by zero at line {}", location.line)
            }
        }
    }
}

impl std::error::Error for Fault {}
