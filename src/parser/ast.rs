// AST definitions for the box-simulation interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Types supported by the simulation: `int` and pointers up to
/// [`crate::interpreter::constants::MAX_POINTER_DEPTH`] levels.
///
/// The depth is part of the variant rather than a string suffix so that the
/// evaluator and statement engine can match exhaustively instead of parsing
/// `*`s out of a type name at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Pointer(u8), // 1 = int*, 2 = int**, 3 = int***
}

impl Type {
    /// Size of a value of this type in bytes: 4 for `int`, 8 for any pointer.
    pub fn size_bytes(&self) -> u64 {
        match self {
            Type::Int => 4,
            Type::Pointer(_) => 8,
        }
    }

    /// Alignment equals size for every supported type.
    pub fn align(&self) -> u64 {
        self.size_bytes()
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer(_))
    }

    /// Pointer depth: 0 for `int`, 1–3 for pointers.
    pub fn depth(&self) -> u8 {
        match self {
            Type::Int => 0,
            Type::Pointer(d) => *d,
        }
    }

    /// The type obtained by adding one level of indirection.
    pub fn pointer_to(&self) -> Type {
        Type::Pointer(self.depth() + 1)
    }

    /// The type a value of this type points at, if it is a pointer.
    pub fn pointee(&self) -> Option<Type> {
        match self {
            Type::Int => None,
            Type::Pointer(1) => Some(Type::Int),
            Type::Pointer(d) => Some(Type::Pointer(d - 1)),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "int")?;
        for _ in 0..self.depth() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl BinOp {
    /// The operator as it appears in source, for diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
        }
    }
}

/// Unary operators
///
/// Unary `+` is folded away during parsing and has no AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,    // -x
    Deref,  // *x
    AddrOf, // &x
}

/// Expression nodes
#[derive(Debug, Clone)]
pub enum Expr {
    IntLiteral(i32, SourceLocation),
    Name(String, SourceLocation),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLiteral(_, loc) => *loc,
            Expr::Name(_, loc) => *loc,
            Expr::Unary { location, .. } => *location,
            Expr::Binary { location, .. } => *location,
        }
    }
}

/// Statement forms recognized by the engine, one per line
#[derive(Debug, Clone)]
pub enum Statement {
    /// `int x;` / `int** pp;`
    Decl {
        name: String,
        decl_type: Type,
        location: SourceLocation,
    },
    /// `int x = expr;`
    DeclInit {
        name: String,
        decl_type: Type,
        init: Expr,
        location: SourceLocation,
    },
    /// `x = expr;`
    Assign {
        name: String,
        expr: Expr,
        location: SourceLocation,
    },
    /// `p = &x;`
    AssignRef {
        name: String,
        ref_name: String,
        location: SourceLocation,
    },
    /// `*p = expr;` with `depth` stars
    AssignThroughDeref {
        depth: u8,
        name: String,
        expr: Expr,
        location: SourceLocation,
    },
}

impl Statement {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Decl { location, .. } => *location,
            Statement::DeclInit { location, .. } => *location,
            Statement::Assign { location, .. } => *location,
            Statement::AssignRef { location, .. } => *location,
            Statement::AssignThroughDeref { location, .. } => *location,
        }
    }
}

/// One program line after parsing
///
/// A program is an ordered `Vec<Line>`; the runner skips blanks and halts on
/// the first `Error` it reaches.
#[derive(Debug, Clone)]
pub enum Line {
    Stmt(Statement),
    /// Empty, or only whitespace and comments
    Blank,
    Error(crate::parser::parse::ParseError),
}
