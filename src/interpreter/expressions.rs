//! Expression evaluation
//!
//! [`eval`] is a pure function of a store and an expression AST: it touches
//! no state and returns either a typed value or a [`Fault`].
//!
//! # Numeric semantics
//!
//! All arithmetic is on 32-bit signed values and wraps on overflow; division
//! truncates toward zero (`-7 / 2 == -3`) and faults only on a zero divisor.
//! `==` compares two int values and yields int `1` or `0`; pointer equality
//! is not part of the grammar.
//!
//! # Reads and undefined behavior
//!
//! Using a box's value before anything was stored in it is an
//! uninitialized-read UB fault.  The one exception is `&x`, which takes an
//! address without reading.  Internally the evaluator distinguishes a *raw*
//! read (which may surface an empty slot, needed to follow dereference
//! chains and report them precisely) from a *value* read, which converts an
//! empty slot into the fault.

use crate::interpreter::errors::Fault;
use crate::memory::store::Store;
use crate::memory::value::Slot;
use crate::parser::ast::{BinOp, Expr, Type, UnOp};

/// A successfully evaluated expression: a type and a non-empty slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluated {
    pub ty: Type,
    pub slot: Slot,
}

/// A raw read: the slot may still be empty.
///
/// `origin` names the box the slot was read from, for diagnostics; values
/// that were computed rather than read (literals, `&x`, arithmetic) have no
/// origin.
struct Raw {
    ty: Type,
    slot: Slot,
    origin: Option<String>,
}

/// Evaluate `expr` against `store`, producing a typed, initialized value.
pub fn eval(store: &Store, expr: &Expr) -> Result<Evaluated, Fault> {
    let raw = eval_raw(store, expr)?;
    if raw.slot == Slot::Empty {
        return Err(Fault::UninitializedRead {
            name: raw.origin.unwrap_or_else(|| "<unnamed>".to_string()),
            location: expr.location(),
        });
    }
    Ok(Evaluated {
        ty: raw.ty,
        slot: raw.slot,
    })
}

fn eval_raw(store: &Store, expr: &Expr) -> Result<Raw, Fault> {
    match expr {
        Expr::IntLiteral(n, _) => Ok(Raw {
            ty: Type::Int,
            slot: Slot::Int(*n),
            origin: None,
        }),

        Expr::Name(name, location) => {
            let b = store.lookup(name).ok_or_else(|| Fault::UndeclaredName {
                name: name.clone(),
                location: *location,
            })?;
            Ok(Raw {
                ty: b.box_type,
                slot: b.slot,
                origin: Some(b.canonical_name().to_string()),
            })
        }

        Expr::Unary {
            op: UnOp::AddrOf,
            operand,
            location,
        } => {
            // '&' binds to a variable, not to a value
            let Expr::Name(name, _) = operand.as_ref() else {
                return Err(Fault::AddressOfValue {
                    location: *location,
                });
            };
            let b = store.lookup(name).ok_or_else(|| Fault::UndeclaredName {
                name: name.clone(),
                location: *location,
            })?;
            Ok(Raw {
                ty: b.box_type.pointer_to(),
                slot: Slot::Addr(b.address),
                origin: None,
            })
        }

        Expr::Unary {
            op: UnOp::Deref,
            operand,
            location,
        } => {
            let raw = eval_raw(store, operand)?;
            if !raw.ty.is_pointer() {
                return Err(Fault::TypeMismatch {
                    expected: "pointer".to_string(),
                    got: raw.ty.to_string(),
                    location: *location,
                });
            }
            match raw.slot {
                Slot::Empty => Err(Fault::EmptyDereference {
                    name: raw
                        .origin
                        .unwrap_or_else(|| "<unnamed>".to_string()),
                    location: *location,
                }),
                Slot::Addr(addr) => match store.box_at(addr) {
                    Some(target) => Ok(Raw {
                        ty: target.box_type,
                        slot: target.slot,
                        origin: Some(target.canonical_name().to_string()),
                    }),
                    None => Err(Fault::DanglingDereference {
                        address: addr,
                        location: *location,
                    }),
                },
                // A pointer-typed box never holds an int; the engine's
                // category checks maintain that invariant
                Slot::Int(_) => Err(Fault::TypeMismatch {
                    expected: "address".to_string(),
                    got: "int".to_string(),
                    location: *location,
                }),
            }
        }

        Expr::Unary {
            op: UnOp::Neg,
            operand,
            location,
        } => {
            let v = eval(store, operand)?;
            match (v.ty, v.slot) {
                (Type::Int, Slot::Int(n)) => Ok(Raw {
                    ty: Type::Int,
                    slot: Slot::Int(n.wrapping_neg()),
                    origin: None,
                }),
                _ => Err(Fault::PointerArithmetic {
                    op: "-",
                    location: *location,
                }),
            }
        }

        Expr::Binary {
            op,
            left,
            right,
            location,
        } => {
            let lhs = eval(store, left)?;
            let rhs = eval(store, right)?;
            apply_binary(*op, lhs, rhs, *location)
        }
    }
}

fn apply_binary(
    op: BinOp,
    lhs: Evaluated,
    rhs: Evaluated,
    location: crate::parser::ast::SourceLocation,
) -> Result<Raw, Fault> {
    let ints = match (lhs.slot, rhs.slot) {
        (Slot::Int(a), Slot::Int(b)) => Some((a, b)),
        _ => None,
    };

    let result = match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
            let (a, b) = ints.ok_or(Fault::PointerArithmetic {
                op: op.symbol(),
                location,
            })?;
            match op {
                BinOp::Add => a.wrapping_add(b),
                BinOp::Sub => a.wrapping_sub(b),
                BinOp::Mul => a.wrapping_mul(b),
                BinOp::Div => {
                    if b == 0 {
                        return Err(Fault::DivisionByZero { location });
                    }
                    // Rust's i32 division truncates toward zero, exactly
                    // the C semantics taught here; wrapping_div also
                    // covers i32::MIN / -1
                    a.wrapping_div(b)
                }
                BinOp::Eq => unreachable!(),
            }
        }
        BinOp::Eq => {
            let (a, b) = ints.ok_or_else(|| Fault::TypeMismatch {
                expected: "int operands for '=='".to_string(),
                got: format!("{} and {}", lhs.ty, rhs.ty),
                location,
            })?;
            i32::from(a == b)
        }
    };

    Ok(Raw {
        ty: Type::Int,
        slot: Slot::Int(result),
        origin: None,
    })
}
