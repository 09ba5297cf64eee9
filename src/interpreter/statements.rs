//! The statement engine
//!
//! [`apply`] executes one statement against a store and returns a fresh,
//! alias-resolved store; the input is never mutated.  Callers that want
//! undo/redo or speculative re-evaluation just keep the old store around.
//!
//! # Type discipline
//!
//! Wherever a value meets a declared type (`DeclInit`, `Assign`, the end of
//! a dereference chain) the categories must agree, and for pointers the
//! depths must match exactly: `int** q = &x;` is a compile fault, not a
//! warning.  `AssignRef` requires the left side to be a pointer exactly one
//! level deeper than the referenced box.

use crate::interpreter::aliases;
use crate::interpreter::errors::Fault;
use crate::interpreter::expressions::{eval, Evaluated};
use crate::memory::store::Store;
use crate::memory::value::Slot;
use crate::parser::ast::{SourceLocation, Statement, Type};

/// Apply one statement, producing a new store or a fault.
///
/// The returned store has already been through the alias resolver.
pub fn apply(store: &Store, statement: &Statement) -> Result<Store, Fault> {
    let mut next = store.clone();

    match statement {
        Statement::Decl {
            name,
            decl_type,
            location,
        } => {
            declare(&mut next, name, *decl_type, *location)?;
        }

        Statement::DeclInit {
            name,
            decl_type,
            init,
            location,
        } => {
            let value = eval(store, init)?;
            check_assignable(*decl_type, &value, *location)?;
            let addr = declare(&mut next, name, *decl_type, *location)?;
            if let Some(b) = next.box_at_mut(addr) {
                b.slot = value.slot;
            }
        }

        Statement::Assign {
            name,
            expr,
            location,
        } => {
            let value = eval(store, expr)?;
            let target =
                next.lookup_mut(name).ok_or_else(|| Fault::UndeclaredName {
                    name: name.clone(),
                    location: *location,
                })?;
            check_assignable(target.box_type, &value, *location)?;
            target.slot = value.slot;
        }

        Statement::AssignRef {
            name,
            ref_name,
            location,
        } => {
            let referenced =
                store.lookup(ref_name).ok_or_else(|| Fault::UndeclaredName {
                    name: ref_name.clone(),
                    location: *location,
                })?;
            let referenced_addr = referenced.address;
            let referenced_type = referenced.box_type;

            let target =
                next.lookup_mut(name).ok_or_else(|| Fault::UndeclaredName {
                    name: name.clone(),
                    location: *location,
                })?;
            if target.box_type.pointee() != Some(referenced_type) {
                return Err(Fault::TypeMismatch {
                    expected: target.box_type.to_string(),
                    got: referenced_type.pointer_to().to_string(),
                    location: *location,
                });
            }
            target.slot = Slot::Addr(referenced_addr);
        }

        Statement::AssignThroughDeref {
            depth,
            name,
            expr,
            location,
        } => {
            let target_addr = follow_chain(store, name, *depth, *location)?;
            let value = eval(store, expr)?;
            let target = next.box_at_mut(target_addr).ok_or_else(|| {
                Fault::DanglingDereference {
                    address: target_addr,
                    location: *location,
                }
            })?;
            check_assignable(target.box_type, &value, *location)?;
            target.slot = value.slot;
        }
    }

    aliases::refresh(&mut next);
    Ok(next)
}

/// Delete the box declared as `name` - the UI's "remove box" action.
///
/// Returns a fresh store with the address recycled and aliases recomputed
/// (pointers into the removed box become dangling and lose their derived
/// names).
pub fn delete(store: &Store, name: &str) -> Result<Store, Fault> {
    let mut next = store.clone();
    if !next.remove(name) {
        return Err(Fault::UndeclaredName {
            name: name.to_string(),
            location: SourceLocation::new(0, 0),
        });
    }
    aliases::refresh(&mut next);
    Ok(next)
}

/// Declare a new empty box, rejecting redeclaration.
fn declare(
    store: &mut Store,
    name: &str,
    decl_type: Type,
    location: SourceLocation,
) -> Result<u64, Fault> {
    if store.is_declared(name) {
        return Err(Fault::Redeclaration {
            name: name.to_string(),
            location,
        });
    }
    Ok(store.declare(name.to_string(), decl_type))
}

/// Category (and, for pointers, depth) check for storing `value` into a box
/// of type `target`.
fn check_assignable(
    target: Type,
    value: &Evaluated,
    location: SourceLocation,
) -> Result<(), Fault> {
    let compatible = match (target, value.ty) {
        (Type::Int, Type::Int) => true,
        (Type::Pointer(a), Type::Pointer(b)) => a == b,
        _ => false,
    };
    if !compatible {
        return Err(Fault::TypeMismatch {
            expected: target.to_string(),
            got: value.ty.to_string(),
            location,
        });
    }
    Ok(())
}

/// Follow `depth` dereference hops from the box named `name`, returning the
/// address of the final target box.
///
/// Every hop requires a pointer-typed box holding the address of a live
/// box; an empty slot or a dead address is the UB fault for that hop.
fn follow_chain(
    store: &Store,
    name: &str,
    depth: u8,
    location: SourceLocation,
) -> Result<u64, Fault> {
    let mut current = store.lookup(name).ok_or_else(|| Fault::UndeclaredName {
        name: name.to_string(),
        location,
    })?;

    for _ in 0..depth {
        if !current.box_type.is_pointer() {
            return Err(Fault::TypeMismatch {
                expected: "pointer".to_string(),
                got: current.box_type.to_string(),
                location,
            });
        }
        let addr = match current.slot {
            Slot::Addr(addr) => addr,
            _ => {
                return Err(Fault::EmptyDereference {
                    name: current.canonical_name().to_string(),
                    location,
                });
            }
        };
        current = store.box_at(addr).ok_or(Fault::DanglingDereference {
            address: addr,
            location,
        })?;
    }

    Ok(current.address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Line;
    use crate::parser::parse::parse_line;

    fn apply_all(lines: &[&str]) -> Result<Store, Fault> {
        let mut store = Store::new();
        for (i, line) in lines.iter().enumerate() {
            match parse_line(line, i + 1) {
                Line::Stmt(stmt) => store = apply(&store, &stmt)?,
                other => panic!("Expected statement, got {:?}", other),
            }
        }
        Ok(store)
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let before = apply_all(&["int x;"]).unwrap();
        let stmt = match parse_line("x = 3;", 2) {
            Line::Stmt(s) => s,
            other => panic!("{:?}", other),
        };
        let after = apply(&before, &stmt).unwrap();

        assert_eq!(before.lookup("x").unwrap().slot, Slot::Empty);
        assert_eq!(after.lookup("x").unwrap().slot, Slot::Int(3));
    }

    #[test]
    fn test_redeclaration_fault() {
        let fault = apply_all(&["int x;", "int x;"]).unwrap_err();
        assert!(matches!(fault, Fault::Redeclaration { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_decl_init_category_mismatch() {
        let fault = apply_all(&["int x;", "int* p = 5;"]).unwrap_err();
        assert!(matches!(fault, Fault::TypeMismatch { .. }));

        let fault = apply_all(&["int x;", "int y = &x;"]).unwrap_err();
        assert!(matches!(fault, Fault::TypeMismatch { .. }));
    }

    #[test]
    fn test_pointer_depth_checked_exactly() {
        // &x is int*, not int**
        let fault = apply_all(&["int x;", "int** q = &x;"]).unwrap_err();
        assert!(matches!(fault, Fault::TypeMismatch { .. }));

        let fault = apply_all(&["int x;", "int* p;", "int* q;", "p = &q;"])
            .unwrap_err();
        assert!(matches!(fault, Fault::TypeMismatch { .. }));
    }

    #[test]
    fn test_assign_ref_sets_address() {
        let store = apply_all(&["int x;", "int* p;", "p = &x;"]).unwrap();
        let x_addr = store.lookup("x").unwrap().address;
        assert_eq!(store.lookup("p").unwrap().slot, Slot::Addr(x_addr));
        // Aliases already resolved
        assert!(store.lookup("x").unwrap().has_name("*p"));
    }

    #[test]
    fn test_assign_through_deref() {
        let store =
            apply_all(&["int x;", "int* p;", "p = &x;", "*p = 7;"]).unwrap();
        assert_eq!(store.lookup("x").unwrap().slot, Slot::Int(7));
    }

    #[test]
    fn test_deref_chain_two_levels() {
        let store = apply_all(&[
            "int x;",
            "int* p;",
            "int** pp;",
            "p = &x;",
            "pp = &p;",
            "**pp = 42;",
        ])
        .unwrap();
        assert_eq!(store.lookup("x").unwrap().slot, Slot::Int(42));
    }

    #[test]
    fn test_deref_empty_pointer_is_ub() {
        let fault = apply_all(&["int* p;", "*p = 5;"]).unwrap_err();
        assert!(matches!(fault, Fault::EmptyDereference { ref name, .. } if name == "p"));
    }

    #[test]
    fn test_deref_chain_broken_mid_way() {
        // pp points at p, but p is still empty: the second hop breaks
        let fault =
            apply_all(&["int* p;", "int** pp;", "pp = &p;", "**pp = 1;"])
                .unwrap_err();
        assert!(matches!(fault, Fault::EmptyDereference { ref name, .. } if name == "p"));
    }

    #[test]
    fn test_deref_dangling_address_is_ub() {
        let store = apply_all(&["int x;", "int* p;", "p = &x;"]).unwrap();
        let store = delete(&store, "x").unwrap();

        let stmt = match parse_line("*p = 5;", 4) {
            Line::Stmt(s) => s,
            other => panic!("{:?}", other),
        };
        let fault = apply(&store, &stmt).unwrap_err();
        assert!(matches!(fault, Fault::DanglingDereference { .. }));
    }

    #[test]
    fn test_delete_drops_derived_aliases() {
        let store = apply_all(&["int x;", "int* p;", "p = &x;"]).unwrap();
        assert!(store.lookup("x").unwrap().has_name("*p"));

        let store = delete(&store, "x").unwrap();
        assert!(store.lookup("x").is_none());
        // p still exists but now dangles and derives nothing
        assert_eq!(store.lookup("p").unwrap().names, vec!["p"]);
    }

    #[test]
    fn test_assignment_through_alias_name() {
        // After p = &x, the name *p resolves to x's box for plain reads
        let store =
            apply_all(&["int x = 1;", "int* p;", "p = &x;", "int y = x + 1;"])
                .unwrap();
        assert_eq!(store.lookup("y").unwrap().slot, Slot::Int(2));
    }
}
