//! Pointer-alias resolution
//!
//! Every box's name set is a derived view: the canonical declaration name
//! plus every `*p`-style name reachable through live pointers.  Nothing in
//! the engine patches aliases incrementally - after any store mutation the
//! whole view is recomputed here, so stale aliases cannot exist.
//!
//! # Algorithm
//!
//! Strip every box back to its canonical name, then run a fixpoint: for each
//! pointer box `P` holding the address of a live box `T`, `T` gains `*n` for
//! every name `n` that `P` currently carries.  Because `P`'s own alias set
//! grows during earlier passes, chains compose: if `pp` points to `p` and
//! `p` points to `x`, then `x` ends up with `*p` and `**pp`.  The pass count
//! is bounded by the maximum pointer depth, so the fixpoint always
//! terminates within three rounds.
//!
//! [`resolve`] is pure and idempotent: resolving an already-resolved store
//! changes nothing.

use crate::interpreter::constants::MAX_POINTER_DEPTH;
use crate::memory::store::Store;
use crate::memory::value::Slot;
use rustc_hash::FxHashSet;

/// Return a copy of `store` with every box's alias set recomputed.
pub fn resolve(store: &Store) -> Store {
    let mut resolved = store.clone();
    refresh(&mut resolved);
    resolved
}

/// Recompute all alias sets in place.
///
/// The statement engine calls this after every mutation, so stores handed
/// to callers are always resolved.
pub(crate) fn refresh(store: &mut Store) {
    // Back to canonical names only
    for b in store.boxes_mut() {
        b.names.truncate(1);
    }

    for _ in 0..MAX_POINTER_DEPTH {
        // (target index, alias) pairs discovered this pass; the set both
        // deduplicates and decides termination
        let mut additions: FxHashSet<(usize, String)> = FxHashSet::default();

        for pointer in store.boxes() {
            if !pointer.box_type.is_pointer() {
                continue;
            }
            let Slot::Addr(addr) = pointer.slot else {
                continue;
            };
            let Some(target_index) =
                store.boxes().iter().position(|b| b.address == addr)
            else {
                continue; // dangling pointers derive no names
            };

            for name in &pointer.names {
                let alias = format!("*{}", name);
                let target = &store.boxes()[target_index];
                if !target.has_name(&alias) {
                    additions.insert((target_index, alias));
                }
            }
        }

        if additions.is_empty() {
            break;
        }

        // Deterministic insertion order regardless of hash iteration
        let mut additions: Vec<_> = additions.into_iter().collect();
        additions.sort();
        for (index, alias) in additions {
            store.boxes_mut()[index].names.push(alias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::Slot;
    use crate::parser::ast::Type;

    fn pointer_chain() -> Store {
        // x <- p <- pp
        let mut store = Store::new();
        let x = store.declare("x".to_string(), Type::Int);
        let p = store.declare("p".to_string(), Type::Pointer(1));
        store.declare("pp".to_string(), Type::Pointer(2));
        store.lookup_mut("p").unwrap().slot = Slot::Addr(x);
        store.lookup_mut("pp").unwrap().slot = Slot::Addr(p);
        store
    }

    #[test]
    fn test_single_hop() {
        let store = resolve(&pointer_chain());
        let x = store.lookup("x").unwrap();
        assert!(x.has_name("*p"));
    }

    #[test]
    fn test_transitive_chain() {
        let store = resolve(&pointer_chain());
        assert_eq!(
            store.lookup("x").unwrap().names,
            vec!["x", "*p", "**pp"]
        );
        assert_eq!(store.lookup("p").unwrap().names, vec!["p", "*pp"]);
        assert_eq!(store.lookup("pp").unwrap().names, vec!["pp"]);
    }

    #[test]
    fn test_idempotent() {
        let once = resolve(&pointer_chain());
        let twice = resolve(&once);
        for (a, b) in once.boxes().iter().zip(twice.boxes()) {
            assert_eq!(a.names, b.names);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let store = pointer_chain();
        let _ = resolve(&store);
        assert_eq!(store.lookup("x").unwrap().names, vec!["x"]);
    }

    #[test]
    fn test_stale_aliases_dropped() {
        let mut store = resolve(&pointer_chain());
        // Re-point p at a fresh box; x must lose *p and **pp
        let y = store.declare("y".to_string(), Type::Int);
        store.lookup_mut("p").unwrap().slot = Slot::Addr(y);

        let store = resolve(&store);
        assert_eq!(store.lookup("x").unwrap().names, vec!["x"]);
        assert_eq!(store.lookup("y").unwrap().names, vec!["y", "*p", "**pp"]);
    }

    #[test]
    fn test_resolution_independent_of_declaration_order() {
        // The same x <- p <- pp chain, boxes declared in reverse
        let mut store = Store::new();
        store.declare("pp".to_string(), Type::Pointer(2));
        let p = store.declare("p".to_string(), Type::Pointer(1));
        let x = store.declare("x".to_string(), Type::Int);
        store.lookup_mut("p").unwrap().slot = Slot::Addr(x);
        store.lookup_mut("pp").unwrap().slot = Slot::Addr(p);

        let store = resolve(&store);
        assert_eq!(
            store.lookup("x").unwrap().names,
            vec!["x", "*p", "**pp"]
        );
        assert_eq!(store.lookup("p").unwrap().names, vec!["p", "*pp"]);
        assert_eq!(store.lookup("pp").unwrap().names, vec!["pp"]);
    }

    #[test]
    fn test_dangling_pointer_derives_nothing() {
        let mut store = pointer_chain();
        store.lookup_mut("p").unwrap().slot = Slot::Addr(0xdead_beef);
        let store = resolve(&store);
        assert_eq!(store.lookup("x").unwrap().names, vec!["x"]);
        // pp -> p is still intact
        assert_eq!(store.lookup("p").unwrap().names, vec!["p", "*pp"]);
    }

    #[test]
    fn test_triple_chain() {
        let mut store = pointer_chain();
        store.declare("ppp".to_string(), Type::Pointer(3));
        let pp_addr = store.lookup("pp").unwrap().address;
        store.lookup_mut("ppp").unwrap().slot = Slot::Addr(pp_addr);

        let store = resolve(&store);
        assert_eq!(
            store.lookup("x").unwrap().names,
            vec!["x", "*p", "**pp", "***ppp"]
        );
    }
}
