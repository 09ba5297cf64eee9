//! The box store: ordered collection of memory cells
//!
//! A [`Store`] is the complete program state at one point in execution: a
//! list of [`MemBox`] cells in declaration order plus the session's
//! [`Allocator`].  The statement engine never mutates a store in place; it
//! clones, edits the clone, and returns it, which makes undo/redo and
//! speculative re-evaluation (classify-on-keystroke) trivial.
//!
//! # Names
//!
//! `names[0]` is the canonical name the box was declared under and is unique
//! across live boxes; every following entry is a pointer-derived alias
//! (`*p`, `**pp`, ...) recomputed from scratch by the alias resolver after
//! each mutation.  Nothing in this module maintains aliases - the store only
//! carries them.

use crate::memory::alloc::Allocator;
use crate::memory::value::{Address, Slot};
use crate::parser::ast::Type;

/// A simulated memory cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemBox {
    /// Unique among live boxes, fixed for the box's lifetime
    pub address: Address,
    /// Fixed for the box's lifetime
    pub box_type: Type,
    /// The only mutable part of a box
    pub slot: Slot,
    /// Canonical name first, derived aliases after
    pub names: Vec<String>,
}

impl MemBox {
    /// The name this box was declared under
    pub fn canonical_name(&self) -> &str {
        &self.names[0]
    }

    /// Whether any of this box's names (canonical or alias) matches
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Ordered collection of boxes plus the session allocator
#[derive(Debug, Clone, Default)]
pub struct Store {
    boxes: Vec<MemBox>,
    allocator: Allocator,
}

impl Store {
    /// An empty store with a fresh, deterministic allocator
    pub fn new() -> Self {
        Store::default()
    }

    /// An empty store over a caller-configured allocator (e.g. one that has
    /// been `reset` to a puzzle's canonical base)
    pub fn with_allocator(allocator: Allocator) -> Self {
        Store {
            boxes: Vec::new(),
            allocator,
        }
    }

    /// All boxes in declaration order
    pub fn boxes(&self) -> &[MemBox] {
        &self.boxes
    }

    pub(crate) fn boxes_mut(&mut self) -> &mut [MemBox] {
        &mut self.boxes
    }

    pub fn allocator_mut(&mut self) -> &mut Allocator {
        &mut self.allocator
    }

    /// Find the box any of whose names matches `name`
    pub fn lookup(&self, name: &str) -> Option<&MemBox> {
        self.boxes.iter().find(|b| b.has_name(name))
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut MemBox> {
        self.boxes.iter_mut().find(|b| b.has_name(name))
    }

    /// Find the live box at `addr`
    pub fn box_at(&self, addr: Address) -> Option<&MemBox> {
        self.boxes.iter().find(|b| b.address == addr)
    }

    pub(crate) fn box_at_mut(&mut self, addr: Address) -> Option<&mut MemBox> {
        self.boxes.iter_mut().find(|b| b.address == addr)
    }

    /// Whether `name` is any live box's canonical name
    pub fn is_declared(&self, name: &str) -> bool {
        self.boxes.iter().any(|b| b.canonical_name() == name)
    }

    /// Allocate and append a new, empty box.
    ///
    /// The caller is responsible for rejecting redeclarations first.
    pub(crate) fn declare(&mut self, name: String, box_type: Type) -> Address {
        let address = self.allocator.allocate(box_type);
        self.boxes.push(MemBox {
            address,
            box_type,
            slot: Slot::Empty,
            names: vec![name],
        });
        address
    }

    /// Delete the box declared as `name`, returning its address to the
    /// allocator's reuse pool.  Returns false if no such box exists.
    ///
    /// Driven by the UI's "remove box" action; the interpreter itself never
    /// destroys a box.  Callers must re-run the alias resolver afterwards,
    /// since pointers into the removed box are now dangling.
    pub fn remove(&mut self, name: &str) -> bool {
        match self
            .boxes
            .iter()
            .position(|b| b.canonical_name() == name)
        {
            Some(pos) => {
                let gone = self.boxes.remove(pos);
                self.allocator.free(gone.address, gone.box_type);
                true
            }
            None => false,
        }
    }
}
