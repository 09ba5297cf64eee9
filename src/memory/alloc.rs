//! Address allocator for the box simulation
//!
//! Hands out addresses for newly declared boxes and recycles the addresses
//! of deleted ones.  The allocator is owned by a [`crate::memory::store::Store`]
//! and therefore scoped to one simulation session; there is no process-wide
//! cursor.
//!
//! # Allocation policy
//!
//! A monotonically increasing cursor, rounded up to the type's alignment
//! before each allocation and advanced by the type's size afterwards.  Freed
//! addresses go into a reuse pool; a later allocation of the same size pops
//! the most recently freed entry (LIFO) before touching the cursor.  Within
//! one session the sequence of addresses is fully deterministic.

use crate::interpreter::constants::BASE_ADDRESS;
use crate::memory::value::Address;
use crate::parser::ast::Type;
use std::time::{SystemTime, UNIX_EPOCH};

/// The widest alignment any supported type requires.
const MAX_ALIGN: u64 = 8;

/// Per-session address allocator
#[derive(Debug, Clone)]
pub struct Allocator {
    cursor: Address,
    free_pool: Vec<(Address, u64)>, // (address, size), LIFO
}

impl Allocator {
    /// Create an allocator with the fixed default base, so that running the
    /// same program twice yields identical addresses.
    pub fn new() -> Self {
        Allocator {
            cursor: BASE_ADDRESS,
            free_pool: Vec::new(),
        }
    }

    /// Assign an address for a new box of the given type.
    ///
    /// Draws from the reuse pool when a freed address of the same size is
    /// available, otherwise aligns and advances the cursor.
    pub fn allocate(&mut self, box_type: Type) -> Address {
        let size = box_type.size_bytes();

        if let Some(pos) =
            self.free_pool.iter().rposition(|&(_, s)| s == size)
        {
            let (addr, _) = self.free_pool.remove(pos);
            return addr;
        }

        let align = box_type.align();
        self.cursor = round_up(self.cursor, align);
        let addr = self.cursor;
        self.cursor += size;
        addr
    }

    /// Return an address to the reuse pool.
    ///
    /// The caller states the type the address was allocated for; only the
    /// size is remembered.
    pub fn free(&mut self, addr: Address, box_type: Type) {
        self.free_pool.push((addr, box_type.size_bytes()));
    }

    /// Reinitialize the cursor and clear the reuse pool.
    ///
    /// `Some(base)` sets an exact base (puzzle pages use this to pre-seed a
    /// canonical layout); `None` picks a clock-derived base so sandbox
    /// sessions see varied addresses.  Either way the base is aligned and
    /// never below one alignment unit, so address 0 stays unused and can
    /// mean "null" to renderers.
    pub fn reset(&mut self, seed: Option<Address>) {
        let base = seed.unwrap_or_else(scrambled_base);
        self.cursor = round_up(base.max(MAX_ALIGN), MAX_ALIGN);
        self.free_pool.clear();
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Round `value` up to the next multiple of `align` (a power of two)
fn round_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}

/// A clock-derived base in a small, readable address range
fn scrambled_base() -> Address {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    BASE_ADDRESS + (nanos % 0x1000)
}
