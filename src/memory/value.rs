//! Box value representation
//!
//! This module defines [`Slot`], the value held by a memory box.  Unlike raw
//! C memory, slots are tagged: an uninitialized box holds [`Slot::Empty`],
//! which is distinct from every integer and never rendered as a number.
//!
//! # Slot variants
//!
//! - [`Slot::Empty`]: uninitialized memory (the state every box starts in)
//! - [`Slot::Int`]: a 32-bit signed integer, for `int` boxes
//! - [`Slot::Addr`]: another box's address, for pointer boxes
//!
//! Keeping `Empty` as an explicit variant is what lets the interpreter flag
//! uninitialized reads and empty-pointer dereferences as undefined behavior
//! instead of producing garbage values.

use std::fmt;

/// Memory address type (64-bit)
pub type Address = u64;

/// The value held by a memory box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    /// Uninitialized - distinct from any numeric value
    #[default]
    Empty,
    Int(i32),
    Addr(Address),
}

impl Slot {
    /// Check if this slot has been written to
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Slot::Empty)
    }

    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Slot::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the address value, returns None if not an Addr
    pub fn as_addr(&self) -> Option<Address> {
        match self {
            Slot::Addr(a) => Some(*a),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "empty"),
            Slot::Int(n) => write!(f, "{}", n),
            Slot::Addr(a) => write!(f, "0x{:x}", a),
        }
    }
}
