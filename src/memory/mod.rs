//! Memory model for the box simulation
//!
//! This module provides the core memory abstractions:
//! - [`value`]: the [`value::Slot`] held by a box (empty, int, or address)
//! - [`alloc`]: the per-session [`alloc::Allocator`] that hands out addresses
//! - [`store`]: the ordered [`store::Store`] of [`store::MemBox`] cells
//!
//! # Type sizes
//!
//! Unlike real C, sizes are fixed and platform-independent:
//! - `int`: 4 bytes
//! - pointer: 8 bytes, regardless of depth
//! - alignment equals size
//!
//! # Ownership
//!
//! A `Store` owns its `Allocator`, so sessions are fully isolated: cloning a
//! store (as the statement engine does on every apply) clones the address
//! cursor and reuse pool with it, and two concurrent simulations can never
//! interfere through shared allocator state.

pub mod alloc;
pub mod store;
pub mod value;
