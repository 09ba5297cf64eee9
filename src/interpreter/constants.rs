// Constants for the box simulation

/// Default base for the allocator cursor.
/// Fixed so that running the same program twice yields identical addresses.
pub const BASE_ADDRESS: u64 = 0x1000;

/// Maximum supported pointer depth (`int***`).
/// Enforced by the declaration parser and used to bound the alias fixpoint.
pub const MAX_POINTER_DEPTH: u8 = 3;
