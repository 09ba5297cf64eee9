//! # Introduction
//!
//! ptrbox simulates the execution of a restricted C subset as a sequence of
//! labeled memory "boxes", for teaching variable and pointer semantics.  Every
//! declared variable becomes a box with an address, a type, a value slot, and
//! a set of names; pointer relationships between boxes are surfaced as derived
//! alias names (`*p`, `**pp`, ...).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → Statements → Engine → Store → Alias resolver
//! ```
//!
//! 1. [`parser`] — tokenises one line at a time and builds statement ASTs.
//! 2. [`memory`] — the box model: an [`memory::alloc::Allocator`] handing out
//!    aligned addresses and a [`memory::store::Store`] of typed
//!    [`memory::store::MemBox`] cells.
//! 3. [`interpreter`] — evaluates expressions, applies statements to a store,
//!    runs whole programs or prefixes, recomputes pointer aliases, and
//!    classifies live-edited source line by line.
//!
//! ## Supported C subset
//!
//! Types: `int` and pointers up to `int***`.
//! Statements: declaration, declaration with initializer, assignment,
//! address-of assignment (`p = &x;`), assignment through dereference
//! (`*p = e;`).
//! Expressions: integer literals, names, unary `& * + -`, binary
//! `* / + - ==`, parentheses.
//!
//! No functions, control flow, arrays, or structs: the point is the memory
//! model, not the language.

pub mod interpreter;
pub mod memory;
pub mod parser;
