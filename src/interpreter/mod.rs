//! Box-simulation execution engine
//!
//! This module provides the interpretation logic over the memory model:
//! - [`expressions`]: pure expression evaluation against a store
//! - [`statements`]: the statement engine (`apply`, `delete`)
//! - [`runner`]: sequential execution of programs and program prefixes
//! - [`aliases`]: the pointer-alias resolver
//! - [`classify`]: per-line classification of live-edited source
//! - [`errors`]: the two-kind fault taxonomy (compile / UB)
//!
//! # Execution model
//!
//! Every entry point takes an explicit [`crate::memory::store::Store`] and
//! returns a new one; nothing here holds state between calls and nothing
//! panics on bad programs.  After any store mutation the alias resolver is
//! re-run before the store is handed back, so alias sets are always a
//! consistent derived view.

pub mod aliases;
pub mod classify;
pub mod constants;
pub mod errors;
pub mod expressions;
pub mod runner;
pub mod statements;
