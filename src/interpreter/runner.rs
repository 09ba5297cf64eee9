//! Sequential program execution
//!
//! [`run`] applies a parsed program to an empty store, statement by
//! statement, skipping blanks and halting on the first fault with the index
//! of the line that caused it.  Running a whole program and running a prefix
//! are the same call with a shorter slice - there is deliberately no second
//! code path, so the classifier and the "final state" view can never
//! disagree.
//!
//! [`run_from`] is the seeded variant: puzzle pages pre-populate a store
//! (typically after `Allocator::reset`) and run exercise lines on top of it.

use crate::interpreter::errors::Fault;
use crate::interpreter::statements::apply;
use crate::memory::store::Store;
use crate::parser::ast::Line;
use crate::parser::parse::parse_lines;
use std::fmt;

/// A fault plus the index of the line that produced it
#[derive(Debug, Clone)]
pub struct RunError {
    pub index: usize,
    pub fault: Fault,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fault)
    }
}

impl std::error::Error for RunError {}

/// Run a parsed program from an empty store.
pub fn run(lines: &[Line]) -> Result<Store, RunError> {
    run_from(Store::new(), lines)
}

/// Run a parsed program on top of an existing store.
pub fn run_from(initial: Store, lines: &[Line]) -> Result<Store, RunError> {
    let mut store = initial;

    for (index, line) in lines.iter().enumerate() {
        match line {
            Line::Blank => continue,
            Line::Error(e) => {
                return Err(RunError {
                    index,
                    fault: Fault::BadSyntax {
                        message: e.message.clone(),
                        location: e.location,
                    },
                });
            }
            Line::Stmt(stmt) => {
                store = apply(&store, stmt)
                    .map_err(|fault| RunError { index, fault })?;
            }
        }
    }

    Ok(store)
}

/// Parse and run raw source in one step.
pub fn run_source(source: &str) -> Result<Store, RunError> {
    run(&parse_lines(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::errors::FaultKind;
    use crate::memory::alloc::Allocator;
    use crate::memory::value::Slot;

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        let store = run_source("int x = 1;\n\n// note\nint y = 2;").unwrap();
        assert_eq!(store.lookup("x").unwrap().slot, Slot::Int(1));
        assert_eq!(store.lookup("y").unwrap().slot, Slot::Int(2));
    }

    #[test]
    fn test_first_fault_reports_index() {
        let err = run_source("int x;\nint x;\nint y;").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.fault.kind(), FaultKind::Compile);
    }

    #[test]
    fn test_parse_error_surfaces_as_compile_fault() {
        let err = run_source("int x;\nint 5;\n").unwrap_err();
        assert_eq!(err.index, 1);
        assert!(matches!(err.fault, Fault::BadSyntax { .. }));
    }

    #[test]
    fn test_prefix_equals_truncated_run() {
        let lines = parse_lines("int x = 1;\nint y = x + 1;\nint z = y * 2;");
        let full = run(&lines).unwrap();
        let prefix = run(&lines[..2]).unwrap();

        assert_eq!(
            full.lookup("y").unwrap().slot,
            prefix.lookup("y").unwrap().slot
        );
        assert!(prefix.lookup("z").is_none());
    }

    #[test]
    fn test_run_from_seeded_store() {
        // Puzzle-style setup: a reset allocator and a pre-run declaration
        let mut allocator = Allocator::new();
        allocator.reset(Some(0x2000));
        let setup = parse_lines("int base = 10;");
        let seeded = run_from(Store::with_allocator(allocator), &setup).unwrap();
        assert_eq!(seeded.lookup("base").unwrap().address, 0x2000);

        let lines = parse_lines("int next = base + 5;");
        let store = run_from(seeded, &lines).unwrap();
        assert_eq!(store.lookup("next").unwrap().slot, Slot::Int(15));
    }
}
