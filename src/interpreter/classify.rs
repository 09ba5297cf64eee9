//! Per-line classification of live-edited source
//!
//! The editor calls this on every keystroke: each line of the buffer gets
//! one of four classifications, derived by running the program prefix up to
//! and including that line through the ordinary runner.
//!
//! - [`LineClass::Ok`]: the prefix runs cleanly through this line
//! - [`LineClass::Incomplete`]: the line is non-blank but not a terminated
//!   statement yet (missing `;`, open paren, unclosed block comment) - the
//!   user is still typing
//! - [`LineClass::Invalid`]: the prefix hits a compile fault at this line
//! - [`LineClass::Ub`]: the prefix hits undefined behavior at this line
//!
//! Classification of line `i` never reads lines after `i`.  Once the prefix
//! has faulted at some line, every later line reports `Ok` with no message:
//! it is not the faulting index, and flagging the whole rest of the buffer
//! would bury the one diagnostic that matters.
//!
//! [`classify_source`] recomputes everything from line 0.  The stateful
//! [`Classifier`] produces identical output but caches the store snapshot
//! after every line, so a keystroke on line `k` re-runs only lines `k..`.

use crate::interpreter::errors::FaultKind;
use crate::interpreter::statements::apply;
use crate::memory::store::Store;
use crate::parser::ast::Line;
use crate::parser::parse::parse_line;

/// Classification of one editor line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Ok,
    Incomplete,
    Invalid,
    Ub,
}

/// Classification plus an optional gutter message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    pub class: LineClass,
    pub message: Option<String>,
}

impl LineReport {
    fn ok() -> Self {
        LineReport {
            class: LineClass::Ok,
            message: None,
        }
    }
}

/// Classify a whole buffer from scratch.
pub fn classify_source(source: &str) -> Vec<LineReport> {
    let mut classifier = Classifier::new();
    classifier.update(source)
}

/// The store state after a line's prefix
#[derive(Debug, Clone)]
enum PrefixState {
    Clean(Store),
    /// The prefix already faulted at an earlier line
    Faulted,
}

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    state: PrefixState,
    report: LineReport,
}

/// Incremental classifier with per-line store snapshots.
///
/// `update` is equivalent to [`classify_source`] on the same text; the cache
/// is invalidated from the first changed line onward, never before it.
#[derive(Debug, Default)]
pub struct Classifier {
    entries: Vec<Entry>,
}

impl Classifier {
    pub fn new() -> Self {
        Classifier::default()
    }

    /// Re-classify the buffer, reusing cached prefixes where the text is
    /// unchanged.
    pub fn update(&mut self, source: &str) -> Vec<LineReport> {
        let lines: Vec<&str> = source.lines().collect();

        let unchanged = self
            .entries
            .iter()
            .zip(&lines)
            .take_while(|(entry, line)| entry.text == **line)
            .count();
        self.entries.truncate(unchanged);

        for index in unchanged..lines.len() {
            let prev_state = match self.entries.last() {
                Some(entry) => entry.state.clone(),
                None => PrefixState::Clean(Store::new()),
            };
            let (report, state) = classify_step(prev_state, lines[index], index);
            self.entries.push(Entry {
                text: lines[index].to_string(),
                state,
                report,
            });
        }

        self.entries.iter().map(|e| e.report.clone()).collect()
    }
}

/// Classify one line given the state after its prefix.
fn classify_step(
    prev: PrefixState,
    text: &str,
    index: usize,
) -> (LineReport, PrefixState) {
    let store = match prev {
        PrefixState::Faulted => return (LineReport::ok(), PrefixState::Faulted),
        PrefixState::Clean(store) => store,
    };

    match parse_line(text, index + 1) {
        Line::Blank => (LineReport::ok(), PrefixState::Clean(store)),

        Line::Error(e) if e.incomplete => (
            LineReport {
                class: LineClass::Incomplete,
                message: None,
            },
            PrefixState::Faulted,
        ),

        Line::Error(e) => (
            LineReport {
                class: LineClass::Invalid,
                message: Some(e.message),
            },
            PrefixState::Faulted,
        ),

        Line::Stmt(stmt) => match apply(&store, &stmt) {
            Ok(next) => (LineReport::ok(), PrefixState::Clean(next)),
            Err(fault) => {
                let class = match fault.kind() {
                    FaultKind::Compile => LineClass::Invalid,
                    FaultKind::Ub => LineClass::Ub,
                };
                (
                    LineReport {
                        class,
                        message: Some(fault.to_string()),
                    },
                    PrefixState::Faulted,
                )
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(source: &str) -> Vec<LineClass> {
        classify_source(source).iter().map(|r| r.class).collect()
    }

    #[test]
    fn test_clean_program_all_ok() {
        assert_eq!(
            classes("int x;\nint* p;\np = &x;"),
            vec![LineClass::Ok, LineClass::Ok, LineClass::Ok]
        );
    }

    #[test]
    fn test_incomplete_line() {
        assert_eq!(
            classes("int x;\nint y = 1"),
            vec![LineClass::Ok, LineClass::Incomplete]
        );
    }

    #[test]
    fn test_ub_line() {
        assert_eq!(
            classes("int* p;\n*p = 5;"),
            vec![LineClass::Ok, LineClass::Ub]
        );
    }

    #[test]
    fn test_invalid_line_carries_message() {
        let reports = classify_source("int x;\nint x;");
        assert_eq!(reports[1].class, LineClass::Invalid);
        assert!(reports[1].message.as_deref().unwrap().contains("x"));
    }

    #[test]
    fn test_lines_after_fault_report_ok() {
        assert_eq!(
            classes("int x;\nint x;\nx = 1;"),
            vec![LineClass::Ok, LineClass::Invalid, LineClass::Ok]
        );
    }

    #[test]
    fn test_cache_matches_fresh_classification() {
        let v1 = "int x;\nint* p;\np = &x;\n*p = 3;";
        let v2 = "int x;\nint* p;\np = &y;\n*p = 3;";

        let mut classifier = Classifier::new();
        assert_eq!(classifier.update(v1), classify_source(v1));
        // Edit line 2; lines 0-1 come from the cache
        assert_eq!(classifier.update(v2), classify_source(v2));
        // And back again
        assert_eq!(classifier.update(v1), classify_source(v1));
    }
}
