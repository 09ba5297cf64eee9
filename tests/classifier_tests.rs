// Editor-facing tests for the line classifier

use ptrbox::interpreter::classify::{classify_source, Classifier, LineClass};

fn classes(source: &str) -> Vec<LineClass> {
    classify_source(source).iter().map(|r| r.class).collect()
}

#[test]
fn test_comment_only_and_blank_lines_are_ok() {
    assert_eq!(
        classes("// setup\n\nint x;\n/* done */"),
        vec![LineClass::Ok, LineClass::Ok, LineClass::Ok, LineClass::Ok]
    );
}

#[test]
fn test_trailing_comments_stripped_before_parsing() {
    assert_eq!(
        classes("int x = 1; // the box\nint y = x; /* copy */"),
        vec![LineClass::Ok, LineClass::Ok]
    );
}

#[test]
fn test_block_comment_may_not_span_lines() {
    // The unclosed /* makes its own line incomplete
    let reports = classify_source("int x; /* spans\nacross */ int y;");
    assert_eq!(reports[0].class, LineClass::Incomplete);
}

#[test]
fn test_missing_semicolon_is_incomplete_not_invalid() {
    assert_eq!(classes("int x = 1 + 2"), vec![LineClass::Incomplete]);
    assert_eq!(classes("int x = (1 + 2;"), vec![LineClass::Invalid]);
}

#[test]
fn test_ub_vs_invalid_distinction() {
    // Dereferencing an empty pointer is UB, not a compile error
    assert_eq!(
        classes("int* p;\n*p = 5;"),
        vec![LineClass::Ok, LineClass::Ub]
    );
    // Dereferencing an int is a compile error
    assert_eq!(
        classes("int x = 1;\n*x = 5;"),
        vec![LineClass::Ok, LineClass::Invalid]
    );
}

#[test]
fn test_classification_never_reads_ahead() {
    let source = "int x;\nint* p;\np = &x;\n*p = 7;\nint y = x;";
    let full = classes(source);

    // Truncating after line i must not change any classification <= i
    let lines: Vec<&str> = source.lines().collect();
    for i in 0..lines.len() {
        let truncated = lines[..=i].join("\n");
        assert_eq!(classes(&truncated), full[..=i].to_vec(), "prefix {}", i);
    }
}

#[test]
fn test_keystroke_growth_of_one_line() {
    // Simulate typing "int x = 5;" character by character on one line;
    // the classification may only be Incomplete or Invalid until the
    // final ';' lands, then Ok
    let target = "int x = 5;";
    let mut classifier = Classifier::new();
    for end in 1..=target.len() {
        let partial = &target[..end];
        let reports = classifier.update(partial);
        assert_eq!(reports.len(), 1);
        if end == target.len() {
            assert_eq!(reports[0].class, LineClass::Ok);
        } else {
            assert_ne!(reports[0].class, LineClass::Ub);
        }
    }
}

#[test]
fn test_edit_invalidates_only_suffix() {
    let v1 = "int x;\nint* p;\np = &x;";
    let v2 = "int x;\nint* q;\np = &x;";

    let mut classifier = Classifier::new();
    let first = classifier.update(v1);
    assert_eq!(first.iter().map(|r| r.class).collect::<Vec<_>>(), vec![
        LineClass::Ok,
        LineClass::Ok,
        LineClass::Ok
    ]);

    // Renaming p to q on line 1 makes line 2 refer to an undeclared name
    let second = classifier.update(v2);
    assert_eq!(second[0].class, LineClass::Ok);
    assert_eq!(second[1].class, LineClass::Ok);
    assert_eq!(second[2].class, LineClass::Invalid);

    // The cached result stays equal to a from-scratch classification
    assert_eq!(second, classify_source(v2));
}

#[test]
fn test_messages_surface_for_faulting_line_only() {
    let reports = classify_source("int x;\nint x;\nint y;");
    assert!(reports[0].message.is_none());
    assert!(reports[1].message.is_some());
    assert!(reports[2].message.is_none());
}

#[test]
fn test_line_numbers_in_messages_are_one_based() {
    let reports = classify_source("int x;\nint x;");
    let message = reports[1].message.as_deref().unwrap();
    assert!(message.contains("line 2"), "{}", message);
}

#[test]
fn test_growing_buffer_appends_cheaply() {
    let mut classifier = Classifier::new();
    let mut buffer = String::new();
    for i in 0..10 {
        buffer.push_str(&format!("int v{};\n", i));
        let reports = classifier.update(&buffer);
        assert_eq!(reports.len(), i + 1);
        assert!(reports.iter().all(|r| r.class == LineClass::Ok));
    }
}
