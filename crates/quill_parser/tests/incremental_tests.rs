//! Incremental updates. Every update runs with aggressive checks, so a
//! successful update is also known to match a full parse of the new text.

mod common;

use common::{parse, parse_markup};
use quill_ast::SourceFile;
use quill_core::text::{TextChange, TextSpan};
use quill_parser::{parse_source_file, update_source_file, ParseOptions, UpdateError};

fn apply(file: SourceFile, new_text: &str) -> SourceFile {
    let change = TextChange::between(&file.text, new_text);
    let old_text = file.text.clone();
    update_source_file(file, new_text, change, true)
        .unwrap_or_else(|err| panic!("{old_text:?} -> {new_text:?}: {err}"))
}

/// Apply each text in turn to the tree of the previous one.
fn apply_all(initial: SourceFile, texts: &[&str]) -> SourceFile {
    texts.iter().fold(initial, |file, text| apply(file, text))
}

// ============================================================================
// Editing sessions
// ============================================================================

#[test]
fn test_typing_a_function_character_by_character() {
    let target = "function add(a: number, b: number): number {\n  return a + b;\n}\n";
    let prefix = "const before = 1;\n";
    let suffix = "\nconst after = [1, 2, 3];\n";
    let mut file = parse(&format!("{prefix}{suffix}"));
    for end in 1..=target.len() {
        let text = format!("{prefix}{}{suffix}", &target[..end]);
        file = apply(file, &text);
    }
    assert!(!file.has_parse_errors());
    assert_eq!(file.statements().len(), 3);
}

#[test]
fn test_deleting_text_backwards() {
    let full = "class Point {\n  x = 0;\n  y = 0;\n  norm() { return Math.hypot(this.x, this.y); }\n}\nlet p = new Point();\n";
    let mut file = parse(full);
    for end in (0..full.len()).rev().step_by(3) {
        file = apply(file, &full[..end]);
    }
}

#[test]
fn test_edits_that_change_statement_boundaries() {
    let file = parse("let a = b\n(c)\nlet d = 1;\n");
    apply_all(
        file,
        &[
            "let a = b;\n(c)\nlet d = 1;\n",
            "let a = b;\n(c\nlet d = 1;\n",
            "let a = b;\n/* (c\nlet d = 1;\n",
            "let a = b;\n/* (c */\nlet d = 1;\n",
            "let a = `b;\n/* (c */\nlet d = 1;\n",
            "let a = `b;\n/* (c */\nlet d = 1;\n`",
            "let a = b;\n",
        ],
    );
}

#[test]
fn test_edits_inside_nested_lists() {
    let file = parse(
        "enum E { A, B, C }\ninterface I { a: string; b(): void }\nswitch (x) { case 1: f(); break; default: g(); }\nfunction h(p, q = 1, ...r) {}\n",
    );
    apply_all(
        file,
        &[
            "enum E { A, B = 2, C }\ninterface I { a: string; b(): void }\nswitch (x) { case 1: f(); break; default: g(); }\nfunction h(p, q = 1, ...r) {}\n",
            "enum E { A, B = 2, C }\ninterface I { a: string; c: number; b(): void }\nswitch (x) { case 1: f(); break; default: g(); }\nfunction h(p, q = 1, ...r) {}\n",
            "enum E { A, B = 2, C }\ninterface I { a: string; c: number; b(): void }\nswitch (x) { case 1: f(); case 2: break; default: g(); }\nfunction h(p, q = 1, ...r) {}\n",
            "enum E { A, B = 2, C }\ninterface I { a: string; c: number; b(): void }\nswitch (x) { case 1: f(); case 2: break; default: g(); }\nfunction h(p, q = 2, ...r) {}\n",
        ],
    );
}

#[test]
fn test_class_member_edits() {
    let file = parse("class A {\n  a = 1;\n  constructor() {}\n  m() {}\n}\n");
    apply_all(
        file,
        &[
            "class A {\n  a = 12;\n  constructor() {}\n  m() {}\n}\n",
            "class A {\n  a = 12;\n  constructor(x) {}\n  m() {}\n}\n",
            "class A {\n  a = 12;\n  static constructor(x) {}\n  m() {}\n}\n",
            "class A {\n  a = 12;\n  m() {}\n}\n",
        ],
    );
}

#[test]
fn test_markup_edits() {
    let file = parse_markup("const v = <div className=\"a\">hello {name}</div>;\nconst w = 1;\n");
    apply_all(
        file,
        &[
            "const v = <div className=\"a\">hello, {name}</div>;\nconst w = 1;\n",
            "const v = <div className=\"a\">hello, {name}</span>;\nconst w = 1;\n",
            "const v = <div className=\"a\">hello, {name}</div>;\nconst w = 1;\n",
            "const v = <div className=\"a\">hello, {name}<br /></div>;\nconst w = 1;\n",
        ],
    );
}

// ============================================================================
// Reuse and bookkeeping
// ============================================================================

#[test]
fn test_distant_statements_are_reused() {
    let statements: String = (0..50).map(|i| format!("let v{i} = {i};\n")).collect();
    let file = parse(&statements);
    let edited = statements.replacen("let v25 = 25;", "let v25 = 2500;", 1);
    let updated = apply(file, &edited);
    let stats = updated.incremental_stats.expect("an incremental update");
    assert!(stats.reused_nodes >= 45, "{stats:?}");
    assert!(stats.reparsed_nodes > 0);
}

#[test]
fn test_unchanged_text_keeps_the_tree() {
    let file = parse("let x = 1;");
    let dump = file.dump();
    let updated = update_source_file(file, "let x = 1;", TextChange::unchanged(4), true).unwrap();
    assert_eq!(updated.dump(), dump);
    assert!(updated.incremental_stats.is_none());
}

#[test]
fn test_parents_are_rebuilt_when_requested() {
    let options = ParseOptions::default().with_parent_nodes(true);
    let file = parse_source_file("p.ts", "a();\nb();\n", &options);
    let updated = apply(file, "a();\nbc();\n");
    let parents = updated.parents.as_ref().expect("parents were requested");
    for &statement in updated.statements() {
        assert_eq!(parents.parent(statement), Some(updated.root));
    }
}

#[test]
fn test_repeated_edits_keep_the_arena_bounded() {
    let mut file = parse("let counter = 0;\n");
    for i in 0..200 {
        let text = format!("let counter = {i};\n");
        file = apply(file, &text);
    }
    assert!(file.arena.node_count() <= file.node_count * 3, "{} nodes for {}", file.arena.node_count(), file.node_count);
}

#[test]
fn test_mismatched_change_is_rejected() {
    let file = parse("let x = 1;");
    let change = TextChange::new(TextSpan::new(20, 1), 1);
    assert!(matches!(
        update_source_file(file, "let x = 1;", change, false),
        Err(UpdateError::ChangeOutOfBounds { .. })
    ));
}
