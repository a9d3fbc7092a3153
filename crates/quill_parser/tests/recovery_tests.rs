//! Malformed input: the parser always finishes, covers the whole text and
//! explains what went wrong.

mod common;

use common::{messages, parse, statement_kinds};
use quill_ast::{for_each_descendant, Child, NodeData, SyntaxKind};
use quill_parser::{parse_source_file, ParseOptions};

const BROKEN_INPUTS: &[&str] = &[
    ")))",
    "}}}{{{",
    "class {",
    "function (",
    "if (",
    "x.",
    "a ? b",
    "for (;;",
    "<<<>>>",
    "@@@",
    "`${",
    "`${a}${",
    "/* open",
    "'unterminated\nnext",
    "import {",
    "export { a as",
    "enum {",
    "switch (x) { foo }",
    "let [a, , ...] = ",
    "type T = { [K in",
    "interface I { a: ; b }",
    "x = <T>(",
    "async () => {",
    "new new new",
    "a => => b",
    "obj = { get, set x() }",
    "class A { constructor( }",
    "do while",
    "try {}",
    "label: label2: ",
    "\u{feff}\u{2028}\\u0041",
];

#[test]
fn test_broken_inputs_cover_the_whole_text() {
    for &text in BROKEN_INPUTS {
        let file = parse(text);
        let root = file.node(file.root);
        assert_eq!(root.pos(), 0, "{text:?}");
        assert_eq!(root.end() as usize, text.len(), "{text:?}");
        let eof = file.end_of_file_token().expect("an end-of-file token");
        assert_eq!(file.node(eof).end() as usize, text.len(), "{text:?}");
    }
}

#[test]
fn test_children_stay_inside_parents() {
    for &text in BROKEN_INPUTS {
        let file = parse(text);
        let mut violations = Vec::new();
        for_each_descendant(&file.arena, file.root, |parent, node| {
            let outer = node.range;
            node.data.for_each_child(|child| {
                if let Child::Node(child) = child {
                    let inner = file.node(child).range;
                    if inner.pos < outer.pos || inner.end > outer.end {
                        violations.push((parent, child));
                    }
                }
            });
        });
        assert!(violations.is_empty(), "{text:?}: {violations:?}");
    }
}

#[test]
fn test_missing_close_paren() {
    let file = parse("if (x {}");
    assert_eq!(messages(&file), vec!["')' expected."]);
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::IfStatement]);
}

#[test]
fn test_missing_initializer_becomes_placeholder() {
    let file = parse("let x = ;");
    assert_eq!(messages(&file), vec!["Expression expected."]);
    let mut missing = 0;
    for_each_descendant(&file.arena, file.root, |_, node| {
        if node.is_missing() {
            missing += 1;
        }
    });
    assert_eq!(missing, 1);
}

#[test]
fn test_stray_close_brace_is_skipped() {
    let file = parse("a;\n}\nb;");
    assert_eq!(messages(&file), vec!["Declaration or statement expected."]);
    assert_eq!(
        statement_kinds(&file),
        vec![SyntaxKind::ExpressionStatement, SyntaxKind::ExpressionStatement]
    );
}

#[test]
fn test_one_diagnostic_per_position() {
    for &text in BROKEN_INPUTS {
        let file = parse(text);
        for pair in file.parse_diagnostics.windows(2) {
            assert_ne!(pair[0].span, pair[1].span, "{text:?}: {:?}", messages(&file));
        }
    }
}

#[test]
fn test_unclosed_block_recovers_following_statements() {
    let file = parse("function f() {\n  let a = 1;\n\nclass C {}");
    assert!(file.has_parse_errors());
    let NodeData::Function { body: Some(body), .. } = file.node(file.statements()[0]).data else {
        panic!("expected a function with a body");
    };
    // The class is absorbed into the unclosed body rather than lost.
    let NodeData::Block { statements, .. } = file.node(body).data else {
        panic!("expected a block");
    };
    let kinds: Vec<SyntaxKind> = file.list(statements).iter().map(|s| file.node(s).kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::VariableStatement, SyntaxKind::ClassDeclaration]);
}

// ============================================================================
// Nesting depth
// ============================================================================

fn nested_parens(depth: usize) -> String {
    format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_within_limit_is_clean() {
    let options = ParseOptions::default().with_max_nesting_depth(64);
    let file = parse_source_file("deep.ts", &nested_parens(10), &options);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
}

#[test]
fn test_nesting_beyond_limit_is_reported() {
    let options = ParseOptions::default().with_max_nesting_depth(64);
    let text = nested_parens(200);
    let file = parse_source_file("deep.ts", &text, &options);
    let messages: Vec<&str> = file
        .parse_diagnostics
        .iter()
        .map(|d| d.message_text.as_str())
        .collect();
    assert!(messages.contains(&"Maximum nesting depth exceeded."), "{messages:?}");
    assert_eq!(file.node(file.root).end() as usize, text.len());
}

#[test]
fn test_deeply_nested_blocks_terminate() {
    let options = ParseOptions::default().with_max_nesting_depth(64);
    let text = format!("{}{}", "{".repeat(500), "}".repeat(500));
    let file = parse_source_file("blocks.ts", &text, &options);
    assert!(file.has_parse_errors());
    assert_eq!(file.node(file.root).end() as usize, text.len());
}

#[test]
fn test_deeply_nested_markup_terminates() {
    let options = ParseOptions::for_file_name("deep.tsx").with_max_nesting_depth(64);
    for text in ["<a>".repeat(300), format!("x = {};", "<a>".repeat(300)), "<a>{".repeat(100)] {
        let file = parse_source_file("deep.tsx", &text, &options);
        assert!(file.has_parse_errors());
        assert!(messages(&file).contains(&"Maximum nesting depth exceeded."), "{:?}", messages(&file));
        assert_eq!(file.node(file.root).end() as usize, text.len());
    }
}
