//! Helpers shared by the parser integration tests.
#![allow(dead_code)]

use quill_ast::{NodeData, NodeId, SourceFile, SyntaxKind};
use quill_parser::{parse_source_file, ParseOptions};

pub fn parse(text: &str) -> SourceFile {
    parse_source_file("test.ts", text, &ParseOptions::default())
}

pub fn parse_markup(text: &str) -> SourceFile {
    parse_source_file("test.tsx", text, &ParseOptions::for_file_name("test.tsx"))
}

pub fn statement_kinds(file: &SourceFile) -> Vec<SyntaxKind> {
    file.statements().iter().map(|&id| file.node(id).kind).collect()
}

/// The expression of the first statement, which must be an expression
/// statement.
pub fn first_expression(file: &SourceFile) -> NodeId {
    let statement = file.statements()[0];
    match file.node(statement).data {
        NodeData::Expr { expression } => expression,
        ref other => panic!("expected an expression statement, got {other:?}"),
    }
}

pub fn kind(file: &SourceFile, id: NodeId) -> SyntaxKind {
    file.node(id).kind
}

pub fn messages(file: &SourceFile) -> Vec<&str> {
    file.parse_diagnostics
        .iter()
        .map(|d| d.message_text.as_str())
        .collect()
}

pub fn assert_clean(file: &SourceFile) {
    assert!(
        file.parse_diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        messages(file)
    );
}
