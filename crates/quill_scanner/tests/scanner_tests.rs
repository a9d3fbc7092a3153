//! Scanner integration tests.
//!
//! Token streams for whole snippets, in both language variants.

use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{LanguageVariant, TokenFlags};
use quill_diagnostics::messages;
use quill_scanner::{is_identifier_text, skip_trivia, Scanner};

/// Scan every token of `source` as `(kind, value)` pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new(source, LanguageVariant::Standard);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_and_trivia_only() {
    assert!(scan_all("").is_empty());
    assert!(scan_all("  \n\t // comment\n /* block */ ").is_empty());
}

#[test]
fn test_variable_statement() {
    assert_eq!(
        scan_kinds("const x: number = 42;"),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::ColonToken,
            SyntaxKind::NumberKeyword,
            SyntaxKind::EqualsToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_arrow_and_optional_chain() {
    assert_eq!(
        scan_kinds("(a?.b ?? c) => a?.[0]"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::CloseBracketToken,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        scan_kinds("a?.5:1"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_greater_than_is_scanned_alone() {
    // The parser recombines `>` runs on demand.
    assert_eq!(
        scan_kinds("a >> b >= c"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::EqualsToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(
        scan_kinds("a **= b ||= c &&= d ??= e <<= f"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::AsteriskAsteriskEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::BarBarEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::AmpersandAmpersandEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanLessThanEqualsToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_contextual_keywords_scan_as_keywords() {
    // Whether they act as identifiers is the parser's decision.
    assert_eq!(
        scan_kinds("type of as satisfies"),
        vec![
            SyntaxKind::TypeKeyword,
            SyntaxKind::OfKeyword,
            SyntaxKind::AsKeyword,
            SyntaxKind::SatisfiesKeyword,
        ]
    );
}

#[test]
fn test_string_values_are_cooked() {
    let tokens = scan_all(r#"'a\nb' "q\"q" '\0'"#);
    assert_eq!(tokens[0], (SyntaxKind::StringLiteral, "a\nb".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::StringLiteral, "q\"q".to_string()));
    assert_eq!(tokens[2], (SyntaxKind::StringLiteral, "\0".to_string()));
}

#[test]
fn test_token_positions_and_line_breaks() {
    let mut scanner = Scanner::new("a\n  /* c */ b", LanguageVariant::Standard);
    scanner.scan();
    assert_eq!((scanner.full_start(), scanner.token_start(), scanner.token_end()), (0, 0, 1));
    scanner.scan();
    assert_eq!(scanner.full_start(), 1);
    assert_eq!(scanner.token_start(), 12);
    assert_eq!(scanner.token_text(), "b");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_crlf_counts_as_one_line_break() {
    let mut scanner = Scanner::new("a\r\nb", LanguageVariant::Standard);
    scanner.scan();
    scanner.scan();
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.token_start(), 3);
}

#[test]
fn test_unterminated_template_sets_flag() {
    let mut scanner = Scanner::new("`abc", LanguageVariant::Standard);
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
    let errors = scanner.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message.code, messages::UNTERMINATED_TEMPLATE_LITERAL.code);
}

#[test]
fn test_scanning_a_range() {
    let text = "ignored /** @type {x} */ ignored";
    let mut scanner = Scanner::with_range(text, LanguageVariant::Standard, 11, 10);
    assert_eq!(scanner.scan(), SyntaxKind::AtToken);
    assert_eq!(scanner.scan(), SyntaxKind::TypeKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::OpenBraceToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_reset_to_rescans_from_offset() {
    let mut scanner = Scanner::new("let a = b;", LanguageVariant::Standard);
    scanner.scan();
    scanner.scan();
    scanner.reset_to(7);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "b");
    assert_eq!(scanner.full_start(), 7);
}

#[test]
fn test_markup_text_keeps_punctuation() {
    let mut scanner = Scanner::new("<p>a + b; c</p>", LanguageVariant::Jsx);
    assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::JsxText);
    assert_eq!(scanner.token_value(), "a + b; c");
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::LessThanSlashToken);
}

#[test]
fn test_free_helpers() {
    assert!(is_identifier_text("_private$1"));
    assert!(is_identifier_text("café"));
    assert!(!is_identifier_text("1abc"));
    assert!(!is_identifier_text(""));
    assert!(!is_identifier_text("a-b"));
    assert_eq!(skip_trivia("  // c\n  x", 0), 9);
    assert_eq!(skip_trivia("x", 0), 0);
}
