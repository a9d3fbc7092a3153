//! quill_diagnostics: diagnostic messages and the diagnostics sink.
//!
//! Every message the scanner and parser can report lives in [`messages`],
//! each with a stable numeric code. A realized [`Diagnostic`] carries the
//! formatted text plus the substitution arguments it was built from.

use quill_core::text::TextSpan;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A message template with a code and category. The template may contain
/// `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A realized diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The substitution arguments `message_text` was formatted with.
    pub args: Vec<String>,
}

impl Diagnostic {
    /// A diagnostic without location information.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn with_location(
        file: impl Into<String>,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.into()),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Start offset of the span, or 0 for global diagnostics.
    pub fn start(&self) -> u32 {
        self.span.map(|s| s.start).unwrap_or(0)
    }

    /// Build a `miette` report with the offending span labelled in `source`.
    pub fn to_report(&self, source: &str) -> miette::Report {
        let severity = match self.category {
            DiagnosticCategory::Error => miette::Severity::Error,
            DiagnosticCategory::Warning => miette::Severity::Warning,
            DiagnosticCategory::Suggestion | DiagnosticCategory::Message => {
                miette::Severity::Advice
            }
        };
        let mut diagnostic = miette::MietteDiagnostic::new(self.message_text.clone())
            .with_code(format!("TS{}", self.code))
            .with_severity(severity);
        if let Some(span) = self.span {
            let start = (span.start as usize).min(source.len());
            let length = (span.length as usize).min(source.len() - start);
            diagnostic = diagnostic.with_label(miette::LabeledSpan::at(start..start + length, "here"));
        }
        let name = self.file.clone().unwrap_or_default();
        miette::Report::new(diagnostic)
            .with_source_code(miette::NamedSource::new(name, source.to_string()))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} TS{}: {}", self.category, self.code, self.message_text)
    }
}

/// Replace `{0}`, `{1}`, ... in `template` with `args`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Diagnostics in arrival order.
///
/// The parser's sink: at most one diagnostic is kept per start position, and
/// the collection can be truncated back to an earlier length when a
/// speculative parse is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add `diagnostic` unless the most recent one starts at the same position.
    /// Returns whether it was added.
    pub fn add_deduplicated(&mut self, diagnostic: Diagnostic) -> bool {
        let start = diagnostic.start();
        match self.diagnostics.last() {
            Some(last) if last.start() == start => false,
            _ => {
                self.diagnostics.push(diagnostic);
                true
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic added after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

// ============================================================================
// Message catalogue
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Scanner
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, Error, "Digit expected.");
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1125, Error, "Hexadecimal digit expected.");
    pub const UNEXPECTED_END_OF_TEXT: DiagnosticMessage = diag!(1126, Error, "Unexpected end of text.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const MERGE_CONFLICT_MARKER_ENCOUNTERED: DiagnosticMessage = diag!(1185, Error, "Merge conflict marker encountered.");
    pub const BINARY_DIGIT_EXPECTED: DiagnosticMessage = diag!(1177, Error, "Binary digit expected.");
    pub const OCTAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1178, Error, "Octal digit expected.");
    pub const AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF_INCLUSIVE: DiagnosticMessage = diag!(1198, Error, "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.");
    pub const UNTERMINATED_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1199, Error, "Unterminated Unicode escape sequence.");
    pub const AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL: DiagnosticMessage = diag!(1351, Error, "An identifier or keyword cannot immediately follow a numeric literal.");

    // ========================================================================
    // Expected / unexpected tokens
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const TRAILING_COMMA_NOT_ALLOWED: DiagnosticMessage = diag!(1009, Error, "Trailing comma not allowed.");
    pub const AN_ELEMENT_ACCESS_EXPRESSION_SHOULD_TAKE_AN_ARGUMENT: DiagnosticMessage = diag!(1011, Error, "An element access expression should take an argument.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token.");
    pub const SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS: DiagnosticMessage = diag!(1034, Error, "'super' must be followed by an argument list or member access.");
    pub const UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED: DiagnosticMessage = diag!(1068, Error, "Unexpected token. A constructor, method, accessor, or property was expected.");
    pub const TYPE_PARAMETER_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1098, Error, "Type parameter list cannot be empty.");
    pub const TYPE_ARGUMENT_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1099, Error, "Type argument list cannot be empty.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1110, Error, "Type expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const STATEMENT_EXPECTED: DiagnosticMessage = diag!(1129, Error, "Statement expected.");
    pub const CASE_OR_DEFAULT_EXPECTED: DiagnosticMessage = diag!(1130, Error, "'case' or 'default' expected.");
    pub const PROPERTY_OR_SIGNATURE_EXPECTED: DiagnosticMessage = diag!(1131, Error, "Property or signature expected.");
    pub const ENUM_MEMBER_EXPECTED: DiagnosticMessage = diag!(1132, Error, "Enum member expected.");
    pub const VARIABLE_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1134, Error, "Variable declaration expected.");
    pub const ARGUMENT_EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1135, Error, "Argument expression expected.");
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1136, Error, "Property assignment expected.");
    pub const EXPRESSION_OR_COMMA_EXPECTED: DiagnosticMessage = diag!(1137, Error, "Expression or comma expected.");
    pub const PARAMETER_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1138, Error, "Parameter declaration expected.");
    pub const TYPE_PARAMETER_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1139, Error, "Type parameter declaration expected.");
    pub const TYPE_ARGUMENT_EXPECTED: DiagnosticMessage = diag!(1140, Error, "Type argument expected.");
    pub const PROPERTY_DESTRUCTURING_PATTERN_EXPECTED: DiagnosticMessage = diag!(1180, Error, "Property destructuring pattern expected.");
    pub const ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED: DiagnosticMessage = diag!(1181, Error, "Array element destructuring pattern expected.");
    pub const STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1141, Error, "String literal expected.");
    pub const LINE_BREAK_NOT_PERMITTED_HERE: DiagnosticMessage = diag!(1142, Error, "Line break not permitted here.");
    pub const OR_EXPECTED: DiagnosticMessage = diag!(1144, Error, "'{' or ';' expected.");
    pub const DECLARATION_EXPECTED: DiagnosticMessage = diag!(1146, Error, "Declaration expected.");
    pub const LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW: DiagnosticMessage = diag!(1200, Error, "Line terminator not permitted before arrow.");
    pub const IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE: DiagnosticMessage = diag!(1359, Error, "Identifier expected. '{0}' is a reserved word that cannot be used here.");
    pub const CATCH_OR_FINALLY_EXPECTED: DiagnosticMessage = diag!(1472, Error, "'catch' or 'finally' expected.");
    pub const _0_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1097, Error, "'{0}' list cannot be empty.");
    pub const IDENTIFIER_OR_STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1491, Error, "Identifier or string literal expected.");
    pub const AN_UNARY_EXPRESSION_WITH_THE_0_OPERATOR_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION: DiagnosticMessage = diag!(17006, Error, "An unary expression with the '{0}' operator is not allowed in the left-hand side of an exponentiation expression. Consider enclosing the expression in parentheses.");
    pub const A_TYPE_ASSERTION_EXPRESSION_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION: DiagnosticMessage = diag!(17007, Error, "A type assertion expression is not allowed in the left-hand side of an exponentiation expression. Consider enclosing the expression in parentheses.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1500, Error, "Maximum nesting depth exceeded.");

    // ========================================================================
    // Documentation comments
    // ========================================================================
    pub const _0_TAG_ALREADY_SPECIFIED: DiagnosticMessage = diag!(1223, Error, "'{0}' tag already specified.");

    // ========================================================================
    // Markup
    // ========================================================================
    pub const EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_0: DiagnosticMessage = diag!(17002, Error, "Expected corresponding closing tag for '{0}'.");
    pub const MARKUP_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG: DiagnosticMessage = diag!(17008, Error, "Markup element '{0}' has no corresponding closing tag.");
    pub const MARKUP_EXPRESSIONS_MUST_HAVE_ONE_PARENT_ELEMENT: DiagnosticMessage = diag!(2657, Error, "Markup expressions must have one parent element.");
    pub const MARKUP_EXPRESSIONS_MAY_NOT_USE_THE_COMMA_OPERATOR: DiagnosticMessage = diag!(18007, Error, "Markup expressions may not use the comma operator.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
        assert_eq!(format_message("{1} before {0}", &["a", "b"]), "b before a");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "test.ts",
            TextSpan::new(10, 5),
            &messages::_0_EXPECTED,
            &[")"],
        );
        assert_eq!(format!("{}", diag), "test.ts(10): error TS1005: ')' expected.");
        assert_eq!(diag.args, vec![")".to_string()]);
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]);
        assert!(diag.file.is_none());
        assert_eq!(diag.code, 1012);
        assert!(diag.is_error());
        assert_eq!(diag.start(), 0);
    }

    #[test]
    fn test_add_deduplicated_keeps_first_at_position() {
        let mut collection = DiagnosticCollection::new();
        let first = Diagnostic::with_location("a.ts", TextSpan::new(4, 1), &messages::_0_EXPECTED, &[")"]);
        let second = Diagnostic::with_location("a.ts", TextSpan::new(4, 0), &messages::EXPRESSION_EXPECTED, &[]);
        let third = Diagnostic::with_location("a.ts", TextSpan::new(6, 0), &messages::EXPRESSION_EXPECTED, &[]);
        assert!(collection.add_deduplicated(first));
        assert!(!collection.add_deduplicated(second));
        assert!(collection.add_deduplicated(third));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.diagnostics()[0].code, 1005);
    }

    #[test]
    fn test_truncate_rolls_back() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]));
        let mark = collection.len();
        collection.add(Diagnostic::new(&messages::TYPE_EXPECTED, &[]));
        collection.truncate(mark);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.error_count(), 1);
    }

    #[test]
    fn test_report_carries_code_and_message() {
        let diag = Diagnostic::with_location(
            "a.ts",
            TextSpan::new(4, 1),
            &messages::_0_EXPECTED,
            &[")"],
        );
        let report = diag.to_report("if (x { }");
        assert_eq!(report.to_string(), "')' expected.");
        let code = report.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("TS1005"));
    }
}
