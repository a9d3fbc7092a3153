//! Start-set predicates over token kinds.
//!
//! These only look at a single token. Checks that also depend on parser
//! context or on the following tokens live on the parser.

use quill_ast::syntax_kind::SyntaxKind;

/// Any word usable as a property name or after `.`, keywords included.
#[inline]
pub fn is_identifier_name(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
}

/// A property name that is not computed: a name, string or number.
pub fn is_literal_property_name(kind: SyntaxKind) -> bool {
    is_identifier_name(kind)
        || matches!(
            kind,
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
        )
}

pub fn is_property_name_start(kind: SyntaxKind) -> bool {
    is_literal_property_name(kind)
        || matches!(kind, SyntaxKind::OpenBracketToken | SyntaxKind::PrivateIdentifier)
}

#[inline]
pub fn is_case_label_start(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword)
}

#[inline]
pub fn is_binding_pattern_start(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken)
}

/// Tokens that begin a left-hand-side expression regardless of context.
/// Identifiers and `import` are decided by the parser.
pub fn is_left_hand_side_expression_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::Identifier
    )
}

/// Tokens that begin an expression regardless of context.
pub fn is_expression_start(kind: SyntaxKind) -> bool {
    is_left_hand_side_expression_start(kind)
        || matches!(
            kind,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::DeleteKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::AwaitKeyword
                | SyntaxKind::YieldKeyword
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::AtToken
        )
}

/// Tokens that begin a type regardless of context. `function`, `-` and `(`
/// need a closer look and are handled by the parser.
pub fn is_type_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::UniqueKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::AsteriskToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DotDotDotToken
            | SyntaxKind::InferKeyword
            | SyntaxKind::AssertsKeyword
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::Identifier
    )
}

/// Keyword types that parse to a bare keyword node.
pub fn is_keyword_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::ObjectKeyword
    )
}

/// Statement keywords and punctuation that always begin a statement.
/// Declarations led by contextual keywords are decided by the parser.
pub fn is_statement_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AtToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword
    )
}

/// Words that may lead a declaration, modifiers included. A cheap filter in
/// front of the full declaration lookahead.
pub fn is_declaration_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::GlobalKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::AtToken
    )
}

/// Tokens that may begin a parameter, ignoring identifier-ness of words.
pub fn is_parameter_start(kind: SyntaxKind) -> bool {
    is_binding_pattern_start(kind)
        || kind.is_modifier_kind()
        || matches!(
            kind,
            SyntaxKind::DotDotDotToken | SyntaxKind::AtToken | SyntaxKind::ThisKeyword
        )
}

/// Node kinds that are valid targets on the left of an assignment or as the
/// callee of a call chain.
pub fn is_left_hand_side_expression_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PropertyAccessExpression
            | SyntaxKind::ElementAccessExpression
            | SyntaxKind::NewExpression
            | SyntaxKind::CallExpression
            | SyntaxKind::JsxElement
            | SyntaxKind::JsxSelfClosingElement
            | SyntaxKind::JsxFragment
            | SyntaxKind::TaggedTemplateExpression
            | SyntaxKind::ArrayLiteralExpression
            | SyntaxKind::ParenthesizedExpression
            | SyntaxKind::ObjectLiteralExpression
            | SyntaxKind::ClassExpression
            | SyntaxKind::FunctionExpression
            | SyntaxKind::Identifier
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateExpression
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::NonNullExpression
            | SyntaxKind::ExpressionWithTypeArguments
            | SyntaxKind::MetaProperty
            | SyntaxKind::MissingDeclaration
    )
}

pub fn is_heritage_clause_keyword(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_start() {
        assert!(is_property_name_start(SyntaxKind::Identifier));
        assert!(is_property_name_start(SyntaxKind::DefaultKeyword));
        assert!(is_property_name_start(SyntaxKind::StringLiteral));
        assert!(is_property_name_start(SyntaxKind::OpenBracketToken));
        assert!(!is_property_name_start(SyntaxKind::OpenParenToken));
    }

    #[test]
    fn test_expression_and_type_start() {
        assert!(is_expression_start(SyntaxKind::TemplateHead));
        assert!(is_expression_start(SyntaxKind::AwaitKeyword));
        assert!(!is_expression_start(SyntaxKind::CloseParenToken));
        assert!(is_type_start(SyntaxKind::InferKeyword));
        assert!(!is_type_start(SyntaxKind::EqualsToken));
    }

    #[test]
    fn test_statement_and_declaration_start() {
        assert!(is_statement_start(SyntaxKind::SemicolonToken));
        assert!(!is_statement_start(SyntaxKind::InterfaceKeyword));
        assert!(is_declaration_start(SyntaxKind::InterfaceKeyword));
        assert!(is_declaration_start(SyntaxKind::StaticKeyword));
        assert!(!is_declaration_start(SyntaxKind::Identifier));
        assert!(is_case_label_start(SyntaxKind::DefaultKeyword));
    }

    #[test]
    fn test_left_hand_side_kinds() {
        assert!(is_left_hand_side_expression_kind(SyntaxKind::CallExpression));
        assert!(is_left_hand_side_expression_kind(SyntaxKind::Identifier));
        assert!(!is_left_hand_side_expression_kind(SyntaxKind::BinaryExpression));
        assert!(!is_left_hand_side_expression_kind(SyntaxKind::ArrowFunction));
    }
}
