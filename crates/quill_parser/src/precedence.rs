//! Operator precedence and associativity.

use quill_ast::syntax_kind::SyntaxKind;

/// Binary operator precedence levels, lowest first. `Comma` is never
/// returned for an operator; it is the floor a full expression starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma,
    NullishCoalescing,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponentiation,
}

impl OperatorPrecedence {
    /// Starting point of a binary expression parse.
    pub const LOWEST: OperatorPrecedence = OperatorPrecedence::Comma;
}

/// Precedence of `kind` as a binary operator in expressions, or `None` when it
/// is not one. `as` and `satisfies` take a type on the right but bind like
/// the relational operators.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> Option<OperatorPrecedence> {
    let precedence = match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword
        | SyntaxKind::SatisfiesKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => return None,
    };
    Some(precedence)
}

/// Exponentiation and every assignment operator group to the right.
pub fn is_right_associative(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::AsteriskAsteriskToken || kind.is_assignment_operator()
}

/// Prefix operators applied to a unary operand. `++` and `--` are not
/// listed: they form update expressions over a left-hand side.
pub fn is_unary_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::AwaitKeyword
    )
}

/// Precedence tiers of the binary type operators. Unions bind looser than
/// intersections; `is` never appears here because predicates are parsed
/// directly in return-type position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeOperatorPrecedence {
    Union,
    Intersection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let add = get_binary_operator_precedence(SyntaxKind::PlusToken);
        let mul = get_binary_operator_precedence(SyntaxKind::AsteriskToken);
        assert!(add < mul);
        assert!(
            get_binary_operator_precedence(SyntaxKind::BarBarToken)
                < get_binary_operator_precedence(SyntaxKind::AmpersandAmpersandToken)
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::AsKeyword),
            Some(OperatorPrecedence::Relational)
        );
        assert_eq!(get_binary_operator_precedence(SyntaxKind::IsKeyword), None);
        assert_eq!(get_binary_operator_precedence(SyntaxKind::EqualsToken), None);
    }

    #[test]
    fn test_lowest_is_below_every_operator() {
        for kind in [
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::BarBarToken,
            SyntaxKind::InKeyword,
            SyntaxKind::AsteriskAsteriskToken,
        ] {
            let precedence = get_binary_operator_precedence(kind).unwrap();
            assert!(precedence > OperatorPrecedence::LOWEST, "{kind:?}");
        }
        assert_eq!(get_binary_operator_precedence(SyntaxKind::CommaToken), None);
    }

    #[test]
    fn test_associativity() {
        assert!(is_right_associative(SyntaxKind::AsteriskAsteriskToken));
        assert!(is_right_associative(SyntaxKind::EqualsToken));
        assert!(is_right_associative(SyntaxKind::QuestionQuestionEqualsToken));
        assert!(!is_right_associative(SyntaxKind::MinusToken));
    }

    #[test]
    fn test_unary_operators() {
        assert!(is_unary_operator(SyntaxKind::TypeOfKeyword));
        assert!(is_unary_operator(SyntaxKind::ExclamationToken));
        assert!(!is_unary_operator(SyntaxKind::PlusPlusToken));
        assert!(!is_unary_operator(SyntaxKind::LessThanToken));
    }

    #[test]
    fn test_type_operator_tiers() {
        assert!(TypeOperatorPrecedence::Union < TypeOperatorPrecedence::Intersection);
    }
}
