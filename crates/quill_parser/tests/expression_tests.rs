//! Expression parsing: precedence, arrow functions, member chains and
//! literals.

mod common;

use common::{assert_clean, first_expression, kind, parse, statement_kinds};
use quill_ast::{NodeData, NodeFlags, SyntaxKind};

/// `(left, operator, right)` of a binary expression.
fn binary_parts(
    file: &quill_ast::SourceFile,
    id: quill_ast::NodeId,
) -> (quill_ast::NodeId, SyntaxKind, quill_ast::NodeId) {
    match file.node(id).data {
        NodeData::Binary {
            left,
            operator_token,
            right,
        } => (left, file.node(operator_token).kind, right),
        ref other => panic!("expected a binary expression, got {other:?}"),
    }
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let file = parse("a + b * c;");
    assert_clean(&file);
    let (left, operator, right) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::PlusToken);
    assert_eq!(kind(&file, left), SyntaxKind::Identifier);
    let (_, inner, _) = binary_parts(&file, right);
    assert_eq!(inner, SyntaxKind::AsteriskToken);
}

#[test]
fn test_subtraction_groups_left() {
    let file = parse("a - b - c;");
    let (left, operator, right) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::MinusToken);
    assert_eq!(kind(&file, left), SyntaxKind::BinaryExpression);
    assert_eq!(kind(&file, right), SyntaxKind::Identifier);
}

#[test]
fn test_exponentiation_groups_right() {
    let file = parse("a ** b ** c;");
    let (left, operator, right) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::AsteriskAsteriskToken);
    assert_eq!(kind(&file, left), SyntaxKind::Identifier);
    assert_eq!(kind(&file, right), SyntaxKind::BinaryExpression);
}

#[test]
fn test_assignment_groups_right() {
    let file = parse("x = y += z;");
    let (_, operator, right) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::EqualsToken);
    let (_, inner, _) = binary_parts(&file, right);
    assert_eq!(inner, SyntaxKind::PlusEqualsToken);
}

#[test]
fn test_nullish_and_logical_operators() {
    let file = parse("a ?? b || c && d;");
    assert_clean(&file);
    let (_, operator, _) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::QuestionQuestionToken);
}

#[test]
fn test_shift_operators_from_split_greater_than() {
    let file = parse("a >>> b >> c >= d;");
    assert_clean(&file);
    let (left, operator, _) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::GreaterThanEqualsToken);
    let (inner_left, inner, _) = binary_parts(&file, left);
    assert_eq!(inner, SyntaxKind::GreaterThanGreaterThanToken);
    let (_, innermost, _) = binary_parts(&file, inner_left);
    assert_eq!(innermost, SyntaxKind::GreaterThanGreaterThanGreaterThanToken);
}

#[test]
fn test_nested_conditional() {
    let file = parse("a ? b : c ? d : e;");
    assert_clean(&file);
    let id = first_expression(&file);
    match file.node(id).data {
        NodeData::Conditional { when_false, .. } => {
            assert_eq!(kind(&file, when_false), SyntaxKind::ConditionalExpression)
        }
        ref other => panic!("{other:?}"),
    }
}

#[test]
fn test_comma_expression_in_parentheses() {
    let file = parse("(a, b);");
    assert_clean(&file);
    let id = first_expression(&file);
    assert_eq!(kind(&file, id), SyntaxKind::ParenthesizedExpression);
    match file.node(id).data {
        NodeData::Expr { expression } => {
            let (_, operator, _) = binary_parts(&file, expression);
            assert_eq!(operator, SyntaxKind::CommaToken);
        }
        ref other => panic!("{other:?}"),
    }
}

#[test]
fn test_as_and_satisfies() {
    let file = parse("x as T satisfies U;");
    assert_clean(&file);
    let id = first_expression(&file);
    assert_eq!(kind(&file, id), SyntaxKind::SatisfiesExpression);
    match file.node(id).data {
        NodeData::ExpressionWithType { expression, .. } => {
            assert_eq!(kind(&file, expression), SyntaxKind::AsExpression)
        }
        ref other => panic!("{other:?}"),
    }
}

#[test]
fn test_unary_left_of_exponentiation_is_reported() {
    let file = parse("-x ** 2;");
    assert_eq!(file.parse_diagnostics.len(), 1);
    assert_eq!(file.parse_diagnostics[0].code, 17006);
    assert_eq!(file.parse_diagnostics[0].args, vec!["-".to_string()]);
}

// ============================================================================
// Arrow functions
// ============================================================================

#[test]
fn test_arrow_function_forms() {
    for source in [
        "(a, b) => a + b;",
        "x => x;",
        "async x => x;",
        "async (x: number): Promise<void> => {};",
        "(): void => {};",
        "<T>(x: T) => x;",
        "({ a }, [b]) => a;",
        "(...rest) => rest;",
        "(a = 1, b?) => a;",
    ] {
        let file = parse(source);
        assert_clean(&file);
        assert_eq!(kind(&file, first_expression(&file)), SyntaxKind::ArrowFunction, "{source}");
    }
}

#[test]
fn test_arrow_body_object_literal_needs_parentheses() {
    let file = parse("f = () => ({ a: 1 });");
    assert_clean(&file);
    let (_, _, right) = binary_parts(&file, first_expression(&file));
    match file.node(right).data {
        NodeData::ArrowFunction { body, .. } => {
            assert_eq!(kind(&file, body), SyntaxKind::ParenthesizedExpression)
        }
        ref other => panic!("{other:?}"),
    }
}

#[test]
fn test_parenthesized_expression_is_not_an_arrow() {
    let file = parse("(a + b) * c;");
    assert_clean(&file);
    let (left, _, _) = binary_parts(&file, first_expression(&file));
    assert_eq!(kind(&file, left), SyntaxKind::ParenthesizedExpression);
}

#[test]
fn test_conditional_with_parenthesized_branch() {
    let file = parse("a ? (b) : c;");
    assert_clean(&file);
    assert_eq!(
        kind(&file, first_expression(&file)),
        SyntaxKind::ConditionalExpression
    );
}

// ============================================================================
// Member and call chains
// ============================================================================

#[test]
fn test_generic_call_versus_comparison() {
    let file = parse("f<T>(x);\na < b > c;");
    assert_clean(&file);
    let call = first_expression(&file);
    assert_eq!(kind(&file, call), SyntaxKind::CallExpression);
    match file.node(call).data {
        NodeData::Call { type_arguments, .. } => assert!(type_arguments.is_some()),
        ref other => panic!("{other:?}"),
    }
    let second = file.statements()[1];
    match file.node(second).data {
        NodeData::Expr { expression } => {
            assert_eq!(kind(&file, expression), SyntaxKind::BinaryExpression)
        }
        ref other => panic!("{other:?}"),
    }
}

#[test]
fn test_optional_chain_flags() {
    let file = parse("a?.b.c;");
    assert_clean(&file);
    let outer = first_expression(&file);
    assert_eq!(kind(&file, outer), SyntaxKind::PropertyAccessExpression);
    assert!(file.node(outer).flags.contains(NodeFlags::OPTIONAL_CHAIN));
}

#[test]
fn test_non_null_and_element_access() {
    let file = parse("a!.b[0]!;");
    assert_clean(&file);
    let outer = first_expression(&file);
    assert_eq!(kind(&file, outer), SyntaxKind::NonNullExpression);
}

#[test]
fn test_new_with_and_without_arguments() {
    let file = parse("new Foo;\nnew Foo<T>(1, 2);\nnew a.b.C();");
    assert_clean(&file);
    let mut arguments = Vec::new();
    for &statement in file.statements() {
        let NodeData::Expr { expression } = file.node(statement).data else {
            panic!("expected an expression statement");
        };
        assert_eq!(kind(&file, expression), SyntaxKind::NewExpression);
        let NodeData::Call { arguments: args, .. } = file.node(expression).data else {
            panic!("expected call data");
        };
        arguments.push(args.map(|list| file.list(list).len()));
    }
    assert_eq!(arguments, vec![None, Some(2), Some(0)]);
}

#[test]
fn test_new_target() {
    let file = parse("function f() { return new.target; }");
    assert_clean(&file);
    assert!(file.find_innermost(22, SyntaxKind::MetaProperty).is_some());
}

#[test]
fn test_tagged_template_and_template_expression() {
    let file = parse("tag`a${b}c${d}e`;\n`x${y}`;");
    assert_clean(&file);
    assert_eq!(
        kind(&file, first_expression(&file)),
        SyntaxKind::TaggedTemplateExpression
    );
}

#[test]
fn test_import_call_and_super() {
    let file = parse("import('./mod');\nclass A extends B { m() { super.m(); } }");
    assert_clean(&file);
    assert_eq!(kind(&file, first_expression(&file)), SyntaxKind::CallExpression);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_regular_expression_after_operator() {
    let file = parse("x = /ab+c/g;");
    assert_clean(&file);
    let (_, _, right) = binary_parts(&file, first_expression(&file));
    assert_eq!(kind(&file, right), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(file.text_of(right), Some("/ab+c/g"));
}

#[test]
fn test_division_after_identifier() {
    let file = parse("a / b / c;");
    assert_clean(&file);
    let (_, operator, _) = binary_parts(&file, first_expression(&file));
    assert_eq!(operator, SyntaxKind::SlashToken);
}

#[test]
fn test_object_literal_members() {
    let file = parse("x = { a, b: 1, [c]: 2, m() {}, get g() { return 1; }, set g(v) {}, ...d, 'q': 3 };");
    assert_clean(&file);
    let (_, _, right) = binary_parts(&file, first_expression(&file));
    let NodeData::ObjectLiteral { properties, .. } = file.node(right).data else {
        panic!("expected an object literal");
    };
    let kinds: Vec<SyntaxKind> = file.list(properties).iter().map(|id| kind(&file, id)).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ShorthandPropertyAssignment,
            SyntaxKind::PropertyAssignment,
            SyntaxKind::PropertyAssignment,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::GetAccessor,
            SyntaxKind::SetAccessor,
            SyntaxKind::SpreadAssignment,
            SyntaxKind::PropertyAssignment,
        ]
    );
}

#[test]
fn test_array_literal_holes() {
    let file = parse("[1, , 2, ...rest];");
    assert_clean(&file);
    let NodeData::ArrayLiteral { elements, .. } = file.node(first_expression(&file)).data else {
        panic!("expected an array literal");
    };
    let kinds: Vec<SyntaxKind> = file.list(elements).iter().map(|id| kind(&file, id)).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::OmittedExpression,
            SyntaxKind::NumericLiteral,
            SyntaxKind::SpreadElement,
        ]
    );
}

#[test]
fn test_array_spread_elements() {
    use SyntaxKind::{ArrayLiteralExpression, NumericLiteral, SpreadElement};
    let cases = [
        ("[...rest];", vec![SpreadElement]),
        ("[...a, ...b.c(), 1];", vec![SpreadElement, SpreadElement, NumericLiteral]),
        ("[[...inner], ...outer];", vec![ArrayLiteralExpression, SpreadElement]),
    ];
    for (text, expected) in cases {
        let file = parse(text);
        assert_clean(&file);
        let NodeData::ArrayLiteral { elements, .. } = file.node(first_expression(&file)).data else {
            panic!("expected an array literal for {text:?}");
        };
        let kinds: Vec<SyntaxKind> = file.list(elements).iter().map(|id| kind(&file, id)).collect();
        assert_eq!(kinds, expected, "{text:?}");
    }

    let file = parse("let a = [...b, 1];");
    assert_clean(&file);
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::VariableStatement]);
}

#[test]
fn test_class_and_function_expressions() {
    let file = parse("x = class Foo {};\ny = function* gen() { yield 1; };");
    assert_clean(&file);
    assert_eq!(
        statement_kinds(&file),
        vec![SyntaxKind::ExpressionStatement, SyntaxKind::ExpressionStatement]
    );
    let (_, _, right) = binary_parts(&file, first_expression(&file));
    assert_eq!(kind(&file, right), SyntaxKind::ClassExpression);
}

#[test]
fn test_type_assertion_only_in_standard_variant() {
    let file = parse("<number>x;");
    assert_clean(&file);
    assert_eq!(
        kind(&file, first_expression(&file)),
        SyntaxKind::TypeAssertionExpression
    );
}
