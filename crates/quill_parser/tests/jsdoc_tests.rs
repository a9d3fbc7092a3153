//! Documentation comments and their type expressions.

use quill_ast::{NodeData, NodeId, SyntaxKind};
use quill_parser::{parse_isolated_jsdoc_comment, parse_jsdoc_type_expression_for_tests, JsDocParseResult};

fn comment(text: &str) -> JsDocParseResult {
    parse_isolated_jsdoc_comment(text, 0, text.len()).expect("a documentation comment")
}

fn tag_kinds(result: &JsDocParseResult) -> Vec<SyntaxKind> {
    result.tags().iter().map(|&t| result.node(t).kind).collect()
}

/// The type inside `{...}`.
fn type_of(text: &str) -> (JsDocParseResult, NodeId) {
    let result = parse_jsdoc_type_expression_for_tests(text, 0, text.len());
    assert!(result.diagnostics.is_empty(), "{text}: {:?}", result.diagnostics);
    assert_eq!(result.node(result.root).kind, SyntaxKind::JSDocTypeExpression);
    let NodeData::InnerType { type_node } = result.node(result.root).data else {
        panic!("expected a type expression");
    };
    (result, type_node)
}

fn type_kind(text: &str) -> SyntaxKind {
    let (result, type_node) = type_of(text);
    result.node(type_node).kind
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_tags_in_source_order() {
    let result = comment(
        "/**\n\
          * Adds things.\n\
          * @template T, U\n\
          * @param {number} a the first\n\
          * @param b {string}\n\
          * @param {boolean} [c = true] optional\n\
          * @deprecated\n\
          * @returns {T} the sum\n\
          */",
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.node(result.root).kind, SyntaxKind::JSDocComment);
    assert_eq!(
        tag_kinds(&result),
        vec![
            SyntaxKind::JSDocTemplateTag,
            SyntaxKind::JSDocParameterTag,
            SyntaxKind::JSDocParameterTag,
            SyntaxKind::JSDocParameterTag,
            SyntaxKind::JSDocTag,
            SyntaxKind::JSDocReturnTag,
        ]
    );

    let NodeData::JSDocTemplateTag { type_parameters, .. } = result.node(result.tags()[0]).data else {
        panic!("expected a template tag");
    };
    assert_eq!(result.list(type_parameters).len(), 2);
}

#[test]
fn test_param_tag_name_positions() {
    let result = comment("/**\n * @param {number} a\n * @param b {string}\n * @param {x} [c]\n */");
    let tags = result.tags();

    let NodeData::JSDocParameterTag {
        pre_parameter_name,
        post_parameter_name: Some(name),
        type_expression: Some(_),
        is_bracketed: false,
        ..
    } = result.node(tags[0]).data
    else {
        panic!("expected the type before the name");
    };
    assert!(pre_parameter_name.is_none());
    assert_eq!(result.text_of(name), Some("a"));

    let NodeData::JSDocParameterTag {
        pre_parameter_name: Some(name),
        type_expression: Some(_),
        ..
    } = result.node(tags[1]).data
    else {
        panic!("expected the name before the type");
    };
    assert_eq!(result.text_of(name), Some("b"));

    assert!(matches!(
        result.node(tags[2]).data,
        NodeData::JSDocParameterTag { is_bracketed: true, .. }
    ));
}

#[test]
fn test_comment_without_tags() {
    let result = comment("/** Just prose. */");
    assert!(result.tags().is_empty());
    assert!(matches!(
        result.node(result.root).data,
        NodeData::JSDocComment { tags: None }
    ));
}

#[test]
fn test_at_sign_mid_line_is_not_a_tag() {
    let result = comment("/** mail me at me@example.com */");
    assert!(result.tags().is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_comment_spans_requested_range() {
    let text = "let a;\n/** @type {string} */\nlet b;";
    let start = text.find("/**").unwrap();
    let length = text.find("*/").unwrap() + 2 - start;
    let result = parse_isolated_jsdoc_comment(text, start, length).expect("a documentation comment");
    let root = result.node(result.root);
    assert_eq!((root.pos() as usize, root.end() as usize), (start, start + length));
    assert_eq!(tag_kinds(&result), vec![SyntaxKind::JSDocTypeTag]);
}

#[test]
fn test_duplicate_return_tag_is_reported() {
    let result = comment("/**\n * @return {number}\n * @return {string}\n */");
    let messages: Vec<&str> = result.diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(messages, vec!["'return' tag already specified."]);
    assert_eq!(result.tags().len(), 2);
}

#[test]
fn test_non_documentation_ranges() {
    assert!(parse_isolated_jsdoc_comment("// @type {x}", 0, 12).is_none());
    assert!(parse_isolated_jsdoc_comment("/**/", 0, 4).is_none());
    let text = "/**\n * @type {x}\n */";
    assert!(parse_isolated_jsdoc_comment(text, 0, text.len()).is_some());
}

// ============================================================================
// Type expressions
// ============================================================================

#[test]
fn test_basic_and_postfix_types() {
    assert_eq!(type_kind("{*}"), SyntaxKind::JSDocAllType);
    assert_eq!(type_kind("{?}"), SyntaxKind::JSDocUnknownType);
    assert_eq!(type_kind("{string}"), SyntaxKind::StringKeyword);
    assert_eq!(type_kind("{Foo}"), SyntaxKind::JSDocTypeReference);
    assert_eq!(type_kind("{!Object}"), SyntaxKind::JSDocNonNullableType);
    assert_eq!(type_kind("{Object!}"), SyntaxKind::JSDocNonNullableType);
    assert_eq!(type_kind("{...number}"), SyntaxKind::JSDocVariadicType);
    assert_eq!(type_kind("{string[]}"), SyntaxKind::JSDocArrayType);
    assert_eq!(type_kind("{string=}"), SyntaxKind::JSDocOptionalType);
    assert_eq!(type_kind("{new:Foo}"), SyntaxKind::JSDocConstructorType);
    assert_eq!(type_kind("{this:Window}"), SyntaxKind::JSDocThisType);
}

#[test]
fn test_union_forms() {
    assert_eq!(type_kind("{string|number}"), SyntaxKind::JSDocUnionType);
    let (result, union) = type_of("{(string|number|?)}");
    let NodeData::TypeList { types } = result.node(union).data else {
        panic!("expected a union");
    };
    let kinds: Vec<SyntaxKind> = result.list(types).iter().map(|t| result.node(t).kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::StringKeyword, SyntaxKind::NumberKeyword, SyntaxKind::JSDocUnknownType]
    );
}

#[test]
fn test_generic_references() {
    for text in ["{Array.<string>}", "{Array<string>}", "{Object.<string, number>}"] {
        let (result, reference) = type_of(text);
        assert!(
            matches!(
                result.node(reference).data,
                NodeData::TypeReference {
                    type_arguments: Some(_),
                    ..
                }
            ),
            "{text}"
        );
    }
    let (result, reference) = type_of("{ns.sub.Name}");
    let NodeData::TypeReference { type_name, .. } = result.node(reference).data else {
        panic!("expected a reference");
    };
    assert_eq!(result.node(type_name).kind, SyntaxKind::QualifiedName);
}

#[test]
fn test_function_type_parameters() {
    let (result, function) = type_of("{function(string, number=): boolean}");
    let NodeData::JSDocFunctionType {
        parameters,
        type_node: Some(_),
    } = result.node(function).data
    else {
        panic!("expected a function type with a return type");
    };
    let kinds: Vec<SyntaxKind> = result.list(parameters).iter().map(|p| result.node(p).kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::StringKeyword, SyntaxKind::JSDocOptionalType]);
}

#[test]
fn test_record_and_tuple_types() {
    let (result, record) = type_of("{{a: number, b, 'c': string}}");
    let NodeData::Members { members } = result.node(record).data else {
        panic!("expected a record");
    };
    assert_eq!(result.list(members).len(), 3);
    assert_eq!(type_kind("{[string, number]}"), SyntaxKind::JSDocTupleType);
}

#[test]
fn test_empty_type_arguments_are_reported() {
    let text = "{Array.<>}";
    let result = parse_jsdoc_type_expression_for_tests(text, 0, text.len());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message_text, "Type argument list cannot be empty.");
}
