//! Type annotation and type declaration parsing.

mod common;

use common::{assert_clean, kind, messages, parse};
use quill_ast::{NodeData, NodeId, SourceFile, SyntaxKind};

/// Parse `type T = <source>;` and return the aliased type node.
fn alias(source: &str) -> (SourceFile, NodeId) {
    let file = parse(&format!("type T = {source};"));
    let NodeData::TypeAlias { type_node, .. } = file.node(file.statements()[0]).data else {
        panic!("expected a type alias");
    };
    (file, type_node)
}

fn clean_alias(source: &str) -> (SourceFile, NodeId) {
    let (file, type_node) = alias(source);
    assert_clean(&file);
    (file, type_node)
}

fn type_list_kinds(file: &SourceFile, id: NodeId) -> Vec<SyntaxKind> {
    let NodeData::TypeList { types } = file.node(id).data else {
        panic!("expected a type list, got {:?}", kind(file, id));
    };
    file.list(types).iter().map(|t| kind(file, t)).collect()
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_intersection_binds_tighter_than_union() {
    let (file, ty) = clean_alias("A & B | C & D");
    assert_eq!(kind(&file, ty), SyntaxKind::UnionType);
    assert_eq!(
        type_list_kinds(&file, ty),
        vec![SyntaxKind::IntersectionType, SyntaxKind::IntersectionType]
    );
}

#[test]
fn test_type_operators_wrap_postfix_types() {
    let (file, ty) = clean_alias("keyof A[]");
    let NodeData::TypeOperator { operator, type_node } = file.node(ty).data else {
        panic!("expected a type operator");
    };
    assert_eq!(operator, SyntaxKind::KeyOfKeyword);
    assert_eq!(kind(&file, type_node), SyntaxKind::ArrayType);

    let (file, ty) = clean_alias("readonly string[][]");
    let NodeData::TypeOperator { type_node, .. } = file.node(ty).data else {
        panic!("expected a type operator");
    };
    let NodeData::ArrayType { element_type } = file.node(type_node).data else {
        panic!("expected an array type");
    };
    assert_eq!(kind(&file, element_type), SyntaxKind::ArrayType);
}

#[test]
fn test_indexed_access_and_array_suffixes() {
    let (file, ty) = clean_alias("T['a'][number][]");
    assert_eq!(kind(&file, ty), SyntaxKind::ArrayType);
    let NodeData::ArrayType { element_type } = file.node(ty).data else {
        unreachable!()
    };
    assert_eq!(kind(&file, element_type), SyntaxKind::IndexedAccessType);
}

#[test]
fn test_conditional_types_nest_in_false_branch() {
    let (file, ty) = clean_alias("T extends string ? 's' : T extends number ? 'n' : never");
    let NodeData::ConditionalType { false_type, .. } = file.node(ty).data else {
        panic!("expected a conditional type");
    };
    assert_eq!(kind(&file, false_type), SyntaxKind::ConditionalType);
}

#[test]
fn test_infer_with_constraint() {
    let (file, ty) = clean_alias("T extends [infer H extends string, ...infer R] ? H : never");
    let NodeData::ConditionalType { extends_type, .. } = file.node(ty).data else {
        panic!("expected a conditional type");
    };
    let NodeData::TypeList { types } = file.node(extends_type).data else {
        panic!("expected a tuple");
    };
    let head = file.list(types).elements[0];
    let NodeData::InferType { type_parameter } = file.node(head).data else {
        panic!("expected an infer type");
    };
    assert!(matches!(
        file.node(type_parameter).data,
        NodeData::TypeParameter { constraint: Some(_), .. }
    ));
}

// ============================================================================
// Primary types
// ============================================================================

#[test]
fn test_tuple_members() {
    let (file, ty) = clean_alias("[string, number?, ...boolean[]]");
    assert_eq!(
        type_list_kinds(&file, ty),
        vec![SyntaxKind::StringKeyword, SyntaxKind::OptionalType, SyntaxKind::RestType]
    );

    let (file, ty) = clean_alias("[first: string, second?: number, ...rest: any[]]");
    assert_eq!(type_list_kinds(&file, ty), vec![SyntaxKind::NamedTupleMember; 3]);
}

#[test]
fn test_optional_postfix_only_inside_tuples() {
    let (file, _) = alias("string?");
    assert!(!file.parse_diagnostics.is_empty());
}

#[test]
fn test_mapped_type_modifiers() {
    let (file, ty) = clean_alias("{ -readonly [K in keyof T as `get${K}`]-?: T[K] }");
    let NodeData::MappedType {
        readonly_token: Some(readonly_token),
        name_type: Some(_),
        question_token: Some(question_token),
        type_node: Some(_),
        ..
    } = file.node(ty).data
    else {
        panic!("expected a fully modified mapped type");
    };
    assert_eq!(kind(&file, readonly_token), SyntaxKind::MinusToken);
    assert_eq!(kind(&file, question_token), SyntaxKind::MinusToken);
}

#[test]
fn test_type_literal_members() {
    let (file, ty) = clean_alias(
        "{ a: string; b?: number, c(): void; new (): T; (x: number): string; [k: string]: unknown; get d(): number; set d(v: number); readonly e: 1 }",
    );
    let NodeData::Members { members } = file.node(ty).data else {
        panic!("expected a type literal");
    };
    let kinds: Vec<SyntaxKind> = file.list(members).iter().map(|m| kind(&file, m)).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertySignature,
            SyntaxKind::PropertySignature,
            SyntaxKind::MethodSignature,
            SyntaxKind::ConstructSignature,
            SyntaxKind::CallSignature,
            SyntaxKind::IndexSignature,
            SyntaxKind::GetAccessor,
            SyntaxKind::SetAccessor,
            SyntaxKind::PropertySignature,
        ]
    );
}

#[test]
fn test_literal_and_template_types() {
    let (file, ty) = clean_alias("'a' | 1 | -2 | true | null | 10n");
    assert_eq!(
        type_list_kinds(&file, ty),
        vec![SyntaxKind::LiteralType; 6]
    );

    let (file, ty) = clean_alias("`${A}-${B}!`");
    let NodeData::Template { template_spans, .. } = file.node(ty).data else {
        panic!("expected a template literal type");
    };
    assert_eq!(file.list(template_spans).len(), 2);
}

#[test]
fn test_keyword_followed_by_dot_is_a_reference() {
    let (file, ty) = clean_alias("string.Foo");
    assert_eq!(kind(&file, ty), SyntaxKind::TypeReference);
}

#[test]
fn test_nested_type_arguments_split_shift_tokens() {
    let (file, ty) = clean_alias("Map<string, Array<Set<number>>>");
    let NodeData::TypeReference {
        type_arguments: Some(arguments),
        ..
    } = file.node(ty).data
    else {
        panic!("expected a generic reference");
    };
    assert_eq!(file.list(arguments).len(), 2);
}

#[test]
fn test_empty_type_argument_list_is_reported() {
    let (file, _) = alias("Foo<>");
    assert!(messages(&file).contains(&"Type argument list cannot be empty."));
}

// ============================================================================
// Signatures
// ============================================================================

#[test]
fn test_function_and_constructor_types() {
    let (file, ty) = clean_alias("<T>(a: T, ...rest: T[]) => T");
    assert_eq!(kind(&file, ty), SyntaxKind::FunctionType);
    let (file, ty) = clean_alias("abstract new () => object");
    assert_eq!(kind(&file, ty), SyntaxKind::ConstructorType);
    let (file, ty) = clean_alias("(() => void) | string");
    assert_eq!(
        type_list_kinds(&file, ty),
        vec![SyntaxKind::ParenthesizedType, SyntaxKind::StringKeyword]
    );
}

#[test]
fn test_type_predicates() {
    let file = parse(
        "function isString(x: unknown): x is string { return true; }\n\
         function check(x: unknown): asserts x is number {}\n\
         function assert(x: unknown): asserts x {}\n\
         class A { isB(): this is B { return false; } }",
    );
    assert_clean(&file);
    let return_type = |index: usize| match file.node(file.statements()[index]).data {
        NodeData::Function {
            type_annotation: Some(ty),
            ..
        } => ty,
        ref other => panic!("{other:?}"),
    };
    assert_eq!(kind(&file, return_type(0)), SyntaxKind::TypePredicate);
    let NodeData::TypePredicate {
        asserts_modifier,
        type_node,
        ..
    } = file.node(return_type(2)).data
    else {
        panic!("expected a predicate");
    };
    assert!(asserts_modifier.is_some());
    assert!(type_node.is_none());
    assert!(matches!(
        file.node(return_type(1)).data,
        NodeData::TypePredicate {
            asserts_modifier: Some(_),
            type_node: Some(_),
            ..
        }
    ));
}

#[test]
fn test_type_parameters_with_constraints_and_defaults() {
    let file = parse("function f<T extends object = {}, const U = T>(t: T, u: U) {}");
    assert_clean(&file);
    let NodeData::Function {
        type_parameters: Some(parameters),
        ..
    } = file.node(file.statements()[0]).data
    else {
        panic!("expected type parameters");
    };
    let first = file.list(parameters).elements[0];
    assert!(matches!(
        file.node(first).data,
        NodeData::TypeParameter {
            constraint: Some(_),
            default: Some(_),
            ..
        }
    ));
}

#[test]
fn test_typeof_query_with_type_arguments() {
    let (file, ty) = clean_alias("typeof a.b.c<string>");
    let NodeData::TypeQuery {
        expr_name,
        type_arguments,
    } = file.node(ty).data
    else {
        panic!("expected a type query");
    };
    assert_eq!(kind(&file, expr_name), SyntaxKind::QualifiedName);
    assert!(type_arguments.is_some());
}
