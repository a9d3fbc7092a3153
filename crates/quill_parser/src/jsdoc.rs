//! Documentation comments: `/** ... */` blocks, their tags, and the
//! `{...}` type expressions inside them.
//!
//! Comment bodies are read with the documentation scanner, which returns
//! whitespace and line breaks as tokens. Type expressions and `@param`
//! defaults switch to ordinary scanning and switch back at their end.

use crate::options::ParseOptions;
use crate::parser::{Parser, ParsingContext, SignatureFlags};
use quill_ast::arena::SyntaxArena;
use quill_ast::dump_tree;
use quill_ast::node::{ListId, Node, NodeData, NodeId, NodeList};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{LanguageVariant, NodeFlags};
use quill_core::intern::StringInterner;
use quill_diagnostics::{messages, Diagnostic};
use quill_scanner::Scanner;
use tracing::{debug, instrument};

const FILE_NAME: &str = "file.js";

/// A documentation comment or type expression parsed on its own.
#[derive(Debug)]
pub struct JsDocParseResult {
    pub arena: SyntaxArena,
    pub interner: StringInterner,
    /// A `JSDocComment` or `JSDocTypeExpression` node.
    pub root: NodeId,
    pub diagnostics: Vec<Diagnostic>,
}

impl JsDocParseResult {
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    pub fn list(&self, id: ListId) -> &NodeList {
        self.arena.list(id)
    }

    /// Tags of a comment, in source order. Empty for a type expression.
    pub fn tags(&self) -> &[NodeId] {
        match self.node(self.root).data {
            NodeData::JSDocComment { tags } => self.arena.list_elements(tags),
            _ => &[],
        }
    }

    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        match self.node(id).data {
            NodeData::Identifier { text, .. } | NodeData::Literal { text, .. } => Some(self.interner.resolve(text)),
            _ => None,
        }
    }

    pub fn dump(&self) -> String {
        dump_tree(&self.arena, &self.interner, self.root)
    }
}

/// Parse the `/** ... */` block at `text[start..start + length]`.
///
/// Returns `None` when the range does not hold a documentation comment:
/// it must open with exactly `/**` and be long enough for `*/`.
#[instrument(skip_all, fields(start = start, length = length))]
pub fn parse_isolated_jsdoc_comment(text: &str, start: usize, length: usize) -> Option<JsDocParseResult> {
    let end = start.saturating_add(length).min(text.len());
    let bytes = text.as_bytes();
    let is_doc_comment = end.saturating_sub(start) >= 5
        && bytes.get(start..start + 3) == Some(b"/**".as_slice())
        && bytes.get(start + 3) != Some(&b'*');
    if !is_doc_comment {
        debug!("range is not a documentation comment");
        return None;
    }

    // The body, without the leading `/**` and the trailing `*/`.
    let scanner = Scanner::with_range(text, LanguageVariant::Standard, start + 3, end - start - 5);
    let mut parser = Parser::with_parts(
        FILE_NAME,
        scanner,
        &ParseOptions::default(),
        SyntaxArena::new(),
        StringInterner::new(),
    );
    let root = parser.parse_jsdoc_comment_worker(start as u32, end as u32);
    let (arena, interner, diagnostics) = parser.into_parts();
    Some(JsDocParseResult {
        arena,
        interner,
        root,
        diagnostics,
    })
}

/// Parse a `{...}` documentation type expression at
/// `text[start..start + length]`.
#[instrument(skip_all, fields(start = start, length = length))]
pub fn parse_jsdoc_type_expression_for_tests(text: &str, start: usize, length: usize) -> JsDocParseResult {
    let scanner = Scanner::with_range(text, LanguageVariant::Standard, start, length);
    let mut parser = Parser::with_parts(
        FILE_NAME,
        scanner,
        &ParseOptions::default(),
        SyntaxArena::new(),
        StringInterner::new(),
    );
    parser.next_token();
    let root = parser.parse_jsdoc_type_expression();
    let (arena, interner, diagnostics) = parser.into_parts();
    JsDocParseResult {
        arena,
        interner,
        root,
        diagnostics,
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Type expressions
    // ========================================================================

    /// `{ type }`, scanned with ordinary tokens.
    pub(crate) fn parse_jsdoc_type_expression(&mut self) -> NodeId {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let type_node = self.parse_jsdoc_top_level_type();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::JSDocTypeExpression,
            pos,
            NodeData::InnerType { type_node },
        )
    }

    /// A type with an unparenthesized union and a trailing `=` allowed.
    fn parse_jsdoc_top_level_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut type_node = self.parse_jsdoc_type();
        if self.token() == SyntaxKind::BarToken {
            let types = self.parse_jsdoc_type_list(type_node);
            type_node = self.finish_node(SyntaxKind::JSDocUnionType, pos, NodeData::TypeList { types });
        }
        if self.parse_optional(SyntaxKind::EqualsToken) {
            type_node = self.finish_node(
                SyntaxKind::JSDocOptionalType,
                pos,
                NodeData::InnerType { type_node },
            );
        }
        type_node
    }

    fn parse_jsdoc_type(&mut self) -> NodeId {
        self.with_depth_guard(Self::parse_jsdoc_type_worker)
    }

    /// A basic type followed by any number of `[]`, `?` and `!` suffixes.
    fn parse_jsdoc_type_worker(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut type_node = self.parse_jsdoc_basic_type();
        loop {
            type_node = match self.token() {
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    self.finish_node(
                        SyntaxKind::JSDocArrayType,
                        pos,
                        NodeData::ArrayType {
                            element_type: type_node,
                        },
                    )
                }
                SyntaxKind::QuestionToken => {
                    self.next_token();
                    self.finish_node(SyntaxKind::JSDocNullableType, pos, NodeData::InnerType { type_node })
                }
                SyntaxKind::ExclamationToken => {
                    self.next_token();
                    self.finish_node(SyntaxKind::JSDocNonNullableType, pos, NodeData::InnerType { type_node })
                }
                _ => return type_node,
            };
        }
    }

    fn parse_jsdoc_basic_type(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::AsteriskToken => {
                let pos = self.node_pos();
                self.next_token();
                self.finish_node(SyntaxKind::JSDocAllType, pos, NodeData::Token {})
            }
            SyntaxKind::QuestionToken => self.parse_jsdoc_unknown_or_nullable_type(),
            SyntaxKind::OpenParenToken => self.parse_jsdoc_union_type(),
            SyntaxKind::OpenBracketToken => self.parse_jsdoc_tuple_type(),
            SyntaxKind::ExclamationToken => self.parse_jsdoc_prefix_type(SyntaxKind::JSDocNonNullableType),
            SyntaxKind::DotDotDotToken => self.parse_jsdoc_prefix_type(SyntaxKind::JSDocVariadicType),
            SyntaxKind::OpenBraceToken => self.parse_jsdoc_record_type(),
            SyntaxKind::FunctionKeyword => self.parse_jsdoc_function_type(),
            SyntaxKind::NewKeyword => self.parse_jsdoc_annotated_type(SyntaxKind::JSDocConstructorType),
            SyntaxKind::ThisKeyword => self.parse_jsdoc_annotated_type(SyntaxKind::JSDocThisType),
            SyntaxKind::AnyKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::UndefinedKeyword => self.parse_token_node(),
            _ => self.parse_jsdoc_type_reference(),
        }
    }

    /// `?` alone is the unknown type; `?T` is nullable.
    fn parse_jsdoc_unknown_or_nullable_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        if matches!(
            self.token(),
            SyntaxKind::CommaToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::BarToken
        ) {
            return self.finish_node(SyntaxKind::JSDocUnknownType, pos, NodeData::Token {});
        }
        let type_node = self.parse_jsdoc_type();
        self.finish_node(SyntaxKind::JSDocNullableType, pos, NodeData::InnerType { type_node })
    }

    /// `!T` and `...T`.
    fn parse_jsdoc_prefix_type(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let type_node = self.parse_jsdoc_type();
        self.finish_node(kind, pos, NodeData::InnerType { type_node })
    }

    /// `new: T` and `this: T`.
    fn parse_jsdoc_annotated_type(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::ColonToken);
        let type_node = self.parse_jsdoc_type();
        self.finish_node(kind, pos, NodeData::InnerType { type_node })
    }

    /// `(A|B|C)`.
    fn parse_jsdoc_union_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let first = self.parse_jsdoc_type();
        let types = self.parse_jsdoc_type_list(first);
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(SyntaxKind::JSDocUnionType, pos, NodeData::TypeList { types })
    }

    fn parse_jsdoc_type_list(&mut self, first: NodeId) -> ListId {
        let list_pos = self.node(first).pos();
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_jsdoc_type());
        }
        self.create_list(types, list_pos)
    }

    /// `[A, B]`.
    fn parse_jsdoc_tuple_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let types = self.parse_delimited_list(ParsingContext::JSDocTupleTypes, Self::parse_jsdoc_type, false);
        self.check_for_trailing_comma(types);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(SyntaxKind::JSDocTupleType, pos, NodeData::TypeList { types })
    }

    /// `{a: T, b}`.
    fn parse_jsdoc_record_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let members = self.parse_delimited_list(
            ParsingContext::JSDocRecordMembers,
            Self::parse_jsdoc_record_member,
            false,
        );
        self.check_for_trailing_comma(members);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(SyntaxKind::JSDocRecordType, pos, NodeData::Members { members })
    }

    fn parse_jsdoc_record_member(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_simple_property_name();
        let type_node = self
            .parse_optional(SyntaxKind::ColonToken)
            .then(|| self.parse_jsdoc_type());
        self.finish_node(
            SyntaxKind::JSDocRecordMember,
            pos,
            NodeData::JSDocRecordMember { name, type_node },
        )
    }

    /// `function(A, B=): R`.
    fn parse_jsdoc_function_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let parameters = match self.parse_parameters_worker(SignatureFlags::JSDOC, true) {
            Some(parameters) => parameters,
            None => self.create_missing_list(),
        };
        self.check_for_trailing_comma(parameters);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let type_node = self
            .parse_optional(SyntaxKind::ColonToken)
            .then(|| self.parse_jsdoc_type());
        self.finish_node(
            SyntaxKind::JSDocFunctionType,
            pos,
            NodeData::JSDocFunctionType { parameters, type_node },
        )
    }

    /// A parameter of a documentation function type: a type, optional when
    /// followed by `=`.
    pub(crate) fn parse_jsdoc_parameter(&mut self) -> NodeId {
        let pos = self.node_pos();
        let type_node = self.parse_jsdoc_type();
        if self.parse_optional(SyntaxKind::EqualsToken) {
            return self.finish_node(SyntaxKind::JSDocOptionalType, pos, NodeData::InnerType { type_node });
        }
        type_node
    }

    /// `Name`, `A.B`, `Array<T>` and `Array.<T>`.
    fn parse_jsdoc_type_reference(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut type_name = self.parse_simple_property_name();
        let mut type_arguments = None;
        if self.token() == SyntaxKind::LessThanToken {
            type_arguments = Some(self.parse_jsdoc_type_arguments());
        } else {
            while self.parse_optional(SyntaxKind::DotToken) {
                if self.token() == SyntaxKind::LessThanToken {
                    type_arguments = Some(self.parse_jsdoc_type_arguments());
                    break;
                }
                let right = self.parse_identifier_name();
                type_name = self.finish_node(
                    SyntaxKind::QualifiedName,
                    pos,
                    NodeData::QualifiedName {
                        left: type_name,
                        right,
                    },
                );
            }
        }
        self.finish_node(
            SyntaxKind::JSDocTypeReference,
            pos,
            NodeData::TypeReference {
                type_name,
                type_arguments,
            },
        )
    }

    fn parse_jsdoc_type_arguments(&mut self) -> ListId {
        let less_than_pos = self.token_pos();
        self.next_token();
        let type_arguments =
            self.parse_delimited_list(ParsingContext::JSDocTypeArguments, Self::parse_jsdoc_type, false);
        self.check_for_trailing_comma(type_arguments);
        if self.diagnostic_count() == 0 && self.arena.list(type_arguments).is_empty() {
            let end = self.token_end();
            self.parse_error_at_range(less_than_pos, end, &messages::TYPE_ARGUMENT_LIST_CANNOT_BE_EMPTY, &[]);
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        type_arguments
    }

    fn parse_simple_property_name(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal_node(),
            _ => self.parse_identifier_name(),
        }
    }

    /// Only the first error is interesting, so a trailing comma is reported
    /// only on an otherwise clean parse.
    fn check_for_trailing_comma(&mut self, list: ListId) {
        let list = self.arena.list(list);
        if self.diagnostic_count() == 0 && list.has_trailing_comma {
            let start = list.range.end.saturating_sub(1);
            self.parse_error_at_position(start, 1, &messages::TRAILING_COMMA_NOT_ALLOWED, &[]);
        }
    }

    // ========================================================================
    // Comments and tags
    // ========================================================================

    /// Walk the comment body, parsing a tag at each `@` that starts a line
    /// (after the optional leading `*`).
    fn parse_jsdoc_comment_worker(&mut self, start: u32, end: u32) -> NodeId {
        let mut tags: Vec<NodeId> = Vec::new();
        let mut can_parse_tag = true;
        let mut seen_asterisk = true;
        self.next_jsdoc_token();
        while self.token() != SyntaxKind::EndOfFileToken {
            match self.token() {
                SyntaxKind::AtToken => {
                    if can_parse_tag {
                        if let Some(tag) = self.parse_jsdoc_tag(&tags) {
                            tags.push(tag);
                        }
                        // A tag leaves us at the start of the next token.
                        seen_asterisk = false;
                        continue;
                    }
                    seen_asterisk = false;
                }
                SyntaxKind::NewLineTrivia => {
                    can_parse_tag = true;
                    seen_asterisk = false;
                }
                SyntaxKind::AsteriskToken => {
                    if seen_asterisk {
                        can_parse_tag = false;
                    }
                    seen_asterisk = true;
                }
                SyntaxKind::WhitespaceTrivia => {}
                _ => can_parse_tag = false,
            }
            self.next_jsdoc_token();
        }

        let tags = match (tags.first(), tags.last()) {
            (Some(&first), Some(&last)) => {
                let (list_pos, list_end) = (self.node(first).pos(), self.node(last).end());
                Some(self.create_list_at(tags, list_pos, list_end))
            }
            _ => None,
        };
        self.finish_node_at(
            SyntaxKind::JSDocComment,
            start,
            end,
            NodeFlags::NONE,
            NodeData::JSDocComment { tags },
        )
    }

    fn parse_jsdoc_tag(&mut self, previous_tags: &[NodeId]) -> Option<NodeId> {
        let at_pos = self.token_pos();
        let at_end = self.token_end();
        let at_token = self.finish_node_at(SyntaxKind::AtToken, at_pos, at_end, NodeFlags::NONE, NodeData::Token {});
        self.next_jsdoc_token();
        let tag_name = self.parse_jsdoc_identifier_name()?;
        let name = self.node_text(tag_name).to_string();
        match name.as_str() {
            "param" => self.parse_jsdoc_param_tag(at_token, tag_name),
            "return" | "returns" => {
                Some(self.parse_jsdoc_typed_tag(at_token, tag_name, SyntaxKind::JSDocReturnTag, previous_tags))
            }
            "type" => Some(self.parse_jsdoc_typed_tag(at_token, tag_name, SyntaxKind::JSDocTypeTag, previous_tags)),
            "template" => self.parse_jsdoc_template_tag(at_token, tag_name, previous_tags),
            _ => {
                let pos = self.node(at_token).pos();
                Some(self.finish_node(SyntaxKind::JSDocTag, pos, NodeData::JSDocTag { at_token, tag_name }))
            }
        }
    }

    /// `@param {T} name`, `@param name {T}`, `@param {T} [name]` and
    /// `@param {T} [name = default]`.
    fn parse_jsdoc_param_tag(&mut self, at_token: NodeId, tag_name: NodeId) -> Option<NodeId> {
        let pos = self.node(at_token).pos();
        let mut type_expression = self.try_parse_jsdoc_type_expression();
        self.skip_jsdoc_whitespace();

        let mut is_bracketed = false;
        let name = if self.token() == SyntaxKind::OpenBracketToken {
            is_bracketed = true;
            self.next_jsdoc_token();
            let name = self.parse_jsdoc_identifier_name();
            self.skip_jsdoc_whitespace();
            if self.token() == SyntaxKind::EqualsToken {
                self.parse_jsdoc_parameter_default();
            }
            self.skip_jsdoc_whitespace();
            if self.token() == SyntaxKind::CloseBracketToken {
                self.next_jsdoc_token();
            } else {
                self.parse_error_at_current_token(&messages::_0_EXPECTED, &["]"]);
            }
            name
        } else {
            self.parse_jsdoc_identifier_name()
        };
        let name = name?;

        let (pre_parameter_name, post_parameter_name) = if type_expression.is_some() {
            (None, Some(name))
        } else {
            type_expression = self.try_parse_jsdoc_type_expression();
            (Some(name), None)
        };
        Some(self.finish_node(
            SyntaxKind::JSDocParameterTag,
            pos,
            NodeData::JSDocParameterTag {
                at_token,
                tag_name,
                pre_parameter_name,
                type_expression,
                post_parameter_name,
                is_bracketed,
            },
        ))
    }

    /// The default after `[name =`, parsed as an expression and dropped.
    fn parse_jsdoc_parameter_default(&mut self) {
        let equals_end = self.token_end();
        self.scanner.reset_to(equals_end as usize);
        self.next_token();
        self.parse_assignment_expression_or_higher();
        let resume = self.node_pos();
        self.scanner.reset_to(resume as usize);
        self.next_jsdoc_token();
    }

    /// `@return {T}`, `@returns {T}` and `@type {T}`. Each may appear once.
    fn parse_jsdoc_typed_tag(
        &mut self,
        at_token: NodeId,
        tag_name: NodeId,
        kind: SyntaxKind,
        previous_tags: &[NodeId],
    ) -> NodeId {
        self.report_duplicate_jsdoc_tag(tag_name, kind, previous_tags);
        let pos = self.node(at_token).pos();
        let type_expression = self.try_parse_jsdoc_type_expression();
        self.finish_node(
            kind,
            pos,
            NodeData::JSDocTypedTag {
                at_token,
                tag_name,
                type_expression,
            },
        )
    }

    /// `@template T, U`.
    fn parse_jsdoc_template_tag(
        &mut self,
        at_token: NodeId,
        tag_name: NodeId,
        previous_tags: &[NodeId],
    ) -> Option<NodeId> {
        self.report_duplicate_jsdoc_tag(tag_name, SyntaxKind::JSDocTemplateTag, previous_tags);
        let list_pos = self.node_pos();
        let mut type_parameters = Vec::new();
        loop {
            self.skip_jsdoc_whitespace();
            let name_pos = self.token_pos();
            let name = self.parse_jsdoc_identifier_name()?;
            type_parameters.push(self.finish_node(
                SyntaxKind::TypeParameter,
                name_pos,
                NodeData::TypeParameter {
                    name,
                    constraint: None,
                    default: None,
                },
            ));
            self.skip_jsdoc_whitespace();
            if self.token() != SyntaxKind::CommaToken {
                break;
            }
            self.next_jsdoc_token();
        }
        let type_parameters = self.create_list(type_parameters, list_pos);
        let pos = self.node(at_token).pos();
        Some(self.finish_node(
            SyntaxKind::JSDocTemplateTag,
            pos,
            NodeData::JSDocTemplateTag {
                at_token,
                tag_name,
                type_parameters,
            },
        ))
    }

    fn report_duplicate_jsdoc_tag(&mut self, tag_name: NodeId, kind: SyntaxKind, previous_tags: &[NodeId]) {
        if previous_tags.iter().any(|&tag| self.kind_of(tag) == kind) {
            let start = self.node(tag_name).pos();
            let end = self.token_pos();
            let text = self.node_text(tag_name).to_string();
            self.parse_error_at_range(start, end, &messages::_0_TAG_ALREADY_SPECIFIED, &[&text]);
        }
    }

    /// A `{...}` type after optional whitespace, leaving the documentation
    /// scanner positioned after the closing `}`.
    fn try_parse_jsdoc_type_expression(&mut self) -> Option<NodeId> {
        self.skip_jsdoc_whitespace();
        if self.token() != SyntaxKind::OpenBraceToken {
            return None;
        }
        let start = self.token_pos();
        self.scanner.reset_to(start as usize);
        self.next_token();
        let type_expression = self.parse_jsdoc_type_expression();
        let resume = self.node(type_expression).end();
        self.scanner.reset_to(resume as usize);
        self.next_jsdoc_token();
        Some(type_expression)
    }

    fn parse_jsdoc_identifier_name(&mut self) -> Option<NodeId> {
        if !self.token().is_identifier_or_keyword() {
            self.parse_error_at_current_token(&messages::IDENTIFIER_EXPECTED, &[]);
            return None;
        }
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.interner.intern(self.scanner.token_value());
        self.next_jsdoc_token();
        Some(self.finish_node_at(
            SyntaxKind::Identifier,
            pos,
            end,
            NodeFlags::NONE,
            NodeData::Identifier {
                text,
                original_keyword: None,
            },
        ))
    }

    fn skip_jsdoc_whitespace(&mut self) {
        while matches!(
            self.token(),
            SyntaxKind::WhitespaceTrivia | SyntaxKind::NewLineTrivia
        ) {
            self.next_jsdoc_token();
        }
    }

    fn next_jsdoc_token(&mut self) -> SyntaxKind {
        self.rescan(Scanner::scan_jsdoc_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_expression(text: &str) -> JsDocParseResult {
        parse_jsdoc_type_expression_for_tests(text, 0, text.len())
    }

    fn inner_kind(result: &JsDocParseResult) -> SyntaxKind {
        match result.node(result.root).data {
            NodeData::InnerType { type_node } => result.node(type_node).kind,
            _ => panic!("expected a type expression"),
        }
    }

    #[test]
    fn test_unknown_versus_nullable() {
        assert_eq!(inner_kind(&type_expression("{?}")), SyntaxKind::JSDocUnknownType);
        assert_eq!(inner_kind(&type_expression("{?number}")), SyntaxKind::JSDocNullableType);
        assert_eq!(inner_kind(&type_expression("{number?}")), SyntaxKind::JSDocNullableType);
    }

    #[test]
    fn test_trailing_comma_reported() {
        let result = type_expression("{[a, b,]}");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message_text, "Trailing comma not allowed.");
    }

    #[test]
    fn test_non_doc_comment_is_rejected() {
        assert!(parse_isolated_jsdoc_comment("/* @type {x} */", 0, 15).is_none());
        assert!(parse_isolated_jsdoc_comment("/*** @type {x} */", 0, 17).is_none());
    }
}
