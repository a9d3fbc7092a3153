//! Markup elements, fragments and their children.
//!
//! Markup switches the scanner between ordinary tokens (tag names,
//! attributes, embedded expressions) and text mode (children). Every place
//! that ends a tag or an embedded expression in child position rescans in
//! text mode instead of calling [`Parser::next_token`], so text such as
//! `don't` is never lexed as a string.

use crate::parser::{Parser, ParsingContext};
use quill_ast::node::{ListId, NodeData, NodeId};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{NodeFlags, ScriptKind};
use quill_diagnostics::messages;
use quill_scanner::Scanner;

/// What a list of children is closed by.
#[derive(Debug, Clone, Copy)]
enum OpeningTag {
    Element { tag_name: NodeId },
    Fragment { pos: u32, end: u32 },
}

impl<'a> Parser<'a> {
    /// An element, self-closing element or fragment starting at `<`.
    ///
    /// In expression position, elements written next to each other are
    /// reported and joined with a synthesized comma so the caller still gets
    /// one expression.
    pub(crate) fn parse_jsx_element_or_self_closing_element_or_fragment(
        &mut self,
        in_expression_context: bool,
    ) -> NodeId {
        self.with_depth_guard(|p| p.parse_jsx_element_worker(in_expression_context, None, None))
    }

    fn parse_jsx_element_worker(
        &mut self,
        in_expression_context: bool,
        top_invalid_node_pos: Option<u32>,
        enclosing_tag: Option<OpeningTag>,
    ) -> NodeId {
        let pos = self.node_pos();
        let opening = self.parse_jsx_opening_or_self_closing_element_or_opening_fragment(in_expression_context);
        let result = match self.kind_of(opening) {
            SyntaxKind::JsxOpeningElement => {
                let tag_name = self.jsx_tag_name(opening);
                let children = self.parse_jsx_children(OpeningTag::Element { tag_name });
                let closing_element = match self.take_closing_tag_from_last_child(children, tag_name) {
                    Some(closing_element) => closing_element,
                    None => self.parse_jsx_closing_element(tag_name, in_expression_context),
                };
                let closing_tag_name = self.jsx_tag_name(closing_element);
                if !self.tag_names_are_equivalent(tag_name, closing_tag_name) {
                    let closes_enclosing = matches!(
                        enclosing_tag,
                        Some(OpeningTag::Element { tag_name: outer }) if self.tag_names_are_equivalent(closing_tag_name, outer)
                    );
                    if closes_enclosing {
                        // `<a><b></a>`: the inner element was never closed.
                        self.report_unclosed_element(tag_name);
                    } else {
                        let text = self.tag_name_text(tag_name);
                        self.parse_error_at_node(
                            closing_tag_name,
                            &messages::EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_0,
                            &[&text],
                        );
                    }
                }
                self.finish_node(
                    SyntaxKind::JsxElement,
                    pos,
                    NodeData::JsxElement {
                        opening_element: opening,
                        children,
                        closing_element,
                    },
                )
            }
            SyntaxKind::JsxOpeningFragment => {
                let range = self.node(opening).range;
                let children = self.parse_jsx_children(OpeningTag::Fragment {
                    pos: range.pos,
                    end: range.end,
                });
                let closing_fragment = self.parse_jsx_closing_fragment(in_expression_context);
                self.finish_node(
                    SyntaxKind::JsxFragment,
                    pos,
                    NodeData::JsxFragment {
                        opening_fragment: opening,
                        children,
                        closing_fragment,
                    },
                )
            }
            _ => opening,
        };

        if in_expression_context && self.token() == SyntaxKind::LessThanToken {
            let top_bad_pos = top_invalid_node_pos.unwrap_or_else(|| self.node(result).pos());
            let sibling = self.try_parse(|p| {
                let sibling = p.parse_jsx_element_worker(true, Some(top_bad_pos), None);
                (!p.node(sibling).is_missing()).then_some(sibling)
            });
            if let Some(sibling) = sibling {
                let sibling_range = self.node(sibling).range;
                let operator_token = self.finish_node_at(
                    SyntaxKind::CommaToken,
                    sibling_range.pos,
                    sibling_range.pos,
                    NodeFlags::MISSING,
                    NodeData::Token {},
                );
                let start = quill_scanner::skip_trivia(self.scanner.text(), top_bad_pos as usize) as u32;
                self.parse_error_at_range(
                    start,
                    sibling_range.end,
                    &messages::MARKUP_EXPRESSIONS_MUST_HAVE_ONE_PARENT_ELEMENT,
                    &[],
                );
                return self.finish_node(
                    SyntaxKind::BinaryExpression,
                    pos,
                    NodeData::Binary {
                        left: result,
                        operator_token,
                        right: sibling,
                    },
                );
            }
        }
        result
    }

    fn parse_jsx_opening_or_self_closing_element_or_opening_fragment(
        &mut self,
        in_expression_context: bool,
    ) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        if self.token() == SyntaxKind::GreaterThanToken {
            self.rescan(Scanner::scan_jsx_token);
            return self.finish_node(SyntaxKind::JsxOpeningFragment, pos, NodeData::Token {});
        }

        let tag_name = self.parse_jsx_element_name();
        // Type arguments on tags are a typed-source feature.
        let type_arguments = if matches!(self.script_kind(), ScriptKind::Js | ScriptKind::Jsx) {
            None
        } else {
            self.try_parse_type_arguments()
        };
        let attributes = self.parse_jsx_attributes();
        let data = NodeData::JsxTag {
            tag_name,
            type_arguments,
            attributes,
        };

        if self.token() == SyntaxKind::GreaterThanToken {
            self.rescan(Scanner::scan_jsx_token);
            return self.finish_node(SyntaxKind::JsxOpeningElement, pos, data);
        }
        self.parse_expected(SyntaxKind::SlashToken);
        self.parse_jsx_tag_end(in_expression_context);
        self.finish_node(SyntaxKind::JsxSelfClosingElement, pos, data)
    }

    /// Consume the `>` ending a tag. Outside expression position the next
    /// token is read in text mode.
    fn parse_jsx_tag_end(&mut self, in_expression_context: bool) {
        if self.token() != SyntaxKind::GreaterThanToken {
            self.parse_expected(SyntaxKind::GreaterThanToken);
            return;
        }
        if in_expression_context {
            self.next_token();
        } else {
            self.rescan(Scanner::scan_jsx_token);
        }
    }

    /// `a`, `this`, `a-b`, `ns:a` or `a.b.c`.
    fn parse_jsx_element_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        let initial = self.parse_jsx_tag_name();
        if self.kind_of(initial) == SyntaxKind::JsxNamespacedName {
            return initial;
        }
        let mut expression = initial;
        while self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_right_side_of_dot(true, false);
            expression = self.finish_node(
                SyntaxKind::PropertyAccessExpression,
                pos,
                NodeData::PropertyAccess {
                    expression,
                    question_dot_token: None,
                    name,
                },
            );
        }
        expression
    }

    fn parse_jsx_tag_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.rescan(Scanner::scan_jsx_identifier);
        if self.token() == SyntaxKind::ThisKeyword {
            return self.parse_token_node();
        }
        let tag_name = self.parse_identifier_name();
        self.parse_jsx_namespaced_name_rest(pos, tag_name)
    }

    fn parse_jsx_namespaced_name_rest(&mut self, pos: u32, namespace: NodeId) -> NodeId {
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return namespace;
        }
        self.rescan(Scanner::scan_jsx_identifier);
        let name = self.parse_identifier_name();
        self.finish_node(
            SyntaxKind::JsxNamespacedName,
            pos,
            NodeData::JsxNamespacedName { namespace, name },
        )
    }

    fn parse_jsx_attributes(&mut self) -> NodeId {
        let pos = self.node_pos();
        let properties = self.parse_list(ParsingContext::JsxAttributes, Self::parse_jsx_attribute);
        self.finish_node(
            SyntaxKind::JsxAttributes,
            pos,
            NodeData::JsxAttributes { properties },
        )
    }

    fn parse_jsx_attribute(&mut self) -> NodeId {
        if self.token() == SyntaxKind::OpenBraceToken {
            return self.parse_jsx_spread_attribute();
        }
        let pos = self.node_pos();
        self.rescan(Scanner::scan_jsx_identifier);
        let attribute_name = self.parse_identifier_name();
        let name = self.parse_jsx_namespaced_name_rest(pos, attribute_name);
        let initializer = self.parse_jsx_attribute_value();
        self.finish_node(
            SyntaxKind::JsxAttribute,
            pos,
            NodeData::JsxAttribute { name, initializer },
        )
    }

    /// `="text"`, `={expr}` or `=<el />`. A bare name has no value.
    fn parse_jsx_attribute_value(&mut self) -> Option<NodeId> {
        if self.token() != SyntaxKind::EqualsToken {
            return None;
        }
        match self.rescan(Scanner::scan_jsx_attribute_value) {
            SyntaxKind::StringLiteral => Some(self.parse_literal_node()),
            SyntaxKind::OpenBraceToken => Some(self.parse_jsx_expression(true)),
            SyntaxKind::LessThanToken => Some(self.parse_jsx_element_or_self_closing_element_or_fragment(true)),
            _ => {
                self.parse_error_at_current_token(&messages::_0_EXPECTED, &["{"]);
                None
            }
        }
    }

    fn parse_jsx_spread_attribute(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::JsxSpreadAttribute,
            pos,
            NodeData::Expr { expression },
        )
    }

    /// `{expr}` as an attribute value or a child. Children may spread and may
    /// be empty (`{}` or a comment).
    fn parse_jsx_expression(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut dot_dot_dot_token = None;
        let mut expression = None;
        if self.token() != SyntaxKind::CloseBraceToken {
            if !in_expression_context {
                dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
            }
            let parsed = self.parse_expression();
            if self.is_comma_expression(parsed) {
                self.parse_error_at_node(parsed, &messages::MARKUP_EXPRESSIONS_MAY_NOT_USE_THE_COMMA_OPERATOR, &[]);
            }
            expression = Some(parsed);
        }
        if in_expression_context || self.token() != SyntaxKind::CloseBraceToken {
            self.parse_expected(SyntaxKind::CloseBraceToken);
        } else {
            self.rescan(Scanner::scan_jsx_token);
        }
        self.finish_node(
            SyntaxKind::JsxExpression,
            pos,
            NodeData::JsxExpression {
                dot_dot_dot_token,
                expression,
            },
        )
    }

    fn is_comma_expression(&self, id: NodeId) -> bool {
        match self.node(id).data {
            NodeData::Binary { operator_token, .. } => self.kind_of(operator_token) == SyntaxKind::CommaToken,
            _ => false,
        }
    }

    fn parse_jsx_children(&mut self, opening_tag: OpeningTag) -> ListId {
        let list_pos = self.node_pos();
        let children = self.in_parsing_context(ParsingContext::JsxChildren, |p| {
            let mut children = Vec::new();
            loop {
                let token = p.rescan(Scanner::rescan_jsx_token);
                let start = p.node_pos();
                let child = match token {
                    SyntaxKind::EndOfFileToken => {
                        p.report_unclosed_tag(opening_tag);
                        break;
                    }
                    SyntaxKind::LessThanSlashToken => break,
                    SyntaxKind::JsxText => p.parse_jsx_text(),
                    SyntaxKind::OpenBraceToken => p.parse_jsx_expression(false),
                    _ => p.with_depth_guard(|p| p.parse_jsx_element_worker(false, None, Some(opening_tag))),
                };
                children.push(child);
                // Past the nesting limit the child is a placeholder over nothing.
                if p.node_pos() == start {
                    break;
                }

                // A child closed by our own closing tag hands it back to us.
                if let OpeningTag::Element { tag_name } = opening_tag {
                    if p.kind_of(child) == SyntaxKind::JsxElement && p.child_took_closing_tag_of(child, tag_name) {
                        break;
                    }
                }
            }
            children
        });
        self.create_list(children, list_pos)
    }

    fn child_took_closing_tag_of(&self, child: NodeId, tag_name: NodeId) -> bool {
        let NodeData::JsxElement {
            opening_element,
            closing_element,
            ..
        } = self.node(child).data
        else {
            return false;
        };
        let child_open = self.jsx_tag_name(opening_element);
        let child_close = self.jsx_tag_name(closing_element);
        !self.tag_names_are_equivalent(child_open, child_close)
            && self.tag_names_are_equivalent(tag_name, child_close)
    }

    /// `<a><b></a>`: `b` consumed `</a>`. Give it a missing closing element
    /// ending where its children end and return `</a>` for the parent.
    fn take_closing_tag_from_last_child(&mut self, children: ListId, tag_name: NodeId) -> Option<NodeId> {
        let last = self.arena.list(children).elements.last().copied()?;
        if self.kind_of(last) != SyntaxKind::JsxElement || !self.child_took_closing_tag_of(last, tag_name) {
            return None;
        }
        let NodeData::JsxElement {
            opening_element,
            children: last_children,
            closing_element,
        } = self.node(last).data
        else {
            return None;
        };
        let end = self.arena.list(last_children).range.end;
        let empty = self.interner.intern("");
        let missing_name = self.finish_node_at(
            SyntaxKind::Identifier,
            end,
            end,
            NodeFlags::MISSING,
            NodeData::Identifier {
                text: empty,
                original_keyword: None,
            },
        );
        let missing_closing = self.finish_node_at(
            SyntaxKind::JsxClosingElement,
            end,
            end,
            NodeFlags::MISSING,
            NodeData::JsxClosingElement { tag_name: missing_name },
        );
        let node = self.arena.node_mut(last);
        node.range.end = end;
        node.data = NodeData::JsxElement {
            opening_element,
            children: last_children,
            closing_element: missing_closing,
        };
        Some(closing_element)
    }

    fn parse_jsx_text(&mut self) -> NodeId {
        let pos = self.node_pos();
        let text = self.interner.intern(self.scanner.token_value());
        self.rescan(Scanner::scan_jsx_token);
        self.finish_node(
            SyntaxKind::JsxText,
            pos,
            NodeData::Literal {
                text,
                is_unterminated: false,
            },
        )
    }

    fn parse_jsx_closing_element(&mut self, open_tag_name: NodeId, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        let tag_name = self.parse_jsx_element_name();
        // After a mismatched closing tag the enclosing children loop rescans.
        let matches_open = self.tag_names_are_equivalent(open_tag_name, tag_name);
        self.parse_jsx_tag_end(in_expression_context || !matches_open);
        self.finish_node(
            SyntaxKind::JsxClosingElement,
            pos,
            NodeData::JsxClosingElement { tag_name },
        )
    }

    fn parse_jsx_closing_fragment(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        self.parse_jsx_tag_end(in_expression_context);
        self.finish_node(SyntaxKind::JsxClosingFragment, pos, NodeData::Token {})
    }

    fn report_unclosed_tag(&mut self, opening_tag: OpeningTag) {
        match opening_tag {
            OpeningTag::Element { tag_name } => self.report_unclosed_element(tag_name),
            OpeningTag::Fragment { pos, end } => {
                let start = quill_scanner::skip_trivia(self.scanner.text(), pos as usize) as u32;
                self.parse_error_at_range(
                    start.min(end),
                    end,
                    &messages::MARKUP_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG,
                    &["<>"],
                );
            }
        }
    }

    fn report_unclosed_element(&mut self, tag_name: NodeId) {
        let text = self.tag_name_text(tag_name);
        self.parse_error_at_node(
            tag_name,
            &messages::MARKUP_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG,
            &[&text],
        );
    }

    fn jsx_tag_name(&self, tag: NodeId) -> NodeId {
        match self.node(tag).data {
            NodeData::JsxTag { tag_name, .. } | NodeData::JsxClosingElement { tag_name } => tag_name,
            _ => tag,
        }
    }

    /// Source text of a tag name, without leading trivia.
    fn tag_name_text(&self, tag_name: NodeId) -> String {
        let range = self.node(tag_name).range;
        let text = self.scanner.text();
        let start = quill_scanner::skip_trivia(text, range.pos as usize).min(range.end as usize);
        text.get(start..range.end as usize).unwrap_or_default().to_string()
    }

    /// Structural comparison of two tag names: same shape, same words.
    fn tag_names_are_equivalent(&self, lhs: NodeId, rhs: NodeId) -> bool {
        let (left, right) = (self.node(lhs), self.node(rhs));
        if left.kind != right.kind {
            return false;
        }
        match (&left.data, &right.data) {
            (NodeData::Identifier { .. }, NodeData::Identifier { .. }) => self.node_text(lhs) == self.node_text(rhs),
            (
                NodeData::JsxNamespacedName {
                    namespace: left_namespace,
                    name: left_name,
                },
                NodeData::JsxNamespacedName {
                    namespace: right_namespace,
                    name: right_name,
                },
            ) => {
                self.node_text(*left_namespace) == self.node_text(*right_namespace)
                    && self.node_text(*left_name) == self.node_text(*right_name)
            }
            (
                NodeData::PropertyAccess {
                    expression: left_expression,
                    name: left_name,
                    ..
                },
                NodeData::PropertyAccess {
                    expression: right_expression,
                    name: right_name,
                    ..
                },
            ) => {
                self.node_text(*left_name) == self.node_text(*right_name)
                    && self.tag_names_are_equivalent(*left_expression, *right_expression)
            }
            _ => left.kind == SyntaxKind::ThisKeyword,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::ParseOptions;
    use crate::parser::Parser;
    use quill_ast::node::NodeData;
    use quill_ast::syntax_kind::SyntaxKind;
    use quill_ast::SourceFile;

    fn parse_markup(source: &str) -> SourceFile {
        let options = ParseOptions::for_file_name("view.tsx");
        Parser::new("view.tsx", source, &options).parse_source_file()
    }

    fn first_expression_kind(file: &SourceFile) -> SyntaxKind {
        let statement = file.statements()[0];
        match file.node(statement).data {
            NodeData::Expr { expression } => file.node(expression).kind,
            _ => panic!("expected an expression statement"),
        }
    }

    #[test]
    fn test_text_is_not_lexed_as_tokens() {
        let file = parse_markup("<p>don't \"quote\" {name}</p>;");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(first_expression_kind(&file), SyntaxKind::JsxElement);
    }

    #[test]
    fn test_self_closing_and_fragment() {
        let file = parse_markup("<><br /><a-b c:d=\"x\" {...rest} /></>;");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(first_expression_kind(&file), SyntaxKind::JsxFragment);
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let file = parse_markup("<a></b>;");
        assert_eq!(file.parse_diagnostics.len(), 1);
        assert_eq!(
            file.parse_diagnostics[0].message_text,
            "Expected corresponding closing tag for 'a'."
        );
    }
}
