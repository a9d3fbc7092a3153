//! Type productions: annotations, type parameters and arguments, parameters,
//! signatures and type members.

use crate::parser::{Parser, ParsingContext, SignatureFlags};
use crate::precedence::TypeOperatorPrecedence;
use crate::utilities::{is_keyword_type, is_parameter_start, is_type_start};
use quill_ast::node::{ListId, NodeData, NodeId};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::ContextFlags;
use quill_diagnostics::{messages, DiagnosticMessage};

impl<'a> Parser<'a> {
    // ========================================================================
    // Start predicates
    // ========================================================================

    /// Whether a type starts here. Inside a parameter list `(`, `-` and
    /// `function` begin a parameter rather than a type.
    pub(crate) fn is_start_of_type(&mut self, in_start_of_parameter: bool) -> bool {
        match self.token() {
            SyntaxKind::FunctionKeyword => !in_start_of_parameter,
            SyntaxKind::MinusToken => {
                !in_start_of_parameter && self.look_ahead(Self::next_token_is_numeric_or_big_int_literal)
            }
            SyntaxKind::OpenParenToken => {
                !in_start_of_parameter && self.look_ahead(Self::is_start_of_parenthesized_or_function_type)
            }
            token => is_type_start(token) || self.is_identifier(),
        }
    }

    fn next_token_is_numeric_or_big_int_literal(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
        )
    }

    fn is_start_of_parenthesized_or_function_type(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::CloseParenToken
            || self.is_start_of_parameter(false)
            || self.is_start_of_type(false)
    }

    pub(crate) fn is_start_of_parameter(&mut self, is_jsdoc_parameter: bool) -> bool {
        is_parameter_start(self.token())
            || self.is_binding_identifier()
            || self.token() == SyntaxKind::PrivateIdentifier
            || self.is_start_of_type(!is_jsdoc_parameter)
    }

    /// Run under [`Parser::look_ahead`]: consumes modifiers and a name.
    pub(crate) fn is_type_member_start(&mut self) -> bool {
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GetKeyword
                | SyntaxKind::SetKeyword
        ) {
            return true;
        }
        let mut id_token = false;
        while self.token().is_modifier_kind() {
            id_token = true;
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        if self.is_literal_property_name() {
            id_token = true;
            self.next_token();
        }
        if id_token {
            return matches!(
                self.token(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
            ) || self.can_parse_semicolon();
        }
        false
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn parse_type(&mut self) -> NodeId {
        self.with_depth_guard(|p| {
            p.do_outside_context(ContextFlags::YIELD | ContextFlags::AWAIT, Self::parse_type_worker)
        })
    }

    fn parse_type_worker(&mut self) -> NodeId {
        if self.is_start_of_function_type_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        let pos = self.node_pos();
        let check_type = self.parse_union_type_or_higher();
        if self.in_context(ContextFlags::DISALLOW_CONDITIONAL_TYPES)
            || self.has_preceding_line_break()
            || !self.parse_optional(SyntaxKind::ExtendsKeyword)
        {
            return check_type;
        }
        // `A extends infer U extends B ? C : D`: the `?` belongs here, not to
        // the constraint of `U`.
        let extends_type = self.do_in_context(ContextFlags::DISALLOW_CONDITIONAL_TYPES, Self::parse_type);
        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.do_outside_context(ContextFlags::DISALLOW_CONDITIONAL_TYPES, Self::parse_type);
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.do_outside_context(ContextFlags::DISALLOW_CONDITIONAL_TYPES, Self::parse_type);
        self.finish_node(
            SyntaxKind::ConditionalType,
            pos,
            NodeData::ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            },
        )
    }

    pub(crate) fn parse_type_annotation(&mut self) -> Option<NodeId> {
        self.parse_optional(SyntaxKind::ColonToken)
            .then(|| self.parse_type())
    }

    fn parse_union_type_or_higher(&mut self) -> NodeId {
        self.parse_union_or_intersection_type(TypeOperatorPrecedence::Union)
    }

    /// `A | B` or `A & B`, with an optional leading separator.
    fn parse_union_or_intersection_type(&mut self, tier: TypeOperatorPrecedence) -> NodeId {
        let (operator, kind) = match tier {
            TypeOperatorPrecedence::Union => (SyntaxKind::BarToken, SyntaxKind::UnionType),
            TypeOperatorPrecedence::Intersection => (SyntaxKind::AmpersandToken, SyntaxKind::IntersectionType),
        };
        let pos = self.node_pos();
        let has_leading_operator = self.parse_optional(operator);
        let first = self.parse_constituent_type(tier);
        if self.token() != operator && !has_leading_operator {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(operator) {
            types.push(self.parse_constituent_type(tier));
        }
        let types = self.create_list(types, pos);
        self.finish_node(kind, pos, NodeData::TypeList { types })
    }

    fn parse_constituent_type(&mut self, tier: TypeOperatorPrecedence) -> NodeId {
        if self.is_start_of_function_type_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        match tier {
            TypeOperatorPrecedence::Union => {
                self.parse_union_or_intersection_type(TypeOperatorPrecedence::Intersection)
            }
            TypeOperatorPrecedence::Intersection => self.parse_type_operator_or_higher(),
        }
    }

    fn parse_type_operator_or_higher(&mut self) -> NodeId {
        match self.token() {
            operator @ (SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword) => {
                let pos = self.node_pos();
                self.next_token();
                let type_node = self.parse_type_operator_or_higher();
                self.finish_node(
                    SyntaxKind::TypeOperator,
                    pos,
                    NodeData::TypeOperator { operator, type_node },
                )
            }
            SyntaxKind::InferKeyword => self.parse_infer_type(),
            _ => self.do_outside_context(
                ContextFlags::DISALLOW_CONDITIONAL_TYPES,
                Self::parse_postfix_type_or_higher,
            ),
        }
    }

    fn parse_infer_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::InferKeyword);
        let parameter_pos = self.node_pos();
        let name = self.parse_identifier();
        let constraint = self.try_parse(Self::try_parse_constraint_of_infer_type);
        let type_parameter = self.finish_node(
            SyntaxKind::TypeParameter,
            parameter_pos,
            NodeData::TypeParameter {
                name,
                constraint,
                default: None,
            },
        );
        self.finish_node(
            SyntaxKind::InferType,
            pos,
            NodeData::InferType { type_parameter },
        )
    }

    /// `infer U extends X` unless the `extends` actually opens a conditional
    /// type (`infer U extends X ? A : B`).
    fn try_parse_constraint_of_infer_type(&mut self) -> Option<NodeId> {
        if !self.parse_optional(SyntaxKind::ExtendsKeyword) {
            return None;
        }
        let constraint = self.do_in_context(ContextFlags::DISALLOW_CONDITIONAL_TYPES, Self::parse_type);
        (self.in_context(ContextFlags::DISALLOW_CONDITIONAL_TYPES) || self.token() != SyntaxKind::QuestionToken)
            .then_some(constraint)
    }

    /// Array and indexed-access suffixes, which may not follow a line break.
    fn parse_postfix_type_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut type_node = self.parse_non_array_type();
        while !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::OpenBracketToken) {
            if self.is_start_of_type(false) {
                let index_type = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                type_node = self.finish_node(
                    SyntaxKind::IndexedAccessType,
                    pos,
                    NodeData::IndexedAccessType {
                        object_type: type_node,
                        index_type,
                    },
                );
            } else {
                self.parse_expected(SyntaxKind::CloseBracketToken);
                type_node = self.finish_node(
                    SyntaxKind::ArrayType,
                    pos,
                    NodeData::ArrayType {
                        element_type: type_node,
                    },
                );
            }
        }
        type_node
    }

    fn parse_non_array_type(&mut self) -> NodeId {
        match self.token() {
            token if is_keyword_type(token) => self
                .try_parse(Self::parse_keyword_and_no_dot)
                .unwrap_or_else(|| self.parse_type_reference()),
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => self.parse_literal_type_node(false),
            SyntaxKind::MinusToken => {
                if self.look_ahead(Self::next_token_is_numeric_or_big_int_literal) {
                    self.parse_literal_type_node(true)
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::VoidKeyword => self.parse_token_node(),
            SyntaxKind::ThisKeyword => {
                let this_type = self.parse_this_type_node();
                if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
                    self.parse_this_type_predicate(this_type)
                } else {
                    this_type
                }
            }
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(Self::is_start_of_mapped_type) {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(),
            SyntaxKind::AssertsKeyword => {
                if self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line) {
                    self.parse_asserts_type_predicate()
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::TemplateHead => self.parse_template_type(),
            _ => self.parse_type_reference(),
        }
    }

    /// `string` as a keyword type, but not `string.x`.
    fn parse_keyword_and_no_dot(&mut self) -> Option<NodeId> {
        let node = self.parse_token_node();
        (self.token() != SyntaxKind::DotToken).then_some(node)
    }

    fn parse_literal_type_node(&mut self, negative: bool) -> NodeId {
        let pos = self.node_pos();
        if negative {
            self.next_token();
        }
        let literal = match self.token() {
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword => self.parse_token_node(),
            _ => self.parse_literal_node(),
        };
        let literal = if negative {
            self.finish_node(
                SyntaxKind::PrefixUnaryExpression,
                pos,
                NodeData::PrefixUnary {
                    operator: SyntaxKind::MinusToken,
                    operand: literal,
                },
            )
        } else {
            literal
        };
        self.finish_node(SyntaxKind::LiteralType, pos, NodeData::LiteralType { literal })
    }

    fn parse_this_type_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        self.finish_node(SyntaxKind::ThisType, pos, NodeData::Token {})
    }

    fn parse_this_type_predicate(&mut self, parameter_name: NodeId) -> NodeId {
        let pos = self.node(parameter_name).pos();
        self.next_token();
        let type_node = self.parse_type();
        self.finish_node(
            SyntaxKind::TypePredicate,
            pos,
            NodeData::TypePredicate {
                asserts_modifier: None,
                parameter_name,
                type_node: Some(type_node),
            },
        )
    }

    fn parse_asserts_type_predicate(&mut self) -> NodeId {
        let pos = self.node_pos();
        let asserts_modifier = self.parse_expected_token(SyntaxKind::AssertsKeyword);
        let parameter_name = if self.token() == SyntaxKind::ThisKeyword {
            self.parse_this_type_node()
        } else {
            self.parse_identifier()
        };
        let type_node = self
            .parse_optional(SyntaxKind::IsKeyword)
            .then(|| self.parse_type());
        self.finish_node(
            SyntaxKind::TypePredicate,
            pos,
            NodeData::TypePredicate {
                asserts_modifier: Some(asserts_modifier),
                parameter_name,
                type_node,
            },
        )
    }

    fn parse_type_query(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        let expr_name = self.parse_entity_name(true, None);
        let type_arguments = if self.has_preceding_line_break() {
            None
        } else {
            self.try_parse_type_arguments()
        };
        self.finish_node(
            SyntaxKind::TypeQuery,
            pos,
            NodeData::TypeQuery {
                expr_name,
                type_arguments,
            },
        )
    }

    /// A possibly dotted name. A trailing `.` before `<` is left for the
    /// caller so `a.<T>` style references recover.
    pub(crate) fn parse_entity_name(
        &mut self,
        allow_reserved_words: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> NodeId {
        let pos = self.node_pos();
        let mut entity = if allow_reserved_words {
            let is_identifier = self.token().is_identifier_or_keyword();
            self.create_identifier(is_identifier, message)
        } else {
            let is_identifier = self.is_identifier();
            self.create_identifier(is_identifier, message)
        };
        while self.parse_optional(SyntaxKind::DotToken) {
            if self.token() == SyntaxKind::LessThanToken {
                break;
            }
            let right = self.parse_right_side_of_dot(allow_reserved_words, false);
            entity = self.finish_node(
                SyntaxKind::QualifiedName,
                pos,
                NodeData::QualifiedName { left: entity, right },
            );
        }
        entity
    }

    pub(crate) fn parse_type_reference(&mut self) -> NodeId {
        let pos = self.node_pos();
        let type_name = self.parse_entity_name(true, Some(&messages::TYPE_EXPECTED));
        let type_arguments = if !self.has_preceding_line_break()
            && self.rescan(|s| s.rescan_less_than_token()) == SyntaxKind::LessThanToken
        {
            Some(self.parse_type_argument_list())
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::TypeReference,
            pos,
            NodeData::TypeReference {
                type_name,
                type_arguments,
            },
        )
    }

    fn parse_parenthesized_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let type_node = self.parse_type();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(
            SyntaxKind::ParenthesizedType,
            pos,
            NodeData::InnerType { type_node },
        )
    }

    fn parse_template_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let head = self.parse_literal_node();
        let spans_pos = self.node_pos();
        let mut spans = Vec::new();
        loop {
            let span_pos = self.node_pos();
            let type_node = self.parse_type();
            let literal = self.parse_literal_of_template_span();
            let is_middle = self.kind_of(literal) == SyntaxKind::TemplateMiddle;
            spans.push(self.finish_node(
                SyntaxKind::TemplateLiteralTypeSpan,
                span_pos,
                NodeData::TemplateLiteralTypeSpan { type_node, literal },
            ));
            if !is_middle {
                break;
            }
        }
        let template_spans = self.create_list(spans, spans_pos);
        self.finish_node(
            SyntaxKind::TemplateLiteralType,
            pos,
            NodeData::Template {
                head,
                template_spans,
            },
        )
    }

    // ---- tuples -----------------------------------------------------------

    fn parse_tuple_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let types = self.parse_bracketed_list(
            ParsingContext::TupleElementTypes,
            Self::parse_tuple_element_name_or_tuple_element_type,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
        );
        self.finish_node(SyntaxKind::TupleType, pos, NodeData::TypeList { types })
    }

    fn parse_tuple_element_name_or_tuple_element_type(&mut self) -> NodeId {
        if !self.look_ahead(Self::is_tuple_element_name) {
            return self.parse_tuple_element_type();
        }
        let pos = self.node_pos();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        self.parse_expected(SyntaxKind::ColonToken);
        let type_node = self.parse_tuple_element_type();
        self.finish_node(
            SyntaxKind::NamedTupleMember,
            pos,
            NodeData::NamedTupleMember {
                dot_dot_dot_token,
                name,
                question_token,
                type_node,
            },
        )
    }

    fn is_tuple_element_name(&mut self) -> bool {
        if self.token() == SyntaxKind::DotDotDotToken {
            return self.next_token().is_identifier_or_keyword() && self.is_next_token_colon_or_question_colon();
        }
        self.token().is_identifier_or_keyword() && self.is_next_token_colon_or_question_colon()
    }

    fn is_next_token_colon_or_question_colon(&mut self) -> bool {
        match self.next_token() {
            SyntaxKind::ColonToken => true,
            SyntaxKind::QuestionToken => self.next_token() == SyntaxKind::ColonToken,
            _ => false,
        }
    }

    /// `...T`, `T?` or `T`.
    fn parse_tuple_element_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let type_node = self.parse_type();
            return self.finish_node(SyntaxKind::RestType, pos, NodeData::InnerType { type_node });
        }
        let type_node = self.parse_type();
        if self.parse_optional(SyntaxKind::QuestionToken) {
            return self.finish_node(SyntaxKind::OptionalType, pos, NodeData::InnerType { type_node });
        }
        type_node
    }

    // ---- object types -----------------------------------------------------

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            return self.next_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.token() == SyntaxKind::ReadonlyKeyword {
            self.next_token();
        }
        if self.token() != SyntaxKind::OpenBracketToken {
            return false;
        }
        self.next_token();
        self.is_identifier() && self.next_token() == SyntaxKind::InKeyword
    }

    /// `{ readonly [K in T as N]?: X }`, with `+`/`-` on either modifier.
    fn parse_mapped_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let readonly_token = match self.token() {
            SyntaxKind::ReadonlyKeyword | SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.parse_token_node();
                if self.kind_of(token) != SyntaxKind::ReadonlyKeyword {
                    self.parse_expected(SyntaxKind::ReadonlyKeyword);
                }
                Some(token)
            }
            _ => None,
        };
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let parameter_pos = self.node_pos();
        let name = self.parse_identifier_name();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = self.parse_type();
        let type_parameter = self.finish_node(
            SyntaxKind::TypeParameter,
            parameter_pos,
            NodeData::TypeParameter {
                name,
                constraint: Some(constraint),
                default: None,
            },
        );
        let name_type = self
            .parse_optional(SyntaxKind::AsKeyword)
            .then(|| self.parse_type());
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let question_token = match self.token() {
            SyntaxKind::QuestionToken | SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.parse_token_node();
                if self.kind_of(token) != SyntaxKind::QuestionToken {
                    self.parse_expected(SyntaxKind::QuestionToken);
                }
                Some(token)
            }
            _ => None,
        };
        let type_node = self.parse_type_annotation();
        self.parse_semicolon();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::MappedType,
            pos,
            NodeData::MappedType {
                readonly_token,
                type_parameter,
                name_type,
                question_token,
                type_node,
            },
        )
    }

    fn parse_type_literal(&mut self) -> NodeId {
        let pos = self.node_pos();
        let members = self.parse_object_type_members();
        self.finish_node(SyntaxKind::TypeLiteral, pos, NodeData::Members { members })
    }

    /// `{ members }` of a type literal or interface.
    pub(crate) fn parse_object_type_members(&mut self) -> ListId {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return self.create_missing_list();
        }
        let members = self.parse_list(ParsingContext::TypeMembers, Self::parse_type_member);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    pub(crate) fn parse_type_member(&mut self) -> NodeId {
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_signature_member(SyntaxKind::CallSignature);
        }
        if self.token() == SyntaxKind::NewKeyword && self.look_ahead(Self::next_token_is_open_paren_or_less_than_token) {
            return self.parse_signature_member(SyntaxKind::ConstructSignature);
        }
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers(false);
        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, None, modifiers, SyntaxKind::GetAccessor, SignatureFlags::TYPE);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, None, modifiers, SyntaxKind::SetAccessor, SignatureFlags::TYPE);
        }
        if self.is_index_signature() {
            return self.parse_index_signature_declaration(pos, None, modifiers);
        }
        self.parse_property_or_method_signature(pos, modifiers)
    }

    fn next_token_is_open_paren_or_less_than_token(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        )
    }

    /// Members end with `,`, `;` or an inserted semicolon.
    pub(crate) fn parse_type_member_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::CommaToken) {
            return;
        }
        self.parse_semicolon();
    }

    fn parse_signature_member(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        if kind == SyntaxKind::ConstructSignature {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::TYPE);
        let type_annotation = self.parse_return_type(SyntaxKind::ColonToken, true);
        self.parse_type_member_semicolon();
        self.finish_node(
            kind,
            pos,
            NodeData::Signature {
                type_parameters,
                parameters,
                type_annotation,
            },
        )
    }

    pub(crate) fn is_index_signature(&mut self) -> bool {
        self.token() == SyntaxKind::OpenBracketToken && self.look_ahead(Self::is_unambiguously_index_signature)
    }

    /// `[a: T]`, `[a, ...]`, `[a?: T]`, `[...a]` and `[]` rather than a
    /// computed property name.
    fn is_unambiguously_index_signature(&mut self) -> bool {
        self.next_token();
        if matches!(
            self.token(),
            SyntaxKind::DotDotDotToken | SyntaxKind::CloseBracketToken
        ) {
            return true;
        }
        if self.token().is_modifier_kind() {
            self.next_token();
            if self.is_identifier() {
                return true;
            }
        } else if !self.is_identifier() {
            return false;
        } else {
            self.next_token();
        }
        if matches!(self.token(), SyntaxKind::ColonToken | SyntaxKind::CommaToken) {
            return true;
        }
        if self.token() != SyntaxKind::QuestionToken {
            return false;
        }
        matches!(
            self.next_token(),
            SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
        )
    }

    pub(crate) fn parse_index_signature_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        let parameters = self.parse_bracketed_list(
            ParsingContext::Parameters,
            |p| p.parse_parameter(false),
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
        );
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        self.finish_node(
            SyntaxKind::IndexSignature,
            pos,
            NodeData::IndexSignature {
                decorators,
                modifiers,
                parameters,
                type_annotation,
            },
        )
    }

    fn parse_property_or_method_signature(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters(SignatureFlags::TYPE);
            let type_annotation = self.parse_return_type(SyntaxKind::ColonToken, true);
            self.parse_type_member_semicolon();
            self.finish_node(
                SyntaxKind::MethodSignature,
                pos,
                NodeData::MethodSignature {
                    modifiers,
                    name,
                    question_token,
                    type_parameters,
                    parameters,
                    type_annotation,
                },
            )
        } else {
            let type_annotation = self.parse_type_annotation();
            self.parse_type_member_semicolon();
            self.finish_node(
                SyntaxKind::PropertySignature,
                pos,
                NodeData::PropertySignature {
                    modifiers,
                    name,
                    question_token,
                    type_annotation,
                },
            )
        }
    }

    // ---- function types ---------------------------------------------------

    fn is_start_of_function_type_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(Self::is_unambiguously_start_of_function_type),
            SyntaxKind::AbstractKeyword => self.look_ahead(Self::next_token_is_new_keyword),
            _ => false,
        }
    }

    fn next_token_is_new_keyword(&mut self) -> bool {
        self.next_token() == SyntaxKind::NewKeyword
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(
            self.token(),
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken
        ) {
            // `()` and `(...` can only begin a parameter list.
            return true;
        }
        if self.skip_parameter_start() {
            // `(a:`, `(a,`, `(a?` and `(a=` are parameters; `(a) =>` is too.
            if matches!(
                self.token(),
                SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.token() == SyntaxKind::CloseParenToken
                && self.next_token() == SyntaxKind::EqualsGreaterThanToken
            {
                return true;
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.token().is_modifier_kind() {
            self.parse_modifiers(false);
        }
        if self.is_identifier() || self.token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(
            self.token(),
            SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
        ) {
            // A pattern that parses cleanly is a parameter.
            let previous_error_count = self.diagnostic_count();
            self.parse_identifier_or_pattern();
            return previous_error_count == self.diagnostic_count();
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let modifiers = if self.token() == SyntaxKind::AbstractKeyword {
            let modifier_pos = self.node_pos();
            let modifier = self.parse_token_node();
            Some(self.create_list(vec![modifier], modifier_pos))
        } else {
            None
        };
        let is_constructor_type = self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::TYPE);
        let type_node = match self.parse_return_type(SyntaxKind::EqualsGreaterThanToken, false) {
            Some(type_node) => type_node,
            None => self.create_missing_node(SyntaxKind::TypeReference, false, &messages::TYPE_EXPECTED, &[]),
        };
        let kind = if is_constructor_type {
            SyntaxKind::ConstructorType
        } else {
            SyntaxKind::FunctionType
        };
        self.finish_node(
            kind,
            pos,
            NodeData::FunctionType {
                modifiers,
                type_parameters,
                parameters,
                type_node,
            },
        )
    }

    /// Whether a speculatively parsed return type is too broken for the
    /// surrounding arrow function to be trusted.
    pub(crate) fn type_has_arrow_function_blocking_parse_error(&self, type_node: NodeId) -> bool {
        let node = self.node(type_node);
        match node.data {
            NodeData::TypeReference { type_name, .. } => self.node(type_name).is_missing(),
            NodeData::FunctionType {
                parameters,
                type_node,
                ..
            } => self.is_missing_list(parameters) || self.type_has_arrow_function_blocking_parse_error(type_node),
            NodeData::InnerType { type_node } if node.kind == SyntaxKind::ParenthesizedType => {
                self.type_has_arrow_function_blocking_parse_error(type_node)
            }
            _ => node.is_missing(),
        }
    }

    // ---- return types -----------------------------------------------------

    /// The return type after `:` (or `=>` in a function type). A type member
    /// written with `=>` instead of `:` is reported and accepted.
    pub(crate) fn parse_return_type(&mut self, return_token: SyntaxKind, is_type: bool) -> Option<NodeId> {
        if !self.should_parse_return_type(return_token, is_type) {
            return None;
        }
        Some(self.do_outside_context(
            ContextFlags::DISALLOW_CONDITIONAL_TYPES,
            Self::parse_type_or_type_predicate,
        ))
    }

    fn should_parse_return_type(&mut self, return_token: SyntaxKind, is_type: bool) -> bool {
        if return_token == SyntaxKind::EqualsGreaterThanToken {
            self.parse_expected(return_token);
            return true;
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            return true;
        }
        if is_type && self.token() == SyntaxKind::EqualsGreaterThanToken {
            self.parse_error_at_current_token(&messages::_0_EXPECTED, &[":"]);
            self.next_token();
            return true;
        }
        false
    }

    fn parse_type_or_type_predicate(&mut self) -> NodeId {
        let pos = self.node_pos();
        let parameter_name = if self.is_identifier() {
            self.try_parse(Self::parse_type_predicate_prefix)
        } else {
            None
        };
        let type_node = self.parse_type();
        match parameter_name {
            Some(parameter_name) => self.finish_node(
                SyntaxKind::TypePredicate,
                pos,
                NodeData::TypePredicate {
                    asserts_modifier: None,
                    parameter_name,
                    type_node: Some(type_node),
                },
            ),
            None => type_node,
        }
    }

    fn parse_type_predicate_prefix(&mut self) -> Option<NodeId> {
        let name = self.parse_identifier();
        if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
            self.next_token();
            return Some(name);
        }
        None
    }

    // ========================================================================
    // Type parameters and arguments
    // ========================================================================

    pub(crate) fn parse_type_parameters(&mut self) -> Option<ListId> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        let start = self.token_pos();
        let list = self.parse_bracketed_list(
            ParsingContext::TypeParameters,
            Self::parse_type_parameter,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
        );
        self.report_empty_angle_list(list, start, &messages::TYPE_PARAMETER_LIST_CANNOT_BE_EMPTY);
        Some(list)
    }

    fn parse_type_parameter(&mut self) -> NodeId {
        let pos = self.node_pos();
        // `in`, `out` and `const` variance and const modifiers.
        while matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::ConstKeyword)
            || (self.token_value() == "out" && self.look_ahead(Self::next_token_is_identifier_on_same_line))
        {
            self.next_token();
        }
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            // `<T extends>` followed by an expression is a recovery case.
            if self.is_start_of_type(false) || !self.is_start_of_expression() {
                Some(self.parse_type())
            } else {
                Some(self.parse_unary_expression_or_higher())
            }
        } else {
            None
        };
        let default = self
            .parse_optional(SyntaxKind::EqualsToken)
            .then(|| self.parse_type());
        self.finish_node(
            SyntaxKind::TypeParameter,
            pos,
            NodeData::TypeParameter {
                name,
                constraint,
                default,
            },
        )
    }

    /// `<T, U>` after a type name, call target or markup tag name.
    pub(crate) fn parse_type_argument_list(&mut self) -> ListId {
        let start = self.token_pos();
        let list = self.parse_bracketed_list(
            ParsingContext::TypeArguments,
            Self::parse_type,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
        );
        self.report_empty_angle_list(list, start, &messages::TYPE_ARGUMENT_LIST_CANNOT_BE_EMPTY);
        list
    }

    pub(crate) fn try_parse_type_arguments(&mut self) -> Option<ListId> {
        (self.token() == SyntaxKind::LessThanToken).then(|| self.parse_type_argument_list())
    }

    fn report_empty_angle_list(
        &mut self,
        list: ListId,
        start: u32,
        message: &'static DiagnosticMessage,
    ) {
        if !self.is_missing_list(list) && self.arena.list(list).is_empty() {
            let end = self.token_pos();
            self.parse_error_at_range(start, end, message, &[]);
        }
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// `( parameters )`, or a missing list when `(` is absent.
    pub(crate) fn parse_parameters(&mut self, flags: SignatureFlags) -> ListId {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return self.create_missing_list();
        }
        let parameters = match self.parse_parameters_worker(flags, true) {
            Some(parameters) => parameters,
            None => self.create_missing_list(),
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    /// Parameters in the yield/await context of the signature. Without
    /// `allow_ambiguity` the list fails as soon as an element does not start
    /// like a parameter name.
    pub(crate) fn parse_parameters_worker(
        &mut self,
        flags: SignatureFlags,
        allow_ambiguity: bool,
    ) -> Option<ListId> {
        let in_outer_await_context = self.in_await_context();
        self.with_function_context(
            flags.contains(SignatureFlags::YIELD),
            flags.contains(SignatureFlags::AWAIT),
            |p| {
                if flags.contains(SignatureFlags::JSDOC) {
                    return Some(p.parse_delimited_list(
                        ParsingContext::JSDocFunctionParameters,
                        Self::parse_jsdoc_parameter,
                        false,
                    ));
                }
                p.parse_delimited_list_worker(
                    ParsingContext::Parameters,
                    |p| {
                        if allow_ambiguity {
                            Some(p.parse_parameter(in_outer_await_context))
                        } else {
                            p.parse_parameter_for_speculation(in_outer_await_context)
                        }
                    },
                    false,
                )
            },
        )
    }

    pub(crate) fn parse_parameter(&mut self, in_outer_await_context: bool) -> NodeId {
        match self.parse_parameter_worker(in_outer_await_context, true) {
            Some(parameter) => parameter,
            None => self.create_missing_node(SyntaxKind::Parameter, true, &messages::PARAMETER_DECLARATION_EXPECTED, &[]),
        }
    }

    fn parse_parameter_for_speculation(&mut self, in_outer_await_context: bool) -> Option<NodeId> {
        self.parse_parameter_worker(in_outer_await_context, false)
    }

    fn parse_parameter_worker(&mut self, in_outer_await_context: bool, allow_ambiguity: bool) -> Option<NodeId> {
        let pos = self.node_pos();
        // Decorators are evaluated in the enclosing function.
        let decorators = if in_outer_await_context {
            self.do_in_context(ContextFlags::AWAIT, Self::parse_decorators)
        } else {
            self.do_outside_context(ContextFlags::AWAIT, Self::parse_decorators)
        };

        if self.token() == SyntaxKind::ThisKeyword {
            let name = self.create_identifier(true, None);
            let type_annotation = self.parse_type_annotation();
            return Some(self.finish_node(
                SyntaxKind::Parameter,
                pos,
                NodeData::Parameter {
                    decorators,
                    modifiers: None,
                    dot_dot_dot_token: None,
                    name,
                    question_token: None,
                    type_annotation,
                    initializer: None,
                },
            ));
        }

        let modifiers = self.parse_modifiers(false);
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        if !allow_ambiguity && !self.is_parameter_name_start() {
            return None;
        }
        let name = self.parse_name_of_parameter(modifiers);
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        Some(self.finish_node(
            SyntaxKind::Parameter,
            pos,
            NodeData::Parameter {
                decorators,
                modifiers,
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        ))
    }

    fn is_parameter_name_start(&self) -> bool {
        self.is_binding_identifier()
            || matches!(
                self.token(),
                SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
            )
    }

    fn parse_name_of_parameter(&mut self, modifiers: Option<ListId>) -> NodeId {
        let name = self.parse_identifier_or_pattern();
        // `(public)`: a lone modifier word that did not parse as a name is
        // skipped so the list can continue.
        let range = self.node(name).range;
        if range.pos == range.end && modifiers.is_none() && self.token().is_modifier_kind() {
            self.next_token();
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use crate::options::ParseOptions;
    use crate::parser::Parser;
    use quill_ast::syntax_kind::SyntaxKind;

    fn type_kind(source: &str) -> SyntaxKind {
        let text = format!("type T = {source};");
        let options = ParseOptions::default();
        let file = Parser::new("types.ts", &text, &options).parse_source_file();
        assert!(
            file.parse_diagnostics.is_empty(),
            "{source}: {:?}",
            file.parse_diagnostics
        );
        let statement = file.statements()[0];
        match file.arena.node(statement).data {
            quill_ast::node::NodeData::TypeAlias { type_node, .. } => file.arena.node(type_node).kind,
            ref other => panic!("not a type alias: {other:?}"),
        }
    }

    #[test]
    fn test_primary_type_dispatch() {
        assert_eq!(type_kind("string"), SyntaxKind::StringKeyword);
        assert_eq!(type_kind("Map<string, number>"), SyntaxKind::TypeReference);
        assert_eq!(type_kind("-1"), SyntaxKind::LiteralType);
        assert_eq!(type_kind("typeof a.b"), SyntaxKind::TypeQuery);
        assert_eq!(type_kind("[a: string, b?: number]"), SyntaxKind::TupleType);
        assert_eq!(type_kind("{ [K in keyof T]?: T[K] }"), SyntaxKind::MappedType);
        assert_eq!(type_kind("`a${string}`"), SyntaxKind::TemplateLiteralType);
    }

    #[test]
    fn test_function_and_conditional_types() {
        assert_eq!(type_kind("(a: string) => void"), SyntaxKind::FunctionType);
        assert_eq!(type_kind("new () => Foo"), SyntaxKind::ConstructorType);
        assert_eq!(type_kind("(string)"), SyntaxKind::ParenthesizedType);
        assert_eq!(
            type_kind("T extends (infer U extends string) ? U : never"),
            SyntaxKind::ConditionalType
        );
    }

    #[test]
    fn test_union_with_leading_separator() {
        assert_eq!(type_kind("| A | B"), SyntaxKind::UnionType);
        assert_eq!(type_kind("A & B | C"), SyntaxKind::UnionType);
        assert_eq!(type_kind("& A"), SyntaxKind::IntersectionType);
    }
}
