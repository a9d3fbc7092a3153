//! Expression productions.
//!
//! Binary operators are parsed by precedence climbing. The ambiguous prefixes
//! (`(` for arrow functions, `<` for generic calls and markup) are resolved
//! with [`Parser::look_ahead`] and [`Parser::try_parse`].

use crate::parser::{token_to_string, Parser, ParsingContext, SignatureFlags};
use crate::precedence::{get_binary_operator_precedence, is_right_associative, is_unary_operator, OperatorPrecedence};
use crate::utilities::{is_expression_start, is_left_hand_side_expression_kind, is_left_hand_side_expression_start};
use quill_ast::node::{ListId, NodeData, NodeId};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{ContextFlags, LanguageVariant, NodeFlags};
use quill_diagnostics::messages;

/// Answer of a bounded lookahead that may need a full speculative parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tristate {
    False,
    True,
    Unknown,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Start predicates
    // ========================================================================

    pub(crate) fn is_start_of_left_hand_side_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ImportKeyword => self.look_ahead(Self::next_token_is_open_paren_or_less_than_or_dot),
            token if is_left_hand_side_expression_start(token) => true,
            _ => self.is_identifier(),
        }
    }

    pub(crate) fn is_start_of_expression(&mut self) -> bool {
        if self.is_start_of_left_hand_side_expression() {
            return true;
        }
        let token = self.token();
        if is_expression_start(token) {
            return true;
        }
        // A stray binary operator still begins an expression, for recovery.
        self.is_binary_operator() || self.is_identifier()
    }

    fn is_binary_operator(&self) -> bool {
        if self.in_disallow_in_context() && self.token() == SyntaxKind::InKeyword {
            return false;
        }
        get_binary_operator_precedence(self.token()).is_some()
    }

    fn next_token_is_open_paren_or_less_than_or_dot(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::DotToken
        )
    }

    fn next_token_is_identifier_or_keyword_or_literal_on_same_line(&mut self) -> bool {
        let token = self.next_token();
        (token.is_identifier_or_keyword()
            || matches!(
                token,
                SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral
            ))
            && !self.has_preceding_line_break()
    }

    // ========================================================================
    // Comma and assignment
    // ========================================================================

    /// `Expression[In]`: assignments joined by commas.
    pub(crate) fn parse_expression(&mut self) -> NodeId {
        self.do_outside_context(ContextFlags::DECORATOR, |p| {
            let pos = p.node_pos();
            let mut expression = p.parse_assignment_expression_or_higher();
            while let Some(operator_token) = p.parse_optional_token(SyntaxKind::CommaToken) {
                let right = p.parse_assignment_expression_or_higher();
                expression = p.make_binary_expression(expression, operator_token, right, pos);
            }
            expression
        })
    }

    pub(crate) fn parse_initializer(&mut self) -> Option<NodeId> {
        self.parse_optional(SyntaxKind::EqualsToken)
            .then(|| self.parse_assignment_expression_or_higher())
    }

    pub(crate) fn make_binary_expression(
        &mut self,
        left: NodeId,
        operator_token: NodeId,
        right: NodeId,
        pos: u32,
    ) -> NodeId {
        self.finish_node(
            SyntaxKind::BinaryExpression,
            pos,
            NodeData::Binary {
                left,
                operator_token,
                right,
            },
        )
    }

    pub(crate) fn parse_assignment_expression_or_higher(&mut self) -> NodeId {
        self.with_depth_guard(Self::parse_assignment_expression_or_higher_worker)
    }

    fn parse_assignment_expression_or_higher_worker(&mut self) -> NodeId {
        if self.is_yield_expression() {
            return self.parse_yield_expression();
        }

        // Arrow functions come first: `(a, b) => ...` would otherwise parse as
        // a parenthesized comma expression.
        if let Some(arrow) = self.try_parse_parenthesized_arrow_function_expression() {
            return arrow;
        }
        if let Some(arrow) = self.try_parse_async_simple_arrow_function_expression() {
            return arrow;
        }

        let pos = self.node_pos();
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::LOWEST);

        if self.kind_of(expression) == SyntaxKind::Identifier
            && self.token() == SyntaxKind::EqualsGreaterThanToken
        {
            return self.parse_simple_arrow_function_expression(pos, expression, None);
        }

        if is_left_hand_side_expression_kind(self.kind_of(expression))
            && self.rescan(|s| s.rescan_greater_than_token()).is_assignment_operator()
        {
            let operator_token = self.parse_token_node();
            let right = self.parse_assignment_expression_or_higher();
            return self.make_binary_expression(expression, operator_token, right, pos);
        }

        self.parse_conditional_expression_rest(expression, pos)
    }

    fn is_yield_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::YieldKeyword {
            return false;
        }
        // Outside a generator `yield` is an identifier, unless what follows
        // clearly makes it an operator.
        self.in_yield_context()
            || self.look_ahead(Self::next_token_is_identifier_or_keyword_or_literal_on_same_line)
    }

    fn parse_yield_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let (asterisk_token, expression) = if !self.has_preceding_line_break()
            && (self.token() == SyntaxKind::AsteriskToken || self.is_start_of_expression())
        {
            let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
            (asterisk_token, Some(self.parse_assignment_expression_or_higher()))
        } else {
            (None, None)
        };
        self.finish_node(
            SyntaxKind::YieldExpression,
            pos,
            NodeData::Yield {
                asterisk_token,
                expression,
            },
        )
    }

    fn parse_conditional_expression_rest(&mut self, condition: NodeId, pos: u32) -> NodeId {
        let Some(question_token) = self.parse_optional_token(SyntaxKind::QuestionToken) else {
            return condition;
        };
        let when_true = self.do_outside_context(
            ContextFlags::DISALLOW_IN | ContextFlags::DECORATOR,
            Self::parse_assignment_expression_or_higher,
        );
        let colon_token = self.parse_expected_token(SyntaxKind::ColonToken);
        let when_false = if self.node(colon_token).is_missing() {
            self.create_missing_node(SyntaxKind::Identifier, false, &messages::_0_EXPECTED, &[":"])
        } else {
            self.parse_assignment_expression_or_higher()
        };
        self.finish_node(
            SyntaxKind::ConditionalExpression,
            pos,
            NodeData::Conditional {
                condition,
                question_token,
                when_true,
                colon_token,
                when_false,
            },
        )
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    fn try_parse_parenthesized_arrow_function_expression(&mut self) -> Option<NodeId> {
        match self.is_parenthesized_arrow_function_expression() {
            Tristate::False => None,
            Tristate::True => self.parse_parenthesized_arrow_function_expression(true),
            Tristate::Unknown => self.try_parse(Self::parse_possible_parenthesized_arrow_function_expression),
        }
    }

    fn is_parenthesized_arrow_function_expression(&mut self) -> Tristate {
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::AsyncKeyword => {
                self.look_ahead(Self::is_parenthesized_arrow_function_expression_worker)
            }
            // A lone `=>` is parsed as an arrow with missing parameters.
            SyntaxKind::EqualsGreaterThanToken => Tristate::True,
            _ => Tristate::False,
        }
    }

    fn is_parenthesized_arrow_function_expression_worker(&mut self) -> Tristate {
        if self.token() == SyntaxKind::AsyncKeyword {
            self.next_token();
            if self.has_preceding_line_break() {
                return Tristate::False;
            }
            if !matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
                return Tristate::False;
            }
        }

        let first = self.token();
        let second = self.next_token();

        if first == SyntaxKind::OpenParenToken {
            if second == SyntaxKind::CloseParenToken {
                // `()` followed by `=>`, a return type or a body.
                return match self.next_token() {
                    SyntaxKind::EqualsGreaterThanToken | SyntaxKind::ColonToken | SyntaxKind::OpenBraceToken => {
                        Tristate::True
                    }
                    _ => Tristate::False,
                };
            }
            // `([` and `({` may be a destructuring parameter or an expression.
            if matches!(second, SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
                return Tristate::Unknown;
            }
            if second == SyntaxKind::DotDotDotToken {
                return Tristate::True;
            }
            // `(public x` is a parameter property, `(public as` is not.
            if second.is_modifier_kind()
                && second != SyntaxKind::AsyncKeyword
                && self.look_ahead(Self::next_token_is_identifier)
            {
                if self.next_token() == SyntaxKind::AsKeyword {
                    return Tristate::False;
                }
                return Tristate::True;
            }
            if !self.is_identifier() && second != SyntaxKind::ThisKeyword {
                return Tristate::False;
            }
            return match self.next_token() {
                SyntaxKind::ColonToken => Tristate::True,
                SyntaxKind::QuestionToken => {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::ColonToken
                            | SyntaxKind::CommaToken
                            | SyntaxKind::EqualsToken
                            | SyntaxKind::CloseParenToken
                    ) {
                        Tristate::True
                    } else {
                        Tristate::False
                    }
                }
                SyntaxKind::CommaToken | SyntaxKind::EqualsToken | SyntaxKind::CloseParenToken => {
                    Tristate::Unknown
                }
                _ => Tristate::False,
            };
        }

        debug_assert_eq!(first, SyntaxKind::LessThanToken);
        if !self.is_identifier() && self.token() != SyntaxKind::ConstKeyword {
            return Tristate::False;
        }

        if self.language_variant() == LanguageVariant::Jsx {
            // `<T,>` and `<T extends U>` introduce a generic arrow; anything
            // else is a markup element.
            let is_arrow_function_in_markup = self.look_ahead(|p| {
                p.parse_optional(SyntaxKind::ConstKeyword);
                match p.next_token() {
                    SyntaxKind::ExtendsKeyword => !matches!(
                        p.next_token(),
                        SyntaxKind::EqualsToken | SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken
                    ),
                    SyntaxKind::CommaToken | SyntaxKind::EqualsToken => true,
                    _ => false,
                }
            });
            return if is_arrow_function_in_markup {
                Tristate::True
            } else {
                Tristate::False
            };
        }

        Tristate::Unknown
    }

    fn next_token_is_identifier(&mut self) -> bool {
        self.next_token();
        self.is_identifier()
    }

    fn parse_possible_parenthesized_arrow_function_expression(&mut self) -> Option<NodeId> {
        let token_pos = self.token_pos();
        if self.is_known_not_parenthesized_arrow(token_pos) {
            return None;
        }
        let result = self.parse_parenthesized_arrow_function_expression(false);
        if result.is_none() {
            self.mark_not_parenthesized_arrow(token_pos);
        }
        result
    }

    fn try_parse_async_simple_arrow_function_expression(&mut self) -> Option<NodeId> {
        if self.token() != SyntaxKind::AsyncKeyword
            || self.look_ahead(Self::is_unparenthesized_async_arrow_function_worker) != Tristate::True
        {
            return None;
        }
        let pos = self.node_pos();
        let async_modifier = self.parse_modifiers_for_arrow_function();
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::LOWEST);
        Some(self.parse_simple_arrow_function_expression(pos, expression, async_modifier))
    }

    fn is_unparenthesized_async_arrow_function_worker(&mut self) -> Tristate {
        if self.token() == SyntaxKind::AsyncKeyword {
            self.next_token();
            if self.has_preceding_line_break() || self.token() == SyntaxKind::EqualsGreaterThanToken {
                return Tristate::False;
            }
            let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::LOWEST);
            if !self.has_preceding_line_break()
                && self.kind_of(expression) == SyntaxKind::Identifier
                && self.token() == SyntaxKind::EqualsGreaterThanToken
            {
                return Tristate::True;
            }
        }
        Tristate::False
    }

    fn parse_modifiers_for_arrow_function(&mut self) -> Option<ListId> {
        if self.token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let pos = self.node_pos();
        self.next_token();
        let modifier = self.finish_node(SyntaxKind::AsyncKeyword, pos, NodeData::Token {});
        Some(self.create_list(vec![modifier], pos))
    }

    /// `x => body` where `x` has already been parsed as `identifier`.
    fn parse_simple_arrow_function_expression(
        &mut self,
        pos: u32,
        identifier: NodeId,
        async_modifier: Option<ListId>,
    ) -> NodeId {
        let parameter_pos = self.node(identifier).pos();
        let parameter = self.finish_node(
            SyntaxKind::Parameter,
            parameter_pos,
            NodeData::Parameter {
                decorators: None,
                modifiers: None,
                dot_dot_dot_token: None,
                name: identifier,
                question_token: None,
                type_annotation: None,
                initializer: None,
            },
        );
        let parameter_end = self.node(parameter).end();
        let parameters = self.create_list_at(vec![parameter], parameter_pos, parameter_end);
        let equals_greater_than_token = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_expression_body(async_modifier.is_some());
        self.finish_node(
            SyntaxKind::ArrowFunction,
            pos,
            NodeData::ArrowFunction {
                modifiers: async_modifier,
                type_parameters: None,
                parameters,
                type_annotation: None,
                equals_greater_than_token,
                body,
            },
        )
    }

    /// With `allow_ambiguity` unset this gives up (returns `None`) as soon as
    /// the input stops looking like an arrow function, so the caller can
    /// rewind and parse an ordinary expression.
    fn parse_parenthesized_arrow_function_expression(&mut self, allow_ambiguity: bool) -> Option<NodeId> {
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers_for_arrow_function();
        let is_async = modifiers.is_some();
        let flags = if is_async {
            SignatureFlags::AWAIT
        } else {
            SignatureFlags::NONE
        };
        let type_parameters = self.parse_type_parameters();

        let parameters = if !self.parse_expected(SyntaxKind::OpenParenToken) {
            if !allow_ambiguity {
                return None;
            }
            self.create_missing_list()
        } else {
            let parameters = self.parse_parameters_worker(flags, allow_ambiguity)?;
            if !self.parse_expected(SyntaxKind::CloseParenToken) && !allow_ambiguity {
                return None;
            }
            parameters
        };

        let type_annotation = self.parse_return_type(SyntaxKind::ColonToken, false);
        if let Some(type_annotation) = type_annotation {
            if !allow_ambiguity && self.type_has_arrow_function_blocking_parse_error(type_annotation) {
                return None;
            }
        }

        // A signature alone is not enough: `(a): b` could still be the middle
        // of a conditional expression.
        if !allow_ambiguity
            && self.token() != SyntaxKind::EqualsGreaterThanToken
            && self.token() != SyntaxKind::OpenBraceToken
        {
            return None;
        }

        let last_token = self.token();
        let equals_greater_than_token = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken);
        let body = if matches!(
            last_token,
            SyntaxKind::EqualsGreaterThanToken | SyntaxKind::OpenBraceToken
        ) {
            self.parse_arrow_function_expression_body(is_async)
        } else {
            self.parse_identifier()
        };

        Some(self.finish_node(
            SyntaxKind::ArrowFunction,
            pos,
            NodeData::ArrowFunction {
                modifiers,
                type_parameters,
                parameters,
                type_annotation,
                equals_greater_than_token,
                body,
            },
        ))
    }

    fn parse_arrow_function_expression_body(&mut self, is_async: bool) -> NodeId {
        let await_flag = if is_async {
            SignatureFlags::AWAIT
        } else {
            SignatureFlags::NONE
        };
        if self.token() == SyntaxKind::OpenBraceToken {
            return self.parse_function_block(await_flag, None);
        }

        // `=> return x` and the like: a statement body whose `{` is missing.
        if !matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword
        ) && self.is_start_of_statement()
            && !self.is_start_of_expression_statement()
        {
            return self.parse_function_block(SignatureFlags::IGNORE_MISSING_OPEN_BRACE | await_flag, None);
        }

        if is_async {
            self.do_in_context(ContextFlags::AWAIT, Self::parse_assignment_expression_or_higher)
        } else {
            self.do_outside_context(ContextFlags::AWAIT, Self::parse_assignment_expression_or_higher)
        }
    }

    // ========================================================================
    // Binary and unary
    // ========================================================================

    pub(crate) fn parse_binary_expression_or_higher(&mut self, precedence: OperatorPrecedence) -> NodeId {
        let pos = self.node_pos();
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(precedence, left, pos)
    }

    fn parse_binary_expression_rest(
        &mut self,
        precedence: OperatorPrecedence,
        mut left: NodeId,
        pos: u32,
    ) -> NodeId {
        loop {
            // `>` is scanned alone so type argument lists can close; combine it
            // with what follows before treating it as an operator.
            let token = self.rescan(|s| s.rescan_greater_than_token());
            let Some(new_precedence) = get_binary_operator_precedence(token) else {
                break;
            };
            let consume = if is_right_associative(token) {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume {
                break;
            }
            if token == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                break;
            }

            if matches!(token, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                // `x\nas` starts a new statement.
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = self.parse_type();
                let kind = if token == SyntaxKind::SatisfiesKeyword {
                    SyntaxKind::SatisfiesExpression
                } else {
                    SyntaxKind::AsExpression
                };
                left = self.finish_node(
                    kind,
                    pos,
                    NodeData::ExpressionWithType {
                        expression: left,
                        type_node,
                    },
                );
            } else {
                let operator_token = self.parse_token_node();
                let right = self.parse_binary_expression_or_higher(new_precedence);
                left = self.make_binary_expression(left, operator_token, right, pos);
            }
        }
        left
    }

    pub(crate) fn parse_unary_expression_or_higher(&mut self) -> NodeId {
        self.with_depth_guard(Self::parse_unary_expression_or_higher_worker)
    }

    fn parse_unary_expression_or_higher_worker(&mut self) -> NodeId {
        if self.is_update_expression() {
            let pos = self.node_pos();
            let update_expression = self.parse_update_expression();
            if self.token() == SyntaxKind::AsteriskAsteriskToken {
                return self.parse_binary_expression_rest(
                    OperatorPrecedence::Exponentiation,
                    update_expression,
                    pos,
                );
            }
            return update_expression;
        }

        // `-x ** y` is ambiguous and rejected; the operand still parses.
        let unary_operator = self.token();
        let simple_unary_expression = self.parse_simple_unary_expression();
        if self.token() == SyntaxKind::AsteriskAsteriskToken {
            if self.kind_of(simple_unary_expression) == SyntaxKind::TypeAssertionExpression {
                self.parse_error_at_node(
                    simple_unary_expression,
                    &messages::A_TYPE_ASSERTION_EXPRESSION_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                    &[],
                );
            } else {
                self.parse_error_at_node(
                    simple_unary_expression,
                    &messages::AN_UNARY_EXPRESSION_WITH_THE_0_OPERATOR_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                    &[token_to_string(unary_operator)],
                );
            }
        }
        simple_unary_expression
    }

    /// Whether the current token starts an update expression rather than a
    /// prefix operator application.
    fn is_update_expression(&self) -> bool {
        match self.token() {
            // In markup files `<` starts an element, which is a primary expression.
            SyntaxKind::LessThanToken => self.language_variant() == LanguageVariant::Jsx,
            token => !is_unary_operator(token),
        }
    }

    fn parse_simple_unary_expression(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken => self.parse_prefix_unary_expression(),
            SyntaxKind::DeleteKeyword => self.parse_keyword_unary_expression(SyntaxKind::DeleteExpression),
            SyntaxKind::TypeOfKeyword => self.parse_keyword_unary_expression(SyntaxKind::TypeOfExpression),
            SyntaxKind::VoidKeyword => self.parse_keyword_unary_expression(SyntaxKind::VoidExpression),
            SyntaxKind::LessThanToken => self.parse_type_assertion(),
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                self.parse_keyword_unary_expression(SyntaxKind::AwaitExpression)
            }
            _ => self.parse_update_expression(),
        }
    }

    fn parse_prefix_unary_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let operator = self.token();
        self.next_token();
        let operand = self.parse_simple_unary_expression();
        self.finish_node(
            SyntaxKind::PrefixUnaryExpression,
            pos,
            NodeData::PrefixUnary { operator, operand },
        )
    }

    /// `delete`, `typeof`, `void` and `await`.
    fn parse_keyword_unary_expression(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let expression = self.parse_simple_unary_expression();
        self.finish_node(kind, pos, NodeData::Expr { expression })
    }

    fn is_await_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::AwaitKeyword {
            return false;
        }
        self.in_await_context()
            || self.look_ahead(Self::next_token_is_identifier_or_keyword_or_literal_on_same_line)
    }

    fn parse_type_assertion(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        let type_node = self.parse_type();
        self.parse_expected(SyntaxKind::GreaterThanToken);
        let expression = self.parse_simple_unary_expression();
        self.finish_node(
            SyntaxKind::TypeAssertionExpression,
            pos,
            NodeData::TypeAssertion {
                type_node,
                expression,
            },
        )
    }

    fn parse_update_expression(&mut self) -> NodeId {
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            let pos = self.node_pos();
            let operator = self.token();
            self.next_token();
            let operand = self.parse_left_hand_side_expression_or_higher();
            return self.finish_node(
                SyntaxKind::PrefixUnaryExpression,
                pos,
                NodeData::PrefixUnary { operator, operand },
            );
        }
        if self.language_variant() == LanguageVariant::Jsx
            && self.token() == SyntaxKind::LessThanToken
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_or_greater_than)
        {
            return self.parse_jsx_element_or_self_closing_element_or_fragment(true);
        }

        let expression = self.parse_left_hand_side_expression_or_higher();
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            let pos = self.node(expression).pos();
            return self.finish_node(
                SyntaxKind::PostfixUnaryExpression,
                pos,
                NodeData::PostfixUnary {
                    operand: expression,
                    operator,
                },
            );
        }
        expression
    }

    fn next_token_is_identifier_or_keyword_or_greater_than(&mut self) -> bool {
        let token = self.next_token();
        token.is_identifier_or_keyword() || token == SyntaxKind::GreaterThanToken
    }

    // ========================================================================
    // Left-hand side: member access, calls, templates
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = match self.token() {
            SyntaxKind::ImportKeyword => {
                if self.look_ahead(Self::next_token_is_open_paren_or_less_than) {
                    // `import(...)`
                    self.parse_token_node()
                } else if self.look_ahead(Self::next_token_is_dot) {
                    // `import.meta`
                    self.next_token();
                    self.next_token();
                    let name = self.parse_identifier_name();
                    self.finish_node(
                        SyntaxKind::MetaProperty,
                        pos,
                        NodeData::MetaProperty {
                            keyword_token: SyntaxKind::ImportKeyword,
                            name,
                        },
                    )
                } else {
                    self.parse_member_expression_or_higher()
                }
            }
            SyntaxKind::SuperKeyword => self.parse_super_expression(),
            _ => self.parse_member_expression_or_higher(),
        };
        self.parse_call_expression_rest(pos, expression)
    }

    fn next_token_is_open_paren_or_less_than(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        )
    }

    fn next_token_is_dot(&mut self) -> bool {
        self.next_token() == SyntaxKind::DotToken
    }

    fn parse_super_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_token_node();
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
        ) {
            return expression;
        }
        // Anything else after `super` gets a property access with an error.
        self.parse_expected_with(
            SyntaxKind::DotToken,
            Some(&messages::SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS),
        );
        let name = self.parse_right_side_of_dot(true, true);
        self.finish_node(
            SyntaxKind::PropertyAccessExpression,
            pos,
            NodeData::PropertyAccess {
                expression,
                question_dot_token: None,
                name,
            },
        )
    }

    fn parse_member_expression_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_primary_expression();
        self.parse_member_expression_rest(pos, expression, true)
    }

    pub(crate) fn parse_member_expression_rest(
        &mut self,
        pos: u32,
        mut expression: NodeId,
        allow_optional_chain: bool,
    ) -> NodeId {
        loop {
            let mut question_dot_token = None;
            let is_property_access = if allow_optional_chain
                && self.is_start_of_optional_property_or_element_access_chain()
            {
                question_dot_token = Some(self.parse_expected_token(SyntaxKind::QuestionDotToken));
                self.token().is_identifier_or_keyword()
            } else {
                self.parse_optional(SyntaxKind::DotToken)
            };

            if is_property_access {
                expression = self.parse_property_access_expression_rest(pos, expression, question_dot_token);
                continue;
            }

            // In a decorator `@a[b]` the brackets start a computed member name.
            if (question_dot_token.is_some() || !self.in_decorator_context())
                && self.parse_optional(SyntaxKind::OpenBracketToken)
            {
                expression = self.parse_element_access_expression_rest(pos, expression, question_dot_token);
                continue;
            }

            if self.is_template_start_of_tagged_template() {
                expression = self.parse_tagged_template_rest(pos, expression, question_dot_token, None);
                continue;
            }

            if question_dot_token.is_none()
                && self.token() == SyntaxKind::ExclamationToken
                && !self.has_preceding_line_break()
            {
                self.next_token();
                let flags = self.chain_flags(None, expression);
                expression = self.finish_node_with_flags(
                    SyntaxKind::NonNullExpression,
                    pos,
                    flags,
                    NodeData::Expr { expression },
                );
                continue;
            }

            return expression;
        }
    }

    fn is_start_of_optional_property_or_element_access_chain(&mut self) -> bool {
        self.token() == SyntaxKind::QuestionDotToken
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_or_open_bracket_or_template)
    }

    fn next_token_is_identifier_or_keyword_or_open_bracket_or_template(&mut self) -> bool {
        let token = self.next_token();
        token.is_identifier_or_keyword()
            || matches!(
                token,
                SyntaxKind::OpenBracketToken
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::TemplateHead
            )
    }

    fn is_template_start_of_tagged_template(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
        )
    }

    /// Whether `expression` belongs to an optional chain, so the access being
    /// built continues it.
    fn continues_optional_chain(&self, question_dot_token: Option<NodeId>, expression: NodeId) -> bool {
        question_dot_token.is_some() || self.node(expression).flags.contains(NodeFlags::OPTIONAL_CHAIN)
    }

    fn chain_flags(&self, question_dot_token: Option<NodeId>, expression: NodeId) -> NodeFlags {
        if self.continues_optional_chain(question_dot_token, expression) {
            NodeFlags::OPTIONAL_CHAIN
        } else {
            NodeFlags::NONE
        }
    }

    fn parse_property_access_expression_rest(
        &mut self,
        pos: u32,
        expression: NodeId,
        question_dot_token: Option<NodeId>,
    ) -> NodeId {
        let name = self.parse_right_side_of_dot(true, true);
        let flags = self.chain_flags(question_dot_token, expression);
        self.finish_node_with_flags(
            SyntaxKind::PropertyAccessExpression,
            pos,
            flags,
            NodeData::PropertyAccess {
                expression,
                question_dot_token,
                name,
            },
        )
    }

    fn parse_element_access_expression_rest(
        &mut self,
        pos: u32,
        expression: NodeId,
        question_dot_token: Option<NodeId>,
    ) -> NodeId {
        let argument_expression = if self.token() == SyntaxKind::CloseBracketToken {
            self.create_missing_node(
                SyntaxKind::Identifier,
                true,
                &messages::AN_ELEMENT_ACCESS_EXPRESSION_SHOULD_TAKE_AN_ARGUMENT,
                &[],
            )
        } else {
            self.allow_in_and(Self::parse_expression)
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let flags = self.chain_flags(question_dot_token, expression);
        self.finish_node_with_flags(
            SyntaxKind::ElementAccessExpression,
            pos,
            flags,
            NodeData::ElementAccess {
                expression,
                question_dot_token,
                argument_expression,
            },
        )
    }

    /// The name after `.`. A keyword on the next line that is itself followed
    /// by a name is left alone: `a.\nlet b` is `a.<missing>; let b`.
    pub(crate) fn parse_right_side_of_dot(
        &mut self,
        allow_identifier_names: bool,
        allow_private_identifiers: bool,
    ) -> NodeId {
        if self.has_preceding_line_break()
            && self.token().is_identifier_or_keyword()
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line)
        {
            return self.create_missing_node(SyntaxKind::Identifier, true, &messages::IDENTIFIER_EXPECTED, &[]);
        }
        if self.token() == SyntaxKind::PrivateIdentifier {
            let node = self.parse_private_identifier();
            if allow_private_identifiers {
                return node;
            }
            return self.create_missing_node(SyntaxKind::Identifier, true, &messages::IDENTIFIER_EXPECTED, &[]);
        }
        if allow_identifier_names {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        }
    }

    fn parse_tagged_template_rest(
        &mut self,
        pos: u32,
        tag: NodeId,
        question_dot_token: Option<NodeId>,
        type_arguments: Option<ListId>,
    ) -> NodeId {
        let template = if self.token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            self.parse_literal_node()
        } else {
            self.parse_template_expression()
        };
        let flags = self.chain_flags(question_dot_token, tag);
        self.finish_node_with_flags(
            SyntaxKind::TaggedTemplateExpression,
            pos,
            flags,
            NodeData::TaggedTemplate {
                tag,
                type_arguments,
                template,
            },
        )
    }

    fn parse_call_expression_rest(&mut self, pos: u32, mut expression: NodeId) -> NodeId {
        loop {
            expression = self.parse_member_expression_rest(pos, expression, true);
            let question_dot_token = self.parse_optional_token(SyntaxKind::QuestionDotToken);

            if matches!(
                self.token(),
                SyntaxKind::LessThanToken | SyntaxKind::LessThanLessThanToken
            ) {
                // `f<T>(x)` is a generic call only when the type arguments
                // close and a call or template follows; otherwise `<` is a
                // comparison handled further up.
                if let Some(type_arguments) = self.try_parse(Self::parse_type_arguments_in_expression) {
                    if self.is_template_start_of_tagged_template() {
                        expression =
                            self.parse_tagged_template_rest(pos, expression, question_dot_token, Some(type_arguments));
                        continue;
                    }
                    let arguments = self.parse_argument_list();
                    expression = self.finish_call(pos, expression, question_dot_token, Some(type_arguments), arguments);
                    continue;
                }
            } else if self.token() == SyntaxKind::OpenParenToken {
                let arguments = self.parse_argument_list();
                expression = self.finish_call(pos, expression, question_dot_token, None, arguments);
                continue;
            }

            if let Some(question_dot_token) = question_dot_token {
                // `a?.` followed by nothing usable.
                let name = self.create_missing_node(
                    SyntaxKind::Identifier,
                    false,
                    &messages::IDENTIFIER_EXPECTED,
                    &[],
                );
                expression = self.finish_node_with_flags(
                    SyntaxKind::PropertyAccessExpression,
                    pos,
                    NodeFlags::OPTIONAL_CHAIN,
                    NodeData::PropertyAccess {
                        expression,
                        question_dot_token: Some(question_dot_token),
                        name,
                    },
                );
            }
            break;
        }
        expression
    }

    fn finish_call(
        &mut self,
        pos: u32,
        expression: NodeId,
        question_dot_token: Option<NodeId>,
        type_arguments: Option<ListId>,
        arguments: ListId,
    ) -> NodeId {
        let flags = self.chain_flags(question_dot_token, expression);
        self.finish_node_with_flags(
            SyntaxKind::CallExpression,
            pos,
            flags,
            NodeData::Call {
                expression,
                question_dot_token,
                type_arguments,
                arguments: Some(arguments),
            },
        )
    }

    pub(crate) fn parse_argument_list(&mut self) -> ListId {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let arguments = self.parse_delimited_list(
            ParsingContext::ArgumentExpressions,
            Self::parse_argument_expression,
            false,
        );
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_argument_expression(&mut self) -> NodeId {
        self.do_outside_context(
            ContextFlags::DISALLOW_IN | ContextFlags::DECORATOR,
            Self::parse_argument_or_array_literal_element,
        )
    }

    fn parse_type_arguments_in_expression(&mut self) -> Option<ListId> {
        if self.rescan(|s| s.rescan_less_than_token()) != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let type_arguments = self.parse_delimited_list(ParsingContext::TypeArguments, Self::parse_type, false);
        // Without the closing `>` this is certainly not a type argument list.
        if !self.parse_expected(SyntaxKind::GreaterThanToken) {
            return None;
        }
        self.can_follow_type_arguments_in_expression().then_some(type_arguments)
    }

    fn can_follow_type_arguments_in_expression(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateHead
        )
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => return self.parse_literal_node(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => return self.parse_token_node(),
            SyntaxKind::OpenParenToken => return self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => return self.parse_array_literal_expression(),
            SyntaxKind::OpenBraceToken => return self.parse_object_literal_expression(),
            // `async function` on one line; otherwise `async` is a name.
            SyntaxKind::AsyncKeyword => {
                if self.look_ahead(Self::next_token_is_function_keyword_on_same_line) {
                    return self.parse_function_expression();
                }
            }
            SyntaxKind::AtToken => return self.parse_decorated_expression(),
            SyntaxKind::ClassKeyword => {
                let pos = self.node_pos();
                return self.parse_class_declaration_or_expression(
                    pos,
                    None,
                    None,
                    SyntaxKind::ClassExpression,
                );
            }
            SyntaxKind::FunctionKeyword => return self.parse_function_expression(),
            SyntaxKind::NewKeyword => return self.parse_new_expression_or_new_dot_target(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                if self.rescan(|s| s.rescan_slash_token()) == SyntaxKind::RegularExpressionLiteral {
                    return self.parse_literal_node();
                }
            }
            SyntaxKind::TemplateHead => return self.parse_template_expression(),
            SyntaxKind::PrivateIdentifier => return self.parse_private_identifier(),
            _ => {}
        }
        self.parse_identifier_with(&messages::EXPRESSION_EXPECTED)
    }

    pub(crate) fn next_token_is_function_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::FunctionKeyword && !self.has_preceding_line_break()
    }

    fn parse_parenthesized_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(
            SyntaxKind::ParenthesizedExpression,
            pos,
            NodeData::Expr { expression },
        )
    }

    fn parse_spread_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.parse_assignment_expression_or_higher();
        self.finish_node(SyntaxKind::SpreadElement, pos, NodeData::Expr { expression })
    }

    fn parse_argument_or_array_literal_element(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::DotDotDotToken => self.parse_spread_element(),
            // A hole: `[a, , b]`.
            SyntaxKind::CommaToken => {
                let pos = self.node_pos();
                self.finish_node(SyntaxKind::OmittedExpression, pos, NodeData::Token {})
            }
            _ => self.parse_assignment_expression_or_higher(),
        }
    }

    fn parse_array_literal_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let multi_line = self.has_preceding_line_break();
        let elements = self.parse_delimited_list(
            ParsingContext::ArrayLiteralMembers,
            Self::parse_argument_or_array_literal_element,
            false,
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            SyntaxKind::ArrayLiteralExpression,
            pos,
            NodeData::ArrayLiteral {
                elements,
                multi_line,
            },
        )
    }

    fn parse_object_literal_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let multi_line = self.has_preceding_line_break();
        let properties = self.parse_delimited_list(
            ParsingContext::ObjectLiteralMembers,
            Self::parse_object_literal_element,
            true,
        );
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::ObjectLiteralExpression,
            pos,
            NodeData::ObjectLiteral {
                properties,
                multi_line,
            },
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeId {
        let pos = self.node_pos();

        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher();
            return self.finish_node(SyntaxKind::SpreadAssignment, pos, NodeData::Expr { expression });
        }

        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(false);

        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::GetAccessor, SignatureFlags::NONE);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::SetAccessor, SignatureFlags::NONE);
        }

        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let token_is_identifier = self.is_identifier();
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        let exclamation_token = self.parse_optional_token(SyntaxKind::ExclamationToken);

        if asterisk_token.is_some()
            || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            return self.parse_method_declaration(
                pos,
                decorators,
                modifiers,
                asterisk_token,
                name,
                question_token.or(exclamation_token),
            );
        }

        // `{ a }` and `{ a = 1 }` (the latter only valid as a pattern).
        if token_is_identifier && self.token() != SyntaxKind::ColonToken {
            let equals_token = self.parse_optional_token(SyntaxKind::EqualsToken);
            let object_assignment_initializer = if equals_token.is_some() {
                Some(self.allow_in_and(Self::parse_assignment_expression_or_higher))
            } else {
                None
            };
            return self.finish_node(
                SyntaxKind::ShorthandPropertyAssignment,
                pos,
                NodeData::ShorthandPropertyAssignment {
                    name,
                    equals_token,
                    object_assignment_initializer,
                },
            );
        }

        self.parse_expected(SyntaxKind::ColonToken);
        let initializer = self.allow_in_and(Self::parse_assignment_expression_or_higher);
        self.finish_node(
            SyntaxKind::PropertyAssignment,
            pos,
            NodeData::PropertyAssignment { name, initializer },
        )
    }

    fn parse_function_expression(&mut self) -> NodeId {
        self.do_outside_context(ContextFlags::DECORATOR, |p| {
            let pos = p.node_pos();
            let modifiers = p.parse_modifiers(false);
            p.parse_expected(SyntaxKind::FunctionKeyword);
            let asterisk_token = p.parse_optional_token(SyntaxKind::AsteriskToken);
            let is_generator = asterisk_token.is_some();
            let is_async = p.has_modifier(modifiers, SyntaxKind::AsyncKeyword);
            let name = p.with_function_context(is_generator, is_async, Self::parse_optional_binding_identifier);

            let mut flags = SignatureFlags::NONE;
            flags.set(SignatureFlags::YIELD, is_generator);
            flags.set(SignatureFlags::AWAIT, is_async);
            let type_parameters = p.parse_type_parameters();
            let parameters = p.parse_parameters(flags);
            let type_annotation = p.parse_return_type(SyntaxKind::ColonToken, false);
            let body = p.parse_function_block(flags, None);
            p.finish_node(
                SyntaxKind::FunctionExpression,
                pos,
                NodeData::Function {
                    decorators: None,
                    modifiers,
                    asterisk_token,
                    name,
                    type_parameters,
                    parameters,
                    type_annotation,
                    body: Some(body),
                },
            )
        })
    }

    /// `@dec class {}` in expression position.
    fn parse_decorated_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(false);
        if self.token() == SyntaxKind::ClassKeyword {
            return self.parse_class_declaration_or_expression(
                pos,
                decorators,
                modifiers,
                SyntaxKind::ClassExpression,
            );
        }
        self.parse_error_at_position(self.node_pos(), 0, &messages::EXPRESSION_EXPECTED, &[]);
        self.finish_node_with_flags(
            SyntaxKind::MissingDeclaration,
            pos,
            NodeFlags::MISSING,
            NodeData::MissingDeclaration {
                decorators,
                modifiers,
            },
        )
    }

    fn parse_new_expression_or_new_dot_target(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::NewKeyword);
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                SyntaxKind::MetaProperty,
                pos,
                NodeData::MetaProperty {
                    keyword_token: SyntaxKind::NewKeyword,
                    name,
                },
            );
        }

        let expression_pos = self.node_pos();
        let primary = self.parse_primary_expression();
        let expression = self.parse_member_expression_rest(expression_pos, primary, false);
        let type_arguments = if matches!(
            self.token(),
            SyntaxKind::LessThanToken | SyntaxKind::LessThanLessThanToken
        ) {
            self.try_parse(Self::parse_type_arguments_in_expression)
        } else {
            None
        };
        let arguments = (self.token() == SyntaxKind::OpenParenToken).then(|| self.parse_argument_list());
        self.finish_node(
            SyntaxKind::NewExpression,
            pos,
            NodeData::Call {
                expression,
                question_dot_token: None,
                type_arguments,
                arguments,
            },
        )
    }

    // ========================================================================
    // Templates
    // ========================================================================

    pub(crate) fn parse_template_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let head = self.parse_literal_node();
        let spans_pos = self.node_pos();
        let mut spans = Vec::new();
        loop {
            let span = self.parse_template_span();
            spans.push(span);
            let NodeData::TemplateSpan { literal, .. } = self.node(span).data else {
                break;
            };
            if self.kind_of(literal) != SyntaxKind::TemplateMiddle {
                break;
            }
        }
        let template_spans = self.create_list(spans, spans_pos);
        self.finish_node(
            SyntaxKind::TemplateExpression,
            pos,
            NodeData::Template {
                head,
                template_spans,
            },
        )
    }

    fn parse_template_span(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.allow_in_and(Self::parse_expression);
        let literal = self.parse_literal_of_template_span();
        self.finish_node(
            SyntaxKind::TemplateSpan,
            pos,
            NodeData::TemplateSpan { expression, literal },
        )
    }

    /// The `}...${` or `}...`` ` piece after a substitution.
    pub(crate) fn parse_literal_of_template_span(&mut self) -> NodeId {
        if self.token() == SyntaxKind::CloseBraceToken {
            self.rescan(|s| s.rescan_template_token());
            return self.parse_literal_node();
        }
        self.create_missing_node(SyntaxKind::TemplateTail, false, &messages::_0_EXPECTED, &["}"])
    }
}
