//! Statements and declarations: dispatch, blocks, control flow, variables,
//! binding patterns, functions, classes, interfaces, enums, modules and
//! module syntax.

use crate::parser::{Parser, ParsingContext, SignatureFlags};
use crate::utilities::{is_binding_pattern_start, is_declaration_start, is_property_name_start, is_statement_start};
use quill_ast::node::{ListId, NodeData, NodeId};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{ContextFlags, NodeFlags};
use quill_diagnostics::{messages, DiagnosticMessage};

impl<'a> Parser<'a> {
    // ========================================================================
    // Start predicates
    // ========================================================================

    pub(crate) fn is_start_of_statement(&mut self) -> bool {
        let token = self.token();
        if is_statement_start(token) {
            return true;
        }
        match token {
            // `import(...)` and `import.meta` begin expressions.
            SyntaxKind::ImportKeyword => {
                self.is_start_of_declaration()
                    || self.look_ahead(Self::next_token_is_open_paren_or_less_than_or_dot_token)
            }
            SyntaxKind::ConstKeyword | SyntaxKind::ExportKeyword => self.is_start_of_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::GlobalKeyword => true,
            SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::OverrideKeyword => {
                self.is_start_of_declaration()
                    || !self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line)
            }
            _ => self.is_start_of_expression(),
        }
    }

    fn next_token_is_open_paren_or_less_than_or_dot_token(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::DotToken
        )
    }

    pub(crate) fn is_start_of_expression_statement(&mut self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::OpenBraceToken
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::AtToken
        ) && self.is_start_of_expression()
    }

    fn is_start_of_declaration(&mut self) -> bool {
        is_declaration_start(self.token()) && self.look_ahead(Self::is_declaration)
    }

    /// Skips modifiers and decides whether a declaration keyword follows.
    /// Soft keywords only count when the next token fits on the same line.
    fn is_declaration(&mut self) -> bool {
        loop {
            match self.token() {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword => return true,
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    return self.next_token_is_identifier_on_same_line();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    return self.next_token_is_identifier_or_string_literal_on_same_line();
                }
                modifier @ (SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword) => {
                    self.next_token();
                    if self.has_preceding_line_break() {
                        return false;
                    }
                    if modifier == SyntaxKind::DeclareKeyword && self.token() == SyntaxKind::TypeKeyword {
                        return true;
                    }
                }
                SyntaxKind::GlobalKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::Identifier | SyntaxKind::ExportKeyword
                    );
                }
                SyntaxKind::ImportKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::StringLiteral | SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
                    ) || self.token().is_identifier_or_keyword();
                }
                SyntaxKind::ExportKeyword => {
                    let mut next = self.next_token();
                    if next == SyntaxKind::TypeKeyword {
                        next = self.look_ahead(Self::next_token);
                    }
                    if matches!(
                        next,
                        SyntaxKind::EqualsToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::DefaultKeyword
                            | SyntaxKind::AsKeyword
                            | SyntaxKind::AtToken
                    ) {
                        return true;
                    }
                }
                SyntaxKind::StaticKeyword => {
                    self.next_token();
                }
                _ => return false,
            }
        }
    }

    fn next_token_is_identifier_or_string_literal_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && (self.is_identifier() || self.token() == SyntaxKind::StringLiteral)
    }

    fn next_token_is_binding_identifier_or_start_of_destructuring(&mut self) -> bool {
        self.next_token();
        self.is_binding_identifier() || is_binding_pattern_start(self.token())
    }

    /// `let` followed by a binding name. Otherwise `let` is an identifier.
    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(Self::next_token_is_binding_identifier_or_start_of_destructuring)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeId {
        self.with_depth_guard(Self::parse_statement_worker)
    }

    fn parse_statement_worker(&mut self) -> NodeId {
        let pos = self.node_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::OpenBraceToken => self.parse_block(false, None),
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos, None, None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(pos, None, None),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, None, None),
            SyntaxKind::ClassKeyword => {
                self.parse_class_declaration_or_expression(pos, None, None, SyntaxKind::ClassDeclaration)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_or_for_in_or_for_of_statement(),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            // A stray `catch` or `finally` still parses as a `try`.
            SyntaxKind::TryKeyword | SyntaxKind::CatchKeyword | SyntaxKind::FinallyKeyword => {
                self.parse_try_statement()
            }
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::AtToken => self.parse_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::GlobalKeyword
                if self.is_start_of_declaration() =>
            {
                self.parse_declaration()
            }
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    fn parse_empty_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(SyntaxKind::EmptyStatement, pos, NodeData::Token {})
    }

    /// `{ statements }`. With `ignore_missing_open_brace` the statements are
    /// parsed even when `{` is absent.
    pub(crate) fn parse_block(
        &mut self,
        ignore_missing_open_brace: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> NodeId {
        let pos = self.node_pos();
        if self.parse_expected_with(SyntaxKind::OpenBraceToken, message) || ignore_missing_open_brace {
            let multi_line = self.has_preceding_line_break();
            let statements = self.parse_list(ParsingContext::BlockStatements, Self::parse_statement);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            return self.finish_node(
                SyntaxKind::Block,
                pos,
                NodeData::Block {
                    statements,
                    multi_line,
                },
            );
        }
        let statements = self.create_missing_list();
        self.finish_node(
            SyntaxKind::Block,
            pos,
            NodeData::Block {
                statements,
                multi_line: false,
            },
        )
    }

    /// A function body, parsed in the function's own yield/await context and
    /// outside any decorator.
    pub(crate) fn parse_function_block(
        &mut self,
        flags: SignatureFlags,
        message: Option<&'static DiagnosticMessage>,
    ) -> NodeId {
        self.with_function_context(
            flags.contains(SignatureFlags::YIELD),
            flags.contains(SignatureFlags::AWAIT),
            |p| {
                p.do_outside_context(ContextFlags::DECORATOR, |p| {
                    p.parse_block(flags.contains(SignatureFlags::IGNORE_MISSING_OPEN_BRACE), message)
                })
            },
        )
    }

    /// A body, or nothing for an overload or ambient signature ending in `;`.
    fn parse_function_block_or_semicolon(
        &mut self,
        flags: SignatureFlags,
        message: Option<&'static DiagnosticMessage>,
    ) -> Option<NodeId> {
        if self.token() != SyntaxKind::OpenBraceToken && self.can_parse_semicolon() {
            self.parse_semicolon();
            return None;
        }
        Some(self.parse_function_block(flags, message))
    }

    fn parse_if_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let else_statement = self
            .parse_optional(SyntaxKind::ElseKeyword)
            .then(|| self.parse_statement());
        self.finish_node(
            SyntaxKind::IfStatement,
            pos,
            NodeData::If {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DoKeyword);
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        // `do;while(0)x` is accepted: the `;` after a do-while is optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(
            SyntaxKind::DoStatement,
            pos,
            NodeData::Do {
                statement,
                expression,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            SyntaxKind::WhileStatement,
            pos,
            NodeData::Loop {
                expression,
                statement,
            },
        )
    }

    fn parse_with_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::WithKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            SyntaxKind::WithStatement,
            pos,
            NodeData::Loop {
                expression,
                statement,
            },
        )
    }

    fn parse_for_or_for_in_or_for_of_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ForKeyword);
        let await_modifier = self.parse_optional_token(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = match self.token() {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                Some(self.parse_variable_declaration_list(true))
            }
            _ => Some(self.disallow_in_and(Self::parse_expression)),
        };

        let is_for_of = if await_modifier.is_some() {
            self.parse_expected(SyntaxKind::OfKeyword)
        } else {
            self.parse_optional(SyntaxKind::OfKeyword)
        };

        if is_for_of || self.parse_optional(SyntaxKind::InKeyword) {
            let initializer = match initializer {
                Some(initializer) => initializer,
                None => self.create_missing_node(SyntaxKind::Identifier, true, &messages::EXPRESSION_EXPECTED, &[]),
            };
            let expression = if is_for_of {
                self.allow_in_and(Self::parse_assignment_expression_or_higher)
            } else {
                self.allow_in_and(Self::parse_expression)
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            let kind = if is_for_of {
                SyntaxKind::ForOfStatement
            } else {
                SyntaxKind::ForInStatement
            };
            return self.finish_node(
                kind,
                pos,
                NodeData::ForInOrOf {
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = (!matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseParenToken
        ))
        .then(|| self.allow_in_and(Self::parse_expression));
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = (self.token() != SyntaxKind::CloseParenToken)
            .then(|| self.allow_in_and(Self::parse_expression));
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            SyntaxKind::ForStatement,
            pos,
            NodeData::For {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    fn parse_break_or_continue_statement(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let label = (!self.can_parse_semicolon()).then(|| self.parse_identifier());
        self.parse_semicolon();
        self.finish_node(kind, pos, NodeData::Jump { label })
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = (!self.can_parse_semicolon()).then(|| self.allow_in_and(Self::parse_expression));
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ReturnStatement,
            pos,
            NodeData::OptionalExpr { expression },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::SwitchKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let case_block = self.parse_case_block();
        self.finish_node(
            SyntaxKind::SwitchStatement,
            pos,
            NodeData::Switch {
                expression,
                case_block,
            },
        )
    }

    fn parse_case_block(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let clauses = self.parse_list(ParsingContext::SwitchClauses, Self::parse_case_or_default_clause);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(SyntaxKind::CaseBlock, pos, NodeData::CaseBlock { clauses })
    }

    fn parse_case_or_default_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.parse_optional(SyntaxKind::CaseKeyword) {
            let expression = self.allow_in_and(Self::parse_expression);
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_list(ParsingContext::SwitchClauseStatements, Self::parse_statement);
            return self.finish_node(
                SyntaxKind::CaseClause,
                pos,
                NodeData::CaseClause {
                    expression,
                    statements,
                },
            );
        }
        self.parse_expected(SyntaxKind::DefaultKeyword);
        self.parse_expected(SyntaxKind::ColonToken);
        let statements = self.parse_list(ParsingContext::SwitchClauseStatements, Self::parse_statement);
        self.finish_node(
            SyntaxKind::DefaultClause,
            pos,
            NodeData::DefaultClause { statements },
        )
    }

    fn parse_throw_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ThrowKeyword);
        let expression = if self.has_preceding_line_break() {
            self.create_missing_node(
                SyntaxKind::Identifier,
                true,
                &messages::LINE_BREAK_NOT_PERMITTED_HERE,
                &[],
            )
        } else {
            self.allow_in_and(Self::parse_expression)
        };
        self.parse_semicolon();
        self.finish_node(SyntaxKind::ThrowStatement, pos, NodeData::Expr { expression })
    }

    fn parse_try_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::TryKeyword);
        let try_block = self.parse_block(false, None);
        let catch_clause = (self.token() == SyntaxKind::CatchKeyword).then(|| self.parse_catch_clause());
        let finally_block = if catch_clause.is_none() || self.token() == SyntaxKind::FinallyKeyword {
            self.parse_expected_with(SyntaxKind::FinallyKeyword, Some(&messages::CATCH_OR_FINALLY_EXPECTED));
            Some(self.parse_block(false, None))
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::TryStatement,
            pos,
            NodeData::Try {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    fn parse_catch_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::CatchKeyword);
        // `catch { }` binds nothing.
        let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
            let declaration = self.parse_variable_declaration(false);
            self.parse_expected(SyntaxKind::CloseParenToken);
            Some(declaration)
        } else {
            None
        };
        let block = self.parse_block(false, None);
        self.finish_node(
            SyntaxKind::CatchClause,
            pos,
            NodeData::CatchClause {
                variable_declaration,
                block,
            },
        )
    }

    fn parse_debugger_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DebuggerKeyword);
        self.parse_semicolon();
        self.finish_node(SyntaxKind::DebuggerStatement, pos, NodeData::Token {})
    }

    /// An expression statement, or `label: statement` when the expression is
    /// a lone identifier followed by `:`.
    fn parse_expression_or_labeled_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.allow_in_and(Self::parse_expression);
        if self.kind_of(expression) == SyntaxKind::Identifier && self.parse_optional(SyntaxKind::ColonToken) {
            let statement = self.parse_statement();
            return self.finish_node(
                SyntaxKind::LabeledStatement,
                pos,
                NodeData::Labeled {
                    label: expression,
                    statement,
                },
            );
        }
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ExpressionStatement,
            pos,
            NodeData::Expr { expression },
        )
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Decorators and modifiers, then the declaration they apply to.
    fn parse_declaration(&mut self) -> NodeId {
        let pos = self.node_pos();
        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(false);
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, decorators, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, decorators, modifiers),
            SyntaxKind::ClassKeyword => {
                self.parse_class_declaration_or_expression(pos, decorators, modifiers, SyntaxKind::ClassDeclaration)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, decorators, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, decorators, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, decorators, modifiers),
            SyntaxKind::GlobalKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                self.parse_module_declaration(pos, decorators, modifiers)
            }
            SyntaxKind::ImportKeyword => {
                self.parse_import_declaration_or_import_equals_declaration(pos, decorators, modifiers)
            }
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword | SyntaxKind::EqualsToken => {
                        self.parse_export_assignment(pos, decorators, modifiers)
                    }
                    _ => self.parse_export_declaration(pos, decorators, modifiers),
                }
            }
            _ if decorators.is_some() || modifiers.is_some() => {
                // Decorators or modifiers with nothing to apply to.
                self.parse_error_at_position(self.node_pos(), 0, &messages::DECLARATION_EXPECTED, &[]);
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
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    // ---- decorators and modifiers -----------------------------------------

    pub(crate) fn parse_decorators(&mut self) -> Option<ListId> {
        let pos = self.node_pos();
        let mut decorators = Vec::new();
        while self.token() == SyntaxKind::AtToken {
            let decorator_pos = self.node_pos();
            self.next_token();
            let expression = self.do_in_context(
                ContextFlags::DECORATOR,
                Self::parse_left_hand_side_expression_or_higher,
            );
            decorators.push(self.finish_node(
                SyntaxKind::Decorator,
                decorator_pos,
                NodeData::Expr { expression },
            ));
        }
        (!decorators.is_empty()).then(|| self.create_list(decorators, pos))
    }

    /// Modifier keywords that are followed by something they can modify.
    /// `const` is accepted as a modifier in class bodies only when asked,
    /// so it can be reported later instead of ending the member.
    pub(crate) fn parse_modifiers(&mut self, permit_const_as_modifier: bool) -> Option<ListId> {
        let pos = self.node_pos();
        let mut modifiers = Vec::new();
        loop {
            let modifier_pos = self.node_pos();
            let kind = self.token();
            let accepted = if kind == SyntaxKind::ConstKeyword && permit_const_as_modifier {
                self.try_parse(|p| p.next_token_is_on_same_line().then_some(())).is_some()
            } else {
                kind.is_modifier_kind() && self.try_parse(Self::try_next_token_can_follow_modifier).is_some()
            };
            if !accepted {
                break;
            }
            modifiers.push(self.finish_node(kind, modifier_pos, NodeData::Token {}));
        }
        (!modifiers.is_empty()).then(|| self.create_list(modifiers, pos))
    }

    pub(crate) fn has_modifier(&self, modifiers: Option<ListId>, kind: SyntaxKind) -> bool {
        self.arena
            .list_elements(modifiers)
            .iter()
            .any(|&modifier| self.kind_of(modifier) == kind)
    }

    /// Consume `get`, `set` or another soft modifier when what follows makes
    /// it one.
    pub(crate) fn parse_contextual_modifier(&mut self, kind: SyntaxKind) -> bool {
        self.token() == kind && self.try_parse(Self::try_next_token_can_follow_modifier).is_some()
    }

    fn try_next_token_can_follow_modifier(&mut self) -> Option<()> {
        self.next_token_can_follow_modifier().then_some(())
    }

    fn next_token_can_follow_modifier(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ConstKeyword => self.next_token() == SyntaxKind::EnumKeyword,
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword => self.look_ahead(Self::next_token_can_follow_default_keyword),
                    SyntaxKind::TypeKeyword => self.look_ahead(Self::next_token_can_follow_export_modifier),
                    _ => self.can_follow_export_modifier(),
                }
            }
            SyntaxKind::DefaultKeyword => self.next_token_can_follow_default_keyword(),
            SyntaxKind::StaticKeyword | SyntaxKind::GetKeyword | SyntaxKind::SetKeyword => {
                self.next_token();
                self.can_follow_modifier()
            }
            _ => {
                self.next_token();
                !self.has_preceding_line_break() && self.can_follow_modifier()
            }
        }
    }

    fn next_token_can_follow_export_modifier(&mut self) -> bool {
        self.next_token();
        self.can_follow_export_modifier()
    }

    fn can_follow_export_modifier(&mut self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::AsteriskToken | SyntaxKind::AsKeyword | SyntaxKind::OpenBraceToken
        ) && self.can_follow_modifier()
    }

    fn can_follow_modifier(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken | SyntaxKind::DotDotDotToken
        ) || is_property_name_start(self.token())
    }

    fn next_token_can_follow_default_keyword(&mut self) -> bool {
        match self.next_token() {
            SyntaxKind::ClassKeyword | SyntaxKind::FunctionKeyword | SyntaxKind::InterfaceKeyword => true,
            SyntaxKind::AbstractKeyword => self.look_ahead(Self::next_token_is_class_keyword_on_same_line),
            SyntaxKind::AsyncKeyword => self.look_ahead(Self::next_token_is_function_keyword_on_same_line),
            _ => false,
        }
    }

    fn next_token_is_class_keyword_on_same_line(&mut self) -> bool {
        self.next_token() == SyntaxKind::ClassKeyword && !self.has_preceding_line_break()
    }

    // ---- variables and binding patterns -----------------------------------

    fn parse_variable_statement(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        let declaration_list = self.parse_variable_declaration_list(false);
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::VariableStatement,
            pos,
            NodeData::VariableStatement {
                decorators,
                modifiers,
                declaration_list,
            },
        )
    }

    /// `var`/`let`/`const` and its declarators. In a `for` head `in` is not
    /// an operator, so `for (var x = a in b)` stops before `in`.
    pub(crate) fn parse_variable_declaration_list(&mut self, in_for_statement_initializer: bool) -> NodeId {
        let pos = self.node_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        // `for (let of x)`: `of` is the keyword, not a binding.
        let declarations = if self.token() == SyntaxKind::OfKeyword && self.look_ahead(Self::can_follow_contextual_of_keyword) {
            self.create_missing_list()
        } else {
            let parse_declarations = |p: &mut Self| {
                p.parse_delimited_list(
                    ParsingContext::VariableDeclarations,
                    |p| p.parse_variable_declaration(!in_for_statement_initializer),
                    false,
                )
            };
            if in_for_statement_initializer {
                self.disallow_in_and(parse_declarations)
            } else {
                self.allow_in_and(parse_declarations)
            }
        };
        self.finish_node_with_flags(
            SyntaxKind::VariableDeclarationList,
            pos,
            flags,
            NodeData::VariableDeclarationList { declarations },
        )
    }

    fn can_follow_contextual_of_keyword(&mut self) -> bool {
        self.next_token();
        self.is_identifier() && self.next_token() == SyntaxKind::CloseParenToken
    }

    fn parse_variable_declaration(&mut self, allow_exclamation: bool) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_identifier_or_pattern();
        let exclamation_token = if allow_exclamation
            && self.kind_of(name) == SyntaxKind::Identifier
            && self.token() == SyntaxKind::ExclamationToken
            && !self.has_preceding_line_break()
        {
            Some(self.parse_token_node())
        } else {
            None
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = if matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::OfKeyword) {
            None
        } else {
            self.parse_initializer()
        };
        self.finish_node(
            SyntaxKind::VariableDeclaration,
            pos,
            NodeData::VariableDeclaration {
                name,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    pub(crate) fn is_binding_identifier_or_pattern(&self) -> bool {
        is_binding_pattern_start(self.token())
            || self.token() == SyntaxKind::PrivateIdentifier
            || self.is_binding_identifier()
    }

    pub(crate) fn parse_identifier_or_pattern(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::OpenBracketToken => self.with_depth_guard(Self::parse_array_binding_pattern),
            SyntaxKind::OpenBraceToken => self.with_depth_guard(Self::parse_object_binding_pattern),
            _ => self.parse_binding_identifier(),
        }
    }

    fn parse_array_binding_pattern(&mut self) -> NodeId {
        let pos = self.node_pos();
        let elements = self.parse_bracketed_list(
            ParsingContext::ArrayBindingElements,
            Self::parse_array_binding_element,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
        );
        self.finish_node(
            SyntaxKind::ArrayBindingPattern,
            pos,
            NodeData::BindingPattern { elements },
        )
    }

    fn parse_array_binding_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        // A hole: `[, b]`.
        if self.token() == SyntaxKind::CommaToken {
            return self.finish_node(SyntaxKind::OmittedExpression, pos, NodeData::Token {});
        }
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_or_pattern();
        let initializer = self.parse_initializer();
        self.finish_node(
            SyntaxKind::BindingElement,
            pos,
            NodeData::BindingElement {
                dot_dot_dot_token,
                property_name: None,
                name,
                initializer,
            },
        )
    }

    fn parse_object_binding_pattern(&mut self) -> NodeId {
        let pos = self.node_pos();
        let elements = self.parse_bracketed_list(
            ParsingContext::ObjectBindingElements,
            Self::parse_object_binding_element,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
        );
        self.finish_node(
            SyntaxKind::ObjectBindingPattern,
            pos,
            NodeData::BindingPattern { elements },
        )
    }

    /// `a`, `a = 1`, `key: pattern` or `...rest`.
    fn parse_object_binding_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let token_is_identifier = self.is_binding_identifier();
        let property_name = self.parse_property_name();
        let (property_name, name) = if token_is_identifier && self.token() != SyntaxKind::ColonToken {
            (None, property_name)
        } else {
            self.parse_expected(SyntaxKind::ColonToken);
            (Some(property_name), self.parse_identifier_or_pattern())
        };
        let initializer = self.parse_initializer();
        self.finish_node(
            SyntaxKind::BindingElement,
            pos,
            NodeData::BindingElement {
                dot_dot_dot_token,
                property_name,
                name,
                initializer,
            },
        )
    }

    // ---- property names ---------------------------------------------------

    pub(crate) fn parse_property_name(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_literal_node()
            }
            SyntaxKind::OpenBracketToken => self.parse_computed_property_name(),
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            _ => self.parse_identifier_name(),
        }
    }

    fn parse_computed_property_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        // `in` is always an operator inside `[...]`.
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            SyntaxKind::ComputedPropertyName,
            pos,
            NodeData::Expr { expression },
        )
    }

    // ---- functions --------------------------------------------------------

    fn parse_function_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        // `export default function () {}` may be anonymous.
        let name = if self.has_modifier(modifiers, SyntaxKind::DefaultKeyword) {
            self.parse_optional_binding_identifier()
        } else {
            Some(self.parse_binding_identifier())
        };
        let flags = signature_flags(
            asterisk_token.is_some(),
            self.has_modifier(modifiers, SyntaxKind::AsyncKeyword),
        );
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(flags);
        let type_annotation = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(flags, Some(&messages::OR_EXPECTED));
        self.finish_node(
            SyntaxKind::FunctionDeclaration,
            pos,
            NodeData::Function {
                decorators,
                modifiers,
                asterisk_token,
                name,
                type_parameters,
                parameters,
                type_annotation,
                body,
            },
        )
    }

    // ---- classes ----------------------------------------------------------

    pub(crate) fn parse_class_declaration_or_expression(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        kind: SyntaxKind,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ClassKeyword);
        // `class implements I {}` has no name.
        let name = if self.is_binding_identifier() && !self.is_implements_clause() {
            Some(self.parse_binding_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_list(ParsingContext::ClassMembers, Self::parse_class_element);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            self.create_missing_list()
        };
        self.finish_node(
            kind,
            pos,
            NodeData::Class {
                decorators,
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn is_implements_clause(&mut self) -> bool {
        self.token() == SyntaxKind::ImplementsKeyword
            && self.look_ahead(|p| p.next_token().is_identifier_or_keyword())
    }

    fn parse_heritage_clauses(&mut self) -> Option<ListId> {
        crate::utilities::is_heritage_clause_keyword(self.token())
            .then(|| self.parse_list(ParsingContext::HeritageClauses, Self::parse_heritage_clause))
    }

    fn parse_heritage_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        let token = self.token();
        self.next_token();
        let types = self.parse_delimited_list(
            ParsingContext::HeritageClauseElement,
            Self::parse_expression_with_type_arguments,
            false,
        );
        self.finish_node(
            SyntaxKind::HeritageClause,
            pos,
            NodeData::HeritageClause { token, types },
        )
    }

    fn parse_expression_with_type_arguments(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_left_hand_side_expression_or_higher();
        let type_arguments = self.try_parse_type_arguments();
        self.finish_node(
            SyntaxKind::ExpressionWithTypeArguments,
            pos,
            NodeData::ExpressionWithTypeArguments {
                expression,
                type_arguments,
            },
        )
    }

    /// `extends` or `implements` that starts a new clause rather than naming
    /// a base type.
    pub(crate) fn is_heritage_clause_extends_or_implements_keyword(&mut self) -> bool {
        crate::utilities::is_heritage_clause_keyword(self.token())
            && self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_expression()
            })
    }

    /// Run under [`Parser::look_ahead`].
    pub(crate) fn is_class_member_start(&mut self) -> bool {
        if self.token() == SyntaxKind::AtToken {
            return true;
        }
        let mut id_token = None;
        while self.token().is_modifier_kind() {
            let modifier = self.token();
            // Access and `static` modifiers can only begin a member.
            if matches!(
                modifier,
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::StaticKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::OverrideKeyword
            ) {
                return true;
            }
            id_token = Some(modifier);
            self.next_token();
        }
        if self.token() == SyntaxKind::AsteriskToken {
            return true;
        }
        if self.is_literal_property_name() || self.token() == SyntaxKind::PrivateIdentifier {
            id_token = Some(self.token());
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        let Some(id_token) = id_token else {
            return false;
        };
        if !id_token.is_keyword() || matches!(id_token, SyntaxKind::GetKeyword | SyntaxKind::SetKeyword) {
            return true;
        }
        matches!(
            self.token(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::QuestionToken
        ) || self.can_parse_semicolon()
    }

    fn parse_class_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.token() == SyntaxKind::SemicolonToken {
            self.next_token();
            return self.finish_node(SyntaxKind::SemicolonClassElement, pos, NodeData::Token {});
        }
        if self.token() == SyntaxKind::StaticKeyword && self.look_ahead(|p| p.next_token() == SyntaxKind::OpenBraceToken) {
            return self.parse_class_static_block_declaration();
        }

        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(true);

        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::GetAccessor, SignatureFlags::NONE);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::SetAccessor, SignatureFlags::NONE);
        }
        if matches!(
            self.token(),
            SyntaxKind::ConstructorKeyword | SyntaxKind::StringLiteral
        ) {
            if let Some(constructor) = self.try_parse_constructor_declaration(pos, decorators, modifiers) {
                return constructor;
            }
        }
        if self.is_index_signature() {
            return self.parse_index_signature_declaration(pos, decorators, modifiers);
        }
        if self.token().is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
        {
            return self.parse_property_or_method_declaration(pos, decorators, modifiers);
        }

        // Decorators or modifiers with no member after them.
        let name = self.create_missing_node(SyntaxKind::Identifier, true, &messages::DECLARATION_EXPECTED, &[]);
        self.parse_property_declaration(pos, decorators, modifiers, name, None)
    }

    fn parse_class_static_block_declaration(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::StaticKeyword);
        let body = self.with_function_context(false, true, |p| p.parse_block(false, None));
        self.finish_node(
            SyntaxKind::ClassStaticBlockDeclaration,
            pos,
            NodeData::ClassStaticBlock { body },
        )
    }

    fn try_parse_constructor_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> Option<NodeId> {
        self.try_parse(|p| {
            if !p.parse_constructor_name() {
                return None;
            }
            let type_parameters = p.parse_type_parameters();
            let parameters = p.parse_parameters(SignatureFlags::NONE);
            let type_annotation = p.parse_return_type(SyntaxKind::ColonToken, false);
            let body = p.parse_function_block_or_semicolon(SignatureFlags::NONE, Some(&messages::OR_EXPECTED));
            Some(p.finish_node(
                SyntaxKind::Constructor,
                pos,
                NodeData::Constructor {
                    decorators,
                    modifiers,
                    type_parameters,
                    parameters,
                    type_annotation,
                    body,
                },
            ))
        })
    }

    /// `constructor` or `"constructor"` followed by `(`.
    fn parse_constructor_name(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ConstructorKeyword => self.parse_expected(SyntaxKind::ConstructorKeyword),
            SyntaxKind::StringLiteral if self.look_ahead(|p| p.next_token() == SyntaxKind::OpenParenToken) => self
                .try_parse(|p| {
                    let literal = p.parse_literal_node();
                    (p.node_text(literal) == "constructor").then_some(())
                })
                .is_some(),
            _ => false,
        }
    }

    fn parse_property_or_method_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if asterisk_token.is_some()
            || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            return self.parse_method_declaration(pos, decorators, modifiers, asterisk_token, name, question_token);
        }
        self.parse_property_declaration(pos, decorators, modifiers, name, question_token)
    }

    fn parse_property_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        question_token: Option<NodeId>,
    ) -> NodeId {
        let exclamation_token = if question_token.is_none() && !self.has_preceding_line_break() {
            self.parse_optional_token(SyntaxKind::ExclamationToken)
        } else {
            None
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = self.do_outside_context(
            ContextFlags::YIELD | ContextFlags::AWAIT | ContextFlags::DISALLOW_IN,
            Self::parse_initializer,
        );
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::PropertyDeclaration,
            pos,
            NodeData::PropertyDeclaration {
                decorators,
                modifiers,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// A method after its name, in a class body or object literal.
    pub(crate) fn parse_method_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        asterisk_token: Option<NodeId>,
        name: NodeId,
        question_token: Option<NodeId>,
    ) -> NodeId {
        let flags = signature_flags(
            asterisk_token.is_some(),
            self.has_modifier(modifiers, SyntaxKind::AsyncKeyword),
        );
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(flags);
        let type_annotation = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(flags, Some(&messages::OR_EXPECTED));
        self.finish_node(
            SyntaxKind::MethodDeclaration,
            pos,
            NodeData::MethodDeclaration {
                decorators,
                modifiers,
                asterisk_token,
                name,
                question_token,
                type_parameters,
                parameters,
                type_annotation,
                body,
            },
        )
    }

    /// `get`/`set` after the keyword. In a type member (`flags` has `TYPE`)
    /// the body is optional and `,` may end the member.
    pub(crate) fn parse_accessor_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        kind: SyntaxKind,
        flags: SignatureFlags,
    ) -> NodeId {
        let name = self.parse_property_name();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::NONE);
        let is_type = flags.contains(SignatureFlags::TYPE);
        let type_annotation = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = if is_type && self.token() != SyntaxKind::OpenBraceToken {
            self.parse_type_member_semicolon();
            None
        } else {
            self.parse_function_block_or_semicolon(SignatureFlags::NONE, None)
        };
        self.finish_node(
            kind,
            pos,
            NodeData::Accessor {
                decorators,
                modifiers,
                name,
                type_parameters,
                parameters,
                type_annotation,
                body,
            },
        )
    }

    // ---- interfaces, type aliases, enums ----------------------------------

    fn parse_interface_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        self.finish_node(
            SyntaxKind::InterfaceDeclaration,
            pos,
            NodeData::Interface {
                decorators,
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn parse_type_alias_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::TypeAliasDeclaration,
            pos,
            NodeData::TypeAlias {
                decorators,
                modifiers,
                name,
                type_parameters,
                type_node,
            },
        )
    }

    fn parse_enum_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.do_outside_context(ContextFlags::YIELD | ContextFlags::AWAIT, |p| {
                p.parse_delimited_list(ParsingContext::EnumMembers, Self::parse_enum_member, false)
            });
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            self.create_missing_list()
        };
        self.finish_node(
            SyntaxKind::EnumDeclaration,
            pos,
            NodeData::Enum {
                decorators,
                modifiers,
                name,
                members,
            },
        )
    }

    fn parse_enum_member(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_property_name();
        let initializer = self.allow_in_and(Self::parse_initializer);
        self.finish_node(
            SyntaxKind::EnumMember,
            pos,
            NodeData::EnumMember { name, initializer },
        )
    }

    // ---- modules ----------------------------------------------------------

    fn parse_module_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        if self.token() == SyntaxKind::GlobalKeyword {
            return self.parse_ambient_external_module_declaration(pos, decorators, modifiers);
        }
        if self.parse_optional(SyntaxKind::NamespaceKeyword) {
            return self.parse_module_or_namespace_declaration(pos, decorators, modifiers, NodeFlags::NAMESPACE);
        }
        self.parse_expected(SyntaxKind::ModuleKeyword);
        if self.token() == SyntaxKind::StringLiteral {
            return self.parse_ambient_external_module_declaration(pos, decorators, modifiers);
        }
        self.parse_module_or_namespace_declaration(pos, decorators, modifiers, NodeFlags::NONE)
    }

    /// `a.b.c { }` nests one module declaration per dotted segment.
    fn parse_module_or_namespace_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        flags: NodeFlags,
    ) -> NodeId {
        let namespace_flag = flags & NodeFlags::NAMESPACE;
        let name = self.parse_identifier();
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_pos = self.node_pos();
            self.with_depth_guard(|p| {
                p.parse_module_or_namespace_declaration(
                    inner_pos,
                    None,
                    None,
                    NodeFlags::NESTED_NAMESPACE | namespace_flag,
                )
            })
        } else {
            self.parse_module_block()
        };
        self.finish_node_with_flags(
            SyntaxKind::ModuleDeclaration,
            pos,
            flags,
            NodeData::Module {
                decorators,
                modifiers,
                name,
                body: Some(body),
            },
        )
    }

    /// `module "name" { }`, `declare module "name";` and `global { }`.
    fn parse_ambient_external_module_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        let (name, flags) = if self.token() == SyntaxKind::GlobalKeyword {
            (self.parse_identifier(), NodeFlags::GLOBAL_AUGMENTATION)
        } else {
            (self.parse_literal_node(), NodeFlags::NONE)
        };
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_module_block())
        } else {
            self.parse_semicolon();
            None
        };
        self.finish_node_with_flags(
            SyntaxKind::ModuleDeclaration,
            pos,
            flags,
            NodeData::Module {
                decorators,
                modifiers,
                name,
                body,
            },
        )
    }

    fn parse_module_block(&mut self) -> NodeId {
        let pos = self.node_pos();
        let statements = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let statements = self.parse_list(ParsingContext::BlockStatements, Self::parse_statement);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            statements
        } else {
            self.create_missing_list()
        };
        self.finish_node(
            SyntaxKind::ModuleBlock,
            pos,
            NodeData::Block {
                statements,
                multi_line: true,
            },
        )
    }

    // ---- imports and exports ----------------------------------------------

    fn parse_import_declaration_or_import_equals_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ImportKeyword);
        let after_import_pos = self.node_pos();

        let mut identifier = self.is_identifier().then(|| self.parse_identifier());
        let mut is_type_only = false;
        if let Some(name) = identifier {
            // `import type x from`, `import type { x }`, `import type x = require()`.
            if self.node_text(name) == "type"
                && (self.token() != SyntaxKind::FromKeyword
                    || (self.is_identifier() && self.look_ahead(|p| p.next_token() == SyntaxKind::FromKeyword)))
                && (self.is_identifier() || self.token_after_import_definitely_produces_import_declaration())
            {
                is_type_only = true;
                identifier = self.is_identifier().then(|| self.parse_identifier());
            }
        }

        if let Some(name) = identifier {
            if !matches!(self.token(), SyntaxKind::CommaToken | SyntaxKind::FromKeyword) {
                return self.parse_import_equals_declaration(pos, decorators, modifiers, name, is_type_only);
            }
        }

        let import_clause = (identifier.is_some() || self.token_after_import_definitely_produces_import_declaration())
            .then(|| self.parse_import_clause(identifier, after_import_pos, is_type_only));
        if import_clause.is_some() {
            self.parse_expected(SyntaxKind::FromKeyword);
        }
        let module_specifier = self.parse_module_specifier();
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ImportDeclaration,
            pos,
            NodeData::Import {
                decorators,
                modifiers,
                import_clause,
                module_specifier,
            },
        )
    }

    fn token_after_import_definitely_produces_import_declaration(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
        )
    }

    fn parse_import_equals_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
        name: NodeId,
        is_type_only: bool,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::EqualsToken);
        let module_reference = self.parse_module_reference();
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ImportEqualsDeclaration,
            pos,
            NodeData::ImportEquals {
                decorators,
                modifiers,
                is_type_only,
                name,
                module_reference,
            },
        )
    }

    fn parse_module_reference(&mut self) -> NodeId {
        if self.token() == SyntaxKind::RequireKeyword
            && self.look_ahead(|p| p.next_token() == SyntaxKind::OpenParenToken)
        {
            let pos = self.node_pos();
            self.parse_expected(SyntaxKind::RequireKeyword);
            self.parse_expected(SyntaxKind::OpenParenToken);
            let expression = self.parse_module_specifier();
            self.parse_expected(SyntaxKind::CloseParenToken);
            return self.finish_node(
                SyntaxKind::ExternalModuleReference,
                pos,
                NodeData::Expr { expression },
            );
        }
        self.parse_entity_name(false, None)
    }

    /// Any expression is accepted for recovery; only a string literal is
    /// valid.
    fn parse_module_specifier(&mut self) -> NodeId {
        if self.token() == SyntaxKind::StringLiteral {
            return self.parse_literal_node();
        }
        self.parse_expression()
    }

    fn parse_import_clause(&mut self, name: Option<NodeId>, pos: u32, is_type_only: bool) -> NodeId {
        // `import d, * as ns` / `import d, { a }` / `import * as ns` / `import { a }`.
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            Some(if self.token() == SyntaxKind::AsteriskToken {
                self.parse_namespace_import()
            } else {
                self.parse_named_imports_or_exports(SyntaxKind::NamedImports)
            })
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::ImportClause,
            pos,
            NodeData::ImportClause {
                is_type_only,
                name,
                named_bindings,
            },
        )
    }

    fn parse_namespace_import(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = self.parse_identifier();
        self.finish_node(
            SyntaxKind::NamespaceImport,
            pos,
            NodeData::NamespaceBinding { name },
        )
    }

    fn parse_named_imports_or_exports(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let specifier_kind = if kind == SyntaxKind::NamedImports {
            SyntaxKind::ImportSpecifier
        } else {
            SyntaxKind::ExportSpecifier
        };
        let elements = self.parse_bracketed_list(
            ParsingContext::ImportOrExportSpecifiers,
            |p| p.parse_import_or_export_specifier(specifier_kind),
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
        );
        self.finish_node(kind, pos, NodeData::Specifiers { elements })
    }

    /// A specifier name. Returns the span of a reserved word used as the
    /// name, which is only an error for the local name of an import.
    fn parse_specifier_name(&mut self) -> (NodeId, Option<(u32, u32)>) {
        if self.token() == SyntaxKind::StringLiteral {
            return (self.parse_literal_node(), None);
        }
        let keyword_span = (self.token().is_keyword() && !self.is_identifier())
            .then(|| (self.token_pos(), self.token_end()));
        (self.parse_identifier_name(), keyword_span)
    }

    /// `a`, `a as b`, `type a`, `type a as b`, and the degenerate
    /// `type as`, `type as as`, `type as as b` forms.
    fn parse_import_or_export_specifier(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let (mut name, mut keyword_span) = self.parse_specifier_name();
        let mut property_name = None;
        let mut is_type_only = false;
        let mut can_parse_as_keyword = true;

        if self.kind_of(name) == SyntaxKind::Identifier && self.node_text(name) == "type" {
            if self.token() == SyntaxKind::AsKeyword {
                let first_as = self.parse_identifier_name();
                if self.token() == SyntaxKind::AsKeyword {
                    let second_as = self.parse_identifier_name();
                    if self.token().is_identifier_or_keyword() {
                        // `type as as x`
                        is_type_only = true;
                        property_name = Some(first_as);
                        (name, keyword_span) = self.parse_specifier_name();
                    } else {
                        // `type as as`
                        property_name = Some(name);
                        name = second_as;
                    }
                    can_parse_as_keyword = false;
                } else if self.token().is_identifier_or_keyword() {
                    // `type as x`
                    property_name = Some(name);
                    can_parse_as_keyword = false;
                    (name, keyword_span) = self.parse_specifier_name();
                } else {
                    // `type as`
                    is_type_only = true;
                    name = first_as;
                }
            } else if self.token().is_identifier_or_keyword() || self.token() == SyntaxKind::StringLiteral {
                // `type x`
                is_type_only = true;
                (name, keyword_span) = self.parse_specifier_name();
            }
        }

        if can_parse_as_keyword && self.token() == SyntaxKind::AsKeyword {
            property_name = Some(name);
            self.parse_expected(SyntaxKind::AsKeyword);
            (name, keyword_span) = self.parse_specifier_name();
        }
        if kind == SyntaxKind::ImportSpecifier {
            if let Some((start, end)) = keyword_span {
                self.parse_error_at_range(start, end, &messages::IDENTIFIER_EXPECTED, &[]);
            }
        }
        self.finish_node(
            kind,
            pos,
            NodeData::Specifier {
                is_type_only,
                property_name,
                name,
            },
        )
    }

    /// `export = x;` or `export default x;`, after `export`.
    fn parse_export_assignment(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        let is_export_equals = self.parse_optional(SyntaxKind::EqualsToken);
        if !is_export_equals {
            self.parse_expected(SyntaxKind::DefaultKeyword);
        }
        let expression = self.allow_in_and(Self::parse_assignment_expression_or_higher);
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ExportAssignment,
            pos,
            NodeData::ExportAssignment {
                decorators,
                modifiers,
                is_export_equals,
                expression,
            },
        )
    }

    /// `export * from`, `export * as ns from`, `export { a } [from "m"]`,
    /// each optionally `type`-only, after `export`.
    fn parse_export_declaration(
        &mut self,
        pos: u32,
        decorators: Option<ListId>,
        modifiers: Option<ListId>,
    ) -> NodeId {
        let is_type_only = self.parse_optional(SyntaxKind::TypeKeyword);
        let namespace_export_pos = self.node_pos();
        let (export_clause, module_specifier) = if self.parse_optional(SyntaxKind::AsteriskToken) {
            let export_clause = self.parse_optional(SyntaxKind::AsKeyword).then(|| {
                let name = self.parse_identifier_name();
                self.finish_node(
                    SyntaxKind::NamespaceExport,
                    namespace_export_pos,
                    NodeData::NamespaceBinding { name },
                )
            });
            self.parse_expected(SyntaxKind::FromKeyword);
            (export_clause, Some(self.parse_module_specifier()))
        } else {
            let export_clause = self.parse_named_imports_or_exports(SyntaxKind::NamedExports);
            // `export { a } "m"` is a missing `from`.
            let module_specifier = if self.token() == SyntaxKind::FromKeyword
                || (self.token() == SyntaxKind::StringLiteral && !self.has_preceding_line_break())
            {
                self.parse_expected(SyntaxKind::FromKeyword);
                Some(self.parse_module_specifier())
            } else {
                None
            };
            (Some(export_clause), module_specifier)
        };
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ExportDeclaration,
            pos,
            NodeData::ExportDeclaration {
                decorators,
                modifiers,
                is_type_only,
                export_clause,
                module_specifier,
            },
        )
    }
}

/// Yield/await flags for a function-like signature.
fn signature_flags(is_generator: bool, is_async: bool) -> SignatureFlags {
    let mut flags = SignatureFlags::NONE;
    flags.set(SignatureFlags::YIELD, is_generator);
    flags.set(SignatureFlags::AWAIT, is_async);
    flags
}

#[cfg(test)]
mod tests {
    use crate::options::ParseOptions;
    use crate::parser::Parser;
    use quill_ast::syntax_kind::SyntaxKind;

    fn statement_kinds(source: &str) -> Vec<SyntaxKind> {
        let options = ParseOptions::default();
        let file = Parser::new("statements.ts", source, &options).parse_source_file();
        assert!(
            file.parse_diagnostics.is_empty(),
            "{source}: {:?}",
            file.parse_diagnostics
        );
        file.statements().iter().map(|&id| file.node(id).kind).collect()
    }

    #[test]
    fn test_soft_keywords_as_identifiers() {
        assert_eq!(
            statement_kinds("type = 1;\nlet;\nmodule.exports = x;\nasync\nfunction f() {}"),
            vec![
                SyntaxKind::ExpressionStatement,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::FunctionDeclaration,
            ]
        );
    }

    #[test]
    fn test_soft_keywords_as_declarations() {
        assert_eq!(
            statement_kinds("type A = B;\ninterface I {}\nnamespace N {}\ndeclare module \"m\";\nconst enum E {}"),
            vec![
                SyntaxKind::TypeAliasDeclaration,
                SyntaxKind::InterfaceDeclaration,
                SyntaxKind::ModuleDeclaration,
                SyntaxKind::ModuleDeclaration,
                SyntaxKind::EnumDeclaration,
            ]
        );
    }

    #[test]
    fn test_modifiers_and_exports() {
        assert_eq!(
            statement_kinds("export default class {}\nexport default 1;\nexport { a as b };\nexport * from \"m\";"),
            vec![
                SyntaxKind::ClassDeclaration,
                SyntaxKind::ExportAssignment,
                SyntaxKind::ExportDeclaration,
                SyntaxKind::ExportDeclaration,
            ]
        );
    }

    #[test]
    fn test_signature_flags() {
        let flags = super::signature_flags(true, false);
        assert!(flags.contains(crate::parser::SignatureFlags::YIELD));
        assert!(!flags.contains(crate::parser::SignatureFlags::AWAIT));
    }
}
