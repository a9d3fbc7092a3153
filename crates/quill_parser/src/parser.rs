//! Parser state and the machinery every production shares.
//!
//! A [`Parser`] owns the scanner, the node arena, the diagnostics and the
//! ambient context of one parse. Grammar productions are split across the
//! sibling modules (`expressions`, `statements`, `types`, `jsx`, `jsdoc`),
//! each adding methods to the same type.

use crate::incremental::SyntaxCursor;
use crate::options::ParseOptions;
use quill_ast::arena::{ArenaMark, SyntaxArena};
use quill_ast::node::{ListId, Node, NodeData, NodeId, NodeList};
use quill_ast::source_file::SourceFile;
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{ContextFlags, LanguageVariant, NodeFlags, ScriptKind};
use quill_ast::visitor::ParentMap;
use quill_ast::count_nodes;
use quill_core::collections::FxHashSet;
use quill_core::intern::StringInterner;
use quill_core::text::{TextRange, TextSpan};
use quill_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use quill_scanner::{Scanner, ScannerState};
use tracing::trace;

/// The repeated constructs parsed by the list algorithm. Each has its own
/// element and terminator predicates; the set of active ones drives error
/// recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum ParsingContext {
    SourceElements,
    BlockStatements,
    SwitchClauses,
    SwitchClauseStatements,
    TypeMembers,
    ClassMembers,
    EnumMembers,
    HeritageClauseElement,
    VariableDeclarations,
    ObjectBindingElements,
    ArrayBindingElements,
    ArgumentExpressions,
    ObjectLiteralMembers,
    JsxAttributes,
    JsxChildren,
    ArrayLiteralMembers,
    Parameters,
    TypeParameters,
    TypeArguments,
    TupleElementTypes,
    HeritageClauses,
    ImportOrExportSpecifiers,
    JSDocFunctionParameters,
    JSDocTypeArguments,
    JSDocRecordMembers,
    JSDocTupleTypes,
}

impl ParsingContext {
    const ALL: [ParsingContext; 26] = [
        ParsingContext::SourceElements,
        ParsingContext::BlockStatements,
        ParsingContext::SwitchClauses,
        ParsingContext::SwitchClauseStatements,
        ParsingContext::TypeMembers,
        ParsingContext::ClassMembers,
        ParsingContext::EnumMembers,
        ParsingContext::HeritageClauseElement,
        ParsingContext::VariableDeclarations,
        ParsingContext::ObjectBindingElements,
        ParsingContext::ArrayBindingElements,
        ParsingContext::ArgumentExpressions,
        ParsingContext::ObjectLiteralMembers,
        ParsingContext::JsxAttributes,
        ParsingContext::JsxChildren,
        ParsingContext::ArrayLiteralMembers,
        ParsingContext::Parameters,
        ParsingContext::TypeParameters,
        ParsingContext::TypeArguments,
        ParsingContext::TupleElementTypes,
        ParsingContext::HeritageClauses,
        ParsingContext::ImportOrExportSpecifiers,
        ParsingContext::JSDocFunctionParameters,
        ParsingContext::JSDocTypeArguments,
        ParsingContext::JSDocRecordMembers,
        ParsingContext::JSDocTupleTypes,
    ];

    #[inline]
    fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Reported when a token can be neither an element nor a terminator.
    fn error_message(self) -> &'static DiagnosticMessage {
        match self {
            ParsingContext::SourceElements | ParsingContext::BlockStatements => {
                &messages::DECLARATION_OR_STATEMENT_EXPECTED
            }
            ParsingContext::SwitchClauseStatements => &messages::STATEMENT_EXPECTED,
            ParsingContext::SwitchClauses => &messages::CASE_OR_DEFAULT_EXPECTED,
            ParsingContext::TypeMembers => &messages::PROPERTY_OR_SIGNATURE_EXPECTED,
            ParsingContext::ClassMembers => {
                &messages::UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED
            }
            ParsingContext::EnumMembers => &messages::ENUM_MEMBER_EXPECTED,
            ParsingContext::HeritageClauseElement => &messages::EXPRESSION_EXPECTED,
            ParsingContext::VariableDeclarations => &messages::VARIABLE_DECLARATION_EXPECTED,
            ParsingContext::ObjectBindingElements => {
                &messages::PROPERTY_DESTRUCTURING_PATTERN_EXPECTED
            }
            ParsingContext::ArrayBindingElements => {
                &messages::ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED
            }
            ParsingContext::ArgumentExpressions => &messages::ARGUMENT_EXPRESSION_EXPECTED,
            ParsingContext::ObjectLiteralMembers | ParsingContext::JSDocRecordMembers => {
                &messages::PROPERTY_ASSIGNMENT_EXPECTED
            }
            ParsingContext::ArrayLiteralMembers => &messages::EXPRESSION_OR_COMMA_EXPECTED,
            ParsingContext::Parameters | ParsingContext::JSDocFunctionParameters => {
                &messages::PARAMETER_DECLARATION_EXPECTED
            }
            ParsingContext::TypeParameters => &messages::TYPE_PARAMETER_DECLARATION_EXPECTED,
            ParsingContext::TypeArguments => &messages::TYPE_ARGUMENT_EXPECTED,
            ParsingContext::TupleElementTypes
            | ParsingContext::JSDocTypeArguments
            | ParsingContext::JSDocTupleTypes => &messages::TYPE_EXPECTED,
            ParsingContext::HeritageClauses => &messages::UNEXPECTED_TOKEN,
            ParsingContext::ImportOrExportSpecifiers
            | ParsingContext::JsxAttributes
            | ParsingContext::JsxChildren => &messages::IDENTIFIER_EXPECTED,
        }
    }
}

bitflags::bitflags! {
    /// How a signature and its body are parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct SignatureFlags: u8 {
        const NONE = 0;
        const YIELD = 1 << 0;
        const AWAIT = 1 << 1;
        /// Signature of a type member or function type.
        const TYPE = 1 << 2;
        /// Arrow function body that is a statement without its `{`.
        const IGNORE_MISSING_OPEN_BRACE = 1 << 3;
        const JSDOC = 1 << 4;
    }
}

/// The list contexts currently open, innermost included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ParsingContexts(u32);

impl ParsingContexts {
    #[inline]
    fn insert(&mut self, context: ParsingContext) {
        self.0 |= context.bit();
    }

    #[inline]
    fn contains(self, context: ParsingContext) -> bool {
        self.0 & context.bit() != 0
    }

    fn iter(self) -> impl Iterator<Item = ParsingContext> {
        ParsingContext::ALL
            .into_iter()
            .filter(move |&context| self.contains(context))
    }
}

/// Everything a speculative parse may disturb.
struct Snapshot {
    scanner: ScannerState,
    diagnostics: usize,
    parse_error_pending: bool,
    arena: ArenaMark,
    reused_nodes: usize,
    context_flags: ContextFlags,
}

/// The parser produces a [`SourceFile`] from source text.
pub struct Parser<'a> {
    pub(crate) scanner: Scanner<'a>,
    file_name: String,
    options: ParseOptions,
    pub(crate) arena: SyntaxArena,
    pub(crate) interner: StringInterner,
    diagnostics: DiagnosticCollection,
    context_flags: ContextFlags,
    parsing_contexts: ParsingContexts,
    /// Set when a diagnostic is reported; the next finished node takes the
    /// error flag and clears it.
    parse_error_before_next_finished_node: bool,
    depth: u32,
    /// Old tree offered for reuse during an incremental update.
    cursor: Option<SyntaxCursor>,
    reused_nodes: usize,
    /// Token starts known not to begin a parenthesized arrow function.
    not_parenthesized_arrow: FxHashSet<u32>,
}

impl<'a> Parser<'a> {
    pub fn new(file_name: &str, text: &'a str, options: &ParseOptions) -> Self {
        Self::with_parts(
            file_name,
            Scanner::new(text, options.language_variant),
            options,
            SyntaxArena::with_capacity(text.len() / 4),
            StringInterner::new(),
        )
    }

    pub(crate) fn with_parts(
        file_name: &str,
        scanner: Scanner<'a>,
        options: &ParseOptions,
        arena: SyntaxArena,
        interner: StringInterner,
    ) -> Self {
        Self {
            scanner,
            file_name: file_name.to_string(),
            options: options.clone(),
            arena,
            interner,
            diagnostics: DiagnosticCollection::new(),
            context_flags: ContextFlags::NONE,
            parsing_contexts: ParsingContexts::default(),
            parse_error_before_next_finished_node: false,
            depth: 0,
            cursor: None,
            reused_nodes: 0,
            not_parenthesized_arrow: FxHashSet::default(),
        }
    }

    pub(crate) fn with_cursor(mut self, cursor: SyntaxCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn parse_source_file(self) -> SourceFile {
        self.parse_source_file_counting_reuse().0
    }

    /// Parse the whole file. Also returns how many list elements were taken
    /// over from the reuse cursor.
    pub(crate) fn parse_source_file_counting_reuse(mut self) -> (SourceFile, usize) {
        self.next_token();
        let statements = self.parse_list(ParsingContext::SourceElements, Self::parse_statement);
        let end_of_file_token = self.parse_token_node();
        let end = self.scanner.text().len() as u32;
        let root = self.finish_node_at(
            SyntaxKind::SourceFile,
            0,
            end,
            NodeFlags::NONE,
            NodeData::SourceFile {
                statements,
                end_of_file_token,
            },
        );
        let reused_nodes = self.reused_nodes;
        (self.into_source_file(root), reused_nodes)
    }

    pub(crate) fn into_source_file(self, root: NodeId) -> SourceFile {
        let (node_count, identifier_count) = count_nodes(&self.arena, root);
        let parents = self
            .options
            .set_parent_nodes
            .then(|| ParentMap::build(&self.arena, root));
        SourceFile {
            file_name: self.file_name,
            text: self.scanner.text().to_string(),
            language_variant: self.options.language_variant,
            script_kind: self.options.script_kind,
            arena: self.arena,
            root,
            parse_diagnostics: self.diagnostics.into_diagnostics(),
            node_count,
            identifier_count,
            interner: self.interner,
            parents,
            incremental_stats: None,
        }
    }

    /// Hand back the arena, interner and diagnostics of a sub-parse.
    pub(crate) fn into_parts(self) -> (SyntaxArena, StringInterner, Vec<Diagnostic>) {
        (self.arena, self.interner, self.diagnostics.into_diagnostics())
    }

    #[inline]
    pub(crate) fn language_variant(&self) -> LanguageVariant {
        self.scanner.language_variant()
    }

    #[inline]
    pub(crate) fn script_kind(&self) -> ScriptKind {
        self.options.script_kind
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        let token = self.scanner.scan();
        self.drain_scanner_errors();
        token
    }

    /// Run a rescan or alternate scan and collect its errors.
    pub(crate) fn rescan(&mut self, scan: impl FnOnce(&mut Scanner<'a>) -> SyntaxKind) -> SyntaxKind {
        let token = scan(&mut self.scanner);
        self.drain_scanner_errors();
        token
    }

    fn drain_scanner_errors(&mut self) {
        if !self.scanner.has_errors() {
            return;
        }
        for error in self.scanner.take_errors() {
            self.parse_error_at_position(error.pos, error.length, error.message, &[]);
        }
    }

    /// Full start of the current token: where a node beginning here starts.
    #[inline]
    pub(crate) fn node_pos(&self) -> u32 {
        self.scanner.full_start() as u32
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        self.parse_expected_with(kind, None)
    }

    pub(crate) fn parse_expected_with(
        &mut self,
        kind: SyntaxKind,
        message: Option<&'static DiagnosticMessage>,
    ) -> bool {
        if self.token() == kind {
            self.next_token();
            return true;
        }
        match message {
            Some(message) => self.parse_error_at_current_token(message, &[]),
            None => self.parse_error_at_current_token(&messages::_0_EXPECTED, &[token_to_string(kind)]),
        }
        false
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_optional_token(&mut self, kind: SyntaxKind) -> Option<NodeId> {
        (self.token() == kind).then(|| self.parse_token_node())
    }

    pub(crate) fn parse_expected_token(&mut self, kind: SyntaxKind) -> NodeId {
        match self.parse_optional_token(kind) {
            Some(token) => token,
            None => self.create_missing_node(
                kind,
                false,
                &messages::_0_EXPECTED,
                &[token_to_string(kind)],
            ),
        }
    }

    /// Consume the current token as a childless node.
    pub(crate) fn parse_token_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        let kind = self.token();
        self.next_token();
        self.finish_node(kind, pos, NodeData::Token {})
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Accept an explicit or inserted statement terminator.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.can_parse_semicolon() {
            if self.token() == SyntaxKind::SemicolonToken {
                self.next_token();
            }
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    pub(crate) fn next_token_is_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break()
    }

    pub(crate) fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && self.is_identifier()
    }

    pub(crate) fn next_token_is_identifier_or_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && self.token().is_identifier_or_keyword()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Report at `start` unless the previous diagnostic starts there too.
    /// Either way the next finished node is marked as containing an error.
    pub(crate) fn parse_error_at_position(
        &mut self,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) {
        let diagnostic = Diagnostic::with_location(
            self.file_name.as_str(),
            TextSpan::new(start, length),
            message,
            args,
        );
        if !self.diagnostics.add_deduplicated(diagnostic) {
            trace!(start, code = message.code, "duplicate diagnostic dropped");
        }
        self.parse_error_before_next_finished_node = true;
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.token_pos();
        let length = self.token_end() - start;
        self.parse_error_at_position(start, length, message, args);
    }

    pub(crate) fn parse_error_at_range(
        &mut self,
        pos: u32,
        end: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) {
        self.parse_error_at_position(pos, end.saturating_sub(pos), message, args);
    }

    /// Report on a node, skipping its leading trivia.
    pub(crate) fn parse_error_at_node(&mut self, id: NodeId, message: &DiagnosticMessage, args: &[&str]) {
        let range = self.arena.node(id).range;
        let start = quill_scanner::skip_trivia(self.scanner.text(), range.pos as usize) as u32;
        self.parse_error_at_range(start.min(range.end), range.end, message, args);
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Finish a node that started at `pos` and ends where the current token's
    /// trivia begins.
    pub(crate) fn finish_node(&mut self, kind: SyntaxKind, pos: u32, data: NodeData) -> NodeId {
        let end = self.node_pos();
        self.finish_node_at(kind, pos, end, NodeFlags::NONE, data)
    }

    pub(crate) fn finish_node_with_flags(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        flags: NodeFlags,
        data: NodeData,
    ) -> NodeId {
        let end = self.node_pos();
        self.finish_node_at(kind, pos, end, flags, data)
    }

    pub(crate) fn finish_node_at(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        mut flags: NodeFlags,
        data: NodeData,
    ) -> NodeId {
        if self.parse_error_before_next_finished_node {
            self.parse_error_before_next_finished_node = false;
            flags |= NodeFlags::THIS_NODE_HAS_ERROR;
        }
        self.arena.alloc(Node {
            kind,
            range: TextRange::new(pos, end.max(pos)),
            flags,
            context_flags: self.context_flags,
            data,
        })
    }

    /// A zero-width placeholder for required syntax that is absent.
    pub(crate) fn create_missing_node(
        &mut self,
        kind: SyntaxKind,
        report_at_current_position: bool,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> NodeId {
        if report_at_current_position {
            self.parse_error_at_position(self.node_pos(), 0, message, args);
        } else {
            self.parse_error_at_current_token(message, args);
        }
        let pos = self.node_pos();
        let data = if kind == SyntaxKind::Identifier {
            NodeData::Identifier {
                text: self.interner.intern(""),
                original_keyword: None,
            }
        } else if kind.is_literal() {
            NodeData::Literal {
                text: self.interner.intern(""),
                is_unterminated: false,
            }
        } else {
            NodeData::Token {}
        };
        self.finish_node_with_flags(kind, pos, NodeFlags::MISSING, data)
    }

    pub(crate) fn create_list(&mut self, elements: Vec<NodeId>, pos: u32) -> ListId {
        let end = self.node_pos();
        self.create_list_at(elements, pos, end)
    }

    pub(crate) fn create_list_at(&mut self, elements: Vec<NodeId>, pos: u32, end: u32) -> ListId {
        self.arena
            .alloc_list(NodeList::new(TextRange::new(pos, end.max(pos)), elements))
    }

    pub(crate) fn create_missing_list(&mut self) -> ListId {
        let pos = self.node_pos();
        self.arena.alloc_list(NodeList::missing(pos))
    }

    pub(crate) fn is_missing_list(&self, list: ListId) -> bool {
        self.arena.list(list).is_missing
    }

    pub(crate) fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    #[inline]
    pub(crate) fn kind_of(&self, id: NodeId) -> SyntaxKind {
        self.arena.node(id).kind
    }

    /// Text of an identifier or literal node.
    pub(crate) fn node_text(&self, id: NodeId) -> &str {
        match self.arena.node(id).data {
            NodeData::Identifier { text, .. }
            | NodeData::PrivateIdentifier { text }
            | NodeData::Literal { text, .. } => self.interner.resolve(text),
            _ => "",
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Whether the current token can be used as an identifier here.
    pub(crate) fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword if self.in_yield_context() => false,
            SyntaxKind::AwaitKeyword if self.in_await_context() => false,
            kind => kind.is_keyword() && !kind.is_reserved_word(),
        }
    }

    pub(crate) fn create_identifier(
        &mut self,
        is_identifier: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> NodeId {
        if is_identifier || self.token() == SyntaxKind::PrivateIdentifier {
            if !is_identifier {
                self.parse_error_at_current_token(
                    message.unwrap_or(&messages::IDENTIFIER_EXPECTED),
                    &[],
                );
            }
            let pos = self.node_pos();
            let token = self.token();
            let original_keyword = (token.is_keyword()).then_some(token);
            let text = self.interner.intern(self.scanner.token_value());
            self.next_token();
            return self.finish_node(
                SyntaxKind::Identifier,
                pos,
                NodeData::Identifier {
                    text,
                    original_keyword,
                },
            );
        }

        // At the end of the file there is no token to point at.
        let report_at_current_position = self.token() == SyntaxKind::EndOfFileToken;
        let token_text = self.scanner.token_text();
        let default_message = if self.token().is_reserved_word() {
            &messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE
        } else {
            &messages::IDENTIFIER_EXPECTED
        };
        self.create_missing_node(
            SyntaxKind::Identifier,
            report_at_current_position,
            message.unwrap_or(default_message),
            &[token_text],
        )
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeId {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier, None)
    }

    pub(crate) fn parse_identifier_with(&mut self, message: &'static DiagnosticMessage) -> NodeId {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier, Some(message))
    }

    /// An identifier where keywords are allowed, e.g. after `.`.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeId {
        let is_identifier = self.token().is_identifier_or_keyword();
        self.create_identifier(is_identifier, None)
    }

    /// Like [`Self::is_identifier`] but lets `yield` and `await` through;
    /// their misuse is a semantic error, not a syntax error.
    pub(crate) fn is_binding_identifier(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier || (token.is_keyword() && !token.is_reserved_word())
    }

    pub(crate) fn parse_binding_identifier(&mut self) -> NodeId {
        let is_identifier = self.is_binding_identifier();
        self.create_identifier(is_identifier, None)
    }

    pub(crate) fn parse_optional_binding_identifier(&mut self) -> Option<NodeId> {
        self.is_binding_identifier()
            .then(|| self.parse_binding_identifier())
    }

    /// Parse a `#name` token.
    pub(crate) fn parse_private_identifier(&mut self) -> NodeId {
        let pos = self.node_pos();
        let text = self.interner.intern(self.scanner.token_value());
        self.next_token();
        self.finish_node(
            SyntaxKind::PrivateIdentifier,
            pos,
            NodeData::PrivateIdentifier { text },
        )
    }

    /// Turn the current literal token into a node.
    pub(crate) fn parse_literal_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        let kind = self.token();
        let text = self.interner.intern(self.scanner.token_value());
        let is_unterminated = self.scanner.is_unterminated();
        self.next_token();
        self.finish_node(
            kind,
            pos,
            NodeData::Literal {
                text,
                is_unterminated,
            },
        )
    }

    // ========================================================================
    // Context flags
    // ========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flags: ContextFlags) -> bool {
        self.context_flags.intersects(flags)
    }

    #[inline]
    pub(crate) fn in_yield_context(&self) -> bool {
        self.in_context(ContextFlags::YIELD)
    }

    #[inline]
    pub(crate) fn in_await_context(&self) -> bool {
        self.in_context(ContextFlags::AWAIT)
    }

    #[inline]
    pub(crate) fn in_disallow_in_context(&self) -> bool {
        self.in_context(ContextFlags::DISALLOW_IN)
    }

    #[inline]
    pub(crate) fn in_decorator_context(&self) -> bool {
        self.in_context(ContextFlags::DECORATOR)
    }

    /// Run `f` with `flags` set, restoring the previous flags afterwards.
    pub(crate) fn do_in_context<T>(&mut self, flags: ContextFlags, f: impl FnOnce(&mut Self) -> T) -> T {
        let to_set = flags & !self.context_flags;
        if to_set.is_empty() {
            return f(self);
        }
        self.context_flags |= to_set;
        let result = f(self);
        self.context_flags &= !to_set;
        result
    }

    /// Run `f` with `flags` cleared, restoring the previous flags afterwards.
    pub(crate) fn do_outside_context<T>(
        &mut self,
        flags: ContextFlags,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let to_clear = flags & self.context_flags;
        if to_clear.is_empty() {
            return f(self);
        }
        self.context_flags &= !to_clear;
        let result = f(self);
        self.context_flags |= to_clear;
        result
    }

    /// Run `f` with exactly the yield and await bits given.
    pub(crate) fn with_function_context<T>(
        &mut self,
        is_generator: bool,
        is_async: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags.set(ContextFlags::YIELD, is_generator);
        self.context_flags.set(ContextFlags::AWAIT, is_async);
        let result = f(self);
        self.context_flags = saved;
        result
    }

    pub(crate) fn allow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_outside_context(ContextFlags::DISALLOW_IN, f)
    }

    pub(crate) fn disallow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(ContextFlags::DISALLOW_IN, f)
    }

    // ========================================================================
    // Depth guard
    // ========================================================================

    /// Run a nesting production, or report and return a missing node once
    /// the configured depth is exhausted.
    pub(crate) fn with_depth_guard(&mut self, f: impl FnOnce(&mut Self) -> NodeId) -> NodeId {
        if self.depth >= self.options.max_nesting_depth {
            trace!(pos = self.token_pos(), depth = self.depth, "nesting depth exceeded");
            return self.create_missing_node(
                SyntaxKind::Identifier,
                false,
                &messages::MAXIMUM_NESTING_DEPTH_EXCEEDED,
                &[],
            );
        }
        self.depth += 1;
        let node = f(self);
        self.depth -= 1;
        node
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            scanner: self.scanner.save_state(),
            diagnostics: self.diagnostics.len(),
            parse_error_pending: self.parse_error_before_next_finished_node,
            arena: self.arena.mark(),
            reused_nodes: self.reused_nodes,
            context_flags: self.context_flags,
        }
    }

    fn rewind(&mut self, snapshot: Snapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.diagnostics.truncate(snapshot.diagnostics);
        self.parse_error_before_next_finished_node = snapshot.parse_error_pending;
        self.arena.truncate(snapshot.arena);
        self.reused_nodes = snapshot.reused_nodes;
    }

    /// Run `f` and always rewind afterwards. For yes/no questions about the
    /// upcoming tokens.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        debug_assert_eq!(snapshot.context_flags, self.context_flags);
        self.rewind(snapshot);
        result
    }

    /// Run `f`, keeping its work only when it produces a value.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        debug_assert_eq!(snapshot.context_flags, self.context_flags);
        if result.is_none() {
            self.rewind(snapshot);
        }
        result
    }

    pub(crate) fn is_known_not_parenthesized_arrow(&self, pos: u32) -> bool {
        self.not_parenthesized_arrow.contains(&pos)
    }

    pub(crate) fn mark_not_parenthesized_arrow(&mut self, pos: u32) {
        self.not_parenthesized_arrow.insert(pos);
    }

    // ========================================================================
    // List parsing
    // ========================================================================

    /// Parse elements until the context's terminator. Tokens that are neither
    /// elements nor terminators are reported and skipped, unless an enclosing
    /// list can use them.
    pub(crate) fn parse_list<F>(&mut self, context: ParsingContext, mut parse_element: F) -> ListId
    where
        F: FnMut(&mut Self) -> NodeId,
    {
        let saved_contexts = self.parsing_contexts;
        self.parsing_contexts.insert(context);
        let pos = self.node_pos();
        let mut elements = Vec::new();

        while !self.is_list_terminator(context) {
            if self.is_list_element(context, false) {
                let start = self.node_pos();
                let element = match self.reusable_node(context) {
                    Some(node) => self.consume_reused_node(node),
                    None => parse_element(self),
                };
                elements.push(element);
                if self.node_pos() == start && self.token() != SyntaxKind::EndOfFileToken {
                    self.next_token();
                }
                continue;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }

        self.parsing_contexts = saved_contexts;
        self.create_list(elements, pos)
    }

    /// Parse separator-delimited elements.
    pub(crate) fn parse_delimited_list<F>(
        &mut self,
        context: ParsingContext,
        mut parse_element: F,
        consider_semicolon_as_delimiter: bool,
    ) -> ListId
    where
        F: FnMut(&mut Self) -> NodeId,
    {
        let list = self.parse_delimited_list_worker(
            context,
            |parser| Some(parse_element(parser)),
            consider_semicolon_as_delimiter,
        );
        match list {
            Some(list) => list,
            None => self.create_missing_list(),
        }
    }

    /// Delimited list whose element parser may give up; the whole list then
    /// fails. Used under speculation.
    pub(crate) fn parse_delimited_list_worker<F>(
        &mut self,
        context: ParsingContext,
        mut parse_element: F,
        consider_semicolon_as_delimiter: bool,
    ) -> Option<ListId>
    where
        F: FnMut(&mut Self) -> Option<NodeId>,
    {
        let saved_contexts = self.parsing_contexts;
        self.parsing_contexts.insert(context);
        let pos = self.node_pos();
        let mut elements = Vec::new();
        let mut trailing_comma = false;

        loop {
            if self.is_list_element(context, false) {
                let start = self.node_pos();
                let element = match self.reusable_node(context) {
                    Some(node) => Some(self.consume_reused_node(node)),
                    None => parse_element(self),
                };
                let Some(element) = element else {
                    self.parsing_contexts = saved_contexts;
                    return None;
                };
                elements.push(element);

                if self.parse_optional(SyntaxKind::CommaToken) {
                    trailing_comma = true;
                    continue;
                }
                trailing_comma = false;
                if self.is_list_terminator(context) {
                    break;
                }
                self.parse_expected(SyntaxKind::CommaToken);

                // `a; b` in an object literal or type member list.
                if consider_semicolon_as_delimiter
                    && self.token() == SyntaxKind::SemicolonToken
                    && !self.has_preceding_line_break()
                {
                    self.next_token();
                }
                if start == self.node_pos() {
                    self.next_token();
                }
                continue;
            }
            if self.is_list_terminator(context) {
                break;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }

        self.parsing_contexts = saved_contexts;
        let list = self.create_list(elements, pos);
        if trailing_comma {
            self.arena.list_mut(list).has_trailing_comma = true;
        }
        Some(list)
    }

    /// `open` delimited-list `close`; a missing list when `open` is absent.
    pub(crate) fn parse_bracketed_list<F>(
        &mut self,
        context: ParsingContext,
        parse_element: F,
        open: SyntaxKind,
        close: SyntaxKind,
    ) -> ListId
    where
        F: FnMut(&mut Self) -> NodeId,
    {
        if self.parse_expected(open) {
            let list = self.parse_delimited_list(context, parse_element, false);
            self.parse_expected(close);
            list
        } else {
            self.create_missing_list()
        }
    }

    /// Run a hand-written element loop with `context` counted as open, so
    /// nested recovery can see it.
    pub(crate) fn in_parsing_context<T>(
        &mut self,
        context: ParsingContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved_contexts = self.parsing_contexts;
        self.parsing_contexts.insert(context);
        let result = f(self);
        self.parsing_contexts = saved_contexts;
        result
    }

    fn abort_parsing_list_or_move_to_next_token(&mut self, context: ParsingContext) -> bool {
        self.parse_error_at_current_token(context.error_message(), &[]);
        if self.is_in_some_parsing_context() {
            trace!(?context, token = ?self.token(), pos = self.token_pos(), "list aborted");
            return true;
        }
        self.next_token();
        false
    }

    /// Whether some open list can use the current token.
    fn is_in_some_parsing_context(&mut self) -> bool {
        let contexts = self.parsing_contexts;
        contexts
            .iter()
            .any(|context| self.is_list_element(context, true) || self.is_list_terminator(context))
    }

    pub(crate) fn is_list_element(&mut self, context: ParsingContext, in_error_recovery: bool) -> bool {
        if self.reusable_node(context).is_some() {
            return true;
        }
        let token = self.token();
        match context {
            ParsingContext::SourceElements
            | ParsingContext::BlockStatements
            | ParsingContext::SwitchClauseStatements => {
                // A stray `;` is left for an enclosing statement list.
                !(token == SyntaxKind::SemicolonToken && in_error_recovery)
                    && self.is_start_of_statement()
            }
            ParsingContext::SwitchClauses => crate::utilities::is_case_label_start(token),
            ParsingContext::TypeMembers => self.look_ahead(Self::is_type_member_start),
            ParsingContext::ClassMembers => {
                self.look_ahead(Self::is_class_member_start)
                    || (token == SyntaxKind::SemicolonToken && !in_error_recovery)
            }
            ParsingContext::EnumMembers | ParsingContext::JSDocRecordMembers => {
                token == SyntaxKind::OpenBracketToken || self.is_literal_property_name()
            }
            ParsingContext::ObjectLiteralMembers => match token {
                SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
                | SyntaxKind::DotToken => true,
                _ => self.is_literal_property_name(),
            },
            ParsingContext::ObjectBindingElements => {
                matches!(token, SyntaxKind::OpenBracketToken | SyntaxKind::DotDotDotToken)
                    || self.is_literal_property_name()
            }
            ParsingContext::HeritageClauseElement => {
                if token == SyntaxKind::OpenBraceToken {
                    return false;
                }
                if in_error_recovery {
                    self.is_identifier() && !self.is_heritage_clause_extends_or_implements_keyword()
                } else {
                    self.is_start_of_left_hand_side_expression()
                        && !self.is_heritage_clause_extends_or_implements_keyword()
                }
            }
            ParsingContext::VariableDeclarations => self.is_binding_identifier_or_pattern(),
            ParsingContext::ArrayBindingElements => {
                matches!(token, SyntaxKind::CommaToken | SyntaxKind::DotDotDotToken)
                    || self.is_binding_identifier_or_pattern()
            }
            ParsingContext::TypeParameters => {
                token == SyntaxKind::InKeyword
                    || token == SyntaxKind::ConstKeyword
                    || self.is_identifier()
            }
            ParsingContext::ArrayLiteralMembers => match token {
                SyntaxKind::CommaToken | SyntaxKind::DotDotDotToken => true,
                _ => self.is_start_of_expression(),
            },
            ParsingContext::ArgumentExpressions => {
                token == SyntaxKind::DotDotDotToken || self.is_start_of_expression()
            }
            ParsingContext::Parameters => self.is_start_of_parameter(false),
            ParsingContext::JSDocFunctionParameters => self.is_start_of_parameter(true),
            ParsingContext::TypeArguments
            | ParsingContext::TupleElementTypes
            | ParsingContext::JSDocTypeArguments
            | ParsingContext::JSDocTupleTypes => {
                token == SyntaxKind::CommaToken || self.is_start_of_type(false)
            }
            ParsingContext::HeritageClauses => crate::utilities::is_heritage_clause_keyword(token),
            ParsingContext::ImportOrExportSpecifiers => {
                crate::utilities::is_identifier_name(token) || token == SyntaxKind::StringLiteral
            }
            ParsingContext::JsxAttributes => {
                crate::utilities::is_identifier_name(token) || token == SyntaxKind::OpenBraceToken
            }
            ParsingContext::JsxChildren => true,
        }
    }

    pub(crate) fn is_list_terminator(&mut self, context: ParsingContext) -> bool {
        let token = self.token();
        if token == SyntaxKind::EndOfFileToken {
            return true;
        }
        match context {
            ParsingContext::BlockStatements
            | ParsingContext::SwitchClauses
            | ParsingContext::TypeMembers
            | ParsingContext::ClassMembers
            | ParsingContext::EnumMembers
            | ParsingContext::ObjectLiteralMembers
            | ParsingContext::ObjectBindingElements
            | ParsingContext::ImportOrExportSpecifiers
            | ParsingContext::JSDocRecordMembers => token == SyntaxKind::CloseBraceToken,
            ParsingContext::SwitchClauseStatements => matches!(
                token,
                SyntaxKind::CloseBraceToken | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            ),
            ParsingContext::HeritageClauseElement => matches!(
                token,
                SyntaxKind::OpenBraceToken | SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::VariableDeclarations => {
                self.can_parse_semicolon()
                    || matches!(
                        token,
                        SyntaxKind::InKeyword | SyntaxKind::OfKeyword | SyntaxKind::EqualsGreaterThanToken
                    )
            }
            ParsingContext::TypeParameters => matches!(
                token,
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::ArgumentExpressions => {
                matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::SemicolonToken)
            }
            ParsingContext::ArrayLiteralMembers
            | ParsingContext::TupleElementTypes
            | ParsingContext::ArrayBindingElements => token == SyntaxKind::CloseBracketToken,
            ParsingContext::Parameters => {
                matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken)
            }
            // Anything but a comma ends a type argument list.
            ParsingContext::TypeArguments => token != SyntaxKind::CommaToken,
            ParsingContext::HeritageClauses => {
                matches!(token, SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken)
            }
            ParsingContext::JsxAttributes => {
                matches!(token, SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken)
            }
            ParsingContext::JsxChildren => token == SyntaxKind::LessThanSlashToken,
            ParsingContext::JSDocFunctionParameters => matches!(
                token,
                SyntaxKind::CloseParenToken | SyntaxKind::ColonToken | SyntaxKind::CloseBraceToken
            ),
            ParsingContext::JSDocTypeArguments => {
                matches!(token, SyntaxKind::GreaterThanToken | SyntaxKind::CloseBraceToken)
            }
            ParsingContext::JSDocTupleTypes => {
                matches!(token, SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken)
            }
            ParsingContext::SourceElements => false,
        }
    }

    pub(crate) fn is_literal_property_name(&self) -> bool {
        crate::utilities::is_literal_property_name(self.token())
    }

    // ========================================================================
    // Node reuse
    // ========================================================================

    /// An old node starting at the current position that may stand in for
    /// the next element of `context`.
    fn reusable_node(&self, context: ParsingContext) -> Option<NodeId> {
        let cursor = self.cursor.as_ref()?;
        // Reusing now would hand the pending error to a different node.
        if self.parse_error_before_next_finished_node {
            return None;
        }
        cursor
            .candidates(self.node_pos())
            .iter()
            .copied()
            .find(|&id| {
                let node = self.arena.node(id);
                cursor.is_reusable(id)
                    && !node.is_missing()
                    && node.context_flags == self.context_flags
                    && crate::incremental::can_reuse_node(&self.arena, &self.interner, node, context)
            })
    }

    fn consume_reused_node(&mut self, id: NodeId) -> NodeId {
        let end = self.arena.node(id).end();
        trace!(node = id.0, kind = ?self.arena.node(id).kind, end, "reusing node");
        self.scanner.reset_to(end as usize);
        self.next_token();
        self.reused_nodes += 1;
        id
    }
}

/// Display text of a token kind for "'{0}' expected." messages.
pub(crate) fn token_to_string(kind: SyntaxKind) -> &'static str {
    match kind.token_text() {
        Some(text) => text,
        None => match kind {
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::EndOfFileToken => "end of file",
            _ => "token",
        },
    }
}
