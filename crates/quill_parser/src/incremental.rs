//! Incremental reparsing.
//!
//! An update runs in three phases:
//!
//! 1. Widen the edit backwards so the tokens in front of it are rescanned.
//! 2. Adjust the previous tree in place: shift nodes after the edit, mark the
//!    ones touching it, and note which subtrees hold a parse error.
//! 3. Parse the new text with a [`SyntaxCursor`] that offers the unmarked
//!    list elements of the old tree for reuse.
//!
//! The new tree shares the arena of the old one. Old nodes that were not
//! reused stay behind as garbage until the arena is compacted.

use crate::options::ParseOptions;
use crate::parser::{Parser, ParsingContext};
use quill_ast::arena::SyntaxArena;
use quill_ast::node::{Child, ListId, Node, NodeId, NodeList};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::visitor::{walk, ParentMap, VisitControl, Visitor};
use quill_ast::{IncrementalStats, NodeData, SourceFile};
use quill_core::collections::{BitSet, MultiMap};
use quill_core::intern::StringInterner;
use quill_core::text::{TextChange, TextPos, TextRange, TextSpan};
use quill_diagnostics::Diagnostic;
use quill_scanner::Scanner;
use thiserror::Error;
use tracing::{debug, instrument};

/// How many tokens in front of an edit are rescanned.
const LOOKAHEAD_TOKENS: usize = 2;

/// Misuse of [`update_source_file`]. Malformed source is never an error; it
/// produces diagnostics on the returned tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("change {start}..{end} is outside the previous text (length {text_len})")]
    ChangeOutOfBounds { start: u32, end: u32, text_len: usize },

    #[error("new text has length {actual}, but the change implies {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("text outside the changed range differs between the old and new text")]
    UnchangedTextDiffers,

    #[error("incremental parse of {file_name} does not match a full parse")]
    InconsistentTree { file_name: String },
}

// ============================================================================
// Syntax cursor
// ============================================================================

/// Old list elements the parser may take over, looked up by full start.
pub(crate) struct SyntaxCursor {
    /// Outermost element first at each position.
    by_position: MultiMap<TextPos, NodeId>,
    reusable: BitSet,
}

impl SyntaxCursor {
    /// Index the list elements under `root`. Only nodes that do not touch the
    /// edit and hold no parse error are reusable.
    fn new(arena: &SyntaxArena, root: NodeId, marks: &TreeMarks) -> Self {
        struct Collector<'a> {
            arena: &'a SyntaxArena,
            by_position: MultiMap<TextPos, NodeId>,
        }
        impl Visitor for Collector<'_> {
            fn enter_list(&mut self, _id: ListId, list: &NodeList) -> VisitControl {
                for &element in &list.elements {
                    self.by_position.insert(self.arena.node(element).pos(), element);
                }
                VisitControl::Continue
            }
        }

        let mut collector = Collector {
            arena,
            by_position: MultiMap::new(),
        };
        walk(arena, root, &mut collector);

        let mut reusable = BitSet::with_len(arena.node_count());
        for index in 0..arena.node_count() {
            if !marks.intersecting.contains(index) && !marks.contains_error.contains(index) {
                reusable.insert(index);
            }
        }
        Self {
            by_position: collector.by_position,
            reusable,
        }
    }

    pub(crate) fn candidates(&self, pos: u32) -> &[NodeId] {
        self.by_position.get(&pos)
    }

    pub(crate) fn is_reusable(&self, id: NodeId) -> bool {
        self.reusable.contains(id.index())
    }
}

/// Whether `node`, parsed earlier, can be the next element of a `context`
/// list. Only productions that do not depend on what follows them are taken
/// over; expressions reached through arbitrary lookahead never are.
pub(crate) fn can_reuse_node(
    arena: &SyntaxArena,
    interner: &StringInterner,
    node: &Node,
    context: ParsingContext,
) -> bool {
    match context {
        ParsingContext::SourceElements => is_reusable_module_element(node.kind) || is_reusable_statement(node.kind),
        ParsingContext::BlockStatements | ParsingContext::SwitchClauseStatements => {
            is_reusable_statement(node.kind)
        }
        ParsingContext::SwitchClauses => {
            matches!(node.kind, SyntaxKind::CaseClause | SyntaxKind::DefaultClause)
        }
        ParsingContext::ClassMembers => is_reusable_class_member(arena, interner, node),
        ParsingContext::EnumMembers => node.kind == SyntaxKind::EnumMember,
        ParsingContext::TypeMembers => matches!(
            node.kind,
            SyntaxKind::ConstructSignature
                | SyntaxKind::MethodSignature
                | SyntaxKind::IndexSignature
                | SyntaxKind::PropertySignature
                | SyntaxKind::CallSignature
        ),
        // An initializer may have been cut short by what used to follow it.
        ParsingContext::VariableDeclarations => {
            node.kind == SyntaxKind::VariableDeclaration && node.data.initializer().is_none()
        }
        ParsingContext::Parameters => node.kind == SyntaxKind::Parameter && node.data.initializer().is_none(),
        _ => false,
    }
}

fn is_reusable_module_element(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ImportDeclaration
            | SyntaxKind::ImportEqualsDeclaration
            | SyntaxKind::ExportDeclaration
            | SyntaxKind::ExportAssignment
    )
}

fn is_reusable_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::FunctionDeclaration
            | SyntaxKind::VariableStatement
            | SyntaxKind::Block
            | SyntaxKind::IfStatement
            | SyntaxKind::ExpressionStatement
            | SyntaxKind::ThrowStatement
            | SyntaxKind::ReturnStatement
            | SyntaxKind::SwitchStatement
            | SyntaxKind::BreakStatement
            | SyntaxKind::ContinueStatement
            | SyntaxKind::ForInStatement
            | SyntaxKind::ForOfStatement
            | SyntaxKind::ForStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::WithStatement
            | SyntaxKind::EmptyStatement
            | SyntaxKind::TryStatement
            | SyntaxKind::LabeledStatement
            | SyntaxKind::DoStatement
            | SyntaxKind::DebuggerStatement
            | SyntaxKind::ClassDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::ModuleDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::TypeAliasDeclaration
    )
}

fn is_reusable_class_member(arena: &SyntaxArena, interner: &StringInterner, node: &Node) -> bool {
    match node.kind {
        SyntaxKind::Constructor
        | SyntaxKind::IndexSignature
        | SyntaxKind::GetAccessor
        | SyntaxKind::SetAccessor
        | SyntaxKind::PropertyDeclaration
        | SyntaxKind::SemicolonClassElement => true,
        // A method spelled `constructor` is parsed as a constructor.
        SyntaxKind::MethodDeclaration => !node
            .data
            .name()
            .is_some_and(|name| is_constructor_name(arena, interner, name)),
        _ => false,
    }
}

fn is_constructor_name(arena: &SyntaxArena, interner: &StringInterner, name: NodeId) -> bool {
    match arena.node(name).data {
        NodeData::Identifier { text, .. } | NodeData::Literal { text, .. } => {
            interner.resolve(text) == "constructor"
        }
        _ => false,
    }
}

// ============================================================================
// Tree adjustment
// ============================================================================

/// Per-node marks over the old arena.
struct TreeMarks {
    intersecting: BitSet,
    contains_error: BitSet,
    shifted: usize,
}

/// Mark every node whose subtree carries an error flag or covers the start of
/// one of `diagnostics`. Positions are those of the previous text.
fn mark_errors(arena: &SyntaxArena, root: NodeId, diagnostics: &[Diagnostic]) -> BitSet {
    struct ErrorMarker {
        starts: Vec<TextPos>,
        contains_error: BitSet,
        /// One entry per open node: whether a finished child had an error.
        open: Vec<bool>,
    }
    impl ErrorMarker {
        fn has_diagnostic_in(&self, range: TextRange) -> bool {
            let first = self.starts.partition_point(|&start| start < range.pos);
            self.starts.get(first).is_some_and(|&start| start <= range.end)
        }
    }
    impl Visitor for ErrorMarker {
        fn enter_node(&mut self, _id: NodeId, _node: &Node) -> VisitControl {
            self.open.push(false);
            VisitControl::Continue
        }

        fn leave_node(&mut self, id: NodeId, node: &Node) {
            let child_error = self.open.pop().unwrap_or(false);
            if child_error || node.has_error() || self.has_diagnostic_in(node.range) {
                self.contains_error.insert(id.index());
                if let Some(parent) = self.open.last_mut() {
                    *parent = true;
                }
            }
        }
    }

    let mut starts: Vec<TextPos> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.span.map(|span| span.start))
        .collect();
    starts.sort_unstable();
    let mut marker = ErrorMarker {
        starts,
        contains_error: BitSet::with_len(arena.node_count()),
        open: Vec::new(),
    };
    walk(arena, root, &mut marker);
    marker.contains_error
}

/// Move the start of `change` back past the nodes in front of it, so that
/// tokens whose scanning or parsing may have looked into the edit are redone.
fn widen_change(arena: &SyntaxArena, root: NodeId, change: TextChange) -> TextChange {
    let mut start = change.span.start;
    for _ in 0..LOOKAHEAD_TOKENS {
        if start == 0 {
            break;
        }
        start = nearest_node_start(arena, root, start).saturating_sub(1);
    }
    let extra = change.span.start - start;
    TextChange::new(
        TextSpan::from_bounds(start, change.span.end()),
        change.new_length + extra,
    )
}

/// The largest full start at or before `pos` among the nodes under `root`.
fn nearest_node_start(arena: &SyntaxArena, root: NodeId, pos: TextPos) -> TextPos {
    struct Nearest {
        pos: TextPos,
        best: TextPos,
    }
    impl Visitor for Nearest {
        fn enter_node(&mut self, _id: NodeId, node: &Node) -> VisitControl {
            // Children never start before their parent.
            if node.pos() > self.pos {
                return VisitControl::SkipChildren;
            }
            self.best = self.best.max(node.pos());
            VisitControl::Continue
        }
    }

    let mut nearest = Nearest { pos, best: 0 };
    walk(arena, root, &mut nearest);
    nearest.best
}

/// The edit, as seen by the tree adjustment.
#[derive(Debug, Clone, Copy)]
struct AdjustRange {
    start: TextPos,
    old_end: TextPos,
    new_end: TextPos,
    delta: i64,
    new_text_len: TextPos,
}

impl AdjustRange {
    fn new(change: TextChange, new_text_len: usize) -> Self {
        Self {
            start: change.span.start,
            old_end: change.span.end(),
            new_end: change.new_span().end(),
            delta: change.delta(),
            new_text_len: new_text_len as TextPos,
        }
    }

    fn is_after(&self, range: TextRange) -> bool {
        range.pos > self.old_end
    }

    fn touches(&self, range: TextRange) -> bool {
        range.end >= self.start
    }

    /// Keep a range that overlaps the edit consistent with the new text.
    fn adjust_intersecting(&self, range: TextRange) -> TextRange {
        let pos = range.pos.min(self.new_end);
        let end = if range.end >= self.old_end {
            range.shifted(self.delta).end
        } else {
            range.end.min(self.new_end)
        };
        let end = end.min(self.new_text_len);
        TextRange::new(pos.min(end), end)
    }
}

/// Shift nodes past the edit and mark those touching it. Nodes entirely in
/// front of the edit are left alone; marked nodes are recursed into.
fn adjust_tree(arena: &mut SyntaxArena, root: NodeId, range: AdjustRange, contains_error: BitSet) -> TreeMarks {
    let mut marks = TreeMarks {
        intersecting: BitSet::with_len(arena.node_count()),
        contains_error,
        shifted: 0,
    };
    let mut stack = vec![Child::Node(root)];
    while let Some(child) = stack.pop() {
        match child {
            Child::Node(id) => {
                let node_range = arena.node(id).range;
                if range.is_after(node_range) {
                    marks.shifted += shift_subtree(arena, id, range.delta);
                    continue;
                }
                if !range.touches(node_range) {
                    continue;
                }
                marks.intersecting.insert(id.index());
                let node = arena.node_mut(id);
                node.range = range.adjust_intersecting(node_range);
                stack.extend(node.data.children());
            }
            Child::List(id) => {
                let list_range = arena.list(id).range;
                if range.is_after(list_range) {
                    let list = arena.list_mut(id);
                    list.range = list_range.shifted(range.delta);
                    stack.extend(list.elements.iter().map(|&element| Child::Node(element)));
                    continue;
                }
                if !range.touches(list_range) {
                    continue;
                }
                let list = arena.list_mut(id);
                list.range = range.adjust_intersecting(list_range);
                stack.extend(list.elements.iter().map(|&element| Child::Node(element)));
            }
        }
    }
    marks
}

/// Move every node and list under `root` by `delta`. Returns the number of
/// nodes moved.
fn shift_subtree(arena: &mut SyntaxArena, root: NodeId, delta: i64) -> usize {
    let mut moved = 0;
    let mut stack = vec![Child::Node(root)];
    while let Some(child) = stack.pop() {
        match child {
            Child::Node(id) => {
                let node = arena.node_mut(id);
                node.range = node.range.shifted(delta);
                stack.extend(node.data.children());
                moved += 1;
            }
            Child::List(id) => {
                let list = arena.list_mut(id);
                list.range = list.range.shifted(delta);
                stack.extend(list.elements.iter().map(|&element| Child::Node(element)));
            }
        }
    }
    moved
}

// ============================================================================
// Update
// ============================================================================

/// Reparse `previous` after one edit, reusing the parts of its tree the edit
/// did not touch. `change` describes the edit in the coordinates of
/// `previous.text`.
///
/// With `aggressive_checks`, the text outside the change is compared between
/// the old and new text and the result is compared against a full parse.
#[instrument(skip_all, fields(file_name = %previous.file_name, len = new_text.len()))]
pub fn update_source_file(
    previous: SourceFile,
    new_text: &str,
    change: TextChange,
    aggressive_checks: bool,
) -> Result<SourceFile, UpdateError> {
    validate_change(&previous.text, new_text, change, aggressive_checks)?;

    if change.is_unchanged() {
        debug!("empty change, keeping the previous tree");
        return Ok(previous);
    }

    let options = options_of(&previous);
    if previous.statements().is_empty() {
        debug!("previous tree is empty, parsing from scratch");
        return Ok(Parser::new(&previous.file_name, new_text, &options).parse_source_file());
    }

    let expected = aggressive_checks
        .then(|| Parser::new(&previous.file_name, new_text, &options).parse_source_file());

    let SourceFile {
        file_name,
        mut arena,
        root: old_root,
        parse_diagnostics,
        interner,
        ..
    } = previous;
    let old_node_count = arena.node_count();

    let contains_error = mark_errors(&arena, old_root, &parse_diagnostics);
    let widened = widen_change(&arena, old_root, change);
    let range = AdjustRange::new(widened, new_text.len());
    debug!(
        start = range.start,
        old_end = range.old_end,
        new_end = range.new_end,
        delta = range.delta,
        "widened change range"
    );
    let marks = adjust_tree(&mut arena, old_root, range, contains_error);
    let intersecting_nodes = marks.intersecting.count();
    debug!(shifted = marks.shifted, intersecting = intersecting_nodes, "adjusted previous tree");

    let cursor = SyntaxCursor::new(&arena, old_root, &marks);
    let scanner = Scanner::new(new_text, options.language_variant);
    let (mut file, reused_nodes) = Parser::with_parts(&file_name, scanner, &options, arena, interner)
        .with_cursor(cursor)
        .parse_source_file_counting_reuse();

    let reparsed_nodes = file.arena.node_count() - old_node_count;
    let compacted = file.arena.node_count() > file.node_count * 2;
    if compacted {
        let (arena, root) = file.arena.compact(file.root);
        file.arena = arena;
        file.root = root;
        if file.parents.is_some() {
            file.parents = Some(ParentMap::build(&file.arena, file.root));
        }
    }

    let stats = IncrementalStats {
        reused_nodes,
        reparsed_nodes,
        intersecting_nodes,
        compacted,
    };
    debug!(?stats, "incremental update finished");
    file.incremental_stats = Some(stats);

    if let Some(expected) = expected {
        check_consistency(&expected, &file)?;
    }
    Ok(file)
}

fn options_of(file: &SourceFile) -> ParseOptions {
    ParseOptions {
        language_variant: file.language_variant,
        script_kind: file.script_kind,
        set_parent_nodes: file.parents.is_some(),
        ..ParseOptions::default()
    }
}

fn validate_change(
    old_text: &str,
    new_text: &str,
    change: TextChange,
    aggressive_checks: bool,
) -> Result<(), UpdateError> {
    let start = change.span.start as usize;
    let end = change.span.end() as usize;
    if end > old_text.len() || !old_text.is_char_boundary(start) || !old_text.is_char_boundary(end) {
        return Err(UpdateError::ChangeOutOfBounds {
            start: change.span.start,
            end: change.span.end(),
            text_len: old_text.len(),
        });
    }

    let expected = old_text.len() - (end - start) + change.new_length as usize;
    if expected != new_text.len() {
        return Err(UpdateError::LengthMismatch {
            expected,
            actual: new_text.len(),
        });
    }

    if aggressive_checks {
        let new_end = start + change.new_length as usize;
        if old_text.get(..start) != new_text.get(..start) || old_text.get(end..) != new_text.get(new_end..) {
            return Err(UpdateError::UnchangedTextDiffers);
        }
    }
    Ok(())
}

fn check_consistency(expected: &SourceFile, actual: &SourceFile) -> Result<(), UpdateError> {
    let same_tree = expected.dump() == actual.dump();
    let same_diagnostics = expected.parse_diagnostics.len() == actual.parse_diagnostics.len()
        && expected
            .parse_diagnostics
            .iter()
            .zip(&actual.parse_diagnostics)
            .all(|(a, b)| a.span == b.span && a.code == b.code);
    if same_tree && same_diagnostics {
        return Ok(());
    }
    debug!(same_tree, same_diagnostics, "incremental tree differs from a full parse");
    Err(UpdateError::InconsistentTree {
        file_name: actual.file_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SourceFile {
        Parser::new("edit.ts", text, &ParseOptions::default()).parse_source_file()
    }

    fn edit(text: &str, old: &str, new: &str) -> (String, TextChange) {
        let start = text.find(old).unwrap() as u32;
        let change = TextChange::new(TextSpan::new(start, old.len() as u32), new.len() as u32);
        (change.apply(text, new), change)
    }

    #[test]
    fn test_untouched_statements_are_reused() {
        let text = "let a = 1;\nlet b = 2;\nlet c = 3;\n";
        let (new_text, change) = edit(text, "2", "22");
        let file = update_source_file(parse(text), &new_text, change, true).unwrap();
        let stats = file.incremental_stats.unwrap();
        assert!(stats.reused_nodes >= 2, "{stats:?}");
        assert!(stats.intersecting_nodes > 0);
        assert_eq!(file.dump(), parse(&new_text).dump());
    }

    #[test]
    fn test_statements_with_errors_are_reparsed() {
        let text = "let a = ;\nlet c = 3;\n";
        let (new_text, change) = edit(text, "3", "4");
        let file = update_source_file(parse(text), &new_text, change, true).unwrap();
        assert_eq!(file.parse_diagnostics.len(), 1);
    }

    #[test]
    fn test_widening_reaches_back_two_nodes() {
        let file = parse("foo(bar);");
        let change = TextChange::new(TextSpan::new(8, 1), 1);
        let widened = widen_change(&file.arena, file.root, change);
        assert!(widened.span.start < 4, "{widened:?}");
        assert_eq!(widened.span.end(), 9);
        assert_eq!(widened.delta(), change.delta());
    }

    #[test]
    fn test_rejects_bad_changes() {
        let file = parse("let x = 1;");
        let change = TextChange::new(TextSpan::new(8, 10), 1);
        assert!(matches!(
            update_source_file(file.clone(), "let x = 2;", change, false),
            Err(UpdateError::ChangeOutOfBounds { .. })
        ));

        let change = TextChange::new(TextSpan::new(8, 1), 2);
        assert!(matches!(
            update_source_file(file.clone(), "let x = 2;", change, false),
            Err(UpdateError::LengthMismatch { expected: 11, actual: 10 })
        ));

        let change = TextChange::new(TextSpan::new(8, 1), 1);
        assert_eq!(
            update_source_file(file, "let y = 2;", change, true).unwrap_err(),
            UpdateError::UnchangedTextDiffers
        );
    }

    #[test]
    fn test_empty_previous_tree_is_parsed_from_scratch() {
        let (new_text, change) = edit("", "", "let x;");
        let file = update_source_file(parse(""), &new_text, change, false).unwrap();
        assert_eq!(file.statements().len(), 1);
        assert!(file.incremental_stats.is_none());
    }
}
