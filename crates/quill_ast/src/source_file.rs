//! The parsed form of one file.

use crate::arena::SyntaxArena;
use crate::dump::dump_tree;
use crate::node::{ListId, Node, NodeData, NodeId, NodeList};
use crate::syntax_kind::SyntaxKind;
use crate::types::{LanguageVariant, ModifierFlags, ScriptKind};
use crate::visitor::ParentMap;
use quill_core::intern::StringInterner;
use quill_diagnostics::Diagnostic;

/// What an incremental update managed to keep from the previous tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncrementalStats {
    /// List elements taken over from the previous tree without reparsing.
    pub reused_nodes: usize,
    /// Nodes created fresh by the reparse.
    pub reparsed_nodes: usize,
    /// Old nodes whose range touched the widened edit.
    pub intersecting_nodes: usize,
    /// Whether unreachable nodes were dropped from the arena afterwards.
    pub compacted: bool,
}

/// A parsed file: its text, its tree and the diagnostics found while parsing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    pub language_variant: LanguageVariant,
    pub script_kind: ScriptKind,
    pub arena: SyntaxArena,
    /// The `SourceFile` node.
    pub root: NodeId,
    pub parse_diagnostics: Vec<Diagnostic>,
    /// Reachable nodes in the tree.
    pub node_count: usize,
    /// Reachable identifiers in the tree.
    pub identifier_count: usize,
    /// Owns the text behind every `InternedString` in the arena. Carried over
    /// by incremental updates.
    pub interner: StringInterner,
    /// Present when parent links were requested at parse time.
    pub parents: Option<ParentMap>,
    /// Present when this tree came from an incremental update.
    pub incremental_stats: Option<IncrementalStats>,
}

impl SourceFile {
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    #[inline]
    pub fn list(&self, id: ListId) -> &NodeList {
        self.arena.list(id)
    }

    /// Top-level statements.
    pub fn statements(&self) -> &[NodeId] {
        match self.arena.node(self.root).data {
            NodeData::SourceFile { statements, .. } => &self.arena.list(statements).elements,
            _ => &[],
        }
    }

    pub fn end_of_file_token(&self) -> Option<NodeId> {
        match self.arena.node(self.root).data {
            NodeData::SourceFile {
                end_of_file_token, ..
            } => Some(end_of_file_token),
            _ => None,
        }
    }

    /// Source text covered by `id`, including its leading trivia.
    pub fn full_text(&self, id: NodeId) -> &str {
        let range = self.arena.node(id).range;
        self.text.get(range.to_range()).unwrap_or("")
    }

    /// Text of an identifier, private identifier or literal node.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        match self.arena.node(id).data {
            NodeData::Identifier { text, .. }
            | NodeData::PrivateIdentifier { text }
            | NodeData::Literal { text, .. } => Some(self.interner.resolve(text)),
            _ => None,
        }
    }

    pub fn has_parse_errors(&self) -> bool {
        self.parse_diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Modifier keywords on a declaration, folded into flags.
    pub fn modifier_flags(&self, id: NodeId) -> ModifierFlags {
        self.arena
            .list_elements(self.arena.node(id).data.modifiers())
            .iter()
            .fold(ModifierFlags::NONE, |flags, &m| {
                flags | ModifierFlags::from_kind(self.arena.node(m).kind)
            })
    }

    /// Parent links for the whole tree. Uses the stored map when present.
    pub fn parent_map(&self) -> ParentMap {
        match &self.parents {
            Some(parents) => parents.clone(),
            None => ParentMap::build(&self.arena, self.root),
        }
    }

    /// Structural dump of the tree.
    pub fn dump(&self) -> String {
        dump_tree(&self.arena, &self.interner, self.root)
    }

    /// Find the innermost node of `kind` whose range contains `pos`.
    pub fn find_innermost(&self, pos: u32, kind: SyntaxKind) -> Option<NodeId> {
        let mut found = None;
        crate::visitor::for_each_descendant(&self.arena, self.root, |id, node| {
            if node.kind == kind && node.range.pos <= pos && pos < node.range.end {
                found = Some(id);
            }
        });
        found
    }
}
