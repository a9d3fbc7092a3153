//! Index-based storage for nodes and node lists.

use crate::node::{Child, ListId, Node, NodeId, NodeList};

/// Owns every node and list of a tree. Children are referenced by index.
///
/// Speculative parsing truncates the arena back to a saved length, so the
/// arena only ever grows or shrinks at its tail. Nodes orphaned by an
/// incremental update stay behind until [`SyntaxArena::compact`] runs.
#[derive(Debug, Clone, Default)]
pub struct SyntaxArena {
    nodes: Vec<Node>,
    lists: Vec<NodeList>,
}

/// A point the arena can be truncated back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaMark {
    nodes: usize,
    lists: usize,
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            lists: Vec::with_capacity(nodes / 4),
        }
    }

    #[inline]
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn alloc_list(&mut self, list: NodeList) -> ListId {
        let id = ListId(self.lists.len() as u32);
        self.lists.push(list);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn list(&self, id: ListId) -> &NodeList {
        &self.lists[id.index()]
    }

    #[inline]
    pub fn list_mut(&mut self, id: ListId) -> &mut NodeList {
        &mut self.lists[id.index()]
    }

    /// Elements of an optional list; empty when absent.
    #[inline]
    pub fn list_elements(&self, id: Option<ListId>) -> &[NodeId] {
        match id {
            Some(id) => &self.lists[id.index()].elements,
            None => &[],
        }
    }

    /// Number of node slots, reachable or not.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            nodes: self.nodes.len(),
            lists: self.lists.len(),
        }
    }

    /// Drop everything allocated after `mark`.
    pub fn truncate(&mut self, mark: ArenaMark) {
        self.nodes.truncate(mark.nodes);
        self.lists.truncate(mark.lists);
    }

    /// Children of `id` in source order.
    pub fn children(&self, id: NodeId) -> Vec<Child> {
        self.node(id).data.children()
    }

    /// Rebuild the arena keeping only what is reachable from `root`.
    /// Returns the new arena and the root's new id.
    pub fn compact(&self, root: NodeId) -> (SyntaxArena, NodeId) {
        const UNSET: u32 = u32::MAX;
        let mut node_map = vec![UNSET; self.nodes.len()];
        let mut list_map = vec![UNSET; self.lists.len()];
        let mut node_order = Vec::new();
        let mut list_order = Vec::new();

        let mut stack = vec![Child::Node(root)];
        while let Some(child) = stack.pop() {
            match child {
                Child::Node(id) => {
                    if node_map[id.index()] != UNSET {
                        continue;
                    }
                    node_map[id.index()] = node_order.len() as u32;
                    node_order.push(id);
                    let children = self.children(id);
                    stack.extend(children.into_iter().rev());
                }
                Child::List(id) => {
                    if list_map[id.index()] != UNSET {
                        continue;
                    }
                    list_map[id.index()] = list_order.len() as u32;
                    list_order.push(id);
                    stack.extend(self.list(id).elements.iter().rev().map(|&n| Child::Node(n)));
                }
            }
        }

        let mut remap = |child: Child| match child {
            Child::Node(id) => Child::Node(NodeId(node_map[id.index()])),
            Child::List(id) => Child::List(ListId(list_map[id.index()])),
        };

        let mut out = SyntaxArena::with_capacity(node_order.len());
        for &old in &node_order {
            let mut node = self.node(old).clone();
            node.data.remap_children(&mut remap);
            out.nodes.push(node);
        }
        for &old in &list_order {
            let list = self.list(old);
            out.lists.push(NodeList {
                range: list.range,
                has_trailing_comma: list.has_trailing_comma,
                is_missing: list.is_missing,
                elements: list
                    .elements
                    .iter()
                    .map(|&n| NodeId(node_map[n.index()]))
                    .collect(),
            });
        }
        (out, NodeId(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeData;
    use crate::syntax_kind::SyntaxKind;
    use crate::types::{ContextFlags, NodeFlags};
    use quill_core::text::TextRange;

    fn token(arena: &mut SyntaxArena, kind: SyntaxKind, pos: u32, end: u32) -> NodeId {
        arena.alloc(Node {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            context_flags: ContextFlags::NONE,
            data: NodeData::Token {},
        })
    }

    #[test]
    fn test_truncate_to_mark() {
        let mut arena = SyntaxArena::new();
        token(&mut arena, SyntaxKind::TrueKeyword, 0, 4);
        let mark = arena.mark();
        token(&mut arena, SyntaxKind::FalseKeyword, 4, 10);
        arena.alloc_list(NodeList::default());
        assert_eq!(arena.node_count(), 2);
        arena.truncate(mark);
        assert_eq!(arena.node_count(), 1);
        assert_eq!(arena.list_count(), 0);
    }

    #[test]
    fn test_compact_drops_unreachable() {
        let mut arena = SyntaxArena::new();
        let garbage = token(&mut arena, SyntaxKind::NullKeyword, 0, 4);
        let stmt_expr = token(&mut arena, SyntaxKind::TrueKeyword, 0, 4);
        let stmt = arena.alloc(Node {
            kind: SyntaxKind::ExpressionStatement,
            range: TextRange::new(0, 5),
            flags: NodeFlags::NONE,
            context_flags: ContextFlags::NONE,
            data: NodeData::Expr {
                expression: stmt_expr,
            },
        });
        let eof = token(&mut arena, SyntaxKind::EndOfFileToken, 5, 5);
        let statements = arena.alloc_list(NodeList::new(TextRange::new(0, 5), vec![stmt]));
        let root = arena.alloc(Node {
            kind: SyntaxKind::SourceFile,
            range: TextRange::new(0, 5),
            flags: NodeFlags::NONE,
            context_flags: ContextFlags::NONE,
            data: NodeData::SourceFile {
                statements,
                end_of_file_token: eof,
            },
        });
        assert_ne!(garbage, root);

        let (compacted, new_root) = arena.compact(root);
        assert_eq!(compacted.node_count(), 4);
        assert_eq!(compacted.list_count(), 1);
        let NodeData::SourceFile { statements, .. } = compacted.node(new_root).data else {
            panic!("root is not a source file");
        };
        let stmt = compacted.list(statements).elements[0];
        assert_eq!(compacted.node(stmt).kind, SyntaxKind::ExpressionStatement);
        let NodeData::Expr { expression } = compacted.node(stmt).data else {
            panic!("statement payload");
        };
        assert_eq!(compacted.node(expression).kind, SyntaxKind::TrueKeyword);
    }
}
