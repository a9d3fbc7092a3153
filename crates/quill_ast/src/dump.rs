//! Structural text dump of a tree.
//!
//! The dump records kinds, ranges, flags, scalar payload and child structure,
//! never arena indices, so two trees built independently compare equal exactly
//! when their dumps do.

use crate::arena::SyntaxArena;
use crate::node::{Field, ListId, NodeId};
use quill_core::intern::StringInterner;
use std::fmt::Write;

enum Item {
    Node(NodeId, Option<&'static str>),
    List(ListId, &'static str),
}

/// Render the tree under `root`, one node or list per line.
pub fn dump_tree(arena: &SyntaxArena, interner: &StringInterner, root: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![(Item::Node(root, None), 0usize)];

    while let Some((item, depth)) = stack.pop() {
        for _ in 0..depth {
            out.push_str("  ");
        }
        match item {
            Item::Node(id, label) => {
                let node = arena.node(id);
                if let Some(label) = label {
                    let _ = write!(out, "{label}: ");
                }
                let _ = write!(out, "{:?} {:?}", node.kind, node.range);
                if !node.flags.is_empty() {
                    let _ = write!(out, " flags={:?}", node.flags);
                }
                if !node.context_flags.is_empty() {
                    let _ = write!(out, " context={:?}", node.context_flags);
                }

                let mut children = Vec::new();
                node.data.for_each_field(&mut |name, field| match field {
                    Field::Text(text) => {
                        let _ = write!(out, " {name}={:?}", interner.resolve(text));
                    }
                    Field::Bool(true) => {
                        let _ = write!(out, " {name}");
                    }
                    Field::Kind(kind) | Field::OptKind(Some(kind)) => {
                        let _ = write!(out, " {name}={kind:?}");
                    }
                    Field::Node(child) | Field::OptNode(Some(child)) => {
                        children.push(Item::Node(child, Some(name)));
                    }
                    Field::List(list) | Field::OptList(Some(list)) => {
                        children.push(Item::List(list, name));
                    }
                    Field::Bool(false)
                    | Field::OptKind(None)
                    | Field::OptNode(None)
                    | Field::OptList(None) => {}
                });
                out.push('\n');
                stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
            }
            Item::List(id, label) => {
                let list = arena.list(id);
                let _ = write!(out, "{label}: [{:?}]", list.range);
                if list.has_trailing_comma {
                    out.push_str(" trailing_comma");
                }
                if list.is_missing {
                    out.push_str(" missing");
                }
                out.push('\n');
                stack.extend(
                    list.elements
                        .iter()
                        .rev()
                        .map(|&n| (Item::Node(n, None), depth + 1)),
                );
            }
        }
    }
    out
}

/// Count reachable nodes and identifiers under `root`.
pub fn count_nodes(arena: &SyntaxArena, root: NodeId) -> (usize, usize) {
    let mut nodes = 0;
    let mut identifiers = 0;
    crate::visitor::for_each_descendant(arena, root, |_, node| {
        nodes += 1;
        if node.kind == crate::syntax_kind::SyntaxKind::Identifier {
            identifiers += 1;
        }
    });
    (nodes, identifiers)
}
