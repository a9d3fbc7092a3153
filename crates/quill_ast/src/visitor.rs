//! Tree traversal.
//!
//! Traversal is iterative so that deeply nested trees (long operator chains,
//! nested markup) cannot overflow the stack.

use crate::arena::SyntaxArena;
use crate::node::{Child, ListId, Node, NodeId, NodeList};

/// Whether a walk should descend into the children of the node just entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    Continue,
    SkipChildren,
}

/// Callbacks for [`walk`]. Every method has a no-op default.
pub trait Visitor {
    fn enter_node(&mut self, _id: NodeId, _node: &Node) -> VisitControl {
        VisitControl::Continue
    }

    fn leave_node(&mut self, _id: NodeId, _node: &Node) {}

    fn enter_list(&mut self, _id: ListId, _list: &NodeList) -> VisitControl {
        VisitControl::Continue
    }

    fn leave_list(&mut self, _id: ListId, _list: &NodeList) {}
}

enum Frame {
    Enter(Child),
    Leave(Child),
}

/// Pre-order walk of the tree under `root`, children in source order.
pub fn walk<V: Visitor + ?Sized>(arena: &SyntaxArena, root: NodeId, visitor: &mut V) {
    let mut stack = vec![Frame::Enter(Child::Node(root))];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(Child::Node(id)) => {
                let node = arena.node(id);
                if visitor.enter_node(id, node) == VisitControl::SkipChildren {
                    visitor.leave_node(id, node);
                    continue;
                }
                stack.push(Frame::Leave(Child::Node(id)));
                let children = node.data.children();
                stack.extend(children.into_iter().rev().map(Frame::Enter));
            }
            Frame::Enter(Child::List(id)) => {
                let list = arena.list(id);
                if visitor.enter_list(id, list) == VisitControl::SkipChildren {
                    visitor.leave_list(id, list);
                    continue;
                }
                stack.push(Frame::Leave(Child::List(id)));
                stack.extend(
                    list.elements
                        .iter()
                        .rev()
                        .map(|&n| Frame::Enter(Child::Node(n))),
                );
            }
            Frame::Leave(Child::Node(id)) => visitor.leave_node(id, arena.node(id)),
            Frame::Leave(Child::List(id)) => visitor.leave_list(id, arena.list(id)),
        }
    }
}

/// Call `f` for every node under `root` (inclusive), in pre-order.
pub fn for_each_descendant(arena: &SyntaxArena, root: NodeId, f: impl FnMut(NodeId, &Node)) {
    struct Each<F>(F);
    impl<F: FnMut(NodeId, &Node)> Visitor for Each<F> {
        fn enter_node(&mut self, id: NodeId, node: &Node) -> VisitControl {
            (self.0)(id, node);
            VisitControl::Continue
        }
    }
    walk(arena, root, &mut Each(f));
}

/// Parent links, computed on request.
#[derive(Debug, Clone, Default)]
pub struct ParentMap {
    parents: Vec<Option<NodeId>>,
}

impl ParentMap {
    pub fn build(arena: &SyntaxArena, root: NodeId) -> Self {
        struct Builder {
            parents: Vec<Option<NodeId>>,
            path: Vec<NodeId>,
        }
        impl Visitor for Builder {
            fn enter_node(&mut self, id: NodeId, _node: &Node) -> VisitControl {
                self.parents[id.index()] = self.path.last().copied();
                self.path.push(id);
                VisitControl::Continue
            }

            fn leave_node(&mut self, _id: NodeId, _node: &Node) {
                self.path.pop();
            }
        }

        let mut builder = Builder {
            parents: vec![None; arena.node_count()],
            path: Vec::new(),
        };
        walk(arena, root, &mut builder);
        Self {
            parents: builder.parents,
        }
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }
}
