//! quill_ast: syntax tree definitions.
//!
//! Nodes are stored in a [`SyntaxArena`] and addressed by [`NodeId`]; the
//! payload of each node is a [`NodeData`] variant. Parent links are not stored
//! in nodes and are computed on request with [`ParentMap`].

pub mod arena;
pub mod dump;
pub mod node;
pub mod source_file;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

pub use arena::{ArenaMark, SyntaxArena};
pub use dump::{count_nodes, dump_tree};
pub use node::{Child, Field, ListId, Node, NodeData, NodeId, NodeList};
pub use source_file::{IncrementalStats, SourceFile};
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::{for_each_descendant, walk, ParentMap, VisitControl, Visitor};
