//! lupa DOM - Document Object Model
//!
//! Memory-efficient DOM tree implementation backing the lupa query engine.
//! Nodes live in an arena and are addressed by [`NodeId`]; every mutation
//! bumps a generation counter and wakes any pending mutation watchers, which
//! is what drives the asynchronous `wait_for` retry loop upstream.

mod document;
mod node;
mod selector;
pub mod serialize;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{SelectorList, SimpleSelector};
pub use tree::{DomTree, Generation, MutationWatcher};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node" (root has no parent, leaves have no children)
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root node ID (the document node itself)
    pub const ROOT: NodeId = NodeId(0);

    /// Check whether this ID refers to a real node
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Raw index value
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
