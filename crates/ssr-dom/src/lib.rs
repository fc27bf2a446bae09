//! Output document tree
//!
//! Memory-efficient arena tree handed to the serializer. Names are
//! interned per tree; links are 4-byte ids instead of pointers.

mod interner;
mod node;
mod tree;

pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, QualName, TextData};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Null link
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    #[error("hierarchy request error: {0:?} cannot be appended to itself")]
    HierarchyRequest(NodeId),
}

pub type DomResult<T> = Result<T, DomError>;
