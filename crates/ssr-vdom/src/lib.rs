//! Virtual node tree
//!
//! Mutable, parent-annotated tree that components render into before the
//! static renderer expands and converts it.

mod builder;
mod merge;
mod node;
mod props;
mod tree;

pub use builder::{ElementBuilder, style_fragment};
pub use merge::{instantiation_props, merge_props_into_attrs};
pub use node::{VAttribute, VNode, VNodeKind};
pub use props::{PropValue, Props, display_value};
pub use tree::{Children, VTree};

/// Virtual node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VNodeId(pub(crate) u32);

impl VNodeId {
    /// Null link
    pub const NONE: VNodeId = VNodeId(u32::MAX);

    /// Check whether this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for VNodeId {
    fn default() -> Self {
        Self::NONE
    }
}

/// Virtual tree errors
#[derive(Debug, thiserror::Error)]
pub enum VdomError {
    #[error("virtual node {0:?} not found")]
    NotFound(VNodeId),

    #[error("tree has no root node")]
    EmptyTree,
}

pub type VdomResult<T> = Result<T, VdomError>;
