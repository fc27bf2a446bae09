//! Virtual Node
//!
//! Five links (parent, first/last child, prev/next sibling) make the tree
//! walkable in every direction and allow structural edits in place.

use crate::{Props, VNodeId};

/// Kind of virtual node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VNodeKind {
    Document,
    Element,
    Text,
    Comment,
}

/// Static markup attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VAttribute {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

impl VAttribute {
    /// Attribute without a namespace
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Virtual node
#[derive(Debug, Clone)]
pub struct VNode {
    /// Parent node (NONE if root)
    pub parent: VNodeId,
    /// First child
    pub first_child: VNodeId,
    /// Last child (for O(1) append)
    pub last_child: VNodeId,
    /// Previous sibling
    pub prev_sibling: VNodeId,
    /// Next sibling
    pub next_sibling: VNodeId,
    pub kind: VNodeKind,
    /// Tag name for elements, content for text and comment nodes
    pub data: String,
    pub namespace: String,
    /// Static attributes, in markup order
    pub attrs: Vec<VAttribute>,
    /// Dynamically bound properties
    pub props: Props,
    /// Unparsed markup to be attached as children at output time
    pub raw_markup: Option<String>,
}

impl VNode {
    fn with_kind(kind: VNodeKind, data: String) -> Self {
        Self {
            parent: VNodeId::NONE,
            first_child: VNodeId::NONE,
            last_child: VNodeId::NONE,
            prev_sibling: VNodeId::NONE,
            next_sibling: VNodeId::NONE,
            kind,
            data,
            namespace: String::new(),
            attrs: Vec::new(),
            props: Props::new(),
            raw_markup: None,
        }
    }

    /// Create a new element node
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_kind(VNodeKind::Element, tag.into())
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_kind(VNodeKind::Text, content.into())
    }

    /// Create a new comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_kind(VNodeKind::Comment, content.into())
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_kind(VNodeKind::Document, String::new())
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == VNodeKind::Element
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == VNodeKind::Text
    }

    /// Tag name if this is an element
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.is_element().then_some(self.data.as_str())
    }

    /// Get an attribute value by key
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Raw markup, if any non-empty markup is set
    pub fn markup(&self) -> Option<&str> {
        self.raw_markup.as_deref().filter(|m| !m.is_empty())
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_valid()
    }
}
