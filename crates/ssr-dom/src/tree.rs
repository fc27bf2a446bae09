//! DOM Tree (arena-based allocation)

use std::ops::{Index, IndexMut};

use crate::{DomError, DomResult, InternedString, Node, NodeData, NodeId, QualName, StringInterner};

/// Arena-based DOM tree for memory efficiency
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node to the arena as-is, links included
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns("", tag)
    }

    pub fn create_element_ns(&mut self, ns: &str, tag: &str) -> NodeId {
        let name = self.qual_name(ns, tag);
        self.alloc(Node::element(name))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(content.to_string())))
    }

    pub fn create_document(&mut self) -> NodeId {
        self.alloc(Node::document())
    }

    /// Intern a namespace/local pair
    pub fn qual_name(&mut self, ns: &str, local: &str) -> QualName {
        let ns = self.interner.intern(ns);
        let local = self.interner.intern(local);
        QualName::new(ns, local)
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if parent == child {
            return Err(DomError::HierarchyRequest(child));
        }

        self.detach(child);

        let prev_last = self[parent].last_child;
        {
            let node = &mut self[child];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            self[prev_last].next_sibling = child;
        } else {
            self[parent].first_child = child;
        }
        self[parent].last_child = child;
        Ok(())
    }

    /// Unlink a node from its parent and siblings
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self[id];
            (node.parent, node.prev_sibling, node.next_sibling)
        };

        if prev.is_valid() {
            self[prev].next_sibling = next;
        } else if parent.is_valid() {
            self[parent].first_child = next;
        }
        if next.is_valid() {
            self[next].prev_sibling = prev;
        } else if parent.is_valid() {
            self[parent].last_child = prev;
        }

        let node = &mut self[id];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Resolve an interned string
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name.local))
    }

    /// Attribute value of an element node by local name
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        let local = self.interner.lookup(name)?;
        elem.get_attr(local)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        if let Some(text) = node.as_text() {
            out.push_str(text);
        }
        for (child, _) in self.children(id) {
            self.collect_text(child, out);
        }
    }
}

impl Index<NodeId> for DomTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for DomTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

/// Iterator over children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_iterate() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_text("tail");
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();

        let kids: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(tree[ul].last_child, b);
        assert_eq!(tree[b].prev_sibling, a);
        assert_eq!(tree.tag_name(a), Some("li"));
        assert_eq!(tree.text_content(ul), "tail");
    }

    #[test]
    fn test_append_moves_attached_node() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let child = tree.create_element("span");
        tree.append_child(first, child).unwrap();
        tree.append_child(second, child).unwrap();

        assert_eq!(tree.children(first).count(), 0);
        assert!(!tree[first].last_child.is_valid());
        assert_eq!(tree[child].parent, second);
    }

    #[test]
    fn test_append_to_self_rejected() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert_eq!(tree.append_child(div, div), Err(DomError::HierarchyRequest(div)));
        assert_eq!(tree.append_child(div, NodeId(42)), Err(DomError::NotFound(NodeId(42))));
    }

    #[test]
    fn test_same_tag_same_identity() {
        let mut tree = DomTree::new();
        let a = tree.create_element("section");
        let b = tree.create_element("section");
        let name_a = tree[a].as_element().unwrap().name;
        let name_b = tree[b].as_element().unwrap().name;
        assert_eq!(name_a, name_b);
    }

    #[test]
    fn test_attr_lookup() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let name = tree.qual_name("", "href");
        tree[a].as_element_mut().unwrap().set_attr(name, "/x".into());
        tree[a].as_element_mut().unwrap().set_attr(name, "/y".into());
        assert_eq!(tree.attr(a, "href"), Some("/y"));
        assert_eq!(tree[a].as_element().unwrap().attrs.len(), 1);
        assert_eq!(tree.attr(a, "missing-attr"), None);
    }
}
