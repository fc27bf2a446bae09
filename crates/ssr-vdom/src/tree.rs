//! Virtual tree (arena-based allocation)

use std::ops::{Index, IndexMut};

use crate::{VNode, VNodeId, VdomError, VdomResult};

/// Arena-based virtual node tree
#[derive(Debug, Clone)]
pub struct VTree {
    nodes: Vec<VNode>,
    root: VNodeId,
}

impl VTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: VNodeId::NONE,
        }
    }

    /// Create a tree whose root is the given node
    pub fn with_root(node: VNode) -> Self {
        let mut tree = Self::new();
        let root = tree.alloc(node);
        tree.root = root;
        tree
    }

    /// Root node (NONE if unset)
    pub fn root(&self) -> VNodeId {
        self.root
    }

    pub fn set_root(&mut self, id: VNodeId) {
        self.root = id;
    }

    /// Get a node by ID
    pub fn get(&self, id: VNodeId) -> Option<&VNode> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: VNodeId) -> Option<&mut VNode> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, reachable or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node to the arena
    pub fn alloc(&mut self, node: VNode) -> VNodeId {
        let id = VNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn create_element(&mut self, tag: &str) -> VNodeId {
        self.alloc(VNode::element(tag))
    }

    pub fn create_text(&mut self, content: &str) -> VNodeId {
        self.alloc(VNode::text(content))
    }

    pub fn create_comment(&mut self, content: &str) -> VNodeId {
        self.alloc(VNode::comment(content))
    }

    pub fn create_document(&mut self) -> VNodeId {
        self.alloc(VNode::document())
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: VNodeId, child: VNodeId) -> VdomResult<()> {
        if self.get(parent).is_none() {
            return Err(VdomError::NotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(VdomError::NotFound(child));
        }
        self.link_child(parent, child);
        Ok(())
    }

    /// Link two nodes known to be in the arena
    pub(crate) fn link_child(&mut self, parent: VNodeId, child: VNodeId) {
        let prev_last = self[parent].last_child;
        {
            let node = &mut self[child];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = VNodeId::NONE;
        }
        if prev_last.is_valid() {
            self[prev_last].next_sibling = child;
        } else {
            self[parent].first_child = child;
        }
        self[parent].last_child = child;
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: VNodeId) -> Children<'_> {
        let next = self.get(id).map_or(VNodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Deep-copy the subtree rooted at `src_id` of another tree into this
    /// arena. The copy is detached; its id is returned.
    pub fn import_subtree(&mut self, src: &VTree, src_id: VNodeId) -> VdomResult<VNodeId> {
        let node = src.get(src_id).ok_or(VdomError::NotFound(src_id))?;
        let copy = self.alloc(VNode {
            parent: VNodeId::NONE,
            first_child: VNodeId::NONE,
            last_child: VNodeId::NONE,
            prev_sibling: VNodeId::NONE,
            next_sibling: VNodeId::NONE,
            ..node.clone()
        });

        let mut child = node.first_child;
        while child.is_valid() {
            let child_copy = self.import_subtree(src, child)?;
            self.append_child(copy, child_copy)?;
            child = src.get(child).map_or(VNodeId::NONE, |n| n.next_sibling);
        }
        Ok(copy)
    }

    /// Replace `target` in place with the root of `replacement`.
    ///
    /// Every node of `replacement` other than its root is moved into this
    /// arena, with links to the replacement root redirected to `target`
    /// (so the root's children become children of `target`). `target`
    /// then takes the root's content and child links while keeping its own
    /// parent and siblings, so its position and identity are unchanged.
    ///
    /// Returns the ids of the moved nodes.
    pub fn graft(&mut self, target: VNodeId, replacement: VTree) -> VdomResult<Vec<VNodeId>> {
        if self.get(target).is_none() {
            return Err(VdomError::NotFound(target));
        }
        let replacement_root = replacement.root;
        if replacement.get(replacement_root).is_none() {
            return Err(VdomError::EmptyTree);
        }

        let start = self.nodes.len() as u32;
        let mut next = start;
        let remap: Vec<VNodeId> = (0..replacement.nodes.len())
            .map(|i| {
                if i == replacement_root.index() {
                    target
                } else {
                    let id = VNodeId(next);
                    next += 1;
                    id
                }
            })
            .collect();
        let relink = |id: VNodeId| {
            if id.is_valid() {
                remap.get(id.index()).copied().unwrap_or(VNodeId::NONE)
            } else {
                VNodeId::NONE
            }
        };

        let mut new_root = None;
        for (i, mut node) in replacement.nodes.into_iter().enumerate() {
            node.parent = relink(node.parent);
            node.first_child = relink(node.first_child);
            node.last_child = relink(node.last_child);
            node.prev_sibling = relink(node.prev_sibling);
            node.next_sibling = relink(node.next_sibling);
            if i == replacement_root.index() {
                new_root = Some(node);
            } else {
                self.nodes.push(node);
            }
        }

        let new_root = new_root.ok_or(VdomError::EmptyTree)?;
        let slot = &mut self[target];
        let (parent, prev_sibling, next_sibling) = (slot.parent, slot.prev_sibling, slot.next_sibling);
        *slot = VNode {
            parent,
            prev_sibling,
            next_sibling,
            ..new_root
        };

        tracing::trace!(?target, moved = next - start, "grafted replacement subtree");
        Ok((start..next).map(VNodeId).collect())
    }

    /// Subtree rooted at `id`, in pre-order
    pub fn descendants(&self, id: VNodeId) -> Vec<VNodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.get(current).is_none() {
                continue;
            }
            out.push(current);
            let mut kids: Vec<_> = self.children(current).map(|(kid, _)| kid).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }
}

impl Default for VTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<VNodeId> for VTree {
    type Output = VNode;

    fn index(&self, id: VNodeId) -> &VNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<VNodeId> for VTree {
    fn index_mut(&mut self, id: VNodeId) -> &mut VNode {
        &mut self.nodes[id.index()]
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a VTree,
    next: VNodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (VNodeId, &'a VNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
