//! Graph-to-output conversion
//!
//! The virtual tree is a graph: following parent links from any node leads
//! back to already visited nodes. Conversion therefore memoizes by node id
//! and registers each output node *before* resolving any of its links, so
//! a link back to a node in progress yields the already allocated output
//! node. Every reachable virtual node gets exactly one output node, no
//! matter which of its five links reaches it first.
//!
//! Link resolution uses an explicit work queue instead of recursion, so
//! stack depth does not grow with document size.

use std::collections::{HashMap, VecDeque};

use ssr_dom::{Attribute, DomTree, ElementData, Node, NodeData, NodeId, TextData};
use ssr_html::FragmentParser;
use ssr_vdom::{VNodeId, VNodeKind, VTree, VdomError, merge_props_into_attrs};

use crate::RenderResult;

/// Result of converting a virtual tree
#[derive(Debug)]
pub struct Conversion {
    pub tree: DomTree,
    /// Output counterpart of the virtual root
    pub root: NodeId,
    /// Output node of every converted virtual node
    pub mapping: HashMap<VNodeId, NodeId>,
}

/// Memoized virtual-to-output converter
pub struct GraphConverter<'a> {
    src: &'a VTree,
    parser: &'a FragmentParser,
    out: DomTree,
    memo: HashMap<VNodeId, NodeId>,
    queue: VecDeque<(VNodeId, NodeId)>,
    with_markup: Vec<(VNodeId, NodeId)>,
}

impl<'a> GraphConverter<'a> {
    pub fn new(src: &'a VTree, parser: &'a FragmentParser) -> Self {
        Self {
            src,
            parser,
            out: DomTree::new(),
            memo: HashMap::new(),
            queue: VecDeque::new(),
            with_markup: Vec::new(),
        }
    }

    /// Convert everything reachable from the virtual root, then parse and
    /// append raw inner markup.
    pub fn convert(mut self) -> RenderResult<Conversion> {
        let src_root = self.src.root();
        if self.src.get(src_root).is_none() {
            return Err(VdomError::EmptyTree.into());
        }

        let root = self.resolve(src_root);
        while let Some((vid, nid)) = self.queue.pop_front() {
            self.fill(vid, nid)?;
        }
        let converted = self.memo.len();

        self.expand_markup()?;

        tracing::debug!(converted, output_nodes = self.out.len(), "converted virtual tree");
        Ok(Conversion {
            tree: self.out,
            root,
            mapping: self.memo,
        })
    }

    /// Output node for a virtual node, allocating and queueing it on first
    /// sight. A null link resolves to a null link.
    fn resolve(&mut self, id: VNodeId) -> NodeId {
        if !id.is_valid() {
            return NodeId::NONE;
        }
        if let Some(&existing) = self.memo.get(&id) {
            return existing;
        }

        let allocated = self.out.alloc(Node::document());
        self.memo.insert(id, allocated);
        self.queue.push_back((id, allocated));
        allocated
    }

    fn fill(&mut self, vid: VNodeId, nid: NodeId) -> RenderResult<()> {
        let src = self.src;
        let vnode = src.get(vid).ok_or(VdomError::NotFound(vid))?;

        let parent = self.resolve(vnode.parent);
        let first_child = self.resolve(vnode.first_child);
        let last_child = self.resolve(vnode.last_child);
        let prev_sibling = self.resolve(vnode.prev_sibling);
        let next_sibling = self.resolve(vnode.next_sibling);

        let data = match vnode.kind {
            VNodeKind::Document => NodeData::Document,
            VNodeKind::Text => NodeData::Text(TextData {
                content: vnode.data.clone(),
            }),
            VNodeKind::Comment => NodeData::Comment(vnode.data.clone()),
            VNodeKind::Element => {
                let name = self.out.qual_name(&vnode.namespace, &vnode.data);
                let mut elem = ElementData::new(name);
                for attr in merge_props_into_attrs(&vnode.attrs, &vnode.props) {
                    let attr_name = self.out.qual_name(&attr.namespace, &attr.key);
                    elem.attrs.push(Attribute {
                        name: attr_name,
                        value: attr.value,
                    });
                }
                NodeData::Element(elem)
            }
        };

        self.out[nid] = Node {
            parent,
            first_child,
            last_child,
            prev_sibling,
            next_sibling,
            data,
        };

        if vnode.markup().is_some() {
            self.with_markup.push((vid, nid));
        }
        Ok(())
    }

    /// Parse raw markup and append the result after existing children
    fn expand_markup(&mut self) -> RenderResult<()> {
        let src = self.src;
        for (vid, nid) in std::mem::take(&mut self.with_markup) {
            let Some(markup) = src.get(vid).and_then(|n| n.markup()) else {
                continue;
            };
            let nodes = self.parser.parse_into(markup, &mut self.out)?;
            tracing::trace!(?vid, appended = nodes.len(), "expanded inner markup");
            for child in nodes {
                self.out.append_child(nid, child)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssr_vdom::{ElementBuilder, VNode};

    fn convert(tree: &VTree) -> Conversion {
        let parser = FragmentParser::new();
        GraphConverter::new(tree, &parser).convert().unwrap()
    }

    #[test]
    fn test_each_node_converted_once() {
        let tree = ElementBuilder::new("div")
            .child(ElementBuilder::new("a").text("1"))
            .child(ElementBuilder::new("b").text("2"))
            .text("tail")
            .build();

        let conversion = convert(&tree);
        assert_eq!(conversion.mapping.len(), tree.len());
        assert_eq!(conversion.tree.len(), tree.len());
    }

    #[test]
    fn test_links_are_isomorphic() {
        let tree = ElementBuilder::new("ul")
            .child(ElementBuilder::new("li").text("a"))
            .child(ElementBuilder::new("li").text("b"))
            .child(ElementBuilder::new("li").text("c"))
            .build();
        let conversion = convert(&tree);
        let map = |id: VNodeId| {
            if id.is_valid() { conversion.mapping[&id] } else { NodeId::NONE }
        };

        for id in tree.descendants(tree.root()) {
            let vnode = &tree[id];
            let node = &conversion.tree[map(id)];
            assert_eq!(node.parent, map(vnode.parent));
            assert_eq!(node.first_child, map(vnode.first_child));
            assert_eq!(node.last_child, map(vnode.last_child));
            assert_eq!(node.prev_sibling, map(vnode.prev_sibling));
            assert_eq!(node.next_sibling, map(vnode.next_sibling));
        }
    }

    #[test]
    fn test_entry_from_inner_node_reaches_whole_tree() {
        // Start from a leaf: the parent link leads back up and around
        let mut tree = ElementBuilder::new("div")
            .child(ElementBuilder::new("p").text("deep"))
            .child(ElementBuilder::new("p"))
            .build();
        let (p, _) = tree.children(tree.root()).next().unwrap();
        let (leaf, _) = tree.children(p).next().unwrap();
        let total = tree.len();
        tree.set_root(leaf);

        let conversion = convert(&tree);
        assert_eq!(conversion.mapping.len(), total);
        assert_eq!(conversion.tree[conversion.root].as_text(), Some("deep"));
    }

    #[test]
    fn test_props_overlay_attributes() {
        let tree = ElementBuilder::new("input")
            .attr("foo", "bar")
            .attr("type", "text")
            .prop("foo", 42)
            .prop("baz", 7)
            .build();
        let conversion = convert(&tree);
        let out = &conversion.tree;
        let elem = out[conversion.root].as_element().unwrap();

        let attrs: Vec<_> = elem
            .attrs
            .iter()
            .map(|a| (out.resolve(a.name.local), a.value.as_str()))
            .collect();
        assert_eq!(attrs, vec![("foo", "42"), ("type", "text"), ("baz", "7")]);
    }

    #[test]
    fn test_duplicate_static_attributes_copied_verbatim() {
        let tree = ElementBuilder::new("div").attr("data-x", "1").attr("data-x", "2").build();
        let conversion = convert(&tree);
        let elem = conversion.tree[conversion.root].as_element().unwrap();
        assert_eq!(elem.attrs.len(), 2);
    }

    #[test]
    fn test_markup_appended_after_children() {
        let tree = ElementBuilder::new("div")
            .text("first")
            .raw_markup("<b>bold</b>")
            .build();
        let conversion = convert(&tree);
        let out = &conversion.tree;

        let kids: Vec<_> = out.children(conversion.root).map(|(id, _)| id).collect();
        assert_eq!(kids.len(), 2);
        assert_eq!(out[kids[0]].as_text(), Some("first"));
        assert_eq!(out.tag_name(kids[1]), Some("b"));
        assert_eq!(out[conversion.root].last_child, kids[1]);
        assert_eq!(out[kids[1]].parent, conversion.root);
    }

    #[test]
    fn test_empty_markup_ignored() {
        let tree = ElementBuilder::new("div").raw_markup("").build();
        let conversion = convert(&tree);
        assert_eq!(conversion.tree.len(), 1);
    }

    #[test]
    fn test_empty_tree_rejected() {
        let tree = VTree::new();
        let parser = FragmentParser::new();
        assert!(GraphConverter::new(&tree, &parser).convert().is_err());
    }

    #[test]
    fn test_namespace_and_kinds_copied() {
        let mut tree = VTree::with_root(VNode::document());
        let svg = tree.alloc(VNode {
            namespace: "http://www.w3.org/2000/svg".into(),
            ..VNode::element("svg")
        });
        let note = tree.create_comment("note");
        tree.append_child(tree.root(), svg).unwrap();
        tree.append_child(tree.root(), note).unwrap();

        let conversion = convert(&tree);
        let out = &conversion.tree;
        assert!(matches!(out[conversion.root].data, NodeData::Document));
        let elem = out[conversion.mapping[&svg]].as_element().unwrap();
        assert_eq!(out.resolve(elem.name.ns), "http://www.w3.org/2000/svg");
        assert!(matches!(out[conversion.mapping[&note]].data, NodeData::Comment(ref c) if c == "note"));
    }
}
