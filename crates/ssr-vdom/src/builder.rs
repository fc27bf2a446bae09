//! Fluent construction of element subtrees for component builders

use serde_json::Value;

use crate::{Props, VAttribute, VNode, VNodeId, VTree};

enum Child {
    Element(ElementBuilder),
    Text(String),
    Comment(String),
}

/// Element subtree builder
///
/// ```
/// use ssr_vdom::ElementBuilder;
///
/// let tree = ElementBuilder::new("a")
///     .attr("href", "/docs")
///     .text("Docs")
///     .build();
/// assert_eq!(tree.len(), 2);
/// ```
pub struct ElementBuilder {
    tag: String,
    namespace: String,
    attrs: Vec<VAttribute>,
    props: Props,
    raw_markup: Option<String>,
    children: Vec<Child>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            namespace: String::new(),
            attrs: Vec::new(),
            props: Props::new(),
            raw_markup: None,
            children: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add a static attribute (duplicates are kept)
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(VAttribute::new(key, value));
        self
    }

    /// Add a namespaced static attribute
    pub fn ns_attr(mut self, namespace: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(VAttribute {
            namespace: namespace.into(),
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Bind a property
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Set unparsed inner markup
    pub fn raw_markup(mut self, markup: impl Into<String>) -> Self {
        self.raw_markup = Some(markup.into());
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Child::Text(content.into()));
        self
    }

    pub fn comment(mut self, content: impl Into<String>) -> Self {
        self.children.push(Child::Comment(content.into()));
        self
    }

    /// Build a standalone tree rooted at this element
    pub fn build(self) -> VTree {
        let mut tree = VTree::new();
        let root = self.build_into(&mut tree);
        tree.set_root(root);
        tree
    }

    /// Allocate this element and its descendants in `tree`, detached
    pub fn build_into(self, tree: &mut VTree) -> VNodeId {
        let mut node = VNode::element(self.tag);
        node.namespace = self.namespace;
        node.attrs = self.attrs;
        node.props = self.props;
        node.raw_markup = self.raw_markup;
        let id = tree.alloc(node);

        for child in self.children {
            let child_id = match child {
                Child::Element(builder) => builder.build_into(tree),
                Child::Text(content) => tree.alloc(VNode::text(content)),
                Child::Comment(content) => tree.alloc(VNode::comment(content)),
            };
            tree.link_child(id, child_id);
        }
        id
    }
}

/// Standalone style fragment: a `style` element holding `css` as text
pub fn style_fragment(css: &str) -> VTree {
    ElementBuilder::new("style").text(css).build()
}
