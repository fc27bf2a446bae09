//! Markup fragment parser
//!
//! Uses html5ever's RcDom and converts the fragment into our arena tree.

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use ssr_dom::{DomTree, ElementData, Node, NodeData, NodeId};

use crate::ParseError;

/// XHTML namespace URI
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Fragment context (the element the fragment is parsed "inside of")
#[derive(Debug, Clone)]
pub struct FragmentContext {
    pub context_element: String,
    pub namespace: String,
}

impl FragmentContext {
    /// HTML context element with the given tag
    pub fn html(context_element: impl Into<String>) -> Self {
        Self {
            context_element: context_element.into(),
            namespace: HTML_NAMESPACE.to_string(),
        }
    }
}

impl Default for FragmentContext {
    fn default() -> Self {
        Self::html("body")
    }
}

/// Markup fragment parser
#[derive(Debug, Clone, Default)]
pub struct FragmentParser {
    context: FragmentContext,
}

impl FragmentParser {
    /// Parser using a `<body>` context
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: FragmentContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &FragmentContext {
        &self.context
    }

    /// Parse `markup` and allocate the resulting nodes in `tree`.
    ///
    /// Returns the top-level fragment nodes, detached, in document order.
    pub fn parse_into(&self, markup: &str, tree: &mut DomTree) -> Result<Vec<NodeId>, ParseError> {
        let context = QualName::new(
            None,
            Namespace::from(self.context.namespace.as_str()),
            LocalName::from(self.context.context_element.as_str()),
        );

        let dom = html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;

        // The fragment hangs off a synthetic <html> root under the document
        let document = dom.document.children.borrow();
        let root = document
            .iter()
            .find(|handle| matches!(handle.data, RcNodeData::Element { .. }))
            .ok_or(ParseError::MissingRoot)?;

        let mut nodes = Vec::new();
        for child in root.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree)? {
                nodes.push(id);
            }
        }

        tracing::trace!(
            context = %self.context.context_element,
            top_level = nodes.len(),
            "parsed markup fragment"
        );
        Ok(nodes)
    }

    /// Convert an RcDom node and its descendants. Processing instructions
    /// have no counterpart and are dropped.
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, ParseError> {
        let id = match &handle.data {
            RcNodeData::Document => tree.create_document(),
            RcNodeData::Doctype { name, public_id, system_id } => {
                let name = tree.interner_mut().intern(name);
                tree.alloc(Node::new(NodeData::Doctype {
                    name,
                    public_id: public_id.to_string(),
                    system_id: system_id.to_string(),
                }))
            }
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let qname = tree.qual_name(&name.ns, &name.local);
                let mut elem = ElementData::new(qname);
                for attr in attrs.borrow().iter() {
                    // Attributes keep their markup prefix (`xlink`), not the namespace URI
                    let prefix = attr.name.prefix.as_ref().map_or("", |p| &**p);
                    let attr_name = tree.qual_name(prefix, &attr.name.local);
                    elem.set_attr(attr_name, attr.value.to_string());
                }
                let id = tree.alloc(Node::new(NodeData::Element(elem)));

                // <template> content lives outside the regular child list
                if let Some(contents) = template_contents.borrow().as_ref() {
                    self.convert_children(contents, tree, id)?;
                }
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return Ok(None),
        };

        self.convert_children(handle, tree, id)?;
        Ok(Some(id))
    }

    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        for child in handle.children.borrow().iter() {
            if let Some(child_id) = self.convert_node(child, tree)? {
                tree.append_child(parent, child_id)?;
            }
        }
        Ok(())
    }
}
