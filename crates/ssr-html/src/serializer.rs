//! HTML Serialization
//!
//! Serializes DOM nodes to markup.
//!
//! - Proper HTML escaping
//! - Void element handling
//! - Raw text (`<style>`, `<script>`, `<xmp>`, ...) children written verbatim

use std::io::{self, Write};

use ssr_dom::{DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

/// Void elements (self-closing, no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Serialize children of a node
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output, 0);
        output
    }

    /// Serialize a node including the node itself
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0);
        output
    }

    /// Serialize a node and write it to `out`, returning the bytes written
    pub fn write_outer<W: Write>(&self, tree: &DomTree, node_id: NodeId, out: &mut W) -> io::Result<usize> {
        let html = self.serialize_outer(tree, node_id);
        out.write_all(html.as_bytes())?;
        Ok(html.len())
    }

    /// Write a `<style>` element wrapping `css` to `out`
    pub fn write_style_block<W: Write>(&self, css: &str, out: &mut W) -> io::Result<usize> {
        let mut tree = DomTree::new();
        let style = tree.create_element("style");
        let text = tree.create_text(css);
        tree.append_child(style, text).map_err(io::Error::other)?;
        self.write_outer(&tree, style, out)
    }

    /// Serialize a node and its descendants
    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String, depth: usize) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output, depth);
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name.local);
                let is_void = VOID_ELEMENTS.contains(&tag);
                let is_raw = RAW_TEXT_ELEMENTS.contains(&tag);

                if self.pretty_print && depth > 0 {
                    self.newline(output, depth);
                }

                output.push('<');
                output.push_str(tag);

                for attr in elem.attrs.iter() {
                    output.push(' ');
                    let ns = tree.resolve(attr.name.ns);
                    if !ns.is_empty() {
                        output.push_str(ns);
                        output.push(':');
                    }
                    output.push_str(tree.resolve(attr.name.local));
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }

                if is_void {
                    output.push_str(" />");
                    return;
                }
                output.push('>');

                if is_raw {
                    self.serialize_children_raw(tree, node_id, output);
                } else {
                    self.serialize_children(tree, node_id, output, depth + 1);
                }

                if self.pretty_print && !is_raw && self.has_element_child(tree, node_id) {
                    self.newline(output, depth);
                }
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(&text.content, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(tree.resolve(*name));
                output.push('>');
            }
        }
    }

    fn has_element_child(&self, tree: &DomTree, node_id: NodeId) -> bool {
        tree.children(node_id).any(|(_, child)| child.is_element())
    }

    fn newline(&self, output: &mut String, depth: usize) {
        output.push('\n');
        for _ in 0..depth {
            output.push_str(&self.indent);
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String, depth: usize) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output, depth);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (_child_id, child) in tree.children(parent_id) {
            if let NodeData::Text(text) = &child.data {
                output.push_str(&text.content);
            }
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Utility: markup of the children of a node
pub fn get_inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: markup of a node including itself
pub fn get_outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        let mut output = String::new();
        escape_text("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; \"friends\"");
    }

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; &quot;friends&quot;");
    }

    #[test]
    fn test_void_elements() {
        assert!(VOID_ELEMENTS.contains(&"br"));
        assert!(VOID_ELEMENTS.contains(&"img"));
        assert!(!VOID_ELEMENTS.contains(&"div"));
    }

    #[test]
    fn test_serialize_nested() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        let text = tree.create_text("X");
        tree.append_child(div, span).unwrap();
        tree.append_child(span, text).unwrap();

        assert_eq!(get_outer_html(&tree, div), "<div><span>X</span></div>");
        assert_eq!(get_inner_html(&tree, div), "<span>X</span>");
    }

    #[test]
    fn test_style_block_not_escaped() {
        let mut out = Vec::new();
        let written = HtmlSerializer::new()
            .write_style_block("a > b{color:red}", &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "<style>a > b{color:red}</style>");
        assert_eq!(written, "<style>a > b{color:red}</style>".len());
    }

    #[test]
    fn test_empty_attribute_value_quoted() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        let name = tree.qual_name("", "value");
        tree[input].as_element_mut().unwrap().set_attr(name, String::new());

        assert_eq!(get_outer_html(&tree, input), r#"<input value="" />"#);
    }

    #[test]
    fn test_raw_text_elements() {
        for tag in ["xmp", "iframe", "noembed", "noframes", "plaintext"] {
            let mut tree = DomTree::new();
            let elem = tree.create_element(tag);
            let text = tree.create_text("a<b");
            tree.append_child(elem, text).unwrap();
            assert_eq!(get_outer_html(&tree, elem), format!("<{tag}>a<b</{tag}>"));
        }
    }

    #[test]
    fn test_pretty_print() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let li = tree.create_element("li");
        tree.append_child(ul, li).unwrap();

        let text = tree.create_text("x");
        tree.append_child(li, text).unwrap();

        let html = HtmlSerializer::pretty().serialize_outer(&tree, ul);
        assert_eq!(html, "<ul>\n  <li>x</li>\n</ul>");
    }
}
