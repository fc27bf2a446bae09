//! HTML parsing and serialization
//!
//! Fragment parsing is built on html5ever and converts into the arena
//! `DomTree`; serialization writes a `DomTree` back out as markup.

mod parser;
mod serializer;

pub use parser::{FragmentContext, FragmentParser, HTML_NAMESPACE};
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};
pub use ssr_dom::{DomTree, Node, NodeId};

/// Parse a markup fragment in a `<body>` context, allocating the result in
/// `tree`. Returns the top-level nodes, detached and in document order.
pub fn parse_fragment(markup: &str, tree: &mut DomTree) -> Result<Vec<NodeId>, ParseError> {
    FragmentParser::new().parse_into(markup, tree)
}

/// Fragment parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read markup fragment: {0}")]
    Io(#[from] std::io::Error),

    #[error("fragment parse produced no root element")]
    MissingRoot,

    #[error(transparent)]
    Dom(#[from] ssr_dom::DomError),
}
