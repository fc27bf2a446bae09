//! Edge case tests for fragment parsing and serialization
//!
//! Parses markup fragments into an arena tree and writes them back out.

use ssr_html::{DomTree, FragmentContext, FragmentParser, HtmlSerializer, parse_fragment};

fn roundtrip(markup: &str) -> String {
    let mut tree = DomTree::new();
    let nodes = parse_fragment(markup, &mut tree).unwrap();
    let serializer = HtmlSerializer::new();
    nodes
        .iter()
        .map(|&id| serializer.serialize_outer(&tree, id))
        .collect()
}

// ============================================================================
// WELL-FORMED INPUT
// ============================================================================

#[test]
fn test_nested_elements_roundtrip() {
    assert_eq!(roundtrip("<div><p>a</p></div>"), "<div><p>a</p></div>");
}

#[test]
fn test_void_element() {
    assert_eq!(roundtrip("line<br>next"), "line<br />next");
}

#[test]
fn test_entities_reescaped() {
    assert_eq!(roundtrip("<p>fish &amp; chips</p>"), "<p>fish &amp; chips</p>");
}

#[test]
fn test_attribute_quote_escaped() {
    assert_eq!(
        roundtrip(r#"<a title='say "hi"'>x</a>"#),
        r#"<a title="say &quot;hi&quot;">x</a>"#
    );
}

#[test]
fn test_script_content_raw() {
    assert_eq!(
        roundtrip("<script>if (a < b) {}</script>"),
        "<script>if (a < b) {}</script>"
    );
}

#[test]
fn test_xmp_content_raw() {
    assert_eq!(roundtrip("<xmp>a<b</xmp>"), "<xmp>a<b</xmp>");
}

#[test]
fn test_svg_xlink_attribute_roundtrip() {
    assert_eq!(
        roundtrip(r##"<svg><use xlink:href="#i"></use></svg>"##),
        r##"<svg><use xlink:href="#i"></use></svg>"##
    );
}

#[test]
fn test_empty_attribute_written_with_value() {
    assert_eq!(roundtrip("<p hidden>x</p>"), r#"<p hidden="">x</p>"#);
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_unclosed_tags_closed() {
    assert_eq!(
        roundtrip("<div><p><span>text"),
        "<div><p><span>text</span></p></div>"
    );
}

#[test]
fn test_implied_paragraph_end() {
    assert_eq!(roundtrip("<p>a<p>b"), "<p>a</p><p>b</p>");
}

#[test]
fn test_orphan_closing_tag_dropped() {
    assert_eq!(roundtrip("</div>text"), "text");
}

// ============================================================================
// CONTEXT ELEMENTS
// ============================================================================

#[test]
fn test_fragment_appended_into_existing_tree() {
    let mut tree = DomTree::new();
    let host = tree.create_element("section");
    let existing = tree.create_text("first");
    tree.append_child(host, existing).unwrap();

    for id in parse_fragment("<em>second</em>", &mut tree).unwrap() {
        tree.append_child(host, id).unwrap();
    }

    assert_eq!(
        HtmlSerializer::new().serialize_outer(&tree, host),
        "<section>first<em>second</em></section>"
    );
}

#[test]
fn test_custom_context() {
    let parser = FragmentParser::with_context(FragmentContext::html("ul"));
    let mut tree = DomTree::new();
    let nodes = parser.parse_into("<li>one</li><li>two</li>", &mut tree).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(parser.context().context_element, "ul");
}
