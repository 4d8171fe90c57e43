//! Parsing tests for lupa-html
//!
//! Covers the conversion from html5ever's RcDom into the arena tree and the
//! document conveniences queries rely on.

use lupa_html::{Document, HtmlParser};

#[test]
fn test_parse_minimal_html() {
    let doc = HtmlParser::new().parse("");
    assert!(doc.tree().len() >= 1, "even empty HTML should have a root");
}

#[test]
fn test_parse_builds_body() {
    let doc = HtmlParser::new().parse("<p>hi</p>");
    let body = doc.body();
    assert_eq!(doc.tree().node(body).tag(), Some("body"));
    assert_eq!(doc.tree().text_content(body).trim(), "hi");
}

#[test]
fn test_fragment_lands_under_body() {
    // html5ever wraps bare fragments in html/head/body
    let doc = lupa_html::parse(r#"<input type="checkbox" id="cb" />"#);
    let input = doc.get_element_by_id("cb").unwrap();
    let tree = doc.tree();
    let parent = tree.parent(input).unwrap();
    assert_eq!(tree.node(parent).tag(), Some("body"));
}

#[test]
fn test_attributes_survive_conversion() {
    let doc = lupa_html::parse(
        r#"<button type="submit" class="primary large" data-testid="go">Go</button>"#,
    );
    let tree = doc.tree();
    let button = tree
        .descendant_elements(tree.root())
        .find(|&id| tree.node(id).tag() == Some("button"))
        .unwrap();
    let node = tree.node(button);
    assert_eq!(node.attr("type"), Some("submit"));
    assert_eq!(node.attr("data-testid"), Some("go"));
    let el = node.as_element().unwrap();
    assert_eq!(el.classes, ["primary", "large"]);
}

#[test]
fn test_malformed_html_recovers() {
    let doc = lupa_html::parse(
        r#"<div><p>unclosed paragraph<span>unclosed span</div>"#,
    );
    let tree = doc.tree();
    assert!(tree.descendant_elements(tree.root()).any(|id| tree.node(id).tag() == Some("span")));
}

#[test]
fn test_inter_tag_whitespace_is_dropped() {
    let doc = lupa_html::parse(
        "<ul>\n    <li>one</li>\n    <li>two</li>\n</ul>",
    );
    let tree = doc.tree();
    let ul = tree
        .descendant_elements(tree.root())
        .find(|&id| tree.node(id).tag() == Some("ul"))
        .unwrap();
    // only the two li children remain, no whitespace text nodes
    assert_eq!(tree.children(ul).count(), 2);
}

#[test]
fn test_base_url_is_recorded() {
    let doc: Document = HtmlParser::new().parse_with_url("<p>x</p>", "https://example.test/app");
    assert_eq!(doc.url(), "https://example.test/app");
}

#[test]
fn test_uppercase_tags_are_normalized() {
    let doc = lupa_html::parse("<DIV><SPAN>x</SPAN></DIV>");
    let tree = doc.tree();
    assert!(tree.descendant_elements(tree.root()).any(|id| tree.node(id).tag() == Some("span")));
}
