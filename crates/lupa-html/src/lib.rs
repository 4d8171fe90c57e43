//! lupa HTML - HTML5 parsing
//!
//! Parses markup into [`lupa_dom::Document`] trees. Test suites feed fixture
//! HTML through here and then run accessibility queries against the result.

mod parser;

pub use lupa_dom::Document;
pub use parser::HtmlParser;

/// Parse an HTML fragment into a document
///
/// Convenience wrapper used pervasively by tests: the fragment ends up inside
/// the document body, which is the default query container.
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
