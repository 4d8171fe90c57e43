//! Query suggestions
//!
//! Given an element a query matched, propose the strongest query that would
//! have found it, in the order users should prefer: role, label, placeholder,
//! text, display value, alt, title, test id. With suggestion enforcement on,
//! a query weaker than the suggestion fails instead of returning.

use std::fmt;

use lupa_aria::accessible_name;
use lupa_dom::{Document, NodeId, SelectorList};

use crate::config::Config;
use crate::label;
use crate::matcher::get_default_normalizer;
use crate::role_table::implicit_aria_roles;
use crate::simple::display_values;

/// Which query family a suggestion (or an executed query) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Role,
    LabelText,
    PlaceholderText,
    Text,
    DisplayValue,
    AltText,
    Title,
    TestId,
}

impl Method {
    fn suffix(self) -> &'static str {
        match self {
            Self::Role => "by_role",
            Self::LabelText => "by_label_text",
            Self::PlaceholderText => "by_placeholder_text",
            Self::Text => "by_text",
            Self::DisplayValue => "by_display_value",
            Self::AltText => "by_alt_text",
            Self::Title => "by_title",
            Self::TestId => "by_test_id",
        }
    }
}

/// Which variant the rendered suggestion should name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Get,
    GetAll,
    Query,
    QueryAll,
    Find,
    FindAll,
}

impl Variant {
    fn prefix(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::GetAll => "get_all",
            Self::Query => "query",
            Self::QueryAll => "query_all",
            Self::Find => "find",
            Self::FindAll => "find_all",
        }
    }
}

/// A proposed query for an element
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// Query family to use
    pub method: Method,
    /// Variant to render (`get`, `find_all`, ...)
    pub variant: Variant,
    /// Primary query argument
    pub content: String,
    /// Accessible-name hint (role suggestions only)
    pub name: Option<String>,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}({:?}",
            self.variant.prefix(),
            self.method.suffix(),
            self.content
        )?;
        if let Some(name) = &self.name {
            write!(f, ", name = {name:?}")?;
        }
        f.write_str(")")
    }
}

/// Propose the best query for an element, if any probe applies
pub fn suggest_query(
    doc: &Document,
    element: NodeId,
    variant: Variant,
    cfg: &Config,
) -> Option<Suggestion> {
    let tree = doc.tree();
    let elem = tree.node(element).as_element()?;

    // script/style and friends never get suggestions
    if SelectorList::parse(&cfg.default_ignore).matches(tree, element) {
        return None;
    }

    let make = |method: Method, content: String, name: Option<String>| Suggestion {
        method,
        variant,
        content,
        name,
    };

    let explicit_role = elem
        .attr("role")
        .and_then(|raw| raw.split_whitespace().next())
        .map(str::to_string);
    let role = explicit_role.or_else(|| {
        implicit_aria_roles(tree, element)
            .first()
            .map(|r| (*r).to_string())
    });
    if let Some(role) = role {
        if role != "generic" {
            let name = accessible_name(doc, element);
            return Some(make(
                Method::Role,
                role,
                (!name.is_empty()).then_some(name),
            ));
        }
    }

    let labels = label::label_texts(doc, element);
    if !labels.is_empty() {
        return Some(make(Method::LabelText, labels.join(" "), None));
    }

    if let Some(placeholder) = elem.attr("placeholder") {
        if !placeholder.is_empty() {
            return Some(make(Method::PlaceholderText, placeholder.to_string(), None));
        }
    }

    let normalizer = get_default_normalizer(true, true);
    let text = normalizer.apply(&tree.node_text(element));
    if !text.is_empty() {
        return Some(make(Method::Text, text, None));
    }

    if let Some(value) = display_values(tree, element).into_iter().next() {
        if !value.is_empty() {
            return Some(make(Method::DisplayValue, value, None));
        }
    }

    if let Some(alt) = elem.attr("alt") {
        if !alt.is_empty() {
            return Some(make(Method::AltText, alt.to_string(), None));
        }
    }

    if let Some(title) = elem.attr("title") {
        if !title.is_empty() {
            return Some(make(Method::Title, title.to_string(), None));
        }
    }

    if let Some(test_id) = elem.attr(&cfg.test_id_attribute) {
        if !test_id.is_empty() {
            return Some(make(Method::TestId, test_id.to_string(), None));
        }
    }

    None
}
