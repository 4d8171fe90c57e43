//! Simple selector matching
//!
//! Tag / class / id / universal selectors plus comma-separated lists.
//! This intentionally stays far away from a full CSS selector engine; the
//! query layer only needs cheap element filters ("script, style", "input").

use crate::{DomTree, NodeId};

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            Some(Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            Some(Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_lowercase()))
        }
    }

    /// Check whether an element matches this selector
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        let Some(elem) = tree.node(element).as_element() else {
            return false;
        };
        match self {
            Self::Universal => true,
            Self::Tag(tag) => elem.tag.eq_ignore_ascii_case(tag),
            Self::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => elem.classes.iter().any(|c| c == class),
        }
    }
}

/// Comma-separated selector list ("script, style")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(Vec<SimpleSelector>);

impl SelectorList {
    /// Parse a comma-separated list, skipping unparsable parts
    pub fn parse(s: &str) -> Self {
        Self(s.split(',').filter_map(SimpleSelector::parse).collect())
    }

    /// Match everything
    pub fn universal() -> Self {
        Self(vec![SimpleSelector::Universal])
    }

    /// Check whether an element matches any selector in the list
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        self.0.iter().any(|s| s.matches(tree, element))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SelectorList {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        assert!(matches!(SimpleSelector::parse("div"), Some(SimpleSelector::Tag(_))));
        assert!(matches!(SimpleSelector::parse(".class"), Some(SimpleSelector::Class(_))));
        assert!(matches!(SimpleSelector::parse("#id"), Some(SimpleSelector::Id(_))));
        assert!(matches!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal)));
        assert!(SimpleSelector::parse("  ").is_none());
    }

    #[test]
    fn test_selector_list_matches() {
        let mut tree = DomTree::new();
        let script = tree.create_element("script");
        let style = tree.create_element("style");
        let div = tree.create_element("div");
        tree.append_child(tree.root(), script);
        tree.append_child(tree.root(), style);
        tree.append_child(tree.root(), div);

        let ignore = SelectorList::parse("script, style");
        assert!(ignore.matches(&tree, script));
        assert!(ignore.matches(&tree, style));
        assert!(!ignore.matches(&tree, div));
        assert!(SelectorList::universal().matches(&tree, div));
    }
}
