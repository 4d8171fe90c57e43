//! Accessibility-tree visibility filtering
//!
//! Decides whether an element is excluded from the accessibility tree:
//! `hidden`, `aria-hidden="true"`, `display: none` anywhere on the ancestor
//! chain, or `visibility: hidden` on the element itself. Callers pass a
//! per-query cache so sibling candidates amortize the ancestor walks; the
//! cache must never outlive a single query call.

use std::collections::HashMap;

use lupa_dom::{DomTree, NodeId};

/// Per-query memo of `is_subtree_inaccessible` results
pub type VisibilityCache = HashMap<NodeId, bool>;

/// Non-recursive check: does this node alone exclude its subtree?
pub fn is_subtree_inaccessible(tree: &DomTree, element: NodeId) -> bool {
    let node = tree.node(element);
    if !node.is_element() {
        return false;
    }
    if node.has_attr("hidden") {
        return true;
    }
    if node.attr("aria-hidden") == Some("true") {
        return true;
    }
    inline_style(tree, element, "display").as_deref() == Some("none")
}

/// Full exclusion check with ancestor-chain walk
///
/// `visibility: hidden` is only honored on the element itself: descendants
/// can override it with `visibility: visible`, and modeling that inheritance
/// is out of scope here. This is deliberately narrower than the full ARIA
/// tree-exclusion algorithm.
pub fn is_inaccessible(tree: &DomTree, element: NodeId, cache: &mut VisibilityCache) -> bool {
    if inline_style(tree, element, "visibility").as_deref() == Some("hidden") {
        return true;
    }

    let mut current = Some(element);
    while let Some(id) = current {
        if cached_subtree_inaccessible(tree, id, cache) {
            return true;
        }
        current = tree.parent(id);
    }
    false
}

fn cached_subtree_inaccessible(tree: &DomTree, id: NodeId, cache: &mut VisibilityCache) -> bool {
    if let Some(&known) = cache.get(&id) {
        return known;
    }
    let result = is_subtree_inaccessible(tree, id);
    cache.insert(id, result);
    result
}

/// Read a property from the inline `style` attribute
///
/// The host DOM carries no CSS cascade, so inline declarations are the
/// computed style as far as queries are concerned.
pub(crate) fn inline_style(tree: &DomTree, element: NodeId, property: &str) -> Option<String> {
    let style = tree.node(element).attr("style")?;
    for declaration in style.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(property) {
            return Some(value.trim().to_ascii_lowercase());
        }
    }
    None
}
