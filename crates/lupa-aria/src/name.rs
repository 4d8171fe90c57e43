//! Accessible-name computation
//!
//! A pragmatic subset of the AccName algorithm: aria-labelledby, aria-label,
//! native `<label>` association, media alternatives, then content. The query
//! engine treats this as an opaque collaborator; it never inspects how a
//! name was derived.

use lupa_dom::{Document, DomTree, NodeId};

/// Compute the accessible name of an element
pub fn accessible_name(doc: &Document, element: NodeId) -> String {
    let tree = doc.tree();
    let node = tree.node(element);
    let Some(elem) = node.as_element() else {
        return String::new();
    };

    // aria-labelledby wins over everything else
    if let Some(refs) = elem.attr("aria-labelledby") {
        let joined = refs
            .split_whitespace()
            .filter_map(|id| doc.get_element_by_id(id))
            .map(|target| flatten(&tree.text_content(target)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !joined.is_empty() {
            return joined;
        }
    }

    if let Some(label) = elem.attr("aria-label") {
        let label = flatten(label);
        if !label.is_empty() {
            return label;
        }
    }

    // Host-language labeling
    if is_labelable(tree, element) {
        let labels = labels_for(doc, element);
        let joined = labels
            .iter()
            .map(|&l| flatten(&tree.text_content(l)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !joined.is_empty() {
            return joined;
        }
    }

    match elem.tag.as_str() {
        "img" | "area" => {
            if let Some(alt) = elem.attr("alt") {
                return flatten(alt);
            }
        }
        "input" => {
            let ty = effective_input_type(tree, element);
            if ty == "image" {
                if let Some(alt) = elem.attr("alt") {
                    let alt = flatten(alt);
                    if !alt.is_empty() {
                        return alt;
                    }
                }
            }
            if matches!(ty.as_str(), "button" | "submit" | "reset") {
                if let Some(value) = elem.attr("value") {
                    let value = flatten(value);
                    if !value.is_empty() {
                        return value;
                    }
                }
            }
        }
        _ => {}
    }

    // Form fields never name themselves from their content
    if !matches!(elem.tag.as_str(), "input" | "textarea" | "select") {
        let content = flatten(&tree.text_content(element));
        if !content.is_empty() {
            return content;
        }
    }

    if let Some(placeholder) = elem.attr("placeholder") {
        let placeholder = flatten(placeholder);
        if !placeholder.is_empty() {
            return placeholder;
        }
    }

    elem.attr("title").map(flatten).unwrap_or_default()
}

/// Trim and collapse internal whitespace
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The effective `type` of an `<input>` (declared, defaulting to text)
pub fn effective_input_type(tree: &DomTree, element: NodeId) -> String {
    match tree.node(element).attr("type") {
        Some(ty) if !ty.trim().is_empty() => ty.to_ascii_lowercase(),
        _ => "text".to_string(),
    }
}

/// Whether an element can be the target of a `<label>`
pub fn is_labelable(tree: &DomTree, element: NodeId) -> bool {
    match tree.node(element).tag() {
        Some("button" | "meter" | "output" | "progress" | "select" | "textarea") => true,
        Some("input") => effective_input_type(tree, element) != "hidden",
        _ => false,
    }
}

/// All `<label>` elements associated with `element`
fn labels_for(doc: &Document, element: NodeId) -> Vec<NodeId> {
    let tree = doc.tree();
    tree.descendant_elements(tree.root())
        .filter(|&id| tree.node(id).tag() == Some("label"))
        .filter(|&label| label_control(doc, label) == Some(element))
        .collect()
}

/// Resolve the control a `<label>` points at: `for` attribute first, then
/// the first labelable descendant
fn label_control(doc: &Document, label: NodeId) -> Option<NodeId> {
    let tree = doc.tree();
    if let Some(target) = tree.node(label).attr("for") {
        return doc.get_element_by_id(target);
    }
    tree.descendant_elements(label)
        .find(|&id| is_labelable(tree, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(builder: impl FnOnce(&mut Document)) -> Document {
        let mut doc = Document::new("about:blank");
        builder(&mut doc);
        doc
    }

    #[test]
    fn test_aria_label_beats_content() {
        let doc = doc_with(|doc| {
            let body = doc.body();
            let tree = doc.tree_mut();
            let button = tree.create_element("button");
            tree.set_attr(button, "aria-label", "Close");
            let text = tree.create_text("X");
            tree.append_child(button, text);
            tree.append_child(body, button);
        });
        let tree = doc.tree();
        let button = tree.first_element_by_tag(doc.body(), "button").unwrap();
        assert_eq!(accessible_name(&doc, button), "Close");
    }

    #[test]
    fn test_labelledby_beats_aria_label() {
        let doc = doc_with(|doc| {
            let body = doc.body();
            let tree = doc.tree_mut();
            let span = tree.create_element("span");
            tree.set_attr(span, "id", "caption");
            let text = tree.create_text("Shipping address");
            tree.append_child(span, text);
            tree.append_child(body, span);

            let input = tree.create_element("input");
            tree.set_attr(input, "aria-labelledby", "caption");
            tree.set_attr(input, "aria-label", "ignored");
            tree.append_child(body, input);
        });
        let tree = doc.tree();
        let input = tree.first_element_by_tag(doc.body(), "input").unwrap();
        assert_eq!(accessible_name(&doc, input), "Shipping address");
    }

    #[test]
    fn test_label_for_association() {
        let doc = doc_with(|doc| {
            let body = doc.body();
            let tree = doc.tree_mut();
            let label = tree.create_element("label");
            tree.set_attr(label, "for", "name");
            let text = tree.create_text("Full   name");
            tree.append_child(label, text);
            tree.append_child(body, label);

            let input = tree.create_element("input");
            tree.set_attr(input, "id", "name");
            tree.append_child(body, input);
        });
        let tree = doc.tree();
        let input = tree.first_element_by_tag(doc.body(), "input").unwrap();
        assert_eq!(accessible_name(&doc, input), "Full name");
    }

    #[test]
    fn test_button_names_from_content() {
        let doc = doc_with(|doc| {
            let body = doc.body();
            let tree = doc.tree_mut();
            let button = tree.create_element("button");
            let text = tree.create_text("  Submit  order ");
            tree.append_child(button, text);
            tree.append_child(body, button);
        });
        let tree = doc.tree();
        let button = tree.first_element_by_tag(doc.body(), "button").unwrap();
        assert_eq!(accessible_name(&doc, button), "Submit order");
    }

    #[test]
    fn test_effective_input_type_defaults_to_text() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let input = doc.tree_mut().create_element("input");
        doc.tree_mut().append_child(body, input);
        assert_eq!(effective_input_type(doc.tree(), input), "text");
        assert!(is_labelable(doc.tree(), input));

        doc.tree_mut().set_attr(input, "type", "HIDDEN");
        assert_eq!(effective_input_type(doc.tree(), input), "hidden");
        assert!(!is_labelable(doc.tree(), input));
    }
}
