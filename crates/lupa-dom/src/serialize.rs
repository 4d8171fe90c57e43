//! DOM serialization for diagnostics
//!
//! Indented HTML output used by query error messages. Comments and
//! script/style subtrees are omitted, and output is capped so a huge fixture
//! cannot drown the actual failure.

use crate::{DomTree, NodeData, NodeId};

/// Default cap applied by error formatting
pub const DEFAULT_MAX_LENGTH: usize = 7000;

/// Pretty-print a subtree as indented HTML, truncated to `max_length` bytes
pub fn pretty(tree: &DomTree, root: NodeId, max_length: usize) -> String {
    let mut out = String::new();
    write_node(tree, root, 0, &mut out);
    if out.len() > max_length {
        let mut cut = max_length;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
        out.push_str("...");
    }
    out
}

/// One-line opening-tag rendition of an element, for hint lists
pub fn open_tag(tree: &DomTree, element: NodeId) -> String {
    let Some(elem) = tree.node(element).as_element() else {
        return String::new();
    };
    let mut out = format!("<{}", elem.tag);
    for attr in &elem.attrs {
        if attr.value.is_empty() {
            out.push_str(&format!(" {}", attr.name));
        } else {
            out.push_str(&format!(" {}=\"{}\"", attr.name, attr.value));
        }
    }
    out.push_str(" />");
    out
}

fn write_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let node = tree.node(id);
    let indent = "  ".repeat(depth);

    match &node.data {
        NodeData::Document => {
            for child in tree.children(id) {
                write_node(tree, child, depth, out);
            }
        }
        NodeData::Doctype { name, .. } => {
            out.push_str(&format!("{indent}<!DOCTYPE {name}>\n"));
        }
        NodeData::Comment(_) => {}
        NodeData::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push_str(&format!("{indent}{trimmed}\n"));
            }
        }
        NodeData::Element(elem) => {
            if matches!(elem.tag.as_str(), "script" | "style") {
                return;
            }
            out.push_str(&format!("{indent}<{}", elem.tag));
            for attr in &elem.attrs {
                if attr.value.is_empty() {
                    out.push_str(&format!(" {}", attr.name));
                } else {
                    out.push_str(&format!(" {}=\"{}\"", attr.name, attr.value));
                }
            }
            if node.first_child.is_valid() {
                out.push_str(">\n");
                for child in tree.children(id) {
                    write_node(tree, child, depth + 1, out);
                }
                out.push_str(&format!("{indent}</{}>\n", elem.tag));
            } else {
                out.push_str(" />\n");
            }
        }
    }
}
