//! Document - High-level document API

use crate::{DomTree, MutationWatcher, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the basic html/head/body structure
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Re-resolve the cached html/body references after bulk construction
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .first_element_by_tag(self.tree.root(), "html")
            .unwrap_or(NodeId::NONE);
        let scope = if self.html_element.is_valid() {
            self.html_element
        } else {
            self.tree.root()
        };
        self.body_element = self
            .tree
            .first_element_by_tag(scope, "body")
            .unwrap_or(NodeId::NONE);
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element, falling back to the document root
    ///
    /// Queries default their container to this node.
    pub fn body(&self) -> NodeId {
        if self.body_element.is_valid() {
            self.body_element
        } else {
            self.tree.root()
        }
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.element_by_id(self.tree.root(), id)
    }

    /// Subscribe to DOM mutation notifications
    pub fn watch(&self) -> MutationWatcher {
        self.tree.watch()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the DOM tree
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("about:blank");
        assert!(doc.document_element().is_valid());
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().node(doc.body()).tag(), Some("body"));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let input = doc.tree_mut().create_element("input");
        doc.tree_mut().set_attr(input, "id", "username");
        doc.tree_mut().append_child(body, input);

        assert_eq!(doc.get_element_by_id("username"), Some(input));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
