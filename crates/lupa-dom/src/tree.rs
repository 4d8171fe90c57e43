//! DOM Tree (arena-based allocation)
//!
//! All nodes live in a single `Vec`; structural links are `NodeId` indices.
//! Every mutating operation bumps the tree generation and wakes mutation
//! watchers, so async callers can re-run queries without polling blindly.

use std::sync::Mutex;

use smol::channel::{Receiver, Sender};

use crate::{Node, NodeData, NodeId};

/// Generation counter - incremented on every mutation
///
/// If unchanged, all values derived from the tree remain valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Initial generation (never mutated)
    pub const INITIAL: Self = Generation(0);

    /// Get the raw value
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Get the next generation
    #[inline]
    pub const fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// Receiving half of a mutation subscription.
///
/// Holds a capacity-1 channel: bursts of mutations coalesce into a single
/// pending wake-up, which is all a retry loop needs.
#[derive(Debug)]
pub struct MutationWatcher {
    rx: Receiver<()>,
}

impl MutationWatcher {
    /// Wait until the next tree mutation after this call.
    ///
    /// Returns immediately if a mutation already happened since the last
    /// `changed` call (or since the watcher was created).
    pub async fn changed(&self) {
        // A closed channel means the tree is gone; there is nothing further
        // to observe, so treat it the same as a wake-up.
        let _ = self.rx.recv().await;
    }
}

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    generation: Generation,
    watchers: Mutex<Vec<Sender<()>>>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            generation: Generation::INITIAL,
            watchers: Mutex::new(Vec::new()),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node by ID, panicking on a stale ID
    ///
    /// IDs handed out by this tree stay valid for its lifetime (the arena
    /// never shrinks), so indexing is safe for IDs it produced.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (a fresh tree still has its document node)
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Current mutation generation
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Subscribe to mutation notifications
    pub fn watch(&self) -> MutationWatcher {
        let (tx, rx) = smol::channel::bounded(1);
        if let Ok(mut watchers) = self.watchers.lock() {
            watchers.push(tx);
        }
        MutationWatcher { rx }
    }

    fn touch(&mut self) {
        self.generation = self.generation.next();
        if let Ok(mut watchers) = self.watchers.lock() {
            // try_send: a full channel already carries a pending wake-up
            watchers.retain(|tx| !matches!(tx.try_send(()), Err(e) if e.is_closed()));
        }
    }

    // --- construction ---

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: NodeData::Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            },
        })
    }

    // --- mutation ---

    /// Append a child to a parent node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(parent.is_valid() && child.is_valid());
        let prev_last = self.nodes[parent.index()].last_child;

        {
            let child_node = &mut self.nodes[child.index()];
            child_node.parent = parent;
            child_node.prev_sibling = prev_last;
            child_node.next_sibling = NodeId::NONE;
        }

        if prev_last.is_valid() {
            self.nodes[prev_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        self.touch();
    }

    /// Detach a node from its parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let (prev, next) = {
            let node = &self.nodes[child.index()];
            if node.parent != parent {
                return;
            }
            (node.prev_sibling, node.next_sibling)
        };

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        self.touch();
    }

    /// Set an attribute on an element
    pub fn set_attr(&mut self, element: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.nodes[element.index()].as_element_mut() {
            elem.set_attr(name, value);
            self.touch();
        }
    }

    /// Remove an attribute from an element
    pub fn remove_attr(&mut self, element: NodeId, name: &str) {
        if let Some(elem) = self.nodes[element.index()].as_element_mut() {
            if elem.remove_attr(name) {
                self.touch();
            }
        }
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, node: NodeId, content: &str) {
        if let NodeData::Text(text) = &mut self.nodes[node.index()].data {
            *text = content.to_string();
            self.touch();
        }
    }

    // --- traversal ---

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent;
        parent.is_valid().then_some(parent)
    }

    /// Iterate direct children in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.node(id).first_child,
        }
    }

    /// Iterate strict ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).parent,
        }
    }

    /// Iterate all descendants of `root` in document (pre-)order,
    /// excluding `root` itself
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.node(root).first_child,
        }
    }

    /// Iterate descendant element nodes of `root` in document order
    pub fn descendant_elements(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(root).filter(|&id| self.node(id).is_element())
    }

    /// Deep text content of a subtree (text nodes concatenated in order)
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        if let Some(text) = node.as_text() {
            out.push_str(text);
        }
        let mut child = node.first_child;
        while child.is_valid() {
            self.collect_text(child, out);
            child = self.node(child).next_sibling;
        }
    }

    /// Concatenated content of the *direct* text-node children only
    pub fn node_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            if let Some(text) = self.node(child).as_text() {
                out.push_str(text);
            }
        }
        out
    }

    /// Find the first element (in document order) with the given id attribute
    pub fn element_by_id(&self, root: NodeId, target: &str) -> Option<NodeId> {
        self.descendant_elements(root).find(|&id| {
            self.node(id)
                .as_element()
                .is_some_and(|e| e.id.as_deref() == Some(target))
        })
    }

    /// First descendant element with the given tag name
    pub fn first_element_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.descendant_elements(root)
            .find(|&id| self.node(id).tag() == Some(tag))
    }
}

/// Iterator over direct children
pub struct Children<'t> {
    tree: &'t DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over strict ancestors, nearest first
pub struct Ancestors<'t> {
    tree: &'t DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}

/// Pre-order iterator over a subtree, excluding the subtree root
pub struct Descendants<'t> {
    tree: &'t DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;

        // Descend first, then sibling, then climb until a sibling exists
        let node = self.tree.node(current);
        if node.first_child.is_valid() {
            self.next = node.first_child;
        } else {
            let mut at = current;
            loop {
                if at == self.root {
                    self.next = NodeId::NONE;
                    break;
                }
                let n = self.tree.node(at);
                if n.next_sibling.is_valid() {
                    self.next = n.next_sibling;
                    break;
                }
                at = n.parent;
                if !at.is_valid() {
                    self.next = NodeId::NONE;
                    break;
                }
            }
        }
        Some(current)
    }
}
