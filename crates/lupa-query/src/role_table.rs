//! Implicit role table
//!
//! Compiled once from the ARIA element-concept dataset: one entry per
//! concept, specificity = number of attribute constraints, sorted descending
//! so `<input type="checkbox">` outranks a textual `<input>`. Resolution
//! short-circuits on the first matching entry.

use std::sync::OnceLock;

use lupa_aria::concepts::{ConceptConstraint, element_concepts};
use lupa_aria::name::effective_input_type;
use lupa_dom::{DomTree, NodeId};

/// One compiled entry of the implicit role table
#[derive(Debug, Clone, Copy)]
pub struct RoleTableEntry {
    /// Tag name the entry applies to
    pub tag: &'static str,
    /// Attribute constraints, all of which must hold
    pub constraints: &'static [ConceptConstraint],
    /// Implicit roles carried by a matching element
    pub roles: &'static [&'static str],
    /// Constraint count; higher wins
    pub specificity: usize,
}

fn table() -> &'static [RoleTableEntry] {
    static TABLE: OnceLock<Vec<RoleTableEntry>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut entries: Vec<RoleTableEntry> = element_concepts()
            .iter()
            .map(|concept| RoleTableEntry {
                tag: concept.tag,
                constraints: concept.constraints,
                roles: concept.roles,
                specificity: concept.constraints.len(),
            })
            .collect();
        // Stable sort keeps dataset order among equally specific entries
        entries.sort_by(|a, b| b.specificity.cmp(&a.specificity));
        entries
    })
}

/// Implicit ARIA roles of an element (empty when none apply)
pub fn implicit_aria_roles(tree: &DomTree, element: NodeId) -> &'static [&'static str] {
    let Some(tag) = tree.node(element).tag() else {
        return &[];
    };
    table()
        .iter()
        .find(|entry| entry.tag == tag && entry_matches(tree, element, entry))
        .map(|entry| entry.roles)
        .unwrap_or(&[])
}

fn entry_matches(tree: &DomTree, element: NodeId, entry: &RoleTableEntry) -> bool {
    entry
        .constraints
        .iter()
        .all(|constraint| constraint_holds(tree, element, constraint))
}

fn constraint_holds(tree: &DomTree, element: NodeId, constraint: &ConceptConstraint) -> bool {
    let node = tree.node(element);
    match *constraint {
        ConceptConstraint::Present(name) => node.has_attr(name),
        ConceptConstraint::Absent(name) => !node.has_attr(name),
        // type=text matches on the *effective* type: an <input> without a
        // declared type is still textual
        ConceptConstraint::Equals("type", "text") => {
            effective_input_type(tree, element) == "text"
        }
        ConceptConstraint::Equals(name, value) => node.attr(name) == Some(value),
    }
}
