//! Element → role concept dataset
//!
//! Each concept maps an HTML element shape (tag plus attribute constraints)
//! to the implicit ARIA role(s) it carries, following the HTML-AAM mapping.
//! Constraints are tagged variants interpreted by the query engine's role
//! table; there is no selector-string parsing involved.

/// A single attribute constraint on an element concept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptConstraint {
    /// The attribute must be present (any value)
    Present(&'static str),
    /// The attribute must be absent
    Absent(&'static str),
    /// The attribute must equal the given value
    ///
    /// `Equals("type", "text")` is special-cased by the interpreter: it
    /// matches on the element's *effective* input type, so `<input>` without
    /// a `type` attribute still counts as textual.
    Equals(&'static str, &'static str),
}

/// An element shape mapped to its implicit role list
#[derive(Debug, Clone, Copy)]
pub struct ElementConcept {
    /// Tag name the concept applies to
    pub tag: &'static str,
    /// Attribute constraints, all of which must hold
    pub constraints: &'static [ConceptConstraint],
    /// Implicit roles, most specific first
    pub roles: &'static [&'static str],
}

use ConceptConstraint::{Absent, Equals, Present};

const CONCEPTS: &[ElementConcept] = &[
    ElementConcept { tag: "a", constraints: &[Present("href")], roles: &["link"] },
    ElementConcept { tag: "a", constraints: &[], roles: &["generic"] },
    ElementConcept { tag: "area", constraints: &[Present("href")], roles: &["link"] },
    ElementConcept { tag: "article", constraints: &[], roles: &["article"] },
    ElementConcept { tag: "aside", constraints: &[], roles: &["complementary"] },
    ElementConcept { tag: "blockquote", constraints: &[], roles: &["blockquote"] },
    ElementConcept { tag: "button", constraints: &[], roles: &["button"] },
    ElementConcept { tag: "datalist", constraints: &[], roles: &["listbox"] },
    ElementConcept { tag: "dd", constraints: &[], roles: &["definition"] },
    ElementConcept { tag: "details", constraints: &[], roles: &["group"] },
    ElementConcept { tag: "dfn", constraints: &[], roles: &["term"] },
    ElementConcept { tag: "dialog", constraints: &[], roles: &["dialog"] },
    ElementConcept { tag: "dt", constraints: &[], roles: &["term"] },
    ElementConcept { tag: "fieldset", constraints: &[], roles: &["group"] },
    ElementConcept { tag: "figure", constraints: &[], roles: &["figure"] },
    ElementConcept { tag: "footer", constraints: &[], roles: &["contentinfo"] },
    ElementConcept { tag: "form", constraints: &[], roles: &["form"] },
    ElementConcept { tag: "h1", constraints: &[], roles: &["heading"] },
    ElementConcept { tag: "h2", constraints: &[], roles: &["heading"] },
    ElementConcept { tag: "h3", constraints: &[], roles: &["heading"] },
    ElementConcept { tag: "h4", constraints: &[], roles: &["heading"] },
    ElementConcept { tag: "h5", constraints: &[], roles: &["heading"] },
    ElementConcept { tag: "h6", constraints: &[], roles: &["heading"] },
    ElementConcept { tag: "header", constraints: &[], roles: &["banner"] },
    ElementConcept { tag: "hr", constraints: &[], roles: &["separator"] },
    ElementConcept { tag: "html", constraints: &[], roles: &["document"] },
    ElementConcept { tag: "img", constraints: &[Equals("alt", "")], roles: &["presentation"] },
    ElementConcept { tag: "img", constraints: &[], roles: &["img"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "button")], roles: &["button"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "checkbox")], roles: &["checkbox"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "email"), Absent("list")], roles: &["textbox"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "image")], roles: &["button"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "number")], roles: &["spinbutton"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "radio")], roles: &["radio"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "range")], roles: &["slider"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "reset")], roles: &["button"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "search"), Absent("list")], roles: &["searchbox"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "submit")], roles: &["button"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "tel"), Absent("list")], roles: &["textbox"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "text"), Absent("list")], roles: &["textbox"] },
    ElementConcept { tag: "input", constraints: &[Equals("type", "url"), Absent("list")], roles: &["textbox"] },
    ElementConcept { tag: "input", constraints: &[Present("list")], roles: &["combobox"] },
    ElementConcept { tag: "li", constraints: &[], roles: &["listitem"] },
    ElementConcept { tag: "main", constraints: &[], roles: &["main"] },
    ElementConcept { tag: "math", constraints: &[], roles: &["math"] },
    ElementConcept { tag: "menu", constraints: &[], roles: &["list"] },
    ElementConcept { tag: "meter", constraints: &[], roles: &["meter"] },
    ElementConcept { tag: "nav", constraints: &[], roles: &["navigation"] },
    ElementConcept { tag: "ol", constraints: &[], roles: &["list"] },
    ElementConcept { tag: "optgroup", constraints: &[], roles: &["group"] },
    ElementConcept { tag: "option", constraints: &[], roles: &["option"] },
    ElementConcept { tag: "output", constraints: &[], roles: &["status"] },
    ElementConcept { tag: "p", constraints: &[], roles: &["paragraph"] },
    ElementConcept { tag: "progress", constraints: &[], roles: &["progressbar"] },
    ElementConcept { tag: "search", constraints: &[], roles: &["search"] },
    ElementConcept { tag: "section", constraints: &[], roles: &["region"] },
    ElementConcept { tag: "select", constraints: &[Present("multiple")], roles: &["listbox"] },
    ElementConcept { tag: "select", constraints: &[Present("size")], roles: &["listbox"] },
    ElementConcept { tag: "select", constraints: &[], roles: &["combobox"] },
    ElementConcept { tag: "table", constraints: &[], roles: &["table"] },
    ElementConcept { tag: "tbody", constraints: &[], roles: &["rowgroup"] },
    ElementConcept { tag: "td", constraints: &[], roles: &["cell"] },
    ElementConcept { tag: "textarea", constraints: &[], roles: &["textbox"] },
    ElementConcept { tag: "tfoot", constraints: &[], roles: &["rowgroup"] },
    ElementConcept { tag: "th", constraints: &[Equals("scope", "row")], roles: &["rowheader"] },
    ElementConcept { tag: "th", constraints: &[], roles: &["columnheader"] },
    ElementConcept { tag: "thead", constraints: &[], roles: &["rowgroup"] },
    ElementConcept { tag: "tr", constraints: &[], roles: &["row"] },
    ElementConcept { tag: "ul", constraints: &[], roles: &["list"] },
];

/// The full concept dataset
pub fn element_concepts() -> &'static [ElementConcept] {
    CONCEPTS
}
