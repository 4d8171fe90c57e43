//! ARIA role definitions
//!
//! A static table of the concrete (non-abstract) roles the query engine
//! cares about, with the state attributes each role supports. This mirrors
//! the shape of the WAI-ARIA role definitions; it is data, not behavior.

/// Definition of a single ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Canonical role name
    pub name: &'static str,
    /// State/property attributes this role supports
    pub supported_attrs: &'static [&'static str],
    /// Whether the role takes its accessible name from its content
    pub name_from_content: bool,
}

const SELECTED: &str = "aria-selected";
const CHECKED: &str = "aria-checked";
const EXPANDED: &str = "aria-expanded";
const PRESSED: &str = "aria-pressed";
const LEVEL: &str = "aria-level";
const VALUENOW: &str = "aria-valuenow";

/// Role definition dataset
///
/// Kept alphabetical so additions stay reviewable.
pub const ROLES: &[RoleDefinition] = &[
    RoleDefinition { name: "alert", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "alertdialog", supported_attrs: &[EXPANDED], name_from_content: false },
    RoleDefinition { name: "article", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "banner", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "blockquote", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "button", supported_attrs: &[EXPANDED, PRESSED], name_from_content: true },
    RoleDefinition { name: "cell", supported_attrs: &[], name_from_content: true },
    RoleDefinition { name: "checkbox", supported_attrs: &[CHECKED], name_from_content: true },
    RoleDefinition { name: "columnheader", supported_attrs: &[SELECTED, EXPANDED], name_from_content: true },
    RoleDefinition { name: "combobox", supported_attrs: &[EXPANDED], name_from_content: false },
    RoleDefinition { name: "complementary", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "contentinfo", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "definition", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "dialog", supported_attrs: &[EXPANDED], name_from_content: false },
    RoleDefinition { name: "document", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "figure", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "form", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "generic", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "grid", supported_attrs: &[EXPANDED, LEVEL], name_from_content: false },
    RoleDefinition { name: "gridcell", supported_attrs: &[SELECTED, EXPANDED], name_from_content: true },
    RoleDefinition { name: "group", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "heading", supported_attrs: &[LEVEL], name_from_content: true },
    RoleDefinition { name: "img", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "link", supported_attrs: &[EXPANDED], name_from_content: true },
    RoleDefinition { name: "list", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "listbox", supported_attrs: &[EXPANDED], name_from_content: false },
    RoleDefinition { name: "listitem", supported_attrs: &[LEVEL], name_from_content: true },
    RoleDefinition { name: "main", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "math", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "menu", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "menuitem", supported_attrs: &[EXPANDED], name_from_content: true },
    RoleDefinition { name: "menuitemcheckbox", supported_attrs: &[CHECKED], name_from_content: true },
    RoleDefinition { name: "menuitemradio", supported_attrs: &[CHECKED], name_from_content: true },
    RoleDefinition { name: "meter", supported_attrs: &[VALUENOW], name_from_content: false },
    RoleDefinition { name: "navigation", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "none", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "option", supported_attrs: &[SELECTED, CHECKED], name_from_content: true },
    RoleDefinition { name: "paragraph", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "presentation", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "progressbar", supported_attrs: &[VALUENOW], name_from_content: false },
    RoleDefinition { name: "radio", supported_attrs: &[CHECKED], name_from_content: true },
    RoleDefinition { name: "region", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "row", supported_attrs: &[SELECTED, EXPANDED, LEVEL], name_from_content: true },
    RoleDefinition { name: "rowgroup", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "rowheader", supported_attrs: &[SELECTED, EXPANDED], name_from_content: true },
    RoleDefinition { name: "search", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "searchbox", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "separator", supported_attrs: &[VALUENOW], name_from_content: false },
    RoleDefinition { name: "slider", supported_attrs: &[VALUENOW], name_from_content: false },
    RoleDefinition { name: "spinbutton", supported_attrs: &[VALUENOW], name_from_content: false },
    RoleDefinition { name: "status", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "switch", supported_attrs: &[CHECKED], name_from_content: true },
    RoleDefinition { name: "tab", supported_attrs: &[SELECTED, EXPANDED], name_from_content: true },
    RoleDefinition { name: "table", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "tablist", supported_attrs: &[LEVEL], name_from_content: false },
    RoleDefinition { name: "tabpanel", supported_attrs: &[EXPANDED], name_from_content: false },
    RoleDefinition { name: "term", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "textbox", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "toolbar", supported_attrs: &[], name_from_content: false },
    RoleDefinition { name: "tooltip", supported_attrs: &[], name_from_content: true },
    RoleDefinition { name: "tree", supported_attrs: &[EXPANDED], name_from_content: false },
    RoleDefinition { name: "treegrid", supported_attrs: &[EXPANDED, LEVEL], name_from_content: false },
    RoleDefinition { name: "treeitem", supported_attrs: &[SELECTED, CHECKED, EXPANDED, LEVEL], name_from_content: true },
];

/// Look up a role definition by name
pub fn role_definition(name: &str) -> Option<&'static RoleDefinition> {
    ROLES.iter().find(|r| r.name == name)
}

/// Check whether a role supports a given state/property attribute
///
/// Unknown roles support nothing.
pub fn role_supports(role: &str, attr: &str) -> bool {
    role_definition(role).is_some_and(|r| r.supported_attrs.contains(&attr))
}
