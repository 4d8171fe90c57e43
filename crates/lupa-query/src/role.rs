//! Role queries
//!
//! Matches elements by their ARIA role: the explicit `role` attribute when
//! present (first token unless fallbacks are requested), otherwise the
//! implicit role derived from the element-concept table. Hidden elements are
//! excluded unless asked for, and matches can be narrowed by accessible name
//! or `aria-selected` state.

use std::collections::BTreeMap;

use lupa_aria::accessible_name;
use lupa_aria::roles::role_supports;
use lupa_dom::{Document, NodeId, serialize};

use crate::config::{Config, current};
use crate::error::{QueryError, not_found};
use crate::matcher::{
    Matcher, Normalizer, NormalizerOptions, build_normalizer, matches, matches_with,
};
use crate::role_table::implicit_aria_roles;
use crate::suggest::Method;
use crate::variants::{resolve_get, resolve_get_all, resolve_query};
use crate::visibility::{VisibilityCache, is_inaccessible};
use crate::wait::{SharedDocument, WaitOptions, wait_for};

/// Options for the role query family
#[derive(Debug, Clone)]
pub struct RoleOptions {
    /// Exact (default) or fuzzy role matching
    pub exact: bool,
    /// Include elements excluded from the accessibility tree; `None` defers
    /// to `Config::default_hidden`
    pub hidden: Option<bool>,
    /// Match against every fallback role instead of the first one only
    pub query_fallbacks: bool,
    /// Narrow matches by `aria-selected` state
    pub selected: Option<bool>,
    /// Narrow matches by accessible name
    pub name: Option<Matcher>,
    /// Role text normalization; a custom normalizer switches explicit-role
    /// matching to the whole raw attribute value
    pub normalizer: NormalizerOptions,
    /// Per-call override of `Config::throw_suggestions`
    pub suggest: Option<bool>,
}

impl Default for RoleOptions {
    fn default() -> Self {
        Self {
            exact: true,
            hidden: None,
            query_fallbacks: false,
            selected: None,
            name: None,
            normalizer: NormalizerOptions::default(),
            suggest: None,
        }
    }
}

/// All elements carrying the role, in document order
pub fn query_all_by_role(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &RoleOptions,
    cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let tree = doc.tree();
    tracing::trace!("query_all_by_role: {}", matcher);

    if let Some(selected) = opts.selected {
        // state filters only make sense for a literal role name
        let Some(role) = matcher.as_text() else {
            return Err(QueryError::Configuration(
                "\"selected\" is only supported with a plain string role".to_string(),
            ));
        };
        if !role_supports(role, "aria-selected") {
            return Err(QueryError::Configuration(format!(
                "\"aria-selected\" is not supported on role \"{role}\". \
                 (selected = {selected})"
            )));
        }
    }

    // without a custom normalizer, role tokens are compared verbatim
    let whole_value = opts.normalizer.custom.is_some();
    let role_normalizer = if whole_value {
        build_normalizer(&opts.normalizer)?
    } else {
        Normalizer::identity()
    };
    let include_hidden = opts.hidden.unwrap_or(cfg.default_hidden);
    let mut cache = VisibilityCache::new();

    let mut out = Vec::new();
    for el in tree.descendant_elements(container) {
        let roles = roles_of(doc, el, opts.query_fallbacks, whole_value);
        let role_matched = roles.iter().any(|role| {
            matches_with(
                opts.exact,
                Some(role),
                Some(tree.node(el)),
                &matcher,
                &role_normalizer,
            )
        });
        if !role_matched {
            continue;
        }

        if let Some(selected) = opts.selected {
            // <option> carries native selected state; everything else is
            // explicit aria-selected
            let state = if tree.node(el).tag() == Some("option") {
                tree.node(el).has_attr("selected")
            } else {
                tree.node(el).attr("aria-selected") == Some("true")
            };
            if state != selected {
                continue;
            }
        }

        if !include_hidden && is_inaccessible(tree, el, &mut cache) {
            continue;
        }

        if let Some(name) = &opts.name {
            // accessible names are matched verbatim, never re-normalized
            let accessible = accessible_name(doc, el);
            let normalizer = Normalizer::identity();
            if !matches(Some(&accessible), Some(tree.node(el)), name, &normalizer) {
                continue;
            }
        }

        out.push(el);
    }
    Ok(out)
}

/// The role tokens an element answers to
fn roles_of(doc: &Document, element: NodeId, fallbacks: bool, whole_value: bool) -> Vec<String> {
    let tree = doc.tree();
    if let Some(explicit) = tree.node(element).attr("role") {
        if whole_value {
            return vec![explicit.to_string()];
        }
        let mut tokens = explicit.split_whitespace().map(str::to_string);
        return if fallbacks {
            tokens.collect()
        } else {
            tokens.next().into_iter().collect()
        };
    }
    // implicit roles are all candidates; fallbacks only gates explicit tokens
    implicit_aria_roles(tree, element)
        .iter()
        .map(|r| (*r).to_string())
        .collect()
}

/// Singular query variant: `None` on zero matches
pub fn query_by_role(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &RoleOptions,
    cfg: &Config,
) -> Result<Option<NodeId>, QueryError> {
    let matcher = matcher.into();
    let found = query_all_by_role(doc, container, matcher.clone(), opts, cfg)?;
    resolve_query(
        doc,
        container,
        found,
        &multi_message(&matcher, opts),
        Method::Role,
        opts.suggest.unwrap_or(cfg.throw_suggestions),
        cfg,
    )
}

/// At least one match or a NotFound error with a role listing
pub fn get_all_by_role(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &RoleOptions,
    cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let found = query_all_by_role(doc, container, matcher.clone(), opts, cfg)?;
    resolve_get_all(
        doc,
        found,
        || role_miss(doc, container, &matcher, opts, cfg),
        Method::Role,
        opts.suggest.unwrap_or(cfg.throw_suggestions),
        cfg,
    )
}

/// Exactly one match or an error
pub fn get_by_role(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &RoleOptions,
    cfg: &Config,
) -> Result<NodeId, QueryError> {
    let matcher = matcher.into();
    let found = query_all_by_role(doc, container, matcher.clone(), opts, cfg)?;
    resolve_get(
        doc,
        container,
        found,
        &multi_message(&matcher, opts),
        || role_miss(doc, container, &matcher, opts, cfg),
        Method::Role,
        opts.suggest.unwrap_or(cfg.throw_suggestions),
        cfg,
    )
}

/// Await a single match, re-querying on DOM mutations
pub async fn find_by_role(
    doc: &SharedDocument,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &RoleOptions,
    wait: &WaitOptions,
) -> Result<NodeId, QueryError> {
    let matcher = matcher.into();
    let cfg = current();
    wait_for(
        doc,
        |d| get_by_role(d, container, matcher.clone(), opts, &cfg),
        wait,
        &cfg,
    )
    .await
}

/// Await at least one match
pub async fn find_all_by_role(
    doc: &SharedDocument,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &RoleOptions,
    wait: &WaitOptions,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let cfg = current();
    wait_for(
        doc,
        |d| get_all_by_role(d, container, matcher.clone(), opts, &cfg),
        wait,
        &cfg,
    )
    .await
}

fn multi_message(matcher: &Matcher, opts: &RoleOptions) -> String {
    match &opts.name {
        Some(name) => format!(
            "Found multiple elements with the role \"{matcher}\" and name \"{name}\""
        ),
        None => format!("Found multiple elements with the role \"{matcher}\""),
    }
}

/// Zero-result diagnostic: names the miss and, with diagnostics on, lists
/// every accessible role present under the container
fn role_miss(
    doc: &Document,
    container: NodeId,
    matcher: &Matcher,
    opts: &RoleOptions,
    cfg: &Config,
) -> QueryError {
    let mut message = match &opts.name {
        Some(name) => format!(
            "Unable to find an accessible element with the role \"{matcher}\" \
             and name \"{name}\""
        ),
        None => format!(
            "Unable to find an accessible element with the role \"{matcher}\""
        ),
    };

    if cfg.compute_diagnostics {
        message.push_str("\n\n");
        message.push_str(&role_listing(doc, container, opts, cfg));
    }

    not_found(&message, doc, container, cfg)
}

fn role_listing(doc: &Document, container: NodeId, opts: &RoleOptions, cfg: &Config) -> String {
    let tree = doc.tree();
    let include_hidden = opts.hidden.unwrap_or(cfg.default_hidden);
    let mut cache = VisibilityCache::new();

    let mut by_role: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
    let mut any_hidden = false;
    for el in tree.descendant_elements(container) {
        let roles = roles_of(doc, el, true, false);
        if roles.is_empty() {
            continue;
        }
        if !include_hidden && is_inaccessible(tree, el, &mut cache) {
            any_hidden = true;
            continue;
        }
        for role in roles {
            by_role.entry(role).or_default().push(el);
        }
    }

    if by_role.is_empty() {
        if any_hidden {
            return "There are no accessible roles. But there might be some inaccessible \
                    roles. If you wish to access them, then set the `hidden` option to \
                    `true`."
                .to_string();
        }
        return "There are no available roles.".to_string();
    }

    let mut out = String::from("Here are the available roles:\n");
    for (role, elements) in by_role {
        out.push_str(&format!("\n  {role}:\n"));
        for el in elements {
            let name = accessible_name(doc, el);
            out.push_str(&format!("\n  Name \"{name}\":\n"));
            out.push_str(&format!("  {}\n", serialize::open_tag(tree, el)));
        }
        out.push_str("\n  --------------------------------------------------\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from(html: &str) -> Document {
        lupa_html::parse(html)
    }

    #[test]
    fn test_implicit_checkbox_role() {
        let doc = doc_from(r#"<input type="checkbox" />"#);
        let found =
            query_all_by_role(&doc, doc.body(), "checkbox", &RoleOptions::default(),
                &Config::default())
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_explicit_role_first_token_only() {
        let doc = doc_from(r#"<div role="switch checkbox">toggle</div>"#);
        let cfg = Config::default();
        let opts = RoleOptions::default();
        assert_eq!(
            query_all_by_role(&doc, doc.body(), "switch", &opts, &cfg).unwrap().len(),
            1
        );
        assert!(query_all_by_role(&doc, doc.body(), "checkbox", &opts, &cfg)
            .unwrap()
            .is_empty());

        let fallback = RoleOptions { query_fallbacks: true, ..Default::default() };
        assert_eq!(
            query_all_by_role(&doc, doc.body(), "checkbox", &fallback, &cfg)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_implicit_roles_are_tested_in_full() {
        let doc = doc_from(r#"<input />"#);
        let tree = doc.tree();
        let input = tree
            .descendant_elements(tree.root())
            .find(|&id| tree.node(id).tag() == Some("input"))
            .unwrap();
        // the default path considers every implicit role, not just the first
        let expected: Vec<String> = implicit_aria_roles(tree, input)
            .iter()
            .map(|r| (*r).to_string())
            .collect();
        assert_eq!(roles_of(&doc, input, false, false), expected);
        assert_eq!(roles_of(&doc, input, true, false), expected);
    }

    #[test]
    fn test_hidden_elements_are_excluded_by_default() {
        let doc = doc_from(
            r#"<div aria-hidden="true"><ul role="list"><li>one</li></ul></div>"#,
        );
        let cfg = Config::default();
        assert!(query_all_by_role(&doc, doc.body(), "list", &RoleOptions::default(), &cfg)
            .unwrap()
            .is_empty());

        let opts = RoleOptions { hidden: Some(true), ..Default::default() };
        assert_eq!(
            query_all_by_role(&doc, doc.body(), "list", &opts, &cfg).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_selected_requires_role_support() {
        let doc = doc_from(r#"<button>go</button>"#);
        let opts = RoleOptions { selected: Some(true), ..Default::default() };
        let err = query_all_by_role(&doc, doc.body(), "button", &opts, &Config::default())
            .unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }

    #[test]
    fn test_selected_filters_tabs() {
        let doc = doc_from(
            r#"<div role="tablist">
                 <button role="tab" aria-selected="true">One</button>
                 <button role="tab" aria-selected="false">Two</button>
               </div>"#,
        );
        let cfg = Config::default();
        let selected = RoleOptions { selected: Some(true), ..Default::default() };
        let found = query_all_by_role(&doc, doc.body(), "tab", &selected, &cfg).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().text_content(found[0]), "One");
    }

    #[test]
    fn test_option_reports_native_selected_state() {
        let doc = doc_from(
            r#"<select multiple>
                 <option>plain</option>
                 <option selected>picked</option>
               </select>"#,
        );
        let cfg = Config::default();
        let opts = RoleOptions { selected: Some(true), ..Default::default() };
        let found = query_all_by_role(&doc, doc.body(), "option", &opts, &cfg).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().text_content(found[0]), "picked");
    }

    #[test]
    fn test_custom_normalizer_matches_whole_role_value() {
        let doc = doc_from(r#"<div role="switch checkbox">toggle</div>"#);
        let cfg = Config::default();
        let opts = RoleOptions {
            normalizer: NormalizerOptions {
                custom: Some(Normalizer::identity()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            query_all_by_role(&doc, doc.body(), "switch checkbox", &opts, &cfg)
                .unwrap()
                .len(),
            1
        );
        assert!(query_all_by_role(&doc, doc.body(), "switch", &opts, &cfg)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_name_option_narrows_matches() {
        let doc = doc_from(r#"<button>Save</button><button>Cancel</button>"#);
        let cfg = Config::default();
        let opts = RoleOptions {
            name: Some("Cancel".into()),
            ..Default::default()
        };
        let found = query_all_by_role(&doc, doc.body(), "button", &opts, &cfg).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().text_content(found[0]), "Cancel");
    }

    #[test]
    fn test_name_matcher_sees_the_accessible_name_verbatim() {
        let doc = doc_from(r#"<button>  Save   draft  </button>"#);
        let cfg = Config::default();
        let opts = RoleOptions {
            // a function matcher observes exactly what the name filter passes
            name: Some(Matcher::func(|text, _| text == "Save draft")),
            ..Default::default()
        };
        let found = query_all_by_role(&doc, doc.body(), "button", &opts, &cfg).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_miss_lists_available_roles() {
        let doc = doc_from(r#"<button>Save</button>"#);
        let err = get_by_role(&doc, doc.body(), "dialog", &RoleOptions::default(),
            &Config::default())
        .unwrap_err();
        let QueryError::NotFound(message) = err else {
            panic!("expected NotFound");
        };
        assert!(message.contains("Unable to find an accessible element with the role \"dialog\""));
        assert!(message.contains("button:"));
        assert!(message.contains("Name \"Save\":"));
    }
}
