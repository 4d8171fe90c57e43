//! Label resolution and label-text queries
//!
//! Resolves what labels an element, in precedence order: `aria-labelledby`
//! references beat native `<label>` association, which beats a plain
//! `aria-label` attribute only in the sense that all three are queryable
//! but labelledby descriptors are the ones produced when present.

use std::collections::HashSet;

use lupa_aria::name::is_labelable;
use lupa_dom::{Document, DomTree, NodeId, SelectorList, serialize};

use crate::config::{Config, current};
use crate::error::{QueryError, not_found};
use crate::matcher::{Matcher, NormalizerOptions, build_normalizer, matches_with};
use crate::suggest::Method;
use crate::variants::{resolve_get, resolve_get_all, resolve_query};
use crate::wait::{SharedDocument, WaitOptions, wait_for};

/// Options for the label-text query family
#[derive(Debug, Clone)]
pub struct LabelOptions {
    /// Exact (default) or fuzzy matching
    pub exact: bool,
    /// Element filter applied to results (and to form-control resolution)
    pub selector: SelectorList,
    /// Text normalization
    pub normalizer: NormalizerOptions,
    /// Per-call override of `Config::throw_suggestions`
    pub suggest: Option<bool>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            exact: true,
            selector: SelectorList::universal(),
            normalizer: NormalizerOptions::default(),
            suggest: None,
        }
    }
}

/// A resolved label for one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDescriptor {
    /// Label prose
    pub content: String,
    /// Associated form control, when one resolves inside the label
    pub form_control: Option<NodeId>,
}

/// Native label linkage, when the host DOM exposes it
///
/// Capability probe kept as an explicit strategy seam: the arena DOM never
/// tracks `.labels`, so this always selects the scan fallback below. A host
/// with native linkage slots in here without touching the resolution logic.
fn native_labels(_doc: &Document, _element: NodeId) -> Option<Vec<NodeId>> {
    None
}

/// All `<label>` elements associated with `element`
pub fn real_labels(doc: &Document, element: NodeId) -> Vec<NodeId> {
    if let Some(labels) = native_labels(doc, element) {
        return labels;
    }
    let tree = doc.tree();
    if !is_labelable(tree, element) {
        return Vec::new();
    }
    tree.descendant_elements(tree.root())
        .filter(|&id| tree.node(id).tag() == Some("label"))
        .filter(|&label| resolve_label_control(doc, label) == Some(element))
        .collect()
}

/// The control a `<label>` points at: `for` attribute first, then the first
/// labelable descendant
fn resolve_label_control(doc: &Document, label: NodeId) -> Option<NodeId> {
    let tree = doc.tree();
    if let Some(target) = tree.node(label).attr("for") {
        return doc.get_element_by_id(target);
    }
    tree.descendant_elements(label)
        .find(|&id| is_labelable(tree, id))
}

/// Label prose of a node
///
/// For a `<label>`, the descendant text minus anything contributed by nested
/// `<textarea>`/`<select>` — their own content is a value, not label prose.
/// For anything else, its `value` attribute if present, else its text.
pub fn label_content(tree: &DomTree, node: NodeId) -> String {
    let n = tree.node(node);
    if n.tag() == Some("label") {
        let mut out = String::new();
        collect_label_text(tree, node, &mut out);
        return out;
    }
    if let Some(value) = n.attr("value") {
        return value.to_string();
    }
    tree.text_content(node)
}

fn collect_label_text(tree: &DomTree, id: NodeId, out: &mut String) {
    for child in tree.children(id) {
        let node = tree.node(child);
        if let Some(text) = node.as_text() {
            out.push_str(text);
            continue;
        }
        if matches!(node.tag(), Some("textarea" | "select")) {
            continue;
        }
        collect_label_text(tree, child, out);
    }
}

/// Resolve the label descriptors for one element
///
/// `aria-labelledby` takes precedence over native `<label>` association:
/// when the attribute is present, only reference descriptors are produced.
pub fn labels_of(
    doc: &Document,
    container: NodeId,
    element: NodeId,
    selector: &SelectorList,
) -> Vec<LabelDescriptor> {
    let tree = doc.tree();
    if let Some(refs) = tree.node(element).attr("aria-labelledby") {
        return refs
            .split_whitespace()
            .filter_map(|id| tree.element_by_id(container, id))
            .map(|target| LabelDescriptor {
                content: label_content(tree, target),
                form_control: None,
            })
            .collect();
    }

    real_labels(doc, element)
        .into_iter()
        .map(|label| {
            // first match wins, not best match
            let form_control = tree
                .descendant_elements(label)
                .find(|&id| selector.matches(tree, id) && is_labelable(tree, id));
            LabelDescriptor {
                content: label_content(tree, label),
                form_control,
            }
        })
        .collect()
}

/// Label texts of an element, used by the suggestion engine
pub(crate) fn label_texts(doc: &Document, element: NodeId) -> Vec<String> {
    let has_labels = doc.tree().node(element).has_attr("aria-labelledby")
        || !real_labels(doc, element).is_empty();
    let mut texts: Vec<String> = if has_labels {
        labels_of(doc, doc.tree().root(), element, &SelectorList::universal())
            .into_iter()
            .map(|d| d.content.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    } else {
        Vec::new()
    };
    if texts.is_empty() {
        if let Some(label) = doc.tree().node(element).attr("aria-label") {
            if !label.trim().is_empty() {
                texts.push(label.trim().to_string());
            }
        }
    }
    texts
}

/// All elements the label text resolves to, in discovery order
pub fn query_all_by_label_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &LabelOptions,
    _cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let normalizer = build_normalizer(&opts.normalizer)?;
    let tree = doc.tree();
    tracing::trace!("query_all_by_label_text: {}", matcher);

    let matched = |text: &str, node: NodeId| {
        matches_with(
            opts.exact,
            Some(text),
            Some(tree.node(node)),
            &matcher,
            &normalizer,
        )
    };

    let mut out: Vec<NodeId> = Vec::new();

    for el in tree.descendant_elements(container) {
        let node = tree.node(el);
        if !node.has_attr("aria-labelledby") && real_labels(doc, el).is_empty() {
            continue;
        }

        let descriptors = labels_of(doc, container, el, &opts.selector);

        for descriptor in &descriptors {
            if let Some(control) = descriptor.form_control {
                if matched(&descriptor.content, control) {
                    out.push(control);
                }
            }
        }

        let contents: Vec<&str> = descriptors
            .iter()
            .map(|d| d.content.as_str())
            .filter(|c| !c.trim().is_empty())
            .collect();

        if matched(&contents.join(" "), el) {
            out.push(el);
        }
        if contents.len() > 1 {
            // a required subset of the references may be the true label
            for index in 0..contents.len() {
                if matched(contents[index], el) {
                    out.push(el);
                }
                let rest: Vec<&str> = contents
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != index)
                    .map(|(_, c)| *c)
                    .collect();
                if rest.len() > 1 && matched(&rest.join(" "), el) {
                    out.push(el);
                }
            }
        }
    }

    // plain aria-label is an independent source of matches
    for el in tree.descendant_elements(container) {
        if let Some(label) = tree.node(el).attr("aria-label") {
            if matched(label, el) {
                out.push(el);
            }
        }
    }

    let mut seen = HashSet::new();
    out.retain(|&el| seen.insert(el));
    out.retain(|&el| opts.selector.matches(tree, el));
    Ok(out)
}

/// Singular query variant: `None` on zero matches
pub fn query_by_label_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &LabelOptions,
    cfg: &Config,
) -> Result<Option<NodeId>, QueryError> {
    let matcher = matcher.into();
    let found = query_all_by_label_text(doc, container, matcher.clone(), opts, cfg)?;
    resolve_query(
        doc,
        container,
        found,
        &multi_message(&matcher),
        Method::LabelText,
        opts.suggest.unwrap_or(cfg.throw_suggestions),
        cfg,
    )
}

/// At least one match or a NotFound error
pub fn get_all_by_label_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &LabelOptions,
    cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let found = query_all_by_label_text(doc, container, matcher.clone(), opts, cfg)?;
    resolve_get_all(
        doc,
        found,
        || label_miss(doc, container, &matcher, opts, cfg),
        Method::LabelText,
        opts.suggest.unwrap_or(cfg.throw_suggestions),
        cfg,
    )
}

/// Exactly one match or an error
pub fn get_by_label_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &LabelOptions,
    cfg: &Config,
) -> Result<NodeId, QueryError> {
    let matcher = matcher.into();
    let found = query_all_by_label_text(doc, container, matcher.clone(), opts, cfg)?;
    resolve_get(
        doc,
        container,
        found,
        &multi_message(&matcher),
        || label_miss(doc, container, &matcher, opts, cfg),
        Method::LabelText,
        opts.suggest.unwrap_or(cfg.throw_suggestions),
        cfg,
    )
}

/// Await a single match, re-querying on DOM mutations
pub async fn find_by_label_text(
    doc: &SharedDocument,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &LabelOptions,
    wait: &WaitOptions,
) -> Result<NodeId, QueryError> {
    let matcher = matcher.into();
    let cfg = current();
    wait_for(
        doc,
        |d| get_by_label_text(d, container, matcher.clone(), opts, &cfg),
        wait,
        &cfg,
    )
    .await
}

/// Await at least one match
pub async fn find_all_by_label_text(
    doc: &SharedDocument,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &LabelOptions,
    wait: &WaitOptions,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let cfg = current();
    wait_for(
        doc,
        |d| get_all_by_label_text(d, container, matcher.clone(), opts, &cfg),
        wait,
        &cfg,
    )
    .await
}

fn multi_message(matcher: &Matcher) -> String {
    format!("Found multiple elements with the text of: {matcher}")
}

/// Three-way miss diagnostic: no label matched at all, label matched but its
/// control is non-labelable, or label matched with no control
fn label_miss(
    doc: &Document,
    container: NodeId,
    matcher: &Matcher,
    opts: &LabelOptions,
    cfg: &Config,
) -> QueryError {
    let tree = doc.tree();

    if cfg.compute_diagnostics {
        if let Ok(normalizer) = build_normalizer(&opts.normalizer) {
            let matched_labels: Vec<NodeId> = tree
                .descendant_elements(container)
                .filter(|&id| tree.node(id).tag() == Some("label"))
                .filter(|&label| {
                    matches_with(
                        opts.exact,
                        Some(&label_content(tree, label)),
                        Some(tree.node(label)),
                        matcher,
                        &normalizer,
                    )
                })
                .collect();

            if !matched_labels.is_empty() {
                let mut messages = Vec::new();
                for label in matched_labels {
                    match diagnostic_control(doc, label) {
                        Some(control) if !is_labelable(tree, control) => {
                            messages.push(format!(
                                "Found a label with the text of: {matcher}, however the element \
                                 associated with this label ({}) is non-labellable.",
                                serialize::open_tag(tree, control)
                            ));
                        }
                        Some(_) => {}
                        None => {
                            messages.push(format!(
                                "Found a label with the text of: {matcher}, however no form \
                                 control was found associated to that label. Make sure you're \
                                 using the \"for\" attribute or \"aria-labelledby\" attribute \
                                 correctly.",
                            ));
                        }
                    }
                }
                if !messages.is_empty() {
                    return not_found(&messages.join("\n\n"), doc, container, cfg);
                }
            }
        }
    }

    not_found(
        &format!("Unable to find a label with the text of: {matcher}"),
        doc,
        container,
        cfg,
    )
}

/// Loose control resolution for diagnostics only: any element counts, so a
/// mis-targeted `for` attribute can be reported with its tag
fn diagnostic_control(doc: &Document, label: NodeId) -> Option<NodeId> {
    let tree = doc.tree();
    if let Some(target) = tree.node(label).attr("for") {
        return doc.get_element_by_id(target);
    }
    tree.descendant_elements(label)
        .find(|&id| tree.node(id).is_element())
}
