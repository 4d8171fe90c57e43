//! Text, placeholder, display-value, alt, title and test-id queries
//!
//! These families share one shape: an engine walking the container's
//! descendants plus the standard variant ladder on top. The ladder is
//! mechanical, so a macro stamps it out per family.

use lupa_dom::{Document, DomTree, NodeId, SelectorList};

use crate::config::{Config, current};
use crate::error::{QueryError, not_found};
use crate::matcher::{Matcher, NormalizerOptions, build_normalizer, matches_with};
use crate::suggest::Method;
use crate::variants::{resolve_get, resolve_get_all, resolve_query};
use crate::wait::{SharedDocument, WaitOptions, wait_for};

/// Options for the text query family
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Exact (default) or fuzzy matching
    pub exact: bool,
    /// Element filter applied to candidates
    pub selector: SelectorList,
    /// Selector list to skip; `None` defers to `Config::default_ignore`
    pub ignore: Option<String>,
    /// Text normalization
    pub normalizer: NormalizerOptions,
    /// Per-call override of `Config::throw_suggestions`
    pub suggest: Option<bool>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            exact: true,
            selector: SelectorList::universal(),
            ignore: None,
            normalizer: NormalizerOptions::default(),
            suggest: None,
        }
    }
}

/// Options shared by the attribute-driven query families
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Exact (default) or fuzzy matching
    pub exact: bool,
    /// Text normalization
    pub normalizer: NormalizerOptions,
    /// Per-call override of `Config::throw_suggestions`
    pub suggest: Option<bool>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            exact: true,
            normalizer: NormalizerOptions::default(),
            suggest: None,
        }
    }
}

/// Stamp out the `query`/`get`/`get_all`/`find`/`find_all` ladder for one
/// family whose engine is `$query_all`.
macro_rules! variant_set {
    (
        $query_all:ident, $query:ident, $get:ident, $get_all:ident,
        $find:ident, $find_all:ident, $opts:ty, $method:expr,
        $multi:expr, $miss:expr
    ) => {
        /// Singular query variant: `None` on zero matches
        pub fn $query(
            doc: &Document,
            container: NodeId,
            matcher: impl Into<Matcher>,
            opts: &$opts,
            cfg: &Config,
        ) -> Result<Option<NodeId>, QueryError> {
            let matcher = matcher.into();
            let found = $query_all(doc, container, matcher.clone(), opts, cfg)?;
            let multi: fn(&Matcher, &Config) -> String = $multi;
            resolve_query(
                doc,
                container,
                found,
                &multi(&matcher, cfg),
                $method,
                opts.suggest.unwrap_or(cfg.throw_suggestions),
                cfg,
            )
        }

        /// Exactly one match or an error
        pub fn $get(
            doc: &Document,
            container: NodeId,
            matcher: impl Into<Matcher>,
            opts: &$opts,
            cfg: &Config,
        ) -> Result<NodeId, QueryError> {
            let matcher = matcher.into();
            let found = $query_all(doc, container, matcher.clone(), opts, cfg)?;
            let multi: fn(&Matcher, &Config) -> String = $multi;
            let miss: fn(&Matcher, &Config) -> String = $miss;
            resolve_get(
                doc,
                container,
                found,
                &multi(&matcher, cfg),
                || not_found(&miss(&matcher, cfg), doc, container, cfg),
                $method,
                opts.suggest.unwrap_or(cfg.throw_suggestions),
                cfg,
            )
        }

        /// At least one match or an error
        pub fn $get_all(
            doc: &Document,
            container: NodeId,
            matcher: impl Into<Matcher>,
            opts: &$opts,
            cfg: &Config,
        ) -> Result<Vec<NodeId>, QueryError> {
            let matcher = matcher.into();
            let found = $query_all(doc, container, matcher.clone(), opts, cfg)?;
            let miss: fn(&Matcher, &Config) -> String = $miss;
            resolve_get_all(
                doc,
                found,
                || not_found(&miss(&matcher, cfg), doc, container, cfg),
                $method,
                opts.suggest.unwrap_or(cfg.throw_suggestions),
                cfg,
            )
        }

        /// Await a single match, re-querying on DOM mutations
        pub async fn $find(
            doc: &SharedDocument,
            container: NodeId,
            matcher: impl Into<Matcher>,
            opts: &$opts,
            wait: &WaitOptions,
        ) -> Result<NodeId, QueryError> {
            let matcher = matcher.into();
            let cfg = current();
            wait_for(
                doc,
                |d| $get(d, container, matcher.clone(), opts, &cfg),
                wait,
                &cfg,
            )
            .await
        }

        /// Await at least one match
        pub async fn $find_all(
            doc: &SharedDocument,
            container: NodeId,
            matcher: impl Into<Matcher>,
            opts: &$opts,
            wait: &WaitOptions,
        ) -> Result<Vec<NodeId>, QueryError> {
            let matcher = matcher.into();
            let cfg = current();
            wait_for(
                doc,
                |d| $get_all(d, container, matcher.clone(), opts, &cfg),
                wait,
                &cfg,
            )
            .await
        }
    };
}

/// All elements whose direct text matches, in document order
pub fn query_all_by_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &TextOptions,
    cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let normalizer = build_normalizer(&opts.normalizer)?;
    let tree = doc.tree();
    tracing::trace!("query_all_by_text: {}", matcher);

    let ignore = SelectorList::parse(opts.ignore.as_deref().unwrap_or(&cfg.default_ignore));

    let mut out = Vec::new();
    for el in tree.descendant_elements(container) {
        if ignore.matches(tree, el) || !opts.selector.matches(tree, el) {
            continue;
        }
        // only text nodes directly under the element count, so a wrapper
        // does not swallow its children's matches
        let text = tree.node_text(el);
        if matches_with(opts.exact, Some(&text), Some(tree.node(el)), &matcher, &normalizer) {
            out.push(el);
        }
    }
    Ok(out)
}

variant_set!(
    query_all_by_text,
    query_by_text,
    get_by_text,
    get_all_by_text,
    find_by_text,
    find_all_by_text,
    TextOptions,
    Method::Text,
    |m, _| format!("Found multiple elements with the text: {m}"),
    |m, _| format!(
        "Unable to find an element with the text: {m}. This could be because the text \
         is broken up by multiple elements. In this case, you can provide a function \
         for your text matcher to make your matcher more flexible."
    )
);

fn query_all_by_attribute(
    doc: &Document,
    container: NodeId,
    attribute: &str,
    matcher: &Matcher,
    exact: bool,
    normalizer: &NormalizerOptions,
) -> Result<Vec<NodeId>, QueryError> {
    let normalizer = build_normalizer(normalizer)?;
    let tree = doc.tree();
    Ok(tree
        .descendant_elements(container)
        .filter(|&el| {
            matches_with(
                exact,
                tree.node(el).attr(attribute),
                Some(tree.node(el)),
                matcher,
                &normalizer,
            )
        })
        .collect())
}

/// All elements whose `placeholder` attribute matches
pub fn query_all_by_placeholder_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &MatchOptions,
    _cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    tracing::trace!("query_all_by_placeholder_text: {}", matcher);
    query_all_by_attribute(doc, container, "placeholder", &matcher, opts.exact, &opts.normalizer)
}

variant_set!(
    query_all_by_placeholder_text,
    query_by_placeholder_text,
    get_by_placeholder_text,
    get_all_by_placeholder_text,
    find_by_placeholder_text,
    find_all_by_placeholder_text,
    MatchOptions,
    Method::PlaceholderText,
    |m, _| format!("Found multiple elements with the placeholder text of: {m}"),
    |m, _| format!("Unable to find an element with the placeholder text of: {m}")
);

/// Current displayed values of a form element
///
/// `<select>` reports every selected option (falling back to the first
/// option, which the browser would show by default).
pub(crate) fn display_values(tree: &DomTree, element: NodeId) -> Vec<String> {
    match tree.node(element).tag() {
        Some("input") => tree
            .node(element)
            .attr("value")
            .map(str::to_string)
            .into_iter()
            .collect(),
        Some("textarea") => vec![tree.text_content(element)],
        Some("select") => {
            let options: Vec<NodeId> = tree
                .descendant_elements(element)
                .filter(|&id| tree.node(id).tag() == Some("option"))
                .collect();
            let selected: Vec<NodeId> = options
                .iter()
                .copied()
                .filter(|&id| tree.node(id).has_attr("selected"))
                .collect();
            let shown = if selected.is_empty() {
                options.into_iter().take(1).collect()
            } else {
                selected
            };
            shown.into_iter().map(|id| tree.text_content(id)).collect()
        }
        _ => Vec::new(),
    }
}

/// All form elements whose displayed value matches
pub fn query_all_by_display_value(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &MatchOptions,
    _cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let normalizer = build_normalizer(&opts.normalizer)?;
    let tree = doc.tree();
    tracing::trace!("query_all_by_display_value: {}", matcher);

    Ok(tree
        .descendant_elements(container)
        .filter(|&el| {
            display_values(tree, el).iter().any(|value| {
                matches_with(opts.exact, Some(value), Some(tree.node(el)), &matcher, &normalizer)
            })
        })
        .collect())
}

variant_set!(
    query_all_by_display_value,
    query_by_display_value,
    get_by_display_value,
    get_all_by_display_value,
    find_by_display_value,
    find_all_by_display_value,
    MatchOptions,
    Method::DisplayValue,
    |m, _| format!("Found multiple elements with the display value: {m}."),
    |m, _| format!("Unable to find an element with the display value: {m}.")
);

/// All images, inputs and areas whose `alt` attribute matches
pub fn query_all_by_alt_text(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &MatchOptions,
    _cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let normalizer = build_normalizer(&opts.normalizer)?;
    let tree = doc.tree();
    tracing::trace!("query_all_by_alt_text: {}", matcher);

    Ok(tree
        .descendant_elements(container)
        .filter(|&el| matches!(tree.node(el).tag(), Some("img" | "input" | "area")))
        .filter(|&el| {
            matches_with(
                opts.exact,
                tree.node(el).attr("alt"),
                Some(tree.node(el)),
                &matcher,
                &normalizer,
            )
        })
        .collect())
}

variant_set!(
    query_all_by_alt_text,
    query_by_alt_text,
    get_by_alt_text,
    get_all_by_alt_text,
    find_by_alt_text,
    find_all_by_alt_text,
    MatchOptions,
    Method::AltText,
    |m, _| format!("Found multiple elements with the alt text: {m}"),
    |m, _| format!("Unable to find an element with the alt text: {m}")
);

/// All elements whose `title` attribute matches, plus `<title>` elements
/// whose content matches
pub fn query_all_by_title(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &MatchOptions,
    _cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    let normalizer = build_normalizer(&opts.normalizer)?;
    let tree = doc.tree();
    tracing::trace!("query_all_by_title: {}", matcher);

    Ok(tree
        .descendant_elements(container)
        .filter(|&el| {
            let node = tree.node(el);
            if matches_with(opts.exact, node.attr("title"), Some(node), &matcher, &normalizer) {
                return true;
            }
            node.tag() == Some("title")
                && matches_with(
                    opts.exact,
                    Some(&tree.text_content(el)),
                    Some(node),
                    &matcher,
                    &normalizer,
                )
        })
        .collect())
}

variant_set!(
    query_all_by_title,
    query_by_title,
    get_by_title,
    get_all_by_title,
    find_by_title,
    find_all_by_title,
    MatchOptions,
    Method::Title,
    |m, _| format!("Found multiple elements with the title: {m}."),
    |m, _| format!("Unable to find an element with the title: {m}.")
);

/// All elements whose configured test-id attribute matches
pub fn query_all_by_test_id(
    doc: &Document,
    container: NodeId,
    matcher: impl Into<Matcher>,
    opts: &MatchOptions,
    cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    let matcher = matcher.into();
    tracing::trace!("query_all_by_test_id: [{}={}]", cfg.test_id_attribute, matcher);
    query_all_by_attribute(
        doc,
        container,
        &cfg.test_id_attribute,
        &matcher,
        opts.exact,
        &opts.normalizer,
    )
}

variant_set!(
    query_all_by_test_id,
    query_by_test_id,
    get_by_test_id,
    get_all_by_test_id,
    find_by_test_id,
    find_all_by_test_id,
    MatchOptions,
    Method::TestId,
    |m, cfg| format!(
        "Found multiple elements by: [{}=\"{m}\"]",
        cfg.test_id_attribute
    ),
    |m, cfg| format!(
        "Unable to find an element by: [{}=\"{m}\"]",
        cfg.test_id_attribute
    )
);

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn doc_from(html: &str) -> Document {
        lupa_html::parse(html)
    }

    #[test]
    fn test_text_query_matches_direct_text_only() {
        let doc = doc_from(r#"<div><span>inner</span></div>"#);
        let cfg = Config::default();
        let found =
            query_all_by_text(&doc, doc.body(), "inner", &TextOptions::default(), &cfg).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().node(found[0]).tag(), Some("span"));
    }

    #[test]
    fn test_text_query_skips_ignored_tags() {
        let doc = doc_from(r#"<script>var x;</script><div>var x;</div>"#);
        let cfg = Config::default();
        let found =
            query_all_by_text(&doc, doc.body(), "var x;", &TextOptions::default(), &cfg).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().node(found[0]).tag(), Some("div"));
    }

    #[test]
    fn test_text_query_selector_filter() {
        let doc = doc_from(r#"<p>hello</p><span>hello</span>"#);
        let cfg = Config::default();
        let opts = TextOptions {
            selector: SelectorList::parse("span"),
            ..Default::default()
        };
        let found = query_all_by_text(&doc, doc.body(), "hello", &opts, &cfg).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().node(found[0]).tag(), Some("span"));
    }

    #[test]
    fn test_placeholder_query() {
        let doc = doc_from(r#"<input placeholder="Search here" />"#);
        let cfg = Config::default();
        let found = query_all_by_placeholder_text(
            &doc,
            doc.body(),
            Regex::new("^Search").unwrap(),
            &MatchOptions::default(),
            &cfg,
        )
        .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_display_value_covers_input_textarea_select() {
        let doc = doc_from(
            r#"<input value="typed" />
               <textarea>long form</textarea>
               <select><option>first</option><option selected>chosen</option></select>"#,
        );
        let cfg = Config::default();
        let opts = MatchOptions::default();
        assert_eq!(
            query_all_by_display_value(&doc, doc.body(), "typed", &opts, &cfg).unwrap().len(),
            1
        );
        assert_eq!(
            query_all_by_display_value(&doc, doc.body(), "long form", &opts, &cfg)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            query_all_by_display_value(&doc, doc.body(), "chosen", &opts, &cfg).unwrap().len(),
            1
        );
        assert!(query_all_by_display_value(&doc, doc.body(), "first", &opts, &cfg)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_alt_text_is_restricted_to_image_like_tags() {
        let doc = doc_from(r#"<img alt="a cat" /><div alt="a cat">x</div>"#);
        let cfg = Config::default();
        let found =
            query_all_by_alt_text(&doc, doc.body(), "a cat", &MatchOptions::default(), &cfg)
                .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.tree().node(found[0]).tag(), Some("img"));
    }

    #[test]
    fn test_test_id_honors_configured_attribute() {
        let doc = doc_from(r#"<div data-qa="panel">x</div>"#);
        let cfg = Config {
            test_id_attribute: "data-qa".to_string(),
            ..Default::default()
        };
        let found =
            query_all_by_test_id(&doc, doc.body(), "panel", &MatchOptions::default(), &cfg)
                .unwrap();
        assert_eq!(found.len(), 1);

        let err = get_by_test_id(&doc, doc.body(), "missing", &MatchOptions::default(), &cfg)
            .unwrap_err();
        assert!(err.to_string().contains("[data-qa=\"missing\"]"));
    }

    #[test]
    fn test_get_reports_multiple() {
        let doc = doc_from(r#"<p>dup</p><p>dup</p>"#);
        let cfg = Config::default();
        let err =
            get_by_text(&doc, doc.body(), "dup", &TextOptions::default(), &cfg).unwrap_err();
        let QueryError::MultipleElements(message) = err else {
            panic!("expected MultipleElements");
        };
        assert!(message.contains("Found multiple elements with the text: dup"));
        assert!(message.contains("*_all"));
    }
}
