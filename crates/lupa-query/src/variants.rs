//! Shared query-variant plumbing
//!
//! Every family exposes `query_all` as its engine; the other variants are
//! boundary behavior layered on top: `query` tolerates zero but not many,
//! `get` tolerates neither, `find` wraps `get` in the wait primitive.
//! Suggestion enforcement hooks in here so each family gets it uniformly.

use lupa_dom::{Document, NodeId, serialize};

use crate::config::Config;
use crate::error::{QueryError, multiple_elements};
use crate::suggest::{Method, Variant, suggest_query};

/// Singular query: `None` on zero matches, error on more than one
pub(crate) fn resolve_query(
    doc: &Document,
    container: NodeId,
    found: Vec<NodeId>,
    multi_message: &str,
    used: Method,
    suggest: bool,
    cfg: &Config,
) -> Result<Option<NodeId>, QueryError> {
    match found.len() {
        0 => Ok(None),
        1 => {
            enforce_single(doc, found[0], used, suggest, cfg)?;
            Ok(Some(found[0]))
        }
        _ => Err(multiple(doc, container, &found, multi_message, cfg)),
    }
}

/// `get` variant: exactly one match or an error
pub(crate) fn resolve_get(
    doc: &Document,
    container: NodeId,
    found: Vec<NodeId>,
    multi_message: &str,
    miss: impl FnOnce() -> QueryError,
    used: Method,
    suggest: bool,
    cfg: &Config,
) -> Result<NodeId, QueryError> {
    match found.len() {
        0 => Err(miss()),
        1 => {
            enforce_single(doc, found[0], used, suggest, cfg)?;
            Ok(found[0])
        }
        _ => Err(multiple(doc, container, &found, multi_message, cfg)),
    }
}

/// `get_all` variant: at least one match or an error
pub(crate) fn resolve_get_all(
    doc: &Document,
    found: Vec<NodeId>,
    miss: impl FnOnce() -> QueryError,
    used: Method,
    suggest: bool,
    cfg: &Config,
) -> Result<Vec<NodeId>, QueryError> {
    if found.is_empty() {
        return Err(miss());
    }
    enforce_all(doc, &found, used, suggest, cfg)?;
    Ok(found)
}

fn multiple(
    doc: &Document,
    container: NodeId,
    found: &[NodeId],
    multi_message: &str,
    cfg: &Config,
) -> QueryError {
    let mut message = multi_message.to_string();
    if cfg.compute_diagnostics {
        message.push_str("\n\nHere are the matching elements:\n");
        for &el in found {
            message.push_str("\n  ");
            message.push_str(&serialize::open_tag(doc.tree(), el));
        }
    }
    message.push_str(
        "\n\n(If this is intentional, then use the `*_all` variant of the query \
         (like `query_all_by_text`, `get_all_by_text`, or `find_all_by_text`)).",
    );
    multiple_elements(&message, doc, container, cfg)
}

/// Throw when a single matched element suggests a stronger query
fn enforce_single(
    doc: &Document,
    element: NodeId,
    used: Method,
    suggest: bool,
    cfg: &Config,
) -> Result<(), QueryError> {
    if !suggest {
        return Ok(());
    }
    if let Some(suggestion) = suggest_query(doc, element, Variant::Get, cfg) {
        if suggestion.method != used {
            return Err(QueryError::Suggestion(format!(
                "A better query is available, try this:\n{suggestion}\n"
            )));
        }
    }
    Ok(())
}

/// Plural enforcement: only when every element independently agrees
fn enforce_all(
    doc: &Document,
    found: &[NodeId],
    used: Method,
    suggest: bool,
    cfg: &Config,
) -> Result<(), QueryError> {
    if !suggest {
        return Ok(());
    }
    let suggestions: Vec<_> = found
        .iter()
        .filter_map(|&el| suggest_query(doc, el, Variant::GetAll, cfg))
        .collect();
    if suggestions.len() != found.len() {
        return Ok(());
    }
    let Some(first) = suggestions.first() else {
        return Ok(());
    };
    if first.method != used && suggestions.iter().all(|s| s.method == first.method) {
        return Err(QueryError::Suggestion(format!(
            "A better query is available, try this:\n{first}\n"
        )));
    }
    Ok(())
}
