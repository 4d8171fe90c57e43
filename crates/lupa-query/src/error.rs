//! Query error taxonomy
//!
//! Every user-facing failure flows through the configured element-error hook
//! so hosts can decorate messages (or strip the DOM dump) without touching
//! control flow.

use lupa_dom::{Document, NodeId, serialize};

use crate::config::Config;

/// Query failure
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Zero matches on a `get_*`/`find_*` query
    #[error("{0}")]
    NotFound(String),

    /// More than one match on a singular query
    #[error("{0}")]
    MultipleElements(String),

    /// Invalid option combination, independent of DOM state
    #[error("{0}")]
    Configuration(String),

    /// A `wait_for`/`find_*` deadline elapsed without a probe success
    #[error("{0}")]
    Timeout(String),

    /// A stronger query exists and suggestion enforcement is on
    #[error("{0}")]
    Suggestion(String),
}

/// Everything the element-error hook gets to see
pub struct ErrorContext<'a> {
    /// The raw failure message
    pub message: &'a str,
    /// Document the query ran against
    pub doc: &'a Document,
    /// Query container
    pub container: NodeId,
    /// Whether expensive diagnostics (DOM dumps) should be produced
    pub diagnostics: bool,
}

/// Default element-error hook: message plus a pretty-printed container dump
pub fn default_element_error(ctx: &ErrorContext<'_>) -> String {
    if ctx.diagnostics {
        format!(
            "{}\n\nIgnored nodes: comments, script, style\n{}",
            ctx.message,
            serialize::pretty(ctx.doc.tree(), ctx.container, serialize::DEFAULT_MAX_LENGTH)
        )
    } else {
        ctx.message.to_string()
    }
}

pub(crate) fn not_found(
    message: &str,
    doc: &Document,
    container: NodeId,
    cfg: &Config,
) -> QueryError {
    QueryError::NotFound(run_hook(message, doc, container, cfg))
}

pub(crate) fn multiple_elements(
    message: &str,
    doc: &Document,
    container: NodeId,
    cfg: &Config,
) -> QueryError {
    QueryError::MultipleElements(run_hook(message, doc, container, cfg))
}

fn run_hook(message: &str, doc: &Document, container: NodeId, cfg: &Config) -> String {
    (cfg.element_error)(&ErrorContext {
        message,
        doc,
        container,
        diagnostics: cfg.compute_diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hook_appends_dom_dump() {
        let doc = Document::new("about:blank");
        let msg = default_element_error(&ErrorContext {
            message: "Unable to find it",
            doc: &doc,
            container: doc.body(),
            diagnostics: true,
        });
        assert!(msg.starts_with("Unable to find it"));
        assert!(msg.contains("<body"));
    }

    #[test]
    fn test_diagnostics_off_keeps_message_bare() {
        let doc = Document::new("about:blank");
        let msg = default_element_error(&ErrorContext {
            message: "Unable to find it",
            doc: &doc,
            container: doc.body(),
            diagnostics: false,
        });
        assert_eq!(msg, "Unable to find it");
    }
}
