//! Text matchers and normalization
//!
//! Every query family funnels candidate text through one normalizer and one
//! matcher. Exact mode compares normalized text; fuzzy mode downgrades the
//! string matcher to a case-insensitive substring test.

use std::fmt;
use std::sync::Arc;

use lupa_dom::Node;
use regex::Regex;

use crate::error::QueryError;

/// A text normalization function
#[derive(Clone)]
pub struct Normalizer(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Normalizer {
    /// Wrap an arbitrary normalization function
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Normalizer that returns its input untouched
    pub fn identity() -> Self {
        Self::new(|s| s.to_string())
    }

    /// Apply the normalizer
    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Normalizer(..)")
    }
}

/// Normalization configuration for a single query call
///
/// `custom` fully replaces the built-in behavior and may not be combined
/// with the trim/collapse flags.
#[derive(Debug, Clone, Default)]
pub struct NormalizerOptions {
    /// Trim leading/trailing whitespace (default true)
    pub trim: Option<bool>,
    /// Collapse internal whitespace runs to single spaces (default true)
    pub collapse_whitespace: Option<bool>,
    /// Replacement normalizer
    pub custom: Option<Normalizer>,
}

/// Build the effective normalizer for a query call
pub fn build_normalizer(opts: &NormalizerOptions) -> Result<Normalizer, QueryError> {
    if let Some(custom) = &opts.custom {
        if opts.trim.is_some() || opts.collapse_whitespace.is_some() {
            return Err(QueryError::Configuration(
                "trim and collapse_whitespace are not supported with a custom normalizer. \
                 If you want to use the default trim and collapse_whitespace logic in your \
                 normalizer, use get_default_normalizer({trim, collapse_whitespace}) and compose \
                 that into your normalizer"
                    .to_string(),
            ));
        }
        return Ok(custom.clone());
    }

    let trim = opts.trim.unwrap_or(true);
    let collapse = opts.collapse_whitespace.unwrap_or(true);
    Ok(get_default_normalizer(trim, collapse))
}

/// The built-in trim/collapse normalizer with explicit flags
pub fn get_default_normalizer(trim: bool, collapse_whitespace: bool) -> Normalizer {
    Normalizer::new(move |text| {
        let mut out = text.to_string();
        if trim {
            out = out.trim().to_string();
        }
        if collapse_whitespace {
            // run-collapse without trimming, so the flags stay independent
            let mut collapsed = String::with_capacity(out.len());
            let mut in_whitespace = false;
            for ch in out.chars() {
                if ch.is_whitespace() {
                    if !in_whitespace {
                        collapsed.push(' ');
                    }
                    in_whitespace = true;
                } else {
                    collapsed.push(ch);
                    in_whitespace = false;
                }
            }
            out = collapsed;
        }
        out
    })
}

/// Predicate matcher: receives the normalized text and the candidate node
pub type MatcherFn = Arc<dyn Fn(&str, Option<&Node>) -> bool + Send + Sync>;

/// What query text is matched against
#[derive(Clone)]
pub enum Matcher {
    /// Literal string (equality in exact mode, substring in fuzzy mode)
    Text(String),
    /// Regular expression, tested against the normalized text
    Pattern(Regex),
    /// Arbitrary predicate
    Func(MatcherFn),
}

impl Matcher {
    /// Predicate matcher from a closure
    pub fn func(f: impl Fn(&str, Option<&Node>) -> bool + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }

    /// The literal text, when this is a string matcher
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "Matcher::Text({t:?})"),
            Self::Pattern(r) => write!(f, "Matcher::Pattern(/{r}/)"),
            Self::Func(_) => f.write_str("Matcher::Func(..)"),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "{t}"),
            Self::Pattern(r) => write!(f, "/{r}/"),
            Self::Func(_) => f.write_str("[function matcher]"),
        }
    }
}

impl From<&str> for Matcher {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Matcher {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Regex> for Matcher {
    fn from(r: Regex) -> Self {
        Self::Pattern(r)
    }
}

/// Exact match of candidate text against a matcher
///
/// `None` text (a candidate without text) never matches anything.
pub fn matches(
    text: Option<&str>,
    node: Option<&Node>,
    matcher: &Matcher,
    normalizer: &Normalizer,
) -> bool {
    let Some(text) = text else {
        return false;
    };
    let normalized = normalizer.apply(text);
    match matcher {
        Matcher::Text(t) => normalized == *t,
        Matcher::Pattern(r) => r.is_match(&normalized),
        Matcher::Func(f) => f(&normalized, node),
    }
}

/// Fuzzy match: string matchers become case-insensitive substring tests
pub fn fuzzy_matches(
    text: Option<&str>,
    node: Option<&Node>,
    matcher: &Matcher,
    normalizer: &Normalizer,
) -> bool {
    let Some(text) = text else {
        return false;
    };
    let normalized = normalizer.apply(text);
    match matcher {
        Matcher::Text(t) => normalized.to_lowercase().contains(&t.to_lowercase()),
        Matcher::Pattern(r) => r.is_match(&normalized),
        Matcher::Func(f) => f(&normalized, node),
    }
}

/// Dispatch on the `exact` option
pub(crate) fn matches_with(
    exact: bool,
    text: Option<&str>,
    node: Option<&Node>,
    matcher: &Matcher,
    normalizer: &Normalizer,
) -> bool {
    if exact {
        matches(text, node, matcher, normalizer)
    } else {
        fuzzy_matches(text, node, matcher, normalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_normalizer() -> Normalizer {
        get_default_normalizer(true, true)
    }

    #[test]
    fn test_exact_string_match_normalizes() {
        let n = default_normalizer();
        assert!(matches(Some("  hello   world "), None, &"hello world".into(), &n));
        assert!(!matches(Some("hello"), None, &"Hello".into(), &n));
        assert!(!matches(None, None, &"hello".into(), &n));
    }

    #[test]
    fn test_fuzzy_string_is_case_insensitive_substring() {
        let n = default_normalizer();
        assert!(fuzzy_matches(Some("Hello World"), None, &"wor".into(), &n));
        assert!(fuzzy_matches(Some("Hello World"), None, &"HELLO".into(), &n));
        assert!(!fuzzy_matches(Some("Hello"), None, &"world".into(), &n));
    }

    #[test]
    fn test_regex_matcher() {
        let n = default_normalizer();
        let m: Matcher = Regex::new(r"^wor\w+$").unwrap().into();
        assert!(matches(Some("  world "), None, &m, &n));
        assert!(!matches(Some("hello world"), None, &m, &n));
    }

    #[test]
    fn test_function_matcher_sees_normalized_text() {
        let n = default_normalizer();
        let m = Matcher::func(|text, _node| text == "abc");
        assert!(matches(Some(" abc "), None, &m, &n));
    }

    #[test]
    fn test_custom_normalizer_conflicts_with_flags() {
        let opts = NormalizerOptions {
            trim: Some(false),
            collapse_whitespace: None,
            custom: Some(Normalizer::identity()),
        };
        assert!(matches!(
            build_normalizer(&opts),
            Err(QueryError::Configuration(_))
        ));

        let opts = NormalizerOptions {
            custom: Some(Normalizer::new(|s| s.replace('x', "y"))),
            ..Default::default()
        };
        let n = build_normalizer(&opts).unwrap();
        assert_eq!(n.apply("xx"), "yy");
    }

    #[test]
    fn test_default_normalizer_flags() {
        let trim_only = get_default_normalizer(true, false);
        assert_eq!(trim_only.apply("  a  b  "), "a  b");

        let collapse_only = get_default_normalizer(false, true);
        assert_eq!(collapse_only.apply(" a  b "), " a b ");
    }
}
