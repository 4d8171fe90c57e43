//! Accessibility-first DOM queries
//!
//! Finds elements the way users perceive them: by role, label, placeholder,
//! text, display value, alt text, title, or as a last resort a test id.
//! Each family comes in six variants (`query`/`get`/`find`, singular and
//! `_all`) with shared boundary semantics, plus an async [`wait_for`]
//! primitive that re-probes on DOM mutations.

pub mod config;
pub mod error;
pub mod label;
pub mod matcher;
pub mod role;
pub mod role_table;
pub mod simple;
pub mod suggest;
pub mod visibility;
pub mod wait;

mod variants;

pub use config::{Config, ConfigDelta, ElementErrorHook, configure, current, restore};
pub use error::{ErrorContext, QueryError, default_element_error};
pub use label::{
    LabelDescriptor, LabelOptions, find_all_by_label_text, find_by_label_text,
    get_all_by_label_text, get_by_label_text, query_all_by_label_text, query_by_label_text,
};
pub use matcher::{
    Matcher, Normalizer, NormalizerOptions, build_normalizer, get_default_normalizer,
};
pub use role::{
    RoleOptions, find_all_by_role, find_by_role, get_all_by_role, get_by_role,
    query_all_by_role, query_by_role,
};
pub use role_table::implicit_aria_roles;
pub use simple::{
    MatchOptions, TextOptions, find_all_by_alt_text, find_all_by_display_value,
    find_all_by_placeholder_text, find_all_by_test_id, find_all_by_text, find_all_by_title,
    find_by_alt_text, find_by_display_value, find_by_placeholder_text, find_by_test_id,
    find_by_text, find_by_title, get_all_by_alt_text, get_all_by_display_value,
    get_all_by_placeholder_text, get_all_by_test_id, get_all_by_text, get_all_by_title,
    get_by_alt_text, get_by_display_value, get_by_placeholder_text, get_by_test_id, get_by_text,
    get_by_title, query_all_by_alt_text, query_all_by_display_value,
    query_all_by_placeholder_text, query_all_by_test_id, query_all_by_text, query_all_by_title,
    query_by_alt_text, query_by_display_value, query_by_placeholder_text, query_by_test_id,
    query_by_text, query_by_title,
};
pub use suggest::{Method, Suggestion, Variant, suggest_query};
pub use visibility::{VisibilityCache, is_inaccessible, is_subtree_inaccessible};
pub use wait::{SharedDocument, WaitOptions, lock, shared, wait_for};
