//! Query configuration
//!
//! One process-wide default instance plus explicit threading: engines take
//! `&Config`, the convenience entry points snapshot the global. Mutation
//! happens only through [`configure`], which merges a delta and returns the
//! prior snapshot so tests can restore it.

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ErrorContext, default_element_error};

/// Hook through which every diagnostic message is built
pub type ElementErrorHook = Arc<dyn Fn(&ErrorContext<'_>) -> String + Send + Sync>;

/// Effective query configuration
#[derive(Clone)]
pub struct Config {
    /// Attribute read by the test-id query family
    pub test_id_attribute: String,
    /// Default for the role query `hidden` option
    pub default_hidden: bool,
    /// Selector list excluded from text matching
    pub default_ignore: String,
    /// Enforce query suggestions on get/query results
    pub throw_suggestions: bool,
    /// Default deadline for `wait_for` and the `find_*` family
    pub async_util_timeout: Duration,
    /// Produce expensive diagnostics (DOM dumps, role listings) in errors
    pub compute_diagnostics: bool,
    /// Error decoration hook
    pub element_error: ElementErrorHook,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_id_attribute: "data-testid".to_string(),
            default_hidden: false,
            default_ignore: "script, style".to_string(),
            throw_suggestions: false,
            async_util_timeout: Duration::from_millis(1000),
            compute_diagnostics: true,
            element_error: Arc::new(default_element_error),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("test_id_attribute", &self.test_id_attribute)
            .field("default_hidden", &self.default_hidden)
            .field("default_ignore", &self.default_ignore)
            .field("throw_suggestions", &self.throw_suggestions)
            .field("async_util_timeout", &self.async_util_timeout)
            .field("compute_diagnostics", &self.compute_diagnostics)
            .finish_non_exhaustive()
    }
}

/// Partial configuration, merged over the current one by [`configure`]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ConfigDelta {
    pub test_id_attribute: Option<String>,
    pub default_hidden: Option<bool>,
    pub default_ignore: Option<String>,
    pub throw_suggestions: Option<bool>,
    /// Milliseconds; a plain number deserializes cleanly from host config
    pub async_util_timeout_ms: Option<u64>,
    pub compute_diagnostics: Option<bool>,
    #[serde(skip)]
    pub element_error: Option<ElementErrorHook>,
}

impl fmt::Debug for ConfigDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDelta")
            .field("test_id_attribute", &self.test_id_attribute)
            .field("default_hidden", &self.default_hidden)
            .field("default_ignore", &self.default_ignore)
            .field("throw_suggestions", &self.throw_suggestions)
            .field("async_util_timeout_ms", &self.async_util_timeout_ms)
            .field("compute_diagnostics", &self.compute_diagnostics)
            .finish_non_exhaustive()
    }
}

fn global() -> &'static RwLock<Config> {
    static GLOBAL: OnceLock<RwLock<Config>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(Config::default()))
}

/// Snapshot the process-wide configuration
pub fn current() -> Config {
    global()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

/// Merge a delta into the process-wide configuration
///
/// Returns the prior snapshot; restoring it with another `configure` call
/// gives test isolation.
pub fn configure(delta: ConfigDelta) -> Config {
    let mut guard = global()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let prior = guard.clone();

    if let Some(v) = delta.test_id_attribute {
        guard.test_id_attribute = v;
    }
    if let Some(v) = delta.default_hidden {
        guard.default_hidden = v;
    }
    if let Some(v) = delta.default_ignore {
        guard.default_ignore = v;
    }
    if let Some(v) = delta.throw_suggestions {
        guard.throw_suggestions = v;
    }
    if let Some(ms) = delta.async_util_timeout_ms {
        guard.async_util_timeout = Duration::from_millis(ms);
    }
    if let Some(v) = delta.compute_diagnostics {
        guard.compute_diagnostics = v;
    }
    if let Some(v) = delta.element_error {
        guard.element_error = v;
    }

    prior
}

/// Replace the process-wide configuration wholesale
///
/// Counterpart to the snapshot returned by [`configure`].
pub fn restore(config: Config) {
    let mut guard = global()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = config;
}
