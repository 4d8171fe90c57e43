//! Async re-query primitive
//!
//! `wait_for` probes a condition against a shared document, then re-probes
//! whenever the DOM mutates, with an interval timer as a backstop for
//! changes the watcher cannot see (the probe reading external state, say).
//! The watcher is registered before the first probe so a mutation racing
//! the probe is never lost.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lupa_dom::Document;

use crate::config::Config;
use crate::error::QueryError;

/// A document shared between test code and the task mutating it
pub type SharedDocument = Arc<Mutex<Document>>;

/// Wrap a document for use with `wait_for` and the `find_*` queries
pub fn shared(doc: Document) -> SharedDocument {
    Arc::new(Mutex::new(doc))
}

/// Lock a shared document, recovering from a poisoned lock
///
/// A panicking probe must not wedge every later query in the process.
pub fn lock(doc: &SharedDocument) -> MutexGuard<'_, Document> {
    doc.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Options for `wait_for` and the `find_*` query family
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Overall deadline; `None` defers to `Config::async_util_timeout`
    pub timeout: Option<Duration>,
    /// Backstop re-probe interval
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            interval: Duration::from_millis(50),
        }
    }
}

/// Run `probe` until it succeeds or the deadline elapses
///
/// On timeout the rejection is the error from the last probe run, so the
/// caller sees the same diagnostic a synchronous query would have produced.
pub async fn wait_for<T>(
    doc: &SharedDocument,
    mut probe: impl FnMut(&Document) -> Result<T, QueryError>,
    opts: &WaitOptions,
    cfg: &Config,
) -> Result<T, QueryError> {
    let timeout = opts.timeout.unwrap_or(cfg.async_util_timeout);
    // zero interval would spin; clamp to the timer's useful resolution
    let interval = opts.interval.max(Duration::from_millis(1));
    let deadline = Instant::now() + timeout;

    let watcher = lock(doc).watch();

    let mut last: Option<QueryError> = None;
    loop {
        {
            let guard = lock(doc);
            match probe(&guard) {
                Ok(value) => return Ok(value),
                Err(err) => last = Some(err),
            }
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        let sleep = interval.min(deadline - now);
        let tick = async {
            smol::Timer::after(sleep).await;
        };
        smol::future::or(watcher.changed(), tick).await;
    }

    tracing::debug!(?timeout, "wait_for deadline elapsed");
    Err(last.unwrap_or_else(|| QueryError::Timeout("Timed out in wait_for.".to_string())))
}
