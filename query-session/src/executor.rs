//! Search request executor.
//!
//! Turns one accepted submission into exactly one backend call and maps the
//! outcome onto the store:
//! - passages (including an empty or fail-open list) → `resolve_success`
//! - non-2xx status → `resolve_failure("HTTP <code>")`
//! - transport failure → `resolve_failure(<error message>)`
//!
//! Nothing is retried. A response arriving when the session is no longer
//! `Pending` is dropped by the store's guard; the call itself is never aborted.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{Instrument, info_span, instrument, warn};

use crate::backend::SearchBackend;
use crate::error_handler::SubmitRejection;
use crate::store::{Resolution, SessionStateStore};

/// Runs searches for one session against a [`SearchBackend`].
#[derive(Clone)]
pub struct SearchRequestExecutor {
    store: Arc<SessionStateStore>,
    backend: Arc<dyn SearchBackend>,
}

impl SearchRequestExecutor {
    pub fn new(store: Arc<SessionStateStore>, backend: Arc<dyn SearchBackend>) -> Self {
        Self { store, backend }
    }

    /// Applies `submit_query` synchronously, then dispatches [`Self::run`] on
    /// the tokio runtime.
    ///
    /// The returned handle resolves once the store has been updated (or the
    /// response dropped); callers are free to ignore it.
    ///
    /// # Errors
    /// - [`SubmitRejection::NoRuntime`] when called outside a tokio runtime;
    ///   the session is left untouched
    /// - the store's other [`SubmitRejection`]s; no request is issued
    pub fn submit(&self, text: &str) -> Result<JoinHandle<Resolution>, SubmitRejection> {
        // Dispatch must be possible before the store commits to `Pending`.
        let runtime = Handle::try_current().map_err(|_| SubmitRejection::NoRuntime)?;
        let submission = self.store.submit_query(text)?;

        let this = self.clone();
        let query = text.to_string();
        let span = info_span!("search_request", submission);
        Ok(runtime.spawn(
            async move { this.run(&query).await }.instrument(span),
        ))
    }

    /// Performs one backend call and resolves the store with its outcome.
    #[instrument(skip_all, fields(query_len = query.chars().count()))]
    pub async fn run(&self, query: &str) -> Resolution {
        match self.backend.search(query).await {
            Ok(passages) => self.store.resolve_success(passages),
            Err(err) => {
                warn!(error = %err, "search request failed");
                self.store.resolve_failure(err.user_message())
            }
        }
    }
}
