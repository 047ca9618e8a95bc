//! One query session: a store plus the executor that resolves it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::backend::{HttpSearchBackend, SearchBackend};
use crate::config::SearchConfig;
use crate::error_handler::{RatingError, Result, SubmitRejection};
use crate::executor::SearchRequestExecutor;
use crate::models::{ActiveTab, SessionSnapshot};
use crate::store::{Resolution, SessionStateStore, SessionWatcher};

/// Action surface and snapshot access for a single panel instance.
///
/// Sessions share nothing; create one per panel.
pub struct QuerySession {
    store: Arc<SessionStateStore>,
    executor: SearchRequestExecutor,
}

impl QuerySession {
    /// Creates a session over an arbitrary backend.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let store = Arc::new(SessionStateStore::new());
        let executor = SearchRequestExecutor::new(store.clone(), backend);
        Self { store, executor }
    }

    /// Creates a session that talks HTTP to `cfg.base_url`.
    pub fn from_config(cfg: &SearchConfig) -> Result<Self> {
        let backend = HttpSearchBackend::new(cfg)?;
        info!(url = %backend.url(), top_k = cfg.top_k, "query session ready");
        Ok(Self::new(Arc::new(backend)))
    }

    /// Creates an HTTP session from `SEARCH_API_BASE_URL` (or the local default).
    pub fn from_env() -> Result<Self> {
        Self::from_config(&SearchConfig::from_env()?)
    }

    /// Submits a query; see [`SearchRequestExecutor::submit`].
    pub fn submit(&self, text: &str) -> std::result::Result<JoinHandle<Resolution>, SubmitRejection> {
        self.executor.submit(text)
    }

    pub fn adjust_rating(&self, stars: u8) -> std::result::Result<(), RatingError> {
        self.store.adjust_rating(stars)
    }

    pub fn mark_helpful(&self) -> u32 {
        self.store.mark_helpful()
    }

    pub fn mark_needs_work(&self) -> u32 {
        self.store.mark_needs_work()
    }

    pub fn set_active_tab(&self, tab: ActiveTab) {
        self.store.set_active_tab(tab)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> SessionWatcher {
        self.store.subscribe()
    }

    /// Underlying store, for read access and tests.
    pub fn store(&self) -> &Arc<SessionStateStore> {
        &self.store
    }
}
