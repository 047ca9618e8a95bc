//! HTTP client for the retrieval service.
//!
//! Implements [`SearchBackend`] on top of a reused `reqwest::Client`:
//! - `POST {base_url}/search` with `{"query", "top_k"}`
//!
//! No retries and no timeout beyond the client's defaults unless
//! [`SearchConfig::timeout_secs`] is set.
//!
//! # Examples
//!
//! ```no_run
//! use query_session::backend::HttpSearchBackend;
//! use query_session::config::SearchConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = SearchConfig::with_base_url("http://localhost:8000")?;
//! let backend = HttpSearchBackend::new(&cfg)?;
//! let passages = backend.search_passages("중요관리점 설정 방법").await?;
//! println!("{} passages", passages.len());
//! # Ok(()) }
//! ```

use std::time::Duration;

use tracing::{debug, instrument};

use crate::backend::payload::{SearchRequest, passages_from_body};
use crate::backend::{SearchBackend, SearchFuture};
use crate::config::{SEARCH_API_BASE_URL_VAR, SearchConfig};
use crate::error_handler::{Result, SearchError, make_snippet, validate_http_endpoint};
use crate::models::ResultPassage;

/// Thin client for `POST /search`.
pub struct HttpSearchBackend {
    client: reqwest::Client,
    url_search: String,
    top_k: u32,
}

impl HttpSearchBackend {
    /// Creates a backend from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `cfg.base_url` is empty or lacks http/https
    /// - [`SearchError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: &SearchConfig) -> Result<Self> {
        let base = cfg.base_url.trim();
        validate_http_endpoint(SEARCH_API_BASE_URL_VAR, base)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(SearchError::from)?;

        Ok(Self {
            client,
            url_search: format!("{}/search", base.trim_end_matches('/')),
            top_k: cfg.top_k,
        })
    }

    /// Full URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url_search
    }

    /// Performs one search request.
    ///
    /// # Errors
    /// - [`SearchError::Transport`] for network/DNS/timeout failures
    /// - [`SearchError::HttpStatus`] for non-2xx responses
    ///
    /// Undecodable or oddly shaped 2xx bodies yield `Ok(vec![])`.
    #[instrument(skip_all, fields(url = %self.url_search, top_k = self.top_k))]
    pub async fn search_passages(
        &self,
        query: &str,
    ) -> std::result::Result<Vec<ResultPassage>, SearchError> {
        let body = SearchRequest {
            query,
            top_k: self.top_k,
        };

        debug!("POST {}", self.url_search);
        let resp = self
            .client
            .post(&self.url_search)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SearchError::HttpStatus {
                status,
                url: self.url_search.clone(),
                snippet: make_snippet(&text, 240),
            });
        }

        let bytes = resp.bytes().await?;
        let passages = passages_from_body(&bytes);
        debug!(hits = passages.len(), "search response decoded");
        Ok(passages)
    }
}

impl SearchBackend for HttpSearchBackend {
    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
        Box::pin(self.search_passages(query))
    }
}
