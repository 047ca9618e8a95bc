//! Search backend config resolved from the environment.
//!
//! # Environment variables
//! - `SEARCH_API_BASE_URL` = base URL of the retrieval service (optional,
//!   falls back to [`DEFAULT_BASE_URL`])
//!
//! Nothing else is environment-derived: `top_k` is fixed at [`DEFAULT_TOP_K`]
//! and no timeout is set beyond the HTTP client's own defaults.

use crate::error_handler::{Result, validate_http_endpoint};

/// Variable holding the retrieval service base URL.
pub const SEARCH_API_BASE_URL_VAR: &str = "SEARCH_API_BASE_URL";

/// Local fallback used when [`SEARCH_API_BASE_URL_VAR`] is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Number of passages requested per search.
pub const DEFAULT_TOP_K: u32 = 5;

/// Configuration for the outbound `/search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL without a trailing slash (e.g., `http://localhost:8000`).
    pub base_url: String,

    /// Passages requested per search (`top_k` in the request body).
    pub top_k: u32,

    /// Optional request timeout (in seconds). `None` keeps transport defaults.
    pub timeout_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            top_k: DEFAULT_TOP_K,
            timeout_secs: None,
        }
    }
}

impl SearchConfig {
    /// Builds a config for an explicit base URL.
    ///
    /// # Errors
    /// [`crate::error_handler::ConfigError::InvalidFormat`] when the URL lacks an http(s) scheme.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let raw = base_url.into();
        let trimmed = raw.trim();
        validate_http_endpoint(SEARCH_API_BASE_URL_VAR, trimmed)?;

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            ..Self::default()
        })
    }

    /// Resolves the config from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the config through an arbitrary variable lookup.
    ///
    /// Precedence:
    /// 1. `SEARCH_API_BASE_URL` if present and non-empty
    /// 2. [`DEFAULT_BASE_URL`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(SEARCH_API_BASE_URL_VAR) {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(url),
            _ => Ok(Self::default()),
        }
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}
