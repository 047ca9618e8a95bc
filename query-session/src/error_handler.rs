//! Unified error handling for `query-session`.
//!
//! This module exposes a single top-level error type [`QuerySessionError`] for the
//! whole library, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`SearchError`], [`SubmitRejection`], [`RatingError`]).
//! Small helpers for resolving/validating configuration values are provided and
//! return the unified [`Result<T>`] alias.
//!
//! Log-facing messages carry the tag `[Query Session]` to simplify attribution.
//! The text stored in a failed session comes from [`SearchError::user_message`]
//! instead, so the tag never reaches the panel.

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when a transport error renders to an empty message.
pub const GENERIC_SEARCH_FAILURE: &str = "An error occurred while searching.";

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, QuerySessionError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `query-session` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum QuerySessionError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Retrieval backend errors.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// A submission the store refused to start.
    #[error(transparent)]
    Submit(#[from] SubmitRejection),

    /// A rating click outside the star scale.
    #[error(transparent)]
    Rating(#[from] RatingError),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors that realistically happen while resolving [`crate::config::SearchConfig`].
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Query Session] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `SEARCH_API_BASE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Search errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors produced while talking to the retrieval backend.
///
/// Malformed success payloads are deliberately absent: they degrade to an
/// empty result list rather than an error.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network/DNS/timeout failure, or a client that could not be built.
    #[error("[Query Session] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[Query Session] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },
}

impl SearchError {
    /// Message recorded in the session when a search fails.
    ///
    /// - transport errors: the underlying message, or [`GENERIC_SEARCH_FAILURE`]
    /// - HTTP errors: `HTTP <code>`
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Transport(err) => non_empty_or_generic(err.to_string()),
            SearchError::HttpStatus { status, .. } => format!("HTTP {}", status.as_u16()),
        }
    }
}

fn non_empty_or_generic(msg: String) -> String {
    if msg.trim().is_empty() {
        GENERIC_SEARCH_FAILURE.to_string()
    } else {
        msg
    }
}

/* ------------------------------------------------------------------------- */
/* Session action errors                                                     */
/* ------------------------------------------------------------------------- */

/// Reasons a submission never reaches `Pending`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Empty or whitespace-only query.
    #[error("[Query Session] query must not be blank")]
    BlankQuery,

    /// Another request from this session is still in flight.
    #[error("[Query Session] a search is already in progress")]
    RequestInFlight,

    /// No tokio runtime to dispatch the request on.
    #[error("[Query Session] no async runtime available to run the search")]
    NoRuntime,
}

/// Invalid star rating input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// Stars outside `1..=5`.
    #[error("[Query Session] rating {0} is out of range: expected 1..=5 stars")]
    OutOfRange(u8),
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`QuerySessionError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Builds a short, single-line snippet from a response body.
pub fn make_snippet(body: &str, max_chars: usize) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    flat.chars().take(max_chars).collect()
}
