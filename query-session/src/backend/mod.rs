//! Retrieval backend seam.
//!
//! The executor talks to the search service only through [`SearchBackend`], so
//! the HTTP client can be swapped for an in-memory backend in tests or embedders.

use std::{future::Future, pin::Pin};

use crate::error_handler::SearchError;
use crate::models::ResultPassage;

pub mod http_backend;
pub mod payload;

pub use http_backend::HttpSearchBackend;

/// Boxed future returned by [`SearchBackend::search`].
pub type SearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<ResultPassage>, SearchError>> + Send + 'a>>;

/// Asynchronous retrieval backend: accepts a query, returns ranked passages.
pub trait SearchBackend: Send + Sync {
    /// Runs one search. Implementations perform exactly one outbound call and
    /// never retry.
    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a>;
}
