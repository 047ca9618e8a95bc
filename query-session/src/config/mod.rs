//! Backend configuration for the query session.

pub mod search_config;

pub use search_config::{
    DEFAULT_BASE_URL, DEFAULT_TOP_K, SEARCH_API_BASE_URL_VAR, SearchConfig,
};
