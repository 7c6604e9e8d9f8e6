//! HTTP client for the discovery backend plus the nearby/scoped fallback
//! chain.

pub mod client;
pub mod error;
pub mod fetch;

pub use client::SearchClient;
pub use error::SearchError;
pub use fetch::{EntityLookup, FallbackFetcher, SearchBackend};
