use thiserror::Error;

use vicinity_core::{SearchQuery, SearchResult};

/// Where the orchestrator currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStatus {
    Idle,
    /// Waiting on a device fix. Skipped when a fix is cached for the
    /// session or no location capability exists.
    Locating,
    Loading,
    Success,
    Error,
}

/// User-visible discovery failures. Geolocation problems never appear
/// here — they are absorbed before the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The scoped search (the last resort of the fallback chain) failed.
    /// Retryable: [`crate::DiscoveryEngine::retry`] re-runs the same
    /// query.
    #[error("search failed: {0}")]
    Fetch(String),

    /// A page outside the last successful result's range was requested.
    /// Rejected locally, no request is made.
    #[error("page {requested} is out of range (1..={total_pages})")]
    PageOutOfRange { requested: u32, total_pages: u32 },
}

/// The single source of truth consumers render from. Owned exclusively by
/// the orchestrator; consumers only ever receive clones.
#[derive(Debug, Clone)]
pub struct DiscoveryState {
    /// The most recently issued query.
    pub query: SearchQuery,
    pub status: DiscoveryStatus,
    pub result: Option<SearchResult>,
    pub error: Option<DiscoveryError>,
}

impl DiscoveryState {
    #[must_use]
    pub fn idle(query: SearchQuery) -> Self {
        Self {
            query,
            status: DiscoveryStatus::Idle,
            result: None,
            error: None,
        }
    }
}
