//! Local pagination bookkeeping.
//!
//! Tracks the last successful result's pagination so out-of-range page
//! requests are rejected without touching the network.

use vicinity_core::Pagination;

use crate::state::DiscoveryError;

#[derive(Debug, Default)]
pub struct Pager {
    last: Option<Pagination>,
}

impl Pager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pagination of a successful fetch.
    pub fn record(&mut self, pagination: Pagination) {
        self.last = Some(pagination);
    }

    /// Forgets the old result set; called when the query changes, since
    /// "page 7" of a previous result set means nothing for a new one.
    pub fn reset(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub fn last(&self) -> Option<&Pagination> {
        self.last.as_ref()
    }

    /// Checks `page` against the last successful result.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::PageOutOfRange`] when `page` is zero, beyond the
    /// last result's `total_pages`, or no successful result exists yet.
    pub fn validate(&self, page: u32) -> Result<(), DiscoveryError> {
        let total_pages = self.last.as_ref().map_or(0, |p| p.total_pages);
        if page >= 1 && page <= total_pages {
            Ok(())
        } else {
            Err(DiscoveryError::PageOutOfRange {
                requested: page,
                total_pages,
            })
        }
    }
}
