//! The discovery state machine.
//!
//! Lifecycle per run: `Locating` (skipped when a session fix is cached or
//! no locator exists) → `Loading` → `Success`/`Error`. Geolocation
//! failures of every kind are absorbed — the user is never blocked on a
//! missing permission. Each run carries a monotonically increasing
//! sequence number; a run whose number is no longer current when its
//! fetch resolves discards that result instead of publishing it
//! (last-request-wins), so a slow stale response can never overwrite the
//! state of a newer request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use vicinity_core::{build_query, FilterState, GeoLocation, SearchQuery, UrlSeed};
use vicinity_geo::GeoLocator;
use vicinity_search::SearchBackend;

use crate::pager::Pager;
use crate::state::{DiscoveryError, DiscoveryState, DiscoveryStatus};

struct Inner {
    filters: FilterState,
    seed: UrlSeed,
    /// One fix per session: acquired on the first run that needs it,
    /// reused until the engine is dropped or refreshed.
    session_location: Option<GeoLocation>,
    pager: Pager,
    state: DiscoveryState,
}

/// Composes locator, query builder, and fallback fetcher into one
/// observable state machine. All mutation goes through the public
/// operations; consumers only ever see [`DiscoveryState`] snapshots.
pub struct DiscoveryEngine {
    backend: Arc<dyn SearchBackend>,
    locator: Option<GeoLocator>,
    geo_timeout: Duration,
    geo_max_age: Duration,
    seq: AtomicU64,
    inner: Mutex<Inner>,
}

impl DiscoveryEngine {
    /// `locator: None` models a platform with no location capability:
    /// the `Locating` phase is skipped entirely.
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        locator: Option<GeoLocator>,
        geo_timeout: Duration,
        geo_max_age: Duration,
    ) -> Self {
        let initial = build_query(&FilterState::default(), &UrlSeed::default(), 1, None);
        Self {
            backend,
            locator,
            geo_timeout,
            geo_max_age,
            seq: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                filters: FilterState::default(),
                seed: UrlSeed::default(),
                session_location: None,
                pager: Pager::new(),
                state: DiscoveryState::idle(initial),
            }),
        }
    }

    /// Seeds filters from deep-link query parameters and runs the search.
    /// The seed is the lowest-priority source: any in-session filter edit
    /// overrides it.
    pub async fn seed_from_url(&self, seed: UrlSeed) -> DiscoveryState {
        {
            let mut inner = self.lock();
            inner.seed = seed;
            inner.pager.reset();
        }
        self.run(1).await
    }

    /// Applies a filter change. Always restarts from page 1 — the old
    /// result set's pagination is meaningless under a new query.
    pub async fn set_filters(&self, filters: FilterState) -> DiscoveryState {
        {
            let mut inner = self.lock();
            inner.filters = filters;
            inner.pager.reset();
        }
        self.run(1).await
    }

    /// Navigates to page `n` of the current result set.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::PageOutOfRange`] when `n` is outside the last
    /// successful result's range; rejected locally, no request is made.
    pub async fn go_to_page(&self, page: u32) -> Result<DiscoveryState, DiscoveryError> {
        self.lock().pager.validate(page)?;
        Ok(self.run(page).await)
    }

    /// Re-runs the last issued query unchanged, typically after a
    /// surfaced fetch error.
    pub async fn retry(&self) -> DiscoveryState {
        let seq = self.next_seq();
        let query = self.lock().state.query.clone();
        self.execute(seq, query).await
    }

    /// A read-only snapshot of the current state.
    pub fn snapshot(&self) -> DiscoveryState {
        self.lock().state.clone()
    }

    /// Full pipeline: locate if useful, build the query, fetch, publish.
    async fn run(&self, page: u32) -> DiscoveryState {
        let seq = self.next_seq();

        let (filters, seed, cached) = {
            let inner = self.lock();
            (
                inner.filters.clone(),
                inner.seed.clone(),
                inner.session_location,
            )
        };

        let location = match (cached, &self.locator) {
            (Some(fix), _) => Some(fix),
            (None, Some(locator)) => {
                if !self.publish(seq, |inner| {
                    inner.state.status = DiscoveryStatus::Locating;
                    inner.state.error = None;
                }) {
                    return self.snapshot();
                }
                match locator.acquire(self.geo_timeout, self.geo_max_age).await {
                    Ok(fix) => {
                        self.publish(seq, |inner| inner.session_location = Some(fix));
                        Some(fix)
                    }
                    Err(err) => {
                        // Absorbed: discovery proceeds location-free.
                        tracing::debug!(error = %err, "proceeding without device location");
                        None
                    }
                }
            }
            (None, None) => None,
        };

        let query = build_query(&filters, &seed, page, location);
        self.execute(seq, query).await
    }

    /// Fetches `query` and publishes the outcome, unless a newer run has
    /// started meanwhile.
    async fn execute(&self, seq: u64, query: SearchQuery) -> DiscoveryState {
        if !self.publish(seq, |inner| {
            inner.state.query = query.clone();
            inner.state.status = DiscoveryStatus::Loading;
            inner.state.error = None;
        }) {
            return self.snapshot();
        }

        let outcome = self.backend.fetch_page(&query).await;

        let applied = self.publish(seq, |inner| match &outcome {
            Ok(result) => {
                inner.pager.record(result.pagination.clone());
                inner.state.status = DiscoveryStatus::Success;
                inner.state.result = Some(result.clone());
                inner.state.error = None;
            }
            Err(err) => {
                inner.state.status = DiscoveryStatus::Error;
                inner.state.error = Some(DiscoveryError::Fetch(err.to_string()));
            }
        });
        if !applied {
            tracing::debug!(seq, "discarding stale search result");
        }
        self.snapshot()
    }

    /// Applies `apply` to the shared state only if `seq` is still the
    /// newest run. Returns whether the mutation happened.
    fn publish<F: FnOnce(&mut Inner)>(&self, seq: u64, apply: F) -> bool {
        let mut inner = self.lock();
        if self.seq.load(Ordering::SeqCst) != seq {
            return false;
        }
        apply(&mut inner);
        true
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("discovery state lock poisoned")
    }
}
