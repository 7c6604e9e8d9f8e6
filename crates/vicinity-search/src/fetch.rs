//! The nearby/scoped fallback chain.
//!
//! Evaluated in order, each stage independent:
//!
//! 1. Coordinates present → nearby search at the query radius. Success is
//!    terminal, including a true zero-result answer — the user asked
//!    "near me" and got a real zero, so no cascade.
//! 2. Nearby failure → exactly one scoped search with identical
//!    non-location filters and no coordinates. Entities then carry no
//!    `distance_km`; expected, not an error.
//! 3. No coordinates from the start → scoped search directly.
//! 4. A scoped failure propagates typed — never a fake empty page.

use async_trait::async_trait;

use vicinity_core::{LocatedEntity, SearchQuery, SearchResult};

use crate::client::SearchClient;
use crate::error::SearchError;

/// Executes a [`SearchQuery`] and returns one page of results. Object
/// safe, so orchestrators can run against fakes in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchResult, SearchError>;
}

/// Resolves single entities by id. Used by favorites hydration.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn provider(&self, id: &str) -> Result<LocatedEntity, SearchError>;
    async fn service(&self, id: &str) -> Result<LocatedEntity, SearchError>;
}

/// The production [`SearchBackend`]: a [`SearchClient`] behind the
/// fallback chain.
pub struct FallbackFetcher {
    client: SearchClient,
}

impl FallbackFetcher {
    #[must_use]
    pub fn new(client: SearchClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &SearchClient {
        &self.client
    }
}

#[async_trait]
impl SearchBackend for FallbackFetcher {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
            return self.client.search_providers(query).await;
        };

        match self
            .client
            .nearby_providers(lat, lng, query.radius_km, query.limit)
            .await
        {
            Ok(providers) => {
                tracing::debug!(count = providers.len(), "nearby search succeeded");
                let items = providers.into_iter().map(LocatedEntity::Provider).collect();
                Ok(SearchResult::single_page(items, query.limit))
            }
            Err(err) => {
                // Absorbed: the scoped fallback carries every non-location
                // filter, so the user still gets an answer.
                tracing::warn!(error = %err, "nearby search failed; falling back to scoped search");
                self.client
                    .search_providers(&query.without_coordinates())
                    .await
            }
        }
    }
}

#[async_trait]
impl EntityLookup for SearchClient {
    async fn provider(&self, id: &str) -> Result<LocatedEntity, SearchError> {
        Ok(LocatedEntity::Provider(self.provider_by_id(id).await?))
    }

    async fn service(&self, id: &str) -> Result<LocatedEntity, SearchError> {
        Ok(LocatedEntity::Service(self.service_by_id(id).await?))
    }
}
