//! HTTP client for the discovery backend REST API.
//!
//! Wraps `reqwest` with typed endpoints for scoped search, nearby search,
//! and single-entity lookups. Only parameters actually present on the
//! query are written to the request, so an omitted price bound is truly
//! absent rather than sent as zero.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use vicinity_core::{LocatedEntity, Pagination, Provider, SearchQuery, SearchResult, Service};

use crate::error::SearchError;

/// Client for the discovery backend.
///
/// Holds the HTTP client and the normalized base URL. Point `base_url` at
/// a mock server in tests.
pub struct SearchClient {
    client: Client,
    base_url: Url,
}

/// Wire envelope for `GET /search/providers`.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    results: Vec<Provider>,
    pagination: Pagination,
}

impl SearchClient {
    /// Creates a new client against the given base URL, e.g.
    /// `http://localhost:3000/api/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // joined endpoint paths land under it rather than replacing the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Scoped search: keyword/category/price/org/group-aware, paginated,
    /// sortable. The primary path when no device location is available and
    /// the fallback when a nearby search fails.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] / [`SearchError::UnexpectedStatus`] on
    ///   transport or server failure.
    /// - [`SearchError::Deserialize`] if the envelope does not match.
    pub async fn search_providers(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let mut url = self.endpoint(&["search", "providers"]);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(keyword) = &query.keyword {
                pairs.append_pair("keyword", keyword);
            }
            if let Some(category_id) = &query.category_id {
                pairs.append_pair("categoryId", category_id);
            }
            if let Some(min_price) = query.min_price {
                pairs.append_pair("minPrice", &min_price.to_string());
            }
            if let Some(max_price) = query.max_price {
                pairs.append_pair("maxPrice", &max_price.to_string());
            }
            if let Some(organization_id) = &query.organization_id {
                pairs.append_pair("organizationId", organization_id);
            }
            if let Some(group_id) = &query.group_id {
                pairs.append_pair("groupId", group_id);
            }
            if let Some(lat) = query.lat {
                pairs.append_pair("lat", &lat.to_string());
            }
            if let Some(lng) = query.lng {
                pairs.append_pair("lng", &lng.to_string());
            }
            pairs.append_pair("radius", &query.radius_km.to_string());
            pairs.append_pair("sortBy", query.sort_by.as_str());
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.limit.to_string());
        }

        let envelope: SearchEnvelope = self.request_json(&url).await?;
        Ok(SearchResult {
            items: envelope
                .results
                .into_iter()
                .map(LocatedEntity::Provider)
                .collect(),
            pagination: envelope.pagination,
        })
    }

    /// Nearby providers: location-only, radius-bounded, capped at `limit`
    /// rows, unpaginated.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SearchClient::search_providers`].
    pub async fn nearby_providers(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        limit: u32,
    ) -> Result<Vec<Provider>, SearchError> {
        let url = self.nearby_url(&["search", "nearby"], lat, lng, radius_km, limit);
        self.request_json(&url).await
    }

    /// Nearby services, same shape as [`SearchClient::nearby_providers`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SearchClient::search_providers`].
    pub async fn nearby_services(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        limit: u32,
    ) -> Result<Vec<Service>, SearchError> {
        let url = self.nearby_url(&["search", "services", "nearby"], lat, lng, radius_km, limit);
        self.request_json(&url).await
    }

    /// Single provider lookup, used by favorites hydration.
    ///
    /// # Errors
    ///
    /// [`SearchError::NotFound`] when the provider no longer exists;
    /// otherwise the usual taxonomy.
    pub async fn provider_by_id(&self, id: &str) -> Result<Provider, SearchError> {
        let url = self.endpoint(&["providers", id]);
        self.request_json(&url).await
    }

    /// Single service lookup.
    ///
    /// # Errors
    ///
    /// [`SearchError::NotFound`] when the service no longer exists;
    /// otherwise the usual taxonomy.
    pub async fn service_by_id(&self, id: &str) -> Result<Service, SearchError> {
        let url = self.endpoint(&["services", id]);
        self.request_json(&url).await
    }

    /// Unfiltered service listing — the home page's fallback when nearby
    /// services cannot be fetched.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SearchClient::search_providers`].
    pub async fn list_services(&self) -> Result<Vec<Service>, SearchError> {
        let url = self.endpoint(&["services"]);
        self.request_json(&url).await
    }

    fn nearby_url(&self, segments: &[&str], lat: f64, lng: f64, radius_km: f64, limit: u32) -> Url {
        let mut url = self.endpoint(segments);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("lat", &lat.to_string());
            pairs.append_pair("lng", &lng.to_string());
            pairs.append_pair("radius", &radius_km.to_string());
            pairs.append_pair("limit", &limit.to_string());
        }
        url
    }

    /// Appends path segments to the base URL with proper encoding.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .expect("base URL validated as hierarchical in the constructor");
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET request, maps the status, and parses the body as the
    /// expected type.
    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SearchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
