//! Search query construction and result pagination.
//!
//! [`build_query`] is the single place filter state becomes a backend
//! query. It parses numeric inputs defensively — an empty or garbled price
//! box is omitted, never coerced to 0, which would silently constrain
//! results to free listings — and it layers sources by priority: explicit
//! in-session filter edits beat deep-link URL parameters.

use serde::{Deserialize, Serialize};

use crate::entity::{GeoLocation, LocatedEntity};

/// Search radius default and bounds, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 100.0;

/// Fixed page size for scoped searches.
pub const PAGE_LIMIT: u32 = 12;

/// Result ordering for scoped searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Distance,
    Rating,
}

impl SortBy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Distance => "distance",
            SortBy::Rating => "rating",
        }
    }
}

/// Raw, user-facing filter edits, exactly as entered.
///
/// Numeric fields stay strings here; parsing happens in [`build_query`] so
/// a half-typed value never poisons the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub keyword: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub organization_id: Option<String>,
    pub group_id: Option<String>,
    pub radius_km: Option<String>,
    pub sort_by: Option<SortBy>,
}

/// Deep-link query parameters: the lowest-priority filter source, so a
/// shared `/search?keyword=plumber&radius=25` link pre-fills the view but
/// any in-session edit wins thereafter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlSeed {
    pub keyword: Option<String>,
    pub category_id: Option<String>,
    pub organization_id: Option<String>,
    pub group_id: Option<String>,
    pub radius: Option<String>,
}

/// A normalized backend search query. Built fresh per request and never
/// mutated once handed to the fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub organization_id: Option<String>,
    pub group_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: f64,
    pub sort_by: SortBy,
    pub page: u32,
    pub limit: u32,
}

impl SearchQuery {
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }

    /// The same query with coordinates stripped, for the scoped-search
    /// fallback after a failed nearby request.
    #[must_use]
    pub fn without_coordinates(&self) -> SearchQuery {
        SearchQuery {
            lat: None,
            lng: None,
            ..self.clone()
        }
    }

    /// The same query pointed at a different page. Radius and sort are
    /// untouched: paging must never reshape the result set.
    #[must_use]
    pub fn with_page(&self, page: u32) -> SearchQuery {
        SearchQuery {
            page: page.max(1),
            ..self.clone()
        }
    }
}

/// Builds a [`SearchQuery`] from filter edits, URL seed, page, and an
/// optionally acquired device location. Pure.
#[must_use]
pub fn build_query(
    filters: &FilterState,
    seed: &UrlSeed,
    page: u32,
    location: Option<GeoLocation>,
) -> SearchQuery {
    let keyword = pick_text(filters.keyword.as_deref(), seed.keyword.as_deref());
    let category_id = pick_text(filters.category_id.as_deref(), seed.category_id.as_deref());
    let organization_id = pick_text(
        filters.organization_id.as_deref(),
        seed.organization_id.as_deref(),
    );
    let group_id = pick_text(filters.group_id.as_deref(), seed.group_id.as_deref());

    let min_price = filters.min_price.as_deref().and_then(parse_positive);
    let max_price = filters.max_price.as_deref().and_then(parse_positive);

    let radius_km = filters
        .radius_km
        .as_deref()
        .and_then(parse_positive)
        .or_else(|| seed.radius.as_deref().and_then(parse_positive))
        .unwrap_or(DEFAULT_RADIUS_KM)
        .clamp(MIN_RADIUS_KM, MAX_RADIUS_KM);

    SearchQuery {
        keyword,
        category_id,
        min_price,
        max_price,
        organization_id,
        group_id,
        lat: location.map(|l| l.latitude),
        lng: location.map(|l| l.longitude),
        radius_km,
        sort_by: filters.sort_by.unwrap_or_default(),
        page: page.max(1),
        limit: PAGE_LIMIT,
    }
}

/// First non-empty trimmed value wins.
fn pick_text(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    non_empty(primary).or_else(|| non_empty(fallback))
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Parses a strictly positive finite number; anything else is omitted.
fn parse_positive(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Pagination metadata returned with every scoped search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_more: bool,
}

/// A page of discovered entities plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<LocatedEntity>,
    pub pagination: Pagination,
}

impl SearchResult {
    /// Reshapes an unpaginated nearby-search response into a synthetic
    /// single page: nearby search has no upstream pagination, so the whole
    /// response is page 1 of 1 with nothing more to fetch.
    #[must_use]
    pub fn single_page(items: Vec<LocatedEntity>, limit: u32) -> SearchResult {
        let total = items.len() as u64;
        SearchResult {
            items,
            pagination: Pagination {
                page: 1,
                limit,
                total,
                total_pages: 1,
                has_more: false,
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
