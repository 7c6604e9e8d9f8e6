//! Home-page recommendation loader.
//!
//! Two independent sections, each with its own nearby-first policy and
//! location-free fallback. A section that fails end to end degrades to
//! empty rather than failing the whole page.

use vicinity_core::{
    FilterState, GeoLocation, LocatedEntity, Provider, Service, SortBy, UrlSeed,
};
use vicinity_search::SearchClient;

/// Rows shown per home section.
const SECTION_LIMIT: u32 = 10;

#[derive(Debug, Default)]
pub struct HomeRecommendations {
    /// "Popular in your area": nearby services, or a general slice when
    /// location-free.
    pub popular_services: Vec<Service>,
    /// "Recommended for you": nearby providers, or a general search page
    /// when location-free.
    pub recommended_providers: Vec<Provider>,
}

/// Loads both home sections. Never fails: each section independently
/// degrades through its fallback to an empty list.
pub async fn load_home(client: &SearchClient, location: Option<GeoLocation>) -> HomeRecommendations {
    HomeRecommendations {
        popular_services: popular_services(client, location).await,
        recommended_providers: recommended_providers(client, location).await,
    }
}

async fn popular_services(client: &SearchClient, location: Option<GeoLocation>) -> Vec<Service> {
    if let Some(here) = location {
        match client
            .nearby_services(here.latitude, here.longitude, 10.0, SECTION_LIMIT)
            .await
        {
            Ok(services) => return services,
            Err(err) => {
                tracing::warn!(error = %err, "nearby services failed; falling back to listing");
            }
        }
    }

    match client.list_services().await {
        Ok(mut services) => {
            services.truncate(SECTION_LIMIT as usize);
            services
        }
        Err(err) => {
            tracing::warn!(error = %err, "service listing failed; section degrades to empty");
            Vec::new()
        }
    }
}

async fn recommended_providers(
    client: &SearchClient,
    location: Option<GeoLocation>,
) -> Vec<Provider> {
    if let Some(here) = location {
        match client
            .nearby_providers(here.latitude, here.longitude, 10.0, SECTION_LIMIT)
            .await
        {
            Ok(providers) => return providers,
            Err(err) => {
                tracing::warn!(error = %err, "nearby providers failed; falling back to search");
            }
        }
    }

    let mut query = vicinity_core::build_query(
        &FilterState {
            sort_by: Some(SortBy::Rating),
            ..FilterState::default()
        },
        &UrlSeed::default(),
        1,
        None,
    );
    query.limit = SECTION_LIMIT;

    match client.search_providers(&query).await {
        Ok(result) => result
            .items
            .into_iter()
            .filter_map(|entity| match entity {
                LocatedEntity::Provider(provider) => Some(provider),
                LocatedEntity::Service(_) => None,
            })
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, "provider search failed; section degrades to empty");
            Vec::new()
        }
    }
}
