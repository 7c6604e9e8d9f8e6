//! `search` and `nearby` command handlers.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use vicinity_core::{AppConfig, FilterState, LocatedEntity, SortBy, DEFAULT_RADIUS_KM, PAGE_LIMIT};
use vicinity_discovery::{DiscoveryEngine, DiscoveryState, DiscoveryStatus};
use vicinity_geo::{FixedLocationSource, GeoLocator};
use vicinity_search::FallbackFetcher;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Free-text keyword.
    #[arg(long)]
    keyword: Option<String>,
    /// Category id to scope to.
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    organization: Option<String>,
    #[arg(long)]
    group: Option<String>,
    /// Search radius in kilometres.
    #[arg(long)]
    radius: Option<String>,
    /// Result ordering: relevance, distance, or rating.
    #[arg(long)]
    sort: Option<String>,
    /// Result page to navigate to after the initial fetch.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Override the configured device latitude.
    #[arg(long)]
    lat: Option<f64>,
    /// Override the configured device longitude.
    #[arg(long)]
    lng: Option<f64>,
}

#[derive(Debug, Args)]
pub(crate) struct NearbyArgs {
    #[arg(long)]
    lat: Option<f64>,
    #[arg(long)]
    lng: Option<f64>,
    /// Search radius in kilometres.
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,
    #[arg(long, default_value_t = PAGE_LIMIT)]
    limit: u32,
    /// Look up nearby services instead of providers.
    #[arg(long)]
    services: bool,
}

pub(crate) async fn run(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    let backend = Arc::new(FallbackFetcher::new(client));

    let lat = args.lat.or(config.fixed_lat);
    let lng = args.lng.or(config.fixed_lng);
    let locator = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoLocator::new(Arc::new(FixedLocationSource::new(
            lat, lng,
        )))),
        _ => None,
    };

    let engine = DiscoveryEngine::new(
        backend,
        locator,
        Duration::from_millis(config.geo_timeout_ms),
        Duration::from_millis(config.geo_max_age_ms),
    );

    let filters = FilterState {
        keyword: args.keyword,
        category_id: args.category,
        min_price: args.min_price,
        max_price: args.max_price,
        organization_id: args.organization,
        group_id: args.group,
        radius_km: args.radius,
        sort_by: args.sort.as_deref().map(parse_sort).transpose()?,
    };

    let mut state = engine.set_filters(filters).await;
    if args.page > 1 && state.status == DiscoveryStatus::Success {
        state = engine.go_to_page(args.page).await?;
    }
    render(&state)
}

pub(crate) async fn run_nearby(config: &AppConfig, args: NearbyArgs) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    let (lat, lng) = match (
        args.lat.or(config.fixed_lat),
        args.lng.or(config.fixed_lng),
    ) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => anyhow::bail!("nearby requires --lat/--lng or VICINITY_LAT/VICINITY_LNG"),
    };

    if args.services {
        let services = client
            .nearby_services(lat, lng, args.radius, args.limit)
            .await?;
        if services.is_empty() {
            println!("no services within {} km", args.radius);
        }
        for service in services {
            match service.distance_km {
                Some(d) => println!("{}  {}  ({d:.1} km)", service.id, service.title),
                None => println!("{}  {}", service.id, service.title),
            }
        }
    } else {
        let providers = client
            .nearby_providers(lat, lng, args.radius, args.limit)
            .await?;
        if providers.is_empty() {
            println!("no providers within {} km", args.radius);
        }
        for provider in providers {
            match provider.distance_km {
                Some(d) => println!("{}  {}  ({d:.1} km)", provider.id, provider.name),
                None => println!("{}  {}", provider.id, provider.name),
            }
        }
    }
    Ok(())
}

fn parse_sort(raw: &str) -> anyhow::Result<SortBy> {
    match raw {
        "relevance" => Ok(SortBy::Relevance),
        "distance" => Ok(SortBy::Distance),
        "rating" => Ok(SortBy::Rating),
        other => anyhow::bail!("unknown sort order '{other}' (expected relevance, distance, or rating)"),
    }
}

fn render(state: &DiscoveryState) -> anyhow::Result<()> {
    if state.status == DiscoveryStatus::Error {
        let message = state
            .error
            .as_ref()
            .map_or_else(|| "unknown error".to_owned(), ToString::to_string);
        anyhow::bail!(message);
    }

    let Some(result) = &state.result else {
        println!("no result");
        return Ok(());
    };

    if result.is_empty() {
        println!("no matches");
    }
    for item in &result.items {
        let mut line = format!("{}  {}", item.id(), item.display_name());
        if let LocatedEntity::Provider(provider) = item {
            if provider.rating_count > 0 {
                let _ = write!(
                    line,
                    "  rating {:.1} ({})",
                    provider.rating_average, provider.rating_count
                );
            }
        }
        if let Some(d) = item.distance_km() {
            let _ = write!(line, "  ({d:.1} km)");
        }
        println!("{line}");
    }
    let pagination = &result.pagination;
    println!(
        "page {} of {} ({} total)",
        pagination.page, pagination.total_pages, pagination.total
    );
    Ok(())
}
