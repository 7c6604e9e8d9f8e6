pub mod app_config;
pub mod config;
pub mod entity;
pub mod query;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use entity::{Category, GeoLocation, LocatedEntity, PriceType, Provider, Service};
pub use query::{
    build_query, FilterState, Pagination, SearchQuery, SearchResult, SortBy, UrlSeed,
    DEFAULT_RADIUS_KM, PAGE_LIMIT,
};
