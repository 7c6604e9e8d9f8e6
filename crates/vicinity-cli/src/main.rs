use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vicinity_core::{AppConfig, GeoLocation};
use vicinity_search::SearchClient;

mod favorites;
mod home;
mod search;

#[derive(Debug, Parser)]
#[command(name = "vicinity")]
#[command(about = "Local services discovery from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search providers with filters and pagination.
    Search(search::SearchArgs),
    /// Raw nearby lookup around a coordinate.
    Nearby(search::NearbyArgs),
    /// Load the home-page recommendation sections.
    Home,
    /// Manage the locally persisted favorites set.
    Favorites {
        #[command(subcommand)]
        command: favorites::FavoritesCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vicinity_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => search::run(&config, args).await,
        Commands::Nearby(args) => search::run_nearby(&config, args).await,
        Commands::Home => home::run(&config).await,
        Commands::Favorites { command } => favorites::run(&config, command).await,
    }
}

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<SearchClient> {
    Ok(SearchClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?)
}

/// The deployment's fixed coordinates, when both axes are configured.
pub(crate) fn fixed_location(config: &AppConfig) -> Option<GeoLocation> {
    match (config.fixed_lat, config.fixed_lng) {
        (Some(latitude), Some(longitude)) => Some(GeoLocation {
            latitude,
            longitude,
        }),
        _ => None,
    }
}
