//! The discovery orchestrator: filter state, geolocation folding,
//! fallback-chain fetching, and pagination, published as a single
//! observable [`DiscoveryState`].

pub mod home;
pub mod orchestrator;
pub mod pager;
pub mod state;

pub use home::{load_home, HomeRecommendations};
pub use orchestrator::DiscoveryEngine;
pub use pager::Pager;
pub use state::{DiscoveryError, DiscoveryState, DiscoveryStatus};
