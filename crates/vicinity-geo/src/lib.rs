//! Single-shot, cancellable geolocation acquisition.
//!
//! The platform's callback-style location capability is re-expressed as one
//! awaitable operation with a typed outcome, so callers can fold it into
//! linear async logic. Acquisition is last-call-wins: starting a new
//! acquire supersedes any still-running one, and a superseded attempt can
//! never publish its fix over a later result.

pub mod error;
pub mod locator;

pub use error::GeoError;
pub use locator::{DeniedLocationSource, FixedLocationSource, GeoLocator, LocationSource};
