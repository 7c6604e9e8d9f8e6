use thiserror::Error;

/// Outcome of a failed location acquisition. All variants are non-fatal to
/// discovery: the caller decides whether to fall back to a location-free
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    /// The user declined the location permission prompt.
    #[error("location permission denied")]
    Denied,

    /// No location capability on this platform, or it failed outright.
    #[error("location capability unavailable")]
    Unavailable,

    /// The capability did not produce a fix within the caller's deadline.
    #[error("location acquisition timed out")]
    Timeout,

    /// A newer acquisition started before this one resolved; its result
    /// was discarded without being published.
    #[error("location acquisition superseded by a newer request")]
    Superseded,
}
