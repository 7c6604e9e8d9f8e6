use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vicinity_core::GeoLocation;

use crate::error::GeoError;

/// A platform location capability, abstracted so the locator works the
/// same against a browser-style API, fixed deployment coordinates, or a
/// test fake.
#[async_trait::async_trait]
pub trait LocationSource: Send + Sync {
    /// Produce the device's current position. `max_age` permits a cached
    /// fix no older than the given duration.
    async fn current_position(&self, max_age: Duration) -> Result<GeoLocation, GeoError>;
}

/// A source pinned to fixed coordinates (CLI deployments, kiosks).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationSource {
    location: GeoLocation,
}

impl FixedLocationSource {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            location: GeoLocation {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait::async_trait]
impl LocationSource for FixedLocationSource {
    async fn current_position(&self, _max_age: Duration) -> Result<GeoLocation, GeoError> {
        Ok(self.location)
    }
}

/// A source that always reports denial — stands in for a platform where
/// the user has revoked location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationSource;

#[async_trait::async_trait]
impl LocationSource for DeniedLocationSource {
    async fn current_position(&self, _max_age: Duration) -> Result<GeoLocation, GeoError> {
        Err(GeoError::Denied)
    }
}

/// Single-shot, timed, last-call-wins location acquisition.
///
/// Each [`GeoLocator::acquire`] call is tagged with a monotonically
/// increasing sequence number. When an attempt resolves it checks whether
/// it is still the newest: a stale attempt returns
/// [`GeoError::Superseded`] and never publishes its fix, so a slow old
/// request cannot overwrite a newer result. No retries are performed —
/// fallback policy belongs to the caller.
pub struct GeoLocator {
    source: Arc<dyn LocationSource>,
    seq: AtomicU64,
    last_fix: Mutex<Option<GeoLocation>>,
}

impl GeoLocator {
    pub fn new(source: Arc<dyn LocationSource>) -> Self {
        Self {
            source,
            seq: AtomicU64::new(0),
            last_fix: Mutex::new(None),
        }
    }

    /// Acquire the current position, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Timeout`] if no fix arrives within `timeout`.
    /// - [`GeoError::Superseded`] if a newer acquire started meanwhile.
    /// - [`GeoError::Denied`] / [`GeoError::Unavailable`] passed through
    ///   from the source.
    pub async fn acquire(
        &self,
        timeout: Duration,
        max_age: Duration,
    ) -> Result<GeoLocation, GeoError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = tokio::time::timeout(timeout, self.source.current_position(max_age)).await;
        let result = match outcome {
            Ok(inner) => inner,
            Err(_) => Err(GeoError::Timeout),
        };

        // Only the newest in-flight attempt may publish.
        if self.seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "discarding superseded location result");
            return Err(GeoError::Superseded);
        }

        match result {
            Ok(fix) => {
                *self.last_fix.lock().expect("last_fix lock poisoned") = Some(fix);
                Ok(fix)
            }
            Err(err) => {
                tracing::debug!(seq, error = %err, "location acquisition failed");
                Err(err)
            }
        }
    }

    /// The most recent successfully published fix, if any. Used for
    /// session caching so the orchestrator can skip re-locating.
    #[must_use]
    pub fn last_fix(&self) -> Option<GeoLocation> {
        *self.last_fix.lock().expect("last_fix lock poisoned")
    }
}
