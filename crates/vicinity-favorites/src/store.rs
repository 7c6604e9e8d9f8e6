//! The favorites store: an ordered, duplicate-free id set with
//! self-healing hydration.

use std::sync::Arc;

use thiserror::Error;

use vicinity_core::LocatedEntity;
use vicinity_search::EntityLookup;

use crate::kv::{KeyValueStore, StorageError};

/// Storage key for the persisted favorites id array.
pub const FAVORITES_KEY: &str = "app_favorites";

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Locally persisted set of favorite provider ids.
///
/// Insertion order is preserved across reloads; `add`/`remove` are
/// idempotent and persist before returning. Hydration resolves each id
/// against the backend concurrently and silently prunes ids that no
/// longer resolve, so the stored set converges on live data over time.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// The persisted id set, in insertion order.
    ///
    /// Corrupt stored JSON is treated as an empty set rather than an
    /// error; the next write replaces it with well-formed data.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Storage`] if the backing store cannot be
    /// read.
    pub fn list(&self) -> Result<Vec<String>, FavoritesError> {
        let Some(raw) = self.storage.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                tracing::warn!(error = %err, "corrupt favorites entry; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Adds an id; a no-op when already present.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Storage`] if persistence fails.
    pub fn add(&self, id: &str) -> Result<(), FavoritesError> {
        let mut ids = self.list()?;
        if ids.iter().any(|existing| existing == id) {
            return Ok(());
        }
        ids.push(id.to_owned());
        self.persist(&ids)
    }

    /// Removes an id; a no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Storage`] if persistence fails.
    pub fn remove(&self, id: &str) -> Result<(), FavoritesError> {
        let ids = self.list()?;
        let remaining: Vec<String> = ids.iter().filter(|x| *x != id).cloned().collect();
        if remaining.len() == ids.len() {
            return Ok(());
        }
        self.persist(&remaining)
    }

    /// Empties the set, persisting an empty array rather than deleting the
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Storage`] if persistence fails.
    pub fn clear(&self) -> Result<(), FavoritesError> {
        self.persist(&[])
    }

    /// Resolves the persisted ids to live entities.
    ///
    /// All lookups run concurrently. Ids that fail to resolve — typically
    /// entities deleted server-side — are dropped from the returned list
    /// and pruned from storage, so the stored set self-heals.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Storage`] only for storage failures;
    /// per-id lookup failures are absorbed by design.
    pub async fn hydrate(
        &self,
        lookup: &dyn EntityLookup,
    ) -> Result<Vec<LocatedEntity>, FavoritesError> {
        let ids = self.list()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let lookups = ids.iter().map(|id| lookup.provider(id));
        let outcomes = futures::future::join_all(lookups).await;

        let mut resolved = Vec::with_capacity(ids.len());
        let mut surviving = Vec::with_capacity(ids.len());
        for (id, outcome) in ids.iter().zip(outcomes) {
            match outcome {
                Ok(entity) => {
                    surviving.push(id.clone());
                    resolved.push(entity);
                }
                Err(err) => {
                    tracing::debug!(id, error = %err, "pruning unresolvable favorite");
                }
            }
        }

        if surviving.len() != ids.len() {
            self.persist(&surviving)?;
        }
        Ok(resolved)
    }

    fn persist(&self, ids: &[String]) -> Result<(), FavoritesError> {
        let raw = serde_json::to_string(ids).expect("string vec serializes");
        self.storage.set(FAVORITES_KEY, &raw)?;
        Ok(())
    }
}
