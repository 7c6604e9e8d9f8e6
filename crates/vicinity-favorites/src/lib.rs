//! Locally persisted favorites working set.
//!
//! A small ordered id set behind a [`KeyValueStore`] seam, reconciled
//! against live backend data on hydration. Individual lookup failures are
//! tolerated and pruned, so one dead favorite never hides the rest.

pub mod kv;
pub mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{FavoritesError, FavoritesStore, FAVORITES_KEY};
