//! Existence oracle
//!
//! Answers "is there a live row with this identifier right now?" with a
//! fresh read of committed state. Its only caller is the concurrency
//! guard, which uses the answer to tell a concurrent delete (row gone,
//! surface NotFound) from an unresolved concurrent modification (row
//! live, surface a fatal conflict). It is never used to pre-validate
//! ordinary reads.

use catalog_core::{EntityRef, Result};
use catalog_storage::CatalogStore;
use std::sync::Arc;

/// Fresh-read existence checks against the committed store.
pub struct ExistenceOracle {
    store: Arc<CatalogStore>,
}

impl ExistenceOracle {
    /// Create an oracle over the given store.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Whether a live committed row with this identifier exists.
    ///
    /// # Errors
    ///
    /// [`catalog_core::Error::Unavailable`] when the entity's table is
    /// not provisioned.
    pub fn exists(&self, entity: &EntityRef) -> Result<bool> {
        self.store.contains(entity)
    }
}
