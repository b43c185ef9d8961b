//! Main entry point for the catalog.
//!
//! This module provides the [`Catalog`] struct, the primary handle for
//! all catalog operations, and its configuration builder.

use catalog_api::{Authors, Authorships, Books, Publishers};
use catalog_core::{EntityKind, Result};
use catalog_storage::{CatalogStore, StoreBuilder};
use std::path::Path;
use std::sync::Arc;

/// The catalog.
///
/// Create one with [`Catalog::open`], [`Catalog::ephemeral`], or
/// [`Catalog::builder`], then reach the per-entity collections through
/// its public fields.
///
/// # Example
///
/// ```ignore
/// use catalogdb::prelude::*;
///
/// let catalog = Catalog::ephemeral()?;
///
/// let author = catalog.authors.create(Author {
///     id: AuthorId::new(0),
///     name: Some("Brian".to_string()),
///     surname: Some("Kernighan".to_string()),
/// })?;
///
/// assert_eq!(catalog.authors.get(author.id)?, Some(author));
/// ```
pub struct Catalog {
    /// The shared store handle.
    store: Arc<CatalogStore>,

    /// Author operations.
    pub authors: Authors,

    /// Book operations.
    pub books: Books,

    /// Publisher operations.
    pub publishers: Publishers,

    /// Authorship link operations.
    pub authorships: Authorships,
}

impl Catalog {
    /// Open a journal-backed catalog in the given directory.
    ///
    /// The directory is created if needed and the commit journal inside
    /// it is replayed to rebuild the tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a catalog with no disk backing.
    ///
    /// No files are created and all data is lost on drop. Use for unit
    /// tests and throwaway catalogs.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Create a builder for catalog configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let catalog = Catalog::builder()
    ///     .path("./catalog-data")
    ///     .enforce_integrity(false)
    ///     .open()?;
    /// ```
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Force pending journal writes to disk.
    pub fn flush(&self) -> Result<()> {
        self.store.flush()
    }

    /// Gracefully close the catalog, flushing pending journal writes.
    pub fn close(&self) -> Result<()> {
        self.store.flush()
    }

    /// Store directory, or `None` for an ephemeral catalog.
    pub fn path(&self) -> Option<&Path> {
        self.store.path()
    }

    /// Check if this catalog has no disk backing.
    pub fn is_ephemeral(&self) -> bool {
        self.store.is_ephemeral()
    }

    /// Whether referential-integrity checking is enabled.
    pub fn integrity_enabled(&self) -> bool {
        self.store.integrity_enabled()
    }

    /// The shared store handle.
    ///
    /// Escape hatch for composing multi-row units of work with
    /// [`catalog_session::Session`] directly; the collections cover
    /// ordinary single-row CRUD.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    fn from_store(store: Arc<CatalogStore>) -> Self {
        Self {
            authors: Authors::new(store.clone()),
            books: Books::new(store.clone()),
            publishers: Publishers::new(store.clone()),
            authorships: Authorships::new(store.clone()),
            store,
        }
    }
}

/// Builder for catalog configuration.
pub struct CatalogBuilder {
    inner: StoreBuilder,
}

impl CatalogBuilder {
    /// Create a builder with default settings: ephemeral, integrity
    /// checking on, all four collections provisioned.
    pub fn new() -> Self {
        Self {
            inner: CatalogStore::builder(),
        }
    }

    /// Back the catalog with a commit journal in this directory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.inner = self.inner.path(path);
        self
    }

    /// Enable or disable referential-integrity checking (default on).
    ///
    /// With checking off, writes referencing missing rows are accepted
    /// and deletes never refuse on dependents; references may dangle.
    pub fn enforce_integrity(mut self, on: bool) -> Self {
        self.inner = self.inner.enforce_integrity(on);
        self
    }

    /// Provision or omit the collection for an entity kind (default:
    /// all provisioned).
    ///
    /// Operations against an omitted collection fail with
    /// [`catalog_core::Error::Unavailable`] — a configuration fault,
    /// distinct from a missing row.
    pub fn provision(mut self, kind: EntityKind, on: bool) -> Self {
        self.inner = self.inner.provision(kind, on);
        self
    }

    /// Open the catalog.
    pub fn open(self) -> Result<Catalog> {
        let store = Arc::new(self.inner.open()?);
        Ok(Catalog::from_store(store))
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
