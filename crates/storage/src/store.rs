//! The shared catalog store handle
//!
//! [`CatalogStore`] owns the four entity tables, the global commit
//! version, the id allocators for store-generated keys, and the optional
//! commit journal. It is shared behind an `Arc` and passed explicitly
//! into sessions and collection handles; there is no ambient global
//! store.
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. Acquire commit lock
//! 2. Validate every staged op against committed state
//! 3. IF any conflict: return CommitOutcome::Conflict (nothing applied)
//! 4. Allocate commit version (increment global version)
//! 5. Append journal record and fsync (DURABILITY POINT)
//! 6. Apply writes/removes to the in-memory tables
//! 7. Release commit lock, return CommitOutcome::Committed
//! ```
//!
//! The commit lock makes validation and apply atomic with respect to
//! other commits, so first-committer-wins holds without row locks.

use crate::journal::{Journal, JournalOp, JournalRecord};
use crate::ops::{CommitOutcome, RowOp};
use crate::row::{RowData, VersionedRow};
use crate::table::Table;
use catalog_core::{
    Author, AuthorId, Authorship, Book, EntityKind, EntityRef, Error, Isbn, Publisher,
    PublisherId, Result,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

const JOURNAL_FILE: &str = "catalog.journal";

/// The persisted catalog store.
///
/// # Thread Safety
///
/// Reads are lock-free apart from per-table read locks. Commits serialize
/// on an internal lock; without it the following race could apply a
/// stale batch:
///
/// 1. T1 validates (storage at v1)
/// 2. T2 validates (storage still at v1)
/// 3. T1 applies (storage now at v2)
/// 4. T2 applies using its stale validation
pub struct CatalogStore {
    authors: Option<Table<AuthorId, Author>>,
    books: Option<Table<Isbn, Book>>,
    publishers: Option<Table<PublisherId, Publisher>>,
    authorships: Option<Table<Isbn, Authorship>>,

    /// Global commit version. Monotonically increasing; one increment per
    /// committed batch. Gaps may occur when a journal append fails after
    /// allocation; consumers must not assume contiguity.
    version: AtomicU64,

    next_author_id: AtomicI32,
    next_publisher_id: AtomicI32,

    commit_lock: Mutex<()>,
    journal: Option<Mutex<Journal>>,
    path: Option<PathBuf>,
    integrity: bool,
}

impl CatalogStore {
    /// Open a store backed by a journal in the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a store with no disk backing.
    ///
    /// No files are created and nothing survives drop. Intended for unit
    /// tests and throwaway catalogs.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// The authors table.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] when the store was opened without this
    /// table.
    pub fn authors(&self) -> Result<&Table<AuthorId, Author>> {
        self.authors.as_ref().ok_or(Error::Unavailable {
            kind: EntityKind::Author,
        })
    }

    /// The books table.
    pub fn books(&self) -> Result<&Table<Isbn, Book>> {
        self.books.as_ref().ok_or(Error::Unavailable {
            kind: EntityKind::Book,
        })
    }

    /// The publishers table.
    pub fn publishers(&self) -> Result<&Table<PublisherId, Publisher>> {
        self.publishers.as_ref().ok_or(Error::Unavailable {
            kind: EntityKind::Publisher,
        })
    }

    /// The authorships table.
    pub fn authorships(&self) -> Result<&Table<Isbn, Authorship>> {
        self.authorships.as_ref().ok_or(Error::Unavailable {
            kind: EntityKind::Authorship,
        })
    }

    /// Whether referential-integrity checking is enabled for this store.
    pub fn integrity_enabled(&self) -> bool {
        self.integrity
    }

    /// Store directory, or `None` for an ephemeral store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if this store has no disk backing.
    pub fn is_ephemeral(&self) -> bool {
        self.journal.is_none()
    }

    /// Current global commit version.
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Allocate the next author id.
    ///
    /// Allocation is atomic and never returned on failure, so a failed
    /// commit leaves a gap rather than a reused id.
    pub fn allocate_author_id(&self) -> AuthorId {
        AuthorId::new(self.next_author_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Allocate the next publisher id.
    pub fn allocate_publisher_id(&self) -> PublisherId {
        PublisherId::new(self.next_publisher_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Fresh read: does a committed row with this identifier exist?
    pub fn contains(&self, entity: &EntityRef) -> Result<bool> {
        Ok(match entity {
            EntityRef::Author(id) => self.authors()?.contains(id),
            EntityRef::Book(isbn) => self.books()?.contains(isbn),
            EntityRef::Publisher(id) => self.publishers()?.contains(id),
            EntityRef::Authorship(isbn) => self.authorships()?.contains(isbn),
        })
    }

    /// Committed version of a row, if it exists.
    pub fn version_of(&self, entity: &EntityRef) -> Result<Option<u64>> {
        Ok(match entity {
            EntityRef::Author(id) => self.authors()?.version_of(id),
            EntityRef::Book(isbn) => self.books()?.version_of(isbn),
            EntityRef::Publisher(id) => self.publishers()?.version_of(id),
            EntityRef::Authorship(isbn) => self.authorships()?.version_of(isbn),
        })
    }

    /// Commit a staged batch atomically.
    ///
    /// Either every operation is durably applied or none is. Conflicts
    /// (stale version, vanished row, taken primary key) come back as
    /// [`CommitOutcome::Conflict`] with nothing applied; only storage
    /// faults are `Err`.
    pub fn commit(&self, ops: Vec<RowOp>) -> Result<CommitOutcome> {
        let _commit_guard = self.commit_lock.lock();

        if ops.is_empty() {
            return Ok(CommitOutcome::Committed {
                version: self.current_version(),
            });
        }

        // Validation: first-committer-wins against committed state. A
        // batch addressing the same row twice is malformed and resolves
        // as a conflict on the second op.
        let mut seen: HashSet<EntityRef> = HashSet::with_capacity(ops.len());
        for op in &ops {
            let entity = op.entity_ref();
            if !seen.insert(entity) {
                return Ok(CommitOutcome::Conflict { entity });
            }
            let valid = match op {
                RowOp::Insert { .. } => !self.contains(&entity)?,
                RowOp::Update { expected, .. } | RowOp::Remove { expected, .. } => {
                    self.version_of(&entity)? == Some(*expected)
                }
            };
            if !valid {
                tracing::warn!(%entity, "commit rejected by conflict validation");
                return Ok(CommitOutcome::Conflict { entity });
            }
        }

        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let timestamp = chrono::Utc::now().timestamp_micros();

        if let Some(journal) = &self.journal {
            let record = JournalRecord::from_ops(version, timestamp, &ops);
            journal.lock().append(&record)?;
        }

        for op in &ops {
            match op {
                RowOp::Insert { row } | RowOp::Update { row, .. } => {
                    self.put_row(row, version, timestamp)?;
                }
                RowOp::Remove { entity, .. } => {
                    self.remove_row(entity)?;
                }
            }
        }

        tracing::debug!(version, ops = ops.len(), "committed batch");
        Ok(CommitOutcome::Committed { version })
    }

    /// Force journal data to disk.
    pub fn flush(&self) -> Result<()> {
        if let Some(journal) = &self.journal {
            journal.lock().sync()?;
        }
        Ok(())
    }

    fn is_provisioned(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Author => self.authors.is_some(),
            EntityKind::Book => self.books.is_some(),
            EntityKind::Publisher => self.publishers.is_some(),
            EntityKind::Authorship => self.authorships.is_some(),
        }
    }

    fn put_row(&self, row: &RowData, version: u64, updated_at: i64) -> Result<()> {
        match row {
            RowData::Author(a) => self
                .authors()?
                .put(a.id, VersionedRow::new(a.clone(), version, updated_at)),
            RowData::Book(b) => self
                .books()?
                .put(b.isbn, VersionedRow::new(b.clone(), version, updated_at)),
            RowData::Publisher(p) => self
                .publishers()?
                .put(p.id, VersionedRow::new(p.clone(), version, updated_at)),
            RowData::Authorship(l) => self
                .authorships()?
                .put(l.book_isbn, VersionedRow::new(l.clone(), version, updated_at)),
        }
        Ok(())
    }

    fn remove_row(&self, entity: &EntityRef) -> Result<()> {
        match entity {
            EntityRef::Author(id) => {
                self.authors()?.remove(id);
            }
            EntityRef::Book(isbn) => {
                self.books()?.remove(isbn);
            }
            EntityRef::Publisher(id) => {
                self.publishers()?.remove(id);
            }
            EntityRef::Authorship(isbn) => {
                self.authorships()?.remove(isbn);
            }
        }
        Ok(())
    }

    fn replay(&self, records: &[JournalRecord]) -> Result<()> {
        let mut max_version = 0;
        for record in records {
            for op in &record.ops {
                match op {
                    JournalOp::Put(row) => {
                        if self.is_provisioned(row.kind()) {
                            self.put_row(row, record.version, record.timestamp)?;
                        } else {
                            tracing::warn!(
                                kind = %row.kind(),
                                "skipping journaled row for unprovisioned table"
                            );
                        }
                    }
                    JournalOp::Remove(entity) => {
                        if self.is_provisioned(entity.kind()) {
                            self.remove_row(entity)?;
                        } else {
                            tracing::warn!(
                                kind = %entity.kind(),
                                "skipping journaled removal for unprovisioned table"
                            );
                        }
                    }
                }
            }
            max_version = max_version.max(record.version);
        }
        self.version.store(max_version, Ordering::SeqCst);

        // Restore id allocators past the highest replayed key.
        if let Some(authors) = &self.authors {
            if let Some(max) = authors.max_key() {
                self.next_author_id.store(max.get() + 1, Ordering::SeqCst);
            }
        }
        if let Some(publishers) = &self.publishers {
            if let Some(max) = publishers.max_key() {
                self.next_publisher_id.store(max.get() + 1, Ordering::SeqCst);
            }
        }

        tracing::info!(
            version = max_version,
            records = records.len(),
            "store recovered from journal"
        );
        Ok(())
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```ignore
/// let store = CatalogStore::builder()
///     .path("./catalog-data")
///     .enforce_integrity(true)
///     .open()?;
/// ```
pub struct StoreBuilder {
    path: Option<PathBuf>,
    integrity: bool,
    provision_authors: bool,
    provision_books: bool,
    provision_publishers: bool,
    provision_authorships: bool,
}

impl StoreBuilder {
    /// Create a builder with default settings: ephemeral, integrity
    /// checking on, all four tables provisioned.
    pub fn new() -> Self {
        Self {
            path: None,
            integrity: true,
            provision_authors: true,
            provision_books: true,
            provision_publishers: true,
            provision_authorships: true,
        }
    }

    /// Back the store with a journal in this directory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable referential-integrity checking (default on).
    ///
    /// With checking off, writes referencing missing rows are accepted
    /// and deletes never refuse on dependents; references may dangle.
    pub fn enforce_integrity(mut self, on: bool) -> Self {
        self.integrity = on;
        self
    }

    /// Provision or omit the table for an entity kind (default: all
    /// provisioned).
    ///
    /// Operations against an omitted table fail with
    /// [`Error::Unavailable`], modeling a store that was configured
    /// without that collection.
    pub fn provision(mut self, kind: EntityKind, on: bool) -> Self {
        match kind {
            EntityKind::Author => self.provision_authors = on,
            EntityKind::Book => self.provision_books = on,
            EntityKind::Publisher => self.provision_publishers = on,
            EntityKind::Authorship => self.provision_authorships = on,
        }
        self
    }

    /// Open the store, replaying the journal when a path is set.
    pub fn open(self) -> Result<CatalogStore> {
        let mut store = CatalogStore {
            authors: self.provision_authors.then(Table::new),
            books: self.provision_books.then(Table::new),
            publishers: self.provision_publishers.then(Table::new),
            authorships: self.provision_authorships.then(Table::new),
            version: AtomicU64::new(0),
            next_author_id: AtomicI32::new(1),
            next_publisher_id: AtomicI32::new(1),
            commit_lock: Mutex::new(()),
            journal: None,
            path: self.path,
            integrity: self.integrity,
        };

        if let Some(path) = store.path.clone() {
            std::fs::create_dir_all(&path)?;
            let (journal, records) = Journal::open(&path.join(JOURNAL_FILE))?;
            store.replay(&records)?;
            store.journal = Some(Mutex::new(journal));
        }

        Ok(store)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
