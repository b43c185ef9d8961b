//! Book operations

use crate::expand::BookExpanded;
use crate::guard::commit_guarded;
use crate::policy;
use crate::validate;
use catalog_core::{Book, EntityKind, EntityRef, Error, Isbn, Result, ValidationError};
use catalog_session::{CommitOutcome, Session};
use catalog_storage::CatalogStore;
use std::sync::Arc;

/// CRUD operations over book rows.
///
/// Access via `catalog.books`. The ISBN is caller-supplied at create and
/// immutable afterwards; the store never generates one.
pub struct Books {
    store: Arc<CatalogStore>,
}

impl Books {
    /// Create a handle over the given store.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// All books in ISBN order.
    pub fn list(&self) -> Result<Vec<Book>> {
        Ok(self.store.books()?.list())
    }

    /// All books, each with its publisher and authorship link resolved.
    ///
    /// A dangling `publisher_id` expands to `None`.
    pub fn list_expanded(&self) -> Result<Vec<BookExpanded>> {
        let publishers = self.store.publishers()?;
        let authorships = self.store.authorships()?;
        Ok(self
            .store
            .books()?
            .list()
            .into_iter()
            .map(|book| {
                let publisher = book.publisher_id.and_then(|id| publishers.get(&id));
                let authorship = authorships.get(&book.isbn);
                BookExpanded {
                    book,
                    publisher,
                    authorship,
                }
            })
            .collect())
    }

    /// Look up one book. `Ok(None)` when no row matches.
    pub fn get(&self, isbn: Isbn) -> Result<Option<Book>> {
        Ok(self.store.books()?.get(&isbn))
    }

    /// Look up one book with its publisher and authorship link.
    pub fn get_expanded(&self, isbn: Isbn) -> Result<Option<BookExpanded>> {
        let Some(book) = self.store.books()?.get(&isbn) else {
            return Ok(None);
        };
        let publishers = self.store.publishers()?;
        let publisher = book.publisher_id.and_then(|id| publishers.get(&id));
        let authorship = self.store.authorships()?.get(&isbn);
        Ok(Some(BookExpanded {
            book,
            publisher,
            authorship,
        }))
    }

    /// Create a book under its caller-supplied ISBN.
    pub fn create(&self, payload: Book) -> Result<Book> {
        let mut report = ValidationError::new();
        self.validate_fields(&mut report, &payload)?;
        if self.store.books()?.contains(&payload.isbn) {
            validate::duplicate_key(&mut report, "isbn", payload.entity_ref());
        }
        report.into_result()?;

        let entity = payload.entity_ref();
        let mut session = Session::new(self.store.clone());
        session.stage_insert(payload.clone().into());
        match session.commit()? {
            CommitOutcome::Committed { .. } => {
                tracing::debug!(isbn = %payload.isbn, "created book");
                Ok(payload)
            }
            // Lost a create race for the same ISBN; same outcome as the
            // pre-checked duplicate.
            CommitOutcome::Conflict { .. } => {
                let mut report = ValidationError::new();
                validate::duplicate_key(&mut report, "isbn", entity);
                Err(Error::Validation(report))
            }
        }
    }

    /// Replace a book row. The ISBN is immutable: a payload carrying a
    /// different ISBN is an identifier mismatch.
    pub fn update(&self, isbn: Isbn, payload: Book) -> Result<()> {
        if payload.isbn != isbn {
            return Err(Error::IdentifierMismatch {
                expected: EntityRef::Book(isbn),
                supplied: payload.entity_ref(),
            });
        }

        let mut report = ValidationError::new();
        self.validate_fields(&mut report, &payload)?;
        report.into_result()?;

        let current = self
            .store
            .books()?
            .get_versioned(&isbn)
            .ok_or(Error::NotFound {
                entity: EntityRef::Book(isbn),
            })?;

        let mut session = Session::new(self.store.clone());
        session.stage_update(current.version, payload.into());
        commit_guarded(&self.store, session, EntityRef::Book(isbn)).map(|_| ())
    }

    /// Delete a book. A missing row is an Ok no-op.
    ///
    /// Refused while an authorship row is keyed by this ISBN and
    /// integrity checking is on.
    pub fn delete(&self, isbn: Isbn) -> Result<()> {
        let Some(current) = self.store.books()?.get_versioned(&isbn) else {
            return Ok(());
        };
        let entity = EntityRef::Book(isbn);
        policy::check_delete_policies(&self.store, &entity)?;

        let mut session = Session::new(self.store.clone());
        session.stage_remove(entity, current.version);
        commit_guarded(&self.store, session, entity).map(|_| ())
    }

    fn validate_fields(&self, report: &mut ValidationError, payload: &Book) -> Result<()> {
        validate::check_text(report, EntityKind::Book, "title", payload.title.as_deref());
        validate::check_text(
            report,
            EntityKind::Book,
            "page_count",
            payload.page_count.as_deref(),
        );
        if let Some(publisher_id) = payload.publisher_id {
            validate::check_reference(
                report,
                &self.store,
                "publisher_id",
                EntityRef::Publisher(publisher_id),
            )?;
        }
        Ok(())
    }
}
