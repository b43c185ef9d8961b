//! Authorship operations
//!
//! The link between a book and its author, keyed by the book's own ISBN.
//! Because the ISBN is the primary key (not a composite), each book
//! carries at most one link while an author may appear in many; this
//! asymmetry is intentional and preserved exactly.

use crate::expand::AuthorshipExpanded;
use crate::guard::commit_guarded;
use crate::validate;
use catalog_core::{Authorship, EntityRef, Error, Isbn, Result, ValidationError};
use catalog_session::{CommitOutcome, Session};
use catalog_storage::CatalogStore;
use std::sync::Arc;

/// CRUD operations over authorship link rows.
///
/// Access via `catalog.authorships`.
pub struct Authorships {
    store: Arc<CatalogStore>,
}

impl Authorships {
    /// Create a handle over the given store.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// All links in book-ISBN order.
    pub fn list(&self) -> Result<Vec<Authorship>> {
        Ok(self.store.authorships()?.list())
    }

    /// All links, each with its author and book resolved.
    pub fn list_expanded(&self) -> Result<Vec<AuthorshipExpanded>> {
        let authors = self.store.authors()?;
        let books = self.store.books()?;
        Ok(self
            .store
            .authorships()?
            .list()
            .into_iter()
            .map(|authorship| {
                let author = authors.get(&authorship.author_id);
                let book = books.get(&authorship.book_isbn);
                AuthorshipExpanded {
                    authorship,
                    author,
                    book,
                }
            })
            .collect())
    }

    /// Look up the link for one book. `Ok(None)` when no row matches.
    pub fn get(&self, isbn: Isbn) -> Result<Option<Authorship>> {
        Ok(self.store.authorships()?.get(&isbn))
    }

    /// Look up the link for one book with both related rows resolved.
    pub fn get_expanded(&self, isbn: Isbn) -> Result<Option<AuthorshipExpanded>> {
        let Some(authorship) = self.store.authorships()?.get(&isbn) else {
            return Ok(None);
        };
        let author = self.store.authors()?.get(&authorship.author_id);
        let book = self.store.books()?.get(&authorship.book_isbn);
        Ok(Some(AuthorshipExpanded {
            authorship,
            author,
            book,
        }))
    }

    /// Create a link between a book and an author.
    ///
    /// Both references are validated before the write and every missing
    /// one is reported, not just the first. A book already carrying a
    /// link cannot take a second one (ISBN-as-primary-key invariant).
    pub fn create(&self, payload: Authorship) -> Result<Authorship> {
        let mut report = ValidationError::new();
        self.validate_references(&mut report, &payload)?;
        if self.store.authorships()?.contains(&payload.book_isbn) {
            validate::duplicate_key(&mut report, "book_isbn", payload.entity_ref());
        }
        report.into_result()?;

        let entity = payload.entity_ref();
        let mut session = Session::new(self.store.clone());
        session.stage_insert(payload.clone().into());
        match session.commit()? {
            CommitOutcome::Committed { .. } => {
                tracing::debug!(
                    book = %payload.book_isbn,
                    author = %payload.author_id,
                    "created authorship"
                );
                Ok(payload)
            }
            // Lost a create race for the same book; same outcome as the
            // pre-checked duplicate.
            CommitOutcome::Conflict { .. } => {
                let mut report = ValidationError::new();
                validate::duplicate_key(&mut report, "book_isbn", entity);
                Err(Error::Validation(report))
            }
        }
    }

    /// Replace a link, rewiring the book to a different author.
    ///
    /// The path identifier is the book's ISBN and must match the
    /// payload's; the author side is the mutable half of the row.
    pub fn update(&self, isbn: Isbn, payload: Authorship) -> Result<()> {
        if payload.book_isbn != isbn {
            return Err(Error::IdentifierMismatch {
                expected: EntityRef::Authorship(isbn),
                supplied: payload.entity_ref(),
            });
        }

        let mut report = ValidationError::new();
        self.validate_references(&mut report, &payload)?;
        report.into_result()?;

        let current = self
            .store
            .authorships()?
            .get_versioned(&isbn)
            .ok_or(Error::NotFound {
                entity: EntityRef::Authorship(isbn),
            })?;

        let mut session = Session::new(self.store.clone());
        session.stage_update(current.version, payload.into());
        commit_guarded(&self.store, session, EntityRef::Authorship(isbn)).map(|_| ())
    }

    /// Delete the link for a book. A missing row is an Ok no-op.
    pub fn delete(&self, isbn: Isbn) -> Result<()> {
        let Some(current) = self.store.authorships()?.get_versioned(&isbn) else {
            return Ok(());
        };
        let entity = EntityRef::Authorship(isbn);

        let mut session = Session::new(self.store.clone());
        session.stage_remove(entity, current.version);
        commit_guarded(&self.store, session, entity).map(|_| ())
    }

    fn validate_references(
        &self,
        report: &mut ValidationError,
        payload: &Authorship,
    ) -> Result<()> {
        validate::check_reference(
            report,
            &self.store,
            "author_id",
            EntityRef::Author(payload.author_id),
        )?;
        validate::check_reference(
            report,
            &self.store,
            "book_isbn",
            EntityRef::Book(payload.book_isbn),
        )?;
        Ok(())
    }
}
