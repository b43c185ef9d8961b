//! Author operations

use crate::expand::AuthorExpanded;
use crate::guard::commit_guarded;
use crate::policy;
use crate::validate;
use catalog_core::{Author, AuthorId, EntityKind, EntityRef, Error, Result, ValidationError};
use catalog_session::{CommitOutcome, Session};
use catalog_storage::CatalogStore;
use std::sync::Arc;

/// CRUD operations over author rows.
///
/// Access via `catalog.authors`.
pub struct Authors {
    store: Arc<CatalogStore>,
}

impl Authors {
    /// Create a handle over the given store.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// All authors in id order.
    pub fn list(&self) -> Result<Vec<Author>> {
        Ok(self.store.authors()?.list())
    }

    /// All authors, each with the authorship rows naming them.
    pub fn list_expanded(&self) -> Result<Vec<AuthorExpanded>> {
        let authorships = self.store.authorships()?;
        Ok(self
            .store
            .authors()?
            .list()
            .into_iter()
            .map(|author| {
                let links = authorships.list_where(|l| l.author_id == author.id);
                AuthorExpanded {
                    author,
                    authorships: links,
                }
            })
            .collect())
    }

    /// Look up one author. `Ok(None)` when no row matches.
    pub fn get(&self, id: AuthorId) -> Result<Option<Author>> {
        Ok(self.store.authors()?.get(&id))
    }

    /// Look up one author with their authorship rows.
    pub fn get_expanded(&self, id: AuthorId) -> Result<Option<AuthorExpanded>> {
        let Some(author) = self.store.authors()?.get(&id) else {
            return Ok(None);
        };
        let links = self.store.authorships()?.list_where(|l| l.author_id == id);
        Ok(Some(AuthorExpanded {
            author,
            authorships: links,
        }))
    }

    /// Create an author.
    ///
    /// The id is store-generated; the payload's id is ignored and the
    /// returned row carries the assigned one.
    pub fn create(&self, payload: Author) -> Result<Author> {
        let mut report = ValidationError::new();
        validate::check_text(&mut report, EntityKind::Author, "name", payload.name.as_deref());
        validate::check_text(
            &mut report,
            EntityKind::Author,
            "surname",
            payload.surname.as_deref(),
        );
        report.into_result()?;

        // Surface an unprovisioned table before burning an id.
        self.store.authors()?;
        let row = Author {
            id: self.store.allocate_author_id(),
            ..payload
        };

        let mut session = Session::new(self.store.clone());
        session.stage_insert(row.clone().into());
        match session.commit()? {
            CommitOutcome::Committed { .. } => {
                tracing::debug!(id = %row.id, "created author");
                Ok(row)
            }
            // A freshly allocated id cannot legitimately collide.
            CommitOutcome::Conflict { entity } => Err(Error::Conflict { entity }),
        }
    }

    /// Replace an author row.
    pub fn update(&self, id: AuthorId, payload: Author) -> Result<()> {
        if payload.id != id {
            return Err(Error::IdentifierMismatch {
                expected: EntityRef::Author(id),
                supplied: payload.entity_ref(),
            });
        }

        let mut report = ValidationError::new();
        validate::check_text(&mut report, EntityKind::Author, "name", payload.name.as_deref());
        validate::check_text(
            &mut report,
            EntityKind::Author,
            "surname",
            payload.surname.as_deref(),
        );
        report.into_result()?;

        let current = self
            .store
            .authors()?
            .get_versioned(&id)
            .ok_or(Error::NotFound {
                entity: EntityRef::Author(id),
            })?;

        let mut session = Session::new(self.store.clone());
        session.stage_update(current.version, payload.into());
        commit_guarded(&self.store, session, EntityRef::Author(id)).map(|_| ())
    }

    /// Delete an author. A missing row is an Ok no-op.
    ///
    /// Refused while live authorship rows reference the author and
    /// integrity checking is on.
    pub fn delete(&self, id: AuthorId) -> Result<()> {
        let Some(current) = self.store.authors()?.get_versioned(&id) else {
            return Ok(());
        };
        let entity = EntityRef::Author(id);
        policy::check_delete_policies(&self.store, &entity)?;

        let mut session = Session::new(self.store.clone());
        session.stage_remove(entity, current.version);
        commit_guarded(&self.store, session, entity).map(|_| ())
    }
}
