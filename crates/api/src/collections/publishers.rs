//! Publisher operations

use crate::expand::PublisherExpanded;
use crate::guard::commit_guarded;
use crate::validate;
use catalog_core::{EntityKind, EntityRef, Error, Publisher, PublisherId, Result, ValidationError};
use catalog_session::{CommitOutcome, Session};
use catalog_storage::CatalogStore;
use std::sync::Arc;

/// CRUD operations over publisher rows.
///
/// Access via `catalog.publishers`. Deleting a publisher never cascades:
/// dependent books keep a dangling optional reference that the caller
/// must clear.
pub struct Publishers {
    store: Arc<CatalogStore>,
}

impl Publishers {
    /// Create a handle over the given store.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// All publishers in id order.
    pub fn list(&self) -> Result<Vec<Publisher>> {
        Ok(self.store.publishers()?.list())
    }

    /// All publishers, each with the books that reference them.
    pub fn list_expanded(&self) -> Result<Vec<PublisherExpanded>> {
        let books = self.store.books()?;
        Ok(self
            .store
            .publishers()?
            .list()
            .into_iter()
            .map(|publisher| {
                let published = books.list_where(|b| b.publisher_id == Some(publisher.id));
                PublisherExpanded {
                    publisher,
                    books: published,
                }
            })
            .collect())
    }

    /// Look up one publisher. `Ok(None)` when no row matches.
    pub fn get(&self, id: PublisherId) -> Result<Option<Publisher>> {
        Ok(self.store.publishers()?.get(&id))
    }

    /// Look up one publisher with their books.
    pub fn get_expanded(&self, id: PublisherId) -> Result<Option<PublisherExpanded>> {
        let Some(publisher) = self.store.publishers()?.get(&id) else {
            return Ok(None);
        };
        let published = self
            .store
            .books()?
            .list_where(|b| b.publisher_id == Some(id));
        Ok(Some(PublisherExpanded {
            publisher,
            books: published,
        }))
    }

    /// Create a publisher.
    ///
    /// The id is store-generated; the payload's id is ignored and the
    /// returned row carries the assigned one.
    pub fn create(&self, payload: Publisher) -> Result<Publisher> {
        let mut report = ValidationError::new();
        validate::check_text(
            &mut report,
            EntityKind::Publisher,
            "name",
            payload.name.as_deref(),
        );
        validate::check_text(
            &mut report,
            EntityKind::Publisher,
            "location",
            payload.location.as_deref(),
        );
        report.into_result()?;

        self.store.publishers()?;
        let row = Publisher {
            id: self.store.allocate_publisher_id(),
            ..payload
        };

        let mut session = Session::new(self.store.clone());
        session.stage_insert(row.clone().into());
        match session.commit()? {
            CommitOutcome::Committed { .. } => {
                tracing::debug!(id = %row.id, "created publisher");
                Ok(row)
            }
            CommitOutcome::Conflict { entity } => Err(Error::Conflict { entity }),
        }
    }

    /// Replace a publisher row.
    pub fn update(&self, id: PublisherId, payload: Publisher) -> Result<()> {
        if payload.id != id {
            return Err(Error::IdentifierMismatch {
                expected: EntityRef::Publisher(id),
                supplied: payload.entity_ref(),
            });
        }

        let mut report = ValidationError::new();
        validate::check_text(
            &mut report,
            EntityKind::Publisher,
            "name",
            payload.name.as_deref(),
        );
        validate::check_text(
            &mut report,
            EntityKind::Publisher,
            "location",
            payload.location.as_deref(),
        );
        report.into_result()?;

        let current = self
            .store
            .publishers()?
            .get_versioned(&id)
            .ok_or(Error::NotFound {
                entity: EntityRef::Publisher(id),
            })?;

        let mut session = Session::new(self.store.clone());
        session.stage_update(current.version, payload.into());
        commit_guarded(&self.store, session, EntityRef::Publisher(id)).map(|_| ())
    }

    /// Delete a publisher. A missing row is an Ok no-op.
    ///
    /// Dependent books are left with a dangling reference (set-null
    /// policy); expansion reports their publisher as absent until the
    /// caller clears or repoints the reference.
    pub fn delete(&self, id: PublisherId) -> Result<()> {
        let Some(current) = self.store.publishers()?.get_versioned(&id) else {
            return Ok(());
        };
        let entity = EntityRef::Publisher(id);

        let mut session = Session::new(self.store.clone());
        session.stage_remove(entity, current.version);
        commit_guarded(&self.store, session, entity).map(|_| ())
    }
}
