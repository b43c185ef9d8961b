//! Delete-policy enforcement
//!
//! Before staging a delete, the schema's incoming foreign keys decide
//! what happens to dependents. `Reject` refuses the delete while live
//! dependents exist (only when integrity checking is on); `SetNull`
//! lets the delete proceed and leaves the dependent's optional reference
//! dangling for the caller to clear. Nothing ever cascades.

use catalog_core::{
    schema::{self, DeletePolicy},
    EntityKind, EntityRef, Result, ValidationError,
};
use catalog_storage::CatalogStore;

/// Refuse the delete of `entity` when a `Reject`-policy dependent exists.
pub(crate) fn check_delete_policies(store: &CatalogStore, entity: &EntityRef) -> Result<()> {
    if !store.integrity_enabled() {
        return Ok(());
    }
    let mut report = ValidationError::new();
    for (dependent, fk) in schema::incoming_references(entity.kind()) {
        if fk.on_delete != DeletePolicy::Reject {
            continue;
        }
        let count = count_dependents(store, dependent, entity)?;
        if count > 0 {
            report.push(
                schema::describe(entity.kind()).primary_key,
                format!(
                    "{} is referenced by {} {} row(s); remove them first",
                    entity, count, dependent
                ),
            );
        }
    }
    report.into_result()
}

fn count_dependents(
    store: &CatalogStore,
    dependent: EntityKind,
    target: &EntityRef,
) -> Result<usize> {
    Ok(match (dependent, target) {
        (EntityKind::Authorship, EntityRef::Author(id)) => store
            .authorships()?
            .list_where(|l| l.author_id == *id)
            .len(),
        (EntityKind::Authorship, EntityRef::Book(isbn)) => {
            usize::from(store.authorships()?.contains(isbn))
        }
        (EntityKind::Book, EntityRef::Publisher(id)) => store
            .books()?
            .list_where(|b| b.publisher_id == Some(*id))
            .len(),
        _ => 0,
    })
}
