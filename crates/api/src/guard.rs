//! Concurrency guard
//!
//! Wraps every update/delete commit in the deterministic conflict
//! resolution:
//!
//! 1. The commit reports a conflict (another writer changed or removed
//!    the row after we read it).
//! 2. Re-query the existence oracle for the same identifier.
//! 3. Row gone: the conflict was a concurrent delete; surface NotFound.
//! 4. Row still live: an unresolved concurrent modification; surface a
//!    fatal conflict. No silent retry, no merge — the store never
//!    guesses which writer's intent should win.

use catalog_core::{EntityRef, Error, Result};
use catalog_session::{CommitOutcome, ExistenceOracle, Session};
use catalog_storage::CatalogStore;
use std::sync::Arc;

/// Commit a session with conflict resolution for the given row.
///
/// Returns the commit version on success. On a commit conflict the
/// existence oracle decides the outcome: [`Error::NotFound`] when the
/// row vanished underneath us, [`Error::Conflict`] when it is still
/// live.
pub fn commit_guarded(
    store: &Arc<CatalogStore>,
    session: Session,
    entity: EntityRef,
) -> Result<u64> {
    match session.commit()? {
        CommitOutcome::Committed { version } => Ok(version),
        CommitOutcome::Conflict { .. } => {
            let oracle = ExistenceOracle::new(Arc::clone(store));
            if oracle.exists(&entity)? {
                tracing::warn!(%entity, "unresolved concurrent modification");
                Err(Error::Conflict { entity })
            } else {
                Err(Error::NotFound { entity })
            }
        }
    }
}
