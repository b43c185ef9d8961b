//! Request-scoped unit of work

use catalog_core::{EntityRef, Result};
use catalog_storage::{CatalogStore, CommitOutcome, RowData, RowOp};
use std::sync::Arc;

/// A unit-of-work bound to one CRUD operation.
///
/// Changes are staged in order and nothing touches the store until
/// [`commit`](Session::commit), which consumes the session and applies
/// the whole batch atomically. Updates and removals carry the committed
/// row version observed at read time; commit validation compares those
/// tokens against current state and reports any mismatch as a
/// [`CommitOutcome::Conflict`].
///
/// The store handle is injected at construction; sessions hold no other
/// state and are never shared across requests.
///
/// # Example
///
/// ```ignore
/// let mut session = Session::new(store.clone());
/// session.stage_insert(row.into());
/// match session.commit()? {
///     CommitOutcome::Committed { .. } => { /* applied */ }
///     CommitOutcome::Conflict { entity } => { /* resolve via oracle */ }
/// }
/// ```
pub struct Session {
    store: Arc<CatalogStore>,
    ops: Vec<RowOp>,
}

impl Session {
    /// Create a session against the given store.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            ops: Vec::new(),
        }
    }

    /// Stage the addition of a new row.
    pub fn stage_insert(&mut self, row: RowData) {
        tracing::debug!(entity = %row.entity_ref(), "staged insert");
        self.ops.push(RowOp::Insert { row });
    }

    /// Stage a whole-row replacement.
    ///
    /// `expected` is the committed version observed when the row was
    /// read; a different committed version at commit time is a conflict.
    pub fn stage_update(&mut self, expected: u64, row: RowData) {
        tracing::debug!(entity = %row.entity_ref(), expected, "staged update");
        self.ops.push(RowOp::Update { expected, row });
    }

    /// Stage the removal of a row.
    pub fn stage_remove(&mut self, entity: EntityRef, expected: u64) {
        tracing::debug!(%entity, expected, "staged remove");
        self.ops.push(RowOp::Remove { entity, expected });
    }

    /// Number of staged operations.
    pub fn staged(&self) -> usize {
        self.ops.len()
    }

    /// Check if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Commit all staged operations as one atomic batch.
    ///
    /// Consumes the session; there is no partial commit and no reuse
    /// after commit. Conflicts are a normal return value, not an error —
    /// only storage faults come back as `Err`.
    pub fn commit(self) -> Result<CommitOutcome> {
        self.store.commit(self.ops)
    }
}
