//! Staged operations and the tagged commit outcome

use crate::row::RowData;
use catalog_core::EntityRef;

/// One staged change against the store.
///
/// Updates and removes carry the committed row version observed when the
/// operation was prepared; commit validation compares it against the
/// current table state (first-committer-wins). Inserts expect the key to
/// be absent.
#[derive(Debug, Clone)]
pub enum RowOp {
    /// Insert a new row; fails validation if the primary key is taken.
    Insert {
        /// The row to insert.
        row: RowData,
    },
    /// Replace a whole row; fails validation if the committed version no
    /// longer matches `expected`.
    Update {
        /// Version observed when the row was read.
        expected: u64,
        /// The replacement row.
        row: RowData,
    },
    /// Remove a row; fails validation if the committed version no longer
    /// matches `expected`.
    Remove {
        /// The row to remove.
        entity: EntityRef,
        /// Version observed when the row was read.
        expected: u64,
    },
}

impl RowOp {
    /// The row this operation addresses.
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            RowOp::Insert { row } | RowOp::Update { row, .. } => row.entity_ref(),
            RowOp::Remove { entity, .. } => *entity,
        }
    }
}

/// Result of committing a batch.
///
/// Conflicts are ordinary values here, not unwound errors: the caller
/// decides how to resolve them (the concurrency guard re-queries the
/// existence oracle). Storage faults are the only `Err` path out of
/// commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// All staged operations were applied atomically.
    Committed {
        /// Version assigned to the whole batch.
        version: u64,
    },
    /// Another writer already changed or removed a staged row, or took a
    /// staged primary key. Nothing was applied.
    Conflict {
        /// The first staged row that failed validation.
        entity: EntityRef,
    },
}

impl CommitOutcome {
    /// Whether the batch was applied.
    pub const fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed { .. })
    }
}
