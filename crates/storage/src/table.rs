//! One B-tree table per entity kind
//!
//! Keys are the entity's primary key, so iteration yields natural key
//! order. Reads clone out of the map under a read lock; writes go through
//! the store's commit path only.

use crate::row::VersionedRow;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory table of versioned rows keyed by primary key.
///
/// # Thread Safety
///
/// Reads take a shared lock; the store's commit path takes the write lock
/// while holding the global commit lock, so validation and apply are
/// atomic with respect to other commits.
pub struct Table<K, R> {
    rows: RwLock<BTreeMap<K, VersionedRow<R>>>,
}

impl<K: Ord + Copy, R: Clone> Table<K, R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get a row by primary key.
    pub fn get(&self, key: &K) -> Option<R> {
        self.rows.read().get(key).map(|v| v.row.clone())
    }

    /// Get a row together with its concurrency token.
    pub fn get_versioned(&self, key: &K) -> Option<VersionedRow<R>> {
        self.rows.read().get(key).cloned()
    }

    /// Committed version of a row, if it exists.
    pub fn version_of(&self, key: &K) -> Option<u64> {
        self.rows.read().get(key).map(|v| v.version)
    }

    /// Check if a row with this primary key exists.
    pub fn contains(&self, key: &K) -> bool {
        self.rows.read().contains_key(key)
    }

    /// Snapshot of all rows in primary-key order.
    pub fn list(&self) -> Vec<R> {
        self.rows.read().values().map(|v| v.row.clone()).collect()
    }

    /// Snapshot of rows matching a predicate, in primary-key order.
    pub fn list_where(&self, mut pred: impl FnMut(&R) -> bool) -> Vec<R> {
        self.rows
            .read()
            .values()
            .filter(|v| pred(&v.row))
            .map(|v| v.row.clone())
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Largest primary key, if any. Used to restore id allocators after
    /// journal replay.
    pub fn max_key(&self) -> Option<K> {
        self.rows.read().keys().next_back().copied()
    }

    pub(crate) fn put(&self, key: K, row: VersionedRow<R>) {
        self.rows.write().insert(key, row);
    }

    pub(crate) fn remove(&self, key: &K) -> Option<VersionedRow<R>> {
        self.rows.write().remove(key)
    }
}

impl<K: Ord + Copy, R: Clone> Default for Table<K, R> {
    fn default() -> Self {
        Self::new()
    }
}
