//! Versioned rows and the type-erased row container

use catalog_core::{Author, Authorship, Book, EntityKind, EntityRef, Publisher};
use serde::{Deserialize, Serialize};

/// A committed row plus its concurrency token.
///
/// `version` is the commit version of the batch that last wrote the row;
/// it is the token compared by optimistic-conflict validation. Whole-row
/// replace on update assigns a fresh version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedRow<R> {
    /// The row value.
    pub row: R,
    /// Commit version of the batch that last wrote this row.
    pub version: u64,
    /// Microsecond timestamp of that commit.
    pub updated_at: i64,
}

impl<R> VersionedRow<R> {
    /// Wrap a row with its version and commit timestamp.
    pub fn new(row: R, version: u64, updated_at: i64) -> Self {
        Self {
            row,
            version,
            updated_at,
        }
    }
}

/// A row of any entity kind.
///
/// Sessions and the journal handle heterogeneous batches; this enum is
/// the tagged container that routes each row back to its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowData {
    /// An author row.
    Author(Author),
    /// A book row.
    Book(Book),
    /// A publisher row.
    Publisher(Publisher),
    /// An authorship link row.
    Authorship(Authorship),
}

impl RowData {
    /// The entity kind of the contained row.
    pub const fn kind(&self) -> EntityKind {
        match self {
            RowData::Author(_) => EntityKind::Author,
            RowData::Book(_) => EntityKind::Book,
            RowData::Publisher(_) => EntityKind::Publisher,
            RowData::Authorship(_) => EntityKind::Authorship,
        }
    }

    /// Reference to the contained row.
    pub const fn entity_ref(&self) -> EntityRef {
        match self {
            RowData::Author(a) => a.entity_ref(),
            RowData::Book(b) => b.entity_ref(),
            RowData::Publisher(p) => p.entity_ref(),
            RowData::Authorship(l) => l.entity_ref(),
        }
    }
}

impl From<Author> for RowData {
    fn from(row: Author) -> Self {
        RowData::Author(row)
    }
}

impl From<Book> for RowData {
    fn from(row: Book) -> Self {
        RowData::Book(row)
    }
}

impl From<Publisher> for RowData {
    fn from(row: Publisher) -> Self {
        RowData::Publisher(row)
    }
}

impl From<Authorship> for RowData {
    fn from(row: Authorship) -> Self {
        RowData::Authorship(row)
    }
}
