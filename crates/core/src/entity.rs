//! The four catalog entities
//!
//! Every non-key attribute is optional, mirroring the catalog's relational
//! schema where all non-key columns are nullable. Bounded text fields cap
//! at 45 characters (enforced by the operations layer against the schema
//! descriptors, not here); a book's synopsis is unbounded.

use crate::types::{AuthorId, EntityRef, Isbn, PublisherId};
use serde::{Deserialize, Serialize};

/// An author of zero or more books.
///
/// The id is store-generated: `create` ignores the supplied value and the
/// returned row carries the assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Store-generated identifier.
    pub id: AuthorId,
    /// Given name, at most 45 characters.
    pub name: Option<String>,
    /// Surname, at most 45 characters.
    pub surname: Option<String>,
}

impl Author {
    /// Reference to this row.
    pub const fn entity_ref(&self) -> EntityRef {
        EntityRef::Author(self.id)
    }
}

/// A book, keyed by its caller-supplied ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Caller-supplied ISBN; immutable once created.
    pub isbn: Isbn,
    /// Optional reference to the publishing [`Publisher`].
    ///
    /// Deleting the publisher does not clear this; the reference is left
    /// dangling and relation expansion reports the publisher as absent.
    pub publisher_id: Option<PublisherId>,
    /// Title, at most 45 characters.
    pub title: Option<String>,
    /// Unbounded synopsis text.
    pub synopsis: Option<String>,
    /// Page count, stored as short text of at most 45 characters.
    pub page_count: Option<String>,
}

impl Book {
    /// Reference to this row.
    pub const fn entity_ref(&self) -> EntityRef {
        EntityRef::Book(self.isbn)
    }
}

/// A publisher of zero or more books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Store-generated identifier.
    pub id: PublisherId,
    /// Name, at most 45 characters.
    pub name: Option<String>,
    /// Location of the head office, at most 45 characters.
    pub location: Option<String>,
}

impl Publisher {
    /// Reference to this row.
    pub const fn entity_ref(&self) -> EntityRef {
        EntityRef::Publisher(self.id)
    }
}

/// The link between a [`Book`] and its [`Author`].
///
/// Keyed by the book's own ISBN rather than a composite of (author, book):
/// an author may appear in many authorship rows, but each book has at most
/// one. This asymmetry is deliberate and must be preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorship {
    /// The linked book's ISBN; doubles as this row's primary key.
    pub book_isbn: Isbn,
    /// The linked author.
    pub author_id: AuthorId,
}

impl Authorship {
    /// Reference to this row.
    pub const fn entity_ref(&self) -> EntityRef {
        EntityRef::Authorship(self.book_isbn)
    }
}
