//! Typed identifiers and entity references
//!
//! Every entity kind has its own identifier newtype so that an author id
//! can never be passed where a publisher id is expected. [`EntityRef`]
//! pairs a kind with its identifier and is the unit of addressing used by
//! sessions, the existence oracle, and error reporting.

use serde::{Deserialize, Serialize};

/// Store-generated identifier of an [`Author`](crate::Author) row.
///
/// Assigned by the store at create time; caller-supplied values are
/// ignored on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorId(i32);

impl AuthorId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        AuthorId(id)
    }

    /// Get the raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-generated identifier of a [`Publisher`](crate::Publisher) row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublisherId(i32);

impl PublisherId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        PublisherId(id)
    }

    /// Get the raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for PublisherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// International Standard Book Number, the primary key of a
/// [`Book`](crate::Book) row.
///
/// Always supplied by the caller at create time and immutable afterwards;
/// the store never generates or reassigns one. Also reused as the primary
/// key of the [`Authorship`](crate::Authorship) link, which is why each
/// book can participate in at most one authorship row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Isbn(i64);

impl Isbn {
    /// Wrap a raw ISBN value.
    pub const fn new(isbn: i64) -> Self {
        Isbn(isbn)
    }

    /// Get the raw ISBN value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four entity kinds in the catalog
///
/// This enum identifies which table a value or operation belongs to.
/// Used for schema lookup, provisioning, and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// An author row.
    Author,
    /// A book row, keyed by ISBN.
    Book,
    /// A publisher row.
    Publisher,
    /// The book-has-author link row, keyed by the book's ISBN.
    Authorship,
}

impl EntityKind {
    /// Stable lowercase name, used in messages and log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Book => "book",
            EntityKind::Publisher => "publisher",
            EntityKind::Authorship => "authorship",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-qualified reference to one row: entity kind plus identifier.
///
/// This is the addressing unit for staged operations, existence checks,
/// and NotFound/Conflict error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    /// An author row by id.
    Author(AuthorId),
    /// A book row by ISBN.
    Book(Isbn),
    /// A publisher row by id.
    Publisher(PublisherId),
    /// An authorship row by its book's ISBN.
    Authorship(Isbn),
}

impl EntityRef {
    /// The kind of entity this reference addresses.
    pub const fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Author(_) => EntityKind::Author,
            EntityRef::Book(_) => EntityKind::Book,
            EntityRef::Publisher(_) => EntityKind::Publisher,
            EntityRef::Authorship(_) => EntityKind::Authorship,
        }
    }
}

impl std::fmt::Display for EntityRef {
    /// Display in the format: `kind id`, e.g. `author 7`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Author(id) => write!(f, "author {}", id),
            EntityRef::Book(isbn) => write!(f, "book {}", isbn),
            EntityRef::Publisher(id) => write!(f, "publisher {}", id),
            EntityRef::Authorship(isbn) => write!(f, "authorship {}", isbn),
        }
    }
}
