//! Expanded read models
//!
//! One level of relation expansion, mirroring the entities' navigation
//! structure. Dangling references (possible after a set-null-policy
//! delete, or with integrity checking off) expand to `None` rather than
//! failing the read.

use catalog_core::{Author, Authorship, Book, Publisher};
use serde::{Deserialize, Serialize};

/// A book together with its related rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookExpanded {
    /// The book itself.
    pub book: Book,
    /// The publishing house, when `publisher_id` is set and live.
    pub publisher: Option<Publisher>,
    /// The authorship link keyed by this book's ISBN, if any.
    pub authorship: Option<Authorship>,
}

/// An authorship link together with both linked rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorshipExpanded {
    /// The link itself.
    pub authorship: Authorship,
    /// The linked author, when live.
    pub author: Option<Author>,
    /// The linked book, when live.
    pub book: Option<Book>,
}

/// An author together with the authorship rows that reference them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorExpanded {
    /// The author itself.
    pub author: Author,
    /// Every authorship row naming this author, in book-ISBN order.
    pub authorships: Vec<Authorship>,
}

/// A publisher together with the books that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherExpanded {
    /// The publisher itself.
    pub publisher: Publisher,
    /// Every book naming this publisher, in ISBN order.
    pub books: Vec<Book>,
}
