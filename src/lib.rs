//! # Catalogdb
//!
//! Embedded bibliographic catalog store with optimistic concurrency.
//!
//! Catalogdb persists a small catalog — authors, books, publishers, and
//! the authorship link between a book and its author — and exposes safe
//! CRUD operations over it. Every mutation runs in its own unit-of-work
//! session and commits atomically; write conflicts are detected at commit
//! time and resolved deterministically (a vanished row is NotFound, a
//! concurrently modified one is a fatal conflict).
//!
//! ## Quick Start
//!
//! ```ignore
//! use catalogdb::prelude::*;
//!
//! // Open a catalog (journal-backed) or go ephemeral for tests
//! let catalog = Catalog::open("./catalog-data")?;
//!
//! // Create a publisher and a book referencing it
//! let publisher = catalog.publishers.create(Publisher {
//!     id: PublisherId::new(0), // store-generated
//!     name: Some("Prentice Hall".to_string()),
//!     location: Some("Englewood Cliffs".to_string()),
//! })?;
//!
//! catalog.books.create(Book {
//!     isbn: Isbn::new(9780131101630), // caller-supplied, immutable
//!     publisher_id: Some(publisher.id),
//!     title: Some("The C Programming Language".to_string()),
//!     synopsis: None,
//!     page_count: Some("272".to_string()),
//! })?;
//!
//! // One level of relation expansion
//! for entry in catalog.books.list_expanded()? {
//!     println!("{:?} by {:?}", entry.book.title, entry.publisher);
//! }
//!
//! catalog.close()?;
//! ```
//!
//! ## Collections
//!
//! - [`Authors`](catalog_api::Authors) — store-generated ids
//! - [`Books`](catalog_api::Books) — keyed by caller-supplied ISBN
//! - [`Publishers`](catalog_api::Publishers) — store-generated ids
//! - [`Authorships`](catalog_api::Authorships) — the book/author link,
//!   keyed by the book's own ISBN (at most one link per book)

#![warn(missing_docs)]

mod catalog;

pub mod prelude;

// Re-export main entry points
pub use catalog::{Catalog, CatalogBuilder};

// Re-export the canonical error and core types
pub use catalog_core::{
    schema, Author, AuthorId, Authorship, Book, EntityKind, EntityRef, Error, Isbn, Publisher,
    PublisherId, Result, ValidationError, ValidationIssue,
};

// Re-export the expanded read models
pub use catalog_api::{
    commit_guarded, AuthorExpanded, AuthorshipExpanded, BookExpanded, PublisherExpanded,
};

// Full-control building blocks: sessions, the existence oracle, and the
// tagged commit outcome, for callers composing multi-row units of work.
pub use catalog_session::{CommitOutcome, ExistenceOracle, Session};
pub use catalog_storage::{CatalogStore, RowData};
