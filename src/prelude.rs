//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use catalogdb::prelude::*;
//! ```

pub use crate::catalog::{Catalog, CatalogBuilder};
pub use crate::{
    Author, AuthorExpanded, AuthorId, Authorship, AuthorshipExpanded, Book, BookExpanded,
    EntityKind, EntityRef, Error, Isbn, Publisher, PublisherExpanded, PublisherId, Result,
};
