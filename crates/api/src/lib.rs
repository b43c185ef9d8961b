//! CRUD operations over the catalog
//!
//! One collection handle per entity kind ([`Authors`], [`Books`],
//! [`Publishers`], [`Authorships`]), each exposing the uniform operation
//! set: `list`/`list_expanded`, `get`/`get_expanded`, `create`, `update`,
//! `delete`. Handles borrow the shared store; every write runs in its own
//! [`catalog_session::Session`] and mutating commits go through the
//! [concurrency guard](guard::commit_guarded).
//!
//! Validation is schema-driven: field-length bounds come from
//! [`catalog_core::schema::describe`], referential checks collect every
//! missing reference before failing, and delete policies are enforced
//! from the schema's incoming foreign keys.

#![warn(missing_docs)]

mod collections;
mod expand;
mod guard;
mod policy;
mod validate;

pub use collections::{Authors, Authorships, Books, Publishers};
pub use expand::{AuthorExpanded, AuthorshipExpanded, BookExpanded, PublisherExpanded};
pub use guard::commit_guarded;
