//! Core types for the catalog store
//!
//! This crate defines the fundamental types used throughout the system:
//! - Typed identifiers ([`AuthorId`], [`PublisherId`], [`Isbn`])
//! - The four catalog entities ([`Author`], [`Book`], [`Publisher`],
//!   [`Authorship`])
//! - The static schema ([`schema::describe`]) consulted by validation and
//!   delete-policy enforcement
//! - The canonical error type shared by every layer

#![warn(missing_docs)]

pub mod entity;
pub mod error;
pub mod schema;
pub mod types;

pub use entity::{Author, Authorship, Book, Publisher};
pub use error::{Error, Result, ValidationError, ValidationIssue};
pub use types::{AuthorId, EntityKind, EntityRef, Isbn, PublisherId};
