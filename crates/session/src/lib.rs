//! Unit-of-work layer for the catalog
//!
//! This crate implements the request-scoped write path:
//! - [`Session`]: stages additions, whole-row replacements, and removals,
//!   then commits them as one atomic batch with conflicts reported as a
//!   tagged [`CommitOutcome`], never as unwound control flow
//! - [`ExistenceOracle`]: fresh reads against committed state, used to
//!   interpret commit conflicts (vanished row vs. concurrent write)
//!
//! A session lives for exactly one logical CRUD operation and is never
//! shared across requests.

#![warn(missing_docs)]

pub mod oracle;
pub mod session;

pub use catalog_storage::CommitOutcome;
pub use oracle::ExistenceOracle;
pub use session::Session;
