//! Canonical error type for catalog operations
//!
//! One error enum is shared by every layer. The variants split into two
//! classes: ordinary recoverable results (`NotFound`, `Validation`,
//! `IdentifierMismatch`) and faults (`Conflict`, `Unavailable`, the
//! storage errors). Only the faults should propagate past the operations
//! boundary unhandled; the recoverable variants are normal negative
//! outcomes for the caller to branch on.

use crate::types::{EntityKind, EntityRef};
use thiserror::Error;

/// All catalog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The identifier has no live row. An ordinary negative result, not a
    /// fault; lookups express it as `Ok(None)` instead.
    #[error("not found: {entity}")]
    NotFound {
        /// The row that was not found.
        entity: EntityRef,
    },

    /// The payload violates field constraints or references missing
    /// related rows. Carries every violation, not just the first.
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    /// The path identifier disagrees with the payload's own identifier.
    #[error("identifier mismatch: path {expected}, payload {supplied}")]
    IdentifierMismatch {
        /// Identifier named by the operation path.
        expected: EntityRef,
        /// Identifier carried by the payload.
        supplied: EntityRef,
    },

    /// Unresolved concurrent modification detected at commit time.
    /// Fatal: never retried or merged automatically.
    #[error("concurrent modification conflict on {entity}")]
    Conflict {
        /// The row both writers touched.
        entity: EntityRef,
    },

    /// The store was opened without a table for this entity kind.
    /// A configuration fault, surfaced immediately and never swallowed.
    #[error("store not provisioned for entity kind '{kind}'")]
    Unavailable {
        /// The unprovisioned entity kind.
        kind: EntityKind,
    },

    /// Journal or table fault inside the storage engine.
    #[error("storage error: {0}")]
    Storage(String),

    /// Row or journal record failed to encode or decode.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the journal file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a not-found result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Check if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error is a fault rather than an ordinary negative
    /// result.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Error::Conflict { .. }
                | Error::Unavailable { .. }
                | Error::Storage(_)
                | Error::Serialization(_)
                | Error::Io(_)
        )
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A collected set of payload violations.
///
/// Operations gather every violated field and missing reference before
/// failing, so a payload with two problems reports both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    /// The individual violations, in the order they were found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }

    /// Whether any violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` if empty, otherwise the report wrapped as an [`Error`].
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
            first = false;
        }
        Ok(())
    }
}

/// One violated field or reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Name of the violated field on the payload.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}
