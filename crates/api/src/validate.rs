//! Schema-driven payload validation
//!
//! Length bounds come from the entity descriptors; referential checks
//! read committed state. Callers accumulate every violation into one
//! [`ValidationError`] so a payload with several problems reports them
//! all together.

use catalog_core::{schema, EntityKind, EntityRef, Result, ValidationError};
use catalog_storage::CatalogStore;

/// Check a bounded text field against its schema length limit.
pub(crate) fn check_text(
    report: &mut ValidationError,
    kind: EntityKind,
    field: &'static str,
    value: Option<&str>,
) {
    let Some(max) = schema::field_max_len(kind, field) else {
        return;
    };
    if let Some(text) = value {
        let len = text.chars().count();
        if len > max {
            report.push(field, format!("must be at most {} characters, got {}", max, len));
        }
    }
}

/// Check that a referenced row exists, when integrity checking is on.
///
/// Records a violation instead of failing so the caller can collect
/// every missing reference.
///
/// # Errors
///
/// Propagates [`catalog_core::Error::Unavailable`] when the referenced
/// entity's table is not provisioned.
pub(crate) fn check_reference(
    report: &mut ValidationError,
    store: &CatalogStore,
    field: &'static str,
    target: EntityRef,
) -> Result<()> {
    if !store.integrity_enabled() {
        return Ok(());
    }
    if !store.contains(&target)? {
        report.push(field, format!("{} does not exist", target));
    }
    Ok(())
}

/// Record a duplicate-primary-key violation.
pub(crate) fn duplicate_key(report: &mut ValidationError, field: &'static str, entity: EntityRef) {
    report.push(field, format!("{} already exists", entity));
}
