//! Book CRUD tests
//!
//! Caller-supplied ISBN, field bounds, referential checks, and
//! publisher expansion.

use crate::*;

// =============================================================================
// CREATE / GET
// =============================================================================

#[test]
fn test_create_then_get_roundtrip() {
    let catalog = create_catalog();

    let payload = book(9_780_131_101_630, "The C Programming Language");
    let created = catalog.books.create(payload.clone()).unwrap();
    assert_eq!(created, payload, "the caller's ISBN is used as-is");

    let fetched = catalog.books.get(payload.isbn).unwrap();
    assert_eq!(fetched, Some(payload));
}

#[test]
fn test_duplicate_isbn_is_rejected() {
    let catalog = create_catalog();
    catalog.books.create(book(1, "First")).unwrap();

    let err = catalog.books.create(book(1, "Second")).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let kept = catalog.books.get(Isbn::new(1)).unwrap().unwrap();
    assert_eq!(kept.title.as_deref(), Some("First"));
}

#[test]
fn test_create_with_live_publisher() {
    let catalog = create_catalog();
    let publisher = catalog
        .publishers
        .create(publisher("Prentice Hall", "Englewood Cliffs"))
        .unwrap();

    let mut payload = book(1, "The C Programming Language");
    payload.publisher_id = Some(publisher.id);
    catalog.books.create(payload).unwrap();
}

#[test]
fn test_create_with_missing_publisher_is_rejected() {
    let catalog = create_catalog();

    let mut payload = book(1, "Orphan");
    payload.publisher_id = Some(PublisherId::new(9));
    let err = catalog.books.create(payload).unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("publisher 9"));
}

// =============================================================================
// FIELD BOUNDS
// =============================================================================

#[test]
fn test_overlong_title_is_rejected() {
    let catalog = create_catalog();

    let mut payload = book(1, "x");
    payload.title = Some("x".repeat(46));
    let err = catalog.books.create(payload).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_synopsis_is_unbounded() {
    let catalog = create_catalog();

    let mut payload = book(1, "Long-winded");
    payload.synopsis = Some("lorem ".repeat(10_000));
    catalog.books.create(payload).unwrap();
}

// =============================================================================
// UPDATE / DELETE
// =============================================================================

#[test]
fn test_update_missing_book_is_not_found() {
    let catalog = create_catalog();

    let err = catalog
        .books
        .update(Isbn::new(5), book(5, "Ghost"))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_isbn_is_immutable() {
    let catalog = create_catalog();
    catalog.books.create(book(1, "Original")).unwrap();

    let err = catalog
        .books
        .update(Isbn::new(1), book(2, "Renumbered"))
        .unwrap_err();
    assert!(matches!(err, Error::IdentifierMismatch { .. }));
}

#[test]
fn test_delete_is_idempotent() {
    let catalog = create_catalog();
    catalog.books.create(book(1, "Ephemeral")).unwrap();

    catalog.books.delete(Isbn::new(1)).unwrap();
    catalog.books.delete(Isbn::new(1)).unwrap();
    assert!(catalog.books.get(Isbn::new(1)).unwrap().is_none());
}

// =============================================================================
// EXPANSION
// =============================================================================

#[test]
fn test_list_expanded_pairs_each_book_with_its_publisher() {
    let catalog = create_catalog();
    let publisher = catalog
        .publishers
        .create(publisher("Prentice Hall", "Englewood Cliffs"))
        .unwrap();

    let mut published = book(1, "Published");
    published.publisher_id = Some(publisher.id);
    catalog.books.create(published).unwrap();
    catalog.books.create(book(2, "Self-published")).unwrap();

    let expanded = catalog.books.list_expanded().unwrap();
    assert_eq!(expanded.len(), 2);

    assert_eq!(
        expanded[0]
            .publisher
            .as_ref()
            .and_then(|p| p.name.as_deref()),
        Some("Prentice Hall"),
        "a set publisher id expands to the publisher's row"
    );
    assert!(
        expanded[1].publisher.is_none(),
        "an unset publisher id expands to an absent publisher"
    );
}
