//! Provisioning and configuration tests
//!
//! An unprovisioned collection is a configuration fault, reported
//! distinctly from a missing row and never swallowed. The integrity
//! toggle controls referential checks and delete-policy enforcement.

use crate::*;

#[test]
fn test_unprovisioned_collection_is_unavailable_not_not_found() {
    let catalog = Catalog::builder()
        .provision(EntityKind::Authorship, false)
        .open()
        .unwrap();

    let err = catalog.authorships.list().unwrap_err();
    assert!(matches!(
        err,
        Error::Unavailable {
            kind: EntityKind::Authorship
        }
    ));

    // Deletion intent against a missing *row* is a no-op; against a
    // missing *collection* it is a fault.
    let err = catalog.authorships.delete(Isbn::new(1)).unwrap_err();
    assert!(matches!(err, Error::Unavailable { .. }));

    // Provisioned collections behave normally alongside.
    assert!(catalog.authors.get(AuthorId::new(1)).unwrap().is_none());
}

#[test]
fn test_integrity_off_allows_dangling_references() {
    let catalog = Catalog::builder().enforce_integrity(false).open().unwrap();
    assert!(!catalog.integrity_enabled());

    // Neither referenced row exists, and the write is still accepted.
    catalog
        .authorships
        .create(Authorship {
            book_isbn: Isbn::new(5),
            author_id: AuthorId::new(9),
        })
        .unwrap();

    let expanded = catalog.authorships.get_expanded(Isbn::new(5)).unwrap().unwrap();
    assert!(expanded.author.is_none());
    assert!(expanded.book.is_none());
}

#[test]
fn test_integrity_off_allows_deleting_referenced_rows() {
    let catalog = Catalog::builder().enforce_integrity(false).open().unwrap();

    let a = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
    let b = catalog.books.create(book(1, "Linked")).unwrap();
    catalog
        .authorships
        .create(Authorship {
            book_isbn: b.isbn,
            author_id: a.id,
        })
        .unwrap();

    catalog.authors.delete(a.id).unwrap();

    let orphan = catalog.authorships.get(b.isbn).unwrap().unwrap();
    assert_eq!(orphan.author_id, a.id, "the link dangles; nothing cascades");
}

#[test]
fn test_default_configuration() {
    let catalog = create_catalog();
    assert!(catalog.integrity_enabled(), "integrity checking defaults on");
    assert!(catalog.is_ephemeral());
}
