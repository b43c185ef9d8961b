//! Authorship link tests
//!
//! The ISBN-as-primary-key invariant, collected referential validation,
//! and the reject delete policy on both referenced sides.

use crate::*;

fn seeded(catalog: &Catalog) -> (AuthorId, Isbn) {
    let author = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
    let book = catalog
        .books
        .create(book(9_780_131_101_630, "The C Programming Language"))
        .unwrap();
    (author.id, book.isbn)
}

// =============================================================================
// CREATE
// =============================================================================

#[test]
fn test_create_then_get_roundtrip() {
    let catalog = create_catalog();
    let (author_id, isbn) = seeded(&catalog);

    let payload = Authorship {
        book_isbn: isbn,
        author_id,
    };
    let created = catalog.authorships.create(payload.clone()).unwrap();
    assert_eq!(created, payload);
    assert_eq!(catalog.authorships.get(isbn).unwrap(), Some(payload));
}

#[test]
fn test_both_missing_references_reported_together() {
    let catalog = create_catalog();

    let err = catalog
        .authorships
        .create(Authorship {
            book_isbn: Isbn::new(5),
            author_id: AuthorId::new(9),
        })
        .unwrap_err();

    let Error::Validation(report) = err else {
        panic!("expected a validation failure, got: {:?}", err);
    };
    assert_eq!(
        report.issues.len(),
        2,
        "validation must not short-circuit on the first missing reference"
    );
    let text = report.to_string();
    assert!(text.contains("author 9"));
    assert!(text.contains("book 5"));
}

#[test]
fn test_second_link_for_same_isbn_is_rejected() {
    let catalog = create_catalog();
    let (first_author, isbn) = seeded(&catalog);
    assert_eq!(isbn, Isbn::new(9_780_131_101_630));

    let second_author = catalog.authors.create(author("Dennis", "Ritchie")).unwrap();

    catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id: first_author,
        })
        .unwrap();

    let err = catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id: second_author.id,
        })
        .unwrap_err();
    assert!(
        matches!(err, Error::Validation(_)),
        "each book carries at most one authorship row"
    );

    assert_eq!(
        catalog.authorships.get(isbn).unwrap().unwrap().author_id,
        first_author,
        "the existing link must be untouched"
    );
}

#[test]
fn test_one_author_many_links() {
    let catalog = create_catalog();
    let (author_id, first_isbn) = seeded(&catalog);
    let second = catalog
        .books
        .create(book(9_780_201_079_814, "The UNIX Programming Environment"))
        .unwrap();

    for isbn in [first_isbn, second.isbn] {
        catalog
            .authorships
            .create(Authorship {
                book_isbn: isbn,
                author_id,
            })
            .unwrap();
    }

    let expanded = catalog.authors.get_expanded(author_id).unwrap().unwrap();
    assert_eq!(
        expanded.authorships.len(),
        2,
        "an author may appear in many links"
    );
}

// =============================================================================
// UPDATE / DELETE
// =============================================================================

#[test]
fn test_update_path_and_payload_isbn_must_agree() {
    let catalog = create_catalog();
    let (author_id, isbn) = seeded(&catalog);
    catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id,
        })
        .unwrap();

    let err = catalog
        .authorships
        .update(
            isbn,
            Authorship {
                book_isbn: Isbn::new(1),
                author_id,
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::IdentifierMismatch { .. }));
}

#[test]
fn test_delete_is_idempotent() {
    let catalog = create_catalog();
    let (author_id, isbn) = seeded(&catalog);
    catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id,
        })
        .unwrap();

    catalog.authorships.delete(isbn).unwrap();
    catalog.authorships.delete(isbn).unwrap();
    assert!(catalog.authorships.get(isbn).unwrap().is_none());
}

// =============================================================================
// DELETE POLICIES ON REFERENCED ROWS
// =============================================================================

#[test]
fn test_deleting_linked_author_is_refused() {
    let catalog = create_catalog();
    let (author_id, isbn) = seeded(&catalog);
    catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id,
        })
        .unwrap();

    let err = catalog.authors.delete(author_id).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "reject, never cascade");

    // Clearing the link first makes the delete legal.
    catalog.authorships.delete(isbn).unwrap();
    catalog.authors.delete(author_id).unwrap();
}

#[test]
fn test_deleting_linked_book_is_refused() {
    let catalog = create_catalog();
    let (author_id, isbn) = seeded(&catalog);
    catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id,
        })
        .unwrap();

    let err = catalog.books.delete(isbn).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    catalog.authorships.delete(isbn).unwrap();
    catalog.books.delete(isbn).unwrap();
}

// =============================================================================
// EXPANSION
// =============================================================================

#[test]
fn test_list_expanded_resolves_author_and_book() {
    let catalog = create_catalog();
    let (author_id, isbn) = seeded(&catalog);
    catalog
        .authorships
        .create(Authorship {
            book_isbn: isbn,
            author_id,
        })
        .unwrap();

    let expanded = catalog.authorships.list_expanded().unwrap();
    assert_eq!(expanded.len(), 1);
    assert_eq!(
        expanded[0]
            .author
            .as_ref()
            .and_then(|a| a.surname.as_deref()),
        Some("Kernighan")
    );
    assert_eq!(
        expanded[0].book.as_ref().and_then(|b| b.title.as_deref()),
        Some("The C Programming Language")
    );
}
