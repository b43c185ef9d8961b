//! Journal-backed recovery tests

use crate::*;

#[test]
fn test_reopen_recovers_all_entities() {
    let dir = tempfile::tempdir().unwrap();

    let (author_id, publisher_id, isbn) = {
        let catalog = Catalog::open(dir.path()).unwrap();
        let a = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
        let p = catalog
            .publishers
            .create(publisher("Prentice Hall", "Englewood Cliffs"))
            .unwrap();

        let mut payload = book(9_780_131_101_630, "The C Programming Language");
        payload.publisher_id = Some(p.id);
        let b = catalog.books.create(payload).unwrap();

        catalog
            .authorships
            .create(Authorship {
                book_isbn: b.isbn,
                author_id: a.id,
            })
            .unwrap();

        catalog.close().unwrap();
        (a.id, p.id, b.isbn)
    };

    let catalog = Catalog::open(dir.path()).unwrap();
    assert!(!catalog.is_ephemeral());

    let recovered = catalog.authors.get(author_id).unwrap().unwrap();
    assert_eq!(recovered.surname.as_deref(), Some("Kernighan"));

    let expanded = catalog.books.get_expanded(isbn).unwrap().unwrap();
    assert_eq!(
        expanded.publisher.map(|p| p.id),
        Some(publisher_id),
        "relations survive recovery"
    );
    assert!(expanded.authorship.is_some());
}

#[test]
fn test_id_allocation_continues_after_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let catalog = Catalog::open(dir.path()).unwrap();
        catalog.authors.create(author("Brian", "Kernighan")).unwrap();
        catalog.authors.create(author("Dennis", "Ritchie")).unwrap();
        catalog.close().unwrap();
    }

    let catalog = Catalog::open(dir.path()).unwrap();
    let next = catalog.authors.create(author("Ken", "Thompson")).unwrap();
    assert_eq!(
        next.id,
        AuthorId::new(3),
        "ids must not be reused after recovery"
    );
}

#[test]
fn test_deletes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let catalog = Catalog::open(dir.path()).unwrap();
        let created = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
        catalog.authors.delete(created.id).unwrap();
        catalog.close().unwrap();
        created.id
    };

    let catalog = Catalog::open(dir.path()).unwrap();
    assert!(
        catalog.authors.get(id).unwrap().is_none(),
        "a journaled delete must win over the earlier insert"
    );
}

#[test]
fn test_ephemeral_catalog_creates_no_files() {
    let catalog = create_catalog();
    assert!(catalog.is_ephemeral());
    assert!(catalog.path().is_none());
    catalog.flush().unwrap();
}
