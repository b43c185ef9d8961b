//! Catalog API comprehensive test suite
//!
//! Exercises the public `Catalog` facade end to end: the uniform CRUD
//! contract per entity, referential integrity and delete policies,
//! relation expansion, the optimistic-conflict resolution protocol, and
//! journal-backed recovery.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test catalog_api
//!
//! # Run one area
//! cargo test --test catalog_api authorships::
//! ```

use catalogdb::prelude::*;

pub mod authorships;
pub mod books;
pub mod concurrency;
pub mod durability;
pub mod provisioning;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Create an ephemeral catalog for testing.
pub fn create_catalog() -> Catalog {
    init_tracing();
    Catalog::ephemeral().expect("ephemeral catalog should open")
}

/// Route store logs through the test writer; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// An author payload; the id is store-assigned on create.
pub fn author(name: &str, surname: &str) -> Author {
    Author {
        id: AuthorId::new(0),
        name: Some(name.to_string()),
        surname: Some(surname.to_string()),
    }
}

/// A publisher payload; the id is store-assigned on create.
pub fn publisher(name: &str, location: &str) -> Publisher {
    Publisher {
        id: PublisherId::new(0),
        name: Some(name.to_string()),
        location: Some(location.to_string()),
    }
}

/// A book payload with no publisher reference.
pub fn book(isbn: i64, title: &str) -> Book {
    Book {
        isbn: Isbn::new(isbn),
        publisher_id: None,
        title: Some(title.to_string()),
        synopsis: None,
        page_count: Some("272".to_string()),
    }
}
