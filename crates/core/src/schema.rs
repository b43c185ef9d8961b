//! Static schema description of the catalog
//!
//! One [`EntityDescriptor`] per entity kind: field list with nullability
//! and length bounds, primary key, foreign keys with their delete policy,
//! and the key-reuse marker for the authorship link. The descriptors are
//! consulted by field validation, referential checks, and delete-policy
//! enforcement so that constraints live in exactly one place.
//!
//! [`describe`] is a pure function over static data; the schema carries no
//! mutable state.

use crate::types::EntityKind;

/// Maximum length of every bounded text field in the catalog.
pub const MAX_TEXT_LEN: usize = 45;

/// What happens to dependent rows when their referenced row is deleted.
///
/// The catalog never cascades a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse the delete while live dependents exist (when referential
    /// integrity checking is enabled).
    Reject,
    /// Allow the delete; the dependent keeps a dangling optional
    /// reference that the caller must clear. The store never auto-clears.
    SetNull,
}

/// One field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as it appears on the Rust entity type.
    pub name: &'static str,
    /// Whether the field may be absent.
    pub nullable: bool,
    /// Maximum length for bounded text fields; `None` for identifiers and
    /// unbounded text.
    pub max_len: Option<usize>,
}

/// A foreign key from one entity to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyDescriptor {
    /// Field on the dependent entity holding the reference.
    pub field: &'static str,
    /// Entity kind the reference points at.
    pub references: EntityKind,
    /// Whether the reference is optional on the dependent side.
    pub nullable: bool,
    /// Policy applied when the referenced row is deleted.
    pub on_delete: DeletePolicy,
}

/// Static description of one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// The entity kind this descriptor describes.
    pub kind: EntityKind,
    /// Name of the primary-key field.
    pub primary_key: &'static str,
    /// Whether the primary key is store-generated (`true`) or
    /// caller-supplied (`false`).
    pub generated_key: bool,
    /// For join-like entities, the entity whose key is reused as this
    /// entity's own primary key.
    pub key_reused_from: Option<EntityKind>,
    /// All fields, primary key first.
    pub fields: &'static [FieldDescriptor],
    /// Outgoing foreign keys.
    pub foreign_keys: &'static [ForeignKeyDescriptor],
}

static AUTHOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Author,
    primary_key: "id",
    generated_key: true,
    key_reused_from: None,
    fields: &[
        FieldDescriptor { name: "id", nullable: false, max_len: None },
        FieldDescriptor { name: "name", nullable: true, max_len: Some(MAX_TEXT_LEN) },
        FieldDescriptor { name: "surname", nullable: true, max_len: Some(MAX_TEXT_LEN) },
    ],
    foreign_keys: &[],
};

static BOOK: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Book,
    primary_key: "isbn",
    generated_key: false,
    key_reused_from: None,
    fields: &[
        FieldDescriptor { name: "isbn", nullable: false, max_len: None },
        FieldDescriptor { name: "publisher_id", nullable: true, max_len: None },
        FieldDescriptor { name: "title", nullable: true, max_len: Some(MAX_TEXT_LEN) },
        FieldDescriptor { name: "synopsis", nullable: true, max_len: None },
        FieldDescriptor { name: "page_count", nullable: true, max_len: Some(MAX_TEXT_LEN) },
    ],
    foreign_keys: &[ForeignKeyDescriptor {
        field: "publisher_id",
        references: EntityKind::Publisher,
        nullable: true,
        on_delete: DeletePolicy::SetNull,
    }],
};

static PUBLISHER: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Publisher,
    primary_key: "id",
    generated_key: true,
    key_reused_from: None,
    fields: &[
        FieldDescriptor { name: "id", nullable: false, max_len: None },
        FieldDescriptor { name: "name", nullable: true, max_len: Some(MAX_TEXT_LEN) },
        FieldDescriptor { name: "location", nullable: true, max_len: Some(MAX_TEXT_LEN) },
    ],
    foreign_keys: &[],
};

static AUTHORSHIP: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Authorship,
    primary_key: "book_isbn",
    generated_key: false,
    key_reused_from: Some(EntityKind::Book),
    fields: &[
        FieldDescriptor { name: "book_isbn", nullable: false, max_len: None },
        FieldDescriptor { name: "author_id", nullable: false, max_len: None },
    ],
    foreign_keys: &[
        ForeignKeyDescriptor {
            field: "author_id",
            references: EntityKind::Author,
            nullable: false,
            on_delete: DeletePolicy::Reject,
        },
        ForeignKeyDescriptor {
            field: "book_isbn",
            references: EntityKind::Book,
            nullable: false,
            on_delete: DeletePolicy::Reject,
        },
    ],
};

/// Look up the static descriptor for an entity kind.
pub fn describe(kind: EntityKind) -> &'static EntityDescriptor {
    match kind {
        EntityKind::Author => &AUTHOR,
        EntityKind::Book => &BOOK,
        EntityKind::Publisher => &PUBLISHER,
        EntityKind::Authorship => &AUTHORSHIP,
    }
}

/// Maximum length of a bounded text field, from the descriptor.
///
/// Returns `None` for unbounded or non-text fields, and for unknown field
/// names.
pub fn field_max_len(kind: EntityKind, field: &str) -> Option<usize> {
    describe(kind)
        .fields
        .iter()
        .find(|f| f.name == field)
        .and_then(|f| f.max_len)
}

/// All foreign keys across the schema that reference `kind`, paired with
/// the dependent entity kind.
///
/// Used by delete-policy enforcement: a `Reject` incoming reference with a
/// live dependent refuses the delete.
pub fn incoming_references(
    kind: EntityKind,
) -> impl Iterator<Item = (EntityKind, &'static ForeignKeyDescriptor)> {
    const ALL: [EntityKind; 4] = [
        EntityKind::Author,
        EntityKind::Book,
        EntityKind::Publisher,
        EntityKind::Authorship,
    ];
    ALL.into_iter().flat_map(move |dependent| {
        describe(dependent)
            .foreign_keys
            .iter()
            .filter(move |fk| fk.references == kind)
            .map(move |fk| (dependent, fk))
    })
}
