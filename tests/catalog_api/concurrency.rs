//! Optimistic-conflict resolution tests
//!
//! Two sessions race on one row; the loser's conflict resolves through
//! the existence oracle: a vanished row is NotFound, a live one is a
//! fatal conflict. Never a retry, never a merge.

use crate::*;
use catalogdb::{commit_guarded, ExistenceOracle, Session};

#[test]
fn test_update_after_concurrent_delete_resolves_to_not_found() {
    let catalog = create_catalog();
    let created = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
    let store = catalog.store().clone();

    // Session A reads the row, capturing its concurrency token.
    let token = store
        .authors()
        .unwrap()
        .version_of(&created.id)
        .expect("row was just created");

    // Session B deletes the row and commits.
    catalog.authors.delete(created.id).unwrap();

    // Session A now commits its update against the stale token.
    let mut session_a = Session::new(store.clone());
    session_a.stage_update(
        token,
        Author {
            id: created.id,
            name: Some("B.".to_string()),
            surname: Some("Kernighan".to_string()),
        }
        .into(),
    );

    let err = commit_guarded(&store, session_a, EntityRef::Author(created.id)).unwrap_err();
    assert!(
        err.is_not_found(),
        "a concurrent delete must resolve to NotFound, not a conflict; got: {}",
        err
    );
}

#[test]
fn test_update_after_concurrent_update_is_fatal_conflict() {
    let catalog = create_catalog();
    let created = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
    let store = catalog.store().clone();

    let token = store.authors().unwrap().version_of(&created.id).unwrap();

    // Session B rewrites the row first.
    catalog
        .authors
        .update(
            created.id,
            Author {
                id: created.id,
                name: Some("B.".to_string()),
                surname: Some("Kernighan".to_string()),
            },
        )
        .unwrap();

    // Session A commits against the stale token; the row is still live,
    // so the conflict is unresolved and fatal.
    let mut session_a = Session::new(store.clone());
    session_a.stage_update(
        token,
        Author {
            id: created.id,
            name: Some("Brian W.".to_string()),
            surname: Some("Kernighan".to_string()),
        }
        .into(),
    );

    let err = commit_guarded(&store, session_a, EntityRef::Author(created.id)).unwrap_err();
    assert!(err.is_conflict());
    assert!(err.is_fault(), "conflicts propagate as faults");

    // Neither writer's intent was merged: session B's row stands.
    let row = catalog.authors.get(created.id).unwrap().unwrap();
    assert_eq!(row.name.as_deref(), Some("B."));
}

#[test]
fn test_oracle_reads_are_fresh() {
    let catalog = create_catalog();
    let created = catalog.authors.create(author("Brian", "Kernighan")).unwrap();
    let store = catalog.store().clone();

    let oracle = ExistenceOracle::new(store);
    let entity = EntityRef::Author(created.id);

    assert!(oracle.exists(&entity).unwrap());
    catalog.authors.delete(created.id).unwrap();
    assert!(
        !oracle.exists(&entity).unwrap(),
        "the oracle must observe the delete immediately"
    );
}
