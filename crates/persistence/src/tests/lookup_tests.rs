// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the lookup table persistence operations.

use pastoral_domain::LookupKind;

use super::{create_test_agent, open_test_movement, seed_lookups};
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_create_and_list_orders_by_name() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .create_lookup(LookupKind::Parish, "Santa Rita")
        .unwrap();
    persistence
        .create_lookup(LookupKind::Parish, "Aparecida")
        .unwrap();
    persistence
        .create_lookup(LookupKind::Parish, "Bom Jesus")
        .unwrap();

    let names: Vec<String> = persistence
        .list_lookup(LookupKind::Parish)
        .unwrap()
        .into_iter()
        .map(|item| item.name().to_string())
        .collect();
    assert_eq!(names, vec!["Aparecida", "Bom Jesus", "Santa Rita"]);
}

#[test]
fn test_duplicate_name_within_kind_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .create_lookup(LookupKind::PastoralGroup, "Catequese")
        .unwrap();
    let result = persistence.create_lookup(LookupKind::PastoralGroup, "Catequese");
    assert_eq!(
        result,
        Err(PersistenceError::DuplicateName("Catequese".to_string()))
    );
}

#[test]
fn test_same_name_across_kinds_is_allowed() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    // Uniqueness is scoped per table, not global.
    persistence
        .create_lookup(LookupKind::Parish, "Liturgia")
        .unwrap();
    persistence
        .create_lookup(LookupKind::PastoralGroup, "Liturgia")
        .unwrap();
}

#[test]
fn test_get_lookup() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let id = persistence
        .create_lookup(LookupKind::RoleFunction, "Coordenador")
        .unwrap();

    let item = persistence
        .get_lookup(LookupKind::RoleFunction, id)
        .unwrap()
        .unwrap();
    assert_eq!(item.id(), Some(id));
    assert_eq!(item.name(), "Coordenador");

    assert!(
        persistence
            .get_lookup(LookupKind::RoleFunction, id + 1)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_rename_lookup() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let id = persistence
        .create_lookup(LookupKind::Parish, "Sao Jose")
        .unwrap();
    persistence
        .rename_lookup(LookupKind::Parish, id, "Sao Jose Operario")
        .unwrap();

    let item = persistence
        .get_lookup(LookupKind::Parish, id)
        .unwrap()
        .unwrap();
    assert_eq!(item.name(), "Sao Jose Operario");
}

#[test]
fn test_rename_to_taken_name_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .create_lookup(LookupKind::Parish, "Aparecida")
        .unwrap();
    let id = persistence
        .create_lookup(LookupKind::Parish, "Bom Jesus")
        .unwrap();

    let result = persistence.rename_lookup(LookupKind::Parish, id, "Aparecida");
    assert_eq!(
        result,
        Err(PersistenceError::DuplicateName("Aparecida".to_string()))
    );
}

#[test]
fn test_rename_missing_lookup_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.rename_lookup(LookupKind::Parish, 42, "Anything");
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_unused_lookup() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let id = persistence
        .create_lookup(LookupKind::Parish, "Aparecida")
        .unwrap();
    persistence.delete_lookup(LookupKind::Parish, id).unwrap();

    assert!(
        persistence
            .get_lookup(LookupKind::Parish, id)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_referenced_lookup_is_blocked() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let refs = seed_lookups(&mut persistence);
    let agent_id = create_test_agent(&mut persistence, "Maria Souza");
    open_test_movement(&mut persistence, agent_id, refs, "2024-01-10");

    let result = persistence.delete_lookup(LookupKind::Parish, refs.0);
    assert_eq!(
        result,
        Err(PersistenceError::LookupInUse {
            kind: "parish".to_string(),
            id: refs.0,
        })
    );

    // The row survives the failed delete.
    assert!(
        persistence
            .get_lookup(LookupKind::Parish, refs.0)
            .unwrap()
            .is_some()
    );
}
