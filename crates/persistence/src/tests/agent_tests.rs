// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for agent directory persistence operations.

use pastoral_domain::Agent;

use super::{create_test_agent, open_test_movement, seed_lookups};
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_create_and_get_agent() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let agent_id = create_test_agent(&mut persistence, "Maria Souza");

    let agent = persistence.get_agent(agent_id).unwrap().unwrap();
    assert_eq!(agent.agent_id, Some(agent_id));
    assert_eq!(agent.name, "Maria Souza");
    assert_eq!(agent.contact.as_deref(), Some("11 99999-0000"));
    assert!(agent.birth_date.is_none());
}

#[test]
fn test_get_agent_returns_none_for_unknown_id() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(persistence.get_agent(999).unwrap().is_none());
}

#[test]
fn test_list_agents_orders_by_name() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    create_test_agent(&mut persistence, "Carlos Lima");
    create_test_agent(&mut persistence, "Ana Costa");
    create_test_agent(&mut persistence, "Bruno Dias");

    let names: Vec<String> = persistence
        .list_agents(None)
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Ana Costa", "Bruno Dias", "Carlos Lima"]);
}

#[test]
fn test_list_agents_filters_by_name_fragment() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    create_test_agent(&mut persistence, "Maria Souza");
    create_test_agent(&mut persistence, "Mariana Alves");
    create_test_agent(&mut persistence, "Pedro Rocha");

    let names: Vec<String> = persistence
        .list_agents(Some("Maria"))
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Maria Souza", "Mariana Alves"]);
}

#[test]
fn test_filter_treats_like_wildcards_as_literals() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    create_test_agent(&mut persistence, "Grupo 100% Jovem");
    create_test_agent(&mut persistence, "Grupo 1000 Vozes");
    create_test_agent(&mut persistence, "Irma_Lucia");
    create_test_agent(&mut persistence, "IrmaXLucia");

    // "%" must not glob; only the literal occurrence matches.
    let names: Vec<String> = persistence
        .list_agents(Some("100%"))
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Grupo 100% Jovem"]);

    // "_" must not match an arbitrary single character.
    let names: Vec<String> = persistence
        .list_agents(Some("Irma_"))
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Irma_Lucia"]);
}

#[test]
fn test_blank_filter_returns_everyone() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    create_test_agent(&mut persistence, "Maria Souza");
    create_test_agent(&mut persistence, "Pedro Rocha");

    assert_eq!(persistence.list_agents(Some("   ")).unwrap().len(), 2);
}

#[test]
fn test_update_agent_changes_fields() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let agent_id = create_test_agent(&mut persistence, "Maria Souza");

    let updated = Agent::new(
        "Maria Souza Santos".to_string(),
        Some("1980-05-12".to_string()),
        Some("Rua das Flores 10".to_string()),
        None,
        Some("maria@example.com".to_string()),
        None,
    );
    persistence.update_agent(agent_id, &updated).unwrap();

    let agent = persistence.get_agent(agent_id).unwrap().unwrap();
    assert_eq!(agent.name, "Maria Souza Santos");
    assert_eq!(agent.birth_date.as_deref(), Some("1980-05-12"));
    assert_eq!(agent.email.as_deref(), Some("maria@example.com"));
    // The update replaces all fields, including cleared ones.
    assert!(agent.contact.is_none());
}

#[test]
fn test_update_missing_agent_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let agent = Agent::new("Ghost".to_string(), None, None, None, None, None);
    let result = persistence.update_agent(42, &agent);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_agent_cascades_to_movements() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let refs = seed_lookups(&mut persistence);

    let agent_id = create_test_agent(&mut persistence, "Maria Souza");
    let movement_id = open_test_movement(&mut persistence, agent_id, refs, "2024-01-10");

    persistence.delete_agent(agent_id).unwrap();

    assert!(persistence.get_agent(agent_id).unwrap().is_none());
    assert!(persistence.get_movement(movement_id).unwrap().is_none());
}

#[test]
fn test_delete_missing_agent_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.delete_agent(42);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_count_agents() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert_eq!(persistence.count_agents().unwrap(), 0);
    create_test_agent(&mut persistence, "Maria Souza");
    create_test_agent(&mut persistence, "Pedro Rocha");
    assert_eq!(persistence.count_agents().unwrap(), 2);
}
