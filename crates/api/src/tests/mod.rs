// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod auth_tests;
mod csv_tests;
mod operator_tests;
mod report_tests;

use pastoral_domain::LookupKind;
use pastoral_persistence::SqlitePersistence;

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers;
use crate::request_response::{AgentRequest, OpenMovementRequest};

fn setup() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("1"), Role::Admin)
}

fn cadastrador() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("2"), Role::Cadastrador)
}

fn consulta() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("3"), Role::Consulta)
}

/// Seeds one item per lookup kind and returns (parish, group, role) ids.
fn seed_lookups(persistence: &mut SqlitePersistence) -> (i64, i64, i64) {
    let parish_id = persistence
        .create_lookup(LookupKind::Parish, "Paroquia Matriz")
        .unwrap();
    let group_id = persistence
        .create_lookup(LookupKind::PastoralGroup, "Catequese")
        .unwrap();
    let role_id = persistence
        .create_lookup(LookupKind::RoleFunction, "Coordenador")
        .unwrap();
    (parish_id, group_id, role_id)
}

fn agent_request(name: &str) -> AgentRequest {
    AgentRequest {
        name: name.to_string(),
        birth_date: None,
        address: None,
        contact: Some(String::from("11 99999-0000")),
        email: None,
        notes: None,
    }
}

fn create_test_agent(persistence: &mut SqlitePersistence, name: &str) -> i64 {
    handlers::create_agent(persistence, &agent_request(name), &admin())
        .unwrap()
        .agent_id
}

fn open_test_movement(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    refs: (i64, i64, i64),
    entry_date: &str,
) -> i64 {
    let request = OpenMovementRequest {
        parish_id: refs.0,
        pastoral_group_id: refs.1,
        role_function_id: refs.2,
        entry_date: entry_date.to_string(),
        notes: None,
    };
    handlers::open_movement(persistence, agent_id, &request, &admin())
        .unwrap()
        .movement_id
}
