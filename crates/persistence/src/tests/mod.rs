// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod agent_tests;
mod lookup_tests;

use pastoral_domain::{Agent, LookupKind};

use crate::{NewMovement, SqlitePersistence};

/// Seeds one parish, one pastoral group and one role/function and returns
/// their ids.
pub fn seed_lookups(persistence: &mut SqlitePersistence) -> (i64, i64, i64) {
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

/// Creates an agent with only a name set and returns its id.
pub fn create_test_agent(persistence: &mut SqlitePersistence, name: &str) -> i64 {
    let agent = Agent::new(
        name.to_string(),
        None,
        None,
        Some("11 99999-0000".to_string()),
        None,
        None,
    );
    persistence.create_agent(&agent).unwrap()
}

/// Opens a movement for the agent using the seeded lookup ids.
pub fn open_test_movement(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    refs: (i64, i64, i64),
    entry_date: &str,
) -> i64 {
    let values = NewMovement {
        agent_id,
        parish_id: refs.0,
        pastoral_group_id: refs.1,
        role_function_id: refs.2,
        entry_date,
        notes: None,
    };
    persistence.insert_movement(&values).unwrap()
}
