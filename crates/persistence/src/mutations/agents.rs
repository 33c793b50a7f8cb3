// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent directory mutations.

use diesel::prelude::*;
use pastoral_domain::Agent;

use crate::data_models::NewAgent;
use crate::diesel_schema::agents;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new agent and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_agent(conn: &mut SqliteConnection, agent: &Agent) -> Result<i64, PersistenceError> {
    let values = NewAgent {
        name: &agent.name,
        birth_date: agent.birth_date.as_deref(),
        address: agent.address.as_deref(),
        contact: agent.contact.as_deref(),
        email: agent.email.as_deref(),
        notes: agent.notes.as_deref(),
    };
    diesel::insert_into(agents::table)
        .values(&values)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Updates an existing agent's directory fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the agent does not exist.
pub fn update_agent(
    conn: &mut SqliteConnection,
    agent_id: i64,
    agent: &Agent,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(agents::table.filter(agents::agent_id.eq(agent_id)))
        .set((
            agents::name.eq(&agent.name),
            agents::birth_date.eq(agent.birth_date.as_deref()),
            agents::address.eq(agent.address.as_deref()),
            agents::contact.eq(agent.contact.as_deref()),
            agents::email.eq(agent.email.as_deref()),
            agents::notes.eq(agent.notes.as_deref()),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "agent id {agent_id}"
        )));
    }
    Ok(())
}

/// Deletes an agent. The schema cascades the delete to the agent's
/// movements.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the agent does not exist.
pub fn delete_agent(conn: &mut SqliteConnection, agent_id: i64) -> Result<(), PersistenceError> {
    let deleted =
        diesel::delete(agents::table.filter(agents::agent_id.eq(agent_id))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "agent id {agent_id}"
        )));
    }
    Ok(())
}
