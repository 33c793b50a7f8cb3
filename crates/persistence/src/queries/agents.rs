// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent directory queries.

use diesel::prelude::*;

use crate::data_models::AgentRow;
use crate::diesel_schema::agents;
use crate::error::PersistenceError;

/// Loads a single agent by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_agent(
    conn: &mut SqliteConnection,
    agent_id: i64,
) -> Result<Option<AgentRow>, PersistenceError> {
    Ok(agents::table
        .filter(agents::agent_id.eq(agent_id))
        .first::<AgentRow>(conn)
        .optional()?)
}

/// Lists agents ordered by name, optionally filtered by a name substring.
///
/// The filter uses SQL `LIKE`, which is case-insensitive for ASCII in
/// `SQLite`. `%` and `_` in the fragment match literally, not as
/// wildcards.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_agents(
    conn: &mut SqliteConnection,
    name_filter: Option<&str>,
) -> Result<Vec<AgentRow>, PersistenceError> {
    let mut query = agents::table.into_boxed();
    if let Some(fragment) = name_filter {
        let trimmed = fragment.trim();
        if !trimmed.is_empty() {
            let escaped = escape_like_fragment(trimmed);
            query = query.filter(agents::name.like(format!("%{escaped}%")).escape('\\'));
        }
    }
    Ok(query.order(agents::name.asc()).load::<AgentRow>(conn)?)
}

fn escape_like_fragment(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for character in fragment.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

/// Counts all agents in the directory.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_agents(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(agents::table.count().get_result(conn)?)
}
