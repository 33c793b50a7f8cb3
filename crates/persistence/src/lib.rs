// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Pastoral Agents Registry.
//!
//! This crate stores the agent directory, the movement ledger, the lookup
//! tables and the operator accounts in `SQLite` via Diesel. The
//! one-active-movement-per-agent rule lives here as a partial unique index
//! so it holds even under concurrent writers.
//!
//! Dates are stored as `YYYY-MM-DD` text. Lexicographic order on that
//! format matches chronological order, which keeps cutoff filters inside
//! SQL.
//!
//! Tests run against unique shared in-memory databases so they stay fast
//! and isolated without touching disk.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use pastoral::ActiveRow;
use pastoral_domain::{Agent, LookupItem, LookupKind, Movement};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so test
/// databases never collide.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{MovementWithNames, NewMovement, OperatorData, SessionData};
pub use error::PersistenceError;

/// Persistence adapter owning a single `SQLite` connection.
///
/// Callers serialise access themselves (the server wraps this in a mutex);
/// the adapter assumes exclusive use of its connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

/// Type alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = sqlite::initialize_database(path_str)?;

        // WAL improves read concurrency for file-backed databases.
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Inserts a new agent and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_agent(&mut self, agent: &Agent) -> Result<i64, PersistenceError> {
        mutations::agents::create_agent(&mut self.conn, agent)
    }

    /// Loads an agent by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_agent(&mut self, agent_id: i64) -> Result<Option<Agent>, PersistenceError> {
        Ok(queries::agents::get_agent(&mut self.conn, agent_id)?.map(|row| row.into_agent()))
    }

    /// Lists agents ordered by name, optionally filtered by a name
    /// substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_agents(
        &mut self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Agent>, PersistenceError> {
        Ok(queries::agents::list_agents(&mut self.conn, name_filter)?
            .into_iter()
            .map(data_models::AgentRow::into_agent)
            .collect())
    }

    /// Counts all agents.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_agents(&mut self) -> Result<i64, PersistenceError> {
        queries::agents::count_agents(&mut self.conn)
    }

    /// Updates an existing agent's directory fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the agent does not exist.
    pub fn update_agent(&mut self, agent_id: i64, agent: &Agent) -> Result<(), PersistenceError> {
        mutations::agents::update_agent(&mut self.conn, agent_id, agent)
    }

    /// Deletes an agent along with its movement history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the agent does not exist.
    pub fn delete_agent(&mut self, agent_id: i64) -> Result<(), PersistenceError> {
        mutations::agents::delete_agent(&mut self.conn, agent_id)
    }

    // ========================================================================
    // Movements
    // ========================================================================

    /// Inserts a new open movement and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ActiveMovementExists` if the agent
    /// already holds an open movement.
    pub fn insert_movement(&mut self, values: &NewMovement<'_>) -> Result<i64, PersistenceError> {
        mutations::movements::insert_movement(&mut self.conn, values)
    }

    /// Closes an open movement by setting its exit date.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the movement does not exist
    /// or is already closed.
    pub fn close_movement(
        &mut self,
        movement_id: i64,
        exit_date: &str,
    ) -> Result<(), PersistenceError> {
        mutations::movements::close_movement(&mut self.conn, movement_id, exit_date)
    }

    /// Loads a single movement by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date does not parse.
    pub fn get_movement(&mut self, movement_id: i64) -> Result<Option<Movement>, PersistenceError> {
        queries::movements::get_movement(&mut self.conn, movement_id)
    }

    /// Loads all open movements for one agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date does not parse.
    pub fn active_movements_for_agent(
        &mut self,
        agent_id: i64,
    ) -> Result<Vec<Movement>, PersistenceError> {
        queries::movements::active_movements_for_agent(&mut self.conn, agent_id)
    }

    /// Loads all open movements joined with their display names, optionally
    /// bounded by inclusive entry-date cutoffs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date does not parse.
    pub fn active_rows(
        &mut self,
        entered_on_or_after: Option<&str>,
        entered_on_or_before: Option<&str>,
    ) -> Result<Vec<ActiveRow>, PersistenceError> {
        queries::movements::active_rows(&mut self.conn, entered_on_or_after, entered_on_or_before)
    }

    /// Loads an agent's full movement history with display names resolved,
    /// newest entry first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date does not parse.
    pub fn history_with_names(
        &mut self,
        agent_id: i64,
    ) -> Result<Vec<MovementWithNames>, PersistenceError> {
        queries::movements::history_with_names(&mut self.conn, agent_id)
    }

    /// Counts movements whose entry date falls in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_entries_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<i64, PersistenceError> {
        queries::movements::count_entries_between(&mut self.conn, start, end)
    }

    /// Counts movements whose exit date falls in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_exits_between(&mut self, start: &str, end: &str) -> Result<i64, PersistenceError> {
        queries::movements::count_exits_between(&mut self.conn, start, end)
    }

    /// Counts open movements.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active(&mut self) -> Result<i64, PersistenceError> {
        queries::movements::count_active(&mut self.conn)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Lists all items of the given lookup kind ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_lookup(&mut self, kind: LookupKind) -> Result<Vec<LookupItem>, PersistenceError> {
        queries::lookups::list_lookup(&mut self.conn, kind)
    }

    /// Loads a single lookup item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_lookup(
        &mut self,
        kind: LookupKind,
        id: i64,
    ) -> Result<Option<LookupItem>, PersistenceError> {
        queries::lookups::get_lookup(&mut self.conn, kind, id)
    }

    /// Inserts a new lookup item and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateName` if the name is already
    /// taken within the kind.
    pub fn create_lookup(
        &mut self,
        kind: LookupKind,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::lookups::create_lookup(&mut self.conn, kind, name)
    }

    /// Renames an existing lookup item.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the item does not exist, or
    /// `PersistenceError::DuplicateName` if the new name is already taken.
    pub fn rename_lookup(
        &mut self,
        kind: LookupKind,
        id: i64,
        name: &str,
    ) -> Result<(), PersistenceError> {
        mutations::lookups::rename_lookup(&mut self.conn, kind, id, name)
    }

    /// Deletes a lookup item.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the item does not exist, or
    /// `PersistenceError::LookupInUse` if a movement still references it.
    pub fn delete_lookup(&mut self, kind: LookupKind, id: i64) -> Result<(), PersistenceError> {
        mutations::lookups::delete_lookup(&mut self.conn, kind, id)
    }

    // ========================================================================
    // Operators & Sessions
    // ========================================================================

    /// Creates a new operator with a bcrypt-hashed password and returns its
    /// id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateName` if the login name is
    /// already taken.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(&mut self.conn, login_name, display_name, password, role)
    }

    /// Loads an operator by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OperatorNotFound` if no such operator
    /// exists.
    pub fn get_operator(&mut self, operator_id: i64) -> Result<OperatorData, PersistenceError> {
        queries::operators::get_operator(&mut self.conn, operator_id)
    }

    /// Loads an operator by login name along with its stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OperatorNotFound` if no such operator
    /// exists.
    pub fn get_operator_credentials(
        &mut self,
        login_name: &str,
    ) -> Result<(OperatorData, String), PersistenceError> {
        queries::operators::get_operator_credentials(&mut self.conn, login_name)
    }

    /// Counts all operators, disabled ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Records a successful login time for an operator.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::OperatorNotFound` if the operator does
    /// not exist.
    pub fn update_last_login(
        &mut self,
        operator_id: i64,
        logged_in_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id, logged_in_at)
    }

    /// Inserts a new session row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::operators::create_session(&mut self.conn, token, operator_id, expires_at)
    }

    /// Loads a session by its token.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SessionNotFound` if no such session
    /// exists.
    pub fn get_session_by_token(&mut self, token: &str) -> Result<SessionData, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, token)
    }

    /// Deletes a session by token. Deleting an unknown token is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, token)
    }
}
