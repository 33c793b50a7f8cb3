// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use pastoral_domain::{Agent, DomainError, Movement, parse_iso_date};
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{agents, movements};
use crate::error::PersistenceError;

/// An agent row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct AgentRow {
    pub agent_id: i64,
    pub name: String,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl AgentRow {
    /// Converts the stored row into the domain type.
    #[must_use]
    pub fn into_agent(self) -> Agent {
        Agent {
            agent_id: Some(self.agent_id),
            name: self.name,
            birth_date: self.birth_date,
            address: self.address,
            contact: self.contact,
            email: self.email,
            notes: self.notes,
        }
    }
}

/// Insertable agent values.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = agents)]
pub struct NewAgent<'a> {
    pub name: &'a str,
    pub birth_date: Option<&'a str>,
    pub address: Option<&'a str>,
    pub contact: Option<&'a str>,
    pub email: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// A movement row as stored (dates still as ISO strings).
#[derive(Debug, Clone, Queryable)]
pub struct MovementRow {
    pub movement_id: i64,
    pub agent_id: i64,
    pub parish_id: i64,
    pub pastoral_group_id: i64,
    pub role_function_id: i64,
    pub entry_date: String,
    pub exit_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl MovementRow {
    /// Converts the stored row into the domain type, parsing the dates.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::IntegrityViolation` if a stored date does
    /// not parse; the store never writes such a row itself.
    pub fn into_movement(self) -> Result<Movement, PersistenceError> {
        let movement_id: i64 = self.movement_id;
        let parse = |value: &str, field: &'static str| {
            parse_iso_date(value, field).map_err(|e: DomainError| {
                PersistenceError::IntegrityViolation(format!(
                    "movement {movement_id}: {e}"
                ))
            })
        };

        let entry_date = parse(&self.entry_date, "entry_date")?;
        let exit_date = match &self.exit_date {
            Some(value) => Some(parse(value, "exit_date")?),
            None => None,
        };

        Ok(Movement {
            movement_id: self.movement_id,
            agent_id: self.agent_id,
            parish_id: self.parish_id,
            pastoral_group_id: self.pastoral_group_id,
            role_function_id: self.role_function_id,
            entry_date,
            exit_date,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Insertable movement values.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = movements)]
pub struct NewMovement<'a> {
    pub agent_id: i64,
    pub parish_id: i64,
    pub pastoral_group_id: i64,
    pub role_function_id: i64,
    pub entry_date: &'a str,
    pub notes: Option<&'a str>,
}

/// A movement joined with its resolved display names, for history views.
#[derive(Debug, Clone)]
pub struct MovementWithNames {
    pub movement: Movement,
    pub parish_name: String,
    pub pastoral_group_name: String,
    pub role_function_name: String,
}

/// Operator information exposed to callers (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// An operator row as stored, including the password hash.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct OperatorRow {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: i32,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}

impl OperatorRow {
    pub(crate) fn into_operator_data(self) -> OperatorData {
        OperatorData {
            operator_id: self.operator_id,
            login_name: self.login_name,
            display_name: self.display_name,
            role: self.role,
            is_disabled: self.is_disabled != 0,
            created_at: self.created_at,
            disabled_at: self.disabled_at,
            last_login_at: self.last_login_at,
        }
    }
}

/// A session row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Serialize, Deserialize)]
pub struct SessionData {
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub expires_at: String,
}
