// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session queries.

use diesel::prelude::*;

use crate::data_models::{OperatorData, OperatorRow, SessionData};
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;

/// Loads an operator by id.
///
/// # Errors
///
/// Returns `PersistenceError::OperatorNotFound` if no such operator exists.
pub fn get_operator(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<OperatorData, PersistenceError> {
    let row: Option<OperatorRow> = operators::table
        .filter(operators::operator_id.eq(operator_id))
        .first::<OperatorRow>(conn)
        .optional()?;
    row.map(OperatorRow::into_operator_data)
        .ok_or_else(|| PersistenceError::OperatorNotFound(format!("operator id {operator_id}")))
}

/// Loads an operator row by login name, including the stored password hash.
///
/// The login name is normalized to uppercase to match how it is stored, so
/// the lookup is case-insensitive.
///
/// Only the authentication path needs the hash, so the row type stays
/// crate-private and this returns the pieces the caller verifies against.
///
/// # Errors
///
/// Returns `PersistenceError::OperatorNotFound` if no such operator exists.
pub fn get_operator_credentials(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<(OperatorData, String), PersistenceError> {
    let normalized_login: String = login_name.to_uppercase();

    let row: Option<OperatorRow> = operators::table
        .filter(operators::login_name.eq(&normalized_login))
        .first::<OperatorRow>(conn)
        .optional()?;
    row.map(|row| {
        let hash = row.password_hash.clone();
        (row.into_operator_data(), hash)
    })
    .ok_or_else(|| PersistenceError::OperatorNotFound(format!("login name {login_name}")))
}

/// Counts all operators, disabled ones included.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_operators(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(operators::table.count().get_result(conn)?)
}

/// Loads a session by its token.
///
/// # Errors
///
/// Returns `PersistenceError::SessionNotFound` if no such session exists.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<SessionData, PersistenceError> {
    let row: Option<SessionData> = sessions::table
        .filter(sessions::session_token.eq(token))
        .first::<SessionData>(conn)
        .optional()?;
    row.ok_or_else(|| PersistenceError::SessionNotFound("unknown session token".to_string()))
}
