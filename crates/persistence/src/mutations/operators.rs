// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session mutations. Password hashing stays behind this
//! boundary so plaintext passwords never reach a table.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new operator with a bcrypt-hashed password and returns its id.
///
/// The login name is stored uppercased; lookups normalize the same way, so
/// logins are case-insensitive.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateName` if the login name is taken, or
/// `PersistenceError::Other` if hashing fails.
pub fn create_operator(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.to_uppercase();

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Password hashing failed: {e}")))?;

    diesel::insert_into(operators::table)
        .values((
            operators::login_name.eq(&normalized_login),
            operators::display_name.eq(display_name),
            operators::password_hash.eq(&password_hash),
            operators::role.eq(role),
            operators::is_disabled.eq(0),
        ))
        .execute(conn)
        .map_err(|e| match &e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateName(normalized_login.clone())
            }
            _ => e.into(),
        })?;
    get_last_insert_rowid(conn)
}

/// Records a successful login time for an operator.
///
/// # Errors
///
/// Returns `PersistenceError::OperatorNotFound` if the operator does not
/// exist.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    operator_id: i64,
    logged_in_at: &str,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(operators::table.filter(operators::operator_id.eq(operator_id)))
        .set(operators::last_login_at.eq(logged_in_at))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::OperatorNotFound(format!(
            "operator id {operator_id}"
        )));
    }
    Ok(())
}

/// Inserts a new session row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    token: &str,
    operator_id: i64,
    expires_at: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(token),
            sessions::operator_id.eq(operator_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token. Deleting an unknown token is not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(token))).execute(conn)?;
    Ok(())
}
