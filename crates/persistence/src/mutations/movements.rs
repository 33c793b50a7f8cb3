// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movement mutations.
//!
//! The one-active-movement-per-agent rule is owned by the partial unique
//! index on `movements`; these functions translate the index's unique
//! violation rather than re-checking the rule themselves, so two racing
//! inserts still end with exactly one winner.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::data_models::NewMovement;
use crate::diesel_schema::movements;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new open movement and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::ActiveMovementExists` if the agent already
/// holds an open movement, or another error if the insert fails.
pub fn insert_movement(
    conn: &mut SqliteConnection,
    values: &NewMovement<'_>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(movements::table)
        .values(values)
        .execute(conn)
        .map_err(|e| match &e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::ActiveMovementExists {
                    agent_id: values.agent_id,
                }
            }
            _ => e.into(),
        })?;
    get_last_insert_rowid(conn)
}

/// Closes an open movement by setting its exit date.
///
/// The update is conditional on the movement still being open, so a
/// concurrent close loses cleanly instead of overwriting the exit date.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the movement does not exist or
/// is already closed.
pub fn close_movement(
    conn: &mut SqliteConnection,
    movement_id: i64,
    exit_date: &str,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        movements::table
            .filter(movements::movement_id.eq(movement_id))
            .filter(movements::exit_date.is_null()),
    )
    .set(movements::exit_date.eq(exit_date))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "open movement id {movement_id}"
        )));
    }
    Ok(())
}
