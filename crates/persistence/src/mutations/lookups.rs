// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lookup table mutations.
//!
//! Name uniqueness is enforced by the schema; a unique violation surfaces
//! as `DuplicateName`. Deleting an item still referenced by a movement is
//! blocked by the `RESTRICT` foreign keys and surfaces as `LookupInUse`.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pastoral_domain::LookupKind;

use crate::diesel_schema::{parishes, pastoral_groups, role_functions};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

fn map_insert_error(err: DieselError, name: &str) -> PersistenceError {
    match &err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateName(name.to_string())
        }
        _ => err.into(),
    }
}

fn map_delete_error(err: DieselError, kind: LookupKind, id: i64) -> PersistenceError {
    match &err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            PersistenceError::LookupInUse {
                kind: kind.as_str().to_string(),
                id,
            }
        }
        _ => err.into(),
    }
}

/// Inserts a new lookup item and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateName` if the name is already taken
/// within the kind.
pub fn create_lookup(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    name: &str,
) -> Result<i64, PersistenceError> {
    let result = match kind {
        LookupKind::Parish => diesel::insert_into(parishes::table)
            .values(parishes::name.eq(name))
            .execute(conn),
        LookupKind::PastoralGroup => diesel::insert_into(pastoral_groups::table)
            .values(pastoral_groups::name.eq(name))
            .execute(conn),
        LookupKind::RoleFunction => diesel::insert_into(role_functions::table)
            .values(role_functions::name.eq(name))
            .execute(conn),
    };
    result.map_err(|e| map_insert_error(e, name))?;
    get_last_insert_rowid(conn)
}

/// Renames an existing lookup item.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the item does not exist, or
/// `PersistenceError::DuplicateName` if the new name is already taken.
pub fn rename_lookup(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    let result = match kind {
        LookupKind::Parish => {
            diesel::update(parishes::table.filter(parishes::parish_id.eq(id)))
                .set(parishes::name.eq(name))
                .execute(conn)
        }
        LookupKind::PastoralGroup => {
            diesel::update(pastoral_groups::table.filter(pastoral_groups::pastoral_group_id.eq(id)))
                .set(pastoral_groups::name.eq(name))
                .execute(conn)
        }
        LookupKind::RoleFunction => {
            diesel::update(role_functions::table.filter(role_functions::role_function_id.eq(id)))
                .set(role_functions::name.eq(name))
                .execute(conn)
        }
    };
    let updated = result.map_err(|e| map_insert_error(e, name))?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "{} id {id}",
            kind.as_str()
        )));
    }
    Ok(())
}

/// Deletes a lookup item.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the item does not exist, or
/// `PersistenceError::LookupInUse` if a movement still references it.
pub fn delete_lookup(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    id: i64,
) -> Result<(), PersistenceError> {
    let result = match kind {
        LookupKind::Parish => {
            diesel::delete(parishes::table.filter(parishes::parish_id.eq(id))).execute(conn)
        }
        LookupKind::PastoralGroup => diesel::delete(
            pastoral_groups::table.filter(pastoral_groups::pastoral_group_id.eq(id)),
        )
        .execute(conn),
        LookupKind::RoleFunction => diesel::delete(
            role_functions::table.filter(role_functions::role_function_id.eq(id)),
        )
        .execute(conn),
    };
    let deleted = result.map_err(|e| map_delete_error(e, kind, id))?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "{} id {id}",
            kind.as_str()
        )));
    }
    Ok(())
}
