// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries over the three lookup tables (parishes, pastoral groups and
//! role functions). The tables share a shape but diesel's DSL is
//! monomorphic per table, so each kind dispatches to its own query.

use diesel::prelude::*;
use pastoral_domain::{LookupItem, LookupKind};

use crate::diesel_schema::{parishes, pastoral_groups, role_functions};
use crate::error::PersistenceError;

/// Lists all items of the given lookup kind ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_lookup(
    conn: &mut SqliteConnection,
    kind: LookupKind,
) -> Result<Vec<LookupItem>, PersistenceError> {
    let rows: Vec<(i64, String)> = match kind {
        LookupKind::Parish => parishes::table
            .select((parishes::parish_id, parishes::name))
            .order(parishes::name.asc())
            .load(conn)?,
        LookupKind::PastoralGroup => pastoral_groups::table
            .select((pastoral_groups::pastoral_group_id, pastoral_groups::name))
            .order(pastoral_groups::name.asc())
            .load(conn)?,
        LookupKind::RoleFunction => role_functions::table
            .select((role_functions::role_function_id, role_functions::name))
            .order(role_functions::name.asc())
            .load(conn)?,
    };
    Ok(rows
        .into_iter()
        .map(|(id, name)| LookupItem::with_id(id, name))
        .collect())
}

/// Loads a single lookup item by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_lookup(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    id: i64,
) -> Result<Option<LookupItem>, PersistenceError> {
    let row: Option<(i64, String)> = match kind {
        LookupKind::Parish => parishes::table
            .filter(parishes::parish_id.eq(id))
            .select((parishes::parish_id, parishes::name))
            .first(conn)
            .optional()?,
        LookupKind::PastoralGroup => pastoral_groups::table
            .filter(pastoral_groups::pastoral_group_id.eq(id))
            .select((pastoral_groups::pastoral_group_id, pastoral_groups::name))
            .first(conn)
            .optional()?,
        LookupKind::RoleFunction => role_functions::table
            .filter(role_functions::role_function_id.eq(id))
            .select((role_functions::role_function_id, role_functions::name))
            .first(conn)
            .optional()?,
    };
    Ok(row.map(|(id, name)| LookupItem::with_id(id, name)))
}
