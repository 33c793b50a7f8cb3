// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movement queries, including the joined projections the report and the
//! agent history views are built from.
//!
//! Dates are stored as `YYYY-MM-DD` text, so lexicographic comparison in
//! SQL is also chronological comparison and cutoffs can be pushed down as
//! plain string filters.

use diesel::prelude::*;
use pastoral::{ActiveRow, LookupRef};
use pastoral_domain::{Movement, parse_iso_date};

use crate::data_models::{MovementRow, MovementWithNames};
use crate::diesel_schema::{agents, movements, parishes, pastoral_groups, role_functions};
use crate::error::PersistenceError;

/// Loads a single movement by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored dates do not parse.
pub fn get_movement(
    conn: &mut SqliteConnection,
    movement_id: i64,
) -> Result<Option<Movement>, PersistenceError> {
    let row: Option<MovementRow> = movements::table
        .filter(movements::movement_id.eq(movement_id))
        .first::<MovementRow>(conn)
        .optional()?;
    row.map(MovementRow::into_movement).transpose()
}

/// Loads all open movements for one agent.
///
/// Under the partial unique index this returns at most one row; callers
/// still receive the full list so they can detect a corrupted store.
///
/// # Errors
///
/// Returns an error if the query fails or the stored dates do not parse.
pub fn active_movements_for_agent(
    conn: &mut SqliteConnection,
    agent_id: i64,
) -> Result<Vec<Movement>, PersistenceError> {
    let rows: Vec<MovementRow> = movements::table
        .filter(movements::agent_id.eq(agent_id))
        .filter(movements::exit_date.is_null())
        .order(movements::movement_id.asc())
        .load::<MovementRow>(conn)?;
    rows.into_iter().map(MovementRow::into_movement).collect()
}

/// Loads all open movements joined with their display names.
///
/// `entered_on_or_after` and `entered_on_or_before` are inclusive
/// `YYYY-MM-DD` cutoffs on the entry date; either may be omitted.
///
/// # Errors
///
/// Returns an error if the query fails or a stored entry date does not
/// parse.
pub fn active_rows(
    conn: &mut SqliteConnection,
    entered_on_or_after: Option<&str>,
    entered_on_or_before: Option<&str>,
) -> Result<Vec<ActiveRow>, PersistenceError> {
    let mut query = movements::table
        .inner_join(agents::table)
        .inner_join(parishes::table)
        .inner_join(pastoral_groups::table)
        .inner_join(role_functions::table)
        .filter(movements::exit_date.is_null())
        .into_boxed();
    if let Some(cutoff) = entered_on_or_after {
        query = query.filter(movements::entry_date.ge(cutoff.to_string()));
    }
    if let Some(cutoff) = entered_on_or_before {
        query = query.filter(movements::entry_date.le(cutoff.to_string()));
    }

    type Row = (
        i64,
        i64,
        String,
        i64,
        String,
        i64,
        String,
        i64,
        String,
        String,
    );
    let rows: Vec<Row> = query
        .select((
            movements::movement_id,
            movements::agent_id,
            agents::name,
            parishes::parish_id,
            parishes::name,
            pastoral_groups::pastoral_group_id,
            pastoral_groups::name,
            role_functions::role_function_id,
            role_functions::name,
            movements::entry_date,
        ))
        .order(movements::movement_id.asc())
        .load::<Row>(conn)?;

    rows.into_iter()
        .map(
            |(
                movement_id,
                agent_id,
                agent_name,
                parish_id,
                parish_name,
                group_id,
                group_name,
                role_id,
                role_name,
                entry_date,
            )| {
                let entry_date = parse_iso_date(&entry_date, "entry_date").map_err(|e| {
                    PersistenceError::IntegrityViolation(format!("movement {movement_id}: {e}"))
                })?;
                Ok(ActiveRow {
                    movement_id,
                    agent_id,
                    agent_name,
                    parish: LookupRef {
                        id: parish_id,
                        name: parish_name,
                    },
                    pastoral_group: LookupRef {
                        id: group_id,
                        name: group_name,
                    },
                    role_function: LookupRef {
                        id: role_id,
                        name: role_name,
                    },
                    entry_date,
                })
            },
        )
        .collect()
}

/// Loads an agent's full movement history with display names resolved,
/// newest entry first.
///
/// # Errors
///
/// Returns an error if the query fails or the stored dates do not parse.
pub fn history_with_names(
    conn: &mut SqliteConnection,
    agent_id: i64,
) -> Result<Vec<MovementWithNames>, PersistenceError> {
    let rows: Vec<(MovementRow, String, String, String)> = movements::table
        .inner_join(parishes::table)
        .inner_join(pastoral_groups::table)
        .inner_join(role_functions::table)
        .filter(movements::agent_id.eq(agent_id))
        .select((
            movements::all_columns,
            parishes::name,
            pastoral_groups::name,
            role_functions::name,
        ))
        .order((movements::entry_date.desc(), movements::movement_id.asc()))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, parish_name, pastoral_group_name, role_function_name)| {
            Ok(MovementWithNames {
                movement: row.into_movement()?,
                parish_name,
                pastoral_group_name,
                role_function_name,
            })
        })
        .collect()
}

/// Counts movements whose entry date falls in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_entries_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<i64, PersistenceError> {
    Ok(movements::table
        .filter(movements::entry_date.ge(start.to_string()))
        .filter(movements::entry_date.lt(end.to_string()))
        .count()
        .get_result(conn)?)
}

/// Counts movements whose exit date falls in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_exits_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<i64, PersistenceError> {
    Ok(movements::table
        .filter(movements::exit_date.is_not_null())
        .filter(movements::exit_date.ge(Some(start.to_string())))
        .filter(movements::exit_date.lt(Some(end.to_string())))
        .count()
        .get_result(conn)?)
}

/// Counts open movements.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(movements::table
        .filter(movements::exit_date.is_null())
        .count()
        .get_result(conn)?)
}
