// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movement lifecycle rules.
//!
//! The ledger owns the open/close semantics for movements:
//!
//! - one active movement per agent at any time;
//! - exit date on or after entry date, set exactly once;
//! - closed movements never reopen.
//!
//! These functions are pure: they validate commands and observed state, and
//! leave the race-proof enforcement of the one-active invariant to the
//! storage layer's partial unique index. The checks here exist to reject bad
//! input early and to classify what was observed.

use crate::error::CoreError;
use pastoral_domain::{DomainError, Movement, parse_iso_date};
use time::Date;

/// A request to open a movement, as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMovementCommand {
    /// The agent to open the movement for.
    pub agent_id: i64,
    /// The parish dimension value.
    pub parish_id: i64,
    /// The pastoral group dimension value.
    pub pastoral_group_id: i64,
    /// The role/function dimension value.
    pub role_function_id: i64,
    /// Entry date as an ISO 8601 string.
    pub entry_date: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// An open command whose fields have passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOpen {
    /// The agent to open the movement for.
    pub agent_id: i64,
    /// The parish dimension value.
    pub parish_id: i64,
    /// The pastoral group dimension value.
    pub pastoral_group_id: i64,
    /// The role/function dimension value.
    pub role_function_id: i64,
    /// The parsed entry date.
    pub entry_date: Date,
    /// Notes, trimmed, with empty collapsed to `None`.
    pub notes: Option<String>,
}

/// Validates an open-movement command.
///
/// All four references must be present (positive identifiers) and the entry
/// date must be a valid calendar date. Whether the referenced rows actually
/// exist is checked by the caller against the store.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` naming the first offending field.
pub fn validate_open_movement(command: &OpenMovementCommand) -> Result<ValidatedOpen, CoreError> {
    require_reference("agent_id", command.agent_id)?;
    require_reference("parish_id", command.parish_id)?;
    require_reference("pastoral_group_id", command.pastoral_group_id)?;
    require_reference("role_function_id", command.role_function_id)?;

    if command.entry_date.trim().is_empty() {
        return Err(DomainError::MissingField("entry_date").into());
    }
    let entry_date: Date = parse_iso_date(&command.entry_date, "entry_date")?;

    Ok(ValidatedOpen {
        agent_id: command.agent_id,
        parish_id: command.parish_id,
        pastoral_group_id: command.pastoral_group_id,
        role_function_id: command.role_function_id,
        entry_date,
        notes: normalize_notes(command.notes.as_deref()),
    })
}

/// Validates a close against the movement being closed.
///
/// The movement must still be active, and the exit date must be a valid
/// calendar date on or after the entry date. An exit date equal to the entry
/// date is a valid zero-length movement.
///
/// # Errors
///
/// - `CoreError::ActiveMovementNotFound` if the movement is already closed
/// - `CoreError::DomainViolation` if the exit date is malformed or precedes
///   the entry date
pub fn validate_close_movement(movement: &Movement, exit_date: &str) -> Result<Date, CoreError> {
    if !movement.is_active() {
        return Err(CoreError::ActiveMovementNotFound {
            movement_id: movement.movement_id,
        });
    }

    if exit_date.trim().is_empty() {
        return Err(DomainError::MissingField("exit_date").into());
    }
    let parsed: Date = parse_iso_date(exit_date, "exit_date")?;

    if parsed < movement.entry_date {
        return Err(DomainError::ExitBeforeEntry {
            entry_date: movement.entry_date,
            exit_date: parsed,
        }
        .into());
    }

    Ok(parsed)
}

/// Checks the observed active movements of an agent before an open.
///
/// This pre-check produces a friendly conflict before the insert is even
/// attempted. It may lose a race with a concurrent open; the storage
/// constraint then rejects the insert atomically.
///
/// # Errors
///
/// - `CoreError::ActiveMovementExists` if one active movement was observed
/// - `CoreError::MultipleActiveMovements` if more than one was observed
pub fn require_no_active_movement(agent_id: i64, active: &[Movement]) -> Result<(), CoreError> {
    match active.len() {
        0 => Ok(()),
        1 => Err(CoreError::ActiveMovementExists { agent_id }),
        count => Err(CoreError::MultipleActiveMovements { agent_id, count }),
    }
}

/// Reduces the observed active movements of an agent to at most one.
///
/// # Errors
///
/// Returns `CoreError::MultipleActiveMovements` when the one-active
/// invariant is observed broken. The caller must treat that as fatal.
pub fn single_active(agent_id: i64, active: Vec<Movement>) -> Result<Option<Movement>, CoreError> {
    let count: usize = active.len();
    if count > 1 {
        return Err(CoreError::MultipleActiveMovements { agent_id, count });
    }
    Ok(active.into_iter().next())
}

fn require_reference(field: &'static str, value: i64) -> Result<(), CoreError> {
    if value <= 0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidReference {
            field,
            value,
        }));
    }
    Ok(())
}

fn normalize_notes(notes: Option<&str>) -> Option<String> {
    let trimmed: &str = notes?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
