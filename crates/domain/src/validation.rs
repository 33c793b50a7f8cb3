// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by the ledger and the directory surface.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// # Arguments
///
/// * `value` - The date string to parse
/// * `field` - The field name used in error messages
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// ISO 8601 calendar date.
pub fn parse_iso_date(value: &str, field: &'static str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|_| DomainError::DateParseError {
        field,
        value: value.to_string(),
    })
}

/// Validates an agent name: non-empty after trimming.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty.
pub fn validate_agent_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Agent name must not be empty",
        )));
    }
    Ok(())
}

/// Validates a lookup value name: non-empty after trimming.
///
/// # Errors
///
/// Returns `DomainError::InvalidLookupName` if the name is empty.
pub fn validate_lookup_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidLookupName(String::from(
            "Lookup value name must not be empty",
        )));
    }
    Ok(())
}
