// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or empty.
    MissingField(&'static str),
    /// A referenced identifier is missing or not positive.
    InvalidReference {
        /// The field holding the reference.
        field: &'static str,
        /// The offending value.
        value: i64,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The field holding the date.
        field: &'static str,
        /// The invalid date string.
        value: String,
    },
    /// Exit date precedes the entry date.
    ExitBeforeEntry {
        /// The movement's entry date.
        entry_date: time::Date,
        /// The rejected exit date.
        exit_date: time::Date,
    },
    /// Agent name is empty or invalid.
    InvalidName(String),
    /// Lookup value name is empty or invalid.
    InvalidLookupName(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::InvalidReference { field, value } => {
                write!(f, "Invalid reference for '{field}': {value}")
            }
            Self::DateParseError { field, value } => {
                write!(f, "Invalid date for '{field}': '{value}' (expected YYYY-MM-DD)")
            }
            Self::ExitBeforeEntry {
                entry_date,
                exit_date,
            } => {
                write!(
                    f,
                    "Exit date {exit_date} precedes entry date {entry_date}"
                )
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidLookupName(msg) => write!(f, "Invalid lookup name: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
