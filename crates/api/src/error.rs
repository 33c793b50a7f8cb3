// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pastoral::CoreError;
use pastoral_domain::DomainError;
use pastoral_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract. Each variant corresponds to one HTTP status at the server
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed. The actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request conflicts with current state. Retrying without changing
    /// state will fail again.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The storage layer was busy. The same request may succeed on retry.
    Transient {
        /// A description of the transient failure.
        message: String,
    },
    /// Stored data violates an invariant. Surfaced, never repaired.
    DataIntegrity {
        /// A description of the broken invariant.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Transient { message } => {
                write!(f, "Temporarily unavailable: {message}")
            }
            Self::DataIntegrity { message } => {
                write!(f, "Data integrity violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Field '{field}' is required"),
        },
        DomainError::InvalidReference { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid reference for '{field}': {value}"),
        },
        DomainError::DateParseError { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid date '{value}'. Expected YYYY-MM-DD"),
        },
        DomainError::ExitBeforeEntry {
            entry_date,
            exit_date,
        } => ApiError::InvalidInput {
            field: String::from("exit_date"),
            message: format!("Exit date {exit_date} precedes entry date {entry_date}"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidLookupName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ActiveMovementExists { agent_id } => ApiError::Conflict {
            rule: String::from("one_active_movement_per_agent"),
            message: format!("Agent {agent_id} already has an active movement"),
        },
        CoreError::ActiveMovementNotFound { movement_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Active movement"),
            message: format!("Movement {movement_id} does not exist or is already closed"),
        },
        CoreError::MultipleActiveMovements { agent_id, count } => ApiError::DataIntegrity {
            message: format!("Agent {agent_id} has {count} active movements, expected at most one"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint violations become conflicts, busy timeouts become transient
/// failures, and everything unexpected collapses to `Internal` without
/// leaking storage detail.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::ActiveMovementExists { agent_id } => ApiError::Conflict {
            rule: String::from("one_active_movement_per_agent"),
            message: format!("Agent {agent_id} already has an active movement"),
        },
        PersistenceError::DuplicateName(name) => ApiError::Conflict {
            rule: String::from("unique_name"),
            message: format!("Name '{name}' is already in use"),
        },
        PersistenceError::LookupInUse { kind, id } => ApiError::Conflict {
            rule: String::from("lookup_in_use"),
            message: format!("Cannot delete {kind} {id}: movements still reference it"),
        },
        PersistenceError::Timeout(message) => ApiError::Transient { message },
        PersistenceError::IntegrityViolation(message) => ApiError::DataIntegrity { message },
        PersistenceError::SessionNotFound(reason) => ApiError::AuthenticationFailed { reason },
        PersistenceError::OperatorNotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message,
        },
        _ => ApiError::Internal {
            message: format!("Storage error: {err}"),
        },
    }
}
