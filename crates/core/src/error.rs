// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pastoral_domain::DomainError;

/// Errors that can occur while applying ledger rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated (malformed input, invalid dates).
    DomainViolation(DomainError),
    /// The agent already has an active movement.
    ActiveMovementExists {
        /// The agent holding the active movement.
        agent_id: i64,
    },
    /// No active movement matches the given identifier.
    ActiveMovementNotFound {
        /// The requested movement id.
        movement_id: i64,
    },
    /// More than one active movement was observed for an agent.
    ///
    /// This is a data-corruption fault: the storage constraint guarantees at
    /// most one. It must abort the operation, never be resolved by picking
    /// one of the movements arbitrarily.
    MultipleActiveMovements {
        /// The agent with corrupted state.
        agent_id: i64,
        /// How many active movements were observed.
        count: usize,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ActiveMovementExists { agent_id } => {
                write!(f, "Agent {agent_id} already has an active movement")
            }
            Self::ActiveMovementNotFound { movement_id } => {
                write!(f, "No active movement with id {movement_id}")
            }
            Self::MultipleActiveMovements { agent_id, count } => {
                write!(
                    f,
                    "Data corruption: agent {agent_id} has {count} active movements"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
