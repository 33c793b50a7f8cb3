// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The three flat reference dimensions a movement is classified by.
///
/// Each kind corresponds to one lookup table. The sets are flat and
/// unordered; there is no hierarchy between values or between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    /// The parish an agent serves in.
    Parish,
    /// The pastoral group the agent belongs to.
    PastoralGroup,
    /// The role or function the agent performs.
    RoleFunction,
}

impl LookupKind {
    /// Converts this lookup kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parish => "parish",
            Self::PastoralGroup => "pastoral_group",
            Self::RoleFunction => "role_function",
        }
    }

    /// A human-readable label for error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Parish => "Parish",
            Self::PastoralGroup => "Pastoral group",
            Self::RoleFunction => "Role/function",
        }
    }
}

impl FromStr for LookupKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parish" => Ok(Self::Parish),
            "pastoral_group" => Ok(Self::PastoralGroup),
            "role_function" => Ok(Self::RoleFunction),
            _ => Err(DomainError::InvalidLookupName(format!(
                "Unknown lookup kind: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single value within one of the lookup dimensions.
///
/// Two items are compared by name; the database-assigned id is ignored so
/// that unpersisted and persisted values compare naturally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupItem {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the value has not been persisted yet.
    id: Option<i64>,
    /// The display name (unique within its dimension).
    name: String,
}

impl PartialEq for LookupItem {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for LookupItem {}

impl LookupItem {
    /// Creates a new `LookupItem` without a persisted ID.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self { id: None, name }
    }

    /// Creates a `LookupItem` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(id: i64, name: String) -> Self {
        Self { id: Some(id), name }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A volunteer tracked by the registry.
///
/// Agents are owned by the directory and exist independently of movements.
/// All contact fields are free-form and optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Canonical internal identifier. Optional to support creation
    /// before persistence.
    pub agent_id: Option<i64>,
    /// The agent's full name.
    pub name: String,
    /// Birth date as an ISO 8601 date string, if known.
    pub birth_date: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Phone or other contact.
    pub contact: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Agent {
    /// Creates a new `Agent` without a persisted `agent_id`.
    #[must_use]
    pub const fn new(
        name: String,
        birth_date: Option<String>,
        address: Option<String>,
        contact: Option<String>,
        email: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            agent_id: None,
            name,
            birth_date,
            address,
            contact,
            email,
            notes,
        }
    }
}

/// A time-bounded link between one agent and one
/// (parish, pastoral group, role/function) triple.
///
/// A movement references its agent and lookup values by identifier only;
/// display names are resolved at read time by the persistence layer. A
/// movement with no exit date is "active". Invariants:
///
/// - per agent, at most one movement is active at any time;
/// - `exit_date`, when present, is on or after `entry_date`.
///
/// A closed movement never reopens; a new movement is created instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Canonical internal identifier.
    pub movement_id: i64,
    /// The agent this movement belongs to.
    pub agent_id: i64,
    /// The parish dimension value.
    pub parish_id: i64,
    /// The pastoral group dimension value.
    pub pastoral_group_id: i64,
    /// The role/function dimension value.
    pub role_function_id: i64,
    /// The date the agent entered this assignment.
    pub entry_date: Date,
    /// The date the agent left, or `None` while active.
    pub exit_date: Option<Date>,
    /// Free-text notes recorded at open time.
    pub notes: Option<String>,
    /// Creation timestamp as stored (ISO 8601).
    pub created_at: String,
}

impl Movement {
    /// Returns whether this movement is currently active (no exit date).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.exit_date.is_none()
    }
}
