// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Dates cross the boundary as `YYYY-MM-DD` strings.

use serde::{Deserialize, Serialize};

use pastoral::{DimensionCount, PeriodCounts};

/// API request to log in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    /// The operator login name.
    pub login_name: String,
    /// The operator password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    /// The session token to present as a bearer token.
    pub session_token: String,
    /// The operator login name.
    pub login_name: String,
    /// The operator display name.
    pub display_name: String,
    /// The operator role.
    pub role: String,
    /// Session expiration timestamp (ISO 8601).
    pub expires_at: String,
}

/// API response for session introspection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhoAmIResponse {
    /// The operator login name.
    pub login_name: String,
    /// The operator display name.
    pub display_name: String,
    /// The operator role.
    pub role: String,
}

/// API request to create an operator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateOperatorRequest {
    /// The new operator's login name.
    pub login_name: String,
    /// The new operator's display name.
    pub display_name: String,
    /// The new operator's password.
    pub password: String,
    /// The role: Admin, Cadastrador or Consulta.
    pub role: String,
}

/// API response for a successful operator creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateOperatorResponse {
    /// The canonical operator identifier.
    pub operator_id: i64,
    /// The operator login name.
    pub login_name: String,
    /// The operator display name.
    pub display_name: String,
    /// The operator role.
    pub role: String,
}

/// Agent fields as they cross the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentInfo {
    /// The canonical agent identifier.
    pub agent_id: i64,
    /// The agent's full name.
    pub name: String,
    /// Birth date (`YYYY-MM-DD`), if known.
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

/// API request to create or update an agent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentRequest {
    /// The agent's full name.
    pub name: String,
    /// Birth date (`YYYY-MM-DD`), if known.
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

/// API response for listing agents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListAgentsResponse {
    /// The agents, ordered by name.
    pub agents: Vec<AgentInfo>,
}

/// API response for a successful agent creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateAgentResponse {
    /// The canonical agent identifier.
    pub agent_id: i64,
    /// The agent's name.
    pub name: String,
}

/// One movement in an agent's history, with display names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MovementInfo {
    /// The canonical movement identifier.
    pub movement_id: i64,
    /// The parish name.
    pub parish: String,
    /// The pastoral group name.
    pub pastoral_group: String,
    /// The role/function name.
    pub role_function: String,
    /// Entry date (`YYYY-MM-DD`).
    pub entry_date: String,
    /// Exit date (`YYYY-MM-DD`), or `None` while active.
    pub exit_date: Option<String>,
    /// Free-text notes recorded at open time.
    pub notes: Option<String>,
}

/// API response for an agent detail view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentDetailResponse {
    /// The agent's directory fields.
    pub agent: AgentInfo,
    /// Age in full years, when the birth date is known and parsable.
    pub age: Option<i32>,
    /// The active movement, if any.
    pub active_movement: Option<MovementInfo>,
    /// Full movement history, newest entry first.
    pub history: Vec<MovementInfo>,
}

/// API request to open a movement for an agent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenMovementRequest {
    /// The parish dimension value.
    pub parish_id: i64,
    /// The pastoral group dimension value.
    pub pastoral_group_id: i64,
    /// The role/function dimension value.
    pub role_function_id: i64,
    /// Entry date (`YYYY-MM-DD`).
    pub entry_date: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// API response for a successful movement open.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenMovementResponse {
    /// The canonical movement identifier.
    pub movement_id: i64,
    /// The agent the movement belongs to.
    pub agent_id: i64,
    /// The entry date (`YYYY-MM-DD`).
    pub entry_date: String,
}

/// API request to close a movement.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseMovementRequest {
    /// Exit date (`YYYY-MM-DD`). Must not precede the entry date.
    pub exit_date: String,
}

/// API response for a successful movement close.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseMovementResponse {
    /// The canonical movement identifier.
    pub movement_id: i64,
    /// The recorded exit date (`YYYY-MM-DD`).
    pub exit_date: String,
}

/// One lookup item as it crosses the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LookupItemInfo {
    /// The canonical lookup identifier.
    pub id: i64,
    /// The display name.
    pub name: String,
}

/// API response for listing lookup items.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListLookupResponse {
    /// The items, ordered by name.
    pub items: Vec<LookupItemInfo>,
}

/// API request to create or rename a lookup item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupRequest {
    /// The display name.
    pub name: String,
}

/// Report filters parsed from query parameters.
///
/// `None` and `Some(0)` both mean "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Keep only movements entered within the last N months.
    pub period_months: Option<u32>,
    /// Long-tenure threshold in months.
    pub min_tenure_months: Option<u32>,
}

/// One row in the tenure rankings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TenureRowInfo {
    /// The canonical agent identifier.
    pub agent_id: i64,
    /// The agent's display name.
    pub agent_name: String,
    /// The parish name.
    pub parish: String,
    /// The pastoral group name.
    pub pastoral_group: String,
    /// The role/function name.
    pub role_function: String,
    /// Entry date (`YYYY-MM-DD`).
    pub entry_date: String,
    /// Formatted elapsed time, e.g. "1 ano e 1 mês".
    pub tenure: String,
}

/// API response for the aggregated report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportResponse {
    /// Headline figures.
    pub counts: PeriodCounts,
    /// Ten largest parishes by active movements.
    pub by_parish: Vec<DimensionCount>,
    /// Ten largest pastoral groups by active movements.
    pub by_pastoral_group: Vec<DimensionCount>,
    /// Ten largest roles/functions by active movements.
    pub by_role_function: Vec<DimensionCount>,
    /// Ten longest-tenured active agents, oldest entry first.
    pub top_tenure: Vec<TenureRowInfo>,
    /// Agents past the tenure threshold, present only when the
    /// `min_tenure_months` filter is set. Capped at fifty rows.
    pub long_tenure: Option<Vec<TenureRowInfo>>,
}
