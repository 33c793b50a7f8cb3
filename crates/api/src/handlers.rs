// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the registry's state-changing and read-only
//! operations.
//!
//! Handlers authorize first, validate second, and only then touch the
//! store. They return DTOs and `ApiError`; HTTP concerns stay in the
//! server crate.

use time::Date;
use tracing::{error, info};

use pastoral::{
    ActiveRow, LONG_TENURE_LIMIT, OpenMovementCommand, ReportDimension, TOP_TENURE_DEFAULT,
    count_by_dimension, long_tenure, period_counts, require_no_active_movement, single_active,
    top_by_tenure, validate_close_movement, validate_open_movement,
};
use pastoral_domain::{
    Agent, LookupKind, age_at, format_elapsed, month_start, months_ago, next_month_start,
    validate_agent_name, validate_lookup_name,
};
use pastoral_persistence::{
    MovementWithNames, NewMovement, OperatorData, PersistenceError, SqlitePersistence,
};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::csv_export::render_csv;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AgentDetailResponse, AgentInfo, AgentRequest, CloseMovementRequest, CloseMovementResponse,
    CreateAgentResponse, CreateOperatorRequest, CreateOperatorResponse, ListAgentsResponse,
    ListLookupResponse, LoginRequest, LoginResponse, LookupItemInfo, LookupRequest, MovementInfo,
    OpenMovementRequest, OpenMovementResponse, ReportFilter, ReportResponse, TenureRowInfo,
    WhoAmIResponse,
};

// ============================================================================
// Sessions & operators
// ============================================================================

/// Authenticates an operator and creates a session.
///
/// # Errors
///
/// Returns an error if the credentials are invalid or the operator is
/// disabled.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _actor, operator) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    let expires_at: String = persistence
        .get_session_by_token(&session_token)
        .map_err(translate_persistence_error)?
        .expires_at;

    info!(login_name = %operator.login_name, "Operator logged in");

    Ok(LoginResponse {
        session_token,
        login_name: operator.login_name,
        display_name: operator.display_name,
        role: operator.role,
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the current operator's information.
#[must_use]
pub fn whoami(operator: &OperatorData) -> WhoAmIResponse {
    WhoAmIResponse {
        login_name: operator.login_name.clone(),
        display_name: operator.display_name.clone(),
        role: operator.role.clone(),
    }
}

/// Creates a new operator.
///
/// Normally Admin-only. While the operators table is empty no session can
/// exist yet, so the very first operator may be created without one; that
/// bootstrap operator must be an Admin or the system could never manage
/// itself.
///
/// # Errors
///
/// Returns an error if the caller is not authorized, the role is unknown,
/// the password violates policy, or the login name is taken.
pub fn create_operator(
    persistence: &mut SqlitePersistence,
    request: CreateOperatorRequest,
    actor: Option<&AuthenticatedActor>,
) -> Result<CreateOperatorResponse, ApiError> {
    let operators_exist: bool = persistence
        .count_operators()
        .map_err(translate_persistence_error)?
        > 0;

    if operators_exist {
        let actor = actor.ok_or_else(|| ApiError::AuthenticationFailed {
            reason: String::from("Session required"),
        })?;
        AuthorizationService::authorize_admin(actor, "create_operator")?;
    } else if request.role != "Admin" {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: String::from("The first operator must have the Admin role"),
        });
    }

    if !matches!(request.role.as_str(), "Admin" | "Cadastrador" | "Consulta") {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: format!(
                "Invalid role: {}. Must be 'Admin', 'Cadastrador' or 'Consulta'",
                request.role
            ),
        });
    }

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(&request.password, &request.login_name, &request.display_name)?;

    let operator_id: i64 = persistence
        .create_operator(
            &request.login_name,
            &request.display_name,
            &request.password,
            &request.role,
        )
        .map_err(translate_persistence_error)?;

    // The stored login name is uppercased; echo the normalized form back.
    let normalized_login: String = request.login_name.to_uppercase();

    info!(
        operator_id = operator_id,
        login_name = %normalized_login,
        role = %request.role,
        "Created operator"
    );

    Ok(CreateOperatorResponse {
        operator_id,
        login_name: normalized_login,
        display_name: request.display_name,
        role: request.role,
    })
}

// ============================================================================
// Agents
// ============================================================================

fn agent_info(agent: Agent) -> Result<AgentInfo, ApiError> {
    let agent_id: i64 = agent.agent_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Loaded agent is missing its identifier"),
    })?;
    Ok(AgentInfo {
        agent_id,
        name: agent.name,
        birth_date: agent.birth_date,
        address: agent.address,
        contact: agent.contact,
        email: agent.email,
        notes: agent.notes,
    })
}

fn agent_from_request(request: &AgentRequest) -> Result<Agent, ApiError> {
    validate_agent_name(&request.name).map_err(translate_domain_error)?;
    if let Some(birth_date) = &request.birth_date {
        pastoral_domain::parse_iso_date(birth_date, "birth_date")
            .map_err(translate_domain_error)?;
    }
    Ok(Agent::new(
        request.name.trim().to_string(),
        request.birth_date.clone(),
        request.address.clone(),
        request.contact.clone(),
        request.email.clone(),
        request.notes.clone(),
    ))
}

/// Creates a new agent in the directory.
///
/// # Errors
///
/// Returns an error if the caller may not edit, the name is empty, or the
/// insert fails.
pub fn create_agent(
    persistence: &mut SqlitePersistence,
    request: &AgentRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateAgentResponse, ApiError> {
    AuthorizationService::authorize_edit(actor, "create_agent")?;

    let agent: Agent = agent_from_request(request)?;
    let agent_id: i64 = persistence
        .create_agent(&agent)
        .map_err(translate_persistence_error)?;

    info!(agent_id = agent_id, "Created agent");

    Ok(CreateAgentResponse {
        agent_id,
        name: agent.name,
    })
}

/// Lists agents ordered by name, optionally filtered by a name substring.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_agents(
    persistence: &mut SqlitePersistence,
    name_filter: Option<&str>,
) -> Result<ListAgentsResponse, ApiError> {
    let agents = persistence
        .list_agents(name_filter)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(agent_info)
        .collect::<Result<Vec<AgentInfo>, ApiError>>()?;

    Ok(ListAgentsResponse { agents })
}

fn movement_info(entry: &MovementWithNames) -> MovementInfo {
    MovementInfo {
        movement_id: entry.movement.movement_id,
        parish: entry.parish_name.clone(),
        pastoral_group: entry.pastoral_group_name.clone(),
        role_function: entry.role_function_name.clone(),
        entry_date: entry.movement.entry_date.to_string(),
        exit_date: entry.movement.exit_date.map(|d| d.to_string()),
        notes: entry.movement.notes.clone(),
    }
}

/// Loads one agent with computed age, active movement and full history.
///
/// # Errors
///
/// Returns an error if the agent does not exist, or if the store holds
/// more than one active movement for it.
pub fn get_agent_detail(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    today: Date,
) -> Result<AgentDetailResponse, ApiError> {
    let agent: Agent = persistence
        .get_agent(agent_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Agent"),
            message: format!("Agent {agent_id} does not exist"),
        })?;

    let age: Option<i32> = age_at(agent.birth_date.as_deref(), today);

    let active_movements = persistence
        .active_movements_for_agent(agent_id)
        .map_err(translate_persistence_error)?;
    let active = single_active(agent_id, active_movements).map_err(|e| {
        let api_err = translate_core_error(e);
        if matches!(api_err, ApiError::DataIntegrity { .. }) {
            error!(agent_id = agent_id, "Multiple active movements detected");
        }
        api_err
    })?;

    let history: Vec<MovementInfo> = persistence
        .history_with_names(agent_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(movement_info)
        .collect();

    let active_movement: Option<MovementInfo> = active.and_then(|movement| {
        history
            .iter()
            .find(|info| info.movement_id == movement.movement_id)
            .cloned()
    });

    Ok(AgentDetailResponse {
        agent: agent_info(agent)?,
        age,
        active_movement,
        history,
    })
}

/// Updates an agent's directory fields.
///
/// # Errors
///
/// Returns an error if the caller may not edit, the fields are invalid, or
/// the agent does not exist.
pub fn update_agent(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    request: &AgentRequest,
    actor: &AuthenticatedActor,
) -> Result<AgentInfo, ApiError> {
    AuthorizationService::authorize_edit(actor, "update_agent")?;

    let agent: Agent = agent_from_request(request)?;
    persistence
        .update_agent(agent_id, &agent)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Agent"),
                message: format!("Agent {agent_id} does not exist"),
            },
            other => translate_persistence_error(other),
        })?;

    Ok(AgentInfo {
        agent_id,
        name: agent.name,
        birth_date: agent.birth_date,
        address: agent.address,
        contact: agent.contact,
        email: agent.email,
        notes: agent.notes,
    })
}

/// Deletes an agent along with its movement history. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the agent does not
/// exist.
pub fn delete_agent(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(actor, "delete_agent")?;

    persistence.delete_agent(agent_id).map_err(|e| match e {
        PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Agent"),
            message: format!("Agent {agent_id} does not exist"),
        },
        other => translate_persistence_error(other),
    })?;

    info!(agent_id = agent_id, "Deleted agent and its movements");
    Ok(())
}

// ============================================================================
// Movements
// ============================================================================

/// Opens a movement for an agent.
///
/// The agent and all three lookup references must exist, and the agent must
/// not already hold an active movement. The store's unique index backs the
/// active check, so a concurrent open still fails with a conflict.
///
/// # Errors
///
/// Returns an error if the caller may not edit, the command is invalid, a
/// reference does not exist, or the agent already has an active movement.
pub fn open_movement(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    request: &OpenMovementRequest,
    actor: &AuthenticatedActor,
) -> Result<OpenMovementResponse, ApiError> {
    AuthorizationService::authorize_edit(actor, "open_movement")?;

    let command = OpenMovementCommand {
        agent_id,
        parish_id: request.parish_id,
        pastoral_group_id: request.pastoral_group_id,
        role_function_id: request.role_function_id,
        entry_date: request.entry_date.clone(),
        notes: request.notes.clone(),
    };
    let validated = validate_open_movement(&command).map_err(translate_core_error)?;

    if persistence
        .get_agent(agent_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Agent"),
            message: format!("Agent {agent_id} does not exist"),
        });
    }
    require_lookup(persistence, LookupKind::Parish, validated.parish_id, "parish_id")?;
    require_lookup(
        persistence,
        LookupKind::PastoralGroup,
        validated.pastoral_group_id,
        "pastoral_group_id",
    )?;
    require_lookup(
        persistence,
        LookupKind::RoleFunction,
        validated.role_function_id,
        "role_function_id",
    )?;

    let active = persistence
        .active_movements_for_agent(agent_id)
        .map_err(translate_persistence_error)?;
    require_no_active_movement(agent_id, &active).map_err(|e| {
        let api_err = translate_core_error(e);
        if matches!(api_err, ApiError::DataIntegrity { .. }) {
            error!(agent_id = agent_id, "Multiple active movements detected");
        }
        api_err
    })?;

    let entry_date: String = validated.entry_date.to_string();
    let values = NewMovement {
        agent_id: validated.agent_id,
        parish_id: validated.parish_id,
        pastoral_group_id: validated.pastoral_group_id,
        role_function_id: validated.role_function_id,
        entry_date: &entry_date,
        notes: validated.notes.as_deref(),
    };
    let movement_id: i64 = persistence
        .insert_movement(&values)
        .map_err(translate_persistence_error)?;

    info!(
        movement_id = movement_id,
        agent_id = agent_id,
        entry_date = %entry_date,
        "Opened movement"
    );

    Ok(OpenMovementResponse {
        movement_id,
        agent_id,
        entry_date,
    })
}

fn require_lookup(
    persistence: &mut SqlitePersistence,
    kind: LookupKind,
    id: i64,
    field: &str,
) -> Result<(), ApiError> {
    if persistence
        .get_lookup(kind, id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{} {id} does not exist", kind.label()),
        });
    }
    Ok(())
}

/// Closes a movement by recording its exit date.
///
/// A closed movement never reopens; a close on an already-closed movement
/// reports not-found rather than overwriting the recorded exit.
///
/// # Errors
///
/// Returns an error if the caller may not edit, the movement does not
/// exist or is already closed, or the exit date precedes the entry date.
pub fn close_movement(
    persistence: &mut SqlitePersistence,
    movement_id: i64,
    request: &CloseMovementRequest,
    actor: &AuthenticatedActor,
) -> Result<CloseMovementResponse, ApiError> {
    AuthorizationService::authorize_edit(actor, "close_movement")?;

    let movement = persistence
        .get_movement(movement_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Movement"),
            message: format!("Movement {movement_id} does not exist"),
        })?;

    let exit_date: Date =
        validate_close_movement(&movement, &request.exit_date).map_err(translate_core_error)?;
    let exit_date: String = exit_date.to_string();

    // Conditional on the movement still being open; a concurrent close
    // surfaces as not-found here.
    persistence
        .close_movement(movement_id, &exit_date)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Active movement"),
                message: format!("Movement {movement_id} does not exist or is already closed"),
            },
            other => translate_persistence_error(other),
        })?;

    info!(
        movement_id = movement_id,
        exit_date = %exit_date,
        "Closed movement"
    );

    Ok(CloseMovementResponse {
        movement_id,
        exit_date,
    })
}

// ============================================================================
// Lookups
// ============================================================================

/// Lists all items of a lookup kind, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_lookup(
    persistence: &mut SqlitePersistence,
    kind: LookupKind,
) -> Result<ListLookupResponse, ApiError> {
    let items: Vec<LookupItemInfo> = persistence
        .list_lookup(kind)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|item| LookupItemInfo {
            id: item.id().unwrap_or_default(),
            name: item.name().to_string(),
        })
        .collect();

    Ok(ListLookupResponse { items })
}

/// Creates a new lookup item.
///
/// # Errors
///
/// Returns an error if the caller may not edit, the name is empty, or the
/// name is already taken within the kind.
pub fn create_lookup(
    persistence: &mut SqlitePersistence,
    kind: LookupKind,
    request: &LookupRequest,
    actor: &AuthenticatedActor,
) -> Result<LookupItemInfo, ApiError> {
    AuthorizationService::authorize_edit(actor, "create_lookup")?;

    let name: &str = request.name.trim();
    validate_lookup_name(name).map_err(translate_domain_error)?;

    let id: i64 = persistence
        .create_lookup(kind, name)
        .map_err(translate_persistence_error)?;

    info!(kind = kind.as_str(), id = id, name = %name, "Created lookup item");

    Ok(LookupItemInfo {
        id,
        name: name.to_string(),
    })
}

/// Renames a lookup item.
///
/// # Errors
///
/// Returns an error if the caller may not edit, the item does not exist,
/// or the new name is taken.
pub fn rename_lookup(
    persistence: &mut SqlitePersistence,
    kind: LookupKind,
    id: i64,
    request: &LookupRequest,
    actor: &AuthenticatedActor,
) -> Result<LookupItemInfo, ApiError> {
    AuthorizationService::authorize_edit(actor, "rename_lookup")?;

    let name: &str = request.name.trim();
    validate_lookup_name(name).map_err(translate_domain_error)?;

    persistence
        .rename_lookup(kind, id, name)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: kind.label().to_string(),
                message: format!("{} {id} does not exist", kind.label()),
            },
            other => translate_persistence_error(other),
        })?;

    Ok(LookupItemInfo {
        id,
        name: name.to_string(),
    })
}

/// Deletes a lookup item. Admin only.
///
/// Items still referenced by movements cannot be deleted; the foreign key
/// blocks the delete and it surfaces as a conflict.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the item does not
/// exist, or movements still reference it.
pub fn delete_lookup(
    persistence: &mut SqlitePersistence,
    kind: LookupKind,
    id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(actor, "delete_lookup")?;

    persistence
        .delete_lookup(kind, id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: kind.label().to_string(),
                message: format!("{} {id} does not exist", kind.label()),
            },
            other => translate_persistence_error(other),
        })?;

    info!(kind = kind.as_str(), id = id, "Deleted lookup item");
    Ok(())
}

// ============================================================================
// Report & export
// ============================================================================

/// Resolves an optional "last N months" filter to an inclusive entry-date
/// cutoff. Zero means no filter, matching an absent parameter.
fn months_filter_cutoff(today: Date, months: Option<u32>) -> Result<Option<Date>, ApiError> {
    match months {
        None | Some(0) => Ok(None),
        Some(n) => months_ago(today, n)
            .map(Some)
            .map_err(translate_domain_error),
    }
}

fn tenure_row(row: &ActiveRow, today: Date) -> TenureRowInfo {
    TenureRowInfo {
        agent_id: row.agent_id,
        agent_name: row.agent_name.clone(),
        parish: row.parish.name.clone(),
        pastoral_group: row.pastoral_group.name.clone(),
        role_function: row.role_function.name.clone(),
        entry_date: row.entry_date.to_string(),
        tenure: format_elapsed(row.entry_date, today),
    }
}

fn count_as_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Builds the aggregated report.
///
/// The period filter scopes the per-dimension breakdowns and the tenure
/// rankings. The long-tenure list applies both filters. Entry and exit
/// month counts always run over the whole ledger.
///
/// # Errors
///
/// Returns an error if any read fails; no partial report is produced.
pub fn build_report(
    persistence: &mut SqlitePersistence,
    filter: ReportFilter,
    today: Date,
) -> Result<ReportResponse, ApiError> {
    let period_cutoff: Option<Date> = months_filter_cutoff(today, filter.period_months)?;
    let tenure_cutoff: Option<Date> = months_filter_cutoff(today, filter.min_tenure_months)?;

    let period_cutoff_str: Option<String> = period_cutoff.map(|d| d.to_string());
    let rows: Vec<ActiveRow> = persistence
        .active_rows(period_cutoff_str.as_deref(), None)
        .map_err(translate_persistence_error)?;

    let total_agents: u64 = count_as_u64(
        persistence
            .count_agents()
            .map_err(translate_persistence_error)?,
    );
    let month_from: String = month_start(today).map_err(translate_domain_error)?.to_string();
    let month_to: String = next_month_start(today)
        .map_err(translate_domain_error)?
        .to_string();
    let entries_this_month: u64 = count_as_u64(
        persistence
            .count_entries_between(&month_from, &month_to)
            .map_err(translate_persistence_error)?,
    );
    let exits_this_month: u64 = count_as_u64(
        persistence
            .count_exits_between(&month_from, &month_to)
            .map_err(translate_persistence_error)?,
    );

    let active: u64 = u64::try_from(rows.len()).unwrap_or_default();
    let counts = period_counts(total_agents, active, entries_this_month, exits_this_month);

    let top_tenure: Vec<TenureRowInfo> = top_by_tenure(&rows, TOP_TENURE_DEFAULT)
        .iter()
        .map(|row| tenure_row(row, today))
        .collect();

    let long_tenure_rows: Option<Vec<TenureRowInfo>> = tenure_cutoff.map(|cutoff| {
        long_tenure(&rows, cutoff, LONG_TENURE_LIMIT)
            .iter()
            .map(|row| tenure_row(row, today))
            .collect()
    });

    Ok(ReportResponse {
        by_parish: count_by_dimension(&rows, ReportDimension::Parish),
        by_pastoral_group: count_by_dimension(&rows, ReportDimension::PastoralGroup),
        by_role_function: count_by_dimension(&rows, ReportDimension::RoleFunction),
        counts,
        top_tenure,
        long_tenure: long_tenure_rows,
    })
}

/// Renders the filtered active set as a CSV document.
///
/// Both filters intersect here: the export contains exactly the rows a
/// report with the same parameters would consider long-tenure candidates.
///
/// # Errors
///
/// Returns an error if the read or the serialization fails.
pub fn export_active_agents(
    persistence: &mut SqlitePersistence,
    filter: ReportFilter,
    today: Date,
) -> Result<Vec<u8>, ApiError> {
    let period_cutoff: Option<String> =
        months_filter_cutoff(today, filter.period_months)?.map(|d| d.to_string());
    let tenure_cutoff: Option<String> =
        months_filter_cutoff(today, filter.min_tenure_months)?.map(|d| d.to_string());

    let rows: Vec<ActiveRow> = persistence
        .active_rows(period_cutoff.as_deref(), tenure_cutoff.as_deref())
        .map_err(translate_persistence_error)?;

    render_csv(&rows)
}
