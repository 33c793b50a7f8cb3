// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info};

use pastoral_api::request_response::{
    AgentDetailResponse, AgentInfo, AgentRequest, CloseMovementRequest, CloseMovementResponse,
    CreateAgentResponse, CreateOperatorRequest, CreateOperatorResponse, ListAgentsResponse,
    ListLookupResponse, LoginRequest, LoginResponse, LookupItemInfo, LookupRequest,
    OpenMovementRequest, OpenMovementResponse, ReportFilter, ReportResponse, WhoAmIResponse,
};
use pastoral_api::{
    ApiError, AuthenticatedActor, AuthenticationService, EXPORT_FILENAME, handlers,
};
use pastoral_domain::LookupKind;
use pastoral_persistence::{PersistenceError, SqlitePersistence};

mod session;

use session::SessionOperator;

/// HTTP server for the pastoral agent registry.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind a Mutex for safe concurrent access.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Transient { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::PasswordPolicyViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DataIntegrity { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Query parameters for listing agents.
#[derive(Debug, Deserialize)]
struct ListAgentsQuery {
    /// Optional name fragment filter.
    name: Option<String>,
}

/// Query parameters for the report and the CSV export.
///
/// Values arrive as strings so that an empty parameter can be treated the
/// same as an absent one.
#[derive(Debug, Deserialize)]
struct ReportQuery {
    /// Keep only agents who entered within the last N months.
    period_months: Option<String>,
    /// Keep only agents who entered at least N months ago.
    min_tenure_months: Option<String>,
}

fn parse_months(value: Option<&str>, field: &str) -> Result<Option<u32>, HttpError> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<u32>().map(Some).map_err(|_| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid {field}: expected a non-negative integer, got '{raw}'"),
        }),
    }
}

fn report_filter(query: &ReportQuery) -> Result<ReportFilter, HttpError> {
    Ok(ReportFilter {
        period_months: parse_months(query.period_months.as_deref(), "period_months")?,
        min_tenure_months: parse_months(query.min_tenure_months.as_deref(), "min_tenure_months")?,
    })
}

fn today() -> Date {
    time::OffsetDateTime::now_utc().date()
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, HttpError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value: &str = value.to_str().map_err(|_| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Invalid Authorization header encoding"),
    })?;
    value.strip_prefix("Bearer ").map(Some).ok_or(HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Invalid Authorization header format. Expected: 'Bearer <token>'"),
    })
}

// ============================================================================
// Sessions & operators
// ============================================================================

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: LoginResponse = handlers::login(&mut persistence, &req)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: &str = bearer_token(&headers)?.ok_or(HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing Authorization header"),
    })?;
    let mut persistence = state.persistence.lock().await;
    handlers::logout(&mut persistence, token)?;
    Ok(StatusCode::NO_CONTENT)
}

// Async for the Handler impl; the session extractor does the awaiting.
#[allow(clippy::unused_async)]
async fn handle_whoami(
    SessionOperator(_, operator): SessionOperator,
) -> Json<WhoAmIResponse> {
    Json(handlers::whoami(&operator))
}

/// Creates an operator. The Authorization header is optional here so the
/// very first operator can be bootstrapped on an empty database.
async fn handle_create_operator(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateOperatorRequest>,
) -> Result<Json<CreateOperatorResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;

    let actor: Option<AuthenticatedActor> = match bearer_token(&headers)? {
        Some(token) => Some(
            AuthenticationService::validate_session(&mut persistence, token)
                .map_err(ApiError::from)?
                .0,
        ),
        None => None,
    };

    let response: CreateOperatorResponse =
        handlers::create_operator(&mut persistence, req, actor.as_ref())?;
    Ok(Json(response))
}

// ============================================================================
// Agents
// ============================================================================

async fn handle_list_agents(
    AxumState(state): AxumState<AppState>,
    SessionOperator(..): SessionOperator,
    Query(query): Query<ListAgentsQuery>,
) -> Result<Json<ListAgentsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: ListAgentsResponse =
        handlers::list_agents(&mut persistence, query.name.as_deref())?;
    Ok(Json(response))
}

async fn handle_create_agent(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Json(req): Json<AgentRequest>,
) -> Result<Json<CreateAgentResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: CreateAgentResponse = handlers::create_agent(&mut persistence, &req, &actor)?;
    Ok(Json(response))
}

async fn handle_get_agent(
    AxumState(state): AxumState<AppState>,
    SessionOperator(..): SessionOperator,
    Path(agent_id): Path<i64>,
) -> Result<Json<AgentDetailResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: AgentDetailResponse =
        handlers::get_agent_detail(&mut persistence, agent_id, today())?;
    Ok(Json(response))
}

async fn handle_update_agent(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(agent_id): Path<i64>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<AgentInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: AgentInfo = handlers::update_agent(&mut persistence, agent_id, &req, &actor)?;
    Ok(Json(response))
}

async fn handle_delete_agent(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(agent_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    handlers::delete_agent(&mut persistence, agent_id, &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Movements
// ============================================================================

async fn handle_open_movement(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(agent_id): Path<i64>,
    Json(req): Json<OpenMovementRequest>,
) -> Result<Json<OpenMovementResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: OpenMovementResponse =
        handlers::open_movement(&mut persistence, agent_id, &req, &actor)?;
    Ok(Json(response))
}

async fn handle_close_movement(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(movement_id): Path<i64>,
    Json(req): Json<CloseMovementRequest>,
) -> Result<Json<CloseMovementResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: CloseMovementResponse =
        handlers::close_movement(&mut persistence, movement_id, &req, &actor)?;
    Ok(Json(response))
}

// ============================================================================
// Lookups
// ============================================================================

async fn list_lookup(
    state: AppState,
    kind: LookupKind,
) -> Result<Json<ListLookupResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: ListLookupResponse = handlers::list_lookup(&mut persistence, kind)?;
    Ok(Json(response))
}

async fn create_lookup(
    state: AppState,
    kind: LookupKind,
    actor: AuthenticatedActor,
    req: LookupRequest,
) -> Result<Json<LookupItemInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: LookupItemInfo = handlers::create_lookup(&mut persistence, kind, &req, &actor)?;
    Ok(Json(response))
}

async fn rename_lookup(
    state: AppState,
    kind: LookupKind,
    id: i64,
    actor: AuthenticatedActor,
    req: LookupRequest,
) -> Result<Json<LookupItemInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response: LookupItemInfo =
        handlers::rename_lookup(&mut persistence, kind, id, &req, &actor)?;
    Ok(Json(response))
}

async fn delete_lookup(
    state: AppState,
    kind: LookupKind,
    id: i64,
    actor: AuthenticatedActor,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    handlers::delete_lookup(&mut persistence, kind, id, &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

macro_rules! lookup_handlers {
    ($list:ident, $create:ident, $rename:ident, $delete:ident, $kind:expr) => {
        async fn $list(
            AxumState(state): AxumState<AppState>,
            SessionOperator(..): SessionOperator,
        ) -> Result<Json<ListLookupResponse>, HttpError> {
            list_lookup(state, $kind).await
        }

        async fn $create(
            AxumState(state): AxumState<AppState>,
            SessionOperator(actor, _): SessionOperator,
            Json(req): Json<LookupRequest>,
        ) -> Result<Json<LookupItemInfo>, HttpError> {
            create_lookup(state, $kind, actor, req).await
        }

        async fn $rename(
            AxumState(state): AxumState<AppState>,
            SessionOperator(actor, _): SessionOperator,
            Path(id): Path<i64>,
            Json(req): Json<LookupRequest>,
        ) -> Result<Json<LookupItemInfo>, HttpError> {
            rename_lookup(state, $kind, id, actor, req).await
        }

        async fn $delete(
            AxumState(state): AxumState<AppState>,
            SessionOperator(actor, _): SessionOperator,
            Path(id): Path<i64>,
        ) -> Result<StatusCode, HttpError> {
            delete_lookup(state, $kind, id, actor).await
        }
    };
}

lookup_handlers!(
    handle_list_parishes,
    handle_create_parish,
    handle_rename_parish,
    handle_delete_parish,
    LookupKind::Parish
);
lookup_handlers!(
    handle_list_pastoral_groups,
    handle_create_pastoral_group,
    handle_rename_pastoral_group,
    handle_delete_pastoral_group,
    LookupKind::PastoralGroup
);
lookup_handlers!(
    handle_list_role_functions,
    handle_create_role_function,
    handle_rename_role_function,
    handle_delete_role_function,
    LookupKind::RoleFunction
);

// ============================================================================
// Report & export
// ============================================================================

async fn handle_report(
    AxumState(state): AxumState<AppState>,
    SessionOperator(..): SessionOperator,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, HttpError> {
    let filter: ReportFilter = report_filter(&query)?;
    let mut persistence = state.persistence.lock().await;
    let response: ReportResponse = handlers::build_report(&mut persistence, filter, today())?;
    Ok(Json(response))
}

async fn handle_export(
    AxumState(state): AxumState<AppState>,
    SessionOperator(..): SessionOperator,
    Query(query): Query<ReportQuery>,
) -> Result<Response, HttpError> {
    let filter: ReportFilter = report_filter(&query)?;
    let mut persistence = state.persistence.lock().await;
    let bytes: Vec<u8> = handlers::export_active_agents(&mut persistence, filter, today())?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

// ============================================================================
// Router & entry point
// ============================================================================

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/operators", post(handle_create_operator))
        .route("/agents", get(handle_list_agents))
        .route("/agents", post(handle_create_agent))
        .route("/agents/{agent_id}", get(handle_get_agent))
        .route("/agents/{agent_id}", put(handle_update_agent))
        .route("/agents/{agent_id}", delete(handle_delete_agent))
        .route("/agents/{agent_id}/movements", post(handle_open_movement))
        .route("/movements/{movement_id}/close", post(handle_close_movement))
        .route("/parishes", get(handle_list_parishes))
        .route("/parishes", post(handle_create_parish))
        .route("/parishes/{id}", put(handle_rename_parish))
        .route("/parishes/{id}", delete(handle_delete_parish))
        .route("/pastoral_groups", get(handle_list_pastoral_groups))
        .route("/pastoral_groups", post(handle_create_pastoral_group))
        .route("/pastoral_groups/{id}", put(handle_rename_pastoral_group))
        .route("/pastoral_groups/{id}", delete(handle_delete_pastoral_group))
        .route("/role_functions", get(handle_list_role_functions))
        .route("/role_functions", post(handle_create_role_function))
        .route("/role_functions/{id}", put(handle_rename_role_function))
        .route("/role_functions/{id}", delete(handle_delete_role_function))
        .route("/report", get(handle_report))
        .route("/report/export", get(handle_export))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing pastoral registry server");

    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
