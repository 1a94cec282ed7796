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

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chargewatch::{DEFAULT_MAX_ATTEMPTS, EngineConfig, ReportLifecycleEngine};
use chargewatch_api::{
    ApiError, AssigneeInfo, AuditTimelineResponse, AuthenticatedActor, AuthenticationService,
    CreateAssigneeRequest, CreateStationRequest, CreateUserRequest, CreateUserResponse,
    LifecycleResponse, ListNotificationsResponse, ListReportsResponse, ListStationsResponse,
    OutcomeKind, ReconcileResponse, ReportMalfunctionRequest, StationInfo, parse_role,
};
use chargewatch_audit::Cause;
use chargewatch_domain::{AssigneeRole, CAPACITY_THRESHOLD};
use chargewatch_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Chargewatch Server - HTTP server for charging-station malfunction reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Open reports an assignee may hold before the balancer looks elsewhere
    #[arg(long, default_value_t = CAPACITY_THRESHOLD)]
    capacity: u32,

    /// How long a write waits for another writer, in milliseconds
    #[arg(long, default_value_t = 5000)]
    busy_timeout_ms: u64,

    /// Attempts per lifecycle operation when the database is busy
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Username of an admin to create at startup if it does not exist yet
    #[arg(long)]
    bootstrap_admin: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer owns a single connection, so it sits behind a
/// Mutex and requests touching storage are serialized.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    engine: ReportLifecycleEngine,
}

/// API request for reporting a malfunction.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReportMalfunctionApiRequest {
    /// The reporting user's id.
    actor_id: i64,
    /// Must be `user`.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    station_id: i64,
    description: String,
    severity: String,
    category: String,
}

/// API request for forwarding or resolving a report.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LifecycleApiRequest {
    /// The acting assignee's id.
    actor_id: i64,
    /// `admin` to forward, `operator` to resolve.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for registering a user.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateUserApiRequest {
    actor_id: i64,
    actor_role: String,
    username: String,
}

/// API request for registering an admin or operator.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateAssigneeApiRequest {
    actor_id: i64,
    actor_role: String,
    /// `admin` or `operator`.
    role: String,
    username: String,
}

/// API request for registering a station.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateStationApiRequest {
    actor_id: i64,
    actor_role: String,
    station_id: i64,
    postal_code: String,
    street: String,
    district: String,
}

/// API request for admin-only maintenance.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AdminActionRequest {
    actor_id: i64,
    actor_role: String,
}

/// Identity of the caller on read endpoints.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    actor_id: i64,
    actor_role: String,
}

/// Query parameters for listing reports.
#[derive(Debug, Deserialize)]
struct ListReportsQuery {
    actor_id: i64,
    actor_role: String,
    /// `admin` or `operator`.
    role: String,
    assignee_id: i64,
}

/// Query parameters for listing stations.
#[derive(Debug, Deserialize)]
struct ListStationsQuery {
    postal_code: String,
}

/// Error response type.
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
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Maps a lifecycle outcome onto an HTTP status.
const fn outcome_status(outcome: OutcomeKind) -> StatusCode {
    match outcome {
        OutcomeKind::ReportCreated => StatusCode::CREATED,
        OutcomeKind::ReportUpdated => StatusCode::OK,
        OutcomeKind::ReportAlreadyExists | OutcomeKind::InvalidTransition => StatusCode::CONFLICT,
        OutcomeKind::ReportCreateFailed | OutcomeKind::UpdateFailed => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn lifecycle_reply(response: LifecycleResponse) -> (StatusCode, Json<LifecycleResponse>) {
    (outcome_status(response.outcome), Json(response))
}

/// Parses the claimed role and checks the identity is registered.
fn authenticate(
    persistence: &mut Persistence,
    actor_id: i64,
    actor_role: &str,
) -> Result<AuthenticatedActor, HttpError> {
    let role = parse_role(actor_role).map_err(ApiError::from)?;
    AuthenticationService::authenticate(persistence, actor_id, role)
        .map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Handler for POST `/reports` endpoint.
async fn handle_report_malfunction(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ReportMalfunctionApiRequest>,
) -> Result<(StatusCode, Json<LifecycleResponse>), HttpError> {
    info!(
        actor_id = req.actor_id,
        station_id = req.station_id,
        "Handling report_malfunction request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: ReportMalfunctionRequest = ReportMalfunctionRequest {
        station_id: req.station_id,
        description: req.description,
        severity: req.severity,
        category: req.category,
    };

    let response: LifecycleResponse = chargewatch_api::report_malfunction(
        &mut persistence,
        &app_state.engine,
        &request,
        &actor,
        &cause,
    )?;
    drop(persistence);

    Ok(lifecycle_reply(response))
}

/// Handler for POST `/reports/{report_id}/forward` endpoint.
async fn handle_forward_malfunction(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
    Json(req): Json<LifecycleApiRequest>,
) -> Result<(StatusCode, Json<LifecycleResponse>), HttpError> {
    info!(actor_id = req.actor_id, report_id, "Handling forward_malfunction request");

    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);

    let response: LifecycleResponse = chargewatch_api::forward_malfunction(
        &mut persistence,
        &app_state.engine,
        report_id,
        &actor,
        &cause,
    )?;
    drop(persistence);

    Ok(lifecycle_reply(response))
}

/// Handler for POST `/reports/{report_id}/resolve` endpoint.
async fn handle_resolve_malfunction(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
    Json(req): Json<LifecycleApiRequest>,
) -> Result<(StatusCode, Json<LifecycleResponse>), HttpError> {
    info!(actor_id = req.actor_id, report_id, "Handling resolve_malfunction request");

    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);

    let response: LifecycleResponse = chargewatch_api::resolve_malfunction(
        &mut persistence,
        &app_state.engine,
        report_id,
        &actor,
        &cause,
    )?;
    drop(persistence);

    Ok(lifecycle_reply(response))
}

/// Handler for POST `/users` endpoint.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;

    let response: CreateUserResponse = chargewatch_api::create_user(
        &mut persistence,
        &CreateUserRequest {
            username: req.username,
        },
        &actor,
    )?;
    drop(persistence);

    info!(user_id = response.user_id, "Created user");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/assignees` endpoint.
async fn handle_create_assignee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateAssigneeApiRequest>,
) -> Result<(StatusCode, Json<AssigneeInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;

    let response: AssigneeInfo = chargewatch_api::create_assignee(
        &mut persistence,
        &CreateAssigneeRequest {
            role: req.role,
            username: req.username,
        },
        &actor,
    )?;
    drop(persistence);

    info!(assignee_id = response.assignee_id, role = %response.role, "Created assignee");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/stations` endpoint.
async fn handle_create_station(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateStationApiRequest>,
) -> Result<(StatusCode, Json<StationInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;

    let response: StationInfo = chargewatch_api::create_station(
        &mut persistence,
        &CreateStationRequest {
            station_id: req.station_id,
            postal_code: req.postal_code,
            street: req.street,
            district: req.district,
        },
        &actor,
    )?;
    drop(persistence);

    info!(station_id = response.station_id, "Created station");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/stations` endpoint.
///
/// Public: anyone may look for a working station.
async fn handle_list_stations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListStationsQuery>,
) -> Result<Json<ListStationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListStationsResponse =
        chargewatch_api::list_available_stations(&mut persistence, &query.postal_code)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports` endpoint.
async fn handle_list_reports(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ListReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor =
        authenticate(&mut persistence, query.actor_id, &query.actor_role)?;
    let response: ListReportsResponse =
        chargewatch_api::list_reports(&mut persistence, &query.role, query.assignee_id, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}/notifications` endpoint.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ListNotificationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor =
        authenticate(&mut persistence, query.actor_id, &query.actor_role)?;
    let response: ListNotificationsResponse =
        chargewatch_api::list_notifications(&mut persistence, user_id, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/{report_id}/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor =
        authenticate(&mut persistence, query.actor_id, &query.actor_role)?;
    let response: AuditTimelineResponse =
        chargewatch_api::get_audit_timeline(&mut persistence, report_id, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/maintenance/reconcile` endpoint.
async fn handle_reconcile(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<ReconcileResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, req.actor_id, &req.actor_role)?;
    let response: ReconcileResponse =
        chargewatch_api::reconcile_assignee_loads(&mut persistence, &actor)?;
    drop(persistence);
    info!(corrected = response.corrected.len(), "Reconciled assignee counters");
    Ok(Json(response))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(handle_create_user))
        .route("/users/{user_id}/notifications", get(handle_list_notifications))
        .route("/assignees", post(handle_create_assignee))
        .route("/stations", post(handle_create_station).get(handle_list_stations))
        .route("/reports", post(handle_report_malfunction).get(handle_list_reports))
        .route("/reports/{report_id}/forward", post(handle_forward_malfunction))
        .route("/reports/{report_id}/resolve", post(handle_resolve_malfunction))
        .route("/reports/{report_id}/audit", get(handle_get_audit_timeline))
        .route("/maintenance/reconcile", post(handle_reconcile))
        .with_state(app_state)
}

/// Creates the named admin unless an admin with that username exists.
fn ensure_bootstrap_admin(
    persistence: &mut Persistence,
    username: &str,
) -> Result<i64, Box<dyn std::error::Error>> {
    let assignees = persistence.list_all_assignees()?;
    if let Some(existing) = assignees
        .iter()
        .find(|a| a.role == AssigneeRole::Admin && a.username == username)
    {
        info!(assignee_id = existing.assignee_id, "Bootstrap admin already present");
        return Ok(existing.assignee_id);
    }

    let created = persistence.create_assignee(AssigneeRole::Admin, username)?;
    info!(
        assignee_id = created.assignee_id,
        username, "Created bootstrap admin"
    );
    Ok(created.assignee_id)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Chargewatch Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path, Duration::from_millis(args.busy_timeout_ms))?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(username) = &args.bootstrap_admin {
        ensure_bootstrap_admin(&mut persistence, username)?;
    }

    let config: EngineConfig = EngineConfig::new(args.capacity, args.max_attempts);
    info!(
        capacity = config.capacity,
        max_attempts = config.max_attempts,
        "Lifecycle engine configured"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        engine: ReportLifecycleEngine::new(config),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
