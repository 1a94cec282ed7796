// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers authorize first, validate second and only then touch the engine
//! or storage. None of them hold a transaction open across calls.

use chargewatch::{Outcome, ReportLifecycleEngine, ReportStore};
use chargewatch_audit::{AuditEvent, Cause};
use chargewatch_domain::{Assignee, AssigneeRole, NewReport, PostalCode, Report};
use chargewatch_persistence::{LoadDrift, Persistence};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_store_error,
};
use crate::request_response::{
    AssigneeInfo, AuditEventInfo, AuditTimelineResponse, CreateAssigneeRequest,
    CreateStationRequest, CreateUserRequest, CreateUserResponse, LifecycleResponse,
    ListNotificationsResponse, ListReportsResponse, ListStationsResponse, LoadDriftInfo,
    NotificationInfo, ReconcileResponse, ReportInfo, ReportMalfunctionRequest, StationInfo,
};
use crate::validation::{
    ValidatedStation, parse_assignee_role, require_id, require_text, validate_report_request,
    validate_station_request,
};

// ============================================================================
// Lifecycle
// ============================================================================

/// Submits a malfunction report on behalf of the authenticated user.
///
/// # Errors
///
/// Returns an error if the actor is not a user, the request is invalid, no
/// admin exists, or storage fails. Duplicate and failed reports are not
/// errors; they come back as a `LifecycleResponse`.
pub fn report_malfunction(
    persistence: &mut Persistence,
    engine: &ReportLifecycleEngine,
    request: &ReportMalfunctionRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<LifecycleResponse, ApiError> {
    AuthorizationService::authorize_report_malfunction(authenticated_actor)?;
    let candidate: NewReport = validate_report_request(request, authenticated_actor.id)?;

    let outcome: Outcome = engine
        .report_malfunction(
            persistence,
            &authenticated_actor.to_audit_actor(),
            cause,
            &candidate,
        )
        .map_err(translate_core_error)?;

    info!(
        station_id = candidate.station_id,
        user_id = authenticated_actor.id,
        success = outcome.is_success(),
        "report_malfunction handled"
    );
    Ok(LifecycleResponse::from(outcome))
}

/// Forwards a pending report to an operator.
///
/// # Errors
///
/// Returns an error if the report does not exist, the actor is not the
/// report's admin, no operator exists, or storage fails.
pub fn forward_malfunction(
    persistence: &mut Persistence,
    engine: &ReportLifecycleEngine,
    report_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<LifecycleResponse, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    AuthorizationService::authorize_forward(authenticated_actor, &report)?;

    let outcome: Outcome = engine
        .forward_malfunction(
            persistence,
            &authenticated_actor.to_audit_actor(),
            cause,
            report_id,
        )
        .map_err(translate_core_error)?;

    info!(
        report_id,
        admin_id = authenticated_actor.id,
        success = outcome.is_success(),
        "forward_malfunction handled"
    );
    Ok(LifecycleResponse::from(outcome))
}

/// Resolves a managed report.
///
/// # Errors
///
/// Returns an error if the report does not exist, the actor is not the
/// report's operator, or storage fails.
pub fn resolve_malfunction(
    persistence: &mut Persistence,
    engine: &ReportLifecycleEngine,
    report_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<LifecycleResponse, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    AuthorizationService::authorize_resolve(authenticated_actor, &report)?;

    let outcome: Outcome = engine
        .resolve_malfunction(
            persistence,
            &authenticated_actor.to_audit_actor(),
            cause,
            report_id,
        )
        .map_err(translate_core_error)?;

    info!(
        report_id,
        operator_id = authenticated_actor.id,
        success = outcome.is_success(),
        "resolve_malfunction handled"
    );
    Ok(LifecycleResponse::from(outcome))
}

fn load_report(persistence: &mut Persistence, report_id: i64) -> Result<Report, ApiError> {
    let report_id: i64 = require_id("report_id", report_id)?;
    persistence
        .get_report(report_id)
        .map_err(translate_store_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Report"),
            message: format!("Report {report_id} does not exist"),
        })
}

// ============================================================================
// Seeding
// ============================================================================

/// Registers a user.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the username is invalid
/// or taken.
pub fn create_user(
    persistence: &mut Persistence,
    request: &CreateUserRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateUserResponse, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "create_user")?;
    let username: &str = require_text("username", &request.username)?;

    let user_id: i64 = persistence
        .create_user(username)
        .map_err(translate_persistence_error)?;

    Ok(CreateUserResponse {
        user_id,
        username: username.to_string(),
        message: format!("Registered user '{username}'"),
    })
}

/// Registers an admin or operator.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the role is not an
/// assignee role, or the username is invalid or taken.
pub fn create_assignee(
    persistence: &mut Persistence,
    request: &CreateAssigneeRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AssigneeInfo, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "create_assignee")?;
    let role: AssigneeRole = parse_assignee_role(&request.role)?;
    let username: &str = require_text("username", &request.username)?;

    let assignee: Assignee = persistence
        .create_assignee(role, username)
        .map_err(translate_persistence_error)?;

    Ok(AssigneeInfo::from(&assignee))
}

/// Registers a station in service.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the station id is taken.
pub fn create_station(
    persistence: &mut Persistence,
    request: &CreateStationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<StationInfo, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "create_station")?;
    let station: ValidatedStation = validate_station_request(request)?;

    let created = persistence
        .create_station(
            station.station_id,
            &station.postal_code,
            &station.street,
            &station.district,
        )
        .map_err(translate_persistence_error)?;

    Ok(StationInfo::from(&created))
}

// ============================================================================
// Reads
// ============================================================================

/// Lists in-service stations of a postal code. Open to everyone.
///
/// # Errors
///
/// Returns an error if the postal code is invalid or storage fails.
pub fn list_available_stations(
    persistence: &mut Persistence,
    postal_code: &str,
) -> Result<ListStationsResponse, ApiError> {
    let postal_code: PostalCode = PostalCode::new(postal_code).map_err(translate_domain_error)?;

    let stations = persistence
        .find_available_stations_by_postal_code(&postal_code)
        .map_err(translate_persistence_error)?;

    Ok(ListStationsResponse {
        postal_code: postal_code.value().to_string(),
        stations: stations.iter().map(StationInfo::from).collect(),
    })
}

/// Lists every report an admin or operator has been assigned.
///
/// # Errors
///
/// Returns an error if the role is invalid, the actor may not view this
/// assignee, or storage fails.
pub fn list_reports(
    persistence: &mut Persistence,
    role: &str,
    assignee_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListReportsResponse, ApiError> {
    let role: AssigneeRole = parse_assignee_role(role)?;
    let assignee_id: i64 = require_id("assignee_id", assignee_id)?;
    AuthorizationService::authorize_view_assignments(authenticated_actor, role, assignee_id)?;

    let reports: Vec<Report> = match role {
        AssigneeRole::Admin => persistence.list_reports_for_admin(assignee_id),
        AssigneeRole::Operator => persistence.list_reports_for_operator(assignee_id),
    }
    .map_err(translate_persistence_error)?;

    Ok(ListReportsResponse {
        role: role.to_string(),
        assignee_id,
        reports: reports.iter().map(ReportInfo::from).collect(),
    })
}

/// Lists a user's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the actor may not read this inbox or storage fails.
pub fn list_notifications(
    persistence: &mut Persistence,
    user_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListNotificationsResponse, ApiError> {
    let user_id: i64 = require_id("user_id", user_id)?;
    AuthorizationService::authorize_view_notifications(authenticated_actor, user_id)?;

    let notifications = persistence
        .get_notifications_for_user(user_id)
        .map_err(translate_persistence_error)?;

    Ok(ListNotificationsResponse {
        user_id,
        notifications: notifications.iter().map(NotificationInfo::from).collect(),
    })
}

/// Returns a report's audit trail. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or storage fails.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    report_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "get_audit_timeline")?;
    let report_id: i64 = require_id("report_id", report_id)?;

    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(report_id)
        .map_err(translate_persistence_error)?;

    Ok(AuditTimelineResponse {
        report_id,
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}

// ============================================================================
// Maintenance
// ============================================================================

/// Recomputes assignee counters from the reports table. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or storage fails.
pub fn reconcile_assignee_loads(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ReconcileResponse, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "reconcile_assignee_loads")?;

    let drifted: Vec<LoadDrift> = persistence
        .reconcile_assignee_loads()
        .map_err(translate_persistence_error)?;

    if !drifted.is_empty() {
        warn!(corrected = drifted.len(), "Assignee counters were out of sync");
    }

    Ok(ReconcileResponse {
        message: format!("Corrected {} assignee counter(s)", drifted.len()),
        corrected: drifted.iter().map(LoadDriftInfo::from).collect(),
    })
}
