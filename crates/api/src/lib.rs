// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the charging-station malfunction tracker.
//!
//! This crate sits between transport (HTTP) and the lifecycle engine:
//!
//! - identities are authenticated against registered users and assignees
//! - actions are authorized by role and, for forward/resolve, by assignment
//! - raw request fields are validated into domain value objects
//! - engine outcomes and errors are translated into the API contract

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod validation;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error, translate_store_error,
};
pub use handlers::{
    create_assignee, create_station, create_user, forward_malfunction, get_audit_timeline,
    list_available_stations, list_notifications, list_reports, reconcile_assignee_loads,
    report_malfunction, resolve_malfunction,
};
pub use request_response::{
    AssigneeInfo, AuditEventInfo, AuditTimelineResponse, CreateAssigneeRequest,
    CreateStationRequest, CreateUserRequest, CreateUserResponse, LifecycleResponse,
    ListNotificationsResponse, ListReportsResponse, ListStationsResponse, LoadDriftInfo,
    NotificationInfo, OutcomeKind, ReconcileResponse, ReportInfo, ReportMalfunctionRequest,
    StationInfo,
};
pub use validation::{RequestError, parse_assignee_role, parse_role};
