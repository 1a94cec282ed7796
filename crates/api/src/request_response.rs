// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use chargewatch::{FanoutStatus, Outcome};
use chargewatch_audit::AuditEvent;
use chargewatch_domain::{Assignee, Notification, Report, Station};
use chargewatch_persistence::LoadDrift;
use serde::{Deserialize, Serialize};

/// API request to report a broken station.
///
/// Severity and category are raw strings; validation happens in the API
/// layer, not at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMalfunctionRequest {
    /// The broken station.
    pub station_id: i64,
    /// What is wrong, at least ten characters.
    pub description: String,
    /// `low`, `medium` or `high`.
    pub severity: String,
    /// `hardware`, `software` or `connectivity`.
    pub category: String,
}

/// API request to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Login-style name, no whitespace.
    pub username: String,
}

/// API response for a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: i64,
    pub username: String,
    /// A success message.
    pub message: String,
}

/// API request to register an admin or operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAssigneeRequest {
    /// `admin` or `operator`.
    pub role: String,
    pub username: String,
}

/// An admin or operator and their current load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeInfo {
    pub assignee_id: i64,
    /// `admin` or `operator`.
    pub role: String,
    pub username: String,
    pub open_report_count: u32,
}

impl From<&Assignee> for AssigneeInfo {
    fn from(assignee: &Assignee) -> Self {
        Self {
            assignee_id: assignee.assignee_id,
            role: assignee.role.to_string(),
            username: assignee.username.clone(),
            open_report_count: assignee.open_report_count,
        }
    }
}

/// API request to register a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStationRequest {
    pub station_id: i64,
    pub postal_code: String,
    pub street: String,
    pub district: String,
}

/// Public view of a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationInfo {
    pub station_id: i64,
    pub postal_code: String,
    pub street: String,
    pub district: String,
    /// `available` or `out_of_service`.
    pub status: String,
}

impl From<&Station> for StationInfo {
    fn from(station: &Station) -> Self {
        Self {
            station_id: station.station_id,
            postal_code: station.postal_code.clone(),
            street: station.street.clone(),
            district: station.district.clone(),
            status: station.status.to_string(),
        }
    }
}

/// API response listing in-service stations of a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStationsResponse {
    pub postal_code: String,
    pub stations: Vec<StationInfo>,
}

/// Public view of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub report_id: i64,
    pub station_id: i64,
    pub description: String,
    pub severity: String,
    pub category: String,
    pub status: String,
    pub user_id: i64,
    pub admin_id: Option<i64>,
    pub operator_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Report> for ReportInfo {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.report_id,
            station_id: report.station_id,
            description: report.description.clone(),
            severity: report.severity.to_string(),
            category: report.category.to_string(),
            status: report.status.to_string(),
            user_id: report.user_id,
            admin_id: report.admin_id,
            operator_id: report.operator_id,
            created_at: report.created_at.clone(),
            updated_at: report.updated_at.clone(),
        }
    }
}

/// API response listing the reports assigned to an admin or operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReportsResponse {
    pub role: String,
    pub assignee_id: i64,
    pub reports: Vec<ReportInfo>,
}

/// Which lifecycle outcome a response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    ReportCreated,
    ReportAlreadyExists,
    ReportCreateFailed,
    ReportUpdated,
    UpdateFailed,
    InvalidTransition,
}

/// API response for the three lifecycle operations.
///
/// Every outcome, success or not, is carried here; the HTTP layer derives
/// the status code from `outcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleResponse {
    pub outcome: OutcomeKind,
    pub success: bool,
    /// The stored report, or the conflicting one for duplicates.
    pub report: Option<ReportInfo>,
    /// Why the operation did not succeed.
    pub reason: Option<String>,
    /// Users notified by this transition, when it notifies.
    pub notified: Option<usize>,
    /// Why the notification broadcast failed, if it did.
    pub notification_error: Option<String>,
}

impl From<Outcome> for LifecycleResponse {
    fn from(outcome: Outcome) -> Self {
        let success: bool = outcome.is_success();
        let reason: Option<String> = outcome.reason();
        let report: Option<ReportInfo> = outcome.report().map(ReportInfo::from);

        let (kind, fanout): (OutcomeKind, Option<FanoutStatus>) = match outcome {
            Outcome::ReportCreated { fanout, .. } => (OutcomeKind::ReportCreated, Some(fanout)),
            Outcome::ReportUpdated { fanout, .. } => (OutcomeKind::ReportUpdated, Some(fanout)),
            Outcome::ReportAlreadyExists { .. } => (OutcomeKind::ReportAlreadyExists, None),
            Outcome::ReportCreateFailed { .. } => (OutcomeKind::ReportCreateFailed, None),
            Outcome::UpdateFailed { .. } => (OutcomeKind::UpdateFailed, None),
            Outcome::InvalidTransition { .. } => (OutcomeKind::InvalidTransition, None),
        };

        let (notified, notification_error): (Option<usize>, Option<String>) = match fanout {
            Some(FanoutStatus::Delivered { recipients }) => (Some(recipients), None),
            Some(FanoutStatus::Failed { reason }) => (None, Some(reason)),
            Some(FanoutStatus::Skipped) | None => (None, None),
        };

        Self {
            outcome: kind,
            success,
            report,
            reason,
            notified,
            notification_error,
        }
    }
}

/// One notification as shown to its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInfo {
    pub notification_id: i64,
    /// HTML fragment.
    pub content: String,
    pub created_at: String,
}

impl From<&Notification> for NotificationInfo {
    fn from(notification: &Notification) -> Self {
        Self {
            notification_id: notification.notification_id,
            content: notification.content.clone(),
            created_at: notification.created_at.clone(),
        }
    }
}

/// API response listing a user's notifications, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    pub user_id: i64,
    pub notifications: Vec<NotificationInfo>,
}

/// Serializable representation of an `AuditEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: Option<String>,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action_name: event.action.name.clone(),
            action_details: event.action.details.clone(),
            before_snapshot: event.before.data.clone(),
            after_snapshot: event.after.data.clone(),
            created_at: event.created_at.clone(),
        }
    }
}

/// API response with a report's audit trail, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    pub report_id: i64,
    pub events: Vec<AuditEventInfo>,
}

/// A counter that was corrected by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDriftInfo {
    pub assignee_id: i64,
    pub role: String,
    pub cached: u32,
    pub live: u32,
}

impl From<&LoadDrift> for LoadDriftInfo {
    fn from(drift: &LoadDrift) -> Self {
        Self {
            assignee_id: drift.assignee_id,
            role: drift.role.to_string(),
            cached: drift.cached,
            live: drift.live,
        }
    }
}

/// API response for a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub corrected: Vec<LoadDriftInfo>,
    /// A summary message.
    pub message: String,
}
