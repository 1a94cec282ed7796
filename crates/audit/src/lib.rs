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

use chargewatch_domain::{AssigneeRole, Report};

/// Represents the entity performing a lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (`user`, `admin`, `operator` or `system`).
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates an actor for a registered user.
    #[must_use]
    pub fn user(user_id: i64) -> Self {
        Self::new(user_id.to_string(), String::from("user"))
    }

    /// Creates an actor for an admin or operator.
    #[must_use]
    pub fn assignee(assignee_id: i64, role: AssigneeRole) -> Self {
        Self::new(assignee_id.to_string(), role.to_string())
    }

    /// Creates an actor for maintenance work not tied to a person.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// Represents the reason or trigger for an action, usually a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the lifecycle action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ReportMalfunction`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of a report at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A compact string rendering of the captured state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot used before a report exists.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("none"))
    }

    /// Captures the lifecycle-relevant fields of a report.
    #[must_use]
    pub fn of_report(report: &Report) -> Self {
        let admin: String = report
            .admin_id
            .map_or_else(|| String::from("-"), |id| id.to_string());
        let operator: String = report
            .operator_id
            .map_or_else(|| String::from("-"), |id| id.to_string());
        Self::new(format!(
            "report_id={},station_id={},status={},admin_id={admin},operator_id={operator}",
            report.report_id, report.station_id, report.status
        ))
    }
}

/// An immutable audit event recording one report lifecycle transition.
///
/// Every committed transition produces exactly one audit event, written in
/// the same transaction as the transition itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The identifier assigned by storage, `None` until persisted.
    pub event_id: Option<i64>,
    /// The report the transition applied to.
    pub report_id: i64,
    /// The station the report is about.
    pub station_id: i64,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// Storage timestamp, `None` until persisted.
    pub created_at: Option<String>,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent` scoped to `after`'s report.
    ///
    /// # Arguments
    ///
    /// * `report` - The report as it stands after the transition
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    #[must_use]
    pub fn for_report(
        report: &Report,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            report_id: report.report_id,
            station_id: report.station_id,
            actor,
            cause,
            action,
            before,
            after: StateSnapshot::of_report(report),
            created_at: None,
        }
    }
}
