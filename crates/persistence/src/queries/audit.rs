// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use chargewatch_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventFullRow {
    event_id: i64,
    report_id: i64,
    station_id: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: String,
}

impl AuditEventFullRow {
    fn into_domain(self) -> Result<AuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        Ok(AuditEvent {
            event_id: Some(self.event_id),
            report_id: self.report_id,
            station_id: self.station_id,
            actor: Actor::new(actor_data.id, actor_data.actor_type),
            cause: Cause::new(cause_data.id, cause_data.description),
            action: Action::new(action_data.name, action_data.details),
            before: StateSnapshot::new(before_data.data),
            after: StateSnapshot::new(after_data.data),
            created_at: Some(self.created_at),
        })
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventFullRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventFullRow::as_select())
        .first::<AuditEventFullRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?;
    row.into_domain()
}

/// Lists a report's audit events in the order they were written.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventFullRow> = audit_events::table
        .filter(audit_events::report_id.eq(report_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventFullRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AuditEventFullRow::into_domain).collect()
}
