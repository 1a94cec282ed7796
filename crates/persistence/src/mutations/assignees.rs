// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{Assignee, AssigneeRole, validate_username};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::LoadDrift;
use crate::diesel_schema::assignees;
use crate::error::PersistenceError;
use crate::queries::assignees::{count_open_reports, get_assignee, list_all_assignees};

/// Creates an admin or operator with an empty load.
///
/// # Errors
///
/// Returns an error if the username is invalid or already taken for the role.
pub fn create_assignee(
    conn: &mut SqliteConnection,
    role: AssigneeRole,
    username: &str,
) -> Result<Assignee, PersistenceError> {
    validate_username(username).map_err(|e| PersistenceError::CheckViolation(e.to_string()))?;

    diesel::insert_into(assignees::table)
        .values((
            assignees::role.eq(role.as_str()),
            assignees::username.eq(username),
            assignees::open_report_count.eq(0),
        ))
        .execute(conn)?;

    let assignee_id: i64 = conn.get_last_insert_rowid()?;
    info!(assignee_id, %role, username, "Assignee created");

    get_assignee(conn, assignee_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("assignee {assignee_id}")))
}

/// Adds one to an assignee's open-report counter in a single statement.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn increment_open_count(
    conn: &mut SqliteConnection,
    assignee_id: i64,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::update(assignees::table)
        .filter(assignees::assignee_id.eq(assignee_id))
        .set(assignees::open_report_count.eq(assignees::open_report_count + 1))
        .execute(conn)?;
    debug!(assignee_id, rows, "Open-report counter incremented");
    Ok(rows > 0)
}

/// Subtracts one from an assignee's counter unless it is already zero.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn decrement_open_count(
    conn: &mut SqliteConnection,
    assignee_id: i64,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::update(assignees::table)
        .filter(assignees::assignee_id.eq(assignee_id))
        .filter(assignees::open_report_count.gt(0))
        .set(assignees::open_report_count.eq(assignees::open_report_count - 1))
        .execute(conn)?;
    debug!(assignee_id, rows, "Open-report counter decremented");
    Ok(rows > 0)
}

/// Recomputes every assignee counter from the reports table.
///
/// Returns the assignees whose stored counter was wrong, with both values.
///
/// # Errors
///
/// Returns an error if a query or update fails.
pub fn reconcile_assignee_loads(
    conn: &mut SqliteConnection,
) -> Result<Vec<LoadDrift>, PersistenceError> {
    let mut drifted: Vec<LoadDrift> = Vec::new();

    for assignee in list_all_assignees(conn)? {
        let live: u32 = count_open_reports(conn, assignee.assignee_id, assignee.role)?;
        if live == assignee.open_report_count {
            continue;
        }

        warn!(
            assignee_id = assignee.assignee_id,
            cached = assignee.open_report_count,
            live,
            "Open-report counter drifted, correcting"
        );
        let live_column: i32 = i32::try_from(live).map_err(|_| {
            PersistenceError::ReconstructionError(format!("open report count {live} out of range"))
        })?;
        diesel::update(assignees::table)
            .filter(assignees::assignee_id.eq(assignee.assignee_id))
            .set(assignees::open_report_count.eq(live_column))
            .execute(conn)?;

        drifted.push(LoadDrift {
            assignee_id: assignee.assignee_id,
            role: assignee.role,
            cached: assignee.open_report_count,
            live,
        });
    }

    info!(drifted = drifted.len(), "Assignee loads reconciled");
    Ok(drifted)
}
