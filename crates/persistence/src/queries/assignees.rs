// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{Assignee, AssigneeRole, ReportStatus};
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::parse_column;
use crate::diesel_schema::{assignees, reports};
use crate::error::PersistenceError;

/// Diesel Queryable struct for assignee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = assignees)]
pub(crate) struct AssigneeRow {
    assignee_id: i64,
    role: String,
    username: String,
    open_report_count: i32,
}

impl AssigneeRow {
    pub(crate) fn into_domain(self) -> Result<Assignee, PersistenceError> {
        let open_report_count: u32 = u32::try_from(self.open_report_count).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "assignee {} has negative open_report_count {}",
                self.assignee_id, self.open_report_count
            ))
        })?;
        Ok(Assignee {
            assignee_id: self.assignee_id,
            role: parse_column("role", &self.role)?,
            username: self.username,
            open_report_count,
        })
    }
}

/// Lists the pool for a role, ordered by assignee id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_assignees(
    conn: &mut SqliteConnection,
    role: AssigneeRole,
) -> Result<Vec<Assignee>, PersistenceError> {
    let rows: Vec<AssigneeRow> = assignees::table
        .filter(assignees::role.eq(role.as_str()))
        .order(assignees::assignee_id.asc())
        .select(AssigneeRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AssigneeRow::into_domain).collect()
}

/// Lists every assignee of both roles, ordered by assignee id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_all_assignees(conn: &mut SqliteConnection) -> Result<Vec<Assignee>, PersistenceError> {
    let rows: Vec<AssigneeRow> = assignees::table
        .order(assignees::assignee_id.asc())
        .select(AssigneeRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AssigneeRow::into_domain).collect()
}

/// Retrieves an assignee by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_assignee(
    conn: &mut SqliteConnection,
    assignee_id: i64,
) -> Result<Option<Assignee>, PersistenceError> {
    assignees::table
        .filter(assignees::assignee_id.eq(assignee_id))
        .select(AssigneeRow::as_select())
        .first::<AssigneeRow>(conn)
        .optional()?
        .map(AssigneeRow::into_domain)
        .transpose()
}

/// Counts the open reports naming an assignee in the column for `role`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_open_reports(
    conn: &mut SqliteConnection,
    assignee_id: i64,
    role: AssigneeRole,
) -> Result<u32, PersistenceError> {
    let open = reports::status.ne(ReportStatus::Resolved.as_str());
    let count: i64 = match role {
        AssigneeRole::Admin => reports::table
            .filter(reports::admin_id.eq(assignee_id))
            .filter(open)
            .count()
            .get_result(conn)?,
        AssigneeRole::Operator => reports::table
            .filter(reports::operator_id.eq(assignee_id))
            .filter(open)
            .count()
            .get_result(conn)?,
    };
    u32::try_from(count).map_err(|_| {
        PersistenceError::ReconstructionError(format!("open report count {count} out of range"))
    })
}
