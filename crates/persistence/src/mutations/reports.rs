// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{NewReport, Report, ReportStatus, ReportUpdate};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use super::now_rfc3339;
use crate::backend::PersistenceBackend;
use crate::diesel_schema::reports;
use crate::error::PersistenceError;
use crate::queries::reports::get_report;

/// Changeset for merge updates; `None` fields are left untouched.
#[derive(AsChangeset)]
#[diesel(table_name = reports)]
struct ReportChangeset<'a> {
    status: Option<&'a str>,
    operator_id: Option<i64>,
    updated_at: Option<&'a str>,
}

/// Inserts a `pending` report and returns the stored row.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the station already has an
/// open report, `ForeignKeyViolation` if the station, user or admin does not
/// exist, or another error if the insert fails.
pub fn create_report(
    conn: &mut SqliteConnection,
    report: &NewReport,
) -> Result<Report, PersistenceError> {
    let now: String = now_rfc3339()?;

    diesel::insert_into(reports::table)
        .values((
            reports::station_id.eq(report.station_id),
            reports::description.eq(report.description.value()),
            reports::severity.eq(report.severity.as_str()),
            reports::category.eq(report.category.as_str()),
            reports::status.eq(ReportStatus::Pending.as_str()),
            reports::user_id.eq(report.user_id),
            reports::admin_id.eq(report.admin_id),
            reports::created_at.eq(&now),
            reports::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let report_id: i64 = conn.get_last_insert_rowid()?;
    info!(report_id, station_id = report.station_id, "Report stored");

    get_report(conn, report_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("report {report_id}")))
}

/// Applies the `Some` fields of `update`. Returns false if no report matched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_report(
    conn: &mut SqliteConnection,
    update: &ReportUpdate,
) -> Result<bool, PersistenceError> {
    let changeset: ReportChangeset<'_> = ReportChangeset {
        status: update.status.map(|s| s.as_str()),
        operator_id: update.operator_id,
        updated_at: update.updated_at.as_deref(),
    };

    if changeset.status.is_none()
        && changeset.operator_id.is_none()
        && changeset.updated_at.is_none()
    {
        // Nothing to write; report whether the row exists.
        return Ok(get_report(conn, update.report_id)?.is_some());
    }

    let rows: usize = diesel::update(reports::table)
        .filter(reports::report_id.eq(update.report_id))
        .set(&changeset)
        .execute(conn)?;

    debug!(report_id = update.report_id, rows, "Report updated");
    Ok(rows > 0)
}

/// Deletes a report. Returns false if no report matched.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_report(conn: &mut SqliteConnection, report_id: i64) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::delete(reports::table.filter(reports::report_id.eq(report_id)))
        .execute(conn)?;
    info!(report_id, rows, "Report deleted");
    Ok(rows > 0)
}
