// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{Report, ReportStatus};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::parse_column;
use crate::diesel_schema::reports;
use crate::error::PersistenceError;

/// Diesel Queryable struct for report rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reports)]
pub(crate) struct ReportRow {
    report_id: i64,
    station_id: i64,
    description: String,
    severity: String,
    category: String,
    status: String,
    user_id: i64,
    admin_id: Option<i64>,
    operator_id: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl ReportRow {
    pub(crate) fn into_domain(self) -> Result<Report, PersistenceError> {
        Ok(Report {
            report_id: self.report_id,
            station_id: self.station_id,
            description: self.description,
            severity: parse_column("severity", &self.severity)?,
            category: parse_column("category", &self.category)?,
            status: parse_column("status", &self.status)?,
            user_id: self.user_id,
            admin_id: self.admin_id,
            operator_id: self.operator_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_reports(rows: Vec<ReportRow>) -> Result<Vec<Report>, PersistenceError> {
    rows.into_iter().map(ReportRow::into_domain).collect()
}

/// Retrieves a report by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_report(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<Option<Report>, PersistenceError> {
    reports::table
        .filter(reports::report_id.eq(report_id))
        .select(ReportRow::as_select())
        .first::<ReportRow>(conn)
        .optional()?
        .map(ReportRow::into_domain)
        .transpose()
}

/// Lists every report filed against a station, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn find_reports_by_station(
    conn: &mut SqliteConnection,
    station_id: i64,
) -> Result<Vec<Report>, PersistenceError> {
    debug!(station_id, "Loading reports for station");
    let rows: Vec<ReportRow> = reports::table
        .filter(reports::station_id.eq(station_id))
        .order(reports::report_id.asc())
        .select(ReportRow::as_select())
        .load(conn)?;
    into_reports(rows)
}

/// Lists every report owned by an admin, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn find_reports_by_admin(
    conn: &mut SqliteConnection,
    admin_id: i64,
) -> Result<Vec<Report>, PersistenceError> {
    let rows: Vec<ReportRow> = reports::table
        .filter(reports::admin_id.eq(admin_id))
        .order(reports::report_id.asc())
        .select(ReportRow::as_select())
        .load(conn)?;
    into_reports(rows)
}

/// Lists every report forwarded to an operator, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn find_reports_by_operator(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<Vec<Report>, PersistenceError> {
    let rows: Vec<ReportRow> = reports::table
        .filter(reports::operator_id.eq(operator_id))
        .order(reports::report_id.asc())
        .select(ReportRow::as_select())
        .load(conn)?;
    into_reports(rows)
}

/// Lists an admin's reports that still wait to be forwarded.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn find_pending_reports_by_admin(
    conn: &mut SqliteConnection,
    admin_id: i64,
) -> Result<Vec<Report>, PersistenceError> {
    let rows: Vec<ReportRow> = reports::table
        .filter(reports::admin_id.eq(admin_id))
        .filter(reports::status.eq(ReportStatus::Pending.as_str()))
        .order(reports::report_id.asc())
        .select(ReportRow::as_select())
        .load(conn)?;
    into_reports(rows)
}

/// Lists an operator's reports that still wait to be resolved.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn find_managed_reports_by_operator(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<Vec<Report>, PersistenceError> {
    let rows: Vec<ReportRow> = reports::table
        .filter(reports::operator_id.eq(operator_id))
        .filter(reports::status.eq(ReportStatus::Managed.as_str()))
        .order(reports::report_id.asc())
        .select(ReportRow::as_select())
        .load(conn)?;
    into_reports(rows)
}
