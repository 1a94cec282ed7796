// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository seams between the lifecycle engine and storage.
//!
//! Every method takes `&mut self` because storage backends hold a single
//! connection. All reads and writes made inside
//! [`LifecycleStore::atomically`] belong to one storage transaction.

use std::collections::BTreeSet;

use chargewatch_audit::AuditEvent;
use chargewatch_domain::{
    Assignee, AssigneeRole, NewReport, Report, ReportUpdate, Station, StationStatus,
};

/// Storage failures, classified by how the engine should react to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// The store is locked by another writer; the operation may be retried.
    Busy(String),
    /// A row required by the operation does not exist.
    NotFound(String),
    /// A check or foreign key constraint rejected the write.
    Rejected(String),
    /// Any other storage failure.
    Unavailable(String),
}

impl StoreError {
    /// Returns true if retrying the whole transaction may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(msg) => write!(f, "Uniqueness conflict: {msg}"),
            Self::Busy(msg) => write!(f, "Store busy: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Rejected(msg) => write!(f, "Write rejected: {msg}"),
            Self::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Report persistence.
pub trait ReportStore {
    /// Inserts a new `pending` report and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the station already has an open
    /// report, `StoreError::Rejected` for other constraint failures.
    fn create_report(&mut self, report: &NewReport) -> Result<Report, StoreError>;

    /// Loads a report by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_report(&mut self, report_id: i64) -> Result<Option<Report>, StoreError>;

    /// Lists every report filed against a station, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_reports_by_station(&mut self, station_id: i64) -> Result<Vec<Report>, StoreError>;

    /// Lists every report owned by an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_reports_by_admin(&mut self, admin_id: i64) -> Result<Vec<Report>, StoreError>;

    /// Lists every report forwarded to an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_reports_by_operator(&mut self, operator_id: i64) -> Result<Vec<Report>, StoreError>;

    /// Applies the `Some` fields of `update`, preserving everything else.
    ///
    /// Returns false if no report matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_report(&mut self, update: &ReportUpdate) -> Result<bool, StoreError>;

    /// Deletes a report. Returns false if no report matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_report(&mut self, report_id: i64) -> Result<bool, StoreError>;
}

/// Admin and operator pools with their cached open-report counters.
pub trait AssigneeStore {
    /// Lists the pool for `role`, ordered by assignee id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_assignees(&mut self, role: AssigneeRole) -> Result<Vec<Assignee>, StoreError>;

    /// Adds one to the assignee's counter. Returns false if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn increment_open_count(&mut self, assignee_id: i64) -> Result<bool, StoreError>;

    /// Subtracts one from the assignee's counter unless it is already zero.
    ///
    /// Returns false if no row was changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn decrement_open_count(&mut self, assignee_id: i64) -> Result<bool, StoreError>;
}

/// Charging stations.
pub trait StationStore {
    /// Loads a station by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_station(&mut self, station_id: i64) -> Result<Option<Station>, StoreError>;

    /// Writes the station's operational flag. Returns false if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set_station_status(
        &mut self,
        station_id: i64,
        status: StationStatus,
    ) -> Result<bool, StoreError>;
}

/// Registered users.
pub trait UserStore {
    /// Returns the id of every registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_user_ids(&mut self) -> Result<BTreeSet<i64>, StoreError>;
}

/// User notifications.
pub trait NotificationStore {
    /// Writes one notification per recipient, all sharing `content` and one
    /// creation timestamp. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create_notifications(
        &mut self,
        user_ids: &BTreeSet<i64>,
        content: &str,
    ) -> Result<usize, StoreError>;
}

/// The append-only lifecycle audit trail.
pub trait AuditStore {
    /// Appends an event and returns its storage id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError>;
}

/// Everything the lifecycle engine needs, plus transactions.
pub trait LifecycleStore:
    ReportStore + AssigneeStore + StationStore + UserStore + NotificationStore + AuditStore
{
    /// Runs `op` inside one write-locked storage transaction.
    ///
    /// Commits when `op` returns `Ok`, rolls back when it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error from `op`, or a `StoreError` converted into `E` if
    /// the transaction cannot be started or committed.
    fn atomically<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>;
}
