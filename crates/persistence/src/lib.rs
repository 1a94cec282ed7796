// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the charging-station malfunction tracker.
//!
//! This crate stores reports, stations, assignees, users, notifications and
//! audit events in `SQLite` through Diesel, and implements the storage seams
//! the lifecycle engine runs against.
//!
//! ## Concurrency
//!
//! Each [`Persistence`] owns one connection. Lifecycle transactions are
//! opened with `BEGIN IMMEDIATE`, so concurrent writers on the same database
//! file serialize on the write lock and wait up to the configured busy
//! timeout. A writer that times out surfaces as
//! [`PersistenceError::DatabaseBusy`], which the engine retries.
//!
//! The "one open report per station" rule is also enforced by a partial
//! unique index, so a racing insert fails with a uniqueness violation even
//! if it slipped past the engine's duplicate check.
//!
//! ## Testing
//!
//! - In-memory databases are unique per call and isolated from each other
//! - File databases use WAL mode; concurrency tests use a temporary directory

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod lifecycle;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chargewatch_audit::AuditEvent;
use chargewatch_domain::{
    Assignee, AssigneeRole, Notification, PostalCode, Report, Station,
};
use diesel::SqliteConnection;

use crate::backend::PersistenceBackend;

pub use backend::sqlite::DEFAULT_BUSY_TIMEOUT;
pub use data_models::{LoadDrift, UserData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` persistence adapter.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a fresh shared-cache database, so tests never see
    /// each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url, DEFAULT_BUSY_TIMEOUT)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Opens (or creates) a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    /// * `busy_timeout` - How long a write waits for a competing writer
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(
        path: P,
        busy_timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(path_str, busy_timeout)?;

        // Readers keep working while a report transaction holds the write lock.
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a user who can submit reports and receives broadcasts.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is invalid or taken.
    pub fn create_user(&mut self, username: &str) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username)
    }

    /// Registers an admin or operator with an empty load.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is invalid or taken for the role.
    pub fn create_assignee(
        &mut self,
        role: AssigneeRole,
        username: &str,
    ) -> Result<Assignee, PersistenceError> {
        mutations::assignees::create_assignee(&mut self.conn, role, username)
    }

    /// Registers a station in service.
    ///
    /// # Errors
    ///
    /// Returns an error if the station id is taken.
    pub fn create_station(
        &mut self,
        station_id: i64,
        postal_code: &PostalCode,
        street: &str,
        district: &str,
    ) -> Result<Station, PersistenceError> {
        mutations::stations::create_station(&mut self.conn, station_id, postal_code, street, district)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Retrieves a registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Retrieves an admin or operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_assignee(&mut self, assignee_id: i64) -> Result<Option<Assignee>, PersistenceError> {
        queries::assignees::get_assignee(&mut self.conn, assignee_id)
    }

    /// Lists every admin and operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_assignees(&mut self) -> Result<Vec<Assignee>, PersistenceError> {
        queries::assignees::list_all_assignees(&mut self.conn)
    }

    /// Every report ever assigned to an admin, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reports_for_admin(&mut self, admin_id: i64) -> Result<Vec<Report>, PersistenceError> {
        queries::reports::find_reports_by_admin(&mut self.conn, admin_id)
    }

    /// Every report ever forwarded to an operator, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reports_for_operator(
        &mut self,
        operator_id: i64,
    ) -> Result<Vec<Report>, PersistenceError> {
        queries::reports::find_reports_by_operator(&mut self.conn, operator_id)
    }

    /// The work queue of an admin: reports still waiting to be forwarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pending_reports_for_admin(
        &mut self,
        admin_id: i64,
    ) -> Result<Vec<Report>, PersistenceError> {
        queries::reports::find_pending_reports_by_admin(&mut self.conn, admin_id)
    }

    /// The work queue of an operator: reports being repaired.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_managed_reports_for_operator(
        &mut self,
        operator_id: i64,
    ) -> Result<Vec<Report>, PersistenceError> {
        queries::reports::find_managed_reports_by_operator(&mut self.conn, operator_id)
    }

    /// Stations in a postal code that are currently in service.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_available_stations_by_postal_code(
        &mut self,
        postal_code: &PostalCode,
    ) -> Result<Vec<Station>, PersistenceError> {
        queries::stations::find_available_stations_by_postal_code(&mut self.conn, postal_code)
    }

    /// A user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_notifications_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<Notification>, PersistenceError> {
        queries::notifications::get_notifications_for_user(&mut self.conn, user_id)
    }

    /// Retrieves a single audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or cannot be decoded.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// A report's audit events in the order they were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(&mut self, report_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, report_id)
    }

    /// Counts the open reports an assignee currently holds, from the
    /// reports table rather than the cached counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_open_reports_for_assignee(
        &mut self,
        assignee_id: i64,
        role: AssigneeRole,
    ) -> Result<u32, PersistenceError> {
        queries::assignees::count_open_reports(&mut self.conn, assignee_id, role)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Rewrites drifted open-report counters from the reports table.
    ///
    /// Runs in one write-locked transaction so no lifecycle transition can
    /// interleave with the recount.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn reconcile_assignee_loads(&mut self) -> Result<Vec<LoadDrift>, PersistenceError> {
        self.conn
            .immediate_transaction(mutations::assignees::reconcile_assignee_loads)
    }
}
