// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The report lifecycle: `pending -> managed -> resolved`.
//!
//! Each entry point runs its whole read-modify-write sequence inside one
//! [`LifecycleStore::atomically`] call, so the duplicate check, the insert,
//! the counter writes, the station flag and the audit event commit or roll
//! back together. The notification broadcast runs afterwards in its own
//! transaction.

use std::time::Duration;

use chargewatch_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use chargewatch_domain::{
    Assignee, AssigneeRole, NewReport, Report, ReportStatus, ReportUpdate, StationStatus,
    malfunction_message, resolution_message,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, info, warn};

use crate::balancer::AssignmentBalancer;
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::fanout::NotificationFanout;
use crate::guard::DuplicateGuard;
use crate::outcome::{FanoutStatus, Outcome};
use crate::station_sync::StationStatusSync;
use crate::store::{LifecycleStore, StoreError};

/// Pause before retrying a busy transaction, multiplied by the attempt number.
const RETRY_BACKOFF: Duration = Duration::from_millis(25);

/// Result of the transactional part of an operation.
enum Committed {
    /// Nothing left to do after commit.
    Done(Outcome),
    /// A report was created; users must be told the station is down.
    Created { report: Report, message: String },
    /// A report was resolved; users must be told the station is back.
    Resolved { report: Report, message: String },
}

/// Orchestrates duplicate suppression, assignment, station status, audit
/// and notifications around each report transition.
#[derive(Debug, Clone, Copy)]
pub struct ReportLifecycleEngine {
    config: EngineConfig,
    balancer: AssignmentBalancer,
}

impl Default for ReportLifecycleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ReportLifecycleEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            config,
            balancer: AssignmentBalancer::new(config.capacity),
        }
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    /// Files a new malfunction report and assigns it to an admin.
    ///
    /// On success the station is marked out of service and every registered
    /// user is notified.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store
    /// * `actor` - The submitting user
    /// * `cause` - The request that triggered this operation
    /// * `candidate` - The validated report
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoAssigneeAvailable` if there are no admins, or a
    /// store error the engine cannot express as an outcome.
    pub fn report_malfunction<S: LifecycleStore>(
        &self,
        store: &mut S,
        actor: &Actor,
        cause: &Cause,
        candidate: &NewReport,
    ) -> Result<Outcome, CoreError> {
        let committed: Committed = self.with_retry(store, "report_malfunction", |tx| {
            self.create_in_transaction(tx, actor, cause, candidate.clone())
        })?;
        Ok(self.finish(store, committed))
    }

    /// Hands a pending report to an operator and marks it managed.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store
    /// * `actor` - The forwarding admin
    /// * `cause` - The request that triggered this operation
    /// * `report_id` - The report to forward
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoAssigneeAvailable` if there are no operators, or
    /// a store error the engine cannot express as an outcome.
    pub fn forward_malfunction<S: LifecycleStore>(
        &self,
        store: &mut S,
        actor: &Actor,
        cause: &Cause,
        report_id: i64,
    ) -> Result<Outcome, CoreError> {
        let committed: Committed = self.with_retry(store, "forward_malfunction", |tx| {
            self.forward_in_transaction(tx, actor, cause, report_id)
        })?;
        Ok(self.finish(store, committed))
    }

    /// Closes a managed report, releases both assignees and brings the
    /// station back into service.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store
    /// * `actor` - The resolving operator
    /// * `cause` - The request that triggered this operation
    /// * `report_id` - The report to resolve
    ///
    /// # Errors
    ///
    /// Returns a store error the engine cannot express as an outcome.
    pub fn resolve_malfunction<S: LifecycleStore>(
        &self,
        store: &mut S,
        actor: &Actor,
        cause: &Cause,
        report_id: i64,
    ) -> Result<Outcome, CoreError> {
        let committed: Committed = self.with_retry(store, "resolve_malfunction", |tx| {
            Self::resolve_in_transaction(tx, actor, cause, report_id)
        })?;
        Ok(self.finish(store, committed))
    }

    fn create_in_transaction<S: LifecycleStore>(
        &self,
        tx: &mut S,
        actor: &Actor,
        cause: &Cause,
        mut candidate: NewReport,
    ) -> Result<Committed, CoreError> {
        let station_id: i64 = candidate.station_id;

        let admin: Assignee = self.balancer.select(tx, AssigneeRole::Admin)?;
        candidate.admin_id = Some(admin.assignee_id);

        if let Some(existing) = DuplicateGuard::has_open_report(tx, station_id)? {
            return Ok(Committed::Done(already_exists(existing)));
        }

        let Some(station) = tx.get_station(station_id)? else {
            return Ok(Committed::Done(Outcome::ReportCreateFailed {
                reason: format!("Station {station_id} does not exist"),
            }));
        };

        let report: Report = match tx.create_report(&candidate) {
            Ok(report) => report,
            Err(StoreError::Conflict(msg)) => {
                debug!(station_id, %msg, "Open-report constraint rejected insert");
                let outcome: Outcome = DuplicateGuard::has_open_report(tx, station_id)?
                    .map_or_else(|| Outcome::ReportCreateFailed { reason: msg }, already_exists);
                return Ok(Committed::Done(outcome));
            }
            Err(StoreError::Rejected(msg)) => {
                return Ok(Committed::Done(Outcome::ReportCreateFailed { reason: msg }));
            }
            Err(err) => return Err(err.into()),
        };

        require_row(
            tx.increment_open_count(admin.assignee_id)?,
            || format!("admin {}", admin.assignee_id),
        )?;
        StationStatusSync::set_status(tx, station_id, StationStatus::OutOfService)?;

        let event: AuditEvent = AuditEvent::for_report(
            &report,
            actor.clone(),
            cause.clone(),
            Action::new(
                String::from("ReportMalfunction"),
                Some(format!("admin_id={}", admin.assignee_id)),
            ),
            StateSnapshot::absent(),
        );
        tx.append_audit_event(&event)?;

        info!(
            report_id = report.report_id,
            station_id,
            admin_id = admin.assignee_id,
            "Malfunction reported"
        );

        Ok(Committed::Created {
            message: malfunction_message(&station),
            report,
        })
    }

    fn forward_in_transaction<S: LifecycleStore>(
        &self,
        tx: &mut S,
        actor: &Actor,
        cause: &Cause,
        report_id: i64,
    ) -> Result<Committed, CoreError> {
        let Some(report) = tx.get_report(report_id)? else {
            return Ok(Committed::Done(missing_report(report_id)));
        };

        if report.status.validate_transition(ReportStatus::Managed).is_err() {
            return Ok(Committed::Done(Outcome::InvalidTransition {
                report,
                target: ReportStatus::Managed,
            }));
        }

        let operator: Assignee = self.balancer.select(tx, AssigneeRole::Operator)?;

        let update: ReportUpdate = ReportUpdate {
            report_id,
            status: Some(ReportStatus::Managed),
            operator_id: Some(operator.assignee_id),
            updated_at: Some(now_rfc3339()?),
        };
        if !tx.update_report(&update)? {
            return Ok(Committed::Done(missing_report(report_id)));
        }

        require_row(
            tx.increment_open_count(operator.assignee_id)?,
            || format!("operator {}", operator.assignee_id),
        )?;

        let updated: Report = reload(tx, report_id)?;
        let event: AuditEvent = AuditEvent::for_report(
            &updated,
            actor.clone(),
            cause.clone(),
            Action::new(
                String::from("ForwardMalfunction"),
                Some(format!("operator_id={}", operator.assignee_id)),
            ),
            StateSnapshot::of_report(&report),
        );
        tx.append_audit_event(&event)?;

        info!(
            report_id,
            operator_id = operator.assignee_id,
            "Malfunction forwarded"
        );

        Ok(Committed::Done(Outcome::ReportUpdated {
            report: updated,
            fanout: FanoutStatus::Skipped,
        }))
    }

    fn resolve_in_transaction<S: LifecycleStore>(
        tx: &mut S,
        actor: &Actor,
        cause: &Cause,
        report_id: i64,
    ) -> Result<Committed, CoreError> {
        let Some(report) = tx.get_report(report_id)? else {
            return Ok(Committed::Done(missing_report(report_id)));
        };

        if report.status.validate_transition(ReportStatus::Resolved).is_err() {
            return Ok(Committed::Done(Outcome::InvalidTransition {
                report,
                target: ReportStatus::Resolved,
            }));
        }

        let Some(station) = tx.get_station(report.station_id)? else {
            return Ok(Committed::Done(Outcome::UpdateFailed {
                report_id,
                reason: format!("Station {} does not exist", report.station_id),
            }));
        };

        // Status is written first so a vanished row leaves the counters alone.
        let update: ReportUpdate = ReportUpdate {
            report_id,
            status: Some(ReportStatus::Resolved),
            operator_id: None,
            updated_at: Some(now_rfc3339()?),
        };
        if !tx.update_report(&update)? {
            return Ok(Committed::Done(missing_report(report_id)));
        }

        for assignee_id in [report.admin_id, report.operator_id].into_iter().flatten() {
            if !tx.decrement_open_count(assignee_id)? {
                warn!(
                    report_id,
                    assignee_id, "Open-report counter already at zero or assignee missing"
                );
            }
        }

        StationStatusSync::set_status(tx, report.station_id, StationStatus::Available)?;

        let updated: Report = reload(tx, report_id)?;
        let event: AuditEvent = AuditEvent::for_report(
            &updated,
            actor.clone(),
            cause.clone(),
            Action::new(String::from("ResolveMalfunction"), None),
            StateSnapshot::of_report(&report),
        );
        tx.append_audit_event(&event)?;

        info!(
            report_id,
            station_id = report.station_id,
            "Malfunction resolved"
        );

        Ok(Committed::Resolved {
            message: resolution_message(&station),
            report: updated,
        })
    }

    /// Runs `op` in a transaction, retrying while the store is busy.
    fn with_retry<S, T, F>(&self, store: &mut S, operation: &str, mut op: F) -> Result<T, CoreError>
    where
        S: LifecycleStore,
        F: FnMut(&mut S) -> Result<T, CoreError>,
    {
        let mut attempt: u32 = 1;
        loop {
            match store.atomically(&mut op) {
                Err(CoreError::Store(err))
                    if err.is_retryable() && attempt < self.config.max_attempts =>
                {
                    warn!(operation, attempt, error = %err, "Store busy, retrying");
                    std::thread::sleep(RETRY_BACKOFF * attempt);
                    attempt += 1;
                }
                Err(err) => {
                    error!(operation, attempt, error = %err, "Lifecycle operation failed");
                    return Err(err);
                }
                Ok(value) => return Ok(value),
            }
        }
    }

    fn finish<S: LifecycleStore>(&self, store: &mut S, committed: Committed) -> Outcome {
        match committed {
            Committed::Done(outcome) => outcome,
            Committed::Created { report, message } => Outcome::ReportCreated {
                fanout: NotificationFanout::announce(store, &message, self.config.max_attempts),
                report,
            },
            Committed::Resolved { report, message } => Outcome::ReportUpdated {
                fanout: NotificationFanout::announce(store, &message, self.config.max_attempts),
                report,
            },
        }
    }
}

fn already_exists(existing: Report) -> Outcome {
    Outcome::ReportAlreadyExists {
        reason: format!(
            "Station {} already has open report {}",
            existing.station_id, existing.report_id
        ),
        existing,
    }
}

fn missing_report(report_id: i64) -> Outcome {
    Outcome::UpdateFailed {
        report_id,
        reason: format!("Report {report_id} does not exist"),
    }
}

fn reload<S: LifecycleStore>(tx: &mut S, report_id: i64) -> Result<Report, CoreError> {
    tx.get_report(report_id)?
        .ok_or_else(|| CoreError::Store(StoreError::NotFound(format!("report {report_id}"))))
}

/// Fails the transaction when a counter write matched no row.
fn require_row(updated: bool, what: impl FnOnce() -> String) -> Result<(), CoreError> {
    if updated {
        Ok(())
    } else {
        Err(CoreError::Store(StoreError::NotFound(what())))
    }
}

fn now_rfc3339() -> Result<String, CoreError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| CoreError::Timestamp(err.to_string()))
}
