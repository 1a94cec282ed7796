// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-memory store double with transaction rollback and fault injection.

use std::collections::BTreeSet;

use chargewatch_audit::{Actor, AuditEvent, Cause};
use chargewatch_domain::{
    Assignee, AssigneeRole, Category, NewReport, Notification, Report, ReportDescription,
    ReportStatus, ReportUpdate, Severity, Station, StationStatus,
};

use crate::{
    AssigneeStore, AuditStore, LifecycleStore, NotificationStore, ReportStore, StationStore,
    StoreError, UserStore,
};

pub const TIMESTAMP: &str = "2026-05-01T08:00:00Z";

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub reports: Vec<Report>,
    pub assignees: Vec<Assignee>,
    pub stations: Vec<Station>,
    pub users: BTreeSet<i64>,
    pub notifications: Vec<Notification>,
    pub audit_events: Vec<AuditEvent>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub state: MemoryState,
    /// Number of upcoming transactions that fail to start with `Busy`.
    pub busy_failures: u32,
    /// Makes every notification write fail.
    pub fail_notifications: bool,
    /// Number of upcoming station lookups that hide open reports, so only
    /// the insert constraint can catch a duplicate.
    pub hidden_station_lookups: u32,
    pub transactions: u32,
}

impl MemoryStore {
    pub fn report(&self, report_id: i64) -> Report {
        self.state
            .reports
            .iter()
            .find(|r| r.report_id == report_id)
            .cloned()
            .unwrap()
    }

    pub fn assignee(&self, assignee_id: i64) -> Assignee {
        self.state
            .assignees
            .iter()
            .find(|a| a.assignee_id == assignee_id)
            .cloned()
            .unwrap()
    }

    pub fn station(&self, station_id: i64) -> Station {
        self.state
            .stations
            .iter()
            .find(|s| s.station_id == station_id)
            .cloned()
            .unwrap()
    }

    pub fn add_assignee(&mut self, assignee_id: i64, role: AssigneeRole, open_report_count: u32) {
        self.state.assignees.push(Assignee {
            assignee_id,
            role,
            username: format!("{role}{assignee_id}"),
            open_report_count,
        });
    }

    pub fn add_station(&mut self, station_id: i64) {
        self.state.stations.push(Station {
            station_id,
            postal_code: String::from("10115"),
            street: format!("Chausseestrasse {station_id}"),
            district: String::from("Mitte"),
            status: StationStatus::Available,
        });
    }

    /// Counts open reports naming `assignee_id` in the column for its role.
    pub fn live_count(&self, assignee_id: i64) -> u32 {
        let role: AssigneeRole = self.assignee(assignee_id).role;
        let count = self
            .state
            .reports
            .iter()
            .filter(|r| r.is_open())
            .filter(|r| match role {
                AssigneeRole::Admin => r.admin_id == Some(assignee_id),
                AssigneeRole::Operator => r.operator_id == Some(assignee_id),
            })
            .count();
        u32::try_from(count).unwrap()
    }
}

impl ReportStore for MemoryStore {
    fn create_report(&mut self, report: &NewReport) -> Result<Report, StoreError> {
        if self
            .state
            .reports
            .iter()
            .any(|r| r.station_id == report.station_id && r.is_open())
        {
            return Err(StoreError::Conflict(String::from(
                "UNIQUE constraint failed: reports.station_id",
            )));
        }
        if !self
            .state
            .stations
            .iter()
            .any(|s| s.station_id == report.station_id)
        {
            return Err(StoreError::Rejected(String::from(
                "FOREIGN KEY constraint failed",
            )));
        }

        let report_id = i64::try_from(self.state.reports.len()).unwrap() + 1;
        let stored = Report {
            report_id,
            station_id: report.station_id,
            description: report.description.value().to_string(),
            severity: report.severity,
            category: report.category,
            status: ReportStatus::Pending,
            user_id: report.user_id,
            admin_id: report.admin_id,
            operator_id: None,
            created_at: String::from(TIMESTAMP),
            updated_at: String::from(TIMESTAMP),
        };
        self.state.reports.push(stored.clone());
        Ok(stored)
    }

    fn get_report(&mut self, report_id: i64) -> Result<Option<Report>, StoreError> {
        Ok(self
            .state
            .reports
            .iter()
            .find(|r| r.report_id == report_id)
            .cloned())
    }

    fn find_reports_by_station(&mut self, station_id: i64) -> Result<Vec<Report>, StoreError> {
        let hide_open = self.hidden_station_lookups > 0;
        self.hidden_station_lookups = self.hidden_station_lookups.saturating_sub(1);
        Ok(self
            .state
            .reports
            .iter()
            .filter(|r| r.station_id == station_id && !(hide_open && r.is_open()))
            .cloned()
            .collect())
    }

    fn find_reports_by_admin(&mut self, admin_id: i64) -> Result<Vec<Report>, StoreError> {
        Ok(self
            .state
            .reports
            .iter()
            .filter(|r| r.admin_id == Some(admin_id))
            .cloned()
            .collect())
    }

    fn find_reports_by_operator(&mut self, operator_id: i64) -> Result<Vec<Report>, StoreError> {
        Ok(self
            .state
            .reports
            .iter()
            .filter(|r| r.operator_id == Some(operator_id))
            .cloned()
            .collect())
    }

    fn update_report(&mut self, update: &ReportUpdate) -> Result<bool, StoreError> {
        let Some(report) = self
            .state
            .reports
            .iter_mut()
            .find(|r| r.report_id == update.report_id)
        else {
            return Ok(false);
        };
        if let Some(status) = update.status {
            report.status = status;
        }
        if let Some(operator_id) = update.operator_id {
            report.operator_id = Some(operator_id);
        }
        if let Some(updated_at) = &update.updated_at {
            report.updated_at.clone_from(updated_at);
        }
        Ok(true)
    }

    fn delete_report(&mut self, report_id: i64) -> Result<bool, StoreError> {
        let before = self.state.reports.len();
        self.state.reports.retain(|r| r.report_id != report_id);
        Ok(self.state.reports.len() != before)
    }
}

impl AssigneeStore for MemoryStore {
    fn list_assignees(&mut self, role: AssigneeRole) -> Result<Vec<Assignee>, StoreError> {
        let mut pool: Vec<Assignee> = self
            .state
            .assignees
            .iter()
            .filter(|a| a.role == role)
            .cloned()
            .collect();
        pool.sort_by_key(|a| a.assignee_id);
        Ok(pool)
    }

    fn increment_open_count(&mut self, assignee_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .state
            .assignees
            .iter_mut()
            .find(|a| a.assignee_id == assignee_id)
            .map(|a| a.open_report_count += 1)
            .is_some())
    }

    fn decrement_open_count(&mut self, assignee_id: i64) -> Result<bool, StoreError> {
        match self
            .state
            .assignees
            .iter_mut()
            .find(|a| a.assignee_id == assignee_id && a.open_report_count > 0)
        {
            Some(assignee) => {
                assignee.open_report_count -= 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl StationStore for MemoryStore {
    fn get_station(&mut self, station_id: i64) -> Result<Option<Station>, StoreError> {
        Ok(self
            .state
            .stations
            .iter()
            .find(|s| s.station_id == station_id)
            .cloned())
    }

    fn set_station_status(
        &mut self,
        station_id: i64,
        status: StationStatus,
    ) -> Result<bool, StoreError> {
        Ok(self
            .state
            .stations
            .iter_mut()
            .find(|s| s.station_id == station_id)
            .map(|s| s.status = status)
            .is_some())
    }
}

impl UserStore for MemoryStore {
    fn list_user_ids(&mut self) -> Result<BTreeSet<i64>, StoreError> {
        Ok(self.state.users.clone())
    }
}

impl NotificationStore for MemoryStore {
    fn create_notifications(
        &mut self,
        user_ids: &BTreeSet<i64>,
        content: &str,
    ) -> Result<usize, StoreError> {
        if self.fail_notifications {
            return Err(StoreError::Unavailable(String::from("disk I/O error")));
        }
        for &user_id in user_ids {
            let notification_id = i64::try_from(self.state.notifications.len()).unwrap() + 1;
            self.state.notifications.push(Notification {
                notification_id,
                user_id,
                content: content.to_string(),
                created_at: String::from(TIMESTAMP),
            });
        }
        Ok(user_ids.len())
    }
}

impl AuditStore for MemoryStore {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        let event_id = i64::try_from(self.state.audit_events.len()).unwrap() + 1;
        let mut stored = event.clone();
        stored.event_id = Some(event_id);
        stored.created_at = Some(String::from(TIMESTAMP));
        self.state.audit_events.push(stored);
        Ok(event_id)
    }
}

impl LifecycleStore for MemoryStore {
    fn atomically<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.transactions += 1;
        if self.busy_failures > 0 {
            self.busy_failures -= 1;
            return Err(E::from(StoreError::Busy(String::from(
                "database is locked",
            ))));
        }

        let snapshot: MemoryState = self.state.clone();
        let result = op(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }
}

/// Station 1, admin 1, operator 2 and users {1, 2, 3}.
pub fn create_seeded_store() -> MemoryStore {
    let mut store = MemoryStore::default();
    store.add_station(1);
    store.add_assignee(1, AssigneeRole::Admin, 0);
    store.add_assignee(2, AssigneeRole::Operator, 0);
    store.state.users = BTreeSet::from([1, 2, 3]);
    store
}

pub fn create_test_report(station_id: i64) -> NewReport {
    NewReport::new(
        station_id,
        ReportDescription::new("Connector does not lock the cable").unwrap(),
        Severity::High,
        Category::Hardware,
        1,
    )
}

pub fn create_test_actor() -> Actor {
    Actor::user(1)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}
