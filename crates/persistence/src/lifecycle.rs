// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage seams for the lifecycle engine, backed by `SQLite`.

use std::collections::BTreeSet;

use chargewatch::{
    AssigneeStore, AuditStore, LifecycleStore, NotificationStore, ReportStore, StationStore,
    StoreError, UserStore,
};
use chargewatch_audit::AuditEvent;
use chargewatch_domain::{
    Assignee, AssigneeRole, NewReport, Report, ReportUpdate, Station, StationStatus,
};
use tracing::error;

use crate::{Persistence, backend, mutations, queries};

impl ReportStore for Persistence {
    fn create_report(&mut self, report: &NewReport) -> Result<Report, StoreError> {
        Ok(mutations::reports::create_report(&mut self.conn, report)?)
    }

    fn get_report(&mut self, report_id: i64) -> Result<Option<Report>, StoreError> {
        Ok(queries::reports::get_report(&mut self.conn, report_id)?)
    }

    fn find_reports_by_station(&mut self, station_id: i64) -> Result<Vec<Report>, StoreError> {
        Ok(queries::reports::find_reports_by_station(&mut self.conn, station_id)?)
    }

    fn find_reports_by_admin(&mut self, admin_id: i64) -> Result<Vec<Report>, StoreError> {
        Ok(queries::reports::find_reports_by_admin(&mut self.conn, admin_id)?)
    }

    fn find_reports_by_operator(&mut self, operator_id: i64) -> Result<Vec<Report>, StoreError> {
        Ok(queries::reports::find_reports_by_operator(&mut self.conn, operator_id)?)
    }

    fn update_report(&mut self, update: &ReportUpdate) -> Result<bool, StoreError> {
        Ok(mutations::reports::update_report(&mut self.conn, update)?)
    }

    fn delete_report(&mut self, report_id: i64) -> Result<bool, StoreError> {
        Ok(mutations::reports::delete_report(&mut self.conn, report_id)?)
    }
}

impl AssigneeStore for Persistence {
    fn list_assignees(&mut self, role: AssigneeRole) -> Result<Vec<Assignee>, StoreError> {
        Ok(queries::assignees::list_assignees(&mut self.conn, role)?)
    }

    fn increment_open_count(&mut self, assignee_id: i64) -> Result<bool, StoreError> {
        Ok(mutations::assignees::increment_open_count(&mut self.conn, assignee_id)?)
    }

    fn decrement_open_count(&mut self, assignee_id: i64) -> Result<bool, StoreError> {
        Ok(mutations::assignees::decrement_open_count(&mut self.conn, assignee_id)?)
    }
}

impl StationStore for Persistence {
    fn get_station(&mut self, station_id: i64) -> Result<Option<Station>, StoreError> {
        Ok(queries::stations::get_station(&mut self.conn, station_id)?)
    }

    fn set_station_status(
        &mut self,
        station_id: i64,
        status: StationStatus,
    ) -> Result<bool, StoreError> {
        Ok(mutations::stations::set_station_status(&mut self.conn, station_id, status)?)
    }
}

impl UserStore for Persistence {
    fn list_user_ids(&mut self) -> Result<BTreeSet<i64>, StoreError> {
        Ok(queries::users::list_user_ids(&mut self.conn)?)
    }
}

impl NotificationStore for Persistence {
    fn create_notifications(
        &mut self,
        user_ids: &BTreeSet<i64>,
        content: &str,
    ) -> Result<usize, StoreError> {
        Ok(mutations::notifications::create_notifications(&mut self.conn, user_ids, content)?)
    }
}

impl AuditStore for Persistence {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        Ok(mutations::audit::persist_audit_event(&mut self.conn, event)?)
    }
}

impl LifecycleStore for Persistence {
    fn atomically<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        backend::sqlite::begin_immediate(&mut self.conn)
            .map_err(|e| E::from(StoreError::from(e)))?;

        match op(self) {
            Ok(value) => {
                backend::sqlite::commit(&mut self.conn)
                    .map_err(|e| E::from(StoreError::from(e)))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = backend::sqlite::rollback(&mut self.conn) {
                    error!(error = %rollback_err, "Failed to roll back lifecycle transaction");
                }
                Err(err)
            }
        }
    }
}
