// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{Report, find_open_report};
use tracing::debug;

use crate::store::{ReportStore, StoreError};

/// Detects a station that already has an unresolved report.
///
/// This is the fast path. The open-report uniqueness constraint in storage
/// is what actually rejects concurrent duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateGuard;

impl DuplicateGuard {
    /// Returns the station's open report, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn has_open_report<S: ReportStore + ?Sized>(
        store: &mut S,
        station_id: i64,
    ) -> Result<Option<Report>, StoreError> {
        let reports: Vec<Report> = store.find_reports_by_station(station_id)?;
        let open: Option<Report> = find_open_report(&reports).cloned();

        debug!(
            station_id,
            history = reports.len(),
            open_report_id = open.as_ref().map(|r| r.report_id),
            "Checked station for open reports"
        );

        Ok(open)
    }
}
