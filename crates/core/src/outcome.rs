// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{Report, ReportStatus};

/// What happened to the notification broadcast that follows a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanoutStatus {
    /// Notifications were written for every registered user.
    Delivered {
        /// Number of notification records written.
        recipients: usize,
    },
    /// The transition does not notify users.
    Skipped,
    /// The transition committed but writing notifications failed.
    Failed {
        /// Why the broadcast failed.
        reason: String,
    },
}

/// The result of a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new report was stored and assigned to an admin.
    ReportCreated { report: Report, fanout: FanoutStatus },
    /// The station already has an open report; nothing was stored.
    ReportAlreadyExists { existing: Report, reason: String },
    /// The report could not be stored.
    ReportCreateFailed { reason: String },
    /// The report moved to its next status.
    ReportUpdated { report: Report, fanout: FanoutStatus },
    /// The report could not be updated.
    UpdateFailed { report_id: i64, reason: String },
    /// The report is not in a status that allows the requested move.
    InvalidTransition { report: Report, target: ReportStatus },
}

impl Outcome {
    /// Returns true for outcomes that changed stored state.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::ReportCreated { .. } | Self::ReportUpdated { .. })
    }

    /// Returns the rejection reason, or `None` for successful outcomes.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::ReportCreated { .. } | Self::ReportUpdated { .. } => None,
            Self::ReportAlreadyExists { reason, .. }
            | Self::ReportCreateFailed { reason }
            | Self::UpdateFailed { reason, .. } => Some(reason.clone()),
            Self::InvalidTransition { report, target } => Some(
                report
                    .status
                    .validate_transition(*target)
                    .err()
                    .map_or_else(
                        || format!("Report {} cannot move to '{target}'", report.report_id),
                        |err| err.to_string(),
                    ),
            ),
        }
    }

    /// Returns the report this outcome is about, when there is one.
    #[must_use]
    pub const fn report(&self) -> Option<&Report> {
        match self {
            Self::ReportCreated { report, .. }
            | Self::ReportUpdated { report, .. }
            | Self::InvalidTransition { report, .. } => Some(report),
            Self::ReportAlreadyExists { existing, .. } => Some(existing),
            Self::ReportCreateFailed { .. } | Self::UpdateFailed { .. } => None,
        }
    }
}
