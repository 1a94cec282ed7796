// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::report_status::ReportStatus;
use crate::types::AssigneeRole;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Report description is empty or too short.
    InvalidDescription(String),
    /// Severity is not one of the recognized values.
    InvalidSeverity(String),
    /// Category is not one of the recognized values.
    InvalidCategory(String),
    /// Report status string is not recognized.
    InvalidReportStatus(String),
    /// Station status string is not recognized.
    InvalidStationStatus(String),
    /// Assignee role string is not recognized.
    InvalidAssigneeRole(String),
    /// Postal code is malformed or outside the served region.
    InvalidPostalCode(String),
    /// Username is empty or invalid.
    InvalidUsername(String),
    /// A report status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: ReportStatus,
        /// The requested status.
        to: ReportStatus,
        /// Why the transition was rejected.
        reason: String,
    },
    /// The assignment pool for a role is empty.
    NoAssigneeAvailable {
        /// The role whose pool was empty.
        role: AssigneeRole,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidSeverity(value) => write!(
                f,
                "Invalid severity '{value}': must be one of 'low', 'medium', or 'high'"
            ),
            Self::InvalidCategory(value) => write!(
                f,
                "Invalid category '{value}': must be one of 'hardware', 'software', or 'connectivity'"
            ),
            Self::InvalidReportStatus(value) => write!(f, "Invalid report status: {value}"),
            Self::InvalidStationStatus(value) => write!(f, "Invalid station status: {value}"),
            Self::InvalidAssigneeRole(value) => write!(f, "Invalid assignee role: {value}"),
            Self::InvalidPostalCode(msg) => write!(f, "Invalid postal code: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move report from '{from}' to '{to}': {reason}")
            }
            Self::NoAssigneeAvailable { role } => {
                write!(f, "No {role} is available to take the report")
            }
        }
    }
}

impl std::error::Error for DomainError {}
