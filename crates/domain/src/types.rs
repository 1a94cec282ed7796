// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::report_status::ReportStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum number of characters in a report description.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// How badly a malfunction affects the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DomainError::InvalidSeverity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of fault being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Hardware,
    Software,
    Connectivity,
}

impl Category {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hardware => "hardware",
            Self::Software => "software",
            Self::Connectivity => "connectivity",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hardware" => Ok(Self::Hardware),
            "software" => Ok(Self::Software),
            "connectivity" => Ok(Self::Connectivity),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational flag of a charging station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    #[default]
    Available,
    OutOfService,
}

impl StationStatus {
    /// Returns the string representation of the station status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OutOfService => "out_of_service",
        }
    }
}

impl FromStr for StationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "out_of_service" => Ok(Self::OutOfService),
            _ => Err(DomainError::InvalidStationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two kinds of staff that can own a report.
///
/// Admins receive new reports; operators receive forwarded reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssigneeRole {
    Admin,
    Operator,
}

impl AssigneeRole {
    /// Returns the string representation of the role as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Operator => "Operator",
        }
    }
}

impl FromStr for AssigneeRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" | "admin" => Ok(Self::Admin),
            "Operator" | "operator" => Ok(Self::Operator),
            _ => Err(DomainError::InvalidAssigneeRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssigneeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Operator => write!(f, "operator"),
        }
    }
}

/// A validated free-text malfunction description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDescription {
    value: String,
}

impl ReportDescription {
    /// Creates a new `ReportDescription`.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is blank or shorter than
    /// `MIN_DESCRIPTION_LENGTH` characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidDescription(String::from(
                "Description must not be empty",
            )));
        }

        if value.chars().count() < MIN_DESCRIPTION_LENGTH {
            return Err(DomainError::InvalidDescription(format!(
                "Description must be at least {MIN_DESCRIPTION_LENGTH} characters long"
            )));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the description text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A postal code in the served region (five digits starting 10, 12, 13 or 14).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode {
    value: String,
}

impl PostalCode {
    /// Creates a new `PostalCode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not numeric or not in a served prefix.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let value: &str = value.trim();

        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidPostalCode(format!(
                "'{value}' must contain only digits"
            )));
        }

        let served_prefix: bool = ["10", "12", "13", "14"]
            .iter()
            .any(|prefix| value.starts_with(prefix));
        if value.len() != 5 || !served_prefix {
            return Err(DomainError::InvalidPostalCode(format!(
                "'{value}' is not a served postal code"
            )));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the postal code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A malfunction report as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The canonical identifier assigned by the database.
    pub report_id: i64,
    /// The station the report is about.
    pub station_id: i64,
    /// Free-text description.
    pub description: String,
    pub severity: Severity,
    pub category: Category,
    pub status: ReportStatus,
    /// The submitting user.
    pub user_id: i64,
    /// The owning admin, `None` only for legacy rows.
    pub admin_id: Option<i64>,
    /// The repairing operator, set when the report is forwarded.
    pub operator_id: Option<i64>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl Report {
    /// Returns true if the report has not been resolved.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// A candidate report submitted by a user, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub station_id: i64,
    pub description: ReportDescription,
    pub severity: Severity,
    pub category: Category,
    pub user_id: i64,
    /// Filled in by the lifecycle engine before persisting.
    pub admin_id: Option<i64>,
}

impl NewReport {
    /// Creates a new candidate report with no admin assigned.
    #[must_use]
    pub const fn new(
        station_id: i64,
        description: ReportDescription,
        severity: Severity,
        category: Category,
        user_id: i64,
    ) -> Self {
        Self {
            station_id,
            description,
            severity,
            category,
            user_id,
            admin_id: None,
        }
    }
}

/// A partial update of a stored report.
///
/// Only fields that are `Some` are written; everything else is preserved
/// from storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportUpdate {
    pub report_id: i64,
    pub status: Option<ReportStatus>,
    pub operator_id: Option<i64>,
    pub updated_at: Option<String>,
}

/// An admin or operator that can own reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub assignee_id: i64,
    pub role: AssigneeRole,
    pub username: String,
    /// Cached number of open reports referencing this assignee.
    pub open_report_count: u32,
}

/// A charging station as seen by the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: i64,
    pub postal_code: String,
    pub street: String,
    pub district: String,
    pub status: StationStatus,
}

/// A message delivered to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: String,
}
