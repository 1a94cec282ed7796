// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report status tracking and transition logic.
//!
//! A report moves `pending → managed → resolved` and never moves back.
//! Transitions are driven only by the lifecycle engine.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a malfunction report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Submitted and assigned to an admin, not yet forwarded.
    #[default]
    Pending,
    /// Forwarded to a charging station operator for repair.
    Managed,
    /// Repaired. Terminal.
    Resolved,
}

impl ReportStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Managed => "managed",
            Self::Resolved => "resolved",
        }
    }

    /// Returns true if the report still counts against its station and assignees.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Managed
    /// - Managed → Resolved
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Managed) | (Self::Managed, Self::Resolved)
        )
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: target,
                reason: String::from("report is already resolved"),
            });
        }

        if self.can_transition_to(target) {
            Ok(())
        } else {
            let reason: String = match target {
                Self::Pending => String::from("reports never return to pending"),
                Self::Managed => String::from("only pending reports can be forwarded"),
                Self::Resolved => String::from("only managed reports can be resolved"),
            };
            Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: target,
                reason,
            })
        }
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "managed" => Ok(Self::Managed),
            "resolved" => Ok(Self::Resolved),
            _ => Err(DomainError::InvalidReportStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
