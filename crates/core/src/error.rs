// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{AssigneeRole, DomainError};

use crate::store::StoreError;

/// Errors that abort a lifecycle operation.
///
/// Expected rejections (duplicates, bad transitions, missing rows) are
/// reported as [`crate::Outcome`] values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The pool for a role is empty, so the report cannot be owned by anyone.
    NoAssigneeAvailable {
        /// The role whose pool was empty.
        role: AssigneeRole,
    },
    /// Storage failed in a way the engine cannot turn into an outcome.
    Store(StoreError),
    /// The current time could not be formatted.
    Timestamp(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoAssigneeAvailable { role } => {
                write!(f, "No {role} is available to take the report")
            }
            Self::Store(err) => write!(f, "Storage error: {err}"),
            Self::Timestamp(msg) => write!(f, "Timestamp error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoAssigneeAvailable { role } => Self::NoAssigneeAvailable { role },
            other => Self::DomainViolation(other),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
