// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `reports`: Report inserts, merge updates and deletes
//! - `assignees`: Assignee creation, counter increments and reconciliation
//! - `stations`: Station creation and status flips
//! - `users`: User registration
//! - `notifications`: Bulk notification inserts
//! - `audit`: Audit event persistence
//!
//! None of these open a transaction; callers group them with
//! `Persistence::atomically`.

pub mod assignees;
pub mod audit;
pub mod notifications;
pub mod reports;
pub mod stations;
pub mod users;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Formats the current UTC time as RFC 3339.
pub(crate) fn now_rfc3339() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::TimestampError(e.to_string()))
}
