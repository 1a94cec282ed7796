// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod error;
mod messages;
mod report_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment::{CAPACITY_THRESHOLD, select_assignee};
pub use error::DomainError;
pub use messages::{malfunction_message, resolution_message};
pub use report_status::ReportStatus;

// Re-export public types
pub use types::{
    Assignee, AssigneeRole, Category, MIN_DESCRIPTION_LENGTH, NewReport, Notification, PostalCode,
    Report, ReportDescription, ReportUpdate, Severity, Station, StationStatus,
};
pub use validation::{find_open_report, validate_username};
