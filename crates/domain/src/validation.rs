// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Report;

/// Returns the first report in `reports` that has not been resolved.
///
/// A station may carry at most one open report, so callers treat a hit as
/// a duplicate submission.
#[must_use]
pub fn find_open_report(reports: &[Report]) -> Option<&Report> {
    reports.iter().find(|report| report.is_open())
}

/// Validates a login-style username for users and assignees.
///
/// # Errors
///
/// Returns an error if:
/// - The username is empty
/// - The username contains whitespace
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }

    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(format!(
            "Username '{username}' must not contain whitespace"
        )));
    }

    Ok(())
}
