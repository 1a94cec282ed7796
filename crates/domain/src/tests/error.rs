// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssigneeRole, DomainError, ReportStatus};

#[test]
fn test_transition_error_names_both_states() {
    let err = DomainError::InvalidStatusTransition {
        from: ReportStatus::Resolved,
        to: ReportStatus::Managed,
        reason: String::from("report is already resolved"),
    };

    let message = err.to_string();
    assert!(message.contains("resolved"));
    assert!(message.contains("managed"));
    assert!(message.contains("already resolved"));
}

#[test]
fn test_no_assignee_error_names_role() {
    let err = DomainError::NoAssigneeAvailable {
        role: AssigneeRole::Operator,
    };

    assert_eq!(err.to_string(), "No operator is available to take the report");
}

#[test]
fn test_severity_error_lists_choices() {
    let err = DomainError::InvalidSeverity(String::from("critical"));

    assert!(err.to_string().contains("'critical'"));
    assert!(err.to_string().contains("'medium'"));
}

#[test]
fn test_errors_are_std_errors() {
    let err: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidUsername(String::from("empty")));

    assert_eq!(err.to_string(), "Invalid username: empty");
}
