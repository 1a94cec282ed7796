// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, ReportStatus};
use std::str::FromStr;

#[test]
fn test_default_status_is_pending() {
    assert_eq!(ReportStatus::default(), ReportStatus::Pending);
}

#[test]
fn test_forward_transition_allowed() {
    assert!(ReportStatus::Pending.can_transition_to(ReportStatus::Managed));
    assert!(
        ReportStatus::Pending
            .validate_transition(ReportStatus::Managed)
            .is_ok()
    );
}

#[test]
fn test_resolve_transition_allowed() {
    assert!(ReportStatus::Managed.can_transition_to(ReportStatus::Resolved));
}

#[test]
fn test_pending_cannot_skip_to_resolved() {
    let result = ReportStatus::Pending.validate_transition(ReportStatus::Resolved);

    assert!(matches!(
        result,
        Err(DomainError::InvalidStatusTransition {
            from: ReportStatus::Pending,
            to: ReportStatus::Resolved,
            ..
        })
    ));
}

#[test]
fn test_resolved_is_terminal() {
    assert!(ReportStatus::Resolved.is_terminal());
    assert!(!ReportStatus::Resolved.is_open());
    for target in [
        ReportStatus::Pending,
        ReportStatus::Managed,
        ReportStatus::Resolved,
    ] {
        assert!(!ReportStatus::Resolved.can_transition_to(target));
    }
}

#[test]
fn test_no_transition_back_to_pending() {
    assert!(!ReportStatus::Managed.can_transition_to(ReportStatus::Pending));
    assert!(!ReportStatus::Pending.can_transition_to(ReportStatus::Pending));
}

#[test]
fn test_managed_cannot_be_forwarded_again() {
    assert!(
        ReportStatus::Managed
            .validate_transition(ReportStatus::Managed)
            .is_err()
    );
}

#[test]
fn test_status_string_parsing() {
    assert_eq!(
        ReportStatus::from_str("managed").unwrap(),
        ReportStatus::Managed
    );
    assert_eq!(ReportStatus::Resolved.to_string(), "resolved");
    assert!(matches!(
        ReportStatus::from_str("closed"),
        Err(DomainError::InvalidReportStatus(_))
    ));
}
