// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Category, DomainError, Report, ReportStatus, Severity, find_open_report, validate_username,
};

fn report(report_id: i64, status: ReportStatus) -> Report {
    Report {
        report_id,
        station_id: 1,
        description: String::from("Cable is torn off"),
        severity: Severity::Medium,
        category: Category::Hardware,
        status,
        user_id: 1,
        admin_id: Some(1),
        operator_id: None,
        created_at: String::from("2026-01-01T00:00:00Z"),
        updated_at: String::from("2026-01-01T00:00:00Z"),
    }
}

#[test]
fn test_no_open_report_among_resolved() {
    let reports = vec![
        report(1, ReportStatus::Resolved),
        report(2, ReportStatus::Resolved),
    ];

    assert!(find_open_report(&reports).is_none());
}

#[test]
fn test_open_report_is_found() {
    let reports = vec![
        report(1, ReportStatus::Resolved),
        report(2, ReportStatus::Managed),
    ];

    assert_eq!(find_open_report(&reports).map(|r| r.report_id), Some(2));
}

#[test]
fn test_empty_history_has_no_open_report() {
    assert!(find_open_report(&[]).is_none());
}

#[test]
fn test_valid_username() {
    assert!(validate_username("alice").is_ok());
}

#[test]
fn test_empty_username_rejected() {
    assert!(matches!(
        validate_username(""),
        Err(DomainError::InvalidUsername(_))
    ));
}

#[test]
fn test_username_with_space_rejected() {
    assert!(validate_username("alice smith").is_err());
}
