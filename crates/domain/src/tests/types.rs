// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AssigneeRole, Category, DomainError, NewReport, PostalCode, ReportDescription, Severity,
    StationStatus,
};
use std::str::FromStr;

#[test]
fn test_description_accepts_ten_characters() {
    let description = ReportDescription::new("0123456789").unwrap();
    assert_eq!(description.value(), "0123456789");
}

#[test]
fn test_description_rejects_short_text() {
    assert!(matches!(
        ReportDescription::new("too short"),
        Err(DomainError::InvalidDescription(_))
    ));
}

#[test]
fn test_description_rejects_blank_text() {
    assert!(matches!(
        ReportDescription::new("            "),
        Err(DomainError::InvalidDescription(_))
    ));
}

#[test]
fn test_description_counts_characters_not_bytes() {
    // Nine characters, more than ten bytes.
    assert!(ReportDescription::new("äöüäöüäöü").is_err());
    assert!(ReportDescription::new("äöüäöüäöüß").is_ok());
}

#[test]
fn test_severity_round_trip_strings() {
    assert_eq!(Severity::from_str("high").unwrap(), Severity::High);
    assert_eq!(Severity::Medium.as_str(), "medium");
    assert!(Severity::from_str("HIGH").is_err());
}

#[test]
fn test_category_parsing() {
    assert_eq!(
        Category::from_str("connectivity").unwrap(),
        Category::Connectivity
    );
    assert!(matches!(
        Category::from_str("electrical"),
        Err(DomainError::InvalidCategory(_))
    ));
}

#[test]
fn test_station_status_strings() {
    assert_eq!(StationStatus::OutOfService.as_str(), "out_of_service");
    assert_eq!(
        StationStatus::from_str("available").unwrap(),
        StationStatus::Available
    );
}

#[test]
fn test_assignee_role_accepts_both_cases() {
    assert_eq!(AssigneeRole::from_str("Admin").unwrap(), AssigneeRole::Admin);
    assert_eq!(
        AssigneeRole::from_str("operator").unwrap(),
        AssigneeRole::Operator
    );
    assert_eq!(AssigneeRole::Operator.as_str(), "Operator");
    assert!(AssigneeRole::from_str("user").is_err());
}

#[test]
fn test_postal_code_served_prefixes() {
    for code in ["10115", "12043", "13353", "14195"] {
        assert_eq!(PostalCode::new(code).unwrap().value(), code);
    }
}

#[test]
fn test_postal_code_trims_whitespace() {
    assert_eq!(PostalCode::new(" 10115 ").unwrap().value(), "10115");
}

#[test]
fn test_postal_code_rejects_unserved_or_malformed() {
    for code in ["11011", "1011", "101150", "10a15", ""] {
        assert!(
            matches!(PostalCode::new(code), Err(DomainError::InvalidPostalCode(_))),
            "expected {code:?} to be rejected"
        );
    }
}

#[test]
fn test_new_report_has_no_admin() {
    let report = NewReport::new(
        7,
        ReportDescription::new("Display is completely dark").unwrap(),
        Severity::High,
        Category::Hardware,
        3,
    );

    assert_eq!(report.admin_id, None);
    assert_eq!(report.station_id, 7);
}
