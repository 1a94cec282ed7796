// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{AssigneeRole, Category, NewReport, Severity};

use super::helpers::create_report_request;
use crate::validation::{require_id, require_text, validate_report_request, validate_station_request};
use crate::{ApiError, CreateStationRequest, RequestError, Role, parse_assignee_role, parse_role};

#[test]
fn test_parse_role_is_case_insensitive() {
    assert_eq!(parse_role("Admin"), Ok(Role::Admin));
    assert_eq!(parse_role(" operator "), Ok(Role::Operator));
    assert_eq!(parse_role("USER"), Ok(Role::User));
    assert_eq!(
        parse_role("bidder"),
        Err(RequestError::UnknownRole(String::from("bidder")))
    );
}

#[test]
fn test_parse_assignee_role_rejects_user() {
    assert_eq!(parse_assignee_role("admin"), Ok(AssigneeRole::Admin));
    assert_eq!(
        parse_assignee_role("user"),
        Err(RequestError::NotAnAssigneeRole(String::from("user")))
    );
}

#[test]
fn test_ids_must_be_positive() {
    assert_eq!(require_id("station_id", 3), Ok(3));
    assert_eq!(
        require_id("station_id", 0),
        Err(RequestError::NonPositiveId {
            field: "station_id",
            value: 0,
        })
    );
}

#[test]
fn test_text_is_trimmed() {
    assert_eq!(require_text("street", "  Seestrasse 4 "), Ok("Seestrasse 4"));
    assert_eq!(
        require_text("street", "   "),
        Err(RequestError::Blank { field: "street" })
    );
}

#[test]
fn test_request_error_becomes_invalid_input() {
    let err: ApiError = ApiError::from(RequestError::Blank { field: "district" });

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("district"),
            message: String::from("district must not be blank"),
        }
    );
}

#[test]
fn test_report_request_becomes_candidate() {
    let mut request = create_report_request(4);
    request.severity = String::from("Medium");
    request.category = String::from("connectivity");

    let candidate: NewReport = validate_report_request(&request, 9).unwrap();

    assert_eq!(candidate.station_id, 4);
    assert_eq!(candidate.user_id, 9);
    assert_eq!(candidate.severity, Severity::Medium);
    assert_eq!(candidate.category, Category::Connectivity);
    assert_eq!(candidate.admin_id, None);
}

#[test]
fn test_short_description_is_rejected() {
    let mut request = create_report_request(1);
    request.description = String::from("broken");

    let result = validate_report_request(&request, 1);

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "description"));
}

#[test]
fn test_station_request_validation() {
    let valid = CreateStationRequest {
        station_id: 5,
        postal_code: String::from("14193"),
        street: String::from("Koenigsallee 1"),
        district: String::from("Grunewald"),
    };
    let outside = CreateStationRequest {
        postal_code: String::from("20095"),
        ..valid.clone()
    };
    let blank_street = CreateStationRequest {
        street: String::new(),
        ..valid.clone()
    };

    assert!(validate_station_request(&valid).is_ok());
    assert!(matches!(
        validate_station_request(&outside),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "postal_code"
    ));
    assert!(matches!(
        validate_station_request(&blank_street),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "street"
    ));
}
