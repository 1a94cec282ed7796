// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch::{CoreError, StoreError};
use chargewatch_domain::{AssigneeRole, DomainError, ReportStatus};
use chargewatch_persistence::PersistenceError;

use crate::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_store_error,
};

#[test]
fn test_no_assignee_is_service_unavailable() {
    let err: ApiError = translate_core_error(CoreError::NoAssigneeAvailable {
        role: AssigneeRole::Operator,
    });

    assert_eq!(
        err,
        ApiError::ServiceUnavailable {
            message: String::from("No operator is available to take the report"),
        }
    );
}

#[test]
fn test_transition_error_is_rule_violation() {
    let err: ApiError = translate_domain_error(DomainError::InvalidStatusTransition {
        from: ReportStatus::Resolved,
        to: ReportStatus::Managed,
        reason: String::from("report is already resolved"),
    });

    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "report_lifecycle"));
}

#[test]
fn test_store_errors_are_internal_except_not_found() {
    assert!(matches!(
        translate_store_error(StoreError::Busy(String::from("locked"))),
        ApiError::Internal { .. }
    ));
    assert!(matches!(
        translate_store_error(StoreError::NotFound(String::from("report 3"))),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_persistence_errors() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::UniqueViolation(String::from("username"))),
        ApiError::DomainRuleViolation { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::DatabaseBusy(String::from("locked"))),
        ApiError::ServiceUnavailable { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::QueryFailed(String::from("syntax"))),
        ApiError::Internal { .. }
    ));
}
