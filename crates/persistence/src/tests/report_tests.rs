// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch::{ReportStore, StoreError};
use chargewatch_domain::{Report, ReportStatus, ReportUpdate, Severity};

use super::{create_seeded_persistence, create_test_report};

#[test]
fn test_create_report_starts_pending() {
    let (mut persistence, seed) = create_seeded_persistence();

    let report: Report = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, Some(seed.admin_id)))
        .unwrap();

    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.station_id, seed.station_id);
    assert_eq!(report.admin_id, Some(seed.admin_id));
    assert_eq!(report.operator_id, None);
    assert_eq!(report.severity, Severity::Medium);
    assert_eq!(report.created_at, report.updated_at);
}

#[test]
fn test_second_open_report_for_station_conflicts() {
    let (mut persistence, seed) = create_seeded_persistence();
    persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, Some(seed.admin_id)))
        .unwrap();

    let result: Result<Report, StoreError> = persistence.create_report(&create_test_report(
        seed.station_id,
        seed.other_user_id,
        Some(seed.admin_id),
    ));

    assert!(matches!(result, Err(StoreError::Conflict(_))));
    assert_eq!(persistence.find_reports_by_station(seed.station_id).unwrap().len(), 1);
}

#[test]
fn test_resolved_report_frees_station_for_new_report() {
    let (mut persistence, seed) = create_seeded_persistence();
    let first: Report = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, Some(seed.admin_id)))
        .unwrap();
    persistence
        .update_report(&ReportUpdate {
            report_id: first.report_id,
            status: Some(ReportStatus::Resolved),
            ..ReportUpdate::default()
        })
        .unwrap();

    let second: Result<Report, StoreError> = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, Some(seed.admin_id)));

    assert!(second.is_ok());
    assert_eq!(persistence.find_reports_by_station(seed.station_id).unwrap().len(), 2);
}

#[test]
fn test_report_for_unknown_station_is_rejected() {
    let (mut persistence, seed) = create_seeded_persistence();

    let result: Result<Report, StoreError> =
        persistence.create_report(&create_test_report(99, seed.user_id, Some(seed.admin_id)));

    assert!(matches!(result, Err(StoreError::Rejected(_))));
}

#[test]
fn test_update_only_writes_given_fields() {
    let (mut persistence, seed) = create_seeded_persistence();
    let report: Report = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, Some(seed.admin_id)))
        .unwrap();

    let updated: bool = persistence
        .update_report(&ReportUpdate {
            report_id: report.report_id,
            operator_id: Some(seed.operator_id),
            ..ReportUpdate::default()
        })
        .unwrap();

    let stored: Report = persistence.get_report(report.report_id).unwrap().unwrap();
    assert!(updated);
    assert_eq!(stored.operator_id, Some(seed.operator_id));
    assert_eq!(stored.status, ReportStatus::Pending);
    assert_eq!(stored.description, report.description);
    assert_eq!(stored.updated_at, report.updated_at);
}

#[test]
fn test_update_of_missing_report_returns_false() {
    let (mut persistence, _seed) = create_seeded_persistence();

    let updated: bool = persistence
        .update_report(&ReportUpdate {
            report_id: 42,
            status: Some(ReportStatus::Managed),
            ..ReportUpdate::default()
        })
        .unwrap();

    assert!(!updated);
}

#[test]
fn test_empty_update_reports_existence() {
    let (mut persistence, seed) = create_seeded_persistence();
    let report: Report = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, None))
        .unwrap();

    let existing: ReportUpdate = ReportUpdate {
        report_id: report.report_id,
        ..ReportUpdate::default()
    };
    let missing: ReportUpdate = ReportUpdate {
        report_id: report.report_id + 1,
        ..ReportUpdate::default()
    };

    assert!(persistence.update_report(&existing).unwrap());
    assert!(!persistence.update_report(&missing).unwrap());
}

#[test]
fn test_delete_report() {
    let (mut persistence, seed) = create_seeded_persistence();
    let report: Report = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, None))
        .unwrap();

    assert!(persistence.delete_report(report.report_id).unwrap());
    assert!(!persistence.delete_report(report.report_id).unwrap());
    assert!(persistence.get_report(report.report_id).unwrap().is_none());
}

#[test]
fn test_work_queues_filter_by_status() {
    let (mut persistence, seed) = create_seeded_persistence();
    let report: Report = persistence
        .create_report(&create_test_report(seed.station_id, seed.user_id, Some(seed.admin_id)))
        .unwrap();

    assert_eq!(persistence.list_pending_reports_for_admin(seed.admin_id).unwrap().len(), 1);
    assert!(persistence.list_managed_reports_for_operator(seed.operator_id).unwrap().is_empty());

    persistence
        .update_report(&ReportUpdate {
            report_id: report.report_id,
            status: Some(ReportStatus::Managed),
            operator_id: Some(seed.operator_id),
            updated_at: None,
        })
        .unwrap();

    assert!(persistence.list_pending_reports_for_admin(seed.admin_id).unwrap().is_empty());
    assert_eq!(persistence.find_reports_by_admin(seed.admin_id).unwrap().len(), 1);
    assert_eq!(persistence.list_managed_reports_for_operator(seed.operator_id).unwrap().len(), 1);
    assert_eq!(persistence.find_reports_by_operator(seed.operator_id).unwrap().len(), 1);
    assert_eq!(persistence.list_reports_for_admin(seed.admin_id).unwrap().len(), 1);
    assert_eq!(persistence.list_reports_for_operator(seed.operator_id).unwrap().len(), 1);
}
