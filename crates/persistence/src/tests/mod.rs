// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod notification_tests;
mod report_tests;
mod station_tests;

use chargewatch_audit::{Actor, Cause};
use chargewatch_domain::{
    AssigneeRole, Category, NewReport, PostalCode, ReportDescription, Severity,
};

use crate::Persistence;

/// Ids of the rows written by [`seed`].
pub struct Seed {
    pub user_id: i64,
    pub other_user_id: i64,
    pub admin_id: i64,
    pub operator_id: i64,
    pub station_id: i64,
}

pub fn seed(persistence: &mut Persistence) -> Seed {
    let user_id: i64 = persistence.create_user("alice").unwrap();
    let other_user_id: i64 = persistence.create_user("bob").unwrap();
    let admin_id: i64 = persistence
        .create_assignee(AssigneeRole::Admin, "admin-1")
        .unwrap()
        .assignee_id;
    let operator_id: i64 = persistence
        .create_assignee(AssigneeRole::Operator, "operator-1")
        .unwrap()
        .assignee_id;
    persistence
        .create_station(1, &PostalCode::new("10115").unwrap(), "Invalidenstrasse 1", "Mitte")
        .unwrap();

    Seed {
        user_id,
        other_user_id,
        admin_id,
        operator_id,
        station_id: 1,
    }
}

pub fn create_seeded_persistence() -> (Persistence, Seed) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let seed: Seed = seed(&mut persistence);
    (persistence, seed)
}

pub fn create_test_report(station_id: i64, user_id: i64, admin_id: Option<i64>) -> NewReport {
    let mut report: NewReport = NewReport::new(
        station_id,
        ReportDescription::new("Display stays dark after plugging in").unwrap(),
        Severity::Medium,
        Category::Hardware,
        user_id,
    );
    report.admin_id = admin_id;
    report
}

pub fn create_test_actor(user_id: i64) -> Actor {
    Actor::user(user_id)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-789"), String::from("Test request"))
}
