// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chargewatch::{EngineConfig, ReportLifecycleEngine};
use chargewatch_audit::Cause;
use chargewatch_domain::{AssigneeRole, PostalCode};
use chargewatch_persistence::Persistence;

use crate::{AuthenticatedActor, ReportMalfunctionRequest, Role};

/// A seeded database and the actors registered in it.
pub struct Fixture {
    pub persistence: Persistence,
    pub engine: ReportLifecycleEngine,
    pub user: AuthenticatedActor,
    pub other_user: AuthenticatedActor,
    pub admin: AuthenticatedActor,
    pub operator: AuthenticatedActor,
    pub station_id: i64,
}

pub fn setup_fixture() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
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

    Fixture {
        persistence,
        engine: ReportLifecycleEngine::new(EngineConfig::default()),
        user: AuthenticatedActor::new(user_id, Role::User),
        other_user: AuthenticatedActor::new(other_user_id, Role::User),
        admin: AuthenticatedActor::new(admin_id, Role::Admin),
        operator: AuthenticatedActor::new(operator_id, Role::Operator),
        station_id: 1,
    }
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_report_request(station_id: i64) -> ReportMalfunctionRequest {
    ReportMalfunctionRequest {
        station_id,
        description: String::from("Charging cable is torn"),
        severity: String::from("high"),
        category: String::from("hardware"),
    }
}
