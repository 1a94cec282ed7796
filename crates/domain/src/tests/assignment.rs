// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Assignee, AssigneeRole, CAPACITY_THRESHOLD, DomainError, select_assignee};

fn admin(assignee_id: i64, open_report_count: u32) -> Assignee {
    Assignee {
        assignee_id,
        role: AssigneeRole::Admin,
        username: format!("admin{assignee_id}"),
        open_report_count,
    }
}

#[test]
fn test_empty_pool_is_rejected() {
    let result = select_assignee(&[], AssigneeRole::Operator, CAPACITY_THRESHOLD);

    assert_eq!(
        result,
        Err(DomainError::NoAssigneeAvailable {
            role: AssigneeRole::Operator
        })
    );
}

#[test]
fn test_first_assignee_under_capacity_wins() {
    let pool = vec![admin(1, 3), admin(2, 0)];

    let chosen = select_assignee(&pool, AssigneeRole::Admin, CAPACITY_THRESHOLD).unwrap();

    assert_eq!(chosen.assignee_id, 1);
}

#[test]
fn test_saturated_assignees_are_skipped() {
    let pool = vec![admin(1, 10), admin(2, 12), admin(3, 9)];

    let chosen = select_assignee(&pool, AssigneeRole::Admin, CAPACITY_THRESHOLD).unwrap();

    assert_eq!(chosen.assignee_id, 3);
}

#[test]
fn test_fully_saturated_pool_overflows_to_first() {
    let pool = vec![admin(4, 10), admin(5, 11)];

    let chosen = select_assignee(&pool, AssigneeRole::Admin, CAPACITY_THRESHOLD).unwrap();

    assert_eq!(chosen.assignee_id, 4);
}

#[test]
fn test_custom_capacity_is_honored() {
    let pool = vec![admin(1, 1), admin(2, 0)];

    let chosen = select_assignee(&pool, AssigneeRole::Admin, 1).unwrap();

    assert_eq!(chosen.assignee_id, 2);
}

#[test]
fn test_eleven_admins_spread_then_overflow() {
    let mut pool: Vec<Assignee> = (1..=11).map(|id| admin(id, 0)).collect();

    // Fill every admin to capacity one report at a time.
    for _ in 0..(11 * CAPACITY_THRESHOLD) {
        let chosen_id = select_assignee(&pool, AssigneeRole::Admin, CAPACITY_THRESHOLD)
            .unwrap()
            .assignee_id;
        let slot = pool
            .iter_mut()
            .find(|a| a.assignee_id == chosen_id)
            .unwrap();
        slot.open_report_count += 1;
    }

    assert!(pool.iter().all(|a| a.open_report_count == CAPACITY_THRESHOLD));

    let overflow = select_assignee(&pool, AssigneeRole::Admin, CAPACITY_THRESHOLD).unwrap();
    assert_eq!(overflow.assignee_id, 1);
}
