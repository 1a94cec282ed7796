// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment policy for spreading reports across admins and operators.

use crate::error::DomainError;
use crate::types::{Assignee, AssigneeRole};

/// Soft cap on open reports per assignee.
pub const CAPACITY_THRESHOLD: u32 = 10;

/// Selects the assignee that should receive the next report.
///
/// The pool is scanned in its given order and the first assignee holding
/// fewer than `capacity` open reports wins. When every assignee is at or
/// above capacity the first assignee in the pool is returned, so reports
/// are still accepted once the whole pool is saturated.
///
/// # Arguments
///
/// * `pool` - The candidate assignees, in priority order
/// * `role` - The role the pool was loaded for (used for error reporting)
/// * `capacity` - The soft cap on open reports per assignee
///
/// # Errors
///
/// Returns `DomainError::NoAssigneeAvailable` if the pool is empty.
pub fn select_assignee(
    pool: &[Assignee],
    role: AssigneeRole,
    capacity: u32,
) -> Result<&Assignee, DomainError> {
    let Some(first) = pool.first() else {
        return Err(DomainError::NoAssigneeAvailable { role });
    };

    Ok(pool
        .iter()
        .find(|assignee| assignee.open_report_count < capacity)
        .unwrap_or(first))
}
