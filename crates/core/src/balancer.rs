// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{Assignee, AssigneeRole, select_assignee};
use tracing::{debug, error};

use crate::error::CoreError;
use crate::store::AssigneeStore;

/// Picks the admin or operator that takes the next report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentBalancer {
    capacity: u32,
}

impl AssignmentBalancer {
    /// Creates a balancer with the given per-assignee soft cap.
    #[must_use]
    pub const fn new(capacity: u32) -> Self {
        Self { capacity }
    }

    /// The configured soft cap.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Loads the pool for `role` and selects from it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoAssigneeAvailable` if the pool is empty, or a
    /// store error if the pool cannot be read.
    pub fn select<S: AssigneeStore + ?Sized>(
        &self,
        store: &mut S,
        role: AssigneeRole,
    ) -> Result<Assignee, CoreError> {
        let pool: Vec<Assignee> = store.list_assignees(role)?;

        let chosen: &Assignee = select_assignee(&pool, role, self.capacity).inspect_err(|_| {
            error!(%role, "Assignment pool is empty");
        })?;

        debug!(
            %role,
            pool_size = pool.len(),
            assignee_id = chosen.assignee_id,
            open_report_count = chosen.open_report_count,
            capacity = self.capacity,
            "Selected assignee"
        );

        Ok(chosen.clone())
    }
}
