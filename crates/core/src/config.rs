// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::CAPACITY_THRESHOLD;

/// Default number of times a transaction is attempted when the store is busy.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Tunables for the lifecycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Soft cap on open reports per assignee.
    pub capacity: u32,
    /// Attempts per operation when the store reports lock contention.
    pub max_attempts: u32,
}

impl EngineConfig {
    /// Creates a configuration. `max_attempts` is raised to at least one.
    #[must_use]
    pub fn new(capacity: u32, max_attempts: u32) -> Self {
        Self {
            capacity,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(CAPACITY_THRESHOLD, DEFAULT_MAX_ATTEMPTS)
    }
}
