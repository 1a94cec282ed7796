// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balancer;
mod config;
mod engine;
mod error;
mod fanout;
mod guard;
mod outcome;
mod station_sync;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use balancer::AssignmentBalancer;
pub use config::{DEFAULT_MAX_ATTEMPTS, EngineConfig};
pub use engine::ReportLifecycleEngine;
pub use error::CoreError;
pub use fanout::NotificationFanout;
pub use guard::DuplicateGuard;
pub use outcome::{FanoutStatus, Outcome};
pub use station_sync::StationStatusSync;
pub use store::{
    AssigneeStore, AuditStore, LifecycleStore, NotificationStore, ReportStore, StationStore,
    StoreError, UserStore,
};

