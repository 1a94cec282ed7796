// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `reports`: Reports by id, station, admin and operator
//! - `assignees`: Assignment pools and live load counts
//! - `stations`: Stations by id and postal code
//! - `users`: Registered users
//! - `notifications`: A user's notifications
//! - `audit`: Lifecycle audit timelines

pub mod assignees;
pub mod audit;
pub mod notifications;
pub mod reports;
pub mod stations;
pub mod users;

use std::str::FromStr;

use chargewatch_domain::DomainError;

use crate::error::PersistenceError;

/// Parses a stored enum column back into its domain type.
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("column {column}: {e}"))
    })
}
