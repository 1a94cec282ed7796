// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::validate_username;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use super::now_rfc3339;
use crate::backend::PersistenceBackend;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Registers a user and returns the new user id.
///
/// # Errors
///
/// Returns an error if the username is invalid or already taken.
pub fn create_user(conn: &mut SqliteConnection, username: &str) -> Result<i64, PersistenceError> {
    validate_username(username).map_err(|e| PersistenceError::CheckViolation(e.to_string()))?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::created_at.eq(now_rfc3339()?),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;
    info!(user_id, username, "User created");
    Ok(user_id)
}
