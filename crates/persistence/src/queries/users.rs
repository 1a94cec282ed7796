// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Returns the id of every registered user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_user_ids(conn: &mut SqliteConnection) -> Result<BTreeSet<i64>, PersistenceError> {
    let ids: Vec<i64> = users::table.select(users::user_id).load(conn)?;
    Ok(ids.into_iter().collect())
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    let row: Option<(i64, String, String)> = users::table
        .filter(users::user_id.eq(user_id))
        .select((users::user_id, users::username, users::created_at))
        .first(conn)
        .optional()?;
    Ok(row.map(|(user_id, username, created_at)| UserData {
        user_id,
        username,
        created_at,
    }))
}
