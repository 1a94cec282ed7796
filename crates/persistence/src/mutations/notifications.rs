// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::now_rfc3339;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Diesel Insertable struct for notification rows.
#[derive(Insertable)]
#[diesel(table_name = notifications)]
struct NewNotificationRow<'a> {
    user_id: i64,
    content: &'a str,
    created_at: &'a str,
}

/// Writes one notification per recipient with a shared timestamp.
///
/// # Errors
///
/// Returns an error if the insert fails, e.g. for an unknown user id.
pub fn create_notifications(
    conn: &mut SqliteConnection,
    user_ids: &BTreeSet<i64>,
    content: &str,
) -> Result<usize, PersistenceError> {
    if user_ids.is_empty() {
        return Ok(0);
    }

    let created_at: String = now_rfc3339()?;
    let rows: Vec<NewNotificationRow<'_>> = user_ids
        .iter()
        .map(|&user_id| NewNotificationRow {
            user_id,
            content,
            created_at: &created_at,
        })
        .collect();

    let written: usize = diesel::insert_into(notifications::table)
        .values(&rows)
        .execute(conn)?;

    debug!(written, "Notifications written");
    Ok(written)
}
