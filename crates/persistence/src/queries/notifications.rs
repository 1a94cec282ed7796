// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::Notification;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
struct NotificationRow {
    notification_id: i64,
    user_id: i64,
    content: String,
    created_at: String,
}

/// Lists a user's notifications, newest first.
///
/// Notifications written in one broadcast share a timestamp, so ties are
/// broken by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_notifications_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Notification>, PersistenceError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.desc(),
        ))
        .select(NotificationRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| Notification {
            notification_id: row.notification_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
        })
        .collect())
}
