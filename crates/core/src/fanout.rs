// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::outcome::FanoutStatus;
use crate::store::{LifecycleStore, NotificationStore, StoreError};

/// Broadcasts one message as one notification per user.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFanout;

impl NotificationFanout {
    /// Writes `content` for every id in `user_ids` and returns the count written.
    ///
    /// # Errors
    ///
    /// Returns an error if the notifications cannot be written.
    pub fn broadcast<S: NotificationStore + ?Sized>(
        store: &mut S,
        user_ids: &BTreeSet<i64>,
        content: &str,
    ) -> Result<usize, StoreError> {
        if user_ids.is_empty() {
            return Ok(0);
        }
        store.create_notifications(user_ids, content)
    }

    /// Notifies every registered user in a transaction of its own.
    ///
    /// Failure is logged and reported, never propagated: the transition that
    /// triggered the broadcast has already committed.
    pub fn announce<S: LifecycleStore>(
        store: &mut S,
        content: &str,
        max_attempts: u32,
    ) -> FanoutStatus {
        let mut attempt: u32 = 1;
        loop {
            let result: Result<usize, StoreError> = store.atomically(|tx| {
                let user_ids: BTreeSet<i64> = tx.list_user_ids()?;
                Self::broadcast(tx, &user_ids, content)
            });

            match result {
                Ok(recipients) => {
                    info!(recipients, "Notifications delivered");
                    return FanoutStatus::Delivered { recipients };
                }
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    warn!(attempt, error = %err, "Store busy during fan-out, retrying");
                    attempt += 1;
                }
                Err(err) => {
                    warn!(error = %err, "Notification fan-out failed");
                    return FanoutStatus::Failed {
                        reason: err.to_string(),
                    };
                }
            }
        }
    }
}
