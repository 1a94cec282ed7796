// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use chargewatch::{NotificationStore, StoreError};
use chargewatch_domain::Notification;

use super::create_seeded_persistence;

#[test]
fn test_one_notification_per_recipient() {
    let (mut persistence, seed) = create_seeded_persistence();
    let recipients: BTreeSet<i64> = BTreeSet::from([seed.user_id, seed.other_user_id]);

    let written: usize = persistence.create_notifications(&recipients, "hello").unwrap();

    assert_eq!(written, 2);
    let alice: Vec<Notification> = persistence.get_notifications_for_user(seed.user_id).unwrap();
    let bob: Vec<Notification> = persistence.get_notifications_for_user(seed.other_user_id).unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(bob.len(), 1);
    assert_eq!(alice[0].content, "hello");
    assert_eq!(alice[0].created_at, bob[0].created_at);
}

#[test]
fn test_empty_recipient_set_writes_nothing() {
    let (mut persistence, _seed) = create_seeded_persistence();
    assert_eq!(persistence.create_notifications(&BTreeSet::new(), "hello").unwrap(), 0);
}

#[test]
fn test_notifications_newest_first() {
    let (mut persistence, seed) = create_seeded_persistence();
    let recipients: BTreeSet<i64> = BTreeSet::from([seed.user_id]);
    persistence.create_notifications(&recipients, "first").unwrap();
    persistence.create_notifications(&recipients, "second").unwrap();

    let notifications: Vec<Notification> =
        persistence.get_notifications_for_user(seed.user_id).unwrap();

    assert_eq!(
        notifications.iter().map(|n| n.content.as_str()).collect::<Vec<&str>>(),
        vec!["second", "first"]
    );
}

#[test]
fn test_unknown_recipient_is_rejected() {
    let (mut persistence, seed) = create_seeded_persistence();
    let recipients: BTreeSet<i64> = BTreeSet::from([seed.user_id, 9_999]);

    let result: Result<usize, StoreError> = persistence.create_notifications(&recipients, "hello");

    assert!(matches!(result, Err(StoreError::Rejected(_))));
}
