//! Sample notifications every fresh session starts with.
//!
//! Notifications are not persisted, so each process start resets the panel
//! to these three records: two unread, one read, newest first.

use chrono::Duration;
use juahustle_core::types::Timestamp;

use crate::notification::{Notification, NotificationKind};

/// Build the seed set relative to `now`.
pub fn seed_notifications(now: Timestamp) -> Vec<Notification> {
    vec![
        Notification {
            id: "1".into(),
            title: "Application Accepted!".into(),
            message: "Your application for \"House Cleaning Service\" has been accepted.".into(),
            kind: NotificationKind::Success,
            created_at: now - Duration::minutes(30),
            read: false,
            action_url: Some("/hustler-dashboard".into()),
        },
        Notification {
            id: "2".into(),
            title: "New Job Match".into(),
            message: "A new tutoring job matching your skills has been posted.".into(),
            kind: NotificationKind::Info,
            created_at: now - Duration::hours(2),
            read: false,
            action_url: Some("/jobs".into()),
        },
        Notification {
            id: "3".into(),
            title: "Payment Received".into(),
            message: "You received KSh 3,000 for completing \"Furniture Moving\".".into(),
            kind: NotificationKind::Success,
            created_at: now - Duration::days(1),
            read: true,
            action_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn seed_has_two_unread_and_one_read() {
        let seed = seed_notifications(Utc::now());
        assert_eq!(seed.len(), 3);
        assert_eq!(seed.iter().filter(|n| !n.read).count(), 2);
    }

    #[test]
    fn seed_is_newest_first() {
        let seed = seed_notifications(Utc::now());
        assert!(seed.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }
}
