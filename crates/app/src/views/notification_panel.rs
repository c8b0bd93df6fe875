//! Notification bell: badge, dropdown rows and the panel actions.
//!
//! Rendering is a pure function of a [`NotificationSnapshot`] and the
//! current time. [`NotificationPanel`] ties that to a live registry
//! subscription so the badge and the list re-render on every change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use juahustle_core::types::{EntityId, Timestamp};
use juahustle_events::{
    Notification, NotificationKind, NotificationRegistry, NotificationSnapshot, Subscription,
};
use serde::Serialize;

/// Largest unread count shown as a number on the badge.
pub const BADGE_CAP: usize = 99;

// ---------------------------------------------------------------------------
// Relative age
// ---------------------------------------------------------------------------

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1_440;
const MINUTES_PER_MONTH: i64 = 43_200;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn rounded_div(n: i64, d: i64) -> i64 {
    (n as f64 / d as f64).round() as i64
}

/// Human distance between `then` and `now`, e.g. `"30 minutes ago"`,
/// `"about 2 hours ago"`, `"1 day ago"`. Future instants read `"in ..."`.
pub fn relative_age(then: Timestamp, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let minutes = rounded_div(seconds.abs(), 60);

    let distance = if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_PER_DAY {
        format!("about {}", plural(rounded_div(minutes, MINUTES_PER_HOUR), "hour"))
    } else if minutes < 2_520 {
        "1 day".to_string()
    } else if minutes < MINUTES_PER_MONTH {
        plural(rounded_div(minutes, MINUTES_PER_DAY), "day")
    } else if minutes < 2 * MINUTES_PER_MONTH {
        format!("about {}", plural(rounded_div(minutes, MINUTES_PER_MONTH), "month"))
    } else {
        let months = minutes / MINUTES_PER_MONTH;
        if months < 12 {
            plural(months, "month")
        } else {
            let (years, rest) = (months / 12, months % 12);
            match rest {
                0..=2 => format!("about {}", plural(years, "year")),
                3..=8 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    };

    if seconds < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

/// Badge text for `unread`; `None` hides the badge.
pub fn badge_text(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{BADGE_CAP}+")),
        n => Some(n.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    pub id: EntityId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub age: String,
    pub action_url: Option<String>,
}

impl PanelRow {
    fn from_notification(n: &Notification, now: DateTime<Utc>) -> Self {
        Self {
            id: n.id.clone(),
            title: n.title.clone(),
            message: n.message.clone(),
            kind: n.kind,
            read: n.read,
            age: relative_age(n.created_at, now),
            action_url: n.action_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub revision: u64,
    pub unread_count: usize,
    pub badge: Option<String>,
    /// Newest first.
    pub rows: Vec<PanelRow>,
}

impl PanelView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render `snapshot` as of `now`.
pub fn render(snapshot: &NotificationSnapshot, now: DateTime<Utc>) -> PanelView {
    let unread_count = snapshot.unread_count();
    PanelView {
        revision: snapshot.revision(),
        unread_count,
        badge: badge_text(unread_count),
        rows: snapshot
            .notifications()
            .iter()
            .map(|n| PanelRow::from_notification(n, now))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// NotificationPanel
// ---------------------------------------------------------------------------

/// A mounted notification panel following the registry.
pub struct NotificationPanel {
    registry: Arc<NotificationRegistry>,
    subscription: Subscription,
}

impl NotificationPanel {
    pub fn new(registry: Arc<NotificationRegistry>) -> Self {
        let subscription = registry.subscribe();
        Self {
            registry,
            subscription,
        }
    }

    /// Render the latest registry state.
    pub fn view(&mut self, now: DateTime<Utc>) -> PanelView {
        render(&self.subscription.current(), now)
    }

    /// Whether the registry changed since the last render.
    pub fn is_stale(&self) -> bool {
        self.subscription.has_changed()
    }

    /// Wait for the next registry change and render it. `None` once the
    /// registry is gone.
    pub async fn next_view(&mut self) -> Option<PanelView> {
        let snapshot = self.subscription.next().await?;
        Some(render(&snapshot, Utc::now()))
    }

    /// Click on a row: marks it read if needed and returns the route to
    /// navigate to, if any.
    pub fn open(&self, id: &str) -> Option<String> {
        let notification = self.registry.get(id)?;
        if !notification.read {
            self.registry.mark_read(id);
        }
        tracing::debug!(notification_id = %id, "Notification opened");
        notification.action_url
    }

    pub fn mark_read(&self, id: &str) {
        self.registry.mark_read(id);
    }

    pub fn mark_all_read(&self) {
        self.registry.mark_all_read();
    }

    pub fn clear(&self, id: &str) {
        self.registry.clear(id);
    }

    pub fn clear_all(&self) {
        self.registry.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use juahustle_events::seed::seed_notifications;

    use super::*;

    #[test]
    fn relative_age_buckets() {
        let now = Utc::now();
        let ago = |d: Duration| relative_age(now - d, now);

        assert_eq!(ago(Duration::seconds(20)), "less than a minute ago");
        assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(30)), "30 minutes ago");
        assert_eq!(ago(Duration::minutes(60)), "about 1 hour ago");
        assert_eq!(ago(Duration::hours(2)), "about 2 hours ago");
        assert_eq!(ago(Duration::days(1)), "1 day ago");
        assert_eq!(ago(Duration::days(5)), "5 days ago");
        assert_eq!(ago(Duration::days(40)), "about 1 month ago");
        assert_eq!(ago(Duration::days(400)), "about 1 year ago");
        assert_eq!(relative_age(now + Duration::minutes(10), now), "in 10 minutes");
    }

    #[test]
    fn badge_caps_at_ninety_nine() {
        assert_eq!(badge_text(0), None);
        assert_eq!(badge_text(7).as_deref(), Some("7"));
        assert_eq!(badge_text(99).as_deref(), Some("99"));
        assert_eq!(badge_text(100).as_deref(), Some("99+"));
    }

    #[test]
    fn render_seeded_snapshot() {
        let now = Utc::now();
        let registry = NotificationRegistry::from_notifications(seed_notifications(now));
        let view = render(&registry.snapshot(), now);

        assert_eq!(view.unread_count, 2);
        assert_eq!(view.badge.as_deref(), Some("2"));
        let ages: Vec<_> = view.rows.iter().map(|r| r.age.as_str()).collect();
        assert_eq!(ages, vec!["30 minutes ago", "about 2 hours ago", "1 day ago"]);
    }

    #[test]
    fn open_marks_read_and_returns_route() {
        let registry = Arc::new(NotificationRegistry::from_notifications(seed_notifications(
            Utc::now(),
        )));
        let mut panel = NotificationPanel::new(registry.clone());
        panel.view(Utc::now());

        assert_eq!(panel.open("1").as_deref(), Some("/hustler-dashboard"));
        assert!(registry.get("1").is_some_and(|n| n.read));
        assert!(panel.is_stale());
        assert_eq!(panel.view(Utc::now()).unread_count, 1);

        assert_eq!(panel.open("missing"), None);
    }

    #[test]
    fn clear_all_empties_view() {
        let registry = Arc::new(NotificationRegistry::with_seed());
        let mut panel = NotificationPanel::new(registry);
        panel.clear_all();
        let view = panel.view(Utc::now());
        assert!(view.is_empty());
        assert_eq!(view.badge, None);
    }
}
