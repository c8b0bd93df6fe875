//! In-memory notification registry backed by a `tokio::sync::watch` channel.
//!
//! [`NotificationRegistry`] is the single owner of the notification list.
//! It is constructed once at the application root and shared via
//! `Arc<NotificationRegistry>` with every consumer that needs it.
//!
//! Every mutation replaces the watched [`NotificationSnapshot`] in place and
//! wakes all [`Subscription`]s, so a panel and a badge subscribed to the same
//! registry always agree. Mutations are serialized by the channel's internal
//! lock; a subscriber never observes a half-applied operation.

use std::collections::HashSet;

use chrono::Utc;
use juahustle_core::types::EntityId;
use serde::Serialize;
use tokio::sync::watch;

use crate::notification::{NewNotification, Notification};
use crate::seed::seed_notifications;

// ---------------------------------------------------------------------------
// NotificationSnapshot
// ---------------------------------------------------------------------------

/// Read-only view of the registry at one point in time.
///
/// `revision` increases by one with every registry operation, including
/// operations that turned out to be no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationSnapshot {
    revision: u64,
    notifications: Vec<Notification>,
}

impl NotificationSnapshot {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Records, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Number of records with `read == false`, counted on every call.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }
}

// ---------------------------------------------------------------------------
// NotificationRegistry
// ---------------------------------------------------------------------------

/// Single source of truth for in-app notifications.
///
/// All operations are total: unknown ids are silently ignored so that
/// duplicate clear / mark calls from several consumers never surface as
/// failures.
///
/// # Usage
///
/// ```rust
/// use juahustle_events::{NewNotification, NotificationKind, NotificationRegistry};
///
/// let registry = NotificationRegistry::with_seed();
/// registry.add(NewNotification::new("Job Match", "x", NotificationKind::Info));
/// assert_eq!(registry.unread_count(), 3);
/// ```
pub struct NotificationRegistry {
    state: watch::Sender<NotificationSnapshot>,
}

impl NotificationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::from_notifications(Vec::new())
    }

    /// Create a registry pre-populated with the session seed set.
    pub fn with_seed() -> Self {
        Self::from_notifications(seed_notifications(Utc::now()))
    }

    /// Create a registry holding `notifications` in the given (newest-first)
    /// order. Ids must be unique; later records repeating an earlier id are
    /// dropped.
    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        let mut seen = HashSet::with_capacity(notifications.len());
        let notifications: Vec<Notification> = notifications
            .into_iter()
            .filter(|n| {
                let fresh = seen.insert(n.id.clone());
                if !fresh {
                    tracing::warn!(notification_id = %n.id, "Dropping duplicate notification id");
                }
                fresh
            })
            .collect();
        let (state, _) = watch::channel(NotificationSnapshot {
            revision: 0,
            notifications,
        });
        Self { state }
    }

    /// Create a notification from `payload` and prepend it.
    ///
    /// Returns the generated id so producers can reference the record later.
    pub fn add(&self, payload: NewNotification) -> EntityId {
        let notification = Notification::from_payload(payload);
        let id = notification.id.clone();
        tracing::debug!(
            notification_id = %id,
            kind = notification.kind.as_str(),
            title = %notification.title,
            "Notification added"
        );
        self.mutate(|list| list.insert(0, notification));
        id
    }

    /// Mark one notification read. Unknown ids are a no-op.
    pub fn mark_read(&self, id: &str) {
        self.mutate(|list| {
            if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                n.read = true;
                tracing::debug!(notification_id = %id, "Notification marked read");
            }
        });
    }

    /// Mark every notification read.
    pub fn mark_all_read(&self) {
        self.mutate(|list| {
            for n in list.iter_mut() {
                n.read = true;
            }
        });
        tracing::debug!("All notifications marked read");
    }

    /// Remove one notification permanently. Unknown ids are a no-op.
    pub fn clear(&self, id: &str) {
        self.mutate(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            if list.len() != before {
                tracing::debug!(notification_id = %id, "Notification cleared");
            }
        });
    }

    /// Remove every notification.
    pub fn clear_all(&self) {
        self.mutate(Vec::clear);
        tracing::debug!("All notifications cleared");
    }

    /// Number of unread notifications, recomputed from the live collection.
    pub fn unread_count(&self) -> usize {
        self.state.borrow().unread_count()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> NotificationSnapshot {
        self.state.borrow().clone()
    }

    /// Clone of a single record, if present.
    pub fn get(&self, id: &str) -> Option<Notification> {
        self.state.borrow().get(id).cloned()
    }

    /// Register a new observer. The current state counts as already seen.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.state.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    /// Apply `f` to the collection, bump the revision and wake subscribers.
    fn mutate(&self, f: impl FnOnce(&mut Vec<Notification>)) {
        self.state.send_modify(|snapshot| {
            f(&mut snapshot.notifications);
            snapshot.revision += 1;
        });
    }
}

impl Default for NotificationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Observer handle returned by [`NotificationRegistry::subscribe`].
///
/// Several mutations landing before the subscriber wakes are coalesced into
/// one wake-up carrying the latest snapshot.
pub struct Subscription {
    receiver: watch::Receiver<NotificationSnapshot>,
}

impl Subscription {
    /// Latest snapshot, without waiting. Marks it as seen.
    pub fn current(&mut self) -> NotificationSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a mutation happened since the last [`current`](Self::current)
    /// or [`next`](Self::next).
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next mutation and return the resulting snapshot.
    ///
    /// Returns `None` once the registry has been dropped.
    pub async fn next(&mut self) -> Option<NotificationSnapshot> {
        match self.receiver.changed().await {
            Ok(()) => Some(self.receiver.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;

    fn payload(title: &str) -> NewNotification {
        NewNotification::new(title, "body", NotificationKind::Info)
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = NotificationRegistry::new();
        assert!(registry.snapshot().is_empty());
        assert_eq!(registry.unread_count(), 0);
    }

    #[test]
    fn from_notifications_keeps_first_of_duplicate_ids() {
        let mut records = seed_notifications(Utc::now());
        let mut repeat = records[2].clone();
        repeat.id = "1".into();
        repeat.title = "Shadow".into();
        records.push(repeat);

        let registry = NotificationRegistry::from_notifications(records);
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get("1").map(|n| n.title.as_str()), Some("Application Accepted!"));
        assert_eq!(snapshot.unread_count(), 2);
    }

    #[test]
    fn add_prepends() {
        let registry = NotificationRegistry::new();
        let first = registry.add(payload("first"));
        let second = registry.add(payload("second"));

        let snapshot = registry.snapshot();
        let ids: Vec<_> = snapshot.notifications().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let registry = NotificationRegistry::with_seed();
        registry.mark_read("1");
        let once = registry.snapshot();
        registry.mark_read("1");
        let twice = registry.snapshot();

        assert_eq!(once.notifications(), twice.notifications());
        assert_eq!(registry.unread_count(), 1);
    }

    #[test]
    fn mark_read_unknown_id_is_noop() {
        let registry = NotificationRegistry::with_seed();
        let before = registry.snapshot();
        registry.mark_read("missing");
        assert_eq!(registry.snapshot().notifications(), before.notifications());
    }

    #[test]
    fn clear_unknown_id_leaves_state_unchanged() {
        let registry = NotificationRegistry::with_seed();
        let before = registry.snapshot();
        registry.clear("missing");

        let after = registry.snapshot();
        assert_eq!(after.notifications(), before.notifications());
        assert_eq!(after.unread_count(), before.unread_count());
    }

    #[test]
    fn clear_all_empties() {
        let registry = NotificationRegistry::with_seed();
        registry.clear_all();
        assert!(registry.snapshot().is_empty());
        assert_eq!(registry.unread_count(), 0);
    }

    #[test]
    fn every_operation_bumps_revision() {
        let registry = NotificationRegistry::new();
        assert_eq!(registry.snapshot().revision(), 0);
        let id = registry.add(payload("a"));
        registry.mark_read(&id);
        registry.mark_all_read();
        registry.clear("missing");
        registry.clear_all();
        assert_eq!(registry.snapshot().revision(), 5);
    }

    #[test]
    fn get_returns_clone_of_record() {
        let registry = NotificationRegistry::with_seed();
        let record = registry.get("2").expect("seed record 2 exists");
        assert_eq!(record.title, "New Job Match");
        assert!(registry.get("nope").is_none());
    }

    #[tokio::test]
    async fn subscriber_sees_mutation() {
        let registry = NotificationRegistry::new();
        let mut sub = registry.subscribe();
        assert!(!sub.has_changed());

        registry.add(payload("hello"));

        let snapshot = sub.next().await.expect("registry still alive");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.notifications()[0].title, "hello");
    }

    #[tokio::test]
    async fn subscription_ends_when_registry_dropped() {
        let registry = NotificationRegistry::new();
        let mut sub = registry.subscribe();
        drop(registry);
        assert!(sub.next().await.is_none());
    }

    #[test]
    fn subscriber_count_tracks_live_handles() {
        let registry = NotificationRegistry::new();
        let a = registry.subscribe();
        let _b = registry.subscribe();
        assert_eq!(registry.subscriber_count(), 2);
        drop(a);
        assert_eq!(registry.subscriber_count(), 1);
    }
}
