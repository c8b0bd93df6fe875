//! Integration tests for [`NotificationRegistry`].
//!
//! Exercises the registry through its public API only: ordering under
//! timestamp collisions, the unread-count invariant after every operation,
//! the seeded-session walkthrough, and fan-out to several subscribers.

use juahustle_events::{NewNotification, NotificationKind, NotificationRegistry};

fn info(title: &str) -> NewNotification {
    NewNotification::new(title, "x", NotificationKind::Info)
}

/// Recount unread records straight from a snapshot.
fn recount(registry: &NotificationRegistry) -> usize {
    registry
        .snapshot()
        .notifications()
        .iter()
        .filter(|n| !n.read)
        .count()
}

// ---------------------------------------------------------------------------
// Test: insertion order is authoritative
// ---------------------------------------------------------------------------

/// A burst of adds inside one clock tick still lists newest first, because
/// ordering comes from insertion position rather than `created_at`.
#[test]
fn burst_of_adds_is_newest_first_by_insertion() {
    let registry = NotificationRegistry::new();
    let ids: Vec<_> = (0..50).map(|i| registry.add(info(&format!("n{i}")))).collect();

    let snapshot = registry.snapshot();
    let listed: Vec<_> = snapshot.notifications().iter().map(|n| n.id.clone()).collect();
    let expected: Vec<_> = ids.into_iter().rev().collect();
    assert_eq!(listed, expected);
}

// ---------------------------------------------------------------------------
// Test: unread count invariant
// ---------------------------------------------------------------------------

#[test]
fn unread_count_matches_records_after_every_operation() {
    let registry = NotificationRegistry::with_seed();
    assert_eq!(registry.unread_count(), recount(&registry));

    let a = registry.add(info("a"));
    assert_eq!(registry.unread_count(), recount(&registry));

    registry.mark_read(&a);
    assert_eq!(registry.unread_count(), recount(&registry));

    // Clearing a read record.
    registry.clear("3");
    assert_eq!(registry.unread_count(), recount(&registry));

    // Clearing an unread record.
    registry.clear("1");
    assert_eq!(registry.unread_count(), recount(&registry));
    assert_eq!(registry.unread_count(), 1);

    registry.mark_all_read();
    assert_eq!(registry.unread_count(), recount(&registry));

    registry.clear_all();
    assert_eq!(registry.unread_count(), 0);
    assert!(registry.snapshot().is_empty());
}

#[test]
fn read_flag_never_reverts() {
    let registry = NotificationRegistry::with_seed();
    registry.mark_read("2");
    registry.mark_all_read();
    registry.mark_read("2");
    assert!(registry.get("2").expect("record exists").read);
}

// ---------------------------------------------------------------------------
// Test: seeded session walkthrough
// ---------------------------------------------------------------------------

#[test]
fn seeded_session_walkthrough() {
    let registry = NotificationRegistry::with_seed();
    assert_eq!(registry.unread_count(), 2);

    registry.mark_all_read();
    assert_eq!(registry.unread_count(), 0);
    assert!(registry.snapshot().notifications().iter().all(|n| n.read));

    registry.clear("2");
    assert_eq!(registry.snapshot().len(), 2);
    assert_eq!(registry.unread_count(), 0);

    let id = registry.add(info("Job Match"));
    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.notifications()[0].id, id);
    assert_eq!(snapshot.notifications()[0].title, "Job Match");
    assert_eq!(registry.unread_count(), 1);
}

// ---------------------------------------------------------------------------
// Test: fan-out
// ---------------------------------------------------------------------------

/// Two independent surfaces (panel and badge) observe the same state.
#[tokio::test]
async fn panel_and_badge_stay_consistent() {
    let registry = NotificationRegistry::with_seed();
    let mut panel = registry.subscribe();
    let mut badge = registry.subscribe();

    registry.mark_read("1");

    let panel_view = panel.next().await.expect("panel receives update");
    let badge_view = badge.next().await.expect("badge receives update");

    assert_eq!(panel_view.revision(), badge_view.revision());
    assert_eq!(panel_view.unread_count(), 1);
    assert_eq!(badge_view.unread_count(), 1);
}

/// Mutations that land before a subscriber wakes coalesce into the latest
/// snapshot.
#[tokio::test]
async fn rapid_mutations_coalesce_to_latest() {
    let registry = NotificationRegistry::new();
    let mut sub = registry.subscribe();

    registry.add(info("one"));
    registry.add(info("two"));
    registry.add(info("three"));

    let snapshot = sub.next().await.expect("update delivered");
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.revision(), 3);
    assert!(!sub.has_changed());
}

/// The registry is shareable across tasks behind an `Arc`.
#[tokio::test]
async fn shared_registry_accepts_producers_from_tasks() {
    let registry = std::sync::Arc::new(NotificationRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = std::sync::Arc::clone(&registry);
            tokio::spawn(async move {
                registry.add(info(&format!("task {i}")));
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("producer task completes");
    }

    assert_eq!(registry.snapshot().len(), 8);
    assert_eq!(registry.unread_count(), 8);
}
