//! Notification record and producer payload.

use chrono::Utc;
use juahustle_core::ids::generate_id;
use juahustle_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Severity / styling class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A user-facing message with read state and an optional navigation target.
///
/// Records are only ever created and mutated by
/// [`NotificationRegistry`](crate::NotificationRegistry); consumers see
/// clones inside a [`NotificationSnapshot`](crate::NotificationSnapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Timestamp,
    pub read: bool,
    /// Opaque route handed to the router; never interpreted here.
    pub action_url: Option<String>,
}

impl Notification {
    /// Materialize a producer payload into a fresh unread record.
    pub(crate) fn from_payload(payload: NewNotification) -> Self {
        Self {
            id: generate_id(),
            title: payload.title,
            message: payload.message,
            kind: payload.kind,
            created_at: Utc::now(),
            read: false,
            action_url: payload.action_url,
        }
    }
}

// ---------------------------------------------------------------------------
// NewNotification
// ---------------------------------------------------------------------------

/// Payload accepted by [`NotificationRegistry::add`](crate::NotificationRegistry::add).
///
/// Carries no id, timestamp or read flag; the registry assigns those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub action_url: Option<String>,
}

impl NewNotification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            action_url: None,
        }
    }

    /// Attach a navigation target.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}
