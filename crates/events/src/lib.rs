//! JuaHustle notification registry.
//!
//! This crate owns the in-app notification collection shared by every UI
//! surface (panel, badge, dashboards):
//!
//! - [`NotificationRegistry`]: explicitly constructed state container with
//!   add / mark-read / clear operations and a derived unread count.
//! - [`Subscription`]: observer handle that wakes on every mutation and
//!   yields read-only [`NotificationSnapshot`]s, backed by
//!   `tokio::sync::watch`.
//! - [`Notification`] / [`NewNotification`]: the record and the producer
//!   payload.
//! - [`seed`]: the three sample notifications every session starts with.

pub mod notification;
pub mod registry;
pub mod seed;

pub use notification::{NewNotification, Notification, NotificationKind};
pub use registry::{NotificationRegistry, NotificationSnapshot, Subscription};
