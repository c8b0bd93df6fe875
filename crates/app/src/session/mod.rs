//! Session provider and persisted profile snapshot.
//!
//! The [`SessionProvider`] is the opaque identity boundary: it signs users in
//! and out, owns the current [`SessionUser`], and mirrors it to a
//! [`ProfileStore`] under the fixed key [`PROFILE_KEY`]. Credentials are
//! never validated against a backend or stored.

pub mod provider;
pub mod store;

use juahustle_core::error::CoreError;

pub use provider::{
    avatar_url, NotificationPreference, NotificationPreferences, ProfileFieldsUpdate,
    ProfileUpdate, SessionProvider, SessionUser, SignupRequest, UserProfile,
};
pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore, PROFILE_KEY};

/// Errors from the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Validation / authorization failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Profile store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored profile is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
