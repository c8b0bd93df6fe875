//! Persistence of the signed-in user's profile snapshot.
//!
//! Only one artifact is ever persisted: the current [`SessionUser`] under
//! [`PROFILE_KEY`]. It is read once at startup and rewritten on login,
//! signup, profile update, and removed on logout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::provider::SessionUser;
use super::SessionError;

/// Fixed storage key for the profile snapshot.
pub const PROFILE_KEY: &str = "juahustle_user";

/// Key/value slot for the profile snapshot.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read the stored snapshot, `None` when absent.
    async fn load(&self) -> Result<Option<SessionUser>, SessionError>;

    async fn save(&self, user: &SessionUser) -> Result<(), SessionError>;

    /// Delete the snapshot. Removing an absent snapshot is not an error.
    async fn remove(&self) -> Result<(), SessionError>;
}

// ---------------------------------------------------------------------------
// FileProfileStore
// ---------------------------------------------------------------------------

/// Stores the snapshot as `<dir>/juahustle_user.json`.
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{PROFILE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, user: &SessionUser) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(user)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), user_id = %user.id, "Profile snapshot saved");
        Ok(())
    }

    async fn remove(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryProfileStore
// ---------------------------------------------------------------------------

/// In-process store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryProfileStore {
    slot: RwLock<Option<SessionUser>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, as if a previous run had signed in.
    pub fn with_user(user: SessionUser) -> Self {
        Self {
            slot: RwLock::new(Some(user)),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, user: &SessionUser) -> Result<(), SessionError> {
        *self.slot.write().await = Some(user.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<(), SessionError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
