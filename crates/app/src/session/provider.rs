//! Simulated sign-in / sign-up and the current-user slot.

use std::sync::Arc;
use std::time::Duration;

use juahustle_core::error::CoreError;
use juahustle_core::ids::generate_id;
use juahustle_core::roles::Role;
use juahustle_core::types::EntityId;
use juahustle_core::validation::{validate_email, validate_password_match, validate_required};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::store::ProfileStore;
use super::SessionError;

/// Phone number given to users signed in through the simulated login.
const DEFAULT_PHONE: &str = "+254712345678";

/// Generated avatar service; the user id is the seed.
const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Deterministic avatar URL for `user_id`.
pub fn avatar_url(user_id: &str) -> String {
    format!("{AVATAR_BASE_URL}?seed={user_id}")
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// Optional profile details. Hustler-only fields stay `None` for clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_jobs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// `None` until the user changes a setting; read through
    /// [`UserProfile::preferences`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<NotificationPreferences>,
}

impl UserProfile {
    /// Stored preferences, or the defaults when none were saved yet.
    pub fn preferences(&self) -> NotificationPreferences {
        self.notification_preferences.unwrap_or_default()
    }
}

/// One notification channel or topic the user can opt in or out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPreference {
    Email,
    Sms,
    Push,
    JobMatches,
    ApplicationUpdates,
}

impl NotificationPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
            Self::JobMatches => "job_matches",
            Self::ApplicationUpdates => "application_updates",
        }
    }
}

/// Notification settings shown on the profile page. Push is opt-in; every
/// other setting starts enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub job_matches: bool,
    pub application_updates: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            sms: true,
            push: false,
            job_matches: true,
            application_updates: true,
        }
    }
}

impl NotificationPreferences {
    pub fn get(&self, preference: NotificationPreference) -> bool {
        match preference {
            NotificationPreference::Email => self.email,
            NotificationPreference::Sms => self.sms,
            NotificationPreference::Push => self.push,
            NotificationPreference::JobMatches => self.job_matches,
            NotificationPreference::ApplicationUpdates => self.application_updates,
        }
    }

    pub fn set(&mut self, preference: NotificationPreference, enabled: bool) {
        let slot = match preference {
            NotificationPreference::Email => &mut self.email,
            NotificationPreference::Sms => &mut self.sms,
            NotificationPreference::Push => &mut self.push,
            NotificationPreference::JobMatches => &mut self.job_matches,
            NotificationPreference::ApplicationUpdates => &mut self.application_updates,
        };
        *slot = enabled;
    }
}

/// The signed-in user. This is the identity threaded into every view that
/// acts on behalf of someone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

/// Signup form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

/// Shallow profile update: present top-level fields replace, `profile`
/// fields merge into the existing profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile: Option<ProfileFieldsUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFieldsUpdate {
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub avatar: Option<String>,
    pub notification_preferences: Option<NotificationPreferences>,
}

impl ProfileUpdate {
    fn apply_to(self, user: &mut SessionUser) {
        if let Some(v) = self.name {
            user.name = v;
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.phone {
            user.phone = v;
        }
        if let Some(fields) = self.profile {
            let profile = user.profile.get_or_insert_with(UserProfile::default);
            if let Some(v) = fields.bio {
                profile.bio = Some(v);
            }
            if let Some(v) = fields.skills {
                profile.skills = Some(v);
            }
            if let Some(v) = fields.avatar {
                profile.avatar = Some(v);
            }
            if let Some(v) = fields.notification_preferences {
                profile.notification_preferences = Some(v);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SessionProvider
// ---------------------------------------------------------------------------

/// Owns the current user and mirrors it to a [`ProfileStore`].
pub struct SessionProvider {
    current: RwLock<Option<SessionUser>>,
    store: Arc<dyn ProfileStore>,
    delay: Duration,
}

impl SessionProvider {
    /// Provider with no simulated delay and nobody signed in. Call
    /// [`restore`](Self::restore) to pick up a stored snapshot.
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            current: RwLock::new(None),
            store,
            delay: Duration::ZERO,
        }
    }

    /// Simulate a round trip of `delay` on login, signup and profile update.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Load the stored snapshot into the session. A corrupt snapshot is
    /// logged and discarded.
    pub async fn restore(&self) -> Option<SessionUser> {
        let user = match self.store.load().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable profile snapshot");
                None
            }
        };
        if let Some(ref u) = user {
            tracing::info!(user_id = %u.id, role = %u.role, "Session restored");
        }
        *self.current.write().await = user.clone();
        user
    }

    pub async fn current(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    /// Current user or `Unauthorized`.
    pub async fn require(&self) -> Result<SessionUser, SessionError> {
        self.current()
            .await
            .ok_or_else(|| CoreError::Unauthorized("No active session".into()).into())
    }

    /// Simulated sign-in. The role is inferred from the email address:
    /// addresses containing `client` sign in as clients, all others as
    /// hustlers.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, SessionError> {
        validate_email(email)?;
        validate_required("Password", password)?;
        self.simulate().await;

        let email = email.trim().to_string();
        let user = if email.contains("client") {
            SessionUser {
                id: generate_id(),
                name: "Sarah Kimani".into(),
                email,
                phone: DEFAULT_PHONE.into(),
                role: Role::Client,
                profile: Some(UserProfile {
                    bio: Some("Business owner looking for reliable services".into()),
                    skills: Some(Vec::new()),
                    ..Default::default()
                }),
            }
        } else {
            SessionUser {
                id: generate_id(),
                name: "Alex Mwangi".into(),
                email,
                phone: DEFAULT_PHONE.into(),
                role: Role::Hustler,
                profile: Some(UserProfile {
                    bio: Some("Experienced hustler with 2+ years in various services".into()),
                    skills: Some(vec!["Cleaning".into(), "Tutoring".into(), "Moving".into()]),
                    rating: Some(4.8),
                    completed_jobs: Some(23),
                    ..Default::default()
                }),
            }
        };

        self.establish(user).await
    }

    /// Create an account and sign in. Validation runs before anything else;
    /// a rejected request persists nothing.
    pub async fn signup(&self, request: SignupRequest) -> Result<SessionUser, SessionError> {
        validate_password_match(&request.password, &request.confirm_password)?;
        validate_required("Name", &request.name)?;
        validate_email(&request.email)?;
        validate_required("Password", &request.password)?;
        self.simulate().await;

        let profile = match request.role {
            Role::Client => UserProfile {
                bio: Some("New client on JuaHustle".into()),
                ..Default::default()
            },
            Role::Hustler => UserProfile {
                bio: Some("New hustler ready to work".into()),
                skills: Some(Vec::new()),
                rating: Some(0.0),
                completed_jobs: Some(0),
                ..Default::default()
            },
        };

        let user = SessionUser {
            id: generate_id(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone,
            role: request.role,
            profile: Some(profile),
        };

        self.establish(user).await
    }

    /// Merge `update` into the current user and persist.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<SessionUser, SessionError> {
        if let Some(ref name) = update.name {
            validate_required("Name", name)?;
        }
        if let Some(ref email) = update.email {
            validate_email(email)?;
        }
        let mut user = self.require().await?;
        self.simulate().await;

        update.apply_to(&mut user);
        self.store.save(&user).await?;

        // Re-check: a logout may have landed while the save was in flight.
        let mut current = self.current.write().await;
        match current.as_ref() {
            Some(live) if live.id == user.id => {
                *current = Some(user.clone());
                tracing::info!(user_id = %user.id, "Profile updated");
                Ok(user)
            }
            _ => {
                drop(current);
                self.store.remove().await?;
                Err(CoreError::Unauthorized("Session ended during profile update".into()).into())
            }
        }
    }

    /// Assign the generated avatar to the current user.
    pub async fn assign_avatar(&self) -> Result<SessionUser, SessionError> {
        let user = self.require().await?;
        self.update_profile(ProfileUpdate {
            profile: Some(ProfileFieldsUpdate {
                avatar: Some(avatar_url(&user.id)),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await
    }

    /// Turn one notification setting on or off for the current user and
    /// persist it with the profile snapshot.
    pub async fn set_preference(
        &self,
        preference: NotificationPreference,
        enabled: bool,
    ) -> Result<SessionUser, SessionError> {
        let user = self.require().await?;
        let mut preferences = user
            .profile
            .as_ref()
            .map(UserProfile::preferences)
            .unwrap_or_default();
        preferences.set(preference, enabled);

        let updated = self
            .update_profile(ProfileUpdate {
                profile: Some(ProfileFieldsUpdate {
                    notification_preferences: Some(preferences),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .await?;
        tracing::info!(
            user_id = %updated.id,
            preference = preference.as_str(),
            enabled,
            "Notification preference changed"
        );
        Ok(updated)
    }

    /// Sign out and delete the stored snapshot.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let previous = self.current.write().await.take();
        self.store.remove().await?;
        if let Some(u) = previous {
            tracing::info!(user_id = %u.id, "Signed out");
        }
        Ok(())
    }

    async fn establish(&self, user: SessionUser) -> Result<SessionUser, SessionError> {
        self.store.save(&user).await?;
        *self.current.write().await = Some(user.clone());
        tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    async fn simulate(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
