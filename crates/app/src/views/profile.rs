//! Profile settings.

use juahustle_core::roles::Role;

use super::{settle, ViewOutcome, ViewScope};
use crate::error::AppError;
use crate::notice::Notice;
use crate::session::{NotificationPreference, ProfileFieldsUpdate, ProfileUpdate, SessionUser};
use crate::state::AppState;

/// Split the comma separated skills field, dropping blanks.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Raw profile form. Blank top-level fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    /// Comma separated, e.g. `"Cleaning, Tutoring"`. Hustler-only; ignored
    /// for clients unless filled in.
    pub skills: String,
}

impl ProfileForm {
    fn into_update(self, role: Role) -> ProfileUpdate {
        let present = |v: String| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        let skills = parse_skills(&self.skills);
        let skills = (role == Role::Hustler || !skills.is_empty()).then_some(skills);

        ProfileUpdate {
            name: present(self.name),
            email: present(self.email),
            phone: present(self.phone),
            profile: Some(ProfileFieldsUpdate {
                bio: Some(self.bio.trim().to_string()),
                skills,
                ..Default::default()
            }),
        }
    }
}

/// Save the profile form for `user`, the signed-in user.
pub async fn save(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    form: ProfileForm,
) -> ViewOutcome<SessionUser> {
    let result = state
        .session
        .update_profile(form.into_update(user.role))
        .await
        .map_err(AppError::from);

    settle(scope, result, "Failed to update profile", |user| {
        ViewOutcome::done_with(
            user,
            Notice::success("Profile Updated", "Your profile has been successfully updated."),
        )
    })
}

/// Flip one notification setting for the signed-in user.
pub async fn set_preference(
    state: &AppState,
    scope: &ViewScope,
    preference: NotificationPreference,
    enabled: bool,
) -> ViewOutcome<SessionUser> {
    let result = state
        .session
        .set_preference(preference, enabled)
        .await
        .map_err(AppError::from);

    settle(scope, result, "Failed to save settings", |user| {
        ViewOutcome::done_with(
            user,
            Notice::success(
                "Settings Updated",
                "Your notification preferences have been saved.",
            ),
        )
    })
}

/// Give the signed-in user their generated avatar.
pub async fn assign_avatar(state: &AppState, scope: &ViewScope) -> ViewOutcome<SessionUser> {
    let result = state.session.assign_avatar().await.map_err(AppError::from);
    settle(scope, result, "Failed to update avatar", |user| {
        ViewOutcome::done_with(user, Notice::success("Avatar Updated", "Your new avatar is ready."))
    })
}
