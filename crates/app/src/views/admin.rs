//! Admin console: user directory and account activation.

use juahustle_core::roles::Role;
use juahustle_db::models::user::User;

use super::{settle, ViewOutcome, ViewScope};
use crate::error::AppError;
use crate::notice::Notice;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_users: usize,
    pub active_users: usize,
    pub clients: usize,
    pub hustlers: usize,
}

pub fn stats(users: &[User]) -> AdminStats {
    AdminStats {
        total_users: users.len(),
        active_users: users.iter().filter(|u| u.is_active).count(),
        clients: users.iter().filter(|u| u.role == Role::Client).count(),
        hustlers: users.iter().filter(|u| u.role == Role::Hustler).count(),
    }
}

/// Case-insensitive match on name or email. A blank term matches everyone.
pub fn matches_search(user: &User, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || user.name.to_lowercase().contains(&term)
        || user.email.to_lowercase().contains(&term)
}

#[derive(Debug, Clone)]
pub struct UserDirectory {
    /// Users matching the search term.
    pub users: Vec<User>,
    /// Computed over the whole directory, not just the matches.
    pub stats: AdminStats,
}

/// Load the user directory, keeping only users that match `search`.
pub async fn load_users(
    state: &AppState,
    scope: &ViewScope,
    search: &str,
) -> ViewOutcome<UserDirectory> {
    let result = state.data_source.fetch_users().await.map_err(AppError::from);
    settle(scope, result, "Failed to load users", |users| {
        let stats = stats(&users);
        let users = users
            .into_iter()
            .filter(|u| matches_search(u, search))
            .collect();
        ViewOutcome::done(UserDirectory { users, stats })
    })
}

/// Activate or deactivate a user account.
pub async fn set_user_active(
    state: &AppState,
    scope: &ViewScope,
    user_id: &str,
    is_active: bool,
) -> ViewOutcome<User> {
    let result = state
        .data_source
        .update_user_status(user_id, is_active)
        .await
        .map_err(AppError::from);

    settle(scope, result, "Failed to update user status", |user| {
        let verb = if user.is_active { "activated" } else { "deactivated" };
        tracing::info!(user_id = %user.id, is_active = user.is_active, "User status changed");
        let notice = Notice::success(
            "User Updated",
            format!("{} has been {verb}.", user.name),
        );
        ViewOutcome::done_with(user, notice)
    })
}

#[cfg(test)]
mod tests {
    use juahustle_db::seed::seed_users;

    use super::*;

    #[test]
    fn stats_split_by_role_and_activity() {
        let mut users = seed_users();
        users[0].is_active = false;
        let s = stats(&users);
        assert_eq!(s.total_users, users.len());
        assert_eq!(s.active_users, users.iter().filter(|u| u.is_active).count());
        assert_eq!(s.clients + s.hustlers, s.total_users);
    }

    #[test]
    fn search_matches_name_or_email() {
        let users = seed_users();
        let sarah = &users[0];
        assert!(matches_search(sarah, "SARAH"));
        assert!(matches_search(sarah, "example.com"));
        assert!(matches_search(sarah, "   "));
        assert!(!matches_search(sarah, "nobody"));
    }
}
