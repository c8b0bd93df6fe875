//! Hustler dashboard: the signed-in hustler's applications.

use juahustle_core::error::CoreError;
use juahustle_core::roles::Role;
use juahustle_db::models::application::{ApplicationStatus, JobApplication};

use super::{settle, ViewOutcome, ViewScope};
use crate::error::{AppError, AppResult};
use crate::session::SessionUser;
use crate::state::AppState;

/// Header counters of the hustler dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HustlerStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

pub fn stats(applications: &[JobApplication]) -> HustlerStats {
    let count = |status: ApplicationStatus| {
        applications
            .iter()
            .filter(|a| a.status == status)
            .count()
    };
    HustlerStats {
        total: applications.len(),
        pending: count(ApplicationStatus::Pending),
        accepted: count(ApplicationStatus::Accepted),
        rejected: count(ApplicationStatus::Rejected),
    }
}

#[derive(Debug, Clone)]
pub struct HustlerDashboard {
    /// Most recent application first.
    pub applications: Vec<JobApplication>,
    pub stats: HustlerStats,
}

async fn fetch(state: &AppState, user: &SessionUser) -> AppResult<Vec<JobApplication>> {
    if user.role != Role::Hustler {
        return Err(CoreError::Forbidden("Only hustlers have applications".into()).into());
    }
    state
        .data_source
        .fetch_applications_by_hustler(&user.id)
        .await
        .map_err(AppError::from)
}

/// Load `user`'s applications.
pub async fn load(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
) -> ViewOutcome<HustlerDashboard> {
    let result = fetch(state, user).await;
    settle(scope, result, "Failed to load your applications", |mut applications| {
        applications.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
        let stats = stats(&applications);
        tracing::debug!(hustler_id = %user.id, total = stats.total, "Hustler dashboard loaded");
        ViewOutcome::done(HustlerDashboard {
            applications,
            stats,
        })
    })
}

#[cfg(test)]
mod tests {
    use juahustle_db::seed::seed_applications;

    use super::*;

    #[test]
    fn stats_ignore_withdrawn_except_in_total() {
        let mut apps = seed_applications();
        let mut second = apps[0].clone();
        second.id = "app2".into();
        second.status = ApplicationStatus::Accepted;
        let mut third = apps[0].clone();
        third.id = "app3".into();
        third.status = ApplicationStatus::Withdrawn;
        apps.extend([second, third]);

        assert_eq!(
            stats(&apps),
            HustlerStats {
                total: 3,
                pending: 1,
                accepted: 1,
                rejected: 0,
            }
        );
    }

    #[test]
    fn empty_list_has_zero_stats() {
        assert_eq!(stats(&[]), HustlerStats::default());
    }
}
