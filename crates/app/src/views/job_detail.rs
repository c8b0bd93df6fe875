//! Job detail page: loading, and the owning client's accept / reject
//! decisions.

use juahustle_core::error::CoreError;
use juahustle_core::roles::Role;
use juahustle_db::models::application::{ApplicationStatus, JobApplication};
use juahustle_db::models::job::Job;
use juahustle_events::{NewNotification, NotificationKind};

use super::{settle, ViewOutcome, ViewScope};
use crate::error::{AppError, AppResult};
use crate::notice::Notice;
use crate::session::SessionUser;
use crate::state::AppState;

/// Everything the detail page shows.
#[derive(Debug, Clone)]
pub struct JobDetail {
    pub job: Job,
    /// Hustler viewers: whether they already applied.
    pub has_applied: bool,
    /// Owning client viewers: applications received. Empty otherwise.
    pub applications: Vec<JobApplication>,
}

impl JobDetail {
    /// Local bookkeeping after this viewer's application went through.
    pub fn record_own_application(&mut self) {
        self.has_applied = true;
        self.job.applicant_count += 1;
    }
}

async fn fetch_detail(
    state: &AppState,
    job_id: &str,
    viewer: Option<&SessionUser>,
) -> AppResult<JobDetail> {
    let source = &state.data_source;

    match viewer {
        Some(user) if user.role == Role::Hustler => {
            let (job, mine) = futures::future::join(
                source.fetch_job(job_id),
                source.fetch_applications_by_hustler(&user.id),
            )
            .await;
            let job = job?;
            let has_applied = mine?.iter().any(|a| a.job_id == job_id);
            Ok(JobDetail {
                job,
                has_applied,
                applications: Vec::new(),
            })
        }
        Some(user) if user.role == Role::Client => {
            let job = source.fetch_job(job_id).await?;
            let applications = if job.client_id == user.id {
                source.fetch_applications_by_job(job_id).await?
            } else {
                Vec::new()
            };
            Ok(JobDetail {
                job,
                has_applied: false,
                applications,
            })
        }
        _ => Ok(JobDetail {
            job: source.fetch_job(job_id).await?,
            has_applied: false,
            applications: Vec::new(),
        }),
    }
}

/// Load the page for `job_id` as seen by `viewer` (anonymous when `None`).
pub async fn load(
    state: &AppState,
    scope: &ViewScope,
    job_id: &str,
    viewer: Option<&SessionUser>,
) -> ViewOutcome<JobDetail> {
    let result = fetch_detail(state, job_id, viewer).await;
    settle(scope, result, "Failed to load job details", ViewOutcome::done)
}

/// Accept an application. Surfaces a success notification on the registry.
pub async fn accept_application(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    detail: &mut JobDetail,
    application_id: &str,
) -> ViewOutcome<JobApplication> {
    decide(
        state,
        scope,
        user,
        detail,
        application_id,
        ApplicationStatus::Accepted,
    )
    .await
}

/// Reject an application. No notification is produced.
pub async fn reject_application(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    detail: &mut JobDetail,
    application_id: &str,
) -> ViewOutcome<JobApplication> {
    decide(
        state,
        scope,
        user,
        detail,
        application_id,
        ApplicationStatus::Rejected,
    )
    .await
}

async fn decide(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    detail: &mut JobDetail,
    application_id: &str,
    status: ApplicationStatus,
) -> ViewOutcome<JobApplication> {
    let failure = match status {
        ApplicationStatus::Accepted => "Failed to accept application",
        _ => "Failed to reject application",
    };

    if detail.job.client_id != user.id {
        let err = AppError::Core(CoreError::Forbidden(
            "Only the client who posted this job can review its applications".into(),
        ));
        return ViewOutcome::Failed(err.to_notice(failure));
    }

    let already_decided = detail
        .applications
        .iter()
        .any(|a| a.id == application_id && a.status == status);
    if already_decided {
        let err = AppError::Core(CoreError::Conflict(format!(
            "This application has already been {}",
            status.as_str()
        )));
        return ViewOutcome::Failed(err.to_notice(failure));
    }

    let result = state
        .data_source
        .update_application_status(application_id, status)
        .await
        .map_err(AppError::from);

    settle(scope, result, failure, |updated| {
        // Another decision may have resolved first; only touch rows that are
        // still on the page.
        match detail.applications.iter_mut().find(|a| a.id == updated.id) {
            Some(row) => row.status = updated.status,
            None => tracing::debug!(
                application_id = %updated.id,
                "Decided application no longer listed; skipping local update"
            ),
        }

        tracing::info!(
            application_id = %updated.id,
            job_id = %detail.job.id,
            status = status.as_str(),
            "Application reviewed"
        );

        let notice = if status == ApplicationStatus::Accepted {
            state.notifications.add(
                NewNotification::new(
                    "Application Accepted",
                    format!(
                        "You accepted {}'s application for \"{}\".",
                        updated.hustler_name, detail.job.title
                    ),
                    NotificationKind::Success,
                )
                .with_action_url(format!("/jobs/{}", detail.job.id)),
            );
            Notice::success(
                "Application Accepted",
                "The hustler has been notified of your decision.",
            )
        } else {
            Notice::success(
                "Application Rejected",
                "The hustler has been notified of your decision.",
            )
        };

        ViewOutcome::done_with(updated, notice)
    })
}
