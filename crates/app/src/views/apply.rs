//! Job application dialog.

use juahustle_core::error::CoreError;
use juahustle_core::roles::Role;
use juahustle_core::validation::validate_required;
use juahustle_db::models::application::{HustlerProfile, JobApplication, NewApplication};
use juahustle_db::models::job::Job;
use juahustle_events::{NewNotification, NotificationKind};

use super::{settle, ViewOutcome, ViewScope};
use crate::error::{AppError, AppResult};
use crate::notice::Notice;
use crate::session::SessionUser;
use crate::state::AppState;

const FAILURE: &str = "Failed to submit application. Please try again.";

/// Fields of the application form.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub message: String,
    /// Blank means "the job's advertised budget".
    pub proposed_budget: String,
}

/// Build the request from the form and the applicant's identity.
fn build_application(
    user: &SessionUser,
    job: &Job,
    form: ApplicationForm,
) -> AppResult<NewApplication> {
    if user.role != Role::Hustler {
        return Err(CoreError::Forbidden("Only hustlers can apply to jobs".into()).into());
    }
    validate_required("Message", &form.message)?;

    let proposed_budget = match form.proposed_budget.trim() {
        "" => job.budget.clone(),
        budget => budget.to_string(),
    };

    let hustler_profile = user.profile.as_ref().map(|p| HustlerProfile {
        rating: p.rating.unwrap_or(0.0),
        completed_jobs: p.completed_jobs.unwrap_or(0),
        skills: p.skills.clone().unwrap_or_default(),
        bio: p.bio.clone().unwrap_or_default(),
    });

    Ok(NewApplication {
        job_id: job.id.clone(),
        hustler_id: user.id.clone(),
        hustler_name: user.name.clone(),
        message: form.message.trim().to_string(),
        proposed_budget: Some(proposed_budget),
        hustler_profile,
    })
}

/// Submit `form` for `job` on behalf of `user`.
///
/// On success adds an "Application Submitted!" notification pointing at the
/// hustler dashboard.
pub async fn submit_application(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    job: &Job,
    form: ApplicationForm,
) -> ViewOutcome<JobApplication> {
    let request = match build_application(user, job, form) {
        Ok(request) => request,
        Err(err) => return ViewOutcome::Failed(err.to_notice(FAILURE)),
    };

    let result = state
        .data_source
        .create_application(request)
        .await
        .map_err(AppError::from);

    settle(scope, result, FAILURE, |application| {
        state.notifications.add(
            NewNotification::new(
                "Application Submitted!",
                format!(
                    "Your application for \"{}\" has been sent to the client.",
                    job.title
                ),
                NotificationKind::Success,
            )
            .with_action_url(Role::Hustler.dashboard_path()),
        );
        tracing::info!(
            application_id = %application.id,
            job_id = %job.id,
            hustler_id = %user.id,
            "Application submitted"
        );
        ViewOutcome::done_with(
            application,
            Notice::success(
                "Application Submitted!",
                "Your application has been sent to the client.",
            ),
        )
    })
}
