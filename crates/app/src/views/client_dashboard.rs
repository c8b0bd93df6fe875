//! Client dashboard: own postings, posting stats, and the post-a-job form.

use juahustle_core::currency::{format_currency, DEFAULT_CURRENCY};
use juahustle_core::error::CoreError;
use juahustle_core::roles::Role;
use juahustle_core::validation::validate_required;
use juahustle_db::models::job::{Job, JobFilter, JobStatus, JobUpdate, NewJob};
use juahustle_db::DataSourceError;

use super::{settle, ViewOutcome, ViewScope};
use crate::error::{AppError, AppResult};
use crate::notice::Notice;
use crate::session::SessionUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Header counters of the client dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// Count `jobs` by status. Cancelled jobs only count towards the total.
pub fn stats(jobs: &[Job]) -> ClientStats {
    let count = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
    ClientStats {
        total: jobs.len(),
        open: count(JobStatus::Open),
        in_progress: count(JobStatus::InProgress),
        completed: count(JobStatus::Completed),
    }
}

#[derive(Debug, Clone)]
pub struct ClientDashboard {
    pub jobs: Vec<Job>,
    pub stats: ClientStats,
}

fn require_client(user: &SessionUser) -> AppResult<()> {
    if user.role != Role::Client {
        return Err(CoreError::Forbidden("Only clients can manage job postings".into()).into());
    }
    Ok(())
}

/// Load the jobs posted by `user`.
pub async fn load(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
) -> ViewOutcome<ClientDashboard> {
    const FAILURE: &str = "Failed to load your jobs";

    if let Err(err) = require_client(user) {
        return ViewOutcome::Failed(err.to_notice(FAILURE));
    }

    let result = state
        .data_source
        .fetch_jobs(&JobFilter::default())
        .await
        .map_err(AppError::from);

    settle(scope, result, FAILURE, |jobs| {
        let jobs: Vec<Job> = jobs.into_iter().filter(|j| j.client_id == user.id).collect();
        let stats = stats(&jobs);
        ViewOutcome::done(ClientDashboard { jobs, stats })
    })
}

// ---------------------------------------------------------------------------
// Post a job
// ---------------------------------------------------------------------------

/// Fields of the post-a-job dialog.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Either a bare amount (`"3000"`) or an already formatted string.
    pub budget: String,
    pub location: String,
    pub requirements: Vec<String>,
    pub duration: Option<String>,
}

/// Bare numeric budgets are formatted in the default currency; anything
/// else is kept as typed.
fn normalize_budget(budget: &str) -> String {
    let budget = budget.trim();
    match budget.replace(',', "").parse::<f64>() {
        Ok(amount) if amount.is_finite() => format_currency(amount, DEFAULT_CURRENCY),
        _ => budget.to_string(),
    }
}

fn build_job(user: &SessionUser, form: JobForm) -> AppResult<NewJob> {
    require_client(user)?;
    validate_required("Title", &form.title)?;
    validate_required("Category", &form.category)?;
    validate_required("Budget", &form.budget)?;
    validate_required("Location", &form.location)?;
    validate_required("Description", &form.description)?;

    Ok(NewJob {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        category: form.category,
        budget: normalize_budget(&form.budget),
        location: form.location.trim().to_string(),
        client_id: user.id.clone(),
        client_name: user.name.clone(),
        requirements: form
            .requirements
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect(),
        duration: form.duration.filter(|d| !d.trim().is_empty()),
    })
}

/// Post a new job on behalf of `user`.
pub async fn post_job(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    form: JobForm,
) -> ViewOutcome<Job> {
    const FAILURE: &str = "Failed to post job. Please try again.";

    let request = match build_job(user, form) {
        Ok(request) => request,
        Err(err) => return ViewOutcome::Failed(err.to_notice(FAILURE)),
    };

    let result = state
        .data_source
        .create_job(request)
        .await
        .map_err(AppError::from);

    settle(scope, result, FAILURE, |job| {
        tracing::info!(job_id = %job.id, client_id = %user.id, "Job posted");
        ViewOutcome::done_with(
            job,
            Notice::success(
                "Job Posted Successfully!",
                "Your job has been posted and is now visible to hustlers.",
            ),
        )
    })
}

// ---------------------------------------------------------------------------
// Manage postings
// ---------------------------------------------------------------------------

/// Ownership is checked against the job the page already shows, so each
/// action costs exactly one data source call.
fn require_owner(user: &SessionUser, job: &Job) -> AppResult<()> {
    require_client(user)?;
    if job.client_id != user.id {
        return Err(CoreError::Forbidden("You can only manage jobs you posted".into()).into());
    }
    Ok(())
}

/// Move one of `user`'s jobs to `status`.
pub async fn set_job_status(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    job: &Job,
    status: JobStatus,
) -> ViewOutcome<Job> {
    const FAILURE: &str = "Failed to update job";

    if let Err(err) = require_owner(user, job) {
        return ViewOutcome::Failed(err.to_notice(FAILURE));
    }

    let update = JobUpdate {
        status: Some(status),
        ..Default::default()
    };
    let result = state
        .data_source
        .update_job(&job.id, update)
        .await
        .map_err(AppError::from);

    settle(scope, result, FAILURE, |job| {
        tracing::info!(job_id = %job.id, status = job.status.label(), "Job status changed");
        ViewOutcome::done_with(
            job,
            Notice::success("Job Updated", format!("Job marked as {}.", status.label())),
        )
    })
}

/// Remove one of `user`'s jobs. A job that is already gone counts as
/// removed.
pub async fn delete_job(
    state: &AppState,
    scope: &ViewScope,
    user: &SessionUser,
    job: &Job,
) -> ViewOutcome<()> {
    const FAILURE: &str = "Failed to delete job";

    if let Err(err) = require_owner(user, job) {
        return ViewOutcome::Failed(err.to_notice(FAILURE));
    }

    let result = match state.data_source.delete_job(&job.id).await {
        Err(DataSourceError::NotFound { .. }) => {
            tracing::debug!(job_id = %job.id, "Job already removed");
            Ok(())
        }
        other => other.map_err(AppError::from),
    };

    settle(scope, result, FAILURE, |()| {
        tracing::info!(job_id = %job.id, client_id = %user.id, "Job deleted");
        ViewOutcome::done_with(
            (),
            Notice::success("Job Deleted", "Your job posting has been removed."),
        )
    })
}
