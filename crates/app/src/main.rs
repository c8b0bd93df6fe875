use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use juahustle_app::config::AppConfig;
use juahustle_app::state::AppState;
use juahustle_app::views::apply::{submit_application, ApplicationForm};
use juahustle_app::views::jobs::{browse, JobSort};
use juahustle_app::views::notification_panel::NotificationPanel;
use juahustle_app::views::{auth, job_detail, ViewOutcome, ViewScope};
use juahustle_db::models::job::JobFilter;

const DEMO_EMAIL: &str = "alex@example.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "juahustle_app=debug,juahustle_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        data_source = ?config.data_source,
        storage_dir = %config.storage_dir.display(),
        "Loaded configuration"
    );

    // --- Root scope ---
    let state = AppState::build(config).await?;

    // --- Notification panel follower ---
    let shutdown = CancellationToken::new();
    let follower = tokio::spawn(follow_panel(
        NotificationPanel::new(Arc::clone(&state.notifications)),
        shutdown.clone(),
    ));

    run_walkthrough(&state).await;

    shutdown.cancel();
    follower.await.context("Panel follower panicked")?;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Log the badge every time the registry changes.
async fn follow_panel(mut panel: NotificationPanel, shutdown: CancellationToken) {
    let initial = panel.view(Utc::now());
    tracing::info!(unread = initial.unread_count, rows = initial.rows.len(), "Panel mounted");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            view = panel.next_view() => match view {
                Some(view) => tracing::info!(
                    revision = view.revision,
                    badge = view.badge.as_deref().unwrap_or(""),
                    latest = view.rows.first().map(|r| r.title.as_str()).unwrap_or(""),
                    "Notification panel updated"
                ),
                None => break,
            },
        }
    }
}

/// Sign in (unless a session was restored), browse, open the first job and
/// apply to it.
async fn run_walkthrough(state: &AppState) {
    let page = ViewScope::new();

    let user = match state.session.current().await {
        Some(user) => user,
        None => match auth::login(state, &page, DEMO_EMAIL, "demo").await {
            ViewOutcome::Done { value, .. } => value.user,
            outcome => {
                tracing::warn!(notice = ?outcome.notice(), "Demo sign-in failed");
                return;
            }
        },
    };
    tracing::info!(user_id = %user.id, role = %user.role, "Acting as");

    let jobs = match browse(state, &page, JobFilter::default(), JobSort::Newest).await {
        ViewOutcome::Done { value, .. } => value,
        outcome => {
            tracing::warn!(notice = ?outcome.notice(), "Could not browse jobs");
            return;
        }
    };
    let Some(first) = jobs.first() else {
        tracing::info!("No jobs posted yet");
        return;
    };

    let mut detail = match job_detail::load(state, &page, &first.id, Some(&user)).await {
        ViewOutcome::Done { value, .. } => value,
        outcome => {
            tracing::warn!(notice = ?outcome.notice(), "Could not load job");
            return;
        }
    };
    if detail.has_applied {
        tracing::info!(job_id = %detail.job.id, "Already applied");
        return;
    }

    let dialog = page.child();
    let form = ApplicationForm {
        message: "Available this weekend with my own supplies.".into(),
        proposed_budget: String::new(),
    };
    let outcome = submit_application(state, &dialog, &user, &detail.job, form).await;
    if let Some(notice) = outcome.notice() {
        tracing::info!(title = %notice.title, description = %notice.description, "Notice");
    }
    if outcome.is_done() {
        detail.record_own_application();
        tracing::info!(
            job_id = %detail.job.id,
            applicants = detail.job.applicant_count,
            "Application recorded"
        );
    }
}
