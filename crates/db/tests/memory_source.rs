//! Integration tests for [`InMemoryDataSource`] through the [`DataSource`]
//! port.
//!
//! Covers filtering, id-based lookup misses, the applicant-count side effect
//! of submitting an application, and out-of-order resolution of concurrent
//! calls.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use juahustle_db::models::application::{ApplicationStatus, NewApplication};
use juahustle_db::models::job::{JobFilter, JobStatus, JobUpdate, NewJob};
use juahustle_db::{DataSource, DataSourceError, InMemoryDataSource, LatencyProfile};

fn source() -> InMemoryDataSource {
    InMemoryDataSource::new(LatencyProfile::none())
}

fn new_job() -> NewJob {
    NewJob {
        title: "Garden Landscaping".into(),
        description: "Trim hedges and mow the lawn.".into(),
        category: "Gardening".into(),
        budget: "KSh 4,000".into(),
        location: "Nairobi, Runda".into(),
        client_id: "client9".into(),
        client_name: "Wanjiru Otieno".into(),
        requirements: vec!["Own tools".into()],
        duration: Some("1 day".into()),
    }
}

fn new_application(job_id: &str) -> NewApplication {
    NewApplication {
        job_id: job_id.into(),
        hustler_id: "hustler7".into(),
        hustler_name: "Brian Ouma".into(),
        message: "Available tomorrow.".into(),
        proposed_budget: None,
        hustler_profile: None,
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_jobs_filters_by_category() {
    let source = source();
    let jobs = source
        .fetch_jobs(&JobFilter::default().category("Plumbing"))
        .await
        .expect("listing succeeds");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "2");
}

#[tokio::test]
async fn fetch_job_miss_is_not_found() {
    let err = source().fetch_job("404").await.unwrap_err();
    assert_matches!(err, DataSourceError::NotFound { entity: "Job", ref id } if id == "404");
}

#[tokio::test]
async fn create_job_is_open_and_listed_first() {
    let source = source();
    let job = source.create_job(new_job()).await.expect("create succeeds");

    assert_eq!(job.status, JobStatus::Open);
    assert_eq!(job.applicant_count, 0);
    assert_eq!(job.posted_date, chrono::Utc::now().date_naive());

    let jobs = source.fetch_jobs(&JobFilter::default()).await.unwrap();
    assert_eq!(jobs.len(), 4);
    assert_eq!(jobs[0].id, job.id);
}

#[tokio::test]
async fn update_and_delete_job() {
    let source = source();
    let updated = source
        .update_job(
            "2",
            JobUpdate {
                status: Some(JobStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.status, JobStatus::InProgress);

    source.delete_job("2").await.expect("delete succeeds");
    assert_matches!(
        source.fetch_job("2").await,
        Err(DataSourceError::NotFound { .. })
    );
    assert_matches!(
        source.delete_job("2").await,
        Err(DataSourceError::NotFound { .. })
    );
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_application_increments_applicant_count() {
    let source = source();
    let before = source.fetch_job("3").await.unwrap().applicant_count;

    let application = source
        .create_application(new_application("3"))
        .await
        .expect("application succeeds");

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(source.fetch_job("3").await.unwrap().applicant_count, before + 1);

    let mine = source.fetch_applications_by_hustler("hustler7").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, application.id);
}

#[tokio::test]
async fn application_for_unknown_job_is_still_recorded() {
    let source = source();
    source
        .create_application(new_application("ghost"))
        .await
        .expect("application succeeds");
    assert_eq!(source.fetch_applications_by_job("ghost").await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_application_status_hits_and_misses() {
    let source = source();
    let accepted = source
        .update_application_status("app1", ApplicationStatus::Accepted)
        .await
        .expect("seed application exists");
    assert_eq!(accepted.status, ApplicationStatus::Accepted);

    let err = source
        .update_application_status("nope", ApplicationStatus::Rejected)
        .await
        .unwrap_err();
    assert_matches!(err, DataSourceError::NotFound { entity: "Application", .. });
}

#[tokio::test]
async fn failed_create_application_leaves_count_untouched() {
    let source = source();
    let before = source.fetch_job("1").await.unwrap().applicant_count;

    source
        .fail_next(DataSourceError::Unavailable("flaky".into()))
        .await;
    assert!(source.create_application(new_application("1")).await.is_err());

    assert_eq!(source.fetch_job("1").await.unwrap().applicant_count, before);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_status_toggle() {
    let source = source();
    let user = source.update_user_status("2", false).await.unwrap();
    assert!(!user.is_active);

    let users = source.fetch_users().await.unwrap();
    assert!(!users.iter().find(|u| u.id == "2").unwrap().is_active);

    assert_matches!(
        source.update_user_status("99", true).await,
        Err(DataSourceError::NotFound { entity: "User", .. })
    );
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// A slow call issued first resolves after a fast call issued second.
#[tokio::test]
async fn concurrent_calls_resolve_out_of_issue_order() {
    let mut latency = LatencyProfile::none();
    latency.fetch_users = Duration::from_millis(80);
    let source: Arc<dyn DataSource> = Arc::new(InMemoryDataSource::new(latency));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let slow = {
        let source = Arc::clone(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            source.fetch_users().await.unwrap();
            tx.send("users").unwrap();
        })
    };
    let fast = {
        let source = Arc::clone(&source);
        tokio::spawn(async move {
            source.fetch_job("1").await.unwrap();
            tx.send("job").unwrap();
        })
    };

    slow.await.unwrap();
    fast.await.unwrap();

    assert_eq!(rx.recv().await, Some("job"));
    assert_eq!(rx.recv().await, Some("users"));
}
