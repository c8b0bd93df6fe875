//! Seeded in-memory [`DataSource`] with simulated latency and failure
//! injection.
//!
//! Every operation first sleeps for the delay configured in its
//! [`LatencyProfile`] slot, then consults the fault state, then touches the
//! tables. Tables live behind a `tokio::sync::RwLock`; the lock is never held
//! across the simulated delay, so concurrent calls may resolve out of issue
//! order exactly like a real backend.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use juahustle_core::ids::generate_id;
use tokio::sync::{Mutex, RwLock};

use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};
use crate::models::job::{Job, JobFilter, JobStatus, JobUpdate, NewJob};
use crate::models::user::User;
use crate::seed::{seed_applications, seed_jobs, seed_users};
use crate::source::{DataSource, DataSourceError, DataSourceResult};

// ---------------------------------------------------------------------------
// Operation / LatencyProfile
// ---------------------------------------------------------------------------

/// Every call the data source serves, used for latency lookup and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchJobs,
    FetchJob,
    CreateJob,
    UpdateJob,
    DeleteJob,
    CreateApplication,
    UpdateApplicationStatus,
    FetchApplications,
    FetchUsers,
    UpdateUserStatus,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::FetchJobs => "fetch_jobs",
            Self::FetchJob => "fetch_job",
            Self::CreateJob => "create_job",
            Self::UpdateJob => "update_job",
            Self::DeleteJob => "delete_job",
            Self::CreateApplication => "create_application",
            Self::UpdateApplicationStatus => "update_application_status",
            Self::FetchApplications => "fetch_applications",
            Self::FetchUsers => "fetch_users",
            Self::UpdateUserStatus => "update_user_status",
        }
    }
}

/// Simulated response delay per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub fetch_jobs: Duration,
    pub fetch_job: Duration,
    pub create_job: Duration,
    pub update_job: Duration,
    pub delete_job: Duration,
    pub create_application: Duration,
    pub update_application_status: Duration,
    pub fetch_applications: Duration,
    pub fetch_users: Duration,
    pub update_user_status: Duration,
}

impl LatencyProfile {
    /// Delays that feel like a slow mobile connection.
    pub fn simulated() -> Self {
        let ms = Duration::from_millis;
        Self {
            fetch_jobs: ms(800),
            fetch_job: ms(600),
            create_job: ms(1000),
            update_job: ms(800),
            delete_job: ms(600),
            create_application: ms(800),
            update_application_status: ms(600),
            fetch_applications: ms(600),
            fetch_users: ms(1000),
            update_user_status: ms(500),
        }
    }

    /// No delay at all; for tests.
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// The same delay for every operation.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            fetch_jobs: delay,
            fetch_job: delay,
            create_job: delay,
            update_job: delay,
            delete_job: delay,
            create_application: delay,
            update_application_status: delay,
            fetch_applications: delay,
            fetch_users: delay,
            update_user_status: delay,
        }
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        match op {
            Operation::FetchJobs => self.fetch_jobs,
            Operation::FetchJob => self.fetch_job,
            Operation::CreateJob => self.create_job,
            Operation::UpdateJob => self.update_job,
            Operation::DeleteJob => self.delete_job,
            Operation::CreateApplication => self.create_application,
            Operation::UpdateApplicationStatus => self.update_application_status,
            Operation::FetchApplications => self.fetch_applications,
            Operation::FetchUsers => self.fetch_users,
            Operation::UpdateUserStatus => self.update_user_status,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::simulated()
    }
}

// ---------------------------------------------------------------------------
// InMemoryDataSource
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    jobs: Vec<Job>,
    applications: Vec<JobApplication>,
    users: Vec<User>,
}

#[derive(Default)]
struct Faults {
    /// Fails the next call only.
    next: Option<DataSourceError>,
    /// Fails every call while set.
    unavailable: bool,
}

/// In-process stand-in for the marketplace backend.
pub struct InMemoryDataSource {
    tables: RwLock<Tables>,
    faults: Mutex<Faults>,
    latency: LatencyProfile,
}

impl InMemoryDataSource {
    /// Seeded tables with the given latency.
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_tables(seed_jobs(), seed_applications(), seed_users(), latency)
    }

    /// Empty tables with the given latency.
    pub fn empty(latency: LatencyProfile) -> Self {
        Self::with_tables(Vec::new(), Vec::new(), Vec::new(), latency)
    }

    pub fn with_tables(
        jobs: Vec<Job>,
        applications: Vec<JobApplication>,
        users: Vec<User>,
        latency: LatencyProfile,
    ) -> Self {
        Self {
            tables: RwLock::new(Tables {
                jobs,
                applications,
                users,
            }),
            faults: Mutex::new(Faults::default()),
            latency,
        }
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    /// Make the next call (whichever it is) fail with `err`.
    pub async fn fail_next(&self, err: DataSourceError) {
        self.faults.lock().await.next = Some(err);
    }

    /// Toggle a persistent outage: every call fails while `true`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.faults.lock().await.unavailable = unavailable;
    }

    /// Sleep for the configured delay, then apply any injected fault.
    async fn simulate(&self, op: Operation) -> DataSourceResult<()> {
        let delay = self.latency.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut faults = self.faults.lock().await;
        if let Some(err) = faults.next.take() {
            tracing::warn!(operation = op.name(), error = %err, "Injected data source fault");
            return Err(err);
        }
        if faults.unavailable {
            tracing::warn!(operation = op.name(), "Data source marked unavailable");
            return Err(DataSourceError::Unavailable(format!(
                "{} failed: backend offline",
                op.name()
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryDataSource {
    fn default() -> Self {
        Self::new(LatencyProfile::default())
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn fetch_jobs(&self, filter: &JobFilter) -> DataSourceResult<Vec<Job>> {
        self.simulate(Operation::FetchJobs).await?;
        let tables = self.tables.read().await;
        let jobs: Vec<Job> = tables
            .jobs
            .iter()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect();
        tracing::debug!(count = jobs.len(), ?filter, "Listed jobs");
        Ok(jobs)
    }

    async fn fetch_job(&self, id: &str) -> DataSourceResult<Job> {
        self.simulate(Operation::FetchJob).await?;
        self.tables
            .read()
            .await
            .jobs
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| DataSourceError::not_found("Job", id))
    }

    async fn create_job(&self, job: NewJob) -> DataSourceResult<Job> {
        self.simulate(Operation::CreateJob).await?;
        let job = Job {
            id: generate_id(),
            title: job.title,
            description: job.description,
            category: job.category,
            budget: job.budget,
            location: job.location,
            status: JobStatus::Open,
            client_id: job.client_id,
            client_name: job.client_name,
            posted_date: Utc::now().date_naive(),
            requirements: job.requirements,
            applicant_count: 0,
            duration: job.duration,
        };
        self.tables.write().await.jobs.insert(0, job.clone());
        tracing::info!(job_id = %job.id, client_id = %job.client_id, "Job created");
        Ok(job)
    }

    async fn update_job(&self, id: &str, update: JobUpdate) -> DataSourceResult<Job> {
        self.simulate(Operation::UpdateJob).await?;
        let mut tables = self.tables.write().await;
        let job = tables
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| DataSourceError::not_found("Job", id))?;
        update.apply_to(job);
        tracing::info!(job_id = %id, "Job updated");
        Ok(job.clone())
    }

    async fn delete_job(&self, id: &str) -> DataSourceResult<()> {
        self.simulate(Operation::DeleteJob).await?;
        let mut tables = self.tables.write().await;
        let index = tables
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| DataSourceError::not_found("Job", id))?;
        tables.jobs.remove(index);
        tracing::info!(job_id = %id, "Job deleted");
        Ok(())
    }

    async fn create_application(
        &self,
        application: NewApplication,
    ) -> DataSourceResult<JobApplication> {
        self.simulate(Operation::CreateApplication).await?;
        let application = JobApplication {
            id: generate_id(),
            job_id: application.job_id,
            hustler_id: application.hustler_id,
            hustler_name: application.hustler_name,
            message: application.message,
            proposed_budget: application.proposed_budget,
            status: ApplicationStatus::Pending,
            applied_date: Utc::now().date_naive(),
            hustler_profile: application.hustler_profile,
        };

        let mut tables = self.tables.write().await;
        tables.applications.push(application.clone());
        match tables.jobs.iter_mut().find(|j| j.id == application.job_id) {
            Some(job) => job.applicant_count += 1,
            None => tracing::warn!(
                job_id = %application.job_id,
                "Application recorded for unknown job; applicant count untouched"
            ),
        }

        tracing::info!(
            application_id = %application.id,
            job_id = %application.job_id,
            hustler_id = %application.hustler_id,
            "Application created"
        );
        Ok(application)
    }

    async fn update_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> DataSourceResult<JobApplication> {
        self.simulate(Operation::UpdateApplicationStatus).await?;
        let mut tables = self.tables.write().await;
        let application = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DataSourceError::not_found("Application", id))?;
        application.status = status;
        tracing::info!(application_id = %id, status = status.as_str(), "Application status updated");
        Ok(application.clone())
    }

    async fn fetch_applications_by_job(
        &self,
        job_id: &str,
    ) -> DataSourceResult<Vec<JobApplication>> {
        self.simulate(Operation::FetchApplications).await?;
        Ok(self
            .tables
            .read()
            .await
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn fetch_applications_by_hustler(
        &self,
        hustler_id: &str,
    ) -> DataSourceResult<Vec<JobApplication>> {
        self.simulate(Operation::FetchApplications).await?;
        Ok(self
            .tables
            .read()
            .await
            .applications
            .iter()
            .filter(|a| a.hustler_id == hustler_id)
            .cloned()
            .collect())
    }

    async fn fetch_users(&self) -> DataSourceResult<Vec<User>> {
        self.simulate(Operation::FetchUsers).await?;
        Ok(self.tables.read().await.users.clone())
    }

    async fn update_user_status(&self, id: &str, is_active: bool) -> DataSourceResult<User> {
        self.simulate(Operation::UpdateUserStatus).await?;
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DataSourceError::not_found("User", id))?;
        user.is_active = is_active;
        tracing::info!(user_id = %id, is_active, "User status updated");
        Ok(user.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_profile_matches_expected_delays() {
        let p = LatencyProfile::simulated();
        assert_eq!(p.delay_for(Operation::FetchJobs), Duration::from_millis(800));
        assert_eq!(p.delay_for(Operation::CreateJob), Duration::from_millis(1000));
        assert_eq!(p.delay_for(Operation::UpdateUserStatus), Duration::from_millis(500));
    }

    #[test]
    fn none_profile_is_all_zero() {
        let p = LatencyProfile::none();
        assert!(p.delay_for(Operation::FetchUsers).is_zero());
        assert!(p.delay_for(Operation::CreateApplication).is_zero());
    }

    #[tokio::test]
    async fn injected_fault_fires_once() {
        let source = InMemoryDataSource::new(LatencyProfile::none());
        source
            .fail_next(DataSourceError::Unavailable("boom".into()))
            .await;

        assert!(source.fetch_jobs(&JobFilter::default()).await.is_err());
        assert!(source.fetch_jobs(&JobFilter::default()).await.is_ok());
    }

    #[tokio::test]
    async fn unavailable_fails_until_cleared() {
        let source = InMemoryDataSource::new(LatencyProfile::none());
        source.set_unavailable(true).await;
        assert!(source.fetch_users().await.is_err());
        assert!(source.fetch_job("1").await.is_err());

        source.set_unavailable(false).await;
        assert!(source.fetch_users().await.is_ok());
    }

    #[tokio::test]
    async fn latency_delays_response() {
        let source = InMemoryDataSource::new(LatencyProfile::uniform(Duration::from_millis(20)));
        let started = std::time::Instant::now();
        source.fetch_job("1").await.expect("seed job exists");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
