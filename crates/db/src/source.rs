//! The data source port.
//!
//! Views depend only on [`DataSource`]; the composition root decides whether
//! an [`InMemoryDataSource`](crate::InMemoryDataSource) or an
//! [`HttpDataSource`](crate::HttpDataSource) sits behind it.

use async_trait::async_trait;
use juahustle_core::error::CoreError;
use juahustle_core::types::EntityId;

use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};
use crate::models::job::{Job, JobFilter, JobUpdate, NewJob};
use crate::models::user::User;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors returned by any [`DataSource`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// An id-based lookup missed.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// The backend could not serve the request (injected fault, outage).
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status other than 404.
    #[error("Data source API error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl DataSourceError {
    pub fn not_found(entity: &'static str, id: impl Into<EntityId>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<DataSourceError> for CoreError {
    fn from(err: DataSourceError) -> Self {
        match err {
            DataSourceError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            other => CoreError::Internal(other.to_string()),
        }
    }
}

/// Convenience alias for data source return values.
pub type DataSourceResult<T> = Result<T, DataSourceError>;

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Asynchronous marketplace backend.
///
/// Every call is a single request / response; implementations do not retry,
/// cache or apply backpressure. Id-based lookups fail with
/// [`DataSourceError::NotFound`] on a miss.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// List jobs passing `filter`, in backend order (newest postings first).
    async fn fetch_jobs(&self, filter: &JobFilter) -> DataSourceResult<Vec<Job>>;

    async fn fetch_job(&self, id: &str) -> DataSourceResult<Job>;

    /// Post a job. The result is open, dated today, with no applicants.
    async fn create_job(&self, job: NewJob) -> DataSourceResult<Job>;

    async fn update_job(&self, id: &str, update: JobUpdate) -> DataSourceResult<Job>;

    async fn delete_job(&self, id: &str) -> DataSourceResult<()>;

    /// Submit an application. The result is pending and dated today; the
    /// target job's applicant count is incremented as a side effect.
    async fn create_application(
        &self,
        application: NewApplication,
    ) -> DataSourceResult<JobApplication>;

    async fn update_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> DataSourceResult<JobApplication>;

    async fn fetch_applications_by_job(&self, job_id: &str)
        -> DataSourceResult<Vec<JobApplication>>;

    async fn fetch_applications_by_hustler(
        &self,
        hustler_id: &str,
    ) -> DataSourceResult<Vec<JobApplication>>;

    async fn fetch_users(&self) -> DataSourceResult<Vec<User>>;

    async fn update_user_status(&self, id: &str, is_active: bool) -> DataSourceResult<User>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_core_not_found() {
        let core: CoreError = DataSourceError::not_found("Job", "42").into();
        assert!(matches!(core, CoreError::NotFound { entity: "Job", ref id } if id == "42"));
    }

    #[test]
    fn other_errors_map_to_internal() {
        let core: CoreError = DataSourceError::Unavailable("down".into()).into();
        assert!(matches!(core, CoreError::Internal(ref m) if m.contains("down")));
    }

    #[test]
    fn display_names_entity_and_id() {
        let err = DataSourceError::not_found("Application", "app9");
        assert_eq!(err.to_string(), "Application not found: app9");
        assert!(err.is_not_found());
    }
}
