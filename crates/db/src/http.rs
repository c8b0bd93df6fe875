//! REST client implementation of [`DataSource`].
//!
//! Talks to a backend exposing the marketplace resources as JSON:
//!
//! | Operation                      | Request                                   |
//! |--------------------------------|-------------------------------------------|
//! | `fetch_jobs`                   | `GET /jobs?category=&search=&location=`   |
//! | `fetch_job`                    | `GET /jobs/{id}`                          |
//! | `create_job`                   | `POST /jobs`                              |
//! | `update_job`                   | `PATCH /jobs/{id}`                        |
//! | `delete_job`                   | `DELETE /jobs/{id}`                       |
//! | `fetch_applications_by_job`    | `GET /jobs/{id}/applications`             |
//! | `fetch_applications_by_hustler`| `GET /hustlers/{id}/applications`         |
//! | `create_application`           | `POST /applications`                      |
//! | `update_application_status`    | `PATCH /applications/{id}/status`         |
//! | `fetch_users`                  | `GET /users`                              |
//! | `update_user_status`           | `PATCH /users/{id}/status`                |
//!
//! A 404 on an id-based route becomes [`DataSourceError::NotFound`]; any other
//! non-2xx status becomes [`DataSourceError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::application::{
    ApplicationStatus, ApplicationStatusUpdate, JobApplication, NewApplication,
};
use crate::models::job::{Job, JobFilter, JobUpdate, NewJob};
use crate::models::user::{User, UserStatusUpdate};
use crate::source::{DataSource, DataSourceError, DataSourceResult};

/// HTTP client for the marketplace REST API.
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    /// Create a client for `base_url` (e.g. `http://localhost:3000/api/v1`)
    /// with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DataSourceResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query pairs for the active filter criteria.
    pub fn filter_query(filter: &JobFilter) -> Vec<(&'static str, String)> {
        [
            ("category", &filter.category),
            ("search", &filter.search),
            ("location", &filter.location),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v.to_string()))
        })
        .collect()
    }

    // ---- private helpers ----

    /// Map a non-success status to an error; `entity`/`id` name the lookup
    /// for 404 responses.
    async fn ensure_success(
        response: reqwest::Response,
        entity: &'static str,
        id: &str,
    ) -> DataSourceResult<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DataSourceError::not_found(entity, id));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), entity, id, "Data source API error");
            return Err(DataSourceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        entity: &'static str,
        id: &str,
    ) -> DataSourceResult<T> {
        let response = Self::ensure_success(response, entity, id).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_jobs(&self, filter: &JobFilter) -> DataSourceResult<Vec<Job>> {
        let response = self
            .client
            .get(self.url("/jobs"))
            .query(&Self::filter_query(filter))
            .send()
            .await?;
        Self::parse(response, "Job", "*").await
    }

    async fn fetch_job(&self, id: &str) -> DataSourceResult<Job> {
        let response = self.client.get(self.url(&format!("/jobs/{id}"))).send().await?;
        Self::parse(response, "Job", id).await
    }

    async fn create_job(&self, job: NewJob) -> DataSourceResult<Job> {
        let response = self.client.post(self.url("/jobs")).json(&job).send().await?;
        Self::parse(response, "Job", "new").await
    }

    async fn update_job(&self, id: &str, update: JobUpdate) -> DataSourceResult<Job> {
        let response = self
            .client
            .patch(self.url(&format!("/jobs/{id}")))
            .json(&update)
            .send()
            .await?;
        Self::parse(response, "Job", id).await
    }

    async fn delete_job(&self, id: &str) -> DataSourceResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/jobs/{id}")))
            .send()
            .await?;
        Self::ensure_success(response, "Job", id).await?;
        Ok(())
    }

    async fn create_application(
        &self,
        application: NewApplication,
    ) -> DataSourceResult<JobApplication> {
        let job_id = application.job_id.clone();
        let response = self
            .client
            .post(self.url("/applications"))
            .json(&application)
            .send()
            .await?;
        Self::parse(response, "Job", &job_id).await
    }

    async fn update_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> DataSourceResult<JobApplication> {
        let response = self
            .client
            .patch(self.url(&format!("/applications/{id}/status")))
            .json(&ApplicationStatusUpdate { status })
            .send()
            .await?;
        Self::parse(response, "Application", id).await
    }

    async fn fetch_applications_by_job(
        &self,
        job_id: &str,
    ) -> DataSourceResult<Vec<JobApplication>> {
        let response = self
            .client
            .get(self.url(&format!("/jobs/{job_id}/applications")))
            .send()
            .await?;
        Self::parse(response, "Job", job_id).await
    }

    async fn fetch_applications_by_hustler(
        &self,
        hustler_id: &str,
    ) -> DataSourceResult<Vec<JobApplication>> {
        let response = self
            .client
            .get(self.url(&format!("/hustlers/{hustler_id}/applications")))
            .send()
            .await?;
        Self::parse(response, "Hustler", hustler_id).await
    }

    async fn fetch_users(&self) -> DataSourceResult<Vec<User>> {
        let response = self.client.get(self.url("/users")).send().await?;
        Self::parse(response, "User", "*").await
    }

    async fn update_user_status(&self, id: &str, is_active: bool) -> DataSourceResult<User> {
        let response = self
            .client
            .patch(self.url(&format!("/users/{id}/status")))
            .json(&UserStatusUpdate { is_active })
            .send()
            .await?;
        Self::parse(response, "User", id).await
    }
}
