//! Job posting models and DTOs.

use juahustle_core::types::{Date, EntityId};
use serde::{Deserialize, Serialize};

/// Category value meaning "do not filter by category".
pub const CATEGORY_ALL: &str = "All";

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// A posted job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Display string, e.g. `"KSh 3,000"`.
    pub budget: String,
    pub location: String,
    pub status: JobStatus,
    pub client_id: EntityId,
    pub client_name: String,
    pub posted_date: Date,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub applicant_count: u32,
    pub duration: Option<String>,
}

/// DTO for posting a new job. The data source assigns id, status, date and
/// applicant count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: String,
    pub location: String,
    pub client_id: EntityId,
    pub client_name: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub duration: Option<String>,
}

/// DTO for a partial job update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
    pub requirements: Option<Vec<String>>,
    pub duration: Option<String>,
}

impl JobUpdate {
    /// Apply every present field to `job`.
    pub fn apply_to(self, job: &mut Job) {
        if let Some(v) = self.title {
            job.title = v;
        }
        if let Some(v) = self.description {
            job.description = v;
        }
        if let Some(v) = self.category {
            job.category = v;
        }
        if let Some(v) = self.budget {
            job.budget = v;
        }
        if let Some(v) = self.location {
            job.location = v;
        }
        if let Some(v) = self.status {
            job.status = v;
        }
        if let Some(v) = self.requirements {
            job.requirements = v;
        }
        if let Some(v) = self.duration {
            job.duration = Some(v);
        }
    }
}

/// Browse filter for the job list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    /// Exact category match; `None` or [`CATEGORY_ALL`] disables it.
    pub category: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    /// Case-insensitive substring of location.
    pub location: Option<String>,
}

impl JobFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Whether `job` passes every active criterion. Empty strings count as
    /// inactive.
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(category) = self.active(&self.category) {
            if category != CATEGORY_ALL && job.category != category {
                return false;
            }
        }
        if let Some(search) = self.active(&self.search) {
            let needle = search.to_lowercase();
            if !job.title.to_lowercase().contains(&needle)
                && !job.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(location) = self.active(&self.location) {
            if !job.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }
        true
    }

    fn active<'a>(&self, value: &'a Option<String>) -> Option<&'a str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}
