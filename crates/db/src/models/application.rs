//! Job application models and DTOs.

use juahustle_core::types::{Date, EntityId};
use serde::{Deserialize, Serialize};

/// Application review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

/// Public profile summary attached to an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HustlerProfile {
    pub rating: f32,
    pub completed_jobs: u32,
    pub skills: Vec<String>,
    pub bio: String,
}

/// A hustler's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: EntityId,
    pub job_id: EntityId,
    pub hustler_id: EntityId,
    pub hustler_name: String,
    pub message: String,
    pub proposed_budget: Option<String>,
    pub status: ApplicationStatus,
    pub applied_date: Date,
    pub hustler_profile: Option<HustlerProfile>,
}

/// DTO for submitting an application. The data source assigns id, status and
/// date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub job_id: EntityId,
    pub hustler_id: EntityId,
    pub hustler_name: String,
    pub message: String,
    pub proposed_budget: Option<String>,
    pub hustler_profile: Option<HustlerProfile>,
}

/// Body of a status change request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApplicationStatusUpdate {
    pub status: ApplicationStatus,
}
