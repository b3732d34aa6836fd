//! Job entity, status enum, and field validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Accepting proposals.
    Open,
    /// Assigned and actively worked on.
    InProgress,
    /// Assigned, awaiting kick-off confirmation.
    Awarded,
    /// Work finished.
    Completed,
    /// Abandoned by the client.
    Cancelled,
}

impl JobStatus {
    /// Storage representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Awarded => "AWARDED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = JobValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "AWARDED" => Ok(Self::Awarded),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(JobValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validation failures for job fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobValidationError {
    /// The title was empty once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// The description was empty once trimmed.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The budget must be a positive, finite number.
    #[error("budget must be a positive number")]
    InvalidBudget,
    /// No usable skill remained after normalization.
    #[error("at least one required skill is needed")]
    EmptySkills,
    /// The status string is not a modeled status.
    #[error("unknown job status: {value}")]
    UnknownStatus {
        /// Offending input value.
        value: String,
    },
}

/// A client's job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Stable local identifier.
    pub id: Uuid,
    /// Short title shown in listings.
    pub title: String,
    /// Full description of the work.
    pub description: String,
    /// Budget offered by the client. Always positive and finite.
    pub budget: f64,
    /// Skills the client requires, normalized. Order carries no meaning.
    pub required_skills: Vec<String>,
    /// Lifecycle status.
    pub status: JobStatus,
    /// Optional completion deadline.
    pub deadline: Option<NaiveDate>,
    /// Owning client. Immutable.
    pub client_id: Uuid,
    /// Freelancer assigned via proposal acceptance, when any.
    pub assigned_freelancer_id: Option<Uuid>,
    /// Record creation time; listings order newest-first by this.
    pub created_at: DateTime<Utc>,
}

/// Validated fields shared by job creation and full-field update.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    title: String,
    description: String,
    budget: f64,
    required_skills: Vec<String>,
    deadline: Option<NaiveDate>,
}

impl JobFields {
    /// Validate raw job fields.
    pub fn try_new(
        title: &str,
        description: &str,
        budget: f64,
        required_skills: Vec<String>,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, JobValidationError> {
        let title = title.trim().to_owned();
        if title.is_empty() {
            return Err(JobValidationError::EmptyTitle);
        }
        let description = description.trim().to_owned();
        if description.is_empty() {
            return Err(JobValidationError::EmptyDescription);
        }
        if !budget.is_finite() || budget <= 0.0 {
            return Err(JobValidationError::InvalidBudget);
        }
        let required_skills = crate::domain::normalize_skills(required_skills);
        if required_skills.is_empty() {
            return Err(JobValidationError::EmptySkills);
        }
        Ok(Self {
            title,
            description,
            budget,
            required_skills,
            deadline,
        })
    }

    /// Job title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Job description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Validated positive budget.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Normalized, non-empty skill list.
    pub fn required_skills(&self) -> &[String] {
        &self.required_skills
    }

    /// Optional completion deadline.
    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }
}
