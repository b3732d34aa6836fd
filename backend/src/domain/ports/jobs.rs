//! Driving ports for the job lifecycle.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Error, ExternalId, Job, JobStatus, Proposal};

/// Request to create a job posting.
#[derive(Debug, Clone)]
pub struct CreateJobRequest {
    /// Verified subject of the calling client.
    pub subject: ExternalId,
    /// Job title.
    pub title: String,
    /// Job description.
    pub description: String,
    /// Offered budget.
    pub budget: f64,
    /// Skills required of applicants.
    pub required_skills: Vec<String>,
    /// Optional completion deadline.
    pub deadline: Option<NaiveDate>,
}

/// Request to update a job posting.
///
/// The contract requires the full field set: `title`, `description`,
/// `budget`, and `required_skills` must all be present or the update is
/// rejected as invalid. `status` defaults to the stored value when omitted;
/// `deadline` is replaced by whatever the patch carries, including `None`.
#[derive(Debug, Clone)]
pub struct UpdateJobRequest {
    /// Verified subject of the calling client.
    pub subject: ExternalId,
    /// Job to update; must be owned by the caller.
    pub job_id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New budget.
    pub budget: Option<f64>,
    /// New skill list.
    pub required_skills: Option<Vec<String>>,
    /// New status, when the client moves the job along its lifecycle.
    pub status: Option<JobStatus>,
    /// New deadline; `None` clears any stored deadline.
    pub deadline: Option<NaiveDate>,
}

/// Domain use-case port for job mutations.
#[async_trait]
pub trait JobsCommand: Send + Sync {
    /// Create a job owned by the calling client. Requires role `CLIENT`.
    async fn create_job(&self, request: CreateJobRequest) -> Result<Job, Error>;

    /// Update a job owned by the calling client.
    async fn update_job(&self, request: UpdateJobRequest) -> Result<Job, Error>;

    /// Delete a job owned by the calling client; its proposals cascade.
    async fn delete_job(&self, subject: ExternalId, job_id: Uuid) -> Result<(), Error>;
}

/// Domain use-case port for job reads.
#[async_trait]
pub trait JobsQuery: Send + Sync {
    /// Jobs owned by the calling client, newest-first.
    async fn list_owned(&self, subject: ExternalId) -> Result<Vec<Job>, Error>;

    /// One job by id. Readable by anyone holding the id; absent jobs
    /// surface as `None`, not an error.
    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    /// Proposals on a job owned by the calling client, newest-first.
    async fn list_job_proposals(
        &self,
        subject: ExternalId,
        job_id: Uuid,
    ) -> Result<Vec<Proposal>, Error>;
}
