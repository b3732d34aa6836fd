//! Job lifecycle domain service.
//!
//! Implements the jobs command and query driving ports: creation, owner
//! listing, public get, full-field update, and cascade delete, with the
//! role and ownership gates evaluated before every mutation. Ownership
//! failures deliberately surface as not-found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CreateJobRequest, JobRepository, JobsCommand, JobsQuery, ListingInvalidation, ListingTag,
    ProposalRepository, UpdateJobRequest, UserRepository,
};
use crate::domain::service_support::{
    job_not_found, map_job_repo_error, map_proposal_repo_error, require_role, resolve_user,
};
use crate::domain::{Error, ExternalId, Job, JobFields, JobStatus, Proposal, User, UserRole};

/// Job lifecycle service implementing the driving ports.
#[derive(Clone)]
pub struct JobService<J, P, U, C> {
    jobs: Arc<J>,
    proposals: Arc<P>,
    users: Arc<U>,
    invalidation: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<J, P, U, C> JobService<J, P, U, C> {
    /// Create a new service with the given repositories.
    pub fn new(
        jobs: Arc<J>,
        proposals: Arc<P>,
        users: Arc<U>,
        invalidation: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            jobs,
            proposals,
            users,
            invalidation,
            clock,
        }
    }
}

impl<J, P, U, C> JobService<J, P, U, C>
where
    J: JobRepository,
    P: ProposalRepository,
    U: UserRepository,
    C: ListingInvalidation,
{
    async fn resolve_client(&self, subject: &ExternalId) -> Result<User, Error> {
        let user = resolve_user(self.users.as_ref(), subject).await?;
        require_role(&user, UserRole::Client)?;
        Ok(user)
    }

    /// Load a job and enforce ownership, answering not-found for both
    /// absence and foreign ownership.
    async fn owned_job(&self, client: &User, job_id: Uuid) -> Result<Job, Error> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await
            .map_err(map_job_repo_error)?
            .ok_or_else(|| job_not_found(job_id))?;
        if job.client_id != client.id {
            return Err(job_not_found(job_id));
        }
        Ok(job)
    }
}

#[async_trait]
impl<J, P, U, C> JobsCommand for JobService<J, P, U, C>
where
    J: JobRepository,
    P: ProposalRepository,
    U: UserRepository,
    C: ListingInvalidation,
{
    async fn create_job(&self, request: CreateJobRequest) -> Result<Job, Error> {
        let client = self.resolve_client(&request.subject).await?;
        let fields = JobFields::try_new(
            &request.title,
            &request.description,
            request.budget,
            request.required_skills,
            request.deadline,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let job = Job {
            id: Uuid::new_v4(),
            title: fields.title().to_owned(),
            description: fields.description().to_owned(),
            budget: fields.budget(),
            required_skills: fields.required_skills().to_vec(),
            status: JobStatus::Open,
            deadline: fields.deadline(),
            client_id: client.id,
            assigned_freelancer_id: None,
            created_at: self.clock.utc(),
        };
        self.jobs.insert(&job).await.map_err(map_job_repo_error)?;
        self.invalidation
            .invalidate(&[ListingTag::ClientJobs(client.id), ListingTag::OpenJobs]);
        info!(job_id = %job.id, client_id = %client.id, "job created");
        Ok(job)
    }

    async fn update_job(&self, request: UpdateJobRequest) -> Result<Job, Error> {
        let client = self.resolve_client(&request.subject).await?;
        let (Some(title), Some(description), Some(budget), Some(required_skills)) = (
            request.title,
            request.description,
            request.budget,
            request.required_skills,
        ) else {
            return Err(Error::invalid_request(
                "title, description, budget and requiredSkills are all required",
            ));
        };

        let existing = self.owned_job(&client, request.job_id).await?;
        let fields =
            JobFields::try_new(&title, &description, budget, required_skills, request.deadline)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
        let status = request.status.unwrap_or(existing.status);

        let updated = self
            .jobs
            .update_fields(existing.id, &fields, status)
            .await
            .map_err(map_job_repo_error)?;
        self.invalidation.invalidate(&[
            ListingTag::ClientJobs(client.id),
            ListingTag::OpenJobs,
            ListingTag::Job(updated.id),
        ]);
        info!(job_id = %updated.id, "job updated");
        Ok(updated)
    }

    async fn delete_job(
        &self,
        subject: ExternalId,
        job_id: Uuid,
    ) -> Result<(), Error> {
        let client = self.resolve_client(&subject).await?;
        let job = self.owned_job(&client, job_id).await?;

        let deleted = self.jobs.delete(job.id).await.map_err(map_job_repo_error)?;
        if !deleted {
            // Lost a race with another delete of the same job.
            return Err(job_not_found(job_id));
        }
        self.invalidation.invalidate(&[
            ListingTag::ClientJobs(client.id),
            ListingTag::OpenJobs,
            ListingTag::Job(job_id),
        ]);
        info!(job_id = %job_id, "job deleted");
        Ok(())
    }
}

#[async_trait]
impl<J, P, U, C> JobsQuery for JobService<J, P, U, C>
where
    J: JobRepository,
    P: ProposalRepository,
    U: UserRepository,
    C: ListingInvalidation,
{
    async fn list_owned(&self, subject: ExternalId) -> Result<Vec<Job>, Error> {
        let user = resolve_user(self.users.as_ref(), &subject).await?;
        self.jobs
            .list_by_client(user.id)
            .await
            .map_err(map_job_repo_error)
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        self.jobs
            .find_by_id(job_id)
            .await
            .map_err(map_job_repo_error)
    }

    async fn list_job_proposals(
        &self,
        subject: ExternalId,
        job_id: Uuid,
    ) -> Result<Vec<Proposal>, Error> {
        let client = self.resolve_client(&subject).await?;
        let job = self.owned_job(&client, job_id).await?;
        self.proposals
            .list_by_job(job.id)
            .await
            .map_err(map_proposal_repo_error)
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
