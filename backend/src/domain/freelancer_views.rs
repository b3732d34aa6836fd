//! Freelancer-facing read service.
//!
//! Matching is a binary inclusion filter pushed down to the repository:
//! open unassigned jobs sharing at least one skill with the caller that
//! the caller has not already proposed on. The dashboard aggregates
//! assigned jobs with the caller's proposals joined to their jobs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    FreelancerDashboard, FreelancerQuery, JobRepository, ProposalRepository, ProposalWithJob,
    UserRepository,
};
use crate::domain::service_support::{
    map_job_repo_error, map_proposal_repo_error, map_user_repo_error, require_role,
};
use crate::domain::{Error, ExternalId, Job, User, UserRole};

/// Read-side service implementing the freelancer driving port.
#[derive(Clone)]
pub struct FreelancerViewService<J, P, U> {
    jobs: Arc<J>,
    proposals: Arc<P>,
    users: Arc<U>,
}

impl<J, P, U> FreelancerViewService<J, P, U> {
    /// Create a new service with the given repositories.
    pub fn new(jobs: Arc<J>, proposals: Arc<P>, users: Arc<U>) -> Self {
        Self {
            jobs,
            proposals,
            users,
        }
    }
}

impl<J, P, U> FreelancerViewService<J, P, U>
where
    U: UserRepository,
{
    /// Dashboard resolution answers not-found for a missing profile,
    /// unlike the gated operations, so a fresh identity is told to
    /// onboard rather than to authenticate.
    async fn profile_or_not_found(&self, subject: &ExternalId) -> Result<User, Error> {
        self.users
            .find_by_external_id(subject)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found("user profile not found"))
    }
}

#[async_trait]
impl<J, P, U> FreelancerQuery for FreelancerViewService<J, P, U>
where
    J: JobRepository,
    P: ProposalRepository,
    U: UserRepository,
{
    async fn recommended_jobs(&self, subject: ExternalId) -> Result<Vec<Job>, Error> {
        let freelancer = self.profile_or_not_found(&subject).await?;
        require_role(&freelancer, UserRole::Freelancer)?;
        self.jobs
            .list_recommended(&freelancer.skills, freelancer.id)
            .await
            .map_err(map_job_repo_error)
    }

    async fn dashboard(&self, subject: ExternalId) -> Result<FreelancerDashboard, Error> {
        let freelancer = self.profile_or_not_found(&subject).await?;
        let assigned_jobs = self
            .jobs
            .list_assigned(freelancer.id)
            .await
            .map_err(map_job_repo_error)?;
        let proposals = self
            .proposals
            .list_by_freelancer_with_jobs(freelancer.id)
            .await
            .map_err(map_proposal_repo_error)?
            .into_iter()
            .map(|(proposal, job)| ProposalWithJob { proposal, job })
            .collect();
        Ok(FreelancerDashboard {
            assigned_jobs,
            proposals,
        })
    }
}

#[cfg(test)]
#[path = "freelancer_views_tests.rs"]
mod tests;
