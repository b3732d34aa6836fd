//! Proposal lifecycle domain service.
//!
//! Submission, acceptance, rejection, and withdrawal. Acceptance drives
//! job assignment, the winner's status change, and sibling rejection
//! through one transactional repository update, so two concurrent
//! accepts on the same job cannot both win and a storage fault cannot
//! leave the job assigned with its winning proposal still pending.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    AcceptOutcome, AcceptanceOutcome, JobRepository, ListingInvalidation, ListingTag,
    ProposalRepository, ProposalsCommand, SubmitProposalRequest, UserRepository,
};
use crate::domain::service_support::{
    map_job_repo_error, map_proposal_repo_error, require_role, resolve_user,
};
use crate::domain::{
    Error, ExternalId, Job, JobStatus, Proposal, ProposalFields, ProposalStatus, User, UserRole,
};

/// Proposal lifecycle service implementing the driving port.
#[derive(Clone)]
pub struct ProposalService<P, J, U, C> {
    proposals: Arc<P>,
    jobs: Arc<J>,
    users: Arc<U>,
    invalidation: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<P, J, U, C> ProposalService<P, J, U, C> {
    /// Create a new service with the given repositories.
    pub fn new(
        proposals: Arc<P>,
        jobs: Arc<J>,
        users: Arc<U>,
        invalidation: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            proposals,
            jobs,
            users,
            invalidation,
            clock,
        }
    }
}

/// Not-found-shaped error for proposals, also used when the caller is not
/// entitled to see the proposal exists.
fn proposal_not_found(proposal_id: Uuid) -> Error {
    Error::not_found("proposal not found").with_details(json!({
        "proposalId": proposal_id,
    }))
}

impl<P, J, U, C> ProposalService<P, J, U, C>
where
    P: ProposalRepository,
    J: JobRepository,
    U: UserRepository,
    C: ListingInvalidation,
{
    async fn load_proposal(&self, proposal_id: Uuid) -> Result<Proposal, Error> {
        self.proposals
            .find_by_id(proposal_id)
            .await
            .map_err(map_proposal_repo_error)?
            .ok_or_else(|| proposal_not_found(proposal_id))
    }

    /// Load the proposal's job; a dangling reference is a storage fault,
    /// not a caller error.
    async fn load_parent_job(&self, proposal: &Proposal) -> Result<Job, Error> {
        self.jobs
            .find_by_id(proposal.job_id)
            .await
            .map_err(map_job_repo_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "proposal {} references missing job {}",
                    proposal.id, proposal.job_id
                ))
            })
    }

    /// Resolve the caller and the proposal for a client-side decision,
    /// enforcing that the caller owns the proposal's job.
    async fn owned_decision(
        &self,
        subject: &ExternalId,
        proposal_id: Uuid,
    ) -> Result<(User, Proposal, Job), Error> {
        let client = resolve_user(self.users.as_ref(), subject).await?;
        require_role(&client, UserRole::Client)?;
        let proposal = self.load_proposal(proposal_id).await?;
        let job = self.load_parent_job(&proposal).await?;
        if job.client_id != client.id {
            return Err(proposal_not_found(proposal_id));
        }
        Ok((client, proposal, job))
    }

    fn check_transition(proposal: &Proposal, next: ProposalStatus) -> Result<(), Error> {
        proposal
            .status
            .transition_to(next)
            .map(|_| ())
            .map_err(|err| Error::invalid_state(err.to_string()))
    }
}

#[async_trait]
impl<P, J, U, C> ProposalsCommand for ProposalService<P, J, U, C>
where
    P: ProposalRepository,
    J: JobRepository,
    U: UserRepository,
    C: ListingInvalidation,
{
    async fn submit(&self, request: SubmitProposalRequest) -> Result<Proposal, Error> {
        let freelancer = resolve_user(self.users.as_ref(), &request.subject).await?;
        require_role(&freelancer, UserRole::Freelancer)?;

        let job = self
            .jobs
            .find_by_id(request.job_id)
            .await
            .map_err(map_job_repo_error)?
            .ok_or_else(|| {
                Error::not_found("job not found").with_details(json!({ "jobId": request.job_id }))
            })?;
        if job.client_id == freelancer.id {
            return Err(Error::forbidden("cannot propose on your own job"));
        }
        if job.status != JobStatus::Open || job.assigned_freelancer_id.is_some() {
            return Err(Error::invalid_state("job is not accepting proposals")
                .with_details(json!({ "jobId": job.id, "status": job.status })));
        }

        let fields = ProposalFields::try_new(&request.cover_letter, request.proposed_price)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let already_active = self
            .proposals
            .has_active_for(job.id, freelancer.id)
            .await
            .map_err(map_proposal_repo_error)?;
        if already_active {
            return Err(Error::conflict("an active proposal for this job already exists")
                .with_details(json!({ "jobId": job.id })));
        }

        let proposal = Proposal {
            id: Uuid::new_v4(),
            job_id: job.id,
            freelancer_id: freelancer.id,
            cover_letter: fields.cover_letter().to_owned(),
            proposed_price: fields.proposed_price(),
            status: ProposalStatus::Pending,
            created_at: self.clock.utc(),
        };
        self.proposals
            .insert(&proposal)
            .await
            .map_err(map_proposal_repo_error)?;
        self.invalidation
            .invalidate(&[ListingTag::OpenJobs, ListingTag::Job(job.id)]);
        info!(proposal_id = %proposal.id, job_id = %job.id, "proposal submitted");
        Ok(proposal)
    }

    async fn accept(
        &self,
        subject: ExternalId,
        proposal_id: Uuid,
    ) -> Result<AcceptOutcome, Error> {
        let (client, proposal, job) = self.owned_decision(&subject, proposal_id).await?;
        Self::check_transition(&proposal, ProposalStatus::Accepted)?;

        let (accepted, assigned_job, rejected_siblings) = match self
            .proposals
            .accept_and_assign(proposal.id, job.id, proposal.freelancer_id)
            .await
            .map_err(map_proposal_repo_error)?
        {
            AcceptanceOutcome::Accepted {
                proposal,
                job,
                rejected_siblings,
            } => (proposal, job, rejected_siblings),
            AcceptanceOutcome::JobUnavailable => {
                return Err(Error::conflict("job is already assigned")
                    .with_details(json!({ "jobId": job.id })));
            }
            AcceptanceOutcome::JobNotFound => return Err(proposal_not_found(proposal_id)),
        };

        self.invalidation.invalidate(&[
            ListingTag::ClientJobs(client.id),
            ListingTag::OpenJobs,
            ListingTag::Job(job.id),
        ]);
        info!(
            proposal_id = %accepted.id,
            job_id = %assigned_job.id,
            freelancer_id = %accepted.freelancer_id,
            rejected_siblings,
            "proposal accepted, job assigned"
        );
        Ok(AcceptOutcome {
            proposal: accepted,
            job: assigned_job,
            rejected_siblings,
        })
    }

    async fn reject(&self, subject: ExternalId, proposal_id: Uuid) -> Result<Proposal, Error> {
        let (_, proposal, job) = self.owned_decision(&subject, proposal_id).await?;
        Self::check_transition(&proposal, ProposalStatus::Rejected)?;

        let rejected = self
            .proposals
            .update_status(proposal.id, ProposalStatus::Rejected)
            .await
            .map_err(map_proposal_repo_error)?;
        self.invalidation.invalidate(&[ListingTag::Job(job.id)]);
        info!(proposal_id = %rejected.id, job_id = %job.id, "proposal rejected");
        Ok(rejected)
    }

    async fn withdraw(&self, subject: ExternalId, proposal_id: Uuid) -> Result<Proposal, Error> {
        let freelancer = resolve_user(self.users.as_ref(), &subject).await?;
        require_role(&freelancer, UserRole::Freelancer)?;
        let proposal = self.load_proposal(proposal_id).await?;
        if proposal.freelancer_id != freelancer.id {
            return Err(proposal_not_found(proposal_id));
        }
        Self::check_transition(&proposal, ProposalStatus::Withdrawn)?;

        let withdrawn = self
            .proposals
            .update_status(proposal.id, ProposalStatus::Withdrawn)
            .await
            .map_err(map_proposal_repo_error)?;
        self.invalidation
            .invalidate(&[ListingTag::OpenJobs, ListingTag::Job(proposal.job_id)]);
        info!(proposal_id = %withdrawn.id, "proposal withdrawn");
        Ok(withdrawn)
    }
}

#[cfg(test)]
#[path = "proposal_service_tests.rs"]
mod tests;
