//! Driving port for the proposal lifecycle.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, ExternalId, Job, Proposal};

/// Request to submit a proposal against an open job.
#[derive(Debug, Clone)]
pub struct SubmitProposalRequest {
    /// Verified subject of the calling freelancer.
    pub subject: ExternalId,
    /// Target job; must exist and be open.
    pub job_id: Uuid,
    /// Pitch text.
    pub cover_letter: String,
    /// Asking price.
    pub proposed_price: f64,
}

/// Result of accepting a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOutcome {
    /// The accepted proposal.
    pub proposal: Proposal,
    /// The job after assignment: assigned to the proposal's freelancer,
    /// status `IN_PROGRESS`.
    pub job: Job,
    /// How many sibling pending proposals were auto-rejected.
    pub rejected_siblings: u64,
}

/// Domain use-case port for proposal mutations.
#[async_trait]
pub trait ProposalsCommand: Send + Sync {
    /// Submit a pending proposal. Requires role `FREELANCER`, an open
    /// unowned job, and no existing active proposal by the caller on it.
    async fn submit(&self, request: SubmitProposalRequest) -> Result<Proposal, Error>;

    /// Accept a proposal on a job the caller owns. Assigns the job via an
    /// atomic conditional update and auto-rejects sibling pending
    /// proposals; a lost race surfaces as a conflict.
    async fn accept(
        &self,
        subject: ExternalId,
        proposal_id: Uuid,
    ) -> Result<AcceptOutcome, Error>;

    /// Reject a pending proposal on a job the caller owns.
    async fn reject(&self, subject: ExternalId, proposal_id: Uuid) -> Result<Proposal, Error>;

    /// Withdraw the caller's own pending proposal.
    async fn withdraw(&self, subject: ExternalId, proposal_id: Uuid) -> Result<Proposal, Error>;
}
