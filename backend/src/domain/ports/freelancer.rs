//! Driving port for freelancer-facing reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ExternalId, Job, Proposal};

/// One of the caller's proposals paired with the job it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalWithJob {
    /// The proposal itself.
    #[serde(flatten)]
    pub proposal: Proposal,
    /// The job the proposal targets.
    pub job: Job,
}

/// Aggregate payload for the freelancer dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerDashboard {
    /// Jobs assigned to the caller, newest-first.
    pub assigned_jobs: Vec<Job>,
    /// The caller's proposals with their jobs, newest-first.
    pub proposals: Vec<ProposalWithJob>,
}

/// Domain use-case port for freelancer reads.
#[async_trait]
pub trait FreelancerQuery: Send + Sync {
    /// Open, unassigned jobs matching at least one of the caller's skills
    /// that the caller has not proposed on, newest-first. Requires role
    /// `FREELANCER`. Binary inclusion filter; no ranking.
    async fn recommended_jobs(&self, subject: ExternalId) -> Result<Vec<Job>, Error>;

    /// Assigned jobs and own proposals for the caller's dashboard.
    async fn dashboard(&self, subject: ExternalId) -> Result<FreelancerDashboard, Error>;
}
