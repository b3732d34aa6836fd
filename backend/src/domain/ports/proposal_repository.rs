//! Port abstraction for proposal persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Job, Proposal, ProposalStatus};

/// Result of the transactional acceptance update.
///
/// Acceptance must be a single atomic unit at the storage layer: the
/// compare-and-set on the job, the winner's status change, and the
/// rejection of pending siblings either all apply or none do. A second
/// concurrent accept observes [`AcceptanceOutcome::JobUnavailable`]
/// instead of overwriting the first winner.
#[derive(Debug, Clone, PartialEq)]
pub enum AcceptanceOutcome {
    /// The job was open and unassigned; every write applied.
    Accepted {
        /// The winning proposal, now accepted.
        proposal: Proposal,
        /// The job, now assigned and in progress.
        job: Job,
        /// How many pending sibling proposals were rejected.
        rejected_siblings: u64,
    },
    /// Another freelancer already holds the assignment, or the job left
    /// the open state.
    JobUnavailable,
    /// No job with that id exists.
    JobNotFound,
}

/// Persistence errors raised by proposal repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProposalRepositoryError {
    /// Repository connection could not be established.
    #[error("proposal repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("proposal repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// The targeted proposal does not exist.
    #[error("proposal {proposal_id} not found")]
    NotFound {
        /// Identifier that matched no row.
        proposal_id: Uuid,
    },
}

impl ProposalRepositoryError {
    /// Connection-level failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-level failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Missing-row failure.
    pub fn not_found(proposal_id: Uuid) -> Self {
        Self::NotFound { proposal_id }
    }
}

/// Driven port for proposal persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Insert a fully formed proposal record.
    async fn insert(&self, proposal: &Proposal) -> Result<(), ProposalRepositoryError>;

    /// Fetch a proposal by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Proposal>, ProposalRepositoryError>;

    /// Whether the freelancer holds an active (pending or accepted)
    /// proposal on the job.
    async fn has_active_for(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<bool, ProposalRepositoryError>;

    /// Set a proposal's status and return the updated row.
    async fn update_status(
        &self,
        id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, ProposalRepositoryError>;

    /// Atomically assign `freelancer_id` to a still-open, unassigned job,
    /// accept the winning proposal, and reject its pending siblings.
    async fn accept_and_assign(
        &self,
        winner_id: Uuid,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<AcceptanceOutcome, ProposalRepositoryError>;

    /// Proposals submitted by one freelancer, each joined with its job,
    /// newest-first.
    async fn list_by_freelancer_with_jobs(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<(Proposal, Job)>, ProposalRepositoryError>;

    /// Proposals targeting one job, newest-first.
    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, ProposalRepositoryError>;
}
