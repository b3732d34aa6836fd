//! Port abstraction for job persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Job, JobFields, JobStatus};

/// Persistence errors raised by job repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobRepositoryError {
    /// Repository connection could not be established.
    #[error("job repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("job repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl JobRepositoryError {
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
}

/// Driven port for job persistence.
///
/// Assignment is not exposed here: it happens inside the proposal
/// repository's transactional acceptance so the job and proposal writes
/// share one atomic unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a fully formed job record.
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError>;

    /// Fetch a job by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobRepositoryError>;

    /// Jobs owned by one client, newest-first.
    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, JobRepositoryError>;

    /// Replace the mutable field set of a job and return the updated row.
    async fn update_fields(
        &self,
        job_id: Uuid,
        fields: &JobFields,
        status: JobStatus,
    ) -> Result<Job, JobRepositoryError>;

    /// Hard-delete a job; proposals cascade. Returns whether a row existed.
    async fn delete(&self, job_id: Uuid) -> Result<bool, JobRepositoryError>;

    /// Unassigned jobs whose required skills intersect `skills` and that
    /// `freelancer_id` has not proposed on, newest-first.
    async fn list_recommended(
        &self,
        skills: &[String],
        freelancer_id: Uuid,
    ) -> Result<Vec<Job>, JobRepositoryError>;

    /// Jobs assigned to one freelancer, newest-first.
    async fn list_assigned(&self, freelancer_id: Uuid) -> Result<Vec<Job>, JobRepositoryError>;
}
