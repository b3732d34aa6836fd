//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ExternalId, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl UserRepositoryError {
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

/// Driven port for user persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or fully update a user record, keyed on `external_id`.
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by local identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by identity-provider subject.
    async fn find_by_external_id(
        &self,
        subject: &ExternalId,
    ) -> Result<Option<User>, UserRepositoryError>;
}
