//! Shared helpers for domain services: repository error mapping and the
//! authentication/role predicates evaluated before every gated operation.

use serde_json::json;

use crate::domain::ports::{
    JobRepositoryError, ProposalRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, ExternalId, User, UserRole, UserValidationError};

/// Map user repository faults to the domain taxonomy.
pub(crate) fn map_user_repo_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Map job repository faults to the domain taxonomy.
pub(crate) fn map_job_repo_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::internal(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

/// Map proposal repository faults to the domain taxonomy.
pub(crate) fn map_proposal_repo_error(error: ProposalRepositoryError) -> Error {
    match error {
        ProposalRepositoryError::Connection { message } => {
            Error::internal(format!("proposal repository unavailable: {message}"))
        }
        ProposalRepositoryError::Query { message } => {
            Error::internal(format!("proposal repository error: {message}"))
        }
        ProposalRepositoryError::NotFound { proposal_id } => {
            Error::not_found("proposal not found").with_details(json!({
                "proposalId": proposal_id,
            }))
        }
    }
}

/// Map user input validation failures to an invalid-request error.
pub(crate) fn map_user_validation_error(error: UserValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Resolve a verified subject to its local profile.
///
/// A subject the identity provider vouches for but that has no local
/// record has not onboarded; gated operations treat it as unauthenticated.
pub(crate) async fn resolve_user<U: UserRepository + ?Sized>(
    users: &U,
    subject: &ExternalId,
) -> Result<User, Error> {
    users
        .find_by_external_id(subject)
        .await
        .map_err(map_user_repo_error)?
        .ok_or_else(|| Error::unauthorized("no profile for this identity; complete onboarding"))
}

/// Require the resolved user to hold the expected role.
pub(crate) fn require_role(user: &User, expected: UserRole) -> Result<(), Error> {
    if user.role == Some(expected) {
        Ok(())
    } else {
        Err(
            Error::forbidden(format!("{expected} role required")).with_details(json!({
                "requiredRole": expected,
            })),
        )
    }
}

/// Not-found-shaped error used for every ownership failure so callers
/// cannot distinguish "absent" from "owned by someone else".
pub(crate) fn job_not_found(job_id: uuid::Uuid) -> Error {
    Error::not_found("job not found or not owned by caller").with_details(json!({
        "jobId": job_id,
    }))
}
