//! Domain model and services for the marketplace.
//!
//! Purpose: Define strongly typed entities (users, jobs, proposals), the
//! driving and driven ports, and the services that enforce the business
//! rules — role gates, ownership gates, the proposal state machine, and
//! the atomic job assignment. Types are plain data; every rule lives in a
//! service behind a driving port so inbound adapters stay thin.

pub mod error;
pub mod freelancer_views;
pub mod job;
pub mod job_service;
pub mod onboarding_service;
pub mod ports;
pub mod proposal;
pub mod proposal_service;
pub(crate) mod service_support;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::freelancer_views::FreelancerViewService;
pub use self::job::{Job, JobFields, JobStatus, JobValidationError};
pub use self::job_service::JobService;
pub use self::onboarding_service::OnboardingService;
pub use self::proposal::{
    Proposal, ProposalFields, ProposalStatus, ProposalTransitionError, ProposalValidationError,
};
pub use self::proposal_service::ProposalService;
pub use self::user::{
    normalize_skills, ExternalId, OnboardingInput, OnboardingProfile, User, UserRole,
    UserValidationError,
};
