//! Domain ports: driving use-case traits consumed by inbound adapters and
//! driven persistence/invalidation traits implemented by outbound adapters.

pub mod freelancer;
pub mod job_repository;
pub mod jobs;
pub mod listing_invalidation;
pub mod onboarding;
pub mod proposal_repository;
pub mod proposals;
pub mod user_repository;

pub use freelancer::{FreelancerDashboard, FreelancerQuery, ProposalWithJob};
pub use job_repository::{JobRepository, JobRepositoryError};
pub use jobs::{CreateJobRequest, JobsCommand, JobsQuery, UpdateJobRequest};
pub use listing_invalidation::{ListingInvalidation, ListingTag};
pub use onboarding::{OnboardOutcome, OnboardRequest, OnboardingCommand};
pub use proposal_repository::{AcceptanceOutcome, ProposalRepository, ProposalRepositoryError};
pub use proposals::{AcceptOutcome, ProposalsCommand, SubmitProposalRequest};
pub use user_repository::{UserRepository, UserRepositoryError};

#[cfg(test)]
pub use job_repository::MockJobRepository;
#[cfg(test)]
pub use listing_invalidation::MockListingInvalidation;
#[cfg(test)]
pub use proposal_repository::MockProposalRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
