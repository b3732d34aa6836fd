//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FreelancerQuery, JobsCommand, JobsQuery, OnboardingCommand, ProposalsCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Identity bridge use-case.
    pub onboarding: Arc<dyn OnboardingCommand>,
    /// Job mutations.
    pub jobs: Arc<dyn JobsCommand>,
    /// Job reads.
    pub jobs_query: Arc<dyn JobsQuery>,
    /// Proposal lifecycle.
    pub proposals: Arc<dyn ProposalsCommand>,
    /// Freelancer-facing reads.
    pub freelancer: Arc<dyn FreelancerQuery>,
}
