//! Builders wiring repositories, services, and the HTTP state bundle.
//!
//! Two flavours: a Diesel-backed state for production and an in-memory
//! state for local development and HTTP adapter tests. Both wire the same
//! domain services, so behaviour differs only in storage.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::{FreelancerViewService, JobService, OnboardingService, ProposalService};
use crate::inbound::http::state::HttpState;
use crate::outbound::cache::LoggingInvalidation;
use crate::outbound::persistence::memory::{
    MemoryJobRepository, MemoryProposalRepository, MemoryStore, MemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselJobRepository, DieselProposalRepository, DieselUserRepository,
};

fn assemble<J, P, U>(jobs: Arc<J>, proposals: Arc<P>, users: Arc<U>) -> HttpState
where
    J: crate::domain::ports::JobRepository + 'static,
    P: crate::domain::ports::ProposalRepository + 'static,
    U: crate::domain::ports::UserRepository + 'static,
{
    let invalidation = Arc::new(LoggingInvalidation::new());
    let clock = Arc::new(DefaultClock);

    let onboarding = OnboardingService::new(Arc::clone(&users), clock.clone());
    let job_service = Arc::new(JobService::new(
        Arc::clone(&jobs),
        Arc::clone(&proposals),
        Arc::clone(&users),
        Arc::clone(&invalidation),
        clock.clone(),
    ));
    let proposal_service = ProposalService::new(
        Arc::clone(&proposals),
        Arc::clone(&jobs),
        Arc::clone(&users),
        invalidation,
        clock,
    );
    let freelancer = FreelancerViewService::new(jobs, proposals, users);

    HttpState {
        onboarding: Arc::new(onboarding),
        jobs: Arc::clone(&job_service) as Arc<dyn crate::domain::ports::JobsCommand>,
        jobs_query: job_service,
        proposals: Arc::new(proposal_service),
        freelancer: Arc::new(freelancer),
    }
}

/// Build HTTP state over PostgreSQL repositories.
pub fn build_diesel_state(pool: &DbPool) -> HttpState {
    assemble(
        Arc::new(DieselJobRepository::new(pool.clone())),
        Arc::new(DieselProposalRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
    )
}

/// Build HTTP state over mutex-guarded in-memory repositories.
///
/// Every call creates a fresh, empty store.
pub fn build_memory_state() -> HttpState {
    let store = MemoryStore::new();
    assemble(
        Arc::new(MemoryJobRepository::new(Arc::clone(&store))),
        Arc::new(MemoryProposalRepository::new(Arc::clone(&store))),
        Arc::new(MemoryUserRepository::new(store)),
    )
}
