//! HTTP adapter: handlers, identity extraction, and the error envelope
//! that map transport concerns onto the domain ports.

pub mod error;
pub mod freelancer;
pub mod health;
pub mod identity;
pub mod jobs;
pub mod onboarding;
pub mod proposals;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApiResult, REQUEST_ID_HEADER};
pub use health::HealthState;
pub use identity::{Identity, IDENTITY_HEADER};
pub use state::HttpState;

/// All marketplace routes, mounted under `/api`.
pub fn api_scope() -> actix_web::Scope {
    actix_web::web::scope("/api")
        .service(onboarding::onboard_user)
        .service(jobs::create_job)
        .service(jobs::list_my_jobs)
        .service(jobs::list_job_proposals)
        .service(jobs::get_job)
        .service(jobs::update_job)
        .service(jobs::delete_job)
        .service(proposals::submit_proposal)
        .service(proposals::accept_proposal)
        .service(proposals::reject_proposal)
        .service(proposals::withdraw_proposal)
        .service(freelancer::recommended_jobs)
        .service(freelancer::dashboard)
}
