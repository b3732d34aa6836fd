//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] assembles the specification from the inbound handlers'
//! `#[utoipa::path]` annotations and the domain schemas they reference.
//! Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{AcceptOutcome, FreelancerDashboard, ProposalWithJob};
use crate::domain::{Error, ErrorCode, Job, JobStatus, Proposal, ProposalStatus, User, UserRole};
use crate::inbound::http::jobs::{CreateJobBody, DeletionConfirmation, UpdateJobBody};
use crate::inbound::http::onboarding::OnboardBody;
use crate::inbound::http::proposals::SubmitProposalBody;

/// Enrich the generated document with the identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "IdentitySubject",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                crate::inbound::http::IDENTITY_HEADER,
                "Verified identity subject injected by the authenticating proxy.",
            ))),
        );
    }
}

/// OpenAPI document for the marketplace REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Freelance marketplace API",
        description = "HTTP interface for onboarding, job postings, proposals, \
                       and freelancer views."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("IdentitySubject" = [])),
    paths(
        crate::inbound::http::onboarding::onboard_user,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::list_my_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::jobs::list_job_proposals,
        crate::inbound::http::proposals::submit_proposal,
        crate::inbound::http::proposals::accept_proposal,
        crate::inbound::http::proposals::reject_proposal,
        crate::inbound::http::proposals::withdraw_proposal,
        crate::inbound::http::freelancer::recommended_jobs,
        crate::inbound::http::freelancer::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserRole,
        Job,
        JobStatus,
        Proposal,
        ProposalStatus,
        Error,
        ErrorCode,
        AcceptOutcome,
        ProposalWithJob,
        FreelancerDashboard,
        OnboardBody,
        CreateJobBody,
        UpdateJobBody,
        DeletionConfirmation,
        SubmitProposalBody,
    )),
    tags(
        (name = "onboarding", description = "Identity-to-profile binding"),
        (name = "jobs", description = "Client job postings"),
        (name = "proposals", description = "Freelancer proposals and client decisions"),
        (name = "freelancer", description = "Freelancer-facing reads"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
