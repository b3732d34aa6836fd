//! Test helpers for inbound HTTP components.
//!
//! Handler tests run the full stack below the transport: real domain
//! services over fresh in-memory repositories, so assertions exercise the
//! same gates production traffic hits.

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test as actix_test, web, App, Error};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::UserRole;
use crate::inbound::http::api_scope;
use crate::middleware::Correlate;
use crate::server::state_builders::build_memory_state;

/// Identity header name, re-exported for terse test requests.
pub(crate) const IDENTITY: &str = super::identity::IDENTITY_HEADER;

/// Build an application over a fresh in-memory state.
pub(crate) fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(build_memory_state()))
        .wrap(Correlate)
        .service(api_scope())
}

/// Initialise a ready-to-call service over a fresh in-memory state.
pub(crate) async fn spawn_app(
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    actix_test::init_service(test_app()).await
}

/// Onboard `subject` with the given role, returning the stored profile.
pub(crate) async fn onboard(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
    subject: &str,
    role: UserRole,
) -> Value {
    let body = match role {
        UserRole::Client => json!({
            "email": format!("{subject}@example.com"),
            "name": "John Client",
            "role": "CLIENT"
        }),
        UserRole::Freelancer => json!({
            "email": format!("{subject}@example.com"),
            "name": "Jane Freelancer",
            "role": "FREELANCER",
            "bio": "Experienced full-stack developer.",
            "skills": ["React", "Node.js"],
            "hourlyRate": 50.0
        }),
    };
    let request = actix_test::TestRequest::post()
        .uri("/api/onboard-user")
        .insert_header((IDENTITY, subject))
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(
        response.status().is_success(),
        "onboarding {subject} failed with {}",
        response.status()
    );
    actix_test::read_body_json(response).await
}

/// Create a job as `subject` (already onboarded as a client) and return
/// its identifier.
pub(crate) async fn create_job(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
    subject: &str,
    skills: &[&str],
) -> Uuid {
    let request = actix_test::TestRequest::post()
        .uri("/api/jobs/my-jobs")
        .insert_header((IDENTITY, subject))
        .set_json(json!({
            "title": "Portfolio Website",
            "description": "Need help building a portfolio website.",
            "budget": 500.0,
            "requiredSkills": skills
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(
        response.status().is_success(),
        "job creation failed with {}",
        response.status()
    );
    let body: Value = actix_test::read_body_json(response).await;
    body["id"]
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .expect("job id in response")
}

/// Submit a proposal as `subject` against `job_id`, returning its
/// identifier.
pub(crate) async fn submit_proposal(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
    subject: &str,
    job_id: Uuid,
) -> Uuid {
    let request = actix_test::TestRequest::post()
        .uri("/api/proposals")
        .insert_header((IDENTITY, subject))
        .set_json(json!({
            "jobId": job_id,
            "coverLetter": "I can build this in 3 days.",
            "proposedPrice": 450.0
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(
        response.status().is_success(),
        "proposal submission failed with {}",
        response.status()
    );
    let body: Value = actix_test::read_body_json(response).await;
    body["id"]
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .expect("proposal id in response")
}
