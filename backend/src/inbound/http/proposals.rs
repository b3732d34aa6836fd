//! Proposal lifecycle API handlers.
//!
//! Freelancers pitch against open jobs under `/api/proposals`; the owning
//! client decides under `/api/proposals/{id}/accept|reject`. Acceptance
//! rides on the atomic assignment in the domain layer, so a lost race
//! surfaces here as a 409 rather than a double award.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{AcceptOutcome, SubmitProposalRequest};
use crate::domain::Proposal;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/proposals`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProposalBody {
    /// Target job; must exist and be open.
    pub job_id: Uuid,
    /// Pitch text.
    pub cover_letter: String,
    /// Asking price.
    pub proposed_price: f64,
}

/// Submit a pending proposal against an open job.
#[utoipa::path(
    post,
    path = "/api/proposals",
    request_body = SubmitProposalBody,
    responses(
        (status = 200, description = "Pending proposal created", body = Proposal),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a freelancer", body = crate::domain::Error),
        (status = 404, description = "Job not found", body = crate::domain::Error),
        (status = 409, description = "Active proposal already exists or job not open", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["proposals"],
    operation_id = "submitProposal"
)]
#[post("/proposals")]
pub async fn submit_proposal(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<SubmitProposalBody>,
) -> ApiResult<web::Json<Proposal>> {
    let body = payload.into_inner();
    let proposal = state
        .proposals
        .submit(SubmitProposalRequest {
            subject: identity.into_subject(),
            job_id: body.job_id,
            cover_letter: body.cover_letter,
            proposed_price: body.proposed_price,
        })
        .await?;
    Ok(web::Json(proposal))
}

/// Accept a proposal on a job the caller owns.
#[utoipa::path(
    post,
    path = "/api/proposals/{id}/accept",
    params(("id" = Uuid, Path, description = "Proposal identifier")),
    responses(
        (status = 200, description = "Proposal accepted; job assigned", body = AcceptOutcome),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a client", body = crate::domain::Error),
        (status = 404, description = "Proposal not found or job not owned", body = crate::domain::Error),
        (status = 409, description = "Job already assigned or proposal not pending", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["proposals"],
    operation_id = "acceptProposal"
)]
#[post("/proposals/{id}/accept")]
pub async fn accept_proposal(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<AcceptOutcome>> {
    let outcome = state
        .proposals
        .accept(identity.into_subject(), path.into_inner())
        .await?;
    Ok(web::Json(outcome))
}

/// Reject a pending proposal on a job the caller owns.
#[utoipa::path(
    post,
    path = "/api/proposals/{id}/reject",
    params(("id" = Uuid, Path, description = "Proposal identifier")),
    responses(
        (status = 200, description = "Proposal rejected", body = Proposal),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a client", body = crate::domain::Error),
        (status = 404, description = "Proposal not found or job not owned", body = crate::domain::Error),
        (status = 409, description = "Proposal not pending", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["proposals"],
    operation_id = "rejectProposal"
)]
#[post("/proposals/{id}/reject")]
pub async fn reject_proposal(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Proposal>> {
    let proposal = state
        .proposals
        .reject(identity.into_subject(), path.into_inner())
        .await?;
    Ok(web::Json(proposal))
}

/// Withdraw the caller's own pending proposal.
#[utoipa::path(
    post,
    path = "/api/proposals/{id}/withdraw",
    params(("id" = Uuid, Path, description = "Proposal identifier")),
    responses(
        (status = 200, description = "Proposal withdrawn", body = Proposal),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a freelancer", body = crate::domain::Error),
        (status = 404, description = "Proposal not found or not the caller's", body = crate::domain::Error),
        (status = 409, description = "Proposal not pending", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["proposals"],
    operation_id = "withdrawProposal"
)]
#[post("/proposals/{id}/withdraw")]
pub async fn withdraw_proposal(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Proposal>> {
    let proposal = state
        .proposals
        .withdraw(identity.into_subject(), path.into_inner())
        .await?;
    Ok(web::Json(proposal))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{json, Value};

    use crate::domain::UserRole;
    use crate::inbound::http::test_support::{
        create_job, onboard, spawn_app, submit_proposal, IDENTITY,
    };

    #[actix_web::test]
    async fn a_freelancer_submits_a_pending_proposal() {
        let app = spawn_app().await;
        onboard(&app, "user_client", UserRole::Client).await;
        onboard(&app, "user_free", UserRole::Freelancer).await;
        let job_id = create_job(&app, "user_client", &["React"]).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/proposals")
            .insert_header((IDENTITY, "user_free"))
            .set_json(json!({
                "jobId": job_id,
                "coverLetter": "I can build this in 3 days.",
                "proposedPrice": 450.0
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], json!("PENDING"));
        assert_eq!(body["jobId"], json!(job_id));
    }

    #[actix_web::test]
    async fn a_second_active_proposal_conflicts() {
        let app = spawn_app().await;
        onboard(&app, "user_client", UserRole::Client).await;
        onboard(&app, "user_free", UserRole::Freelancer).await;
        let job_id = create_job(&app, "user_client", &["React"]).await;
        submit_proposal(&app, "user_free", job_id).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/proposals")
            .insert_header((IDENTITY, "user_free"))
            .set_json(json!({
                "jobId": job_id,
                "coverLetter": "Second thoughts, lower price.",
                "proposedPrice": 400.0
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], json!("conflict"));
    }

    #[actix_web::test]
    async fn accepting_assigns_the_job_and_rejects_siblings() {
        let app = spawn_app().await;
        onboard(&app, "user_client", UserRole::Client).await;
        onboard(&app, "user_free_a", UserRole::Freelancer).await;
        onboard(&app, "user_free_b", UserRole::Freelancer).await;
        let job_id = create_job(&app, "user_client", &["React"]).await;
        let winner = submit_proposal(&app, "user_free_a", job_id).await;
        submit_proposal(&app, "user_free_b", job_id).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/proposals/{winner}/accept"))
            .insert_header((IDENTITY, "user_client"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["proposal"]["status"], json!("ACCEPTED"));
        assert_eq!(body["job"]["status"], json!("IN_PROGRESS"));
        assert_eq!(body["rejectedSiblings"], json!(1));
    }

    #[actix_web::test]
    async fn accepting_a_second_proposal_conflicts() {
        let app = spawn_app().await;
        onboard(&app, "user_client", UserRole::Client).await;
        onboard(&app, "user_free_a", UserRole::Freelancer).await;
        onboard(&app, "user_free_b", UserRole::Freelancer).await;
        let job_id = create_job(&app, "user_client", &["React"]).await;
        let first = submit_proposal(&app, "user_free_a", job_id).await;
        let second = submit_proposal(&app, "user_free_b", job_id).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/proposals/{first}/accept"))
            .insert_header((IDENTITY, "user_client"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        // The sibling was auto-rejected, so the retry fails on its state.
        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/proposals/{second}/accept"))
            .insert_header((IDENTITY, "user_client"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], json!("invalid_state"));
    }

    #[actix_web::test]
    async fn a_stranger_cannot_decide_on_the_proposal() {
        let app = spawn_app().await;
        onboard(&app, "user_client", UserRole::Client).await;
        onboard(&app, "user_other", UserRole::Client).await;
        onboard(&app, "user_free", UserRole::Freelancer).await;
        let job_id = create_job(&app, "user_client", &["React"]).await;
        let proposal_id = submit_proposal(&app, "user_free", job_id).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/proposals/{proposal_id}/reject"))
            .insert_header((IDENTITY, "user_other"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn a_freelancer_withdraws_their_own_proposal() {
        let app = spawn_app().await;
        onboard(&app, "user_client", UserRole::Client).await;
        onboard(&app, "user_free", UserRole::Freelancer).await;
        let job_id = create_job(&app, "user_client", &["React"]).await;
        let proposal_id = submit_proposal(&app, "user_free", job_id).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/proposals/{proposal_id}/withdraw"))
            .insert_header((IDENTITY, "user_free"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], json!("WITHDRAWN"));
    }
}
