//! Job lifecycle API handlers.
//!
//! Clients manage their own postings under `/api/jobs/my-jobs`. Reads of a
//! single posting are open to any caller holding its id; every mutation is
//! gated on ownership, with foreign jobs answered as not-found.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{CreateJobRequest, UpdateJobRequest};
use crate::domain::{Job, JobStatus, Proposal};
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/jobs/my-jobs`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobBody {
    /// Job title.
    pub title: String,
    /// Job description.
    pub description: String,
    /// Offered budget.
    pub budget: f64,
    /// Skills required of applicants.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Optional completion deadline.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Request body for `PATCH /api/jobs/my-jobs/{id}`.
///
/// The contract requires the full field set; partial patches are rejected.
/// `status` defaults to the stored value, and an omitted `deadline` clears
/// any stored one.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New budget.
    #[serde(default)]
    pub budget: Option<f64>,
    /// New skill list.
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
    /// New lifecycle status.
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// New deadline.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Confirmation body returned by `DELETE /api/jobs/my-jobs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionConfirmation {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the removed job.
    pub job_id: Uuid,
}

/// Create a job owned by the calling client.
#[utoipa::path(
    post,
    path = "/api/jobs/my-jobs",
    request_body = CreateJobBody,
    responses(
        (status = 200, description = "Job created", body = Job),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a client", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/jobs/my-jobs")]
pub async fn create_job(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateJobBody>,
) -> ApiResult<web::Json<Job>> {
    let body = payload.into_inner();
    let job = state
        .jobs
        .create_job(CreateJobRequest {
            subject: identity.into_subject(),
            title: body.title,
            description: body.description,
            budget: body.budget,
            required_skills: body.required_skills,
            deadline: body.deadline,
        })
        .await?;
    Ok(web::Json(job))
}

/// List jobs owned by the calling client, newest-first.
#[utoipa::path(
    get,
    path = "/api/jobs/my-jobs",
    responses(
        (status = 200, description = "Owned jobs, newest-first", body = [Job]),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["jobs"],
    operation_id = "listMyJobs"
)]
#[get("/jobs/my-jobs")]
pub async fn list_my_jobs(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Job>>> {
    let jobs = state.jobs_query.list_owned(identity.into_subject()).await?;
    Ok(web::Json(jobs))
}

/// Fetch one job by id. Open to any caller; an absent job is a `null`
/// body, not an error.
#[utoipa::path(
    get,
    path = "/api/jobs/my-jobs/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "The job, or null when absent", body = Option<Job>),
        (status = 500, description = "Internal server error")
    ),
    tags = ["jobs"],
    operation_id = "getJob"
)]
#[get("/jobs/my-jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Option<Job>>> {
    let job = state.jobs_query.get_job(path.into_inner()).await?;
    Ok(web::Json(job))
}

/// Update a job owned by the calling client.
#[utoipa::path(
    patch,
    path = "/api/jobs/my-jobs/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    request_body = UpdateJobBody,
    responses(
        (status = 200, description = "Updated job", body = Job),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a client", body = crate::domain::Error),
        (status = 404, description = "Job not found or not owned", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["jobs"],
    operation_id = "updateJob"
)]
#[patch("/jobs/my-jobs/{id}")]
pub async fn update_job(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateJobBody>,
) -> ApiResult<web::Json<Job>> {
    let body = payload.into_inner();
    let job = state
        .jobs
        .update_job(UpdateJobRequest {
            subject: identity.into_subject(),
            job_id: path.into_inner(),
            title: body.title,
            description: body.description,
            budget: body.budget,
            required_skills: body.required_skills,
            status: body.status,
            deadline: body.deadline,
        })
        .await?;
    Ok(web::Json(job))
}

/// Delete a job owned by the calling client. Its proposals cascade.
#[utoipa::path(
    delete,
    path = "/api/jobs/my-jobs/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job deleted", body = DeletionConfirmation),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a client", body = crate::domain::Error),
        (status = 404, description = "Job not found or not owned", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["jobs"],
    operation_id = "deleteJob"
)]
#[delete("/jobs/my-jobs/{id}")]
pub async fn delete_job(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let job_id = path.into_inner();
    state.jobs.delete_job(identity.into_subject(), job_id).await?;
    Ok(HttpResponse::Ok().json(DeletionConfirmation {
        message: "Job deleted successfully".to_owned(),
        job_id,
    }))
}

/// List proposals on a job owned by the calling client, newest-first.
#[utoipa::path(
    get,
    path = "/api/jobs/my-jobs/{id}/proposals",
    params(("id" = Uuid, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Proposals on the job, newest-first", body = [Proposal]),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a client", body = crate::domain::Error),
        (status = 404, description = "Job not found or not owned", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["jobs"],
    operation_id = "listJobProposals"
)]
#[get("/jobs/my-jobs/{id}/proposals")]
pub async fn list_job_proposals(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Proposal>>> {
    let proposals = state
        .jobs_query
        .list_job_proposals(identity.into_subject(), path.into_inner())
        .await?;
    Ok(web::Json(proposals))
}
