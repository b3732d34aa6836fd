//! Freelancer-facing read API handlers.

use actix_web::{get, web};

use crate::domain::ports::FreelancerDashboard;
use crate::domain::Job;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Open jobs matching the caller's skills that the caller has not
/// proposed on, newest-first.
#[utoipa::path(
    get,
    path = "/api/freelancer/recommended-jobs",
    responses(
        (status = 200, description = "Matching open jobs, newest-first", body = [Job]),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 403, description = "Caller is not a freelancer", body = crate::domain::Error),
        (status = 404, description = "No profile for this identity", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["freelancer"],
    operation_id = "recommendedJobs"
)]
#[get("/freelancer/recommended-jobs")]
pub async fn recommended_jobs(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Job>>> {
    let jobs = state
        .freelancer
        .recommended_jobs(identity.into_subject())
        .await?;
    Ok(web::Json(jobs))
}

/// Assigned jobs and own proposals for the caller's dashboard.
#[utoipa::path(
    get,
    path = "/api/freelancer/dashboard",
    responses(
        (status = 200, description = "Dashboard payload", body = FreelancerDashboard),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 404, description = "No profile for this identity", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["freelancer"],
    operation_id = "freelancerDashboard"
)]
#[get("/freelancer/dashboard")]
pub async fn dashboard(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<FreelancerDashboard>> {
    let dashboard = state.freelancer.dashboard(identity.into_subject()).await?;
    Ok(web::Json(dashboard))
}
