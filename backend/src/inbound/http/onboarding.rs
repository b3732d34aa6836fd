//! Onboarding API handler.
//!
//! ```text
//! POST /api/onboard-user {"email":"x@y.z","name":"Jane","role":"FREELANCER",...}
//! ```
//!
//! Binds the verified identity subject to a local marketplace profile.
//! Idempotent: repeating the call for an onboarded subject returns the
//! stored profile unchanged.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::ports::OnboardRequest;
use crate::domain::{OnboardingInput, User};
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Onboarding request body for `POST /api/onboard-user`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardBody {
    /// Contact email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Optional avatar URL.
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Requested role, `CLIENT` or `FREELANCER`.
    pub role: String,
    /// Freelancer biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Freelancer skills.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Freelancer hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

impl From<OnboardBody> for OnboardingInput {
    fn from(body: OnboardBody) -> Self {
        Self {
            email: body.email,
            name: body.name,
            profile_picture: body.profile_picture,
            role: body.role,
            bio: body.bio,
            skills: body.skills,
            hourly_rate: body.hourly_rate,
        }
    }
}

/// Create or return the local profile for the verified caller.
#[utoipa::path(
    post,
    path = "/api/onboard-user",
    request_body = OnboardBody,
    responses(
        (status = 201, description = "Profile created", body = User),
        (status = 200, description = "Already onboarded; stored profile returned", body = User),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "No verified identity", body = crate::domain::Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["onboarding"],
    operation_id = "onboardUser"
)]
#[post("/onboard-user")]
pub async fn onboard_user(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<OnboardBody>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .onboarding
        .onboard(OnboardRequest {
            subject: identity.into_subject(),
            input: payload.into_inner().into(),
        })
        .await?;

    let response = if outcome.created {
        HttpResponse::Created().json(outcome.user)
    } else {
        HttpResponse::Ok().json(outcome.user)
    };
    Ok(response)
}
