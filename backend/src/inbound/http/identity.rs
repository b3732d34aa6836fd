//! Verified caller identity for HTTP handlers.
//!
//! Authentication happens upstream: an external identity provider verifies
//! the caller and a trusted gateway forwards the subject in the
//! `x-identity-subject` header. This extractor only reads that header; it
//! performs no verification of its own and must never be exposed without
//! the gateway in front.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::{Error, ExternalId};

/// Request header carrying the verified identity-provider subject.
pub const IDENTITY_HEADER: &str = "x-identity-subject";

/// The verified identity attached to a request.
///
/// # Examples
/// ```
/// use backend::inbound::http::identity::Identity;
/// use backend::inbound::http::ApiResult;
/// use actix_web::HttpResponse;
///
/// async fn handler(identity: Identity) -> ApiResult<HttpResponse> {
///     Ok(HttpResponse::Ok().body(identity.subject().to_string()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: ExternalId,
}

impl Identity {
    /// The identity-provider subject the gateway vouched for.
    pub fn subject(&self) -> &ExternalId {
        &self.subject
    }

    /// Consume the identity, yielding the subject.
    pub fn into_subject(self) -> ExternalId {
        self.subject
    }

    fn from_request_sync(req: &HttpRequest) -> Result<Self, Error> {
        let raw = req
            .headers()
            .get(IDENTITY_HEADER)
            .ok_or_else(|| Error::unauthorized("authentication required"))?
            .to_str()
            .map_err(|_| Error::unauthorized("identity subject is not valid ASCII"))?;
        let subject = ExternalId::new(raw)
            .map_err(|_| Error::unauthorized("identity subject must not be empty"))?;
        Ok(Self { subject })
    }
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_sync(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;
    use crate::domain::ErrorCode;

    #[actix_web::test]
    async fn extracts_the_subject_header() {
        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, "user_2zJeVe"))
            .to_http_request();
        let identity = Identity::from_request_sync(&req).expect("identity extracted");
        assert_eq!(identity.subject().as_str(), "user_2zJeVe");
    }

    #[actix_web::test]
    async fn a_missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let error = Identity::from_request_sync(&req).expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn a_blank_subject_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, "   "))
            .to_http_request();
        let error = Identity::from_request_sync(&req).expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
