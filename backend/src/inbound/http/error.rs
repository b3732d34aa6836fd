//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes. The response envelope carries the ambient request id so
//! clients can quote it when reporting failures.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::request_id::RequestId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Response header carrying the correlation identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict | ErrorCode::InvalidState => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire envelope serialised into error responses.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        // Internal diagnostics stay in the logs, not on the wire.
        error!(error = %error, "internal error returned to client");
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let request_id = RequestId::current();
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = request_id {
            builder.insert_header((REQUEST_ID_HEADER, id.to_string()));
        }
        let safe = redact_if_internal(self);
        builder.json(ErrorBody {
            code: safe.code(),
            message: safe.message(),
            details: safe.details(),
            request_id: request_id.map(|id| id.to_string()),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;
    use rstest::rstest;
    use serde_json::{json, Value};

    use crate::domain::{Error, ErrorCode};

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("nope"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("raced"), StatusCode::CONFLICT)]
    #[case(Error::invalid_state("settled"), StatusCode::CONFLICT)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_status(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("connection string leaked").error_response();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("response body to bytes");
        let payload: Value = serde_json::from_slice(&bytes).expect("payload deserialises");
        assert_eq!(payload["code"], json!("internal_error"));
        assert_eq!(payload["message"], json!("Internal server error"));
        assert!(payload.get("details").is_none());
    }

    #[actix_web::test]
    async fn client_errors_keep_their_details() {
        let response = Error::conflict("job is already assigned")
            .with_details(json!({ "jobId": 7 }))
            .error_response();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("response body to bytes");
        let payload: Value = serde_json::from_slice(&bytes).expect("payload deserialises");
        assert_eq!(payload["message"], json!("job is already assigned"));
        assert_eq!(payload["details"]["jobId"], json!(7));
    }

    #[test]
    fn every_code_has_a_status() {
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::InvalidState,
            ErrorCode::InternalError,
        ] {
            assert!(Error::new(code, "x").status_code().as_u16() >= 400);
        }
    }
}
