//! Middleware attaching a request-scoped correlation identifier.
//!
//! Each incoming request gets a UUID request id, either taken from an
//! `x-request-id` header supplied by an upstream proxy or freshly
//! generated, stored in task-local storage for correlation across logs
//! and error responses.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestId::scope`] when spawning new tasks or moving work onto
//! blocking threads so the active identifier propagates correctly.

use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::future::Future;
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

task_local! {
    static REQUEST_ID: RequestId;
}

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request correlation identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use backend::middleware::request_id::RequestId;
///
/// async fn handler() {
///     if let Some(id) = RequestId::current() {
///         tracing::info!(request_id = %id, "handling");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub(crate) Uuid);

impl RequestId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Returns the current request identifier if one is in scope.
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { REQUEST_ID.try_with(|id| *id).ok() }

    /// Reuse an upstream-supplied identifier when it parses as a UUID,
    /// otherwise mint a fresh one.
    fn for_request(req: &ServiceRequest) -> Self {
        req.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Execute the provided future with the supplied identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use backend::middleware::request_id::RequestId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let request_id: RequestId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = RequestId::scope(request_id, async move { RequestId::current() }).await;
    /// assert_eq!(observed, Some(request_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(request_id: RequestId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Middleware attaching a request-scoped UUID and echoing an
/// `x-request-id` header on every response.
///
/// Handlers can read the identifier via [`RequestId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::Correlate;
///
/// let app = App::new().wrap(Correlate);
/// ```
#[derive(Clone)]
pub struct Correlate;

impl<S, B> Transform<S, ServiceRequest> for Correlate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelateMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlate`].
///
/// Applications should not use this type directly.
pub struct CorrelateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId::for_request(&req);
        let header_value = request_id.to_string();
        let fut = self.service.call(req);
        Box::pin(RequestId::scope(request_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        request_id = %request_id,
                        "failed to encode request identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}
