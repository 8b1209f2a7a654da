//! Cross-origin middleware for browser clients.
//!
//! Preflight `OPTIONS` requests are answered directly with `204`; every other
//! response carrying an `Origin` header gains `Access-Control-Allow-Origin`.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{self, HeaderValue};
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "authorization, content-type, trace-id";
const MAX_AGE_SECONDS: &str = "600";

/// CORS middleware allowing a single configured origin, or any origin.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use listshare::middleware::Cors;
///
/// let app = App::new().wrap(Cors::new(Some("https://lists.example.test".into())));
/// ```
#[derive(Clone)]
pub struct Cors {
    origin: HeaderValue,
}

impl Cors {
    /// Allow `origin`, or every origin when `None`.
    pub fn new(origin: Option<String>) -> Self {
        let value = origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .and_then(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(%error, origin, "invalid CORS origin; allowing any origin");
                    None
                }
            })
            .unwrap_or_else(|| HeaderValue::from_static("*"));
        Self { origin: value }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service,
            origin: self.origin.clone(),
        }))
    }
}

/// Service wrapper produced by [`Cors`].
pub struct CorsMiddleware<S> {
    service: S,
    origin: HeaderValue,
}

fn is_preflight(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key(header::ORIGIN)
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let origin = self.origin.clone();

        if is_preflight(&req) {
            let response = HttpResponse::NoContent()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
                .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
                .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
                .insert_header((header::ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECONDS))
                .finish();
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let has_origin = req.headers().contains_key(header::ORIGIN);
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if has_origin {
                let headers = res.headers_mut();
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                headers.insert(
                    header::ACCESS_CONTROL_EXPOSE_HEADERS,
                    HeaderValue::from_static("trace-id"),
                );
            }
            Ok(res.map_into_left_body())
        })
    }
}
