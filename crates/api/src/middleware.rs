use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use hotelbook_auth::{JwtValidator, TokenValidationError};

use crate::app::errors::ApiError;
use crate::context::RequestContext;
use crate::endpoints::{BoxEndpoint, Endpoint, EndpointRequest, EndpointResponse, Middleware};

/// Verifies the bearer token in the context and attaches the caller identity.
#[derive(Clone)]
pub struct AuthMiddleware {
    jwt: Arc<dyn JwtValidator>,
}

impl AuthMiddleware {
    pub fn new(jwt: Arc<dyn JwtValidator>) -> Self {
        Self { jwt }
    }
}

impl Middleware for AuthMiddleware {
    fn wrap(&self, next: BoxEndpoint) -> BoxEndpoint {
        Arc::new(Authenticated {
            jwt: self.jwt.clone(),
            next,
        })
    }
}

struct Authenticated {
    jwt: Arc<dyn JwtValidator>,
    next: BoxEndpoint,
}

#[async_trait]
impl Endpoint for Authenticated {
    async fn call(
        &self,
        ctx: RequestContext,
        request: EndpointRequest,
    ) -> Result<EndpointResponse, ApiError> {
        let token = ctx.bearer_token().ok_or(TokenValidationError::Missing)?;

        let claims = self.jwt.validate(token).map_err(|e| {
            tracing::debug!(reason = %e, "bearer token rejected");
            e
        })?;

        let ctx = ctx.with_identity(claims.into_user());
        self.next.call(ctx, request).await
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. Anything else yields `None`; the
/// authorization middleware decides what a missing token means.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}

/// One log line per request with method, path, status and latency.
pub async fn log_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let res = next.run(req).await;

    tracing::info!(
        transport = "HTTP",
        %method,
        %path,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    res
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::http::HeaderValue;
    use hotelbook_auth::{HotelClaims, User};
    use hotelbook_bookings::Listing;
    use hotelbook_core::HotelId;

    use super::*;

    /// Accepts exactly one token string.
    struct FixedValidator;

    impl JwtValidator for FixedValidator {
        fn validate(&self, token: &str) -> Result<HotelClaims, TokenValidationError> {
            match token {
                "good" => Ok(HotelClaims {
                    sub: None,
                    name: "H.A. Kerr".to_string(),
                    admin: true,
                    hotel: 123.0,
                }),
                _ => Err(TokenValidationError::SignatureInvalid),
            }
        }
    }

    #[derive(Default)]
    struct CapturingEndpoint {
        seen: Mutex<Option<Option<User>>>,
    }

    #[async_trait]
    impl Endpoint for CapturingEndpoint {
        async fn call(
            &self,
            ctx: RequestContext,
            _request: EndpointRequest,
        ) -> Result<EndpointResponse, ApiError> {
            *self.seen.lock().unwrap() = Some(ctx.identity().cloned());
            Ok(EndpointResponse::Listing(Listing::default()))
        }
    }

    fn wrapped(inner: Arc<CapturingEndpoint>) -> BoxEndpoint {
        AuthMiddleware::new(Arc::new(FixedValidator)).wrap(inner)
    }

    #[tokio::test]
    async fn missing_token_never_reaches_endpoint() {
        let inner = Arc::new(CapturingEndpoint::default());

        let err = wrapped(inner.clone())
            .call(RequestContext::default(), EndpointRequest::Empty)
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Token(TokenValidationError::Missing));
        assert!(inner.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() {
        let inner = Arc::new(CapturingEndpoint::default());
        let ctx = RequestContext::default().with_bearer_token("forged");

        let err = wrapped(inner.clone())
            .call(ctx, EndpointRequest::Empty)
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Token(TokenValidationError::SignatureInvalid));
        assert!(inner.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn valid_token_injects_identity() {
        let inner = Arc::new(CapturingEndpoint::default());
        let ctx = RequestContext::default().with_bearer_token("good");

        wrapped(inner.clone())
            .call(ctx, EndpointRequest::Empty)
            .await
            .unwrap();

        assert_eq!(
            *inner.seen.lock().unwrap(),
            Some(Some(User::new("H.A. Kerr", true, HotelId::new(123))))
        );
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer  xyz "));
        assert_eq!(extract_bearer(&headers), Some("xyz"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer(&headers), None);
    }
}
