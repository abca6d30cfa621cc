//! Bearer token authentication middleware
//!
//! Verifies the `Authorization: Bearer` access token on wrapped routes and
//! injects an [`AuthContext`] into the request. Verification is purely
//! signature-based; the refresh token store is not consulted, so a revoked
//! session keeps its access until the short access window runs out.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;

use sigil_core::services::SignedTokenCodec;

/// Identity taken from a verified access token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject claim: the account's email address
    pub subject: String,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Middleware factory guarding routes behind a valid access token
pub struct JwtAuth {
    codec: Arc<SignedTokenCodec>,
}

impl JwtAuth {
    pub fn new(codec: Arc<SignedTokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            codec: Arc::clone(&self.codec),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    codec: Arc<SignedTokenCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let codec = Arc::clone(&self.codec);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Err(ErrorUnauthorized("Missing or malformed Authorization header"))
                }
            };

            let claims = codec
                .verify_access(&token)
                .map_err(|e| ErrorUnauthorized(e.to_string()))?;

            req.extensions_mut().insert(AuthContext {
                subject: claims.subject().to_string(),
            });

            service.call(req).await
        })
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            extract_bearer_token(&req),
            Some("test_token_123".to_string())
        );
    }

    #[test]
    fn test_extract_bearer_token_without_scheme() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_bearer_token_without_header() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_bearer_token_empty_value() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);
    }
}
