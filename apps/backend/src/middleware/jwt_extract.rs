//! Bearer-token authentication middleware.
//!
//! Wraps protected scopes (`/api/*`). Every request must carry
//! `Authorization: Bearer <token>`; the token is verified and the resulting
//! [`RequestIdentity`] is stored in request extensions for handlers to read
//! through `CurrentUser`. Anything else is answered with 401 here and never
//! reaches the wrapped service.

use std::rc::Rc;
use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use thiserror::Error;
use tracing::debug;

use crate::auth::claims::RequestIdentity;
use crate::auth::jwt::{verify_token, TokenError};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Why the gate refused a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("missing or malformed Authorization header")]
    MalformedAuthorizationHeader,
    #[error("invalid or expired token: {0}")]
    InvalidOrExpiredToken(TokenError),
}

/// Decide whether a request carrying `header_value` may proceed at `now`.
pub fn authenticate(
    header_value: Option<&HeaderValue>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<RequestIdentity, AuthRejection> {
    let token = extract_bearer(header_value)?;

    verify_token(token, now, security)
        .map(RequestIdentity::from)
        .map_err(AuthRejection::InvalidOrExpiredToken)
}

/// Pull the credential out of a `Bearer <token>` header value.
///
/// Exactly two single-space separated parts, the first being the literal
/// `Bearer`, the second non-empty.
pub fn extract_bearer(header_value: Option<&HeaderValue>) -> Result<&str, AuthRejection> {
    let value = header_value
        .ok_or(AuthRejection::MalformedAuthorizationHeader)?
        .to_str()
        .map_err(|_| AuthRejection::MalformedAuthorizationHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthRejection::MalformedAuthorizationHeader),
    }
}

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AppError::internal("AppState not available to auth middleware");
                return Ok(req.into_response(err.error_response()).map_into_right_body());
            };

            let now = app_state.clock.now();
            let outcome = authenticate(
                req.headers().get(header::AUTHORIZATION),
                now,
                &app_state.security,
            );

            match outcome {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(rejection) => {
                    match &rejection {
                        AuthRejection::MalformedAuthorizationHeader => {
                            debug!(
                                path = %req.path(),
                                "rejected request without a usable bearer header"
                            );
                        }
                        AuthRejection::InvalidOrExpiredToken(kind) => {
                            security::token_rejected(kind, req.path());
                        }
                    }

                    let err = AppError::from(rejection);
                    Ok(req.into_response(err.error_response()).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;
    use crate::auth::jwt::issue_token;

    fn hv(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn test_extract_bearer_accepts_two_part_value() {
        let value = hv("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(Some(&value)), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_rejects_bad_shapes() {
        assert_eq!(
            extract_bearer(None),
            Err(AuthRejection::MalformedAuthorizationHeader)
        );

        for raw in [
            "",
            "Bearer",
            "Bearer ",
            "Token xyz",
            "bearer xyz",
            "Basic abc123",
            "abc123",
            "Bearer  xyz",
            "Bearer xyz extra",
        ] {
            let value = hv(raw);
            assert_eq!(
                extract_bearer(Some(&value)),
                Err(AuthRejection::MalformedAuthorizationHeader),
                "header {raw:?}"
            );
        }
    }

    #[test]
    fn test_extract_bearer_rejects_non_utf8() {
        let value = HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap();
        assert_eq!(
            extract_bearer(Some(&value)),
            Err(AuthRejection::MalformedAuthorizationHeader)
        );
    }

    #[test]
    fn test_authenticate_success_and_expiry() {
        let security = SecurityConfig::for_tests();
        let t0 = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let token = issue_token(42, "alice", t0, &security).unwrap();
        let value = hv(&format!("Bearer {token}"));

        let identity = authenticate(Some(&value), t0, &security).unwrap();
        assert_eq!(
            identity,
            RequestIdentity {
                user_id: 42,
                username: "alice".to_string()
            }
        );

        let later = t0 + security.session_ttl;
        assert_eq!(
            authenticate(Some(&value), later, &security),
            Err(AuthRejection::InvalidOrExpiredToken(TokenError::Expired))
        );
    }

    #[test]
    fn test_authenticate_carries_underlying_kind() {
        let security = SecurityConfig::for_tests();
        let value = hv("Bearer not-a-token");
        assert_eq!(
            authenticate(Some(&value), UNIX_EPOCH, &security),
            Err(AuthRejection::InvalidOrExpiredToken(
                TokenError::MalformedToken
            ))
        );
    }
}
