use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::auth::claims::RequestIdentity;
use crate::error::AppError;

/// Authenticated caller for the current request.
///
/// Read from the [`RequestIdentity`] that `JwtExtract` stores in request
/// extensions, so it only resolves on routes wrapped by that middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: u64,
    pub username: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<RequestIdentity>().cloned();

        ready(match identity {
            Some(RequestIdentity { user_id, username }) => Ok(CurrentUser { user_id, username }),
            None => {
                warn!(path = %req.path(), "CurrentUser requested on a route without JwtExtract");
                Err(AppError::unauthorized())
            }
        })
    }
}
