use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod profile;

/// Public routes plus the `/api` scope guarded by `JwtExtract`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .configure(auth::configure_routes)
        .service(
            web::scope("/api")
                .wrap(JwtExtract)
                .configure(profile::configure_routes),
        )
        .default_service(web::to(not_found));
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Endpoint not found"))
}
