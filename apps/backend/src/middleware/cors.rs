use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy for the browser frontend.
///
/// Only the configured origins are allowed; the `Authorization` header must
/// be allowed so the SPA can send its bearer token.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .supports_credentials()
        .max_age(12 * 60 * 60);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
