#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod users;
pub mod web;

// Re-exports for public API
pub use auth::claims::{IdentityClaims, RequestIdentity};
pub use auth::jwt::{issue_token, verify_token, TokenError};
pub use config::Config;
pub use error::AppError;
pub use extractors::CurrentUser;
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::{authenticate, AuthRejection, JwtExtract};
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
