use tracing::warn;

use crate::auth::jwt::TokenError;
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

/// Log a bearer token that failed verification.
///
/// The precise failure kind is recorded here only; clients get a generic 401.
/// The token itself is never logged.
pub fn token_rejected(error: &TokenError, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        kind = error.kind(),
        error = %error,
        path,
        "Token verification failed"
    );
}

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, username: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %Redacted(username),
        reason,
        "Authentication failure"
    );
}
