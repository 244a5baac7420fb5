use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::auth::claims::IdentityClaims;
use crate::state::security_config::SecurityConfig;

/// Why a token could not be issued or verified.
///
/// Verification kinds stay distinct so callers can log them precisely;
/// the HTTP layer flattens them into one generic 401.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signed with an unexpected algorithm")]
    UnknownSigningMethod,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Stable snake_case label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "malformed_token",
            TokenError::UnknownSigningMethod => "unknown_signing_method",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::Signing(_) => "signing_error",
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Mint an HS256 session token for `user_id`/`username`, valid from `now`
/// for `security.session_ttl`.
pub fn issue_token(
    user_id: u64,
    username: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Signing("system clock is before the Unix epoch".to_string()))?
        .as_secs() as i64;

    let ttl = i64::try_from(security.session_ttl.as_secs())
        .map_err(|_| TokenError::Signing("session lifetime out of range".to_string()))?;
    let exp = iat
        .checked_add(ttl)
        .ok_or_else(|| TokenError::Signing("expiry overflows".to_string()))?;

    let claims = IdentityClaims {
        user_id,
        username: username.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a session token against `security` as of `now` and return its claims.
///
/// Checks run in a fixed order: structure, algorithm, signature, claims,
/// expiry. The claim schema is only enforced once the signature holds, so a
/// foreign-key token is always `InvalidSignature` whatever its payload says.
/// A token is accepted while `now < exp`.
pub fn verify_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<IdentityClaims, TokenError> {
    let header = inspect_structure(token)?;

    // Algorithm pinning happens before any key material is used.
    match Algorithm::from_str(&header.alg) {
        Ok(alg) if alg == security.algorithm => {}
        _ => return Err(TokenError::UnknownSigningMethod),
    }

    let mut validation = Validation::new(security.algorithm);
    // exp is compared against the caller's clock below, not the library's.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidAlgorithm => TokenError::UnknownSigningMethod,
        // Header and payload already decoded cleanly, so a base64 failure
        // here can only come from the signature segment.
        ErrorKind::InvalidSignature | ErrorKind::Base64(_) => TokenError::InvalidSignature,
        // Signature verified; the payload does not fit `IdentityClaims`.
        _ => TokenError::MalformedToken,
    })?;

    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    if now_secs >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Three base64url segments: a header naming `alg` and a JSON object payload.
fn inspect_structure(token: &str) -> Result<RawHeader, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::MalformedToken);
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::MalformedToken)?;
    let header: RawHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::MalformedToken)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::MalformedToken)?;
    serde_json::from_slice::<Map<String, Value>>(&payload_bytes)
        .map_err(|_| TokenError::MalformedToken)?;

    Ok(header)
}
