//! Claims carried inside issued tokens and the identity handed to handlers.

use serde::{Deserialize, Serialize};

/// Payload of every session token.
///
/// `username` is a snapshot taken at issuance; a later rename does not
/// touch tokens already in circulation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub user_id: u64,
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Identity inserted into request extensions by the authentication
/// middleware once a token has been verified. Scoped to a single request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: u64,
    pub username: String,
}

impl From<IdentityClaims> for RequestIdentity {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}
