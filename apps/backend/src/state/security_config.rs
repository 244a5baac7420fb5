use std::time::Duration;

use jsonwebtoken::Algorithm;
use rand::RngCore;

/// Fixed session lifetime for issued tokens.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for JWT security settings.
///
/// Built once at startup and shared read-only by issuance and verification.
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// The only algorithm tokens may be signed or verified with
    pub algorithm: Algorithm,
    /// Lifetime of an issued token
    pub session_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Random 32-byte secret, for tests and throwaway instances.
    pub fn for_tests() -> Self {
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }
}

// Keep the secret out of Debug output.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}
