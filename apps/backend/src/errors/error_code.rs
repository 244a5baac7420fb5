//! Error codes for the marketplace backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes surfaced in problem-details responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token failed verification (bad structure, algorithm, signature or expired)
    UnauthorizedInvalidJwt,
    /// Username/password pair did not match
    InvalidCredentials,

    // Request Validation
    /// Field-level validation failure
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Request body exceeds the accepted size
    PayloadTooLarge,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Username already registered
    UsernameTaken,

    // System Errors
    /// Internal server error
    Internal,
    /// Token could not be signed
    TokenSigningFailed,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",

            Self::Internal => "INTERNAL",
            Self::TokenSigningFailed => "TOKEN_SIGNING_FAILED",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
