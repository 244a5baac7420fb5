pub mod claims;
pub mod jwt;

pub use claims::{IdentityClaims, RequestIdentity};
pub use jwt::{issue_token, verify_token, TokenError};
