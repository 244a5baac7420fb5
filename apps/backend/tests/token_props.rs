mod common;

use std::time::Duration;

use common::{t0, TEST_SECRET};
use market_backend::{issue_token, verify_token, SecurityConfig, TokenError};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use proptest::prelude::*;
use serde_json::json;

fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_issued_tokens_verify_to_same_identity(
        user_id in any::<u64>(),
        username in "[a-zA-Z0-9_]{1,32}",
        offset in 0u64..1_000_000,
    ) {
        let security = security();
        let now = t0() + Duration::from_secs(offset);
        let token = issue_token(user_id, &username, now, &security).unwrap();
        let claims = verify_token(&token, now, &security).unwrap();

        prop_assert_eq!(claims.user_id, user_id);
        prop_assert_eq!(claims.username, username);
    }

    #[test]
    fn prop_token_valid_exactly_within_ttl(elapsed in 0u64..200_000) {
        let security = security();
        let ttl = security.session_ttl.as_secs();
        let token = issue_token(7, "bob", t0(), &security).unwrap();
        let result = verify_token(&token, t0() + Duration::from_secs(elapsed), &security);

        if elapsed < ttl {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err(), TokenError::Expired);
        }
    }

    #[test]
    fn prop_altered_signature_is_rejected(index in any::<prop::sample::Index>()) {
        let security = security();
        let token = issue_token(7, "bob", t0(), &security).unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;
        let pos = sig_start + index.index(token.len() - sig_start);

        let mut bytes = token.into_bytes();
        bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert_eq!(
            verify_token(&tampered, t0(), &security).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn prop_foreign_key_is_invalid_signature_for_any_payload(
        user_id in prop_oneof![Just(json!(42)), Just(json!("42")), Just(json!(null))],
        username in "[a-z]{0,12}",
        with_iat in any::<bool>(),
    ) {
        let mut payload = json!({
            "user_id": user_id,
            "username": username,
            "exp": 1_800_000_000,
        });
        if with_iat {
            payload["iat"] = json!(1_700_000_000);
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(b"attacker-key"),
        )
        .unwrap();

        prop_assert_eq!(
            verify_token(&token, t0(), &security()).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn prop_foreign_key_never_verifies(other in "[a-z]{8,40}") {
        prop_assume!(other.as_bytes() != TEST_SECRET);
        let foreign = SecurityConfig::new(other.as_bytes());
        let token = issue_token(7, "bob", t0(), &foreign).unwrap();

        prop_assert_eq!(
            verify_token(&token, t0(), &security()).unwrap_err(),
            TokenError::InvalidSignature
        );
    }
}
