//! Expiry check for the backend's JWT session tokens.
//!
//! Tokens are bearer credentials; only the `exp` claim is read and nothing is verified.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// The `exp` claim of `token`, if it is a well-formed JWT.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}

/// Whether `token` is a JWT that has not expired at `now`.
pub fn is_valid_at(token: &str, now: DateTime<Utc>) -> bool {
    expires_at(token).is_some_and(|exp| exp > now)
}

#[cfg(test)]
pub(crate) fn token_expiring_at(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":"u1","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_exp_claim() {
        let token = token_expiring_at(1_900_000_000);
        assert_eq!(expires_at(&token).unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn expired_and_malformed_tokens_are_invalid() {
        let now = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
        assert!(is_valid_at(&token_expiring_at(1_900_000_000), now));
        assert!(!is_valid_at(&token_expiring_at(1_700_000_000), now));
        assert!(!is_valid_at("not-a-jwt", now));
        assert!(!is_valid_at("a.%%%.c", now));
    }
}
