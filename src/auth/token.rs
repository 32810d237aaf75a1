// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed bearer-token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret injected at
//! construction time from [`Config`](crate::config::Config). Verification is
//! a pure computation over the immutable signing key; a failure denies the
//! single request and nothing else.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{AuthenticatedUser, Claims};
use super::error::AuthError;
use crate::store::StoredUser;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Encoder/decoder for signed session tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenCodec {
    /// Create a codec from the signing secret and token lifetime in seconds.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a signed token for a principal, expiring `ttl_secs` from now.
    pub fn issue(&self, user: &StoredUser) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            clinic_id: user.clinic_id,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::MalformedToken)
    }

    /// Verify signature and expiry, returning the authenticated principal.
    ///
    /// Malformed tokens, bad signatures and expired tokens all fail; callers
    /// need not distinguish them. A missing or unrecognized role claim fails
    /// deserialization, and a non-numeric subject fails normalization.
    /// Expiry is checked with the clock-skew leeway applied, so a token is
    /// accepted up to `CLOCK_SKEW_LEEWAY` seconds past its `exp`.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        AuthenticatedUser::from_claims(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::StoredUser;

    const TEST_SECRET: &str = "unit-test-signing-secret-0123456789abcdef";

    fn sample_user(id: i64, role: Role) -> StoredUser {
        StoredUser {
            id,
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            password_hash: "$argon2id$irrelevant".to_string(),
            role,
            clinic_id: if role.is_staff() { Some(3) } else { None },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips() {
        let codec = TokenCodec::new(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS);
        let token = codec.issue(&sample_user(42, Role::Doctor)).unwrap();

        let user = codec.verify(&token).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "jane@x.com");
        assert_eq!(user.role, Role::Doctor);
        assert_eq!(user.clinic_id, Some(3));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Expiry beyond the clock-skew leeway.
        let codec = TokenCodec::new(TEST_SECRET, -(CLOCK_SKEW_LEEWAY as i64) - 60);
        let token = codec.issue(&sample_user(1, Role::Patient)).unwrap();

        assert!(matches!(codec.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let codec = TokenCodec::new(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS);
        let other = TokenCodec::new("another-signing-secret-entirely-here", DEFAULT_TOKEN_TTL_SECS);
        let token = codec.issue(&sample_user(1, Role::Patient)).unwrap();

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let codec = TokenCodec::new(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS);
        let token = codec.issue(&sample_user(1, Role::Patient)).unwrap();

        // Flip the role inside the payload segment without re-signing.
        let mut parts: Vec<&str> = token.split('.').collect();
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let altered = String::from_utf8(payload)
            .unwrap()
            .replace("patient", "admin");
        let altered_b64 = URL_SAFE_NO_PAD.encode(altered.as_bytes());
        parts[1] = &altered_b64;
        let forged = parts.join(".");

        assert!(codec.verify(&forged).is_err());
    }

    #[test]
    fn single_byte_mutation_is_rejected() {
        let codec = TokenCodec::new(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS);
        let token = codec.issue(&sample_user(1, Role::Patient)).unwrap();

        // Mutate one signature character.
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let mutated = String::from_utf8(bytes).unwrap();

        assert!(codec.verify(&mutated).is_err());
    }

    #[test]
    fn garbage_token_is_malformed() {
        let codec = TokenCodec::new(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS);
        assert!(matches!(
            codec.verify("not-a-jwt"),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(codec.verify(""), Err(AuthError::MalformedToken)));
    }
}
