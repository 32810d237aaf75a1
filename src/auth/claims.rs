// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::AuthError;
use super::roles::Role;

/// Claims embedded in an issued bearer token.
///
/// This is the single canonical claims shape: `sub` carries the principal id
/// as a string (per RFC 7519 the subject is a StringOrURI) and is normalized
/// back to an integer on verification. A token whose `role` is missing or
/// unrecognized fails deserialization and is rejected, never defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the principal id, stringified
    pub sub: String,

    /// Principal's email
    pub email: String,

    /// Principal's display name
    pub name: String,

    /// Principal's role
    pub role: Role,

    /// Clinic the principal is bound to (staff only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated principal extracted from a verified JWT.
///
/// This is the primary type used throughout the application to represent
/// the authenticated user making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Principal id (normalized from the `sub` claim)
    pub user_id: i64,

    /// Principal's email
    pub email: String,

    /// Principal's display name
    pub name: String,

    /// Principal's role
    pub role: Role,

    /// Clinic binding (staff only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,

    /// Token expiration (Unix timestamp, used for validation, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Build from verified claims, normalizing the subject to its integer id.
    pub fn from_claims(claims: Claims) -> Result<Self, AuthError> {
        let user_id: i64 = claims.sub.parse().map_err(|_| AuthError::InvalidSubject)?;

        Ok(Self {
            user_id,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            clinic_id: claims.clinic_id,
            expires_at: claims.exp,
        })
    }

    /// Check if this principal is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            sub: "42".to_string(),
            email: "jane@x.com".to_string(),
            name: "Jane".to_string(),
            role: Role::Receptionist,
            clinic_id: Some(7),
            iat: 1700000000,
            exp: 1700086400,
        }
    }

    #[test]
    fn from_claims_normalizes_subject() {
        let user = AuthenticatedUser::from_claims(sample_claims()).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.role, Role::Receptionist);
        assert_eq!(user.clinic_id, Some(7));
    }

    #[test]
    fn from_claims_rejects_non_numeric_subject() {
        let mut claims = sample_claims();
        claims.sub = "user_abc".to_string();
        let err = AuthenticatedUser::from_claims(claims).unwrap_err();
        assert_eq!(err, AuthError::InvalidSubject);
    }

    #[test]
    fn claims_without_role_fail_deserialization() {
        let json = r#"{"sub":"1","email":"a@b.c","name":"A","iat":0,"exp":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn claims_with_unknown_role_fail_deserialization() {
        let json =
            r#"{"sub":"1","email":"a@b.c","name":"A","role":"superuser","iat":0,"exp":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn is_admin_checks_role() {
        let mut claims = sample_claims();
        claims.role = Role::Admin;
        assert!(AuthenticatedUser::from_claims(claims).unwrap().is_admin());
    }
}
