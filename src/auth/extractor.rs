// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! Protected routers run the [`access_guard`](super::guard::access_guard)
//! middleware, which verifies the token once and stores the principal in the
//! request extensions; the extractor picks it up from there. Outside the
//! guard it falls back to verifying the bearer token itself.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use super::guard::bearer_token;
use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if the guard middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = bearer_token(&parts.headers)?;
        let user = state.tokens.verify(token)?;

        Ok(Auth(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::state::AppState;
    use axum::http::Request;
    use chrono::Utc;

    fn stored_user(id: i64) -> crate::store::StoredUser {
        crate::store::StoredUser {
            id,
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            password_hash: "$argon2id$irrelevant".to_string(),
            role: Role::Patient,
            clinic_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = AppState::default();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_scheme() {
        let state = AppState::default();
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_issued_token() {
        let state = AppState::default();
        let token = state.tokens.issue(&stored_user(42)).unwrap();
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.user_id, 42);
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let state = AppState::default();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let user = AuthenticatedUser {
            user_id: 7,
            email: "mid@x.com".to_string(),
            name: "Middleware".to_string(),
            role: Role::Admin,
            clinic_id: None,
            expires_at: 0,
        };
        parts.extensions.insert(user);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.user_id, 7);
    }
}
