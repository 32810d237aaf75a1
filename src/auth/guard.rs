// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request access guard.
//!
//! Every request to a protected router walks the same states:
//! extract bearer token -> verify claims -> check role against the route's
//! declared allowed-role set -> check tenant scope where the route demands
//! it -> attach the principal to the request.
//!
//! Route policies live in a static table keyed by the router's path pattern
//! instead of per-handler annotations, so the full access matrix is visible
//! in one place.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, Role};
use crate::state::AppState;

/// Access policy for one route pattern.
pub struct RoutePolicy {
    /// Router path pattern, e.g. `/v1/clinics/{clinic_id}/staff`.
    pub route: &'static str,
    /// Roles allowed through. Empty means any authenticated principal.
    pub allowed: &'static [Role],
    /// Whether non-admin staff must match the `{clinic_id}` path parameter
    /// against their own clinic binding.
    pub tenant_scoped: bool,
}

/// The access matrix for all protected routes.
pub const ROUTE_POLICIES: &[RoutePolicy] = &[
    RoutePolicy {
        route: "/v1/users/me",
        allowed: &[],
        tenant_scoped: false,
    },
    RoutePolicy {
        route: "/v1/users",
        allowed: &[Role::Admin],
        tenant_scoped: false,
    },
    RoutePolicy {
        route: "/v1/clinics",
        allowed: &[Role::Admin],
        tenant_scoped: false,
    },
    RoutePolicy {
        route: "/v1/clinics/{clinic_id}/staff",
        allowed: &[Role::Admin, Role::Receptionist],
        tenant_scoped: true,
    },
];

/// Look up the policy for a matched route pattern.
pub fn policy_for(route: &str) -> Option<&'static RoutePolicy> {
    ROUTE_POLICIES.iter().find(|p| p.route == route)
}

/// Pull the token out of the `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Access-guard middleware for protected routers.
///
/// On success the verified [`AuthenticatedUser`](super::AuthenticatedUser)
/// is inserted into the request extensions for handlers and the `Auth`
/// extractor. On failure the request is denied with 401 (no/invalid token)
/// or 403 (role or tenant mismatch); nothing beyond this request is
/// affected.
pub async fn access_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    let user = match state.tokens.verify(token) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    // Routes without a table entry require authentication only.
    let policy = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|p| policy_for(p.as_str()));

    if let Some(policy) = policy {
        if !policy.allowed.is_empty() && !policy.allowed.contains(&user.role) {
            return AuthError::InsufficientPermissions.into_response();
        }

        if policy.tenant_scoped && !user.is_admin() {
            match clinic_param(policy.route, request.uri().path()) {
                Some(clinic_id) if user.clinic_id == Some(clinic_id) => {}
                _ => return AuthError::TenantMismatch.into_response(),
            }
        }
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extract the `{clinic_id}` path parameter by aligning the request path
/// with the route pattern.
fn clinic_param(pattern: &str, path: &str) -> Option<i64> {
    let position = pattern
        .trim_start_matches('/')
        .split('/')
        .position(|segment| segment == "{clinic_id}")?;

    path.trim_start_matches('/')
        .split('/')
        .nth(position)?
        .parse()
        .ok()
}
