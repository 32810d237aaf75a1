// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{Auth, AuthenticatedUser, Role},
    models::UserResponse,
    state::AppState,
};

/// Response for GET /v1/users/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// Principal id
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Authorization role
    pub role: Role,
    /// Clinic binding (staff only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
}

impl From<AuthenticatedUser> for UserMeResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            clinic_id: user.clinic_id,
        }
    }
}

/// Get the current authenticated user's information.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserMeResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<UserMeResponse> {
    Json(user.into())
}

/// List all users. Admin only (enforced by the access guard).
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - admin role required"),
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    let store = state.store.read().await;
    let users = store.list_users().iter().map(UserResponse::from).collect();
    Json(users)
}
