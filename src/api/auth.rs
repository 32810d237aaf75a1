// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    models::{LoginRequest, RegisterRequest, SessionResponse},
    state::AppState,
};

/// Register a new user and return an authenticated session.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Validation failure or missing/unknown clinic"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = state.sessions().register(request).await?;
    tracing::info!(user_id = session.user.id, role = %session.user.role, "user registered");
    Ok((StatusCode::CREATED, Json(session)))
}

/// Verify credentials and return an authenticated session.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated", body = SessionResponse),
        (status = 401, description = "Invalid email or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.sessions().login(request).await?;
    tracing::debug!(user_id = session.user.id, "user logged in");
    Ok(Json(session))
}
