// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clinic endpoints.
//!
//! Clinic CRUD proper lives outside this service; creation is carried here
//! so doctor registration has a tenant to bind to, and the staff listing
//! exercises tenant scoping (receptionists see only their own clinic, the
//! guard enforces it).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{ClinicResponse, CreateClinicRequest, UserResponse},
    state::AppState,
    store::StoreError,
};

/// Create a clinic. Admin only (enforced by the access guard).
#[utoipa::path(
    post,
    path = "/v1/clinics",
    request_body = CreateClinicRequest,
    tag = "Clinics",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Clinic created", body = ClinicResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - admin role required"),
    )
)]
pub async fn create_clinic(
    State(state): State<AppState>,
    Json(request): Json<CreateClinicRequest>,
) -> Result<(StatusCode, Json<ClinicResponse>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("clinic name must not be empty"));
    }

    let clinic = state.store.write().await.create_clinic(request.name.trim());
    tracing::info!(clinic_id = clinic.id, "clinic created");
    Ok((StatusCode::CREATED, Json(ClinicResponse::from(&clinic))))
}

/// List the staff of a clinic.
///
/// Admins may list any clinic; receptionists only their own (the access
/// guard rejects cross-clinic requests with 403).
#[utoipa::path(
    get,
    path = "/v1/clinics/{clinic_id}/staff",
    params(("clinic_id" = i64, Path, description = "Clinic id")),
    tag = "Clinics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Staff of the clinic", body = [UserResponse]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Forbidden - role or clinic mismatch"),
        (status = 404, description = "Clinic not found"),
    )
)]
pub async fn list_staff(
    State(state): State<AppState>,
    Path(clinic_id): Path<i64>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let store = state.store.read().await;
    let staff = store.list_staff(clinic_id).map_err(|e| match e {
        StoreError::ClinicNotFound(_) => ApiError::not_found("Clinic not found"),
        _ => ApiError::internal("failed to list staff"),
    })?;

    Ok(Json(staff.iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::NewUser;

    #[tokio::test]
    async fn create_clinic_returns_201() {
        let state = AppState::default();

        let (status, Json(clinic)) = create_clinic(
            State(state.clone()),
            Json(CreateClinicRequest {
                name: "North Clinic".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(clinic.name, "North Clinic");
        assert!(state.store.read().await.clinic_exists(clinic.id));
    }

    #[tokio::test]
    async fn create_clinic_rejects_blank_name() {
        let err = create_clinic(
            State(AppState::default()),
            Json(CreateClinicRequest {
                name: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_staff_returns_clinic_staff_only() {
        let state = AppState::default();
        let clinic_id = {
            let mut store = state.store.write().await;
            let clinic = store.create_clinic("North");
            store
                .create_user(NewUser {
                    name: "Doc".to_string(),
                    email: "doc@x.com".to_string(),
                    password_hash: "$argon2id$test".to_string(),
                    role: Role::Doctor,
                    clinic_id: Some(clinic.id),
                })
                .unwrap();
            store
                .create_user(NewUser {
                    name: "Pat".to_string(),
                    email: "pat@x.com".to_string(),
                    password_hash: "$argon2id$test".to_string(),
                    role: Role::Patient,
                    clinic_id: None,
                })
                .unwrap();
            clinic.id
        };

        let Json(staff) = list_staff(State(state), Path(clinic_id)).await.unwrap();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].email, "doc@x.com");
    }

    #[tokio::test]
    async fn list_staff_unknown_clinic_is_404() {
        let err = list_staff(State(AppState::default()), Path(99))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
