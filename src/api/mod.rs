// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::guard::access_guard,
    models::{
        ClinicResponse, CreateClinicRequest, LoginRequest, RegisterRequest, SessionResponse,
        UserResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod clinics;
pub mod users;

pub fn router(state: AppState) -> Router {
    // Protected routes carry full paths (merged, not nested) so the access
    // guard sees the same matched-path patterns as the policy table.
    let protected = Router::new()
        .route("/v1/users/me", get(users::get_current_user))
        .route("/v1/users", get(users::list_users))
        .route("/v1/clinics", post(clinics::create_clinic))
        .route("/v1/clinics/{clinic_id}/staff", get(clinics::list_staff))
        .route_layer(middleware::from_fn_with_state(state.clone(), access_guard));

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness probe; requires no authentication.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        users::get_current_user,
        users::list_users,
        clinics::create_clinic,
        clinics::list_staff
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            SessionResponse,
            UserResponse,
            CreateClinicRequest,
            ClinicResponse,
            users::UserMeResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User information"),
        (name = "Clinics", description = "Clinic and staff management")
    )
)]
struct ApiDoc;
