// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! The public user projection ([`UserResponse`]) deliberately has no
//! password-hash field; the internal [`StoredUser`](crate::store::StoredUser)
//! record never crosses the API boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;
use crate::store::{StoredClinic, StoredUser};

// =============================================================================
// Auth Models
// =============================================================================

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address (globally unique, case-insensitive).
    pub email: String,
    /// Plaintext password; hashed before any persistence.
    pub password: String,
    /// Requested role (`patient`, `doctor`, `receptionist`, `admin`).
    /// Defaults to `patient`. Carried as a plain string so an unknown
    /// role is a 400 validation failure, not a body-deserialization
    /// rejection.
    #[serde(default)]
    pub role: Option<String>,
    /// Clinic binding. Required for doctors.
    #[serde(default)]
    pub clinic_id: Option<i64>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address (case-insensitive).
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Session envelope returned by registration and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Signed bearer token, valid for 24 hours.
    pub access_token: String,
    /// Public projection of the authenticated principal.
    pub user: UserResponse,
}

// =============================================================================
// User Models
// =============================================================================

/// Public projection of a principal. Never includes the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Principal id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Authorization role.
    pub role: Role,
    /// Clinic binding (staff only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
}

impl From<&StoredUser> for UserResponse {
    fn from(user: &StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            clinic_id: user.clinic_id,
        }
    }
}

// =============================================================================
// Clinic Models
// =============================================================================

/// Request body for `POST /v1/clinics`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateClinicRequest {
    /// Clinic display name.
    pub name: String,
}

/// Public projection of a clinic.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClinicResponse {
    /// Clinic id.
    pub id: i64,
    /// Clinic display name.
    pub name: String,
}

impl From<&StoredClinic> for ClinicResponse {
    fn from(clinic: &StoredClinic) -> Self {
        Self {
            id: clinic.id,
            name: clinic.name.clone(),
        }
    }
}
