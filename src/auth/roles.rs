// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Roles
///
/// - `Admin` - Full access to every endpoint, across all clinics
/// - `Receptionist` - Staff member bound to a clinic, manages that clinic's records
/// - `Doctor` - Staff member bound to a clinic
/// - `Patient` - Normal user, can only access their own data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Clinic receptionist (staff, tenant-bound)
    Receptionist,
    /// Clinic doctor (staff, tenant-bound)
    Doctor,
    /// Patient (owns only their own records)
    Patient,
}

impl Role {
    /// Staff roles are bound to a clinic; a doctor must reference one at
    /// registration time.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Doctor | Role::Receptionist)
    }

    /// Parse role from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "receptionist" => Some(Role::Receptionist),
            "doctor" => Some(Role::Doctor),
            "patient" => Some(Role::Patient),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is Patient (least privilege for authenticated users).
    fn default() -> Self {
        Role::Patient
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Receptionist => write!(f, "receptionist"),
            Role::Doctor => write!(f, "doctor"),
            Role::Patient => write!(f, "patient"),
        }
    }
}
