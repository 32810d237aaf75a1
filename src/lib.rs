// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clinic Server - Multi-Tenant Clinic Authentication Service
//!
//! Registration, login, signed-token issuance/validation and role- plus
//! tenant-scoped access control for clinic staff and patients.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credentials, tokens, roles and the access guard
//! - `store` - In-memory principal/clinic store
//! - `config` - Environment configuration (fail-loud signing secret)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
