// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential issuance (registration) and verification (login).
//!
//! All validation runs before any persistence side effect: a failed
//! registration leaves no record behind. The store's uniqueness guard is
//! authoritative; a duplicate-email conflict surfacing from the store maps
//! to the same 409 as the upfront check, so concurrent registrations for
//! one email can never both succeed.
//!
//! Login returns one indistinguishable 401 for "no such user" and "wrong
//! password", and burns a dummy hash verification in the missing-user path
//! so the two paths do comparable work.

use std::sync::{Arc, OnceLock};

use tokio::sync::RwLock;
use tokio::task;

use super::password;
use super::roles::Role;
use super::token::TokenCodec;
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use crate::store::{InMemoryStore, NewUser, StoreError, StoredUser};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Uniform message for both failed-login causes.
const BAD_CREDENTIALS: &str = "invalid email or password";

/// Registration and login over the shared store and token codec.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<RwLock<InMemoryStore>>,
    tokens: Arc<TokenCodec>,
}

impl SessionService {
    pub fn new(store: Arc<RwLock<InMemoryStore>>, tokens: Arc<TokenCodec>) -> Self {
        Self { store, tokens }
    }

    /// Register a new principal and return an authenticated session.
    ///
    /// Exactly one record is created on success; no record on any failure.
    pub async fn register(&self, request: RegisterRequest) -> Result<SessionResponse, ApiError> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        // The role arrives as a plain string; an unknown value is a
        // validation failure, never a default.
        let role = match request.role.as_deref() {
            None => Role::default(),
            Some(raw) => {
                Role::from_str(raw).ok_or_else(|| ApiError::bad_request("invalid role"))?
            }
        };

        // Staff clinic binding: doctors must name a clinic; any supplied
        // binding must reference an existing clinic.
        if role == Role::Doctor && request.clinic_id.is_none() {
            return Err(ApiError::bad_request("clinic_id is required for doctors"));
        }
        if let Some(clinic_id) = request.clinic_id {
            let store = self.store.read().await;
            if !store.clinic_exists(clinic_id) {
                return Err(ApiError::bad_request("clinic not found"));
            }
        }

        // Upfront duplicate check for a fast 409. Not authoritative: the
        // store re-checks under its write lock.
        if self
            .store
            .read()
            .await
            .find_user_by_email(&request.email)
            .is_some()
        {
            return Err(ApiError::conflict("email already registered"));
        }

        let password = request.password.clone();
        let password_hash = task::spawn_blocking(move || password::hash(&password))
            .await
            .map_err(|_| ApiError::internal("password hashing failed"))?
            .map_err(|_| ApiError::internal("password hashing failed"))?;

        let created = self
            .store
            .write()
            .await
            .create_user(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
                role,
                clinic_id: request.clinic_id,
            })
            .map_err(|e| match e {
                // Late conflicts from the authoritative guard look the same
                // as the upfront check.
                StoreError::EmailTaken(_) => ApiError::conflict("email already registered"),
                StoreError::ClinicNotFound(_) => ApiError::bad_request("clinic not found"),
            })?;

        self.session_for(&created)
    }

    /// Verify credentials and return an authenticated session.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionResponse, ApiError> {
        let user = self
            .store
            .read()
            .await
            .find_user_by_email(&request.email);

        let Some(user) = user else {
            // Same work and same error as a wrong password.
            let password = request.password;
            let _ = task::spawn_blocking(move || password::verify(&password, dummy_hash())).await;
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        };

        let password = request.password;
        let stored_hash = user.password_hash.clone();
        let verified = task::spawn_blocking(move || password::verify(&password, &stored_hash))
            .await
            .map_err(|_| ApiError::internal("password verification failed"))?;

        if !verified {
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }

        self.session_for(&user)
    }

    fn session_for(&self, user: &StoredUser) -> Result<SessionResponse, ApiError> {
        let access_token = self
            .tokens
            .issue(user)
            .map_err(|_| ApiError::internal("failed to issue token"))?;

        Ok(SessionResponse {
            access_token,
            user: UserResponse::from(user),
        })
    }
}

/// Fixed hash the missing-user login path verifies against.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| password::hash("dummy-credential").unwrap_or_default())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let email = email.trim();
    let invalid = || ApiError::bad_request("invalid email address");

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(invalid());
    };
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
