// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! One-way password hashing.
//!
//! Credentials are hashed with Argon2id and a random per-call salt, producing
//! a PHC-format string. Verification is constant-time and treats a corrupted
//! stored hash as a plain mismatch rather than an error.
//!
//! Hashing is CPU-bound; callers on the async runtime run these functions
//! through `tokio::task::spawn_blocking`.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use rand_core::OsRng;

/// Error producing a password hash.
#[derive(Debug, thiserror::Error)]
#[error("failed to hash password: {0}")]
pub struct HashError(String);

/// Hash a plaintext password into a PHC-format Argon2id string.
///
/// Each call draws a fresh 16-byte salt, so the same input yields different
/// strings; any of them verifies against the original plaintext.
pub fn hash(plaintext: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| HashError(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Verify a plaintext password against a stored PHC string.
///
/// Returns `false` on mismatch and on a malformed stored hash; never panics.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
