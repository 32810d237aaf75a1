// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential issuance, credential verification, token handling and access
//! control for the clinic API.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`POST /auth/register`) or logs in (`POST /auth/login`)
//! 2. Server verifies credentials against the argon2 hash in the store and
//!    returns a signed HS256 JWT (24h expiry)
//! 3. Client sends `Authorization: Bearer <token>` on protected routes
//! 4. The access guard verifies signature and expiry, checks the route's
//!    allowed-role set and, where declared, the principal's clinic binding
//!
//! ## Security
//!
//! - Passwords are stored only as salted Argon2id PHC strings
//! - The signing secret is injected from configuration and validated at
//!   startup; there is no built-in fallback
//! - Failed logins return one uniform error for unknown email and wrong
//!   password
//! - Clock skew tolerance for token expiry is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod password;
pub mod roles;
pub mod session;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
pub use roles::Role;
pub use session::SessionService;
pub use token::TokenCodec;
