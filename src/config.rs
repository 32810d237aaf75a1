// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup. The signing
//! secret is mandatory and validated up front: a missing, short or
//! placeholder secret aborts startup instead of silently falling back to a
//! default.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Token signing secret (min 32 bytes, non-placeholder) | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TOKEN_TTL_SECS` | Token lifetime in seconds | `86400` (24h) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use crate::auth::token::DEFAULT_TOKEN_TTL_SECS;

/// Minimum accepted signing-secret length in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Secrets that ship in examples and must never reach production.
const PLACEHOLDER_SECRETS: &[&str] = &["secret", "changeme", "dev-secret", "jwt-secret"];

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set; refusing to start without a signing secret")]
    MissingSecret,
    #[error("JWT_SECRET is too short (minimum {MIN_SECRET_LEN} bytes)")]
    SecretTooShort,
    #[error("JWT_SECRET is a known placeholder value; supply a real secret")]
    PlaceholderSecret,
    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process-wide configuration, injected explicitly where needed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token signing secret.
    pub jwt_secret: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from the environment, validating the secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;
        validate_secret(&jwt_secret)?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => 8080,
        };
        let token_ttl_secs = match env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "TOKEN_TTL_SECS",
                value: raw,
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            jwt_secret,
            host,
            port,
            token_ttl_secs,
        })
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.is_empty() {
        return Err(ConfigError::MissingSecret);
    }
    if PLACEHOLDER_SECRETS.contains(&secret.to_lowercase().as_str()) {
        return Err(ConfigError::PlaceholderSecret);
    }
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::SecretTooShort);
    }
    Ok(())
}
