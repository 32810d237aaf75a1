// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::session::SessionService;
use crate::auth::token::TokenCodec;
use crate::config::Config;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(store: InMemoryStore, config: &Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(TokenCodec::new(&config.jwt_secret, config.token_ttl_secs)),
        }
    }

    /// Credential issuance/verification service over this state.
    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.store.clone(), self.tokens.clone())
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Test-only state with a fixed signing secret and default TTL.
    fn default() -> Self {
        Self {
            store: Arc::new(RwLock::new(InMemoryStore::new())),
            tokens: Arc::new(TokenCodec::new(
                "unit-test-signing-secret-0123456789abcdef",
                crate::auth::token::DEFAULT_TOKEN_TTL_SECS,
            )),
        }
    }
}
