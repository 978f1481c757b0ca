//! The user/admin client pair.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError, build_http};
use crate::config::ClientConfig;
use crate::storage::KeyValueStore;
use crate::tokens::{Scope, StoredToken, TokenLookup};

/// Both scoped clients, sharing one connection pool.
///
/// The two clients read different storage keys, so a user login never
/// authenticates admin requests and vice versa.
#[derive(Debug, Clone)]
pub struct ApiClients {
    pub user: ApiClient,
    pub admin: ApiClient,
}

impl ApiClients {
    /// Clients whose tokens come from `persistent` storage.
    pub fn new(config: &ClientConfig, persistent: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        Self::with_lookups(
            config,
            Arc::new(StoredToken::for_scope(persistent.clone(), Scope::User)),
            Arc::new(StoredToken::for_scope(persistent, Scope::Admin)),
        )
    }

    /// Clients with arbitrary token sources.
    pub fn with_lookups(
        config: &ClientConfig,
        user_tokens: Arc<dyn TokenLookup>,
        admin_tokens: Arc<dyn TokenLookup>,
    ) -> Result<Self, ApiError> {
        let http = build_http(config)?;
        let api_base = config.api_base().clone();
        Ok(Self {
            user: ApiClient::with_http(http.clone(), api_base.clone(), Scope::User, user_tokens),
            admin: ApiClient::with_http(http, api_base, Scope::Admin, admin_tokens),
        })
    }

    pub fn get(&self, scope: Scope) -> &ApiClient {
        match scope {
            Scope::User => &self.user,
            Scope::Admin => &self.admin,
        }
    }
}
