//! Bearer token lookup and request decoration.
//!
//! A client never holds a token itself. It holds a [`TokenLookup`] and asks
//! it on every request, so a login or logout is visible on the very next
//! call without any invalidation step.

use std::sync::Arc;

use reqwest::RequestBuilder;

use crate::constants::{ADMIN_TOKEN_KEY, USER_TOKEN_KEY};
use crate::storage::{KeyValueStore, StorageResult};

/// Which stored token a client attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
    User,
    Admin,
}

impl Scope {
    /// Persistent storage key holding this scope's token.
    pub fn storage_key(self) -> &'static str {
        match self {
            Scope::User => USER_TOKEN_KEY,
            Scope::Admin => ADMIN_TOKEN_KEY,
        }
    }
}

/// Source of the current bearer token, consulted per request.
pub trait TokenLookup: Send + Sync {
    /// The token to attach right now, or `None` to send unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

impl<F> TokenLookup for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn bearer_token(&self) -> Option<String> {
        self()
    }
}

/// A token slot in a storage area.
#[derive(Debug, Clone)]
pub struct StoredToken {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
}

impl StoredToken {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self { store, key }
    }

    /// The slot for `scope`'s token.
    pub fn for_scope(store: Arc<dyn KeyValueStore>, scope: Scope) -> Self {
        Self::new(store, scope.storage_key())
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn set(&self, token: &str) -> StorageResult<()> {
        self.store.set(self.key, token)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(self.key)
    }
}

impl TokenLookup for StoredToken {
    fn bearer_token(&self) -> Option<String> {
        // An empty slot counts as logged out
        self.store.get(self.key).filter(|t| !t.is_empty())
    }
}

/// Attach `Authorization: Bearer <token>` if `tokens` has one right now.
pub fn decorate(request: RequestBuilder, tokens: &dyn TokenLookup) -> RequestBuilder {
    match tokens.bearer_token() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
