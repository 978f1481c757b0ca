//! Login, logout and password reset.
//!
//! [`AuthApi`] owns the token lifecycle: it is the only code that writes
//! the `token`/`adminToken` slots the scoped clients read from.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use storefront_types::{
    AdminLoginRequest, AdminProfile, AdminTokenResponse, LoginRequest, RegisterRequest,
    ResetPasswordRequest, TokenResponse, User,
};

use crate::api::ApiError;
use crate::clients::ApiClients;
use crate::constants::{
    ADMIN_LOGIN_PATH, ADMIN_PROFILE_KEY, ADMIN_TOKEN_KEY, LOGIN_PATH, ME_PATH, REGISTER_PATH,
    RESET_PASSWORD_PATH, USER_PROFILE_KEY, USER_TOKEN_KEY,
};
use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AuthError {
    /// The backend's `detail`, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Api(e) => e.user_message(fallback),
            _ => fallback.to_string(),
        }
    }
}

/// Auth endpoints plus the persistent slots they fill.
#[derive(Debug, Clone)]
pub struct AuthApi {
    clients: ApiClients,
    persistent: Arc<dyn KeyValueStore>,
}

impl AuthApi {
    pub fn new(clients: ApiClients, persistent: Arc<dyn KeyValueStore>) -> Self {
        Self { clients, persistent }
    }

    /// `POST /auth/login`, then store the token and profile.
    #[tracing::instrument(skip(self, password), name = "auth.login")]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let request = LoginRequest { email: email.to_string(), password: password.to_string() };
        let response: TokenResponse = self.clients.user.post_json(LOGIN_PATH, &request).await?;
        self.store_user_session(&response)?;
        tracing::info!(user = %response.user.id, "logged in");
        Ok(response.user)
    }

    /// `POST /auth/register`. A successful registration is also a login.
    #[tracing::instrument(skip(self, request), name = "auth.register", fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        let response: TokenResponse = self.clients.user.post_json(REGISTER_PATH, request).await?;
        self.store_user_session(&response)?;
        tracing::info!(user = %response.user.id, "registered");
        Ok(response.user)
    }

    /// `GET /auth/me`, refreshing the cached profile.
    #[tracing::instrument(skip(self), name = "auth.me")]
    pub async fn me(&self) -> Result<User, AuthError> {
        let user: User = self.clients.user.get_json(ME_PATH).await?;
        self.persistent.set(USER_PROFILE_KEY, &serde_json::to_string(&user)?)?;
        Ok(user)
    }

    /// Forget the user token and profile. Purely local.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.persistent.remove(USER_TOKEN_KEY)?;
        self.persistent.remove(USER_PROFILE_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }

    /// `POST /admin/login`, then store the admin token and profile.
    #[tracing::instrument(skip(self, password), name = "auth.admin_login")]
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<AdminProfile, AuthError> {
        let request = AdminLoginRequest { username: username.to_string(), password: password.to_string() };
        let response: AdminTokenResponse = self.clients.admin.post_json(ADMIN_LOGIN_PATH, &request).await?;
        let profile = AdminProfile::from(&response);
        self.persistent.set(ADMIN_TOKEN_KEY, &response.token)?;
        self.persistent.set(ADMIN_PROFILE_KEY, &serde_json::to_string(&profile)?)?;
        tracing::info!(admin = %profile.username, role = %profile.role, "admin logged in");
        Ok(profile)
    }

    pub fn admin_logout(&self) -> Result<(), AuthError> {
        self.persistent.remove(ADMIN_TOKEN_KEY)?;
        self.persistent.remove(ADMIN_PROFILE_KEY)?;
        tracing::info!("admin logged out");
        Ok(())
    }

    /// `POST /auth/reset-password`. Any 2xx is success.
    #[tracing::instrument(skip_all, name = "auth.reset_password")]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let body = ResetPasswordRequest { token: token.to_string(), new_password: new_password.to_string() };
        self.clients.user.post_unit(RESET_PASSWORD_PATH, &body).await?;
        Ok(())
    }

    /// Cached user profile, if logged in.
    pub fn current_user(&self) -> Option<User> {
        self.cached(USER_TOKEN_KEY, USER_PROFILE_KEY)
    }

    /// Cached admin profile, if logged in as admin.
    pub fn current_admin(&self) -> Option<AdminProfile> {
        self.cached(ADMIN_TOKEN_KEY, ADMIN_PROFILE_KEY)
    }

    fn store_user_session(&self, response: &TokenResponse) -> Result<(), AuthError> {
        self.persistent.set(USER_TOKEN_KEY, &response.token)?;
        self.persistent.set(USER_PROFILE_KEY, &serde_json::to_string(&response.user)?)?;
        Ok(())
    }

    // A profile without its token is stale; both must be present.
    fn cached<T: DeserializeOwned>(&self, token_key: &str, profile_key: &str) -> Option<T> {
        self.persistent.get(token_key).filter(|t| !t.is_empty())?;
        let raw = self.persistent.get(profile_key)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::debug!(key = profile_key, error = %e, "ignoring unreadable cached profile");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;

    fn api() -> (AuthApi, Arc<MemoryStore>) {
        let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
        let store = Arc::new(MemoryStore::new());
        let clients = ApiClients::new(&config, store.clone()).unwrap();
        (AuthApi::new(clients, store.clone()), store)
    }

    #[test]
    fn cached_profile_needs_token() {
        let (auth, store) = api();
        let user = User { id: "u1".into(), email: "a@b.c".into(), name: "Asha".into(), phone: None };
        store.set(USER_PROFILE_KEY, &serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(auth.current_user(), None);

        store.set(USER_TOKEN_KEY, "t").unwrap();
        assert_eq!(auth.current_user(), Some(user));

        auth.logout().unwrap();
        assert_eq!(auth.current_user(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_profile_is_ignored() {
        let (auth, store) = api();
        store.set(ADMIN_TOKEN_KEY, "t").unwrap();
        store.set(ADMIN_PROFILE_KEY, "{oops").unwrap();
        assert_eq!(auth.current_admin(), None);
    }

    #[test]
    fn admin_logout_leaves_user_session() {
        let (auth, store) = api();
        store.set(USER_TOKEN_KEY, "u").unwrap();
        store.set(ADMIN_TOKEN_KEY, "a").unwrap();
        auth.admin_logout().unwrap();
        assert_eq!(store.get(USER_TOKEN_KEY).as_deref(), Some("u"));
        assert_eq!(store.get(ADMIN_TOKEN_KEY), None);
    }

    #[test]
    fn error_messages_prefer_detail() {
        let err = AuthError::Api(ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            detail: Some("Invalid or expired token".into()),
        });
        assert_eq!(err.user_message("Reset failed"), "Invalid or expired token");
        let err = AuthError::Storage(StorageError::Encode(serde_json::from_str::<u8>("x").unwrap_err()));
        assert_eq!(err.user_message("Reset failed"), "Reset failed");
    }
}
