//! Application context: the one place clients and storage are built.
//!
//! Pages and flows receive what they need from an [`AppContext`] instead
//! of reaching for globals. Two storage areas back it:
//!
//! - **persistent**: tokens and cached profiles ([`FileStore`] by default)
//! - **session**: the analytics session id ([`MemoryStore`])

use std::sync::Arc;

use storefront_client::{
    ApiClients, ApiError, AuthApi, ClientConfig, ConfigError, CurrentLocation, EventTracker,
    FileStore, KeyValueStore, MemoryStore, StorageError, TrackOutcome,
};
use tokio::task::JoinHandle;

use crate::layout::ShellContext;
use crate::legal::LegalPage;
use crate::reset_password::ResetPasswordPage;
use crate::routes::{Route, pathname};
use crate::ui::Navigator;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to build API clients: {0}")]
    Client(#[from] ApiError),
}

/// Result of navigating somewhere.
#[derive(Debug)]
pub struct Visit {
    pub route: Route,
    /// The background page-view submission. `None` outside a Tokio runtime.
    pub page_view: Option<JoinHandle<TrackOutcome>>,
}

#[derive(Debug, Clone)]
pub struct AppContext {
    config: ClientConfig,
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    clients: ApiClients,
    auth: AuthApi,
    tracker: EventTracker,
    location: CurrentLocation,
}

impl AppContext {
    /// Config file plus env, file-backed persistent storage.
    pub fn load() -> Result<Self, ContextError> {
        Self::open(ClientConfig::load()?)
    }

    /// Env-only config, file-backed persistent storage.
    pub fn from_env() -> Result<Self, ContextError> {
        Self::open(ClientConfig::from_env()?)
    }

    /// Open persistent storage under `config.data_dir`.
    pub fn open(config: ClientConfig) -> Result<Self, ContextError> {
        let persistent = Arc::new(FileStore::open(config.storage_path())?);
        Self::new(config, persistent, Arc::new(MemoryStore::new()))
    }

    pub fn new(
        config: ClientConfig,
        persistent: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ContextError> {
        let clients = ApiClients::new(&config, persistent.clone())?;
        let auth = AuthApi::new(clients.clone(), persistent.clone());
        let location = CurrentLocation::default();
        let tracker = EventTracker::new(clients.user.clone(), session.clone(), Arc::new(location.clone()));

        tracing::info!(api_base = %config.api_base(), "storefront context ready");
        Ok(Self { config, persistent, session, clients, auth, tracker, location })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn clients(&self) -> &ApiClients {
        &self.clients
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn tracker(&self) -> &EventTracker {
        &self.tracker
    }

    pub fn location(&self) -> &CurrentLocation {
        &self.location
    }

    pub fn persistent(&self) -> &Arc<dyn KeyValueStore> {
        &self.persistent
    }

    pub fn session(&self) -> &Arc<dyn KeyValueStore> {
        &self.session
    }

    /// Move to `location`: record it, fire a page view, resolve the route.
    pub fn visit(&self, location: &str) -> Visit {
        let path = pathname(location);
        self.location.set(path.clone());

        let page_view = match tokio::runtime::Handle::try_current() {
            Ok(_) => Some(self.tracker.spawn_page_view(path)),
            Err(_) => {
                tracing::debug!(%path, "no runtime, page view not tracked");
                None
            }
        };

        let route = Route::resolve(location);
        tracing::debug!(?route, "visit");
        Visit { route, page_view }
    }

    /// Chrome for the current visitor and location.
    pub fn shell_context(&self, cart_count: u32) -> ShellContext {
        ShellContext { user: self.auth.current_user(), path: self.location.get(), cart_count }
    }

    /// A legal page for `slug`, fetched through the user client.
    pub async fn legal_page(&self, slug: &str) -> LegalPage {
        let mut page = LegalPage::new(slug);
        page.load(&self.clients.user).await;
        page
    }

    pub fn reset_password_page(&self, token: &str) -> ResetPasswordPage {
        ResetPasswordPage::new(token)
    }
}

impl Navigator for AppContext {
    fn navigate(&self, path: &str) {
        let _ = self.visit(path);
    }
}
