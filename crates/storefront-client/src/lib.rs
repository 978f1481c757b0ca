//! Storefront API client library
//!
//! Provides the scoped HTTP clients (user and admin) that attach bearer
//! tokens from persistent storage, the auth flows that fill that storage,
//! and a fire-and-forget analytics tracker.
//!
//! Nothing here is global. Build a [`ClientConfig`], open the storage
//! areas, and hand the resulting [`ApiClients`] to whoever needs them.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod constants;
pub mod storage;
pub mod tokens;

pub use analytics::{CurrentLocation, EventTracker, LocationSource, TrackError, TrackOutcome};
pub use api::{ApiClient, ApiError, check_status};
pub use auth::{AuthApi, AuthError};
pub use clients::ApiClients;
pub use config::{ClientConfig, ConfigError, ConfigFile, default_config_path, default_data_dir};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use tokens::{Scope, StoredToken, TokenLookup, decorate};

// Re-export wire types so callers need only one import path.
pub use storefront_types as types;
