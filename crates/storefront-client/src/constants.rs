//! Client configuration constants.
//!
//! Centralizes storage keys, env var names and transport defaults.

use std::time::Duration;

/// Path segment appended to the backend origin to form the API base.
pub const API_PATH: &str = "/api";

/// Per-request transport timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Env var holding the backend origin, e.g. `https://api.example.com`.
pub const BACKEND_URL_ENV: &str = "STOREFRONT_BACKEND_URL";

/// Env var overriding [`DEFAULT_REQUEST_TIMEOUT`], in milliseconds.
pub const TIMEOUT_ENV: &str = "STOREFRONT_HTTP_TIMEOUT_MS";

/// Env var overriding the persistent storage directory.
pub const DATA_DIR_ENV: &str = "STOREFRONT_DATA_DIR";

/// Directory name under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "storefront";

/// Config file name inside the config dir.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Persistent storage file name inside the data dir.
pub const STORAGE_FILE_NAME: &str = "storage.json";

// ── Persistent storage keys ─────────────────────────────────────────────────

/// User bearer token.
pub const USER_TOKEN_KEY: &str = "token";

/// Admin bearer token.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

/// Cached user profile (JSON).
pub const USER_PROFILE_KEY: &str = "user";

/// Cached admin profile (JSON).
pub const ADMIN_PROFILE_KEY: &str = "adminData";

// ── Session storage keys ────────────────────────────────────────────────────

/// Analytics session identifier.
pub const SESSION_ID_KEY: &str = "analytics_session_id";

// ── Endpoints (relative to the API base) ────────────────────────────────────

pub const ANALYTICS_EVENTS_PATH: &str = "analytics/events";
pub const RESET_PASSWORD_PATH: &str = "auth/reset-password";
pub const LOGIN_PATH: &str = "auth/login";
pub const REGISTER_PATH: &str = "auth/register";
pub const ME_PATH: &str = "auth/me";
pub const ADMIN_LOGIN_PATH: &str = "admin/login";
