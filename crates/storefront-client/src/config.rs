//! Client configuration: backend origin, timeout, storage location.
//!
//! Resolution order, later wins:
//! 1. `~/.config/storefront/config.ron` (optional)
//! 2. `STOREFRONT_BACKEND_URL`, `STOREFRONT_HTTP_TIMEOUT_MS`, `STOREFRONT_DATA_DIR`
//!
//! A missing backend origin is an error. The client never guesses one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::constants::{
    API_PATH, APP_DIR_NAME, BACKEND_URL_ENV, CONFIG_FILE_NAME, DATA_DIR_ENV,
    DEFAULT_REQUEST_TIMEOUT, TIMEOUT_ENV,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("backend origin is not configured (set {var} or backend_url in {file})")]
    MissingBackendOrigin { var: &'static str, file: String },
    #[error("invalid backend origin '{value}': {reason}")]
    InvalidBackendOrigin { value: String, reason: String },
    #[error("invalid request timeout '{value}': expected a positive number of milliseconds")]
    InvalidTimeout { value: String },
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// On-disk config file. Every field is optional.
///
/// ```ron
/// (
///     backend_url: Some("https://shop-backend.example.com"),
///     timeout_ms: Some(5000),
/// )
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub backend_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn parse(path: &Path, source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Read the file if it exists. A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }
}

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    backend_origin: Url,
    api_base: Url,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Configuration for an explicit origin with default timeout and data dir.
    pub fn new(backend_origin: &str) -> Result<Self, ConfigError> {
        let (backend_origin, api_base) = derive_api_base(backend_origin)?;
        Ok(Self {
            backend_origin,
            api_base,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            data_dir: default_data_dir(),
        })
    }

    /// Config file at the default location, then process env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match default_config_path() {
            Some(path) => ConfigFile::read(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Process env only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(ConfigFile::default(), |key| std::env::var(key).ok())
    }

    /// Merge a config file with env-style overrides from `lookup`.
    pub fn resolve(file: ConfigFile, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let origin = lookup(BACKEND_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(file.backend_url)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingBackendOrigin {
                var: BACKEND_URL_ENV,
                file: default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| CONFIG_FILE_NAME.to_string()),
            })?;

        let mut config = Self::new(&origin)?;

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout { value: raw.clone() })?;
            config.timeout = Duration::from_millis(ms);
        } else if let Some(ms) = file.timeout_ms {
            if ms == 0 {
                return Err(ConfigError::InvalidTimeout { value: ms.to_string() });
            }
            config.timeout = Duration::from_millis(ms);
        }

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        } else if let Some(dir) = file.data_dir {
            config.data_dir = dir;
        }

        tracing::debug!(api_base = %config.api_base, timeout = ?config.timeout, "client config resolved");
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// The origin as configured, e.g. `https://backend.example.com`.
    pub fn backend_origin(&self) -> &Url {
        &self.backend_origin
    }

    /// `<origin>/api/`, always ending in `/` so relative joins stay under it.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Persistent storage file inside the data dir.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(crate::constants::STORAGE_FILE_NAME)
    }
}

/// `~/.config/storefront/config.ron` (platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `~/.local/share/storefront` (platform equivalent), or `./.storefront`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".storefront"))
}

fn derive_api_base(raw: &str) -> Result<(Url, Url), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBackendOrigin { value: raw.to_string(), reason };

    let trimmed = raw.trim();
    let origin = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match origin.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if origin.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    if origin.query().is_some() || origin.fragment().is_some() {
        return Err(invalid("origin must not carry a query or fragment".into()));
    }

    let base = format!("{}{}/", trimmed.trim_end_matches('/'), API_PATH);
    let api_base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    Ok((origin, api_base))
}
