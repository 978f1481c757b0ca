//! Scoped HTTP client for the storefront API.
//!
//! An [`ApiClient`] is a reqwest client bound to the API base URL and to a
//! [`TokenLookup`]. Every request it builds is decorated with the token
//! that lookup returns *at build time*.
//!
//! Status codes are not interpreted on the raw paths ([`ApiClient::get`],
//! [`ApiClient::post`]); the `*_json` helpers turn non-2xx responses into
//! [`ApiError::Status`] for the caller to handle. Nothing is retried.

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_types::ErrorBody;
use tracing::Instrument;

use crate::config::ClientConfig;
use crate::tokens::{Scope, TokenLookup, decorate};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Status { status: StatusCode, detail: Option<String> },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl ApiError {
    /// HTTP status, for [`ApiError::Status`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Backend-provided `detail` message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Connection refused, DNS failure, timeout: the server never answered.
    pub fn is_network(&self) -> bool {
        match self {
            ApiError::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// The backend's message, or `fallback` when it gave none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// HTTP client bound to the API base and a token scope.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    api_base: Url,
    scope: Scope,
    tokens: Arc<dyn TokenLookup>,
}

impl ApiClient {
    /// Build a client with its own connection pool.
    pub fn new(config: &ClientConfig, scope: Scope, tokens: Arc<dyn TokenLookup>) -> Result<Self, ApiError> {
        let http = build_http(config)?;
        Ok(Self::with_http(http, config.api_base().clone(), scope, tokens))
    }

    /// Build a client over an existing reqwest client.
    pub fn with_http(http: reqwest::Client, api_base: Url, scope: Scope, tokens: Arc<dyn TokenLookup>) -> Self {
        Self { inner: Arc::new(Inner { http, api_base, scope, tokens }) }
    }

    pub fn scope(&self) -> Scope {
        self.inner.scope
    }

    pub fn api_base(&self) -> &Url {
        &self.inner.api_base
    }

    /// Resolve `path` against the API base. Paths may not leave the base.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidPath { path: path.to_string(), reason: reason.to_string() };

        let relative = path.trim_start_matches('/');
        let url = self
            .inner
            .api_base
            .join(relative)
            .map_err(|e| invalid(&e.to_string()))?;
        if !url.as_str().starts_with(self.inner.api_base.as_str()) {
            return Err(invalid("escapes the API base"));
        }
        Ok(url)
    }

    /// A request builder with auth and trace headers applied.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let mut request = decorate(self.inner.http.request(method, url), self.inner.tokens.as_ref());
        for (name, value) in storefront_telemetry::trace_headers() {
            request = request.header(name, value);
        }
        Ok(request)
    }

    /// Send a built request. The status code is left to the caller.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        match request.send().await {
            Ok(response) => {
                tracing::debug!(scope = %self.inner.scope, status = %response.status(), "response");
                Ok(response)
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(scope = %self.inner.scope, error = %e, "network error or server not responding");
                }
                Err(e.into())
            }
        }
    }

    /// `GET path`, raw response.
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        self.call::<()>(Method::GET, path, None).await
    }

    /// `POST path` with a JSON body, raw response.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        self.call(Method::POST, path, Some(body)).await
    }

    /// `GET path`, decode a 2xx JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = check_status(self.get(path).await?).await?;
        Ok(response.json().await?)
    }

    /// `POST path`, decode a 2xx JSON body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = check_status(self.post(path, body).await?).await?;
        Ok(response.json().await?)
    }

    /// `POST path`, require 2xx, ignore the body.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        check_status(self.post(path, body).await?).await?;
        Ok(())
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let span = tracing::info_span!("api.request", scope = %self.inner.scope, method = %method, path);
        async {
            let mut request = self.request(method, path)?;
            if let Some(body) = body {
                request = request.json(body);
            }
            self.send(request).await
        }
        .instrument(span)
        .await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("scope", &self.inner.scope)
            .field("api_base", &self.inner.api_base.as_str())
            .finish_non_exhaustive()
    }
}

/// Turn a non-2xx response into [`ApiError::Status`], reading `{detail}`.
pub async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message());
    Err(ApiError::Status { status, detail })
}

pub(crate) fn build_http(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .gzip(true)
        .user_agent(concat!("storefront-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ApiError::Build)
}
