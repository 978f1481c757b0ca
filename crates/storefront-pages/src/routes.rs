//! Location to page resolution.

use reqwest::Url;

use crate::content::StaticPage;

const LOCATION_BASE: &str = "http://storefront.local/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Static(StaticPage),
    /// `/legal/{slug}`. The slug is validated when the page loads.
    Legal(String),
    /// `/reset-password?token=...`. Empty token when the parameter is absent.
    ResetPassword { token: String },
    Unknown(String),
}

impl Route {
    /// Resolve a location (`/path?query#fragment`). Trailing slashes are ignored.
    pub fn resolve(location: &str) -> Self {
        let Some(url) = parse_location(location) else {
            return Route::Unknown(location.to_string());
        };
        let path = normalize(url.path());

        match path {
            "/" => Route::Home,
            "/about" => Route::Static(StaticPage::About),
            "/contact" => Route::Static(StaticPage::Contact),
            "/privacy" => Route::Static(StaticPage::Privacy),
            "/returns" => Route::Static(StaticPage::Returns),
            "/terms" => Route::Static(StaticPage::Terms),
            "/reset-password" => Route::ResetPassword { token: query_param(&url, "token").unwrap_or_default() },
            other => match other.strip_prefix("/legal/") {
                Some(slug) if !slug.is_empty() && !slug.contains('/') => Route::Legal(slug.to_string()),
                _ => Route::Unknown(other.to_string()),
            },
        }
    }
}

/// The path component of a location, as `window.location.pathname` would
/// report it.
pub fn pathname(location: &str) -> String {
    parse_location(location)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|| location.to_string())
}

/// First value of query parameter `name` in `location`.
pub fn query_value(location: &str, name: &str) -> Option<String> {
    parse_location(location).and_then(|url| query_param(&url, name))
}

fn parse_location(location: &str) -> Option<Url> {
    Url::parse(LOCATION_BASE).ok()?.join(location).ok()
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
