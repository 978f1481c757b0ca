//! CMS-backed content pages (privacy policy, terms, return policy...).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Brand name appended to document titles.
pub const SITE_NAME: &str = "Mirvaa Fashions";

/// A CMS page as returned by `GET /cms/{slug}`.
///
/// The backend sends more fields (`id`, `slug`, `created_at`); only the
/// ones the storefront renders are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPage {
    pub title: String,
    /// Markdown source.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// `None` when the backend omitted the field or sent something that
    /// is not a timestamp. Only the date line depends on it.
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CmsPage {
    /// `<title> - Mirvaa Fashions`
    pub fn document_title(&self) -> String {
        format!("{} - {}", self.title, SITE_NAME)
    }

    /// Meta description, falling back to the page title.
    pub fn description(&self) -> &str {
        match self.meta_description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => &self.title,
        }
    }

    /// Calendar date of the last update (UTC).
    pub fn updated_on(&self) -> Option<NaiveDate> {
        self.updated_at.map(|at| at.date_naive())
    }
}

/// Parse a backend timestamp. Offset-less values are UTC.
///
/// Accepts RFC 3339, naive ISO date-times (`T` or space separated, any
/// fractional precision) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => parse_timestamp(&s),
        _ => None,
    })
}

/// A validated CMS slug: non-empty, lowercase ASCII letters, digits, `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("invalid character {ch:?} in slug '{slug}'")]
    InvalidChar { slug: String, ch: char },
}

impl Slug {
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }
        if let Some(ch) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidChar { slug: raw.to_string(), ch });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// API path relative to the base, e.g. `cms/privacy-policy`.
    pub fn api_path(&self) -> String {
        format!("cms/{}", self.0)
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
